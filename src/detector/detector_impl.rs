use std::collections::HashSet;

use miette::Result;
use petgraph::algo::tarjan_scc;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use serde::Serialize;

use crate::graph::DependencyGraph;

/// A closed path of dependency edges
///
/// Following `units` in order and stepping from the last back to the first
/// walks the cycle. A single unit is a self-loop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DependencyCycle {
    units: Vec<String>,
}

impl DependencyCycle {
    pub fn new(units: Vec<String>) -> Self {
        Self { units }
    }

    pub fn units(&self) -> &[String] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn is_self_loop(&self) -> bool {
        self.units.len() == 1
    }

    /// Consecutive `(from, to)` pairs, including the edge closing the cycle
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let n = self.units.len();
        (0..n)
            .map(|i| (self.units[i].as_str(), self.units[(i + 1) % n].as_str()))
            .collect()
    }

    /// Render as `a → b → c → a`
    pub fn display_path(&self) -> String {
        let mut path: Vec<&str> = self.units.iter().map(String::as_str).collect();
        if let Some(first) = self.units.first() {
            path.push(first);
        }
        path.join(" → ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

struct Frame {
    node: NodeIndex,
    successors: Vec<NodeIndex>,
    next: usize,
}

/// Depth-first traversal with white/gray/black colouring
///
/// Runs on an explicit stack so deep dependency chains cannot overflow the
/// call stack. Every node is expanded once; each edge into a gray node closes
/// one cycle made of the path slice from that node to the top.
struct Traversal<'g> {
    graph: &'g DependencyGraph,
    color: Vec<Color>,
    position: Vec<Option<usize>>,
    path: Vec<NodeIndex>,
    stack: Vec<Frame>,
    cycles: Vec<DependencyCycle>,
}

impl<'g> Traversal<'g> {
    fn new(graph: &'g DependencyGraph) -> Self {
        let bound = graph.inner().node_count();
        Self {
            graph,
            color: vec![Color::White; bound],
            position: vec![None; bound],
            path: Vec::new(),
            stack: Vec::new(),
            cycles: Vec::new(),
        }
    }

    fn enter(&mut self, node: NodeIndex) {
        self.color[node.index()] = Color::Gray;
        self.position[node.index()] = Some(self.path.len());
        self.path.push(node);
        self.stack.push(Frame {
            node,
            successors: self.graph.sorted_successors(node),
            next: 0,
        });
    }

    fn leave(&mut self) {
        if let Some(frame) = self.stack.pop() {
            self.color[frame.node.index()] = Color::Black;
            self.position[frame.node.index()] = None;
            self.path.pop();
        }
    }

    fn record_cycle(&mut self, start: usize) {
        let units = self.path[start..]
            .iter()
            .map(|&idx| self.graph.node(idx).name().to_string())
            .collect();
        self.cycles.push(DependencyCycle::new(units));
    }

    fn run(mut self) -> Vec<DependencyCycle> {
        for root in self.graph.sorted_nodes() {
            if self.color[root.index()] != Color::White {
                continue;
            }
            self.enter(root);

            while let Some(frame) = self.stack.last_mut() {
                let Some(&successor) = frame.successors.get(frame.next) else {
                    self.leave();
                    continue;
                };
                frame.next += 1;

                match self.color[successor.index()] {
                    Color::White => self.enter(successor),
                    Color::Gray => {
                        if let Some(start) = self.position[successor.index()] {
                            self.record_cycle(start);
                        }
                    }
                    Color::Black => {}
                }
            }
        }

        self.cycles
    }
}

/// Detector for finding dependency cycles in a [`DependencyGraph`]
///
/// Cycles are found by a depth-first search over every node, visiting roots
/// and successors in name order so results are stable. Separately, Tarjan's
/// strongly connected components mark every edge that lies on *some* cycle,
/// which may include edges no reported cycle passes through.
///
/// Edge and node queries refer to indices of the graph last passed to
/// [`CycleDetector::detect_cycles`].
#[derive(Debug, Clone, Default)]
pub struct CycleDetector {
    cycles: Vec<DependencyCycle>,
    cyclic_edges: HashSet<(NodeIndex, NodeIndex)>,
    cyclic_nodes: HashSet<NodeIndex>,
}

impl CycleDetector {
    /// Create a new cycle detector
    pub fn new() -> Self {
        Self::default()
    }

    /// Detect all cycles in the dependency graph, replacing earlier results
    pub fn detect_cycles(&mut self, graph: &DependencyGraph) -> Result<()> {
        self.cycles = Traversal::new(graph).run();
        self.cyclic_edges.clear();
        self.cyclic_nodes.clear();

        let inner = graph.inner();
        let mut component_of = vec![usize::MAX; inner.node_count()];
        for (id, component) in tarjan_scc(inner).into_iter().enumerate() {
            if component.len() < 2 {
                continue;
            }
            for node in component {
                component_of[node.index()] = id;
                self.cyclic_nodes.insert(node);
            }
        }

        for edge in inner.edge_references() {
            let (from, to) = (edge.source(), edge.target());
            let same_component = component_of[from.index()] != usize::MAX
                && component_of[from.index()] == component_of[to.index()];
            if from == to || same_component {
                self.cyclic_edges.insert((from, to));
                self.cyclic_nodes.insert(from);
            }
        }

        Ok(())
    }

    /// Get all detected cycles
    pub fn cycles(&self) -> &[DependencyCycle] {
        &self.cycles
    }

    /// Check if any cycles were detected
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    /// Get the number of detected cycles
    pub fn cycle_count(&self) -> usize {
        self.cycles.len()
    }

    /// Whether the edge `from -> to` lies on any cycle
    pub fn is_cycle_edge(&self, from: NodeIndex, to: NodeIndex) -> bool {
        self.cyclic_edges.contains(&(from, to))
    }

    /// Whether `node` lies on any cycle
    pub fn is_cycle_node(&self, node: NodeIndex) -> bool {
        self.cyclic_nodes.contains(&node)
    }

    pub fn cycle_edge_count(&self) -> usize {
        self.cyclic_edges.len()
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::core::BuildUnit;

    fn graph_of(nodes: &[&str], edges: &[(&str, &str)]) -> DependencyGraph {
        let root = Path::new("/repo");
        let mut graph = DependencyGraph::new();
        for name in nodes {
            graph.add_unit(&BuildUnit::new(root, PathBuf::from(format!("/repo/{name}"))));
        }
        for (from, to) in edges {
            let from = graph.unit_index(from).unwrap();
            let to = graph.unit_index(to).unwrap();
            graph.add_dependency(from, to, "dep");
        }
        graph
    }

    fn detect(graph: &DependencyGraph) -> CycleDetector {
        let mut detector = CycleDetector::new();
        detector.detect_cycles(graph).unwrap();
        detector
    }

    #[test]
    fn test_no_cycles_in_linear_graph() {
        let graph = graph_of(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        let detector = detect(&graph);

        assert_eq!(detector.cycle_count(), 0);
        assert!(!detector.has_cycles());
        assert_eq!(detector.cycle_edge_count(), 0);
    }

    #[test]
    fn test_no_cycles_in_diamond() {
        let graph = graph_of(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        );
        assert!(!detect(&graph).has_cycles());
    }

    #[test]
    fn test_three_node_cycle() {
        let graph = graph_of(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        let detector = detect(&graph);

        assert_eq!(detector.cycle_count(), 1);
        assert_eq!(detector.cycles()[0].units(), ["a", "b", "c"]);
        assert_eq!(detector.cycles()[0].display_path(), "a → b → c → a");
        assert_eq!(detector.cycle_edge_count(), 3);
    }

    #[test]
    fn test_self_loop() {
        let graph = graph_of(&["a"], &[("a", "a")]);
        let detector = detect(&graph);

        assert_eq!(detector.cycle_count(), 1);
        assert!(detector.cycles()[0].is_self_loop());
        assert_eq!(detector.cycles()[0].edges(), vec![("a", "a")]);
        let a = graph.unit_index("a").unwrap();
        assert!(detector.is_cycle_edge(a, a));
        assert!(detector.is_cycle_node(a));
    }

    #[test]
    fn test_two_node_cycle_and_disconnected_part() {
        let graph = graph_of(
            &["a", "b", "x", "y"],
            &[("a", "b"), ("b", "a"), ("x", "y")],
        );
        let detector = detect(&graph);

        assert_eq!(detector.cycle_count(), 1);
        let x = graph.unit_index("x").unwrap();
        let y = graph.unit_index("y").unwrap();
        assert!(!detector.is_cycle_edge(x, y));
        assert!(!detector.is_cycle_node(x));
    }

    #[test]
    fn test_overlapping_cycles_share_a_node() {
        let graph = graph_of(
            &["a", "b", "c"],
            &[("a", "b"), ("b", "a"), ("a", "c"), ("c", "a")],
        );
        let detector = detect(&graph);

        assert_eq!(detector.cycle_count(), 2);
        assert_eq!(detector.cycles()[0].units(), ["a", "b"]);
        assert_eq!(detector.cycles()[1].units(), ["a", "c"]);
    }

    #[test]
    fn test_cycle_edges_cover_whole_component() {
        // a -> b -> a is found first; a -> c -> b closes only through a
        // black node, so no reported cycle contains c, yet its edges are
        // still on a cycle.
        let graph = graph_of(
            &["a", "b", "c"],
            &[("a", "b"), ("b", "a"), ("a", "c"), ("c", "b")],
        );
        let detector = detect(&graph);

        assert_eq!(detector.cycle_count(), 1);
        let a = graph.unit_index("a").unwrap();
        let c = graph.unit_index("c").unwrap();
        let b = graph.unit_index("b").unwrap();
        assert!(detector.is_cycle_edge(a, c));
        assert!(detector.is_cycle_edge(c, b));
        assert_eq!(detector.cycle_edge_count(), 4);
    }

    #[test]
    fn test_detection_is_repeatable() {
        let graph = graph_of(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        let mut detector = CycleDetector::new();
        detector.detect_cycles(&graph).unwrap();
        detector.detect_cycles(&graph).unwrap();

        assert_eq!(detector.cycle_count(), 1);
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let names: Vec<String> = (0..2000).map(|i| format!("m{i:05}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut edges: Vec<(&str, &str)> = refs.windows(2).map(|w| (w[0], w[1])).collect();
        edges.push((refs[refs.len() - 1], refs[0]));

        let graph = graph_of(&refs, &edges);
        let detector = detect(&graph);

        assert_eq!(detector.cycle_count(), 1);
        assert_eq!(detector.cycles()[0].len(), 2000);
    }
}
