//! Core graph types
//!
//! This module contains the fundamental data structures used in the dependency
//! graph.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;

use crate::core::BuildUnit;

/// Whether a node is a discovered build unit or a stand-in for a dependency
/// that matched no unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Unit,
    External,
}

/// Node of the dependency graph
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GraphNode {
    name: String,
    kind: NodeKind,
    path: Option<PathBuf>,
}

impl GraphNode {
    pub fn unit(unit: &BuildUnit) -> Self {
        Self {
            name: unit.id().to_string(),
            kind: NodeKind::Unit,
            path: Some(unit.path().to_path_buf()),
        }
    }

    /// External marker carrying the raw dependency string
    pub fn external(raw: impl Into<String>) -> Self {
        Self {
            name: raw.into(),
            kind: NodeKind::External,
            path: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_external(&self) -> bool {
        self.kind == NodeKind::External
    }

    /// Build file backing this node, `None` for external markers
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// A declared dependency between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyEdge {
    /// Raw text of the first declaration that produced this edge
    pub declared_as: String,
}

impl DependencyEdge {
    pub fn new(declared_as: impl Into<String>) -> Self {
        Self {
            declared_as: declared_as.into(),
        }
    }
}

/// Counts describing a built graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub units: usize,
    pub externals: usize,
    pub edges: usize,
    pub self_loops: usize,
    pub isolated_units: usize,
    pub unresolved_declarations: usize,
    pub blank_declarations: usize,
    pub duplicate_declarations: usize,
}

/// Counters the builder records while consuming declarations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct BuildCounters {
    pub unresolved: usize,
    pub blank: usize,
    pub duplicate: usize,
}

/// Directed graph of build units and the dependencies they declare
///
/// Edges between the same ordered pair of nodes are never duplicated.
/// Self-loops are kept and reported through [`DependencyGraph::self_loops`].
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<GraphNode, DependencyEdge>,
    units: HashMap<String, NodeIndex>,
    externals: HashMap<String, NodeIndex>,
    counters: BuildCounters,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a unit node, returning the existing index if the identity is known
    pub fn add_unit(&mut self, unit: &BuildUnit) -> NodeIndex {
        if let Some(&idx) = self.units.get(unit.id()) {
            return idx;
        }
        let idx = self.graph.add_node(GraphNode::unit(unit));
        self.units.insert(unit.id().to_string(), idx);
        idx
    }

    /// Add an external marker, deduplicated by its raw string
    pub fn add_external(&mut self, raw: &str) -> NodeIndex {
        if let Some(&idx) = self.externals.get(raw) {
            return idx;
        }
        let idx = self.graph.add_node(GraphNode::external(raw));
        self.externals.insert(raw.to_string(), idx);
        idx
    }

    /// Add an edge unless the same ordered pair is already connected
    ///
    /// Returns `true` when a new edge was inserted.
    pub fn add_dependency(&mut self, from: NodeIndex, to: NodeIndex, declared_as: &str) -> bool {
        if self.graph.find_edge(from, to).is_some() {
            return false;
        }
        self.graph.add_edge(from, to, DependencyEdge::new(declared_as));
        true
    }

    pub(crate) fn set_counters(&mut self, counters: BuildCounters) {
        self.counters = counters;
    }

    /// The underlying petgraph graph
    pub fn inner(&self) -> &DiGraph<GraphNode, DependencyEdge> {
        &self.graph
    }

    pub fn unit_index(&self, id: &str) -> Option<NodeIndex> {
        self.units.get(id).copied()
    }

    pub fn external_index(&self, raw: &str) -> Option<NodeIndex> {
        self.externals.get(raw).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> &GraphNode {
        &self.graph[idx]
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node indices ordered units first, then externals, each by name
    pub fn sorted_nodes(&self) -> Vec<NodeIndex> {
        let mut nodes: Vec<NodeIndex> = self.graph.node_indices().collect();
        nodes.sort_by(|&a, &b| {
            let (na, nb) = (&self.graph[a], &self.graph[b]);
            (na.kind(), na.name()).cmp(&(nb.kind(), nb.name()))
        });
        nodes
    }

    /// Successors of `node` in the same order as [`Self::sorted_nodes`]
    pub fn sorted_successors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut successors: Vec<NodeIndex> = self.graph.neighbors(node).collect();
        successors.sort_by(|&a, &b| {
            let (na, nb) = (&self.graph[a], &self.graph[b]);
            (na.kind(), na.name()).cmp(&(nb.kind(), nb.name()))
        });
        successors
    }

    /// All edges as `(source, target)` index pairs, ordered by node names
    pub fn sorted_edges(&self) -> Vec<(NodeIndex, NodeIndex)> {
        self.sorted_nodes()
            .into_iter()
            .flat_map(|from| {
                self.sorted_successors(from)
                    .into_iter()
                    .map(move |to| (from, to))
            })
            .collect()
    }

    /// Set of node names with their kinds, for order-insensitive comparison
    pub fn node_set(&self) -> BTreeSet<(NodeKind, String)> {
        self.graph
            .node_weights()
            .map(|n| (n.kind(), n.name().to_string()))
            .collect()
    }

    /// Set of edges as `(source name, target name)`, for order-insensitive
    /// comparison
    pub fn edge_set(&self) -> BTreeSet<(String, String)> {
        self.graph
            .edge_references()
            .map(|e| {
                (
                    self.graph[e.source()].name().to_string(),
                    self.graph[e.target()].name().to_string(),
                )
            })
            .collect()
    }

    /// Units that declare themselves as a dependency
    pub fn self_loops(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .graph
            .edge_references()
            .filter(|e| e.source() == e.target())
            .map(|e| self.graph[e.source()].name())
            .collect();
        names.sort_unstable();
        names
    }

    /// Units with no outgoing edge
    pub fn isolated_units(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .units
            .iter()
            .filter(|&(_, &idx)| self.graph.neighbors(idx).next().is_none())
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            units: self.units.len(),
            externals: self.externals.len(),
            edges: self.graph.edge_count(),
            self_loops: self.self_loops().len(),
            isolated_units: self.isolated_units().len(),
            unresolved_declarations: self.counters.unresolved,
            blank_declarations: self.counters.blank,
            duplicate_declarations: self.counters.duplicate,
        }
    }
}
