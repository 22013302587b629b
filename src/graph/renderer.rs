use std::io::Write;

use miette::Result;
use petgraph::graph::NodeIndex;

use crate::cli::GraphFormat;
use crate::constants::output::DEFAULT_DOMAIN;
use crate::detector::CycleDetector;
use crate::error::DependencyMapperError;
use crate::graph::DependencyGraph;

// Blue-Orange Accessible Palette - Soothing colors with excellent contrast
mod colors {
    pub const NORMAL_NODE_FILL: &str = "#E3F2FD"; // Light blue
    pub const NORMAL_NODE_STROKE: &str = "#1976D2"; // Medium blue
    pub const CYCLE_NODE_FILL: &str = "#FFF3E0"; // Light orange
    pub const CYCLE_NODE_STROKE: &str = "#F57C00"; // Vibrant orange
    pub const EXTERNAL_NODE_FILL: &str = "#ECEFF1"; // Pale grey
    pub const EXTERNAL_NODE_STROKE: &str = "#90A4AE"; // Blue-grey
    pub const NORMAL_EDGE: &str = "#64B5F6"; // Soft blue
    pub const CYCLE_EDGE: &str = "#FF6500"; // Deep orange
}

// Helper macro for write operations that converts IO errors
macro_rules! writeln_out {
    ($dst:expr) => {
        writeln!($dst).map_err(DependencyMapperError::from)
    };
    ($dst:expr, $($arg:tt)*) => {
        writeln!($dst, $($arg)*).map_err(DependencyMapperError::from)
    };
}

/// Serializes a [`DependencyGraph`] into a textual diagram
///
/// All formats share one structure: a declaration per node with external
/// markers set apart, then one relationship line per edge, with edges on a
/// cycle drawn differently from the rest. Nodes are emitted units first, then
/// externals, each in name order; edges follow their source node order, so
/// the same input always renders to identical bytes.
pub struct GraphRenderer {
    highlight_cycles: bool,
    domain: String,
}

impl Default for GraphRenderer {
    fn default() -> Self {
        Self::new(true, DEFAULT_DOMAIN)
    }
}

impl GraphRenderer {
    pub fn new(highlight_cycles: bool, domain: impl Into<String>) -> Self {
        Self {
            highlight_cycles,
            domain: domain.into(),
        }
    }

    /// Render in the requested format
    pub fn render(
        &self,
        format: GraphFormat,
        graph: &DependencyGraph,
        detector: &CycleDetector,
        output: &mut dyn Write,
    ) -> Result<()> {
        match format {
            GraphFormat::Plantuml => self.render_plantuml(graph, detector, output),
            GraphFormat::Mermaid => self.render_mermaid(graph, detector, output),
            GraphFormat::Dot => self.render_dot(graph, detector, output),
        }
    }

    /// Render a PlantUML class diagram
    ///
    /// Plain dependencies use `-->`, dependencies on a cycle use the dashed
    /// `..>`. External markers carry the `<<external>>` stereotype.
    pub fn render_plantuml(
        &self,
        graph: &DependencyGraph,
        detector: &CycleDetector,
        output: &mut dyn Write,
    ) -> Result<()> {
        writeln_out!(output, "@startuml {}", self.domain)?;
        writeln_out!(output, "!pragma useIntermediatePackages false")?;

        let nodes = graph.sorted_nodes();
        let refs = node_refs(graph, &nodes, plantuml_name);

        for &node_idx in &nodes {
            let node = graph.node(node_idx);
            let name = plantuml_name(node.name());

            if node.is_external() {
                writeln_out!(
                    output,
                    "class {} as {} <<external>> {} {{",
                    name,
                    refs[node_idx.index()],
                    colors::EXTERNAL_NODE_FILL
                )?;
            } else if self.in_cycle(detector, node_idx) {
                writeln_out!(output, "class {} {} {{", name, colors::CYCLE_NODE_FILL)?;
            } else {
                writeln_out!(output, "class {} {{", name)?;
            }
            writeln_out!(output, "}}")?;
        }

        for (from, to) in graph.sorted_edges() {
            let arrow = if self.edge_in_cycle(detector, from, to) {
                "..>"
            } else {
                "-->"
            };
            writeln_out!(
                output,
                "{} {} {}",
                refs[from.index()],
                arrow,
                refs[to.index()]
            )?;
        }

        writeln_out!(output, "@enduml")?;
        Ok(())
    }

    /// Render a Mermaid flowchart
    pub fn render_mermaid(
        &self,
        graph: &DependencyGraph,
        detector: &CycleDetector,
        output: &mut dyn Write,
    ) -> Result<()> {
        writeln_out!(output, "graph TD")?;

        let nodes = graph.sorted_nodes();
        let mut ids = vec![String::new(); graph.inner().node_count()];
        for (position, &node_idx) in nodes.iter().enumerate() {
            ids[node_idx.index()] = format!("n{position}");
        }

        for &node_idx in &nodes {
            let node = graph.node(node_idx);
            let id = &ids[node_idx.index()];
            let label = mermaid_label(node.name());

            if node.is_external() {
                writeln_out!(output, "    {}[/\"{}\"/]", id, label)?;
                writeln_out!(
                    output,
                    "    style {} fill:{},stroke:{},stroke-dasharray:4",
                    id,
                    colors::EXTERNAL_NODE_FILL,
                    colors::EXTERNAL_NODE_STROKE
                )?;
            } else if self.in_cycle(detector, node_idx) {
                writeln_out!(output, "    {}((\"{}\"))", id, label)?;
                writeln_out!(
                    output,
                    "    style {} fill:{},stroke:{},stroke-width:3px",
                    id,
                    colors::CYCLE_NODE_FILL,
                    colors::CYCLE_NODE_STROKE
                )?;
            } else {
                writeln_out!(output, "    {}[\"{}\"]", id, label)?;
                writeln_out!(
                    output,
                    "    style {} fill:{},stroke:{},stroke-width:2px",
                    id,
                    colors::NORMAL_NODE_FILL,
                    colors::NORMAL_NODE_STROKE
                )?;
            }
        }

        let edges = graph.sorted_edges();
        if !edges.is_empty() {
            writeln_out!(output)?;
        }
        for (from, to) in edges {
            let arrow = if self.edge_in_cycle(detector, from, to) {
                "-.->"
            } else {
                "-->"
            };
            writeln_out!(
                output,
                "    {} {} {}",
                ids[from.index()],
                arrow,
                ids[to.index()]
            )?;
        }

        Ok(())
    }

    /// Render a Graphviz DOT digraph
    pub fn render_dot(
        &self,
        graph: &DependencyGraph,
        detector: &CycleDetector,
        output: &mut dyn Write,
    ) -> Result<()> {
        writeln_out!(output, "digraph dependencies {{")?;
        writeln_out!(output, "    rankdir=LR;")?;
        writeln_out!(output, "    node [shape=box, style=rounded];")?;
        writeln_out!(output)?;

        let nodes = graph.sorted_nodes();
        let refs = node_refs(graph, &nodes, |name| format!("\"{}\"", dot_escape(name)));

        for &node_idx in &nodes {
            let node = graph.node(node_idx);
            let id = &refs[node_idx.index()];

            if node.is_external() {
                writeln_out!(
                    output,
                    r#"    {} [label="{}", style="dashed,filled", fillcolor="{}", color="{}"];"#,
                    id,
                    dot_escape(node.name()),
                    colors::EXTERNAL_NODE_FILL,
                    colors::EXTERNAL_NODE_STROKE
                )?;
            } else {
                let (fill_color, stroke_color) = if self.in_cycle(detector, node_idx) {
                    (colors::CYCLE_NODE_FILL, colors::CYCLE_NODE_STROKE)
                } else {
                    (colors::NORMAL_NODE_FILL, colors::NORMAL_NODE_STROKE)
                };
                writeln_out!(
                    output,
                    r#"    {} [style="rounded,filled", fillcolor="{}", color="{}", penwidth=2];"#,
                    id,
                    fill_color,
                    stroke_color
                )?;
            }
        }

        writeln_out!(output)?;

        for (from, to) in graph.sorted_edges() {
            let source = &refs[from.index()];
            let target = &refs[to.index()];

            if self.edge_in_cycle(detector, from, to) {
                writeln_out!(
                    output,
                    r#"    {} -> {} [style=dashed, color="{}", penwidth=3];"#,
                    source,
                    target,
                    colors::CYCLE_EDGE
                )?;
            } else {
                writeln_out!(
                    output,
                    r#"    {} -> {} [color="{}", penwidth=2];"#,
                    source,
                    target,
                    colors::NORMAL_EDGE
                )?;
            }
        }

        writeln_out!(output, "}}")?;
        Ok(())
    }

    fn in_cycle(&self, detector: &CycleDetector, node: NodeIndex) -> bool {
        self.highlight_cycles && detector.is_cycle_node(node)
    }

    fn edge_in_cycle(&self, detector: &CycleDetector, from: NodeIndex, to: NodeIndex) -> bool {
        self.highlight_cycles && detector.is_cycle_edge(from, to)
    }
}

/// How each node is referenced in edge lines, indexed by node index
///
/// Units are referenced by their quoted name. External markers get an
/// `extN` alias so a raw string equal to a unit identity stays a separate
/// node.
fn node_refs(
    graph: &DependencyGraph,
    sorted: &[NodeIndex],
    quote: impl Fn(&str) -> String,
) -> Vec<String> {
    let mut refs = vec![String::new(); graph.inner().node_count()];
    let mut externals = 0;
    for &node_idx in sorted {
        let node = graph.node(node_idx);
        refs[node_idx.index()] = if node.is_external() {
            externals += 1;
            format!("ext{}", externals - 1)
        } else {
            quote(node.name())
        };
    }
    refs
}

// PlantUML has no escape inside quoted names
fn plantuml_name(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "'"))
}

fn mermaid_label(name: &str) -> String {
    name.replace('"', "#quot;")
}

fn dot_escape(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::core::BuildUnit;

    fn sample_graph() -> DependencyGraph {
        let root = Path::new("/repo");
        let mut graph = DependencyGraph::new();
        let app = graph.add_unit(&BuildUnit::new(root, PathBuf::from("/repo/app/build.gradle")));
        let lib = graph.add_unit(&BuildUnit::new(root, PathBuf::from("/repo/lib/build.gradle")));
        let junit = graph.add_external("junit:junit:4.13");
        graph.add_dependency(app, lib, ":lib");
        graph.add_dependency(lib, app, ":app");
        graph.add_dependency(lib, junit, "junit:junit:4.13");
        graph
    }

    fn render(renderer: &GraphRenderer, format: GraphFormat, graph: &DependencyGraph) -> String {
        let mut detector = CycleDetector::new();
        detector.detect_cycles(graph).unwrap();
        let mut output = Vec::new();
        renderer
            .render(format, graph, &detector, &mut output)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_plantuml_header_and_footer() {
        let output = render(
            &GraphRenderer::new(true, "demo.domain"),
            GraphFormat::Plantuml,
            &sample_graph(),
        );

        assert!(output.starts_with("@startuml demo.domain\n!pragma useIntermediatePackages false\n"));
        assert!(output.ends_with("@enduml\n"));
    }

    #[test]
    fn test_plantuml_marks_cycle_edges() {
        let output = render(&GraphRenderer::default(), GraphFormat::Plantuml, &sample_graph());

        assert!(output.contains("\"app/build.gradle\" ..> \"lib/build.gradle\""));
        assert!(output.contains("\"lib/build.gradle\" ..> \"app/build.gradle\""));
        assert!(output.contains("\"lib/build.gradle\" --> ext0"));
        assert!(output.contains("class \"junit:junit:4.13\" as ext0 <<external>>"));
    }

    #[test]
    fn test_highlighting_can_be_disabled() {
        let output = render(
            &GraphRenderer::new(false, DEFAULT_DOMAIN),
            GraphFormat::Plantuml,
            &sample_graph(),
        );

        assert!(!output.contains("..>"));
        assert!(output.contains("class \"app/build.gradle\" {"));
    }

    #[test]
    fn test_mermaid_uses_dotted_cycle_edges() {
        let output = render(&GraphRenderer::default(), GraphFormat::Mermaid, &sample_graph());

        assert!(output.starts_with("graph TD\n"));
        assert!(output.contains("    n0 -.-> n1"));
        assert!(output.contains("    n1 -.-> n0"));
        assert!(output.contains("    n1 --> n2"));
        assert!(output.contains("n2[/\"junit:junit:4.13\"/]"));
    }

    #[test]
    fn test_dot_output() {
        let output = render(&GraphRenderer::default(), GraphFormat::Dot, &sample_graph());

        assert!(output.starts_with("digraph dependencies {"));
        assert!(output.contains(r#""app/build.gradle" -> "lib/build.gradle" [style=dashed"#));
        assert!(output.contains(r##""lib/build.gradle" -> ext0 [color="#64B5F6""##));
        assert!(output.contains(r#"ext0 [label="junit:junit:4.13""#));
        assert!(output.trim_end().ends_with('}'));
    }

    #[test]
    fn test_external_named_like_a_unit_stays_distinct() {
        let root = Path::new("/repo");
        let mut graph = DependencyGraph::new();
        let app = graph.add_unit(&BuildUnit::new(root, PathBuf::from("/repo/app/build.gradle")));
        graph.add_unit(&BuildUnit::new(root, PathBuf::from("/repo/lib/build.gradle")));
        let lookalike = graph.add_external("lib/build.gradle");
        graph.add_dependency(app, lookalike, "lib/build.gradle");

        let plantuml = render(&GraphRenderer::default(), GraphFormat::Plantuml, &graph);
        assert_eq!(plantuml.matches("class \"lib/build.gradle\" {").count(), 1);
        assert!(plantuml.contains("class \"lib/build.gradle\" as ext0 <<external>>"));
        assert!(plantuml.contains("\"app/build.gradle\" --> ext0"));
        assert!(!plantuml.contains("\"app/build.gradle\" --> \"lib/build.gradle\""));

        let dot = render(&GraphRenderer::default(), GraphFormat::Dot, &graph);
        assert!(dot.contains(r#""app/build.gradle" -> ext0"#));
        assert!(!dot.contains(r#""app/build.gradle" -> "lib/build.gradle""#));
    }

    #[test]
    fn test_empty_graph() {
        let output = render(
            &GraphRenderer::default(),
            GraphFormat::Plantuml,
            &DependencyGraph::new(),
        );

        assert_eq!(
            output,
            format!("@startuml {DEFAULT_DOMAIN}\n!pragma useIntermediatePackages false\n@enduml\n")
        );
    }

    #[test]
    fn test_name_escaping() {
        assert_eq!(plantuml_name("a\"b"), "\"a'b\"");
        assert_eq!(dot_escape("a\"b"), "a\\\"b");
        assert_eq!(mermaid_label("a\"b"), "a#quot;b");
    }
}
