//! # Graph Construction and Rendering Module
//!
//! This module provides functionality for building and visualizing dependency
//! graphs. It supports multiple output formats and can highlight dependency
//! cycles.
//!
//! ## Components
//!
//! ### Graph Building
//! - **DependencyGraphBuilder**: Turns build units and their raw declarations
//!   into a [`DependencyGraph`]
//! - **DependencyResolver**: Pluggable strategy matching a raw dependency
//!   string to a build unit (exact, trailing segment, mapping file)
//! - **GraphNode**: A build unit or an external marker
//!
//! ### Graph Rendering
//! - **GraphRenderer**: Renders graphs as PlantUML, Mermaid or DOT
//! - Edges on a cycle are drawn differently from plain edges
//!
//! ## Example
//!
//! ```
//! use std::path::{Path, PathBuf};
//!
//! use dependency_mapper::core::{BuildUnit, DependencyDeclaration};
//! use dependency_mapper::detector::CycleDetector;
//! use dependency_mapper::graph::{DependencyGraphBuilder, GraphRenderer, SegmentResolver};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let root = Path::new("/repo");
//! let units = vec![
//!     BuildUnit::new(root, PathBuf::from("/repo/app/build.gradle")),
//!     BuildUnit::new(root, PathBuf::from("/repo/core/build.gradle")),
//! ];
//! let declarations = vec![
//!     DependencyDeclaration::new("app/build.gradle", ":core"),
//!     DependencyDeclaration::new("app/build.gradle", "junit:junit:4.13"),
//! ];
//!
//! let builder = DependencyGraphBuilder::new(Box::new(SegmentResolver));
//! let graph = builder.build(&units, &declarations)?;
//!
//! let mut detector = CycleDetector::new();
//! detector.detect_cycles(&graph)?;
//!
//! let renderer = GraphRenderer::new(true, "example.domain");
//! let mut output = Vec::new();
//! renderer.render_plantuml(&graph, &detector, &mut output)?;
//!
//! let diagram = String::from_utf8(output)?;
//! assert!(diagram.contains("\"app/build.gradle\" --> \"core/build.gradle\""));
//! assert!(diagram.contains("<<external>>"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Output Formats
//!
//! - **PlantUML**: Class diagram, the default artifact
//! - **Mermaid**: Markdown-compatible diagrams for documentation
//! - **DOT**: Graphviz format for detailed visualization

mod builder;
mod renderer;
mod resolver;
mod types;

// Re-export main types and builders
pub use builder::DependencyGraphBuilder;
pub use renderer::GraphRenderer;
pub use resolver::{
    DependencyResolver, ExactResolver, MappingResolver, SegmentResolver, resolver_for,
};
pub use types::{DependencyEdge, DependencyGraph, GraphNode, GraphStats, NodeKind};
