//! # Dependency Mapper - Map Library Dependencies Declared in Build Files
//!
//! Dependency Mapper walks a source tree, finds every build file with a given
//! name, extracts the dependencies each one declares and links them into a
//! directed graph. The graph is written as a PlantUML class diagram (or
//! Mermaid / Graphviz DOT) where dependencies that lie on a cycle are drawn
//! with a dashed arrow.
//!
//! ## Main Components
//!
//! - **Discovery**: Lazily collects build files below a root directory
//! - **Parser**: One dialect parser per build system (Gradle, Makefile, CMake)
//! - **Graph**: Resolves declarations to build units and renders diagrams
//! - **Detector**: Depth-first cycle search with white/gray/black colouring
//! - **Reports**: Human-readable and JSON summaries of a scan
//!
//! ## Usage
//!
//! ```no_run
//! use dependency_mapper::cli::{GraphFormat, ResolverKind};
//! use dependency_mapper::common::ConfigBuilder;
//! use dependency_mapper::config::MapConfig;
//! use dependency_mapper::executors::scan;
//! use dependency_mapper::graph::GraphRenderer;
//!
//! # fn main() -> miette::Result<()> {
//! let config = MapConfig::builder()
//!     .with_root(".")
//!     .with_filename("build.gradle")
//!     .with_build_system(3)
//!     .with_resolver(ResolverKind::Segment)
//!     .build()?;
//!
//! let outcome = scan(&config, None)?;
//! for cycle in outcome.detector.cycles() {
//!     println!("cycle: {}", cycle.display_path());
//! }
//!
//! let mut diagram = Vec::new();
//! GraphRenderer::default().render(
//!     GraphFormat::Plantuml,
//!     &outcome.graph,
//!     &outcome.detector,
//!     &mut diagram,
//! )?;
//! # Ok(())
//! # }
//! ```

// Private modules
mod constants;
mod utils;

// Public modules
pub mod cli;
pub mod common;
pub mod config;
pub mod core;
pub mod detector;
pub mod discovery;
pub mod error;
pub mod executors;
pub mod graph;
pub mod parser;
pub mod progress;
pub mod reports;

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use clap::Parser;

    use crate::cli::Cli;
    use crate::config::MapConfig;
    use crate::executors::{CommandExecutor, MapExecutor};

    let cli = Cli::parse();
    let config = MapConfig::try_from(cli)?;

    MapExecutor::execute(config)
}
