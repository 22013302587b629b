//! # Cycle Detection Module
//!
//! This module finds circular dependencies in the dependency graph.
//!
//! ## Algorithm
//!
//! A depth-first search with white/gray/black colouring visits every node as
//! a potential root exactly once and never re-expands a finished (black)
//! node, so the walk is linear in the number of edges. Whenever it reaches a
//! node that is still on the current path (gray), the path from that node to
//! the top of the stack is reported as one cycle. A node that depends on
//! itself is reported as a cycle of length one.
//!
//! Tarjan's strongly connected components are computed alongside, so that
//! renderers can mark every edge that lies on any cycle.
//!
//! ## Example
//!
//! ```
//! use std::path::{Path, PathBuf};
//!
//! use dependency_mapper::core::BuildUnit;
//! use dependency_mapper::detector::CycleDetector;
//! use dependency_mapper::graph::DependencyGraph;
//!
//! # fn main() -> miette::Result<()> {
//! let root = Path::new("/repo");
//! let mut graph = DependencyGraph::new();
//! let a = graph.add_unit(&BuildUnit::new(root, PathBuf::from("/repo/a/build.gradle")));
//! let b = graph.add_unit(&BuildUnit::new(root, PathBuf::from("/repo/b/build.gradle")));
//!
//! // Create a cycle: A -> B -> A
//! graph.add_dependency(a, b, ":b");
//! graph.add_dependency(b, a, ":a");
//!
//! let mut detector = CycleDetector::new();
//! detector.detect_cycles(&graph)?;
//!
//! assert!(detector.has_cycles());
//! assert_eq!(detector.cycle_count(), 1);
//! assert_eq!(
//!     detector.cycles()[0].display_path(),
//!     "a/build.gradle → b/build.gradle → a/build.gradle"
//! );
//! # Ok(())
//! # }
//! ```

mod detector_impl;

pub use detector_impl::*;
