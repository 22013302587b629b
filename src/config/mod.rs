//! # Configuration Module
//!
//! Holds [`MapConfig`], the validated settings for one mapping run, and its
//! builder. The builder can be filled by hand or converted from the parsed
//! command line.
//!
//! ## Example
//!
//! ```
//! use dependency_mapper::cli::{GraphFormat, ResolverKind};
//! use dependency_mapper::common::ConfigBuilder;
//! use dependency_mapper::config::MapConfig;
//! use dependency_mapper::core::BuildSystem;
//!
//! let config = MapConfig::builder()
//!     .with_root(std::env::temp_dir())
//!     .with_filename("build.gradle")
//!     .with_build_system(3)
//!     .with_format(GraphFormat::Mermaid)
//!     .with_resolver(ResolverKind::Segment)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.build_system, BuildSystem::Gradle);
//! ```

pub mod map;

pub use map::{MapConfig, MapConfigBuilder};
