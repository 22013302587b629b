//! Common functionality shared across the CLI and configuration

use std::path::PathBuf;

use clap::Args;

use crate::cli::{GraphFormat, ReportFormat, ResolverKind};

/// Where and how the diagram and summary are written
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output file for the diagram (- for stdout)
    #[arg(
        short,
        long,
        default_value = crate::constants::output::DEFAULT_OUTPUT,
        env = "DEPENDENCY_MAPPER_OUTPUT"
    )]
    pub output: PathBuf,

    /// Diagram format
    #[arg(
        short,
        long,
        value_enum,
        default_value = crate::constants::output::DEFAULT_FORMAT,
        env = "DEPENDENCY_MAPPER_FORMAT"
    )]
    pub format: GraphFormat,

    /// Diagram name written after @startuml
    #[arg(
        long,
        default_value = crate::constants::output::DEFAULT_DOMAIN,
        env = "DEPENDENCY_MAPPER_DOMAIN"
    )]
    pub domain: String,

    /// Summary report format
    #[arg(
        long,
        value_enum,
        default_value = crate::constants::output::DEFAULT_REPORT,
        env = "DEPENDENCY_MAPPER_REPORT"
    )]
    pub report: ReportFormat,

    /// Draw edges that lie on a cycle differently
    #[arg(
        long,
        default_value_t = true,
        action = clap::ArgAction::Set,
        env = "DEPENDENCY_MAPPER_HIGHLIGHT_CYCLES"
    )]
    pub highlight_cycles: bool,
}

/// How the tree is walked and dependencies resolved
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// How raw dependency strings are matched to build files
    #[arg(
        long,
        value_enum,
        default_value = crate::constants::output::DEFAULT_RESOLVER,
        env = "DEPENDENCY_MAPPER_RESOLVER"
    )]
    pub resolver: ResolverKind,

    /// TOML file mapping dependency strings to build files (mapping resolver)
    #[arg(long, env = "DEPENDENCY_MAPPER_MAPPING_FILE")]
    pub mapping_file: Option<PathBuf>,

    /// Maximum directory depth to descend below the root
    #[arg(long, env = "DEPENDENCY_MAPPER_MAX_DEPTH")]
    pub max_depth: Option<usize>,

    /// Directory name to skip while walking (repeatable)
    #[arg(
        long,
        value_name = "NAME",
        value_delimiter = ',',
        env = "DEPENDENCY_MAPPER_EXCLUDE_DIR"
    )]
    pub exclude_dir: Vec<String>,
}

/// Common cycle display arguments
#[derive(Args, Debug, Clone)]
pub struct CycleDisplayArgs {
    /// Maximum number of cycles to display (shows all by default)
    #[arg(long, env = "DEPENDENCY_MAPPER_MAX_CYCLES")]
    pub max_cycles: Option<usize>,
}

/// Generic builder trait for configuration objects
pub trait ConfigBuilder: Sized {
    type Config;

    /// Build the configuration, returning an error if validation fails
    fn build(self) -> Result<Self::Config, crate::error::DependencyMapperError>;
}
