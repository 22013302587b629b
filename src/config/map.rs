//! Map command configuration

use std::path::PathBuf;

use crate::cli::{Cli, GraphFormat, ReportFormat, ResolverKind};
use crate::common::ConfigBuilder;
use crate::constants::output::{DEFAULT_DOMAIN, DEFAULT_OUTPUT, STDOUT};
use crate::core::BuildSystem;
use crate::error::DependencyMapperError;

/// Configuration for one scan of a source tree
#[derive(Debug, Clone)]
pub struct MapConfig {
    /// Directory to scan; `.` is already expanded to the working directory
    pub root: PathBuf,
    /// Exact base name of the build files to collect
    pub filename: String,
    pub build_system: BuildSystem,
    /// Diagram destination, `None` for stdout
    pub output: Option<PathBuf>,
    pub format: GraphFormat,
    /// Name written after `@startuml`
    pub domain: String,
    pub report: ReportFormat,
    pub highlight_cycles: bool,
    pub resolver: ResolverKind,
    pub mapping_file: Option<PathBuf>,
    pub max_depth: Option<usize>,
    pub exclude_dirs: Vec<String>,
    /// Maximum number of cycles to list in the report (None = all)
    pub max_cycles: Option<usize>,
    pub error_on_cycles: bool,
    pub verbose: bool,
}

impl MapConfig {
    pub fn builder() -> MapConfigBuilder {
        MapConfigBuilder::new()
    }

    pub fn writes_to_stdout(&self) -> bool {
        self.output.is_none()
    }
}

#[derive(Default)]
pub struct MapConfigBuilder {
    root: Option<PathBuf>,
    filename: Option<String>,
    build_system: Option<u8>,
    output: Option<PathBuf>,
    format: Option<GraphFormat>,
    domain: Option<String>,
    report: Option<ReportFormat>,
    highlight_cycles: Option<bool>,
    resolver: Option<ResolverKind>,
    mapping_file: Option<PathBuf>,
    max_depth: Option<usize>,
    exclude_dirs: Vec<String>,
    max_cycles: Option<usize>,
    error_on_cycles: bool,
    verbose: bool,
}

impl MapConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Raw selector: 1 Makefile, 2 CMake, 3 Gradle
    pub fn with_build_system(mut self, selector: u8) -> Self {
        self.build_system = Some(selector);
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_format(mut self, format: GraphFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_report(mut self, report: ReportFormat) -> Self {
        self.report = Some(report);
        self
    }

    pub fn with_highlight_cycles(mut self, highlight_cycles: bool) -> Self {
        self.highlight_cycles = Some(highlight_cycles);
        self
    }

    pub fn with_resolver(mut self, resolver: ResolverKind) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn with_mapping_file(mut self, mapping_file: Option<PathBuf>) -> Self {
        self.mapping_file = mapping_file;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_exclude_dirs(mut self, exclude_dirs: Vec<String>) -> Self {
        self.exclude_dirs = exclude_dirs;
        self
    }

    pub fn with_max_cycles(mut self, max_cycles: Option<usize>) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    pub fn with_error_on_cycles(mut self, error_on_cycles: bool) -> Self {
        self.error_on_cycles = error_on_cycles;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

fn missing(field: &str) -> DependencyMapperError {
    DependencyMapperError::ConfigurationError {
        message: format!("Missing required field: {field}"),
    }
}

impl ConfigBuilder for MapConfigBuilder {
    type Config = MapConfig;

    fn build(self) -> Result<Self::Config, DependencyMapperError> {
        let root = self.root.ok_or_else(|| missing("root"))?;
        let root = if root.as_os_str() == "." {
            std::env::current_dir()?
        } else {
            root
        };

        let filename = self.filename.ok_or_else(|| missing("filename"))?;
        if filename.is_empty() || filename.contains(['/', '\\']) {
            return Err(DependencyMapperError::ConfigurationError {
                message: format!("Build file name '{filename}' must be a bare file name"),
            });
        }

        let build_system =
            BuildSystem::try_from(self.build_system.ok_or_else(|| missing("build_system"))?)?;

        let resolver = self.resolver.unwrap_or(ResolverKind::Exact);
        if resolver == ResolverKind::Mapping && self.mapping_file.is_none() {
            return Err(DependencyMapperError::ConfigurationError {
                message: "The mapping resolver requires --mapping-file".to_string(),
            });
        }

        let output = self.output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
        let output = (output.as_os_str() != STDOUT).then_some(output);

        Ok(MapConfig {
            root,
            filename,
            build_system,
            output,
            format: self.format.unwrap_or(GraphFormat::Plantuml),
            domain: self.domain.unwrap_or_else(|| DEFAULT_DOMAIN.to_string()),
            report: self.report.unwrap_or(ReportFormat::Human),
            highlight_cycles: self.highlight_cycles.unwrap_or(true),
            resolver,
            mapping_file: self.mapping_file,
            max_depth: self.max_depth,
            exclude_dirs: self.exclude_dirs,
            max_cycles: self.max_cycles,
            error_on_cycles: self.error_on_cycles,
            verbose: self.verbose,
        })
    }
}

impl TryFrom<Cli> for MapConfig {
    type Error = DependencyMapperError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        MapConfig::builder()
            .with_root(cli.root)
            .with_filename(cli.filename)
            .with_build_system(cli.build_system)
            .with_output(cli.output.output)
            .with_format(cli.output.format)
            .with_domain(cli.output.domain)
            .with_report(cli.output.report)
            .with_highlight_cycles(cli.output.highlight_cycles)
            .with_resolver(cli.scan.resolver)
            .with_mapping_file(cli.scan.mapping_file)
            .with_max_depth(cli.scan.max_depth)
            .with_exclude_dirs(cli.scan.exclude_dir)
            .with_max_cycles(cli.cycle_display.max_cycles)
            .with_error_on_cycles(cli.error_on_cycles)
            .with_verbose(cli.verbose)
            .build()
    }
}
