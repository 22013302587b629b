//! Map command executor

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};
use rayon::prelude::*;

use crate::cli::ReportFormat;
use crate::config::MapConfig;
use crate::core::{BuildUnit, DependencyDeclaration, ScanWarning};
use crate::detector::CycleDetector;
use crate::discovery::FileCollector;
use crate::error::DependencyMapperError;
use crate::executors::CommandExecutor;
use crate::graph::{DependencyGraph, DependencyGraphBuilder, GraphRenderer, resolver_for};
use crate::parser::{self, DialectParser};
use crate::progress::ProgressReporter;
use crate::reports::{HumanReportGenerator, JsonReportGenerator, ReportGenerator, ScanSummary};

/// Result of scanning a tree: the graph, its cycles and what went into them
pub struct ScanOutcome {
    pub graph: DependencyGraph,
    pub detector: CycleDetector,
    pub units: Vec<BuildUnit>,
    pub declarations: Vec<DependencyDeclaration>,
    pub warnings: Vec<ScanWarning>,
    pub files_failed: usize,
    /// Canonical form of the configured root
    pub root: PathBuf,
}

impl ScanOutcome {
    pub fn summary(&self, config: &MapConfig) -> ScanSummary {
        ScanSummary {
            build_system: config.build_system,
            root: self.root.clone(),
            files_scanned: self.units.len(),
            files_failed: self.files_failed,
            declarations: self.declarations.len(),
            stats: self.graph.stats(),
            self_loops: self.graph.self_loops().into_iter().map(String::from).collect(),
            warnings: self.warnings.clone(),
            artifact: config.output.clone(),
        }
    }
}

fn parse_unit(
    parser: &dyn DialectParser,
    unit: &BuildUnit,
) -> Result<Vec<DependencyDeclaration>, DependencyMapperError> {
    let contents = parser::read_build_file(unit.path())?;
    Ok(parser.parse(unit.id(), &contents))
}

/// Collect, parse, link and check one tree without writing anything
///
/// Files that cannot be read or decoded contribute no declarations and are
/// recorded as warnings. If every discovered file fails the scan is aborted.
pub fn scan(config: &MapConfig, mut progress: Option<&mut ProgressReporter>) -> Result<ScanOutcome> {
    let resolver = resolver_for(config.resolver, config.mapping_file.as_deref())?;

    let collector = FileCollector::new(&config.filename)
        .with_max_depth(config.max_depth)
        .with_excluded_dirs(config.exclude_dirs.iter());

    if let Some(p) = progress.as_deref_mut() {
        p.start_discovery(&config.filename);
    }

    let files = collector.collect(&config.root)?;
    let root = files.root().to_path_buf();

    let mut units = Vec::new();
    let mut warnings = Vec::new();
    for item in files {
        match item {
            Ok(path) => {
                if let Some(p) = progress.as_deref() {
                    p.found_file(&path);
                }
                units.push(BuildUnit::new(&root, path));
            }
            Err(warning) => warnings.push(warning),
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish_discovery(units.len());
    }
    if config.verbose {
        for unit in &units {
            eprintln!("  {} {}", style("•").dim(), unit);
        }
    }

    let dialect = parser::for_build_system(config.build_system);
    let bar = progress.as_deref_mut().map(|p| p.start_parsing(units.len()));

    let parsed: Vec<_> = units
        .par_iter()
        .map(|unit| {
            let result = parse_unit(dialect.as_ref(), unit);
            if let Some(pb) = &bar {
                pb.inc(1);
            }
            (unit, result)
        })
        .collect();

    if let Some(p) = progress.as_deref_mut() {
        p.finish_parsing();
    }

    let mut declarations = Vec::new();
    let mut files_failed = 0;
    for (unit, result) in parsed {
        match result {
            Ok(found) => declarations.extend(found),
            Err(err) => {
                files_failed += 1;
                warnings.push(ScanWarning::Decode {
                    path: unit.path().to_path_buf(),
                    message: err.to_string(),
                });
            }
        }
    }

    if !units.is_empty() && files_failed == units.len() {
        return Err(DependencyMapperError::AllFilesUndecodable { count: units.len() }.into());
    }

    if config.verbose {
        eprintln!(
            "{} {} parser extracted {} declarations",
            style("ℹ").blue(),
            dialect.name(),
            declarations.len()
        );
        for declaration in &declarations {
            eprintln!(
                "  {} {} → {}",
                style("•").dim(),
                declaration.owner,
                declaration.dependency
            );
        }
    }

    let graph = DependencyGraphBuilder::new(resolver)
        .build(&units, &declarations)
        .wrap_err("Failed to build dependency graph")?;

    if let Some(p) = progress.as_deref_mut() {
        p.start_cycle_detection();
    }

    let mut detector = CycleDetector::new();
    detector
        .detect_cycles(&graph)
        .wrap_err("Failed to detect dependency cycles")?;

    if let Some(p) = progress.as_deref() {
        p.finish_cycle_detection(detector.cycle_count());
    }

    Ok(ScanOutcome {
        graph,
        detector,
        units,
        declarations,
        warnings,
        files_failed,
        root,
    })
}

pub struct MapExecutor;

impl CommandExecutor for MapExecutor {
    type Config = MapConfig;

    fn execute(config: Self::Config) -> Result<()> {
        eprintln!(
            "{} Mapping {} dependencies under {}\n",
            style("🗺").cyan(),
            config.build_system,
            style(config.root.display()).bold()
        );

        let mut progress = ProgressReporter::for_terminal();
        let outcome = scan(&config, progress.as_mut())?;

        let renderer = GraphRenderer::new(config.highlight_cycles, config.domain.clone());
        match &config.output {
            Some(path) => {
                let file = File::create(path)
                    .into_diagnostic()
                    .wrap_err_with(|| format!("Failed to create output file {}", path.display()))?;
                let mut writer = BufWriter::new(file);
                renderer
                    .render(config.format, &outcome.graph, &outcome.detector, &mut writer)
                    .wrap_err("Failed to render graph")?;
                writer
                    .flush()
                    .into_diagnostic()
                    .wrap_err("Failed to write output file")?;
            }
            None => {
                let mut stdout = io::stdout().lock();
                renderer
                    .render(config.format, &outcome.graph, &outcome.detector, &mut stdout)
                    .wrap_err("Failed to render graph")?;
                stdout.flush().into_diagnostic()?;
            }
        }

        let summary = outcome.summary(&config);
        let report = match config.report {
            ReportFormat::Human => {
                HumanReportGenerator::new(config.max_cycles).generate_report(&summary, &outcome.detector)
            }
            ReportFormat::Json => JsonReportGenerator::new().generate_report(&summary, &outcome.detector),
        }
        .into_diagnostic()
        .wrap_err("Failed to generate report")?;

        // The diagram owns stdout when it is written there
        if config.writes_to_stdout() {
            eprint!("{report}");
        } else {
            print!("{report}");
        }

        if config.error_on_cycles && outcome.detector.has_cycles() {
            std::process::exit(1);
        }

        Ok(())
    }
}
