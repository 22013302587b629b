//! Report generation modules for different output formats
//!
//! - human: Human-readable console output
//! - json: JSON format for programmatic use

pub mod human;
pub mod json;

use std::path::PathBuf;

use serde::Serialize;

use crate::core::{BuildSystem, ScanWarning};
use crate::detector::CycleDetector;
use crate::error::DependencyMapperError;
use crate::graph::GraphStats;

/// Everything a report needs to know about one scan besides the cycles
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    pub build_system: BuildSystem,
    pub root: PathBuf,
    pub files_scanned: usize,
    pub files_failed: usize,
    pub declarations: usize,
    pub stats: GraphStats,
    pub self_loops: Vec<String>,
    pub warnings: Vec<ScanWarning>,
    /// Where the diagram was written, `None` when it went to stdout
    pub artifact: Option<PathBuf>,
}

/// Common trait for all report generators
pub trait ReportGenerator {
    /// Generate a report from a scan summary and its cycle detection results
    fn generate_report(
        &self,
        summary: &ScanSummary,
        detector: &CycleDetector,
    ) -> Result<String, DependencyMapperError>;
}

pub use human::HumanReportGenerator;
pub use json::JsonReportGenerator;

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::core::{BuildUnit, DependencyDeclaration};
    use crate::graph::{DependencyGraph, DependencyGraphBuilder, SegmentResolver};

    /// `app -> lib -> core -> app` plus an isolated `tools` unit and one
    /// external
    pub fn cyclic_scan() -> (ScanSummary, CycleDetector) {
        let root = Path::new("/repo");
        let units: Vec<BuildUnit> = ["app", "core", "lib", "tools"]
            .iter()
            .map(|name| BuildUnit::new(root, PathBuf::from(format!("/repo/{name}/build.gradle"))))
            .collect();
        let declarations = vec![
            DependencyDeclaration::new("app/build.gradle", ":lib"),
            DependencyDeclaration::new("lib/build.gradle", ":core"),
            DependencyDeclaration::new("core/build.gradle", ":app"),
            DependencyDeclaration::new("lib/build.gradle", "junit:junit:4.13"),
        ];
        let graph = DependencyGraphBuilder::new(Box::new(SegmentResolver))
            .build(&units, &declarations)
            .unwrap();
        summarize(&graph, 4, declarations.len())
    }

    pub fn clean_scan() -> (ScanSummary, CycleDetector) {
        let root = Path::new("/repo");
        let units = vec![BuildUnit::new(root, PathBuf::from("/repo/app/build.gradle"))];
        let graph = DependencyGraphBuilder::default().build(&units, &[]).unwrap();
        summarize(&graph, 1, 0)
    }

    fn summarize(
        graph: &DependencyGraph,
        files: usize,
        declarations: usize,
    ) -> (ScanSummary, CycleDetector) {
        let mut detector = CycleDetector::new();
        detector.detect_cycles(graph).unwrap();
        let summary = ScanSummary {
            build_system: BuildSystem::Gradle,
            root: PathBuf::from("/repo"),
            files_scanned: files,
            files_failed: 0,
            declarations,
            stats: graph.stats(),
            self_loops: Vec::new(),
            warnings: Vec::new(),
            artifact: Some(PathBuf::from("output.puml")),
        };
        (summary, detector)
    }
}
