//! JSON format report generation

use serde_json::json;

use super::{ReportGenerator, ScanSummary};
use crate::detector::CycleDetector;
use crate::error::DependencyMapperError;

pub struct JsonReportGenerator;

impl Default for JsonReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for JsonReportGenerator {
    fn generate_report(
        &self,
        summary: &ScanSummary,
        detector: &CycleDetector,
    ) -> Result<String, DependencyMapperError> {
        let cycles: Vec<_> = detector
            .cycles()
            .iter()
            .map(|cycle| {
                let edges: Vec<_> = cycle
                    .edges()
                    .into_iter()
                    .map(|(from, to)| json!({ "from": from, "to": to }))
                    .collect();

                json!({
                    "units": cycle.units(),
                    "self_loop": cycle.is_self_loop(),
                    "edges": edges,
                })
            })
            .collect();

        let report = json!({
            "build_system": summary.build_system,
            "root": summary.root,
            "files_scanned": summary.files_scanned,
            "files_failed": summary.files_failed,
            "declarations": summary.declarations,
            "stats": summary.stats,
            "self_loops": summary.self_loops,
            "warnings": summary.warnings,
            "artifact": summary.artifact,
            "has_cycles": detector.has_cycles(),
            "cycle_count": detector.cycle_count(),
            "cycle_edge_count": detector.cycle_edge_count(),
            "cycles": cycles,
        });

        serde_json::to_string_pretty(&report).map_err(DependencyMapperError::Json)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::core::ScanWarning;
    use crate::reports::test_support::{clean_scan, cyclic_scan};

    #[test]
    fn test_json_report_no_cycles() {
        let (summary, detector) = clean_scan();
        let report = JsonReportGenerator::new()
            .generate_report(&summary, &detector)
            .unwrap();
        let json: Value = serde_json::from_str(&report).unwrap();

        assert_eq!(json["build_system"], "gradle");
        assert_eq!(json["has_cycles"], false);
        assert_eq!(json["cycle_count"], 0);
        assert_eq!(json["cycles"].as_array().unwrap().len(), 0);
        assert_eq!(json["stats"]["units"], 1);
        assert_eq!(json["stats"]["isolated_units"], 1);
    }

    #[test]
    fn test_json_report_with_cycles() {
        let (summary, detector) = cyclic_scan();
        let report = JsonReportGenerator::new()
            .generate_report(&summary, &detector)
            .unwrap();
        let json: Value = serde_json::from_str(&report).unwrap();

        assert_eq!(json["has_cycles"], true);
        assert_eq!(json["cycle_count"], 1);
        assert_eq!(json["cycle_edge_count"], 3);

        let cycle = &json["cycles"][0];
        assert_eq!(
            cycle["units"],
            json!(["app/build.gradle", "lib/build.gradle", "core/build.gradle"])
        );
        assert_eq!(cycle["self_loop"], false);
        assert_eq!(cycle["edges"].as_array().unwrap().len(), 3);
        assert_eq!(
            cycle["edges"][2],
            json!({ "from": "core/build.gradle", "to": "app/build.gradle" })
        );
    }

    #[test]
    fn test_json_report_warnings_are_tagged() {
        let (mut summary, detector) = clean_scan();
        summary.warnings.push(ScanWarning::Decode {
            path: "/repo/bad/build.gradle".into(),
            message: "invalid utf-8".to_string(),
        });
        summary.artifact = None;

        let report = JsonReportGenerator
            .generate_report(&summary, &detector)
            .unwrap();
        let json: Value = serde_json::from_str(&report).unwrap();

        assert_eq!(json["warnings"][0]["kind"], "decode");
        assert_eq!(json["warnings"][0]["path"], "/repo/bad/build.gradle");
        assert!(json["artifact"].is_null());
    }
}
