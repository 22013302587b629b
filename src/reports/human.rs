//! Human-readable console report generation

use std::fmt::Write;

use console::style;

use super::{ReportGenerator, ScanSummary};
use crate::detector::CycleDetector;
use crate::error::DependencyMapperError;
use crate::utils::string::pluralize;

pub struct HumanReportGenerator {
    max_cycles: Option<usize>,
}

impl HumanReportGenerator {
    pub fn new(max_cycles: Option<usize>) -> Self {
        Self { max_cycles }
    }

    fn write_summary(
        &self,
        output: &mut String,
        summary: &ScanSummary,
    ) -> Result<(), DependencyMapperError> {
        let stats = &summary.stats;

        writeln!(
            output,
            "\n{} Scanned {} {} build {} under {}",
            style("📦").blue(),
            style(summary.files_scanned).yellow().bold(),
            summary.build_system,
            pluralize("file", summary.files_scanned),
            style(summary.root.display()).dim()
        )?;
        writeln!(
            output,
            "  {} {} {}, {} external {}, {} {}",
            style("→").dim(),
            stats.units,
            pluralize("unit", stats.units),
            stats.externals,
            if stats.externals == 1 {
                "dependency"
            } else {
                "dependencies"
            },
            stats.edges,
            pluralize("edge", stats.edges)
        )?;
        writeln!(
            output,
            "  {} {} {} parsed ({} blank, {} duplicate, {} unresolved)",
            style("→").dim(),
            summary.declarations,
            pluralize("declaration", summary.declarations),
            stats.blank_declarations,
            stats.duplicate_declarations,
            stats.unresolved_declarations
        )?;
        if stats.isolated_units > 0 {
            writeln!(
                output,
                "  {} {} {} declare no dependencies",
                style("→").dim(),
                stats.isolated_units,
                pluralize("unit", stats.isolated_units)
            )?;
        }

        if summary.files_failed > 0 || !summary.warnings.is_empty() {
            writeln!(
                output,
                "\n{} {} {}:",
                style("⚠").yellow().bold(),
                summary.warnings.len(),
                pluralize("warning", summary.warnings.len())
            )?;
            for warning in &summary.warnings {
                writeln!(output, "  {} {}", style("•").dim(), warning)?;
            }
        }

        for unit in &summary.self_loops {
            writeln!(
                output,
                "{} {} depends on itself",
                style("⚠").yellow().bold(),
                style(unit).bold()
            )?;
        }

        if let Some(artifact) = &summary.artifact {
            writeln!(
                output,
                "{} Diagram written to {}",
                style("✓").green(),
                style(artifact.display()).bold()
            )?;
        }

        Ok(())
    }
}

impl ReportGenerator for HumanReportGenerator {
    fn generate_report(
        &self,
        summary: &ScanSummary,
        detector: &CycleDetector,
    ) -> Result<String, DependencyMapperError> {
        let mut output = String::new();
        self.write_summary(&mut output, summary)?;

        if !detector.has_cycles() {
            writeln!(
                output,
                "\n{} No dependency cycles detected!",
                style("✅").green().bold()
            )?;
            return Ok(output);
        }

        let total_cycles = detector.cycle_count();
        writeln!(
            output,
            "\n{} Found {} dependency {}:\n",
            style("❌").red().bold(),
            style(total_cycles).red().bold(),
            pluralize("cycle", total_cycles)
        )?;

        let limit = self.max_cycles.unwrap_or(total_cycles);
        for (i, cycle) in detector.cycles().iter().take(limit).enumerate() {
            writeln!(
                output,
                "{} Cycle #{} ({} {})",
                style("🔄").yellow(),
                i + 1,
                cycle.len(),
                pluralize("unit", cycle.len())
            )?;
            writeln!(output, "    {}", style(cycle.display_path()).bold())?;
        }

        if limit < total_cycles {
            writeln!(
                output,
                "\n{} Showing {} of {} cycles. Use --max-cycles to see more.",
                style("ℹ️").blue(),
                style(limit).yellow(),
                style(total_cycles).yellow()
            )?;
        }

        writeln!(
            output,
            "\n{} {} {} lie on a cycle; they are drawn with a dashed arrow.",
            style("💡").yellow(),
            detector.cycle_edge_count(),
            pluralize("edge", detector.cycle_edge_count())
        )?;

        Ok(output)
    }
}
