use std::path::Path;

use console::{Term, style};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::constants::progress::{SPINNER_FRAMES, TICK_INTERVAL};
use crate::utils::string::pluralize;

const PROGRESS_BAR_TEMPLATE: &str =
    "{msg} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {per_sec}";
const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";

/// Interactive progress output on stderr
///
/// Only created when stderr is a terminal, so piped runs stay quiet.
pub struct ProgressReporter {
    term: Term,
    multi_progress: MultiProgress,
    current_bar: Option<ProgressBar>,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            multi_progress: MultiProgress::new(),
            current_bar: None,
        }
    }

    /// Reporter for the current process, or `None` when stderr is not a
    /// terminal
    pub fn for_terminal() -> Option<Self> {
        Term::stderr().is_term().then(Self::new)
    }

    pub fn create_progress_bar(&mut self, len: u64, message: &str) -> ProgressBar {
        let pb = self.multi_progress.add(ProgressBar::new(len));
        let bar_style = ProgressStyle::default_bar()
            .template(PROGRESS_BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏ ");
        pb.set_style(bar_style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    pub fn create_spinner(&mut self, message: &str) -> ProgressBar {
        let pb = self.multi_progress.add(ProgressBar::new_spinner());
        let spinner_style = ProgressStyle::default_spinner()
            .template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(SPINNER_FRAMES);
        pb.set_style(spinner_style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    pub fn start_discovery(&mut self, filename: &str) {
        let _ = self.term.clear_line();
        eprintln!(
            "{} Searching for {} files...",
            style("🔍").cyan(),
            style(filename).bold()
        );
        let spinner = self.create_spinner("Walking directory tree...");
        self.current_bar = Some(spinner);
    }

    pub fn found_file(&self, path: &Path) {
        if let Some(ref pb) = self.current_bar {
            pb.set_message(format!("Found: {}", path.display()));
        }
    }

    pub fn finish_discovery(&mut self, count: usize) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        let _ = self.term.clear_line();
        if count == 0 {
            eprintln!("\r{} No build files found", style("✗").red());
        } else {
            eprintln!(
                "\r{} Discovery complete: found {} build {}",
                style("✓").green(),
                style(count).yellow().bold(),
                pluralize("file", count)
            );
        }
    }

    pub fn start_parsing(&mut self, total_files: usize) -> ProgressBar {
        let pb = self.create_progress_bar(total_files as u64, "Parsing build files");
        self.current_bar = Some(pb.clone());
        pb
    }

    pub fn finish_parsing(&mut self) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_with_message("Parsing complete");
        }
    }

    pub fn start_cycle_detection(&mut self) {
        eprintln!("\n{} Detecting dependency cycles...", style("🔄").yellow());
    }

    pub fn finish_cycle_detection(&self, cycles_found: usize) {
        if cycles_found == 0 {
            eprintln!("{} No cycles detected!", style("✓").green().bold());
        } else {
            eprintln!(
                "{} Found {} {}",
                style("⚠").yellow().bold(),
                style(cycles_found).red().bold(),
                pluralize("cycle", cycles_found)
            );
        }
    }
}
