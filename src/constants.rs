//! Configuration constants for dependency-mapper
//!
//! This module contains the defaults used throughout the application. Most of
//! them can be overridden through command-line flags or environment
//! variables.

use std::time::Duration;

/// Progress bar configuration
pub mod progress {
    use super::*;

    /// Duration between progress bar updates
    pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// Spinner frames shown while the tree is being walked; the last one is
    /// shown once the walk finishes
    pub const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒", "✓"];
}

/// Output configuration
pub mod output {
    /// Artifact written when no output path is given
    pub const DEFAULT_OUTPUT: &str = "output.puml";

    /// Output path meaning "write the diagram to stdout"
    pub const STDOUT: &str = "-";

    /// Name placed after `@startuml`
    pub const DEFAULT_DOMAIN: &str = "dependency_mapper.domain";

    /// Default diagram format
    pub const DEFAULT_FORMAT: &str = "plantuml";

    /// Default summary report format
    pub const DEFAULT_REPORT: &str = "human";

    /// Default dependency resolver
    pub const DEFAULT_RESOLVER: &str = "exact";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_constants() {
        assert_eq!(progress::TICK_INTERVAL, Duration::from_millis(100));
        assert_eq!(progress::SPINNER_FRAMES.len(), 5);
    }

    #[test]
    fn test_output_constants() {
        assert_eq!(output::DEFAULT_OUTPUT, "output.puml");
        assert_eq!(output::DEFAULT_FORMAT, "plantuml");
        assert_eq!(output::DEFAULT_REPORT, "human");
    }
}
