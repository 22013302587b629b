use std::path::PathBuf;

use clap::Parser;

use crate::common::{CycleDisplayArgs, OutputArgs, ScanArgs};

#[derive(Parser, Debug)]
#[command(
    name = "dependency-mapper",
    about = "Map library dependencies declared in build files and find cycles",
    long_about = "dependency-mapper searches a source tree for build files with the given name, \
                  extracts the dependencies each one declares, links them into a dependency \
                  graph and writes the graph as a diagram. Dependencies that form a cycle are \
                  drawn with a distinct arrow so circular library relationships stand out.",
    version
)]
pub struct Cli {
    /// Path to the root project folder, or . for the current directory
    #[arg(value_name = "ROOT", env = "DEPENDENCY_MAPPER_ROOT")]
    pub root: PathBuf,

    /// File name and extension of each build file (such as CMakeLists.txt)
    #[arg(value_name = "FILE", env = "DEPENDENCY_MAPPER_FILE")]
    pub filename: String,

    /// Build system: 1 Make, 2 CMake, 3 Gradle
    #[arg(value_name = "BUILD_SYSTEM", env = "DEPENDENCY_MAPPER_BUILD_SYSTEM")]
    pub build_system: u8,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub scan: ScanArgs,

    #[command(flatten)]
    pub cycle_display: CycleDisplayArgs,

    /// Exit with error code if cycles found
    #[arg(long, env = "DEPENDENCY_MAPPER_ERROR_ON_CYCLES")]
    pub error_on_cycles: bool,

    /// List every discovered build file and parsed declaration
    #[arg(short, long, env = "DEPENDENCY_MAPPER_VERBOSE")]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum GraphFormat {
    Plantuml,
    Mermaid,
    Dot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Human,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ResolverKind {
    /// Dependency string must equal a build file path
    Exact,
    /// Last path or coordinate segment must name a build file's directory
    Segment,
    /// Look the dependency string up in --mapping-file
    Mapping,
}
