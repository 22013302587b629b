use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid mapping file '{file}'")]
#[diagnostic(
    code(dependency_mapper::mapping_parse_error),
    help("Mapping files are TOML with a [units] table of \"raw dependency\" = \"build file\" pairs")
)]
pub struct MappingParseError {
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("syntax error here")]
    pub span: Option<SourceSpan>,
    #[source]
    pub source: toml::de::Error,
}

#[derive(Error, Debug, Diagnostic)]
pub enum DependencyMapperError {
    #[error("Root path '{path}' does not exist")]
    #[diagnostic(
        code(dependency_mapper::root_not_found),
        help("Pass an existing directory, or '.' for the current directory")
    )]
    RootNotFound { path: PathBuf },

    #[error("Root path '{path}' is not a directory")]
    #[diagnostic(
        code(dependency_mapper::not_a_directory),
        help("The scan root must be a directory containing build files")
    )]
    NotADirectory { path: PathBuf },

    #[error("Invalid build system selector: {value}")]
    #[diagnostic(
        code(dependency_mapper::invalid_build_system),
        help("Use 1 for Makefile, 2 for CMake or 3 for Gradle")
    )]
    InvalidBuildSystem { value: u8 },

    #[error("Failed to read file '{path}'")]
    #[diagnostic(
        code(dependency_mapper::io_error),
        help("Check if the file exists and you have read permissions")
    )]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File '{path}' is not valid UTF-8")]
    #[diagnostic(
        code(dependency_mapper::decode_error),
        help("Build files are expected to be UTF-8 text")
    )]
    DecodeError {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("Cannot read mapping file '{path}'")]
    #[diagnostic(
        code(dependency_mapper::mapping_file_unreadable),
        help("Check the --mapping-file path; it is read before the scan starts")
    )]
    MappingFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    MappingParseError(Box<MappingParseError>),

    #[error("None of the {count} discovered build files could be decoded")]
    #[diagnostic(
        code(dependency_mapper::all_files_undecodable),
        help("Check the file encoding and read permissions of the discovered build files")
    )]
    AllFilesUndecodable { count: usize },

    #[error("JSON serialization error")]
    #[diagnostic(
        code(dependency_mapper::json_error),
        help("This is likely an internal error - please report it")
    )]
    Json(#[from] serde_json::Error),

    #[error("String formatting error")]
    #[diagnostic(
        code(dependency_mapper::fmt_error),
        help("This is likely an internal error - please report it")
    )]
    Fmt(#[from] std::fmt::Error),

    #[error("IO error")]
    #[diagnostic(
        code(dependency_mapper::io_error),
        help("Check file permissions and disk space")
    )]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(dependency_mapper::config_error),
        help("Check your command arguments and configuration")
    )]
    ConfigurationError { message: String },

    #[error("Graph error: {message}")]
    #[diagnostic(
        code(dependency_mapper::graph_error),
        help("This may be an internal error with graph processing")
    )]
    GraphError { message: String },
}

impl DependencyMapperError {
    /// Whether this error belongs to the fatal configuration class that
    /// aborts before any file is scanned
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::RootNotFound { .. }
                | Self::NotADirectory { .. }
                | Self::InvalidBuildSystem { .. }
                | Self::ConfigurationError { .. }
                | Self::MappingFileUnreadable { .. }
                | Self::MappingParseError(_)
        )
    }
}
