//! # Build File Dialects
//!
//! Each supported build system has one [`DialectParser`] implementation that
//! turns the text of a single build file into raw
//! [`DependencyDeclaration`]s. The parser is chosen once from the
//! [`BuildSystem`] selector and reused for every discovered file.
//!
//! ## Example
//!
//! ```
//! use dependency_mapper::core::BuildSystem;
//! use dependency_mapper::parser;
//!
//! let gradle = parser::for_build_system(BuildSystem::Gradle);
//! let declarations = gradle.parse("app/build.gradle", "dependencies {\n  :lib\n  }\n");
//!
//! assert_eq!(declarations.len(), 1);
//! assert_eq!(declarations[0].dependency, ":lib");
//! ```

mod cmake;
mod gradle;
mod makefile;

use std::path::Path;

pub use cmake::CMakeParser;
pub use gradle::GradleParser;
pub use makefile::MakefileParser;

use crate::core::{BuildSystem, DependencyDeclaration};
use crate::error::DependencyMapperError;

/// Extracts dependency declarations from one build file dialect
pub trait DialectParser: Send + Sync {
    /// Parse the contents of the build file owned by the unit `owner`
    ///
    /// An empty result is valid and means the file declares nothing this
    /// dialect understands.
    fn parse(&self, owner: &str, contents: &str) -> Vec<DependencyDeclaration>;

    /// Short name of the dialect for log output
    fn name(&self) -> &'static str;
}

/// Select the parser for a build system
pub fn for_build_system(build_system: BuildSystem) -> Box<dyn DialectParser> {
    match build_system {
        BuildSystem::Makefile => Box::new(MakefileParser),
        BuildSystem::CMake => Box::new(CMakeParser),
        BuildSystem::Gradle => Box::new(GradleParser),
    }
}

/// Read a build file and decode it as UTF-8
pub fn read_build_file(path: &Path) -> Result<String, DependencyMapperError> {
    let bytes = std::fs::read(path).map_err(|source| DependencyMapperError::FileReadError {
        path: path.to_path_buf(),
        source,
    })?;

    String::from_utf8(bytes).map_err(|e| DependencyMapperError::DecodeError {
        path: path.to_path_buf(),
        source: e.utf8_error(),
    })
}
