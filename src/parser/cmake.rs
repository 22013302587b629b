use super::DialectParser;
use crate::core::DependencyDeclaration;

/// CMake dialect
///
/// No declarative dependency grammar is defined for CMake files yet, so every
/// file parses to an empty declaration list. Discovered files still become
/// build units and show up as isolated nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CMakeParser;

impl DialectParser for CMakeParser {
    fn parse(&self, _owner: &str, _contents: &str) -> Vec<DependencyDeclaration> {
        Vec::new()
    }

    fn name(&self) -> &'static str {
        "CMake"
    }
}
