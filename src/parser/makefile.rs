use super::DialectParser;
use crate::core::DependencyDeclaration;

/// Makefile dialect
///
/// No declarative dependency grammar is defined for Makefile files yet, so every
/// file parses to an empty declaration list. Discovered files still become
/// build units and show up as isolated nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakefileParser;

impl DialectParser for MakefileParser {
    fn parse(&self, _owner: &str, _contents: &str) -> Vec<DependencyDeclaration> {
        Vec::new()
    }

    fn name(&self) -> &'static str {
        "Makefile"
    }
}
