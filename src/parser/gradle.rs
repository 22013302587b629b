use super::DialectParser;
use crate::core::DependencyDeclaration;

const BLOCK_KEYWORD: &str = "dependencies";

/// Line-oriented reader for Gradle `dependencies { ... }` blocks
///
/// Rules, applied to each line in order:
///
/// 1. A line containing `dependencies` opens the block; the line itself is
///    never a declaration.
/// 2. Inside the block, a line whose first `}` sits after column 0 closes the
///    block and ends parsing of the file. A `}` at column 0 does *not* close
///    the block (see [`GradleParser::closes_block`]).
/// 3. Every other line inside the block is trimmed and emitted, blank lines
///    included.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradleParser;

impl GradleParser {
    /// Whether `line` terminates an open dependency block
    ///
    /// Only the first `}` on the line is considered, and it must not be at
    /// column 0. An unindented closing brace therefore leaves the block open
    /// and the block runs on to the next indented `}` or end of file.
    pub fn closes_block(line: &str) -> bool {
        line.find('}').is_some_and(|column| column > 0)
    }
}

impl DialectParser for GradleParser {
    fn parse(&self, owner: &str, contents: &str) -> Vec<DependencyDeclaration> {
        let mut declarations = Vec::new();
        let mut in_block = false;

        for line in contents.lines() {
            if line.contains(BLOCK_KEYWORD) {
                in_block = true;
                continue;
            }

            if !in_block {
                continue;
            }

            if Self::closes_block(line) {
                break;
            }

            declarations.push(DependencyDeclaration::new(owner, line.trim()));
        }

        declarations
    }

    fn name(&self) -> &'static str {
        "Gradle"
    }
}
