//! Strategies for matching raw dependency strings to build units
//!
//! Matching names across build ecosystems is heuristic, so the graph builder
//! takes the strategy as a [`DependencyResolver`] trait object.

use std::collections::BTreeMap;
use std::path::Path;

use miette::{NamedSource, SourceSpan};
use serde::Deserialize;

use crate::cli::ResolverKind;
use crate::core::BuildUnit;
use crate::error::{DependencyMapperError, MappingParseError};

/// Maps a raw dependency string to one of the discovered units
pub trait DependencyResolver: Send + Sync {
    /// Return the unit `raw` refers to, or `None` to leave it external
    fn resolve<'u>(&self, raw: &str, units: &'u [BuildUnit]) -> Option<&'u BuildUnit>;

    fn name(&self) -> &'static str;
}

/// Matches when the raw string is a unit's identity or absolute path
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactResolver;

impl DependencyResolver for ExactResolver {
    fn resolve<'u>(&self, raw: &str, units: &'u [BuildUnit]) -> Option<&'u BuildUnit> {
        units
            .iter()
            .find(|unit| unit.id() == raw || unit.path() == Path::new(raw))
    }

    fn name(&self) -> &'static str {
        "exact"
    }
}

/// Matches the trailing segment of the raw string against the directory
/// that holds each unit's build file
///
/// `project(':core')`, `:core` and `libs/core` all reduce to `core` and
/// resolve to `core/build.gradle`. When several units live in directories
/// with that name the dependency stays unresolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentResolver;

impl SegmentResolver {
    /// Last non-empty token after splitting on path, coordinate and quoting
    /// punctuation and whitespace
    pub fn trailing_segment(raw: &str) -> Option<&str> {
        raw.rsplit(|c: char| {
            matches!(c, ':' | '/' | '\\' | '\'' | '"' | '(' | ')') || c.is_whitespace()
        })
        .find(|segment| !segment.is_empty())
    }
}

impl DependencyResolver for SegmentResolver {
    fn resolve<'u>(&self, raw: &str, units: &'u [BuildUnit]) -> Option<&'u BuildUnit> {
        let segment = Self::trailing_segment(raw)?;
        let mut matches = units.iter().filter(|unit| unit.directory_name() == segment);
        let first = matches.next()?;
        match matches.next() {
            None => Some(first),
            Some(_) => None,
        }
    }

    fn name(&self) -> &'static str {
        "segment"
    }
}

#[derive(Debug, Deserialize)]
struct MappingFile {
    #[serde(default)]
    units: BTreeMap<String, String>,
}

/// Resolves through an explicit table of raw string to unit identity
///
/// ```toml
/// [units]
/// "com.example:core:1.0" = "libs/core/build.gradle"
/// ":app" = "app/build.gradle"
/// ```
#[derive(Debug, Clone, Default)]
pub struct MappingResolver {
    units: BTreeMap<String, String>,
}

impl MappingResolver {
    pub fn new(units: BTreeMap<String, String>) -> Self {
        Self { units }
    }

    pub fn from_file(path: &Path) -> Result<Self, DependencyMapperError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            DependencyMapperError::MappingFileUnreadable {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::parse(&path.display().to_string(), &content)
    }

    /// Parse mapping TOML, naming it `file` in diagnostics
    pub fn parse(file: &str, content: &str) -> Result<Self, DependencyMapperError> {
        let mapping: MappingFile = toml::from_str(content).map_err(|e| {
            let span = e
                .span()
                .map(|span| SourceSpan::new(span.start.into(), span.end - span.start));

            DependencyMapperError::MappingParseError(Box::new(MappingParseError {
                file: file.to_string(),
                source_code: NamedSource::new(file, content.to_string()),
                span,
                source: e,
            }))
        })?;

        Ok(Self::new(mapping.units))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl DependencyResolver for MappingResolver {
    fn resolve<'u>(&self, raw: &str, units: &'u [BuildUnit]) -> Option<&'u BuildUnit> {
        let target = self.units.get(raw)?;
        units.iter().find(|unit| unit.id() == target)
    }

    fn name(&self) -> &'static str {
        "mapping"
    }
}

/// Construct the resolver selected on the command line
pub fn resolver_for(
    kind: ResolverKind,
    mapping_file: Option<&Path>,
) -> Result<Box<dyn DependencyResolver>, DependencyMapperError> {
    match kind {
        ResolverKind::Exact => Ok(Box::new(ExactResolver)),
        ResolverKind::Segment => Ok(Box::new(SegmentResolver)),
        ResolverKind::Mapping => {
            let path = mapping_file.ok_or_else(|| DependencyMapperError::ConfigurationError {
                message: "The mapping resolver requires --mapping-file".to_string(),
            })?;
            Ok(Box::new(MappingResolver::from_file(path)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn units() -> Vec<BuildUnit> {
        let root = Path::new("/repo");
        ["app/build.gradle", "libs/core/build.gradle", "lib/build.gradle"]
            .iter()
            .map(|id| BuildUnit::new(root, root.join(id)))
            .collect()
    }

    #[test]
    fn test_exact_matches_identity() {
        let units = units();
        let found = ExactResolver.resolve("libs/core/build.gradle", &units);
        assert_eq!(found.map(BuildUnit::id), Some("libs/core/build.gradle"));
    }

    #[test]
    fn test_exact_matches_absolute_path() {
        let units = units();
        let found = ExactResolver.resolve("/repo/app/build.gradle", &units);
        assert_eq!(found.map(BuildUnit::id), Some("app/build.gradle"));
    }

    #[test]
    fn test_exact_rejects_names() {
        let units = units();
        assert!(ExactResolver.resolve(":core", &units).is_none());
    }

    #[test]
    fn test_trailing_segment() {
        assert_eq!(SegmentResolver::trailing_segment(":core"), Some("core"));
        assert_eq!(
            SegmentResolver::trailing_segment("implementation project(':libs:core')"),
            Some("core")
        );
        assert_eq!(SegmentResolver::trailing_segment("libs/core/"), Some("core"));
        assert_eq!(
            SegmentResolver::trailing_segment("\"com.example:libfoo:1.0\""),
            Some("1.0")
        );
        assert_eq!(SegmentResolver::trailing_segment(" :: "), None);
    }

    #[test]
    fn test_segment_matches_directory_name() {
        let units = units();
        let found = SegmentResolver.resolve("project(':core')", &units);
        assert_eq!(found.map(BuildUnit::id), Some("libs/core/build.gradle"));
    }

    #[test]
    fn test_segment_ambiguous_names_stay_unresolved() {
        let root = Path::new("/repo");
        let units = vec![
            BuildUnit::new(root, PathBuf::from("/repo/a/core/build.gradle")),
            BuildUnit::new(root, PathBuf::from("/repo/b/core/build.gradle")),
        ];
        assert!(SegmentResolver.resolve(":core", &units).is_none());
    }

    #[test]
    fn test_mapping_resolves_listed_entries() {
        let resolver = MappingResolver::parse(
            "mapping.toml",
            r#"
[units]
"com.example:core:1.0" = "libs/core/build.gradle"
":ghost" = "ghost/build.gradle"
"#,
        )
        .unwrap();
        let units = units();

        assert_eq!(resolver.len(), 2);
        assert_eq!(
            resolver
                .resolve("com.example:core:1.0", &units)
                .map(BuildUnit::id),
            Some("libs/core/build.gradle")
        );
        // Mapped to a unit that was never discovered
        assert!(resolver.resolve(":ghost", &units).is_none());
        assert!(resolver.resolve(":app", &units).is_none());
    }

    #[test]
    fn test_mapping_parse_error_has_span() {
        match MappingResolver::parse("mapping.toml", "[units]\n\"a\" = \n") {
            Err(DependencyMapperError::MappingParseError(err)) => {
                assert_eq!(err.file, "mapping.toml");
                assert!(err.span.is_some());
            }
            other => panic!("Expected MappingParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_mapping_file_is_a_config_error() {
        match resolver_for(ResolverKind::Mapping, Some(Path::new("/nonexistent/map.toml"))) {
            Err(err @ DependencyMapperError::MappingFileUnreadable { .. }) => {
                assert!(err.is_config_error());
            }
            Err(other) => panic!("Expected MappingFileUnreadable, got {other:?}"),
            Ok(_) => panic!("Expected MappingFileUnreadable, got a resolver"),
        }
    }

    #[test]
    fn test_mapping_resolver_requires_file() {
        assert!(matches!(
            resolver_for(ResolverKind::Mapping, None),
            Err(DependencyMapperError::ConfigurationError { .. })
        ));
        assert_eq!(
            resolver_for(ResolverKind::Segment, None).unwrap().name(),
            "segment"
        );
    }
}
