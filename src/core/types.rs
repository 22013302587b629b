//! Core type definitions
//!
//! This module contains the basic data structures used throughout the
//! application, with minimal logic - focusing on data representation.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::DependencyMapperError;

/// Build system whose files are being scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildSystem {
    Makefile,
    CMake,
    Gradle,
}

impl TryFrom<u8> for BuildSystem {
    type Error = DependencyMapperError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Makefile),
            2 => Ok(Self::CMake),
            3 => Ok(Self::Gradle),
            _ => Err(DependencyMapperError::InvalidBuildSystem { value }),
        }
    }
}

impl fmt::Display for BuildSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildSystem::Makefile => write!(f, "Makefile"),
            BuildSystem::CMake => write!(f, "CMake"),
            BuildSystem::Gradle => write!(f, "Gradle"),
        }
    }
}

/// One library or module, identified by the build file that declares it
///
/// Two units are the same entity iff their identities are equal. The
/// identity is the build file path relative to the scan root, with `/`
/// separators so it is stable across platforms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuildUnit {
    id: String,
    path: PathBuf,
}

impl BuildUnit {
    /// Create a unit for `path`, deriving its identity relative to `root`
    ///
    /// Paths outside `root` keep their full display form as identity.
    pub fn new(root: &Path, path: PathBuf) -> Self {
        let id = match path.strip_prefix(root) {
            Ok(relative) => relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
            Err(_) => path.display().to_string(),
        };
        Self { id, path }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the directory holding the build file (`lib` for
    /// `lib/build.gradle`); empty for a build file at the scan root
    pub fn directory_name(&self) -> &str {
        self.id
            .rsplit_once('/')
            .map(|(dir, _)| dir.rsplit('/').next().unwrap_or(dir))
            .unwrap_or("")
    }
}

impl fmt::Display for BuildUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// A raw, unresolved dependency extracted from one build file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DependencyDeclaration {
    /// Identity of the declaring [`BuildUnit`]
    pub owner: String,
    /// The dependency exactly as written, trimmed of surrounding whitespace
    pub dependency: String,
}

impl DependencyDeclaration {
    pub fn new(owner: impl Into<String>, dependency: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            dependency: dependency.into(),
        }
    }

    /// Blank declarations come from empty lines inside a dependency block
    pub fn is_blank(&self) -> bool {
        self.dependency.is_empty()
    }
}

/// A per-file problem that degrades the scan instead of aborting it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanWarning {
    /// A directory entry could not be read during traversal
    Discovery { path: PathBuf, message: String },
    /// A build file could not be read or decoded; its contribution is empty
    Decode { path: PathBuf, message: String },
}

impl ScanWarning {
    pub fn path(&self) -> &Path {
        match self {
            ScanWarning::Discovery { path, .. } | ScanWarning::Decode { path, .. } => path,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ScanWarning::Discovery { message, .. } | ScanWarning::Decode { message, .. } => {
                message
            }
        }
    }
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanWarning::Discovery { path, message } => {
                write!(f, "skipped '{}': {}", path.display(), message)
            }
            ScanWarning::Decode { path, message } => {
                write!(f, "could not decode '{}': {}", path.display(), message)
            }
        }
    }
}
