//! Build file discovery
//!
//! Walks a root directory and lazily yields every file whose base name is
//! exactly the configured build file name.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::core::ScanWarning;
use crate::error::DependencyMapperError;

type EntryIter = Box<dyn Iterator<Item = walkdir::Result<DirEntry>>>;

pub struct FileCollector {
    filename: OsString,
    max_depth: Option<usize>,
    excluded_dirs: Vec<OsString>,
}

impl FileCollector {
    pub fn new(filename: impl Into<OsString>) -> Self {
        Self {
            filename: filename.into(),
            max_depth: None,
            excluded_dirs: Vec::new(),
        }
    }

    /// Bound how deep below the root the traversal descends
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Directory base names that are never descended into
    pub fn with_excluded_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.excluded_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Start collecting build files under `root`
    ///
    /// Fails only when `root` is missing or not a directory. Unreadable
    /// entries and symlink loops met during traversal are yielded as
    /// [`ScanWarning::Discovery`] items and the walk carries on.
    pub fn collect(&self, root: &Path) -> Result<FileIter, DependencyMapperError> {
        if !root.exists() {
            return Err(DependencyMapperError::RootNotFound {
                path: root.to_path_buf(),
            });
        }
        if !root.is_dir() {
            return Err(DependencyMapperError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        let root = root
            .canonicalize()
            .map_err(|source| DependencyMapperError::FileReadError {
                path: root.to_path_buf(),
                source,
            })?;

        let mut walker = WalkDir::new(&root).follow_links(true).sort_by_file_name();
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let excluded = self.excluded_dirs.clone();
        let entries: EntryIter = Box::new(walker.into_iter().filter_entry(move |e| {
            e.depth() == 0
                || !(e.file_type().is_dir() && excluded.iter().any(|name| name == e.file_name()))
        }));

        Ok(FileIter {
            root,
            entries,
            filename: self.filename.clone(),
            seen: HashSet::new(),
        })
    }
}

/// Lazy sequence of discovered build files
///
/// Each real file is yielded once, even when several symlinked paths lead to
/// it. Files inside the root are yielded at their real location.
pub struct FileIter {
    root: PathBuf,
    entries: EntryIter,
    filename: OsString,
    seen: HashSet<PathBuf>,
}

impl FileIter {
    /// Canonical root the paths are yielded under
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Iterator for FileIter {
    type Item = Result<PathBuf, ScanWarning>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(walk_warning(&self.root, &err))),
            };

            if !entry.file_type().is_file() || entry.file_name() != self.filename.as_os_str() {
                continue;
            }

            let real = entry.path().canonicalize().ok();
            let key = real.clone().unwrap_or_else(|| entry.path().to_path_buf());
            if !self.seen.insert(key) {
                continue;
            }

            // A symlinked alias never stands in for the file it points to
            let path = match real {
                Some(real) if real.starts_with(&self.root) => real,
                _ => entry.into_path(),
            };
            return Some(Ok(path));
        }
    }
}

fn walk_warning(root: &Path, err: &walkdir::Error) -> ScanWarning {
    let path = err.path().unwrap_or(root).to_path_buf();
    let message = match err.loop_ancestor() {
        Some(ancestor) => format!("symlink loop back to '{}'", ancestor.display()),
        None => err
            .io_error()
            .map(|e| e.to_string())
            .unwrap_or_else(|| err.to_string()),
    };
    ScanWarning::Discovery { path, message }
}
