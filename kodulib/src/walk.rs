//! Tree walking with early exclusion.
//!
//! [`TreeWalker`] is a lazy, depth-first iterator over a project root. Each
//! entry goes through the cheap checks before anything touches file
//! contents:
//!
//! 1. Hidden names (leading `.`) are skipped unless requested
//! 2. Well-known dependency/build directories are pruned by name
//! 3. Symbolic links are skipped, never followed
//! 4. The ignore matcher is consulted; matching directories are pruned
//! 5. Files over the size limit are reported as [`SkipReason::TooLarge`]
//!
//! Permission-denied and vanished directories are logged and skipped. Any
//! other I/O error ends the walk with [`KoduError::Walk`].
//!
//! Order follows the host's directory listing; sorting is the caller's job.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};

use crate::classify::{is_excluded_filename, SkipReason};
use crate::error::KoduError;
use crate::matcher::Matcher;
use crate::options::{DiscoveryOptions, DEFAULT_MAX_FILE_SIZE};
use crate::Result;

/// Directory names pruned before the matcher is consulted.
pub const EXCLUDED_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    ".kodu",
    ".idea",
    ".vscode",
    ".venv",
    "__pycache__",
    "node_modules",
    "target",
    "dist",
    "coverage",
];

/// A file that survived the walk's exclusion rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCandidate {
    pub absolute_path: PathBuf,
    /// Root-relative path with `/` separators
    pub relative_path: String,
    pub size: u64,
}

/// A file left out of the result, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: SkipReason,
}

/// One step of the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEvent {
    /// File to hand to the classifier
    File(FileCandidate),
    /// File rejected by the walker itself
    Skipped(SkippedFile),
}

/// Walker settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    pub include_hidden: bool,
    pub max_file_size: u64,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            include_hidden: false,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl From<&DiscoveryOptions> for WalkOptions {
    fn from(options: &DiscoveryOptions) -> Self {
        Self {
            include_hidden: options.include_hidden,
            max_file_size: options.max_file_size,
        }
    }
}

/// Lazy depth-first walk over a project root.
pub struct TreeWalker<'a> {
    root: PathBuf,
    inner: walkdir::IntoIter,
    matcher: &'a dyn Matcher,
    options: WalkOptions,
}

impl<'a> TreeWalker<'a> {
    /// Start a walk. Nothing is read until the iterator is polled.
    pub fn new(root: impl AsRef<Path>, matcher: &'a dyn Matcher, options: WalkOptions) -> Self {
        let root = root.as_ref().to_path_buf();
        let inner = WalkDir::new(&root).follow_links(false).into_iter();
        Self {
            root,
            inner,
            matcher,
            options,
        }
    }

    fn relative(&self, path: &Path) -> String {
        to_posix(path.strip_prefix(&self.root).unwrap_or(path))
    }

    /// Apply the exclusion rules to one entry.
    fn visit(&mut self, entry: DirEntry) -> Result<Option<WalkEvent>> {
        if entry.depth() == 0 {
            return Ok(None);
        }

        let name = entry.file_name().to_string_lossy();
        let file_type = entry.file_type();
        let is_dir = file_type.is_dir();

        if !self.options.include_hidden && name.starts_with('.') {
            if is_dir {
                self.inner.skip_current_dir();
            }
            return Ok(None);
        }

        if is_dir && EXCLUDED_DIRS.contains(&&*name) {
            tracing::debug!(path = %entry.path().display(), "pruning excluded directory");
            self.inner.skip_current_dir();
            return Ok(None);
        }

        if file_type.is_symlink() {
            return Ok(None);
        }

        let relative = self.relative(entry.path());

        if is_dir {
            if self.matcher.matches_dir(&relative) {
                tracing::debug!(path = %relative, "pruning ignored directory");
                self.inner.skip_current_dir();
            }
            return Ok(None);
        }

        if !file_type.is_file()
            || is_excluded_filename(&name)
            || self.matcher.matches(&relative)
        {
            return Ok(None);
        }

        let size = match entry.metadata() {
            Ok(meta) => meta.len(),
            Err(e) => {
                let reason = match e.io_error().map(|io| io.kind()) {
                    Some(ErrorKind::PermissionDenied) => SkipReason::PermissionDenied,
                    Some(ErrorKind::NotFound) => SkipReason::Unreadable,
                    _ => {
                        return Err(KoduError::Walk {
                            path: entry.path().to_path_buf(),
                            source: e,
                        })
                    }
                };
                return Ok(Some(skipped(relative, reason)));
            }
        };

        if size > self.options.max_file_size {
            return Ok(Some(skipped(relative, SkipReason::TooLarge)));
        }

        Ok(Some(WalkEvent::File(FileCandidate {
            absolute_path: entry.into_path(),
            relative_path: relative,
            size,
        })))
    }
}

impl Iterator for TreeWalker<'_> {
    type Item = Result<WalkEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    if is_recoverable(&e) {
                        tracing::warn!(
                            path = %e.path().unwrap_or(self.root.as_path()).display(),
                            "skipping unreadable directory: {}",
                            e
                        );
                        continue;
                    }
                    let path = e.path().unwrap_or(self.root.as_path()).to_path_buf();
                    return Some(Err(KoduError::Walk { path, source: e }));
                }
            };

            match self.visit(entry) {
                Ok(Some(event)) => return Some(Ok(event)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Permission-denied or vanished entries don't abort the walk.
fn is_recoverable(error: &walkdir::Error) -> bool {
    matches!(
        error.io_error().map(|e| e.kind()),
        Some(ErrorKind::PermissionDenied) | Some(ErrorKind::NotFound)
    )
}

fn skipped(path: String, reason: SkipReason) -> WalkEvent {
    WalkEvent::Skipped(SkippedFile { path, reason })
}

/// Join path components with `/` whatever the host separator.
pub fn to_posix(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
