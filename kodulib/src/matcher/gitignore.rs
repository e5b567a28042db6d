//! Gitignore-compatible matcher backed by the `ignore` crate.
//!
//! Rules are evaluated in source order with last-match-wins precedence, so a
//! later `!pattern` re-includes a path an earlier rule excluded. Root anchors
//! (`/dist`) and directory-only rules (`build/`) keep their git meaning.

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use super::Matcher;
use crate::error::KoduError;
use crate::source::IgnoreSource;
use crate::Result;

/// Matcher with full gitignore precedence.
#[derive(Debug, Clone)]
pub struct GitignoreMatcher {
    inner: Gitignore,
}

impl GitignoreMatcher {
    /// Build from ordered sources rooted at `root`.
    ///
    /// Lines the gitignore parser rejects are logged and skipped.
    pub fn from_sources(root: &Path, sources: &[IgnoreSource]) -> Result<Self> {
        let mut builder = GitignoreBuilder::new(root);

        for source in sources {
            for line in source.patterns() {
                if let Err(e) = builder.add_line(None, line) {
                    tracing::warn!(source = %source.kind(), pattern = %line, "skipping ignore pattern: {}", e);
                }
            }
        }

        let inner = builder
            .build()
            .map_err(|e| KoduError::InvalidIgnorePattern {
                pattern: root.display().to_string(),
                message: e.to_string(),
            })?;

        Ok(Self { inner })
    }

    /// Number of compiled rules.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Matcher for GitignoreMatcher {
    fn matches(&self, path: &str) -> bool {
        self.inner.matched(path, false).is_ignore()
    }

    fn matches_dir(&self, path: &str) -> bool {
        self.inner.matched(path, true).is_ignore()
    }
}
