//! Ignore sources: where raw patterns come from.
//!
//! Every source is an ordered list of raw pattern strings plus a tag saying
//! where it came from. Ignore files are read once per discovery call; a
//! missing or undecodable file yields an empty source.

use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// File name of the VCS ignore file read from the project root.
pub const GITIGNORE_FILE: &str = ".gitignore";

/// File name of the tool-specific ignore file read from the project root.
pub const TOOL_IGNORE_FILE: &str = ".koduignore";

/// Built-in deny-list applied unless the caller replaces it.
pub const DEFAULT_DENY_PATTERNS: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    ".git",
    ".kodu",
    "node_modules",
    "dist",
    "coverage",
];

/// Where a set of patterns came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// Built-in or configured deny-list
    DenyList,
    /// Project `.gitignore`
    Gitignore,
    /// Project `.koduignore`
    ToolIgnore,
    /// Patterns passed by the caller
    Override,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SourceKind::DenyList => "deny-list",
            SourceKind::Gitignore => GITIGNORE_FILE,
            SourceKind::ToolIgnore => TOOL_IGNORE_FILE,
            SourceKind::Override => "override",
        };
        f.write_str(label)
    }
}

/// An immutable, ordered list of raw ignore patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreSource {
    kind: SourceKind,
    patterns: Vec<String>,
}

impl IgnoreSource {
    /// Build a source from patterns already split into lines.
    ///
    /// Blank entries and `#` comments are dropped the same way they are for
    /// ignore files.
    pub fn new<I, S>(kind: SourceKind, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .filter_map(|p| clean_line(p.as_ref()))
            .collect();
        Self { kind, patterns }
    }

    /// Parse newline-delimited ignore file text.
    pub fn parse(kind: SourceKind, text: &str) -> Self {
        Self::new(kind, text.lines())
    }

    /// A source with no patterns.
    pub fn empty(kind: SourceKind) -> Self {
        Self {
            kind,
            patterns: Vec::new(),
        }
    }

    /// Read an ignore file.
    ///
    /// A missing file is the normal case and is silent; an unreadable or
    /// non-UTF-8 file is logged and treated as empty.
    pub fn read(kind: SourceKind, path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let source = Self::parse(kind, &text);
                tracing::debug!(
                    path = %path.display(),
                    patterns = source.len(),
                    "loaded ignore file"
                );
                source
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Self::empty(kind),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable ignore file");
                Self::empty(kind)
            }
        }
    }

    /// Provenance tag.
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Raw patterns in file order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Trim a line and drop it if blank or a comment.
///
/// Trailing whitespace is insignificant in ignore files; leading whitespace
/// is trimmed too since no real project relies on it.
fn clean_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        None
    } else {
        Some(line.to_string())
    }
}
