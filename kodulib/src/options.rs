//! Input options for file discovery.
//!
//! A [`DiscoveryOptions`] value is built per call and passed by reference;
//! nothing here is global. It derives serde so a configuration loader can
//! embed it directly.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::source::DEFAULT_DENY_PATTERNS;

/// Default per-file size limit (1 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// How the final file list is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryMode {
    /// Paths sorted lexicographically
    #[default]
    Simple,
    /// Paths sorted by descending priority score, ties in discovery order
    Ranking,
}

impl FromStr for DiscoveryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" | "sorted" => Ok(DiscoveryMode::Simple),
            "ranking" | "rank" | "priority" => Ok(DiscoveryMode::Ranking),
            _ => Err(format!("Unknown discovery mode: {}", s)),
        }
    }
}

/// Which ignore engine evaluates the pattern set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatcherKind {
    /// Flat glob union; negated patterns are dropped
    #[default]
    Glob,
    /// Ordered gitignore rules with `!pattern` re-inclusion
    Gitignore,
}

impl FromStr for MatcherKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "glob" => Ok(MatcherKind::Glob),
            "gitignore" | "git" => Ok(MatcherKind::Gitignore),
            _ => Err(format!("Unknown matcher: {}", s)),
        }
    }
}

/// Options for a discovery call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryOptions {
    /// Fixed deny-list patterns
    pub deny_patterns: Vec<String>,
    /// Read `.gitignore` at the root
    pub use_gitignore: bool,
    /// Read `.koduignore` at the root
    pub use_tool_ignore: bool,
    /// Sniff file prefixes for NUL bytes and magic numbers
    pub content_sniffing: bool,
    /// Files larger than this many bytes are skipped
    pub max_file_size: u64,
    /// Descend into dot-files and dot-directories
    pub include_hidden: bool,
    /// Caller-supplied ignore patterns
    pub overrides: Vec<String>,
    /// Output ordering
    pub mode: DiscoveryMode,
    /// Ignore engine
    pub matcher: MatcherKind,
    /// Collect `(path, reason)` for skipped files
    pub report_skipped: bool,
    /// Cap on classification worker threads (None = rayon default)
    pub threads: Option<usize>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            deny_patterns: DEFAULT_DENY_PATTERNS.iter().map(|p| p.to_string()).collect(),
            use_gitignore: true,
            use_tool_ignore: true,
            content_sniffing: true,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            include_hidden: false,
            overrides: Vec::new(),
            mode: DiscoveryMode::Simple,
            matcher: MatcherKind::Glob,
            report_skipped: false,
            threads: None,
        }
    }
}

impl DiscoveryOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the fixed deny-list.
    pub fn deny_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deny_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable `.gitignore`.
    pub fn gitignore(mut self, enabled: bool) -> Self {
        self.use_gitignore = enabled;
        self
    }

    /// Enable or disable `.koduignore`.
    pub fn tool_ignore(mut self, enabled: bool) -> Self {
        self.use_tool_ignore = enabled;
        self
    }

    /// Enable or disable content sniffing.
    pub fn content_sniffing(mut self, enabled: bool) -> Self {
        self.content_sniffing = enabled;
        self
    }

    /// Set the per-file size limit in bytes.
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Include hidden entries.
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Add a caller override pattern.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.overrides.push(pattern.into());
        self
    }

    /// Add multiple caller override patterns.
    pub fn exclude_many<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.overrides.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Set the output ordering.
    pub fn mode(mut self, mode: DiscoveryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for ranking mode.
    pub fn ranked(self) -> Self {
        self.mode(DiscoveryMode::Ranking)
    }

    /// Select the ignore engine.
    pub fn matcher(mut self, kind: MatcherKind) -> Self {
        self.matcher = kind;
        self
    }

    /// Record skipped files in the result.
    pub fn report_skipped(mut self, enabled: bool) -> Self {
        self.report_skipped = enabled;
        self
    }

    /// Cap classification worker threads.
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads.max(1));
        self
    }
}
