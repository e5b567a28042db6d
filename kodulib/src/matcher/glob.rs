//! Flat glob matcher.
//!
//! Compiles the union of canonical globs into `glob::Pattern`s and tests
//! posix-style relative paths against them. `*` and `?` never cross a `/`;
//! `**` does.
//!
//! Directories are tested by their own relative path, so `*.egg-info` prunes
//! `pkg.egg-info/`. Globs from bare file names (`README.md`) are kept apart
//! and never prune a directory.

use ::glob::{MatchOptions, Pattern};

use super::normalize::{normalize, CanonicalPattern, DroppedPattern};
use super::Matcher;
use crate::error::KoduError;
use crate::source::IgnoreSource;
use crate::Result;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Matcher over a flat set of compiled globs.
#[derive(Debug, Clone, Default)]
pub struct GlobMatcher {
    patterns: Vec<Pattern>,
    file_only: Vec<Pattern>,
}

impl GlobMatcher {
    /// Create a matcher that matches nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a set of canonical globs, failing on the first invalid one.
    pub fn try_new<I, S>(globs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut matcher = Self::new();
        for glob in globs {
            matcher = matcher.add(glob.as_ref())?;
        }
        Ok(matcher)
    }

    /// Add one compiled glob.
    pub fn add(mut self, glob: &str) -> Result<Self> {
        let pattern = Pattern::new(glob).map_err(|e| KoduError::InvalidGlob {
            pattern: glob.to_string(),
            message: e.to_string(),
        })?;
        self.patterns.push(pattern);
        Ok(self)
    }

    /// Normalize and compile every pattern of every source.
    ///
    /// Negated patterns are returned as dropped; globs the `glob` crate
    /// rejects (`a**b`, unclosed brackets) are logged and skipped.
    pub fn from_sources(sources: &[IgnoreSource]) -> (Self, Vec<DroppedPattern>) {
        let mut matcher = Self::new();
        let mut dropped = Vec::new();

        for source in sources {
            for raw in source.patterns() {
                match normalize(raw) {
                    Ok(canonical) => matcher.extend_canonical(&canonical),
                    Err(d) => {
                        tracing::warn!(source = %source.kind(), "dropping ignore pattern {}", d);
                        dropped.push(d);
                    }
                }
            }
        }

        for patterns in [&mut matcher.patterns, &mut matcher.file_only] {
            patterns.sort_by(|a, b| a.as_str().cmp(b.as_str()));
            patterns.dedup_by(|a, b| a.as_str() == b.as_str());
        }

        (matcher, dropped)
    }

    fn extend_canonical(&mut self, canonical: &CanonicalPattern) {
        let target = if canonical.file_only {
            &mut self.file_only
        } else {
            &mut self.patterns
        };
        for glob in &canonical.globs {
            match Pattern::new(glob) {
                Ok(pattern) => target.push(pattern),
                Err(e) => {
                    tracing::warn!(pattern = %canonical.raw, glob = %glob, "skipping invalid glob: {}", e);
                }
            }
        }
    }

    /// Number of compiled globs.
    pub fn len(&self) -> usize {
        self.patterns.len() + self.file_only.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty() && self.file_only.is_empty()
    }
}

fn any_match(patterns: &[Pattern], path: &str) -> bool {
    patterns.iter().any(|p| p.matches_with(path, MATCH_OPTIONS))
}

impl Matcher for GlobMatcher {
    fn matches(&self, path: &str) -> bool {
        any_match(&self.patterns, path) || any_match(&self.file_only, path)
    }

    /// `build/**` only matches with a trailing `/`, `*.egg-info` only
    /// without it, so both forms are tried. File-only globs see the `/` form.
    fn matches_dir(&self, path: &str) -> bool {
        let with_slash = format!("{path}/");
        any_match(&self.patterns, path)
            || any_match(&self.patterns, &with_slash)
            || any_match(&self.file_only, &with_slash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceKind;

    fn matcher(patterns: &[&str]) -> GlobMatcher {
        let source = IgnoreSource::new(SourceKind::Override, patterns);
        GlobMatcher::from_sources(&[source]).0
    }

    #[test]
    fn test_empty_matcher_matches_nothing() {
        let m = GlobMatcher::new();
        assert!(!m.matches("anything"));
        assert!(!m.matches_dir("src"));
    }

    #[test]
    fn test_directory_pattern_matches_at_any_depth() {
        let m = matcher(&["build/"]);

        assert!(m.matches("build/x.txt"));
        assert!(m.matches("a/build/x.txt"));
        assert!(!m.matches("abuild/x.txt"));
        assert!(m.matches_dir("build"));
        assert!(m.matches_dir("a/build"));
        assert!(!m.matches_dir("abuild"));
    }

    #[test]
    fn test_star_does_not_cross_separator() {
        let m = GlobMatcher::try_new(["*.log"]).unwrap();

        assert!(m.matches("app.log"));
        assert!(!m.matches("a/app.log"));
    }

    #[test]
    fn test_extension_pattern_matches_at_any_depth() {
        let m = matcher(&["*.log"]);

        assert!(m.matches("app.log"));
        assert!(m.matches("a/b/app.log"));
        assert!(!m.matches("app.log.bak"));
    }

    #[test]
    fn test_dotted_name_matches_files_only() {
        let m = matcher(&["README.md"]);

        assert!(m.matches("README.md"));
        assert!(m.matches("docs/README.md"));
        assert!(!m.matches("README.md/inner.txt"));
        assert!(!m.matches_dir("README.md"));
        assert!(!m.matches("NOTREADME.md"));
    }

    #[test]
    fn test_bare_name_matches_file_or_directory() {
        let m = matcher(&["node_modules"]);

        assert!(m.matches("node_modules"));
        assert!(m.matches("pkg/node_modules"));
        assert!(m.matches("node_modules/lib/x.js"));
        assert!(m.matches_dir("web/node_modules"));
        assert!(!m.matches("my_node_modules/x.js"));
    }

    #[test]
    fn test_suffix_glob_prunes_matching_directory() {
        let m = matcher(&["*.egg-info", "*.log"]);

        assert!(m.matches_dir("pkg.egg-info"));
        assert!(m.matches_dir("python/pkg.egg-info"));
        assert!(m.matches_dir("x.log"));
        assert!(!m.matches_dir("pkg"));
    }

    #[test]
    fn test_children_glob_prunes_subdirectories() {
        let m = matcher(&["logs/*"]);

        assert!(m.matches_dir("logs/sub"));
        assert!(m.matches("logs/a.txt"));
        assert!(!m.matches_dir("other/sub"));
    }

    #[test]
    fn test_question_mark_and_brackets() {
        let m = matcher(&["file?.txt", "[ab].rs"]);

        assert!(m.matches("file1.txt"));
        assert!(m.matches("deep/fileX.txt"));
        assert!(!m.matches("file10.txt"));
        assert!(m.matches("src/a.rs"));
        assert!(!m.matches("src/c.rs"));
    }

    #[test]
    fn test_negated_patterns_are_reported() {
        let source = IgnoreSource::new(SourceKind::Gitignore, ["*.log", "!keep.log"]);
        let (m, dropped) = GlobMatcher::from_sources(&[source]);

        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].pattern, "!keep.log");
        assert!(m.matches("keep.log"));
    }

    #[test]
    fn test_invalid_glob_is_skipped() {
        let m = matcher(&["a**b", "*.tmp"]);
        assert!(m.matches("x.tmp"));
    }

    #[test]
    fn test_try_new_rejects_invalid_glob() {
        let result = GlobMatcher::try_new(["[invalid"]);

        if let Err(KoduError::InvalidGlob { pattern, .. }) = result {
            assert_eq!(pattern, "[invalid");
        } else {
            panic!("Expected InvalidGlob error");
        }
    }

    #[test]
    fn test_duplicate_globs_collapse() {
        let m = matcher(&["dist", "/dist", "dist"]);
        assert_eq!(m.len(), 4);
    }
}
