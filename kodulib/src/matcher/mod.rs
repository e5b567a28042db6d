//! Ignore matching: decide whether a relative path is excluded.
//!
//! This module handles the second stage of the pipeline - compiling raw
//! patterns into a predicate the walker consults per entry. It provides:
//!
//! - **Normalization**: raw pattern to depth-independent globs ([`normalize`])
//! - **Glob engine**: flat union of globs ([`GlobMatcher`], the default)
//! - **Gitignore engine**: ordered rules with re-inclusion ([`GitignoreMatcher`])
//!
//! Both engines sit behind the [`Matcher`] trait, so the walker never knows
//! which one it is talking to.

pub mod gitignore;
pub mod glob;
pub mod normalize;

use std::path::Path;

use crate::options::MatcherKind;
use crate::source::IgnoreSource;
use crate::Result;

pub use self::gitignore::GitignoreMatcher;
pub use self::glob::GlobMatcher;
pub use self::normalize::{normalize, CanonicalPattern, DropReason, DroppedPattern};

/// A pure predicate over posix-style, root-relative paths.
pub trait Matcher: Send + Sync {
    /// Whether the file at `path` is excluded.
    fn matches(&self, path: &str) -> bool;

    /// Whether the directory at `path` is excluded.
    ///
    /// A matching directory is pruned: none of its descendants are visited.
    /// The default tests the bare path and the path with a trailing `/`.
    fn matches_dir(&self, path: &str) -> bool {
        self.matches(path) || self.matches(&format!("{path}/"))
    }
}

/// Compile the configured engine over all sources.
///
/// Returns the matcher plus any patterns the engine could not honor.
pub fn build_matcher(
    kind: MatcherKind,
    root: &Path,
    sources: &[IgnoreSource],
) -> Result<(Box<dyn Matcher>, Vec<DroppedPattern>)> {
    match kind {
        MatcherKind::Glob => {
            let (matcher, dropped) = GlobMatcher::from_sources(sources);
            tracing::debug!(globs = matcher.len(), dropped = dropped.len(), "compiled glob matcher");
            Ok((Box::new(matcher), dropped))
        }
        MatcherKind::Gitignore => {
            let matcher = GitignoreMatcher::from_sources(root, sources)?;
            tracing::debug!(rules = matcher.len(), "compiled gitignore matcher");
            Ok((Box::new(matcher), Vec::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceKind;

    #[test]
    fn test_engines_agree_on_simple_patterns() {
        let sources = vec![IgnoreSource::new(
            SourceKind::Gitignore,
            ["*.log", "build/", "node_modules"],
        )];
        let root = Path::new("/project");
        let (glob, _) = build_matcher(MatcherKind::Glob, root, &sources).unwrap();
        let (git, _) = build_matcher(MatcherKind::Gitignore, root, &sources).unwrap();

        for m in [&glob, &git] {
            assert!(m.matches("app.log"));
            assert!(m.matches("a/b/app.log"));
            assert!(!m.matches("app.log.bak"));
            assert!(m.matches_dir("build"));
            assert!(m.matches_dir("a/build"));
            assert!(!m.matches_dir("abuild"));
            assert!(m.matches_dir("node_modules"));
            assert!(!m.matches("src/index.ts"));
        }
    }

    #[test]
    fn test_engines_agree_on_directory_globs() {
        let sources = vec![IgnoreSource::new(
            SourceKind::Gitignore,
            ["*.egg-info", "logs/*", "README.md"],
        )];
        let root = Path::new("/project");
        let (glob, _) = build_matcher(MatcherKind::Glob, root, &sources).unwrap();
        let (git, _) = build_matcher(MatcherKind::Gitignore, root, &sources).unwrap();

        for m in [&glob, &git] {
            assert!(m.matches_dir("pkg.egg-info"));
            assert!(m.matches_dir("nested/pkg.egg-info"));
            assert!(m.matches_dir("logs/sub"));
            assert!(!m.matches_dir("src"));
        }
        assert!(!glob.matches_dir("README.md"));
    }

    #[test]
    fn test_only_glob_engine_drops_negations() {
        let sources = vec![IgnoreSource::new(SourceKind::Gitignore, ["*.log", "!keep.log"])];
        let root = Path::new("/project");

        let (glob, dropped) = build_matcher(MatcherKind::Glob, root, &sources).unwrap();
        assert_eq!(dropped.len(), 1);
        assert!(glob.matches("keep.log"));

        let (git, dropped) = build_matcher(MatcherKind::Gitignore, root, &sources).unwrap();
        assert!(dropped.is_empty());
        assert!(!git.matches("keep.log"));
    }
}
