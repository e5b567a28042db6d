//! # kodulib
//!
//! Project file discovery: find the text files in a source tree that are
//! worth handing to a downstream consumer, honoring ignore files.
//!
//! ## Overview
//!
//! A discovery call runs a one-way pipeline:
//!
//! - **Sources**: deny-list, `.gitignore`, `.koduignore` and caller overrides
//! - **Matcher**: raw patterns normalized into depth-independent globs
//! - **Walker**: depth-first descent that prunes ignored directories early
//! - **Classifier**: extension tables plus a bounded content sniff for binaries
//! - **Ordering**: sorted paths, or paths ranked by a priority score
//!
//! Every call is self-contained. Nothing is cached between calls, and two
//! calls against the same root can run concurrently.
//!
//! ## Features
//!
//! - **Directory pruning**: ignored directories are never descended into
//! - **Two ignore engines**: a flat glob union (default) or a full gitignore
//!   engine with `!pattern` re-inclusion
//! - **Parallel classification**: content sniffing fans out on a rayon pool
//! - **Cancellation**: long scans can be aborted through a [`CancellationToken`]
//! - **Pure data out**: results are plain serde types with relative, `/`-separated paths
//!
//! ## Example
//!
//! ```rust
//! use kodulib::{discover, DiscoveryOptions};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! // Set up a temporary project
//! let dir = tempdir().unwrap();
//! fs::create_dir_all(dir.path().join("src")).unwrap();
//! fs::create_dir_all(dir.path().join("node_modules/dep")).unwrap();
//! fs::write(dir.path().join("src/index.ts"), "export {};").unwrap();
//! fs::write(dir.path().join("node_modules/dep/index.js"), "").unwrap();
//! fs::write(dir.path().join("package.json"), "{}").unwrap();
//! fs::write(dir.path().join(".gitignore"), "*.log\n").unwrap();
//! fs::write(dir.path().join("debug.log"), "noise").unwrap();
//!
//! // Sorted relative paths
//! let result = discover(dir.path(), &DiscoveryOptions::new()).unwrap();
//! assert_eq!(result.paths(), vec!["package.json", "src/index.ts"]);
//!
//! // Most relevant first
//! let result = discover(dir.path(), &DiscoveryOptions::new().ranked()).unwrap();
//! assert_eq!(result.files[0].path, "package.json");
//! assert_eq!(result.files[0].score, Some(100));
//! ```

pub mod cancel;
pub mod classify;
pub mod discover;
pub mod error;
pub mod matcher;
pub mod options;
pub mod priority;
pub mod source;
pub mod walk;

pub use cancel::CancellationToken;
pub use classify::{BinaryClassifier, ClassificationResult, SkipReason};
pub use discover::{
    discover, discover_from_sources, discover_with_cancel, read_project_file, DiscoveryResult,
    ScoredFile,
};
pub use error::KoduError;
pub use matcher::{
    build_matcher, normalize, CanonicalPattern, DropReason, DroppedPattern, GitignoreMatcher,
    GlobMatcher, Matcher,
};
pub use options::{DiscoveryMode, DiscoveryOptions, MatcherKind, DEFAULT_MAX_FILE_SIZE};
pub use priority::{PriorityRule, PriorityScorer, DEFAULT_RULES, DEFAULT_SCORE};
pub use source::{load_sources, IgnoreSource, SourceKind};
pub use walk::{FileCandidate, SkippedFile, TreeWalker, WalkEvent, WalkOptions};

/// Result type for kodulib operations.
pub type Result<T> = std::result::Result<T, KoduError>;
