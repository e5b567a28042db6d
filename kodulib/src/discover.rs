//! High-level discovery API.
//!
//! This module ties the pipeline together: load ignore sources, compile them
//! into one matcher, walk the tree, classify the survivors, then order the
//! result. It is the entry point most callers want.

use std::fs;
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cancel::CancellationToken;
use crate::classify::{BinaryClassifier, ClassificationResult};
use crate::error::KoduError;
use crate::matcher::{build_matcher, DroppedPattern};
use crate::options::{DiscoveryMode, DiscoveryOptions};
use crate::priority::PriorityScorer;
use crate::source::{load_sources, IgnoreSource};
use crate::walk::{FileCandidate, SkippedFile, TreeWalker, WalkEvent, WalkOptions};
use crate::Result;

/// A file in the discovery result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredFile {
    /// Root-relative path with `/` separators
    pub path: String,
    pub size: u64,
    /// Priority score (ranking mode only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
}

/// Result of one discovery call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryResult {
    pub mode: DiscoveryMode,
    /// Kept files, in output order
    pub files: Vec<ScoredFile>,
    /// Files left out, sorted by path (only when `report_skipped` is set)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedFile>,
    /// Patterns the matcher could not honor
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped_patterns: Vec<DroppedPattern>,
}

impl DiscoveryResult {
    /// Relative paths in output order.
    pub fn paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.path.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Discover the text files under `root`.
///
/// Ignore sources are read from `root` according to `options`.
///
/// # Example
///
/// ```rust,ignore
/// use kodulib::{discover, DiscoveryOptions};
///
/// // Sorted relative paths
/// let result = discover(".", &DiscoveryOptions::new())?;
///
/// // Most relevant files first
/// let result = discover(".", &DiscoveryOptions::new().ranked())?;
/// ```
pub fn discover(root: impl AsRef<Path>, options: &DiscoveryOptions) -> Result<DiscoveryResult> {
    discover_with_cancel(root, options, &CancellationToken::new())
}

/// Like [`discover`], but aborts with [`KoduError::Cancelled`] once `cancel`
/// is triggered. Partial results are discarded.
pub fn discover_with_cancel(
    root: impl AsRef<Path>,
    options: &DiscoveryOptions,
    cancel: &CancellationToken,
) -> Result<DiscoveryResult> {
    let root = root.as_ref();
    validate_root(root)?;
    let sources = load_sources(root, options);
    run_discovery(root, &sources, options, cancel)
}

/// Discover with caller-supplied ignore sources.
///
/// The source flags in `options` are ignored here; `sources` is used as is.
pub fn discover_from_sources(
    root: impl AsRef<Path>,
    sources: &[IgnoreSource],
    options: &DiscoveryOptions,
    cancel: &CancellationToken,
) -> Result<DiscoveryResult> {
    let root = root.as_ref();
    validate_root(root)?;
    run_discovery(root, sources, options, cancel)
}

/// Pipeline body; `root` is already validated.
fn run_discovery(
    root: &Path,
    sources: &[IgnoreSource],
    options: &DiscoveryOptions,
    cancel: &CancellationToken,
) -> Result<DiscoveryResult> {
    let (matcher, dropped_patterns) = build_matcher(options.matcher, root, sources)?;

    let mut candidates = Vec::new();
    let mut skipped = Vec::new();
    for event in TreeWalker::new(root, matcher.as_ref(), WalkOptions::from(options)) {
        if cancel.is_cancelled() {
            return Err(KoduError::Cancelled);
        }
        match event? {
            WalkEvent::File(candidate) => candidates.push(candidate),
            WalkEvent::Skipped(file) => skipped.push(file),
        }
    }

    let classifier = BinaryClassifier::new(options.content_sniffing);
    let verdicts = classify_all(&candidates, classifier, options.threads, cancel)?;

    let mut files = Vec::with_capacity(candidates.len());
    for (candidate, verdict) in candidates.into_iter().zip(verdicts) {
        if verdict.is_kept() {
            files.push(ScoredFile {
                path: candidate.relative_path,
                size: candidate.size,
                score: None,
            });
        } else {
            skipped.push(SkippedFile {
                path: candidate.relative_path,
                reason: verdict.skip_reason,
            });
        }
    }

    order(&mut files, options.mode);

    tracing::info!(
        root = %root.display(),
        files = files.len(),
        skipped = skipped.len(),
        "discovery finished"
    );

    if options.report_skipped {
        skipped.sort_by(|a, b| a.path.cmp(&b.path));
    } else {
        skipped.clear();
    }

    Ok(DiscoveryResult {
        mode: options.mode,
        files,
        skipped,
        dropped_patterns,
    })
}

fn validate_root(root: &Path) -> Result<()> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(KoduError::NotADirectory(root.to_path_buf())),
        Err(_) => Err(KoduError::PathNotFound(root.to_path_buf())),
    }
}

/// Classify every candidate, preserving input order in the output.
fn classify_all(
    candidates: &[FileCandidate],
    classifier: BinaryClassifier,
    threads: Option<usize>,
    cancel: &CancellationToken,
) -> Result<Vec<ClassificationResult>> {
    let run = || -> Vec<Option<ClassificationResult>> {
        candidates
            .par_iter()
            .map(|candidate| {
                if cancel.is_cancelled() {
                    return None;
                }
                Some(classifier.classify(&candidate.relative_path, &candidate.absolute_path))
            })
            .collect()
    };

    let pool = threads.and_then(|n| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()
            .map_err(|e| tracing::warn!("falling back to the global thread pool: {}", e))
            .ok()
    });

    let verdicts = match pool {
        Some(pool) => pool.install(run),
        None => run(),
    };

    verdicts
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or(KoduError::Cancelled)
}

fn order(files: &mut [ScoredFile], mode: DiscoveryMode) {
    match mode {
        DiscoveryMode::Simple => files.sort_by(|a, b| a.path.cmp(&b.path)),
        DiscoveryMode::Ranking => {
            let scorer = PriorityScorer::default();
            for file in files.iter_mut() {
                file.score = Some(scorer.score_path(&file.path));
            }
            // Stable: equal scores keep discovery order.
            files.sort_by_key(|f| std::cmp::Reverse(f.score));
        }
    }
}

/// Read a discovered file as text, for downstream consumers.
///
/// Returns `Ok(None)` when the file is larger than `max_size`. Invalid UTF-8
/// is replaced rather than rejected.
pub fn read_project_file(
    root: impl AsRef<Path>,
    relative_path: &str,
    max_size: u64,
) -> Result<Option<String>> {
    let path = root.as_ref().join(relative_path);
    let read_error = |source| KoduError::FileRead {
        path: path.clone(),
        source,
    };

    let size = fs::metadata(&path).map_err(read_error)?.len();
    if size > max_size {
        tracing::debug!(path = %relative_path, size, "file exceeds size limit");
        return Ok(None);
    }

    let bytes = fs::read(&path).map_err(read_error)?;
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}
