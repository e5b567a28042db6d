//! Turn raw ignore patterns into depth-independent globs.
//!
//! Ignore files use a flat dialect: `build/` means "a directory named build,
//! anywhere", `*.log` means "any .log file, anywhere". Plain globs anchor at
//! the root, so each raw pattern expands into a small set of globs that
//! together match at any depth. The expansion over-generates on purpose: a
//! stray exclusion is cheaper than leaking a file that was meant to be
//! ignored.
//!
//! Root anchors (`/dist`) are flattened to relative patterns and negations
//! (`!keep.log`) are rejected.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

const GLOB_META: &[char] = &['*', '?', '['];

/// The globs derived from one raw pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalPattern {
    /// Pattern as written in its source
    pub raw: String,
    /// Equivalent globs, deduplicated and sorted
    pub globs: BTreeSet<String>,
    /// Bare file name such as `README.md`: never matches a directory
    #[serde(default)]
    pub file_only: bool,
}

/// Why a raw pattern produced no globs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DropReason {
    /// `!pattern` re-inclusion is not supported by the glob engine
    Negated,
    /// Nothing left after stripping separators
    Empty,
}

/// A raw pattern that was rejected during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedPattern {
    pub pattern: String,
    pub reason: DropReason,
}

impl fmt::Display for DroppedPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            DropReason::Negated => write!(f, "'{}': negation is not supported", self.pattern),
            DropReason::Empty => write!(f, "'{}': empty pattern", self.pattern),
        }
    }
}

/// Normalize one raw pattern.
///
/// Returns the canonical globs, or the reason the pattern was dropped.
pub fn normalize(raw: &str) -> Result<CanonicalPattern, DroppedPattern> {
    let drop = |reason| DroppedPattern {
        pattern: raw.to_string(),
        reason,
    };

    let trimmed = raw.trim();
    if trimmed.starts_with('!') {
        return Err(drop(DropReason::Negated));
    }

    let unanchored = trimmed.trim_start_matches('/');
    let is_dir = unanchored.ends_with('/');
    let body = unanchored.trim_end_matches('/');
    if body.is_empty() {
        return Err(drop(DropReason::Empty));
    }

    let mut globs = BTreeSet::new();
    let mut file_only = false;

    if is_dir {
        globs.insert(format!("{body}/**"));
        globs.insert(format!("**/{body}/**"));
    } else if !has_glob_meta(body) {
        if !body.contains('/') {
            if body.contains('.') {
                globs.insert(format!("**/{body}"));
                file_only = true;
            } else {
                globs.insert(body.to_string());
                globs.insert(format!("**/{body}"));
                globs.insert(format!("{body}/**"));
                globs.insert(format!("**/{body}/**"));
            }
        } else {
            globs.insert(body.to_string());
            globs.insert(format!("**/{body}"));
            globs.insert(format!("{body}/**"));
        }
    } else {
        globs.insert(body.to_string());
        if !body.starts_with("**/") && body != "**" {
            globs.insert(format!("**/{body}"));
        }
    }

    Ok(CanonicalPattern {
        raw: raw.to_string(),
        globs,
        file_only,
    })
}

/// Whether the pattern contains `*`, `?` or a bracket class.
pub fn has_glob_meta(pattern: &str) -> bool {
    pattern.contains(GLOB_META)
}
