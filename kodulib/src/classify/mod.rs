//! Binary detection for discovered files.
//!
//! Checks run cheapest first and the first decisive one wins:
//!
//! 1. Known-text extension or file name: text
//! 2. Known-binary extension: binary
//! 3. Sniffing disabled: text
//! 4. First 8 KiB contains a NUL byte or starts with a binary magic number: binary
//!
//! A file that cannot be read while sniffing is reported as binary so it is
//! skipped rather than emitted as garbage.

pub mod extensions;

use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use extensions::{
    has_binary_signature, is_binary_extension, is_excluded_filename, is_text_extension,
    is_text_filename,
};

/// Bytes inspected when sniffing content.
pub const SNIFF_LEN: u64 = 8 * 1024;

/// Why a file was left out of the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// Not skipped
    #[default]
    None,
    /// Larger than the configured limit
    TooLarge,
    /// Classified as binary
    Binary,
    /// Could not be read or stat'ed
    Unreadable,
    /// Access denied
    PermissionDenied,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SkipReason::None => "none",
            SkipReason::TooLarge => "too large",
            SkipReason::Binary => "binary",
            SkipReason::Unreadable => "unreadable",
            SkipReason::PermissionDenied => "permission denied",
        };
        f.write_str(label)
    }
}

impl SkipReason {
    /// Map an I/O failure on a single file to a skip reason.
    pub fn from_io(error: &std::io::Error) -> Self {
        if error.kind() == ErrorKind::PermissionDenied {
            SkipReason::PermissionDenied
        } else {
            SkipReason::Unreadable
        }
    }
}

/// Verdict for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub binary: bool,
    pub skip_reason: SkipReason,
}

impl ClassificationResult {
    pub fn text() -> Self {
        Self {
            binary: false,
            skip_reason: SkipReason::None,
        }
    }

    pub fn binary() -> Self {
        Self {
            binary: true,
            skip_reason: SkipReason::Binary,
        }
    }

    /// Read failure while sniffing: treated as binary.
    pub fn unreadable(reason: SkipReason) -> Self {
        Self {
            binary: true,
            skip_reason: reason,
        }
    }

    /// Whether the file should be emitted.
    pub fn is_kept(&self) -> bool {
        self.skip_reason == SkipReason::None
    }
}

/// Decides whether a file is binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryClassifier {
    content_sniffing: bool,
}

impl Default for BinaryClassifier {
    fn default() -> Self {
        Self::new(true)
    }
}

impl BinaryClassifier {
    pub fn new(content_sniffing: bool) -> Self {
        Self { content_sniffing }
    }

    pub fn content_sniffing(&self) -> bool {
        self.content_sniffing
    }

    /// Classify a file given its relative path (for name checks) and its
    /// absolute path (for content reads).
    pub fn classify(&self, relative_path: &str, absolute_path: &Path) -> ClassificationResult {
        let name = relative_path.rsplit('/').next().unwrap_or(relative_path);
        let ext = extension_of(name);

        if is_text_filename(name) || ext.is_some_and(is_text_extension) {
            return ClassificationResult::text();
        }

        if ext.is_some_and(is_binary_extension) {
            return ClassificationResult::binary();
        }

        if !self.content_sniffing {
            return ClassificationResult::text();
        }

        match read_prefix(absolute_path) {
            Ok(prefix) if looks_binary(&prefix) => ClassificationResult::binary(),
            Ok(_) => ClassificationResult::text(),
            Err(e) => {
                tracing::debug!(path = %relative_path, error = %e, "unreadable while sniffing");
                ClassificationResult::unreadable(SkipReason::from_io(&e))
            }
        }
    }
}

/// Extension of a file name, without the dot.
///
/// `.env` has no extension (the dot starts the name); `archive.tar.gz` has `gz`.
fn extension_of(name: &str) -> Option<&str> {
    match name.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(&name[idx + 1..]).filter(|ext| !ext.is_empty()),
    }
}

fn read_prefix(path: &Path) -> std::io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut buf = Vec::with_capacity(SNIFF_LEN as usize);
    file.take(SNIFF_LEN).read_to_end(&mut buf)?;
    Ok(buf)
}

/// NUL byte anywhere in the prefix, or a known magic number at its start.
pub fn looks_binary(prefix: &[u8]) -> bool {
    prefix.contains(&0) || has_binary_signature(prefix)
}
