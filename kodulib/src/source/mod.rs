//! Ignore sources: collect the raw patterns a discovery call honors.
//!
//! This module handles the first stage of the pipeline - gathering exclusion
//! rules. Four sources are merged, in this order:
//!
//! - **Deny-list**: fixed patterns from the options (lockfiles, `node_modules`, ...)
//! - **Gitignore**: the root `.gitignore`, when enabled
//! - **Tool ignore**: the root `.koduignore`, when enabled
//! - **Overrides**: patterns passed by the caller
//!
//! ## Example
//!
//! ```rust,ignore
//! use kodulib::source::load_sources;
//! use kodulib::DiscoveryOptions;
//!
//! let sources = load_sources(".".as_ref(), &DiscoveryOptions::new());
//! ```

pub mod ignore_file;

use std::path::Path;

use crate::options::DiscoveryOptions;

pub use ignore_file::{
    IgnoreSource, SourceKind, DEFAULT_DENY_PATTERNS, GITIGNORE_FILE, TOOL_IGNORE_FILE,
};

/// Load every ignore source the options enable, in precedence order.
///
/// Never fails: missing or unreadable ignore files become empty sources.
pub fn load_sources(root: &Path, options: &DiscoveryOptions) -> Vec<IgnoreSource> {
    let mut sources = vec![IgnoreSource::new(
        SourceKind::DenyList,
        &options.deny_patterns,
    )];

    if options.use_gitignore {
        sources.push(IgnoreSource::read(
            SourceKind::Gitignore,
            &root.join(GITIGNORE_FILE),
        ));
    }

    if options.use_tool_ignore {
        sources.push(IgnoreSource::read(
            SourceKind::ToolIgnore,
            &root.join(TOOL_IGNORE_FILE),
        ));
    }

    sources.push(IgnoreSource::new(SourceKind::Override, &options.overrides));

    sources
}
