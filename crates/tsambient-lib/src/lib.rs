//! tsambient: Java API declarations to TypeScript ambient declarations.
//!
//! This crate provides the translation pipeline:
//! - `lang` - Java parsing through tree-sitter
//! - `query` - kind-path queries over syntax trees
//! - `convert` - type, declaration, enum and import renderers
//! - `bundle` - namespace grouping and import deduplication
//! - `mods` - post-generation patches for known generator limitations
//! - `config` - override table, block-list, mods and trailer
//! - `pipeline` - source tree to single `.d.ts` artifact
//! - `diagnostics` - warning collection and rendering

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod bundle;
pub mod config;
pub mod convert;
pub mod diagnostics;
pub mod lang;
pub mod mods;
pub mod pipeline;
pub mod query;

#[cfg(test)]
pub mod test_utils;

use std::ops::Range;
use std::path::PathBuf;

pub use bundle::Bundle;
pub use config::Config;
pub use convert::{FileOutput, RenderError};
pub use diagnostics::{Diagnostic, Diagnostics, DiagnosticsPrinter, Severity};
pub use mods::{Find, Mod, ModOutcome};
pub use pipeline::{Pipeline, Report};

/// Errors that abort a translation run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The parser produced no tree at all.
    #[error("{}: parser produced no tree", path.display())]
    Parse { path: PathBuf },

    /// The tree contains ERROR or MISSING nodes.
    #[error("{}: syntax error at bytes {}..{}", path.display(), range.start, range.end)]
    Syntax { path: PathBuf, range: Range<usize> },

    /// A structural error: the source uses a construct the renderers do not handle.
    #[error("{}: {source}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    #[error("{}: missing package declaration", path.display())]
    MissingPackage { path: PathBuf },

    #[error("{}: missing namespace line", path.display())]
    MissingNamespace { path: PathBuf },

    #[error("mod #{index} ({target}): invalid pattern: {message}")]
    InvalidModPattern {
        index: usize,
        target: String,
        message: String,
    },

    /// A user-supplied scratch directory already holds unrelated files.
    #[error("{}: scratch directory is not empty", path.display())]
    ScratchNotEmpty { path: PathBuf },

    /// A mod no longer matches the output it was written against.
    #[error("mod #{index} ({target}): {reason}")]
    StaleMod {
        index: usize,
        target: String,
        reason: String,
    },
}

/// Result type for translation operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
