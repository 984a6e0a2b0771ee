//! Error taxonomy for report generation.
//!
//! Only locating and parsing the options file can fail a report request.
//! Everything else (unknown command names, unmapped key triggers, unreadable
//! toolbar controls) degrades gracefully and is logged instead of returned.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The per-user options root (or the selected options file) is absent.
    #[error("shortcut configuration not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// The options file or directory exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed XML envelope, missing JSON attribute, or unexpected JSON
    /// payload shape.
    #[error("failed to parse shortcut configuration: {reason}")]
    ConfigParse { reason: String },
}

impl Error {
    pub(crate) fn parse(reason: impl Into<String>) -> Self {
        Error::ConfigParse {
            reason: reason.into(),
        }
    }
}
