//! Locates the per-user shortcut options file on disk.
//!
//! The host keeps one options file per user profile under its
//! application-data directory. More than one profile directory can match;
//! the caller chooses among the candidates, this module never picks one.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

pub const OPTIONS_FILE_NAME: &str = "NGlobalOptions.xml";

/// Default per-user options root for the current platform.
///
/// Resolves to Roaming AppData on Windows and `~/Library/Application
/// Support` on macOS. Returns `None` when the platform has no per-user
/// configuration directory at all.
pub fn default_options_root() -> Option<PathBuf> {
    dirs::config_dir().map(|base| {
        base.join("Autodesk")
            .join("Neutron Platform")
            .join("Options")
    })
}

/// All candidate options files under `root`, one per profile directory, in
/// sorted order.
///
/// Fails with [`Error::ConfigNotFound`] when `root` itself does not exist.
/// An existing root with no matching profile directories yields an empty
/// list.
pub fn find_options_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::ConfigNotFound {
            path: root.to_path_buf(),
        });
    }

    let entries = fs::read_dir(root).map_err(|source| Error::ConfigRead {
        path: root.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries.flatten() {
        let candidate = entry.path().join(OPTIONS_FILE_NAME);
        if candidate.is_file() {
            files.push(candidate);
        }
    }
    files.sort();

    debug!(
        "found {} options file(s) under {}",
        files.len(),
        root.display()
    );
    Ok(files)
}
