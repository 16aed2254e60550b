//! File replacement for delete, and the matching repair on open.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use crate::error::{IoResultExt, Result};

/// What `RecordStore::open` found and fixed on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// No scratch file was lying around
    Clean,
    /// The data file was missing but a finished scratch file existed:
    /// a delete stopped between removing the original and renaming. The
    /// scratch file was moved into place.
    CompletedDelete,
    /// Both files existed: a delete stopped while copying. The scratch file
    /// was removed; the data file is untouched.
    DiscardedTemp,
}

/// Move `temp` over `data`.
///
/// Tries a single rename-over-existing first. If the platform refuses, falls
/// back to remove-then-rename; a crash between those two steps leaves only
/// `temp`, which [`recover`] moves into place on the next open.
pub(crate) fn commit(temp: &Path, data: &Path, sync: bool) -> Result<()> {
    if let Err(err) = fs::rename(temp, data) {
        tracing::warn!(
            error = %err,
            data = %data.display(),
            "rename over existing file failed, falling back to remove and rename"
        );
        fs::remove_file(data).at(data)?;
        fs::rename(temp, data).at(temp)?;
    }

    if sync {
        sync_parent_dir(data);
    }
    Ok(())
}

/// Remove a scratch file that will not be committed. Best effort.
pub(crate) fn discard(temp: &Path) {
    if let Err(err) = fs::remove_file(temp) {
        if err.kind() != io::ErrorKind::NotFound {
            tracing::warn!(error = %err, temp = %temp.display(), "could not remove temporary file");
        }
    }
}

/// Clean up after a failed [`commit`].
///
/// If `data` is already gone the fallback removed it before its rename
/// failed, and `temp` now holds the only copy of the records. It is kept
/// so [`recover`] can move it into place on the next open.
pub(crate) fn abandon(temp: &Path, data: &Path) {
    match data.try_exists() {
        Ok(true) => discard(temp),
        Ok(false) | Err(_) => tracing::warn!(
            temp = %temp.display(),
            data = %data.display(),
            "data file missing after failed replace, keeping temporary file for recovery"
        ),
    }
}

/// Inspect the data/scratch pair left by a previous process and repair it
pub(crate) fn recover(data: &Path, temp: &Path) -> Result<Recovery> {
    let data_exists = data.try_exists().at(data)?;
    let temp_exists = temp.try_exists().at(temp)?;

    match (data_exists, temp_exists) {
        (false, true) => {
            tracing::info!(
                temp = %temp.display(),
                data = %data.display(),
                "completing interrupted delete"
            );
            fs::rename(temp, data).at(temp)?;
            Ok(Recovery::CompletedDelete)
        }
        (true, true) => {
            tracing::warn!(temp = %temp.display(), "removing stale temporary file");
            fs::remove_file(temp).at(temp)?;
            Ok(Recovery::DiscardedTemp)
        }
        _ => Ok(Recovery::Clean),
    }
}

/// fsync the directory holding `path` so the rename itself is durable.
/// Not every platform can open a directory; failures are ignored.
fn sync_parent_dir(path: &Path) {
    if let Some(parent) = path.parent() {
        let parent = if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        };
        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }
    }
}
