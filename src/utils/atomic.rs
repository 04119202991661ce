//! Atomic file operations
//!
//! The history file is replaced by writing a sibling `.tmp`, syncing it and
//! renaming it over the target. A crash leaves either the previous history
//! or the new one on disk, never a half-written mix.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Path of the temp file used while writing `path`: the full file name with
/// `.tmp` appended, so `KillDeathHistory.json` saves through
/// `KillDeathHistory.json.tmp`
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Atomically write content to a file, creating parent directories
///
/// # Arguments
///
/// * `path` - The final destination path
/// * `content` - The full new file content
///
/// # Example
///
/// ```no_run
/// use kd_history::utils::atomic_write;
///
/// atomic_write("data/KillDeathHistory.json", "{}")?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> io::Result<()> {
    let path = path.as_ref();
    let temp_path = temp_path_for(path);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Remove a temp file left behind by an interrupted save of `path`
///
/// Returns `true` when a stale file was removed.
pub fn cleanup_stale_temp<P: AsRef<Path>>(path: P) -> io::Result<bool> {
    let temp_path = temp_path_for(path.as_ref());
    if !temp_path.exists() {
        return Ok(false);
    }
    fs::remove_file(&temp_path)?;
    Ok(true)
}
