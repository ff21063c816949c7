//! # File I/O Module
//!
//! Reference snapshots exported from the quoting database are stored as
//! JSON files, usually on a shared drive. This module reads and writes them
//! with:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **File locking**: Writers take an exclusive OS lock on a `.lock` sidecar,
//!   readers a shared one, so a reader never sees a half-replaced file
//! - **Version validation**: Ensure schema compatibility
//!
//! ## Example
//!
//! ```rust,no_run
//! use piping_core::file_io::{load_snapshot, save_snapshot};
//! use piping_core::reference::builtin_snapshot;
//! use std::path::Path;
//!
//! let path = Path::new("reference.json");
//! save_snapshot(&builtin_snapshot(), path)?;
//! let snapshot = load_snapshot(path)?;
//! assert!(!snapshot.is_empty());
//! # Ok::<(), piping_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::errors::{CalcError, CalcResult};
use crate::reference::{ReferenceSnapshot, SNAPSHOT_SCHEMA_VERSION};

/// OS-level lock on a snapshot's `.lock` sidecar, released on drop.
struct SnapshotLock {
    lock_path: PathBuf,
    file: File,
}

impl SnapshotLock {
    fn exclusive(path: &Path) -> CalcResult<Self> {
        let lock = Self::open(path)?;
        lock.file.lock_exclusive().map_err(|e| {
            CalcError::file_error("lock exclusive", lock.lock_path.display().to_string(), e.to_string())
        })?;
        Ok(lock)
    }

    fn shared(path: &Path) -> CalcResult<Self> {
        let lock = Self::open(path)?;
        lock.file.lock_shared().map_err(|e| {
            CalcError::file_error("lock shared", lock.lock_path.display().to_string(), e.to_string())
        })?;
        Ok(lock)
    }

    fn open(path: &Path) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| CalcError::file_error("open lock", lock_path.display().to_string(), e.to_string()))?;
        Ok(SnapshotLock { lock_path, file })
    }
}

impl Drop for SnapshotLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            log::warn!("failed to unlock {}: {}", self.lock_path.display(), e);
        }
    }
}

/// Get the lock file path for a snapshot file
fn lock_path_for(path: &Path) -> PathBuf {
    let mut lock_path = path.to_path_buf();
    let extension = lock_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    lock_path.set_extension(extension);
    lock_path
}

/// Save a snapshot with atomic write semantics.
///
/// 1. Validate the snapshot
/// 2. Take the exclusive lock
/// 3. Write JSON to a `.tmp` file and fsync it
/// 4. Rename over the target (atomic on most filesystems)
pub fn save_snapshot(snapshot: &ReferenceSnapshot, path: &Path) -> CalcResult<()> {
    snapshot.validate()?;

    let json = serde_json::to_string_pretty(snapshot).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    let _lock = SnapshotLock::exclusive(path)?;

    let tmp_path = path.with_extension("json.tmp");
    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    log::debug!("saved {} reference records to {}", snapshot.len(), path.display());
    Ok(())
}

/// Load and validate a snapshot.
///
/// # Returns
///
/// * `Ok(ReferenceSnapshot)` - Loaded and internally consistent
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::InvalidInput)` - Duplicate or non-physical rows
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_snapshot(path: &Path) -> CalcResult<ReferenceSnapshot> {
    let _lock = SnapshotLock::shared(path)?;

    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let snapshot: ReferenceSnapshot =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&snapshot.meta.version)?;
    snapshot.validate()?;

    log::debug!(
        "loaded {} reference records from {} (source {})",
        snapshot.len(),
        path.display(),
        snapshot.meta.source
    );
    Ok(snapshot)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SNAPSHOT_SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = SNAPSHOT_SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x, a newer minor may carry tables we cannot read
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{builtin_snapshot, NbNpsRecord, ReferenceData};
    use std::env::temp_dir;

    fn temp_snapshot_path(name: &str) -> PathBuf {
        temp_dir().join(format!("piping_test_{}_{}.json", name, std::process::id()))
    }

    fn cleanup(path: &Path) {
        let _ = fs::remove_file(path);
        let _ = fs::remove_file(lock_path_for(path));
    }

    #[test]
    fn test_lock_path_generation() {
        let lock_path = lock_path_for(Path::new("/data/reference.json"));
        assert_eq!(lock_path, Path::new("/data/reference.json.lock"));
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_snapshot_path("save_load");

        let original = builtin_snapshot();
        save_snapshot(&original, &path).unwrap();

        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded.len(), original.len());
        assert_eq!(loaded.meta.source, "builtin");
        let nb = loaded.lookup_nb_nps(200).unwrap().unwrap();
        assert_eq!(nb.outside_diameter_mm, 219.1);

        cleanup(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_snapshot_path("atomic");
        let tmp_path = path.with_extension("json.tmp");

        save_snapshot(&builtin_snapshot(), &path).unwrap();

        assert!(!tmp_path.exists());
        assert!(path.exists());

        cleanup(&path);
    }

    #[test]
    fn test_invalid_snapshot_is_not_saved() {
        let path = temp_snapshot_path("invalid");
        let mut snapshot = builtin_snapshot();
        snapshot.nb_nps.push(NbNpsRecord {
            nominal_diameter_mm: 200,
            nps: None,
            outside_diameter_mm: 219.1,
        });

        assert!(save_snapshot(&snapshot, &path).is_err());
        assert!(!path.exists());

        cleanup(&path);
    }

    #[test]
    fn test_load_rejects_newer_schema() {
        let path = temp_snapshot_path("newer");
        let mut snapshot = builtin_snapshot();
        snapshot.meta.version = "0.9.0".to_string();
        fs::write(&path, serde_json::to_string(&snapshot).unwrap()).unwrap();

        let err = load_snapshot(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");

        cleanup(&path);
    }

    #[test]
    fn test_load_bad_json() {
        let path = temp_snapshot_path("bad_json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_snapshot(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        cleanup(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let path = temp_snapshot_path("missing");
        let err = load_snapshot(&path).unwrap_err();
        assert!(err.is_recoverable());

        cleanup(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SNAPSHOT_SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("latest").is_err());
    }
}
