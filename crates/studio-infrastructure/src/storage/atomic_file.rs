//! Atomic whole-file writes.
//!
//! Every save goes to a temporary sibling file, is fsynced, and replaces the
//! target with a rename. Readers see either the previous or the new complete
//! content, never a torn write.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write as IoWrite};
use std::path::{Path, PathBuf};

use studio_core::error::{Result, StudioError};

/// A handle to one file updated with tmp file + fsync + rename.
///
/// Writers on the same path are serialized through an exclusive `fs2` lock
/// on a sibling `.lock` file.
#[derive(Debug, Clone)]
pub struct AtomicFile {
    path: PathBuf,
}

impl AtomicFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole file.
    ///
    /// - `Ok(None)`: the file doesn't exist
    /// - `Ok(Some(content))`: the last complete write
    pub fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replaces the file content atomically.
    pub fn save(&self, content: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let _lock = FileLock::acquire(&self.path)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(content.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Deletes the file. A missing file is not an error.
    pub fn remove(&self) -> Result<()> {
        let _lock = FileLock::acquire(&self.path)?;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| StudioError::io("Path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| StudioError::io("Path has no file name"))?;

        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

/// Exclusive lock guard, released when dropped.
///
/// The lock file is never unlinked, so every writer locks the same inode.
struct FileLock {
    _file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| StudioError::storage(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { _file: file })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::new(temp_dir.path().join("slot.json"));

        file.save(r#"{"a":1}"#).unwrap();
        assert_eq!(file.load().unwrap().as_deref(), Some(r#"{"a":1}"#));

        file.save("second").unwrap();
        assert_eq!(file.load().unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::new(temp_dir.path().join("missing.json"));
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("slot.json");
        let file = AtomicFile::new(path.clone());

        file.save("value").unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join(".slot.json.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_lock_file_is_kept_between_writes() {
        use std::os::unix::fs::MetadataExt;

        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::new(temp_dir.path().join("slot.json"));
        let lock_path = temp_dir.path().join("slot.lock");

        file.save("first").unwrap();
        let inode = fs::metadata(&lock_path).unwrap().ino();

        file.save("second").unwrap();
        file.remove().unwrap();
        assert_eq!(fs::metadata(&lock_path).unwrap().ino(), inode);
    }

    #[test]
    fn test_concurrent_writers_leave_a_complete_value() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("slot.json");

        let writers: Vec<_> = ["aaaa", "bbbb"]
            .into_iter()
            .map(|value| {
                let file = AtomicFile::new(path.clone());
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        file.save(&value.repeat(256)).unwrap();
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        let value = AtomicFile::new(path).load().unwrap().unwrap();
        assert!(value == "aaaa".repeat(256) || value == "bbbb".repeat(256));
    }

    #[test]
    fn test_creates_missing_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::new(temp_dir.path().join("nested/dir/slot.json"));
        file.save("value").unwrap();
        assert_eq!(file.load().unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::new(temp_dir.path().join("slot.json"));
        file.save("value").unwrap();
        file.remove().unwrap();
        assert!(file.load().unwrap().is_none());
        file.remove().unwrap();
    }
}
