//! Storage layer for the timed time tracker.
//!
//! Entries live in a single human-editable text file, one entry per line
//! (see [`format`] for the grammar). The log is a chronological ledger: it is
//! always read whole and written whole.
//!
//! # Writes
//!
//! [`LogStore::save`] replaces the entire file. The new content is written to
//! a sibling `.tmp` file which is then renamed over the log, so a crash
//! mid-write leaves either the old or the new log, never a truncated one.
//!
//! # Locking
//!
//! The store does not lock by itself. Callers doing read-modify-write take
//! [`LogStore::lock`] first; the lock is advisory and only excludes other
//! `timed` processes that also lock.

pub mod format;

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;
use timed_core::TimeEntry;

pub use format::{LogFormatError, LogFormatKind, TIME_FORMAT, format_entry, parse_line};

/// Log storage errors.
#[derive(Debug, Error)]
pub enum LogError {
    /// Reading or writing the log failed.
    #[error("{action} {}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The log contains a line that cannot be parsed.
    #[error("malformed log {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: LogFormatError,
    },
}

impl LogError {
    fn io<'a>(action: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> Self + 'a {
        move |source| Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Handle on the log file.
#[derive(Debug, Clone)]
pub struct LogStore {
    path: PathBuf,
}

/// Exclusive lock on a log, released when dropped.
#[derive(Debug)]
pub struct LogLock {
    _file: File,
}

impl LogStore {
    /// Opens the log at `path`, creating an empty one (and its directory) if
    /// it doesn't exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LogError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(LogError::io("failed to create directory for", &path))?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(LogError::io("failed to create", &path))?;
        tracing::debug!(path = %path.display(), "opened log");
        Ok(Self { path })
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(suffix);
        self.path.with_file_name(name)
    }

    /// Path of the temp file used by [`save`](Self::save).
    fn tmp_path(&self) -> PathBuf {
        self.sibling(".tmp")
    }

    /// Path of the lock file used by [`lock`](Self::lock).
    fn lock_path(&self) -> PathBuf {
        self.sibling(".lock")
    }

    /// Takes an exclusive advisory lock on the log, blocking until available.
    pub fn lock(&self) -> Result<LogLock, LogError> {
        let lock_path = self.lock_path();
        let file =
            File::create(&lock_path).map_err(LogError::io("failed to create", &lock_path))?;
        file.lock_exclusive()
            .map_err(LogError::io("failed to lock", &lock_path))?;
        Ok(LogLock { _file: file })
    }

    /// Reads every entry, in file order.
    ///
    /// Fails on the first malformed line, including bytes that are not UTF-8.
    pub fn read(&self) -> Result<Vec<TimeEntry>, LogError> {
        let bytes = fs::read(&self.path).map_err(LogError::io("failed to read", &self.path))?;
        let entries = format::decode_log(&bytes)
            .and_then(format::parse_log)
            .map_err(|source| LogError::Format {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(entries = entries.len(), "read log");
        Ok(entries)
    }

    /// Replaces the log with `entries`.
    pub fn save(&self, entries: &[TimeEntry]) -> Result<(), LogError> {
        let tmp_path = self.tmp_path();
        write_synced(&tmp_path, &format::format_log(entries))
            .map_err(LogError::io("failed to write", &tmp_path))?;

        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            // Clean up temp file
            let _ = fs::remove_file(&tmp_path);
            return Err(LogError::io("failed to replace", &self.path)(e));
        }

        tracing::debug!(entries = entries.len(), "saved log");
        Ok(())
    }
}

/// Writes `content` to `path` and flushes it to disk before returning.
fn write_synced(path: &Path, content: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{NaiveDate, NaiveDateTime};
    use tempfile::TempDir;
    use timed_core::Project;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn store() -> (TempDir, LogStore) {
        let temp = TempDir::new().unwrap();
        let store = LogStore::open(temp.path().join(".timed")).unwrap();
        (temp, store)
    }

    fn sample() -> Vec<TimeEntry> {
        vec![
            TimeEntry::closed(Project::new("work").unwrap(), at(1, 9, 0), at(1, 10, 30)),
            TimeEntry::open(Project::new("home").unwrap(), at(1, 18, 0)),
        ]
    }

    #[test]
    fn test_open_creates_empty_log() {
        let (_temp, store) = store();
        assert!(store.path().exists());
        assert!(store.read().unwrap().is_empty());
    }

    #[test]
    fn test_open_creates_parent_directory() {
        let temp = TempDir::new().unwrap();
        let store = LogStore::open(temp.path().join("nested/dir/log")).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_open_keeps_existing_content() {
        let (_temp, store) = store();
        store.save(&sample()).unwrap();

        let reopened = LogStore::open(store.path()).unwrap();
        assert_eq!(reopened.read().unwrap(), sample());
    }

    #[test]
    fn test_save_then_read() {
        let (_temp, store) = store();
        store.save(&sample()).unwrap();
        assert_eq!(store.read().unwrap(), sample());
    }

    #[test]
    fn test_save_replaces_whole_file() {
        let (_temp, store) = store();
        store.save(&sample()).unwrap();
        store.save(&sample()[..1]).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "work: 09:00 on 01 Jan 2024 - 10:30 on 01 Jan 2024");
    }

    #[test]
    fn test_save_writes_open_entry_separator_without_trailing_newline() {
        let (_temp, store) = store();
        store.save(&sample()).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.ends_with("home: 18:00 on 01 Jan 2024 - "));
        assert!(!content.ends_with('\n'));
    }

    #[test]
    fn test_save_removes_temp_file() {
        let (_temp, store) = store();
        store.save(&sample()).unwrap();
        assert!(!store.tmp_path().exists());
    }

    #[test]
    fn test_save_empty_truncates() {
        let (_temp, store) = store();
        store.save(&sample()).unwrap();
        store.save(&[]).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "");
    }

    #[test]
    fn test_read_malformed_line_fails_whole_read() {
        let (_temp, store) = store();
        fs::write(
            store.path(),
            "work: 09:00 on 01 Jan 2024 - 10:30 on 01 Jan 2024\nnoSeparatorHere\n",
        )
        .unwrap();

        let err = store.read().unwrap_err();
        let LogError::Format { source, .. } = err else {
            panic!("expected format error, got {err:?}");
        };
        assert_eq!(source.line, 2);
        assert_eq!(source.kind, LogFormatKind::MissingProjectSeparator);
    }

    #[test]
    fn test_read_accepts_trailing_newline() {
        let (_temp, store) = store();
        fs::write(store.path(), "work: 09:00 on 01 Jan 2024 - 10:30 on 01 Jan 2024\n").unwrap();
        assert_eq!(store.read().unwrap().len(), 1);
    }

    #[test]
    fn test_read_invalid_utf8_is_format_error() {
        let (_temp, store) = store();
        let mut content = b"work: 09:00 on 01 Jan 2024 - 10:30 on 01 Jan 2024\n".to_vec();
        content.extend_from_slice(b"caf\xe9: 11:00 on 01 Jan 2024 - ");
        fs::write(store.path(), content).unwrap();

        let err = store.read().unwrap_err();
        let LogError::Format { source, .. } = err else {
            panic!("expected format error, got {err:?}");
        };
        assert_eq!(source.line, 2);
        assert_eq!(source.kind, LogFormatKind::InvalidUtf8);
    }

    #[test]
    fn test_save_failure_leaves_log_untouched() {
        let (_temp, store) = store();
        store.save(&sample()).unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        // A directory where the temp file should go makes the write fail
        fs::create_dir(store.tmp_path()).unwrap();
        let err = store.save(&sample()[..1]).unwrap_err();
        assert!(matches!(err, LogError::Io { action: "failed to write", .. }));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let (_temp, store) = store();
        fs::remove_file(store.path()).unwrap();
        assert!(matches!(store.read(), Err(LogError::Io { .. })));
    }

    #[test]
    fn test_lock_is_reacquirable_after_drop() {
        let (_temp, store) = store();
        {
            let _lock = store.lock().unwrap();
            assert!(store.lock_path().exists());
        }
        let _lock = store.lock().unwrap();
    }
}
