//! Rotating log file writer with size-based rotation and backup retention.
//!
//! [`RotatingFile`] is plugged into the fmt layer as its `MakeWriter`. Every event is
//! appended to the log file; once the file grows past the size limit it is renamed
//! with a timestamp suffix and a fresh file is started. Only the newest backups are
//! kept.

use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing_subscriber::fmt::MakeWriter;

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Backup suffix format. Sorts lexicographically in time order.
const BACKUP_TIMESTAMP: &str = "%Y%m%dT%H%M%S%.6f";

#[derive(Debug)]
struct Inner {
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    /// Lazily opened on first write.
    file: Mutex<Option<File>>,
}

/// Shared handle to a size-rotated log file.
///
/// Cloning is cheap; all clones append to the same file under one lock.
#[derive(Debug, Clone)]
pub struct RotatingFile {
    inner: Arc<Inner>,
}

impl RotatingFile {
    /// Creates a writer for `file_path` with the default limits (10 MB, 3 backups).
    ///
    /// The file is not opened until the first write.
    #[must_use]
    pub fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    #[must_use]
    pub fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                file_path,
                max_bytes,
                max_backups,
                file: Mutex::new(None),
            }),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.inner.file_path
    }

    fn append(&self, buf: &[u8]) -> io::Result<()> {
        let mut file = self
            .inner
            .file
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        self.rotate_if_full(&mut file)?;

        if file.is_none() {
            *file = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.inner.file_path)?,
            );
        }

        let handle = file
            .as_mut()
            .ok_or_else(|| io::Error::other("log file unavailable"))?;
        handle.write_all(buf)?;
        handle.flush()
    }

    fn rotate_if_full(&self, file: &mut Option<File>) -> io::Result<()> {
        let Ok(metadata) = fs::metadata(&self.inner.file_path) else {
            return Ok(());
        };
        if metadata.len() <= self.inner.max_bytes {
            return Ok(());
        }

        *file = None;

        let stamp = Utc::now().format(BACKUP_TIMESTAMP);
        let backup_path = self.backup_prefix().map_or_else(
            || self.inner.file_path.with_extension(format!("log.{stamp}")),
            |prefix| self.inner.file_path.with_file_name(format!("{prefix}{stamp}")),
        );
        fs::rename(&self.inner.file_path, backup_path)?;

        self.cleanup_old_backups()
    }

    /// `"<file name>."`, the prefix every backup shares.
    fn backup_prefix(&self) -> Option<String> {
        self.inner
            .file_path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| format!("{name}."))
    }

    /// Deletes all but the newest `max_backups` backups. Individual failures are ignored.
    fn cleanup_old_backups(&self) -> io::Result<()> {
        let (Some(parent), Some(prefix)) = (self.inner.file_path.parent(), self.backup_prefix())
        else {
            return Ok(());
        };

        let mut backups: Vec<PathBuf> = fs::read_dir(parent)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();

        backups.sort_unstable_by(|a, b| b.cmp(a));

        for old_backup in backups.iter().skip(self.inner.max_backups) {
            let _ = fs::remove_file(old_backup);
        }
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for RotatingFile {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
