//! Append-only trace file with size-based rotation.
//!
//! When the file grows past its limit it is renamed to
//! `<name>.<UTC timestamp>` and a fresh file is started. Only the newest
//! backups are kept.

use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Rotate once the file exceeds 5 MiB.
pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Rotated files kept next to the live one.
pub const MAX_BACKUPS: usize = 2;

/// Rotating line sink for serialized spans.
#[derive(Debug)]
pub struct RotatingSink {
    path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    file: Option<File>,
}

impl RotatingSink {
    /// Sink with the default limits. Nothing is opened until the first write.
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, MAX_FILE_BYTES, MAX_BACKUPS)
    }

    pub const fn with_limits(path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            max_backups,
            file: None,
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from rotating, opening or writing the file.
    pub fn append(&mut self, line: &str) -> io::Result<()> {
        if fs::metadata(&self.path).is_ok_and(|meta| meta.len() > self.max_bytes) {
            self.file = None;
            self.rotate()?;
        }

        if self.file.is_none() {
            self.file = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }

        if let Some(file) = self.file.as_mut() {
            writeln!(file, "{line}")?;
            file.flush()?;
        }
        Ok(())
    }

    fn rotate(&self) -> io::Result<()> {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
        let mut backup = self.path.clone().into_os_string();
        backup.push(format!(".{stamp}"));

        fs::rename(&self.path, &backup)?;
        self.prune_backups()
    }

    /// Deletes all but the newest `max_backups` rotated files.
    ///
    /// Timestamps sort lexically, so name order is age order.
    fn prune_backups(&self) -> io::Result<()> {
        let mut backups = self.backups()?;
        backups.sort();

        let excess = backups.len().saturating_sub(self.max_backups);
        for old in backups.into_iter().take(excess) {
            if let Err(err) = fs::remove_file(&old) {
                eprintln!("popcorn: could not remove trace backup {}: {err}", old.display());
            }
        }
        Ok(())
    }

    fn backups(&self) -> io::Result<Vec<PathBuf>> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let Some(prefix) = self.path.file_name().and_then(|name| name.to_str()).map(|name| format!("{name}.")) else {
            return Ok(vec![]);
        };

        Ok(fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect())
    }
}
