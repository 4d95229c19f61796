//! Per-channel sensor files shared with the simulated SPI driver.
//!
//! Each channel owns one small text file holding the latest [`Reading`].
//! Writers take an exclusive advisory lock, readers a shared one, so the
//! consumer never sees a half written sample.

use fs2::FileExt;
use log::{debug, error};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::IpcConfig;
use crate::models::{Reading, ReadingError};

#[derive(Debug, Error)]
pub enum IpcError {
    #[error("Cannot open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("Cannot lock {}: {source}", .path.display())]
    Lock { path: PathBuf, source: io::Error },

    #[error("Cannot write to {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Cannot read from {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("The sensor isn't ready (missing {})", .path.display())]
    NotReady { path: PathBuf },

    #[error("Malformed reading in {}: {source}", .path.display())]
    Malformed { path: PathBuf, source: ReadingError },

    #[error("Cannot remove {}: {source}", .path.display())]
    Remove { path: PathBuf, source: io::Error },
}

/// Holds an advisory lock on an open file until dropped.
struct LockGuard<'a> {
    file: &'a File,
    path: &'a Path,
}

impl<'a> LockGuard<'a> {
    fn exclusive(file: &'a File, path: &'a Path) -> Result<Self, IpcError> {
        FileExt::lock_exclusive(file).map_err(|source| IpcError::Lock {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { file, path })
    }

    fn shared(file: &'a File, path: &'a Path) -> Result<Self, IpcError> {
        FileExt::lock_shared(file).map_err(|source| IpcError::Lock {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { file, path })
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(self.file) {
            error!("Failed to unlock {}: {}", self.path.display(), e);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorFile {
    channel: u32,
    path: PathBuf,
}

impl SensorFile {
    pub fn new(channel: u32, path: impl Into<PathBuf>) -> Self {
        Self {
            channel,
            path: path.into(),
        }
    }

    pub fn for_channel(config: &IpcConfig, channel: u32) -> Self {
        Self::new(channel, config.channel_path(channel))
    }

    pub fn channel(&self) -> u32 {
        self.channel
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Replaces the file contents with `reading` while holding an exclusive lock.
    ///
    /// The file is truncated only after the lock is taken, so a reader
    /// holding the shared lock sees either the previous or the new sample.
    pub fn write(&self, reading: &Reading) -> Result<(), IpcError> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .map_err(|source| IpcError::Open {
                path: self.path.clone(),
                source,
            })?;

        let _lock = LockGuard::exclusive(&file, &self.path)?;

        let text = reading.to_string();
        let mut writer = &file;
        writer
            .set_len(0)
            .and_then(|_| writer.seek(SeekFrom::Start(0)))
            .and_then(|_| writer.write_all(text.as_bytes()))
            .map_err(|source| IpcError::Write {
                path: self.path.clone(),
                source,
            })?;

        debug!("Channel {}: wrote \"{}\" to {}", self.channel, text, self.path.display());
        Ok(())
    }

    /// Reads the current sample while holding a shared lock.
    pub fn read(&self) -> Result<Reading, IpcError> {
        let file = File::open(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                IpcError::NotReady {
                    path: self.path.clone(),
                }
            } else {
                IpcError::Open {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        let text = {
            let _lock = LockGuard::shared(&file, &self.path)?;
            let mut text = String::new();
            let mut reader = &file;
            reader
                .read_to_string(&mut text)
                .map_err(|source| IpcError::Read {
                    path: self.path.clone(),
                    source,
                })?;
            text
        };

        debug!("Channel {}: read \"{}\" from {}", self.channel, text.trim(), self.path.display());

        text.parse().map_err(|source| IpcError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    pub fn remove(&self) -> Result<(), IpcError> {
        fs::remove_file(&self.path).map_err(|source| IpcError::Remove {
            path: self.path.clone(),
            source,
        })
    }
}
