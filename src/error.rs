//! Error types for quick-du
//!
//! Only failures that happen before the scan starts are fatal. Anything that
//! goes wrong while walking the tree is a [`ScanError`]: it is recorded and
//! the affected directory contributes nothing to the total.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DuError>;

#[derive(Error, Debug)]
pub enum DuError
{
    /// The root could not be probed, so no scan was attempted
    #[error("cannot access '{}'", path.display())]
    RootInaccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to start worker thread")]
    WorkerSpawn(#[source] io::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError
{
    #[error("invalid threshold '{value}': {reason}")]
    InvalidThreshold {
        value: String,
        reason: String,
    },

    #[error("cannot determine the current directory: {reason}")]
    NoCurrentDir {
        reason: String,
    },
}

/// A directory, or an entry inside one, that could not be read during the scan
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot read '{}': {reason}", path.display())]
pub struct ScanError
{
    pub path: PathBuf,
    pub reason: String,
}

impl ScanError
{
    pub fn new(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self
    {
        ScanError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn from_io(path: impl Into<PathBuf>, error: &io::Error) -> Self
    {
        Self::new(path, error.to_string())
    }
}
