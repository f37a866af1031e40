//! quick-du - parallel disk usage totals
//!
//! Walks a directory tree on a pool of worker threads and reports the sum of
//! every file size below the root.
//!
//! - [`scanner`]: the traversal dispatcher and worker pool
//! - [`tracker`]: counting completion tracker used to detect the end of a scan
//! - [`source`]: directory listing backends ([`LocalDisk`] for the real filesystem)
//! - [`config`]: command-line arguments and validated configuration
//! - [`printer`]: output formatting
//!
//! ```no_run
//! use quick_du::{LocalDisk, Scanner};
//! use std::path::Path;
//!
//! let report = Scanner::new(LocalDisk, 8).scan(Path::new("/var/log"))?;
//! println!("{} bytes", report.total_size);
//! # Ok::<(), quick_du::DuError>(())
//! ```

pub mod config;
pub mod directory_entry;
pub mod error;
pub mod error_handler;
pub mod printer;
pub mod scanner;
pub mod source;
pub mod tracker;

pub use config::{CliArgs, ScanConfig, Threshold};
pub use directory_entry::DirectoryEntry;
pub use error::{ConfigError, DuError, Result, ScanError};
pub use scanner::{DirectoryTask, ScanReport, Scanner};
pub use source::{DirectorySource, Listing, LocalDisk};
pub use tracker::{WorkGuard, WorkTracker};
