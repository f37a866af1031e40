//! Directory listing backends.
//!
//! The scanner never touches the filesystem directly; it asks a
//! [`DirectorySource`] for the immediate children of one directory at a time.

use std::fs;
use std::path::Path;

use super::directory_entry::DirectoryEntry;
use super::error::ScanError;

/// The readable children of one directory, plus any children that could not
/// be inspected.
#[derive(Debug, Default)]
pub struct Listing
{
    pub entries: Vec<DirectoryEntry>,
    pub errors: Vec<ScanError>,
}

/// Lists the immediate children of a directory.
///
/// Called concurrently from every worker thread, so implementations must be
/// `Send + Sync`.
pub trait DirectorySource: Send + Sync
{
    /// Returns `Err` only when the directory itself cannot be listed. The
    /// scanner then treats it as empty.
    fn list(&self, path: &Path) -> Result<Listing, ScanError>;
}

/// The local filesystem. Symlinks are reported with their own length and are
/// never classified as directories, so they are not followed.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalDisk;

impl DirectorySource for LocalDisk
{
    fn list(&self, path: &Path) -> Result<Listing, ScanError>
    {
        let read_dir = fs::read_dir(path).map_err(|error| ScanError::from_io(path, &error))?;
        let mut listing = Listing::default();

        for directory_entry in read_dir {
            let directory_entry = match directory_entry {
                Ok(directory_entry) => directory_entry,
                Err(error) => {
                    listing.errors.push(ScanError::from_io(path, &error));
                    continue;
                }
            };

            let directory_entry_path = directory_entry.path();
            let metadata = match fs::symlink_metadata(&directory_entry_path) {
                Ok(metadata) => metadata,
                Err(error) => {
                    listing.errors.push(ScanError::from_io(&directory_entry_path, &error));
                    continue;
                }
            };

            let entry = if metadata.file_type().is_dir() {
                DirectoryEntry::directory(directory_entry.file_name())
            } else {
                DirectoryEntry::file(directory_entry.file_name(), metadata.len())
            };

            listing.entries.push(entry);
        }

        Ok(listing)
    }
}
