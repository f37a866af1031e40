use std::ffi::OsString;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry
{
    pub file_name: OsString,
    pub is_directory: bool,
    pub file_size: u64,
}

impl DirectoryEntry
{
    pub fn directory(file_name: impl Into<OsString>) -> Self
    {
        DirectoryEntry {
            file_name: file_name.into(),
            is_directory: true,
            file_size: 0,
        }
    }

    pub fn file(file_name: impl Into<OsString>, file_size: u64) -> Self
    {
        DirectoryEntry {
            file_name: file_name.into(),
            is_directory: false,
            file_size: file_size,
        }
    }
}
