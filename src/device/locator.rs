//! Finding the device node by its stable name

use crate::error::ControllerError;
use std::fmt;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

/// Where to look and what the device entry is called
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevicePattern {
    pub directory: PathBuf,
    pub prefix: String,
    pub suffix: String,
}

impl DevicePattern {
    pub fn new(
        directory: impl Into<PathBuf>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Both prefix and suffix must match exactly
    pub fn matches(&self, name: &[u8]) -> bool {
        name.starts_with(self.prefix.as_bytes()) && name.ends_with(self.suffix.as_bytes())
    }
}

/// Path of the located device node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevicePath(PathBuf);

impl DevicePath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl From<PathBuf> for DevicePath {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl AsRef<Path> for DevicePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for DevicePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Scan the pattern's directory and return the first matching entry.
///
/// "First" is directory enumeration order, which the OS does not sort.
pub fn find_device(pattern: &DevicePattern) -> Result<DevicePath, ControllerError> {
    let entries =
        fs::read_dir(&pattern.directory).map_err(|source| ControllerError::DirectoryUnavailable {
            dir: pattern.directory.clone(),
            source,
        })?;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!("Skipping unreadable entry in {}: {}", pattern.directory.display(), e);
                continue;
            }
        };

        if pattern.matches(entry.file_name().as_bytes()) {
            let path = DevicePath(pattern.directory.join(entry.file_name()));
            log::info!("Full path is {}", path);
            return Ok(path);
        }
    }

    Err(ControllerError::DeviceNotFound {
        dir: pattern.directory.clone(),
        prefix: pattern.prefix.clone(),
        suffix: pattern.suffix.clone(),
    })
}
