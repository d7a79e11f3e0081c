//! Fatal error taxonomy and the exit codes that go with it

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code for an unreadable or invalid configuration file
pub const EXIT_CONFIG: u8 = 1;
/// Exit code when the scan directory cannot be opened
pub const EXIT_DIRECTORY_UNAVAILABLE: u8 = 2;
/// Exit code when no entry matches the device pattern
pub const EXIT_DEVICE_NOT_FOUND: u8 = 3;
/// Exit code when the device cannot be opened or grabbed
pub const EXIT_SESSION: u8 = 4;
/// Exit code when reading from the grabbed device fails
pub const EXIT_READ_FAILED: u8 = 5;

/// Which stage of startup or operation produced a fatal error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Locator,
    Session,
    Decoder,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::Locator => "locator",
            Category::Session => "session",
            Category::Decoder => "decoder",
        }
    }
}

/// Conditions that end the process.
///
/// None of these are retried: they mean missing hardware, missing
/// permissions or a lost device.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("couldn't open directory {}: {source}", dir.display())]
    DirectoryUnavailable {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("couldn't find a device matching {prefix}*{suffix} in {}", dir.display())]
    DeviceNotFound {
        dir: PathBuf,
        prefix: String,
        suffix: String,
    },

    #[error("couldn't open device {}: {source}", path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("couldn't grab device {}: {source}", path.display())]
    GrabFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("a device session is already open in this process")]
    SessionActive,

    #[error("couldn't read from device: {source}")]
    ReadFailed {
        #[source]
        source: io::Error,
    },
}

impl ControllerError {
    pub fn category(&self) -> Category {
        match self {
            ControllerError::DirectoryUnavailable { .. } | ControllerError::DeviceNotFound { .. } => {
                Category::Locator
            }
            ControllerError::OpenFailed { .. }
            | ControllerError::GrabFailed { .. }
            | ControllerError::SessionActive => Category::Session,
            ControllerError::ReadFailed { .. } => Category::Decoder,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            ControllerError::DirectoryUnavailable { .. } => EXIT_DIRECTORY_UNAVAILABLE,
            ControllerError::DeviceNotFound { .. } => EXIT_DEVICE_NOT_FOUND,
            ControllerError::OpenFailed { .. }
            | ControllerError::GrabFailed { .. }
            | ControllerError::SessionActive => EXIT_SESSION,
            ControllerError::ReadFailed { .. } => EXIT_READ_FAILED,
        }
    }

    /// Remediation hints printed after the error itself
    pub fn suggestions(&self) -> Vec<String> {
        const PERMISSION_HINT: &str =
            "Maybe a permission is missing. Try running this program with sudo or add your user to the 'input' group.";

        match self {
            ControllerError::DirectoryUnavailable { dir, .. } => vec![
                format!(
                    "Check whether the directory {} exists and fix it in the config file.",
                    dir.display()
                ),
                PERMISSION_HINT.to_string(),
            ],
            ControllerError::DeviceNotFound { dir, prefix, .. } => vec![
                format!(
                    "Check whether a device with the prefix {} exists in {} and fix it in the config file.",
                    prefix,
                    dir.display()
                ),
                PERMISSION_HINT.to_string(),
            ],
            ControllerError::OpenFailed { .. } => vec![PERMISSION_HINT.to_string()],
            ControllerError::GrabFailed { .. } => vec![
                "Another program may already hold the device exclusively. Close it and try again."
                    .to_string(),
                PERMISSION_HINT.to_string(),
            ],
            ControllerError::SessionActive => {
                vec!["Only one device session can be open at a time.".to_string()]
            }
            ControllerError::ReadFailed { .. } => vec![
                "The device was probably disconnected. Reconnect it and restart this program."
                    .to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io_err() -> io::Error {
        io::Error::new(io::ErrorKind::PermissionDenied, "denied")
    }

    #[test]
    fn exit_codes_are_distinct_per_condition() {
        let codes = [
            ControllerError::DirectoryUnavailable {
                dir: PathBuf::from("/missing"),
                source: io_err(),
            }
            .exit_code(),
            ControllerError::DeviceNotFound {
                dir: PathBuf::from("/dev/input/by-id"),
                prefix: "a".into(),
                suffix: "b".into(),
            }
            .exit_code(),
            ControllerError::OpenFailed {
                path: PathBuf::from("/dev/input/event3"),
                source: io_err(),
            }
            .exit_code(),
            ControllerError::ReadFailed { source: io_err() }.exit_code(),
        ];

        for (i, a) in codes.iter().enumerate() {
            assert_ne!(*a, 0);
            assert_ne!(*a, EXIT_CONFIG);
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn open_and_grab_share_session_code() {
        let open = ControllerError::OpenFailed {
            path: PathBuf::from("/dev/input/event3"),
            source: io_err(),
        };
        let grab = ControllerError::GrabFailed {
            path: PathBuf::from("/dev/input/event3"),
            source: io::Error::new(io::ErrorKind::Other, "busy"),
        };
        assert_eq!(open.exit_code(), EXIT_SESSION);
        assert_eq!(grab.exit_code(), EXIT_SESSION);
        assert_eq!(open.category(), Category::Session);
        assert_eq!(grab.category(), Category::Session);
    }

    #[test]
    fn directory_suggestion_names_the_directory() {
        let err = ControllerError::DirectoryUnavailable {
            dir: PathBuf::from("/dev/input/by-id/"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.category(), Category::Locator);
        assert!(err.suggestions()[0].contains("/dev/input/by-id/"));
        assert!(err.to_string().contains("/dev/input/by-id/"));
    }

    #[test]
    fn read_failure_is_decoder_category() {
        let err = ControllerError::ReadFailed {
            source: io::Error::new(io::ErrorKind::UnexpectedEof, "no data"),
        };
        assert_eq!(err.category(), Category::Decoder);
        assert_eq!(err.category().name(), "decoder");
    }
}
