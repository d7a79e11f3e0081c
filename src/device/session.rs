//! Exclusive access to the device node

use super::locator::DevicePath;
use crate::error::ControllerError;
use std::fs::File;
use std::io::{self, Read};
use std::os::unix::io::AsRawFd;
use std::sync::atomic::{AtomicBool, Ordering};

// EVIOCGRAB = _IOW('E', 0x90, int)
nix::ioctl_write_int!(eviocgrab, b'E', 0x90);

static SESSION_OPEN: AtomicBool = AtomicBool::new(false);

/// An open, grabbed input device.
///
/// While the grab is held the kernel delivers the device's events only to
/// this handle. Dropping the session ungrabs and closes it.
#[derive(Debug)]
pub struct DeviceSession {
    file: File,
    path: DevicePath,
}

impl DeviceSession {
    /// Open `path` read-only and grab it.
    ///
    /// Only one session may be live per process.
    pub fn open_exclusive(path: DevicePath) -> Result<Self, ControllerError> {
        if SESSION_OPEN
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ControllerError::SessionActive);
        }

        match Self::open_and_grab(&path) {
            Ok(file) => {
                log::debug!("Grabbed {}", path);
                Ok(Self { file, path })
            }
            Err(e) => {
                SESSION_OPEN.store(false, Ordering::Release);
                Err(e)
            }
        }
    }

    /// Whether a session is currently live in this process
    pub fn is_active() -> bool {
        SESSION_OPEN.load(Ordering::Acquire)
    }

    fn open_and_grab(path: &DevicePath) -> Result<File, ControllerError> {
        let file = File::open(path).map_err(|source| ControllerError::OpenFailed {
            path: path.as_path().to_path_buf(),
            source,
        })?;

        // SAFETY: the descriptor is owned by `file` and stays open for the call.
        unsafe { eviocgrab(file.as_raw_fd(), 1) }.map_err(|errno| {
            ControllerError::GrabFailed {
                path: path.as_path().to_path_buf(),
                source: io::Error::from(errno),
            }
        })?;

        Ok(file)
    }
}

impl Read for DeviceSession {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Drop for DeviceSession {
    fn drop(&mut self) {
        // Closing the descriptor releases the grab as well
        // SAFETY: `self.file` is still open here.
        if let Err(e) = unsafe { eviocgrab(self.file.as_raw_fd(), 0) } {
            log::debug!("Couldn't ungrab {}: {}", self.path, e);
        }
        log::debug!("Released {}", self.path);
        SESSION_OPEN.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    // The live-session flag is process-wide, so every path that touches it
    // is exercised in one test to keep parallel tests from racing on it.
    #[test]
    fn failed_open_or_grab_leaves_no_session() {
        let missing = PathBuf::from(format!(
            "/nonexistent/g600-session-{}",
            std::process::id()
        ));
        let result = DeviceSession::open_exclusive(DevicePath::from(missing.clone()));
        match result {
            Err(ControllerError::OpenFailed { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected OpenFailed, got {:?}", other),
        }
        assert!(!DeviceSession::is_active());

        // A regular file opens fine but does not support EVIOCGRAB
        let plain = env::temp_dir().join(format!("g600-session-plain-{}", std::process::id()));
        fs::write(&plain, b"not a device").unwrap();

        let result = DeviceSession::open_exclusive(DevicePath::from(plain.clone()));
        assert!(matches!(result, Err(ControllerError::GrabFailed { .. })));
        assert!(!DeviceSession::is_active());

        let _ = fs::remove_file(&plain);

        // A second session is refused before the device is even opened
        SESSION_OPEN.store(true, Ordering::Release);
        let result = DeviceSession::open_exclusive(DevicePath::from(missing));
        assert!(matches!(result, Err(ControllerError::SessionActive)));
        assert!(DeviceSession::is_active());
        SESSION_OPEN.store(false, Ordering::Release);
    }
}
