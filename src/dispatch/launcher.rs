//! Launching external commands

use super::action::Command;
use std::io;
use std::process::{self, Child, Stdio};
use thiserror::Error;

/// A command could not be started. Never fatal.
#[derive(Debug, Error)]
#[error("couldn't execute \"{command}\": {source}")]
pub struct LaunchError {
    pub command: String,
    #[source]
    pub source: io::Error,
}

/// Something that can start an external action.
///
/// Implementations must not wait for the action to finish.
pub trait ActionSink {
    fn launch(&mut self, command: &Command) -> Result<(), LaunchError>;
}

/// Runs commands through `sh -c` and returns as soon as they are spawned
pub struct ShellLauncher {
    shell: String,
    running: Vec<Child>,
}

impl ShellLauncher {
    pub fn new() -> Self {
        Self::with_shell("sh")
    }

    /// Use a different shell binary. It is invoked as `<shell> -c <command>`.
    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            running: Vec::new(),
        }
    }

    /// Number of launched commands that have not been seen to exit yet
    pub fn running(&self) -> usize {
        self.running.len()
    }

    /// Collect children that already exited so they don't linger as zombies
    pub fn reap_finished(&mut self) {
        self.running.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                log::debug!("Action (pid {}) exited with {}", child.id(), status);
                false
            }
            Ok(None) => true,
            Err(e) => {
                log::warn!("Couldn't poll action (pid {}): {}", child.id(), e);
                false
            }
        });
    }
}

impl Default for ShellLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionSink for ShellLauncher {
    fn launch(&mut self, command: &Command) -> Result<(), LaunchError> {
        self.reap_finished();

        let child = process::Command::new(&self.shell)
            .arg("-c")
            .arg(command.as_str())
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| LaunchError {
                command: command.to_string(),
                source,
            })?;

        log::debug!("Spawned pid {} for \"{}\"", child.id(), command);
        self.running.push(child);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::{Duration, Instant};

    #[test]
    fn launches_without_waiting() {
        let mut launcher = ShellLauncher::new();
        let command = Command::new("sleep 5").unwrap();

        let started = Instant::now();
        launcher.launch(&command).unwrap();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(launcher.running(), 1);

        for child in &mut launcher.running {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    #[test]
    fn finished_children_are_reaped() {
        let mut launcher = ShellLauncher::new();
        launcher.launch(&Command::new("true").unwrap()).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while launcher.running() > 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
            launcher.reap_finished();
        }
        assert_eq!(launcher.running(), 0);
    }

    #[test]
    fn missing_shell_is_a_launch_error() {
        let mut launcher = ShellLauncher::with_shell("/nonexistent/shell");
        let err = launcher
            .launch(&Command::new("echo hi").unwrap())
            .unwrap_err();

        assert_eq!(err.command, "echo hi");
        assert!(err.to_string().contains("echo hi"));
        assert_eq!(launcher.running(), 0);
    }
}
