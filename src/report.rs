//! User-facing text: the startup reminder and fatal diagnostics

use crate::config::ConfigError;
use crate::error::ControllerError;

/// Printed before anything else happens
pub const INTRO: &str = "\
Starting G600 Linux controller.

It's a good idea to configure G600 with Logitech Gaming Software before running this program:
 - Assign left, right, middle mouse button and vertical mouse wheel to their normal functions
 - Assign the G-Shift button to \"G-Shift\"
 - Assign all other keys (including horizontal mouse wheel) to arbitrary (unique) keyboard keys
";

pub const STARTED: &str = "G600 controller started successfully.";

pub fn print_intro() {
    println!("{}", INTRO);
}

/// Lines describing a fatal error: what failed, where, and what to try
pub fn diagnostic_lines(err: &ControllerError) -> Vec<String> {
    let mut lines = vec![format!("Error ({}): {}", err.category().name(), err)];
    lines.extend(
        err.suggestions()
            .into_iter()
            .map(|hint| format!("Suggestion: {}", hint)),
    );
    lines
}

pub fn print_diagnostic(err: &ControllerError) {
    for line in diagnostic_lines(err) {
        println!("{}", line);
    }
}

/// Lines describing a configuration failure
pub fn config_diagnostic_lines(err: &anyhow::Error) -> Vec<String> {
    let mut lines = vec![format!("Error (config): {:#}", err)];
    match err.downcast_ref::<ConfigError>() {
        Some(ConfigError::Parse(_)) | Some(ConfigError::ScancodeOutOfRange(_)) => lines.push(
            "Suggestion: Fix the config file or remove it to use the built-in defaults."
                .to_string(),
        ),
        Some(ConfigError::DuplicateBinding(code)) => lines.push(format!(
            "Suggestion: Merge the bindings for scancode {} into one [[binding]] entry.",
            code
        )),
        _ => {}
    }
    lines
}

pub fn print_config_diagnostic(err: &anyhow::Error) {
    for line in config_diagnostic_lines(err) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn diagnostic_names_category_and_suggestions() {
        let err = ControllerError::DirectoryUnavailable {
            dir: PathBuf::from("/dev/input/by-id/"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        let lines = diagnostic_lines(&err);

        assert!(lines[0].starts_with("Error (locator):"));
        assert!(lines[1].starts_with("Suggestion:"));
        assert!(lines[1].contains("/dev/input/by-id/"));
        assert!(lines.iter().any(|l| l.contains("sudo")));
    }

    #[test]
    fn read_failure_suggests_reconnecting() {
        let err = ControllerError::ReadFailed {
            source: io::Error::new(io::ErrorKind::UnexpectedEof, "device returned no data"),
        };
        let lines = diagnostic_lines(&err);

        assert!(lines[0].starts_with("Error (decoder):"));
        assert!(lines.iter().any(|l| l.contains("disconnected")));
    }

    #[test]
    fn config_diagnostic_keeps_context() {
        let err = anyhow::Error::new(ConfigError::DuplicateBinding(79))
            .context("Invalid bindings in /tmp/config.toml");
        let lines = config_diagnostic_lines(&err);

        assert!(lines[0].contains("/tmp/config.toml"));
        assert!(lines[0].contains("79"));
        assert!(lines[1].contains("scancode 79"));
    }

    #[test]
    fn intro_mentions_g_shift() {
        assert!(INTRO.contains("G-Shift"));
        assert!(INTRO.starts_with("Starting G600 Linux controller."));
    }
}
