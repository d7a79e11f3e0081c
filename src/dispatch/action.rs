//! Scancode to command tables

use super::state::KEY_STATE_SIZE;
use std::fmt;

/// A non-empty shell command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command(String);

impl Command {
    /// Returns `None` for empty or whitespace-only input, which means "no action"
    pub fn new(line: impl Into<String>) -> Option<Self> {
        let line = line.into();
        if line.trim().is_empty() {
            None
        } else {
            Some(Self(line))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Press and release commands for every tracked scancode.
///
/// Built once at startup and never changed afterwards.
#[derive(Debug, Clone)]
pub struct ActionTable {
    press: Vec<Option<Command>>,
    release: Vec<Option<Command>>,
}

impl ActionTable {
    /// Create a table with no actions
    pub fn new() -> Self {
        Self {
            press: vec![None; KEY_STATE_SIZE],
            release: vec![None; KEY_STATE_SIZE],
        }
    }

    /// Set the press command for a scancode.
    ///
    /// Returns `false` when the scancode is out of range and nothing was stored.
    pub fn set_press(&mut self, scancode: u16, command: Option<Command>) -> bool {
        Self::set(&mut self.press, scancode, command)
    }

    /// Set the release command for a scancode.
    ///
    /// Returns `false` when the scancode is out of range and nothing was stored.
    pub fn set_release(&mut self, scancode: u16, command: Option<Command>) -> bool {
        Self::set(&mut self.release, scancode, command)
    }

    pub fn on_press(&self, scancode: u16) -> Option<&Command> {
        self.press.get(usize::from(scancode))?.as_ref()
    }

    pub fn on_release(&self, scancode: u16) -> Option<&Command> {
        self.release.get(usize::from(scancode))?.as_ref()
    }

    /// Number of configured commands across both tables
    pub fn len(&self) -> usize {
        self.press.iter().chain(&self.release).flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn set(slots: &mut [Option<Command>], scancode: u16, command: Option<Command>) -> bool {
        match slots.get_mut(usize::from(scancode)) {
            Some(slot) => {
                *slot = command;
                true
            }
            None => false,
        }
    }
}

impl Default for ActionTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_command_is_no_action() {
        assert!(Command::new("").is_none());
        assert!(Command::new("   ").is_none());
        assert_eq!(
            Command::new("xdotool key Page_Down").map(|c| c.to_string()),
            Some("xdotool key Page_Down".to_string())
        );
    }

    #[test]
    fn new_table_has_no_actions() {
        let table = ActionTable::new();
        assert!(table.is_empty());
        assert!(table.on_press(79).is_none());
        assert!(table.on_release(79).is_none());
    }

    #[test]
    fn press_and_release_are_separate() {
        let mut table = ActionTable::new();
        assert!(table.set_press(79, Command::new("xdotool keydown ctrl")));

        assert_eq!(
            table.on_press(79).map(Command::as_str),
            Some("xdotool keydown ctrl")
        );
        assert!(table.on_release(79).is_none());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn out_of_range_scancode_is_rejected() {
        let mut table = ActionTable::new();
        assert!(!table.set_press(300, Command::new("true")));
        assert!(!table.set_release(256, Command::new("true")));
        assert!(table.on_press(300).is_none());
        assert!(table.is_empty());
    }
}
