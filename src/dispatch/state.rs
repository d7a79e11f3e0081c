//! Per-scancode key state tracking

/// Number of scancodes tracked. Codes at or above this are ignored.
pub const KEY_STATE_SIZE: usize = 256;

/// Logical state of a single key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyState {
    #[default]
    Up,
    Down,
}

/// A change of logical key state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Up to Down
    Press,
    /// Down to Up
    Release,
}

/// Last known state of every tracked key.
///
/// The kernel keeps sending "down" (autorepeat) while a key is held, so state
/// only changes when the incoming value differs from what is stored.
#[derive(Debug, Clone)]
pub struct KeyStates {
    keys: [KeyState; KEY_STATE_SIZE],
}

impl KeyStates {
    pub fn new() -> Self {
        Self {
            keys: [KeyState::Up; KEY_STATE_SIZE],
        }
    }

    /// State of a scancode, or `None` when it is outside the tracked range
    pub fn get(&self, scancode: u16) -> Option<KeyState> {
        self.keys.get(usize::from(scancode)).copied()
    }

    /// Record an observed key value and report whether it was a transition.
    ///
    /// Returns `None` for duplicates (press while down, release while up) and
    /// for out-of-range scancodes.
    pub fn transition(&mut self, scancode: u16, pressed: bool) -> Option<Edge> {
        let slot = self.keys.get_mut(usize::from(scancode))?;
        match (*slot, pressed) {
            (KeyState::Up, true) => {
                *slot = KeyState::Down;
                Some(Edge::Press)
            }
            (KeyState::Down, false) => {
                *slot = KeyState::Up;
                Some(Edge::Release)
            }
            _ => None,
        }
    }

    /// Scancodes currently held down
    pub fn pressed(&self) -> impl Iterator<Item = u16> + '_ {
        self.keys
            .iter()
            .enumerate()
            .filter(|(_, state)| **state == KeyState::Down)
            .map(|(code, _)| code as u16)
    }
}

impl Default for KeyStates {
    fn default() -> Self {
        Self::new()
    }
}
