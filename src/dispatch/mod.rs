//! Key state tracking and action dispatch

pub mod action;
mod dispatcher;
pub mod launcher;
mod state;

pub use action::{ActionTable, Command};
pub use dispatcher::Dispatcher;
pub use launcher::{ActionSink, LaunchError, ShellLauncher};
pub use state::{Edge, KeyState, KeyStates, KEY_STATE_SIZE};
