//! Turns key transitions into launched actions

use super::action::{ActionTable, Command};
use super::launcher::ActionSink;
use super::state::{Edge, KeyStates};
use crate::device::KeyEvent;

/// Looks up and fires the configured action for each key transition
pub struct Dispatcher<S> {
    table: ActionTable,
    sink: S,
}

impl<S: ActionSink> Dispatcher<S> {
    pub fn new(table: ActionTable, sink: S) -> Self {
        Self { table, sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Apply one key event to `states` and fire an action if it was a transition.
    ///
    /// Autorepeat (value 2) counts as pressed, so it never fires while the
    /// key is already down.
    pub fn dispatch(&mut self, states: &mut KeyStates, event: KeyEvent) -> Option<Edge> {
        let edge = states.transition(event.scancode, event.is_pressed())?;
        log::trace!("Scancode {} {:?}", event.scancode, edge);

        let command = match edge {
            Edge::Press => self.table.on_press(event.scancode),
            Edge::Release => self.table.on_release(event.scancode),
        };
        if let Some(command) = command {
            Self::fire(&mut self.sink, command);
        }

        Some(edge)
    }

    fn fire(sink: &mut S, command: &Command) {
        log::info!("Executing: \"{}\"", command);
        if let Err(e) = sink.launch(command) {
            log::error!("Error executing command: {}", e);
        }
    }
}
