//! The capture-and-dispatch loop

use crate::device::EventReader;
use crate::dispatch::{ActionSink, ActionTable, Dispatcher, KeyStates};
use crate::error::ControllerError;
use std::convert::Infallible;
use std::io::Read;

/// Reads key events from a source and fires actions on transitions
pub struct Controller<R, S> {
    events: EventReader<R>,
    states: KeyStates,
    dispatcher: Dispatcher<S>,
}

impl<R: Read, S: ActionSink> Controller<R, S> {
    pub fn new(source: R, table: ActionTable, sink: S) -> Self {
        Self {
            events: EventReader::new(source),
            states: KeyStates::new(),
            dispatcher: Dispatcher::new(table, sink),
        }
    }

    /// Read one batch and dispatch every key event in it.
    ///
    /// Returns the number of transitions seen.
    pub fn step(&mut self) -> Result<usize, ControllerError> {
        let batch = self.events.read_batch()?;
        let mut transitions = 0;
        for event in batch {
            if self.dispatcher.dispatch(&mut self.states, event).is_some() {
                transitions += 1;
            }
        }
        Ok(transitions)
    }

    /// Run until reading fails. Never returns otherwise.
    pub fn run(&mut self) -> Result<Infallible, ControllerError> {
        loop {
            self.step()?;
        }
    }

    pub fn states(&self) -> &KeyStates {
        &self.states
    }

    pub fn sink(&self) -> &S {
        self.dispatcher.sink()
    }
}
