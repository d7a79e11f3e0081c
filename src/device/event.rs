//! Raw input event decoding
//!
//! The kernel hands out `struct input_event` records when an evdev node is
//! read: a timestamp followed by type, code and value. Only `EV_KEY` records
//! are interesting here; everything else (sync markers, relative motion) is
//! dropped.

use crate::dispatch::KEY_STATE_SIZE;
use crate::error::ControllerError;
use nix::libc;
use std::io::{self, Read};
use std::mem;

/// Size of one kernel input event record in bytes
pub const RECORD_SIZE: usize = mem::size_of::<libc::input_event>();

/// Maximum number of records read in one batch
pub const MAX_EVENTS: usize = 64;

/// Event type of key and button records
pub const EV_KEY: u16 = evdev::EventType::KEY.0;

// Fields after the timestamp
const TYPE_OFFSET: usize = mem::size_of::<libc::timeval>();
const CODE_OFFSET: usize = TYPE_OFFSET + 2;
const VALUE_OFFSET: usize = CODE_OFFSET + 2;

/// One decoded input event record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEvent {
    pub event_type: u16,
    pub code: u16,
    pub value: i32,
}

impl RawEvent {
    pub fn new(event_type: u16, code: u16, value: i32) -> Self {
        Self {
            event_type,
            code,
            value,
        }
    }

    /// Parse a record from exactly `RECORD_SIZE` bytes in native byte order
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != RECORD_SIZE {
            return None;
        }
        let event_type = u16::from_ne_bytes([bytes[TYPE_OFFSET], bytes[TYPE_OFFSET + 1]]);
        let code = u16::from_ne_bytes([bytes[CODE_OFFSET], bytes[CODE_OFFSET + 1]]);
        let value = i32::from_ne_bytes([
            bytes[VALUE_OFFSET],
            bytes[VALUE_OFFSET + 1],
            bytes[VALUE_OFFSET + 2],
            bytes[VALUE_OFFSET + 3],
        ]);
        Some(Self::new(event_type, code, value))
    }

    /// Encode as a kernel record with a zero timestamp
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; RECORD_SIZE];
        bytes[TYPE_OFFSET..CODE_OFFSET].copy_from_slice(&self.event_type.to_ne_bytes());
        bytes[CODE_OFFSET..VALUE_OFFSET].copy_from_slice(&self.code.to_ne_bytes());
        bytes[VALUE_OFFSET..VALUE_OFFSET + 4].copy_from_slice(&self.value.to_ne_bytes());
        bytes
    }

    /// Keep key records whose scancode fits the tracked range
    pub fn key_event(&self) -> Option<KeyEvent> {
        if self.event_type != EV_KEY {
            log::trace!("Dropping {:?} event", evdev::EventType(self.event_type));
            return None;
        }
        if usize::from(self.code) >= KEY_STATE_SIZE {
            log::debug!("Dropping out-of-range scancode {}", self.code);
            return None;
        }
        log::info!("Scan code: {}", self.code);
        log::trace!("{:?} value {}", evdev::Key::new(self.code), self.value);
        Some(KeyEvent {
            scancode: self.code,
            value: self.value,
        })
    }
}

/// A key record: 1 = press, 0 = release, 2 = autorepeat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub scancode: u16,
    pub value: i32,
}

impl KeyEvent {
    /// Any non-zero value (press or autorepeat) means the key is down
    pub fn is_pressed(&self) -> bool {
        self.value != 0
    }
}

/// Split a buffer into records. A trailing partial record is ignored.
pub fn decode_records(bytes: &[u8]) -> Vec<RawEvent> {
    bytes
        .chunks_exact(RECORD_SIZE)
        .filter_map(RawEvent::from_bytes)
        .collect()
}

/// Reads batches of key events from a device handle
pub struct EventReader<R> {
    source: R,
    buffer: Vec<u8>,
}

impl<R: Read> EventReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            buffer: vec![0u8; RECORD_SIZE * MAX_EVENTS],
        }
    }

    /// Block until the device delivers data and return its key events.
    ///
    /// A read of fewer than two records is discarded and yields an empty
    /// batch. End of stream or any I/O error, `Interrupted` included, is fatal.
    pub fn read_batch(&mut self) -> Result<Vec<KeyEvent>, ControllerError> {
        let n = match self.source.read(&mut self.buffer) {
            Ok(0) => {
                return Err(ControllerError::ReadFailed {
                    source: io::Error::new(io::ErrorKind::UnexpectedEof, "device returned no data"),
                })
            }
            Ok(n) => n,
            Err(source) => return Err(ControllerError::ReadFailed { source }),
        };

        if n < RECORD_SIZE * 2 {
            log::trace!("Short read of {} bytes, discarding", n);
            return Ok(Vec::new());
        }

        Ok(decode_records(&self.buffer[..n])
            .iter()
            .filter_map(RawEvent::key_event)
            .collect())
    }
}
