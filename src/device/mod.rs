//! Input device discovery, exclusive access and event decoding

pub mod event;
mod locator;
mod session;

pub use event::{decode_records, EventReader, KeyEvent, RawEvent, EV_KEY, RECORD_SIZE};
pub use locator::{find_device, DevicePath, DevicePattern};
pub use session::DeviceSession;
