//! G600 Controller - maps Logitech G600 buttons to shell commands
//!
//! Finds the mouse's keyboard interface under `/dev/input/by-id/`, grabs it
//! so its key presses no longer reach the desktop, and runs a configured
//! command whenever one of its keys goes down or comes back up.

pub mod config;
pub mod controller;
pub mod device;
pub mod dispatch;
pub mod error;
pub mod report;

pub use config::Config;
pub use controller::Controller;
pub use error::ControllerError;
