//! Configuration for G600 Controller
//!
//! The device pattern and the action tables are compiled in, and can be
//! replaced by a config file that is read once at startup.
//!
//! ## Config File Location
//!
//! `~/.config/g600-controller/config.toml` (via `dirs::config_dir`)
//!
//! ## Example
//!
//! ```toml
//! [device]
//! directory = "/dev/input/by-id/"
//! prefix = "usb-Logitech_Gaming_Mouse_G600_"
//! suffix = "-if01-event-kbd"
//!
//! [[binding]]
//! label = "G9"
//! scancode = 79
//! press = "xdotool keydown ctrl"
//! release = "xdotool keyup ctrl"
//! ```

use crate::device::DevicePattern;
use crate::dispatch::{ActionTable, Command, KEY_STATE_SIZE};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Scancode {0} is out of range (must be below {max})", max = KEY_STATE_SIZE)]
    ScancodeOutOfRange(u16),

    #[error("Scancode {0} is bound more than once")]
    DuplicateBinding(u16),
}

/// Returns the path to the config file. Does not create anything.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(config_dir.join("g600-controller").join("config.toml"))
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Where the device node lives and what it is called
    #[serde(default)]
    pub device: DeviceConfig,
    /// Actions per scancode
    #[serde(default = "default_bindings", rename = "binding")]
    pub bindings: Vec<Binding>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: DeviceConfig::default(),
            bindings: default_bindings(),
        }
    }
}

/// Device lookup settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeviceConfig {
    /// Directory scanned for the device entry
    pub directory: PathBuf,
    /// Required start of the entry name
    pub prefix: String,
    /// Required end of the entry name
    pub suffix: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("/dev/input/by-id/"),
            prefix: "usb-Logitech_Gaming_Mouse_G600_".to_string(),
            suffix: "-if01-event-kbd".to_string(),
        }
    }
}

impl DeviceConfig {
    pub fn pattern(&self) -> DevicePattern {
        DevicePattern::new(&self.directory, &self.prefix, &self.suffix)
    }
}

/// Commands for one scancode. Empty or missing commands do nothing.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Binding {
    /// Optional human-readable name, e.g. the button label
    #[serde(default)]
    pub label: Option<String>,
    pub scancode: u16,
    #[serde(default)]
    pub press: Option<String>,
    #[serde(default)]
    pub release: Option<String>,
}

impl Binding {
    pub fn new(scancode: u16, press: Option<&str>, release: Option<&str>) -> Self {
        Self {
            label: None,
            scancode,
            press: press.map(str::to_string),
            release: release.map(str::to_string),
        }
    }

    fn labeled(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }
}

/// Bindings for a G600 with all extra buttons set to unique keyboard keys
fn default_bindings() -> Vec<Binding> {
    vec![
        Binding::new(4, Some(""), None).labeled("scroll left"),
        Binding::new(5, Some("xdotool key Page_Down"), None).labeled("scroll right"),
        Binding::new(79, Some("xdotool keydown ctrl"), Some("xdotool keyup ctrl")).labeled("G9"),
        Binding::new(81, Some("xdotool keydown alt"), Some("xdotool keyup alt")).labeled("G11"),
        Binding::new(75, Some("xdotool keydown shift"), Some("xdotool keyup shift"))
            .labeled("G12"),
    ]
}

impl Config {
    /// Load configuration from the default config file.
    ///
    /// Returns the compiled-in configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = match config_path() {
            Ok(path) => path,
            Err(e) => {
                log::warn!("{}, using built-in defaults", e);
                return Ok(Self::default());
            }
        };

        if !path.exists() {
            log::debug!("No config at {}, using built-in defaults", path.display());
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Build the action table, rejecting unusable bindings
    pub fn action_table(&self) -> Result<ActionTable, ConfigError> {
        let mut table = ActionTable::new();
        let mut seen = HashSet::new();

        for binding in &self.bindings {
            if usize::from(binding.scancode) >= KEY_STATE_SIZE {
                return Err(ConfigError::ScancodeOutOfRange(binding.scancode));
            }
            if !seen.insert(binding.scancode) {
                return Err(ConfigError::DuplicateBinding(binding.scancode));
            }

            table.set_press(binding.scancode, binding.press.clone().and_then(Command::new));
            table.set_release(binding.scancode, binding.release.clone().and_then(Command::new));
        }

        Ok(table)
    }
}
