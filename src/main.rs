//! G600 Controller - Linux button mapper for the Logitech G600

use anyhow::{Context, Result};
use env_logger::Env;
use std::process::ExitCode;

use g600_controller::{
    config::{self, Config},
    device::{find_device, DeviceSession},
    dispatch::{ActionTable, ShellLauncher},
    error::EXIT_CONFIG,
    report, Controller, ControllerError,
};

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    report::print_intro();

    let (config, table) = match load_config() {
        Ok(loaded) => loaded,
        Err(e) => {
            report::print_config_diagnostic(&e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    // Only returns on failure
    let err = match run(&config, table) {
        Ok(never) => match never {},
        Err(e) => e,
    };
    report::print_diagnostic(&err);
    ExitCode::from(err.exit_code())
}

fn load_config() -> Result<(Config, ActionTable)> {
    let location = config::config_path()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|_| "the config file".to_string());

    let config = Config::load().with_context(|| format!("Couldn't load {}", location))?;
    let table = config
        .action_table()
        .with_context(|| format!("Invalid bindings in {}", location))?;
    log::debug!("{} actions configured", table.len());
    Ok((config, table))
}

fn run(config: &Config, table: ActionTable) -> Result<std::convert::Infallible, ControllerError> {
    let path = find_device(&config.device.pattern())?;
    let session = DeviceSession::open_exclusive(path)?;

    println!("{}\n", report::STARTED);

    let mut controller = Controller::new(session, table, ShellLauncher::new());
    controller.run()
}
