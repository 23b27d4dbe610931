use anyhow::Result;
use clap::Parser;
use log::{debug, error};
use std::process::ExitCode;

mod cli;
mod command;
mod config;
mod error;
mod gui;
mod i18n;
mod utils;
mod worker;

use cli::Cli;
use config::Config;

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    debug!("Arguments: {:?}", args);

    // No arguments: open the window
    if args.len() == 1 {
        let config = Config::load();
        debug!("Launching GUI with {:?}", config);
        if let Err(e) = gui::run(config) {
            error!("GUI failed: {:?}", e);
            return Err(e.into());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let cli = Cli::parse();
    if cli.run()? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
