use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use futures::executor::block_on;

use crate::command::{self, Request};
use crate::error::DispatchError;
use crate::config::Config;
use crate::i18n::Language;
use crate::utils;
use crate::worker::{SystemRunner, Worker};

#[derive(Parser)]
#[clap(name = "perch")]
#[clap(about = "A desktop front-end for winget", long_about = "A desktop front-end for the winget package manager.\n\nRun without arguments to open the window, or use one of the subcommands below to run a single operation from the terminal.")]
pub struct Cli {
    /// Package manager executable to invoke (defaults to the configured tool)
    #[clap(long, global = true)]
    pub tool: Option<String>,
    /// Message language: en or es
    #[clap(long, global = true)]
    pub lang: Option<String>,
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install packages
    Install {
        /// Package IDs to install
        packages: Vec<String>,
    },
    /// Uninstall packages
    Uninstall {
        /// Package IDs to uninstall
        packages: Vec<String>,
    },
    /// Search for packages
    Search {
        /// Search term
        query: Vec<String>,
    },
    /// List installed packages
    List,
    /// Upgrade every installed package
    Upgrade,
}

impl Cli {
    /// Runs one operation to completion. Returns whether it succeeded.
    pub fn run(self) -> Result<bool> {
        let config = Config::load();
        let tool = self.tool.unwrap_or(config.tool);
        let language = match self.lang {
            Some(lang) => lang.parse::<Language>()?,
            None => config.language,
        };

        let request = build_request(&self.command, &tool).map_err(|e| {
            let (title, body) = language.dispatch_error(&e);
            anyhow!("{}: {}", title, body)
        })?;

        utils::print_info(&language.starting(&request));

        let mut worker = Worker::spawn(SystemRunner, language)?;
        let receiver = worker.submit(request.command)?;
        let outcome = block_on(receiver)?;
        worker.shutdown();

        if outcome.succeeded {
            print!("{}", outcome.text);
        } else {
            utils::print_error(language.failure_prefix());
            utils::print_error(&outcome.text);
        }
        Ok(outcome.succeeded)
    }
}

fn build_request(command: &Commands, tool: &str) -> Result<Request, DispatchError> {
    match command {
        Commands::Install { packages } => command::install(tool, &packages.join(" ")),
        Commands::Uninstall { packages } => command::uninstall(tool, &packages.join(" ")),
        Commands::Search { query } => command::search(tool, &query.join(" ")),
        Commands::List => Ok(command::list_installed(tool)),
        Commands::Upgrade => Ok(command::upgrade_all(tool)),
    }
}
