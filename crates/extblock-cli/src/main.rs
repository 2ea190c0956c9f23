//! extblock CLI
//!
//! Command-line admin for the file-extension upload blocklist.

mod args;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;
use extblock_core::Config;
use tracing::error;

use args::Args;
use commands::Command;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config and completions commands work without a usable config file
    let config = match args.command {
        Command::Config(_) | Command::Completions(_) => Config::default(),
        _ => commands::config::resolve(args.config.as_deref(), args.server.as_deref())?,
    };

    logging::init(&args, &config.logging)?;

    let result = run(args, config).await;

    if let Err(ref e) = result {
        error!("Fatal error: {:#}", e);
    }

    result
}

async fn run(args: Args, config: Config) -> Result<()> {
    match args.command {
        Command::Fixed(fixed_args) => commands::fixed::execute(fixed_args, &config).await,
        Command::Custom(custom_args) => commands::custom::execute(custom_args, &config).await,
        Command::Check(check_args) => commands::check::execute(check_args, &config).await,
        Command::Status(status_args) => commands::status::execute(status_args, &config).await,
        Command::Config(config_args) => {
            commands::config::execute(config_args, args.config.as_deref(), args.server.as_deref())
        }
        Command::Completions(comp_args) => commands::completions::execute(comp_args),
    }
}
