//! CLI commands

pub mod check;
pub mod completions;
pub mod config;
pub mod custom;
pub mod fixed;
pub mod status;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use extblock_core::{BlocklistStore, Config, HttpAuthority};
use serde::Serialize;
use tracing::debug;

/// CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fixed extension rules (toggleable, with descriptions)
    Fixed(fixed::FixedArgs),

    /// Custom extension rules (always blocked)
    Custom(custom::CustomArgs),

    /// Check whether a file name would be blocked
    Check(check::CheckArgs),

    /// Summarize both lists
    Status(status::StatusArgs),

    /// Configuration management
    Config(config::ConfigArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Build a store talking to the configured server
pub fn connect(config: &Config) -> Result<BlocklistStore<HttpAuthority>> {
    let authority = HttpAuthority::from_config(&config.authority)
        .context("Failed to create blocklist client")?;
    debug!(base_url = %authority.base_url(), "Connecting to blocklist server");
    Ok(BlocklistStore::new(authority))
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

/// Heavy rule with a title, as used by every listing
pub fn print_header(title: &str) {
    println!("{}", "═".repeat(50).bright_blue());
    println!("{}", format!(" {title}").bright_white().bold());
    println!("{}", "═".repeat(50).bright_blue());
}

/// Closing rule under a listing
pub fn print_footer() {
    println!("{}", "═".repeat(50).bright_blue());
}

/// Green check mark followed by a message
pub fn print_success(message: impl std::fmt::Display) {
    println!("{} {}", "✓".green(), message);
}
