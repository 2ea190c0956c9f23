//! Check a file name against the live blocklist

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use extblock_core::{classify, Config, ExtensionType};
use tracing::info;

use super::{connect, print_success};

/// Check command arguments
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// File name to check, e.g. `report.PDF`
    pub file_name: String,

    /// Stop blocking the extension if it is blocked
    #[arg(long)]
    pub unblock: bool,
}

/// Execute check command
pub async fn execute(args: CheckArgs, config: &Config) -> Result<()> {
    // Rejected names never reach the server
    let extension = classify(&args.file_name)?;

    let store = connect(config)?;
    let blocked = store
        .check(&extension)
        .await
        .with_context(|| format!("Failed to check .{extension}"))?;

    println!("File:      {}", args.file_name);
    println!("Extension: {}", format!(".{extension}").cyan());
    if blocked {
        println!("Status:    {}", "Blocked".red().bold());
    } else {
        println!("Status:    {}", "Allowed".green().bold());
    }

    if !args.unblock {
        return Ok(());
    }

    if !blocked {
        println!("{} .{} is not blocked, nothing to do", "!".yellow(), extension);
        return Ok(());
    }

    let Some(kind) = store
        .classify_type(&extension)
        .await
        .with_context(|| format!("Failed to look up .{extension}"))?
    else {
        println!(
            "{} .{} is blocked but belongs to neither list",
            "!".yellow(),
            extension
        );
        return Ok(());
    };

    let used = store
        .unblock(&extension, kind)
        .await
        .with_context(|| format!("Failed to unblock .{extension}"))?;
    info!(%extension, kind = %used, "Unblocked extension");

    match used {
        ExtensionType::Fixed => {
            print_success(format!("Turned off fixed rule for .{extension}"));
        }
        ExtensionType::Custom => {
            print_success(format!("Deleted custom rule for .{extension}"));
        }
    }

    Ok(())
}
