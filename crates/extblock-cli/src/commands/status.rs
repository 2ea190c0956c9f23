//! Summary of both rule lists

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use extblock_core::extension::{MAX_CUSTOM_RULES, MAX_FIXED_RULES};
use extblock_core::Config;
use serde::Serialize;

use super::{connect, print_footer, print_header, print_json};

/// Status command arguments
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct StatusReport {
    server: String,
    fixed: usize,
    fixed_blocked: usize,
    custom: usize,
    total: usize,
    blocked: usize,
    overlapping: Vec<String>,
}

/// Execute status command
pub async fn execute(args: StatusArgs, config: &Config) -> Result<()> {
    let store = connect(config)?;

    tokio::try_join!(store.load_fixed(), store.load_custom())
        .context("Failed to load extension lists")?;

    let report = StatusReport {
        server: store.authority().base_url().to_string(),
        fixed: store.fixed_extensions().len(),
        fixed_blocked: store.blocked_fixed().len(),
        custom: store.custom_extensions().len(),
        total: store.total_count(),
        blocked: store.blocked_count(),
        overlapping: store.overlapping_extensions(),
    };

    if args.json {
        return print_json(&report);
    }

    print_header("Blocklist Status");
    println!("Server:   {}", report.server.cyan());
    println!(
        "Fixed:    {}/{} ({} blocked)",
        report.fixed, MAX_FIXED_RULES, report.fixed_blocked
    );
    println!("Custom:   {}/{}", report.custom, MAX_CUSTOM_RULES);
    println!("Total:    {}", report.total);
    println!("Blocked:  {}", report.blocked.to_string().red().bold());

    if !report.overlapping.is_empty() {
        println!(
            "{} In both lists: {}",
            "!".yellow(),
            report.overlapping.join(", ")
        );
    }

    print_footer();
    Ok(())
}
