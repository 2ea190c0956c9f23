//! Fixed extension rule commands
//!
//! Fixed rules are a short curated list whose blocked flag an admin toggles.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use extblock_core::extension::MAX_FIXED_RULES;
use extblock_core::{validate_rule, BlocklistStore, Config, FixedExtensionRule, HttpAuthority, RuleId};

use super::{connect, print_footer, print_header, print_json, print_success};

/// Fixed rule arguments
#[derive(Args, Debug)]
pub struct FixedArgs {
    #[command(subcommand)]
    pub command: FixedCommands,
}

/// Fixed rule subcommands
#[derive(Subcommand, Debug)]
pub enum FixedCommands {
    /// List fixed rules
    List {
        /// Only show rules that are currently blocked
        #[arg(long)]
        blocked: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Turn blocking on for a fixed extension
    Block {
        /// Extension, with or without a leading dot
        extension: String,
    },

    /// Turn blocking off for a fixed extension
    Allow {
        /// Extension, with or without a leading dot
        extension: String,
    },

    /// Add a new fixed extension
    Add {
        /// Extension to add
        extension: String,
    },

    /// Delete a fixed extension by id
    Delete {
        /// Rule id as shown by `fixed list`
        id: RuleId,
    },

    /// Restore the server's default fixed list
    Reset,
}

/// Execute fixed command
pub async fn execute(args: FixedArgs, config: &Config) -> Result<()> {
    let store = connect(config)?;

    match args.command {
        FixedCommands::List { blocked, json } => list(&store, blocked, json).await,
        FixedCommands::Block { extension } => toggle(&store, &extension, true).await,
        FixedCommands::Allow { extension } => toggle(&store, &extension, false).await,
        FixedCommands::Add { extension } => add(&store, &extension).await,
        FixedCommands::Delete { id } => delete(&store, id).await,
        FixedCommands::Reset => reset(&store).await,
    }
}

async fn list(store: &BlocklistStore<HttpAuthority>, only_blocked: bool, json: bool) -> Result<()> {
    store
        .load_fixed()
        .await
        .context("Failed to load fixed extensions")?;

    let rules = if only_blocked {
        store.blocked_fixed()
    } else {
        store.fixed_extensions()
    };

    if json {
        return print_json(&rules);
    }

    print_header("Fixed Extensions");
    println!(
        "Server: {}",
        store.authority().base_url().as_str().cyan()
    );
    println!(
        "Rules: {}/{}  Blocked: {}",
        store.fixed_extensions().len(),
        MAX_FIXED_RULES,
        store.blocked_fixed().len().to_string().red()
    );
    println!("{}", "─".repeat(50).bright_black());

    if rules.is_empty() {
        println!("{}", "  (empty)".dimmed());
    } else {
        for rule in &rules {
            println!("{}", format_rule(rule));
        }
    }

    print_footer();
    Ok(())
}

async fn toggle(
    store: &BlocklistStore<HttpAuthority>,
    extension: &str,
    is_blocked: bool,
) -> Result<()> {
    let extension = validate_rule(extension)?;
    store
        .toggle_fixed(&extension, is_blocked)
        .await
        .with_context(|| format!("Failed to update .{extension}"))?;

    if is_blocked {
        print_success(format!("Blocking {}", format!(".{extension}").cyan()));
    } else {
        print_success(format!("Allowing {}", format!(".{extension}").cyan()));
    }
    println!(
        "  {} of {} fixed extensions blocked",
        store.blocked_fixed().len(),
        store.fixed_extensions().len()
    );

    Ok(())
}

async fn add(store: &BlocklistStore<HttpAuthority>, extension: &str) -> Result<()> {
    let extension = validate_rule(extension)?;
    let rule = store
        .add_fixed(&extension)
        .await
        .with_context(|| format!("Failed to add .{extension}"))?;

    print_success(format!("Added fixed extension {}", format!(".{}", rule.extension).cyan()));
    println!("  Id: {}", rule.id);
    if !rule.description.is_empty() {
        println!("  Description: {}", rule.description);
    }

    Ok(())
}

async fn delete(store: &BlocklistStore<HttpAuthority>, id: RuleId) -> Result<()> {
    store
        .delete_fixed(id)
        .await
        .with_context(|| format!("Failed to delete fixed rule #{id}"))?;

    print_success(format!("Deleted fixed rule #{id}"));
    println!("  {} fixed extensions remain", store.fixed_extensions().len());
    Ok(())
}

async fn reset(store: &BlocklistStore<HttpAuthority>) -> Result<()> {
    store
        .reset_fixed()
        .await
        .context("Failed to reset fixed extensions")?;

    print_success("Fixed extensions restored to defaults");
    for rule in &store.fixed_extensions() {
        println!("{}", format_rule(rule));
    }
    Ok(())
}

fn format_rule(rule: &FixedExtensionRule) -> String {
    let extension = format!(".{:<10}", rule.extension);
    let id = format!("#{:<4}", rule.id);
    if rule.is_blocked {
        format!(
            "  {} {} {} {}",
            "●".red(),
            id.dimmed(),
            extension.red(),
            rule.description
        )
    } else {
        format!(
            "  {} {} {} {}",
            "○".green(),
            id.dimmed(),
            extension,
            rule.description.dimmed()
        )
    }
}
