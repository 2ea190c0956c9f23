//! Custom extension rule commands

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use extblock_core::extension::MAX_CUSTOM_RULES;
use extblock_core::{validate_rule, BlocklistStore, Config, ExtensionType, HttpAuthority, RuleId};

use super::{connect, print_footer, print_header, print_json, print_success};

/// Custom rule arguments
#[derive(Args, Debug)]
pub struct CustomArgs {
    #[command(subcommand)]
    pub command: CustomCommands,
}

/// Custom rule subcommands
#[derive(Subcommand, Debug)]
pub enum CustomCommands {
    /// List custom rules
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Block a new extension
    Add {
        /// Extension, with or without a leading dot
        extension: String,
    },

    /// Delete a custom rule by id
    Delete {
        /// Rule id as shown by `custom list`
        id: RuleId,
    },

    /// Delete a custom rule by extension
    Remove {
        /// Extension to stop blocking
        extension: String,
    },

    /// Delete every custom rule
    Clear,
}

/// Execute custom command
pub async fn execute(args: CustomArgs, config: &Config) -> Result<()> {
    let store = connect(config)?;

    match args.command {
        CustomCommands::List { json } => list(&store, json).await,
        CustomCommands::Add { extension } => add(&store, &extension).await,
        CustomCommands::Delete { id } => delete(&store, id).await,
        CustomCommands::Remove { extension } => remove(&store, &extension).await,
        CustomCommands::Clear => clear(&store).await,
    }
}

async fn list(store: &BlocklistStore<HttpAuthority>, json: bool) -> Result<()> {
    let rules = store
        .load_custom()
        .await
        .context("Failed to load custom extensions")?;

    if json {
        return print_json(&rules);
    }

    print_header("Custom Extensions");
    println!("Rules: {}/{}", rules.len(), MAX_CUSTOM_RULES);
    println!("{}", "─".repeat(50).bright_black());

    if rules.is_empty() {
        println!("{}", "  (empty)".dimmed());
    } else {
        for rule in &rules {
            println!(
                "  {} {} {}",
                "●".red(),
                format!("#{:<4}", rule.id).dimmed(),
                format!(".{}", rule.extension).red()
            );
        }
    }

    print_footer();
    Ok(())
}

async fn add(store: &BlocklistStore<HttpAuthority>, extension: &str) -> Result<()> {
    let extension = validate_rule(extension)?;
    let rule = store
        .add_custom(&extension)
        .await
        .with_context(|| format!("Failed to add .{extension}"))?;

    print_success(format!("Blocking {}", format!(".{}", rule.extension).cyan()));
    println!(
        "  Id: {}  ({}/{} custom rules)",
        rule.id,
        store.custom_extensions().len(),
        MAX_CUSTOM_RULES
    );
    Ok(())
}

async fn delete(store: &BlocklistStore<HttpAuthority>, id: RuleId) -> Result<()> {
    store
        .delete_custom(id)
        .await
        .with_context(|| format!("Failed to delete custom rule #{id}"))?;

    print_success(format!("Deleted custom rule #{id}"));
    Ok(())
}

async fn remove(store: &BlocklistStore<HttpAuthority>, extension: &str) -> Result<()> {
    let extension = validate_rule(extension)?;
    store
        .unblock(&extension, ExtensionType::Custom)
        .await
        .with_context(|| format!("Failed to remove .{extension}"))?;

    print_success(format!("Removed {}", format!(".{extension}").cyan()));
    Ok(())
}

async fn clear(store: &BlocklistStore<HttpAuthority>) -> Result<()> {
    store
        .delete_all_custom()
        .await
        .context("Failed to clear custom extensions")?;

    print_success("All custom extensions deleted");
    Ok(())
}
