//! Config command - configuration management

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use extblock_core::Config;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CONFIG_FILE_NAME: &str = "extblock.toml";

/// Config command arguments
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Generate a configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Config file to validate
        file: PathBuf,
    },

    /// Show config file locations
    Paths,
}

/// Execute config command
pub fn execute(args: ConfigArgs, file: Option<&Path>, server: Option<&str>) -> Result<()> {
    match args.action {
        ConfigAction::Show => show_config(file, server),
        ConfigAction::Generate { output, force } => generate_config(&output, force),
        ConfigAction::Validate { file } => validate_config(&file),
        ConfigAction::Paths => show_paths(),
    }
}

/// Load the effective configuration
///
/// An explicit file must exist; otherwise the first file found on the
/// search path is used, falling back to defaults. `server` replaces the
/// configured base URL.
pub fn resolve(file: Option<&Path>, server: Option<&str>) -> Result<Config> {
    let mut config = match file.map(Path::to_path_buf).or_else(find_config_file) {
        Some(path) => {
            debug!(path = %path.display(), "Loading configuration");
            Config::load(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(server) = server {
        config.authority.base_url = server.to_string();
    }

    config
        .validate()
        .context("Configuration validation failed")?;
    Ok(config)
}

fn show_config(file: Option<&Path>, server: Option<&str>) -> Result<()> {
    let config = resolve(file, server)?;
    let toml_str = config.to_toml().context("Failed to serialize config")?;
    println!("{toml_str}");
    Ok(())
}

fn generate_config(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        println!(
            "{} Config file already exists: {}",
            "!".yellow(),
            output.display()
        );
        println!("Use --force to overwrite it.");
        return Ok(());
    }

    let toml_str = Config::default()
        .to_toml()
        .context("Failed to serialize config")?;

    let content = format!(
        "# extblock configuration\n\
         # Command-line flags and EXTBLOCK_SERVER override these values\n\n\
         {toml_str}"
    );

    std::fs::write(output, content)
        .with_context(|| format!("Failed to write config to {}", output.display()))?;

    info!(path = %output.display(), "Generated config file");
    println!("Configuration file generated: {}", output.display());
    Ok(())
}

fn validate_config(file: &Path) -> Result<()> {
    let config = Config::load(file)
        .with_context(|| format!("Failed to load config from {}", file.display()))?;

    config
        .validate()
        .context("Configuration validation failed")?;

    println!("{} Configuration is valid", "✓".green());
    println!("  Server: {}", config.authority.base_url);
    println!("  Timeout: {}s", config.authority.timeout_secs);
    println!("  Log level: {}", config.logging.level);
    Ok(())
}

fn show_paths() -> Result<()> {
    println!("Configuration file search paths:");
    println!();
    println!("  1. --config <FILE>");
    println!("  2. ./{CONFIG_FILE_NAME}");
    if let Some(dirs) = project_dirs() {
        println!("  3. {}", dirs.config_dir().join("config.toml").display());
    }
    println!();
    println!("EXTBLOCK_SERVER or --server overrides authority.base_url");
    Ok(())
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "extblock")
}

fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    project_dirs()
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .filter(|path| path.exists())
}
