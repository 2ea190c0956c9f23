//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::commands::Command;

/// extblock - file-extension blocklist admin
///
/// Manage the fixed and custom extension rules that decide which uploads
/// the server rejects, and check file names against the live blocklist.
#[derive(Parser, Debug)]
#[command(name = "extblock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Blocklist server base URL (overrides the config file)
    #[arg(short = 's', long, value_name = "URL", env = "EXTBLOCK_SERVER", global = true)]
    pub server: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format for logs
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    /// Log file path
    #[arg(long, value_name = "FILE", global = true)]
    pub log_file: Option<String>,

    /// Run in quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// Compact format
    Compact,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{fixed::FixedCommands, Command};

    #[test]
    fn test_verbose() {
        let args = Args::parse_from(["extblock", "-v", "status"]);
        assert_eq!(args.verbose, 1);

        let args = Args::parse_from(["extblock", "status", "-vvv"]);
        assert_eq!(args.verbose, 3);
    }

    #[test]
    fn test_server_override() {
        let args = Args::parse_from(["extblock", "--server", "http://10.0.0.5:8080", "status"]);
        assert_eq!(args.server.as_deref(), Some("http://10.0.0.5:8080"));
    }

    #[test]
    fn test_fixed_block_parses() {
        let args = Args::parse_from(["extblock", "fixed", "block", "EXE"]);
        match args.command {
            Command::Fixed(fixed) => match fixed.command {
                FixedCommands::Block { extension } => assert_eq!(extension, "EXE"),
                other => panic!("Unexpected command: {other:?}"),
            },
            other => panic!("Unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_log_format() {
        let args = Args::parse_from(["extblock", "--log-format", "json", "status"]);
        assert_eq!(args.log_format, Some(LogFormat::Json));

        let args = Args::parse_from(["extblock", "status"]);
        assert_eq!(args.log_format, None);
    }
}
