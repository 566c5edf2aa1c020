//! Command-line interface for mongoq.
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and CLI overrides
//! - Subcommand handling (completion, config)

pub mod completion;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;

/// Run a single MongoDB operation from the command line
#[derive(Parser, Debug)]
#[command(
    name = "mongoq",
    version,
    about = "One-shot MongoDB operation runner",
    long_about = "Runs a single MongoDB operation given as one shell argument, e.g.\n\
                  mongoq 'users.find({\"active\": true})'"
)]
pub struct CliArgs {
    /// Operation to run, e.g. 'users.find({"active": true})'
    #[arg(value_name = "OPERATION")]
    pub operation: Option<String>,

    /// MongoDB connection URI
    ///
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    #[arg(short = 'u', long, value_name = "URI")]
    pub uri: Option<String>,

    /// Database name to use
    #[arg(short = 'd', long, value_name = "NAME")]
    pub database: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Output format (json, pretty, compact)
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Parse and print the operation without connecting to MongoDB
    #[arg(long)]
    pub dry_run: bool,

    /// Show execution time on stderr
    #[arg(long)]
    pub timing: bool,

    /// Verbose mode (debug logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for mongoq
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Print the effective configuration as TOML
    Config,
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration with CLI overrides applied
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface from the process arguments.
    pub fn new() -> Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    /// Create a CLI interface from pre-parsed arguments.
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let mut config = Config::load(args.config_file.as_deref())?;
        Self::apply_args_to_config(&mut config, &args)?;
        Ok(Self { args, config })
    }

    /// Apply CLI arguments over the loaded configuration.
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) -> Result<()> {
        if let Some(ref format) = args.format {
            config.display.format = format.parse()?;
        }
        if args.no_color {
            config.display.color_output = false;
        }
        if args.timing {
            config.display.show_timing = true;
        }
        Ok(())
    }

    /// Parsed command-line arguments.
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Effective configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The operation string, when one was given.
    pub fn operation(&self) -> Option<&str> {
        self.args.operation.as_deref()
    }

    /// The connection URI: CLI argument, else configured default.
    pub fn connection_uri(&self) -> String {
        self.args
            .uri
            .clone()
            .unwrap_or_else(|| self.config.connection.default_uri.clone())
    }

    /// The database name: CLI argument, else configured default.
    pub fn database(&self) -> String {
        self.args
            .database
            .clone()
            .unwrap_or_else(|| self.config.connection.default_database.clone())
    }

    /// Handle subcommands; returns `true` when one was handled and the
    /// process should exit.
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Completion { shell }) => {
                completion::generate_completion(shell)?;
                Ok(true)
            }
            Some(Commands::Config) => {
                let rendered = toml::to_string_pretty(&self.config)
                    .map_err(|e| crate::error::MongoqError::Generic(e.to_string()))?;
                print!("{rendered}");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    fn parse(argv: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parse_operation_argument() {
        let args = parse(&["mongoq", "users.find()"]);
        assert_eq!(args.operation.as_deref(), Some("users.find()"));
        assert!(!args.dry_run);
    }

    #[test]
    fn test_parse_flags() {
        let args = parse(&[
            "mongoq",
            "-u",
            "mongodb://db:27017",
            "-d",
            "prod",
            "--dry-run",
            "--no-color",
            "users.drop()",
        ]);
        assert_eq!(args.uri.as_deref(), Some("mongodb://db:27017"));
        assert_eq!(args.database.as_deref(), Some("prod"));
        assert!(args.dry_run);
        assert!(args.no_color);
    }

    #[test]
    fn test_format_override() {
        let args = parse(&["mongoq", "-f", "compact", "users.find()"]);
        let cli = CliInterface::from_args(args).unwrap();
        assert_eq!(cli.config().display.format, OutputFormat::Compact);
    }

    #[test]
    fn test_invalid_format_rejected() {
        let args = parse(&["mongoq", "-f", "table", "users.find()"]);
        assert!(CliInterface::from_args(args).is_err());
    }

    #[test]
    fn test_uri_and_database_defaults() {
        let args = parse(&["mongoq", "users.find()"]);
        let cli = CliInterface::from_args(args).unwrap();
        assert!(cli.connection_uri().starts_with("mongodb://"));
        assert!(!cli.database().is_empty());
    }

    #[test]
    fn test_completion_subcommand_parses() {
        let args = parse(&["mongoq", "completion", "bash"]);
        assert!(matches!(args.command, Some(Commands::Completion { .. })));
    }
}
