//! Command-line interface for wordbench
//!
//! This module provides the main CLI structure and command handling.
//! It uses clap for argument parsing and dispatches to one module per command.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

pub mod commands;
pub mod output;

pub use output::Output;

use commands::run::RunArgs;

/// wordbench - serial vs multi-threaded vs GPU word counting
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable quiet output (minimal)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the benchmark over a text file
    Run(RunArgs),
    /// List available compute devices
    Devices,
    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Show version information
    Version,
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the merged configuration
    Show,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        // Initialize output handler with global verbose and quiet settings
        let output = Output::new(self.verbose, self.quiet);
        let config_path = self.config.as_deref();

        match self.command {
            Some(Commands::Run(args)) => commands::run::execute(args, config_path, &output).await,
            Some(Commands::Devices) => commands::devices::execute(&output).await,
            Some(Commands::Config(cmd)) => commands::config::execute(cmd, config_path, &output).await,
            Some(Commands::Version) => commands::version::execute(&output).await,
            None => {
                // Show help when no command is provided
                let mut cmd = Cli::command();
                cmd.print_help()?;
                Ok(())
            }
        }
    }
}
