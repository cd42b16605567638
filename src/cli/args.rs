//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `find`: scan the snapshot for assets that use a component type
//! - `types`: list searchable component types, optionally filtered
//! - `init`: initialize a findcomp configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Find(cmd)) => cmd.common.verbose,
            Some(Command::Types(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Path to the project snapshot file (overrides config file)
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Restrict the scan to assets under this root (overrides config file)
    /// Can be specified multiple times: --root Assets --root Packages
    #[arg(long = "root")]
    pub roots: Vec<String>,

    /// Document kinds to scan (overrides config file)
    /// Can be specified multiple times: --kind prefab --kind scene
    #[arg(long = "kind")]
    pub kinds: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct FindCommand {
    /// Display label of the component type, e.g. `Game.Enemies.EnemyHealth`
    pub label: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct TypesCommand {
    /// Case-sensitive substring filter on the bare type name
    pub query: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find assets whose dependency closure includes the type's defining script
    Find(FindCommand),
    /// List searchable component types from the snapshot
    Types(TypesCommand),
    /// Initialize a new .findcomprc.json configuration file
    Init,
}
