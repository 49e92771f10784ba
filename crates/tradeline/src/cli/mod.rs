//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `owners`: Who holds each draft slot of a season
//! - `became`: Which player a pick was used on
//! - `graph`: The full trade lineage graph
//! - `lineage`: The neighborhood of one player, pick or trade
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--config <path>`: Configuration file (default `tradeline.yaml`)
//!
//! # Example
//!
//! ```bash
//! tradeline owners --season 2026
//! tradeline became --season 2025 --round 1 --roster 4
//! tradeline lineage --pick "2026:1:Gridiron Gang" --depth 3
//! ```

mod args;
mod execute;
mod validators;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

pub use args::{BecameArgs, LineageArgs, OwnersArgs, RootArgs};
pub use validators::{parse_pick_selector, validate_id, PickSelector};

/// Tradeline - dynasty league draft pick tracking
///
/// Resolves who holds every draft pick after a chain of trades, which player
/// each pick became, and the trade history connecting them.
#[derive(Parser, Debug)]
#[command(name = "tradeline")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file
    #[arg(long, global = true, default_value = crate::config::CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show who holds each draft slot of a season
    ///
    /// Starts from every roster holding its own picks, applies the platform's
    /// traded-pick records, then replays the manual trade ledger in date order.
    Owners(OwnersArgs),

    /// Show which player a pick became
    ///
    /// Looks up the draft slot of the pick's original roster and the player
    /// selected there.
    Became(BecameArgs),

    /// Show the full trade lineage graph
    Graph,

    /// Show the lineage of a player, pick or trade
    ///
    /// Follows trades and draft selections outward from the chosen asset up
    /// to the given depth.
    Lineage(LineageArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        use crate::app::App;
        use crate::output::{OutputConfig, OutputMode};

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        let Some(command) = &self.command else {
            <Self as CommandFactory>::command().print_help()?;
            return Ok(());
        };

        let app = App::from_config_file(&self.config).await?;
        let config = OutputConfig::from_env();

        match command {
            Commands::Owners(args) => execute::execute_owners(&app, args, output_mode, &config).await,
            Commands::Became(args) => execute::execute_became(&app, args, output_mode, &config).await,
            Commands::Graph => execute::execute_graph(&app, output_mode, &config).await,
            Commands::Lineage(args) => {
                execute::execute_lineage(&app, args, output_mode, &config).await
            }
        }
    }
}
