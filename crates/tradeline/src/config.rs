//! Project configuration (`tradeline.yaml`).

use crate::domain::{LeagueId, RosterId, Round};
use crate::error::{Error, Result};
use crate::lineage::subgraph::clamp_depth;
use crate::ownership::DEFAULT_ROUNDS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "tradeline.yaml";

/// Default league snapshot file, relative to the config file
pub const DEFAULT_SNAPSHOT_FILE: &str = "league.json";

/// Default manual trade ledger, relative to the config file
pub const DEFAULT_LEDGER_FILE: &str = "trades.jsonl";

/// Default lineage traversal depth
pub const DEFAULT_DEPTH: usize = 3;

/// Largest accepted `default-rounds`
pub const MAX_ROUNDS: Round = 10;

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct TradelineConfig {
    /// League id on the platform
    pub league_id: String,

    /// Rounds per draft when the platform does not report a draft
    #[serde(default = "default_rounds")]
    pub default_rounds: Round,

    /// League snapshot (JSON)
    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: PathBuf,

    /// Manual trade ledger (JSON Lines)
    #[serde(default = "default_ledger_file")]
    pub ledger_file: PathBuf,

    /// Extra team names used in the ledger, by roster id
    #[serde(default)]
    pub team_aliases: BTreeMap<String, RosterId>,

    /// Lineage depth when none is given
    #[serde(default = "default_depth")]
    pub default_depth: usize,
}

fn default_rounds() -> Round {
    DEFAULT_ROUNDS
}

fn default_snapshot_file() -> PathBuf {
    PathBuf::from(DEFAULT_SNAPSHOT_FILE)
}

fn default_ledger_file() -> PathBuf {
    PathBuf::from(DEFAULT_LEDGER_FILE)
}

fn default_depth() -> usize {
    DEFAULT_DEPTH
}

impl TradelineConfig {
    /// Create a configuration for `league_id` with every other field defaulted
    pub fn new(league_id: impl Into<String>) -> Self {
        Self {
            league_id: league_id.into(),
            default_rounds: default_rounds(),
            snapshot_file: default_snapshot_file(),
            ledger_file: default_ledger_file(),
            team_aliases: BTreeMap::new(),
            default_depth: default_depth(),
        }
    }

    /// Load and validate configuration from a file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            Error::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {}", e)))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Check field values.
    ///
    /// Rejects an empty league id and a round count outside `1..=MAX_ROUNDS`.
    /// The depth is not checked; it is clamped where it is used.
    pub fn validate(&self) -> Result<()> {
        if self.league_id.trim().is_empty() {
            return Err(Error::Config("league-id must not be empty".to_string()));
        }

        if !(1..=MAX_ROUNDS).contains(&self.default_rounds) {
            return Err(Error::Config(format!(
                "default-rounds must be between 1 and {}, got {}",
                MAX_ROUNDS, self.default_rounds
            )));
        }

        Ok(())
    }

    /// League id as a typed identifier
    pub fn league(&self) -> LeagueId {
        LeagueId::new(self.league_id.trim())
    }

    /// Configured default depth, clamped to the accepted range
    pub fn depth(&self) -> usize {
        clamp_depth(self.default_depth)
    }

    /// Snapshot path, resolved against the config file's directory
    pub fn snapshot_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.snapshot_file)
    }

    /// Ledger path, resolved against the config file's directory
    pub fn ledger_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.ledger_file)
    }
}
