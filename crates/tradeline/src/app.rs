//! Application context for CLI command execution.
//!
//! `App` loads the configuration, the league snapshot and the manual trade
//! ledger once, and hands out resolvers that share a single draft context
//! cache for the life of the process.
//!
//! # Example
//!
//! ```no_run
//! use tradeline::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_config_file(Path::new("tradeline.yaml")).await?;
//!     let owners = app.ownership_resolver().resolve(2026).await;
//!     println!("{} slots", owners.len());
//!     Ok(())
//! }
//! ```

use crate::became::cache::DraftContextCache;
use crate::became::BecameResolver;
use crate::config::TradelineConfig;
use crate::domain::{Asset, Season, TradeRecord};
use crate::error::{Error, Result};
use crate::lineage::{build_graph_with, LineageGraph};
use crate::ownership::OwnershipResolver;
use crate::providers::ledger::{JsonlTradeLedger, LedgerWarning};
use crate::providers::snapshot::SnapshotProvider;
use crate::providers::{ChainedTradeStore, Collaborators, ManualTradeStore};
use crate::teams::TeamIndex;
use futures::future::join_all;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Application context for CLI operations.
pub struct App {
    config: TradelineConfig,
    base_dir: PathBuf,
    collaborators: Collaborators,
    cache: Arc<DraftContextCache>,
    ledger_warnings: Vec<LedgerWarning>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("league", &self.config.league_id)
            .field("base_dir", &self.base_dir)
            .field("ledger_warnings", &self.ledger_warnings.len())
            .field("collaborators", &"<dyn providers>")
            .finish()
    }
}

impl App {
    /// Create an App from a configuration file.
    ///
    /// The snapshot and ledger paths in the configuration are resolved
    /// against the directory holding the configuration file. Ledger trades
    /// take precedence over trades embedded in the snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration cannot be loaded or is invalid
    /// - The snapshot cannot be loaded, or belongs to another league
    /// - The ledger exists but cannot be read
    pub async fn from_config_file(config_path: &Path) -> Result<Self> {
        let config = TradelineConfig::load(config_path).await?;
        let base_dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let snapshot = SnapshotProvider::load(&config.snapshot_path(&base_dir)).await?;
        if snapshot.snapshot().league_id != config.league() {
            return Err(Error::Config(format!(
                "snapshot is for league {}, but league-id is {}",
                snapshot.snapshot().league_id,
                config.league()
            )));
        }

        let (ledger, ledger_warnings) = JsonlTradeLedger::load(&config.ledger_path(&base_dir)).await?;
        tracing::debug!(
            trades = ledger.records().len(),
            warnings = ledger_warnings.len(),
            "Loaded trade ledger"
        );

        let snapshot = Arc::new(snapshot);
        let stores: Vec<Arc<dyn ManualTradeStore>> = vec![Arc::new(ledger), snapshot.clone()];
        let collaborators = Collaborators {
            rosters: snapshot.clone(),
            drafts: snapshot.clone(),
            traded_picks: snapshot.clone(),
            players: snapshot,
            manual_trades: Arc::new(ChainedTradeStore::new(stores)),
        };

        let mut app = Self::new(config, collaborators);
        app.base_dir = base_dir;
        app.ledger_warnings = ledger_warnings;
        Ok(app)
    }

    /// Create an App over already-built collaborators.
    pub fn new(config: TradelineConfig, collaborators: Collaborators) -> Self {
        Self {
            config,
            base_dir: PathBuf::new(),
            collaborators,
            cache: Arc::new(DraftContextCache::new()),
            ledger_warnings: Vec::new(),
        }
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &TradelineConfig {
        &self.config
    }

    /// Get the directory configuration paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Problems found while loading the ledger.
    pub fn ledger_warnings(&self) -> &[LedgerWarning] {
        &self.ledger_warnings
    }

    /// Get the shared draft context cache.
    pub fn draft_cache(&self) -> &Arc<DraftContextCache> {
        &self.cache
    }

    /// An ownership resolver for the configured league.
    pub fn ownership_resolver(&self) -> OwnershipResolver {
        OwnershipResolver::new(self.config.league(), self.collaborators.clone())
            .with_aliases(self.config.team_aliases.clone())
            .with_default_rounds(self.config.default_rounds)
    }

    /// A became resolver sharing this App's draft cache.
    pub fn became_resolver(&self) -> BecameResolver {
        BecameResolver::new(
            self.config.league(),
            self.collaborators.clone(),
            Arc::clone(&self.cache),
        )
    }

    /// Team names for `season`, empty if rosters are unavailable.
    pub async fn team_index(&self, season: Season) -> TeamIndex {
        let rosters = match self
            .collaborators
            .rosters
            .rosters(&self.config.league(), season)
            .await
        {
            Ok(rosters) => rosters,
            Err(e) => {
                tracing::warn!(season, error = %e, "Rosters unavailable");
                Vec::new()
            }
        };
        TeamIndex::new(&rosters, &self.config.team_aliases)
    }

    /// Every manual trade, ledger first.
    pub async fn trades(&self) -> Result<Vec<TradeRecord>> {
        self.collaborators.manual_trades.trades().await
    }

    /// Lineage graph over every manual trade.
    ///
    /// Pick origins are named by the roster they resolve to, so a team
    /// written under an alias or an owner id shares pick nodes with its
    /// display name. A name is looked up in the pick's own season first,
    /// then in the other indexed seasons, newest first.
    pub async fn lineage_graph(&self) -> Result<LineageGraph> {
        let trades = self.trades().await?;

        let seasons: BTreeSet<Season> = trades
            .iter()
            .flat_map(|t| &t.teams)
            .flat_map(|team| &team.assets)
            .filter_map(|asset| match asset {
                Asset::Pick(pick) => pick.season,
                _ => None,
            })
            .collect();
        let indexes = join_all(seasons.iter().map(|&season| self.team_index(season))).await;
        let indexes: BTreeMap<Season, TeamIndex> = seasons.into_iter().zip(indexes).collect();

        Ok(build_graph_with(&trades, |season, name| {
            let canonical = |index: &TeamIndex| index.resolve(name).map(|r| index.name_of(r));
            indexes
                .get(&season)
                .and_then(canonical)
                .or_else(|| indexes.values().rev().find_map(canonical))
        }))
    }
}
