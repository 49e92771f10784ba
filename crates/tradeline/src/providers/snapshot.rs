//! League snapshot adapter.
//!
//! A snapshot is a single JSON document capturing what the platform reported
//! for a league: rosters, drafts and traded picks per season, plus a player
//! directory. It backs the CLI and the integration tests.
//!
//! ```json
//! {
//!   "league_id": "784",
//!   "seasons": {
//!     "2025": {
//!       "rosters": [{"id": 1, "owner_id": "u1", "team_name": "Gridiron Gang"}],
//!       "draft": {"draft_id": "d25", "season": 2025, "rounds": 4,
//!                 "slot_to_roster": {"1": 1}},
//!       "picks": [{"round": 1, "slot": 1, "overall_pick": 1, "player_id": "P1"}]
//!     }
//!   },
//!   "traded_picks": [],
//!   "players": {"P1": {"name": "Some Rookie", "position": "WR"}}
//! }
//! ```

use super::{DraftProvider, ManualTradeStore, PlayerDirectory, RosterProvider, TradedPickProvider};
use crate::domain::{
    DraftMeta, DraftPickEvent, LeagueId, PlayerId, PlayerInfo, Roster, Season, TradeRecord,
    TradedPick,
};
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Everything the platform reported for one season
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonSnapshot {
    /// Rosters for the season
    #[serde(default)]
    pub rosters: Vec<Roster>,

    /// Draft metadata, if a draft exists
    #[serde(default)]
    pub draft: Option<DraftMeta>,

    /// Pick events of the season's draft
    #[serde(default)]
    pub picks: Vec<DraftPickEvent>,
}

/// A serialized view of one league
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    /// League the snapshot was taken from
    pub league_id: LeagueId,

    /// Per-season data
    #[serde(default)]
    pub seasons: BTreeMap<Season, SeasonSnapshot>,

    /// Platform-reported pick ownership
    #[serde(default)]
    pub traded_picks: Vec<TradedPick>,

    /// Player directory
    #[serde(default)]
    pub players: HashMap<PlayerId, PlayerInfo>,

    /// Manual trades bundled with the snapshot
    #[serde(default)]
    pub trades: Vec<TradeRecord>,
}

/// Serves a [`LeagueSnapshot`] through the collaborator traits.
#[derive(Debug, Clone)]
pub struct SnapshotProvider {
    snapshot: LeagueSnapshot,
}

impl SnapshotProvider {
    /// Wrap an in-memory snapshot.
    pub fn new(snapshot: LeagueSnapshot) -> Self {
        Self { snapshot }
    }

    /// Load a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Snapshot`] if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::Snapshot {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        let snapshot: LeagueSnapshot =
            serde_json::from_str(&content).map_err(|e| Error::Snapshot {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        tracing::debug!(
            path = %path.display(),
            league = %snapshot.league_id,
            seasons = snapshot.seasons.len(),
            "Loaded league snapshot"
        );
        Ok(Self::new(snapshot))
    }

    /// The wrapped snapshot.
    pub fn snapshot(&self) -> &LeagueSnapshot {
        &self.snapshot
    }

    fn check_league(&self, league: &LeagueId, source_name: &'static str) -> Result<()> {
        if league == &self.snapshot.league_id {
            Ok(())
        } else {
            Err(Error::upstream(
                source_name,
                format!("snapshot holds league {}, not {league}", self.snapshot.league_id),
            ))
        }
    }
}

#[async_trait]
impl RosterProvider for SnapshotProvider {
    async fn rosters(&self, league: &LeagueId, season: Season) -> Result<Vec<Roster>> {
        self.check_league(league, "rosters")?;
        Ok(self
            .snapshot
            .seasons
            .get(&season)
            .map(|s| s.rosters.clone())
            .unwrap_or_default())
    }
}

#[async_trait]
impl DraftProvider for SnapshotProvider {
    async fn draft(&self, league: &LeagueId, season: Season) -> Result<Option<DraftMeta>> {
        self.check_league(league, "draft")?;
        Ok(self
            .snapshot
            .seasons
            .get(&season)
            .and_then(|s| s.draft.clone()))
    }

    async fn draft_picks(&self, draft_id: &str) -> Result<Vec<DraftPickEvent>> {
        let season = self
            .snapshot
            .seasons
            .values()
            .find(|s| s.draft.as_ref().is_some_and(|d| d.draft_id == draft_id));
        match season {
            Some(s) => Ok(s.picks.clone()),
            None => Err(Error::upstream(
                "draft picks",
                format!("unknown draft {draft_id}"),
            )),
        }
    }
}

#[async_trait]
impl TradedPickProvider for SnapshotProvider {
    async fn traded_picks(&self, league: &LeagueId) -> Result<Vec<TradedPick>> {
        self.check_league(league, "traded picks")?;
        Ok(self.snapshot.traded_picks.clone())
    }
}

#[async_trait]
impl PlayerDirectory for SnapshotProvider {
    async fn player(&self, player_id: &PlayerId) -> Result<Option<PlayerInfo>> {
        Ok(self.snapshot.players.get(player_id).cloned())
    }
}

#[async_trait]
impl ManualTradeStore for SnapshotProvider {
    async fn trades(&self) -> Result<Vec<TradeRecord>> {
        Ok(self.snapshot.trades.clone())
    }
}
