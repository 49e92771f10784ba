//! Collaborator interfaces consumed by the resolvers.
//!
//! The resolvers never talk to the league platform directly. Everything they
//! need arrives through these traits, so a live API client, a JSON snapshot
//! or a test double can stand behind them interchangeably.
//!
//! # Architecture
//!
//! Each trait is async and object-safe, allowing resolvers to hold
//! `Arc<dyn Trait>` handles. Implementations must be `Send + Sync` since a
//! single resolver call fans out several fetches concurrently.
//!
//! Two adapters ship with the crate:
//!
//! - [`snapshot::SnapshotProvider`]: a JSON league snapshot implementing every
//!   platform trait (and [`ManualTradeStore`] for inline trades)
//! - [`ledger::JsonlTradeLedger`]: the manual trade ledger as JSON Lines
//!
//! # Error Handling
//!
//! Implementations report fetch failures as [`crate::error::Error::Upstream`].
//! Callers in this crate treat any error as "data unavailable" and degrade.

use crate::domain::{
    DraftMeta, DraftPickEvent, LeagueId, PlayerId, PlayerInfo, Roster, Season, TradeRecord,
    TradedPick,
};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

pub mod ledger;
pub mod snapshot;

use snapshot::SnapshotProvider;

/// Source of per-season roster lists.
#[async_trait]
pub trait RosterProvider: Send + Sync {
    /// All rosters of a league in a season.
    async fn rosters(&self, league: &LeagueId, season: Season) -> Result<Vec<Roster>>;
}

/// Source of draft metadata and pick events.
#[async_trait]
pub trait DraftProvider: Send + Sync {
    /// Draft metadata for a season, or `None` if no draft exists yet.
    async fn draft(&self, league: &LeagueId, season: Season) -> Result<Option<DraftMeta>>;

    /// Every pick event recorded for a draft, made or not.
    async fn draft_picks(&self, draft_id: &str) -> Result<Vec<DraftPickEvent>>;
}

/// Source of platform-reported pick ownership.
#[async_trait]
pub trait TradedPickProvider: Send + Sync {
    /// Picks whose ownership differs from their origin, across all seasons.
    async fn traded_picks(&self, league: &LeagueId) -> Result<Vec<TradedPick>>;
}

/// Player lookup.
#[async_trait]
pub trait PlayerDirectory: Send + Sync {
    /// Directory entry for a player, or `None` if unknown.
    async fn player(&self, player_id: &PlayerId) -> Result<Option<PlayerInfo>>;
}

/// Source of manually curated trades.
#[async_trait]
pub trait ManualTradeStore: Send + Sync {
    /// Every trade in the ledger, in ledger order.
    async fn trades(&self) -> Result<Vec<TradeRecord>>;
}

/// Handles to every collaborator a resolver may need.
#[derive(Clone)]
pub struct Collaborators {
    /// Roster lists
    pub rosters: Arc<dyn RosterProvider>,
    /// Draft metadata and picks
    pub drafts: Arc<dyn DraftProvider>,
    /// Platform-reported pick ownership
    pub traded_picks: Arc<dyn TradedPickProvider>,
    /// Player directory
    pub players: Arc<dyn PlayerDirectory>,
    /// Manual trade ledger
    pub manual_trades: Arc<dyn ManualTradeStore>,
}

impl Collaborators {
    /// Serve every collaborator, manual trades included, from one snapshot.
    pub fn from_snapshot(snapshot: SnapshotProvider) -> Self {
        let snapshot = Arc::new(snapshot);
        Self {
            rosters: snapshot.clone(),
            drafts: snapshot.clone(),
            traded_picks: snapshot.clone(),
            players: snapshot.clone(),
            manual_trades: snapshot,
        }
    }

    /// Replace the manual trade source.
    #[must_use]
    pub fn with_manual_trades(mut self, store: Arc<dyn ManualTradeStore>) -> Self {
        self.manual_trades = store;
        self
    }
}

/// Manual trades gathered from several stores.
///
/// Stores are queried concurrently and their trades concatenated in store
/// order. When two stores hold the same trade id, the earlier store wins.
pub struct ChainedTradeStore {
    stores: Vec<Arc<dyn ManualTradeStore>>,
}

impl ChainedTradeStore {
    /// Chain `stores`, highest precedence first.
    pub fn new(stores: Vec<Arc<dyn ManualTradeStore>>) -> Self {
        Self { stores }
    }
}

#[async_trait]
impl ManualTradeStore for ChainedTradeStore {
    async fn trades(&self) -> Result<Vec<TradeRecord>> {
        let results = futures::future::join_all(self.stores.iter().map(|s| s.trades())).await;

        let mut seen = HashSet::new();
        let mut trades = Vec::new();
        for result in results {
            for trade in result? {
                if seen.insert(trade.id.clone()) {
                    trades.push(trade);
                } else {
                    tracing::debug!(trade = %trade.id, "Ignoring trade already supplied by another store");
                }
            }
        }
        Ok(trades)
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
