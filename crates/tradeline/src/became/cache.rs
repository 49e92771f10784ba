//! Per-(league, season) draft context memoization.
//!
//! A completed draft never changes, so contexts of finished drafts are cached
//! for the life of the cache object and never invalidated. The cache is owned by whoever
//! builds the resolver (usually the application context) and shared through
//! an `Arc`, so every test can start from an empty one.
//!
//! Concurrent lookups of the same uncached key each fetch and insert; the
//! last insert wins. Both inserts carry identical data.

use crate::domain::{DraftMeta, DraftPickEvent, LeagueId, RosterId, Round, Season};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Everything about a season's draft the became resolver needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftContext {
    /// Platform draft id
    pub draft_id: String,

    /// Number of rounds
    pub rounds: Round,

    /// Draft slot by roster (empty if the platform did not report it)
    pub roster_to_slot: HashMap<RosterId, u8>,

    /// Roster by draft slot (empty if the platform did not report it)
    pub slot_to_roster: HashMap<u8, RosterId>,

    /// Every pick event of the draft
    pub picks: Vec<DraftPickEvent>,

    /// Number of rosters in the league that season
    pub roster_count: usize,
}

impl DraftContext {
    /// Assemble a context from draft metadata, its picks and the roster count.
    pub fn new(meta: DraftMeta, picks: Vec<DraftPickEvent>, roster_count: usize) -> Self {
        Self {
            draft_id: meta.draft_id,
            rounds: meta.rounds,
            roster_to_slot: meta.roster_to_slot.unwrap_or_default(),
            slot_to_roster: meta.slot_to_roster.unwrap_or_default(),
            picks,
            roster_count,
        }
    }

    /// The pick event at (`round`, `slot`), if recorded.
    pub fn pick_at(&self, round: Round, slot: u8) -> Option<&DraftPickEvent> {
        self.picks
            .iter()
            .find(|p| p.round == round && p.slot == slot)
    }

    /// Whether every pick of every round has been made.
    ///
    /// Only a finished draft is safe to cache; one still running would hide
    /// later selections.
    pub fn is_complete(&self) -> bool {
        let expected = usize::from(self.rounds) * self.roster_count;
        expected > 0 && self.picks.iter().filter(|p| p.player_id.is_some()).count() >= expected
    }

    /// Best guess at the roster count when the roster list is unavailable:
    /// the widest of the slot maps and the highest slot seen in the picks.
    pub fn inferred_roster_count(&self) -> usize {
        let max_slot = self.picks.iter().map(|p| usize::from(p.slot)).max().unwrap_or(0);
        self.roster_to_slot
            .len()
            .max(self.slot_to_roster.len())
            .max(max_slot)
    }
}

type CacheKey = (LeagueId, Season);

/// Process-lifetime cache of [`DraftContext`]s.
#[derive(Debug, Default)]
pub struct DraftContextCache {
    entries: RwLock<HashMap<CacheKey, Arc<DraftContext>>>,
}

impl DraftContextCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached context for `league` and `season`.
    pub async fn get(&self, league: &LeagueId, season: Season) -> Option<Arc<DraftContext>> {
        self.entries
            .read()
            .await
            .get(&(league.clone(), season))
            .cloned()
    }

    /// Store a context, returning the shared handle.
    pub async fn insert(
        &self,
        league: &LeagueId,
        season: Season,
        context: DraftContext,
    ) -> Arc<DraftContext> {
        let context = Arc::new(context);
        self.entries
            .write()
            .await
            .insert((league.clone(), season), Arc::clone(&context));
        context
    }

    /// Number of cached contexts.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether nothing has been cached yet.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
