//! Resolving which player a draft pick became.
//!
//! Given a season, a round and the roster a pick originally belonged to, the
//! resolver finds that roster's draft slot, the pick made at (round, slot),
//! and the player selected there.
//!
//! # Pick numbering
//!
//! A pick carries two different positions:
//!
//! - the **draft slot**, the fixed 1..N order assigned to the roster
//! - the **pick in round**, the sequential position the pick actually
//!   occupied during the draft
//!
//! In a snake draft these diverge on every even round (slot 4 of 12 picks
//! 9th in round 2). The in-round position is always derived from the overall
//! pick number, never from the slot.
//!
//! # Failure semantics
//!
//! Every unanswerable question comes back as `None`: no draft for the season,
//! no strategy finds the slot, the round has not been drafted yet, or the
//! draft could not be fetched.

pub mod cache;
pub mod slot;

use crate::domain::{LeagueId, PlayerRef, RosterId, Round, Season};
use crate::providers::Collaborators;
use cache::{DraftContext, DraftContextCache};
use serde::Serialize;
use std::sync::Arc;

/// The player a pick became, and where the pick fell in the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPick {
    /// Player selected
    pub player: PlayerRef,

    /// Draft season
    pub season: Season,

    /// Draft round
    pub round: Round,

    /// Draft slot of the original roster
    pub draft_slot: u8,

    /// Position within the round at which the pick was made
    pub pick_in_round: u16,

    /// Overall pick number
    pub overall_pick: u16,
}

/// Position of an overall pick within its round.
///
/// Returns `None` for an empty league or a zero pick number.
pub fn pick_in_round(overall_pick: u16, roster_count: usize) -> Option<u16> {
    if overall_pick == 0 || roster_count == 0 {
        return None;
    }
    let count = u16::try_from(roster_count).ok()?;
    Some((overall_pick - 1) % count + 1)
}

/// Resolves picks to drafted players for one league.
#[derive(Debug, Clone)]
pub struct BecameResolver {
    league: LeagueId,
    collaborators: Collaborators,
    cache: Arc<DraftContextCache>,
}

impl BecameResolver {
    /// Create a resolver sharing `cache` with any other resolver of the process.
    pub fn new(league: LeagueId, collaborators: Collaborators, cache: Arc<DraftContextCache>) -> Self {
        Self {
            league,
            collaborators,
            cache,
        }
    }

    /// The player selected with `original_roster`'s pick in `round` of `season`.
    pub async fn resolve(
        &self,
        season: Season,
        round: Round,
        original_roster: RosterId,
    ) -> Option<ResolvedPick> {
        let ctx = self.draft_context(season).await?;
        let draft_slot = slot::resolve_slot(&ctx, original_roster)?;
        let event = ctx.pick_at(round, draft_slot)?;
        let player_id = event.player_id.clone()?;
        let pick_in_round = pick_in_round(event.overall_pick, ctx.roster_count)?;

        let player = match self.collaborators.players.player(&player_id).await {
            Ok(Some(info)) => PlayerRef::from_info(player_id, info),
            Ok(None) => PlayerRef::bare(player_id),
            Err(e) => {
                tracing::warn!(player = %player_id, error = %e, "Player directory unavailable");
                PlayerRef::bare(player_id)
            }
        };

        Some(ResolvedPick {
            player,
            season,
            round,
            draft_slot,
            pick_in_round,
            overall_pick: event.overall_pick,
        })
    }

    /// Resolve a batch of `(season, round, original_roster)` requests concurrently.
    ///
    /// Results are returned in request order.
    pub async fn resolve_all(
        &self,
        requests: &[(Season, Round, RosterId)],
    ) -> Vec<Option<ResolvedPick>> {
        futures::future::join_all(
            requests
                .iter()
                .map(|&(season, round, roster)| self.resolve(season, round, roster)),
        )
        .await
    }

    /// Cached draft context for `season`, fetching it on a miss.
    ///
    /// A season without a draft is not cached, so a draft created later is
    /// picked up. A context built without the roster list, or for a draft
    /// with selections still to make, is returned but not cached either.
    async fn draft_context(&self, season: Season) -> Option<Arc<DraftContext>> {
        if let Some(ctx) = self.cache.get(&self.league, season).await {
            tracing::trace!(league = %self.league, season, "Draft context cache hit");
            return Some(ctx);
        }

        let c = &self.collaborators;
        let (meta, rosters) = futures::join!(
            c.drafts.draft(&self.league, season),
            c.rosters.rosters(&self.league, season),
        );

        let meta = match meta {
            Ok(Some(meta)) => meta,
            Ok(None) => {
                tracing::debug!(league = %self.league, season, "No draft for season");
                return None;
            }
            Err(e) => {
                tracing::warn!(league = %self.league, season, error = %e, "Draft metadata unavailable");
                return None;
            }
        };

        let picks = match c.drafts.draft_picks(&meta.draft_id).await {
            Ok(picks) => picks,
            Err(e) => {
                tracing::warn!(draft = %meta.draft_id, error = %e, "Draft picks unavailable");
                return None;
            }
        };

        let mut ctx = DraftContext::new(meta, picks, 0);
        let rosters = rosters.unwrap_or_else(|e| {
            tracing::warn!(league = %self.league, season, error = %e, "Rosters unavailable, inferring count");
            Vec::new()
        });
        if rosters.is_empty() {
            ctx.roster_count = ctx.inferred_roster_count();
            return Some(Arc::new(ctx));
        }

        ctx.roster_count = rosters.len();
        if !ctx.is_complete() {
            tracing::debug!(league = %self.league, season, draft = %ctx.draft_id, "Draft not finished, context not cached");
            return Some(Arc::new(ctx));
        }
        tracing::debug!(league = %self.league, season, draft = %ctx.draft_id, "Caching draft context");
        Some(self.cache.insert(&self.league, season, ctx).await)
    }
}
