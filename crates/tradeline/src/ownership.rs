//! Draft pick ownership resolution.
//!
//! Ownership of a season's picks is rebuilt on every query from three layers,
//! applied in order:
//!
//! 1. **Identity**: every roster owns its own pick in every round.
//! 2. **Platform snapshot**: pick ownership as reported by the league
//!    platform overwrites the owner without adding history.
//! 3. **Manual ledger**: completed manual trades are replayed in date order,
//!    each moving a slot to the receiving team and appending a
//!    [`TransferEvent`].
//!
//! Because the ledger is replayed last, a manual trade wins over the platform
//! for the same slot.
//!
//! Bad ledger entries (unknown team names, missing round or year) are skipped
//! one asset at a time; the rest of the batch still applies.

use crate::domain::{
    Asset, DraftPickAsset, LeagueId, OwnershipMap, Roster, RosterId, Round, Season, SlotKey,
    SlotOwnership, TradeRecord, TradedPick, TransferEvent,
};
use crate::providers::Collaborators;
use crate::teams::TeamIndex;
use std::collections::BTreeMap;

/// Rounds assumed when the season has no draft metadata yet.
pub const DEFAULT_ROUNDS: Round = 4;

/// Build the identity map: each roster owns its own pick in rounds `1..=rounds`.
pub fn seed_identity(rosters: &[Roster], rounds: Round) -> OwnershipMap {
    rosters
        .iter()
        .flat_map(|roster| {
            (1..=rounds).map(move |round| {
                (
                    SlotKey::new(roster.id, round),
                    SlotOwnership {
                        owner: roster.id,
                        history: Vec::new(),
                    },
                )
            })
        })
        .collect()
}

/// Overwrite owners with platform-reported ownership for `season`.
///
/// Records for other seasons, or for slots outside the map, are ignored.
pub fn apply_platform_picks(map: &mut OwnershipMap, season: Season, picks: &[TradedPick]) {
    for pick in picks.iter().filter(|p| p.season == season) {
        let key = SlotKey::new(pick.origin_roster, pick.round);
        match map.get_mut(&key) {
            Some(slot) => slot.owner = pick.owner_roster,
            None => {
                tracing::debug!(slot = %key, season, "Platform pick outside known slots, skipping");
            }
        }
    }
}

/// Why a pick asset in a manual trade was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    OtherSeason,
    MissingRound,
    UnknownOrigin,
    UnknownReceiver,
    UnknownSlot,
}

/// Resolve the slot a manual pick asset refers to, for the target season.
fn pick_slot(
    pick: &DraftPickAsset,
    season: Season,
    teams: &TeamIndex,
) -> Result<SlotKey, Skip> {
    if pick.season != Some(season) {
        return Err(Skip::OtherSeason);
    }
    let round = pick.round.filter(|r| *r > 0).ok_or(Skip::MissingRound)?;
    let origin = pick
        .original_owner
        .as_deref()
        .and_then(|name| teams.resolve(name))
        .ok_or(Skip::UnknownOrigin)?;
    Ok(SlotKey::new(origin, round))
}

/// Find the slot a pick asset moves and the roster receiving it.
fn locate(
    pick: &DraftPickAsset,
    receiver: &str,
    season: Season,
    teams: &TeamIndex,
    map: &OwnershipMap,
) -> Result<(SlotKey, RosterId), Skip> {
    let key = pick_slot(pick, season, teams)?;
    let to = teams.resolve(receiver).ok_or(Skip::UnknownReceiver)?;
    if !map.contains_key(&key) {
        return Err(Skip::UnknownSlot);
    }
    Ok((key, to))
}

/// Replay completed manual trades for `season` on top of `map`.
///
/// Trades are applied in ascending date order, ties broken by trade id so the
/// replay is deterministic. Returns the number of transfers applied.
pub fn apply_manual_trades(
    map: &mut OwnershipMap,
    season: Season,
    trades: &[TradeRecord],
    teams: &TeamIndex,
) -> usize {
    let mut ordered: Vec<&TradeRecord> = trades.iter().filter(|t| t.is_completed()).collect();
    ordered.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

    let mut applied = 0;
    for trade in ordered {
        for team in &trade.teams {
            for asset in &team.assets {
                let Asset::Pick(pick) = asset else {
                    continue;
                };

                let (key, to) = match locate(pick, &team.name, season, teams, map) {
                    Ok(found) => found,
                    Err(Skip::OtherSeason) => continue,
                    Err(reason) => {
                        tracing::debug!(
                            trade = %trade.id,
                            team = %team.name,
                            ?reason,
                            "Skipping pick asset in manual trade"
                        );
                        continue;
                    }
                };
                let Some(slot) = map.get_mut(&key) else {
                    continue;
                };

                let from = slot.owner;
                slot.owner = to;
                slot.history.push(TransferEvent {
                    trade_id: trade.id.clone(),
                    timestamp: trade.date,
                    from_roster: from,
                    to_roster: to,
                    from_team: teams.name_of(from),
                    to_team: teams.name_of(to),
                });
                applied += 1;
                tracing::trace!(trade = %trade.id, slot = %key, %from, %to, "Applied transfer");
            }
        }
    }
    applied
}

/// Resolve ownership of every slot in `season` from already-fetched inputs.
///
/// This is the pure core of [`OwnershipResolver::resolve`].
pub fn resolve_ownership(
    season: Season,
    rosters: &[Roster],
    rounds: Round,
    platform_picks: &[TradedPick],
    manual_trades: &[TradeRecord],
    teams: &TeamIndex,
) -> OwnershipMap {
    let mut map = seed_identity(rosters, rounds);
    apply_platform_picks(&mut map, season, platform_picks);
    apply_manual_trades(&mut map, season, manual_trades, teams);
    map
}

/// Slots currently owned by `roster`, in slot order.
pub fn owned_by(map: &OwnershipMap, roster: RosterId) -> Vec<(SlotKey, &SlotOwnership)> {
    map.iter()
        .filter(|(_, slot)| slot.owner == roster)
        .map(|(key, slot)| (*key, slot))
        .collect()
}

/// Fetches collaborator data and resolves pick ownership for a league.
#[derive(Debug, Clone)]
pub struct OwnershipResolver {
    league: LeagueId,
    collaborators: Collaborators,
    aliases: BTreeMap<String, RosterId>,
    default_rounds: Round,
}

impl OwnershipResolver {
    /// Create a resolver for `league`.
    pub fn new(league: LeagueId, collaborators: Collaborators) -> Self {
        Self {
            league,
            collaborators,
            aliases: BTreeMap::new(),
            default_rounds: DEFAULT_ROUNDS,
        }
    }

    /// Extra team names accepted in the manual ledger.
    #[must_use]
    pub fn with_aliases(mut self, aliases: BTreeMap<String, RosterId>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Rounds to seed when the season has no draft metadata.
    #[must_use]
    pub fn with_default_rounds(mut self, rounds: Round) -> Self {
        self.default_rounds = rounds;
        self
    }

    /// Resolve ownership of every slot in `season`.
    ///
    /// Rosters, draft metadata, platform picks and manual trades are fetched
    /// concurrently. This never fails:
    ///
    /// - without rosters there are no slots, so the map is empty
    /// - if platform picks or manual trades are unavailable, only the
    ///   identity base case is returned
    /// - without draft metadata the configured default round count is used
    pub async fn resolve(&self, season: Season) -> OwnershipMap {
        let c = &self.collaborators;
        let (rosters, draft, platform, manual) = futures::join!(
            c.rosters.rosters(&self.league, season),
            c.drafts.draft(&self.league, season),
            c.traded_picks.traded_picks(&self.league),
            c.manual_trades.trades(),
        );

        let rosters = match rosters {
            Ok(rosters) => rosters,
            Err(e) => {
                tracing::warn!(league = %self.league, season, error = %e, "Rosters unavailable");
                return OwnershipMap::new();
            }
        };

        let rounds = match draft {
            Ok(Some(meta)) if meta.rounds > 0 => meta.rounds,
            Ok(_) => self.default_rounds,
            Err(e) => {
                tracing::warn!(league = %self.league, season, error = %e, "Draft metadata unavailable");
                self.default_rounds
            }
        };

        let (platform, manual) = match (platform, manual) {
            (Ok(platform), Ok(manual)) => (platform, manual),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(
                    league = %self.league,
                    season,
                    error = %e,
                    "Pick data unavailable, falling back to original owners"
                );
                return seed_identity(&rosters, rounds);
            }
        };

        let teams = TeamIndex::new(&rosters, &self.aliases);
        resolve_ownership(season, &rosters, rounds, &platform, &manual, &teams)
    }
}
