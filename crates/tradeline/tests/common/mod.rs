//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tradeline::domain::{
    Asset, DraftMeta, DraftPickAsset, DraftPickEvent, LeagueId, PlayerAsset, PlayerId, PlayerInfo,
    PlayerRef, Roster, RosterId, Round, Season, TradeId, TradeRecord, TradeStatus, TradeTeam,
    TradedPick, parse_trade_date,
};
use tradeline::error::{Error, Result};
use tradeline::providers::ledger::JsonlTradeLedger;
use tradeline::providers::snapshot::{LeagueSnapshot, SeasonSnapshot, SnapshotProvider};
use tradeline::providers::{
    Collaborators, DraftProvider, ManualTradeStore, PlayerDirectory, RosterProvider,
    TradedPickProvider,
};

pub const LEAGUE: &str = "L1";
pub const SEASON: Season = 2025;

pub fn league() -> LeagueId {
    LeagueId::new(LEAGUE)
}

/// Rosters `1..=count`, named "Team 1", "Team 2", ...
pub fn rosters(count: u32) -> Vec<Roster> {
    (1..=count)
        .map(|id| Roster {
            id: RosterId(id),
            owner_id: format!("user{id}"),
            team_name: format!("Team {id}"),
            player_ids: vec![],
        })
        .collect()
}

pub fn pick(season: Season, round: Round, original_owner: &str) -> Asset {
    Asset::Pick(DraftPickAsset {
        season: Some(season),
        round: Some(round),
        original_owner: Some(original_owner.to_string()),
        ..DraftPickAsset::default()
    })
}

pub fn drafted_pick(season: Season, round: Round, original_owner: &str, player: &str) -> Asset {
    Asset::Pick(DraftPickAsset {
        season: Some(season),
        round: Some(round),
        original_owner: Some(original_owner.to_string()),
        became: Some(PlayerRef::bare(player)),
        ..DraftPickAsset::default()
    })
}

pub fn player(id: &str) -> Asset {
    Asset::Player(PlayerAsset {
        player_id: PlayerId::new(id),
        name: None,
        position: None,
        team: None,
    })
}

/// A completed trade; each entry is a receiving team and what it received.
pub fn trade(id: &str, date: &str, teams: Vec<(&str, Vec<Asset>)>) -> TradeRecord {
    TradeRecord {
        id: TradeId::new(id),
        date: parse_trade_date(date).expect("valid test date"),
        status: TradeStatus::Completed,
        teams: teams
            .into_iter()
            .map(|(name, assets)| TradeTeam {
                name: name.to_string(),
                assets,
            })
            .collect(),
    }
}

/// A 12-team snake draft for [`SEASON`] with `rounds` rounds.
///
/// Roster `r` holds slot `13 - r`, so roster 9 picks 4th. The player taken
/// at (round, slot) is `P<round><slot:02>`, except round 1 slot 4 which is
/// `P123`.
pub fn snake_draft(rounds: Round) -> (DraftMeta, Vec<DraftPickEvent>) {
    let teams: u16 = 12;
    let roster_to_slot: HashMap<RosterId, u8> =
        (1..=12u8).map(|r| (RosterId(u32::from(r)), 13 - r)).collect();

    let mut picks = Vec::new();
    for round in 1..=rounds {
        for slot in 1..=12u8 {
            let position = if round % 2 == 1 {
                u16::from(slot)
            } else {
                teams + 1 - u16::from(slot)
            };
            let overall_pick = (u16::from(round) - 1) * teams + position;
            let player_id = if (round, slot) == (1, 4) {
                "P123".to_string()
            } else {
                format!("P{round}{slot:02}")
            };
            picks.push(DraftPickEvent {
                round,
                slot,
                overall_pick,
                player_id: Some(PlayerId::new(player_id)),
                picked_by: Some(RosterId(u32::from(13 - slot))),
            });
        }
    }

    let meta = DraftMeta {
        draft_id: "draft-2025".to_string(),
        season: SEASON,
        rounds,
        roster_to_slot: Some(roster_to_slot),
        slot_to_roster: None,
    };
    (meta, picks)
}

/// A snapshot of a 12-team league with a two-round snake draft in [`SEASON`].
pub fn snapshot() -> LeagueSnapshot {
    let (draft, picks) = snake_draft(2);
    LeagueSnapshot {
        league_id: league(),
        seasons: [(
            SEASON,
            SeasonSnapshot {
                rosters: rosters(12),
                draft: Some(draft),
                picks,
            },
        )]
        .into_iter()
        .collect(),
        traded_picks: vec![],
        players: [(
            PlayerId::new("P123"),
            PlayerInfo {
                name: "Rookie Receiver".to_string(),
                position: Some("WR".to_string()),
                team: Some("KC".to_string()),
            },
        )]
        .into_iter()
        .collect(),
        trades: vec![],
    }
}

/// Collaborators over `snapshot`, with `trades` as the manual ledger.
pub fn collaborators(snapshot: LeagueSnapshot, trades: Vec<TradeRecord>) -> Collaborators {
    Collaborators::from_snapshot(SnapshotProvider::new(snapshot))
        .with_manual_trades(Arc::new(JsonlTradeLedger::in_memory(trades)))
}

/// A collaborator whose every fetch fails.
pub struct Offline;

#[async_trait]
impl RosterProvider for Offline {
    async fn rosters(&self, _league: &LeagueId, _season: Season) -> Result<Vec<Roster>> {
        Err(Error::upstream("rosters", "offline"))
    }
}

#[async_trait]
impl DraftProvider for Offline {
    async fn draft(&self, _league: &LeagueId, _season: Season) -> Result<Option<DraftMeta>> {
        Err(Error::upstream("draft", "offline"))
    }

    async fn draft_picks(&self, _draft_id: &str) -> Result<Vec<DraftPickEvent>> {
        Err(Error::upstream("draft picks", "offline"))
    }
}

#[async_trait]
impl TradedPickProvider for Offline {
    async fn traded_picks(&self, _league: &LeagueId) -> Result<Vec<TradedPick>> {
        Err(Error::upstream("traded picks", "offline"))
    }
}

#[async_trait]
impl PlayerDirectory for Offline {
    async fn player(&self, _player_id: &PlayerId) -> Result<Option<PlayerInfo>> {
        Err(Error::upstream("players", "offline"))
    }
}

#[async_trait]
impl ManualTradeStore for Offline {
    async fn trades(&self) -> Result<Vec<TradeRecord>> {
        Err(Error::upstream("trades", "offline"))
    }
}

/// A draft provider that counts metadata fetches before delegating.
pub struct CountingDrafts {
    inner: Arc<dyn DraftProvider>,
    pub fetches: AtomicUsize,
}

impl CountingDrafts {
    pub fn new(inner: Arc<dyn DraftProvider>) -> Self {
        Self {
            inner,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DraftProvider for CountingDrafts {
    async fn draft(&self, league: &LeagueId, season: Season) -> Result<Option<DraftMeta>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.draft(league, season).await
    }

    async fn draft_picks(&self, draft_id: &str) -> Result<Vec<DraftPickEvent>> {
        self.inner.draft_picks(draft_id).await
    }
}
