//! Integration tests for resolving picks to drafted players.

mod common;

use common::{CountingDrafts, Offline, SEASON, collaborators, league, snapshot};
use rstest::rstest;
use std::collections::HashMap;
use std::sync::Arc;
use tradeline::became::cache::DraftContextCache;
use tradeline::became::BecameResolver;
use tradeline::domain::{PlayerId, RosterId, Round};
use tradeline::providers::snapshot::SnapshotProvider;
use tradeline::providers::Collaborators;

fn resolver() -> BecameResolver {
    BecameResolver::new(
        league(),
        collaborators(snapshot(), vec![]),
        Arc::new(DraftContextCache::new()),
    )
}

#[tokio::test]
async fn test_scenario_c_first_round_pick() {
    // Roster 9 holds draft slot 4.
    let resolved = resolver().resolve(SEASON, 1, RosterId(9)).await.unwrap();

    assert_eq!(resolved.player.player_id, PlayerId::new("P123"));
    assert_eq!(resolved.player.name.as_deref(), Some("Rookie Receiver"));
    assert_eq!(resolved.player.position.as_deref(), Some("WR"));
    assert_eq!(resolved.draft_slot, 4);
    assert_eq!(resolved.overall_pick, 4);
    assert_eq!(resolved.pick_in_round, 4);
}

#[rstest]
#[case::first_round(1, 9, 4, 4)]
// Snake order reverses in round 2: slot 4 picks 9th, 21st overall.
#[case::second_round_snake(2, 9, 9, 21)]
#[case::first_slot_second_round(2, 12, 12, 24)]
#[tokio::test]
async fn test_pick_in_round_follows_overall_pick(
    #[case] round: Round,
    #[case] roster: u32,
    #[case] pick_in_round: u16,
    #[case] overall: u16,
) {
    let resolved = resolver().resolve(SEASON, round, RosterId(roster)).await.unwrap();
    assert_eq!(resolved.pick_in_round, pick_in_round);
    assert_eq!(resolved.overall_pick, overall);
}

#[tokio::test]
async fn test_player_missing_from_directory_still_resolves() {
    let resolved = resolver().resolve(SEASON, 2, RosterId(1)).await.unwrap();
    // Roster 1 holds slot 12.
    assert_eq!(resolved.player.player_id, PlayerId::new("P212"));
    assert!(resolved.player.name.is_none());
}

#[rstest]
#[case::round_not_drafted(SEASON, 3, 9)]
#[case::no_draft_for_season(2031, 1, 9)]
#[case::unknown_roster(SEASON, 1, 40)]
#[tokio::test]
async fn test_unresolvable_requests(#[case] season: u16, #[case] round: Round, #[case] roster: u32) {
    assert!(resolver().resolve(season, round, RosterId(roster)).await.is_none());
}

#[tokio::test]
async fn test_open_pick_is_unresolved() {
    let mut snap = snapshot();
    let season = snap.seasons.get_mut(&SEASON).unwrap();
    for event in season.picks.iter_mut().filter(|p| p.round == 2) {
        event.player_id = None;
    }
    let resolver = BecameResolver::new(
        league(),
        collaborators(snap, vec![]),
        Arc::new(DraftContextCache::new()),
    );

    assert!(resolver.resolve(SEASON, 2, RosterId(9)).await.is_none());
    assert!(resolver.resolve(SEASON, 1, RosterId(9)).await.is_some());
}

#[tokio::test]
async fn test_slot_from_inverse_map() {
    let mut snap = snapshot();
    let draft = snap
        .seasons
        .get_mut(&SEASON)
        .and_then(|s| s.draft.as_mut())
        .unwrap();
    let forward = draft.roster_to_slot.take().unwrap();
    draft.slot_to_roster = Some(forward.into_iter().map(|(r, s)| (s, r)).collect());

    let resolver = BecameResolver::new(
        league(),
        collaborators(snap, vec![]),
        Arc::new(DraftContextCache::new()),
    );

    let resolved = resolver.resolve(SEASON, 1, RosterId(9)).await.unwrap();
    assert_eq!(resolved.draft_slot, 4);
}

#[tokio::test]
async fn test_slot_from_first_round_selection() {
    let mut snap = snapshot();
    let draft = snap
        .seasons
        .get_mut(&SEASON)
        .and_then(|s| s.draft.as_mut())
        .unwrap();
    draft.roster_to_slot = Some(HashMap::new());
    draft.slot_to_roster = None;

    let resolver = BecameResolver::new(
        league(),
        collaborators(snap, vec![]),
        Arc::new(DraftContextCache::new()),
    );

    let resolved = resolver.resolve(SEASON, 2, RosterId(9)).await.unwrap();
    assert_eq!(resolved.draft_slot, 4);
    assert_eq!(resolved.player.player_id, PlayerId::new("P204"));
}

#[tokio::test]
async fn test_draft_context_fetched_once_per_season() {
    let provider = Arc::new(SnapshotProvider::new(snapshot()));
    let drafts = Arc::new(CountingDrafts::new(provider.clone()));
    let collab = Collaborators {
        drafts: drafts.clone(),
        ..Collaborators::from_snapshot(SnapshotProvider::new(snapshot()))
    };
    let cache = Arc::new(DraftContextCache::new());
    let resolver = BecameResolver::new(league(), collab, Arc::clone(&cache));

    resolver.resolve(SEASON, 1, RosterId(9)).await.unwrap();
    resolver.resolve(SEASON, 2, RosterId(3)).await.unwrap();
    let batch = resolver
        .resolve_all(&[(SEASON, 1, RosterId(1)), (SEASON, 1, RosterId(2))])
        .await;

    assert!(batch.iter().all(Option::is_some));
    assert_eq!(drafts.fetches(), 1);
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn test_missing_draft_is_not_cached() {
    let provider = Arc::new(SnapshotProvider::new(snapshot()));
    let drafts = Arc::new(CountingDrafts::new(provider));
    let collab = Collaborators {
        drafts: drafts.clone(),
        ..collaborators(snapshot(), vec![])
    };
    let cache = Arc::new(DraftContextCache::new());
    let resolver = BecameResolver::new(league(), collab, Arc::clone(&cache));

    assert!(resolver.resolve(2031, 1, RosterId(1)).await.is_none());
    assert!(resolver.resolve(2031, 1, RosterId(1)).await.is_none());

    assert_eq!(drafts.fetches(), 2);
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn test_unfinished_draft_is_refetched() {
    let mut snap = snapshot();
    snap.seasons
        .get_mut(&SEASON)
        .unwrap()
        .picks
        .retain(|p| p.round == 1);
    let drafts = Arc::new(CountingDrafts::new(Arc::new(SnapshotProvider::new(snap.clone()))));
    let collab = Collaborators {
        drafts: drafts.clone(),
        ..collaborators(snap, vec![])
    };
    let cache = Arc::new(DraftContextCache::new());
    let resolver = BecameResolver::new(league(), collab, Arc::clone(&cache));

    assert!(resolver.resolve(SEASON, 1, RosterId(9)).await.is_some());
    assert!(resolver.resolve(SEASON, 2, RosterId(9)).await.is_none());

    assert_eq!(drafts.fetches(), 2);
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn test_rosters_unavailable_infers_count_without_caching() {
    let collab = Collaborators {
        rosters: Arc::new(Offline),
        ..collaborators(snapshot(), vec![])
    };
    let cache = Arc::new(DraftContextCache::new());
    let resolver = BecameResolver::new(league(), collab, Arc::clone(&cache));

    let resolved = resolver.resolve(SEASON, 2, RosterId(9)).await.unwrap();

    assert_eq!(resolved.pick_in_round, 9);
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn test_draft_unavailable_is_unresolved() {
    let collab = Collaborators {
        drafts: Arc::new(Offline),
        ..collaborators(snapshot(), vec![])
    };
    let resolver = BecameResolver::new(league(), collab, Arc::new(DraftContextCache::new()));

    assert!(resolver.resolve(SEASON, 1, RosterId(9)).await.is_none());
}

#[tokio::test]
async fn test_directory_unavailable_returns_bare_player() {
    let collab = Collaborators {
        players: Arc::new(Offline),
        ..collaborators(snapshot(), vec![])
    };
    let resolver = BecameResolver::new(league(), collab, Arc::new(DraftContextCache::new()));

    let resolved = resolver.resolve(SEASON, 1, RosterId(9)).await.unwrap();
    assert_eq!(resolved.player.player_id, PlayerId::new("P123"));
    assert!(resolved.player.name.is_none());
}
