//! Draft slot resolution strategies.
//!
//! Platforms report the draft order inconsistently: some give a
//! roster→slot map, some the inverse, and some leave it out once the draft
//! has run. Each strategy below is a pure function over the draft context;
//! [`resolve_slot`] tries them in order and the first answer wins.

use super::cache::DraftContext;
use crate::domain::RosterId;

/// A single way of finding a roster's draft slot.
pub type SlotStrategy = fn(&DraftContext, RosterId) -> Option<u8>;

/// Strategies in the order they are tried, with a name for tracing.
pub const SLOT_STRATEGIES: [(&str, SlotStrategy); 3] = [
    ("roster_to_slot", direct_lookup as SlotStrategy),
    ("slot_to_roster", inverse_lookup as SlotStrategy),
    ("first_round_selection", first_round_selection as SlotStrategy),
];

/// Look the roster up in the roster→slot map.
pub fn direct_lookup(ctx: &DraftContext, roster: RosterId) -> Option<u8> {
    ctx.roster_to_slot.get(&roster).copied()
}

/// Search the slot→roster map for the roster.
pub fn inverse_lookup(ctx: &DraftContext, roster: RosterId) -> Option<u8> {
    ctx.slot_to_roster
        .iter()
        .filter(|(_, r)| **r == roster)
        .map(|(slot, _)| *slot)
        .min()
}

/// Use the slot of the roster's own round-1 selection.
pub fn first_round_selection(ctx: &DraftContext, roster: RosterId) -> Option<u8> {
    ctx.picks
        .iter()
        .filter(|p| p.round == 1 && p.picked_by == Some(roster))
        .map(|p| p.slot)
        .min()
}

/// Draft slot held by `roster`, from the first strategy that knows it.
pub fn resolve_slot(ctx: &DraftContext, roster: RosterId) -> Option<u8> {
    SLOT_STRATEGIES.iter().find_map(|(name, strategy)| {
        let slot = strategy(ctx, roster)?;
        tracing::trace!(draft = %ctx.draft_id, %roster, slot, strategy = *name, "Resolved draft slot");
        Some(slot)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DraftMeta, DraftPickEvent};
    use std::collections::HashMap;

    fn context(
        roster_to_slot: Option<HashMap<RosterId, u8>>,
        slot_to_roster: Option<HashMap<u8, RosterId>>,
        picks: Vec<DraftPickEvent>,
    ) -> DraftContext {
        DraftContext::new(
            DraftMeta {
                draft_id: "d".to_string(),
                season: 2025,
                rounds: 2,
                roster_to_slot,
                slot_to_roster,
            },
            picks,
            4,
        )
    }

    fn selection(slot: u8, picked_by: u32) -> DraftPickEvent {
        DraftPickEvent {
            round: 1,
            slot,
            overall_pick: u16::from(slot),
            player_id: None,
            picked_by: Some(RosterId(picked_by)),
        }
    }

    #[test]
    fn test_direct_lookup() {
        let ctx = context(Some(HashMap::from([(RosterId(7), 3)])), None, vec![]);
        assert_eq!(direct_lookup(&ctx, RosterId(7)), Some(3));
        assert_eq!(direct_lookup(&ctx, RosterId(8)), None);
    }

    #[test]
    fn test_inverse_lookup() {
        let ctx = context(None, Some(HashMap::from([(2, RosterId(7)), (4, RosterId(8))])), vec![]);
        assert_eq!(inverse_lookup(&ctx, RosterId(8)), Some(4));
        assert_eq!(inverse_lookup(&ctx, RosterId(9)), None);
    }

    #[test]
    fn test_first_round_selection_ignores_later_rounds() {
        let mut later = selection(1, 7);
        later.round = 2;
        let ctx = context(None, None, vec![later, selection(3, 7)]);
        assert_eq!(first_round_selection(&ctx, RosterId(7)), Some(3));
        assert_eq!(first_round_selection(&ctx, RosterId(5)), None);
    }

    #[test]
    fn test_first_match_wins() {
        // Each source disagrees; the roster→slot map is consulted first.
        let ctx = context(
            Some(HashMap::from([(RosterId(7), 1)])),
            Some(HashMap::from([(2, RosterId(7))])),
            vec![selection(3, 7)],
        );
        assert_eq!(resolve_slot(&ctx, RosterId(7)), Some(1));
    }

    #[test]
    fn test_falls_through_to_later_strategies() {
        let ctx = context(
            Some(HashMap::from([(RosterId(1), 1)])),
            Some(HashMap::from([(2, RosterId(2))])),
            vec![selection(3, 3)],
        );
        assert_eq!(resolve_slot(&ctx, RosterId(2)), Some(2));
        assert_eq!(resolve_slot(&ctx, RosterId(3)), Some(3));
        assert_eq!(resolve_slot(&ctx, RosterId(4)), None);
    }
}
