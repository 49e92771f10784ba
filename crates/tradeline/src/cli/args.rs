//! CLI argument structs for all commands.

use clap::{Args, Parser};

use super::validators::{parse_pick_selector, validate_id, PickSelector};
use crate::domain::{PlayerId, Round, Season, TradeId};
use crate::lineage::RootSelector;

/// Arguments for the `owners` command
#[derive(Parser, Debug, Clone)]
pub struct OwnersArgs {
    /// Draft season to resolve
    #[arg(short, long)]
    pub season: Season,

    /// Only show picks held by this roster id
    #[arg(short, long)]
    pub roster: Option<u32>,
}

/// Arguments for the `became` command
#[derive(Parser, Debug, Clone)]
pub struct BecameArgs {
    /// Draft season
    #[arg(short, long)]
    pub season: Season,

    /// Draft round (1-based)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..))]
    pub round: Round,

    /// Roster id the pick originally belonged to
    #[arg(short, long)]
    pub roster: u32,
}

/// Arguments for the `lineage` command
#[derive(Parser, Debug, Clone)]
pub struct LineageArgs {
    /// Asset or trade to start from
    #[command(flatten)]
    pub root: RootArgs,

    /// How many hops to follow (1-10, default from config)
    #[arg(short, long)]
    pub depth: Option<usize>,
}

/// Exactly one lineage root
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct RootArgs {
    /// Player id
    #[arg(long, value_parser = validate_id)]
    pub player: Option<String>,

    /// Pick as season:round:slot, where slot is a number or the original team
    #[arg(long, value_parser = parse_pick_selector)]
    pub pick: Option<PickSelector>,

    /// Trade id
    #[arg(long, value_parser = validate_id)]
    pub trade: Option<String>,
}

impl RootArgs {
    /// The selected root, if clap admitted one.
    pub fn selector(&self) -> Option<RootSelector> {
        if let Some(player) = &self.player {
            return Some(RootSelector::Player(PlayerId::new(player.as_str())));
        }
        if let Some(pick) = &self.pick {
            return Some(RootSelector::Pick {
                season: pick.season,
                round: pick.round,
                origin: pick.origin.clone(),
            });
        }
        self.trade
            .as_deref()
            .map(|trade| RootSelector::Trade(TradeId::new(trade)))
    }
}
