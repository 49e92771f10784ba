//! Domain types for pick ownership and trade lineage.
//!
//! This module contains the core domain types shared by the resolvers, the
//! lineage graph and the collaborator adapters.

mod dates;
mod lenient;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

pub use dates::parse_trade_date;

/// A league season (e.g. 2025).
pub type Season = u16;

/// A draft round, 1-based.
pub type Round = u8;

/// Numeric roster identifier assigned by the league platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RosterId(pub u32);

impl fmt::Display for RosterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RosterId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create a new identifier
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// League identifier on the external platform
    LeagueId
);
string_id!(
    /// Trade identifier, unique within the manual ledger
    TradeId
);
string_id!(
    /// Player identifier in the player directory
    PlayerId
);

/// A team's roster for one season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    /// Platform roster id
    pub id: RosterId,

    /// Platform user id of the roster owner
    pub owner_id: String,

    /// Display name of the team, as used in the manual ledger
    pub team_name: String,

    /// Players currently on the roster
    #[serde(default)]
    pub player_ids: Vec<PlayerId>,
}

/// Directory entry for a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    /// Full name
    pub name: String,

    /// Position (QB, RB, ...)
    #[serde(default)]
    pub position: Option<String>,

    /// NFL team abbreviation
    #[serde(default)]
    pub team: Option<String>,
}

/// Reference to a player, with whatever directory details are known
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRef {
    /// Player id
    pub player_id: PlayerId,

    /// Player name, when known
    #[serde(default)]
    pub name: Option<String>,

    /// Position, when known
    #[serde(default)]
    pub position: Option<String>,

    /// NFL team, when known
    #[serde(default)]
    pub team: Option<String>,
}

impl PlayerRef {
    /// A reference carrying only the player id
    pub fn bare(player_id: impl Into<PlayerId>) -> Self {
        Self {
            player_id: player_id.into(),
            name: None,
            position: None,
            team: None,
        }
    }

    /// Build a reference from a directory entry
    pub fn from_info(player_id: PlayerId, info: PlayerInfo) -> Self {
        Self {
            player_id,
            name: Some(info.name),
            position: info.position,
            team: info.team,
        }
    }
}

/// Status of a trade record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeStatus {
    /// Trade was processed
    #[serde(alias = "complete")]
    Completed,

    /// Trade is awaiting acceptance or review
    Pending,

    /// Trade was vetoed by the league
    Vetoed,

    /// Trade was withdrawn
    Cancelled,

    /// Any status this system does not recognise
    #[serde(other)]
    Unknown,
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Vetoed => "vetoed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// A player moved in a trade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAsset {
    /// Player id
    pub player_id: PlayerId,

    /// Player name as entered
    #[serde(default)]
    pub name: Option<String>,

    /// Position
    #[serde(default)]
    pub position: Option<String>,

    /// NFL team
    #[serde(default)]
    pub team: Option<String>,
}

/// A draft pick moved in a trade.
///
/// Manual ledger entries are hand-written, so every field is optional here;
/// the resolvers skip picks that lack what they need. Numeric fields that do
/// not hold a usable number read as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPickAsset {
    /// Draft season the pick belongs to
    #[serde(default, alias = "year", deserialize_with = "lenient::deserialize_number")]
    pub season: Option<Season>,

    /// Draft round
    #[serde(default, deserialize_with = "lenient::deserialize_number")]
    pub round: Option<Round>,

    /// Team name of the roster that originally held the pick
    #[serde(default)]
    pub original_owner: Option<String>,

    /// Team name of the roster holding the pick after this trade
    #[serde(default)]
    pub current_owner: Option<String>,

    /// Draft slot, once the draft order is set
    #[serde(default, deserialize_with = "lenient::deserialize_number")]
    pub slot: Option<u8>,

    /// Player selected with this pick, once the round has been drafted
    #[serde(default)]
    pub became: Option<PlayerRef>,
}

/// An asset received by a team in a trade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Asset {
    /// A player
    Player(PlayerAsset),

    /// A draft pick
    Pick(DraftPickAsset),

    /// An entry of unknown type or shape; ignored by the resolvers
    #[serde(other)]
    Unrecognized,
}

/// One side of a trade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeTeam {
    /// Team name of the receiving side
    pub name: String,

    /// Assets this team received
    #[serde(default, deserialize_with = "lenient::deserialize_assets")]
    pub assets: Vec<Asset>,
}

/// A trade as recorded in the manual ledger or reported by the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Unique trade id
    pub id: TradeId,

    /// When the trade was processed
    #[serde(deserialize_with = "dates::deserialize_trade_date")]
    pub date: DateTime<Utc>,

    /// Trade status
    pub status: TradeStatus,

    /// Participating teams with the assets each received
    pub teams: Vec<TradeTeam>,
}

impl TradeRecord {
    /// Whether the trade took effect
    pub fn is_completed(&self) -> bool {
        self.status == TradeStatus::Completed
    }
}

/// A single ownership transfer of a draft slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEvent {
    /// Trade that moved the pick
    pub trade_id: TradeId,

    /// When the trade was processed
    pub timestamp: DateTime<Utc>,

    /// Roster giving up the pick
    pub from_roster: RosterId,

    /// Roster receiving the pick
    pub to_roster: RosterId,

    /// Team name of the giving roster
    pub from_team: String,

    /// Team name of the receiving roster
    pub to_team: String,
}

/// Key of a draft slot within a season: the original roster and the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    /// Roster the pick originally belonged to
    pub original_roster: RosterId,

    /// Draft round
    pub round: Round,
}

impl SlotKey {
    /// Create a slot key
    pub fn new(original_roster: impl Into<RosterId>, round: Round) -> Self {
        Self {
            original_roster: original_roster.into(),
            round,
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/R{}", self.original_roster, self.round)
    }
}

/// Current owner of a slot and the transfers that led there
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotOwnership {
    /// Roster currently holding the pick
    pub owner: RosterId,

    /// Manual-ledger transfers in timestamp order
    pub history: Vec<TransferEvent>,
}

/// Ownership of every slot in a season, ordered by slot key
pub type OwnershipMap = BTreeMap<SlotKey, SlotOwnership>;

/// A pick ownership record as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradedPick {
    /// Draft season
    pub season: Season,

    /// Draft round
    pub round: Round,

    /// Roster the pick originated from
    pub origin_roster: RosterId,

    /// Roster currently holding the pick
    pub owner_roster: RosterId,
}

/// Draft metadata for one season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftMeta {
    /// Platform draft id
    pub draft_id: String,

    /// Season the draft belongs to
    pub season: Season,

    /// Number of rounds
    pub rounds: Round,

    /// Draft slot by roster, when the platform reports it that way
    #[serde(default)]
    pub roster_to_slot: Option<HashMap<RosterId, u8>>,

    /// Roster by draft slot, when the platform reports it that way
    #[serde(default)]
    pub slot_to_roster: Option<HashMap<u8, RosterId>>,
}

/// A selection (or open pick) in a draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPickEvent {
    /// Draft round
    pub round: Round,

    /// Draft slot of the roster the pick was assigned to
    pub slot: u8,

    /// Overall pick number, 1-based across the whole draft
    pub overall_pick: u16,

    /// Player selected, if the pick has been made
    #[serde(default)]
    pub player_id: Option<PlayerId>,

    /// Roster that made the selection
    #[serde(default)]
    pub picked_by: Option<RosterId>,
}
