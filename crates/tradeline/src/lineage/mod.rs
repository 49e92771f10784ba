//! Trade lineage graph.
//!
//! The lineage graph connects trades to the assets that moved in them, and
//! draft picks to the players they became:
//!
//! - **Trade nodes** have outgoing `traded` edges to every asset received in
//!   the trade
//! - **Pick nodes** have an outgoing `became` edge to the drafted player, once
//!   known
//! - **Player nodes** are leaves in the stored direction
//!
//! Following a pick or player backwards through its trades and forwards
//! through `became` yields its lineage. The graph is rebuilt from the trade
//! list on every request; see [`builder::build_graph`].
//!
//! # Identity
//!
//! Node and edge ids are derived from stable identifiers only, so rebuilding
//! from unchanged input gives identical id sets:
//!
//! | Item        | Id                                       |
//! |-------------|------------------------------------------|
//! | player      | `player:<playerId>`                      |
//! | pick        | `pick:<season>-<round>-<origin>`         |
//! | trade       | `trade:<tradeId>`                        |
//! | traded edge | `<tradeId>:<teamIndex>:<assetIndex>`     |
//! | became edge | `became:<pickNodeId>-><playerNodeId>`    |
//!
//! A pick's origin is its original owner's team name, lowercased with words
//! joined by `-`. When a sighting records only the draft slot, the owner seen
//! with the same (season, round, slot) elsewhere is used; failing that the
//! origin is the slot itself (`s<slot>`).

pub mod builder;
pub mod merge;
pub mod subgraph;

use crate::domain::{PlayerId, Round, Season, TradeId, TradeStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub use builder::{build_graph, build_graph_with};
pub use subgraph::{extract_subgraph, RootSelector};

/// Deterministic node identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

/// What identifies a pick within its season and round
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PickOrigin {
    /// Team name of the original owner
    Team(String),
    /// Draft slot, when the original owner is not known
    Slot(u8),
}

impl fmt::Display for PickOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Team(name) => {
                let normalized: Vec<String> = name
                    .split_whitespace()
                    .map(str::to_lowercase)
                    .collect();
                write!(f, "{}", normalized.join("-"))
            }
            Self::Slot(slot) => write!(f, "s{slot}"),
        }
    }
}

impl NodeId {
    /// Id of a player node.
    pub fn player(player_id: &PlayerId) -> Self {
        Self(format!("player:{player_id}"))
    }

    /// Id of a pick node.
    pub fn pick(season: Season, round: Round, origin: &PickOrigin) -> Self {
        Self(format!("pick:{season}-{round}-{origin}"))
    }

    /// Id of a trade node.
    pub fn trade(trade_id: &TradeId) -> Self {
        Self(format!("trade:{trade_id}"))
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A player in the lineage graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerNode {
    /// Node id
    pub id: NodeId,
    /// Player id
    pub player_id: PlayerId,
    /// Name, once known
    pub name: Option<String>,
    /// Position, once known
    pub position: Option<String>,
    /// NFL team, once known
    pub team: Option<String>,
}

/// A draft pick in the lineage graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickNode {
    /// Node id
    pub id: NodeId,
    /// Draft season
    pub season: Season,
    /// Draft round
    pub round: Round,
    /// Draft slot, once the order is set
    pub slot: Option<u8>,
    /// Team the pick originated from
    pub original_owner: Option<String>,
    /// Team holding the pick, as first recorded
    pub current_owner: Option<String>,
    /// Player drafted with the pick
    pub became: Option<PlayerId>,
}

/// A trade in the lineage graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeNode {
    /// Node id
    pub id: NodeId,
    /// Trade id
    pub trade_id: TradeId,
    /// When the trade was processed
    pub date: DateTime<Utc>,
    /// Trade status
    pub status: TradeStatus,
    /// Participating team names
    pub teams: Vec<String>,
}

/// Node kinds, for callers that branch on kind without the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Player node
    Player,
    /// Pick node
    Pick,
    /// Trade node
    Trade,
}

/// A node of the lineage graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GraphNode {
    /// A player
    Player(PlayerNode),
    /// A draft pick
    Pick(PickNode),
    /// A trade
    Trade(TradeNode),
}

impl GraphNode {
    /// Node id.
    pub fn id(&self) -> &NodeId {
        match self {
            Self::Player(n) => &n.id,
            Self::Pick(n) => &n.id,
            Self::Trade(n) => &n.id,
        }
    }

    /// Node kind.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Player(_) => NodeKind::Player,
            Self::Pick(_) => NodeKind::Pick,
            Self::Trade(_) => NodeKind::Trade,
        }
    }

    /// Short human-readable description.
    pub fn label(&self) -> String {
        match self {
            Self::Player(n) => {
                let name = n.name.as_deref().unwrap_or(n.player_id.as_str());
                match &n.position {
                    Some(pos) => format!("{name} ({pos})"),
                    None => name.to_string(),
                }
            }
            Self::Pick(n) => {
                let mut label = format!("{} Round {}", n.season, n.round);
                if let Some(slot) = n.slot {
                    label.push_str(&format!(".{slot:02}"));
                }
                if let Some(owner) = &n.original_owner {
                    label.push_str(&format!(" ({owner})"));
                }
                label
            }
            Self::Trade(n) => format!("Trade {} on {}", n.trade_id, n.date.format("%Y-%m-%d")),
        }
    }
}

/// Kind of relationship an edge records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Trade -> asset received in it
    Traded,
    /// Pick -> player drafted with it
    Became,
}

/// A directed edge of the lineage graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Deterministic edge id
    pub id: String,
    /// Source node
    pub from: NodeId,
    /// Target node
    pub to: NodeId,
    /// Relationship kind
    pub kind: EdgeKind,
    /// Trade the edge came from (traded edges only)
    pub trade_id: Option<TradeId>,
    /// Team that received the asset (traded edges only)
    pub received_by: Option<String>,
}

/// A set of nodes and edges, keyed by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageGraph {
    /// Nodes by id
    pub nodes: BTreeMap<NodeId, GraphNode>,
    /// Edges by id
    pub edges: BTreeMap<String, GraphEdge>,
}

impl LineageGraph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// A graph holding a single node and no edges.
    pub fn singleton(node: GraphNode) -> Self {
        let mut graph = Self::new();
        graph.nodes.insert(node.id().clone(), node);
        graph
    }

    /// Node by id.
    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    /// Whether a node with this id exists.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Node ids in sorted order.
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// Edge ids in sorted order.
    pub fn edge_ids(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Insert a node, merging it into an existing node with the same id.
    pub(crate) fn upsert_node(&mut self, node: GraphNode) {
        match self.nodes.get_mut(node.id()) {
            Some(existing) => merge::merge_node(existing, node),
            None => {
                self.nodes.insert(node.id().clone(), node);
            }
        }
    }

    /// Insert an edge unless one with the same id already exists.
    pub(crate) fn insert_edge(&mut self, edge: GraphEdge) {
        self.edges.entry(edge.id.clone()).or_insert(edge);
    }
}
