//! Building the lineage graph from trade records.

use super::{
    EdgeKind, GraphEdge, GraphNode, LineageGraph, NodeId, PickNode, PickOrigin, PlayerNode,
    TradeNode,
};
use crate::domain::{
    Asset, DraftPickAsset, PlayerAsset, PlayerRef, Round, Season, TradeRecord,
};
use std::collections::HashMap;

/// Build the lineage graph of `trades`, using team names as written.
///
/// See [`build_graph_with`].
pub fn build_graph(trades: &[TradeRecord]) -> LineageGraph {
    build_graph_with(trades, |_, _| None)
}

/// Build the lineage graph of `trades`.
///
/// Every trade becomes a trade node with a `traded` edge to each asset a team
/// received. Picks with a known drafted player get a `became` edge to that
/// player. Trades are processed in (date, id) order so that node attributes
/// do not depend on the order of the input; ids never do.
///
/// `canonical_team(season, name)` maps a team name as written to the name the
/// graph should use for it, so aliases of one team share pick nodes. `None`
/// keeps the name as written.
///
/// A pick recorded with only its draft slot takes the original owner seen
/// with that (season, round, slot) elsewhere in the input. Pick assets
/// without a season or round, or without either an original owner or a
/// slot, cannot be identified and are skipped.
pub fn build_graph_with<F>(trades: &[TradeRecord], canonical_team: F) -> LineageGraph
where
    F: Fn(Season, &str) -> Option<String>,
{
    let mut ordered: Vec<&TradeRecord> = trades.iter().collect();
    ordered.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

    let names = TeamNames::new(&ordered, canonical_team);
    let mut graph = LineageGraph::new();

    for trade in ordered {
        let trade_node = NodeId::trade(&trade.id);
        graph.upsert_node(GraphNode::Trade(TradeNode {
            id: trade_node.clone(),
            trade_id: trade.id.clone(),
            date: trade.date,
            status: trade.status,
            teams: trade.teams.iter().map(|t| t.name.clone()).collect(),
        }));

        for (team_index, team) in trade.teams.iter().enumerate() {
            for (asset_index, asset) in team.assets.iter().enumerate() {
                let node = match asset {
                    Asset::Player(player) => Some(player_node(player)),
                    Asset::Pick(pick) => pick_node(pick, &team.name, &names),
                    Asset::Unrecognized => None,
                };
                let Some(node) = node else {
                    tracing::debug!(
                        trade = %trade.id,
                        team_index,
                        asset_index,
                        "Skipping unidentifiable asset in lineage graph"
                    );
                    continue;
                };

                let asset_id = node.id().clone();
                graph.upsert_node(node);
                graph.insert_edge(GraphEdge {
                    id: format!("{}:{team_index}:{asset_index}", trade.id),
                    from: trade_node.clone(),
                    to: asset_id.clone(),
                    kind: EdgeKind::Traded,
                    trade_id: Some(trade.id.clone()),
                    received_by: Some(team.name.clone()),
                });

                if let Asset::Pick(DraftPickAsset {
                    became: Some(player),
                    ..
                }) = asset
                {
                    add_became(&mut graph, asset_id, player);
                }
            }
        }
    }

    tracing::debug!(
        trades = trades.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Built lineage graph"
    );
    graph
}

/// Team naming for pick origins.
struct TeamNames<F> {
    canonical_team: F,
    owner_by_slot: HashMap<(Season, Round, u8), String>,
}

impl<F> TeamNames<F>
where
    F: Fn(Season, &str) -> Option<String>,
{
    /// The first owner seen for a slot wins.
    fn new(ordered: &[&TradeRecord], canonical_team: F) -> Self {
        let mut names = Self {
            canonical_team,
            owner_by_slot: HashMap::new(),
        };
        let picks = ordered
            .iter()
            .flat_map(|t| &t.teams)
            .flat_map(|team| &team.assets)
            .filter_map(|asset| match asset {
                Asset::Pick(pick) => Some(pick),
                _ => None,
            });
        for pick in picks {
            let (Some(season), Some(round), Some(slot), Some(owner)) =
                (pick.season, pick.round, pick.slot, declared_owner(pick))
            else {
                continue;
            };
            let owner = names.team(season, owner);
            names
                .owner_by_slot
                .entry((season, round, slot))
                .or_insert(owner);
        }
        names
    }

    fn team(&self, season: Season, name: &str) -> String {
        let name = name.trim();
        (self.canonical_team)(season, name).unwrap_or_else(|| name.to_string())
    }

    fn original_owner(&self, season: Season, round: Round, pick: &DraftPickAsset) -> Option<String> {
        match declared_owner(pick) {
            Some(name) => Some(self.team(season, name)),
            None => pick
                .slot
                .and_then(|slot| self.owner_by_slot.get(&(season, round, slot)).cloned()),
        }
    }
}

fn declared_owner(pick: &DraftPickAsset) -> Option<&str> {
    pick.original_owner
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

fn player_node(asset: &PlayerAsset) -> GraphNode {
    GraphNode::Player(PlayerNode {
        id: NodeId::player(&asset.player_id),
        player_id: asset.player_id.clone(),
        name: asset.name.clone(),
        position: asset.position.clone(),
        team: asset.team.clone(),
    })
}

fn pick_node<F>(asset: &DraftPickAsset, received_by: &str, names: &TeamNames<F>) -> Option<GraphNode>
where
    F: Fn(Season, &str) -> Option<String>,
{
    let season = asset.season?;
    let round = asset.round?;
    let original_owner = names.original_owner(season, round, asset);
    let origin = match (&original_owner, asset.slot) {
        (Some(name), _) => PickOrigin::Team(name.clone()),
        (None, Some(slot)) => PickOrigin::Slot(slot),
        (None, None) => return None,
    };
    let current_owner = asset.current_owner.as_deref().unwrap_or(received_by);

    Some(GraphNode::Pick(PickNode {
        id: NodeId::pick(season, round, &origin),
        season,
        round,
        slot: asset.slot,
        original_owner,
        current_owner: Some(names.team(season, current_owner)),
        became: asset.became.as_ref().map(|p| p.player_id.clone()),
    }))
}

fn add_became(graph: &mut LineageGraph, pick: NodeId, player: &PlayerRef) {
    let player_id = NodeId::player(&player.player_id);
    graph.upsert_node(GraphNode::Player(PlayerNode {
        id: player_id.clone(),
        player_id: player.player_id.clone(),
        name: player.name.clone(),
        position: player.position.clone(),
        team: player.team.clone(),
    }));
    graph.insert_edge(GraphEdge {
        id: format!("became:{pick}->{player_id}"),
        from: pick,
        to: player_id,
        kind: EdgeKind::Became,
        trade_id: None,
        received_by: None,
    });
}
