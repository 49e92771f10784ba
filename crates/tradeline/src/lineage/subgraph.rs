//! Depth-bounded neighborhood extraction.
//!
//! Edges are treated as undirected for reachability: a player is reachable
//! from the pick it became and from the trades it moved in, and vice versa.

use super::{GraphNode, LineageGraph, NodeId, PickNode, PickOrigin, PlayerNode, TradeNode};
use crate::domain::{PlayerId, Round, Season, TradeId, TradeStatus};
use chrono::{DateTime, Utc};
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{HashMap, HashSet, VecDeque};

/// Smallest accepted traversal depth
pub const MIN_DEPTH: usize = 1;

/// Largest accepted traversal depth
pub const MAX_DEPTH: usize = 10;

/// The node a lineage query starts from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootSelector {
    /// A player
    Player(PlayerId),
    /// A draft pick
    Pick {
        /// Draft season
        season: Season,
        /// Draft round
        round: Round,
        /// Original owner or draft slot
        origin: PickOrigin,
    },
    /// A trade
    Trade(TradeId),
}

impl RootSelector {
    /// Id of the selected node.
    pub fn node_id(&self) -> NodeId {
        match self {
            Self::Player(id) => NodeId::player(id),
            Self::Pick {
                season,
                round,
                origin,
            } => NodeId::pick(*season, *round, origin),
            Self::Trade(id) => NodeId::trade(id),
        }
    }

    /// Placeholder node for a root that is not in the graph.
    fn placeholder(&self) -> GraphNode {
        let id = self.node_id();
        match self {
            Self::Player(player_id) => GraphNode::Player(PlayerNode {
                id,
                player_id: player_id.clone(),
                name: None,
                position: None,
                team: None,
            }),
            Self::Pick {
                season,
                round,
                origin,
            } => GraphNode::Pick(PickNode {
                id,
                season: *season,
                round: *round,
                slot: match origin {
                    PickOrigin::Slot(slot) => Some(*slot),
                    PickOrigin::Team(_) => None,
                },
                original_owner: match origin {
                    PickOrigin::Team(name) => Some(name.clone()),
                    PickOrigin::Slot(_) => None,
                },
                current_owner: None,
                became: None,
            }),
            Self::Trade(trade_id) => GraphNode::Trade(TradeNode {
                id,
                trade_id: trade_id.clone(),
                date: DateTime::<Utc>::default(),
                status: TradeStatus::Unknown,
                teams: Vec::new(),
            }),
        }
    }
}

/// Clamp a requested depth into `MIN_DEPTH..=MAX_DEPTH`.
pub fn clamp_depth(depth: usize) -> usize {
    depth.clamp(MIN_DEPTH, MAX_DEPTH)
}

/// Nodes within `depth` hops of `root`, and every edge between them.
///
/// `depth` is clamped into `MIN_DEPTH..=MAX_DEPTH`. A root that is not in
/// `graph` yields a single placeholder node and no edges.
pub fn extract_subgraph(graph: &LineageGraph, root: &RootSelector, depth: usize) -> LineageGraph {
    let depth = clamp_depth(depth);
    let root_id = root.node_id();

    if !graph.contains(&root_id) {
        tracing::debug!(root = %root_id, "Lineage root not in graph");
        return LineageGraph::singleton(root.placeholder());
    }

    let (projection, node_map) = undirected_projection(graph);
    let Some(&start) = node_map.get(&root_id) else {
        return LineageGraph::singleton(root.placeholder());
    };

    let mut visited = HashSet::from([start]);
    let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::from([(start, 0)]);

    while let Some((current, distance)) = queue.pop_front() {
        if distance >= depth {
            continue;
        }
        for neighbor in projection.neighbors(current) {
            if visited.insert(neighbor) {
                queue.push_back((neighbor, distance + 1));
            }
        }
    }

    let kept: HashSet<&NodeId> = visited.into_iter().map(|idx| projection[idx]).collect();

    let mut subgraph = LineageGraph::new();
    for id in &kept {
        if let Some(node) = graph.node(id) {
            subgraph.nodes.insert((*id).clone(), node.clone());
        }
    }
    for (edge_id, edge) in &graph.edges {
        if kept.contains(&edge.from) && kept.contains(&edge.to) {
            subgraph.edges.insert(edge_id.clone(), edge.clone());
        }
    }

    tracing::debug!(
        root = %root_id,
        depth,
        nodes = subgraph.node_count(),
        edges = subgraph.edge_count(),
        "Extracted lineage subgraph"
    );
    subgraph
}

/// Undirected petgraph view over the lineage graph, with an id lookup.
fn undirected_projection(
    graph: &LineageGraph,
) -> (UnGraph<&NodeId, ()>, HashMap<&NodeId, NodeIndex>) {
    let mut projection = UnGraph::with_capacity(graph.node_count(), graph.edge_count());
    let mut node_map = HashMap::with_capacity(graph.node_count());

    for id in graph.node_ids() {
        node_map.insert(id, projection.add_node(id));
    }
    for edge in graph.edges.values() {
        if let (Some(&a), Some(&b)) = (node_map.get(&edge.from), node_map.get(&edge.to)) {
            projection.add_edge(a, b, ());
        }
    }

    (projection, node_map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineage::{EdgeKind, GraphEdge};
    use rstest::rstest;

    fn player(id: &str) -> GraphNode {
        let player_id = PlayerId::new(id);
        GraphNode::Player(PlayerNode {
            id: NodeId::player(&player_id),
            player_id,
            name: None,
            position: None,
            team: None,
        })
    }

    fn link(graph: &mut LineageGraph, from: &GraphNode, to: &GraphNode) {
        let id = format!("{}->{}", from.id(), to.id());
        graph.edges.insert(
            id.clone(),
            GraphEdge {
                id,
                from: from.id().clone(),
                to: to.id().clone(),
                kind: EdgeKind::Traded,
                trade_id: None,
                received_by: None,
            },
        );
    }

    /// A chain a -> b -> c -> d, stored so that b points back at a.
    fn chain() -> LineageGraph {
        let (a, b, c, d) = (player("a"), player("b"), player("c"), player("d"));
        let mut graph = LineageGraph::new();
        for node in [&a, &b, &c, &d] {
            graph.upsert_node(node.clone());
        }
        link(&mut graph, &b, &a);
        link(&mut graph, &b, &c);
        link(&mut graph, &c, &d);
        graph
    }

    #[rstest]
    #[case::zero_clamped_to_one(0, 2)]
    #[case::one(1, 2)]
    #[case::two(2, 3)]
    #[case::whole_chain(3, 4)]
    #[case::beyond_max(50, 4)]
    fn test_depth_bounds_nodes(#[case] depth: usize, #[case] expected_nodes: usize) {
        let graph = chain();
        let sub = extract_subgraph(&graph, &RootSelector::Player(PlayerId::new("a")), depth);
        assert_eq!(sub.node_count(), expected_nodes);
    }

    #[test]
    fn test_edges_are_induced() {
        let graph = chain();
        let sub = extract_subgraph(&graph, &RootSelector::Player(PlayerId::new("a")), 1);
        let edges: Vec<&str> = sub.edge_ids().collect();
        assert_eq!(edges, vec!["player:b->player:a"]);
    }

    #[rstest]
    #[case::player(RootSelector::Player(PlayerId::new("ghost")), "player:ghost")]
    #[case::pick(
        RootSelector::Pick { season: 2030, round: 2, origin: PickOrigin::Slot(5) },
        "pick:2030-2-s5"
    )]
    #[case::trade(RootSelector::Trade(TradeId::new("nope")), "trade:nope")]
    fn test_absent_root_yields_placeholder(#[case] root: RootSelector, #[case] expected: &str) {
        let sub = extract_subgraph(&chain(), &root, 3);
        let nodes: Vec<&str> = sub.node_ids().map(NodeId::as_str).collect();
        assert_eq!(nodes, vec![expected]);
        assert_eq!(sub.edge_count(), 0);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(4, 4)]
    #[case(11, 10)]
    fn test_clamp_depth(#[case] requested: usize, #[case] expected: usize) {
        assert_eq!(clamp_depth(requested), expected);
    }
}
