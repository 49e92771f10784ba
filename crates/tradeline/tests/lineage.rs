//! Integration tests for building and querying the trade lineage graph.

mod common;

use common::{drafted_pick, pick, player, trade};
use rstest::rstest;
use tradeline::domain::{PlayerId, TradeId, TradeRecord, TradeStatus};
use tradeline::lineage::{
    EdgeKind, GraphNode, LineageGraph, NodeId, NodeKind, PickOrigin, RootSelector, build_graph,
    extract_subgraph,
};

/// Team 1's 2025 first moves to Team 2 for P9, then on to Team 3, and is
/// finally used on P123.
fn history() -> Vec<TradeRecord> {
    vec![
        trade(
            "t1",
            "2024-08-01",
            vec![
                ("Team 2", vec![pick(2025, 1, "Team 1")]),
                ("Team 1", vec![player("P9")]),
            ],
        ),
        trade(
            "t2",
            "2025-03-15",
            vec![("Team 3", vec![drafted_pick(2025, 1, "Team 1", "P123")])],
        ),
    ]
}

fn ids(graph: &LineageGraph) -> (Vec<String>, Vec<String>) {
    (
        graph.node_ids().map(ToString::to_string).collect(),
        graph.edge_ids().map(ToString::to_string).collect(),
    )
}

fn pick_root() -> RootSelector {
    RootSelector::Pick {
        season: 2025,
        round: 1,
        origin: PickOrigin::Team("Team 1".to_string()),
    }
}

#[test]
fn test_graph_shape() {
    let graph = build_graph(&history());

    let (nodes, edges) = ids(&graph);
    assert_eq!(
        nodes,
        vec![
            "pick:2025-1-team-1",
            "player:P123",
            "player:P9",
            "trade:t1",
            "trade:t2"
        ]
    );
    assert_eq!(
        edges,
        vec![
            "became:pick:2025-1-team-1->player:P123",
            "t1:0:0",
            "t1:1:0",
            "t2:0:0"
        ]
    );

    let became = &graph.edges["became:pick:2025-1-team-1->player:P123"];
    assert_eq!(became.kind, EdgeKind::Became);
    assert_eq!(became.from.as_str(), "pick:2025-1-team-1");
}

#[test]
fn test_rebuild_is_idempotent_across_order() {
    let forward = build_graph(&history());
    let again = build_graph(&history());
    let mut reversed_input = history();
    reversed_input.reverse();
    let reversed = build_graph(&reversed_input);

    assert_eq!(ids(&forward), ids(&again));
    assert_eq!(forward, reversed);
}

#[test]
fn test_trade_root_depth_one_is_trade_and_its_assets() {
    let graph = build_graph(&history());

    let sub = extract_subgraph(&graph, &RootSelector::Trade(TradeId::new("t1")), 1);

    let (nodes, edges) = ids(&sub);
    assert_eq!(nodes, vec!["pick:2025-1-team-1", "player:P9", "trade:t1"]);
    assert_eq!(edges, vec!["t1:0:0", "t1:1:0"]);
}

#[rstest]
#[case::pick_and_player(1, &["pick:2025-1-team-1", "player:P123"])]
#[case::both_trades(2, &["pick:2025-1-team-1", "player:P123", "trade:t1", "trade:t2"])]
#[case::everything(3, &["pick:2025-1-team-1", "player:P123", "player:P9", "trade:t1", "trade:t2"])]
fn test_player_lineage_by_depth(#[case] depth: usize, #[case] expected: &[&str]) {
    let graph = build_graph(&history());

    let sub = extract_subgraph(&graph, &RootSelector::Player(PlayerId::new("P123")), depth);

    let (nodes, _) = ids(&sub);
    assert_eq!(nodes, expected);
}

#[test]
fn test_subgraph_keeps_stored_edge_direction() {
    let graph = build_graph(&history());

    let sub = extract_subgraph(&graph, &pick_root(), 1);

    for edge in sub.edges.values() {
        match edge.kind {
            EdgeKind::Traded => assert!(edge.from.as_str().starts_with("trade:")),
            EdgeKind::Became => assert_eq!(edge.to.as_str(), "player:P123"),
        }
    }
    assert_eq!(sub.edge_count(), 3);
}

#[test]
fn test_absent_root_is_a_single_synthetic_node() {
    let graph = build_graph(&history());

    let sub = extract_subgraph(&graph, &RootSelector::Player(PlayerId::new("P404")), 5);

    assert_eq!(sub.node_count(), 1);
    assert_eq!(sub.edge_count(), 0);
    let node = sub.node(&NodeId::player(&PlayerId::new("P404"))).unwrap();
    assert_eq!(node.kind(), NodeKind::Player);
}

#[test]
fn test_non_completed_trades_still_appear() {
    let mut pending = trade("t3", "2025-04-01", vec![("Team 4", vec![player("P9")])]);
    pending.status = TradeStatus::Pending;
    let mut trades = history();
    trades.push(pending);

    let graph = build_graph(&trades);

    let Some(GraphNode::Trade(node)) = graph.node(&NodeId::trade(&TradeId::new("t3"))) else {
        panic!("expected trade node");
    };
    assert_eq!(node.status, TradeStatus::Pending);
    assert_eq!(node.teams, vec!["Team 4".to_string()]);
}
