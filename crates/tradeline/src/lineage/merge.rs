//! Node merging.
//!
//! The same pick or player shows up in many trades, each recording a
//! different subset of its attributes. Merging fills gaps in the node already
//! in the graph and never replaces a value it already holds.

use super::{GraphNode, PickNode, PlayerNode};

/// Fill `existing` from `incoming` only if `existing` is empty.
pub fn coalesce<T>(existing: &mut Option<T>, incoming: Option<T>) {
    if existing.is_none() {
        *existing = incoming;
    }
}

/// Merge a later sighting of a pick into the known node.
pub fn merge_pick(existing: &mut PickNode, incoming: PickNode) {
    coalesce(&mut existing.slot, incoming.slot);
    coalesce(&mut existing.original_owner, incoming.original_owner);
    coalesce(&mut existing.current_owner, incoming.current_owner);
    coalesce(&mut existing.became, incoming.became);
}

/// Merge a later sighting of a player into the known node.
pub fn merge_player(existing: &mut PlayerNode, incoming: PlayerNode) {
    coalesce(&mut existing.name, incoming.name);
    coalesce(&mut existing.position, incoming.position);
    coalesce(&mut existing.team, incoming.team);
}

/// Merge two nodes sharing an id.
///
/// Trade nodes are unique per trade and are left untouched. Nodes of
/// different kinds cannot share an id, so a kind mismatch keeps `existing`.
pub fn merge_node(existing: &mut GraphNode, incoming: GraphNode) {
    match (existing, incoming) {
        (GraphNode::Pick(known), GraphNode::Pick(seen)) => merge_pick(known, seen),
        (GraphNode::Player(known), GraphNode::Player(seen)) => merge_player(known, seen),
        (GraphNode::Trade(_), GraphNode::Trade(_)) => {}
        (known, seen) => {
            tracing::debug!(
                id = %known.id(),
                existing = ?known.kind(),
                incoming = ?seen.kind(),
                "Ignoring node of a different kind"
            );
        }
    }
}
