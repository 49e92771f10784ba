//! Output formatting for CLI commands.
//!
//! Every command renders either human-readable text or JSON for programmatic
//! use. Text writers take any `Write` so they can be tested against a buffer.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers

pub mod color;

use crate::became::ResolvedPick;
use crate::domain::{RosterId, Round, Season, SlotKey, SlotOwnership, TransferEvent};
use crate::lineage::{EdgeKind, GraphEdge, LineageGraph, NodeId};
use crate::teams::TeamIndex;
use serde::Serialize;
use std::env;
use std::io::{self, Write};

use color::{bold, colorize_kind, dimmed, info, success, warning};

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new OutputConfig with explicit values.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `TRADELINE_COLOR`: Set to "0" or "false" to disable colors (default: true)
    pub fn from_env() -> Self {
        // Respect NO_COLOR standard (https://no-color.org/)
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("TRADELINE_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self { use_colors }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Print any serializable value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(handle, "{}", json)
}

// ============================================================================
// Ownership
// ============================================================================

/// One slot of an ownership map, with team names attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnershipRow {
    /// Roster the pick originated from
    pub original_roster: RosterId,
    /// Team name of the original roster
    pub original_team: String,
    /// Draft round
    pub round: Round,
    /// Roster holding the pick
    pub owner: RosterId,
    /// Team name of the holder
    pub owner_team: String,
    /// Manual-ledger transfers, oldest first
    pub history: Vec<TransferEvent>,
}

impl OwnershipRow {
    /// Whether the pick has left its original roster.
    pub fn is_traded(&self) -> bool {
        self.owner != self.original_roster
    }
}

/// Attach team names to ownership slots.
pub fn ownership_rows<'a>(
    slots: impl IntoIterator<Item = (SlotKey, &'a SlotOwnership)>,
    teams: &TeamIndex,
) -> Vec<OwnershipRow> {
    slots
        .into_iter()
        .map(|(key, slot)| OwnershipRow {
            original_roster: key.original_roster,
            original_team: teams.name_of(key.original_roster),
            round: key.round,
            owner: slot.owner,
            owner_team: teams.name_of(slot.owner),
            history: slot.history.clone(),
        })
        .collect()
}

/// Write an ownership table.
pub fn write_ownership<W: Write>(
    w: &mut W,
    season: Season,
    rows: &[OwnershipRow],
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{}", bold(&format!("{season} pick ownership"), config))?;
    if rows.is_empty() {
        writeln!(w, "  {}", dimmed("No draft slots found", config))?;
        return Ok(());
    }

    for row in rows {
        let slot = format!("{} R{}", row.original_team, row.round);
        let owner = if row.is_traded() {
            warning(&row.owner_team, config)
        } else {
            row.owner_team.clone()
        };
        writeln!(
            w,
            "  {:<28} {} {} {}",
            slot,
            dimmed("->", config),
            owner,
            info(&format!("[{}]", row.owner), config)
        )?;
        for event in &row.history {
            let line = format!(
                "{} {}: {} -> {}",
                event.timestamp.format("%Y-%m-%d"),
                event.trade_id,
                event.from_team,
                event.to_team
            );
            writeln!(w, "      {}", dimmed(&line, config))?;
        }
    }
    Ok(())
}

// ============================================================================
// Became
// ============================================================================

/// Write the outcome of a became lookup.
pub fn write_became<W: Write>(
    w: &mut W,
    request: (Season, Round, RosterId),
    resolved: Option<&ResolvedPick>,
    config: &OutputConfig,
) -> io::Result<()> {
    let (season, round, roster) = request;
    let Some(pick) = resolved else {
        return writeln!(
            w,
            "{}",
            dimmed(
                &format!("No player resolved for roster {roster}, {season} round {round}"),
                config
            )
        );
    };

    let player = &pick.player;
    let mut name = player
        .name
        .clone()
        .unwrap_or_else(|| player.player_id.to_string());
    let details: Vec<&str> = [player.position.as_deref(), player.team.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !details.is_empty() {
        name.push_str(&format!(" ({})", details.join(", ")));
    }

    writeln!(
        w,
        "{} Round {}, slot {}: {}",
        pick.season,
        pick.round,
        pick.draft_slot,
        success(&name, config)
    )?;
    writeln!(
        w,
        "  {} {}.{:02} {}",
        dimmed("pick", config),
        pick.round,
        pick.pick_in_round,
        dimmed(&format!("(overall {})", pick.overall_pick), config)
    )?;
    writeln!(w, "  {} {}", dimmed("player id", config), info(player.player_id.as_str(), config))
}

// ============================================================================
// Lineage graph
// ============================================================================

fn write_edge<W: Write>(w: &mut W, edge: &GraphEdge, config: &OutputConfig) -> io::Result<()> {
    let detail = match edge.kind {
        EdgeKind::Traded => match &edge.received_by {
            Some(team) => format!("traded to {team}"),
            None => "traded".to_string(),
        },
        EdgeKind::Became => "became".to_string(),
    };
    writeln!(
        w,
        "  {} -> {} {}",
        info(edge.from.as_str(), config),
        info(edge.to.as_str(), config),
        dimmed(&format!("({detail})"), config)
    )
}

/// Write node and edge counts followed by every edge.
pub fn write_graph<W: Write>(
    w: &mut W,
    graph: &LineageGraph,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{}",
        bold(
            &format!("{} nodes, {} edges", graph.node_count(), graph.edge_count()),
            config
        )
    )?;
    for edge in graph.edges.values() {
        write_edge(w, edge, config)?;
    }
    Ok(())
}

/// Write a lineage subgraph: its nodes, then its edges.
pub fn write_lineage<W: Write>(
    w: &mut W,
    root: &NodeId,
    depth: usize,
    graph: &LineageGraph,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} {}",
        bold(&format!("Lineage of {root}"), config),
        dimmed(&format!("(depth {depth})"), config)
    )?;
    if graph.edge_count() == 0 {
        writeln!(w, "  {}", dimmed("No recorded trades involve this asset", config))?;
        return Ok(());
    }

    for node in graph.nodes.values() {
        let marker = if node.id() == root { "*" } else { "-" };
        writeln!(
            w,
            "  {} {} {}",
            marker,
            colorize_kind(node.kind(), &node.label(), config),
            dimmed(&format!("[{}]", node.id()), config)
        )?;
    }
    writeln!(w)?;
    for edge in graph.edges.values() {
        write_edge(w, edge, config)?;
    }
    Ok(())
}
