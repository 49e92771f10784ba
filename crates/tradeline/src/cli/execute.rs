//! Command execution functions.
//!
//! Each function resolves against the [`App`] and renders the result in the
//! requested output mode.

use anyhow::{Context, Result};
use std::io::{self, Write};

use super::args::{BecameArgs, LineageArgs, OwnersArgs};
use crate::app::App;
use crate::domain::RosterId;
use crate::lineage::{extract_subgraph, subgraph::clamp_depth};
use crate::output::{self, OutputConfig, OutputMode};
use crate::ownership::owned_by;

/// Execute the `owners` command
pub async fn execute_owners(
    app: &App,
    args: &OwnersArgs,
    output_mode: OutputMode,
    config: &OutputConfig,
) -> Result<()> {
    let resolver = app.ownership_resolver();
    let (map, teams) = futures::join!(resolver.resolve(args.season), app.team_index(args.season));

    let rows = match args.roster {
        Some(roster) => output::ownership_rows(owned_by(&map, RosterId(roster)), &teams),
        None => output::ownership_rows(map.iter().map(|(key, slot)| (*key, slot)), &teams),
    };

    match output_mode {
        OutputMode::Json => output::print_json(&rows)?,
        OutputMode::Text => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            output::write_ownership(&mut handle, args.season, &rows, config)?;
            handle.flush()?;
        }
    }
    Ok(())
}

/// Execute the `became` command
pub async fn execute_became(
    app: &App,
    args: &BecameArgs,
    output_mode: OutputMode,
    config: &OutputConfig,
) -> Result<()> {
    let roster = RosterId(args.roster);
    let resolver = app.became_resolver();
    let resolved = resolver.resolve(args.season, args.round, roster).await;

    match output_mode {
        OutputMode::Json => output::print_json(&resolved)?,
        OutputMode::Text => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            output::write_became(
                &mut handle,
                (args.season, args.round, roster),
                resolved.as_ref(),
                config,
            )?;
        }
    }
    Ok(())
}

/// Execute the `graph` command
pub async fn execute_graph(app: &App, output_mode: OutputMode, config: &OutputConfig) -> Result<()> {
    let graph = app
        .lineage_graph()
        .await
        .context("Failed to load manual trades")?;

    match output_mode {
        OutputMode::Json => output::print_json(&graph)?,
        OutputMode::Text => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            output::write_graph(&mut handle, &graph, config)?;
        }
    }
    Ok(())
}

/// Execute the `lineage` command
pub async fn execute_lineage(
    app: &App,
    args: &LineageArgs,
    output_mode: OutputMode,
    config: &OutputConfig,
) -> Result<()> {
    let root = args
        .root
        .selector()
        .context("One of --player, --pick or --trade is required")?;
    let depth = args
        .depth
        .map(clamp_depth)
        .unwrap_or_else(|| app.config().depth());

    let graph = app
        .lineage_graph()
        .await
        .context("Failed to load manual trades")?;
    let subgraph = extract_subgraph(&graph, &root, depth);

    match output_mode {
        OutputMode::Json => output::print_json(&subgraph)?,
        OutputMode::Text => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            output::write_lineage(&mut handle, &root.node_id(), depth, &subgraph, config)?;
        }
    }
    Ok(())
}
