//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

use crate::domain::{Round, Season};
use crate::lineage::PickOrigin;

/// A pick named on the command line as `season:round:slot`.
///
/// The slot is either a draft slot number or the original owner's team name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickSelector {
    /// Draft season
    pub season: Season,
    /// Draft round
    pub round: Round,
    /// Draft slot or original owner
    pub origin: PickOrigin,
}

/// Parse `season:round:slot` (e.g. `2026:1:4` or `2026:1:Gridiron Gang`).
pub fn parse_pick_selector(s: &str) -> Result<PickSelector, String> {
    let parts: Vec<&str> = s.trim().splitn(3, ':').map(str::trim).collect();
    let [season, round, slot] = parts.as_slice() else {
        return Err(format!(
            "Invalid pick '{}'. Expected format: season:round:slot (e.g., 2026:1:4)",
            s
        ));
    };

    let season: Season = season
        .parse()
        .map_err(|_| format!("Invalid season '{}'", season))?;
    let round: Round = round
        .parse()
        .ok()
        .filter(|r| *r >= 1)
        .ok_or_else(|| format!("Invalid round '{}'. Rounds start at 1", round))?;

    if slot.is_empty() {
        return Err("Pick slot cannot be empty".to_string());
    }
    let origin = match slot.parse::<u8>() {
        Ok(0) => return Err("Draft slots start at 1".to_string()),
        Ok(n) => PickOrigin::Slot(n),
        Err(_) => PickOrigin::Team((*slot).to_string()),
    };

    Ok(PickSelector {
        season,
        round,
        origin,
    })
}

/// Validate a player or trade id: non-empty after trimming.
pub fn validate_id(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("Id cannot be empty".to_string());
    }
    Ok(trimmed.to_string())
}
