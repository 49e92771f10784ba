//! Team name resolution.
//!
//! The manual ledger refers to teams by display name while the platform uses
//! numeric roster ids. [`TeamIndex`] bridges the two: names are compared
//! trimmed and case-insensitively, owner ids resolve to their roster, and
//! configured aliases cover renamed teams.

use crate::domain::{Roster, RosterId};
use std::collections::{BTreeMap, HashMap};

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Lookup from team names to roster ids, and back.
#[derive(Debug, Clone, Default)]
pub struct TeamIndex {
    by_name: HashMap<String, RosterId>,
    names: HashMap<RosterId, String>,
}

impl TeamIndex {
    /// Index the rosters of a season plus any configured aliases.
    ///
    /// Aliases are added last but never shadow a real team name.
    pub fn new(rosters: &[Roster], aliases: &BTreeMap<String, RosterId>) -> Self {
        let mut index = Self::default();
        for roster in rosters {
            index.by_name.insert(normalize(&roster.team_name), roster.id);
            index.names.insert(roster.id, roster.team_name.clone());
        }
        for roster in rosters {
            index
                .by_name
                .entry(normalize(&roster.owner_id))
                .or_insert(roster.id);
        }
        for (alias, roster) in aliases {
            index.by_name.entry(normalize(alias)).or_insert(*roster);
        }
        index
    }

    /// Roster id for a team name, owner id or alias.
    pub fn resolve(&self, name: &str) -> Option<RosterId> {
        self.by_name.get(&normalize(name)).copied()
    }

    /// Display name of a roster, falling back to `Roster <id>`.
    pub fn name_of(&self, roster: RosterId) -> String {
        self.names
            .get(&roster)
            .cloned()
            .unwrap_or_else(|| format!("Roster {roster}"))
    }
}
