//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Info/Reference: cyan   (roster ids, node ids)
//!   - Success:        green  (resolved players)
//!   - Warning:        yellow (traded slots, ledger warnings)
//!   - Accent:         magenta (picks)
//!   - Muted:          dimmed (history lines, field labels)
//!   - Emphasis:       bold   (section headers)

use super::OutputConfig;
use crate::lineage::NodeKind;
use colored::Colorize;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "info" color (cyan) to text.
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Color a node label by its kind.
pub(crate) fn colorize_kind(kind: NodeKind, text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    match kind {
        NodeKind::Player => text.green().to_string(),
        NodeKind::Pick => text.magenta().to_string(),
        NodeKind::Trade => text.cyan().to_string(),
    }
}
