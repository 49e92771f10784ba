//! Manual trade ledger persisted as JSON Lines.
//!
//! Each line of the ledger file is one serialized [`TradeRecord`]. The ledger
//! is edited by hand as often as by this crate, so loading is resilient: bad
//! lines are reported as [`LedgerWarning`]s and skipped while the rest of the
//! file still loads.

use super::ManualTradeStore;
use crate::domain::{TradeId, TradeRecord};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};

/// Non-fatal problems found while loading a ledger file.
///
/// The offending line is skipped; every other trade still loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerWarning {
    /// Line was not a valid trade record
    ///
    /// **Common causes**: manual editing errors, truncated writes, a bad date.
    MalformedJson { line_number: usize, error: String },

    /// Trade parsed but is unusable (empty id, no teams)
    InvalidTrade {
        trade_id: TradeId,
        line_number: usize,
        error: String,
    },

    /// A trade id appeared more than once; the first occurrence wins
    DuplicateTrade {
        trade_id: TradeId,
        line_number: usize,
    },
}

impl LedgerWarning {
    /// The 1-based line the warning refers to.
    pub fn line_number(&self) -> usize {
        match self {
            Self::MalformedJson { line_number, .. }
            | Self::InvalidTrade { line_number, .. }
            | Self::DuplicateTrade { line_number, .. } => *line_number,
        }
    }
}

/// Check that a trade is usable by the resolvers.
fn validate_trade(trade: &TradeRecord) -> std::result::Result<(), String> {
    if trade.id.as_str().trim().is_empty() {
        return Err("trade id is empty".to_string());
    }
    if trade.teams.is_empty() {
        return Err("trade has no teams".to_string());
    }
    if let Some(team) = trade.teams.iter().find(|t| t.name.trim().is_empty()) {
        return Err(format!("team with {} assets has no name", team.assets.len()));
    }
    Ok(())
}

/// The manual trade ledger.
#[derive(Debug, Clone, Default)]
pub struct JsonlTradeLedger {
    trades: Vec<TradeRecord>,
    path: Option<PathBuf>,
}

impl JsonlTradeLedger {
    /// A ledger held only in memory; [`append`](Self::append) does not write anywhere.
    pub fn in_memory(trades: Vec<TradeRecord>) -> Self {
        Self { trades, path: None }
    }

    /// Load the ledger from a JSONL file.
    ///
    /// A missing file is treated as an empty ledger (first run).
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file exists but cannot be read. Malformed
    /// content never fails the load; it is returned as warnings instead.
    pub async fn load(path: &Path) -> Result<(Self, Vec<LedgerWarning>)> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Ledger file not found, starting empty");
            return Ok((
                Self {
                    trades: Vec::new(),
                    path: Some(path.to_path_buf()),
                },
                Vec::new(),
            ));
        }

        let file = File::open(path).await?;
        let mut lines = BufReader::new(file).lines();
        let mut trades = Vec::new();
        let mut warnings = Vec::new();
        let mut seen: HashSet<TradeId> = HashSet::new();
        let mut line_number = 0;

        while let Some(line) = lines.next_line().await? {
            line_number += 1;
            if line.trim().is_empty() {
                continue;
            }

            let trade: TradeRecord = match serde_json::from_str(&line) {
                Ok(trade) => trade,
                Err(e) => {
                    warnings.push(LedgerWarning::MalformedJson {
                        line_number,
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            if let Err(error) = validate_trade(&trade) {
                warnings.push(LedgerWarning::InvalidTrade {
                    trade_id: trade.id,
                    line_number,
                    error,
                });
                continue;
            }

            if !seen.insert(trade.id.clone()) {
                warnings.push(LedgerWarning::DuplicateTrade {
                    trade_id: trade.id,
                    line_number,
                });
                continue;
            }

            trades.push(trade);
        }

        for warning in &warnings {
            tracing::warn!(warning = ?warning, "Ledger load warning");
        }
        tracing::debug!(
            path = %path.display(),
            trades = trades.len(),
            warnings = warnings.len(),
            "Loaded manual trade ledger"
        );

        Ok((
            Self {
                trades,
                path: Some(path.to_path_buf()),
            },
            warnings,
        ))
    }

    /// Trades currently in the ledger.
    pub fn records(&self) -> &[TradeRecord] {
        &self.trades
    }

    /// Add a trade and persist the ledger.
    ///
    /// The trade is only kept in memory once the file has been written.
    ///
    /// # Errors
    ///
    /// - `Error::Ledger` if the trade is invalid or its id is already present
    /// - `Error::Io` / `Error::Json` if writing the file fails
    pub async fn append(&mut self, trade: TradeRecord) -> Result<()> {
        validate_trade(&trade).map_err(Error::Ledger)?;
        if self.trades.iter().any(|t| t.id == trade.id) {
            return Err(Error::Ledger(format!("trade {} already recorded", trade.id)));
        }
        self.trades.push(trade);
        if let Err(e) = self.save().await {
            self.trades.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Write the ledger with a write-then-rename so a crash never leaves a
    /// partially written file.
    async fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let temp_path = path.with_extension("tmp");

        let file = File::create(&temp_path).await?;
        let mut writer = BufWriter::new(file);
        for trade in &self.trades {
            let json = serde_json::to_string(trade)?;
            writer.write_all(json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
        }
        writer.flush().await?;

        tokio::fs::rename(&temp_path, path).await?;
        Ok(())
    }
}

#[async_trait]
impl ManualTradeStore for JsonlTradeLedger {
    async fn trades(&self) -> Result<Vec<TradeRecord>> {
        Ok(self.trades.clone())
    }
}
