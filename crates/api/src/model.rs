use crate::uuid::PlayerUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A player as tracked by the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub uuid: PlayerUuid,
    /// Preferred network language, `None` means "use the client language".
    #[serde(default)]
    pub language: Option<String>,
    /// Network operator flag, `None` when not fetched.
    #[serde(default, rename = "op")]
    pub operator: Option<bool>,
    #[serde(rename = "last_seen")]
    pub last_seen: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    AlreadyLinked,
    Token(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct IncrementResult {
    pub success: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Success,
    Failure,
    #[serde(other)]
    Unknown,
}

pub const INSUFFICIENT_FUNDS_MESSAGE: &str = "Specified payer does not have enough coins.";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransactionResult {
    pub status: TransactionStatus,
    #[serde(default)]
    pub message: Option<String>,
}

impl TransactionResult {
    pub fn is_success(&self) -> bool {
        self.status == TransactionStatus::Success
    }

    /// The payer could not afford the transaction.
    pub fn is_insufficient_funds(&self) -> bool {
        self.status == TransactionStatus::Failure
            && self.message.as_deref() == Some(INSUFFICIENT_FUNDS_MESSAGE)
    }
}

/// Statistics of one player, grouped by category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub uuid: PlayerUuid,
    #[serde(default)]
    pub stats: BTreeMap<String, BTreeMap<String, i64>>,
}

impl PlayerStats {
    pub fn get(&self, category: &str, key: &str) -> Option<i64> {
        self.stats.get(category)?.get(key).copied()
    }
}
