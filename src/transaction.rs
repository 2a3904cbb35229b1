use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub type TransactionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Transfer,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
            TransactionKind::Transfer => "transfer",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("Type must be one of: deposit, withdrawal, transfer")]
pub struct UnknownKind;

impl FromStr for TransactionKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deposit" => Ok(TransactionKind::Deposit),
            "withdrawal" => Ok(TransactionKind::Withdrawal),
            "transfer" => Ok(TransactionKind::Transfer),
            _ => Err(UnknownKind),
        }
    }
}

/// Only `completed` is modeled; there is no pending/failed lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Completed,
}

/// One immutable deposit, withdrawal or transfer record.
///
/// Once appended to the ledger a transaction is never mutated or removed.
/// Serialized field names follow the wire format of the surrounding API
/// (camelCase, `type` for the kind).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub from_account: String,
    pub to_account: String,
    pub amount: Decimal,
    pub currency: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub timestamp: DateTime<Utc>,
    pub status: TransactionStatus,
}

impl Transaction {
    /// Whether the account appears on either side of the transaction.
    pub fn touches(&self, account_id: &str) -> bool {
        self.from_account == account_id || self.to_account == account_id
    }
}
