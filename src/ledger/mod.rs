use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::transaction::{Transaction, TransactionId, TransactionKind};

pub mod in_memory;
pub mod shared;

/// Optional, independently combinable criteria for [`TransactionLedger::list`].
///
/// Filters are conjunctive: a transaction is returned only if it matches
/// every filter that is set. Timestamp bounds are inclusive on both ends.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    /// Matches transactions where the account appears on either side.
    pub account_id: Option<String>,
    pub kind: Option<TransactionKind>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl ListFilter {
    fn matches(&self, tx: &Transaction) -> bool {
        if let Some(account_id) = &self.account_id {
            if !tx.touches(account_id) {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if tx.kind != kind {
                return false;
            }
        }
        if let Some(from) = self.from {
            if tx.timestamp < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if tx.timestamp > to {
                return false;
            }
        }
        true
    }
}

/// Per-account activity rollup, computed over every transaction touching
/// the account on either side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub account_id: String,
    /// Credits received: incoming deposits plus incoming transfers.
    pub total_deposits: Decimal,
    /// Debits sent: outgoing withdrawals plus outgoing transfers.
    pub total_withdrawals: Decimal,
    pub number_of_transactions: usize,
    pub most_recent_transaction_date: Option<DateTime<Utc>>,
    pub current_balance: Decimal,
}

/// The transaction ledger: an append-only log plus a derived per-account
/// balance table kept consistent with the log on every write.
///
/// Input to [`create`](TransactionLedger::create) is assumed to have passed
/// [`validate`](crate::validator::validate) already; at this layer there is
/// no failure mode. Absence (`get_by_id` miss, unseen account) is a normal
/// outcome, not an error.
pub trait TransactionLedger {
    /// Records a pre-validated transaction: stamps a fresh id and the current
    /// time, appends to the log and applies the balance delta in the same
    /// step. Accounts are initialized to 0 on first reference.
    fn create(
        &mut self,
        from_account: &str,
        to_account: &str,
        amount: Decimal,
        currency: &str,
        kind: TransactionKind,
    ) -> Transaction;

    fn get_by_id(&self, id: &TransactionId) -> Option<Transaction>;

    /// Transactions matching the filter, in creation order.
    fn list(&self, filter: &ListFilter) -> Vec<Transaction>;

    /// Current derived balance; 0 for accounts the ledger has never seen.
    fn balance(&self, account_id: &str) -> Decimal;

    fn summary(&self, account_id: &str) -> AccountSummary;

    /// Clears the log and the balance table. Intended for test isolation,
    /// never exposed as a production API.
    fn reset(&mut self);
}
