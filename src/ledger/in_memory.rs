use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::transaction::{Transaction, TransactionId, TransactionKind, TransactionStatus};

use super::{AccountSummary, ListFilter, TransactionLedger};

/// In-memory [`TransactionLedger`]: a `Vec` log in creation order and a
/// running balance table updated on each write.
///
/// The balance table is a cached projection over the log. Invariant: after
/// every `create`, `balances[a]` equals the signed sum of deltas for `a`
/// obtained by replaying the log (deposit credits `to_account`, withdrawal
/// debits `from_account`, transfer does both). The replay property test in
/// `tests/properties.rs` checks exactly this.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    log: Vec<Transaction>,
    balances: HashMap<String, Decimal>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn apply_delta(&mut self, tx: &Transaction) {
        // Both sides are initialized before the delta, so an account that is
        // only ever a deposit source still shows up with balance 0.
        self.balances.entry(tx.from_account.clone()).or_default();
        self.balances.entry(tx.to_account.clone()).or_default();

        match tx.kind {
            TransactionKind::Deposit => {
                *self.balances.entry(tx.to_account.clone()).or_default() += tx.amount;
            }
            TransactionKind::Withdrawal => {
                *self.balances.entry(tx.from_account.clone()).or_default() -= tx.amount;
            }
            TransactionKind::Transfer => {
                *self.balances.entry(tx.from_account.clone()).or_default() -= tx.amount;
                *self.balances.entry(tx.to_account.clone()).or_default() += tx.amount;
            }
        }
    }
}

impl TransactionLedger for InMemoryLedger {
    fn create(
        &mut self,
        from_account: &str,
        to_account: &str,
        amount: Decimal,
        currency: &str,
        kind: TransactionKind,
    ) -> Transaction {
        let tx = Transaction {
            id: Uuid::new_v4(),
            from_account: from_account.to_owned(),
            to_account: to_account.to_owned(),
            amount,
            currency: currency.to_ascii_uppercase(),
            kind,
            timestamp: Utc::now(),
            status: TransactionStatus::Completed,
        };

        // Log append and balance delta happen in the same &mut self scope,
        // so no reader can observe one without the other.
        self.apply_delta(&tx);
        self.log.push(tx.clone());

        debug!(
            id = %tx.id,
            kind = tx.kind.as_str(),
            from = %tx.from_account,
            to = %tx.to_account,
            amount = %tx.amount,
            "transaction recorded"
        );
        tx
    }

    fn get_by_id(&self, id: &TransactionId) -> Option<Transaction> {
        self.log.iter().find(|tx| &tx.id == id).cloned()
    }

    fn list(&self, filter: &ListFilter) -> Vec<Transaction> {
        self.log
            .iter()
            .filter(|tx| filter.matches(tx))
            .cloned()
            .collect()
    }

    fn balance(&self, account_id: &str) -> Decimal {
        self.balances.get(account_id).copied().unwrap_or_default()
    }

    fn summary(&self, account_id: &str) -> AccountSummary {
        let mut total_deposits = Decimal::ZERO;
        let mut total_withdrawals = Decimal::ZERO;
        let mut number_of_transactions = 0;
        let mut most_recent_transaction_date = None;

        for tx in self.log.iter().filter(|tx| tx.touches(account_id)) {
            number_of_transactions += 1;

            let incoming = tx.to_account == account_id
                && matches!(tx.kind, TransactionKind::Deposit | TransactionKind::Transfer);
            if incoming {
                total_deposits += tx.amount;
            }

            let outgoing = tx.from_account == account_id
                && matches!(
                    tx.kind,
                    TransactionKind::Withdrawal | TransactionKind::Transfer
                );
            if outgoing {
                total_withdrawals += tx.amount;
            }

            if most_recent_transaction_date.is_none_or(|latest| tx.timestamp > latest) {
                most_recent_transaction_date = Some(tx.timestamp);
            }
        }

        AccountSummary {
            account_id: account_id.to_owned(),
            total_deposits,
            total_withdrawals,
            number_of_transactions,
            most_recent_transaction_date,
            current_balance: self.balance(account_id),
        }
    }

    fn reset(&mut self) {
        self.log.clear();
        self.balances.clear();
        debug!("ledger reset");
    }
}
