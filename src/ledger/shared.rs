use std::sync::{Arc, RwLock};

use rust_decimal::Decimal;

use crate::transaction::{Transaction, TransactionId, TransactionKind};

use super::in_memory::InMemoryLedger;
use super::{AccountSummary, ListFilter, TransactionLedger};

/// Cloneable handle to one [`InMemoryLedger`] behind a reader-writer lock,
/// for hosts that serve requests from multiple threads.
///
/// `create` and `reset` take the write lock, so the log append and the
/// balance delta are one indivisible unit: a concurrent reader can never
/// observe a transaction whose balance effects are only half-applied.
/// Reads run concurrently with each other.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<RwLock<InMemoryLedger>>,
}

impl SharedLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(
        &self,
        from_account: &str,
        to_account: &str,
        amount: Decimal,
        currency: &str,
        kind: TransactionKind,
    ) -> Transaction {
        self.inner
            .write()
            .unwrap()
            .create(from_account, to_account, amount, currency, kind)
    }

    pub fn get_by_id(&self, id: &TransactionId) -> Option<Transaction> {
        self.inner.read().unwrap().get_by_id(id)
    }

    pub fn list(&self, filter: &ListFilter) -> Vec<Transaction> {
        self.inner.read().unwrap().list(filter)
    }

    pub fn balance(&self, account_id: &str) -> Decimal {
        self.inner.read().unwrap().balance(account_id)
    }

    pub fn summary(&self, account_id: &str) -> AccountSummary {
        self.inner.read().unwrap().summary(account_id)
    }

    pub fn reset(&self) {
        self.inner.write().unwrap().reset();
    }
}
