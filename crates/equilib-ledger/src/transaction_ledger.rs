//! In-memory settlement transaction ledger.

use std::collections::HashMap;

use chrono::Utc;
use equilib_types::{Result, TransactionId, TransactionInfo, TransactionRecord};

use crate::service::TransactionService;

/// HashMap-backed [`TransactionService`].
#[derive(Debug, Default)]
pub struct InMemoryTransactionLedger {
    records: HashMap<TransactionId, TransactionRecord>,
}

impl InMemoryTransactionLedger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    /// Fetch one recorded transaction.
    #[must_use]
    pub fn get(&self, id: TransactionId) -> Option<TransactionRecord> {
        self.records.get(&id).cloned()
    }

    /// Number of recorded transactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TransactionService for InMemoryTransactionLedger {
    fn create(&mut self, info: TransactionInfo) -> Result<TransactionRecord> {
        let record = TransactionRecord {
            id: TransactionId::new(),
            info,
            created_at: Utc::now(),
        };
        self.records.insert(record.id, record.clone());
        Ok(record)
    }
}
