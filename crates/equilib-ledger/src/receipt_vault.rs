//! In-memory receipt vault.
//!
//! Receipts are opaque upload references — a storage path, a leg kind,
//! and a description. File mechanics live in the external storage
//! service; the vault only records that an upload happened.

use equilib_types::{ReceiptId, ReceiptUpload, Result, TransactionId};

use crate::service::ReceiptService;

/// Vec-backed [`ReceiptService`].
#[derive(Debug, Default)]
pub struct InMemoryReceiptVault {
    receipts: Vec<(ReceiptId, ReceiptUpload)>,
}

impl InMemoryReceiptVault {
    #[must_use]
    pub fn new() -> Self {
        Self {
            receipts: Vec::new(),
        }
    }

    /// Number of recorded uploads.
    #[must_use]
    pub fn len(&self) -> usize {
        self.receipts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receipts.is_empty()
    }
}

impl ReceiptService for InMemoryReceiptVault {
    fn upload(&mut self, receipt: ReceiptUpload) -> Result<ReceiptId> {
        let id = ReceiptId::new();
        self.receipts.push((id, receipt));
        Ok(id)
    }

    fn list_for(&self, transaction_id: TransactionId) -> Vec<ReceiptUpload> {
        self.receipts
            .iter()
            .filter(|(_, r)| r.transaction_id == transaction_id)
            .map(|(_, r)| r.clone())
            .collect()
    }
}
