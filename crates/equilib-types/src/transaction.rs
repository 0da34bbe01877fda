//! Settlement transaction and receipt types.
//!
//! Transactions and receipts are owned by external ledger services; this
//! engine references them only via their identifiers. Receipt files are
//! opaque upload references (a path and a kind), never file contents.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CounterpartySelection, Currency, ProposalId, TransactionId};

/// Which settlement leg a receipt documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReceiptKind {
    /// The fiat leg of the settlement.
    Fiat,
    /// The stable-coin leg of the settlement.
    StableCoin,
}

impl std::fmt::Display for ReceiptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fiat => write!(f, "FIAT"),
            Self::StableCoin => write!(f, "STABLE_COIN"),
        }
    }
}

/// The payload submitted to the transaction service when settling a
/// proposal. Built from the wizard's validated form data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionInfo {
    pub proposal_id: ProposalId,
    pub currency: Currency,
    pub amount: Decimal,
    pub price: Decimal,
    pub counterparty: CounterpartySelection,
    pub note: Option<String>,
}

/// A settlement transaction as recorded by the transaction service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub info: TransactionInfo,
    pub created_at: DateTime<Utc>,
}

/// A receipt upload request: one per settlement leg.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptUpload {
    pub transaction_id: TransactionId,
    /// Opaque storage path; file mechanics live elsewhere.
    pub file_path: String,
    pub file_type: ReceiptKind,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_kind_display() {
        assert_eq!(format!("{}", ReceiptKind::Fiat), "FIAT");
        assert_eq!(format!("{}", ReceiptKind::StableCoin), "STABLE_COIN");
    }

    #[test]
    fn receipt_kind_serde_roundtrip() {
        let kind = ReceiptKind::StableCoin;
        let json = serde_json::to_string(&kind).unwrap();
        let back: ReceiptKind = serde_json::from_str(&json).unwrap();
        assert_eq!(kind, back);
    }

    #[test]
    fn transaction_info_serde_roundtrip() {
        let info = TransactionInfo {
            proposal_id: ProposalId::new(),
            currency: Currency::new("toman"),
            amount: Decimal::new(600, 0),
            price: Decimal::new(61_200, 0),
            counterparty: CounterpartySelection::New {
                full_name: "A. Vendor".into(),
                national_id: "0012345678".into(),
                phone: "+98-21-000".into(),
                bank_account: "IR00-0000".into(),
            },
            note: None,
        };
        let json = serde_json::to_string(&info).unwrap();
        let back: TransactionInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back.currency, Currency::new("TOMAN"));
        assert_eq!(back.amount, info.amount);
    }
}
