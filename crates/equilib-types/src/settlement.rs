//! Settlement audit types for the finish saga.
//!
//! The finish of a confirmation workflow is an ordered list of idempotent
//! steps (approve, ensure-transaction, receipt uploads, complete). There
//! is no rollback: a failure mid-sequence leaves earlier successes in
//! place and records an explicit partially-completed outcome so operators
//! can reconcile manually instead of discovering silent divergence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ProposalId, ReceiptKind, TraderId, TransactionId};

/// One step of the finish saga.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettlementStep {
    /// CAS-approve the proposal (skipped when already confirmed by the
    /// same trader).
    Approve,
    /// Create the settlement transaction unless one already exists.
    EnsureTransaction,
    /// Upload one receipt leg.
    UploadReceipt(ReceiptKind),
    /// Flip the proposal to COMPLETED and drop the wizard state.
    Complete,
}

impl std::fmt::Display for SettlementStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approve => write!(f, "APPROVE"),
            Self::EnsureTransaction => write!(f, "ENSURE_TRANSACTION"),
            Self::UploadReceipt(kind) => write!(f, "UPLOAD_RECEIPT_{kind}"),
            Self::Complete => write!(f, "COMPLETE"),
        }
    }
}

/// A saga step that did not succeed, with the service's reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedStep {
    pub step: SettlementStep,
    pub reason: String,
}

/// How a finish attempt ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementOutcome {
    /// Every step succeeded; the proposal is COMPLETED.
    Completed,
    /// At least one step failed after earlier steps had committed. The
    /// proposal stays CONFIRMED and the wizard state stays resumable.
    PartiallyCompleted {
        completed: Vec<SettlementStep>,
        failed: Vec<FailedStep>,
    },
}

impl SettlementOutcome {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// The persisted record of a finish attempt, keyed by proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRecord {
    pub proposal_id: ProposalId,
    pub trader_id: TraderId,
    pub transaction_id: Option<TransactionId>,
    pub outcome: SettlementOutcome,
    pub recorded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_display() {
        assert_eq!(format!("{}", SettlementStep::Approve), "APPROVE");
        assert_eq!(
            format!("{}", SettlementStep::UploadReceipt(ReceiptKind::Fiat)),
            "UPLOAD_RECEIPT_FIAT"
        );
        assert_eq!(
            format!(
                "{}",
                SettlementStep::UploadReceipt(ReceiptKind::StableCoin)
            ),
            "UPLOAD_RECEIPT_STABLE_COIN"
        );
    }

    #[test]
    fn outcome_completeness() {
        assert!(SettlementOutcome::Completed.is_complete());
        let partial = SettlementOutcome::PartiallyCompleted {
            completed: vec![SettlementStep::Approve],
            failed: vec![FailedStep {
                step: SettlementStep::UploadReceipt(ReceiptKind::Fiat),
                reason: "storage unavailable".into(),
            }],
        };
        assert!(!partial.is_complete());
    }

    #[test]
    fn record_serde_roundtrip() {
        let record = SettlementRecord {
            proposal_id: ProposalId::new(),
            trader_id: TraderId::new(),
            transaction_id: Some(TransactionId::new()),
            outcome: SettlementOutcome::Completed,
            recorded_at: Utc::now(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: SettlementRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
