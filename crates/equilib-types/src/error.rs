//! Error types for the Equilib reconciliation engine.
//!
//! All errors use the `EQ_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Proposal lifecycle errors
//! - 2xx: Form validation errors
//! - 3xx: Wizard / workflow errors
//! - 4xx: Transaction service errors
//! - 5xx: Receipt service errors
//! - 9xx: General / internal errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{ProposalId, ProposalStatus, TraderId, WizardStep};

/// Central error enum for all Equilib operations.
#[derive(Debug, Error)]
pub enum EquilibError {
    // =================================================================
    // Proposal Errors (1xx)
    // =================================================================
    /// The requested proposal does not exist in the store.
    #[error("EQ_ERR_100: Proposal not found: {0}")]
    ProposalNotFound(ProposalId),

    /// The operation requires a PENDING proposal.
    #[error("EQ_ERR_101: Proposal is {status}, not PENDING")]
    ProposalNotPending { status: ProposalStatus },

    /// Approval lost the compare-and-swap: another trader confirmed first.
    #[error("EQ_ERR_102: Proposal already confirmed by trader {by}")]
    ProposalAlreadyConfirmed { by: TraderId },

    /// The proposal's expiration time elapsed while it was still pending.
    #[error("EQ_ERR_103: Proposal expired: {0}")]
    ProposalExpired(ProposalId),

    /// The operation requires a CONFIRMED proposal.
    #[error("EQ_ERR_104: Proposal is {status}, not CONFIRMED")]
    ProposalNotConfirmed { status: ProposalStatus },

    // =================================================================
    // Validation Errors (2xx)
    // =================================================================
    /// A required form field is missing or empty.
    #[error("EQ_ERR_200: Missing required field: {field}")]
    MissingField { field: String },

    /// A numeric form field is present but not a usable amount.
    #[error("EQ_ERR_201: Invalid amount: {value}")]
    InvalidAmount { value: Decimal },

    /// A new counterparty was selected without full identification.
    #[error("EQ_ERR_202: Incomplete counterparty details: missing {missing}")]
    IncompleteCounterparty { missing: String },

    // =================================================================
    // Wizard Errors (3xx)
    // =================================================================
    /// Next was requested from the terminal step.
    #[error("EQ_ERR_300: No step after {current}")]
    NoNextStep { current: WizardStep },

    /// Back was requested from the first step.
    #[error("EQ_ERR_301: No step before {current}")]
    NoPreviousStep { current: WizardStep },

    /// A persisted wizard snapshot carries a foreign version tag.
    /// Restoring an older, differently-shaped snapshot fails here
    /// explicitly instead of deserializing into the wrong shape.
    #[error("EQ_ERR_302: Wizard snapshot version mismatch: expected {expected}, found {found}")]
    SnapshotVersionMismatch { expected: u32, found: u32 },

    /// Finish was requested before the terminal step.
    #[error("EQ_ERR_303: Finish is only available from the final step, not {current}")]
    NotAtFinalStep { current: WizardStep },

    // =================================================================
    // Transaction Errors (4xx)
    // =================================================================
    /// The transaction service rejected or failed to create a transaction.
    #[error("EQ_ERR_400: Transaction creation failed: {reason}")]
    TransactionFailed { reason: String },

    // =================================================================
    // Receipt Errors (5xx)
    // =================================================================
    /// The receipt service rejected or failed an upload.
    #[error("EQ_ERR_500: Receipt upload failed: {reason}")]
    ReceiptUploadFailed { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("EQ_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("EQ_ERR_901: Serialization error: {0}")]
    Serialization(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, EquilibError>;

impl From<serde_json::Error> for EquilibError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = EquilibError::ProposalNotFound(ProposalId::new());
        let msg = format!("{err}");
        assert!(msg.starts_with("EQ_ERR_100"), "Got: {msg}");
    }

    #[test]
    fn conflict_display_names_confirmer() {
        let by = TraderId::new();
        let err = EquilibError::ProposalAlreadyConfirmed { by };
        let msg = format!("{err}");
        assert!(msg.contains("EQ_ERR_102"));
        assert!(msg.contains(&by.to_string()));
    }

    #[test]
    fn snapshot_mismatch_display() {
        let err = EquilibError::SnapshotVersionMismatch {
            expected: 1,
            found: 7,
        };
        let msg = format!("{err}");
        assert!(msg.contains("EQ_ERR_302"));
        assert!(msg.contains("expected 1"));
        assert!(msg.contains("found 7"));
    }

    #[test]
    fn all_errors_have_eq_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(EquilibError::ProposalNotPending {
                status: ProposalStatus::Completed,
            }),
            Box::new(EquilibError::MissingField {
                field: "amount".into(),
            }),
            Box::new(EquilibError::NoNextStep {
                current: WizardStep::FinalRemarks,
            }),
            Box::new(EquilibError::TransactionFailed {
                reason: "test".into(),
            }),
            Box::new(EquilibError::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("EQ_ERR_"),
                "Error missing EQ_ERR_ prefix: {msg}"
            );
        }
    }
}
