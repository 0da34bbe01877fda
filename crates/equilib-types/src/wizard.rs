//! Confirmation-wizard types: steps, form data, and the persisted snapshot.
//!
//! The wizard walks a trader through four steps:
//! **SHOW_PROPOSAL → TRANSACTION_INFO → RECEIPT_UPLOAD → FINAL_REMARKS**
//!
//! Progress is checkpointed after every transition as a versioned
//! [`WizardSnapshot`], keyed by `(ProposalId, TraderId)`, so a trader can
//! resume from exactly where they stopped — including after closing the
//! browser or losing the session.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    CounterpartyId, EquilibError, ProposalId, ReceiptKind, Result, TraderId, TransactionId,
    constants,
};

/// The four ordered steps of the confirmation wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum WizardStep {
    /// Read-only review of the proposal under settlement.
    ShowProposal,
    /// Amount, price, and counterparty entry; leaving this step creates
    /// the settlement transaction.
    TransactionInfo,
    /// Attach the settlement receipt files.
    ReceiptUpload,
    /// Closing remarks; the terminal step, from which Finish runs.
    FinalRemarks,
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShowProposal => write!(f, "SHOW_PROPOSAL"),
            Self::TransactionInfo => write!(f, "TRANSACTION_INFO"),
            Self::ReceiptUpload => write!(f, "RECEIPT_UPLOAD"),
            Self::FinalRemarks => write!(f, "FINAL_REMARKS"),
        }
    }
}

impl WizardStep {
    /// Zero-based position of this step.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::ShowProposal => 0,
            Self::TransactionInfo => 1,
            Self::ReceiptUpload => 2,
            Self::FinalRemarks => 3,
        }
    }

    /// The step at a zero-based position.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::ShowProposal),
            1 => Some(Self::TransactionInfo),
            2 => Some(Self::ReceiptUpload),
            3 => Some(Self::FinalRemarks),
            _ => None,
        }
    }

    /// The following step, if any.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// The preceding step, if any.
    #[must_use]
    pub fn back(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// Whether this is the terminal step (Finish is available here).
    #[must_use]
    pub fn is_final(self) -> bool {
        self == Self::FinalRemarks
    }
}

/// The persistence key of a wizard instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WizardKey {
    pub proposal_id: ProposalId,
    pub trader_id: TraderId,
}

impl WizardKey {
    #[must_use]
    pub fn new(proposal_id: ProposalId, trader_id: TraderId) -> Self {
        Self {
            proposal_id,
            trader_id,
        }
    }
}

/// Counterparty selection in the transaction form: either an existing
/// counterparty by id, or a brand-new one with full identification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CounterpartySelection {
    Existing { id: CounterpartyId },
    New {
        full_name: String,
        national_id: String,
        phone: String,
        bank_account: String,
    },
}

/// In-progress form data for the TRANSACTION_INFO step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionForm {
    pub amount: Option<Decimal>,
    pub price: Option<Decimal>,
    pub counterparty: Option<CounterpartySelection>,
    pub note: Option<String>,
}

/// One receipt attachment in the RECEIPT_UPLOAD step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptForm {
    pub kind: ReceiptKind,
    pub file_path: String,
    pub description: String,
    /// Set once the upload succeeded; a retried finish skips these.
    #[serde(default)]
    pub uploaded: bool,
}

/// The full in-progress form snapshot, one section per step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardData {
    pub transaction: TransactionForm,
    /// Set when the settlement transaction was created at the
    /// TRANSACTION_INFO gate; the finish saga never creates a second one.
    pub transaction_id: Option<TransactionId>,
    pub receipts: Vec<ReceiptForm>,
    pub remarks: Option<String>,
}

/// The persisted checkpoint of a wizard's progress.
///
/// Serialized to a JSON string for the wizard-state store. The version
/// tag is checked *before* field decoding: restoring a snapshot written
/// by a differently-shaped schema fails explicitly rather than silently
/// deserializing into the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardSnapshot {
    pub version: u32,
    pub step: WizardStep,
    pub data: WizardData,
}

/// Used to peek at the version tag before committing to a full decode.
#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

impl WizardSnapshot {
    #[must_use]
    pub fn new(step: WizardStep, data: WizardData) -> Self {
        Self {
            version: constants::WIZARD_SNAPSHOT_VERSION,
            step,
            data,
        }
    }

    /// Serialize to the store's JSON-string wire format.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a stored snapshot, rejecting foreign versions explicitly.
    pub fn decode(raw: &str) -> Result<Self> {
        let probe: VersionProbe = serde_json::from_str(raw)?;
        if probe.version != constants::WIZARD_SNAPSHOT_VERSION {
            return Err(EquilibError::SnapshotVersionMismatch {
                expected: constants::WIZARD_SNAPSHOT_VERSION,
                found: probe.version,
            });
        }
        Ok(serde_json::from_str(raw)?)
    }
}
