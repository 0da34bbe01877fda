//! Collaborator contracts consumed by the reconciliation and settlement
//! planes.
//!
//! All traits are dyn-compatible so callers can hold boxed services. In
//! the full system these are REST adapters; here the in-memory siblings
//! in this crate implement the same contracts for single-node use and
//! tests.

use chrono::{DateTime, Utc};
use equilib_types::{
    Account, Currency, Proposal, ProposalDraft, ProposalId, ProposalStatus, ReceiptId,
    ReceiptUpload, Result, SettlementRecord, TraderId, TransactionId, TransactionInfo,
    TransactionRecord, WizardKey, WizardStep,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Read-only access to the user-management system's accounts.
pub trait AccountDirectory {
    /// All accounts with their role labels and balances.
    fn fetch_accounts(&self) -> Result<Vec<Account>>;
}

/// External market price source.
pub trait PriceFeed {
    /// The current (moving/average) quote for a currency.
    fn quote(&self, currency: &Currency) -> Result<Decimal>;
}

/// Persistence and lifecycle of trade proposals.
pub trait ProposalStore {
    /// Fetch one proposal.
    fn get(&self, id: ProposalId) -> Result<Proposal>;

    /// All proposals, unordered.
    fn list(&self) -> Vec<Proposal>;

    /// Proposals in a given status.
    fn list_by_status(&self, status: ProposalStatus) -> Vec<Proposal>;

    /// Persist a draft as a PENDING proposal.
    ///
    /// Idempotent while the discrepancy persists: if an unexpired
    /// pending proposal already exists for the draft's currency, that
    /// proposal is returned and nothing new is created.
    fn create_pending(
        &mut self,
        draft: &ProposalDraft,
        created_by: TraderId,
        expires_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<Proposal>;

    /// Compare-and-swap approval: `PENDING → CONFIRMED`.
    ///
    /// # Errors
    /// - `ProposalAlreadyConfirmed` if another trader won the swap —
    ///   never silently overwritten
    /// - `ProposalExpired` if the expiration time elapsed first
    /// - `ProposalNotPending` for completed/expired proposals
    fn approve(
        &mut self,
        id: ProposalId,
        confirmed_by: TraderId,
        now: DateTime<Utc>,
    ) -> Result<Proposal>;

    /// `CONFIRMED → COMPLETED`, once settlement artifacts are recorded.
    fn complete(&mut self, id: ProposalId, now: DateTime<Utc>) -> Result<Proposal>;

    /// Flip every pending proposal past its deadline to EXPIRED.
    /// Returns how many flipped.
    fn sweep_expired(&mut self, now: DateTime<Utc>) -> usize;

    /// Persist the outcome of a finish attempt (complete or partial).
    fn record_settlement(&mut self, record: SettlementRecord) -> Result<()>;

    /// The most recent settlement record for a proposal, if any.
    fn settlement_for(&self, proposal_id: ProposalId) -> Option<SettlementRecord>;
}

/// External ledger service creating settlement transactions.
pub trait TransactionService {
    fn create(&mut self, info: TransactionInfo) -> Result<TransactionRecord>;
}

/// External storage service for settlement receipts.
pub trait ReceiptService {
    fn upload(&mut self, receipt: ReceiptUpload) -> Result<ReceiptId>;

    /// Receipts recorded for one transaction.
    fn list_for(&self, transaction_id: TransactionId) -> Vec<ReceiptUpload>;
}

/// A persisted wizard checkpoint as the store hands it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredWizardState {
    pub key: WizardKey,
    pub step: WizardStep,
    /// The encoded [`equilib_types::WizardSnapshot`] JSON string.
    pub wizard_data: String,
    pub updated_at: DateTime<Utc>,
}

/// Persistence of wizard progress, keyed by `(ProposalId, TraderId)`.
///
/// `save` must complete before the step transition's other service
/// calls are issued, so a resumed session never starts from a
/// less-advanced checkpoint than what the trader actually reached.
pub trait WizardStateStore {
    /// Create or overwrite the checkpoint for a key.
    fn save(&mut self, key: WizardKey, step: WizardStep, wizard_data: String) -> Result<()>;

    /// The checkpoint for a key, if one exists.
    fn load(&self, key: &WizardKey) -> Result<Option<StoredWizardState>>;

    /// Drop the checkpoint (workflow completion).
    fn delete(&mut self, key: &WizardKey) -> Result<()>;
}
