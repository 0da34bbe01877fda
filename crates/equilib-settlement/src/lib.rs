//! # equilib-settlement
//!
//! **Interactive plane**: the reconciliation engine a trader reads from,
//! and the multi-step, resumable confirmation wizard they settle through.
//!
//! ## Architecture
//!
//! 1. [`ReconciliationEngine`] — fetches accounts, runs the pure
//!    reconciliation math, previews suggestions, and idempotently
//!    auto-creates pending proposals.
//! 2. [`ConfirmationWizard`] — drives one trader through
//!    `SHOW_PROPOSAL → TRANSACTION_INFO → RECEIPT_UPLOAD → FINAL_REMARKS`,
//!    checkpointing every transition so the session is resumable.
//! 3. The finish saga — ordered idempotent steps (approve,
//!    ensure-transaction, receipt uploads, complete) with an explicit
//!    partially-completed record instead of silent divergence.
//!
//! ## Settlement flow
//!
//! ```text
//! engine.auto_create() -> Proposal(PENDING)
//!     -> wizard.open()  (approve: PENDING -> CONFIRMED)
//!     -> next() x3      (transaction created at the TRANSACTION_INFO gate)
//!     -> finish()       (receipts uploaded, proposal COMPLETED)
//! ```

pub mod engine;
mod saga;
pub mod validate;
pub mod wizard;

pub use engine::{GaugeEntry, ReconciliationEngine};
pub use validate::{build_transaction_info, validate_transaction_form};
pub use wizard::{ConfirmationWizard, SettlementServices};
