//! # equilib-types
//!
//! Shared types, errors, and configuration for the **Equilib**
//! reconciliation engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`TraderId`], [`ProposalId`], [`TransactionId`], [`ReceiptId`], [`CounterpartyId`], [`Currency`]
//! - **Account model**: [`Account`], [`Balance`]
//! - **Side model**: [`Side`], [`RoleConfig`]
//! - **Discrepancy model**: [`Discrepancy`]
//! - **Proposal model**: [`Proposal`], [`ProposalDraft`], [`ProposalType`], [`ProposalStatus`], [`DraftSeverity`]
//! - **Wizard model**: [`WizardStep`], [`WizardKey`], [`WizardData`], [`WizardSnapshot`], [`CounterpartySelection`]
//! - **Transaction model**: [`TransactionInfo`], [`TransactionRecord`], [`ReceiptUpload`], [`ReceiptKind`]
//! - **Settlement audit**: [`SettlementRecord`], [`SettlementOutcome`], [`SettlementStep`]
//! - **Configuration**: [`SumOptions`], [`ProposalPolicy`], [`CurrencyPolicy`]
//! - **Errors**: [`EquilibError`] with `EQ_ERR_` prefix codes

pub mod account;
pub mod config;
pub mod constants;
pub mod discrepancy;
pub mod error;
pub mod ids;
pub mod proposal;
pub mod settlement;
pub mod side;
pub mod transaction;
pub mod wizard;

// Re-export all primary types at crate root for ergonomic imports:
//   use equilib_types::{Account, Proposal, WizardStep, ...};

pub use account::*;
pub use config::*;
pub use discrepancy::*;
pub use error::*;
pub use ids::*;
pub use proposal::*;
pub use settlement::*;
pub use side::*;
pub use transaction::*;
pub use wizard::*;

// Constants are accessed via `equilib_types::constants::FOO`
// (not re-exported to avoid name collisions).
