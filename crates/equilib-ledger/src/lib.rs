//! # equilib-ledger
//!
//! **Service boundary for Equilib**: the collaborator contracts the
//! settlement workflow depends on, plus in-memory reference
//! implementations.
//!
//! ## Architecture
//!
//! The reconciliation and settlement planes never talk to a backend
//! directly — they go through the traits defined here:
//!
//! 1. **AccountDirectory**: accounts with roles and balances (read-only)
//! 2. **PriceFeed**: a numeric market quote per currency
//! 3. **ProposalStore**: proposal lifecycle — idempotent pending
//!    creation, compare-and-swap approval, completion, expiration,
//!    settlement records
//! 4. **TransactionService**: settlement transaction creation
//! 5. **ReceiptService**: opaque receipt uploads
//! 6. **WizardStateStore**: the resumable wizard checkpoint
//!
//! The `InMemory*` implementations are the single-node source of truth
//! and the test substrate; a REST deployment puts adapters behind the
//! same traits.

pub mod account_directory;
pub mod price_feed;
pub mod proposal_store;
pub mod receipt_vault;
pub mod service;
pub mod transaction_ledger;
pub mod wizard_store;

pub use account_directory::InMemoryAccountDirectory;
pub use price_feed::FixedPriceFeed;
pub use proposal_store::InMemoryProposalStore;
pub use receipt_vault::InMemoryReceiptVault;
pub use service::{
    AccountDirectory, PriceFeed, ProposalStore, ReceiptService, StoredWizardState,
    TransactionService, WizardStateStore,
};
pub use transaction_ledger::InMemoryTransactionLedger;
pub use wizard_store::InMemoryWizardStore;
