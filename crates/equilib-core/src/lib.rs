//! # equilib-core
//!
//! **Pure reconciliation plane for Equilib.**
//!
//! The compute plane takes accounts-with-balances and produces
//! discrepancies and trade-proposal drafts. It has:
//!
//! - **Zero side effects**: no stores, no service calls, no clocks
//! - **Deterministic output**: same accounts -> same discrepancies in
//!   the same order
//! - **Runtime currency discovery**: the currency set is the union of
//!   observed balance codes, never a fixed list
//!
//! ```text
//! accounts -> classify -> sum_side -> Discrepancy -> ProposalDraft
//! ```

pub mod aggregator;
pub mod calculator;
pub mod classifier;
pub mod gauge;
pub mod generator;

pub use aggregator::sum_side;
pub use calculator::{SideTotals, compute_all, compute_discrepancy, observed_currencies, side_totals};
pub use classifier::{Partition, classify, partition};
pub use gauge::{gauge_for, gauge_percent};
pub use generator::generate_drafts;
