//! Reconciliation engine: the driver wiring the pure math to the
//! service boundary.
//!
//! The engine serves two paths over the same arithmetic:
//! - `suggestions()` — read-only preview, no writes anywhere
//! - `auto_create()` — persists actionable drafts as pending proposals;
//!   idempotent while the discrepancy persists (the store dedups by
//!   currency)

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use equilib_core::{compute_all, gauge_for, generate_drafts};
use equilib_ledger::{AccountDirectory, PriceFeed, ProposalStore};
use equilib_types::{
    Currency, Discrepancy, Proposal, ProposalDraft, ProposalPolicy, Result, RoleConfig,
    SumOptions, TraderId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the gauge report: a discrepancy and its bounded ratio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaugeEntry {
    pub discrepancy: Discrepancy,
    /// `clamp(user_side / company_side / 2, 0, 1)`.
    pub percent: Decimal,
}

/// Drives reconciliation: fetch accounts, compute discrepancies,
/// generate drafts, and (on request) persist proposals.
pub struct ReconciliationEngine {
    directory: Box<dyn AccountDirectory>,
    price_feed: Box<dyn PriceFeed>,
    role_config: RoleConfig,
    sum_options: SumOptions,
    policy: ProposalPolicy,
}

impl ReconciliationEngine {
    #[must_use]
    pub fn new(
        directory: Box<dyn AccountDirectory>,
        price_feed: Box<dyn PriceFeed>,
        role_config: RoleConfig,
        policy: ProposalPolicy,
    ) -> Self {
        Self {
            directory,
            price_feed,
            role_config,
            sum_options: SumOptions::default(),
            policy,
        }
    }

    /// Override which balance components enter the totals.
    #[must_use]
    pub fn with_sum_options(mut self, options: SumOptions) -> Self {
        self.sum_options = options;
        self
    }

    /// One discrepancy per currency observed across all accounts.
    pub fn discrepancies(&self) -> Result<Vec<Discrepancy>> {
        let accounts = self.directory.fetch_accounts()?;
        Ok(compute_all(&accounts, &self.role_config, self.sum_options))
    }

    /// Read-only preview of proposal drafts. No writes anywhere.
    pub fn suggestions(&self) -> Result<Vec<ProposalDraft>> {
        let discrepancies = self.discrepancies()?;
        let quotes = self.collect_quotes(&discrepancies);
        Ok(generate_drafts(&discrepancies, &self.policy, &quotes))
    }

    /// Persist every actionable draft as a pending proposal.
    ///
    /// Moderate drafts are preview-only surface and never persist.
    /// Repeated invocation while a discrepancy persists returns the
    /// already-pending proposal for that currency instead of a duplicate.
    pub fn auto_create(
        &self,
        store: &mut dyn ProposalStore,
        created_by: TraderId,
        now: DateTime<Utc>,
    ) -> Result<Vec<Proposal>> {
        let drafts = self.suggestions()?;
        let expires_at = self.policy.expires_at(now);

        let mut proposals = Vec::new();
        for draft in drafts.iter().filter(|d| d.is_actionable()) {
            proposals.push(store.create_pending(draft, created_by, expires_at, now)?);
        }

        tracing::info!(
            drafts = drafts.len(),
            created = proposals.len(),
            trader = %created_by,
            "Auto-create proposals complete"
        );
        Ok(proposals)
    }

    /// The bounded gauge ratio for every observed currency.
    pub fn gauge_report(&self) -> Result<Vec<GaugeEntry>> {
        Ok(self
            .discrepancies()?
            .into_iter()
            .map(|discrepancy| GaugeEntry {
                percent: gauge_for(&discrepancy),
                discrepancy,
            })
            .collect())
    }

    fn collect_quotes(&self, discrepancies: &[Discrepancy]) -> HashMap<Currency, Decimal> {
        let mut quotes = HashMap::new();
        for discrepancy in discrepancies {
            match self.price_feed.quote(&discrepancy.currency) {
                Ok(quote) => {
                    quotes.insert(discrepancy.currency.clone(), quote);
                }
                Err(err) => {
                    // Price at markup alone rather than failing the preview.
                    tracing::debug!(
                        currency = %discrepancy.currency,
                        error = %err,
                        "No market quote available"
                    );
                }
            }
        }
        quotes
    }
}
