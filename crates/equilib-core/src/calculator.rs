//! Equality calculation: per-currency discrepancies between the sides.
//!
//! The currency set is discovered at runtime — the union of every
//! currency code observed across all accounts' balances — so a new
//! currency appearing in the data needs no code change. Output order is
//! deterministic (sorted by currency code).

use std::collections::{BTreeMap, BTreeSet};

use equilib_types::{Account, Currency, Discrepancy, RoleConfig, SumOptions};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregator::sum_side;
use crate::classifier::partition;

/// Every currency code observed across all accounts, in sorted order.
#[must_use]
pub fn observed_currencies(accounts: &[Account]) -> BTreeSet<Currency> {
    accounts
        .iter()
        .flat_map(|account| account.balances.iter())
        .map(|balance| balance.currency.clone())
        .collect()
}

/// The discrepancy for a single currency.
///
/// Partitions the accounts, sums both sides, and takes
/// `difference = user_side − company_side`. The excluded partition is
/// computed but deliberately left out of the totals.
#[must_use]
pub fn compute_discrepancy(
    accounts: &[Account],
    currency: &Currency,
    role_config: &RoleConfig,
    options: SumOptions,
) -> Discrepancy {
    let parts = partition(accounts, role_config);
    let user_side = sum_side(&parts.user, currency, options);
    let company_side = sum_side(&parts.company, currency, options);
    Discrepancy::new(currency.clone(), user_side, company_side)
}

/// One discrepancy per observed currency, in deterministic order.
#[must_use]
pub fn compute_all(
    accounts: &[Account],
    role_config: &RoleConfig,
    options: SumOptions,
) -> Vec<Discrepancy> {
    let parts = partition(accounts, role_config);
    observed_currencies(accounts)
        .into_iter()
        .map(|currency| {
            let user_side = sum_side(&parts.user, &currency, options);
            let company_side = sum_side(&parts.company, &currency, options);
            Discrepancy::new(currency, user_side, company_side)
        })
        .collect()
}

/// Pre-aggregated totals for one currency — the server-side alternate
/// view of the same aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideTotals {
    pub user_side: Decimal,
    pub company_side: Decimal,
}

/// Per-currency totals for both sides in a single pass.
#[must_use]
pub fn side_totals(
    accounts: &[Account],
    role_config: &RoleConfig,
    options: SumOptions,
) -> BTreeMap<Currency, SideTotals> {
    let parts = partition(accounts, role_config);
    observed_currencies(accounts)
        .into_iter()
        .map(|currency| {
            let totals = SideTotals {
                user_side: sum_side(&parts.user, &currency, options),
                company_side: sum_side(&parts.company, &currency, options),
            };
            (currency, totals)
        })
        .collect()
}
