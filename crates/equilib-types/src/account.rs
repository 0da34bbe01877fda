//! Account and balance types for the reconciliation model.
//!
//! Accounts are owned by the external user-management system and are
//! read-only to this engine. Each account carries a set of role labels
//! (the input to side classification) and per-currency balance records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, Currency, SumOptions};

/// A single per-currency balance record.
///
/// Every numeric field defaults to zero when absent on the wire — a
/// missing component contributes nothing, never NaN or a null
/// propagation. Invariant: a currency maps to at most one `Balance`
/// record per account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Balance {
    /// Currency code, normalized to uppercase.
    pub currency: Currency,
    /// The base signed balance component.
    #[serde(default)]
    pub balance: Decimal,
    /// Outstanding debt held against this balance.
    #[serde(default)]
    pub debt: Decimal,
    /// Credit extended on this balance.
    #[serde(default)]
    pub credit: Decimal,
    /// Open loan principal on this balance.
    #[serde(default)]
    pub loan_amount: Decimal,
}

impl Balance {
    /// A zero balance for the given currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self {
            currency,
            balance: Decimal::ZERO,
            debt: Decimal::ZERO,
            credit: Decimal::ZERO,
            loan_amount: Decimal::ZERO,
        }
    }

    /// Net contribution of this record to its side's total:
    /// `balance + credit − debt − loan_amount`, with each optional
    /// component included only when the corresponding flag is set.
    #[must_use]
    pub fn net(&self, options: SumOptions) -> Decimal {
        let mut net = self.balance;
        if options.include_credit {
            net += self.credit;
        }
        if options.include_debt {
            net -= self.debt;
        }
        if options.include_loan {
            net -= self.loan_amount;
        }
        net
    }
}

/// An account in the user-management system: identity, display name,
/// role labels, and per-currency balances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub display_name: String,
    /// Free-form role labels; compared case-insensitively against the
    /// configured role sets.
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub balances: Vec<Balance>,
}

impl Account {
    /// Look up the balance record for a currency (case-insensitive —
    /// `Currency` normalizes on construction). Returns the first match.
    #[must_use]
    pub fn balance_for(&self, currency: &Currency) -> Option<&Balance> {
        self.balances.iter().find(|b| &b.currency == currency)
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Account {
    /// An account with the given roles and a single plain balance.
    pub fn dummy(roles: &[&str], currency: &str, balance: Decimal) -> Self {
        Self {
            id: AccountId::new(),
            display_name: format!("account-{}", roles.join("-")),
            roles: roles.iter().map(ToString::to_string).collect(),
            balances: vec![Balance {
                currency: Currency::new(currency),
                balance,
                debt: Decimal::ZERO,
                credit: Decimal::ZERO,
                loan_amount: Decimal::ZERO,
            }],
        }
    }

    /// An account with roles and no balances at all.
    pub fn dummy_empty(roles: &[&str]) -> Self {
        Self {
            id: AccountId::new(),
            display_name: format!("account-{}", roles.join("-")),
            roles: roles.iter().map(ToString::to_string).collect(),
            balances: Vec::new(),
        }
    }
}
