//! Side classification: which reconciliation side an account belongs to.
//!
//! Classification is total — every account lands in exactly one of
//! `COMPANY`, `USER`, `EXCLUDED`; there are no error cases. Role labels
//! are compared lowercase against the configured sets. Precedence:
//! exclude wins over everything, then company, then user; an account
//! matching no set (including one with no roles at all) is excluded.

use equilib_types::{Account, RoleConfig, Side};

/// Assign an account to its reconciliation side.
#[must_use]
pub fn classify(account: &Account, config: &RoleConfig) -> Side {
    let labels: Vec<String> = account
        .roles
        .iter()
        .map(|r| r.trim().to_lowercase())
        .collect();

    if labels.iter().any(|l| config.exclude.contains(l)) {
        return Side::Excluded;
    }
    if labels.iter().any(|l| config.company_side.contains(l)) {
        return Side::Company;
    }
    if labels.iter().any(|l| config.user_side.contains(l)) {
        return Side::User;
    }
    Side::Excluded
}

/// The disjoint, exhaustive partition of a set of accounts.
///
/// The excluded partition contributes nothing to the totals but is kept
/// for audit and reporting.
#[derive(Debug, Default)]
pub struct Partition<'a> {
    pub company: Vec<&'a Account>,
    pub user: Vec<&'a Account>,
    pub excluded: Vec<&'a Account>,
}

impl Partition<'_> {
    /// Total number of accounts across all three sides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.company.len() + self.user.len() + self.excluded.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition accounts into company / user / excluded sides.
#[must_use]
pub fn partition<'a>(accounts: &'a [Account], config: &RoleConfig) -> Partition<'a> {
    let mut out = Partition::default();
    for account in accounts {
        match classify(account, config) {
            Side::Company => out.company.push(account),
            Side::User => out.user.push(account),
            Side::Excluded => out.excluded.push(account),
        }
    }
    out
}
