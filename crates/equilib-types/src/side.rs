//! Side classification types.
//!
//! Every account belongs to exactly one side for reconciliation:
//! `COMPANY`, `USER`, or `EXCLUDED`. The side is a pure function of the
//! account's role labels and the configured role-name sets.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The reconciliation partition an account belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Company-held account; contributes to the company-side total.
    Company,
    /// User-held account; contributes to the user-side total.
    User,
    /// Out of scope for the totals (still retained for audit).
    Excluded,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Company => write!(f, "COMPANY"),
            Self::User => write!(f, "USER"),
            Self::Excluded => write!(f, "EXCLUDED"),
        }
    }
}

/// Configured role-name sets driving classification.
///
/// All sets hold lowercase labels; the constructor lowercases whatever
/// it is given. Precedence: `exclude` wins over everything, then
/// `company_side`, then `user_side`; matching none is `EXCLUDED`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleConfig {
    pub exclude: HashSet<String>,
    pub company_side: HashSet<String>,
    pub user_side: HashSet<String>,
}

impl RoleConfig {
    #[must_use]
    pub fn new<I, S>(exclude: I, company_side: I, user_side: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lower = |labels: I| -> HashSet<String> {
            labels
                .into_iter()
                .map(|l| l.as_ref().trim().to_lowercase())
                .collect()
        };
        Self {
            exclude: lower(exclude),
            company_side: lower(company_side),
            user_side: lower(user_side),
        }
    }

    /// The default back-office partition: company staff roles on one
    /// side, customer roles on the other, test accounts out of scope.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(
            vec!["test", "suspended"],
            vec!["company", "admin", "operator", "treasury"],
            vec!["user", "customer"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_display() {
        assert_eq!(format!("{}", Side::Company), "COMPANY");
        assert_eq!(format!("{}", Side::User), "USER");
        assert_eq!(format!("{}", Side::Excluded), "EXCLUDED");
    }

    #[test]
    fn role_config_lowercases_input() {
        let cfg = RoleConfig::new(vec!["TEST"], vec!["Company"], vec![" User "]);
        assert!(cfg.exclude.contains("test"));
        assert!(cfg.company_side.contains("company"));
        assert!(cfg.user_side.contains("user"));
    }

    #[test]
    fn standard_config_partitions() {
        let cfg = RoleConfig::standard();
        assert!(cfg.company_side.contains("treasury"));
        assert!(cfg.user_side.contains("customer"));
        assert!(cfg.exclude.contains("test"));
    }

    #[test]
    fn side_serde_roundtrip() {
        let side = Side::Company;
        let json = serde_json::to_string(&side).unwrap();
        let back: Side = serde_json::from_str(&json).unwrap();
        assert_eq!(side, back);
    }
}
