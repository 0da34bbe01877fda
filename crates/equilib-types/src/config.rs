//! Configuration types for reconciliation and proposal generation.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Currency, constants};

/// Which balance components enter a side's total.
///
/// The net contribution of one balance record is
/// `balance + credit − debt − loan_amount`, with each of the optional
/// components gated by its flag. Every observed caller includes all
/// three, hence the all-true default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SumOptions {
    pub include_debt: bool,
    pub include_credit: bool,
    pub include_loan: bool,
}

impl Default for SumOptions {
    fn default() -> Self {
        Self {
            include_debt: true,
            include_credit: true,
            include_loan: true,
        }
    }
}

/// Per-currency proposal policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyPolicy {
    /// Absolute discrepancy below which no actionable proposal exists.
    pub threshold: Decimal,
    /// Whether below-threshold discrepancies are still surfaced (as
    /// MODERATE drafts) rather than suppressed entirely.
    pub surface_minor: bool,
}

impl CurrencyPolicy {
    /// Always-propose policy: zero threshold.
    #[must_use]
    pub fn always() -> Self {
        Self {
            threshold: Decimal::ZERO,
            surface_minor: false,
        }
    }
}

/// Policy driving proposal generation and persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalPolicy {
    /// Per-currency overrides; anything else uses [`CurrencyPolicy::always`].
    pub currencies: HashMap<Currency, CurrencyPolicy>,
    /// Fixed margin added to the market quote for the suggested price.
    pub price_markup: Decimal,
    /// Fraction of the discrepancy to propose trading (1 = the whole gap).
    pub amount_fraction: Decimal,
    /// Pending proposals expire after this many minutes, when set.
    pub expiry_minutes: Option<i64>,
}

impl ProposalPolicy {
    /// The production policy observed for the exchange: fiat TOMAN
    /// discrepancies under 500 are suppressed outright, stable-coin USDT
    /// discrepancies under 10 stay visible as moderate, everything else
    /// always proposes.
    #[must_use]
    pub fn standard() -> Self {
        let mut currencies = HashMap::new();
        currencies.insert(
            Currency::new("TOMAN"),
            CurrencyPolicy {
                threshold: Decimal::new(constants::DEFAULT_FIAT_THRESHOLD, 0),
                surface_minor: false,
            },
        );
        currencies.insert(
            Currency::new("USDT"),
            CurrencyPolicy {
                threshold: Decimal::new(constants::DEFAULT_STABLECOIN_THRESHOLD, 0),
                surface_minor: true,
            },
        );
        Self {
            currencies,
            price_markup: Decimal::new(constants::DEFAULT_PRICE_MARKUP, 0),
            amount_fraction: Decimal::ONE,
            expiry_minutes: None,
        }
    }

    /// The effective policy for a currency.
    #[must_use]
    pub fn policy_for(&self, currency: &Currency) -> CurrencyPolicy {
        self.currencies
            .get(currency)
            .copied()
            .unwrap_or_else(CurrencyPolicy::always)
    }

    /// Expiration deadline for a proposal created at `now`, if any.
    #[must_use]
    pub fn expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.expiry_minutes.map(|m| now + Duration::minutes(m))
    }
}

impl Default for ProposalPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_options_default_includes_all() {
        let opts = SumOptions::default();
        assert!(opts.include_debt);
        assert!(opts.include_credit);
        assert!(opts.include_loan);
    }

    #[test]
    fn standard_policy_thresholds() {
        let policy = ProposalPolicy::standard();
        let toman = policy.policy_for(&Currency::new("toman"));
        assert_eq!(toman.threshold, Decimal::new(500, 0));
        assert!(!toman.surface_minor);

        let usdt = policy.policy_for(&Currency::new("USDT"));
        assert_eq!(usdt.threshold, Decimal::new(10, 0));
        assert!(usdt.surface_minor);
    }

    #[test]
    fn unknown_currency_always_proposes() {
        let policy = ProposalPolicy::standard();
        let other = policy.policy_for(&Currency::new("EUR"));
        assert_eq!(other.threshold, Decimal::ZERO);
        assert!(!other.surface_minor);
    }

    #[test]
    fn expiry_derives_from_minutes() {
        let mut policy = ProposalPolicy::standard();
        let now = Utc::now();
        assert_eq!(policy.expires_at(now), None);

        policy.expiry_minutes = Some(30);
        assert_eq!(policy.expires_at(now), Some(now + Duration::minutes(30)));
    }

    #[test]
    fn policy_serde_roundtrip() {
        let policy = ProposalPolicy::standard();
        let json = serde_json::to_string(&policy).unwrap();
        let back: ProposalPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back.price_markup, policy.price_markup);
        assert_eq!(
            back.policy_for(&Currency::new("TOMAN")),
            policy.policy_for(&Currency::new("TOMAN"))
        );
    }
}
