//! Trade proposal types: the actionable output of reconciliation.
//!
//! A proposal is a system- or trader-generated suggestion to buy or sell
//! an amount of a currency to close a discrepancy. Lifecycle:
//! `PENDING → CONFIRMED → COMPLETED`, or `PENDING → EXPIRED` when the
//! expiration time elapses first.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CounterpartyId, Currency, ProposalId, TraderId};

/// The trade direction of a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalType {
    /// The company must acquire the asset (users hold more).
    Buy,
    /// The company holds a surplus and must shed it.
    Sell,
}

impl std::fmt::Display for ProposalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Lifecycle status of a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalStatus {
    Pending,
    Confirmed,
    Completed,
    Expired,
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Confirmed => write!(f, "CONFIRMED"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Expired => write!(f, "EXPIRED"),
        }
    }
}

/// How actionable a generated draft is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DraftSeverity {
    /// At or above the currency's threshold — a trader should act.
    Actionable,
    /// Below threshold but surfaced for visibility (stable-coin style).
    Moderate,
}

impl std::fmt::Display for DraftSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Actionable => write!(f, "ACTIONABLE"),
            Self::Moderate => write!(f, "MODERATE"),
        }
    }
}

/// The pure-math output of proposal generation, before persistence.
///
/// Generation and persisted creation are distinct steps so a read-only
/// preview and the auto-create path share the same arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProposalDraft {
    pub currency: Currency,
    pub proposal_type: ProposalType,
    /// Absolute amount to trade (|difference| scaled by policy fraction).
    pub amount: Decimal,
    /// Market quote plus the configured markup margin.
    pub suggested_price: Decimal,
    pub severity: DraftSeverity,
}

impl ProposalDraft {
    /// Whether a trader is expected to act on this draft.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        self.severity == DraftSeverity::Actionable
    }
}

/// A persisted trade proposal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub currency: Currency,
    pub proposal_type: ProposalType,
    pub amount: Decimal,
    pub suggested_price: Decimal,
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_by: TraderId,
    pub confirmed_by: Option<TraderId>,
    pub counterparty_id: Option<CounterpartyId>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Proposal {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == ProposalStatus::Pending
    }

    /// A pending proposal whose expiration time has elapsed.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.status == ProposalStatus::Pending
            && self.expires_at.is_some_and(|deadline| deadline <= now)
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Proposal {
    pub fn dummy_pending(currency: &str, amount: Decimal) -> Self {
        Self {
            id: ProposalId::new(),
            currency: Currency::new(currency),
            proposal_type: ProposalType::Buy,
            amount,
            suggested_price: Decimal::ZERO,
            status: ProposalStatus::Pending,
            created_at: Utc::now(),
            confirmed_at: None,
            completed_at: None,
            created_by: TraderId::new(),
            confirmed_by: None,
            counterparty_id: None,
            expires_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn status_display() {
        assert_eq!(format!("{}", ProposalStatus::Pending), "PENDING");
        assert_eq!(format!("{}", ProposalStatus::Confirmed), "CONFIRMED");
        assert_eq!(format!("{}", ProposalStatus::Completed), "COMPLETED");
        assert_eq!(format!("{}", ProposalStatus::Expired), "EXPIRED");
    }

    #[test]
    fn type_display() {
        assert_eq!(format!("{}", ProposalType::Buy), "BUY");
        assert_eq!(format!("{}", ProposalType::Sell), "SELL");
    }

    #[test]
    fn expiry_only_applies_while_pending() {
        let now = Utc::now();
        let mut p = Proposal::dummy_pending("TOMAN", Decimal::new(600, 0));
        p.expires_at = Some(now - Duration::minutes(1));
        assert!(p.is_expired_at(now));

        p.status = ProposalStatus::Confirmed;
        assert!(!p.is_expired_at(now));
    }

    #[test]
    fn unexpired_pending_is_not_expired() {
        let now = Utc::now();
        let mut p = Proposal::dummy_pending("TOMAN", Decimal::new(600, 0));
        p.expires_at = Some(now + Duration::minutes(5));
        assert!(!p.is_expired_at(now));
        assert!(p.is_pending());
    }

    #[test]
    fn proposal_serde_roundtrip() {
        let p = Proposal::dummy_pending("USDT", Decimal::new(25, 0));
        let json = serde_json::to_string(&p).unwrap();
        let back: Proposal = serde_json::from_str(&json).unwrap();
        assert_eq!(p.id, back.id);
        assert_eq!(p.currency, back.currency);
        assert_eq!(p.status, back.status);
    }
}
