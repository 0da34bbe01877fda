//! Per-currency discrepancy between the two reconciliation sides.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Currency, ProposalType};

/// The signed gap between aggregated user-side and company-side totals
/// for one currency.
///
/// Sign convention: a positive `difference` means users collectively hold
/// more than the company — the company must acquire the asset (BUY). A
/// negative difference means the company holds a surplus (SELL).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Discrepancy {
    pub currency: Currency,
    pub user_side: Decimal,
    pub company_side: Decimal,
    /// `user_side - company_side`.
    pub difference: Decimal,
}

impl Discrepancy {
    #[must_use]
    pub fn new(currency: Currency, user_side: Decimal, company_side: Decimal) -> Self {
        Self {
            currency,
            user_side,
            company_side,
            difference: user_side - company_side,
        }
    }

    /// Whether the two sides are exactly in balance.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.difference.is_zero()
    }

    /// The trade direction that would close this discrepancy, if any.
    #[must_use]
    pub fn proposal_type(&self) -> Option<ProposalType> {
        if self.difference.is_zero() {
            None
        } else if self.difference > Decimal::ZERO {
            Some(ProposalType::Buy)
        } else {
            Some(ProposalType::Sell)
        }
    }
}
