//! Gauge projection: a bounded visual ratio per discrepancy.
//!
//! Maps the two side totals to a 0..=1 ratio for a dashboard gauge.
//! Division by zero is a first-class, tested case here — not an error.

use equilib_types::Discrepancy;
use rust_decimal::Decimal;

/// `clamp(user / company / 2, 0, 1)`, with the degenerate cases:
/// - both sides zero → 0.5 (perfectly balanced, nothing held)
/// - company zero, user positive → 1
/// - company zero, user zero-or-negative → 0
#[must_use]
pub fn gauge_percent(user_side: Decimal, company_side: Decimal) -> Decimal {
    if company_side.is_zero() {
        if user_side.is_zero() {
            return Decimal::new(5, 1); // 0.5
        }
        if user_side > Decimal::ZERO {
            return Decimal::ONE;
        }
        return Decimal::ZERO;
    }
    let ratio = user_side / company_side / Decimal::TWO;
    ratio.clamp(Decimal::ZERO, Decimal::ONE)
}

/// The gauge ratio of a discrepancy.
#[must_use]
pub fn gauge_for(discrepancy: &Discrepancy) -> Decimal {
    gauge_percent(discrepancy.user_side, discrepancy.company_side)
}
