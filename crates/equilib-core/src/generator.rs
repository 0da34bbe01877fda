//! Proposal generation: turning discrepancies into trade drafts.
//!
//! Pure with respect to its inputs — persistence of a draft (assigning
//! an id, timestamps, PENDING status) is a separate store call, so the
//! read-only preview path and the auto-create path share this math.

use std::collections::HashMap;

use equilib_types::{
    Currency, Discrepancy, DraftSeverity, ProposalDraft, ProposalPolicy,
};
use rust_decimal::Decimal;

/// Generate drafts for every discrepancy worth surfacing.
///
/// Per discrepancy:
/// - a zero difference is skipped outright;
/// - below the currency's absolute threshold the draft is suppressed,
///   unless the policy flags minor visibility for that currency, in
///   which case it is surfaced with [`DraftSeverity::Moderate`];
/// - at or above threshold the draft is [`DraftSeverity::Actionable`].
///
/// The draft amount is `|difference| × amount_fraction`; the suggested
/// price is the market quote plus the configured markup. A currency with
/// no quote prices at markup alone — an absent feed never panics the
/// preview.
#[must_use]
pub fn generate_drafts(
    discrepancies: &[Discrepancy],
    policy: &ProposalPolicy,
    quotes: &HashMap<Currency, Decimal>,
) -> Vec<ProposalDraft> {
    discrepancies
        .iter()
        .filter_map(|d| draft_for(d, policy, quotes))
        .collect()
}

fn draft_for(
    discrepancy: &Discrepancy,
    policy: &ProposalPolicy,
    quotes: &HashMap<Currency, Decimal>,
) -> Option<ProposalDraft> {
    let proposal_type = discrepancy.proposal_type()?;

    let currency_policy = policy.policy_for(&discrepancy.currency);
    let gap = discrepancy.difference.abs();
    let severity = if gap >= currency_policy.threshold {
        DraftSeverity::Actionable
    } else if currency_policy.surface_minor {
        DraftSeverity::Moderate
    } else {
        return None;
    };

    let quote = quotes
        .get(&discrepancy.currency)
        .copied()
        .unwrap_or(Decimal::ZERO);

    Some(ProposalDraft {
        currency: discrepancy.currency.clone(),
        proposal_type,
        amount: gap * policy.amount_fraction,
        suggested_price: quote + policy.price_markup,
        severity,
    })
}
