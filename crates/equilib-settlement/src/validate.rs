//! Transaction-form validation — the hard gate before any service call.
//!
//! Violations are caught locally and surfaced inline; nothing invalid
//! ever reaches the transaction service.

use equilib_types::{
    CounterpartySelection, EquilibError, Proposal, Result, TransactionForm, TransactionInfo,
};
use rust_decimal::Decimal;

/// Validate the TRANSACTION_INFO form.
///
/// Amount and price are required and strictly positive. Selecting a new
/// counterparty requires the full identification set; an existing
/// counterparty needs only its id.
pub fn validate_transaction_form(form: &TransactionForm) -> Result<()> {
    let amount = form.amount.ok_or_else(|| EquilibError::MissingField {
        field: "amount".into(),
    })?;
    if amount <= Decimal::ZERO {
        return Err(EquilibError::InvalidAmount { value: amount });
    }

    let price = form.price.ok_or_else(|| EquilibError::MissingField {
        field: "price".into(),
    })?;
    if price <= Decimal::ZERO {
        return Err(EquilibError::InvalidAmount { value: price });
    }

    match &form.counterparty {
        None => Err(EquilibError::MissingField {
            field: "counterparty".into(),
        }),
        Some(CounterpartySelection::Existing { .. }) => Ok(()),
        Some(CounterpartySelection::New {
            full_name,
            national_id,
            phone,
            bank_account,
        }) => {
            let mut missing = Vec::new();
            if full_name.trim().is_empty() {
                missing.push("full_name");
            }
            if national_id.trim().is_empty() {
                missing.push("national_id");
            }
            if phone.trim().is_empty() {
                missing.push("phone");
            }
            if bank_account.trim().is_empty() {
                missing.push("bank_account");
            }
            if missing.is_empty() {
                Ok(())
            } else {
                Err(EquilibError::IncompleteCounterparty {
                    missing: missing.join(", "),
                })
            }
        }
    }
}

/// Assemble the transaction-service payload from a validated form.
pub fn build_transaction_info(proposal: &Proposal, form: &TransactionForm) -> Result<TransactionInfo> {
    validate_transaction_form(form)?;
    // Validation guarantees the fields below are present.
    let amount = form.amount.ok_or_else(|| EquilibError::MissingField {
        field: "amount".into(),
    })?;
    let price = form.price.ok_or_else(|| EquilibError::MissingField {
        field: "price".into(),
    })?;
    let counterparty = form
        .counterparty
        .clone()
        .ok_or_else(|| EquilibError::MissingField {
            field: "counterparty".into(),
        })?;

    Ok(TransactionInfo {
        proposal_id: proposal.id,
        currency: proposal.currency.clone(),
        amount,
        price,
        counterparty,
        note: form.note.clone(),
    })
}
