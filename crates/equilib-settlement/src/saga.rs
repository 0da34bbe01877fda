//! The finish saga: ordered, idempotent settlement steps.
//!
//! `APPROVE → ENSURE_TRANSACTION → UPLOAD_RECEIPT× → COMPLETE`
//!
//! There is no rollback. A failure mid-sequence leaves every earlier
//! success standing, keeps the proposal CONFIRMED and the wizard
//! checkpoint resumable, and persists an explicit partially-completed
//! record. Every step is written to be retried safely:
//! - approve skips when this trader already holds the confirmation,
//! - the transaction is created only when no id exists yet,
//! - receipts carry an uploaded flag and are never re-sent.
//!
//! The transaction-without-receipt divergence — the case operators must
//! reconcile by hand — logs at `error` with its own message, separate
//! from a clean failure.

use chrono::{DateTime, Utc};
use equilib_ledger::{ProposalStore, ReceiptService, TransactionService};
use equilib_types::{
    EquilibError, FailedStep, Proposal, ProposalStatus, ReceiptUpload, Result, SettlementOutcome,
    SettlementRecord, SettlementStep, TraderId, WizardData,
};

use crate::validate::build_transaction_info;
use crate::wizard::SettlementServices;

/// Execute the finish saga for one proposal.
///
/// Returns the outcome; errors are reserved for the cases where nothing
/// was executed at all (approval conflict, proposal in a non-settleable
/// state).
pub(crate) fn run_finish(
    proposal: &mut Proposal,
    trader_id: TraderId,
    data: &mut WizardData,
    services: &mut SettlementServices,
    now: DateTime<Utc>,
) -> Result<SettlementOutcome> {
    let mut completed: Vec<SettlementStep> = Vec::new();
    let mut failed: Vec<FailedStep> = Vec::new();

    // 1. APPROVE — the irreversible gate. Runs before any other side
    // effect, so a conflict here aborts cleanly.
    match proposal.status {
        ProposalStatus::Pending => {
            *proposal = services.proposals.approve(proposal.id, trader_id, now)?;
            completed.push(SettlementStep::Approve);
        }
        ProposalStatus::Confirmed => match proposal.confirmed_by {
            Some(by) if by != trader_id => {
                return Err(EquilibError::ProposalAlreadyConfirmed { by });
            }
            _ => {} // already ours — nothing to repeat
        },
        status => return Err(EquilibError::ProposalNotPending { status }),
    }

    // 2. ENSURE_TRANSACTION — create only when the TRANSACTION_INFO gate
    // has not already done so.
    if data.transaction_id.is_none() {
        let step = SettlementStep::EnsureTransaction;
        match build_transaction_info(proposal, &data.transaction)
            .and_then(|info| services.transactions.create(info))
        {
            Ok(record) => {
                data.transaction_id = Some(record.id);
                completed.push(step);
            }
            Err(err) => {
                failed.push(FailedStep {
                    step,
                    reason: err.to_string(),
                });
            }
        }
    }

    // 3. UPLOAD_RECEIPT per leg. Requires a transaction to attach to;
    // legs already flagged as uploaded are skipped on retry.
    if let Some(transaction_id) = data.transaction_id {
        for form in &mut data.receipts {
            if form.uploaded {
                continue;
            }
            let step = SettlementStep::UploadReceipt(form.kind);
            let receipt = ReceiptUpload {
                transaction_id,
                file_path: form.file_path.clone(),
                file_type: form.kind,
                description: form.description.clone(),
            };
            match services.receipts.upload(receipt) {
                Ok(_) => {
                    form.uploaded = true;
                    completed.push(step);
                }
                Err(err) => {
                    tracing::error!(
                        proposal = %proposal.id,
                        transaction = %transaction_id,
                        leg = %form.kind,
                        error = %err,
                        "Settlement diverged: transaction recorded but receipt upload failed"
                    );
                    failed.push(FailedStep {
                        step,
                        reason: err.to_string(),
                    });
                }
            }
        }
    }

    // 4. COMPLETE — only a fully clean run flips the proposal.
    let outcome = if failed.is_empty() {
        *proposal = services.proposals.complete(proposal.id, now)?;
        completed.push(SettlementStep::Complete);
        tracing::info!(
            proposal = %proposal.id,
            transaction = ?data.transaction_id,
            "Settlement completed"
        );
        SettlementOutcome::Completed
    } else {
        tracing::warn!(
            proposal = %proposal.id,
            completed = completed.len(),
            failed = failed.len(),
            "Settlement incomplete; proposal stays CONFIRMED"
        );
        SettlementOutcome::PartiallyCompleted { completed, failed }
    };

    services.proposals.record_settlement(SettlementRecord {
        proposal_id: proposal.id,
        trader_id,
        transaction_id: data.transaction_id,
        outcome: outcome.clone(),
        recorded_at: now,
    })?;

    Ok(outcome)
}
