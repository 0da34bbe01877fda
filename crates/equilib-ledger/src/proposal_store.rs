//! In-memory proposal store.
//!
//! The store owns the proposal lifecycle invariants:
//! - **Idempotent pending creation**: at most one unexpired PENDING
//!   proposal per currency; repeated auto-create over the same
//!   discrepancy returns the existing proposal.
//! - **Compare-and-swap approval**: `PENDING → CONFIRMED` commits once;
//!   a second attempt is rejected with the winning confirmer, never
//!   silently overwritten.
//! - **Expiration**: a pending proposal past its deadline flips to
//!   EXPIRED and can no longer be approved.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use equilib_types::{
    EquilibError, Proposal, ProposalDraft, ProposalId, ProposalStatus, Result, SettlementRecord,
    TraderId,
};

use crate::service::ProposalStore;

/// HashMap-backed [`ProposalStore`] — the single-node source of truth.
#[derive(Debug, Default)]
pub struct InMemoryProposalStore {
    proposals: HashMap<ProposalId, Proposal>,
    settlements: HashMap<ProposalId, SettlementRecord>,
}

impl InMemoryProposalStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            proposals: HashMap::new(),
            settlements: HashMap::new(),
        }
    }

    /// Number of proposals in the store, any status.
    #[must_use]
    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }
}

impl ProposalStore for InMemoryProposalStore {
    fn get(&self, id: ProposalId) -> Result<Proposal> {
        self.proposals
            .get(&id)
            .cloned()
            .ok_or(EquilibError::ProposalNotFound(id))
    }

    fn list(&self) -> Vec<Proposal> {
        self.proposals.values().cloned().collect()
    }

    fn list_by_status(&self, status: ProposalStatus) -> Vec<Proposal> {
        self.proposals
            .values()
            .filter(|p| p.status == status)
            .cloned()
            .collect()
    }

    fn create_pending(
        &mut self,
        draft: &ProposalDraft,
        created_by: TraderId,
        expires_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<Proposal> {
        // A stale pending proposal must not satisfy the dedup check.
        self.sweep_expired(now);

        if let Some(existing) = self
            .proposals
            .values()
            .find(|p| p.is_pending() && p.currency == draft.currency)
        {
            return Ok(existing.clone());
        }

        let proposal = Proposal {
            id: ProposalId::new(),
            currency: draft.currency.clone(),
            proposal_type: draft.proposal_type,
            amount: draft.amount,
            suggested_price: draft.suggested_price,
            status: ProposalStatus::Pending,
            created_at: now,
            confirmed_at: None,
            completed_at: None,
            created_by,
            confirmed_by: None,
            counterparty_id: None,
            expires_at,
        };
        self.proposals.insert(proposal.id, proposal.clone());
        Ok(proposal)
    }

    fn approve(
        &mut self,
        id: ProposalId,
        confirmed_by: TraderId,
        now: DateTime<Utc>,
    ) -> Result<Proposal> {
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(EquilibError::ProposalNotFound(id))?;

        if proposal.is_expired_at(now) {
            proposal.status = ProposalStatus::Expired;
            return Err(EquilibError::ProposalExpired(id));
        }

        match proposal.status {
            ProposalStatus::Pending => {
                proposal.status = ProposalStatus::Confirmed;
                proposal.confirmed_at = Some(now);
                proposal.confirmed_by = Some(confirmed_by);
                Ok(proposal.clone())
            }
            ProposalStatus::Confirmed => match proposal.confirmed_by {
                Some(by) => Err(EquilibError::ProposalAlreadyConfirmed { by }),
                None => Err(EquilibError::ProposalNotPending {
                    status: proposal.status,
                }),
            },
            status => Err(EquilibError::ProposalNotPending { status }),
        }
    }

    fn complete(&mut self, id: ProposalId, now: DateTime<Utc>) -> Result<Proposal> {
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(EquilibError::ProposalNotFound(id))?;

        if proposal.status != ProposalStatus::Confirmed {
            return Err(EquilibError::ProposalNotConfirmed {
                status: proposal.status,
            });
        }
        proposal.status = ProposalStatus::Completed;
        proposal.completed_at = Some(now);
        Ok(proposal.clone())
    }

    fn sweep_expired(&mut self, now: DateTime<Utc>) -> usize {
        let mut flipped = 0;
        for proposal in self.proposals.values_mut() {
            if proposal.is_expired_at(now) {
                proposal.status = ProposalStatus::Expired;
                flipped += 1;
            }
        }
        flipped
    }

    fn record_settlement(&mut self, record: SettlementRecord) -> Result<()> {
        self.settlements.insert(record.proposal_id, record);
        Ok(())
    }

    fn settlement_for(&self, proposal_id: ProposalId) -> Option<SettlementRecord> {
        self.settlements.get(&proposal_id).cloned()
    }
}
