//! The confirmation wizard: a multi-step, resumable settlement workflow.
//!
//! One wizard instance drives one trader through settling one proposal.
//! Progress is checkpointed to the wizard-state store on every
//! transition — *before* the transition's gating service call is issued —
//! so a resumed session never starts from a less-advanced checkpoint
//! than what the trader actually reached.
//!
//! Entry asymmetry (intentional): a PENDING proposal is approved first —
//! the single irreversible gate — and the wizard opens directly at
//! TRANSACTION_INFO, skipping the read-only review step. A CONFIRMED
//! proposal re-opens wherever its stored checkpoint says, continuing an
//! interrupted settlement.
//!
//! Exclusive `&mut self` access is the per-instance busy guard: a second
//! advancement cannot even be expressed while one is in flight.

use chrono::{DateTime, Utc};
use equilib_ledger::{ProposalStore, ReceiptService, TransactionService, WizardStateStore};
use equilib_types::{
    EquilibError, Proposal, ProposalId, ProposalStatus, Result, SettlementOutcome, TraderId,
    WizardData, WizardKey, WizardSnapshot, WizardStep,
};

use crate::saga;
use crate::validate::{build_transaction_info, validate_transaction_form};

/// The boxed service handles a settlement workflow calls into.
pub struct SettlementServices {
    pub proposals: Box<dyn ProposalStore>,
    pub transactions: Box<dyn TransactionService>,
    pub receipts: Box<dyn ReceiptService>,
    pub wizard_states: Box<dyn WizardStateStore>,
}

impl SettlementServices {
    /// All-in-memory services: the single-node and test wiring.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            proposals: Box::new(equilib_ledger::InMemoryProposalStore::new()),
            transactions: Box::new(equilib_ledger::InMemoryTransactionLedger::new()),
            receipts: Box::new(equilib_ledger::InMemoryReceiptVault::new()),
            wizard_states: Box::new(equilib_ledger::InMemoryWizardStore::new()),
        }
    }
}

/// A live wizard instance for one `(proposal, trader)` pair.
#[derive(Debug)]
pub struct ConfirmationWizard {
    proposal: Proposal,
    trader_id: TraderId,
    step: WizardStep,
    data: WizardData,
}

impl ConfirmationWizard {
    /// Open the wizard for a proposal.
    ///
    /// - PENDING: approve first (CAS — losing the swap surfaces
    ///   [`EquilibError::ProposalAlreadyConfirmed`] as a recoverable
    ///   error), then enter at TRANSACTION_INFO with fresh form data.
    /// - CONFIRMED: restore the stored checkpoint — exact step and form
    ///   snapshot; with no checkpoint, enter at SHOW_PROPOSAL.
    /// - COMPLETED / EXPIRED: nothing to settle; conflict error.
    pub fn open(
        services: &mut SettlementServices,
        proposal_id: ProposalId,
        trader_id: TraderId,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let proposal = services.proposals.get(proposal_id)?;
        match proposal.status {
            ProposalStatus::Pending => {
                let proposal = services.proposals.approve(proposal_id, trader_id, now)?;
                tracing::info!(
                    proposal = %proposal_id,
                    trader = %trader_id,
                    "Proposal approved; settlement wizard opened"
                );
                let wizard = Self {
                    proposal,
                    trader_id,
                    step: WizardStep::TransactionInfo,
                    data: WizardData::default(),
                };
                // Checkpoint immediately: approval already happened and
                // must not be repeated after a crash.
                wizard.persist(services)?;
                Ok(wizard)
            }
            ProposalStatus::Confirmed => {
                // Only the trader who won the approval continues the
                // settlement; anyone else gets the conflict.
                if let Some(by) = proposal.confirmed_by {
                    if by != trader_id {
                        return Err(EquilibError::ProposalAlreadyConfirmed { by });
                    }
                }
                let key = WizardKey::new(proposal_id, trader_id);
                let (step, data) = match services.wizard_states.load(&key)? {
                    Some(stored) => {
                        let snapshot = WizardSnapshot::decode(&stored.wizard_data)?;
                        tracing::debug!(
                            proposal = %proposal_id,
                            trader = %trader_id,
                            step = %snapshot.step,
                            "Wizard resumed from checkpoint"
                        );
                        (snapshot.step, snapshot.data)
                    }
                    None => (WizardStep::ShowProposal, WizardData::default()),
                };
                Ok(Self {
                    proposal,
                    trader_id,
                    step,
                    data,
                })
            }
            ProposalStatus::Expired => Err(EquilibError::ProposalExpired(proposal_id)),
            status => Err(EquilibError::ProposalNotPending { status }),
        }
    }

    /// The persistence key of this instance.
    #[must_use]
    pub fn key(&self) -> WizardKey {
        WizardKey::new(self.proposal.id, self.trader_id)
    }

    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    #[must_use]
    pub fn proposal(&self) -> &Proposal {
        &self.proposal
    }

    #[must_use]
    pub fn data(&self) -> &WizardData {
        &self.data
    }

    /// Mutable access to the in-progress form data.
    pub fn data_mut(&mut self) -> &mut WizardData {
        &mut self.data
    }

    /// Advance one step.
    ///
    /// Order of operations:
    /// 1. step-specific validation (nothing invalid reaches a service),
    /// 2. checkpoint at the current step (write-before-advance),
    /// 3. gating call — leaving TRANSACTION_INFO creates the settlement
    ///    transaction; on failure the transition aborts and the step
    ///    does not change,
    /// 4. advance and checkpoint at the new step.
    pub fn next(&mut self, services: &mut SettlementServices) -> Result<WizardStep> {
        let Some(target) = self.step.next() else {
            return Err(EquilibError::NoNextStep { current: self.step });
        };

        if self.step == WizardStep::TransactionInfo {
            validate_transaction_form(&self.data.transaction)?;
        }

        self.persist(services)?;

        if self.step == WizardStep::TransactionInfo && self.data.transaction_id.is_none() {
            let info = build_transaction_info(&self.proposal, &self.data.transaction)?;
            match services.transactions.create(info) {
                Ok(record) => {
                    self.data.transaction_id = Some(record.id);
                }
                Err(err) => {
                    tracing::warn!(
                        proposal = %self.proposal.id,
                        step = %self.step,
                        error = %err,
                        "Transaction creation failed; step transition aborted"
                    );
                    return Err(err);
                }
            }
        }

        self.step = target;
        self.persist(services)?;
        tracing::debug!(
            proposal = %self.proposal.id,
            step = %self.step,
            "Wizard advanced"
        );
        Ok(target)
    }

    /// Step backward. No side-effecting calls — only checkpoints.
    pub fn back(&mut self, services: &mut SettlementServices) -> Result<WizardStep> {
        let Some(target) = self.step.back() else {
            return Err(EquilibError::NoPreviousStep { current: self.step });
        };
        self.persist(services)?;
        self.step = target;
        self.persist(services)?;
        Ok(target)
    }

    /// Run the finish saga. Only available from the terminal step.
    ///
    /// On full success the proposal is COMPLETED and the checkpoint is
    /// deleted. On partial completion the proposal stays CONFIRMED, the
    /// checkpoint stays resumable (with per-receipt upload flags), and
    /// the partially-completed record is persisted for reconciliation.
    pub fn finish(
        &mut self,
        services: &mut SettlementServices,
        now: DateTime<Utc>,
    ) -> Result<SettlementOutcome> {
        if !self.step.is_final() {
            return Err(EquilibError::NotAtFinalStep { current: self.step });
        }

        // Checkpoint the final remarks before any side effect.
        self.persist(services)?;

        let outcome = saga::run_finish(
            &mut self.proposal,
            self.trader_id,
            &mut self.data,
            services,
            now,
        )?;

        if outcome.is_complete() {
            services.wizard_states.delete(&self.key())?;
        } else {
            // Keep the checkpoint current so a retried finish skips
            // everything that already committed.
            self.persist(services)?;
        }
        Ok(outcome)
    }

    fn persist(&self, services: &mut SettlementServices) -> Result<()> {
        let snapshot = WizardSnapshot::new(self.step, self.data.clone());
        services
            .wizard_states
            .save(self.key(), self.step, snapshot.encode()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use equilib_ledger::{
        InMemoryProposalStore, InMemoryReceiptVault, InMemoryTransactionLedger,
        InMemoryWizardStore,
    };
    use equilib_types::{
        CounterpartyId, CounterpartySelection, ProposalDraft, ProposalType, DraftSeverity,
        ReceiptForm, ReceiptKind, TransactionInfo, TransactionRecord,
    };
    use rust_decimal::Decimal;

    fn services() -> SettlementServices {
        SettlementServices {
            proposals: Box::new(InMemoryProposalStore::new()),
            transactions: Box::new(InMemoryTransactionLedger::new()),
            receipts: Box::new(InMemoryReceiptVault::new()),
            wizard_states: Box::new(InMemoryWizardStore::new()),
        }
    }

    fn seed_pending(services: &mut SettlementServices, trader: TraderId) -> ProposalId {
        let draft = ProposalDraft {
            currency: equilib_types::Currency::new("TOMAN"),
            proposal_type: ProposalType::Buy,
            amount: Decimal::new(600, 0),
            suggested_price: Decimal::new(61_200, 0),
            severity: DraftSeverity::Actionable,
        };
        services
            .proposals
            .create_pending(&draft, trader, None, Utc::now())
            .unwrap()
            .id
    }

    fn fill_transaction_form(wizard: &mut ConfirmationWizard) {
        let form = &mut wizard.data_mut().transaction;
        form.amount = Some(Decimal::new(600, 0));
        form.price = Some(Decimal::new(61_200, 0));
        form.counterparty = Some(CounterpartySelection::Existing {
            id: CounterpartyId::new(),
        });
    }

    /// A transaction service that always refuses.
    struct FailingTransactionService;

    impl TransactionService for FailingTransactionService {
        fn create(&mut self, _info: TransactionInfo) -> Result<TransactionRecord> {
            Err(EquilibError::TransactionFailed {
                reason: "ledger offline".into(),
            })
        }
    }

    #[test]
    fn open_pending_approves_and_skips_review() {
        let mut services = services();
        let trader = TraderId::new();
        let proposal_id = seed_pending(&mut services, trader);

        let wizard =
            ConfirmationWizard::open(&mut services, proposal_id, trader, Utc::now()).unwrap();
        assert_eq!(wizard.step(), WizardStep::TransactionInfo);
        assert_eq!(
            services.proposals.get(proposal_id).unwrap().status,
            ProposalStatus::Confirmed
        );
        // The approval checkpoint exists already.
        assert!(
            services
                .wizard_states
                .load(&wizard.key())
                .unwrap()
                .is_some()
        );
    }

    #[test]
    fn open_lost_cas_surfaces_conflict() {
        let mut services = services();
        let first = TraderId::new();
        let second = TraderId::new();
        let proposal_id = seed_pending(&mut services, first);

        ConfirmationWizard::open(&mut services, proposal_id, first, Utc::now()).unwrap();
        let err =
            ConfirmationWizard::open(&mut services, proposal_id, second, Utc::now()).unwrap_err();
        assert!(
            matches!(err, EquilibError::ProposalAlreadyConfirmed { by } if by == first),
            "Expected conflict, got: {err:?}"
        );
    }

    #[test]
    fn open_confirmed_without_checkpoint_reviews_first() {
        let mut services = services();
        let trader = TraderId::new();
        let proposal_id = seed_pending(&mut services, trader);
        services
            .proposals
            .approve(proposal_id, trader, Utc::now())
            .unwrap();

        let wizard =
            ConfirmationWizard::open(&mut services, proposal_id, trader, Utc::now()).unwrap();
        assert_eq!(wizard.step(), WizardStep::ShowProposal);
        assert_eq!(wizard.proposal().status, ProposalStatus::Confirmed);
    }

    #[test]
    fn resume_restores_exact_step_and_form() {
        let mut services = services();
        let trader = TraderId::new();
        let proposal_id = seed_pending(&mut services, trader);

        let mut wizard =
            ConfirmationWizard::open(&mut services, proposal_id, trader, Utc::now()).unwrap();
        fill_transaction_form(&mut wizard);
        wizard.next(&mut services).unwrap();
        wizard.data_mut().receipts.push(ReceiptForm {
            kind: ReceiptKind::Fiat,
            file_path: "/uploads/fiat.png".into(),
            description: "bank slip".into(),
            uploaded: false,
        });
        wizard.next(&mut services).unwrap();
        assert_eq!(wizard.step(), WizardStep::FinalRemarks);
        let expected = wizard.data().clone();
        drop(wizard);

        // A fresh instance — new session, same key — lands exactly there.
        let resumed =
            ConfirmationWizard::open(&mut services, proposal_id, trader, Utc::now()).unwrap();
        assert_eq!(resumed.step(), WizardStep::FinalRemarks);
        assert_eq!(resumed.data(), &expected);
    }

    #[test]
    fn next_aborts_when_transaction_creation_fails() {
        let mut services = services();
        let trader = TraderId::new();
        let proposal_id = seed_pending(&mut services, trader);

        let mut wizard =
            ConfirmationWizard::open(&mut services, proposal_id, trader, Utc::now()).unwrap();
        fill_transaction_form(&mut wizard);
        services.transactions = Box::new(FailingTransactionService);

        let err = wizard.next(&mut services).unwrap_err();
        assert!(matches!(err, EquilibError::TransactionFailed { .. }));
        assert_eq!(wizard.step(), WizardStep::TransactionInfo);
        assert!(wizard.data().transaction_id.is_none());

        // No checkpoint beyond the current step was persisted.
        let stored = services.wizard_states.load(&wizard.key()).unwrap().unwrap();
        assert_eq!(stored.step, WizardStep::TransactionInfo);
    }

    #[test]
    fn invalid_form_fails_before_any_service_call() {
        let mut services = services();
        let trader = TraderId::new();
        let proposal_id = seed_pending(&mut services, trader);

        let mut wizard =
            ConfirmationWizard::open(&mut services, proposal_id, trader, Utc::now()).unwrap();
        // Amount/price/counterparty all missing.
        let err = wizard.next(&mut services).unwrap_err();
        assert!(matches!(err, EquilibError::MissingField { .. }));
        assert_eq!(wizard.step(), WizardStep::TransactionInfo);
    }

    #[test]
    fn reentering_transaction_info_does_not_duplicate_transaction() {
        let mut services = services();
        let trader = TraderId::new();
        let proposal_id = seed_pending(&mut services, trader);

        let mut wizard =
            ConfirmationWizard::open(&mut services, proposal_id, trader, Utc::now()).unwrap();
        fill_transaction_form(&mut wizard);
        wizard.next(&mut services).unwrap();
        let first_tx = wizard.data().transaction_id.unwrap();

        wizard.back(&mut services).unwrap();
        assert_eq!(wizard.step(), WizardStep::TransactionInfo);
        wizard.next(&mut services).unwrap();
        assert_eq!(wizard.data().transaction_id, Some(first_tx));
    }

    #[test]
    fn back_from_first_step_is_an_error() {
        let mut services = services();
        let trader = TraderId::new();
        let proposal_id = seed_pending(&mut services, trader);
        services
            .proposals
            .approve(proposal_id, trader, Utc::now())
            .unwrap();

        let mut wizard =
            ConfirmationWizard::open(&mut services, proposal_id, trader, Utc::now()).unwrap();
        assert_eq!(wizard.step(), WizardStep::ShowProposal);
        let err = wizard.back(&mut services).unwrap_err();
        assert!(matches!(err, EquilibError::NoPreviousStep { .. }));
    }

    #[test]
    fn next_from_terminal_step_is_an_error() {
        let mut services = services();
        let trader = TraderId::new();
        let proposal_id = seed_pending(&mut services, trader);

        let mut wizard =
            ConfirmationWizard::open(&mut services, proposal_id, trader, Utc::now()).unwrap();
        fill_transaction_form(&mut wizard);
        wizard.next(&mut services).unwrap();
        wizard.next(&mut services).unwrap();
        let err = wizard.next(&mut services).unwrap_err();
        assert!(matches!(err, EquilibError::NoNextStep { .. }));
    }

    #[test]
    fn finish_requires_terminal_step() {
        let mut services = services();
        let trader = TraderId::new();
        let proposal_id = seed_pending(&mut services, trader);

        let mut wizard =
            ConfirmationWizard::open(&mut services, proposal_id, trader, Utc::now()).unwrap();
        let err = wizard.finish(&mut services, Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            EquilibError::NotAtFinalStep {
                current: WizardStep::TransactionInfo
            }
        ));
    }

    #[test]
    fn open_completed_proposal_is_rejected() {
        let mut services = services();
        let trader = TraderId::new();
        let proposal_id = seed_pending(&mut services, trader);
        let now = Utc::now();
        services.proposals.approve(proposal_id, trader, now).unwrap();
        services.proposals.complete(proposal_id, now).unwrap();

        let err = ConfirmationWizard::open(&mut services, proposal_id, trader, now).unwrap_err();
        assert!(matches!(
            err,
            EquilibError::ProposalNotPending {
                status: ProposalStatus::Completed
            }
        ));
    }
}
