//! In-memory wizard-state store.
//!
//! One checkpoint per `(ProposalId, TraderId)` key, overwritten on every
//! step transition and deleted on workflow completion. This is the
//! persistence unit that makes the confirmation wizard resumable across
//! page reloads and sessions.

use std::collections::HashMap;

use chrono::Utc;
use equilib_types::{Result, WizardKey, WizardStep};

use crate::service::{StoredWizardState, WizardStateStore};

/// HashMap-backed [`WizardStateStore`].
#[derive(Debug, Default)]
pub struct InMemoryWizardStore {
    states: HashMap<WizardKey, StoredWizardState>,
}

impl InMemoryWizardStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
        }
    }

    /// Number of live checkpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl WizardStateStore for InMemoryWizardStore {
    fn save(&mut self, key: WizardKey, step: WizardStep, wizard_data: String) -> Result<()> {
        self.states.insert(
            key,
            StoredWizardState {
                key,
                step,
                wizard_data,
                updated_at: Utc::now(),
            },
        );
        Ok(())
    }

    fn load(&self, key: &WizardKey) -> Result<Option<StoredWizardState>> {
        Ok(self.states.get(key).cloned())
    }

    fn delete(&mut self, key: &WizardKey) -> Result<()> {
        self.states.remove(key);
        Ok(())
    }
}
