//! Fixed in-memory account directory.

use equilib_types::{Account, Result};

use crate::service::AccountDirectory;

/// An [`AccountDirectory`] serving a fixed account list. The single-node
/// and test stand-in for the external user-management system.
#[derive(Debug, Default)]
pub struct InMemoryAccountDirectory {
    accounts: Vec<Account>,
}

impl InMemoryAccountDirectory {
    #[must_use]
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    /// Replace the served account list.
    pub fn set_accounts(&mut self, accounts: Vec<Account>) {
        self.accounts = accounts;
    }
}

impl AccountDirectory for InMemoryAccountDirectory {
    fn fetch_accounts(&self) -> Result<Vec<Account>> {
        Ok(self.accounts.clone())
    }
}
