//! Permission to author transactions.

use super::identifiers::AccountAddress;

/// Read-only check re-evaluated on every render.
///
/// When it fails, send affordances are absent and the UI is read-only.
pub trait Authorization {
    /// Whether the current user may create transfer transactions.
    fn is_granted(&self) -> bool;
}

/// Granted when the connected signer is one of the wallet owners.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerAuthorization {
    signer: Option<AccountAddress>,
    owners: Vec<AccountAddress>,
}

impl OwnerAuthorization {
    pub fn new(signer: Option<AccountAddress>, owners: Vec<AccountAddress>) -> Self {
        Self { signer, owners }
    }

    /// Never granted.
    pub fn read_only() -> Self {
        Self::default()
    }
}

impl Authorization for OwnerAuthorization {
    fn is_granted(&self) -> bool {
        match &self.signer {
            Some(signer) => self.owners.iter().any(|owner| owner == signer),
            None => false,
        }
    }
}
