//! Address book lookup for the transfer recipient field.

use super::identifiers::AccountAddress;
use std::collections::HashMap;

/// A named address-book entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    address: AccountAddress,
    name: String,
}

impl Contact {
    pub fn new(address: AccountAddress, name: impl Into<String>) -> Self {
        Self {
            address,
            name: name.into(),
        }
    }

    pub fn address(&self) -> &AccountAddress {
        &self.address
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Mapping from address to contact metadata.
///
/// Read-only for the view: it only decides whether the recipient renders as a
/// resolved contact block or as a raw input, and feeds autocompletion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    contacts: HashMap<String, Contact>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a contact.
    pub fn insert(&mut self, contact: Contact) {
        self.contacts.insert(contact.address().normalized(), contact);
    }

    /// Resolve raw recipient text to a contact.
    ///
    /// Returns `None` for text that is not a well-formed address or is unknown.
    pub fn resolve(&self, raw: &str) -> Option<&Contact> {
        let address = AccountAddress::parse(raw).ok()?;
        self.contacts.get(&address.normalized())
    }

    /// Contacts whose name or address contains `needle` (case-insensitive),
    /// sorted by name so that cycling through suggestions is stable.
    pub fn suggest(&self, needle: &str) -> Vec<&Contact> {
        let needle = needle.trim().to_lowercase();
        let mut matches: Vec<&Contact> = self
            .contacts
            .values()
            .filter(|c| {
                needle.is_empty()
                    || c.name().to_lowercase().contains(&needle)
                    || c.address().normalized().contains(&needle)
            })
            .collect();
        matches.sort_by(|a, b| {
            a.name()
                .cmp(b.name())
                .then_with(|| a.address().normalized().cmp(&b.address().normalized()))
        });
        matches
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}
