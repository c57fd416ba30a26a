//! Core identifier newtypes with smart constructors.
//!
//! Contract addresses and token ids validate non-empty strings at construction
//! time. Token ids stay opaque text: ids on some chains exceed any integer width,
//! so they are never parsed as numbers.

use serde::Serialize;
use std::fmt;

/// On-chain address of an NFT collection contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ContractAddress(String);

impl ContractAddress {
    /// Smart constructor: validates non-empty address
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidContractAddress> {
        let s = raw.into();
        if s.trim().is_empty() {
            return Err(InvalidContractAddress::Empty);
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Token id within a collection. Opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TokenId(String);

impl TokenId {
    /// Smart constructor: validates non-empty token id
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidTokenId> {
        let s = raw.into();
        if s.is_empty() {
            return Err(InvalidTokenId::Empty);
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `max_chars` characters of the id.
    ///
    /// Counts chars, not bytes, so the cut never lands inside a code point.
    pub fn prefix(&self, max_chars: usize) -> &str {
        match self.0.char_indices().nth(max_chars) {
            Some((byte_index, _)) => &self.0[..byte_index],
            None => &self.0,
        }
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of an NFT holding: (contract address, token id).
///
/// Selection and de-duplication compare keys, never item values, so a
/// re-fetched or re-filtered copy of the same holding stays the same item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    address: ContractAddress,
    token_id: TokenId,
}

impl ItemKey {
    pub fn new(address: ContractAddress, token_id: TokenId) -> Self {
        Self { address, token_id }
    }

    pub fn address(&self) -> &ContractAddress {
        &self.address
    }

    pub fn token_id(&self) -> &TokenId {
        &self.token_id
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.address, self.token_id)
    }
}

/// Opaque continuation cursor handed back by a page source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor(String);

impl Cursor {
    /// Returns `None` for an empty cursor: an empty `next` means the last page.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let s = raw.into();
        if s.trim().is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account address: `0x` followed by 40 hex digits.
///
/// Used for transfer recipients, the signer, and address-book entries.
/// Comparison ignores hex case so checksummed and lowercase spellings match.
#[derive(Debug, Clone, Serialize)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// Smart constructor: validates the `0x` + 40 hex digit shape.
    pub fn parse(raw: &str) -> Result<Self, InvalidAccountAddress> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidAccountAddress::Empty);
        }
        let Some(hex) = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        else {
            return Err(InvalidAccountAddress::MissingPrefix(trimmed.to_string()));
        };
        if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(InvalidAccountAddress::Malformed(trimmed.to_string()));
        }
        Ok(Self(format!("0x{hex}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form used as a lookup key.
    pub fn normalized(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl PartialEq for AccountAddress {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for AccountAddress {}

impl std::hash::Hash for AccountAddress {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ===== Error Types =====

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidContractAddress {
    #[error("Contract address cannot be empty")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTokenId {
    #[error("Token ID cannot be empty")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidAccountAddress {
    #[error("Address cannot be empty")]
    Empty,
    #[error("Address must start with 0x: {0}")]
    MissingPrefix(String),
    #[error("Address must be 0x followed by 40 hex digits: {0}")]
    Malformed(String),
}

// ===== Tests =====
