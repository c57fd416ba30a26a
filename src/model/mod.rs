//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod address_book;
pub mod authorization;
pub mod error;
pub mod identifiers;
pub mod item;
pub mod key_action;
pub mod network;
pub mod page;
pub mod preview;

// Re-export for convenience
pub use address_book::{AddressBook, Contact};
pub use authorization::{Authorization, OwnerAuthorization};
pub use error::{AppError, FetchError, ParseError, PipelineError, TransferError};
pub use identifiers::{
    AccountAddress, ContractAddress, Cursor, InvalidAccountAddress, InvalidContractAddress,
    InvalidTokenId, ItemKey, TokenId,
};
pub use item::{Item, TOKEN_ID_PREFIX_LEN};
pub use key_action::KeyAction;
pub use network::{LinkTemplate, NetworkLinks};
pub use page::Page;
pub use preview::{Attribute, ItemPreview, PreviewState};
