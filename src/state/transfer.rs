//! Transfer intent modal state.
//!
//! The modal carries the items to send and an editable recipient. Closing it
//! at any point has no side effects; a successful submit yields a
//! [`TransferIntent`] for the transaction pipeline and closes the modal.

use crate::model::{
    AccountAddress, AddressBook, Authorization, Contact, InvalidAccountAddress, Item,
    TransferError,
};
use serde::Serialize;

/// Payload handed to the transaction pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TransferIntent {
    /// Direct send of one item.
    Single {
        recipient: AccountAddress,
        item: Item,
    },
    /// Batch send, items in accumulated order.
    Batch {
        recipient: AccountAddress,
        items: Vec<Item>,
    },
}

impl TransferIntent {
    pub fn recipient(&self) -> &AccountAddress {
        match self {
            TransferIntent::Single { recipient, .. } | TransferIntent::Batch { recipient, .. } => {
                recipient
            }
        }
    }

    pub fn item_count(&self) -> usize {
        match self {
            TransferIntent::Single { .. } => 1,
            TransferIntent::Batch { items, .. } => items.len(),
        }
    }
}

/// Whether the draft came from a direct send or from the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    Single,
    Batch,
}

/// Contents of an open transfer modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferDraft {
    kind: TransferKind,
    items: Vec<Item>,
    recipient: String,
    /// Text the user typed before the first Tab; suggestions cycle over it.
    completion_seed: Option<String>,
    completion_index: usize,
    error: Option<TransferError>,
}

impl TransferDraft {
    fn new(kind: TransferKind, items: Vec<Item>) -> Self {
        Self {
            kind,
            items,
            recipient: String::new(),
            completion_seed: None,
            completion_index: 0,
            error: None,
        }
    }

    pub fn kind(&self) -> TransferKind {
        self.kind
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn error(&self) -> Option<&TransferError> {
        self.error.as_ref()
    }

    /// `"Sending 1 NFT from"` / `"Sending 3 NFTs from"`.
    pub fn header(&self) -> String {
        let n = self.items.len();
        format!("Sending {} NFT{} from", n, if n == 1 { "" } else { "s" })
    }

    /// The contact the recipient resolves to, if any.
    pub fn resolved<'b>(&self, book: &'b AddressBook) -> Option<&'b Contact> {
        book.resolve(&self.recipient)
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch.is_whitespace() {
            return;
        }
        self.recipient.push(ch);
        self.reset_completion();
    }

    /// Delete one character, or the whole recipient when it is a resolved
    /// contact block.
    pub fn backspace(&mut self, book: &AddressBook) {
        if self.resolved(book).is_some() {
            self.recipient.clear();
        } else {
            self.recipient.pop();
        }
        self.reset_completion();
    }

    /// Replace the recipient with the next address-book suggestion for the
    /// text typed so far. Repeated calls cycle through the suggestions.
    pub fn autocomplete(&mut self, book: &AddressBook) {
        let seed = self
            .completion_seed
            .get_or_insert_with(|| self.recipient.clone())
            .clone();
        let suggestions = book.suggest(&seed);
        if suggestions.is_empty() {
            return;
        }
        let index = self.completion_index % suggestions.len();
        self.recipient = suggestions[index].address().as_str().to_string();
        self.completion_index = index + 1;
        self.error = None;
    }

    fn reset_completion(&mut self) {
        self.completion_seed = None;
        self.completion_index = 0;
        self.error = None;
    }

    fn validate(&self) -> Result<AccountAddress, TransferError> {
        AccountAddress::parse(&self.recipient).map_err(|err| match err {
            InvalidAccountAddress::Empty => TransferError::EmptyRecipient,
            other => TransferError::InvalidRecipient(other.to_string()),
        })
    }
}

/// First preview line for an item: `"{collection} #{id}"`.
pub fn item_title(item: &Item) -> String {
    format!("{} #{}", item.collection_label(), item.id())
}

/// Second preview line: `"Token ID: {id}"`, with ` - {name}` when named.
pub fn item_detail(item: &Item) -> String {
    match item.name() {
        Some(name) => format!("Token ID: {} - {}", item.id(), name),
        None => format!("Token ID: {}", item.id()),
    }
}

/// Transfer modal state machine: `Idle -> Open -> Idle`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TransferState {
    #[default]
    Idle,
    Open(TransferDraft),
}

impl TransferState {
    pub fn is_open(&self) -> bool {
        matches!(self, TransferState::Open(_))
    }

    pub fn draft(&self) -> Option<&TransferDraft> {
        match self {
            TransferState::Open(draft) => Some(draft),
            TransferState::Idle => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut TransferDraft> {
        match self {
            TransferState::Open(draft) => Some(draft),
            TransferState::Idle => None,
        }
    }

    /// Open the modal for a direct send of one item.
    pub fn open_single(
        &mut self,
        item: Item,
        auth: &dyn Authorization,
    ) -> Result<(), TransferError> {
        if !auth.is_granted() {
            return Err(TransferError::NotGranted);
        }
        *self = TransferState::Open(TransferDraft::new(TransferKind::Single, vec![item]));
        Ok(())
    }

    /// Open the modal for a batch send. `items` must already be in
    /// accumulated order.
    pub fn open_batch(
        &mut self,
        items: Vec<Item>,
        auth: &dyn Authorization,
    ) -> Result<(), TransferError> {
        if !auth.is_granted() {
            return Err(TransferError::NotGranted);
        }
        if items.is_empty() {
            return Err(TransferError::NothingSelected);
        }
        *self = TransferState::Open(TransferDraft::new(TransferKind::Batch, items));
        Ok(())
    }

    /// Dismiss without emitting anything.
    pub fn close(&mut self) {
        *self = TransferState::Idle;
    }

    /// Validate the recipient and emit the payload.
    ///
    /// On success the modal closes. On failure it stays open and the error
    /// is shown inside it.
    pub fn submit(&mut self) -> Result<TransferIntent, TransferError> {
        let TransferState::Open(draft) = self else {
            return Err(TransferError::NothingSelected);
        };
        let recipient = match draft.validate() {
            Ok(recipient) => recipient,
            Err(err) => {
                draft.error = Some(err.clone());
                return Err(err);
            }
        };

        let TransferState::Open(draft) = std::mem::take(self) else {
            return Err(TransferError::NothingSelected);
        };
        let mut items = draft.items;
        let intent = match draft.kind {
            TransferKind::Single if items.len() == 1 => TransferIntent::Single {
                recipient,
                item: items.remove(0),
            },
            _ => TransferIntent::Batch { recipient, items },
        };
        Ok(intent)
    }
}
