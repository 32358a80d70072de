use herald_types::notice::{SignedNotice, UnsignedNotice};
use herald_types::primitives::{Hash, Timestamp};

/// A notice that passed authentication.
///
/// Only [`crate::auth::Authenticator`] constructs these, so the content fields
/// are always the ones decoded from the verified payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    hash: Hash,
    content: UnsignedNotice,
    signed: SignedNotice,
}

impl Notice {
    pub(crate) fn new(hash: Hash, content: UnsignedNotice, signed: SignedNotice) -> Self {
        Self {
            hash,
            content,
            signed,
        }
    }

    /// Content hash of the signed payload.
    pub fn hash(&self) -> Hash {
        self.hash
    }

    /// Decoded notice fields.
    pub fn content(&self) -> &UnsignedNotice {
        &self.content
    }

    /// Wire form, as relayed to peers.
    pub fn signed(&self) -> &SignedNotice {
        &self.signed
    }

    pub fn is_in_effect(&self, now: Timestamp) -> bool {
        self.content.is_in_effect(now)
    }

    pub fn is_relayable(&self, now: Timestamp) -> bool {
        self.content.is_relayable(now)
    }
}
