use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LANGUAGE, NOTICE_VERSION};
use crate::primitives::*;

/// The signed content of a network notice.
///
/// The borsh encoding of this struct is what a key holder signs. Nodes never
/// trust these fields unless they were decoded from verified payload bytes.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct UnsignedNotice {
    /// Notice format version.
    pub version: i32,
    /// Peers are offered the notice only before this time.
    pub relay_until: Timestamp,
    /// The notice stops being in effect at this time.
    pub expiration: Timestamp,
    /// When the key holder created the notice.
    pub created: Timestamp,
    /// Identifier chosen by the key holder.
    pub id: NoticeId,
    /// Language code (0 = English).
    pub language: i32,
    /// Higher values are more urgent.
    pub priority: Priority,
    /// Short title.
    pub header: String,
    /// Full notice body.
    pub message: String,
    /// Text for a tray / status-bar notification.
    pub tray_notify: String,
}

impl Default for UnsignedNotice {
    fn default() -> Self {
        Self {
            version: NOTICE_VERSION,
            relay_until: 0,
            expiration: 0,
            created: 0,
            id: 0,
            language: DEFAULT_LANGUAGE,
            priority: 0,
            header: String::new(),
            message: String::new(),
            tray_notify: String::new(),
        }
    }
}

impl UnsignedNotice {
    /// A notice with no expiration carries no content.
    pub fn is_null(&self) -> bool {
        self.expiration == 0
    }

    /// Whether the notice is still valid at `now`.
    pub fn is_in_effect(&self, now: Timestamp) -> bool {
        now < self.expiration
    }

    /// Whether the notice is still inside its propagation window at `now`.
    pub fn is_relayable(&self, now: Timestamp) -> bool {
        now < self.relay_until
    }
}

impl std::fmt::Display for UnsignedNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "Notice(")?;
        writeln!(f, "    version     = {}", self.version)?;
        writeln!(f, "    relay_until = {}", self.relay_until)?;
        writeln!(f, "    expiration  = {}", self.expiration)?;
        writeln!(f, "    id          = {}", self.id)?;
        writeln!(f, "    created     = {}", self.created)?;
        writeln!(f, "    language    = {}", self.language)?;
        writeln!(f, "    priority    = {}", self.priority)?;
        writeln!(f, "    header      = {:?}", self.header)?;
        writeln!(f, "    tray_notify = {:?}", self.tray_notify)?;
        write!(f, ")")
    }
}

/// A notice as it travels on the wire: the exact signed payload bytes plus
/// the signature over their content hash.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct SignedNotice {
    /// Borsh-encoded `UnsignedNotice`, byte-for-byte as signed.
    pub payload: Vec<u8>,
    /// Signature by one of the trusted keys.
    #[serde(with = "crate::primitives::serde_sig")]
    pub signature: Signature,
}

/// Kind of change reported to a notice sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    /// A notice was accepted (new or replaced).
    New,
    /// A notice expired and was removed.
    Deleted,
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ChangeType::New => f.write_str("new"),
            ChangeType::Deleted => f.write_str("deleted"),
        }
    }
}

/// A store change, keyed by the notice content hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeEvent {
    pub hash: Hash,
    pub change: ChangeType,
}
