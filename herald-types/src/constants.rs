use crate::primitives::{NoticeId, Priority, Timestamp};

// ─── Notice Parameters ───────────────────────────────────────────────────────

/// Version written into newly created notices.
pub const NOTICE_VERSION: i32 = 1;

/// Language code for English, the default notice language.
pub const DEFAULT_LANGUAGE: i32 = 0;

/// Reserved identifier for the special broadcast class.
pub const SENTINEL_ID: NoticeId = i32::MAX;

/// Expiration a sentinel notice must carry.
pub const SENTINEL_EXPIRATION: Timestamp = i32::MAX as Timestamp;

/// Priority a sentinel notice must carry.
pub const SENTINEL_PRIORITY: Priority = i32::MAX;

/// Maximum size of a signed notice payload in bytes.
pub const MAX_NOTICE_PAYLOAD_SIZE: usize = 65_536; // 64 KB

/// Context string for the notice content hash.
pub const NOTICE_HASH_CONTEXT: &str = "herald 2024 notice payload v1";

// ─── Network Parameters ──────────────────────────────────────────────────────

/// Maximum size of an encoded notice envelope in bytes.
pub const MAX_ENVELOPE_SIZE: usize = MAX_NOTICE_PAYLOAD_SIZE + 1_024;

/// Maximum number of concurrently tracked peer sessions.
pub const MAX_PEER_CONNECTIONS: usize = 125;
