use thiserror::Error;

/// All error codes for the Herald notice protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeraldError {
    // ─── Authentication Errors ───────────────────────────────────────────────
    #[error("invalid signature: no trusted key verifies the notice")]
    InvalidSignature,

    #[error("invalid key material")]
    InvalidKeyMaterial,

    // ─── Notice Validation Errors ────────────────────────────────────────────
    #[error("notice expired at {expiration}, current time is {current}")]
    NoticeExpired { expiration: u64, current: u64 },

    #[error(
        "sentinel notice {id} must carry maximal expiration and priority, got expiration {expiration}, priority {priority}"
    )]
    SentinelViolation {
        id: i32,
        expiration: u64,
        priority: i32,
    },

    #[error("invalid notice: {reason}")]
    InvalidNotice { reason: String },

    #[error("payload too large: {size} > {max}")]
    PayloadTooLarge { size: usize, max: usize },

    // ─── Serialization Errors ────────────────────────────────────────────────
    #[error("serialization error: {reason}")]
    SerializationError { reason: String },

    #[error("deserialization error: {reason}")]
    DeserializationError { reason: String },

    // ─── Store Errors ────────────────────────────────────────────────────────
    #[error("notice store unavailable: {reason}")]
    StoreUnavailable { reason: String },
}
