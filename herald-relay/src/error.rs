use thiserror::Error;

/// Errors that can occur in the relay layer.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Failed to encode or decode an envelope.
    #[error("codec error: {reason}")]
    CodecError { reason: String },

    /// Envelope exceeds maximum allowed size.
    #[error("message too large: {size} bytes (max {max})")]
    MessageTooLarge { size: usize, max: usize },

    /// Peer is running an incompatible envelope version.
    #[error("envelope version mismatch: peer sent v{peer}, we run v{ours}")]
    VersionMismatch { peer: u8, ours: u8 },

    /// The peer manager refused a new session.
    #[error("peer limit reached: {max} sessions")]
    PeerLimitReached { max: usize },
}
