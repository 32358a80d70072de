use thiserror::Error;

/// Errors that can occur in the node.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("config error: {reason}")]
    ConfigError { reason: String },

    #[error("checkpoint error: {reason}")]
    CheckpointError { reason: String },

    #[error("relay error: {0}")]
    RelayError(#[from] herald_relay::error::RelayError),

    #[error("notice rejected: {0}")]
    NoticeError(#[from] herald_types::error::HeraldError),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}
