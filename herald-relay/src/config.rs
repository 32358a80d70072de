use herald_types::primitives::PublicKey;

/// Configuration for the notice relay.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Keys allowed to sign notices, tried in order.
    pub trusted_keys: Vec<PublicKey>,
    /// Maximum number of peer sessions.
    pub max_connections: usize,
}
