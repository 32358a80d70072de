use serde::{Deserialize, Serialize};
use std::path::Path;

use herald_relay::config::RelayConfig;
use herald_types::network::NetworkId;
use herald_types::primitives::PublicKey;

use crate::error::NodeError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Network identity: "mainnet" or "testnet".
    #[serde(default = "default_network_id")]
    pub network_id: String,
    pub network: NetworkConfig,
    pub notices: NoticeConfig,
    pub checkpoints: CheckpointConfig,
}

fn default_network_id() -> String {
    "mainnet".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub max_connections: usize,
    /// Seconds between re-offering stored notices to connected peers.
    #[serde(default = "default_relay_interval")]
    pub relay_interval_secs: u64,
}

fn default_relay_interval() -> u64 {
    60
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoticeConfig {
    /// Hex-encoded 32-byte Ed25519 public keys allowed to sign notices,
    /// tried in order.
    pub trusted_keys: Vec<String>,
    /// Capacity of the notice event channel.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_event_capacity() -> usize {
    256
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointConfig {
    pub enabled: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            network_id: default_network_id(),
            network: NetworkConfig {
                max_connections: herald_types::constants::MAX_PEER_CONNECTIONS,
                relay_interval_secs: default_relay_interval(),
            },
            notices: NoticeConfig {
                trusted_keys: Vec::new(),
                event_capacity: default_event_capacity(),
            },
            checkpoints: CheckpointConfig { enabled: true },
        }
    }
}

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, NodeError> {
        let contents = std::fs::read_to_string(path).map_err(|e| NodeError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path, e),
        })?;
        let config: NodeConfig = toml::from_str(&contents).map_err(|e| NodeError::ConfigError {
            reason: format!("failed to parse config file '{}': {}", path, e),
        })?;
        Ok(config)
    }

    /// Initialize a default configuration file in the given directory.
    pub fn init(dir: &str) -> Result<(), NodeError> {
        let dir_path = Path::new(dir);
        if !dir_path.exists() {
            std::fs::create_dir_all(dir_path)?;
        }

        let config = NodeConfig::default();
        let toml_str = toml::to_string_pretty(&config).map_err(|e| NodeError::ConfigError {
            reason: format!("failed to serialize default config: {}", e),
        })?;

        let config_path = dir_path.join("herald.toml");
        std::fs::write(&config_path, toml_str)?;

        Ok(())
    }

    /// Parse the configured network identity.
    pub fn network_id(&self) -> Result<NetworkId, NodeError> {
        NetworkId::parse(&self.network_id).ok_or_else(|| NodeError::ConfigError {
            reason: format!("unknown network_id '{}'", self.network_id),
        })
    }

    /// Decode the trusted notice keys.
    pub fn trusted_keys(&self) -> Result<Vec<PublicKey>, NodeError> {
        self.notices
            .trusted_keys
            .iter()
            .enumerate()
            .map(|(index, key)| parse_public_key(key).map_err(|reason| NodeError::ConfigError {
                reason: format!("trusted key #{}: {}", index, reason),
            }))
            .collect()
    }

    /// Relay settings derived from this configuration.
    pub fn relay_config(&self) -> Result<RelayConfig, NodeError> {
        Ok(RelayConfig {
            trusted_keys: self.trusted_keys()?,
            max_connections: self.network.max_connections,
        })
    }
}

/// Decode a hex-encoded 32-byte public key.
pub fn parse_public_key(s: &str) -> Result<PublicKey, String> {
    let bytes = hex::decode(s.trim()).map_err(|e| format!("invalid hex: {}", e))?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| format!("expected 32 bytes, got {}", b.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NodeConfig::default();
        assert_eq!(config.network_id, "mainnet");
        assert!(config.checkpoints.enabled);
        assert!(config.notices.trusted_keys.is_empty());
        assert_eq!(config.network.relay_interval_secs, 60);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut config = NodeConfig::default();
        config.notices.trusted_keys = vec!["ab".repeat(32)];
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let deserialized: NodeConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized.notices.trusted_keys, config.notices.trusted_keys);
        assert_eq!(
            deserialized.network.max_connections,
            config.network.max_connections
        );
        assert_eq!(deserialized.checkpoints.enabled, config.checkpoints.enabled);
    }

    #[test]
    fn test_init_creates_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();
        NodeConfig::init(dir).unwrap();

        let config_path = tmp.path().join("herald.toml");
        assert!(config_path.exists());

        let config = NodeConfig::load(config_path.to_str().unwrap()).unwrap();
        assert_eq!(config.network_id, "mainnet");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = NodeConfig::load("/nonexistent/path/herald.toml");
        assert!(matches!(result, Err(NodeError::ConfigError { .. })));
    }

    #[test]
    fn test_optional_fields_default() {
        let toml_str = r#"
            [network]
            max_connections = 8

            [notices]
            trusted_keys = []

            [checkpoints]
            enabled = false
        "#;
        let config: NodeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.network_id, "mainnet");
        assert_eq!(config.network.relay_interval_secs, 60);
        assert_eq!(config.notices.event_capacity, 256);
        assert!(!config.checkpoints.enabled);
    }

    #[test]
    fn test_trusted_keys_parse() {
        let mut config = NodeConfig::default();
        config.notices.trusted_keys = vec!["01".repeat(32), "02".repeat(32)];
        let keys = config.trusted_keys().unwrap();
        assert_eq!(keys, vec![[1u8; 32], [2u8; 32]]);
    }

    #[test]
    fn test_trusted_key_wrong_length() {
        let mut config = NodeConfig::default();
        config.notices.trusted_keys = vec!["0102".to_string()];
        let err = config.trusted_keys().unwrap_err();
        assert!(err.to_string().contains("expected 32 bytes"));
    }

    #[test]
    fn test_trusted_key_bad_hex() {
        assert!(parse_public_key("zz").is_err());
    }

    #[test]
    fn test_unknown_network_id() {
        let mut config = NodeConfig::default();
        config.network_id = "devnet".to_string();
        assert!(config.network_id().is_err());
    }
}
