use serde::{Deserialize, Serialize};

/// Network identifier, selects chain-specific tables such as checkpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    Mainnet,
    Testnet,
}

impl NetworkId {
    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            NetworkId::Mainnet => "Mainnet",
            NetworkId::Testnet => "Testnet",
        }
    }

    /// Short lowercase identifier (for CLI/config).
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkId::Mainnet => "mainnet",
            NetworkId::Testnet => "testnet",
        }
    }

    /// Parse from a string identifier.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "mainnet" => Some(NetworkId::Mainnet),
            "testnet" => Some(NetworkId::Testnet),
            _ => None,
        }
    }
}

impl std::fmt::Display for NetworkId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for id in [NetworkId::Mainnet, NetworkId::Testnet] {
            assert_eq!(NetworkId::parse(id.as_str()), Some(id));
        }
        assert_eq!(NetworkId::parse("devnet"), None);
    }
}
