//! Hard-coded block checkpoints consulted during chain validation.

use std::collections::{BTreeMap, HashMap};

use herald_types::network::NetworkId;
use herald_types::primitives::{BlockHeight, Hash};

use crate::error::NodeError;

/// Mainnet checkpoints as (height, block hash hex).
const MAINNET_CHECKPOINTS: &[(BlockHeight, &str)] = &[
    (
        0,
        "000000000e8814d58fe7834fde76e8aa000972894b49fae4cbfbd5c8c9005a9c",
    ),
    (
        1,
        "00000000cb3239b316d78f1690f6ed9c021b5426a1de0024121b6548d241a164",
    ),
];

/// Testnet only pins its genesis block, under the reserved height -1.
const TESTNET_CHECKPOINTS: &[(BlockHeight, &str)] = &[(
    -1,
    "000000002a936ca763904c3c35fce2f3556c559c0214345d31b1bcebf76acb70",
)];

/// Read-only height → block hash table.
#[derive(Debug, Clone)]
pub struct Checkpoints {
    enabled: bool,
    table: BTreeMap<BlockHeight, Hash>,
}

impl Checkpoints {
    pub fn new(table: BTreeMap<BlockHeight, Hash>, enabled: bool) -> Self {
        Self { enabled, table }
    }

    /// Built-in table for a network.
    pub fn for_network(network: NetworkId, enabled: bool) -> Result<Self, NodeError> {
        let entries = match network {
            NetworkId::Mainnet => MAINNET_CHECKPOINTS,
            NetworkId::Testnet => TESTNET_CHECKPOINTS,
        };
        let table = entries
            .iter()
            .map(|(height, hash)| Ok((*height, parse_hash(hash)?)))
            .collect::<Result<BTreeMap<_, _>, NodeError>>()?;
        Ok(Self::new(table, enabled))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// False only when a checkpoint is registered at `height` with a
    /// different hash.
    pub fn check_block(&self, height: BlockHeight, hash: &Hash) -> bool {
        if !self.enabled {
            return true;
        }
        match self.table.get(&height) {
            Some(expected) => expected == hash,
            None => true,
        }
    }

    /// Height of the highest checkpoint (-1 on testnet), 0 when disabled or
    /// empty.
    pub fn total_blocks_estimate(&self) -> BlockHeight {
        if !self.enabled {
            return 0;
        }
        self.table.keys().next_back().copied().unwrap_or(0)
    }

    /// The highest checkpoint whose block is present in `index`.
    pub fn last_checkpoint<'a, B>(&self, index: &'a HashMap<Hash, B>) -> Option<&'a B> {
        if !self.enabled {
            return None;
        }
        self.table
            .values()
            .rev()
            .find_map(|hash| index.get(hash))
    }
}

/// Decode a hex-encoded 32-byte block hash.
pub fn parse_hash(s: &str) -> Result<Hash, NodeError> {
    let bytes = hex::decode(s).map_err(|e| NodeError::CheckpointError {
        reason: format!("invalid hash hex '{}': {}", s, e),
    })?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| NodeError::CheckpointError {
            reason: format!("expected 32-byte hash, got {} bytes", b.len()),
        })
}
