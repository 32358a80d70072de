/// 32-byte BLAKE3 hash.
pub type Hash = [u8; 32];

/// 32-byte Ed25519 public key.
pub type PublicKey = [u8; 32];

/// 64-byte Ed25519 signature.
pub type Signature = [u8; 64];

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Numeric notice identifier chosen by the key holder.
pub type NoticeId = i32;

/// Notice priority (higher is more urgent).
pub type Priority = i32;

/// Transport-assigned identifier for a peer connection.
pub type PeerId = u64;

/// Height of a block in the chain. Signed so checkpoint tables can carry
/// the reserved height -1.
pub type BlockHeight = i64;

/// Serde helper for [u8; 64] fields.
pub mod serde_sig {
    use serde::{self, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &[u8; 64], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.as_slice().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 64], D::Error>
    where
        D: Deserializer<'de>,
    {
        let v: Vec<u8> = Vec::deserialize(deserializer)?;
        v.try_into()
            .map_err(|_| serde::de::Error::custom("expected 64 bytes for signature"))
    }
}

/// Lowercase hex rendering of a hash, for logs and display.
pub fn hash_hex(hash: &Hash) -> String {
    hash.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Shortened hash for log lines (first 8 bytes).
pub fn short_hash(hash: &Hash) -> String {
    hash_hex(hash)[..16].to_string()
}
