use herald_types::constants::NOTICE_HASH_CONTEXT;
use herald_types::primitives::Hash;

/// Compute the BLAKE3 hash of the given data.
pub fn blake3_hash(data: &[u8]) -> Hash {
    *blake3::hash(data).as_bytes()
}

/// Compute a BLAKE3 hash with domain separation.
/// The context string ensures different uses of hashing produce different outputs.
pub fn blake3_hash_domain(context: &str, data: &[u8]) -> Hash {
    let mut hasher = blake3::Hasher::new_derive_key(context);
    hasher.update(data);
    *hasher.finalize().as_bytes()
}

/// Content hash of a signed notice payload.
///
/// This is both what trusted keys sign and the notice's identity in stores
/// and peer dedupe sets.
pub fn notice_hash(payload: &[u8]) -> Hash {
    blake3_hash_domain(NOTICE_HASH_CONTEXT, payload)
}
