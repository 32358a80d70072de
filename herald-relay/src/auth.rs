use herald_crypto::hash::notice_hash;
use herald_crypto::keys::verify;
use herald_types::constants::MAX_NOTICE_PAYLOAD_SIZE;
use herald_types::error::HeraldError;
use herald_types::notice::SignedNotice;
use herald_types::primitives::{PublicKey, Signature};
use tracing::trace;

use crate::codec::decode_payload;
use crate::notice::Notice;

/// Verifies notices against a fixed, ordered set of trusted keys.
#[derive(Debug, Clone)]
pub struct Authenticator {
    trusted_keys: Vec<PublicKey>,
}

impl Authenticator {
    /// Create an authenticator trusting `trusted_keys` for its whole lifetime.
    pub fn new(trusted_keys: Vec<PublicKey>) -> Self {
        Self { trusted_keys }
    }

    /// Check `signature` over the content hash of `payload` against each
    /// trusted key in turn. A key that fails to parse is skipped.
    pub fn verify(&self, payload: &[u8], signature: &Signature) -> bool {
        let hash = notice_hash(payload);
        self.trusted_keys.iter().enumerate().any(|(index, key)| {
            match verify(&hash, signature, key) {
                Ok(()) => true,
                Err(e) => {
                    trace!(key_index = index, error = %e, "trusted key did not verify notice");
                    false
                }
            }
        })
    }

    /// Verify a wire notice and decode its fields from the verified bytes.
    ///
    /// Any fields the transport may have attached are ignored; the returned
    /// [`Notice`] carries only what was signed.
    pub fn authenticate(&self, signed: SignedNotice) -> Result<Notice, HeraldError> {
        if signed.payload.len() > MAX_NOTICE_PAYLOAD_SIZE {
            return Err(HeraldError::PayloadTooLarge {
                size: signed.payload.len(),
                max: MAX_NOTICE_PAYLOAD_SIZE,
            });
        }
        if !self.verify(&signed.payload, &signed.signature) {
            return Err(HeraldError::InvalidSignature);
        }
        let content = decode_payload(&signed.payload)?;
        let hash = notice_hash(&signed.payload);
        Ok(Notice::new(hash, content, signed))
    }
}
