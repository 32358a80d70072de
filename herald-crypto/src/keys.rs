use ed25519_dalek::{Signer, Verifier};
use herald_types::error::HeraldError;
use herald_types::primitives::{PublicKey, Signature};

/// Wrapper around an Ed25519 keypair.
pub struct Keypair {
    inner: ed25519_dalek::SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        let signing_key = ed25519_dalek::SigningKey::generate(&mut csprng);
        Self { inner: signing_key }
    }

    /// Create a keypair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = ed25519_dalek::SigningKey::from_bytes(seed);
        Self { inner: signing_key }
    }

    /// Get the public key bytes.
    pub fn public_key(&self) -> PublicKey {
        self.inner.verifying_key().to_bytes()
    }

    /// Get the 32-byte seed (secret key bytes) of this keypair.
    pub fn seed(&self) -> zeroize::Zeroizing<[u8; 32]> {
        zeroize::Zeroizing::new(self.inner.to_bytes())
    }

    /// Sign a message, returning the 64-byte signature.
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.inner.sign(message).to_bytes()
    }
}

// SigningKey with the "zeroize" feature wipes key material on drop.

/// Verify an Ed25519 signature.
///
/// Returns `InvalidKeyMaterial` when `pubkey` is not a valid curve point and
/// `InvalidSignature` when the signature does not verify.
pub fn verify(message: &[u8], signature: &Signature, pubkey: &PublicKey) -> Result<(), HeraldError> {
    let verifying_key = ed25519_dalek::VerifyingKey::from_bytes(pubkey)
        .map_err(|_| HeraldError::InvalidKeyMaterial)?;
    let sig = ed25519_dalek::Signature::from_bytes(signature);
    verifying_key
        .verify(message, &sig)
        .map_err(|_| HeraldError::InvalidSignature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify_roundtrip() {
        let kp = Keypair::generate();
        let msg = b"hello herald";
        let sig = kp.sign(msg);
        assert!(verify(msg, &sig, &kp.public_key()).is_ok());
    }

    #[test]
    fn test_invalid_signature_rejected() {
        let kp = Keypair::generate();
        let msg = b"hello herald";
        let mut sig = kp.sign(msg);
        sig[0] ^= 0xff;
        assert!(verify(msg, &sig, &kp.public_key()).is_err());
    }

    #[test]
    fn test_wrong_message_rejected() {
        let kp = Keypair::generate();
        let sig = kp.sign(b"hello herald");
        assert_eq!(
            verify(b"wrong message", &sig, &kp.public_key()),
            Err(HeraldError::InvalidSignature)
        );
    }

    #[test]
    fn test_wrong_pubkey_rejected() {
        let kp1 = Keypair::generate();
        let kp2 = Keypair::generate();
        let msg = b"hello herald";
        let sig = kp1.sign(msg);
        assert!(verify(msg, &sig, &kp2.public_key()).is_err());
    }

    #[test]
    fn test_from_seed_deterministic() {
        let seed = [42u8; 32];
        let kp1 = Keypair::from_seed(&seed);
        let kp2 = Keypair::from_seed(&seed);
        assert_eq!(kp1.public_key(), kp2.public_key());
        assert_eq!(*kp1.seed(), seed);
    }
}
