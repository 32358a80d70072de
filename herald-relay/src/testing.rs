//! Shared fixtures for unit tests.

use std::sync::Mutex;

use herald_crypto::keys::{verify, Keypair};
use herald_types::error::HeraldError;
use herald_types::notice::{ChangeType, SignedNotice};
use herald_types::primitives::*;

use crate::auth::Authenticator;
use crate::builder::{sign_notice, NoticeBuilder};
use crate::notice::Notice;
use crate::sink::NoticeSink;

/// Sink that records every change it is told about.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(Hash, ChangeType)>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<(Hash, ChangeType)> {
        self.events.lock().unwrap().clone()
    }
}

impl NoticeSink for RecordingSink {
    fn notice_changed(&self, hash: &Hash, change: ChangeType) {
        self.events.lock().unwrap().push((*hash, change));
    }
}

pub fn trusted_keypair() -> Keypair {
    Keypair::from_seed(&[11u8; 32])
}

pub fn second_keypair() -> Keypair {
    Keypair::from_seed(&[12u8; 32])
}

pub fn authenticator() -> Authenticator {
    Authenticator::new(vec![
        trusted_keypair().public_key(),
        second_keypair().public_key(),
    ])
}

/// A notice signed by the first trusted key.
pub fn signed_notice(
    id: NoticeId,
    created: Timestamp,
    relay_until: Timestamp,
    expiration: Timestamp,
    priority: Priority,
) -> SignedNotice {
    let content = NoticeBuilder::new(id)
        .created(created)
        .relay_until(relay_until)
        .expiration(expiration)
        .priority(priority)
        .header(format!("notice {}", id))
        .build()
        .unwrap();
    sign_notice(&trusted_keypair(), &content).unwrap()
}

/// 32 bytes that do not decompress to an Ed25519 point.
pub fn unparsable_key() -> PublicKey {
    (0u8..=255)
        .map(|b| [b; 32])
        .find(|key| verify(b"key check", &[0u8; 64], key) == Err(HeraldError::InvalidKeyMaterial))
        .expect("some repeated-byte encoding is off the curve")
}

/// A notice that has already passed authentication.
pub fn accepted_notice(
    id: NoticeId,
    created: Timestamp,
    relay_until: Timestamp,
    expiration: Timestamp,
    priority: Priority,
) -> Notice {
    authenticator()
        .authenticate(signed_notice(id, created, relay_until, expiration, priority))
        .unwrap()
}
