use herald_crypto::hash::notice_hash;
use herald_crypto::keys::Keypair;
use herald_types::constants::{
    DEFAULT_LANGUAGE, NOTICE_VERSION, SENTINEL_EXPIRATION, SENTINEL_ID, SENTINEL_PRIORITY,
};
use herald_types::error::HeraldError;
use herald_types::notice::{SignedNotice, UnsignedNotice};
use herald_types::primitives::*;

use crate::codec::encode_payload;

/// Builder for constructing notices on the key holder's side.
pub struct NoticeBuilder {
    id: NoticeId,
    created: Timestamp,
    relay_until: Timestamp,
    expiration: Timestamp,
    language: i32,
    priority: Priority,
    header: String,
    message: String,
    tray_notify: String,
}

impl NoticeBuilder {
    /// Start building a notice with the given identifier.
    pub fn new(id: NoticeId) -> Self {
        Self {
            id,
            created: 0,
            relay_until: 0,
            expiration: 0,
            language: DEFAULT_LANGUAGE,
            priority: 0,
            header: String::new(),
            message: String::new(),
            tray_notify: String::new(),
        }
    }

    /// Start building a sentinel notice, which must carry maximal expiration
    /// and priority.
    pub fn sentinel(created: Timestamp) -> Self {
        Self::new(SENTINEL_ID)
            .created(created)
            .relay_until(SENTINEL_EXPIRATION)
            .expiration(SENTINEL_EXPIRATION)
            .priority(SENTINEL_PRIORITY)
    }

    pub fn created(mut self, created: Timestamp) -> Self {
        self.created = created;
        self
    }

    pub fn relay_until(mut self, relay_until: Timestamp) -> Self {
        self.relay_until = relay_until;
        self
    }

    pub fn expiration(mut self, expiration: Timestamp) -> Self {
        self.expiration = expiration;
        self
    }

    pub fn language(mut self, language: i32) -> Self {
        self.language = language;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn tray_notify(mut self, tray_notify: impl Into<String>) -> Self {
        self.tray_notify = tray_notify.into();
        self
    }

    /// Build the notice content.
    ///
    /// Refuses notices that receivers would reject outright, and notices whose
    /// relay window outlives their effect window.
    pub fn build(self) -> Result<UnsignedNotice, HeraldError> {
        if self.expiration == 0 {
            return Err(HeraldError::InvalidNotice {
                reason: "expiration is required".to_string(),
            });
        }
        if self.relay_until > self.expiration {
            return Err(HeraldError::InvalidNotice {
                reason: format!(
                    "relay_until {} is after expiration {}",
                    self.relay_until, self.expiration
                ),
            });
        }
        if self.id == SENTINEL_ID
            && (self.expiration != SENTINEL_EXPIRATION || self.priority != SENTINEL_PRIORITY)
        {
            return Err(HeraldError::SentinelViolation {
                id: self.id,
                expiration: self.expiration,
                priority: self.priority,
            });
        }

        Ok(UnsignedNotice {
            version: NOTICE_VERSION,
            relay_until: self.relay_until,
            expiration: self.expiration,
            created: self.created,
            id: self.id,
            language: self.language,
            priority: self.priority,
            header: self.header,
            message: self.message,
            tray_notify: self.tray_notify,
        })
    }
}

/// Encode and sign notice content with a trusted key.
pub fn sign_notice(keypair: &Keypair, content: &UnsignedNotice) -> Result<SignedNotice, HeraldError> {
    let payload = encode_payload(content)?;
    let signature = keypair.sign(&notice_hash(&payload));
    Ok(SignedNotice { payload, signature })
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_crypto::keys::verify;

    #[test]
    fn test_build_sets_fields() {
        let n = NoticeBuilder::new(42)
            .created(1_000)
            .relay_until(1_010)
            .expiration(1_100)
            .priority(5)
            .language(2)
            .header("h")
            .message("m")
            .tray_notify("t")
            .build()
            .unwrap();
        assert_eq!(n.id, 42);
        assert_eq!(n.version, NOTICE_VERSION);
        assert_eq!(n.relay_until, 1_010);
        assert_eq!(n.expiration, 1_100);
        assert_eq!(n.priority, 5);
        assert_eq!(n.language, 2);
        assert_eq!((n.header.as_str(), n.message.as_str()), ("h", "m"));
        assert_eq!(n.tray_notify, "t");
    }

    #[test]
    fn test_build_requires_expiration() {
        let result = NoticeBuilder::new(1).build();
        assert!(matches!(result, Err(HeraldError::InvalidNotice { .. })));
    }

    #[test]
    fn test_build_rejects_relay_after_expiration() {
        let result = NoticeBuilder::new(1)
            .relay_until(200)
            .expiration(100)
            .build();
        assert!(matches!(result, Err(HeraldError::InvalidNotice { .. })));
    }

    #[test]
    fn test_sentinel_builder_is_valid() {
        let n = NoticeBuilder::sentinel(1_000).build().unwrap();
        assert_eq!(n.id, SENTINEL_ID);
        assert_eq!(n.expiration, SENTINEL_EXPIRATION);
        assert_eq!(n.priority, SENTINEL_PRIORITY);
    }

    #[test]
    fn test_sentinel_misuse_rejected() {
        let result = NoticeBuilder::new(SENTINEL_ID)
            .expiration(5)
            .priority(SENTINEL_PRIORITY)
            .build();
        assert!(matches!(result, Err(HeraldError::SentinelViolation { .. })));
    }

    #[test]
    fn test_sign_notice_signs_content_hash() {
        let kp = Keypair::from_seed(&[5u8; 32]);
        let content = NoticeBuilder::new(1).expiration(100).build().unwrap();
        let signed = sign_notice(&kp, &content).unwrap();
        assert_eq!(signed.payload, encode_payload(&content).unwrap());
        assert!(verify(&notice_hash(&signed.payload), &signed.signature, &kp.public_key()).is_ok());
    }
}
