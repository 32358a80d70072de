use std::sync::Arc;

use herald_types::constants::{SENTINEL_EXPIRATION, SENTINEL_ID, SENTINEL_PRIORITY};
use herald_types::error::HeraldError;
use herald_types::notice::{SignedNotice, UnsignedNotice};
use herald_types::primitives::{short_hash, Hash};
use tracing::{debug, info, warn};

use crate::auth::Authenticator;
use crate::clock::TimeSource;
use crate::sink::NoticeSink;
use crate::store::NoticeStore;

/// Drives an incoming notice through authentication, validation and storage.
pub struct NoticeProcessor {
    authenticator: Authenticator,
    store: Arc<NoticeStore>,
    sink: Arc<dyn NoticeSink>,
    clock: Arc<dyn TimeSource>,
}

impl NoticeProcessor {
    pub fn new(
        authenticator: Authenticator,
        store: Arc<NoticeStore>,
        sink: Arc<dyn NoticeSink>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            authenticator,
            store,
            sink,
            clock,
        }
    }

    /// Process a notice received from the network.
    ///
    /// Each step is a hard gate and the store is untouched unless every check
    /// passes. On success the notice is stored under its content hash, which
    /// is returned; expired notices are swept out in the same locked step.
    pub fn process(&self, candidate: SignedNotice) -> Result<Hash, HeraldError> {
        let notice = match self.authenticator.authenticate(candidate) {
            Ok(notice) => notice,
            Err(e) => {
                match &e {
                    HeraldError::InvalidSignature => {
                        warn!("rejecting notice: no trusted key verifies it")
                    }
                    HeraldError::PayloadTooLarge { size, max } => {
                        warn!(size, max, "rejecting notice: payload too large")
                    }
                    HeraldError::DeserializationError { reason } => {
                        warn!(%reason, "rejecting notice: signed payload does not decode")
                    }
                    other => warn!(error = %other, "rejecting notice"),
                }
                return Err(e);
            }
        };

        let now = self.clock.now();
        let content = notice.content();
        if !content.is_in_effect(now) {
            debug!(
                id = content.id,
                expiration = content.expiration,
                now,
                "ignoring notice that is no longer in effect"
            );
            return Err(HeraldError::NoticeExpired {
                expiration: content.expiration,
                current: now,
            });
        }

        if let Err(e) = check_sentinel(content) {
            warn!(id = content.id, error = %e, "rejecting malformed sentinel notice");
            return Err(e);
        }

        if content.relay_until > content.expiration {
            debug!(
                id = content.id,
                relay_until = content.relay_until,
                expiration = content.expiration,
                "notice relay window outlives its expiration"
            );
        }

        let hash = notice.hash();
        let id = content.id;
        let priority = content.priority;
        let expired = self
            .store
            .sweep_and_insert(notice, now, self.sink.as_ref())?;

        info!(
            id,
            priority,
            hash = %short_hash(&hash),
            expired,
            "accepted notice"
        );
        Ok(hash)
    }
}

/// The sentinel identifier is only valid with maximal expiration and priority.
pub fn check_sentinel(content: &UnsignedNotice) -> Result<(), HeraldError> {
    if content.id == SENTINEL_ID
        && (content.expiration != SENTINEL_EXPIRATION || content.priority != SENTINEL_PRIORITY)
    {
        return Err(HeraldError::SentinelViolation {
            id: content.id,
            expiration: content.expiration,
            priority: content.priority,
        });
    }
    Ok(())
}
