use std::sync::Arc;

use herald_types::error::HeraldError;
use herald_types::primitives::short_hash;
use tracing::{debug, trace};

use crate::clock::TimeSource;
use crate::notice::Notice;
use crate::peer_manager::PeerSession;
use crate::store::NoticeStore;

/// Decides which notices each peer is offered.
///
/// A notice is offered to a peer at most once. It is sent only while inside
/// its relay window; once that closes the notice stays in effect locally but
/// is no longer propagated.
pub struct NoticeRelay {
    store: Arc<NoticeStore>,
    clock: Arc<dyn TimeSource>,
}

impl NoticeRelay {
    pub fn new(store: Arc<NoticeStore>, clock: Arc<dyn TimeSource>) -> Self {
        Self { store, clock }
    }

    /// Offer `notice` to one peer. Returns true if it was queued for sending.
    pub fn relay_to(&self, peer: &mut PeerSession, notice: &Notice) -> bool {
        let now = self.clock.now();
        if !notice.is_in_effect(now) {
            return false;
        }

        let hash = notice.hash();
        // The peer counts as informed once offered, whether or not we send.
        if !peer.mark_known(hash) {
            return false;
        }

        if !notice.is_relayable(now) {
            trace!(
                peer = peer.peer_id,
                hash = %short_hash(&hash),
                relay_until = notice.content().relay_until,
                "notice past relay window"
            );
            return false;
        }

        let sent = peer.push(notice.signed().clone());
        if sent {
            debug!(peer = peer.peer_id, id = notice.content().id, "relayed notice");
        }
        sent
    }

    /// Offer every stored notice to one peer, highest priority first.
    /// Returns how many were queued.
    pub fn relay_pending(&self, peer: &mut PeerSession) -> Result<usize, HeraldError> {
        let notices = self.store.snapshot()?;
        Ok(notices
            .iter()
            .filter(|notice| self.relay_to(peer, notice))
            .count())
    }
}
