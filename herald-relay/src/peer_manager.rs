use std::collections::{HashMap, HashSet};

use herald_types::notice::SignedNotice;
use herald_types::primitives::{Hash, PeerId};
use tokio::sync::mpsc;

use crate::error::RelayError;

/// Notice state for one connected peer.
pub struct PeerSession {
    /// Transport-assigned peer identifier.
    pub peer_id: PeerId,
    /// Content hashes already offered to this peer. Only ever grows.
    known: HashSet<Hash>,
    /// Notices queued for the transport to send.
    outbound: mpsc::UnboundedSender<SignedNotice>,
}

impl PeerSession {
    /// Create a session and the receiving end of its outbound queue.
    pub fn new(peer_id: PeerId) -> (Self, mpsc::UnboundedReceiver<SignedNotice>) {
        let (outbound, rx) = mpsc::unbounded_channel();
        let session = Self {
            peer_id,
            known: HashSet::new(),
            outbound,
        };
        (session, rx)
    }

    /// Record that `hash` was offered. Returns false if it already was.
    pub fn mark_known(&mut self, hash: Hash) -> bool {
        self.known.insert(hash)
    }

    pub fn is_known(&self, hash: &Hash) -> bool {
        self.known.contains(hash)
    }

    /// Number of notices offered to this peer.
    pub fn known_count(&self) -> usize {
        self.known.len()
    }

    /// Queue a notice for sending. Returns false if the transport side of the
    /// queue has gone away.
    pub fn push(&self, notice: SignedNotice) -> bool {
        self.outbound.send(notice).is_ok()
    }
}

/// Tracks connected peers and their notice sessions.
pub struct PeerManager {
    peers: HashMap<PeerId, PeerSession>,
    max_connections: usize,
}

impl PeerManager {
    /// Create a new PeerManager with a maximum connection limit.
    pub fn new(max_connections: usize) -> Self {
        Self {
            peers: HashMap::new(),
            max_connections,
        }
    }

    /// Open a session for a peer, returning its outbound queue.
    ///
    /// Reconnecting a known peer replaces its session and forgets which
    /// notices it was offered.
    pub fn add_peer(
        &mut self,
        peer_id: PeerId,
    ) -> Result<mpsc::UnboundedReceiver<SignedNotice>, RelayError> {
        if !self.peers.contains_key(&peer_id) && self.is_full() {
            return Err(RelayError::PeerLimitReached {
                max: self.max_connections,
            });
        }
        let (session, rx) = PeerSession::new(peer_id);
        self.peers.insert(peer_id, session);
        Ok(rx)
    }

    /// Drop a peer's session. Returns false if it was not connected.
    pub fn remove_peer(&mut self, peer_id: &PeerId) -> bool {
        self.peers.remove(peer_id).is_some()
    }

    pub fn session(&self, peer_id: &PeerId) -> Option<&PeerSession> {
        self.peers.get(peer_id)
    }

    pub fn session_mut(&mut self, peer_id: &PeerId) -> Option<&mut PeerSession> {
        self.peers.get_mut(peer_id)
    }

    /// Mutable iterator over all sessions.
    pub fn sessions_mut(&mut self) -> impl Iterator<Item = &mut PeerSession> {
        self.peers.values_mut()
    }

    /// Whether the peer manager has reached its connection limit.
    pub fn is_full(&self) -> bool {
        self.peers.len() >= self.max_connections
    }

    /// Number of currently connected peers.
    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }

    /// Iterator over the IDs of all connected peers.
    pub fn connected_peers(&self) -> impl Iterator<Item = &PeerId> {
        self.peers.keys()
    }
}
