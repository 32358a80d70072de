use std::sync::Arc;
use std::time::Duration;

use herald_relay::auth::Authenticator;
use herald_relay::clock::{SystemTimeSource, TimeSource};
use herald_relay::notice::Notice;
use herald_relay::peer_manager::PeerManager;
use herald_relay::processor::NoticeProcessor;
use herald_relay::relay::NoticeRelay;
use herald_relay::sink::BroadcastSink;
use herald_relay::store::NoticeStore;
use herald_types::notice::{NoticeEvent, SignedNotice};
use herald_types::primitives::{Hash, PeerId};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use crate::checkpoints::Checkpoints;
use crate::config::NodeConfig;
use crate::error::NodeError;

/// A notice delivered by the transport, tagged with the peer it came from.
#[derive(Debug, Clone)]
pub struct InboundNotice {
    pub from: PeerId,
    pub notice: SignedNotice,
}

/// Ties the notice processor, store, relay and peer sessions together.
///
/// The transport calls [`Node::connect_peer`] / [`Node::disconnect_peer`] as
/// connections come and go and hands received notices to [`Node::receive`]
/// (or feeds them through [`Node::run`]).
pub struct Node {
    config: NodeConfig,
    store: Arc<NoticeStore>,
    processor: NoticeProcessor,
    relay: NoticeRelay,
    peers: PeerManager,
    events: BroadcastSink,
    checkpoints: Checkpoints,
}

impl Node {
    /// Create a node using wall-clock time.
    pub fn new(config: NodeConfig) -> Result<Self, NodeError> {
        Self::with_time_source(config, Arc::new(SystemTimeSource))
    }

    /// Create a node with an explicit time source.
    pub fn with_time_source(
        config: NodeConfig,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Self, NodeError> {
        let relay_config = config.relay_config()?;
        let key_count = relay_config.trusted_keys.len();
        if key_count == 0 {
            warn!("no trusted notice keys configured, all notices will be rejected");
        }
        let checkpoints =
            Checkpoints::for_network(config.network_id()?, config.checkpoints.enabled)?;

        let store = Arc::new(NoticeStore::new());
        let events = BroadcastSink::new(config.notices.event_capacity.max(1));
        let processor = NoticeProcessor::new(
            Authenticator::new(relay_config.trusted_keys),
            Arc::clone(&store),
            Arc::new(events.clone()),
            Arc::clone(&clock),
        );
        let relay = NoticeRelay::new(Arc::clone(&store), clock);
        let peers = PeerManager::new(relay_config.max_connections);

        info!(
            network = %config.network_id,
            trusted_keys = key_count,
            checkpoints = checkpoints.is_enabled(),
            "notice node initialized"
        );

        Ok(Self {
            config,
            store,
            processor,
            relay,
            peers,
            events,
            checkpoints,
        })
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn checkpoints(&self) -> &Checkpoints {
        &self.checkpoints
    }

    /// Subscribe to notice store changes.
    pub fn subscribe(&self) -> broadcast::Receiver<NoticeEvent> {
        self.events.subscribe()
    }

    /// Look up a stored notice by content hash.
    pub fn notice(&self, hash: &Hash) -> Result<Option<Notice>, NodeError> {
        Ok(self.store.get(hash)?)
    }

    /// All stored notices, highest priority first.
    pub fn notices(&self) -> Result<Vec<Notice>, NodeError> {
        Ok(self.store.snapshot()?)
    }

    pub fn peer_count(&self) -> usize {
        self.peers.peer_count()
    }

    /// Open a session for a newly connected peer and offer it every stored
    /// notice. The returned queue yields notices to send to that peer.
    pub fn connect_peer(
        &mut self,
        peer_id: PeerId,
    ) -> Result<mpsc::UnboundedReceiver<SignedNotice>, NodeError> {
        let rx = self.peers.add_peer(peer_id)?;
        if let Some(session) = self.peers.session_mut(&peer_id) {
            let sent = self.relay.relay_pending(session)?;
            debug!(peer = peer_id, sent, "peer connected");
        }
        Ok(rx)
    }

    /// Close a peer's session.
    pub fn disconnect_peer(&mut self, peer_id: PeerId) -> bool {
        let removed = self.peers.remove_peer(&peer_id);
        if removed {
            debug!(peer = peer_id, "peer disconnected");
        }
        removed
    }

    /// Process a notice received from `from` and, if accepted, relay it to
    /// every other connected peer.
    pub fn receive(&mut self, from: PeerId, notice: SignedNotice) -> Result<Hash, NodeError> {
        self.accept(Some(from), notice)
    }

    /// Process a locally created notice and relay it to all peers.
    pub fn broadcast(&mut self, notice: SignedNotice) -> Result<Hash, NodeError> {
        self.accept(None, notice)
    }

    fn accept(&mut self, from: Option<PeerId>, notice: SignedNotice) -> Result<Hash, NodeError> {
        let hash = self.processor.process(notice)?;

        // The sender already has it.
        if let Some(peer) = from {
            if let Some(session) = self.peers.session_mut(&peer) {
                session.mark_known(hash);
            }
        }

        if let Some(accepted) = self.store.get(&hash)? {
            let mut relayed = 0;
            for session in self.peers.sessions_mut() {
                if self.relay.relay_to(session, &accepted) {
                    relayed += 1;
                }
            }
            debug!(relayed, "relayed accepted notice");
        }
        Ok(hash)
    }

    /// Offer stored notices to every connected peer. Returns how many were
    /// queued in total.
    pub fn service_peers(&mut self) -> Result<usize, NodeError> {
        let mut total = 0;
        for session in self.peers.sessions_mut() {
            total += self.relay.relay_pending(session)?;
        }
        Ok(total)
    }

    /// Process inbound notices until the transport closes the channel,
    /// periodically re-offering stored notices to peers.
    pub async fn run(&mut self, mut inbound: mpsc::Receiver<InboundNotice>) -> Result<(), NodeError> {
        let period = Duration::from_secs(self.config.network.relay_interval_secs.max(1));
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                msg = inbound.recv() => {
                    let Some(InboundNotice { from, notice }) = msg else {
                        info!("inbound notice channel closed");
                        return Ok(());
                    };
                    match self.receive(from, notice) {
                        Ok(_) => {}
                        // Already logged by the processor; peers get no reply.
                        Err(NodeError::NoticeError(_)) => {}
                        Err(e) => return Err(e),
                    }
                }
                _ = ticker.tick() => {
                    let sent = self.service_peers()?;
                    if sent > 0 {
                        debug!(sent, "serviced peers");
                    }
                }
            }
        }
    }
}
