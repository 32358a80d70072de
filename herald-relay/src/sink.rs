use herald_types::notice::{ChangeType, NoticeEvent};
use herald_types::primitives::{short_hash, Hash};
use tokio::sync::broadcast;
use tracing::info;

/// Receiver of notice store changes (UI, RPC subscribers, logs).
///
/// Called while the store lock is held, so implementations must not block
/// or call back into the store.
pub trait NoticeSink: Send + Sync {
    fn notice_changed(&self, hash: &Hash, change: ChangeType);
}

/// Publishes store changes on a tokio broadcast channel.
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    tx: broadcast::Sender<NoticeEvent>,
}

impl BroadcastSink {
    /// Create a sink with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to future store changes.
    pub fn subscribe(&self) -> broadcast::Receiver<NoticeEvent> {
        self.tx.subscribe()
    }
}

impl NoticeSink for BroadcastSink {
    fn notice_changed(&self, hash: &Hash, change: ChangeType) {
        // No subscribers is not an error.
        let _ = self.tx.send(NoticeEvent { hash: *hash, change });
    }
}

/// Logs store changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NoticeSink for TracingSink {
    fn notice_changed(&self, hash: &Hash, change: ChangeType) {
        info!(hash = %short_hash(hash), %change, "notice changed");
    }
}

/// Discards store changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NoticeSink for NullSink {
    fn notice_changed(&self, _hash: &Hash, _change: ChangeType) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_sink_delivers() {
        let sink = BroadcastSink::new(8);
        let mut rx = sink.subscribe();
        sink.notice_changed(&[1u8; 32], ChangeType::New);
        sink.notice_changed(&[2u8; 32], ChangeType::Deleted);
        assert_eq!(
            rx.try_recv().unwrap(),
            NoticeEvent {
                hash: [1u8; 32],
                change: ChangeType::New
            }
        );
        assert_eq!(rx.try_recv().unwrap().change, ChangeType::Deleted);
    }

    #[test]
    fn test_log_sinks_accept_changes() {
        let subscriber = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::INFO)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let sinks: [&dyn NoticeSink; 2] = [&TracingSink, &NullSink];
            for sink in sinks {
                sink.notice_changed(&[3u8; 32], ChangeType::New);
                sink.notice_changed(&[3u8; 32], ChangeType::Deleted);
            }
        });
    }

    #[test]
    fn test_broadcast_sink_without_subscribers() {
        let sink = BroadcastSink::new(8);
        sink.notice_changed(&[1u8; 32], ChangeType::New);
    }
}
