use futures::Stream;
use tokio::sync::broadcast;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use crate::types::internal::item::ItemRecord;

const DEFAULT_CAPACITY: usize = 256;

/// In-process change feed carrying every inserted item
#[derive(Debug, Clone)]
pub struct ItemFeed {
    tx: broadcast::Sender<ItemRecord>,
}

impl Default for ItemFeed {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ItemFeed {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an inserted record (fire-and-forget).
    pub fn publish(&self, record: ItemRecord) {
        let receivers = self.tx.receiver_count();
        let _ = self.tx.send(record);
        tracing::debug!("Published item insert to {} subscriber(s)", receivers);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ItemRecord> {
        self.tx.subscribe()
    }

    /// Subscription as a stream. Lagging subscribers skip what they missed.
    pub fn stream(&self) -> impl Stream<Item = ItemRecord> + Send + 'static {
        BroadcastStream::new(self.subscribe()).filter_map(|result| match result {
            Ok(record) => Some(record),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Item feed subscriber lagged, skipping events");
                None
            }
        })
    }
}
