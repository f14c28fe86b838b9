//! Broadcast channel for workspace events.
//!
//! Every finished mutation and every cache invalidation publishes a
//! [`WorkspaceEvent`]. Toast renderers subscribe to everything; an asset
//! detail page subscribes through [`NotificationBus::subscribe_asset`] and
//! only wakes up for its own asset.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use super::{AssetId, QueryKind, WorkspaceEvent};

/// Broadcast bus for [`WorkspaceEvent`]s.
///
/// Lagging receivers lose the oldest events once the buffer is full.
#[derive(Debug, Clone)]
pub struct NotificationBus {
    sender: broadcast::Sender<WorkspaceEvent>,
}

impl NotificationBus {
    /// Creates a bus buffering up to `capacity` events per receiver
    /// (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes an event and returns how many receivers got it.
    pub fn publish(&self, event: WorkspaceEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Receiver for every future event.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<WorkspaceEvent> {
        self.sender.subscribe()
    }

    /// Receiver for future events about one asset.
    #[must_use]
    pub fn subscribe_asset(&self, asset_id: AssetId) -> AssetEvents {
        AssetEvents {
            asset_id,
            receiver: self.sender.subscribe(),
        }
    }

    /// Number of live receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Events about a single asset, read from a [`NotificationBus`].
#[derive(Debug)]
pub struct AssetEvents {
    asset_id: AssetId,
    receiver: broadcast::Receiver<WorkspaceEvent>,
}

impl AssetEvents {
    /// Asset this subscription follows.
    #[must_use]
    pub const fn asset_id(&self) -> AssetId {
        self.asset_id
    }

    /// Next event for the asset. Returns `None` once the bus is gone.
    ///
    /// Events lost to lag are skipped.
    pub async fn recv(&mut self) -> Option<WorkspaceEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if event.asset_id() == Some(self.asset_id) => return Some(event),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(asset_id = %self.asset_id, skipped, "asset subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Queries of the asset invalidated since the last call, without
    /// waiting. Each query appears at most once.
    pub fn drain_invalidated(&mut self) -> Vec<QueryKind> {
        let mut queries = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(WorkspaceEvent::QueryInvalidated { asset_id, query, .. })
                    if asset_id == self.asset_id && !queries.contains(&query) =>
                {
                    queries.push(query);
                }
                Ok(_) | Err(broadcast::error::TryRecvError::Lagged(_)) => {}
                Err(_) => return queries,
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::{Notification, Operation};

    fn invalidated(id: i64, query: QueryKind) -> WorkspaceEvent {
        WorkspaceEvent::QueryInvalidated {
            asset_id: AssetId::new(id),
            query,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn publish_without_receivers_returns_zero() {
        let bus = NotificationBus::new(16);
        assert_eq!(bus.publish(invalidated(1, QueryKind::History)), 0);
    }

    #[tokio::test]
    async fn asset_subscription_skips_other_assets() {
        let bus = NotificationBus::new(16);
        let mut events = bus.subscribe_asset(AssetId::new(9));

        bus.publish(invalidated(4, QueryKind::AssetDetail));
        let mine = WorkspaceEvent::Notification(Notification::success(
            Operation::AddMaintenance,
            Some(AssetId::new(9)),
        ));
        bus.publish(mine.clone());

        assert_eq!(events.asset_id(), AssetId::new(9));
        assert_eq!(events.recv().await, Some(mine));
    }

    #[tokio::test]
    async fn asset_subscription_ends_when_bus_is_dropped() {
        let bus = NotificationBus::new(4);
        let mut events = bus.subscribe_asset(AssetId::new(2));
        drop(bus);
        assert_eq!(events.recv().await, None);
    }

    #[test]
    fn drain_invalidated_dedups_and_filters() {
        let bus = NotificationBus::new(16);
        let mut events = bus.subscribe_asset(AssetId::new(3));
        bus.publish(invalidated(3, QueryKind::History));
        bus.publish(invalidated(8, QueryKind::Maintenance));
        bus.publish(invalidated(3, QueryKind::History));
        bus.publish(invalidated(3, QueryKind::AssetDetail));

        assert_eq!(
            events.drain_invalidated(),
            vec![QueryKind::History, QueryKind::AssetDetail]
        );
        assert!(events.drain_invalidated().is_empty());
    }

    #[test]
    fn receiver_count_tracks_subscribers() {
        let bus = NotificationBus::new(16);
        let rx = bus.subscribe();
        let asset_rx = bus.subscribe_asset(AssetId::new(1));
        assert_eq!(bus.receiver_count(), 2);
        drop(rx);
        drop(asset_rx);
        assert_eq!(bus.receiver_count(), 0);
    }
}
