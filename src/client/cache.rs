//! Last confirmed read of each per-asset query.
//!
//! Entries are only ever filled from read responses. Mutations invalidate
//! entries; they never patch them with the body of a write response.
//!
//! Every (asset, query) pair carries a generation that invalidation bumps.
//! A read captures the generation before going to the network and hands it
//! back on store; a read that was in flight across an invalidation is
//! dropped instead of overwriting the invalidated slot.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{Asset, AssetId, HistoryEntry, MaintenanceRecord, QueryKind};

/// Opaque token taken before a read and checked on store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

#[derive(Debug, Default)]
struct Slots {
    assets: HashMap<AssetId, Asset>,
    maintenance: HashMap<AssetId, Vec<MaintenanceRecord>>,
    history: HashMap<AssetId, Vec<HistoryEntry>>,
    generations: HashMap<(AssetId, QueryKind), u64>,
}

impl Slots {
    fn generation(&self, id: AssetId, query: QueryKind) -> Generation {
        Generation(self.generations.get(&(id, query)).copied().unwrap_or(0))
    }

    fn is_current(&self, id: AssetId, query: QueryKind, taken: Generation) -> bool {
        self.generation(id, query) == taken
    }

    fn bump(&mut self, id: AssetId, query: QueryKind) {
        *self.generations.entry((id, query)).or_insert(0) += 1;
    }
}

/// Shared cache of asset, maintenance and history reads.
///
/// Cloning shares the underlying storage.
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    inner: Arc<RwLock<Slots>>,
}

impl QueryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation of `query` for `id`. Take it before issuing the
    /// read whose result will be stored.
    pub async fn generation(&self, id: AssetId, query: QueryKind) -> Generation {
        self.inner.read().await.generation(id, query)
    }

    /// Cached asset read.
    pub async fn asset(&self, id: AssetId) -> Option<Asset> {
        self.inner.read().await.assets.get(&id).cloned()
    }

    /// Cached maintenance list.
    pub async fn maintenance(&self, id: AssetId) -> Option<Vec<MaintenanceRecord>> {
        self.inner.read().await.maintenance.get(&id).cloned()
    }

    /// Cached history read.
    pub async fn history(&self, id: AssetId) -> Option<Vec<HistoryEntry>> {
        self.inner.read().await.history.get(&id).cloned()
    }

    /// Stores an asset read taken at `taken`. Returns `false` and stores
    /// nothing if the query was invalidated since.
    pub async fn store_asset(&self, asset: Asset, taken: Generation) -> bool {
        let mut slots = self.inner.write().await;
        if !slots.is_current(asset.id, QueryKind::AssetDetail, taken) {
            return false;
        }
        slots.assets.insert(asset.id, asset);
        true
    }

    /// Stores a maintenance list read taken at `taken`.
    pub async fn store_maintenance(
        &self,
        id: AssetId,
        records: Vec<MaintenanceRecord>,
        taken: Generation,
    ) -> bool {
        let mut slots = self.inner.write().await;
        if !slots.is_current(id, QueryKind::Maintenance, taken) {
            return false;
        }
        slots.maintenance.insert(id, records);
        true
    }

    /// Stores a history read taken at `taken`.
    pub async fn store_history(
        &self,
        id: AssetId,
        entries: Vec<HistoryEntry>,
        taken: Generation,
    ) -> bool {
        let mut slots = self.inner.write().await;
        if !slots.is_current(id, QueryKind::History, taken) {
            return false;
        }
        slots.history.insert(id, entries);
        true
    }

    /// Returns `true` if `query` for `id` holds a value.
    pub async fn contains(&self, id: AssetId, query: QueryKind) -> bool {
        let slots = self.inner.read().await;
        match query {
            QueryKind::AssetDetail => slots.assets.contains_key(&id),
            QueryKind::Maintenance => slots.maintenance.contains_key(&id),
            QueryKind::History => slots.history.contains_key(&id),
        }
    }

    /// Drops one query of one asset. Returns `true` if something was cached.
    pub async fn invalidate(&self, id: AssetId, query: QueryKind) -> bool {
        let mut slots = self.inner.write().await;
        slots.bump(id, query);
        match query {
            QueryKind::AssetDetail => slots.assets.remove(&id).is_some(),
            QueryKind::Maintenance => slots.maintenance.remove(&id).is_some(),
            QueryKind::History => slots.history.remove(&id).is_some(),
        }
    }

    /// Drops every query of one asset.
    pub async fn invalidate_asset(&self, id: AssetId) {
        let mut slots = self.inner.write().await;
        for query in QueryKind::ALL {
            slots.bump(id, query);
        }
        slots.assets.remove(&id);
        slots.maintenance.remove(&id);
        slots.history.remove(&id);
    }
}
