//! In-memory asset store with per-asset locking.
//!
//! [`AssetStore`] keeps every asset together with its maintenance records
//! and history in one [`AssetRecord`] behind its own
//! [`tokio::sync::RwLock`]. Writes to different assets run concurrently;
//! writes to the same asset are serialized, which makes the version check
//! of [`AssetStore::update`] atomic with the write it guards.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;

use super::history::{Actor, HistoryRecord};
use crate::domain::{
    Asset, AssetAttributes, AssetId, AssetStatus, ChangeType, Labeled, MaintenanceRecord,
    MaintenanceStatus, NewMaintenanceRecord,
};
use crate::error::ApiError;
use crate::reconciler::AssetForm;

/// Everything stored for one asset.
#[derive(Debug, Clone)]
pub struct AssetRecord {
    /// Current server copy.
    pub asset: Asset,
    /// Maintenance records, in creation order.
    pub maintenance: Vec<MaintenanceRecord>,
    /// Append-only history, oldest first.
    pub history: Vec<HistoryRecord>,
}

/// Central store for all assets.
///
/// # Concurrency
///
/// - Multiple tasks may read the same asset concurrently.
/// - Writes to different assets are concurrent.
/// - Writes to the same asset are serialized.
#[derive(Debug)]
pub struct AssetStore {
    assets: RwLock<HashMap<AssetId, Arc<RwLock<AssetRecord>>>>,
    next_asset_id: AtomicI64,
    next_record_id: AtomicI64,
    next_history_id: AtomicI64,
}

impl Default for AssetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            assets: RwLock::new(HashMap::new()),
            next_asset_id: AtomicI64::new(1),
            next_record_id: AtomicI64::new(1),
            next_history_id: AtomicI64::new(1),
        }
    }

    /// Registers a new asset and appends its `creation` record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the attributes break the
    /// validation contract.
    pub async fn register(
        &self,
        attributes: AssetAttributes,
        actor: &Actor,
    ) -> Result<Asset, ApiError> {
        let attributes = normalize(&attributes)?;
        let id = AssetId::new(self.next_asset_id.fetch_add(1, Ordering::Relaxed));
        let now = Utc::now();
        let asset = Asset {
            id,
            attributes,
            version: 1,
            created_at: now,
            updated_at: now,
        };

        let creation = HistoryRecord::summary(
            self.history_id(),
            ChangeType::Creation,
            actor,
            format!("Asset \"{}\" registered", asset.attributes.name),
        );
        let record = AssetRecord {
            asset: asset.clone(),
            maintenance: Vec::new(),
            history: vec![creation],
        };
        self.assets
            .write()
            .await
            .insert(id, Arc::new(RwLock::new(record)));

        tracing::info!(asset_id = %id, "asset registered");
        Ok(asset)
    }

    /// Returns the current copy of one asset.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AssetNotFound`] for an unknown id.
    pub async fn get(&self, id: AssetId) -> Result<Asset, ApiError> {
        let entry = self.entry(id).await?;
        let record = entry.read().await;
        Ok(record.asset.clone())
    }

    /// Returns every asset, ordered by id.
    pub async fn list(&self) -> Vec<Asset> {
        let map = self.assets.read().await;
        let mut assets = Vec::with_capacity(map.len());
        for entry in map.values() {
            assets.push(entry.read().await.asset.clone());
        }
        assets.sort_by_key(|a| a.id);
        assets
    }

    /// Replaces an asset's attributes if it is still at `expected_version`.
    ///
    /// Appends one `updated` record, one `modification` record per changed
    /// field and, when the status becomes retired, a `retirement` record.
    /// A write that changes nothing leaves the asset and its history as
    /// they are.
    ///
    /// # Errors
    ///
    /// - [`ApiError::AssetNotFound`] for an unknown id;
    /// - [`ApiError::VersionConflict`] if the asset moved on;
    /// - [`ApiError::InvalidRequest`] for invalid attributes.
    pub async fn update(
        &self,
        id: AssetId,
        expected_version: u64,
        attributes: AssetAttributes,
        actor: &Actor,
    ) -> Result<Asset, ApiError> {
        let attributes = normalize(&attributes)?;
        let entry = self.entry(id).await?;
        let mut record = entry.write().await;

        let current = record.asset.version;
        if current != expected_version {
            return Err(ApiError::VersionConflict {
                expected: expected_version,
                actual: current,
            });
        }

        let previous = record.asset.attributes.clone();
        let changed = previous.changed_fields(&attributes);
        if changed.is_empty() {
            return Ok(record.asset.clone());
        }

        let mut appended = Vec::with_capacity(changed.len() + 2);
        appended.push(HistoryRecord::summary(
            self.history_id(),
            ChangeType::Updated,
            actor,
            format!("{} field(s) updated", changed.len()),
        ));
        for &field in &changed {
            appended.push(HistoryRecord::modification(
                self.history_id(),
                actor,
                field,
                previous.value_of(field),
                attributes.value_of(field),
            ));
        }
        if attributes.status == AssetStatus::Retired && previous.status != AssetStatus::Retired {
            appended.push(HistoryRecord::summary(
                self.history_id(),
                ChangeType::Retirement,
                actor,
                format!("Asset retired (was {})", previous.status.label()),
            ));
        }

        record.asset.attributes = attributes;
        record.asset.version = current.saturating_add(1);
        record.asset.updated_at = Utc::now();
        record.history.extend(appended);

        tracing::info!(asset_id = %id, version = record.asset.version, fields = changed.len(), "asset updated");
        Ok(record.asset.clone())
    }

    /// Removes an asset with its maintenance records and history.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AssetNotFound`] for an unknown id.
    pub async fn delete(&self, id: AssetId) -> Result<(), ApiError> {
        let mut map = self.assets.write().await;
        map.remove(&id).ok_or(ApiError::AssetNotFound(id))?;
        tracing::info!(asset_id = %id, "asset deleted");
        Ok(())
    }

    /// Returns the maintenance records of an asset.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AssetNotFound`] for an unknown id.
    pub async fn list_maintenance(&self, id: AssetId) -> Result<Vec<MaintenanceRecord>, ApiError> {
        let entry = self.entry(id).await?;
        let record = entry.read().await;
        Ok(record.maintenance.clone())
    }

    /// Appends a maintenance record and its `maintenance` history record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AssetNotFound`] for an unknown id, or
    /// [`ApiError::InvalidRequest`] for an empty description or a
    /// negative cost.
    pub async fn create_maintenance(
        &self,
        id: AssetId,
        new: NewMaintenanceRecord,
        actor: &Actor,
    ) -> Result<MaintenanceRecord, ApiError> {
        let description = new.description.trim();
        if description.is_empty() {
            return Err(ApiError::InvalidRequest(
                "description: is required".to_string(),
            ));
        }
        if new.status == MaintenanceStatus::Unknown {
            return Err(ApiError::InvalidRequest(
                "status: must be one of scheduled, in_progress, completed".to_string(),
            ));
        }
        if let Some(cost) = new.cost
            && !(cost.is_finite() && cost >= 0.0)
        {
            return Err(ApiError::InvalidRequest(
                "cost: must be a non-negative amount".to_string(),
            ));
        }

        let entry = self.entry(id).await?;
        let mut record = entry.write().await;

        let created = MaintenanceRecord {
            id: self.next_record_id.fetch_add(1, Ordering::Relaxed),
            asset_id: id,
            date: Some(new.date),
            maintenance_type: new.maintenance_type,
            description: description.to_string(),
            cost: new.cost,
            performed_by: new.performed_by,
            performer_id: new.performer_id,
            performer_name: None,
            next_maintenance_date: new.next_maintenance_date,
            status: new.status,
            notes: new.notes,
        };

        let appended = HistoryRecord::summary(
            self.history_id(),
            ChangeType::Maintenance,
            actor,
            format!(
                "{} maintenance recorded: {}",
                created.maintenance_type.label(),
                created.description
            ),
        )
        .with_notes(created.notes.clone());

        record.maintenance.push(created.clone());
        record.history.push(appended);

        tracing::info!(asset_id = %id, record_id = created.id, "maintenance recorded");
        Ok(created)
    }

    /// Returns the history of an asset, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AssetNotFound`] for an unknown id.
    pub async fn history(&self, id: AssetId) -> Result<Vec<HistoryRecord>, ApiError> {
        let entry = self.entry(id).await?;
        let record = entry.read().await;
        Ok(record.history.clone())
    }

    /// Returns the number of stored assets.
    pub async fn len(&self) -> usize {
        self.assets.read().await.len()
    }

    /// Returns `true` if the store holds no assets.
    pub async fn is_empty(&self) -> bool {
        self.assets.read().await.is_empty()
    }

    async fn entry(&self, id: AssetId) -> Result<Arc<RwLock<AssetRecord>>, ApiError> {
        let map = self.assets.read().await;
        map.get(&id).cloned().ok_or(ApiError::AssetNotFound(id))
    }

    fn history_id(&self) -> i64 {
        self.next_history_id.fetch_add(1, Ordering::Relaxed)
    }
}

/// Applies the shared validation contract to attributes received over
/// the wire, returning their normalized form.
fn normalize(attributes: &AssetAttributes) -> Result<AssetAttributes, ApiError> {
    AssetForm::from_attributes(attributes)
        .validate()
        .map_err(|errors| ApiError::InvalidRequest(errors.to_string()))
}
