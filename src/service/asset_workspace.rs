//! Asset workspace: orchestrates reads, edits, maintenance submission and
//! deletes against an [`AssetApi`], and emits workspace events.

use chrono::Utc;

use crate::client::{AssetApi, QueryCache};
use crate::domain::{
    Asset, AssetId, DerivedMaintenance, HistoryEntry, MaintenanceRecord, Notification,
    NotificationBus, Operation, QueryKind, WorkspaceEvent, derive_maintenance_status,
};
use crate::error::ClientError;
use crate::ledger::LedgerView;
use crate::reconciler::{
    AssetForm, EditSession, FieldErrors, MaintenanceForm, PendingSubmission, merge_edit,
};

/// One independently loaded read.
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    /// Not resolved yet.
    Loading,
    /// Resolved successfully.
    Ready(T),
    /// Resolved with an error; other reads are unaffected.
    Failed(ClientError),
}

impl<T> Loadable<T> {
    /// The value, if ready.
    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The error, if failed.
    #[must_use]
    pub const fn error(&self) -> Option<&ClientError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Returns `true` once the read resolved, either way.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Loading)
    }

    fn from_result(result: Result<T, ClientError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Failed(err),
        }
    }
}

/// Everything the asset detail page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetDetail {
    /// Asset the reads are for.
    pub asset_id: AssetId,
    /// The asset record.
    pub asset: Loadable<Asset>,
    /// Maintenance records.
    pub maintenance: Loadable<Vec<MaintenanceRecord>>,
    /// Server-authored history.
    pub history: Loadable<Vec<HistoryEntry>>,
    /// Derived maintenance state; follows the maintenance read.
    pub derived: Loadable<DerivedMaintenance>,
}

impl AssetDetail {
    /// A detail with nothing resolved yet.
    #[must_use]
    pub const fn loading(asset_id: AssetId) -> Self {
        Self {
            asset_id,
            asset: Loadable::Loading,
            maintenance: Loadable::Loading,
            history: Loadable::Loading,
            derived: Loadable::Loading,
        }
    }

    /// Ledger over the history read, once it is ready.
    #[must_use]
    pub fn ledger(&self) -> Option<LedgerView<'_>> {
        self.history.ready().map(|entries| LedgerView::new(entries))
    }
}

/// Proof that the user explicitly confirmed deleting one asset.
///
/// Only [`AssetWorkspace::confirm_delete`] creates one, and
/// [`AssetWorkspace::delete_asset`] consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct DeleteConfirmation {
    asset_id: AssetId,
}

impl DeleteConfirmation {
    /// Asset the confirmation is for.
    #[must_use]
    pub const fn asset_id(&self) -> AssetId {
        self.asset_id
    }
}

/// Client-side workspace for managing assets.
///
/// Reads go through the [`QueryCache`]; every write invalidates the
/// affected queries and publishes exactly one success or failure
/// notification on the [`NotificationBus`]. Validation failures never
/// reach the network and are reported through the returned error only.
#[derive(Debug, Clone)]
pub struct AssetWorkspace<A> {
    api: A,
    cache: QueryCache,
    bus: NotificationBus,
}

impl<A: AssetApi> AssetWorkspace<A> {
    /// Creates a workspace over `api`.
    #[must_use]
    pub fn new(api: A, bus: NotificationBus) -> Self {
        Self {
            api,
            cache: QueryCache::new(),
            bus,
        }
    }

    /// The underlying API client.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// The query cache.
    #[must_use]
    pub const fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// The notification bus.
    #[must_use]
    pub const fn bus(&self) -> &NotificationBus {
        &self.bus
    }

    /// Loads the asset, its maintenance list and its history concurrently.
    ///
    /// Each read degrades on its own: a failed history read still yields
    /// the asset and derived maintenance state.
    pub async fn load_detail(&self, id: AssetId) -> AssetDetail {
        let (asset, maintenance, history) = tokio::join!(
            self.read_asset(id),
            self.read_maintenance(id),
            self.read_history(id)
        );

        let derived = match &maintenance {
            Ok(records) => Loadable::Ready(derive_maintenance_status(records, Utc::now())),
            Err(err) => Loadable::Failed(err.clone()),
        };

        AssetDetail {
            asset_id: id,
            asset: Loadable::from_result(asset),
            maintenance: Loadable::from_result(maintenance),
            history: Loadable::from_result(history),
            derived,
        }
    }

    /// Lists every asset, uncached.
    ///
    /// # Errors
    ///
    /// Propagates the API error.
    pub async fn list_assets(&self) -> Result<Vec<Asset>, ClientError> {
        self.api.list_assets().await
    }

    /// Opens `session` on the server-confirmed copy of asset `id`.
    ///
    /// # Errors
    ///
    /// Returns the read error, or [`ClientError::Session`] if the session
    /// is already in use.
    pub async fn open_edit(&self, session: &mut EditSession, id: AssetId) -> Result<(), ClientError> {
        let asset = self.read_asset(id).await?;
        session.open(&asset)?;
        Ok(())
    }

    /// Submits the edit held by `session`.
    ///
    /// Validates locally, fetches the latest server copy, checks for
    /// field-level conflicts and writes the merged attributes with the
    /// latest version as precondition. On success the asset's queries are
    /// invalidated and the session returns to idle; on failure the session
    /// stays in editing with its form untouched.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Validation`] if the form is invalid (nothing sent);
    /// - [`ClientError::Conflict`] if the asset changed concurrently;
    /// - any transport or server error from the API.
    pub async fn submit_edit(&self, session: &mut EditSession) -> Result<Asset, ClientError> {
        let pending = session.begin_submit()?;
        let id = pending.asset_id;

        match self.write_edit(&pending).await {
            Ok(asset) => {
                session.complete_success()?;
                self.invalidate(id).await;
                self.notify(Notification::success(Operation::EditAsset, Some(id)));
                tracing::info!(asset_id = %id, version = asset.version, "asset updated");
                Ok(asset)
            }
            Err(err) => {
                session.complete_failure(err.clone())?;
                self.notify_failure(Operation::EditAsset, Some(id), &err);
                tracing::warn!(asset_id = %id, error = %err, "asset update failed");
                Err(err)
            }
        }
    }

    /// Re-reads the asset and adopts it as the session's baseline,
    /// keeping the user's form values. Used to resolve a conflict.
    ///
    /// # Errors
    ///
    /// Returns the read error or a session error.
    pub async fn reload_baseline(&self, session: &mut EditSession) -> Result<Asset, ClientError> {
        let Some(id) = session.asset_id() else {
            return Err(crate::reconciler::SessionError::InvalidTransition {
                from: session.state(),
                action: "reload without an open edit",
            }
            .into());
        };
        self.cache.invalidate(id, QueryKind::AssetDetail).await;
        let latest = self.read_asset(id).await?;
        session.rebase(&latest)?;
        Ok(latest)
    }

    /// Registers a new asset from a filled form.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for invalid input (nothing sent)
    /// or the API error.
    pub async fn register_asset(&self, form: &AssetForm) -> Result<Asset, ClientError> {
        let attributes = form.validate().map_err(ClientError::Validation)?;
        match self.api.register_asset(&attributes).await {
            Ok(asset) => {
                self.notify(Notification::success(Operation::RegisterAsset, Some(asset.id)));
                tracing::info!(asset_id = %asset.id, "asset registered");
                Ok(asset)
            }
            Err(err) => {
                self.notify_failure(Operation::RegisterAsset, None, &err);
                Err(err)
            }
        }
    }

    /// Appends a maintenance record to asset `id`.
    ///
    /// Independent of any open edit session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for invalid input (nothing sent)
    /// or the API error.
    pub async fn add_maintenance(
        &self,
        id: AssetId,
        form: &MaintenanceForm,
    ) -> Result<MaintenanceRecord, ClientError> {
        let record = form.validate().map_err(ClientError::Validation)?;
        match self.api.create_maintenance(id, &record).await {
            Ok(created) => {
                self.invalidate(id).await;
                self.notify(Notification::success(Operation::AddMaintenance, Some(id)));
                tracing::info!(asset_id = %id, record_id = created.id, "maintenance recorded");
                Ok(created)
            }
            Err(err) => {
                self.notify_failure(Operation::AddMaintenance, Some(id), &err);
                tracing::warn!(asset_id = %id, error = %err, "maintenance submission failed");
                Err(err)
            }
        }
    }

    /// Confirms that the user wants to delete `asset`.
    ///
    /// `typed_name` must repeat the asset's name, ignoring surrounding
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if the name does not match.
    pub fn confirm_delete(
        &self,
        asset: &Asset,
        typed_name: &str,
    ) -> Result<DeleteConfirmation, ClientError> {
        if typed_name.trim() != asset.attributes.name.trim() {
            let mut errors = FieldErrors::default();
            errors.add("confirmation", "must match the asset name");
            return Err(ClientError::Validation(errors));
        }
        Ok(DeleteConfirmation { asset_id: asset.id })
    }

    /// Deletes the confirmed asset. Irreversible.
    ///
    /// # Errors
    ///
    /// Returns the API error.
    pub async fn delete_asset(&self, confirmation: DeleteConfirmation) -> Result<(), ClientError> {
        let id = confirmation.asset_id;
        match self.api.delete_asset(id).await {
            Ok(()) => {
                self.invalidate(id).await;
                self.notify(Notification::success(Operation::DeleteAsset, Some(id)));
                tracing::info!(asset_id = %id, "asset deleted");
                Ok(())
            }
            Err(err) => {
                self.notify_failure(Operation::DeleteAsset, Some(id), &err);
                Err(err)
            }
        }
    }

    async fn write_edit(&self, pending: &PendingSubmission) -> Result<Asset, ClientError> {
        let latest = self.api.get_asset(pending.asset_id).await?;

        let merged = merge_edit(&pending.baseline, &pending.attributes, &latest).map_err(
            |conflicts| ClientError::Conflict {
                message: format!(
                    "{} field(s) changed on the server since the edit was opened",
                    conflicts.len()
                ),
                conflicts,
            },
        )?;

        if merged.changed.is_empty() {
            tracing::debug!(asset_id = %pending.asset_id, "edit has no changes, skipping write");
            return Ok(latest);
        }

        self.api
            .update_asset(pending.asset_id, merged.base_version, &merged.attributes)
            .await
    }

    async fn read_asset(&self, id: AssetId) -> Result<Asset, ClientError> {
        let taken = self.cache.generation(id, QueryKind::AssetDetail).await;
        if let Some(asset) = self.cache.asset(id).await {
            return Ok(asset);
        }
        let asset = self.api.get_asset(id).await?;
        if !self.cache.store_asset(asset.clone(), taken).await {
            tracing::debug!(asset_id = %id, "asset read raced an invalidation, not cached");
        }
        Ok(asset)
    }

    async fn read_maintenance(&self, id: AssetId) -> Result<Vec<MaintenanceRecord>, ClientError> {
        let taken = self.cache.generation(id, QueryKind::Maintenance).await;
        if let Some(records) = self.cache.maintenance(id).await {
            return Ok(records);
        }
        let records = self.api.list_maintenance(id).await?;
        if !self.cache.store_maintenance(id, records.clone(), taken).await {
            tracing::debug!(asset_id = %id, "maintenance read raced an invalidation, not cached");
        }
        Ok(records)
    }

    async fn read_history(&self, id: AssetId) -> Result<Vec<HistoryEntry>, ClientError> {
        let taken = self.cache.generation(id, QueryKind::History).await;
        if let Some(entries) = self.cache.history(id).await {
            return Ok(entries);
        }
        let entries = self.api.list_history(id).await?;
        if !self.cache.store_history(id, entries.clone(), taken).await {
            tracing::debug!(asset_id = %id, "history read raced an invalidation, not cached");
        }
        Ok(entries)
    }

    /// Drops every per-asset query and announces each invalidation.
    async fn invalidate(&self, id: AssetId) {
        self.cache.invalidate_asset(id).await;
        for query in QueryKind::ALL {
            let _ = self.bus.publish(WorkspaceEvent::QueryInvalidated {
                asset_id: id,
                query,
                timestamp: Utc::now(),
            });
        }
    }

    fn notify(&self, notification: Notification) {
        let _ = self.bus.publish(WorkspaceEvent::Notification(notification));
    }

    fn notify_failure(&self, operation: Operation, asset_id: Option<AssetId>, err: &ClientError) {
        self.notify(Notification::failure(
            operation,
            asset_id,
            err.kind(),
            err.to_string(),
            err.is_retryable(),
        ));
    }
}
