//! The asset API collaborator contract and its implementations.
//!
//! [`AssetApi`] is the seam between the workspace and the backend. The
//! production implementation is [`HttpAssetApi`]; tests substitute their
//! own. [`QueryCache`] holds the last confirmed read of each query.

pub mod cache;
pub mod http;

use std::future::Future;

use crate::domain::{
    Asset, AssetAttributes, AssetId, HistoryEntry, MaintenanceRecord, NewMaintenanceRecord,
};
use crate::error::ClientError;

pub use cache::{Generation, QueryCache};
pub use http::HttpAssetApi;

/// Remote operations on assets, their maintenance records and history.
///
/// Every method is a single request; retries and caching are the caller's
/// business.
pub trait AssetApi: Send + Sync {
    /// Reads one asset.
    fn get_asset(&self, id: AssetId) -> impl Future<Output = Result<Asset, ClientError>> + Send;

    /// Lists every asset.
    fn list_assets(&self) -> impl Future<Output = Result<Vec<Asset>, ClientError>> + Send;

    /// Registers a new asset.
    fn register_asset(
        &self,
        attributes: &AssetAttributes,
    ) -> impl Future<Output = Result<Asset, ClientError>> + Send;

    /// Replaces an asset's attributes, provided it is still at
    /// `expected_version`.
    fn update_asset(
        &self,
        id: AssetId,
        expected_version: u64,
        attributes: &AssetAttributes,
    ) -> impl Future<Output = Result<Asset, ClientError>> + Send;

    /// Deletes an asset.
    fn delete_asset(&self, id: AssetId) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Lists the maintenance records of an asset.
    fn list_maintenance(
        &self,
        id: AssetId,
    ) -> impl Future<Output = Result<Vec<MaintenanceRecord>, ClientError>> + Send;

    /// Appends a maintenance record to an asset.
    fn create_maintenance(
        &self,
        id: AssetId,
        record: &NewMaintenanceRecord,
    ) -> impl Future<Output = Result<MaintenanceRecord, ClientError>> + Send;

    /// Reads the history of an asset, oldest first.
    fn list_history(
        &self,
        id: AssetId,
    ) -> impl Future<Output = Result<Vec<HistoryEntry>, ClientError>> + Send;
}
