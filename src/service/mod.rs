//! Service layer: workspace orchestration.
//!
//! [`AssetWorkspace`] coordinates reads and writes against an
//! [`crate::client::AssetApi`], drives edit sessions through submission and
//! emits events through the [`crate::domain::NotificationBus`].

pub mod asset_workspace;

pub use asset_workspace::{AssetDetail, AssetWorkspace, DeleteConfirmation, Loadable};
