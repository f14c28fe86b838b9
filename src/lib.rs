//! # parksys-assets
//!
//! Asset maintenance state engine for the ParkSys park administration
//! system.
//!
//! Maintenance dates are never stored: they are derived from an asset's
//! maintenance records. Asset edits are reconciled with the latest
//! server-confirmed copy before they are written, and history is an
//! append-only ledger authored exclusively by the server.
//!
//! ## Architecture
//!
//! ```text
//! UI
//!  │
//!  ├── AssetWorkspace (service/)
//!  │     ├── EditSession, conflict detection (reconciler/)
//!  │     ├── derive_maintenance_status (domain/)
//!  │     ├── LedgerView (ledger/)
//!  │     └── NotificationBus (domain/)
//!  │
//!  ├── AssetApi + QueryCache (client/)
//!  │        │ HTTP/JSON
//!  │        ▼
//!  └── reference backend (server/, binary)
//!        └── AssetStore
//! ```

pub mod app_state;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod reconciler;
pub mod server;
pub mod service;
