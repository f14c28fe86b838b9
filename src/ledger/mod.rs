//! History Append-Only Ledger View.
//!
//! Pure presentation over server-authored [`HistoryEntry`](crate::domain::HistoryEntry)
//! values: change-type classification, diff value rendering and display
//! rows. Nothing here can create or alter history.

pub mod classify;
pub mod format;
pub mod view;

pub use classify::{ChangePresentation, classify_change_type};
pub use format::format_diff_value;
pub use view::{DiffLine, LedgerRow, LedgerView};
