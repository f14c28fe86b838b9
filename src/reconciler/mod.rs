//! Asset edit reconciler: form validation, conflict detection and the
//! per-edit session state machine.
//!
//! The network side of a submission lives in
//! [`crate::service::AssetWorkspace::submit_edit`]; this module is pure.

pub mod conflict;
pub mod form;
pub mod maintenance_form;
pub mod session;

pub use conflict::{FieldConflict, MergedEdit, concurrent_changes, merge_edit};
pub use form::{AssetForm, FieldErrors};
pub use maintenance_form::MaintenanceForm;
pub use session::{EditSession, EditState, PendingSubmission, SessionError};
