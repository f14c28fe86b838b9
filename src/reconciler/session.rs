//! Edit session state machine.
//!
//! ```text
//!          open              submit                 valid
//!  Idle ──────────▶ Editing ────────▶ Validating ─────────▶ Submitting
//!   ▲                 ▲  │                 │ invalid           │   │
//!   │                 │  │ cancel          ▼                   │   │
//!   │                 │  └────────▶ Idle   Editing (errors)    │   │
//!   │                 └────────────────────────────────────────┘   │
//!   │                            failure (edits kept)              │
//!   └──────────────────────────────────────────────────────────────┘
//!                               success
//! ```
//!
//! The session owns the raw form and the immutable baseline snapshot. It
//! never performs I/O; the workspace drives it around the network calls.

use serde::Serialize;

use super::form::{AssetForm, FieldErrors};
use crate::domain::{Asset, AssetAttributes, AssetId};
use crate::error::ClientError;

/// Current state of an [`EditSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditState {
    /// No edit in progress. Initial and resting state.
    Idle,
    /// The user is editing the form.
    Editing,
    /// The form is being validated.
    Validating,
    /// A validated edit is on its way to the server.
    Submitting,
}

/// Illegal use of an edit session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The requested action is not allowed in the current state.
    #[error("cannot {action} while {from:?}")]
    InvalidTransition {
        /// State the session was in.
        from: EditState,
        /// Attempted action.
        action: &'static str,
    },

    /// A rebase was attempted with a different asset.
    #[error("edit session is for asset {expected}, got {actual}")]
    AssetMismatch {
        /// Asset being edited.
        expected: AssetId,
        /// Asset supplied.
        actual: AssetId,
    },
}

/// A validated edit handed to the workspace for submission.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    /// Asset being edited.
    pub asset_id: AssetId,
    /// Attributes when the edit was opened (or last rebased).
    pub baseline: AssetAttributes,
    /// Validated attributes from the form.
    pub attributes: AssetAttributes,
}

/// One reusable edit session for a single asset at a time.
#[derive(Debug, Clone)]
pub struct EditSession {
    state: EditState,
    baseline: Option<Asset>,
    form: AssetForm,
    field_errors: FieldErrors,
    last_error: Option<ClientError>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    /// Creates an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: EditState::Idle,
            baseline: None,
            form: AssetForm::default(),
            field_errors: FieldErrors::default(),
            last_error: None,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> EditState {
        self.state
    }

    /// The immutable snapshot taken when the edit was opened.
    #[must_use]
    pub const fn baseline(&self) -> Option<&Asset> {
        self.baseline.as_ref()
    }

    /// Asset being edited.
    #[must_use]
    pub fn asset_id(&self) -> Option<AssetId> {
        self.baseline.as_ref().map(|a| a.id)
    }

    /// The form as currently filled in.
    #[must_use]
    pub const fn form(&self) -> &AssetForm {
        &self.form
    }

    /// Errors from the last failed validation.
    #[must_use]
    pub const fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Error from the last failed submission.
    #[must_use]
    pub const fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    /// Opens the edit surface for `asset`, snapshotting it as the baseline
    /// and filling the form from it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidTransition`] unless the session is idle.
    pub fn open(&mut self, asset: &Asset) -> Result<(), SessionError> {
        self.expect_state(EditState::Idle, "open an edit")?;
        self.form = AssetForm::from_attributes(&asset.attributes);
        self.baseline = Some(asset.clone());
        self.field_errors = FieldErrors::default();
        self.last_error = None;
        self.state = EditState::Editing;
        Ok(())
    }

    /// Mutable access to the form while editing.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidTransition`] outside `Editing`.
    pub fn form_mut(&mut self) -> Result<&mut AssetForm, SessionError> {
        self.expect_state(EditState::Editing, "edit the form")?;
        Ok(&mut self.form)
    }

    /// Validates the form and, if valid, moves to `Submitting`.
    ///
    /// On validation failure the session returns to `Editing` with the
    /// field errors recorded and the form untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for invalid input, or
    /// [`ClientError::Session`] outside `Editing`.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, ClientError> {
        self.expect_state(EditState::Editing, "submit")?;
        let Some(baseline) = self.baseline.as_ref() else {
            return Err(SessionError::InvalidTransition {
                from: self.state,
                action: "submit without a baseline",
            }
            .into());
        };

        self.state = EditState::Validating;
        match self.form.validate() {
            Ok(attributes) => {
                let pending = PendingSubmission {
                    asset_id: baseline.id,
                    baseline: baseline.attributes.clone(),
                    attributes,
                };
                self.field_errors = FieldErrors::default();
                self.last_error = None;
                self.state = EditState::Submitting;
                Ok(pending)
            }
            Err(errors) => {
                self.field_errors = errors.clone();
                self.state = EditState::Editing;
                Err(ClientError::Validation(errors))
            }
        }
    }

    /// Server acknowledged the write: close the edit and return to `Idle`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidTransition`] outside `Submitting`.
    pub fn complete_success(&mut self) -> Result<(), SessionError> {
        self.expect_state(EditState::Submitting, "complete a submission")?;
        *self = Self::new();
        Ok(())
    }

    /// The write failed: back to `Editing` with the error recorded and the
    /// form exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidTransition`] outside `Submitting`.
    pub fn complete_failure(&mut self, error: ClientError) -> Result<(), SessionError> {
        self.expect_state(EditState::Submitting, "fail a submission")?;
        self.last_error = Some(error);
        self.state = EditState::Editing;
        Ok(())
    }

    /// Adopts a fresher server copy as the baseline, keeping the form.
    ///
    /// Used after a conflict, once the user chose to reapply their edits on
    /// top of the current server state.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] outside `Editing` or for another asset.
    pub fn rebase(&mut self, latest: &Asset) -> Result<(), SessionError> {
        self.expect_state(EditState::Editing, "rebase")?;
        if let Some(current) = self.asset_id()
            && current != latest.id
        {
            return Err(SessionError::AssetMismatch {
                expected: current,
                actual: latest.id,
            });
        }
        self.baseline = Some(latest.clone());
        self.last_error = None;
        Ok(())
    }

    /// Discards the edit and returns to `Idle`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidTransition`] outside `Editing`.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        self.expect_state(EditState::Editing, "cancel")?;
        *self = Self::new();
        Ok(())
    }

    fn expect_state(&self, expected: EditState, action: &'static str) -> Result<(), SessionError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                from: self.state,
                action,
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::domain::asset::tests::sample_asset;
    use crate::error::ErrorKind;

    fn editing(id: i64) -> EditSession {
        let mut session = EditSession::new();
        assert_ok!(session.open(&sample_asset(id)));
        session
    }

    #[test]
    fn starts_idle() {
        let session = EditSession::default();
        assert_eq!(session.state(), EditState::Idle);
        assert!(session.baseline().is_none());
    }

    #[test]
    fn open_snapshots_baseline_and_fills_form() {
        let session = editing(7);
        assert_eq!(session.state(), EditState::Editing);
        assert_eq!(session.asset_id(), Some(crate::domain::AssetId::new(7)));
        assert_eq!(session.form().name, "Bench A");
        assert_eq!(session.form().status, "active");
    }

    #[test]
    fn cannot_open_twice() {
        let mut session = editing(7);
        let err = assert_err!(session.open(&sample_asset(8)));
        assert_eq!(
            err,
            SessionError::InvalidTransition {
                from: EditState::Editing,
                action: "open an edit",
            }
        );
    }

    #[test]
    fn invalid_form_returns_to_editing_with_errors() {
        let mut session = editing(7);
        if let Ok(form) = session.form_mut() {
            form.name.clear();
        }
        let before = session.form().clone();

        let err = assert_err!(session.begin_submit());
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(session.state(), EditState::Editing);
        assert_eq!(session.field_errors().get("name"), Some("is required"));
        assert_eq!(session.form(), &before);
    }

    #[test]
    fn valid_form_moves_to_submitting() {
        let mut session = editing(7);
        if let Ok(form) = session.form_mut() {
            form.condition = "poor".to_string();
        }
        let pending = assert_ok!(session.begin_submit());
        assert_eq!(session.state(), EditState::Submitting);
        assert_eq!(pending.asset_id.get(), 7);
        assert_ne!(pending.baseline, pending.attributes);
        assert!(session.form_mut().is_err());
    }

    #[test]
    fn failure_keeps_form_values_byte_identical() {
        let mut session = editing(7);
        if let Ok(form) = session.form_mut() {
            form.condition = "poor".to_string();
            form.notes = "  leaning left  ".to_string();
        }
        let before = session.form().clone();
        let _ = assert_ok!(session.begin_submit());

        for error in [
            ClientError::Network("timeout".to_string()),
            ClientError::from_status(500, "boom".to_string()),
            ClientError::from_status(409, "stale".to_string()),
        ] {
            assert_ok!(session.complete_failure(error.clone()));
            assert_eq!(session.state(), EditState::Editing);
            assert_eq!(session.form(), &before);
            assert_eq!(session.last_error(), Some(&error));
            let _ = assert_ok!(session.begin_submit());
        }
    }

    #[test]
    fn success_resets_to_idle() {
        let mut session = editing(7);
        let _ = assert_ok!(session.begin_submit());
        assert_ok!(session.complete_success());
        assert_eq!(session.state(), EditState::Idle);
        assert!(session.baseline().is_none());
        assert_ok!(session.open(&sample_asset(7)));
    }

    #[test]
    fn rebase_replaces_baseline_but_keeps_form() {
        let mut session = editing(7);
        if let Ok(form) = session.form_mut() {
            form.condition = "poor".to_string();
        }
        let mut latest = sample_asset(7);
        latest.version = 4;
        assert_ok!(session.rebase(&latest));
        assert_eq!(session.baseline().map(|a| a.version), Some(4));
        assert_eq!(session.form().condition, "poor");

        let err = assert_err!(session.rebase(&sample_asset(8)));
        assert!(matches!(err, SessionError::AssetMismatch { .. }));
    }

    #[test]
    fn cancel_only_from_editing() {
        let mut session = EditSession::new();
        assert!(session.cancel().is_err());
        assert_ok!(session.open(&sample_asset(1)));
        assert_ok!(session.cancel());
        assert_eq!(session.state(), EditState::Idle);
    }
}
