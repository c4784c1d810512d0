//! Modal form state machines.
//!
//! Every form shares one contract: client-side validation runs before any
//! request, at most one submission is outstanding, the outcome is shown as
//! an inline [`FormMessage`], and a successful submit schedules the modal to
//! close after [`DISMISS_DELAY`]. Closing a modal means dropping its form, so
//! inputs and messages are reset by construction.

pub mod auth;
pub mod join;
pub mod report;

pub use auth::{AuthField, AuthForm, AuthMode, AuthRequest};
pub use join::{JoinField, JoinFlow, JoinMode};
pub use report::{ReportField, ReportForm};

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;

/// How long a success message stays up before the modal closes itself.
pub const DISMISS_DELAY: Duration = Duration::from_secs(2);

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Identifies one opened modal form. A scheduled dismissal only applies to
/// the form whose ticket it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub(crate) fn next() -> Self {
        Self(NEXT_TICKET.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// Inline status line shown above a form's inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl FormMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}

/// Submit guard shared by all forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Submission {
    #[default]
    Idle,
    InFlight,
    /// Succeeded; stays locked until the modal closes.
    Done,
}

impl Submission {
    /// Whether inputs and the submit control accept interaction.
    pub fn is_editable(self) -> bool {
        self == Self::Idle
    }

    fn begin(&mut self) -> Result<(), FormError> {
        if *self != Self::Idle {
            return Err(FormError::Busy);
        }
        *self = Self::InFlight;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A required input is missing; no request was sent
    #[error("{0}")]
    Validation(String),

    /// A submission is already in flight or has completed
    #[error("Submission already in progress")]
    Busy,
}
