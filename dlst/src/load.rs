//! Fetch lifecycle for page data.

use crate::api::ApiError;

/// `Idle → Loading → (Loaded | Failed)`.
///
/// Data only exists in `Loaded`, so a view can never observe a partially
/// filled page.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    /// The fetch failed; the view falls back to its "no data" rendering.
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn begin(&mut self) {
        *self = Self::Loading;
    }

    /// Settle a pending fetch. Returns `false`, leaving the state untouched,
    /// if no fetch was pending.
    pub fn settle(&mut self, result: Result<T, ApiError>) -> bool {
        if !self.is_loading() {
            return false;
        }
        *self = match result {
            Ok(data) => Self::Loaded(data),
            Err(err) => Self::Failed(err.to_string()),
        };
        true
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}
