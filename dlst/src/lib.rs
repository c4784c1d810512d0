//! # DLST
//!
//! Client core for the DLS tournament platform.
//!
//! This library holds everything a front end needs short of drawing: a typed
//! REST client, the session-wide application state, and one controller per
//! page that fetches its own data and runs its modal forms. Rendering lives
//! in `dlst_client`.
//!
//! ## Core Modules
//!
//! - [`api`]: HTTP wrapper around the tournament REST API
//! - [`state`]: Global store shared by every page (current page, user)
//! - [`pages`]: Page controllers and the modal they own
//! - [`forms`]: Join, report, and auth form state machines
//! - [`tasks`]: Scoped background tasks whose results are dropped after
//!   teardown
//!
//! ## Example
//!
//! ```
//! use dlst::state::{AppState, Page};
//!
//! let mut state = AppState::new();
//! state.set_current_page(Page::Tournaments);
//! assert_eq!(state.current_page(), Page::Tournaments);
//! ```

pub mod api;
pub mod entities;
pub mod forms;
pub mod load;
pub mod pages;
pub mod state;
pub mod tasks;

pub use api::{ApiClient, ApiError, ApiResult, DEFAULT_API_URL};
pub use load::LoadState;
pub use state::{AppState, Page};
