//! Navigation bar and the login / registration modal.
//!
//! The header stays mounted for the whole session, so it routes its own
//! completions independently of whichever page is shown.

use super::{Container, Modal, PageContext, PageEvent};
use crate::api::ApiClient;
use crate::forms::{AuthForm, AuthMode, AuthRequest, FormError};
use crate::state::{AppState, Page};
use crate::tasks::{Envelope, TaskScope};
use std::time::Duration;

pub const LOGO: &str = "DLST";

pub struct Header {
    api: ApiClient,
    dismiss_delay: Duration,
    scope: TaskScope<PageEvent>,
    auth: Option<Modal<AuthForm>>,
}

impl Header {
    pub fn new(ctx: &PageContext) -> Self {
        Self {
            api: ctx.api.clone(),
            dismiss_delay: ctx.dismiss_delay,
            scope: ctx.scope(),
            auth: None,
        }
    }

    /// Navigation tabs, in display order, with the active one flagged.
    pub fn tabs(state: &AppState) -> impl Iterator<Item = (Page, bool)> + '_ {
        Page::ALL
            .into_iter()
            .map(move |page| (page, page == state.current_page()))
    }

    pub fn navigate(&self, state: &mut AppState, page: Page) {
        state.set_current_page(page);
    }

    pub fn auth(&self) -> Option<&AuthForm> {
        self.auth.as_ref().map(Modal::form)
    }

    pub fn auth_mut(&mut self) -> Option<&mut AuthForm> {
        self.auth.as_mut().map(Modal::form_mut)
    }

    pub fn open_auth(&mut self, mode: AuthMode) {
        self.auth = Some(Modal::open(AuthForm::new(mode), self.scope.child()));
    }

    pub fn close_auth(&mut self) {
        self.auth = None;
    }

    pub fn submit_auth(&mut self) -> Result<(), FormError> {
        let Some(modal) = self.auth.as_mut() else {
            return Ok(());
        };
        let request = modal.form_mut().prepare()?;
        let api = self.api.clone();
        modal.spawn(async move {
            let result = match request {
                AuthRequest::Login(req) => api.login(&req).await,
                AuthRequest::Register(req) => api.register(&req).await,
            };
            PageEvent::Authenticated(result)
        });
        Ok(())
    }
}

impl Container for Header {
    fn mount(&mut self) {}

    fn owns(&self, envelope: &Envelope<PageEvent>) -> bool {
        self.scope.owns(envelope) || self.auth.as_ref().is_some_and(|m| m.owns(envelope))
    }

    fn handle(&mut self, event: PageEvent, state: &mut AppState) {
        match event {
            PageEvent::Authenticated(result) => {
                let Some(modal) = self.auth.as_mut() else {
                    return;
                };
                if let Some(user) = modal.form_mut().complete(result) {
                    log::info!("signed in as {}", user.username);
                    state.set_user(Some(user));
                    let ticket = modal.form().ticket();
                    modal.dismiss_after(ticket, self.dismiss_delay);
                }
            }
            PageEvent::Dismiss(ticket) => {
                if self.auth().is_some_and(|a| a.ticket() == ticket) {
                    self.auth = None;
                }
            }
            other => log::debug!("header ignoring {other:?}"),
        }
    }

    fn has_modal(&self) -> bool {
        self.auth.is_some()
    }

    fn close_modal(&mut self) -> bool {
        self.auth.take().is_some()
    }
}
