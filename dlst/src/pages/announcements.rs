//! Landing page: banner plus the announcement feed.

use super::{Container, PageContext, PageEvent};
use crate::api::ApiClient;
use crate::entities::Announcement;
use crate::load::LoadState;
use crate::state::{AppState, Page};
use crate::tasks::{Envelope, TaskScope};

pub const BANNER_TITLE: &str = "DLS Tournaments 2026";
pub const BANNER_TAGLINE: &str = "Join the challenge or support your favorite players!";

pub struct AnnouncementsPage {
    api: ApiClient,
    scope: TaskScope<PageEvent>,
    announcements: LoadState<Vec<Announcement>>,
}

impl AnnouncementsPage {
    pub fn new(ctx: &PageContext) -> Self {
        Self {
            api: ctx.api.clone(),
            scope: ctx.scope(),
            announcements: LoadState::Idle,
        }
    }

    pub fn announcements(&self) -> &LoadState<Vec<Announcement>> {
        &self.announcements
    }

    /// The banner's call to action.
    pub fn start_now(&self, state: &mut AppState) {
        state.set_current_page(Page::Tournaments);
    }
}

impl Container for AnnouncementsPage {
    fn mount(&mut self) {
        self.announcements.begin();
        let api = self.api.clone();
        self.scope
            .spawn(async move { PageEvent::Announcements(api.announcements().await) });
    }

    fn owns(&self, envelope: &Envelope<PageEvent>) -> bool {
        self.scope.owns(envelope)
    }

    fn handle(&mut self, event: PageEvent, _state: &mut AppState) {
        if let PageEvent::Announcements(result) = event {
            if let Err(err) = &result {
                log::error!("Error fetching announcements: {err}");
            }
            self.announcements.settle(result);
        }
    }

    fn has_modal(&self) -> bool {
        false
    }

    fn close_modal(&mut self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::api::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_loading_then_loaded() {
        let (ctx, mut rx, mock) = context();
        mock.reply(
            Method::Get,
            &url("announcements"),
            200,
            json!([{
                "id": 1,
                "title": "Registration open",
                "content": "Sign up before Friday",
                "created_at": "2026-01-02T09:00:00Z",
                "expires_at": null
            }]),
        );
        let mut state = AppState::new();
        let mut page = AnnouncementsPage::new(&ctx);
        assert_eq!(page.announcements(), &LoadState::Idle);

        page.mount();
        assert!(page.announcements().is_loading());

        assert!(deliver(&mut rx, &mut page, &mut state).await);
        let loaded = page.announcements().data().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "Registration open");
    }

    #[tokio::test]
    async fn test_failure_falls_back() {
        let (ctx, mut rx, mock) = context();
        mock.unreachable(Method::Get, &url("announcements"));
        let mut state = AppState::new();
        let mut page = AnnouncementsPage::new(&ctx);
        page.mount();

        assert!(deliver(&mut rx, &mut page, &mut state).await);
        assert!(page.announcements().data().is_none());
        assert!(page.announcements().error().is_some());
    }

    #[tokio::test]
    async fn test_start_now_switches_page() {
        let (ctx, _rx, _mock) = context();
        let page = AnnouncementsPage::new(&ctx);
        let mut state = AppState::new();
        page.start_now(&mut state);
        assert_eq!(state.current_page(), Page::Tournaments);
    }
}
