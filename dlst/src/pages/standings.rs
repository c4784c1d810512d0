//! Global standings table.

use super::{Container, PageContext, PageEvent};
use crate::api::ApiClient;
use crate::entities::Standing;
use crate::load::LoadState;
use crate::state::AppState;
use crate::tasks::{Envelope, TaskScope};

pub struct StandingsPage {
    api: ApiClient,
    scope: TaskScope<PageEvent>,
    standings: LoadState<Vec<Standing>>,
}

impl StandingsPage {
    pub fn new(ctx: &PageContext) -> Self {
        Self {
            api: ctx.api.clone(),
            scope: ctx.scope(),
            standings: LoadState::Idle,
        }
    }

    pub fn standings(&self) -> &LoadState<Vec<Standing>> {
        &self.standings
    }
}

impl Container for StandingsPage {
    fn mount(&mut self) {
        self.standings.begin();
        let api = self.api.clone();
        self.scope
            .spawn(async move { PageEvent::Standings(api.standings().await) });
    }

    fn owns(&self, envelope: &Envelope<PageEvent>) -> bool {
        self.scope.owns(envelope)
    }

    fn handle(&mut self, event: PageEvent, _state: &mut AppState) {
        if let PageEvent::Standings(result) = event {
            if let Err(err) = &result {
                log::error!("Error fetching standings: {err}");
            }
            self.standings.settle(result);
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
    async fn test_standings_load() {
        let (ctx, mut rx, mock) = context();
        mock.reply(
            Method::Get,
            &url("standings"),
            200,
            json!([
                {"rank": 1, "team_id": 3, "team_name": "Lions", "points": 40, "wins": 4, "played": 5},
                {"rank": 2, "team_id": 8, "team_name": "Eagles", "points": 39, "wins": 3, "played": 5}
            ]),
        );
        let mut state = AppState::new();
        let mut page = StandingsPage::new(&ctx);
        page.mount();
        assert!(page.standings().is_loading());

        assert!(deliver(&mut rx, &mut page, &mut state).await);
        let rows = page.standings().data().unwrap();
        assert_eq!(rows[0].team_name, "Lions");
        assert_eq!(rows[1].rank, 2);
    }

    #[tokio::test]
    async fn test_server_error_degrades() {
        let (ctx, mut rx, mock) = context();
        mock.reply(Method::Get, &url("standings"), 500, json!({"error": "boom"}));
        let mut state = AppState::new();
        let mut page = StandingsPage::new(&ctx);
        page.mount();

        assert!(deliver(&mut rx, &mut page, &mut state).await);
        assert!(page.standings().error().unwrap().contains("boom"));
    }
}
