//! Tournament listing, detail sub-view, and the join modal.

use super::{Container, Modal, PageContext, PageEvent};
use crate::api::ApiClient;
use crate::entities::{Fixture, Standing, Team, Tournament};
use crate::forms::{FormError, JoinFlow};
use crate::load::LoadState;
use crate::state::AppState;
use crate::tasks::{Envelope, TaskScope};
use std::time::Duration;

/// Fixtures and standings of one tournament.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TournamentDetail {
    pub fixtures: Vec<Fixture>,
    pub standings: Vec<Standing>,
}

/// Replaces the listing while open. Nothing is kept once it closes, so
/// reopening always refetches.
pub struct DetailView {
    tournament: Tournament,
    scope: TaskScope<PageEvent>,
    data: LoadState<TournamentDetail>,
}

impl DetailView {
    fn open(tournament: Tournament, api: ApiClient, mut scope: TaskScope<PageEvent>) -> Self {
        let id = tournament.id;
        scope.spawn(async move {
            let result = tokio::try_join!(api.fixtures(id), api.tournament_standings(id));
            PageEvent::Detail(result)
        });
        Self {
            tournament,
            scope,
            data: LoadState::Loading,
        }
    }

    pub fn tournament(&self) -> &Tournament {
        &self.tournament
    }

    pub fn data(&self) -> &LoadState<TournamentDetail> {
        &self.data
    }
}

pub struct TournamentsPage {
    api: ApiClient,
    dismiss_delay: Duration,
    scope: TaskScope<PageEvent>,
    listing: LoadState<Vec<Tournament>>,
    /// Selectable teams; only ever replaced together with `listing`
    teams: Vec<Team>,
    cursor: usize,
    detail: Option<DetailView>,
    join: Option<Modal<JoinFlow>>,
}

impl TournamentsPage {
    pub fn new(ctx: &PageContext) -> Self {
        Self {
            api: ctx.api.clone(),
            dismiss_delay: ctx.dismiss_delay,
            scope: ctx.scope(),
            listing: LoadState::Idle,
            teams: Vec::new(),
            cursor: 0,
            detail: None,
            join: None,
        }
    }

    /// Fetch tournaments and teams together; the listing settles only when
    /// both have arrived, and fails if either fails.
    pub fn load(&mut self) {
        self.listing.begin();
        let api = self.api.clone();
        self.scope.spawn(async move {
            let result = tokio::try_join!(api.tournaments(), api.teams());
            PageEvent::Listing(result)
        });
    }

    pub fn listing(&self) -> &LoadState<Vec<Tournament>> {
        &self.listing
    }

    pub fn tournaments(&self) -> &[Tournament] {
        self.listing.data().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<&Tournament> {
        self.tournaments().get(self.cursor)
    }

    pub fn move_cursor(&mut self, forward: bool) {
        let len = self.tournaments().len();
        if len == 0 {
            return;
        }
        self.cursor = if forward {
            (self.cursor + 1).min(len - 1)
        } else {
            self.cursor.saturating_sub(1)
        };
    }

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    /// Open the detail view for the tournament under the cursor.
    pub fn view_selected(&mut self) {
        let Some(tournament) = self.selected().cloned() else {
            return;
        };
        log::info!("viewing tournament {}", tournament.id);
        self.detail = Some(DetailView::open(
            tournament,
            self.api.clone(),
            self.scope.child(),
        ));
    }

    /// Back to the listing. Drops the detail and any fetch it still has
    /// outstanding.
    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn join(&self) -> Option<&JoinFlow> {
        self.join.as_ref().map(Modal::form)
    }

    pub fn join_mut(&mut self) -> Option<&mut JoinFlow> {
        self.join.as_mut().map(Modal::form_mut)
    }

    /// Open the join modal for the tournament in the detail view if one is
    /// open, else the one under the cursor. Without either, the modal opens
    /// with no tournament.
    pub fn open_join(&mut self) {
        let target = match &self.detail {
            Some(detail) => Some(detail.tournament()),
            None => self.selected(),
        };
        let flow = JoinFlow::new(target);
        self.join = Some(Modal::open(flow, self.scope.child()));
    }

    pub fn close_join(&mut self) {
        self.join = None;
    }

    /// Move the join modal's team selection through the known teams.
    pub fn cycle_team(&mut self, forward: bool) {
        if let Some(join) = self.join.as_mut() {
            join.form_mut().cycle_team(&self.teams, forward);
        }
    }

    pub fn submit_join(&mut self) -> Result<(), FormError> {
        let Some(join) = self.join.as_mut() else {
            return Ok(());
        };
        let request = join.form_mut().prepare_join()?;
        let api = self.api.clone();
        join.spawn(async move { PageEvent::Joined(api.join_tournament(&request).await) });
        Ok(())
    }

    pub fn submit_new_team(&mut self) -> Result<(), FormError> {
        let Some(join) = self.join.as_mut() else {
            return Ok(());
        };
        let team = join.form_mut().prepare_create_team()?;
        let api = self.api.clone();
        join.spawn(async move { PageEvent::TeamCreated(api.create_team(&team).await) });
        Ok(())
    }
}

impl Container for TournamentsPage {
    fn mount(&mut self) {
        self.load();
    }

    fn owns(&self, envelope: &Envelope<PageEvent>) -> bool {
        self.scope.owns(envelope)
            || self.detail.as_ref().is_some_and(|d| d.scope.owns(envelope))
            || self.join.as_ref().is_some_and(|j| j.owns(envelope))
    }

    fn handle(&mut self, event: PageEvent, _state: &mut AppState) {
        match event {
            PageEvent::Listing(result) => {
                if !self.listing.is_loading() {
                    return;
                }
                match result {
                    Ok((tournaments, teams)) => {
                        self.teams = teams;
                        self.cursor = self.cursor.min(tournaments.len().saturating_sub(1));
                        self.listing.settle(Ok(tournaments));
                    }
                    Err(err) => {
                        log::error!("Error loading data: {err}");
                        self.listing.settle(Err(err));
                    }
                }
            }
            PageEvent::Detail(result) => {
                if let Some(detail) = self.detail.as_mut() {
                    if let Err(err) = &result {
                        log::error!("Error loading tournament details: {err}");
                    }
                    detail
                        .data
                        .settle(result.map(|(fixtures, standings)| TournamentDetail {
                            fixtures,
                            standings,
                        }));
                }
            }
            PageEvent::TeamCreated(result) => {
                if let Some(join) = self.join.as_mut() {
                    join.form_mut().complete_create_team(result, &mut self.teams);
                }
            }
            PageEvent::Joined(result) => {
                if let Some(join) = self.join.as_mut()
                    && join.form_mut().complete_join(result)
                {
                    let ticket = join.form().ticket();
                    join.dismiss_after(ticket, self.dismiss_delay);
                }
            }
            PageEvent::Dismiss(ticket) => {
                if self.join().is_some_and(|j| j.ticket() == ticket) {
                    self.join = None;
                    // Team counts changed.
                    self.load();
                }
            }
            other => log::debug!("tournaments page ignoring {other:?}"),
        }
    }

    fn has_modal(&self) -> bool {
        self.join.is_some()
    }

    fn close_modal(&mut self) -> bool {
        self.join.take().is_some()
    }
}
