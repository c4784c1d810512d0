//! Page controllers.
//!
//! A controller owns the data fetching and local state of one page. It spawns
//! requests into its own [`TaskScope`], and the UI loop routes each completion
//! back to whichever controller [`owns`](Container::owns) it. Controllers know
//! nothing about rendering.

pub mod announcements;
pub mod header;
pub mod rules;
pub mod standings;
pub mod tournaments;

pub use announcements::AnnouncementsPage;
pub use header::Header;
pub use rules::RulesPage;
pub use standings::StandingsPage;
pub use tournaments::{DetailView, TournamentDetail, TournamentsPage};

use crate::api::{ApiClient, ApiResult};
use crate::entities::{
    Announcement, AuthResponse, Fixture, MessageResponse, Standing, Team, Tournament,
};
use crate::forms::{DISMISS_DELAY, Ticket};
use crate::state::{AppState, Page};
use crate::tasks::{Envelope, EventSender, TaskScope};
use enum_dispatch::enum_dispatch;
use std::time::Duration;

/// Completion of a task spawned by a controller.
#[derive(Debug)]
pub enum PageEvent {
    Announcements(ApiResult<Vec<Announcement>>),
    Standings(ApiResult<Vec<Standing>>),
    /// Tournaments and teams, fetched together
    Listing(ApiResult<(Vec<Tournament>, Vec<Team>)>),
    /// Fixtures and standings of the tournament in the detail view
    Detail(ApiResult<(Vec<Fixture>, Vec<Standing>)>),
    TeamCreated(ApiResult<Team>),
    Joined(ApiResult<MessageResponse>),
    Reported(ApiResult<MessageResponse>),
    Authenticated(ApiResult<AuthResponse>),
    /// The success message of the form with this ticket has been up long enough
    Dismiss(Ticket),
}

/// What every controller needs to spawn work.
#[derive(Clone)]
pub struct PageContext {
    pub api: ApiClient,
    pub tx: EventSender<PageEvent>,
    pub dismiss_delay: Duration,
}

impl PageContext {
    pub fn new(api: ApiClient, tx: EventSender<PageEvent>) -> Self {
        Self {
            api,
            tx,
            dismiss_delay: DISMISS_DELAY,
        }
    }

    pub fn with_dismiss_delay(mut self, delay: Duration) -> Self {
        self.dismiss_delay = delay;
        self
    }

    pub fn scope(&self) -> TaskScope<PageEvent> {
        TaskScope::new(self.tx.clone())
    }
}

#[enum_dispatch]
pub trait Container {
    /// Start the initial fetches. Called once, right after construction.
    fn mount(&mut self);

    /// Whether `envelope` came from one of this controller's live scopes.
    fn owns(&self, envelope: &Envelope<PageEvent>) -> bool;

    /// Apply a completion previously accepted by [`Container::owns`].
    fn handle(&mut self, event: PageEvent, state: &mut AppState);

    /// Whether a modal is open and should receive input.
    fn has_modal(&self) -> bool;

    /// Close the open modal, if any. Returns `false` if there was none.
    fn close_modal(&mut self) -> bool;
}

/// The mounted page. Switching pages drops the old variant, and with it
/// every task the old page spawned.
#[enum_dispatch(Container)]
pub enum Content {
    AnnouncementsPage,
    TournamentsPage,
    StandingsPage,
    RulesPage,
}

impl Content {
    /// Construct and mount the controller for `page`.
    pub fn for_page(page: Page, ctx: &PageContext) -> Self {
        let mut content: Content = match page {
            Page::Announcements => AnnouncementsPage::new(ctx).into(),
            Page::Tournaments => TournamentsPage::new(ctx).into(),
            Page::Standings => StandingsPage::new(ctx).into(),
            Page::Rules => RulesPage::new(ctx).into(),
        };
        Container::mount(&mut content);
        content
    }

    pub fn page(&self) -> Page {
        match self {
            Self::AnnouncementsPage(_) => Page::Announcements,
            Self::TournamentsPage(_) => Page::Tournaments,
            Self::StandingsPage(_) => Page::Standings,
            Self::RulesPage(_) => Page::Rules,
        }
    }
}

/// An open modal: its form plus the scope its submissions run in.
///
/// Dropping the modal aborts its in-flight request and pending dismissal.
pub struct Modal<F> {
    form: F,
    scope: TaskScope<PageEvent>,
}

impl<F> Modal<F> {
    pub(crate) fn open(form: F, scope: TaskScope<PageEvent>) -> Self {
        Self { form, scope }
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub(crate) fn owns(&self, envelope: &Envelope<PageEvent>) -> bool {
        self.scope.owns(envelope)
    }

    pub(crate) fn spawn<Fut>(&mut self, future: Fut)
    where
        Fut: std::future::Future<Output = PageEvent> + Send + 'static,
    {
        self.scope.spawn(future);
    }

    pub(crate) fn dismiss_after(&mut self, ticket: Ticket, delay: Duration) {
        self.scope.spawn(async move {
            tokio::time::sleep(delay).await;
            PageEvent::Dismiss(ticket)
        });
    }
}
