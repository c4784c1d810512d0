//! Integration tests for the tournament client.
//!
//! Runs one-shot commands and drives the TUI with key events against an
//! in-memory transport.

use dlst::ApiClient;
use dlst::api::Method;
use dlst::api::mock::MockTransport;
use dlst::pages::{Container, Content};
use dlst::state::Page;
use dlst_client::commands::{Command, execute};
use dlst_client::tui_app::TuiApp;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

const BASE: &str = "http://api.test";

fn url(endpoint: &str) -> String {
    format!("{BASE}/{endpoint}/")
}

fn client() -> (ApiClient, Arc<MockTransport>) {
    let mock = Arc::new(MockTransport::new());
    (ApiClient::with_transport(BASE, mock.clone()), mock)
}

fn press(app: &mut TuiApp, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut TuiApp, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Route completions until `done` holds, failing after a second.
async fn pump_until(app: &mut TuiApp, done: impl Fn(&TuiApp) -> bool) {
    timeout(Duration::from_secs(1), async {
        while !done(app) {
            assert!(app.next_event().await, "event channel closed");
        }
    })
    .await
    .expect("condition not reached in time");
}

fn tournaments_page(app: &TuiApp) -> Option<&dlst::pages::TournamentsPage> {
    match app.content() {
        Content::TournamentsPage(page) => Some(page),
        _ => None,
    }
}

fn seed_tournaments(mock: &MockTransport) {
    mock.reply(
        Method::Get,
        &url("tournaments"),
        200,
        json!([{
            "id": 1,
            "title": "Spring Cup",
            "entry_fee": 1500.0,
            "start_date": "2026-03-01",
            "end_date": "2026-04-01",
            "teams": [{"id": 7, "name": "Lions"}],
            "team_count": 1
        }]),
    );
    mock.reply(
        Method::Get,
        &url("teams"),
        200,
        json!([{"id": 7, "name": "Lions"}, {"id": 8, "name": "Eagles"}]),
    );
}

// ============================================================================
// One-shot Command Tests
// ============================================================================

#[tokio::test]
async fn test_execute_lists_tournaments() {
    let (api, mock) = client();
    seed_tournaments(&mock);

    let output = execute(&api, Command::Tournaments).await.unwrap();

    assert!(output.contains("Spring Cup"));
    assert!(output.contains("₦1500"));
    assert!(output.contains("Teams (1): Lions"));
}

#[tokio::test]
async fn test_execute_surfaces_server_error() {
    let (api, mock) = client();
    mock.reply(
        Method::Get,
        &url("tournaments/9/fixtures"),
        404,
        json!({"error": "Tournament not found"}),
    );

    let err = execute(&api, Command::Fixtures(9)).await.unwrap_err();

    assert!(err.to_string().contains("Tournament not found"));
}

#[tokio::test]
async fn test_execute_rules_needs_no_network() {
    let (api, mock) = client();

    let output = execute(&api, Command::Rules).await.unwrap();

    assert!(!output.is_empty());
    assert!(mock.requests().is_empty());
}

// ============================================================================
// TUI Navigation Tests
// ============================================================================

#[tokio::test]
async fn test_starts_on_home_and_fetches_announcements() {
    let (api, mock) = client();
    mock.reply(Method::Get, &url("announcements"), 200, json!([]));

    let mut app = TuiApp::new(api, Duration::from_millis(10));
    assert_eq!(app.state().current_page(), Page::Announcements);

    pump_until(&mut app, |app| match app.content() {
        Content::AnnouncementsPage(page) => !page.announcements().is_loading(),
        _ => false,
    })
    .await;
    assert_eq!(mock.count(Method::Get, &url("announcements")), 1);
}

#[tokio::test]
async fn test_number_keys_remount_page() {
    let (api, mock) = client();
    seed_tournaments(&mock);
    let mut app = TuiApp::new(api, Duration::from_millis(10));

    press(&mut app, KeyCode::Char('2'));
    assert_eq!(app.state().current_page(), Page::Tournaments);
    assert_eq!(app.content().page(), Page::Tournaments);

    pump_until(&mut app, |app| {
        tournaments_page(app).is_some_and(|p| p.tournaments().len() == 1)
    })
    .await;

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.content().page(), Page::Standings);
    press(&mut app, KeyCode::BackTab);
    assert_eq!(app.content().page(), Page::Tournaments);
    // A fresh mount fetches again.
    pump_until(&mut app, |app| {
        tournaments_page(app).is_some_and(|p| p.tournaments().len() == 1)
    })
    .await;
    assert_eq!(mock.count(Method::Get, &url("tournaments")), 2);
}

#[tokio::test]
async fn test_start_now_opens_tournaments() {
    let (api, _mock) = client();
    let mut app = TuiApp::new(api, Duration::from_millis(10));

    press(&mut app, KeyCode::Char('s'));

    assert_eq!(app.content().page(), Page::Tournaments);
}

#[tokio::test]
async fn test_key_release_is_ignored() {
    let (api, _mock) = client();
    let mut app = TuiApp::new(api, Duration::from_millis(10));

    app.handle_key(KeyEvent::new_with_kind(
        KeyCode::Char('q'),
        KeyModifiers::NONE,
        KeyEventKind::Release,
    ));

    assert!(!app.should_quit());
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit());
}

// ============================================================================
// TUI Modal Tests
// ============================================================================

#[tokio::test]
async fn test_auth_modal_captures_keys() {
    let (api, _mock) = client();
    let mut app = TuiApp::new(api, Duration::from_millis(10));

    press(&mut app, KeyCode::Char('r'));
    assert!(app.header().has_modal());

    // Typed while the modal is open: edits the form instead of quitting.
    type_text(&mut app, "q2");
    assert!(!app.should_quit());
    assert_eq!(app.state().current_page(), Page::Announcements);
    let form = app.header().auth().unwrap();
    assert_eq!(form.field(dlst::forms::AuthField::Username), "q2");

    press(&mut app, KeyCode::Esc);
    assert!(!app.header().has_modal());
    assert!(!app.should_quit());
}

#[tokio::test]
async fn test_login_sets_user() {
    let (api, mock) = client();
    mock.reply(
        Method::Post,
        &url("login"),
        200,
        json!({"id": 3, "username": "ada", "message": "Login successful"}),
    );
    let mut app = TuiApp::new(api, Duration::from_millis(10));

    press(&mut app, KeyCode::Char('l'));
    type_text(&mut app, "ada");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "secret");
    press(&mut app, KeyCode::Enter);

    pump_until(&mut app, |app| app.state().user().is_some()).await;
    assert_eq!(app.state().user().unwrap().username, "ada");
    pump_until(&mut app, |app| !app.header().has_modal()).await;
}

#[tokio::test]
async fn test_join_tournament_flow() {
    let (api, mock) = client();
    seed_tournaments(&mock);
    mock.reply(
        Method::Post,
        &url("join-tournament"),
        200,
        json!({"message": "Joined Spring Cup"}),
    );
    let mut app = TuiApp::new(api, Duration::from_millis(10));

    press(&mut app, KeyCode::Char('2'));
    pump_until(&mut app, |app| {
        tournaments_page(app).is_some_and(|p| p.tournaments().len() == 1)
    })
    .await;

    press(&mut app, KeyCode::Char('j'));
    assert!(app.content().has_modal());
    // Team picker has focus; → picks the first team.
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus(), 1);
    type_text(&mut app, "1234");
    press(&mut app, KeyCode::Enter);

    pump_until(&mut app, |app| {
        tournaments_page(app)
            .and_then(|p| p.join())
            .and_then(|j| j.message())
            .is_some_and(|m| m.text == "Joined Spring Cup")
    })
    .await;

    let join = mock
        .requests()
        .into_iter()
        .find(|r| r.url == url("join-tournament"))
        .unwrap();
    assert_eq!(
        join.body,
        Some(json!({"tournament_id": 1, "team_id": 7, "passcode": "1234"}))
    );

    // Dismissed after the delay, then the listing reloads.
    pump_until(&mut app, |app| {
        !app.content().has_modal()
            && tournaments_page(app).is_some_and(|p| p.tournaments().len() == 1)
    })
    .await;
    assert_eq!(mock.count(Method::Get, &url("tournaments")), 2);
}

#[tokio::test]
async fn test_escape_closes_detail_before_quitting() {
    let (api, mock) = client();
    seed_tournaments(&mock);
    mock.reply(Method::Get, &url("tournaments/1/fixtures"), 200, json!([]));
    mock.reply(Method::Get, &url("standings/1"), 200, json!([]));
    let mut app = TuiApp::new(api, Duration::from_millis(10));

    press(&mut app, KeyCode::Char('2'));
    pump_until(&mut app, |app| {
        tournaments_page(app).is_some_and(|p| p.tournaments().len() == 1)
    })
    .await;

    press(&mut app, KeyCode::Enter);
    pump_until(&mut app, |app| {
        tournaments_page(app)
            .and_then(|p| p.detail())
            .is_some_and(|d| !d.data().is_loading())
    })
    .await;
    let detail = tournaments_page(&app).unwrap().detail().unwrap();
    assert_eq!(detail.data().error(), None);
    assert_eq!(mock.count(Method::Get, &url("standings/1")), 1);

    press(&mut app, KeyCode::Esc);
    assert!(tournaments_page(&app).unwrap().detail().is_none());
    assert!(!app.should_quit());

    press(&mut app, KeyCode::Esc);
    assert!(app.should_quit());
}

#[tokio::test]
async fn test_report_modal_from_rules_page() {
    let (api, mock) = client();
    mock.reply(
        Method::Post,
        &url("report"),
        200,
        json!({"message": "Report submitted"}),
    );
    let mut app = TuiApp::new(api, Duration::from_millis(10));

    press(&mut app, KeyCode::Char('4'));
    press(&mut app, KeyCode::Char('g'));
    assert!(app.content().has_modal());

    // Name stays blank; description is the second input.
    press(&mut app, KeyCode::Down);
    type_text(&mut app, "crash");
    press(&mut app, KeyCode::Enter);

    pump_until(&mut app, |app| !app.content().has_modal()).await;
    let report = mock
        .requests()
        .into_iter()
        .find(|r| r.url == url("report"))
        .unwrap();
    assert_eq!(
        report.body,
        Some(json!({"type": "bug", "description": "crash", "reporter_name": "Anonymous"}))
    );
}
