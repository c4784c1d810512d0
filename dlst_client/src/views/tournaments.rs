use super::loading::{SkeletonKind, skeleton};
use super::{empty_line, section, standings};
use dlst::LoadState;
use dlst::entities::{Fixture, Tournament};
use dlst::pages::{DetailView, TournamentsPage};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span, Text},
    widgets::{List, ListItem, ListState, Paragraph, Row, Table},
};

pub fn draw(frame: &mut Frame, area: Rect, page: &TournamentsPage) {
    match page.detail() {
        Some(detail) => draw_detail(frame, area, detail),
        None => draw_listing(frame, area, page),
    }
}

fn card(tournament: &Tournament) -> ListItem<'_> {
    let (shown, more) = tournament.team_preview();
    let mut teams: Vec<Span> = Vec::new();
    for team in shown {
        if !teams.is_empty() {
            teams.push(", ".into());
        }
        teams.push(Span::raw(team.name.as_str()));
    }
    if let Some(more) = more {
        teams.push(Span::from(format!("  +{more} more")).dark_gray());
    }

    let lines = vec![
        Line::from(Span::from(tournament.title.as_str()).bold()),
        Line::from(vec![
            Span::from(format!("₦{}", tournament.entry_fee)).light_red().bold(),
            format!(
                "   Start: {}   End: {}",
                tournament.start_date, tournament.end_date
            )
            .into(),
        ]),
        Line::from(format!("Teams ({})", tournament.team_count)).dark_gray(),
        Line::from(teams),
        Line::default(),
    ];
    ListItem::new(Text::from(lines))
}

fn draw_listing(frame: &mut Frame, area: Rect, page: &TournamentsPage) {
    let [list_area, hint_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

    match page.listing() {
        LoadState::Loaded(tournaments) if !tournaments.is_empty() => {
            let list = List::new(tournaments.iter().map(card))
                .block(section("Open Tournaments"))
                .highlight_symbol("▌ ")
                .highlight_style(Style::new().light_yellow());
            let mut state = ListState::default().with_selected(Some(page.cursor()));
            frame.render_stateful_widget(list, list_area, &mut state);
        }
        LoadState::Idle | LoadState::Loading => {
            frame.render_widget(
                Paragraph::new(skeleton(SkeletonKind::Card, 3)).block(section("Open Tournaments")),
                list_area,
            );
        }
        LoadState::Loaded(_) | LoadState::Failed(_) => {
            frame.render_widget(
                Paragraph::new(empty_line("No open tournaments available"))
                    .block(section("Open Tournaments")),
                list_area,
            );
        }
    }

    let hint = Line::from(vec![
        "↑/↓".bold().white(),
        " select  ".into(),
        "Enter".bold().white(),
        " view details  ".into(),
        "j".bold().white(),
        " join tournament".into(),
    ]);
    frame.render_widget(Paragraph::new(hint), hint_area);
}

fn fixture_row(fixture: &Fixture) -> Row<'_> {
    let row = Row::new([
        fixture.team_a.name.clone(),
        "vs".to_string(),
        fixture.team_b.name.clone(),
        fixture.scheduled_time.format("%Y-%m-%d").to_string(),
        fixture.location.clone(),
        fixture.result_or_dash().to_string(),
    ]);
    if fixture.is_completed { row.dark_gray() } else { row }
}

fn draw_detail(frame: &mut Frame, area: Rect, detail: &DetailView) {
    let t = detail.tournament();
    let [info_area, fixtures_area, standings_area, hint_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let info = Paragraph::new(vec![
        Line::from(vec!["Entry Fee: ".bold(), format!("₦{}", t.entry_fee).into()]),
        Line::from(vec![
            "Start: ".bold(),
            t.start_date.to_string().into(),
            "   End: ".bold(),
            t.end_date.to_string().into(),
        ]),
        Line::from(vec!["Teams: ".bold(), t.team_count.to_string().into()]),
    ])
    .block(section(&t.title));
    frame.render_widget(info, info_area);

    match detail.data() {
        LoadState::Loaded(data) => {
            if data.fixtures.is_empty() {
                frame.render_widget(
                    Paragraph::new(empty_line("No fixtures scheduled yet")).block(section("Fixtures")),
                    fixtures_area,
                );
            } else {
                let table = Table::new(
                    data.fixtures.iter().map(fixture_row),
                    [
                        Constraint::Fill(2),
                        Constraint::Length(3),
                        Constraint::Fill(2),
                        Constraint::Length(11),
                        Constraint::Fill(2),
                        Constraint::Fill(1),
                    ],
                )
                .header(Row::new(["Team A", "vs", "Team B", "Date", "Location", "Result"]).bold())
                .block(section("Fixtures"));
                frame.render_widget(table, fixtures_area);
            }

            if data.standings.is_empty() {
                frame.render_widget(
                    Paragraph::new(empty_line("No standings data available"))
                        .block(section("Standings")),
                    standings_area,
                );
            } else {
                frame.render_widget(
                    standings::table(&data.standings, section("Standings")),
                    standings_area,
                );
            }
        }
        LoadState::Idle | LoadState::Loading => {
            frame.render_widget(
                Paragraph::new(skeleton(SkeletonKind::Card, 1)).block(section("Fixtures")),
                fixtures_area,
            );
            frame.render_widget(
                Paragraph::new(skeleton(SkeletonKind::Card, 1)).block(section("Standings")),
                standings_area,
            );
        }
        LoadState::Failed(_) => {
            frame.render_widget(
                Paragraph::new(empty_line("No fixtures scheduled yet")).block(section("Fixtures")),
                fixtures_area,
            );
            frame.render_widget(
                Paragraph::new(empty_line("No standings data available"))
                    .block(section("Standings")),
                standings_area,
            );
        }
    }

    let hint = Line::from(vec!["b".bold().white(), " ← Back to Tournaments".into()]);
    frame.render_widget(Paragraph::new(hint), hint_area);
}
