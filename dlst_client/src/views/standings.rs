use super::loading::{SkeletonKind, overlay, skeleton};
use super::{empty_line, section};
use dlst::LoadState;
use dlst::entities::Standing;
use dlst::pages::StandingsPage;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::Stylize,
    text::{Line, Text},
    widgets::{Block, Cell, Paragraph, Row, Table},
};

const WIDTHS: [Constraint; 5] = [
    Constraint::Length(5),
    Constraint::Fill(3),
    Constraint::Length(7),
    Constraint::Length(5),
    Constraint::Length(7),
];

/// Rank / Team / Played / Wins / Points. Shared with the tournament detail.
pub fn table<'a>(standings: &'a [Standing], block: Block<'a>) -> Table<'a> {
    let header = Row::new(["Rank", "Team", "Played", "Wins", "Points"]).bold();
    let rows = standings.iter().map(|s| {
        Row::new([
            Cell::new(s.rank.to_string()),
            Cell::new(s.team_name.as_str()),
            Cell::new(Text::from(s.played.to_string()).alignment(Alignment::Right)),
            Cell::new(Text::from(s.wins.to_string()).alignment(Alignment::Right)),
            Cell::new(Text::from(s.points.to_string()).alignment(Alignment::Right)).bold(),
        ])
    });
    Table::new(rows, WIDTHS).header(header).block(block)
}

pub fn draw(frame: &mut Frame, area: Rect, page: &StandingsPage, tick: usize) {
    match page.standings() {
        LoadState::Loaded(rows) if !rows.is_empty() => {
            frame.render_widget(table(rows, section("Standings")), area);
        }
        LoadState::Idle | LoadState::Loading => {
            let lines: Vec<Line> = skeleton(SkeletonKind::Text, 5);
            frame.render_widget(Paragraph::new(lines).block(section("Standings")), area);
            overlay(frame, area, tick);
        }
        LoadState::Loaded(_) | LoadState::Failed(_) => {
            frame.render_widget(
                Paragraph::new(empty_line("No standings data available"))
                    .centered()
                    .block(section("Standings")),
                area,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::render;
    use super::*;

    #[test]
    fn test_table_rows() {
        let rows = vec![
            Standing {
                team_id: 3,
                rank: 1,
                team_name: "Lions".to_string(),
                played: 5,
                wins: 4,
                points: 40,
            },
            Standing {
                team_id: 8,
                rank: 2,
                team_name: "Eagles".to_string(),
                played: 5,
                wins: 3,
                points: 39,
            },
        ];
        let text = render(60, 8, |frame| {
            let area = frame.area();
            frame.render_widget(table(&rows, Block::bordered()), area);
        });
        assert!(text.contains("Points"));
        assert!(text.contains("Lions"));
        assert!(text.contains("Eagles"));
        assert!(text.contains("40"));
    }
}
