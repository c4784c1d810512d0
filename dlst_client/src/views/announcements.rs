use super::loading::{SkeletonKind, skeleton};
use super::{empty_line, section};
use dlst::LoadState;
use dlst::pages::AnnouncementsPage;
use dlst::pages::announcements::{BANNER_TAGLINE, BANNER_TITLE};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Stylize,
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
};

pub fn draw(frame: &mut Frame, area: Rect, page: &AnnouncementsPage) {
    let [banner_area, feed_area] =
        Layout::vertical([Constraint::Length(6), Constraint::Fill(1)]).areas(area);

    let banner = Paragraph::new(vec![
        Line::from(BANNER_TITLE.bold().light_red()),
        Line::from(BANNER_TAGLINE),
        Line::default(),
        Line::from(vec!["s".bold().white(), " Start now!".into()]),
    ])
    .centered()
    .block(Block::bordered());
    frame.render_widget(banner, banner_area);

    let lines = match page.announcements() {
        LoadState::Idle | LoadState::Loading => {
            let mut lines = Vec::new();
            for _ in 0..3 {
                lines.extend(skeleton(SkeletonKind::Title, 1));
                lines.extend(skeleton(SkeletonKind::Text, 3));
                lines.push(Line::default());
            }
            lines
        }
        LoadState::Loaded(items) if !items.is_empty() => items
            .iter()
            .flat_map(|a| {
                [
                    Line::from(Span::from(a.title.clone()).bold()),
                    Line::from(a.content.clone()),
                    Line::from(a.created_at.format("%Y-%m-%d").to_string()).dark_gray(),
                    Line::default(),
                ]
            })
            .collect(),
        LoadState::Loaded(_) | LoadState::Failed(_) => {
            vec![empty_line("No announcements available at this time.")]
        }
    };

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(section("Announcements")),
        feed_area,
    );
}
