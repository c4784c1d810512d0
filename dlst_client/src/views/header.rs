use dlst::pages::header::{Header, LOGO};
use dlst::state::AppState;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph, Tabs},
};

/// Logo, one tab per page, and the signed-in user (or the register hint).
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::bordered();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [logo_area, tabs_area, user_area] = Layout::horizontal([
        Constraint::Length(LOGO.len() as u16 + 2),
        Constraint::Fill(1),
        Constraint::Length(28),
    ])
    .areas(inner);

    frame.render_widget(Paragraph::new(LOGO.bold().light_red()), logo_area);

    let mut selected = 0;
    let titles: Vec<Line> = Header::tabs(state)
        .enumerate()
        .map(|(idx, (page, active))| {
            if active {
                selected = idx;
            }
            Line::from(format!("{} {}", idx + 1, page.label()))
        })
        .collect();
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(Style::new().bold().light_red().underlined());
    frame.render_widget(tabs, tabs_area);

    let user = match state.user() {
        Some(user) => Line::from(vec!["● ".green(), Span::raw(user.username.clone())]),
        None => Line::from(vec![
            "r".bold().white(),
            " Register  ".into(),
            "l".bold().white(),
            " Login".into(),
        ]),
    };
    frame.render_widget(Paragraph::new(user).right_aligned(), user_area);
}

#[cfg(test)]
mod tests {
    use super::super::test_support::render;
    use super::*;
    use dlst::entities::User;
    use dlst::state::Page;

    #[test]
    fn test_tabs_and_register_hint() {
        let mut state = AppState::new();
        state.set_current_page(Page::Standings);
        let text = render(100, 3, |frame| {
            let area = frame.area();
            draw(frame, area, &state);
        });
        assert!(text.contains(LOGO));
        assert!(text.contains("1 Home"));
        assert!(text.contains("3 Standings"));
        assert!(text.contains("Register"));
    }

    #[test]
    fn test_signed_in_user() {
        let mut state = AppState::new();
        state.set_user(Some(User {
            id: Some(1),
            username: "ada".to_string(),
        }));
        let text = render(100, 3, |frame| {
            let area = frame.area();
            draw(frame, area, &state);
        });
        assert!(text.contains("ada"));
        assert!(!text.contains("Register"));
    }
}
