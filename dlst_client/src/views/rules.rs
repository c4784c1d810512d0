use super::section;
use dlst::entities::ReportKind;
use dlst::pages::rules::{RULE_SECTIONS, RULES_FOOTER, RULES_LEAD, RULES_TITLE};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Stylize,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

/// Key that opens the report modal of each kind.
pub fn report_key(kind: ReportKind) -> char {
    match kind {
        ReportKind::Player => 'p',
        ReportKind::Rule => 'u',
        ReportKind::Bug => 'g',
    }
}

pub fn document() -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(RULES_TITLE.bold().light_red()),
        Line::default(),
        Line::from(RULES_LEAD.italic()),
    ];
    for section in RULE_SECTIONS {
        lines.push(Line::default());
        lines.push(Line::from(section.heading.bold()));
        for (idx, rule) in section.rules.iter().enumerate() {
            lines.push(Line::from(format!("  {}. {}", idx + 1, rule)));
        }
    }
    lines.push(Line::default());
    lines.push(Line::from(RULES_FOOTER.dark_gray()));
    lines
}

/// `scroll` is the number of wrapped rows skipped at the top.
pub fn draw(frame: &mut Frame, area: Rect, scroll: u16) {
    let [actions_area, doc_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);

    let mut actions: Vec<Span> = Vec::new();
    for kind in ReportKind::ALL {
        actions.push(Span::from(report_key(kind).to_string()).bold().white());
        actions.push(format!(" {}   ", kind.action_label()).into());
    }
    frame.render_widget(Paragraph::new(Line::from(actions)), actions_area);

    frame.render_widget(
        Paragraph::new(document())
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .block(section("Rules")),
        doc_area,
    );
}
