//! Loading placeholders: spinner overlay, inline spinner, skeleton lines.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Skeleton shapes, mirroring the block they stand in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkeletonKind {
    Text,
    Title,
    Card,
}

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}

/// Spinner glyph to put in front of a label, e.g. "Submitting...".
pub fn inline_spinner(tick: usize) -> Span<'static> {
    Span::styled(format!("{} ", spinner_frame(tick)), Style::new().light_red())
}

/// Full-area overlay with a centered spinner.
pub fn overlay(frame: &mut Frame, area: Rect, tick: usize) {
    let [row] = Layout::vertical([Constraint::Length(3)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(16)])
        .flex(Flex::Center)
        .areas(row);
    frame.render_widget(Clear, cell);
    frame.render_widget(
        Paragraph::new(Line::from(vec![inline_spinner(tick), "Loading".into()]))
            .centered()
            .block(Block::bordered()),
        cell,
    );
}

/// `count` placeholders of `kind`.
pub fn skeleton(kind: SkeletonKind, count: usize) -> Vec<Line<'static>> {
    let bar = |width: usize| Line::from("░".repeat(width)).dark_gray();
    let mut lines = Vec::new();
    for i in 0..count {
        match kind {
            // Stagger widths so a block of text lines looks like a paragraph.
            SkeletonKind::Text => lines.push(bar(if i % 3 == 2 { 28 } else { 40 })),
            SkeletonKind::Title => lines.push(Line::from("▓".repeat(22)).dark_gray()),
            SkeletonKind::Card => {
                lines.push(Line::from("▓".repeat(22)).dark_gray());
                lines.push(bar(40));
                lines.push(bar(34));
                lines.push(Line::default());
            }
        }
    }
    lines
}
