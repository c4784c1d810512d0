//! Rendering. Every function here reads controller state and draws it;
//! nothing in this module mutates a controller.

pub mod announcements;
pub mod header;
pub mod loading;
pub mod modal;
pub mod rules;
pub mod standings;
pub mod tournaments;

use ratatui::{
    style::Stylize,
    text::Line,
    widgets::{Block, Padding},
};

/// Bordered block with the padding every page section uses.
fn section(title: &str) -> Block<'_> {
    Block::bordered()
        .padding(Padding::horizontal(1))
        .title(Line::from(format!(" {title}  ")).bold())
}

/// Placeholder line for an empty or failed load.
fn empty_line(text: &str) -> Line<'_> {
    Line::from(text).italic().dark_gray()
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::{Frame, Terminal, backend::TestBackend};

    /// Draw once into an off-screen buffer and return its text, one line per
    /// row.
    pub fn render(width: u16, height: u16, draw: impl FnOnce(&mut Frame)) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(draw).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }
}
