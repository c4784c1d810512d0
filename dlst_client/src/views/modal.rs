//! Modal overlay and the three forms drawn inside it.
//!
//! `focus` is an index into the form's input order (`AuthMode::fields`,
//! [`join_inputs`], [`REPORT_FIELDS`]).

use super::loading::inline_spinner;
use dlst::entities::Team;
use dlst::forms::{
    AuthField, AuthForm, FormMessage, JoinField, JoinFlow, ReportField, ReportForm, Submission,
};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Clear, Padding, Paragraph, Wrap},
};

pub const REPORT_FIELDS: [ReportField; 2] = [ReportField::ReporterName, ReportField::Description];

/// One focusable input of the join modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinInput {
    /// Team picker, driven with ←/→
    Team,
    Field(JoinField),
}

pub fn join_inputs(flow: &JoinFlow) -> &'static [JoinInput] {
    if flow.is_creating_team() {
        &[
            JoinInput::Field(JoinField::NewTeamName),
            JoinInput::Field(JoinField::NewTeamPasscode),
        ]
    } else {
        &[JoinInput::Team, JoinInput::Field(JoinField::Passcode)]
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

fn message_line(message: Option<&FormMessage>) -> Option<Line<'_>> {
    message.map(|m| {
        let line = Line::from(m.text.as_str());
        if m.is_error() {
            line.light_red()
        } else {
            line.light_green()
        }
    })
}

fn input<'a>(
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    masked: bool,
    focused: bool,
) -> [Line<'a>; 2] {
    let marker = if focused { "› ".light_red() } else { "  ".into() };
    let value = if value.is_empty() {
        Span::from(placeholder).dark_gray()
    } else if masked {
        Span::raw("•".repeat(value.chars().count()))
    } else {
        Span::raw(value)
    };
    let label = if focused {
        Span::from(label).bold()
    } else {
        Span::from(label)
    };
    [Line::from(label), Line::from(vec![marker, value])]
}

fn footer(submission: Submission, tick: usize, extra: Option<Line<'static>>) -> Vec<Line<'static>> {
    match submission {
        Submission::InFlight => vec![Line::from(vec![
            inline_spinner(tick),
            "Submitting...".into(),
        ])],
        Submission::Done => Vec::new(),
        Submission::Idle => {
            let mut lines: Vec<Line> = extra.into_iter().collect();
            lines.push(Line::from(vec![
                "Enter".bold().white(),
                " submit   ".into(),
                "Tab".bold().white(),
                " next field   ".into(),
                "Esc".bold().white(),
                " cancel".into(),
            ]));
            lines
        }
    }
}

/// Clear a centered box and draw `title`, the inline message, and `body`.
pub fn draw_frame(frame: &mut Frame, title: &str, message: Option<&FormMessage>, body: Vec<Line>) {
    let mut lines: Vec<Line> = message_line(message).into_iter().collect();
    if !lines.is_empty() {
        lines.push(Line::default());
    }
    lines.extend(body);

    let area = centered(frame.area(), 64, lines.len() as u16 + 4);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::bordered()
                .padding(Padding::horizontal(1))
                .title(Line::from(format!(" {title} ")).bold())
                .title_bottom(Line::from(" × Esc ").right_aligned())
                .border_style(Style::new().light_red()),
        ),
        area,
    );
}

pub fn draw_auth(frame: &mut Frame, form: &AuthForm, focus: usize, tick: usize) {
    let mut body = Vec::new();
    for (idx, field) in form.mode().fields().iter().enumerate() {
        let (label, placeholder, masked) = match field {
            AuthField::Username => ("Username", "Enter your username", false),
            AuthField::PhoneNumber => ("Phone Number", "+1234567890", false),
            AuthField::Password => ("Password", "Enter your password", true),
        };
        body.extend(input(label, form.field(*field), placeholder, masked, idx == focus));
    }
    body.push(Line::default());
    let switch = match form.mode() {
        dlst::forms::AuthMode::Login => " switch to Register",
        dlst::forms::AuthMode::Register => " switch to Login",
    };
    body.extend(footer(
        form.submission(),
        tick,
        Some(Line::from(vec!["Ctrl+L".bold().white(), switch.into()])),
    ));
    draw_frame(frame, form.title(), form.message(), body);
}

pub fn draw_join(frame: &mut Frame, flow: &JoinFlow, teams: &[Team], focus: usize, tick: usize) {
    let mut body = Vec::new();
    let mut extra = None;
    for (idx, input_kind) in join_inputs(flow).iter().enumerate() {
        let focused = idx == focus;
        match input_kind {
            JoinInput::Team => {
                let team = flow
                    .selected_team()
                    .and_then(|id| teams.iter().find(|t| t.id == id));
                let value = match team {
                    Some(team) => format!("‹ {} ›", team.name),
                    None => "‹ Select a team ›".to_string(),
                };
                let label = if focused {
                    Span::from("Select Team").bold()
                } else {
                    Span::from("Select Team")
                };
                let marker = if focused { "› ".light_red() } else { "  ".into() };
                body.push(Line::from(label));
                body.push(Line::from(vec![marker, value.into()]));
            }
            JoinInput::Field(field) => {
                let (label, placeholder) = match field {
                    JoinField::Passcode => ("Team Passcode", "Enter team passcode"),
                    JoinField::NewTeamName => ("Team Name", "Enter team name"),
                    JoinField::NewTeamPasscode => ("Team Passcode", "Create a team passcode"),
                };
                let value = match (field, flow.mode()) {
                    (JoinField::Passcode, _) => flow.passcode(),
                    (JoinField::NewTeamName, dlst::forms::JoinMode::CreateTeam { name, .. }) => {
                        name.as_str()
                    }
                    (
                        JoinField::NewTeamPasscode,
                        dlst::forms::JoinMode::CreateTeam { passcode, .. },
                    ) => passcode.as_str(),
                    _ => "",
                };
                let masked = *field != JoinField::NewTeamName;
                body.extend(input(label, value, placeholder, masked, focused));
            }
        }
    }
    body.push(Line::default());
    if flow.is_creating_team() {
        extra = Some(Line::from(vec![
            "Enter".bold().white(),
            " create team   ".into(),
            "Ctrl+B".bold().white(),
            " back to team selection".into(),
        ]));
    } else if flow.submission().is_editable() {
        extra = Some(Line::from(vec![
            "Ctrl+T".bold().white(),
            " Create New Team".into(),
        ]));
    }
    body.extend(footer(flow.submission(), tick, extra));
    draw_frame(frame, &flow.title(), flow.message(), body);
}

pub fn draw_report(frame: &mut Frame, form: &ReportForm, focus: usize, tick: usize) {
    let mut body = Vec::new();
    for (idx, field) in REPORT_FIELDS.iter().enumerate() {
        let (label, placeholder) = match field {
            ReportField::ReporterName => {
                ("Your Name (Optional)", "Leave blank to report anonymously")
            }
            ReportField::Description => ("Description *", form.kind().placeholder()),
        };
        body.extend(input(label, form.field(*field), placeholder, false, idx == focus));
    }
    body.push(Line::default());
    body.extend(footer(form.submission(), tick, None));
    draw_frame(frame, form.title(), form.message(), body);
}

#[cfg(test)]
mod tests {
    use super::super::test_support::render;
    use super::*;
    use dlst::entities::ReportKind;
    use dlst::forms::AuthMode;

    #[test]
    fn test_auth_modal_masks_password() {
        let mut form = AuthForm::new(AuthMode::Login);
        form.field_mut(AuthField::Username)
            .unwrap()
            .push_str("ada");
        form.field_mut(AuthField::Password)
            .unwrap()
            .push_str("hunter2");
        let text = render(80, 20, |frame| draw_auth(frame, &form, 0, 0));
        assert!(text.contains("Login"));
        assert!(text.contains("ada"));
        assert!(!text.contains("hunter2"));
        assert!(!text.contains("Phone Number"));
    }

    #[test]
    fn test_report_modal_placeholder_per_kind() {
        let form = ReportForm::new(ReportKind::Rule);
        let text = render(80, 20, |frame| draw_report(frame, &form, 1, 0));
        assert!(text.contains("Suggest a Rule"));
        assert!(text.contains("Leave blank to report anonymously"));
    }

    #[test]
    fn test_join_inputs_follow_mode() {
        let mut flow = JoinFlow::new(None);
        assert_eq!(join_inputs(&flow)[0], JoinInput::Team);
        flow.start_team_creation();
        assert_eq!(
            join_inputs(&flow),
            &[
                JoinInput::Field(JoinField::NewTeamName),
                JoinInput::Field(JoinField::NewTeamPasscode)
            ]
        );
    }

    #[test]
    fn test_join_modal_shows_message() {
        let mut flow = JoinFlow::new(None);
        // No tournament: validation fails and sets the inline message.
        flow.select_team(Some(1));
        let _ = flow.prepare_join();
        let text = render(80, 20, |frame| draw_join(frame, &flow, &[], 0, 0));
        assert!(text.contains("Join Tournament"));
        assert!(text.contains("Please select a tournament"));
    }
}
