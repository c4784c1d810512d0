//! One-shot commands: fetch one view, print it, exit.

use dlst::api::{ApiClient, ApiResult};
use dlst::entities::{Announcement, Fixture, Standing, Team, Tournament, TournamentId};
use dlst::pages::rules::{RULE_SECTIONS, RULES_FOOTER, RULES_LEAD, RULES_TITLE};
use std::fmt::{self, Write};

/// A command given on the command line instead of starting the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Announcements,
    Tournaments,
    Teams,
    /// Global standings, or one tournament's
    Standings(Option<TournamentId>),
    Fixtures(TournamentId),
    Rules,
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Tournament id is not a positive integer.
    InvalidTournamentId(String),
    /// Command requires a tournament id.
    MissingTournamentId(&'static str),
    /// Command got arguments it does not take.
    UnexpectedArgument(String),
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTournamentId(value) => write!(
                f,
                "Invalid tournament id '{}'. Must be a positive number (e.g., 'fixtures 3')",
                value
            ),
            Self::MissingTournamentId(cmd) => {
                write!(f, "'{}' requires a tournament id (e.g., '{} 3')", cmd, cmd)
            }
            Self::UnexpectedArgument(arg) => write!(f, "Unexpected argument '{}'", arg),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Run with --help to see available commands",
                cmd
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a command string into a [`Command`].
///
/// # Examples
///
/// ```
/// use dlst_client::commands::{Command, parse_command};
///
/// assert_eq!(parse_command("tournaments"), Ok(Command::Tournaments));
/// assert_eq!(parse_command("standings 4"), Ok(Command::Standings(Some(4))));
/// assert_eq!(parse_command("fixtures 4"), Ok(Command::Fixtures(4)));
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let parts: Vec<&str> = input.split_ascii_whitespace().collect();
    let Some((&name, args)) = parts.split_first() else {
        return Err(ParseError::UnrecognizedCommand(input.trim().to_string()));
    };

    let command = match name.to_lowercase().as_str() {
        "announcements" | "home" => Command::Announcements,
        "tournaments" => Command::Tournaments,
        "teams" => Command::Teams,
        "rules" => Command::Rules,
        "standings" => {
            return match args {
                [] => Ok(Command::Standings(None)),
                [id] => Ok(Command::Standings(Some(parse_id(id)?))),
                [_, extra, ..] => Err(ParseError::UnexpectedArgument(extra.to_string())),
            };
        }
        "fixtures" => {
            return match args {
                [] => Err(ParseError::MissingTournamentId("fixtures")),
                [id] => Ok(Command::Fixtures(parse_id(id)?)),
                [_, extra, ..] => Err(ParseError::UnexpectedArgument(extra.to_string())),
            };
        }
        _ => return Err(ParseError::UnrecognizedCommand(name.to_string())),
    };

    match args.first() {
        Some(extra) => Err(ParseError::UnexpectedArgument(extra.to_string())),
        None => Ok(command),
    }
}

fn parse_id(value: &str) -> Result<TournamentId, ParseError> {
    value
        .parse::<TournamentId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ParseError::InvalidTournamentId(value.to_string()))
}

/// Run `command` and return what should be printed.
pub async fn execute(api: &ApiClient, command: Command) -> ApiResult<String> {
    let output = match command {
        Command::Announcements => format_announcements(&api.announcements().await?),
        Command::Tournaments => format_tournaments(&api.tournaments().await?),
        Command::Teams => format_teams(&api.teams().await?),
        Command::Standings(None) => format_standings(&api.standings().await?),
        Command::Standings(Some(id)) => format_standings(&api.tournament_standings(id).await?),
        Command::Fixtures(id) => format_fixtures(&api.fixtures(id).await?),
        Command::Rules => format_rules(),
    };
    Ok(output)
}

pub fn format_announcements(announcements: &[Announcement]) -> String {
    if announcements.is_empty() {
        return "No announcements available at this time.\n".to_string();
    }
    let mut out = String::new();
    for a in announcements {
        let _ = writeln!(out, "{}  ({})", a.title, a.created_at.format("%Y-%m-%d"));
        let _ = writeln!(out, "  {}", a.content);
    }
    out
}

pub fn format_tournaments(tournaments: &[Tournament]) -> String {
    if tournaments.is_empty() {
        return "No open tournaments available\n".to_string();
    }
    let mut out = String::new();
    for t in tournaments {
        let _ = writeln!(
            out,
            "#{:<4} {}  ₦{}  {} → {}",
            t.id, t.title, t.entry_fee, t.start_date, t.end_date
        );
        let (shown, more) = t.team_preview();
        let mut teams: Vec<String> = shown.iter().map(ToString::to_string).collect();
        if let Some(more) = more {
            teams.push(format!("+{more} more"));
        }
        let _ = writeln!(out, "      Teams ({}): {}", t.team_count, teams.join(", "));
    }
    out
}

pub fn format_teams(teams: &[Team]) -> String {
    if teams.is_empty() {
        return "No teams yet\n".to_string();
    }
    let mut out = String::new();
    for team in teams {
        let _ = writeln!(
            out,
            "#{:<4} {}  ({} members)",
            team.id, team.name, team.member_count
        );
    }
    out
}

pub fn format_standings(standings: &[Standing]) -> String {
    if standings.is_empty() {
        return "No standings data available\n".to_string();
    }
    let mut out = format!(
        "{:>4}  {:<24} {:>6} {:>5} {:>6}\n",
        "Rank", "Team", "Played", "Wins", "Points"
    );
    for s in standings {
        let _ = writeln!(
            out,
            "{:>4}  {:<24} {:>6} {:>5} {:>6}",
            s.rank, s.team_name, s.played, s.wins, s.points
        );
    }
    out
}

pub fn format_fixtures(fixtures: &[Fixture]) -> String {
    if fixtures.is_empty() {
        return "No fixtures scheduled yet\n".to_string();
    }
    let mut out = String::new();
    for f in fixtures {
        let _ = writeln!(
            out,
            "{} vs {}  {}  {}  {}",
            f.team_a,
            f.team_b,
            f.scheduled_time.format("%Y-%m-%d %H:%M"),
            f.location,
            f.result_or_dash()
        );
    }
    out
}

pub fn format_rules() -> String {
    let mut out = format!("{RULES_TITLE}\n\n{RULES_LEAD}\n");
    for section in RULE_SECTIONS {
        let _ = write!(out, "\n{}\n", section.heading);
        for (idx, rule) in section.rules.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", idx + 1, rule);
        }
    }
    let _ = write!(out, "\n{RULES_FOOTER}\n");
    out
}
