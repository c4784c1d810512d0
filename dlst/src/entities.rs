//! Transport types exchanged with the tournament API.
//!
//! Everything here is owned by the server. The client only reads fields and
//! builds request bodies; nothing is cached beyond the controller that
//! fetched it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type TeamId = i64;
pub type TournamentId = i64;

/// Name reported when the reporter leaves their name blank.
pub const ANONYMOUS_REPORTER: &str = "Anonymous";

/// How many embedded teams a tournament card lists before collapsing the
/// rest into a "+N more" marker.
pub const TEAM_PREVIEW_LIMIT: usize = 5;

/// Identity returned by login or registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<AuthResponse> for User {
    fn from(value: AuthResponse) -> Self {
        Self {
            id: value.id,
            username: value.username,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub phone_number: String,
    pub password: String,
}

/// A team as listed by `GET teams` or returned by `POST teams`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub member_count: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Minimal team reference embedded in tournaments and fixtures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: TeamId,
    pub name: String,
}

impl fmt::Display for TeamRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTeam {
    pub name: String,
    pub passcode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub title: String,
    pub entry_fee: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub teams: Vec<TeamRef>,
    pub team_count: u32,
}

impl Tournament {
    /// Splits the embedded teams into the ones shown on a card and the
    /// number of teams hidden behind the "+N more" marker.
    ///
    /// The hidden count is derived from `team_count`, not from the embedded
    /// list, since the server may embed only part of the roster.
    pub fn team_preview(&self) -> (&[TeamRef], Option<u32>) {
        let shown = &self.teams[..self.teams.len().min(TEAM_PREVIEW_LIMIT)];
        let limit = TEAM_PREVIEW_LIMIT as u32;
        let more = (self.team_count > limit).then(|| self.team_count - limit);
        (shown, more)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JoinTournamentRequest {
    pub tournament_id: TournamentId,
    pub team_id: TeamId,
    pub passcode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: i64,
    pub team_a: TeamRef,
    pub team_b: TeamRef,
    pub scheduled_time: DateTime<Utc>,
    pub location: String,
    #[serde(default)]
    pub result: Option<String>,
    pub is_completed: bool,
}

impl Fixture {
    pub fn result_or_dash(&self) -> &str {
        self.result.as_deref().filter(|r| !r.is_empty()).unwrap_or("-")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub team_id: TeamId,
    pub rank: u32,
    pub team_name: String,
    pub played: u32,
    pub wins: u32,
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Report categories accepted by `POST report`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Player,
    Rule,
    Bug,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [ReportKind::Player, ReportKind::Rule, ReportKind::Bug];

    /// Label of the action that opens a report of this kind.
    pub fn action_label(self) -> &'static str {
        match self {
            Self::Player => "Report a player",
            Self::Rule => "Suggest a rule",
            Self::Bug => "Report a bug",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Player => "Report a Player",
            Self::Rule => "Suggest a Rule",
            Self::Bug => "Report a Bug",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Player => "Describe the player behavior and provide details...",
            Self::Rule => {
                "Describe your rule suggestion and how it would improve the tournament..."
            }
            Self::Bug => "Describe the bug and steps to reproduce it...",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Player => "player",
            Self::Rule => "rule",
            Self::Bug => "bug",
        };
        f.write_str(repr)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    #[serde(rename = "type")]
    pub kind: ReportKind,
    pub description: String,
    pub reporter_name: String,
}

impl Report {
    /// Builds a report, substituting [`ANONYMOUS_REPORTER`] for a blank name.
    pub fn new(kind: ReportKind, description: String, reporter_name: &str) -> Self {
        let reporter_name = match reporter_name.trim() {
            "" => ANONYMOUS_REPORTER.to_string(),
            name => name.to_string(),
        };
        Self {
            kind,
            description,
            reporter_name,
        }
    }
}

/// Acknowledgement body returned by join and report submissions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
