//! Joining a tournament, with a nested team-creation sub-mode.

use super::{FormError, FormMessage, Submission, Ticket};
use crate::api::ApiResult;
use crate::entities::{
    JoinTournamentRequest, MessageResponse, NewTeam, Team, TeamId, Tournament, TournamentId,
};

const JOIN_FAILED: &str = "Failed to join tournament";
const CREATE_FAILED: &str = "Failed to create team";
const TEAM_CREATED: &str = "Team created successfully!";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JoinMode {
    #[default]
    SelectTeam,
    /// Replaces team selection until the team is created or the user backs out.
    CreateTeam { name: String, passcode: String },
}

/// Text inputs of the join modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinField {
    Passcode,
    NewTeamName,
    NewTeamPasscode,
}

/// State of one open join modal.
#[derive(Debug, Clone)]
pub struct JoinFlow {
    ticket: Ticket,
    tournament: Option<(TournamentId, String)>,
    selected_team: Option<TeamId>,
    passcode: String,
    mode: JoinMode,
    submission: Submission,
    message: Option<FormMessage>,
}

impl JoinFlow {
    pub fn new(tournament: Option<&Tournament>) -> Self {
        Self {
            ticket: Ticket::next(),
            tournament: tournament.map(|t| (t.id, t.title.clone())),
            selected_team: None,
            passcode: String::new(),
            mode: JoinMode::default(),
            submission: Submission::default(),
            message: None,
        }
    }

    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn title(&self) -> String {
        match &self.tournament {
            Some((_, title)) => format!("Join {title}"),
            None => "Join Tournament".to_string(),
        }
    }

    pub fn tournament_id(&self) -> Option<TournamentId> {
        self.tournament.as_ref().map(|(id, _)| *id)
    }

    pub fn mode(&self) -> &JoinMode {
        &self.mode
    }

    pub fn is_creating_team(&self) -> bool {
        matches!(self.mode, JoinMode::CreateTeam { .. })
    }

    pub fn selected_team(&self) -> Option<TeamId> {
        self.selected_team
    }

    pub fn passcode(&self) -> &str {
        &self.passcode
    }

    pub fn submission(&self) -> Submission {
        self.submission
    }

    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    /// Whether the join control is enabled.
    pub fn can_join(&self) -> bool {
        self.submission.is_editable() && !self.is_creating_team() && self.selected_team.is_some()
    }

    /// Mutable access to an input, or `None` while the form is locked or the
    /// input is not part of the current mode.
    pub fn field_mut(&mut self, field: JoinField) -> Option<&mut String> {
        if !self.submission.is_editable() {
            return None;
        }
        match (&mut self.mode, field) {
            (JoinMode::SelectTeam, JoinField::Passcode) if self.selected_team.is_some() => {
                Some(&mut self.passcode)
            }
            (JoinMode::CreateTeam { name, .. }, JoinField::NewTeamName) => Some(name),
            (JoinMode::CreateTeam { passcode, .. }, JoinField::NewTeamPasscode) => Some(passcode),
            _ => None,
        }
    }

    pub fn select_team(&mut self, team_id: Option<TeamId>) {
        if self.submission.is_editable() && !self.is_creating_team() {
            self.selected_team = team_id;
        }
    }

    /// Move the selection one step through `teams`, wrapping at both ends.
    /// `forward == false` walks backwards.
    pub fn cycle_team(&mut self, teams: &[Team], forward: bool) {
        if teams.is_empty() {
            return;
        }
        let current = self
            .selected_team
            .and_then(|id| teams.iter().position(|t| t.id == id));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => teams.len() - 1,
            (Some(idx), true) => (idx + 1) % teams.len(),
            (Some(idx), false) => (idx + teams.len() - 1) % teams.len(),
        };
        self.select_team(Some(teams[next].id));
    }

    pub fn start_team_creation(&mut self) {
        if self.submission.is_editable() && !self.is_creating_team() {
            self.mode = JoinMode::CreateTeam {
                name: String::new(),
                passcode: String::new(),
            };
            self.message = None;
        }
    }

    pub fn cancel_team_creation(&mut self) {
        if self.submission.is_editable() && self.is_creating_team() {
            self.mode = JoinMode::SelectTeam;
            self.message = None;
        }
    }

    fn reject(&mut self, text: &str) -> FormError {
        self.message = Some(FormMessage::error(text));
        FormError::Validation(text.to_string())
    }

    /// Validate and lock the form for a join request.
    pub fn prepare_join(&mut self) -> Result<JoinTournamentRequest, FormError> {
        if !self.submission.is_editable() {
            return Err(FormError::Busy);
        }
        if self.is_creating_team() {
            return Err(self.reject("Finish creating the team first"));
        }
        let Some(tournament_id) = self.tournament_id() else {
            return Err(self.reject("Please select a tournament"));
        };
        let Some(team_id) = self.selected_team else {
            return Err(self.reject("Please select a team"));
        };

        self.submission.begin()?;
        self.message = None;
        Ok(JoinTournamentRequest {
            tournament_id,
            team_id,
            passcode: self.passcode.clone(),
        })
    }

    /// Apply the join outcome. Returns `true` when the modal should be
    /// dismissed after [`DISMISS_DELAY`](super::DISMISS_DELAY).
    pub fn complete_join(&mut self, result: ApiResult<MessageResponse>) -> bool {
        match result {
            Ok(response) => {
                self.message = Some(FormMessage::success(response.message));
                self.submission = Submission::Done;
                true
            }
            Err(err) => {
                log::warn!("join tournament failed: {err}");
                self.message = Some(FormMessage::error(err.user_message_or(JOIN_FAILED)));
                self.submission = Submission::Idle;
                false
            }
        }
    }

    /// Validate and lock the form for a team-creation request.
    pub fn prepare_create_team(&mut self) -> Result<NewTeam, FormError> {
        if !self.submission.is_editable() {
            return Err(FormError::Busy);
        }
        let (name, passcode) = match &self.mode {
            JoinMode::CreateTeam { name, passcode } => {
                (name.trim().to_string(), passcode.trim().to_string())
            }
            JoinMode::SelectTeam => return Err(self.reject("Not creating a team")),
        };
        if name.is_empty() {
            return Err(self.reject("Please enter a team name"));
        }
        if passcode.is_empty() {
            return Err(self.reject("Please enter a team passcode"));
        }
        let team = NewTeam { name, passcode };

        self.submission.begin()?;
        self.message = None;
        Ok(team)
    }

    /// Apply the team-creation outcome. On success the team is appended to
    /// `teams` (once) and pre-selected, and the form returns to team
    /// selection. On failure `teams` is left untouched.
    pub fn complete_create_team(&mut self, result: ApiResult<Team>, teams: &mut Vec<Team>) {
        self.submission = Submission::Idle;
        match result {
            Ok(team) => {
                let id = team.id;
                if !teams.iter().any(|t| t.id == id) {
                    teams.push(team);
                }
                self.mode = JoinMode::SelectTeam;
                self.selected_team = Some(id);
                self.message = Some(FormMessage::success(TEAM_CREATED));
            }
            Err(err) => {
                log::warn!("team creation failed: {err}");
                self.message = Some(FormMessage::error(err.user_message_or(CREATE_FAILED)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use chrono::NaiveDate;

    fn tournament() -> Tournament {
        Tournament {
            id: 11,
            title: "Spring Cup".to_string(),
            entry_fee: 1000.0,
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            teams: Vec::new(),
            team_count: 0,
        }
    }

    fn team(id: TeamId, name: &str) -> Team {
        Team {
            id,
            name: name.to_string(),
            member_count: 0,
            created_at: None,
        }
    }

    fn server_error(status: u16, message: &str) -> ApiError {
        ApiError::Server {
            status,
            message: Some(message.to_string()),
        }
    }

    #[test]
    fn test_title() {
        assert_eq!(JoinFlow::new(Some(&tournament())).title(), "Join Spring Cup");
        assert_eq!(JoinFlow::new(None).title(), "Join Tournament");
    }

    #[test]
    fn test_join_requires_team() {
        let mut flow = JoinFlow::new(Some(&tournament()));
        assert!(!flow.can_join());
        let err = flow.prepare_join().unwrap_err();
        assert_eq!(err, FormError::Validation("Please select a team".to_string()));
        assert_eq!(flow.message().unwrap().text, "Please select a team");
        assert!(flow.submission().is_editable());
    }

    #[test]
    fn test_join_request_and_busy_guard() {
        let mut flow = JoinFlow::new(Some(&tournament()));
        flow.select_team(Some(4));
        flow.field_mut(JoinField::Passcode).unwrap().push_str("secret");

        let request = flow.prepare_join().unwrap();
        assert_eq!(request.tournament_id, 11);
        assert_eq!(request.team_id, 4);
        assert_eq!(request.passcode, "secret");

        assert_eq!(flow.prepare_join().unwrap_err(), FormError::Busy);
        assert!(flow.field_mut(JoinField::Passcode).is_none());
    }

    #[test]
    fn test_join_success_locks_form() {
        let mut flow = JoinFlow::new(Some(&tournament()));
        flow.select_team(Some(4));
        flow.prepare_join().unwrap();
        let dismiss = flow.complete_join(Ok(MessageResponse {
            message: "Lions successfully joined Spring Cup!".to_string(),
        }));
        assert!(dismiss);
        assert_eq!(
            flow.message(),
            Some(&FormMessage::success("Lions successfully joined Spring Cup!"))
        );
        assert_eq!(flow.submission(), Submission::Done);
        assert_eq!(flow.prepare_join().unwrap_err(), FormError::Busy);
    }

    #[test]
    fn test_join_failure_keeps_fields() {
        let mut flow = JoinFlow::new(Some(&tournament()));
        flow.select_team(Some(4));
        flow.field_mut(JoinField::Passcode).unwrap().push_str("wrong");
        flow.prepare_join().unwrap();

        let dismiss = flow.complete_join(Err(server_error(403, "Invalid team passcode")));
        assert!(!dismiss);
        assert_eq!(flow.message(), Some(&FormMessage::error("Invalid team passcode")));
        assert_eq!(flow.selected_team(), Some(4));
        assert_eq!(flow.passcode(), "wrong");
        assert!(flow.submission().is_editable());
    }

    #[test]
    fn test_join_failure_fallback() {
        let mut flow = JoinFlow::new(Some(&tournament()));
        flow.select_team(Some(4));
        flow.prepare_join().unwrap();
        flow.complete_join(Err(ApiError::transport(std::io::Error::other("down"))));
        assert_eq!(flow.message().unwrap().text, "Failed to join tournament");
    }

    #[test]
    fn test_create_team_validation() {
        let mut flow = JoinFlow::new(Some(&tournament()));
        flow.start_team_creation();
        assert!(flow.is_creating_team());

        let err = flow.prepare_create_team().unwrap_err();
        assert_eq!(err, FormError::Validation("Please enter a team name".to_string()));

        flow.field_mut(JoinField::NewTeamName)
            .unwrap()
            .push_str("Lions");
        let err = flow.prepare_create_team().unwrap_err();
        assert_eq!(
            err,
            FormError::Validation("Please enter a team passcode".to_string())
        );
    }

    #[test]
    fn test_create_team_success_appends_once_and_selects() {
        let mut teams = vec![team(1, "Eagles")];
        let mut flow = JoinFlow::new(Some(&tournament()));
        flow.start_team_creation();
        flow.field_mut(JoinField::NewTeamName).unwrap().push_str("Lions");
        flow.field_mut(JoinField::NewTeamPasscode).unwrap().push_str("roar");

        let new_team = flow.prepare_create_team().unwrap();
        assert_eq!(new_team.name, "Lions");

        flow.complete_create_team(Ok(team(2, "Lions")), &mut teams);
        assert_eq!(teams.iter().filter(|t| t.id == 2).count(), 1);
        assert_eq!(flow.selected_team(), Some(2));
        assert!(!flow.is_creating_team());
        assert_eq!(flow.message().unwrap().text, "Team created successfully!");

        // A duplicate completion never double-lists the team.
        flow.complete_create_team(Ok(team(2, "Lions")), &mut teams);
        assert_eq!(teams.len(), 2);
    }

    #[test]
    fn test_create_team_failure_leaves_list() {
        let mut teams = vec![team(1, "Eagles")];
        let mut flow = JoinFlow::new(Some(&tournament()));
        flow.start_team_creation();
        flow.field_mut(JoinField::NewTeamName).unwrap().push_str("Eagles");
        flow.field_mut(JoinField::NewTeamPasscode).unwrap().push_str("x");
        flow.prepare_create_team().unwrap();

        flow.complete_create_team(Err(server_error(400, "Team name already exists")), &mut teams);
        assert_eq!(teams, vec![team(1, "Eagles")]);
        assert!(flow.is_creating_team());
        assert_eq!(flow.message().unwrap().text, "Team name already exists");
        assert!(flow.submission().is_editable());
    }

    #[test]
    fn test_cancel_team_creation_discards_inputs() {
        let mut flow = JoinFlow::new(Some(&tournament()));
        flow.start_team_creation();
        flow.field_mut(JoinField::NewTeamName).unwrap().push_str("Half");
        flow.cancel_team_creation();
        assert_eq!(flow.mode(), &JoinMode::SelectTeam);
        flow.start_team_creation();
        assert_eq!(
            flow.mode(),
            &JoinMode::CreateTeam {
                name: String::new(),
                passcode: String::new()
            }
        );
    }

    #[test]
    fn test_cycle_team_wraps() {
        let teams = vec![team(1, "A"), team(2, "B"), team(3, "C")];
        let mut flow = JoinFlow::new(Some(&tournament()));
        flow.cycle_team(&teams, true);
        assert_eq!(flow.selected_team(), Some(1));
        flow.cycle_team(&teams, false);
        assert_eq!(flow.selected_team(), Some(3));
        flow.cycle_team(&teams, true);
        assert_eq!(flow.selected_team(), Some(1));
    }

    #[test]
    fn test_join_without_tournament() {
        let mut flow = JoinFlow::new(None);
        flow.select_team(Some(1));
        let err = flow.prepare_join().unwrap_err();
        assert_eq!(
            err,
            FormError::Validation("Please select a tournament".to_string())
        );
    }
}
