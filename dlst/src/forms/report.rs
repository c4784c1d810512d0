//! Player, rule, and bug reports.

use super::{FormError, FormMessage, Submission, Ticket};
use crate::api::ApiResult;
use crate::entities::{MessageResponse, Report, ReportKind};

const REPORT_FAILED: &str = "Failed to submit report. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportField {
    ReporterName,
    Description,
}

#[derive(Debug, Clone)]
pub struct ReportForm {
    ticket: Ticket,
    kind: ReportKind,
    reporter_name: String,
    description: String,
    submission: Submission,
    message: Option<FormMessage>,
}

impl ReportForm {
    pub fn new(kind: ReportKind) -> Self {
        Self {
            ticket: Ticket::next(),
            kind,
            reporter_name: String::new(),
            description: String::new(),
            submission: Submission::default(),
            message: None,
        }
    }

    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    pub fn submission(&self) -> Submission {
        self.submission
    }

    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    pub fn field(&self, field: ReportField) -> &str {
        match field {
            ReportField::ReporterName => &self.reporter_name,
            ReportField::Description => &self.description,
        }
    }

    pub fn field_mut(&mut self, field: ReportField) -> Option<&mut String> {
        if !self.submission.is_editable() {
            return None;
        }
        Some(match field {
            ReportField::ReporterName => &mut self.reporter_name,
            ReportField::Description => &mut self.description,
        })
    }

    pub fn prepare(&mut self) -> Result<Report, FormError> {
        if !self.submission.is_editable() {
            return Err(FormError::Busy);
        }
        if self.description.trim().is_empty() {
            let text = "Please enter a description";
            self.message = Some(FormMessage::error(text));
            return Err(FormError::Validation(text.to_string()));
        }

        self.submission.begin()?;
        self.message = None;
        Ok(Report::new(
            self.kind,
            self.description.trim().to_string(),
            &self.reporter_name,
        ))
    }

    /// Apply the outcome; `true` means schedule the dismissal.
    pub fn complete(&mut self, result: ApiResult<MessageResponse>) -> bool {
        match result {
            Ok(response) => {
                self.message = Some(FormMessage::success(response.message));
                self.reporter_name.clear();
                self.description.clear();
                self.submission = Submission::Done;
                true
            }
            Err(err) => {
                log::warn!("{} report failed: {err}", self.kind);
                self.message = Some(FormMessage::error(err.user_message_or(REPORT_FAILED)));
                self.submission = Submission::Idle;
                false
            }
        }
    }
}
