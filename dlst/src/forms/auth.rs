//! Login and registration modal.

use super::{FormError, FormMessage, Submission, Ticket};
use crate::api::ApiResult;
use crate::entities::{AuthResponse, LoginRequest, RegisterRequest, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    Login,
    #[default]
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Username,
    PhoneNumber,
    Password,
}

impl AuthMode {
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register New Player",
        }
    }

    fn failure_fallback(self) -> &'static str {
        match self {
            Self::Login => "Login failed. Please try again.",
            Self::Register => "Registration failed. Please try again.",
        }
    }

    /// Inputs shown in this mode, in tab order.
    pub fn fields(self) -> &'static [AuthField] {
        match self {
            Self::Login => &[AuthField::Username, AuthField::Password],
            Self::Register => &[
                AuthField::Username,
                AuthField::PhoneNumber,
                AuthField::Password,
            ],
        }
    }
}

/// Validated request body for the current mode.
#[derive(Debug, Clone)]
pub enum AuthRequest {
    Login(LoginRequest),
    Register(RegisterRequest),
}

#[derive(Debug, Clone)]
pub struct AuthForm {
    ticket: Ticket,
    mode: AuthMode,
    username: String,
    phone_number: String,
    password: String,
    submission: Submission,
    message: Option<FormMessage>,
}

impl AuthForm {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            ticket: Ticket::next(),
            mode,
            username: String::new(),
            phone_number: String::new(),
            password: String::new(),
            submission: Submission::default(),
            message: None,
        }
    }

    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn title(&self) -> &'static str {
        self.mode.title()
    }

    pub fn submission(&self) -> Submission {
        self.submission
    }

    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    pub fn field(&self, field: AuthField) -> &str {
        match field {
            AuthField::Username => &self.username,
            AuthField::PhoneNumber => &self.phone_number,
            AuthField::Password => &self.password,
        }
    }

    pub fn field_mut(&mut self, field: AuthField) -> Option<&mut String> {
        if !self.submission.is_editable() || !self.mode.fields().contains(&field) {
            return None;
        }
        Some(match field {
            AuthField::Username => &mut self.username,
            AuthField::PhoneNumber => &mut self.phone_number,
            AuthField::Password => &mut self.password,
        })
    }

    /// Switch between login and registration, clearing the message.
    pub fn toggle_mode(&mut self) {
        if !self.submission.is_editable() {
            return;
        }
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.message = None;
    }

    fn reject(&mut self, text: &str) -> FormError {
        self.message = Some(FormMessage::error(text));
        FormError::Validation(text.to_string())
    }

    pub fn prepare(&mut self) -> Result<AuthRequest, FormError> {
        if !self.submission.is_editable() {
            return Err(FormError::Busy);
        }
        if self.username.trim().is_empty() {
            return Err(self.reject("Please enter your username"));
        }
        if self.mode == AuthMode::Register && self.phone_number.trim().is_empty() {
            return Err(self.reject("Please enter your phone number"));
        }
        if self.password.is_empty() {
            return Err(self.reject("Please enter your password"));
        }

        let username = self.username.trim().to_string();
        let request = match self.mode {
            AuthMode::Login => AuthRequest::Login(LoginRequest {
                username,
                password: self.password.clone(),
            }),
            AuthMode::Register => AuthRequest::Register(RegisterRequest {
                username,
                phone_number: self.phone_number.trim().to_string(),
                password: self.password.clone(),
            }),
        };

        self.submission.begin()?;
        self.message = None;
        Ok(request)
    }

    /// Apply the outcome. On success the inputs are cleared and the
    /// authenticated user is returned; the caller stores it and schedules
    /// the dismissal.
    pub fn complete(&mut self, result: ApiResult<AuthResponse>) -> Option<User> {
        match result {
            Ok(response) => {
                let text = response
                    .message
                    .clone()
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "Success!".to_string());
                self.message = Some(FormMessage::success(text));
                self.username.clear();
                self.phone_number.clear();
                self.password.clear();
                self.submission = Submission::Done;
                Some(response.into())
            }
            Err(err) => {
                log::warn!("{} failed: {err}", self.mode.title());
                let text = err.user_message_or(self.mode.failure_fallback());
                self.message = Some(FormMessage::error(text));
                self.submission = Submission::Idle;
                None
            }
        }
    }
}
