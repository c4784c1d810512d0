//! App-wide UI state shared by every page.

use crate::entities::User;
use serde_json::{Map, Value};
use std::fmt;

/// Top-level pages. Exactly one is mounted at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Announcements,
    Tournaments,
    Standings,
    Rules,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::Announcements,
        Page::Tournaments,
        Page::Standings,
        Page::Rules,
    ];

    /// Navigation tab label
    pub fn label(self) -> &'static str {
        match self {
            Self::Announcements => "Home",
            Self::Tournaments => "Tournaments",
            Self::Standings => "Standings",
            Self::Rules => "Rules",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Announcements => 0,
            Self::Tournaments => 1,
            Self::Standings => 2,
            Self::Rules => 3,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Page bound to a number key, counting from 1.
    pub fn from_digit(digit: char) -> Option<Self> {
        let idx = digit.to_digit(10)? as usize;
        idx.checked_sub(1).and_then(|i| Self::ALL.get(i)).copied()
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current user, free-form app data, and the selected page.
///
/// Each setter replaces its field wholesale and bumps [`AppState::revision`],
/// which consumers compare against the revision they last rendered.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    user: Option<User>,
    app_data: Map<String, Value>,
    current_page: Page,
    revision: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
        self.touch();
    }

    pub fn app_data(&self) -> &Map<String, Value> {
        &self.app_data
    }

    pub fn set_app_data(&mut self, app_data: Map<String, Value>) {
        self.app_data = app_data;
        self.touch();
    }

    pub fn current_page(&self) -> Page {
        self.current_page
    }

    pub fn set_current_page(&mut self, page: Page) {
        if self.current_page != page {
            log::debug!("page change: {} -> {}", self.current_page, page);
        }
        self.current_page = page;
        self.touch();
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_initial_state() {
        let state = AppState::new();
        assert!(state.user().is_none());
        assert!(state.app_data().is_empty());
        assert_eq!(state.current_page(), Page::Announcements);
    }

    #[test]
    fn test_setters_replace_and_bump_revision() {
        let mut state = AppState::new();
        let r0 = state.revision();

        state.set_current_page(Page::Tournaments);
        assert_eq!(state.current_page(), Page::Tournaments);
        assert!(state.revision() > r0);

        let mut data = Map::new();
        data.insert("theme".to_string(), json!("dark"));
        state.set_app_data(data);
        let mut data = Map::new();
        data.insert("lang".to_string(), json!("en"));
        state.set_app_data(data);
        assert_eq!(state.app_data().len(), 1);
        assert_eq!(state.app_data()["lang"], json!("en"));

        state.set_user(Some(User {
            id: Some(3),
            username: "ada".to_string(),
        }));
        assert_eq!(state.user().map(|u| u.username.as_str()), Some("ada"));
        state.set_user(None);
        assert!(state.user().is_none());
    }

    #[test]
    fn test_page_cycle() {
        assert_eq!(Page::Announcements.next(), Page::Tournaments);
        assert_eq!(Page::Rules.next(), Page::Announcements);
        assert_eq!(Page::Announcements.prev(), Page::Rules);
        for page in Page::ALL {
            assert_eq!(page.next().prev(), page);
        }
    }

    #[test]
    fn test_page_from_digit() {
        assert_eq!(Page::from_digit('1'), Some(Page::Announcements));
        assert_eq!(Page::from_digit('4'), Some(Page::Rules));
        assert_eq!(Page::from_digit('0'), None);
        assert_eq!(Page::from_digit('5'), None);
        assert_eq!(Page::from_digit('x'), None);
    }
}
