//! Client-held application state: who is logged in, which auth form is shown,
//! and which expense (if any) is being edited.

use crate::{ExpenseId, User};

/// Which auth form the login screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::Signup => "Sign Up",
        }
    }

    pub fn switch_prompt(self) -> &'static str {
        match self {
            AuthMode::Login => "Don't have an account?",
            AuthMode::Signup => "Already have an account?",
        }
    }
}

/// Transitions accepted by [`SessionState::apply`]
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    LoggedIn(User),
    LoggedOut,
    ToggleAuthMode,
    BeginEdit(ExpenseId),
    /// Update succeeded or the form was reset
    EditFinished,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    user: Option<User>,
    auth_mode: AuthMode,
    edit_target: Option<ExpenseId>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.auth_mode
    }

    pub fn edit_target(&self) -> Option<ExpenseId> {
        self.edit_target
    }

    /// Produce the state that follows `event`.
    ///
    /// Editing is only possible while logged in; a `BeginEdit` without a user
    /// leaves the state unchanged.
    pub fn apply(&self, event: SessionEvent) -> Self {
        match event {
            SessionEvent::LoggedIn(user) => Self {
                user: Some(user),
                auth_mode: self.auth_mode,
                edit_target: None,
            },
            SessionEvent::LoggedOut => Self {
                user: None,
                auth_mode: self.auth_mode,
                edit_target: None,
            },
            SessionEvent::ToggleAuthMode => Self {
                auth_mode: self.auth_mode.toggled(),
                ..self.clone()
            },
            SessionEvent::BeginEdit(id) if self.user.is_some() => Self {
                edit_target: Some(id),
                ..self.clone()
            },
            SessionEvent::BeginEdit(_) => self.clone(),
            SessionEvent::EditFinished => Self {
                edit_target: None,
                ..self.clone()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::user;

    #[test]
    fn test_login_then_logout_clears_everything() {
        let state = SessionState::new()
            .apply(SessionEvent::LoggedIn(user()))
            .apply(SessionEvent::BeginEdit(ExpenseId(4)));
        assert!(state.is_authenticated());
        assert_eq!(state.edit_target(), Some(ExpenseId(4)));

        let state = state.apply(SessionEvent::LoggedOut);
        assert!(state.user().is_none());
        assert!(state.edit_target().is_none());
    }

    #[test]
    fn test_begin_edit_requires_login() {
        let state = SessionState::new().apply(SessionEvent::BeginEdit(ExpenseId(1)));
        assert!(state.edit_target().is_none());
    }

    #[test]
    fn test_edit_finished_keeps_user() {
        let state = SessionState::new()
            .apply(SessionEvent::LoggedIn(user()))
            .apply(SessionEvent::BeginEdit(ExpenseId(2)))
            .apply(SessionEvent::EditFinished);
        assert_eq!(state.user(), Some(&user()));
        assert!(state.edit_target().is_none());
    }

    #[test]
    fn test_toggle_auth_mode() {
        let state = SessionState::new();
        assert_eq!(state.auth_mode(), AuthMode::Login);

        let state = state.apply(SessionEvent::ToggleAuthMode);
        assert_eq!(state.auth_mode(), AuthMode::Signup);
        assert_eq!(state.auth_mode().title(), "Sign Up");
        assert_eq!(state.auth_mode().switch_prompt(), "Already have an account?");

        let state = state.apply(SessionEvent::ToggleAuthMode);
        assert_eq!(state.auth_mode(), AuthMode::Login);
    }

    #[test]
    fn test_new_login_drops_stale_edit_target() {
        let state = SessionState::new()
            .apply(SessionEvent::LoggedIn(user()))
            .apply(SessionEvent::BeginEdit(ExpenseId(8)))
            .apply(SessionEvent::LoggedIn(user()));
        assert!(state.edit_target().is_none());
    }
}
