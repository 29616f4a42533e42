//! Pure planning of user actions.
//!
//! Handlers turn typed form input plus the current session into a command
//! (or a validation error) without touching the network. The frontend then
//! runs the command through the gateway and applies the follow-up session
//! event on success.

use crate::{
    error::ValidationError,
    forms::{AuthForm, ExpenseForm},
    refresh::Epoch,
    session::{AuthMode, SessionEvent, SessionState},
    ExpenseId, ExpensePayload, LoginRequest, SignupRequest, UserId,
};

#[derive(Debug, Clone, PartialEq)]
pub enum AuthCommand {
    Login(LoginRequest),
    Signup(SignupRequest),
}

impl AuthCommand {
    pub fn plan(mode: AuthMode, form: &AuthForm) -> Result<Self, ValidationError> {
        match mode {
            AuthMode::Login => form.login_request().map(AuthCommand::Login),
            AuthMode::Signup => form.signup_request().map(AuthCommand::Signup),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseCommand {
    Create(ExpensePayload),
    Update(ExpenseId, ExpensePayload),
    Delete(ExpenseId),
}

impl ExpenseCommand {
    /// Submit of the expense form: an update when an edit is in progress,
    /// otherwise a create
    pub fn plan_save(session: &SessionState, form: &ExpenseForm) -> Result<Self, ValidationError> {
        let user = session.user().ok_or(ValidationError::NotLoggedIn)?;
        let payload = form.to_payload(user.id)?;

        Ok(match session.edit_target() {
            Some(id) => ExpenseCommand::Update(id, payload),
            None => ExpenseCommand::Create(payload),
        })
    }

    pub fn plan_delete(session: &SessionState, id: ExpenseId) -> Result<Self, ValidationError> {
        if !session.is_authenticated() {
            return Err(ValidationError::NotLoggedIn);
        }
        Ok(ExpenseCommand::Delete(id))
    }

    /// Session transition to apply once the command succeeded
    pub fn follow_up(&self, session: &SessionState) -> Option<SessionEvent> {
        match self {
            ExpenseCommand::Update(..) => Some(SessionEvent::EditFinished),
            ExpenseCommand::Delete(id) if session.edit_target() == Some(*id) => {
                Some(SessionEvent::EditFinished)
            }
            ExpenseCommand::Create(_) | ExpenseCommand::Delete(_) => None,
        }
    }

    /// Whether the form is cleared after the command succeeded
    pub fn resets_form(&self, session: &SessionState) -> bool {
        match self {
            ExpenseCommand::Create(_) | ExpenseCommand::Update(..) => true,
            ExpenseCommand::Delete(id) => session.edit_target() == Some(*id),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ExpenseCommand::Create(payload) => format!("create {} expense", payload.category),
            ExpenseCommand::Update(id, _) => format!("update expense {}", id),
            ExpenseCommand::Delete(id) => format!("delete expense {}", id),
        }
    }
}

/// An expense mutation on its way to the server, together with what its
/// completion should do to the session it was started in
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMutation {
    pub command: ExpenseCommand,
    owner: UserId,
    epoch: Epoch,
    follow_up: Option<SessionEvent>,
    resets_form: bool,
}

/// What to do once a mutation's request has completed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settlement {
    /// User whose list is re-fetched
    pub refresh: Option<UserId>,
    pub follow_up: Option<SessionEvent>,
    pub reset_form: bool,
}

impl PendingMutation {
    pub fn start(
        command: ExpenseCommand,
        session: &SessionState,
        epoch: Epoch,
    ) -> Result<Self, ValidationError> {
        let owner = session.user().ok_or(ValidationError::NotLoggedIn)?.id;
        Ok(Self {
            follow_up: command.follow_up(session),
            resets_form: command.resets_form(session),
            command,
            owner,
            epoch,
        })
    }

    /// Decide the aftermath of the request.
    ///
    /// The owner's list is refreshed whether the request succeeded or not.
    /// Session and form changes only follow a success. Nothing happens when
    /// the session the mutation was started in has ended (`current` differs).
    pub fn settle(&self, succeeded: bool, current: Epoch) -> Settlement {
        if current != self.epoch {
            return Settlement::default();
        }
        if !succeeded {
            return Settlement {
                refresh: Some(self.owner),
                ..Settlement::default()
            };
        }
        Settlement {
            refresh: Some(self.owner),
            follow_up: self.follow_up.clone(),
            reset_form: self.resets_form,
        }
    }
}
