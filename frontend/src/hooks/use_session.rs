use std::ops::Deref;
use std::rc::Rc;

use shared::{SessionEvent, SessionState};
use yew::prelude::*;

use crate::services::logging::Logger;

/// `SessionState` as a yew reducer; every change goes through `SessionEvent`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStore(SessionState);

impl Deref for SessionStore {
    type Target = SessionState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Reducible for SessionStore {
    type Action = SessionEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match &action {
            SessionEvent::LoggedIn(user) => {
                Logger::info_with_component("session", &format!("logged in as {}", user.username))
            }
            SessionEvent::LoggedOut => Logger::info_with_component("session", "logged out"),
            SessionEvent::BeginEdit(id) => {
                Logger::debug_with_component("session", &format!("editing expense {}", id))
            }
            SessionEvent::ToggleAuthMode | SessionEvent::EditFinished => {}
        }
        Rc::new(SessionStore(self.0.apply(action)))
    }
}

#[hook]
pub fn use_session() -> UseReducerHandle<SessionStore> {
    use_reducer(SessionStore::default)
}
