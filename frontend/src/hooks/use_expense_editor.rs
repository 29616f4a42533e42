use std::cell::RefCell;
use std::rc::Rc;

use shared::{ExpenseCommand, ExpenseForm, ExpenseId, PendingMutation, RefreshGuard, SessionEvent, UserId};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_expenses::ExpenseSnapshot;
use crate::hooks::use_session::SessionStore;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct EditorState {
    pub form: ExpenseForm,
    pub error: Option<String>,
    /// A mutation is in flight; editing and deleting are refused until it lands
    pub saving: bool,
}

#[derive(Clone, PartialEq)]
pub struct UseExpenseEditorActions {
    pub on_change: Callback<ExpenseForm>,
    /// Create, or update the current edit target
    pub submit: Callback<()>,
    pub edit: Callback<ExpenseId>,
    pub cancel: Callback<()>,
    pub delete: Callback<ExpenseId>,
    /// Clear the form and any error without touching the session
    pub reset: Callback<()>,
}

pub struct UseExpenseEditorResult {
    pub state: EditorState,
    pub actions: UseExpenseEditorActions,
}

/// Form state and mutations of the expense editor.
///
/// Every mutation that reached the network is followed by `on_refresh` for the
/// logged-in user, whether it succeeded or not, unless the user logged out
/// while it was in flight.
#[hook]
pub fn use_expense_editor(
    api_client: &ApiClient,
    session: UseReducerHandle<SessionStore>,
    snapshot: &ExpenseSnapshot,
    guard: Rc<RefCell<RefreshGuard>>,
    on_refresh: Callback<UserId>,
) -> UseExpenseEditorResult {
    let form = use_state(ExpenseForm::default);
    let error = use_state(|| Option::<String>::None);
    let saving = use_state(|| false);

    let on_change = {
        let form = form.clone();
        Callback::from(move |next: ExpenseForm| form.set(next))
    };

    // Runs a planned command, then settles it against the session it started in.
    let run = {
        let api_client = api_client.clone();
        let session = session.clone();
        let form = form.clone();
        let error = error.clone();
        let saving = saving.clone();
        let guard = guard.clone();
        let on_refresh = on_refresh.clone();

        Callback::from(move |command: ExpenseCommand| {
            let epoch = guard.borrow().epoch();
            let pending = match PendingMutation::start(command, &session, epoch) {
                Ok(pending) => pending,
                Err(e) => {
                    error.set(Some(e.to_string()));
                    return;
                }
            };

            let api_client = api_client.clone();
            let session = session.clone();
            let form = form.clone();
            let error = error.clone();
            let saving = saving.clone();
            let guard = guard.clone();
            let on_refresh = on_refresh.clone();

            saving.set(true);
            spawn_local(async move {
                let result = api_client.execute(&pending.command).await;
                if let Err(e) = &result {
                    Logger::error_with_component(
                        "expense-editor",
                        &format!("Failed to {}: {}", pending.command.describe(), e),
                    );
                }

                let settlement = pending.settle(result.is_ok(), guard.borrow().epoch());
                saving.set(false);
                if settlement.refresh.is_none() {
                    Logger::debug_with_component(
                        "expense-editor",
                        &format!("session ended before {} completed", pending.command.describe()),
                    );
                    return;
                }

                if let Some(event) = settlement.follow_up {
                    session.dispatch(event);
                }
                if settlement.reset_form {
                    form.set(ExpenseForm::default());
                }
                error.set(result.err().map(|e| e.to_string()));
                if let Some(owner) = settlement.refresh {
                    on_refresh.emit(owner);
                }
            });
        })
    };

    let submit = {
        let session = session.clone();
        let form = form.clone();
        let error = error.clone();
        let run = run.clone();

        Callback::from(move |_: ()| match ExpenseCommand::plan_save(&session, &form) {
            Ok(command) => run.emit(command),
            Err(e) => {
                Logger::warn_with_component("expense-editor", &format!("save rejected: {}", e));
                error.set(Some(e.to_string()));
            }
        })
    };

    let delete = {
        let session = session.clone();
        let error = error.clone();
        let saving = *saving;
        let run = run.clone();

        Callback::from(move |id: ExpenseId| {
            if saving {
                return;
            }
            match ExpenseCommand::plan_delete(&session, id) {
                Ok(command) => run.emit(command),
                Err(e) => error.set(Some(e.to_string())),
            }
        })
    };

    let edit = {
        let session = session.clone();
        let form = form.clone();
        let error = error.clone();
        let snapshot = snapshot.clone();
        let saving = *saving;

        Callback::from(move |id: ExpenseId| match snapshot.find(id) {
            _ if saving => {}
            Some(expense) => {
                form.set(ExpenseForm::from_expense(expense));
                error.set(None);
                session.dispatch(SessionEvent::BeginEdit(id));
            }
            None => {
                Logger::warn_with_component("expense-editor", &format!("expense {} is no longer listed", id));
            }
        })
    };

    let reset = {
        let form = form.clone();
        let error = error.clone();
        Callback::from(move |_: ()| {
            form.set(ExpenseForm::default());
            error.set(None);
        })
    };

    let cancel = {
        let session = session.clone();
        let reset = reset.clone();
        Callback::from(move |_: ()| {
            reset.emit(());
            session.dispatch(SessionEvent::EditFinished);
        })
    };

    UseExpenseEditorResult {
        state: EditorState {
            form: (*form).clone(),
            error: (*error).clone(),
            saving: *saving,
        },
        actions: UseExpenseEditorActions {
            on_change,
            submit,
            edit,
            cancel,
            delete,
            reset,
        },
    }
}
