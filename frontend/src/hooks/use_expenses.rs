use std::cell::RefCell;
use std::rc::Rc;

use shared::{summarize, Expense, ExpenseSummary, RefreshGuard, UserId};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

/// The fetched list together with the summary computed from it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseSnapshot {
    pub expenses: Rc<Vec<Expense>>,
    pub summary: Rc<ExpenseSummary>,
}

impl ExpenseSnapshot {
    pub fn new(expenses: Vec<Expense>) -> Self {
        let summary = summarize(&expenses);
        Self {
            expenses: Rc::new(expenses),
            summary: Rc::new(summary),
        }
    }

    pub fn find(&self, id: shared::ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }
}

#[derive(Clone)]
pub struct ExpensesState {
    pub snapshot: ExpenseSnapshot,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Clone, PartialEq)]
pub struct UseExpensesActions {
    /// Re-fetch the full list for a user and recompute the summary
    pub refresh: Callback<UserId>,
    /// Drop the list and make any in-flight refresh stale
    pub clear: Callback<()>,
}

pub struct UseExpensesResult {
    pub state: ExpensesState,
    pub actions: UseExpensesActions,
    /// Shared with mutations so they can tell whether their session ended
    pub guard: Rc<RefCell<RefreshGuard>>,
}

#[hook]
pub fn use_expenses(api_client: &ApiClient) -> UseExpensesResult {
    let snapshot = use_state(ExpenseSnapshot::default);
    let loading = use_state(|| false);
    let error = use_state(|| Option::<String>::None);
    let guard = use_mut_ref(RefreshGuard::new);

    let refresh = {
        let api_client = api_client.clone();
        let snapshot = snapshot.clone();
        let loading = loading.clone();
        let error = error.clone();
        let guard = guard.clone();

        use_callback((), move |user_id: UserId, _| {
            let api_client = api_client.clone();
            let snapshot = snapshot.clone();
            let loading = loading.clone();
            let error = error.clone();
            let guard = guard.clone();
            let generation = guard.borrow_mut().begin();

            spawn_local(async move {
                loading.set(true);

                let result = api_client.list_by_user(user_id).await;

                if !guard.borrow().is_current(generation) {
                    Logger::debug_with_component(
                        "use-expenses",
                        &format!("discarding stale refresh {:?} for user {}", generation, user_id),
                    );
                    return;
                }

                match result {
                    Ok(expenses) => {
                        let next = ExpenseSnapshot::new(expenses);
                        for rejected in &next.summary.rejected {
                            Logger::warn_with_component(
                                "use-expenses",
                                &format!("expense {} left out of totals: {}", rejected.id, rejected.reason),
                            );
                        }
                        Logger::debug_with_component(
                            "use-expenses",
                            &format!("loaded {} expenses for user {}", next.expenses.len(), user_id),
                        );
                        snapshot.set(next);
                        error.set(None);
                    }
                    Err(e) => {
                        Logger::error_with_component("use-expenses", &format!("Failed to load expenses: {}", e));
                        error.set(Some(format!("Error loading expenses: {}", e)));
                    }
                }

                loading.set(false);
            });
        })
    };

    let clear = {
        let snapshot = snapshot.clone();
        let loading = loading.clone();
        let error = error.clone();
        let guard = guard.clone();

        use_callback((), move |_: (), _| {
            guard.borrow_mut().invalidate();
            snapshot.set(ExpenseSnapshot::default());
            loading.set(false);
            error.set(None);
        })
    };

    UseExpensesResult {
        state: ExpensesState {
            snapshot: (*snapshot).clone(),
            loading: *loading,
            error: (*error).clone(),
        },
        actions: UseExpensesActions { refresh, clear },
        guard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::{Amount, ExpenseId};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn expense(id: i64, category: &str, amount: f64) -> Expense {
        Expense {
            id: ExpenseId(id),
            category: category.to_string(),
            amount: Amount::Number(amount),
            description: String::new(),
            expense_date: "2024-01-05".to_string(),
            user: None,
        }
    }

    #[wasm_bindgen_test]
    fn test_snapshot_summarizes_its_list() {
        let snapshot = ExpenseSnapshot::new(vec![expense(1, "Food", 10.0), expense(2, "Food", 5.0)]);
        assert_eq!(snapshot.summary.total, Decimal::from(15));
        assert_eq!(snapshot.summary.category_totals.get("Food"), Some(Decimal::from(15)));
        assert_eq!(snapshot.find(ExpenseId(2)).map(|e| e.id), Some(ExpenseId(2)));
        assert!(snapshot.find(ExpenseId(3)).is_none());
    }
}
