use shared::{ExpenseId, ExpenseRow};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ExpenseListProps {
    pub rows: Vec<ExpenseRow>,
    pub loading: bool,
    /// Row actions are unavailable while a save is in flight
    #[prop_or_default]
    pub disabled: bool,
    pub on_edit: Callback<ExpenseId>,
    pub on_delete: Callback<ExpenseId>,
}

#[function_component(ExpenseList)]
pub fn expense_list(props: &ExpenseListProps) -> Html {
    html! {
        <section class="expenses-section">
            <h2>{"Expenses"}</h2>

            {if props.loading && props.rows.is_empty() {
                html! { <div class="loading">{"Loading expenses..."}</div> }
            } else if props.rows.is_empty() {
                html! { <div class="empty">{"No expenses recorded yet."}</div> }
            } else {
                html! {
                    <ul class="expense-list">
                        {for props.rows.iter().map(|row| {
                            let id = row.id;
                            let on_edit = {
                                let on_edit = props.on_edit.clone();
                                Callback::from(move |_: MouseEvent| on_edit.emit(id))
                            };
                            let on_delete = {
                                let on_delete = props.on_delete.clone();
                                Callback::from(move |_: MouseEvent| on_delete.emit(id))
                            };

                            html! {
                                <li key={id.to_string()} class={classes!("expense-row", row.editing.then_some("editing"))}>
                                    <div class="expense-details">
                                        <p><strong>{"Category: "}</strong>{&row.category}</p>
                                        <p class={classes!("amount", row.rejected.then_some("invalid"))}>
                                            <strong>{"Amount: "}</strong>{&row.amount_label}
                                            {if row.rejected {
                                                html! { <span class="badge">{" (not counted)"}</span> }
                                            } else { html! {} }}
                                        </p>
                                        <p><strong>{"Description: "}</strong>{&row.description}</p>
                                        <p><strong>{"Date: "}</strong>{&row.date}</p>
                                    </div>
                                    <div class="expense-actions">
                                        <button class="btn btn-warning" onclick={on_edit} disabled={props.disabled}>{"Edit"}</button>
                                        <button class="btn btn-danger" onclick={on_delete} disabled={props.disabled}>{"Delete"}</button>
                                    </div>
                                </li>
                            }
                        })}
                    </ul>
                }
            }}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn row() -> ExpenseRow {
        ExpenseRow {
            id: ExpenseId(4),
            category: "Food".to_string(),
            amount_label: "₱10.00".to_string(),
            description: "Lunch".to_string(),
            date: "2024-01-05".to_string(),
            editing: false,
            rejected: false,
        }
    }

    async fn disabled_buttons(disabled: bool) -> u32 {
        let root = gloo::utils::document().create_element("div").unwrap();
        gloo::utils::body().append_child(&root).unwrap();

        let props = ExpenseListProps {
            rows: vec![row()],
            loading: false,
            disabled,
            on_edit: Callback::noop(),
            on_delete: Callback::noop(),
        };
        yew::Renderer::<ExpenseList>::with_root_and_props(root.clone(), props).render();
        yew::platform::time::sleep(Duration::from_millis(20)).await;

        root.query_selector_all("button[disabled]").unwrap().length()
    }

    #[wasm_bindgen_test]
    async fn test_row_actions_locked_while_saving() {
        assert_eq!(disabled_buttons(true).await, 2);
        assert_eq!(disabled_buttons(false).await, 0);
    }
}
