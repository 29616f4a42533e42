use shared::ExpenseForm;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ExpenseFormProps {
    pub form: ExpenseForm,
    pub error: Option<String>,
    pub saving: bool,
    /// An existing record is being edited
    pub editing: bool,
    pub on_change: Callback<ExpenseForm>,
    pub on_submit: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[derive(Clone, Copy)]
enum Field {
    Category,
    Amount,
    Description,
    Date,
}

impl Field {
    fn set(self, form: &ExpenseForm, value: String) -> ExpenseForm {
        let mut next = form.clone();
        match self {
            Field::Category => next.category = value,
            Field::Amount => next.amount = value,
            Field::Description => next.description = value,
            Field::Date => next.expense_date = value,
        }
        next
    }
}

#[function_component(ExpenseFormPanel)]
pub fn expense_form_panel(props: &ExpenseFormProps) -> Html {
    let on_input = |field: Field| {
        let form = props.form.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(field.set(&form, input.value()));
        })
    };

    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    let can_submit = props.form.is_complete() && !props.saving;
    let submit_label = if props.editing { "Update Expense" } else { "Add Expense" };

    html! {
        <section class="expense-form-section">
            <h2>{if props.editing { "Edit Expense" } else { "New Expense" }}</h2>

            {if let Some(error) = props.error.as_ref() {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}

            <form class="expense-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="category">{"Category"}</label>
                    <input
                        type="text"
                        id="category"
                        placeholder="Food, Transport, Bills..."
                        value={props.form.category.clone()}
                        oninput={on_input(Field::Category)}
                        disabled={props.saving}
                    />
                </div>

                <div class="form-group">
                    <label for="amount">{"Amount"}</label>
                    <input
                        type="number"
                        id="amount"
                        step="0.01"
                        min="0"
                        value={props.form.amount.clone()}
                        oninput={on_input(Field::Amount)}
                        disabled={props.saving}
                    />
                </div>

                <div class="form-group">
                    <label for="description">{"Description"}</label>
                    <input
                        type="text"
                        id="description"
                        value={props.form.description.clone()}
                        oninput={on_input(Field::Description)}
                        disabled={props.saving}
                    />
                </div>

                <div class="form-group">
                    <label for="expenseDate">{"Date"}</label>
                    <input
                        type="date"
                        id="expenseDate"
                        value={props.form.expense_date.clone()}
                        oninput={on_input(Field::Date)}
                        disabled={props.saving}
                    />
                </div>

                <div class="form-actions">
                    <button
                        type="submit"
                        class={classes!("btn", "btn-primary", (!can_submit).then_some("btn-disabled"))}
                        disabled={!can_submit}
                    >
                        {if props.saving { "Saving..." } else { submit_label }}
                    </button>
                    {if props.editing {
                        html! {
                            <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={props.saving}>
                                {"Cancel"}
                            </button>
                        }
                    } else { html! {} }}
                </div>
            </form>
        </section>
    }
}
