use shared::{DashboardView, SessionEvent};
use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod services;

use components::charts::{CategoryChart, TrendChart};
use components::{AuthScreen, ExpenseFormPanel, ExpenseList, ExportPanel, Header, SummaryCards};
use config::AppConfig;
use hooks::use_backend_status::use_backend_status;
use hooks::use_expense_editor::use_expense_editor;
use hooks::use_expenses::use_expenses;
use hooks::use_session::use_session;
use services::api::ApiClient;
use services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: AppConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    html! {
        <ContextProvider<AppConfig> context={props.config.clone()}>
            <Tracker />
        </ContextProvider<AppConfig>>
    }
}

#[function_component(Tracker)]
fn tracker() -> Html {
    let config = use_context::<AppConfig>().unwrap_or_default();
    let api_client = (*use_memo(config.api_base_url.clone(), |base_url| {
        ApiClient::with_base_url(base_url.clone())
    }))
    .clone();

    let session = use_session();
    let backend_connected = use_backend_status(&api_client);
    let expenses = use_expenses(&api_client);
    let editor = use_expense_editor(
        &api_client,
        session.clone(),
        &expenses.state.snapshot,
        expenses.guard.clone(),
        expenses.actions.refresh.clone(),
    );

    // Login loads the user's list; logout drops it along with any pending refresh
    let user_id = session.user().map(|user| user.id);
    {
        let refresh = expenses.actions.refresh.clone();
        let clear = expenses.actions.clear.clone();
        let reset_form = editor.actions.reset.clone();
        use_effect_with(user_id, move |user_id| {
            match user_id {
                Some(id) => refresh.emit(*id),
                None => {
                    clear.emit(());
                    reset_form.emit(());
                }
            }
            || ()
        });
    }

    // The old session's refreshes are invalidated before the logout renders
    let on_logout = {
        let session = session.clone();
        let clear = expenses.actions.clear.clone();
        Callback::from(move |_: ()| {
            clear.emit(());
            session.dispatch(SessionEvent::LoggedOut);
        })
    };

    let header = html! {
        <Header
            username={session.user().map(|user| user.username.clone())}
            backend_connected={backend_connected}
            api_base_url={config.api_base_url.clone()}
            on_logout={on_logout}
        />
    };

    if !session.is_authenticated() {
        return html! {
            <div class="app">
                {header}
                <main class="main">
                    <div class="container">
                        <AuthScreen api_client={api_client.clone()} session={session.clone()} />
                    </div>
                </main>
            </div>
        };
    }

    let snapshot = &expenses.state.snapshot;
    let view = if snapshot.expenses.is_empty() {
        DashboardView::empty(&config.currency_symbol)
    } else {
        DashboardView::project(
            &snapshot.expenses,
            &snapshot.summary,
            session.edit_target(),
            &config.currency_symbol,
        )
    };

    html! {
        <div class="app">
            {header}
            <main class="main">
                <div class="container">
                    {if let Some(error) = expenses.state.error.as_ref() {
                        html! { <div class="form-message error">{error}</div> }
                    } else { html! {} }}

                    <SummaryCards summary={view.summary.clone()} />

                    <div class="dashboard-grid">
                        <ExpenseFormPanel
                            form={editor.state.form.clone()}
                            error={editor.state.error.clone()}
                            saving={editor.state.saving}
                            editing={session.edit_target().is_some()}
                            on_change={editor.actions.on_change.clone()}
                            on_submit={editor.actions.submit.clone()}
                            on_cancel={editor.actions.cancel.clone()}
                        />
                        <ExpenseList
                            rows={view.rows.clone()}
                            loading={expenses.state.loading}
                            disabled={editor.state.saving}
                            on_edit={editor.actions.edit.clone()}
                            on_delete={editor.actions.delete.clone()}
                        />
                    </div>

                    <div class="charts-grid">
                        <CategoryChart slices={view.category_chart.clone()} />
                        <TrendChart
                            points={view.trend_chart.clone()}
                            currency={config.currency_symbol.clone()}
                        />
                    </div>

                    <ExportPanel expenses={snapshot.expenses.clone()} />
                </div>
            </main>
        </div>
    }
}

fn main() {
    let config = AppConfig::from_build_env();
    Logger::init(config.log_level);
    Logger::info_with_component("app", &format!("using backend at {}", config.api_base_url));
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
