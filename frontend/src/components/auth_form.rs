use shared::{AuthCommand, AuthForm, AuthMode, SessionEvent, User};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::hooks::use_session::SessionStore;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct AuthScreenProps {
    pub api_client: ApiClient,
    pub session: UseReducerHandle<SessionStore>,
}

/// Login/signup screen; a successful call logs the returned user in
#[function_component(AuthScreen)]
pub fn auth_screen(props: &AuthScreenProps) -> Html {
    let form = use_state(AuthForm::default);
    let error = use_state(|| Option::<String>::None);
    let submitting = use_state(|| false);
    let known_users = use_state(Vec::<User>::new);
    let mode = props.session.auth_mode();

    // Account picker source; failure only hides the picker
    {
        let known_users = known_users.clone();
        let api_client = props.api_client.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api_client.list_users().await {
                    Ok(users) => known_users.set(users),
                    Err(e) => Logger::debug_with_component("auth", &format!("no account list: {}", e)),
                }
            });
            || ()
        });
    }

    // Switching between login and signup starts from a blank form
    {
        let form = form.clone();
        let error = error.clone();
        use_effect_with(mode, move |_| {
            form.set(AuthForm::default());
            error.set(None);
            || ()
        });
    }

    let on_toggle = {
        let session = props.session.clone();
        Callback::from(move |_: MouseEvent| session.dispatch(SessionEvent::ToggleAuthMode))
    };

    let on_username = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(AuthForm {
                username: input.value(),
                ..(*form).clone()
            });
        })
    };

    let on_email = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(AuthForm {
                email: input.value(),
                ..(*form).clone()
            });
        })
    };

    let on_password = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(AuthForm {
                password: input.value(),
                ..(*form).clone()
            });
        })
    };

    let on_pick_account = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let email = select.value();
            if !email.is_empty() {
                form.set(AuthForm {
                    email,
                    ..(*form).clone()
                });
            }
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let session = props.session.clone();
        let form = form.clone();
        let error = error.clone();
        let submitting = submitting.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let command = match AuthCommand::plan(mode, &form) {
                Ok(command) => command,
                Err(e) => {
                    error.set(Some(e.to_string()));
                    return;
                }
            };

            let api_client = api_client.clone();
            let session = session.clone();
            let error = error.clone();
            let submitting = submitting.clone();

            submitting.set(true);
            error.set(None);
            spawn_local(async move {
                match api_client.authenticate(&command).await {
                    Ok(user) => session.dispatch(SessionEvent::LoggedIn(user)),
                    Err(e) => {
                        Logger::warn_with_component("auth", &format!("{} failed: {}", mode.title(), e));
                        error.set(Some(e.to_string()));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let button_class = match mode {
        AuthMode::Login => "btn btn-primary",
        AuthMode::Signup => "btn btn-success",
    };

    html! {
        <section class="auth-screen">
            <h2>{mode.title()}</h2>

            {if let Some(message) = (*error).as_ref() {
                html! { <div class="form-message error">{message}</div> }
            } else { html! {} }}

            {if mode == AuthMode::Login && !known_users.is_empty() {
                html! {
                    <div class="form-group">
                        <label for="account-picker">{"Saved accounts"}</label>
                        <select id="account-picker" onchange={on_pick_account}>
                            <option value="" selected={true}>{"Choose an account..."}</option>
                            {for known_users.iter().map(|user| html! {
                                <option key={user.id.to_string()} value={user.email.clone()}>
                                    {format!("{} ({})", user.username, user.email)}
                                </option>
                            })}
                        </select>
                    </div>
                }
            } else { html! {} }}

            <form class="auth-form" onsubmit={on_submit}>
                {if mode == AuthMode::Signup {
                    html! {
                        <div class="form-group">
                            <label for="username">{"Username"}</label>
                            <input
                                type="text"
                                id="username"
                                value={form.username.clone()}
                                oninput={on_username}
                                disabled={*submitting}
                            />
                        </div>
                    }
                } else { html! {} }}

                <div class="form-group">
                    <label for="email">{"Email"}</label>
                    <input
                        type="email"
                        id="email"
                        value={form.email.clone()}
                        oninput={on_email}
                        disabled={*submitting}
                    />
                </div>

                <div class="form-group">
                    <label for="password">{"Password"}</label>
                    <input
                        type="password"
                        id="password"
                        value={form.password.clone()}
                        oninput={on_password}
                        disabled={*submitting}
                    />
                </div>

                <button type="submit" class={button_class} disabled={*submitting}>
                    {if *submitting { "Please wait..." } else { mode.title() }}
                </button>
            </form>

            <p class="auth-switch">
                {mode.switch_prompt()}{" "}
                <button type="button" class="btn-link" onclick={on_toggle}>
                    {mode.toggled().title()}
                </button>
            </p>
        </section>
    }
}
