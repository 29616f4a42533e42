use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    /// Logged-in username, `None` on the auth screen
    pub username: Option<String>,
    /// `None` until the first status probe answers
    pub backend_connected: Option<bool>,
    pub api_base_url: String,
    pub on_logout: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let (status_class, status_text) = match props.backend_connected {
        None => ("connection-status checking", "Checking...".to_string()),
        Some(true) => ("connection-status connected", format!("Connected to {}", props.api_base_url)),
        Some(false) => ("connection-status disconnected", format!("Cannot reach {}", props.api_base_url)),
    };

    html! {
        <header class="header">
            <div class="container">
                <h1>{"Expense Tracker"}</h1>
                <div class="header-right">
                    <span class={status_class}>{status_text}</span>
                    {if let Some(username) = props.username.as_ref() {
                        let on_logout = props.on_logout.clone();
                        html! {
                            <div class="user-info">
                                <span class="welcome">{format!("Welcome, {}!", username)}</span>
                                <button class="btn btn-secondary" onclick={Callback::from(move |_: MouseEvent| on_logout.emit(()))}>
                                    {"Logout"}
                                </button>
                            </div>
                        }
                    } else { html! {} }}
                </div>
            </div>
        </header>
    }
}
