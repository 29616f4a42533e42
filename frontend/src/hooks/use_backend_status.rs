use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

/// `None` while the first probe is in flight, then whether `/status` answered
#[hook]
pub fn use_backend_status(api_client: &ApiClient) -> Option<bool> {
    let connected = use_state(|| Option::<bool>::None);

    {
        let connected = connected.clone();
        let api_client = api_client.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api_client.status().await {
                    Ok(()) => connected.set(Some(true)),
                    Err(e) => {
                        Logger::warn_with_component("backend-status", &format!("backend unreachable: {}", e));
                        connected.set(Some(false));
                    }
                }
            });
            || ()
        });
    }

    *connected
}
