use gloo::net::http::{Request, Response};
use shared::{
    AuthCommand, ClientError, Expense, ExpenseCommand, ExpenseId, ExpensePayload, LoginRequest,
    SignupRequest, User, UserId,
};

use crate::config::DEFAULT_API_URL;
use crate::services::logging::Logger;

/// Gateway to the external expense/user REST service.
///
/// Each call is a single request with no retry; callers refresh the full
/// list afterwards instead of trusting mutation responses.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn users_url(&self, path: &str) -> String {
        format!("{}/api/users{}", self.base_url, path)
    }

    pub fn expenses_url(&self, path: &str) -> String {
        format!("{}/api/expenses{}", self.base_url, path)
    }

    /// Probe the backend's status endpoint
    pub async fn status(&self) -> Result<(), ClientError> {
        let response = Request::get(&format!("{}/status", self.base_url))
            .send()
            .await
            .map_err(network_error)?;
        if response.ok() {
            Ok(())
        } else {
            Err(status_error(response).await)
        }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<User, ClientError> {
        let response = Request::post(&self.users_url("/login"))
            .json(request)
            .map_err(|e| ClientError::Decode(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(network_error)?;

        if !response.ok() {
            Logger::warn_with_component("api", &format!("login rejected with status {}", response.status()));
            return Err(ClientError::invalid_login());
        }
        decode(response).await
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<User, ClientError> {
        let response = Request::post(&self.users_url("/signup"))
            .json(request)
            .map_err(|e| ClientError::Decode(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(network_error)?;

        if !response.ok() {
            Logger::warn_with_component("api", &format!("signup rejected with status {}", response.status()));
            return Err(ClientError::signup_rejected());
        }
        decode(response).await
    }

    /// All accounts, for the login picker
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        let response = Request::get(&self.users_url(""))
            .send()
            .await
            .map_err(network_error)?;
        if !response.ok() {
            return Err(status_error(response).await);
        }
        decode(response).await
    }

    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Expense>, ClientError> {
        let response = Request::get(&self.expenses_url(&format!("/user/{}", user_id)))
            .send()
            .await
            .map_err(network_error)?;
        if !response.ok() {
            return Err(status_error(response).await);
        }
        decode(response).await
    }

    pub async fn create(&self, payload: &ExpensePayload) -> Result<Expense, ClientError> {
        let response = Request::post(&self.expenses_url(""))
            .json(payload)
            .map_err(|e| ClientError::Decode(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(network_error)?;
        if !response.ok() {
            return Err(status_error(response).await);
        }
        decode(response).await
    }

    pub async fn update(&self, id: ExpenseId, payload: &ExpensePayload) -> Result<Expense, ClientError> {
        let response = Request::put(&self.expenses_url(&format!("/{}", id)))
            .json(payload)
            .map_err(|e| ClientError::Decode(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(network_error)?;
        if !response.ok() {
            return Err(status_error(response).await);
        }
        decode(response).await
    }

    pub async fn delete(&self, id: ExpenseId) -> Result<(), ClientError> {
        let response = Request::delete(&self.expenses_url(&format!("/{}", id)))
            .send()
            .await
            .map_err(network_error)?;
        if !response.ok() {
            return Err(status_error(response).await);
        }
        Ok(())
    }

    /// Run a login or signup
    pub async fn authenticate(&self, command: &AuthCommand) -> Result<User, ClientError> {
        match command {
            AuthCommand::Login(request) => self.login(request).await,
            AuthCommand::Signup(request) => self.signup(request).await,
        }
    }

    /// Run a planned mutation; the returned record is only logged
    pub async fn execute(&self, command: &ExpenseCommand) -> Result<(), ClientError> {
        match command {
            ExpenseCommand::Create(payload) => {
                let created = self.create(payload).await?;
                Logger::debug_with_component("api", &format!("created expense {}", created.id));
            }
            ExpenseCommand::Update(id, payload) => {
                let updated = self.update(*id, payload).await?;
                Logger::debug_with_component("api", &format!("updated expense {}", updated.id));
            }
            ExpenseCommand::Delete(id) => {
                self.delete(*id).await?;
                Logger::debug_with_component("api", &format!("deleted expense {}", id));
            }
        }
        Ok(())
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn network_error(error: gloo::net::Error) -> ClientError {
    ClientError::Network(error.to_string())
}

async fn status_error(response: Response) -> ClientError {
    let status = response.status();
    let message = match response.text().await {
        Ok(text) if !text.trim().is_empty() => text,
        _ => response.status_text(),
    };
    ClientError::Status { status, message }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_urls() {
        let client = ApiClient::with_base_url("http://localhost:8080/".to_string());
        assert_eq!(client.users_url("/login"), "http://localhost:8080/api/users/login");
        assert_eq!(client.users_url(""), "http://localhost:8080/api/users");
        assert_eq!(
            client.expenses_url(&format!("/user/{}", UserId(3))),
            "http://localhost:8080/api/expenses/user/3"
        );
        assert_eq!(
            client.expenses_url(&format!("/{}", ExpenseId(11))),
            "http://localhost:8080/api/expenses/11"
        );
    }

    fn response(body: &str) -> Response {
        Response::from(web_sys::Response::new_with_opt_str(Some(body)).unwrap())
    }

    #[wasm_bindgen_test]
    async fn test_decode_reads_json_body() {
        let user: User = decode(response(
            r#"{"id": 3, "username": "bo", "email": "bo@example.com", "password": "x"}"#,
        ))
        .await
        .unwrap();
        assert_eq!(user.id, UserId(3));
        assert_eq!(user.username, "bo");
    }

    #[wasm_bindgen_test]
    async fn test_decode_reports_malformed_body() {
        let result = decode::<Vec<Expense>>(response("<html>oops</html>")).await;
        assert!(matches!(result, Err(ClientError::Decode(_))));
    }

    #[wasm_bindgen_test]
    fn test_default_base_url() {
        assert_eq!(ApiClient::default(), ApiClient::new());
        assert_eq!(ApiClient::new().expenses_url(""), "http://localhost:8080/api/expenses");
    }
}
