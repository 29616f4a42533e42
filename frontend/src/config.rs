use crate::services::logging::LogLevel;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_CURRENCY: &str = "₱";

/// Settings baked in at build time.
///
/// `EXPENSE_API_URL`, `EXPENSE_CURRENCY` and `EXPENSE_LOG_LEVEL` override the
/// defaults when set in the environment of the build (e.g. `trunk build`).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub currency_symbol: String,
    pub log_level: LogLevel,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("EXPENSE_API_URL"),
            option_env!("EXPENSE_CURRENCY"),
            option_env!("EXPENSE_LOG_LEVEL"),
        )
    }

    pub fn from_values(api_url: Option<&str>, currency: Option<&str>, log_level: Option<&str>) -> Self {
        let api_base_url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        let currency_symbol = currency
            .map(str::trim)
            .filter(|symbol| !symbol.is_empty())
            .unwrap_or(DEFAULT_CURRENCY)
            .to_string();

        let log_level = log_level.and_then(LogLevel::parse).unwrap_or(LogLevel::Info);

        Self {
            api_base_url,
            currency_symbol,
            log_level,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.currency_symbol, "₱");
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[wasm_bindgen_test]
    fn test_overrides() {
        let config = AppConfig::from_values(Some("https://api.example.com/ "), Some("$"), Some("debug"));
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[wasm_bindgen_test]
    fn test_blank_values_fall_back() {
        let config = AppConfig::from_values(Some("  "), Some(""), Some("loud"));
        assert_eq!(config, AppConfig::default());
    }
}
