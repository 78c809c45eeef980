use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Local storage key of the persisted note draft.
pub(crate) const NOTE_DRAFT_KEY: &str = "note-draft";

/// Leading component of every notes list cache key.
pub(crate) const NOTES_NAMESPACE: &str = "notes";

/// Global the host page may set to a dehydrated query cache (JSON).
pub(crate) const DEHYDRATED_STATE_GLOBAL: &str = "__NOTES_STATE__";

pub(crate) const NOTES_PER_PAGE: u32 = 12;
pub(crate) const QUERY_RETRY_COUNT: u32 = 3;

pub(crate) const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);
pub(crate) const NOT_FOUND_REDIRECT_DELAY: Duration = Duration::from_secs(3);
pub(crate) const TOAST_DURATION: Duration = Duration::from_secs(4);

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub log_level: String,
}

impl EnvConfig {
    /// Read `window.ENV` set by the host page.
    ///
    /// Both `API_URL` and `api_url` spellings are accepted; the upper-case
    /// one wins when both are present.
    pub fn new() -> Self {
        let Some(env) = window_env() else {
            return Self::default_values();
        };

        let read = |upper: &str, lower: &str| -> Option<String> {
            read_string(&env, upper)
                .or_else(|| read_string(&env, lower))
                .filter(|s| !s.trim().is_empty())
        };

        Self {
            api_url: read("API_URL", "api_url")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_token: read("API_TOKEN", "api_token"),
            log_level: read("LOG_LEVEL", "log_level")
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    fn default_values() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn window_env() -> Option<wasm_bindgen::JsValue> {
    if !cfg!(target_arch = "wasm32") {
        return None;
    }
    let env = web_sys::window()?.get("ENV")?;
    if env.is_undefined() || !env.is_object() {
        return None;
    }
    Some(env.into())
}

fn read_string(env: &wasm_bindgen::JsValue, key: &str) -> Option<String> {
    js_sys::Reflect::get(env, &key.into())
        .ok()
        .and_then(|v| v.as_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_config_defaults_outside_browser() {
        let cfg = EnvConfig::new();
        assert_eq!(cfg.api_url, "http://localhost:8080");
        assert!(cfg.api_token.is_none());
        assert_eq!(cfg.log_level, "info");
    }
}
