use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Where the candidate lists come from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL the endpoint paths are appended to. No fetch happens without one.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_people_path")]
    pub people_path: String,
    #[serde(default = "default_tags_path")]
    pub tags_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Sent verbatim as the `Cookie` header (e.g. "sessionid=...").
    #[serde(default)]
    pub session_cookie: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            base_url: None,
            people_path: default_people_path(),
            tags_path: default_tags_path(),
            timeout_secs: default_timeout_secs(),
            session_cookie: None,
        }
    }
}

impl ServerConfig {
    pub fn people_url(&self) -> Option<String> {
        self.base_url.as_deref().map(|b| join_url(b, &self.people_path))
    }

    pub fn tags_url(&self) -> Option<String> {
        self.base_url.as_deref().map(|b| join_url(b, &self.tags_path))
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn default_people_path() -> String {
    "/get_followed_usernames/".into()
}

fn default_tags_path() -> String {
    "/get_user_tags/".into()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_visible() -> usize {
    8
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Maximum rows shown in the suggestion popup before it scrolls
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,
    #[serde(default)]
    pub show_key_hints: bool,
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Kitty keyboard protocol: true = force on, false = force off, absent = on (default).
    /// Needed for Ctrl+Enter; Ctrl+S submits either way.
    #[serde(default)]
    pub kitty_keyboard: Option<bool>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            max_visible: default_max_visible(),
            show_key_hints: false,
            colors: HashMap::new(),
            kitty_keyboard: None,
        }
    }
}
