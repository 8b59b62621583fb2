//! Widget configuration
//!
//! Every input a host can set on the widget, with the defaults the widget
//! ships with. Hosts build a [`WidgetConfig`] directly, deserialize it from
//! JSON (camelCase keys, e.g. `apiUrl`, `hoverDelay`), or read it from
//! `AGENT_ENTRY_*` environment variables.

use crate::error::ConfigError;
use crate::state::Agent;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default storage key for the dismissal date
pub const DEFAULT_STORAGE_KEY: &str = "agent-component-hidden-date";
/// Default hover close delay in milliseconds
pub const DEFAULT_HOVER_DELAY_MS: u64 = 200;
/// Default service phone number shown in the footer
pub const DEFAULT_PHONE: &str = "400-XXX-XXXX";
/// Default trigger label
pub const DEFAULT_TRIGGER_TEXT: &str = "AI助手";
/// Default confirmation prompt
pub const DEFAULT_CONFIRM_TEXT: &str = "确定今天不再显示吗？";
/// Default panel header
pub const DEFAULT_HEADER_TEXT: &str = "智能助手";

/// Widget configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfig {
    /// Static agent list; takes precedence over the remote list when non-empty
    pub agents: Vec<Agent>,
    /// Endpoint returning a JSON array of agents
    pub api_url: Option<String>,
    /// Phone number shown as a dial link in the footer
    pub phone: String,
    /// Delay before the panel closes after the pointer leaves (ms)
    pub hover_delay: u64,
    /// Trigger label
    pub trigger_text: String,
    /// Prompt of the dismissal confirmation
    pub confirm_text: String,
    /// Panel header title
    pub header_text: String,
    /// Hide the whole widget while the effective agent list is empty
    pub auto_hide: bool,
    /// Storage key holding the dismissal date
    pub storage_key: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            agents: Vec::new(),
            api_url: None,
            phone: DEFAULT_PHONE.to_string(),
            hover_delay: DEFAULT_HOVER_DELAY_MS,
            trigger_text: DEFAULT_TRIGGER_TEXT.to_string(),
            confirm_text: DEFAULT_CONFIRM_TEXT.to_string(),
            header_text: DEFAULT_HEADER_TEXT.to_string(),
            auto_hide: false,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl WidgetConfig {
    /// Load configuration from environment variables with defaults
    ///
    /// Invalid values are logged and replaced by their default.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        match parse_json_var(&lookup, "AGENT_ENTRY_AGENTS") {
            Ok(Some(agents)) => config.agents = agents,
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Ignoring invalid agent list"),
        }
        config.api_url = non_empty(lookup("AGENT_ENTRY_API_URL"));
        if let Some(phone) = non_empty(lookup("AGENT_ENTRY_PHONE")) {
            config.phone = phone;
        }
        match parse_var::<u64, _>(&lookup, "AGENT_ENTRY_HOVER_DELAY_MS") {
            Ok(Some(delay)) => config.hover_delay = delay,
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Ignoring invalid hover delay"),
        }
        if let Some(text) = non_empty(lookup("AGENT_ENTRY_TRIGGER_TEXT")) {
            config.trigger_text = text;
        }
        if let Some(text) = non_empty(lookup("AGENT_ENTRY_CONFIRM_TEXT")) {
            config.confirm_text = text;
        }
        match parse_var::<bool, _>(&lookup, "AGENT_ENTRY_AUTO_HIDE") {
            Ok(Some(auto_hide)) => config.auto_hide = auto_hide,
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Ignoring invalid auto-hide flag"),
        }
        if let Some(key) = non_empty(lookup("AGENT_ENTRY_STORAGE_KEY")) {
            config.storage_key = key;
        }

        config
    }

    /// Hover close delay as a duration
    pub fn hover_delay(&self) -> Duration {
        Duration::from_millis(self.hover_delay)
    }

    /// Configured endpoint, ignoring empty strings
    pub fn endpoint(&self) -> Option<&str> {
        self.api_url.as_deref().filter(|url| !url.trim().is_empty())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_var<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match non_empty(lookup(name)) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                name,
                reason: e.to_string(),
            }),
    }
}

fn parse_json_var<F>(lookup: &F, name: &'static str) -> Result<Option<Vec<Agent>>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match non_empty(lookup(name)) {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                name,
                reason: e.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = WidgetConfig::default();
        assert!(config.agents.is_empty());
        assert!(config.api_url.is_none());
        assert_eq!(config.phone, "400-XXX-XXXX");
        assert_eq!(config.hover_delay(), Duration::from_millis(200));
        assert_eq!(config.storage_key, "agent-component-hidden-date");
        assert!(!config.auto_hide);
    }

    #[test]
    fn test_from_lookup_reads_values() {
        let config = WidgetConfig::from_lookup(lookup_from(&[
            ("AGENT_ENTRY_AGENTS", r#"[{"title":"Bot A","url":"https://x"}]"#),
            ("AGENT_ENTRY_API_URL", "http://localhost/agents"),
            ("AGENT_ENTRY_HOVER_DELAY_MS", "350"),
            ("AGENT_ENTRY_AUTO_HIDE", "true"),
            ("AGENT_ENTRY_STORAGE_KEY", "my-key"),
        ]));

        assert_eq!(config.agents, vec![Agent::new("Bot A", "https://x")]);
        assert_eq!(config.endpoint(), Some("http://localhost/agents"));
        assert_eq!(config.hover_delay, 350);
        assert!(config.auto_hide);
        assert_eq!(config.storage_key, "my-key");
    }

    #[test]
    fn test_from_lookup_invalid_values_fall_back() {
        let config = WidgetConfig::from_lookup(lookup_from(&[
            ("AGENT_ENTRY_AGENTS", "not json"),
            ("AGENT_ENTRY_HOVER_DELAY_MS", "soon"),
            ("AGENT_ENTRY_AUTO_HIDE", "maybe"),
        ]));

        assert_eq!(config, WidgetConfig::default());
    }

    #[test]
    fn test_empty_endpoint_is_ignored() {
        let config = WidgetConfig {
            api_url: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(config.endpoint().is_none());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let config: WidgetConfig =
            serde_json::from_str(r#"{"apiUrl":"http://a","hoverDelay":50,"autoHide":true}"#)
                .unwrap();

        assert_eq!(config.api_url.as_deref(), Some("http://a"));
        assert_eq!(config.hover_delay, 50);
        assert!(config.auto_hide);
        assert_eq!(config.phone, DEFAULT_PHONE);
    }
}
