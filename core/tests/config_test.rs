//! Tests for reading widget configuration from the process environment

use agent_entry_core::config::WidgetConfig;
use serial_test::serial;
use std::env;

const VARS: &[&str] = &[
    "AGENT_ENTRY_AGENTS",
    "AGENT_ENTRY_API_URL",
    "AGENT_ENTRY_PHONE",
    "AGENT_ENTRY_HOVER_DELAY_MS",
    "AGENT_ENTRY_TRIGGER_TEXT",
    "AGENT_ENTRY_CONFIRM_TEXT",
    "AGENT_ENTRY_AUTO_HIDE",
    "AGENT_ENTRY_STORAGE_KEY",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();
    assert_eq!(WidgetConfig::from_env(), WidgetConfig::default());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    env::set_var("AGENT_ENTRY_API_URL", "http://localhost:8080/api/agents");
    env::set_var("AGENT_ENTRY_PHONE", "400-123-4567");
    env::set_var("AGENT_ENTRY_TRIGGER_TEXT", "Help");
    env::set_var("AGENT_ENTRY_CONFIRM_TEXT", "Hide for today?");
    env::set_var("AGENT_ENTRY_AUTO_HIDE", "true");

    let config = WidgetConfig::from_env();
    clear_env();

    assert_eq!(
        config.endpoint(),
        Some("http://localhost:8080/api/agents")
    );
    assert_eq!(config.phone, "400-123-4567");
    assert_eq!(config.trigger_text, "Help");
    assert_eq!(config.confirm_text, "Hide for today?");
    assert!(config.auto_hide);
}
