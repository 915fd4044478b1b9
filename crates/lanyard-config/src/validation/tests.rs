//! Tests for the validation pipeline.

use super::*;

#[test]
fn default_config_validates() {
    let config = LanyardConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn numeric_user_id_validates() {
    let mut config = LanyardConfig::default();
    config.presence.user_id = "94490510688792576".into();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_non_numeric_user_id() {
    let mut config = LanyardConfig::default();
    config.presence.user_id = "alice".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("presence.user_id"));
}

#[test]
fn catches_http_socket_url() {
    let mut config = LanyardConfig::default();
    config.presence.socket_url = "https://api.lanyard.rest/socket".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("presence.socket_url"));
}

#[test]
fn catches_trailing_slash_on_api_base() {
    let mut config = LanyardConfig::default();
    config.presence.api_base = "https://api.lanyard.rest/".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("presence.api_base"));
}

#[test]
fn catches_zero_timeout() {
    let mut config = LanyardConfig::default();
    config.presence.connect_timeout_secs = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("presence.connect_timeout_secs"));
}

#[test]
fn catches_base_delay_above_max() {
    let mut config = LanyardConfig::default();
    config.presence.reconnect_delay_ms = 20_000;
    config.presence.max_reconnect_delay_ms = 10_000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("exceeds presence.max_reconnect_delay_ms"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = LanyardConfig::default();
    config.presence.request_timeout_secs = 500;
    config.presence.reconnect_delay_ms = 1;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("presence.request_timeout_secs"));
    assert!(err.contains("presence.reconnect_delay_ms"));
    assert!(err.contains("; "));
}
