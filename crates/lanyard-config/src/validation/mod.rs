//! Full configuration validation.
//!
//! Each check pushes a message into a shared list; the orchestrator joins
//! them into a single `ConfigError`.

mod helpers;

#[cfg(test)]
mod tests;

use crate::schema::LanyardConfig;
use lanyard_common::ConfigError;

use helpers::{validate_range, validate_url_scheme};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &LanyardConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_presence(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// Validate presence constraints.
fn validate_presence(errors: &mut Vec<String>, config: &LanyardConfig) {
    let presence = &config.presence;

    validate_url_scheme(
        errors,
        "presence.api_base",
        &presence.api_base,
        &["http://", "https://"],
    );
    validate_url_scheme(
        errors,
        "presence.socket_url",
        &presence.socket_url,
        &["ws://", "wss://"],
    );
    if presence.api_base.ends_with('/') {
        errors.push("presence.api_base must not end with '/'".into());
    }
    if presence.user_id.chars().any(|c| !c.is_ascii_digit()) {
        errors.push(format!(
            "presence.user_id = {:?} must be a numeric Discord id",
            presence.user_id
        ));
    }

    validate_range(
        errors,
        "presence.request_timeout_secs",
        presence.request_timeout_secs,
        1,
        120,
    );
    validate_range(
        errors,
        "presence.connect_timeout_secs",
        presence.connect_timeout_secs,
        1,
        120,
    );
    validate_range(
        errors,
        "presence.reconnect_delay_ms",
        presence.reconnect_delay_ms,
        100,
        300_000,
    );
    validate_range(
        errors,
        "presence.max_reconnect_delay_ms",
        presence.max_reconnect_delay_ms,
        100,
        300_000,
    );
    if presence.reconnect_delay_ms > presence.max_reconnect_delay_ms {
        errors.push(format!(
            "presence.reconnect_delay_ms = {} exceeds presence.max_reconnect_delay_ms = {}",
            presence.reconnect_delay_ms, presence.max_reconnect_delay_ms
        ));
    }
}
