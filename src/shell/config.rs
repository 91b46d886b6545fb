// Service configuration read from the process environment.
//
// Every variable is optional; unset means the default below. A value that is set but
// cannot be parsed aborts startup instead of silently falling back.

use crate::adapters::broadcast::realtime_hub::DEFAULT_SUBSCRIBER_BUFFER;
use crate::core::event_store::DEFAULT_CAPACITY;
use crate::core::presence::DEFAULT_LIVENESS_WINDOW;
use crate::core::views::DEFAULT_ACTIVE_WINDOW;
use axum::http::HeaderValue;
use chrono::TimeDelta;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name}={value:?} is not valid: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdStrategy {
    Uuid,
    Sequential,
}

impl FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uuid" => Ok(IdStrategy::Uuid),
            "sequential" => Ok(IdStrategy::Sequential),
            other => Err(format!("unknown id strategy {other:?}, expected uuid or sequential")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub cors_origin: String,
    pub events_limit: usize,
    pub camera_online_window: TimeDelta,
    pub active_window: TimeDelta,
    pub live_updates: bool,
    pub subscriber_buffer: usize,
    pub id_strategy: IdStrategy,
    pub body_limit_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cors_origin: "*".to_string(),
            events_limit: DEFAULT_CAPACITY,
            camera_online_window: DEFAULT_LIVENESS_WINDOW,
            active_window: DEFAULT_ACTIVE_WINDOW,
            live_updates: true,
            subscriber_buffer: DEFAULT_SUBSCRIBER_BUFFER,
            id_strategy: IdStrategy::Uuid,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let events_limit: usize = parse(&lookup, "EVENTS_LIMIT", defaults.events_limit)?;
        if events_limit == 0 {
            return Err(invalid("EVENTS_LIMIT", "0", "must be at least 1"));
        }
        let subscriber_buffer: usize = parse(&lookup, "SUBSCRIBER_BUFFER", defaults.subscriber_buffer)?;
        if subscriber_buffer == 0 {
            return Err(invalid("SUBSCRIBER_BUFFER", "0", "must be at least 1"));
        }

        let cors_origin = lookup("CORS_ORIGIN").unwrap_or(defaults.cors_origin);
        if HeaderValue::from_str(&cors_origin).is_err() {
            return Err(invalid("CORS_ORIGIN", &cors_origin, "not a valid header value"));
        }

        Ok(Self {
            port: parse(&lookup, "PORT", defaults.port)?,
            cors_origin,
            events_limit,
            camera_online_window: parse_millis(&lookup, "CAMERA_ONLINE_MS", defaults.camera_online_window)?,
            active_window: parse_millis(&lookup, "ACTIVE_WINDOW_MS", defaults.active_window)?,
            live_updates: parse_flag(&lookup, "LIVE_UPDATES", defaults.live_updates)?,
            subscriber_buffer,
            id_strategy: parse(&lookup, "ID_STRATEGY", defaults.id_strategy)?,
            body_limit_bytes: parse(&lookup, "BODY_LIMIT_BYTES", defaults.body_limit_bytes)?,
        })
    }
}

fn invalid(name: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| invalid(name, &raw, e)),
        None => Ok(default),
    }
}

fn parse_millis(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: TimeDelta,
) -> Result<TimeDelta, ConfigError> {
    let millis: i64 = parse(lookup, name, default.num_milliseconds())?;
    if millis <= 0 {
        return Err(invalid(name, &millis.to_string(), "must be a positive number of milliseconds"));
    }
    Ok(TimeDelta::milliseconds(millis))
}

fn parse_flag(lookup: &impl Fn(&str) -> Option<String>, name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match lookup(name) {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(invalid(name, &raw, "expected true or false")),
        },
        None => Ok(default),
    }
}

#[cfg(test)]
mod app_config_tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[rstest]
    fn it_should_use_defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.events_limit, 50);
        assert_eq!(config.camera_online_window, TimeDelta::minutes(10));
        assert_eq!(config.active_window, TimeDelta::seconds(30));
    }

    #[rstest]
    fn it_should_read_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("CORS_ORIGIN", "https://dash.example"),
            ("EVENTS_LIMIT", "200"),
            ("CAMERA_ONLINE_MS", "60000"),
            ("LIVE_UPDATES", "off"),
            ("ID_STRATEGY", "Sequential"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origin, "https://dash.example");
        assert_eq!(config.events_limit, 200);
        assert_eq!(config.camera_online_window, TimeDelta::minutes(1));
        assert!(!config.live_updates);
        assert_eq!(config.id_strategy, IdStrategy::Sequential);
    }

    #[rstest]
    #[case("PORT", "not-a-port")]
    #[case("EVENTS_LIMIT", "0")]
    #[case("CAMERA_ONLINE_MS", "-5")]
    #[case("LIVE_UPDATES", "maybe")]
    #[case("ID_STRATEGY", "random")]
    #[case("SUBSCRIBER_BUFFER", "0")]
    #[case("CORS_ORIGIN", "https://bad\norigin")]
    fn it_should_reject_invalid_values(#[case] name: &str, #[case] value: &str) {
        let result = AppConfig::from_lookup(lookup_from(&[(name, value)]));
        assert!(
            matches!(result, Err(ConfigError::Invalid { name: n, .. }) if n == name),
            "{name}={value} should be rejected"
        );
    }
}
