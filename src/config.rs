use crate::domain::event::event_types;
use std::collections::HashSet;

/// Per-event-type enable flags. `All` is the default; an explicit list
/// comes from the `ENABLED_EVENTS` environment variable.
#[derive(Debug, Clone)]
pub enum EventFlags {
    All,
    Only(HashSet<String>),
}

impl EventFlags {
    pub fn from_env_value(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Self::All;
        }
        let set: HashSet<String> = trimmed
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for name in &set {
            if !event_types::ALL.contains(&name.as_str()) {
                tracing::warn!(event_type = %name, "ENABLED_EVENTS names an unknown event type");
            }
        }
        Self::Only(set)
    }

    pub fn is_enabled(&self, event_type: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(set) => set.contains(event_type),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub account_id: String,
    pub api_key: String,
    pub beacon_key: String,
    pub webhook_secret: String,
    pub api_base_url: String,
    pub bind_addr: String,
    pub events: EventFlags,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            account_id: std::env::var("SIFT_ACCOUNT_ID").unwrap_or_default(),
            api_key: std::env::var("SIFT_API_KEY").unwrap_or_default(),
            beacon_key: std::env::var("SIFT_BEACON_KEY").unwrap_or_default(),
            webhook_secret: std::env::var("SIFT_WEBHOOK_SECRET").unwrap_or_default(),
            api_base_url: std::env::var("SIFT_API_BASE_URL")
                .unwrap_or_else(|_| "https://api.sift.com".to_string()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            events: EventFlags::from_env_value(
                &std::env::var("ENABLED_EVENTS").unwrap_or_default(),
            ),
        }
    }
}
