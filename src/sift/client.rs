use crate::config::AppConfig;
use crate::domain::decision::Decision;
use crate::domain::event::Properties;
use anyhow::Result;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Sift-style event API acknowledgement. `status` 0 means accepted;
/// anything else carries an error message.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackResponse {
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl TrackResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 0
    }
}

/// Abstract risk-service client the dispatcher and decision lookup depend
/// on; the HTTP implementation below is the only production one.
#[async_trait::async_trait]
pub trait RiskClient: Send + Sync {
    async fn track(&self, event_type: &str, properties: Properties) -> Result<TrackResponse>;
    async fn get_decisions(&self, subject_id: &str) -> Result<Vec<Decision>>;
}

/// reqwest-backed client for the Sift REST API. Built once from config and
/// immutable afterwards.
pub struct SiftHttpClient {
    pub base_url: String,
    pub account_id: String,
    api_key: String,
    client: reqwest::Client,
}

impl SiftHttpClient {
    /// Returns `None` when credentials are missing; callers treat that as a
    /// configuration error and abort the dispatch cycle.
    pub fn from_config(cfg: &AppConfig) -> Option<Self> {
        if cfg.api_key.is_empty() || cfg.account_id.is_empty() {
            return None;
        }
        Some(Self {
            base_url: cfg.api_base_url.clone(),
            account_id: cfg.account_id.clone(),
            api_key: cfg.api_key.clone(),
            client: reqwest::Client::new(),
        })
    }
}

#[async_trait::async_trait]
impl RiskClient for SiftHttpClient {
    async fn track(&self, event_type: &str, properties: Properties) -> Result<TrackResponse> {
        let mut body = properties;
        body.insert("$type".to_string(), Value::String(event_type.to_string()));
        body.insert("$api_key".to_string(), Value::String(self.api_key.clone()));

        let resp = self
            .client
            .post(format!("{}/v205/events", self.base_url))
            .json(&body)
            .send()
            .await?;
        let ack: TrackResponse = resp.json().await?;
        Ok(ack)
    }

    async fn get_decisions(&self, subject_id: &str) -> Result<Vec<Decision>> {
        let url = format!(
            "{}/v3/accounts/{}/users/{}/decisions",
            self.base_url, self.account_id, subject_id
        );
        let resp = self
            .client
            .get(url)
            .basic_auth(&self.api_key, None::<&str>)
            .send()
            .await?;
        let body: DecisionsResponse = resp.json().await?;
        Ok(parse_decisions(subject_id, body))
    }
}

#[derive(Debug, Deserialize)]
struct DecisionsResponse {
    #[serde(default)]
    decisions: serde_json::Map<String, Value>,
}

/// Flattens the per-abuse-type decision map the decisions API returns into
/// plain `Decision` values for the subject that was queried.
fn parse_decisions(subject_id: &str, body: DecisionsResponse) -> Vec<Decision> {
    let mut out = Vec::new();
    for (_abuse_type, entry) in body.decisions {
        let Some(id) = entry
            .get("decision")
            .and_then(|d| d.get("id"))
            .and_then(|v| v.as_str())
        else {
            continue;
        };
        let time = entry
            .get("time")
            .and_then(|v| v.as_i64())
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
            .unwrap_or_else(Utc::now);
        out.push(Decision {
            id: id.to_string(),
            entity_type: crate::domain::decision::USER_ENTITY.to_string(),
            entity_id: subject_id.to_string(),
            time,
        });
    }
    out
}
