use crate::domain::decision::Decision;
use crate::AppState;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use subtle::ConstantTimeEq;

/// Wire name `X-Sift-Science-Signature`; kept lowercase for HeaderMap use.
pub const SIGNATURE_HEADER: &str = "x-sift-science-signature";

#[derive(Debug, Deserialize)]
pub struct DecisionWebhookPayload {
    pub decision: DecisionRef,
    pub entity: EntityRef,
    #[serde(default)]
    pub time: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DecisionRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct EntityRef {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub id: String,
}

/// Inbound decision webhook. The signature header is compared in constant
/// time against the shared secret before the body is even parsed.
pub async fn receive_decision(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let provided = headers
        .get(SIGNATURE_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");
    if state.webhook_secret.is_empty() || !constant_time_eq(provided, &state.webhook_secret) {
        tracing::warn!("decision webhook rejected: bad signature");
        return StatusCode::UNAUTHORIZED;
    }

    let payload: DecisionWebhookPayload = match serde_json::from_str(&body) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!("decision webhook body unparseable: {err}");
            return StatusCode::BAD_REQUEST;
        }
    };

    let decision = Decision {
        id: payload.decision.id,
        entity_type: payload.entity.entity_type,
        entity_id: payload.entity.id,
        time: payload
            .time
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
            .unwrap_or_else(Utc::now),
    };
    state.processor.apply_decision(&decision).await;

    StatusCode::NO_CONTENT
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
