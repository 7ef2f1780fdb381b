use anyhow::Result;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use fraud_pipeline::decisions::processor::{CommerceActions, DecisionProcessor};
use fraud_pipeline::http::handlers::webhook::{receive_decision, SIGNATURE_HEADER};
use fraud_pipeline::AppState;
use serde_json::json;
use std::sync::{Arc, Mutex};

struct RecordingCommerce {
    calls: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl CommerceActions for RecordingCommerce {
    async fn block_purchases(&self, subject_id: &str) -> Result<()> {
        self.calls.lock().unwrap().push(format!("block:{subject_id}"));
        Ok(())
    }
    async fn unblock_purchases(&self, subject_id: &str) -> Result<()> {
        self.calls.lock().unwrap().push(format!("unblock:{subject_id}"));
        Ok(())
    }
    async fn void_and_refund_orders(&self, subject_id: &str) -> Result<()> {
        self.calls.lock().unwrap().push(format!("void:{subject_id}"));
        Ok(())
    }
    async fn cancel_subscriptions(&self, subject_id: &str) -> Result<()> {
        self.calls.lock().unwrap().push(format!("cancel:{subject_id}"));
        Ok(())
    }
    async fn revoke_licenses(&self, subject_id: &str) -> Result<()> {
        self.calls.lock().unwrap().push(format!("revoke:{subject_id}"));
        Ok(())
    }
    async fn show_abuse_error(&self, subject_id: &str) -> Result<()> {
        self.calls.lock().unwrap().push(format!("error:{subject_id}"));
        Ok(())
    }
    async fn force_logout(&self, subject_id: &str) -> Result<()> {
        self.calls.lock().unwrap().push(format!("logout:{subject_id}"));
        Ok(())
    }
}

fn state_with_secret(secret: &str) -> (AppState, Arc<RecordingCommerce>) {
    let commerce = Arc::new(RecordingCommerce {
        calls: Mutex::new(Vec::new()),
    });
    let state = AppState {
        processor: DecisionProcessor::new(commerce.clone()),
        webhook_secret: secret.to_string(),
    };
    (state, commerce)
}

fn signed_headers(signature: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(SIGNATURE_HEADER, signature.parse().unwrap());
    headers
}

fn decision_body() -> String {
    json!({
        "decision": {"id": "block_wo_review_payment_abuse"},
        "entity": {"type": "user", "id": "u7"},
        "time": 1_700_000_000_000i64
    })
    .to_string()
}

#[tokio::test]
async fn bad_signature_is_rejected_before_the_body_is_parsed() {
    let (state, commerce) = state_with_secret("s3cr3t");
    // deliberately unparseable body: it must never be looked at
    let response = receive_decision(State(state), signed_headers("wrong"), "{not json".to_string())
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(commerce.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_signature_header_is_rejected() {
    let (state, commerce) = state_with_secret("s3cr3t");
    let response = receive_decision(State(state), HeaderMap::new(), decision_body())
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(commerce.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn empty_configured_secret_rejects_everything() {
    let (state, commerce) = state_with_secret("");
    let response = receive_decision(State(state), signed_headers(""), decision_body())
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(commerce.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn valid_delivery_runs_the_remediation_bundle() {
    let (state, commerce) = state_with_secret("s3cr3t");
    let response = receive_decision(State(state), signed_headers("s3cr3t"), decision_body())
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(*commerce.calls.lock().unwrap(), vec!["block:u7".to_string()]);
}

#[tokio::test]
async fn unparseable_body_with_valid_signature_is_a_bad_request() {
    let (state, commerce) = state_with_secret("s3cr3t");
    let response = receive_decision(State(state), signed_headers("s3cr3t"), "[]".to_string())
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(commerce.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn non_user_entity_is_acknowledged_but_ignored() {
    let (state, commerce) = state_with_secret("s3cr3t");
    let body = json!({
        "decision": {"id": "fraud_payment_abuse"},
        "entity": {"type": "order", "id": "o-1"},
        "time": 1_700_000_000_000i64
    })
    .to_string();
    let response = receive_decision(State(state), signed_headers("s3cr3t"), body)
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(commerce.calls.lock().unwrap().is_empty());
}
