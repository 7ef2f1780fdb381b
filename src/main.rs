use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use fraud_pipeline::config::AppConfig;
use fraud_pipeline::decisions::processor::{CommerceActions, DecisionProcessor};
use fraud_pipeline::AppState;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Stand-in for the host commerce subsystem: logs each remediation call.
/// Deployments wire a real `CommerceActions` implementation instead.
struct LogOnlyCommerce;

#[async_trait::async_trait]
impl CommerceActions for LogOnlyCommerce {
    async fn block_purchases(&self, subject_id: &str) -> Result<()> {
        tracing::info!(subject_id, "would block purchases");
        Ok(())
    }

    async fn unblock_purchases(&self, subject_id: &str) -> Result<()> {
        tracing::info!(subject_id, "would unblock purchases");
        Ok(())
    }

    async fn void_and_refund_orders(&self, subject_id: &str) -> Result<()> {
        tracing::info!(subject_id, "would void and refund orders");
        Ok(())
    }

    async fn cancel_subscriptions(&self, subject_id: &str) -> Result<()> {
        tracing::info!(subject_id, "would cancel subscriptions");
        Ok(())
    }

    async fn revoke_licenses(&self, subject_id: &str) -> Result<()> {
        tracing::info!(subject_id, "would revoke licenses");
        Ok(())
    }

    async fn show_abuse_error(&self, subject_id: &str) -> Result<()> {
        tracing::info!(subject_id, "would show abuse error");
        Ok(())
    }

    async fn force_logout(&self, subject_id: &str) -> Result<()> {
        tracing::info!(subject_id, "would force logout");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();
    if cfg.webhook_secret.is_empty() {
        tracing::warn!("SIFT_WEBHOOK_SECRET is empty, decision webhook will reject everything");
    }

    let state = AppState {
        processor: DecisionProcessor::new(Arc::new(LogOnlyCommerce)),
        webhook_secret: cfg.webhook_secret.clone(),
    };

    let app = Router::new()
        .route("/health", get(fraud_pipeline::http::handlers::webhook::health))
        .route(
            "/webhooks/decisions",
            post(fraud_pipeline::http::handlers::webhook::receive_decision),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
