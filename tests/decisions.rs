use anyhow::{bail, Result};
use chrono::Utc;
use fraud_pipeline::decisions::processor::{CommerceActions, DecisionProcessor};
use fraud_pipeline::domain::decision::{AbuseAction, Decision};
use std::sync::{Arc, Mutex};

struct RecordingCommerce {
    calls: Mutex<Vec<String>>,
    failing_step: Option<&'static str>,
}

impl RecordingCommerce {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            failing_step: None,
        })
    }

    fn failing_at(step: &'static str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            failing_step: Some(step),
        })
    }

    fn record(&self, step: &'static str, subject_id: &str) -> Result<()> {
        self.calls.lock().unwrap().push(format!("{step}:{subject_id}"));
        if self.failing_step == Some(step) {
            bail!("{step} failed");
        }
        Ok(())
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CommerceActions for RecordingCommerce {
    async fn block_purchases(&self, subject_id: &str) -> Result<()> {
        self.record("block", subject_id)
    }
    async fn unblock_purchases(&self, subject_id: &str) -> Result<()> {
        self.record("unblock", subject_id)
    }
    async fn void_and_refund_orders(&self, subject_id: &str) -> Result<()> {
        self.record("void", subject_id)
    }
    async fn cancel_subscriptions(&self, subject_id: &str) -> Result<()> {
        self.record("cancel", subject_id)
    }
    async fn revoke_licenses(&self, subject_id: &str) -> Result<()> {
        self.record("revoke", subject_id)
    }
    async fn show_abuse_error(&self, subject_id: &str) -> Result<()> {
        self.record("error", subject_id)
    }
    async fn force_logout(&self, subject_id: &str) -> Result<()> {
        self.record("logout", subject_id)
    }
}

#[tokio::test]
async fn trust_list_only_unblocks() {
    let commerce = RecordingCommerce::new();
    let processor = DecisionProcessor::new(commerce.clone());

    let action = processor.apply("trust_list_payment_abuse", "42").await;
    assert_eq!(action, AbuseAction::Unblock);
    assert_eq!(commerce.calls(), vec!["unblock:42".to_string()]);
}

#[tokio::test]
async fn fraud_runs_the_full_bundle_in_order() {
    let commerce = RecordingCommerce::new();
    let processor = DecisionProcessor::new(commerce.clone());

    processor.apply("fraud_payment_abuse", "7").await;
    assert_eq!(
        commerce.calls(),
        vec![
            "block:7".to_string(),
            "void:7".to_string(),
            "cancel:7".to_string(),
            "revoke:7".to_string(),
            "error:7".to_string(),
            "logout:7".to_string(),
        ]
    );
}

#[tokio::test]
async fn a_failing_step_does_not_stop_the_bundle() {
    let commerce = RecordingCommerce::failing_at("void");
    let processor = DecisionProcessor::new(commerce.clone());

    processor.apply("likely_fraud_refundno_renew_payment_abuse", "9").await;
    assert_eq!(
        commerce.calls(),
        vec![
            "block:9".to_string(),
            "void:9".to_string(),
            "cancel:9".to_string(),
            "revoke:9".to_string(),
            "error:9".to_string(),
        ]
    );
}

#[tokio::test]
async fn keep_purchases_blocks_without_voiding() {
    let commerce = RecordingCommerce::new();
    let processor = DecisionProcessor::new(commerce.clone());

    processor.apply("likely_fraud_keep_purchases_payment_abuse", "5").await;
    assert_eq!(
        commerce.calls(),
        vec!["block:5".to_string(), "error:5".to_string()]
    );
}

#[tokio::test]
async fn unknown_decision_id_touches_nothing() {
    let commerce = RecordingCommerce::new();
    let processor = DecisionProcessor::new(commerce.clone());

    let action = processor.apply("unknown_id", "1").await;
    assert_eq!(action, AbuseAction::Unhandled);
    assert!(commerce.calls().is_empty());
}

#[tokio::test]
async fn advisory_content_decisions_are_unhandled() {
    let commerce = RecordingCommerce::new();
    let processor = DecisionProcessor::new(commerce.clone());

    for id in ["looks_ok", "looks_suspicious", "order_looks_ok", "order_looks_suspicious"] {
        let action = processor.apply(id, "3").await;
        assert_eq!(action, AbuseAction::Unhandled);
    }
    assert!(commerce.calls().is_empty());
}

#[tokio::test]
async fn non_user_entities_are_dropped() {
    let commerce = RecordingCommerce::new();
    let processor = DecisionProcessor::new(commerce.clone());

    let decision = Decision {
        id: "fraud_payment_abuse".to_string(),
        entity_type: "order".to_string(),
        entity_id: "o-1".to_string(),
        time: Utc::now(),
    };
    let action = processor.apply_decision(&decision).await;
    assert_eq!(action, AbuseAction::Unhandled);
    assert!(commerce.calls().is_empty());
}
