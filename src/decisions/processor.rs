use crate::domain::decision::{AbuseAction, Decision, USER_ENTITY};
use anyhow::Result;
use std::sync::Arc;

/// Remediation surface of the commerce subsystem. Every call is idempotent
/// on the host side and best-effort here.
#[async_trait::async_trait]
pub trait CommerceActions: Send + Sync {
    async fn block_purchases(&self, subject_id: &str) -> Result<()>;
    async fn unblock_purchases(&self, subject_id: &str) -> Result<()>;
    async fn void_and_refund_orders(&self, subject_id: &str) -> Result<()>;
    async fn cancel_subscriptions(&self, subject_id: &str) -> Result<()>;
    async fn revoke_licenses(&self, subject_id: &str) -> Result<()>;
    async fn show_abuse_error(&self, subject_id: &str) -> Result<()>;
    async fn force_logout(&self, subject_id: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct DecisionProcessor {
    pub commerce: Arc<dyn CommerceActions>,
}

impl DecisionProcessor {
    pub fn new(commerce: Arc<dyn CommerceActions>) -> Self {
        Self { commerce }
    }

    /// Webhook entry point: decisions for anything other than a user are
    /// logged and dropped without touching the commerce subsystem.
    pub async fn apply_decision(&self, decision: &Decision) -> AbuseAction {
        if decision.entity_type != USER_ENTITY {
            tracing::warn!(
                decision_id = %decision.id,
                entity_type = %decision.entity_type,
                "decision for unsupported entity type, dropping"
            );
            return AbuseAction::Unhandled;
        }
        self.apply(&decision.id, &decision.entity_id).await
    }

    /// Runs the remediation bundle for a decision id. Steps are independent:
    /// one failing side effect never prevents the remaining steps.
    pub async fn apply(&self, decision_id: &str, subject_id: &str) -> AbuseAction {
        let action = AbuseAction::from_decision_id(decision_id);
        tracing::info!(decision_id, subject_id, action = ?action, "applying decision");

        match action {
            AbuseAction::Unblock => {
                self.step("unblock_purchases", subject_id, self.commerce.unblock_purchases(subject_id).await);
            }
            AbuseAction::BlockAndVoidAndCancelAndRevoke => {
                self.step("block_purchases", subject_id, self.commerce.block_purchases(subject_id).await);
                self.step("void_and_refund_orders", subject_id, self.commerce.void_and_refund_orders(subject_id).await);
                self.step("cancel_subscriptions", subject_id, self.commerce.cancel_subscriptions(subject_id).await);
                self.step("revoke_licenses", subject_id, self.commerce.revoke_licenses(subject_id).await);
                self.step("show_abuse_error", subject_id, self.commerce.show_abuse_error(subject_id).await);
            }
            AbuseAction::BlockAndKeep => {
                self.step("block_purchases", subject_id, self.commerce.block_purchases(subject_id).await);
                self.step("show_abuse_error", subject_id, self.commerce.show_abuse_error(subject_id).await);
            }
            AbuseAction::BlockAndVoidAndCancelAndRevokeAndLogout => {
                self.step("block_purchases", subject_id, self.commerce.block_purchases(subject_id).await);
                self.step("void_and_refund_orders", subject_id, self.commerce.void_and_refund_orders(subject_id).await);
                self.step("cancel_subscriptions", subject_id, self.commerce.cancel_subscriptions(subject_id).await);
                self.step("revoke_licenses", subject_id, self.commerce.revoke_licenses(subject_id).await);
                self.step("show_abuse_error", subject_id, self.commerce.show_abuse_error(subject_id).await);
                self.step("force_logout", subject_id, self.commerce.force_logout(subject_id).await);
            }
            AbuseAction::BlockOnly => {
                self.step("block_purchases", subject_id, self.commerce.block_purchases(subject_id).await);
            }
            AbuseAction::Unhandled => {
                tracing::info!(decision_id, "no remediation mapped for decision");
            }
        }

        action
    }

    fn step(&self, name: &str, subject_id: &str, result: Result<()>) {
        if let Err(err) = result {
            tracing::warn!(step = name, subject_id, "remediation step failed: {err:#}");
        }
    }
}
