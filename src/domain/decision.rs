use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Entity type the remediation state machine acts on. Decisions against
/// anything else are logged and dropped.
pub const USER_ENTITY: &str = "user";

/// A verdict returned by the risk service for one subject, either parsed
/// from a webhook delivery or fetched after a dispatch cycle.
#[derive(Debug, Clone, Deserialize)]
pub struct Decision {
    pub id: String,
    pub entity_type: String,
    pub entity_id: String,
    pub time: DateTime<Utc>,
}

/// Named remediation bundle resolved from a decision id. One dispatch table
/// serves both the webhook path and the post-dispatch lookup path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbuseAction {
    Unblock,
    BlockAndVoidAndCancelAndRevoke,
    BlockAndKeep,
    BlockAndVoidAndCancelAndRevokeAndLogout,
    BlockOnly,
    Unhandled,
}

impl AbuseAction {
    pub fn from_decision_id(id: &str) -> Self {
        match id {
            "trust_list_payment_abuse"
            | "looks_good_payment_abuse"
            | "not_likely_fraud_payment_abuse" => Self::Unblock,
            "likely_fraud_refundno_renew_payment_abuse" => Self::BlockAndVoidAndCancelAndRevoke,
            "likely_fraud_keep_purchases_payment_abuse" => Self::BlockAndKeep,
            "fraud_payment_abuse" => Self::BlockAndVoidAndCancelAndRevokeAndLogout,
            "block_wo_review_payment_abuse" => Self::BlockOnly,
            _ => Self::Unhandled,
        }
    }
}
