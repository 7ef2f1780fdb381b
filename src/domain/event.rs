use chrono::{DateTime, Utc};
use serde_json::Value;

/// Keys carrying this prefix are schema-governed; everything else is a
/// free-form extension key and passes through validation untouched.
pub const RESERVED_PREFIX: char = '$';

/// Insertion-ordered property map (serde_json with `preserve_order`).
pub type Properties = serde_json::Map<String, Value>;

pub fn is_reserved(key: &str) -> bool {
    key.starts_with(RESERVED_PREFIX)
}

#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: String,
    pub properties: Properties,
    pub enqueued_at: DateTime<Utc>,
}

pub mod event_types {
    pub const ADD_ITEM_TO_CART: &str = "$add_item_to_cart";
    pub const REMOVE_ITEM_FROM_CART: &str = "$remove_item_from_cart";
    pub const CREATE_ORDER: &str = "$create_order";
    pub const UPDATE_ORDER: &str = "$update_order";
    pub const ORDER_STATUS: &str = "$order_status";
    pub const TRANSACTION: &str = "$transaction";
    pub const LOGIN: &str = "$login";
    pub const LOGOUT: &str = "$logout";
    pub const CREATE_ACCOUNT: &str = "$create_account";
    pub const UPDATE_ACCOUNT: &str = "$update_account";
    pub const CHARGEBACK: &str = "$chargeback";

    pub const ALL: &[&str] = &[
        ADD_ITEM_TO_CART,
        REMOVE_ITEM_FROM_CART,
        CREATE_ORDER,
        UPDATE_ORDER,
        ORDER_STATUS,
        TRANSACTION,
        LOGIN,
        LOGOUT,
        CREATE_ACCOUNT,
        UPDATE_ACCOUNT,
        CHARGEBACK,
    ];
}
