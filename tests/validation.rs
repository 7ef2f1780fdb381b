use fraud_pipeline::domain::event::{event_types, Properties};
use fraud_pipeline::schema::SchemaRegistry;
use serde_json::json;

fn props(value: serde_json::Value) -> Properties {
    value.as_object().cloned().unwrap()
}

#[test]
fn every_event_type_rejects_undeclared_reserved_keys() {
    let registry = SchemaRegistry::new();
    for event_type in event_types::ALL {
        let mut properties = props(json!({"$user_id": "u1"}));
        properties.insert("$definitely_not_declared".to_string(), json!("x"));
        let err = registry.validate(event_type, &properties).unwrap_err();
        assert_eq!(err.field, "$definitely_not_declared", "event type {event_type}");
    }
}

#[test]
fn cart_and_order_need_a_session_or_a_user() {
    let registry = SchemaRegistry::new();

    let cart = props(json!({
        "$item": {"$item_id": "sku-1", "$product_title": "Widget", "$price": 10_000}
    }));
    assert!(registry.validate(event_types::ADD_ITEM_TO_CART, &cart).is_err());

    let order = props(json!({"$order_id": "o-1", "$amount": 10_000, "$currency_code": "USD"}));
    assert!(registry.validate(event_types::CREATE_ORDER, &order).is_err());

    let mut with_session = order.clone();
    with_session.insert("$session_id".to_string(), json!("s-1"));
    registry
        .validate(event_types::CREATE_ORDER, &with_session)
        .unwrap();
}

#[test]
fn app_and_browser_cannot_both_be_present() {
    let registry = SchemaRegistry::new();
    for event_type in event_types::ALL {
        let properties = props(json!({
            "$user_id": "u1",
            "$order_id": "o-1",
            "$order_status": "$approved",
            "$login_status": "$success",
            "$app": {"$os": "iOS"},
            "$browser": {"$user_agent": "UA"}
        }));
        // strip the fields other event types do not declare
        let mut trimmed = Properties::new();
        let schema_less = ["$user_id", "$app", "$browser"];
        for key in schema_less {
            trimmed.insert(key.to_string(), properties[key].clone());
        }
        if *event_type == event_types::ORDER_STATUS || *event_type == event_types::CHARGEBACK {
            trimmed.insert("$order_id".to_string(), json!("o-1"));
        }
        if *event_type == event_types::ADD_ITEM_TO_CART
            || *event_type == event_types::REMOVE_ITEM_FROM_CART
        {
            trimmed.insert(
                "$item".to_string(),
                json!({"$item_id": "sku-1", "$product_title": "Widget", "$price": 10_000}),
            );
        }
        if *event_type == event_types::CREATE_ORDER || *event_type == event_types::UPDATE_ORDER {
            trimmed.insert("$order_id".to_string(), json!("o-1"));
            trimmed.insert("$amount".to_string(), json!(10_000));
            trimmed.insert("$currency_code".to_string(), json!("USD"));
        }
        if *event_type == event_types::ORDER_STATUS {
            trimmed.insert("$order_status".to_string(), json!("$approved"));
        }
        if *event_type == event_types::LOGIN {
            trimmed.insert("$login_status".to_string(), json!("$success"));
        }
        if *event_type == event_types::TRANSACTION {
            trimmed.insert("$amount".to_string(), json!(10_000));
            trimmed.insert("$currency_code".to_string(), json!("USD"));
            trimmed.insert("$transaction_type".to_string(), json!("$sale"));
            trimmed.insert("$transaction_status".to_string(), json!("$success"));
        }
        let err = registry.validate(event_type, &trimmed).unwrap_err();
        assert!(
            err.reason.contains("cannot have both"),
            "event type {event_type}: {err}"
        );
    }
}

#[test]
fn cart_events_require_an_item() {
    let registry = SchemaRegistry::new();
    let properties = props(json!({"$user_id": "u1"}));
    for event_type in [event_types::ADD_ITEM_TO_CART, event_types::REMOVE_ITEM_FROM_CART] {
        let err = registry.validate(event_type, &properties).unwrap_err();
        assert_eq!(err.field, "$item", "event type {event_type}");
        assert_eq!(err.reason, "required field is missing");
    }
}

#[test]
fn orders_require_id_amount_and_currency() {
    let registry = SchemaRegistry::new();

    let err = registry
        .validate(event_types::CREATE_ORDER, &props(json!({"$user_id": "u1"})))
        .unwrap_err();
    assert_eq!(err.field, "$order_id");
    assert_eq!(err.reason, "required field is missing");

    let partial = props(json!({"$user_id": "u1", "$order_id": "o-1", "$amount": 10_000}));
    let err = registry
        .validate(event_types::UPDATE_ORDER, &partial)
        .unwrap_err();
    assert_eq!(err.field, "$currency_code");
}

#[test]
fn failure_reports_the_offending_field_path() {
    let registry = SchemaRegistry::new();
    let properties = props(json!({
        "$user_id": "u1",
        "$items": [
            {"$item_id": "ok-1", "$product_title": "Widget", "$price": 10_000},
            {"$item_id": "bad id", "$product_title": "Gadget", "$price": 20_000}
        ]
    }));
    let err = registry.validate(event_types::CREATE_ORDER, &properties).unwrap_err();
    assert_eq!(err.field, "$items[1].$item_id");
}

#[test]
fn item_required_fields_are_enforced() {
    let registry = SchemaRegistry::new();
    let properties = props(json!({
        "$user_id": "u1",
        "$item": {"$item_id": "sku-1", "$product_title": "Widget"}
    }));
    let err = registry
        .validate(event_types::ADD_ITEM_TO_CART, &properties)
        .unwrap_err();
    assert_eq!(err.field, "$item.$price");
    assert_eq!(err.reason, "required field is missing");
}
