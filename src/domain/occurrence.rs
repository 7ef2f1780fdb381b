//! Typed occurrence data handed over by the host commerce platform, plus
//! the property builders that turn it into reserved-prefixed event maps.
//! Builders apply micros scaling, E.164 canonicalization and gateway
//! normalization before anything reaches the validator.

use crate::domain::amount::micros;
use crate::domain::event::Properties;
use crate::gateways::{AdapterRegistry, ChargeDetails};
use crate::phone;
use chrono::Utc;
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct CartItem {
    pub item_id: String,
    pub title: String,
    pub price: f64,
    pub currency: String,
    pub quantity: Option<i64>,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub enum ShippingMethod {
    Electronic,
    Physical,
}

impl ShippingMethod {
    fn as_property(self) -> &'static str {
        match self {
            Self::Electronic => "$electronic",
            Self::Physical => "$physical",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Address {
    pub name: Option<String>,
    pub line1: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub zipcode: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PaymentData {
    pub gateway_id: String,
    pub charge: ChargeDetails,
}

#[derive(Debug, Clone)]
pub struct OrderData {
    pub order_id: String,
    pub user_id: Option<String>,
    pub session_id: Option<String>,
    pub amount: f64,
    pub currency: String,
    pub items: Vec<CartItem>,
    pub payments: Vec<PaymentData>,
    pub shipping_method: ShippingMethod,
    pub billing_address: Option<Address>,
    pub ip: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub enum LoginFailure {
    AccountUnknown,
    AccountSuspended,
    AccountDisabled,
    WrongPassword,
}

impl LoginFailure {
    fn as_property(self) -> &'static str {
        match self {
            Self::AccountUnknown => "$account_unknown",
            Self::AccountSuspended => "$account_suspended",
            Self::AccountDisabled => "$account_disabled",
            Self::WrongPassword => "$wrong_password",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoginData {
    pub user_id: Option<String>,
    pub session_id: Option<String>,
    pub username: String,
    pub success: bool,
    pub failure_reason: Option<LoginFailure>,
    pub ip: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub enum TransactionKind {
    Sale,
    Authorize,
    Capture,
    Void,
    Refund,
}

impl TransactionKind {
    fn as_property(self) -> &'static str {
        match self {
            Self::Sale => "$sale",
            Self::Authorize => "$authorize",
            Self::Capture => "$capture",
            Self::Void => "$void",
            Self::Refund => "$refund",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransactionData {
    pub user_id: String,
    pub order_id: String,
    pub amount: f64,
    pub currency: String,
    pub kind: TransactionKind,
    pub success: bool,
    pub payment: Option<PaymentData>,
}

#[derive(Debug, Clone, Copy)]
pub enum ChargebackReason {
    Fraud,
    Duplicate,
    ProductNotReceived,
    ProductUnacceptable,
    Other,
}

impl ChargebackReason {
    fn as_property(self) -> &'static str {
        match self {
            Self::Fraud => "$fraud",
            Self::Duplicate => "$duplicate",
            Self::ProductNotReceived => "$product_not_received",
            Self::ProductUnacceptable => "$product_unacceptable",
            Self::Other => "$other",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChargebackData {
    pub order_id: String,
    pub user_id: String,
    pub reason: ChargebackReason,
    pub ip: Option<String>,
}

fn base_properties(user_id: Option<&str>, session_id: Option<&str>, ip: Option<&str>) -> Properties {
    let mut props = Properties::new();
    if let Some(user_id) = user_id {
        props.insert("$user_id".to_string(), json!(user_id));
    }
    if let Some(session_id) = session_id {
        props.insert("$session_id".to_string(), json!(session_id));
    }
    if let Some(ip) = ip {
        props.insert("$ip".to_string(), json!(ip));
    }
    props.insert("$time".to_string(), json!(Utc::now().timestamp_millis()));
    props
}

fn item_value(item: &CartItem) -> Value {
    let mut map = Properties::new();
    map.insert("$item_id".to_string(), json!(item.item_id));
    map.insert("$product_title".to_string(), json!(item.title));
    map.insert("$price".to_string(), json!(micros(item.price, &item.currency)));
    map.insert("$currency_code".to_string(), json!(item.currency));
    if let Some(quantity) = item.quantity {
        map.insert("$quantity".to_string(), json!(quantity));
    }
    if let Some(category) = &item.category {
        map.insert("$category".to_string(), json!(category));
    }
    if !item.tags.is_empty() {
        map.insert("$tags".to_string(), json!(item.tags));
    }
    Value::Object(map)
}

fn address_value(address: &Address) -> Value {
    let mut map = Properties::new();
    if let Some(name) = &address.name {
        map.insert("$name".to_string(), json!(name));
    }
    if let Some(line1) = &address.line1 {
        map.insert("$address_1".to_string(), json!(line1));
    }
    if let Some(city) = &address.city {
        map.insert("$city".to_string(), json!(city));
    }
    if let Some(region) = &address.region {
        map.insert("$region".to_string(), json!(region));
    }
    if let Some(country) = &address.country {
        map.insert("$country".to_string(), json!(country));
    }
    if let Some(zipcode) = &address.zipcode {
        map.insert("$zipcode".to_string(), json!(zipcode));
    }
    // Canonicalize when the number parses; otherwise pass the raw string,
    // which only has to satisfy the loose phone check. A parsed number also
    // fills in $country from its calling code when the host supplied none.
    if let Some(raw) = &address.phone {
        match phone::parse(raw) {
            Some(parsed) => {
                if address.country.is_none() {
                    if let Some(region) = phone::region_of(&parsed.calling_code) {
                        map.insert("$country".to_string(), json!(region));
                    }
                }
                map.insert("$phone".to_string(), json!(parsed.to_string()));
            }
            None => {
                map.insert("$phone".to_string(), json!(raw.clone()));
            }
        }
    }
    Value::Object(map)
}

pub fn build_add_item_to_cart(
    user_id: Option<&str>,
    session_id: Option<&str>,
    ip: Option<&str>,
    item: &CartItem,
) -> Properties {
    let mut props = base_properties(user_id, session_id, ip);
    props.insert("$item".to_string(), item_value(item));
    props
}

pub fn build_order(order: &OrderData, adapters: &AdapterRegistry) -> Properties {
    let mut props = base_properties(
        order.user_id.as_deref(),
        order.session_id.as_deref(),
        order.ip.as_deref(),
    );
    props.insert("$order_id".to_string(), json!(order.order_id));
    props.insert("$amount".to_string(), json!(micros(order.amount, &order.currency)));
    props.insert("$currency_code".to_string(), json!(order.currency));
    props.insert(
        "$items".to_string(),
        Value::Array(order.items.iter().map(item_value).collect()),
    );
    props.insert(
        "$payment_methods".to_string(),
        Value::Array(
            order
                .payments
                .iter()
                .map(|p| Value::Object(adapters.normalize(&p.gateway_id, &p.charge).to_properties()))
                .collect(),
        ),
    );
    props.insert(
        "$shipping_method".to_string(),
        json!(order.shipping_method.as_property()),
    );
    if let Some(address) = &order.billing_address {
        props.insert("$billing_address".to_string(), address_value(address));
    }
    props
}

pub fn build_login(login: &LoginData) -> Properties {
    let mut props = base_properties(
        login.user_id.as_deref(),
        login.session_id.as_deref(),
        login.ip.as_deref(),
    );
    props.insert(
        "$login_status".to_string(),
        json!(if login.success { "$success" } else { "$failure" }),
    );
    props.insert("$username".to_string(), json!(login.username));
    if let Some(reason) = login.failure_reason {
        props.insert("$failure_reason".to_string(), json!(reason.as_property()));
    }
    props
}

pub fn build_transaction(tx: &TransactionData, adapters: &AdapterRegistry) -> Properties {
    let mut props = base_properties(Some(&tx.user_id), None, None);
    props.insert("$amount".to_string(), json!(micros(tx.amount, &tx.currency)));
    props.insert("$currency_code".to_string(), json!(tx.currency));
    props.insert("$order_id".to_string(), json!(tx.order_id));
    props.insert("$transaction_type".to_string(), json!(tx.kind.as_property()));
    props.insert(
        "$transaction_status".to_string(),
        json!(if tx.success { "$success" } else { "$failure" }),
    );
    if let Some(payment) = &tx.payment {
        props.insert(
            "$payment_method".to_string(),
            Value::Object(adapters.normalize(&payment.gateway_id, &payment.charge).to_properties()),
        );
    }
    props
}

pub fn build_chargeback(chargeback: &ChargebackData) -> Properties {
    let mut props = base_properties(Some(&chargeback.user_id), None, chargeback.ip.as_deref());
    props.insert("$order_id".to_string(), json!(chargeback.order_id));
    props.insert(
        "$chargeback_reason".to_string(),
        json!(chargeback.reason.as_property()),
    );
    props
}
