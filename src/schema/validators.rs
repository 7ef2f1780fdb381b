use serde_json::Value;
use std::net::IpAddr;

fn as_str(value: &Value) -> Result<&str, String> {
    value.as_str().ok_or_else(|| "must be a string".to_string())
}

pub fn is_string(value: &Value) -> Result<(), String> {
    as_str(value).map(|_| ())
}

pub fn is_integer(value: &Value) -> Result<(), String> {
    if value.is_i64() || value.is_u64() {
        Ok(())
    } else {
        Err("must be an integer".to_string())
    }
}

pub fn is_boolean(value: &Value) -> Result<(), String> {
    if value.is_boolean() {
        Ok(())
    } else {
        Err("must be a boolean".to_string())
    }
}

/// Empty strings are tolerated; anything else must parse as IPv4 or IPv6.
pub fn valid_ip(value: &Value) -> Result<(), String> {
    let s = as_str(value)?;
    if s.is_empty() || s.parse::<IpAddr>().is_ok() {
        Ok(())
    } else {
        Err(format!("not a valid IP address: {s}"))
    }
}

/// ISO 3166 alpha-2: exactly two uppercase ASCII letters.
pub fn valid_country_code(value: &Value) -> Result<(), String> {
    let s = as_str(value)?;
    if s.len() == 2 && s.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(format!("not an ISO 3166 alpha-2 country code: {s}"))
    }
}

/// ISO 4217: exactly three uppercase ASCII letters.
pub fn valid_currency_code(value: &Value) -> Result<(), String> {
    let s = as_str(value)?;
    if s.len() == 3 && s.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(format!("not an ISO 4217 currency code: {s}"))
    }
}

/// Client language tags of the form `en-US`.
pub fn valid_language(value: &Value) -> Result<(), String> {
    let s = as_str(value)?;
    let bytes = s.as_bytes();
    let ok = bytes.len() == 5
        && bytes[0].is_ascii_lowercase()
        && bytes[1].is_ascii_lowercase()
        && bytes[2] == b'-'
        && bytes[3].is_ascii_uppercase()
        && bytes[4].is_ascii_uppercase();
    if ok {
        Ok(())
    } else {
        Err(format!("not a language tag like en-US: {s}"))
    }
}

/// Intentionally loose at this layer: non-empty and free of alphabetic
/// characters. Full E.164 canonicalization happens in the property builders.
pub fn loose_phone(value: &Value) -> Result<(), String> {
    let s = as_str(value)?;
    if s.is_empty() {
        return Err("phone number is empty".to_string());
    }
    if s.chars().any(|c| c.is_alphabetic()) {
        Err(format!("phone number contains letters: {s}"))
    } else {
        Ok(())
    }
}

/// Identifier charset shared by `$user_id`, `$session_id` and item ids.
pub fn valid_identifier(value: &Value) -> Result<(), String> {
    let s = as_str(value)?;
    let allowed =
        |c: char| c.is_ascii_alphanumeric() || "=.-_+@:&^%!$".contains(c);
    if !s.is_empty() && s.chars().all(allowed) {
        Ok(())
    } else {
        Err(format!("not a valid identifier: {s}"))
    }
}

fn one_of(value: &Value, allowed: &[&str]) -> Result<(), String> {
    let s = as_str(value)?;
    if allowed.contains(&s) {
        Ok(())
    } else {
        Err(format!("unsupported value: {s}"))
    }
}

pub fn valid_shipping_method(value: &Value) -> Result<(), String> {
    one_of(value, &["$electronic", "$physical"])
}

pub fn valid_transaction_type(value: &Value) -> Result<(), String> {
    one_of(
        value,
        &[
            "$sale",
            "$authorize",
            "$capture",
            "$void",
            "$refund",
            "$deposit",
            "$withdrawal",
            "$transfer",
        ],
    )
}

pub fn valid_transaction_status(value: &Value) -> Result<(), String> {
    one_of(value, &["$success", "$failure", "$pending"])
}

pub fn valid_login_status(value: &Value) -> Result<(), String> {
    one_of(value, &["$success", "$failure"])
}

pub fn valid_login_failure_reason(value: &Value) -> Result<(), String> {
    one_of(
        value,
        &[
            "$account_unknown",
            "$account_suspended",
            "$account_disabled",
            "$wrong_password",
        ],
    )
}

pub fn valid_chargeback_state(value: &Value) -> Result<(), String> {
    one_of(value, &["$received", "$accepted", "$disputed", "$won", "$lost"])
}

pub fn valid_chargeback_reason(value: &Value) -> Result<(), String> {
    one_of(
        value,
        &[
            "$fraud",
            "$duplicate",
            "$product_not_received",
            "$product_unacceptable",
            "$other",
        ],
    )
}

pub fn valid_order_status(value: &Value) -> Result<(), String> {
    one_of(
        value,
        &["$approved", "$canceled", "$held", "$fulfilled", "$returned"],
    )
}

pub fn valid_order_status_source(value: &Value) -> Result<(), String> {
    one_of(value, &["$automated", "$manual_review"])
}

pub fn valid_payment_type(value: &Value) -> Result<(), String> {
    let s = as_str(value)?;
    if crate::gateways::vocabulary::is_canonical_payment_type(s) {
        Ok(())
    } else {
        Err(format!("unsupported payment type: {s}"))
    }
}

pub fn valid_verification_status(value: &Value) -> Result<(), String> {
    let s = as_str(value)?;
    if crate::gateways::vocabulary::is_canonical_verification_status(s) {
        Ok(())
    } else {
        Err(format!("unsupported verification status: {s}"))
    }
}

pub fn valid_payment_gateway(value: &Value) -> Result<(), String> {
    let s = as_str(value)?;
    if crate::gateways::vocabulary::is_canonical_gateway(s) {
        Ok(())
    } else {
        Err(format!("unsupported payment gateway: {s}"))
    }
}
