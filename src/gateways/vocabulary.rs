//! Canonical vocabulary the risk service accepts, plus mappings from
//! gateway-specific strings onto it. Anything outside the enumeration maps
//! to `None` rather than erroring; callers omit the field.

pub const PAYMENT_TYPES: &[&str] = &[
    "$cash",
    "$check",
    "$credit_card",
    "$crypto_currency",
    "$debit_card",
    "$digital_wallet",
    "$electronic_fund_transfer",
    "$financing",
    "$gift_card",
    "$invoice",
    "$in_app_purchase",
    "$money_order",
    "$points",
    "$prepaid_card",
    "$store_credit",
    "$third_party_processor",
    "$voucher",
    "$sepa_credit",
    "$sepa_instant_credit",
    "$sepa_direct_debit",
    "$ach_credit",
    "$ach_debit",
    "$wire_credit",
    "$wire_debit",
];

pub const PAYMENT_GATEWAYS: &[&str] = &[
    "$adyen",
    "$authorizenet",
    "$braintree",
    "$paypal",
    "$square",
    "$stripe",
    "$worldpay",
];

pub const VERIFICATION_STATUSES: &[&str] = &["$success", "$failure", "$pending"];

pub fn is_canonical_payment_type(value: &str) -> bool {
    PAYMENT_TYPES.contains(&value)
}

pub fn is_canonical_gateway(value: &str) -> bool {
    PAYMENT_GATEWAYS.contains(&value)
}

pub fn is_canonical_verification_status(value: &str) -> bool {
    VERIFICATION_STATUSES.contains(&value)
}

/// Maps a gateway's own payment-type vocabulary (e.g. Stripe's `sepa_debit`)
/// onto the canonical enumeration.
pub fn canonical_payment_type(raw: &str) -> Option<&'static str> {
    let key = raw.trim().to_ascii_lowercase();
    let mapped = match key.as_str() {
        "card" | "credit_card" | "credit" => "$credit_card",
        "debit" | "debit_card" => "$debit_card",
        "sepa_debit" | "sepa_direct_debit" => "$sepa_direct_debit",
        "sepa_credit_transfer" => "$sepa_credit",
        "ach_debit" | "us_bank_account" | "ach" => "$ach_debit",
        "ach_credit_transfer" => "$ach_credit",
        "wire" | "wire_transfer" => "$wire_credit",
        "paypal" | "paypal_account" | "apple_pay" | "google_pay" | "wallet" | "link" => {
            "$digital_wallet"
        }
        "crypto" | "bitcoin" => "$crypto_currency",
        "gift_card" | "giftcard" => "$gift_card",
        "prepaid" | "prepaid_card" => "$prepaid_card",
        "invoice" => "$invoice",
        "financing" | "installments" => "$financing",
        _ => {
            // Already-canonical input passes through unchanged.
            return PAYMENT_TYPES.iter().find(|t| **t == key).copied();
        }
    };
    Some(mapped)
}

/// Maps a canonical gateway id onto the `$`-prefixed gateway enumeration.
pub fn canonical_payment_gateway(canonical_id: &str) -> Option<&'static str> {
    let key = canonical_id.trim().to_ascii_lowercase();
    PAYMENT_GATEWAYS
        .iter()
        .find(|g| g[1..] == key)
        .copied()
}

/// Gateway settlement vocabulary onto `$success`/`$failure`/`$pending`.
pub fn canonical_verification_status(raw: &str) -> Option<&'static str> {
    let key = raw.trim().to_ascii_lowercase();
    let mapped = match key.as_str() {
        "succeeded" | "success" | "settled" | "pass" | "authorized" => "$success",
        "failed" | "failure" | "declined" | "fail" => "$failure",
        "pending" | "processing" | "requires_action" | "submitted_for_settlement" => "$pending",
        _ => {
            return VERIFICATION_STATUSES.iter().find(|s| **s == key).copied();
        }
    };
    Some(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_vocabulary_maps_to_canonical() {
        assert_eq!(canonical_payment_type("sepa_debit"), Some("$sepa_direct_debit"));
        assert_eq!(canonical_payment_type("card"), Some("$credit_card"));
        assert_eq!(canonical_payment_type("$gift_card"), Some("$gift_card"));
    }

    #[test]
    fn unknown_vocabulary_is_rejected_not_raised() {
        assert_eq!(canonical_payment_type("carrier_pigeon"), None);
        assert_eq!(canonical_verification_status("mystery"), None);
        assert_eq!(canonical_payment_gateway("homebrew_pay"), None);
    }

    #[test]
    fn verification_statuses_map() {
        assert_eq!(canonical_verification_status("succeeded"), Some("$success"));
        assert_eq!(canonical_verification_status("submitted_for_settlement"), Some("$pending"));
    }

    #[test]
    fn gateway_ids_map_to_enumeration() {
        assert_eq!(canonical_payment_gateway("stripe"), Some("$stripe"));
        assert_eq!(canonical_payment_gateway("braintree"), Some("$braintree"));
    }
}
