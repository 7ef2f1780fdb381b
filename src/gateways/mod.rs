use crate::domain::event::Properties;
use serde_json::Value;
use std::collections::HashMap;

pub mod braintree;
pub mod mock;
pub mod stripe;
pub mod vocabulary;

/// Opaque payment data handed over by the host integration for one charge.
/// Adapters know the shape for their own gateway; nothing else looks inside.
pub type ChargeDetails = serde_json::Value;

/// Surface gateway ids that resolve to the same canonical id, so one adapter
/// serves several integrations (e.g. a checkout redirect and its processor).
const GATEWAY_ALIASES: &[(&str, &str)] = &[
    ("stripe_checkout", "stripe"),
    ("stripe_sca", "stripe"),
    ("stripe_connect", "stripe"),
    ("braintree_dropin", "braintree"),
    ("braintree_vault", "braintree"),
    ("paypal_express", "paypal"),
    ("paypal_pro", "paypal"),
];

pub fn canonical_gateway_id(raw: &str) -> String {
    let key = raw.trim().to_ascii_lowercase();
    GATEWAY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(key)
}

/// One extraction method per normalized field. Every method degrades to
/// `None` on missing or malformed data; a miss never blocks other fields.
pub trait PaymentGatewayAdapter: Send + Sync {
    fn name(&self) -> &'static str;

    fn payment_type(&self, _charge: &ChargeDetails) -> Option<String> {
        None
    }
    fn card_last4(&self, _charge: &ChargeDetails) -> Option<String> {
        None
    }
    fn card_bin(&self, _charge: &ChargeDetails) -> Option<String> {
        None
    }
    fn avs_result_code(&self, _charge: &ChargeDetails) -> Option<String> {
        None
    }
    fn cvv_result_code(&self, _charge: &ChargeDetails) -> Option<String> {
        None
    }
    fn verification_status(&self, _charge: &ChargeDetails) -> Option<String> {
        None
    }
    fn routing_number(&self, _charge: &ChargeDetails) -> Option<String> {
        None
    }
    fn decline_reason_code(&self, _charge: &ChargeDetails) -> Option<String> {
        None
    }
    fn paypal_payer_id(&self, _charge: &ChargeDetails) -> Option<String> {
        None
    }
    fn paypal_payer_email(&self, _charge: &ChargeDetails) -> Option<String> {
        None
    }
    fn paypal_payer_status(&self, _charge: &ChargeDetails) -> Option<String> {
        None
    }
    fn paypal_address_status(&self, _charge: &ChargeDetails) -> Option<String> {
        None
    }
    fn paypal_protection_eligibility(&self, _charge: &ChargeDetails) -> Option<String> {
        None
    }
    fn paypal_payment_status(&self, _charge: &ChargeDetails) -> Option<String> {
        None
    }
    fn stripe_cvc_check(&self, _charge: &ChargeDetails) -> Option<String> {
        None
    }
    fn stripe_address_line1_check(&self, _charge: &ChargeDetails) -> Option<String> {
        None
    }
    fn stripe_address_line2_check(&self, _charge: &ChargeDetails) -> Option<String> {
        None
    }
    fn stripe_address_zip_check(&self, _charge: &ChargeDetails) -> Option<String> {
        None
    }
    fn stripe_funding(&self, _charge: &ChargeDetails) -> Option<String> {
        None
    }
    fn stripe_brand(&self, _charge: &ChargeDetails) -> Option<String> {
        None
    }
}

/// Fixed vocabulary of optional normalized fields; each is independently
/// sourced and independently validated, so one miss leaves the rest intact.
#[derive(Debug, Clone, Default)]
pub struct NormalizedPaymentMethod {
    pub payment_type: Option<String>,
    pub payment_gateway: Option<String>,
    pub card_bin: Option<String>,
    pub card_last4: Option<String>,
    pub avs_result_code: Option<String>,
    pub cvv_result_code: Option<String>,
    pub verification_status: Option<String>,
    pub routing_number: Option<String>,
    pub decline_reason_code: Option<String>,
    pub paypal_payer_id: Option<String>,
    pub paypal_payer_email: Option<String>,
    pub paypal_payer_status: Option<String>,
    pub paypal_address_status: Option<String>,
    pub paypal_protection_eligibility: Option<String>,
    pub paypal_payment_status: Option<String>,
    pub stripe_cvc_check: Option<String>,
    pub stripe_address_line1_check: Option<String>,
    pub stripe_address_line2_check: Option<String>,
    pub stripe_address_zip_check: Option<String>,
    pub stripe_funding: Option<String>,
    pub stripe_brand: Option<String>,
}

impl NormalizedPaymentMethod {
    /// Reserved-prefixed property map with absent fields omitted entirely.
    pub fn to_properties(&self) -> Properties {
        let mut props = Properties::new();
        let fields: [(&str, &Option<String>); 21] = [
            ("$payment_type", &self.payment_type),
            ("$payment_gateway", &self.payment_gateway),
            ("$card_bin", &self.card_bin),
            ("$card_last4", &self.card_last4),
            ("$avs_result_code", &self.avs_result_code),
            ("$cvv_result_code", &self.cvv_result_code),
            ("$verification_status", &self.verification_status),
            ("$routing_number", &self.routing_number),
            ("$decline_reason_code", &self.decline_reason_code),
            ("$paypal_payer_id", &self.paypal_payer_id),
            ("$paypal_payer_email", &self.paypal_payer_email),
            ("$paypal_payer_status", &self.paypal_payer_status),
            ("$paypal_address_status", &self.paypal_address_status),
            (
                "$paypal_protection_eligibility",
                &self.paypal_protection_eligibility,
            ),
            ("$paypal_payment_status", &self.paypal_payment_status),
            ("$stripe_cvc_check", &self.stripe_cvc_check),
            ("$stripe_address_line1_check", &self.stripe_address_line1_check),
            ("$stripe_address_line2_check", &self.stripe_address_line2_check),
            ("$stripe_address_zip_check", &self.stripe_address_zip_check),
            ("$stripe_funding", &self.stripe_funding),
            ("$stripe_brand", &self.stripe_brand),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                props.insert(key.to_string(), Value::String(value.clone()));
            }
        }
        props
    }
}

/// Canonical gateway id -> adapter, resolved once at startup. New gateways
/// are supported by registering one adapter; the validator and dispatcher
/// never change.
pub struct AdapterRegistry {
    adapters: HashMap<String, Box<dyn PaymentGatewayAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            adapters: HashMap::new(),
        };
        registry.register("stripe", Box::new(stripe::StripeAdapter));
        registry.register("braintree", Box::new(braintree::BraintreeAdapter));
        registry
    }

    pub fn register(&mut self, canonical_id: &str, adapter: Box<dyn PaymentGatewayAdapter>) {
        self.adapters.insert(canonical_id.to_string(), adapter);
    }

    pub fn get(&self, canonical_id: &str) -> Option<&dyn PaymentGatewayAdapter> {
        self.adapters.get(canonical_id).map(Box::as_ref)
    }

    /// Runs every extraction independently and validates each raw value
    /// against the canonical vocabulary or format. Invalid and missing
    /// values are omitted, never fatal.
    pub fn normalize(&self, raw_gateway_id: &str, charge: &ChargeDetails) -> NormalizedPaymentMethod {
        let canonical = canonical_gateway_id(raw_gateway_id);
        let mut out = NormalizedPaymentMethod {
            payment_gateway: vocabulary::canonical_payment_gateway(&canonical).map(str::to_string),
            ..Default::default()
        };

        let Some(adapter) = self.get(&canonical) else {
            tracing::debug!(gateway = %canonical, "no payment adapter registered");
            return out;
        };
        tracing::debug!(adapter = adapter.name(), "normalizing charge details");

        out.payment_type = adapter
            .payment_type(charge)
            .and_then(|raw| vocabulary::canonical_payment_type(&raw))
            .map(str::to_string);
        out.card_last4 = adapter.card_last4(charge).filter(|s| digits_of_len(s, 4));
        out.card_bin = adapter
            .card_bin(charge)
            .filter(|s| (6..=8).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit()));
        out.avs_result_code = adapter.avs_result_code(charge).filter(|s| short_code(s));
        out.cvv_result_code = adapter.cvv_result_code(charge).filter(|s| short_code(s));
        out.verification_status = adapter
            .verification_status(charge)
            .and_then(|raw| vocabulary::canonical_verification_status(&raw))
            .map(str::to_string);
        out.routing_number = adapter
            .routing_number(charge)
            .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()));
        out.decline_reason_code = adapter.decline_reason_code(charge).filter(|s| !s.is_empty());
        out.paypal_payer_id = adapter.paypal_payer_id(charge).filter(|s| !s.is_empty());
        out.paypal_payer_email = adapter
            .paypal_payer_email(charge)
            .filter(|s| s.contains('@'));
        out.paypal_payer_status = adapter.paypal_payer_status(charge).filter(|s| !s.is_empty());
        out.paypal_address_status = adapter
            .paypal_address_status(charge)
            .filter(|s| !s.is_empty());
        out.paypal_protection_eligibility = adapter
            .paypal_protection_eligibility(charge)
            .filter(|s| !s.is_empty());
        out.paypal_payment_status = adapter
            .paypal_payment_status(charge)
            .filter(|s| !s.is_empty());
        out.stripe_cvc_check = adapter.stripe_cvc_check(charge).filter(|s| !s.is_empty());
        out.stripe_address_line1_check = adapter
            .stripe_address_line1_check(charge)
            .filter(|s| !s.is_empty());
        out.stripe_address_line2_check = adapter
            .stripe_address_line2_check(charge)
            .filter(|s| !s.is_empty());
        out.stripe_address_zip_check = adapter
            .stripe_address_zip_check(charge)
            .filter(|s| !s.is_empty());
        out.stripe_funding = adapter.stripe_funding(charge).filter(|s| !s.is_empty());
        out.stripe_brand = adapter.stripe_brand(charge).filter(|s| !s.is_empty());

        out
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn digits_of_len(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

fn short_code(s: &str) -> bool {
    !s.is_empty() && s.len() <= 2 && s.bytes().all(|b| b.is_ascii_alphanumeric())
}
