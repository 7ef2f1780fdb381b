use crate::gateways::{ChargeDetails, PaymentGatewayAdapter};

/// Extracts normalized fields from a Braintree transaction object (the
/// drop-in and vault surfaces alias onto the same canonical id).
pub struct BraintreeAdapter;

fn str_at(charge: &ChargeDetails, path: &[&str]) -> Option<String> {
    let mut cursor = charge;
    for segment in path {
        cursor = cursor.get(segment)?;
    }
    cursor.as_str().map(str::to_string)
}

impl PaymentGatewayAdapter for BraintreeAdapter {
    fn name(&self) -> &'static str {
        "braintree"
    }

    fn payment_type(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(charge, &["paymentInstrumentType"])
    }

    fn card_last4(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(charge, &["creditCard", "last4"])
    }

    fn card_bin(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(charge, &["creditCard", "bin"])
    }

    fn avs_result_code(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(charge, &["avsPostalCodeResponseCode"])
            .or_else(|| str_at(charge, &["avsStreetAddressResponseCode"]))
    }

    fn cvv_result_code(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(charge, &["cvvResponseCode"])
    }

    fn verification_status(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(charge, &["status"])
    }

    fn routing_number(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(charge, &["usBankAccount", "routingNumber"])
    }

    fn decline_reason_code(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(charge, &["processorResponseCode"])
    }

    fn paypal_payer_id(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(charge, &["paypal", "payerId"])
    }

    fn paypal_payer_email(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(charge, &["paypal", "payerEmail"])
    }

    fn paypal_payer_status(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(charge, &["paypal", "payerStatus"])
    }

    fn paypal_address_status(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(charge, &["paypal", "addressStatus"])
    }

    fn paypal_protection_eligibility(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(charge, &["paypal", "sellerProtectionStatus"])
    }

    fn paypal_payment_status(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(charge, &["paypal", "paymentStatus"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateways::AdapterRegistry;
    use serde_json::json;

    #[test]
    fn normalizes_braintree_card_transaction() {
        let registry = AdapterRegistry::new();
        let charge = json!({
            "paymentInstrumentType": "credit_card",
            "status": "submitted_for_settlement",
            "creditCard": {"last4": "1881", "bin": "411111"},
            "avsPostalCodeResponseCode": "M",
            "cvvResponseCode": "M",
            "processorResponseCode": "1000"
        });
        let normalized = registry.normalize("braintree_dropin", &charge);
        assert_eq!(normalized.payment_gateway.as_deref(), Some("$braintree"));
        assert_eq!(normalized.payment_type.as_deref(), Some("$credit_card"));
        assert_eq!(normalized.card_last4.as_deref(), Some("1881"));
        assert_eq!(normalized.avs_result_code.as_deref(), Some("M"));
        assert_eq!(normalized.cvv_result_code.as_deref(), Some("M"));
        assert_eq!(normalized.verification_status.as_deref(), Some("$pending"));
    }

    #[test]
    fn paypal_transaction_carries_payer_fields() {
        let registry = AdapterRegistry::new();
        let charge = json!({
            "paymentInstrumentType": "paypal_account",
            "status": "settled",
            "paypal": {
                "payerId": "PAYER-1",
                "payerEmail": "buyer@example.com",
                "payerStatus": "VERIFIED",
                "paymentStatus": "COMPLETED"
            }
        });
        let normalized = registry.normalize("braintree", &charge);
        assert_eq!(normalized.payment_type.as_deref(), Some("$digital_wallet"));
        assert_eq!(normalized.paypal_payer_id.as_deref(), Some("PAYER-1"));
        assert_eq!(normalized.paypal_payer_email.as_deref(), Some("buyer@example.com"));
        assert_eq!(normalized.verification_status.as_deref(), Some("$success"));
    }
}
