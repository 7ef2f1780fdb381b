use crate::gateways::{ChargeDetails, PaymentGatewayAdapter};

/// Extracts normalized fields from a Stripe charge object. Also serves the
/// checkout-redirect surfaces aliased onto the `stripe` canonical id.
pub struct StripeAdapter;

fn str_at(charge: &ChargeDetails, path: &[&str]) -> Option<String> {
    let mut cursor = charge;
    for segment in path {
        cursor = cursor.get(segment)?;
    }
    cursor.as_str().map(str::to_string)
}

impl PaymentGatewayAdapter for StripeAdapter {
    fn name(&self) -> &'static str {
        "stripe"
    }

    fn payment_type(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(charge, &["payment_method_details", "type"])
    }

    fn card_last4(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(charge, &["payment_method_details", "card", "last4"])
    }

    fn card_bin(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(charge, &["payment_method_details", "card", "iin"])
    }

    fn verification_status(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(charge, &["status"])
    }

    fn routing_number(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(
            charge,
            &["payment_method_details", "us_bank_account", "routing_number"],
        )
        .or_else(|| str_at(charge, &["payment_method_details", "acss_debit", "institution_number"]))
    }

    fn decline_reason_code(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(charge, &["outcome", "reason"])
    }

    fn stripe_cvc_check(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(charge, &["payment_method_details", "card", "checks", "cvc_check"])
    }

    fn stripe_address_line1_check(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(
            charge,
            &["payment_method_details", "card", "checks", "address_line1_check"],
        )
    }

    fn stripe_address_zip_check(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(
            charge,
            &["payment_method_details", "card", "checks", "address_postal_code_check"],
        )
    }

    fn stripe_funding(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(charge, &["payment_method_details", "card", "funding"])
    }

    fn stripe_brand(&self, charge: &ChargeDetails) -> Option<String> {
        str_at(charge, &["payment_method_details", "card", "brand"])
    }
}
