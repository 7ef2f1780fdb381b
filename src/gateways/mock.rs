use crate::gateways::{ChargeDetails, PaymentGatewayAdapter};

/// Test adapter with a flat, predictable charge shape.
pub struct MockAdapter;

impl PaymentGatewayAdapter for MockAdapter {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn payment_type(&self, charge: &ChargeDetails) -> Option<String> {
        charge.get("type").and_then(|v| v.as_str()).map(str::to_string)
    }

    fn card_last4(&self, charge: &ChargeDetails) -> Option<String> {
        charge.get("last4").and_then(|v| v.as_str()).map(str::to_string)
    }

    fn card_bin(&self, charge: &ChargeDetails) -> Option<String> {
        charge.get("bin").and_then(|v| v.as_str()).map(str::to_string)
    }

    fn avs_result_code(&self, charge: &ChargeDetails) -> Option<String> {
        charge.get("avs").and_then(|v| v.as_str()).map(str::to_string)
    }

    fn cvv_result_code(&self, charge: &ChargeDetails) -> Option<String> {
        charge.get("cvv").and_then(|v| v.as_str()).map(str::to_string)
    }

    fn verification_status(&self, charge: &ChargeDetails) -> Option<String> {
        charge.get("status").and_then(|v| v.as_str()).map(str::to_string)
    }
}
