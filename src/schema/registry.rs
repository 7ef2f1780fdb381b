use crate::domain::event::{event_types, Properties};
use crate::schema::validators as v;
use crate::schema::{CrossRule, FieldRule, Schema, ValidationError};
use std::collections::HashMap;

/// One immutable schema per event type, built at startup and shared by
/// reference. There is no global registry; owners pass it where needed.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, Schema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        schemas.insert(
            event_types::ADD_ITEM_TO_CART,
            with_defaults(cart_schema()),
        );
        schemas.insert(
            event_types::REMOVE_ITEM_FROM_CART,
            with_defaults(cart_schema()),
        );
        schemas.insert(event_types::CREATE_ORDER, with_defaults(order_schema()));
        schemas.insert(event_types::UPDATE_ORDER, with_defaults(order_schema()));
        schemas.insert(
            event_types::ORDER_STATUS,
            with_defaults(
                Schema::new()
                    .field("$order_id", FieldRule::Check(v::valid_identifier))
                    .field("$order_status", FieldRule::Check(v::valid_order_status))
                    .field("$source", FieldRule::Check(v::valid_order_status_source))
                    .field("$analyst", FieldRule::Check(v::is_string))
                    .field("$description", FieldRule::Check(v::is_string))
                    .rule(CrossRule::Required(&["$order_id", "$order_status"])),
            ),
        );
        schemas.insert(
            event_types::TRANSACTION,
            with_defaults(
                Schema::new()
                    .field("$amount", FieldRule::Check(v::is_integer))
                    .field("$currency_code", FieldRule::Check(v::valid_currency_code))
                    .field("$order_id", FieldRule::Check(v::valid_identifier))
                    .field("$transaction_id", FieldRule::Check(v::valid_identifier))
                    .field("$transaction_type", FieldRule::Check(v::valid_transaction_type))
                    .field(
                        "$transaction_status",
                        FieldRule::Check(v::valid_transaction_status),
                    )
                    .field(
                        "$payment_method",
                        FieldRule::Nested(payment_method_schema()),
                    )
                    .rule(CrossRule::Required(&[
                        "$amount",
                        "$currency_code",
                        "$transaction_type",
                        "$transaction_status",
                    ])),
            ),
        );
        schemas.insert(
            event_types::LOGIN,
            with_defaults(
                Schema::new()
                    .field("$login_status", FieldRule::Check(v::valid_login_status))
                    .field("$username", FieldRule::Check(v::is_string))
                    .field(
                        "$failure_reason",
                        FieldRule::Check(v::valid_login_failure_reason),
                    )
                    .rule(CrossRule::Required(&["$login_status"]))
                    .rule(CrossRule::RequiredUnless {
                        field: "$session_id",
                        unless: "$user_id",
                    }),
            ),
        );
        schemas.insert(event_types::LOGOUT, with_defaults(Schema::new()));
        schemas.insert(event_types::CREATE_ACCOUNT, with_defaults(account_schema()));
        schemas.insert(event_types::UPDATE_ACCOUNT, with_defaults(account_schema()));
        schemas.insert(
            event_types::CHARGEBACK,
            with_defaults(
                Schema::new()
                    .field("$order_id", FieldRule::Check(v::valid_identifier))
                    .field("$transaction_id", FieldRule::Check(v::valid_identifier))
                    .field(
                        "$chargeback_state",
                        FieldRule::Check(v::valid_chargeback_state),
                    )
                    .field(
                        "$chargeback_reason",
                        FieldRule::Check(v::valid_chargeback_reason),
                    )
                    .rule(CrossRule::Required(&["$order_id"])),
            ),
        );

        Self { schemas }
    }

    pub fn get(&self, event_type: &str) -> Option<&Schema> {
        self.schemas.get(event_type)
    }

    pub fn validate(
        &self,
        event_type: &str,
        properties: &Properties,
    ) -> Result<(), ValidationError> {
        let Some(schema) = self.schemas.get(event_type) else {
            return Err(ValidationError {
                field: "$type".to_string(),
                reason: format!("unknown event type: {event_type}"),
            });
        };
        schema.validate(properties, "")
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Fields validated on every event type regardless of its own table, plus
/// the app/browser exclusivity rule shared by all of them.
fn with_defaults(schema: Schema) -> Schema {
    schema
        .field("$ip", FieldRule::Check(v::valid_ip))
        .field("$time", FieldRule::Check(v::is_integer))
        .field("$user_id", FieldRule::Check(v::valid_identifier))
        .field("$session_id", FieldRule::Check(v::valid_identifier))
        .field("$site_country", FieldRule::Check(v::valid_country_code))
        .field("$site_domain", FieldRule::Check(v::is_string))
        .field("$browser", FieldRule::Nested(browser_schema()))
        .field("$app", FieldRule::Nested(app_schema()))
        .rule(CrossRule::MutuallyExclusive(&["$app", "$browser"]))
}

fn cart_schema() -> Schema {
    Schema::new()
        .field("$item", FieldRule::Nested(item_schema()))
        .rule(CrossRule::RequiredUnless {
            field: "$session_id",
            unless: "$user_id",
        })
        .rule(CrossRule::Required(&["$item"]))
}

fn item_schema() -> Schema {
    Schema::new()
        .field("$item_id", FieldRule::Check(v::valid_identifier))
        .field("$product_title", FieldRule::Check(v::is_string))
        .field("$price", FieldRule::Check(v::is_integer))
        .field("$currency_code", FieldRule::Check(v::valid_currency_code))
        .field("$quantity", FieldRule::Check(v::is_integer))
        .field("$upc", FieldRule::Check(v::is_string))
        .field("$sku", FieldRule::Check(v::valid_identifier))
        .field("$brand", FieldRule::Check(v::is_string))
        .field("$manufacturer", FieldRule::Check(v::is_string))
        .field("$category", FieldRule::Check(v::is_string))
        .field("$tags", FieldRule::ArrayOf(v::is_string))
        .field("$color", FieldRule::Check(v::is_string))
        .field("$size", FieldRule::Check(v::is_string))
        .rule(CrossRule::Required(&["$item_id", "$product_title", "$price"]))
}

fn browser_schema() -> Schema {
    Schema::new()
        .field("$user_agent", FieldRule::Check(v::is_string))
        .field("$accept_language", FieldRule::Check(v::is_string))
        .field("$content_language", FieldRule::Check(v::is_string))
}

fn app_schema() -> Schema {
    Schema::new()
        .field("$os", FieldRule::Check(v::is_string))
        .field("$os_version", FieldRule::Check(v::is_string))
        .field("$device_manufacturer", FieldRule::Check(v::is_string))
        .field("$device_model", FieldRule::Check(v::is_string))
        .field("$device_unique_id", FieldRule::Check(v::valid_identifier))
        .field("$app_name", FieldRule::Check(v::is_string))
        .field("$app_version", FieldRule::Check(v::is_string))
        .field("$client_language", FieldRule::Check(v::valid_language))
}

fn account_schema() -> Schema {
    Schema::new()
        .field("$user_email", FieldRule::Check(v::is_string))
        .field("$name", FieldRule::Check(v::is_string))
        .field("$phone", FieldRule::Check(v::loose_phone))
        .field("$referrer_user_id", FieldRule::Check(v::valid_identifier))
        .field(
            "$payment_methods",
            FieldRule::ArrayOfNested(payment_method_schema()),
        )
        .field("$billing_address", FieldRule::Nested(address_schema()))
        .field("$shipping_address", FieldRule::Nested(address_schema()))
        .field("$social_sign_on_type", FieldRule::Check(v::is_string))
}

fn address_schema() -> Schema {
    Schema::new()
        .field("$name", FieldRule::Check(v::is_string))
        .field("$address_1", FieldRule::Check(v::is_string))
        .field("$address_2", FieldRule::Check(v::is_string))
        .field("$city", FieldRule::Check(v::is_string))
        .field("$region", FieldRule::Check(v::is_string))
        .field("$country", FieldRule::Check(v::valid_country_code))
        .field("$zipcode", FieldRule::Check(v::is_string))
        .field("$phone", FieldRule::Check(v::loose_phone))
}

fn payment_method_schema() -> Schema {
    Schema::new()
        .field("$payment_type", FieldRule::Check(v::valid_payment_type))
        .field("$payment_gateway", FieldRule::Check(v::valid_payment_gateway))
        .field("$card_bin", FieldRule::Check(v::is_string))
        .field("$card_last4", FieldRule::Check(v::is_string))
        .field("$avs_result_code", FieldRule::Check(v::is_string))
        .field("$cvv_result_code", FieldRule::Check(v::is_string))
        .field("$verification_status", FieldRule::Check(v::valid_verification_status))
        .field("$routing_number", FieldRule::Check(v::is_string))
        .field("$decline_reason_code", FieldRule::Check(v::is_string))
        .field("$paypal_payer_id", FieldRule::Check(v::is_string))
        .field("$paypal_payer_email", FieldRule::Check(v::is_string))
        .field("$paypal_payer_status", FieldRule::Check(v::is_string))
        .field("$paypal_address_status", FieldRule::Check(v::is_string))
        .field("$paypal_protection_eligibility", FieldRule::Check(v::is_string))
        .field("$paypal_payment_status", FieldRule::Check(v::is_string))
        .field("$stripe_cvc_check", FieldRule::Check(v::is_string))
        .field("$stripe_address_line1_check", FieldRule::Check(v::is_string))
        .field("$stripe_address_line2_check", FieldRule::Check(v::is_string))
        .field("$stripe_address_zip_check", FieldRule::Check(v::is_string))
        .field("$stripe_funding", FieldRule::Check(v::is_string))
        .field("$stripe_brand", FieldRule::Check(v::is_string))
}

fn order_schema() -> Schema {
    Schema::new()
        .field("$order_id", FieldRule::Check(v::valid_identifier))
        .field("$amount", FieldRule::Check(v::is_integer))
        .field("$currency_code", FieldRule::Check(v::valid_currency_code))
        .field("$items", FieldRule::ArrayOfNested(item_schema()))
        .field(
            "$payment_methods",
            FieldRule::ArrayOfNested(payment_method_schema()),
        )
        .field("$shipping_method", FieldRule::Check(v::valid_shipping_method))
        .field("$expedited_shipping", FieldRule::Check(v::is_boolean))
        .field("$billing_address", FieldRule::Nested(address_schema()))
        .field("$shipping_address", FieldRule::Nested(address_schema()))
        .field("$seller_user_id", FieldRule::Check(v::valid_identifier))
        .rule(CrossRule::RequiredUnless {
            field: "$session_id",
            unless: "$user_id",
        })
        .rule(CrossRule::Required(&[
            "$order_id",
            "$amount",
            "$currency_code",
        ]))
}
