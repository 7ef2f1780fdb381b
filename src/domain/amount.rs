/// ISO 4217 currencies with no minor unit. Amounts in these currencies are
/// already whole units, so the micros factor is 1e6 instead of 1e4.
const ZERO_DECIMAL_CURRENCIES: &[&str] = &[
    "BIF", "CLP", "DJF", "GNF", "ISK", "JPY", "KMF", "KRW", "MGA", "PYG", "RWF", "UGX", "VND",
    "VUV", "XAF", "XOF", "XPF",
];

pub fn is_zero_decimal(currency_code: &str) -> bool {
    let code = currency_code.to_ascii_uppercase();
    ZERO_DECIMAL_CURRENCIES.contains(&code.as_str())
}

/// Scales a currency amount into micros for lossless transmission:
/// price x 10,000 for decimal currencies, x 1,000,000 for zero-decimal ones.
pub fn micros(amount: f64, currency_code: &str) -> i64 {
    let factor = if is_zero_decimal(currency_code) {
        1_000_000.0
    } else {
        10_000.0
    };
    (amount * factor).round() as i64
}
