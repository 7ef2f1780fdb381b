use std::fmt;

/// Country calling code plus the subscriber-number length range observed for
/// that numbering plan. Lengths count digits after the calling code.
struct CallingCode {
    code: &'static str,
    region: &'static str,
    min_len: usize,
    max_len: usize,
}

const CALLING_CODES: &[CallingCode] = &[
    CallingCode { code: "1", region: "US", min_len: 10, max_len: 10 },
    CallingCode { code: "7", region: "RU", min_len: 10, max_len: 10 },
    CallingCode { code: "20", region: "EG", min_len: 8, max_len: 10 },
    CallingCode { code: "27", region: "ZA", min_len: 9, max_len: 9 },
    CallingCode { code: "30", region: "GR", min_len: 10, max_len: 10 },
    CallingCode { code: "31", region: "NL", min_len: 9, max_len: 9 },
    CallingCode { code: "32", region: "BE", min_len: 8, max_len: 9 },
    CallingCode { code: "33", region: "FR", min_len: 9, max_len: 9 },
    CallingCode { code: "34", region: "ES", min_len: 9, max_len: 9 },
    CallingCode { code: "39", region: "IT", min_len: 9, max_len: 11 },
    CallingCode { code: "40", region: "RO", min_len: 9, max_len: 9 },
    CallingCode { code: "41", region: "CH", min_len: 9, max_len: 9 },
    CallingCode { code: "43", region: "AT", min_len: 7, max_len: 13 },
    CallingCode { code: "44", region: "GB", min_len: 9, max_len: 10 },
    CallingCode { code: "45", region: "DK", min_len: 8, max_len: 8 },
    CallingCode { code: "46", region: "SE", min_len: 7, max_len: 10 },
    CallingCode { code: "47", region: "NO", min_len: 8, max_len: 8 },
    CallingCode { code: "48", region: "PL", min_len: 9, max_len: 9 },
    CallingCode { code: "49", region: "DE", min_len: 7, max_len: 11 },
    CallingCode { code: "51", region: "PE", min_len: 8, max_len: 9 },
    CallingCode { code: "52", region: "MX", min_len: 10, max_len: 10 },
    CallingCode { code: "54", region: "AR", min_len: 10, max_len: 10 },
    CallingCode { code: "55", region: "BR", min_len: 10, max_len: 11 },
    CallingCode { code: "56", region: "CL", min_len: 9, max_len: 9 },
    CallingCode { code: "57", region: "CO", min_len: 10, max_len: 10 },
    CallingCode { code: "58", region: "VE", min_len: 10, max_len: 10 },
    CallingCode { code: "60", region: "MY", min_len: 8, max_len: 10 },
    CallingCode { code: "61", region: "AU", min_len: 9, max_len: 9 },
    CallingCode { code: "62", region: "ID", min_len: 8, max_len: 12 },
    CallingCode { code: "63", region: "PH", min_len: 10, max_len: 10 },
    CallingCode { code: "64", region: "NZ", min_len: 8, max_len: 10 },
    CallingCode { code: "65", region: "SG", min_len: 8, max_len: 8 },
    CallingCode { code: "66", region: "TH", min_len: 8, max_len: 9 },
    CallingCode { code: "81", region: "JP", min_len: 9, max_len: 10 },
    CallingCode { code: "82", region: "KR", min_len: 8, max_len: 10 },
    CallingCode { code: "84", region: "VN", min_len: 9, max_len: 10 },
    CallingCode { code: "86", region: "CN", min_len: 10, max_len: 11 },
    CallingCode { code: "90", region: "TR", min_len: 10, max_len: 10 },
    CallingCode { code: "91", region: "IN", min_len: 10, max_len: 10 },
    CallingCode { code: "92", region: "PK", min_len: 9, max_len: 10 },
    CallingCode { code: "94", region: "LK", min_len: 9, max_len: 9 },
    CallingCode { code: "98", region: "IR", min_len: 10, max_len: 10 },
    CallingCode { code: "212", region: "MA", min_len: 9, max_len: 9 },
    CallingCode { code: "234", region: "NG", min_len: 8, max_len: 10 },
    CallingCode { code: "254", region: "KE", min_len: 9, max_len: 9 },
    CallingCode { code: "351", region: "PT", min_len: 9, max_len: 9 },
    CallingCode { code: "353", region: "IE", min_len: 8, max_len: 9 },
    CallingCode { code: "358", region: "FI", min_len: 6, max_len: 10 },
    CallingCode { code: "380", region: "UA", min_len: 9, max_len: 9 },
    CallingCode { code: "420", region: "CZ", min_len: 9, max_len: 9 },
    CallingCode { code: "502", region: "GT", min_len: 8, max_len: 8 },
    CallingCode { code: "506", region: "CR", min_len: 8, max_len: 8 },
    CallingCode { code: "507", region: "PA", min_len: 7, max_len: 8 },
    CallingCode { code: "593", region: "EC", min_len: 8, max_len: 9 },
    CallingCode { code: "598", region: "UY", min_len: 8, max_len: 8 },
    CallingCode { code: "852", region: "HK", min_len: 8, max_len: 8 },
    CallingCode { code: "880", region: "BD", min_len: 10, max_len: 10 },
    CallingCode { code: "886", region: "TW", min_len: 8, max_len: 9 },
    CallingCode { code: "966", region: "SA", min_len: 9, max_len: 9 },
    CallingCode { code: "971", region: "AE", min_len: 8, max_len: 9 },
    CallingCode { code: "972", region: "IL", min_len: 8, max_len: 9 },
    CallingCode { code: "977", region: "NP", min_len: 10, max_len: 10 },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct E164 {
    pub calling_code: String,
    pub subscriber: String,
}

impl fmt::Display for E164 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}{}", self.calling_code, self.subscriber)
    }
}

/// Canonicalizes a free-form phone string into E.164, or `None` when no
/// calling-code prefix yields a subscriber number of plausible length.
///
/// Prefixes are scanned at lengths 1, 2 then 3, so shorter calling codes win
/// when a number is ambiguous.
pub fn parse(raw: &str) -> Option<E164> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let rest = trimmed
        .strip_prefix('+')
        .or_else(|| trimmed.strip_prefix("00"))
        .unwrap_or(trimmed);
    let digits: String = rest.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() || digits.len() > 15 {
        return None;
    }

    for len in 1..=3usize {
        if digits.len() <= len {
            break;
        }
        let prefix = &digits[..len];
        if let Some(entry) = CALLING_CODES.iter().find(|e| e.code == prefix) {
            let subscriber_len = digits.len() - len;
            if subscriber_len >= entry.min_len && subscriber_len <= entry.max_len {
                return Some(E164 {
                    calling_code: prefix.to_string(),
                    subscriber: digits[len..].to_string(),
                });
            }
        }
    }

    None
}

pub fn region_of(calling_code: &str) -> Option<&'static str> {
    CALLING_CODES
        .iter()
        .find(|e| e.code == calling_code)
        .map(|e| e.region)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nanp_number_with_separators() {
        let parsed = parse(" +1 415 555 2671 ").unwrap();
        assert_eq!(parsed.to_string(), "+14155552671");
        assert_eq!(parsed.calling_code, "1");
        assert_eq!(parsed.subscriber, "4155552671");
    }

    #[test]
    fn rejects_string_without_matching_plan() {
        assert_eq!(parse("0000"), None);
    }

    #[test]
    fn rejects_alphabetic_input() {
        assert_eq!(parse("+1 800 FLOWERS"), None);
    }

    #[test]
    fn accepts_double_zero_international_prefix() {
        let parsed = parse("0044 20 7946 0958").unwrap();
        assert_eq!(parsed.to_string(), "+442079460958");
        assert_eq!(region_of(&parsed.calling_code), Some("GB"));
    }

    #[test]
    fn shorter_calling_code_wins_when_ambiguous() {
        // "1" matches with a 10-digit subscriber before "12x" codes are tried.
        let parsed = parse("+12125550000").unwrap();
        assert_eq!(parsed.calling_code, "1");
    }

    #[test]
    fn three_digit_codes_are_reached() {
        let parsed = parse("+97150 123 4567").unwrap();
        assert_eq!(parsed.calling_code, "971");
        assert_eq!(region_of("971"), Some("AE"));
    }

    #[test]
    fn rejects_overlong_digit_strings() {
        assert_eq!(parse("+1234567890123456"), None);
    }
}
