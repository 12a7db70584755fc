//! MAC address formatting and validation.
//!
//! `format_mac` is meant to run on every keystroke of a free-text input, so
//! it never fails; `validate_mac` is the gate applied on submission.

use once_cell::sync::Lazy;
use regex::Regex;
use crate::validation::FieldError;

/// Length of `XX:XX:XX:XX:XX:XX`.
pub const MAC_TEXT_LEN: usize = 17;

pub const MAC_FIELD: &str = "macAddress";

static MAC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}$").expect("static MAC pattern")
});

/// Keeps only hex digits, regroups them in colon separated pairs and
/// truncates to the canonical length. Case is left untouched.
pub fn format_mac(raw: &str) -> String {
    let hex: Vec<char> = raw.chars().filter(|c| c.is_ascii_hexdigit()).collect();

    let mut formatted = hex
        .chunks(2)
        .map(|pair| pair.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(":");
    formatted.truncate(MAC_TEXT_LEN);
    formatted
}

/// Canonical stored form: formatted and uppercased.
pub fn normalize_mac(raw: &str) -> String {
    format_mac(raw).to_ascii_uppercase()
}

/// Accepts six two-digit hex groups separated by `:` or `-`.
pub fn validate_mac(mac: &str) -> Result<(), FieldError> {
    if MAC_PATTERN.is_match(mac) {
        Ok(())
    } else {
        Err(FieldError::new(
            MAC_FIELD,
            "Invalid MAC address format (e.g. 00:1B:44:11:3A:B7)",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_raw_input() {
        assert_eq!(format_mac("001b44113ab7"), "00:1b:44:11:3a:b7");
        assert_eq!(format_mac("00-1B-44-11-3A-B7"), "00:1B:44:11:3A:B7");
        assert_eq!(format_mac("  00 1B zz 44"), "00:1B:44");
        assert_eq!(format_mac("001"), "00:1");
        assert_eq!(format_mac(""), "");
    }

    #[test]
    fn truncates_to_canonical_length() {
        assert_eq!(format_mac("001B44113AB7FFEE"), "00:1B:44:11:3A:B7");
        assert_eq!(format_mac("001B44113AB7F").len(), MAC_TEXT_LEN);
    }

    #[test]
    fn format_is_idempotent() {
        for raw in ["001b44113ab7", "00:1B:44", "g0h1-2345::67", "001B44113AB7FFEE", "a"] {
            let once = format_mac(raw);
            assert_eq!(format_mac(&once), once, "input {:?}", raw);
        }
    }

    #[test]
    fn normalizes_to_uppercase() {
        assert_eq!(normalize_mac("00-1b-44-11-3a-b7"), "00:1B:44:11:3A:B7");
    }

    #[test]
    fn validates_separators_and_groups() {
        assert!(validate_mac("00:1B:44:11:3A:B7").is_ok());
        assert!(validate_mac("00-1b-44-11-3a-b7").is_ok());
        assert!(validate_mac("00:1B-44:11-3A:B7").is_ok());

        for bad in ["00:1B:44", "001B44113AB7", "00:1B:44:11:3A:B7:00", "0G:1B:44:11:3A:B7", ""] {
            let err = validate_mac(bad).unwrap_err();
            assert_eq!(err.field, MAC_FIELD, "input {:?}", bad);
        }
    }

    #[test]
    fn formatted_twelve_hex_digits_validate() {
        for raw in ["001b44113ab7", "00.1b.44.11.3a.b7", "AABBCCDDEEFF"] {
            assert!(validate_mac(&format_mac(raw)).is_ok(), "input {:?}", raw);
        }
        assert!(validate_mac(&format_mac("001b44113a")).is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn format_is_idempotent_on_any_text(raw in any::<String>()) {
                let once = format_mac(&raw);
                prop_assert_eq!(format_mac(&once), once);
            }

            #[test]
            fn formatted_input_validates_iff_twelve_hex_digits(raw in "[0-9a-fA-F:\\- .]{0,40}") {
                let hex_digits = raw.chars().filter(|c| c.is_ascii_hexdigit()).count();
                prop_assert_eq!(validate_mac(&format_mac(&raw)).is_ok(), hex_digits >= 12);
            }
        }
    }
}
