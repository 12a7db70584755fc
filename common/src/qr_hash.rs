//! Derivation of the short identifier printed in a device's QR code.
//!
//! The hash is the base64 form of the MAC text with non-alphanumeric
//! characters removed, cut to `QR_HASH_LEN`. It is stable but not unique:
//! the first 12 base64 characters only cover the first 9 bytes of the
//! input, which for a canonical address is the first three octets.

pub const QR_HASH_LEN: usize = 12;

pub fn derive_qr_hash(mac_address: &str) -> String {
    base64::encode(mac_address.as_bytes())
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(QR_HASH_LEN)
        .collect()
}

/// Shape check for values arriving from a scanned URL.
pub fn is_qr_hash(candidate: &str) -> bool {
    candidate.len() == QR_HASH_LEN && candidate.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_known_hash() {
        assert_eq!(derive_qr_hash("00:1B:44:11:3A:B7"), "MDA6MUI6NDQ6");
        assert_eq!(derive_qr_hash("AA:BB:CC:DD:EE:FF"), "QUE6QkI6Q0M6");
    }

    #[test]
    fn derivation_is_deterministic() {
        let mac = "3C:5A:B4:01:02:03";
        let first = derive_qr_hash(mac);
        assert_eq!(first, derive_qr_hash(mac));
        assert!(is_qr_hash(&first));
    }

    #[test]
    fn shares_prefix_for_same_leading_octets() {
        assert_eq!(
            derive_qr_hash("00:1B:44:11:3A:B7"),
            derive_qr_hash("00:1B:44:FF:FF:FF")
        );
    }

    #[test]
    fn rejects_malformed_hashes() {
        assert!(!is_qr_hash("MDA6MUI6NDQ"));
        assert!(!is_qr_hash("MDA6MUI6NDQ6X"));
        assert!(!is_qr_hash("MDA6MUI6NDQ+"));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn derivation_is_deterministic_and_well_shaped(mac in "[0-9A-F]{2}(:[0-9A-F]{2}){5}") {
                let first = derive_qr_hash(&mac);
                prop_assert_eq!(&first, &derive_qr_hash(&mac));
                prop_assert!(is_qr_hash(&first), "{:?} -> {:?}", mac, first);
            }
        }
    }
}
