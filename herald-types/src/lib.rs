pub mod constants;
pub mod error;
pub mod network;
pub mod notice;
pub mod primitives;

#[cfg(test)]
mod tests {
    use borsh::{BorshDeserialize, BorshSerialize};

    /// Helper: borsh round-trip test.
    fn borsh_roundtrip<T: BorshSerialize + BorshDeserialize + PartialEq + std::fmt::Debug>(
        value: &T,
    ) {
        let encoded = borsh::to_vec(value).expect("borsh serialize failed");
        let decoded = T::try_from_slice(&encoded).expect("borsh deserialize failed");
        assert_eq!(*value, decoded);
    }

    #[test]
    fn test_unsigned_notice_roundtrip() {
        use crate::notice::UnsignedNotice;
        let notice = UnsignedNotice {
            version: 1,
            relay_until: 1_010,
            expiration: 1_100,
            created: 1_000,
            id: 42,
            language: 0,
            priority: 5,
            header: "Mandatory upgrade".to_string(),
            message: "Version 0.4 fixes a consensus bug.".to_string(),
            tray_notify: "Please upgrade".to_string(),
        };
        borsh_roundtrip(&notice);
    }

    #[test]
    fn test_signed_notice_roundtrip() {
        use crate::notice::SignedNotice;
        let signed = SignedNotice {
            payload: vec![1, 2, 3, 4],
            signature: [9u8; 64],
        };
        borsh_roundtrip(&signed);
    }

    #[test]
    fn test_unsigned_notice_trailing_bytes_rejected() {
        use crate::notice::UnsignedNotice;
        let mut encoded = borsh::to_vec(&UnsignedNotice::default()).unwrap();
        encoded.push(0);
        assert!(UnsignedNotice::try_from_slice(&encoded).is_err());
    }
}
