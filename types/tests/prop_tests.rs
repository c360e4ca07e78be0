use proptest::prelude::*;

use agora_types::{ItemId, Principal, Timestamp};

proptest! {
    /// Principal display/parse roundtrip for arbitrary address bytes.
    #[test]
    fn principal_display_parse_roundtrip(bytes in prop::array::uniform20(0u8..)) {
        let p = Principal::from_bytes(bytes);
        let parsed = Principal::parse(&p.to_string()).unwrap();
        prop_assert_eq!(parsed, p);
    }

    /// Principal::is_zero is true only for all-zero bytes.
    #[test]
    fn principal_is_zero_correct(bytes in prop::array::uniform20(0u8..)) {
        prop_assert_eq!(Principal::from_bytes(bytes).is_zero(), bytes == [0u8; 20]);
    }

    /// A deadline `window` seconds out is reached exactly when `offset >= window`.
    #[test]
    fn timestamp_deadline_matches_arithmetic(
        start in 0u64..1_000_000,
        window in 1u64..100_000,
        offset in 0u64..200_000,
    ) {
        let deadline = Timestamp::new(start).plus(window);
        let now = Timestamp::new(start + offset);
        prop_assert_eq!(now >= deadline, offset >= window);
    }

    /// ItemId ordering follows the numeric id.
    #[test]
    fn item_id_ordering(a in any::<u64>(), b in any::<u64>()) {
        prop_assert_eq!(ItemId::new(a) < ItemId::new(b), a < b);
    }
}
