//! Property-based tests over the address parser, per the testable
//! properties section of the crate's design notes: no panics, every
//! returned code is in range, and the threshold semantics of the boolean
//! API agree with the underlying diagnosis.

use isemail::{is_valid, parse};
use isemail_types::{Category, Kind};
use proptest::prelude::*;

/// atext / specials / SP / HTAB / CR / LF, the alphabet the design notes
/// call out for generative testing.
fn address_byte() -> impl Strategy<Value = u8> {
    prop_oneof![
        Just(b'@'),
        Just(b'.'),
        Just(b'"'),
        Just(b'('),
        Just(b')'),
        Just(b'['),
        Just(b']'),
        Just(b'\\'),
        Just(b' '),
        Just(b'\t'),
        Just(b'\r'),
        Just(b'\n'),
        b'a'..=b'z',
        b'A'..=b'Z',
        b'0'..=b'9',
        Just(b'-'),
        Just(b'_'),
        Just(b'!'),
        Just(b'#'),
    ]
}

proptest! {
    #[test]
    fn never_panics_and_code_is_in_range(bytes in prop::collection::vec(address_byte(), 0..128)) {
        let diagnosis = parse(&bytes);
        prop_assert!(diagnosis.code() as u32 <= 255);
    }

    #[test]
    fn determinism(bytes in prop::collection::vec(address_byte(), 0..64)) {
        let first = parse(&bytes);
        let second = parse(&bytes);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn threshold_semantics_match_boolean_api(bytes in prop::collection::vec(address_byte(), 0..64)) {
        let diagnosis = parse(&bytes);
        prop_assert_eq!(is_valid(&bytes), diagnosis.code() < Category::THRESHOLD);
    }

    #[test]
    fn code_is_monotone_within_category(bytes in prop::collection::vec(address_byte(), 0..64)) {
        let diagnosis = parse(&bytes);
        prop_assert!(diagnosis.code() <= diagnosis.category() as u8);
    }

    #[test]
    fn local_too_long_is_reported_when_local_part_exceeds_64(
        local_len in 65usize..100,
    ) {
        let local = "a".repeat(local_len);
        let address = format!("{local}@example.com");
        let diagnosis = parse(address.as_bytes());
        prop_assert!(diagnosis.code() >= Kind::Rfc5322LocalTooLong.code());
    }
}
