//! Property tests for registry ids and their URL encoding.

use proptest::prelude::*;

use fractal::domain::value_objects::{percent_decode, percent_encode, FractalId};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: any valid id survives the trip through a URL path segment.
    #[test]
    fn property_id_round_trips_through_segment(raw in "[^\\x00-\\x1f\\x7f-\\x9f]{1,40}") {
        prop_assume!(raw != "." && raw != "..");
        let id = FractalId::new(raw.clone()).unwrap();
        let encoded = id.encoded();
        prop_assert!(!encoded.contains('/'), "separator leaked into {encoded}");
        prop_assert!(!encoded.contains(':'));
        prop_assert_eq!(FractalId::from_segment(&encoded).unwrap(), id);
    }

    /// PROPERTY: decoding is the inverse of encoding for arbitrary text.
    #[test]
    fn property_percent_encoding_round_trips(text in any::<String>()) {
        prop_assert_eq!(percent_decode(&percent_encode(&text)), Some(text));
    }

    /// PROPERTY: decoding arbitrary input never panics.
    #[test]
    fn property_percent_decode_is_total(text in any::<String>()) {
        let _ = percent_decode(&text);
    }
}
