//! Property-based check of Testable Property 1 (URI round-trip): for every
//! valid URI built from plain alphanumeric segments, `name_to_uri` inverts
//! `uri_to_name` exactly.

use codec::{name_to_uri, uri_to_name};
use proptest::prelude::*;

fn plain_segment() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,8}".prop_filter("must not collide with a typed-segment prefix", |s| {
        !s.starts_with("chunk") && !s.starts_with("meta") && !s.starts_with("app")
    })
}

proptest! {
    #[test]
    fn uri_round_trip_holds_for_plain_segment_sequences(segments in prop::collection::vec(plain_segment(), 1..6)) {
        let uri = format!("ccnx:/{}", segments.join("/"));
        let name = uri_to_name(&uri).unwrap();
        prop_assert_eq!(name_to_uri(&name), uri);
    }

    #[test]
    fn uri_round_trip_holds_with_a_trailing_chunk_segment(
        segments in prop::collection::vec(plain_segment(), 1..5),
        chunk in 0u32..1_000_000,
    ) {
        let uri = format!("ccnx:/{}/Chunk={chunk}", segments.join("/"));
        let name = uri_to_name(&uri).unwrap();
        prop_assert_eq!(name_to_uri(&name), uri);
    }
}
