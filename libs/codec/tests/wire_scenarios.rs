//! Cross-module round-trip scenarios for the wire codec, exercised only
//! through the public API (no access to crate-internal helpers) the way an
//! external consumer would use this crate.

use codec::{build_interest, parse, update_seqnum, uri_to_name, InterestOptions};
use config::ForwarderConfig;
use types::header::{FIXED_HEADER_SIZE, TopLevelType};

/// URI round-trip property, concrete case: `ccnx:/a/b/Chunk=3` encodes to
/// the exact 24-byte name wire form named in the spec's scenario table.
#[test]
fn uri_to_name_matches_concrete_byte_sequence() {
    let name = uri_to_name("ccnx:/a/b/Chunk=3").unwrap();
    let wire = name.to_wire();
    assert_eq!(
        wire,
        vec![
            0x00, 0x01, 0x00, 0x01, b'a', //
            0x00, 0x01, 0x00, 0x01, b'b', //
            0x00, 0x10, 0x00, 0x04, 0x00, 0x00, 0x00, 0x03,
        ]
    );
}

/// URI round-trip property, general form: every name segment surviving a
/// `uri_to_name`/`name_to_uri` round trip reproduces the original URI.
#[test]
fn uri_round_trip_is_stable_across_segment_forms() {
    for uri in [
        "ccnx:/a/b/c",
        "ccnx:/example/test/Chunk=12",
        "ccnx:/a/APP:1=hello",
    ] {
        let name = uri_to_name(uri).unwrap();
        let back = codec::name_to_uri(&name);
        assert_eq!(back, uri);
    }
}

/// Parse-encode round trip: re-parsing an assembled Interest reproduces the
/// name and payload the builder was given.
#[test]
fn interest_parse_encode_round_trip_preserves_name_and_payload() {
    let cfg = ForwarderConfig::default();
    let name = uri_to_name("ccnx:/a/b/c").unwrap();
    let mut buf = vec![0u8; cfg.max_msg_size];
    let opts = InterestOptions {
        chunk: None,
        nonce: None,
        lifetime: Some(4000),
        symbolic: None,
        payload: Some(b"hello"),
        transport: None,
        validation_alg: None,
    };
    let len = build_interest(&mut buf, &cfg, &name, 32, &opts).unwrap();

    let hdr_len = buf[7] as usize;
    let pkt_len = u16::from_be_bytes([buf[2], buf[3]]) as usize;
    assert_eq!(pkt_len, len);

    let (option_header, message) =
        parse(&buf, pkt_len, hdr_len, &[TopLevelType::Interest as u16]).unwrap();

    assert_eq!(option_header.int_life, Some(4000));
    assert_eq!(message.payload, Some(&b"hello"[..]));
    let parsed_name = types::Name::from_refs(&message.name);
    assert_eq!(parsed_name, name);
}

/// Sequence-number insertion property: inserting `OPT_SEQNUM` into a packet
/// of length `L` with none already present yields a packet of length
/// `L + 8`, with `hdr_len` and `pkt_len` both increased by 8 and every byte
/// before the insertion point unchanged.
#[test]
fn seqnum_insertion_grows_packet_by_eight_bytes_end_to_end() {
    let cfg = ForwarderConfig::default();
    let name = uri_to_name("ccnx:/a").unwrap();
    let mut buf = vec![0u8; cfg.max_msg_size];
    let opts = InterestOptions {
        chunk: None,
        nonce: None,
        lifetime: None,
        symbolic: None,
        payload: None,
        transport: None,
        validation_alg: None,
    };
    let len = build_interest(&mut buf, &cfg, &name, 32, &opts).unwrap();
    let pkt_len = u16::from_be_bytes([buf[2], buf[3]]) as usize;
    let hdr_len = buf[7] as usize;
    assert_eq!(pkt_len, len);
    assert!(hdr_len >= FIXED_HEADER_SIZE);

    let mut packet = buf[..len].to_vec();
    // version, packet_type, hop_limit, and the two retcode bytes are untouched
    // by the edit; only pkt_len (2..4) and hdr_len (7) are patched.
    let (version_before, packet_type_before) = (packet[0], packet[1]);
    let (hop_limit_before, retcodes_before) = (packet[4], (packet[5], packet[6]));
    let new_len = update_seqnum(&mut packet, len, 1).unwrap();

    assert_eq!(new_len, len + 8);
    assert_eq!(u16::from_be_bytes([packet[2], packet[3]]), (len + 8) as u16);
    assert_eq!(packet[7] as usize, hdr_len + 8);
    assert_eq!(packet[0], version_before);
    assert_eq!(packet[1], packet_type_before);
    assert_eq!(packet[4], hop_limit_before);
    assert_eq!((packet[5], packet[6]), retcodes_before);
}
