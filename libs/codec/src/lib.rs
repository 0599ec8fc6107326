//! # Cefore Wire Codec
//!
//! The TLV message codec for the CCNx/Cefore forwarder core (§4.1): wire
//! framing, URI↔Name conversion, the five message builders, parsing with
//! borrowed-slice views, in-place hop-by-hop edits, Ccninfo-specific
//! parsing, and the 64-bit endian helper pair.
//!
//! ## What This Crate Contains
//! - [`builder`]: Interest, Content Object, Ccninfo request/reply, and
//!   Cefping request/reply construction.
//! - [`parser`]: the generic packet parser producing borrowed views.
//! - [`ccninfo_parse`]: the Ccninfo-private parse path and its explicit
//!   release routine.
//! - [`edit`]: in-place sequence-number, cache-time, symbolic-code, and
//!   Ccninfo-stamp edits.
//! - [`uri`]: `ccnx:/...` URI ↔ `Name` conversion.
//!
//! ## What This Crate Does NOT Contain
//! - The data model itself (belongs in `types`).
//! - The FIB's lookup table (belongs in `fib`).
//! - Ccninfo request lifecycle/timing policy (belongs in `ccninfo`).
//!
//! Codec errors are always returned to the caller; this crate never logs
//! (§7) — the forwarder decides whether a dropped packet is worth a
//! `tracing` event.

pub mod ccninfo_parse;
pub mod builder;
pub mod edit;
pub mod endian;
pub mod error;
pub mod message;
pub mod parser;
pub mod tlv;
pub mod uri;

pub use builder::{
    build_ccninfo_reply, build_ccninfo_request, build_cefping_reply, build_cefping_request,
    build_content_object, build_interest, CcninfoRequestOptions, ContentObjectOptions,
    InterestOptions, SymbolicInterestOptions,
};
pub use ccninfo_parse::{ccninfo_parse, ccninfo_parsed_free, ParsedCcninfo};
pub use edit::{
    add_ccninfo_stamp, add_symbolic_code, ntp32_now, stamp_seqnum_if_enabled, update_cache_time,
    update_seqnum,
};
pub use endian::{htonb, ntohb};
pub use error::{CodecError, CodecResult};
pub use parser::{parse, ParsedMessage, ParsedOptionHeader};
pub use tlv::{iter_tlvs, next_tlv_boundary, RawTlv};
pub use uri::{name_to_uri, uri_to_name};
