//! # Cefore Wire Types
//!
//! Pure data model for the CCNx/Cefore TLV wire protocol: names, the fixed
//! packet header, the TLV type registries, and the record shapes exchanged by
//! the Ccninfo discovery engine.
//!
//! ## What This Crate Contains
//! - `Name` / `NameSegment`: the ordered, typed segment sequence that is a
//!   packet's routing key.
//! - `FixedHeader` and the packet/TLV type registries from the wire spec.
//! - `ReportBlock` / `ReplyBlock`: the per-hop and per-cache-entry records
//!   carried inside a Ccninfo reply.
//!
//! ## What This Crate Does NOT Contain
//! - Parsing or encoding logic (belongs in `codec`).
//! - The FIB's hash table or lookup algorithm (belongs in `fib`).
//! - Request/reply construction logic (belongs in `ccninfo`).

pub mod header;
pub mod name;
pub mod ccninfo;

pub use ccninfo::{NodeId, ReplyBlock, ReportBlock, RequestFlags, ReturnCode};
pub use header::{
    DiscReplySubTlvType, FixedHeader, MessageTlvType, OptionTlvType, PacketType,
    SymbolicSubTlvType, TopLevelType, ValidationAlgType, FIXED_HEADER_SIZE, MAX_MSG_SIZE,
    MAX_STAMP_NUM, NICT_PEN,
};
pub use name::{Name, NameSegment, NameSegmentRef, SegmentType, UriScheme};
