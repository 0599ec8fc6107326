//! Fixed packet header and the TLV type registries (§3, §4.1.1, §6 of the
//! wire spec, supplemented from the original Cefore C headers).

use num_enum::TryFromPrimitive;
use zerocopy::{AsBytes, FromBytes, FromZeroes};

/// Size in bytes of the fixed header: `version, type, pkt_len(2),
/// hop_limit, ccninfo_retcode, ping_retcode, hdr_len`.
pub const FIXED_HEADER_SIZE: usize = 8;

/// Maximum size of a fully built message (`CefC_Max_Msg_Size`).
pub const MAX_MSG_SIZE: usize = 8192;

/// Maximum number of Ccninfo report (stamp) blocks a request may carry.
pub const MAX_STAMP_NUM: usize = 20;

/// NICT private enterprise number used for organization-specific TLVs.
pub const NICT_PEN: u32 = 0x00C96C;

/// The 8-byte fixed header shared by every packet type. Cast directly over
/// the first 8 bytes of a buffer with `zerocopy::Ref` for zero-copy parsing,
/// mirroring how the wire's `hdr_len`/`pkt_len` fields gate every other
/// offset into the packet.
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsBytes, FromBytes, FromZeroes)]
pub struct FixedHeader {
    pub version: u8,
    pub packet_type: u8,
    pub pkt_len: [u8; 2],
    pub hop_limit: u8,
    pub ccninfo_retcode: u8,
    pub ping_retcode: u8,
    pub hdr_len: u8,
}

impl FixedHeader {
    pub fn new(packet_type: PacketType, hop_limit: u8) -> Self {
        Self {
            version: 1,
            packet_type: packet_type as u8,
            pkt_len: [0, 0],
            hop_limit,
            ccninfo_retcode: 0,
            ping_retcode: 0,
            hdr_len: FIXED_HEADER_SIZE as u8,
        }
    }

    pub fn pkt_len(&self) -> u16 {
        u16::from_be_bytes(self.pkt_len)
    }

    pub fn set_pkt_len(&mut self, len: u16) {
        self.pkt_len = len.to_be_bytes();
    }

    /// `true` iff the framing invariants of §4.1.1 hold: `hdr_len >= 8`,
    /// `pkt_len >= hdr_len`.
    pub fn is_well_formed(&self) -> bool {
        self.hdr_len as usize >= FIXED_HEADER_SIZE && self.pkt_len() >= self.hdr_len as u16
    }
}

/// Packet type registry (`CefC_PT_*`).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PacketType {
    Interest = 0x00,
    Object = 0x01,
    /// Interest Return — parsed as opaque, never built (no reliability, §1 Non-goals).
    IntReturn = 0x02,
    Request = 0x03,
    Reply = 0x04,
    PingReq = 0x05,
    PingRep = 0x06,
    /// Control-plane route message — parsed as opaque here, handled by `fib`.
    Ctrl = 0x10,
    /// Babel routing protocol frame — parsed as opaque, never built (no
    /// routing protocol, §1 Non-goals).
    Babel = 0x11,
}

/// Top-level (outermost) TLV type registry.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TopLevelType {
    Interest = 0x0001,
    Object = 0x0002,
    ValidationAlg = 0x0003,
    ValidationPayload = 0x0004,
    Discovery = 0x0005,
    Ping = 0x0006,
}

/// Message-level TLV type registry (inside the top-level Interest/Object container).
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageTlvType {
    Name = 0x0000,
    Payload = 0x0001,
    KeyIdRestr = 0x0002,
    ObjHashRestr = 0x0003,
    PayloadType = 0x0005,
    Expiry = 0x0006,
    DiscReply = 0x0007,
    EndChunk = 0x000C,
    Org = 0x0FFF,
}

/// Hop-by-hop option TLV type registry.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionTlvType {
    IntLife = 0x0001,
    CacheTime = 0x0002,
    /// Message hash — TBD in the original spec, parsed opaquely (§9b).
    MsgHash = 0x0003,
    DiscReq = 0x0008,
    DiscReport = 0x0009,
    PingReq = 0x000A,
    Org = 0x0FFF,
    Symbolic = 0x1001,
    Transport = 0x1002,
    /// External Function Invocation — TBD, parsed opaquely (§9b).
    Efi = 0x1003,
    /// Interest User Request — TBD, parsed opaquely (§9b).
    Iur = 0x1004,
    /// Sequence number (private, `0x8008`).
    SeqNum = 0x8008,
}

/// Sub-TLV registry used inside an `OPT_SYMBOLIC` container.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SymbolicSubTlvType {
    Regular = 0x00,
    Innovative = 0x02,
    Piggyback = 0x03,
    Number = 0x04,
    SCode = 0x05,
    NwProc = 0x06,
}

/// Sub-block registry used inside a `T_DISC_REPLY` message TLV.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiscReplySubTlvType {
    Content = 0x0000,
    ContentOwner = 0x0001,
}

/// Validation algorithm identifier registry. Recognized, never implemented
/// (validation/crypto back end is an external collaborator, §1).
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationAlgType {
    Invalid = 0x0000,
    Crc32C = 0x0002,
    HmacSha256 = 0x0004,
    RsaSha256 = 0x0005,
    EcSecp256k1 = 0x0006,
    EcSecp384r1 = 0x0007,
    KeyCheck = 0x1001,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn fixed_header_is_eight_bytes() {
        assert_eq!(size_of::<FixedHeader>(), FIXED_HEADER_SIZE);
    }

    #[test]
    fn well_formed_requires_hdr_len_at_least_eight() {
        let mut h = FixedHeader::new(PacketType::Interest, 32);
        h.set_pkt_len(8);
        assert!(h.is_well_formed());
        h.hdr_len = 4;
        assert!(!h.is_well_formed());
    }

    #[test]
    fn packet_type_round_trips() {
        assert_eq!(PacketType::try_from(0x03u8).unwrap(), PacketType::Request);
        assert!(PacketType::try_from(0xFFu8).is_err());
    }
}
