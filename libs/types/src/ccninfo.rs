//! Record shapes exchanged by the Ccninfo discovery protocol (§4.3, §6).

use crate::header::DiscReplySubTlvType;
use crate::name::Name;
use num_enum::TryFromPrimitive;
use std::net::{Ipv4Addr, Ipv6Addr};

/// A node identifier: the original protocol accepts an IPv4 literal, an
/// IPv6 literal, or an opaque byte string (§3).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeId {
    V4(Ipv4Addr),
    V6(Ipv6Addr),
    Opaque(Vec<u8>),
}

impl NodeId {
    /// Wire bytes of this node identifier (4, 16, or the opaque length).
    pub fn as_bytes(&self) -> Vec<u8> {
        match self {
            NodeId::V4(addr) => addr.octets().to_vec(),
            NodeId::V6(addr) => addr.octets().to_vec(),
            NodeId::Opaque(bytes) => bytes.clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            NodeId::V4(_) => 4,
            NodeId::V6(_) => 16,
            NodeId::Opaque(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reconstruct a node identifier from its wire bytes, choosing the
    /// natural representation for 4- and 16-byte forms.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match bytes.len() {
            4 => NodeId::V4(Ipv4Addr::new(bytes[0], bytes[1], bytes[2], bytes[3])),
            16 => {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(bytes);
                NodeId::V6(Ipv6Addr::from(octets))
            }
            _ => NodeId::Opaque(bytes.to_vec()),
        }
    }
}

/// Ccninfo request flags (§4.3.1). Bitwise-combinable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RequestFlags(pub u8);

impl RequestFlags {
    pub const NONE: u8 = 0x00;
    pub const CACHE: u8 = 0x01;
    pub const PUBLISHER: u8 = 0x02;
    pub const FULL_DISCOVER: u8 = 0x04;

    pub fn new(bits: u8) -> Self {
        Self(bits)
    }

    pub fn contains(&self, flag: u8) -> bool {
        self.0 & flag == flag
    }

    pub fn set(&mut self, flag: u8) {
        self.0 |= flag;
    }

    pub fn clear(&mut self, flag: u8) {
        self.0 &= !flag;
    }
}

/// Ccninfo return codes (§4.3.5).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReturnCode {
    NoError = 0x00,
    WrongIf = 0x01,
    InvalidRequest = 0x02,
    NoRoute = 0x03,
    NoInfo = 0x04,
    NoSpace = 0x05,
    InfoHidden = 0x06,
    AdminProhib = 0x0E,
    UnknownRequest = 0x0F,
    FatalError = 0x80,
}

/// One per-hop report block (a "stamp") appended as a Ccninfo request
/// transits a router (§4.3.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBlock {
    /// NTP-32 arrival timestamp: 16 bits of seconds offset, 16 bits fraction.
    pub arrival_time: u32,
    pub node_id: NodeId,
}

/// One reply block describing a matched cache entry (§3, §4.3.3). On the
/// wire, `content_type` is carried as the reply sub-block's own TLV type
/// (`DiscReplySubTlvType::Content`/`ContentOwner`), not an inline data byte
/// — the 7 fixed-width fields below are the bare 28-byte value of that
/// sub-block TLV (§6), and `name` is a sibling `Name` TLV alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyBlock {
    pub content_type: DiscReplySubTlvType,
    pub object_size: u32,
    pub object_count: u32,
    pub received_interest_count: u32,
    pub first_chunk_seq: u32,
    pub last_chunk_seq: u32,
    pub cache_time: u32,
    pub remaining_lifetime: u32,
    pub name: Name,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_round_trips_v4() {
        let id = NodeId::V4(Ipv4Addr::new(10, 0, 0, 2));
        let bytes = id.as_bytes();
        assert_eq!(bytes, vec![10, 0, 0, 2]);
        assert_eq!(NodeId::from_bytes(&bytes), id);
    }

    #[test]
    fn request_flags_are_bitwise_combinable() {
        let mut flags = RequestFlags::new(RequestFlags::CACHE);
        flags.set(RequestFlags::FULL_DISCOVER);
        assert!(flags.contains(RequestFlags::CACHE));
        assert!(flags.contains(RequestFlags::FULL_DISCOVER));
        assert!(!flags.contains(RequestFlags::PUBLISHER));
        flags.clear(RequestFlags::CACHE);
        assert!(!flags.contains(RequestFlags::CACHE));
    }
}
