//! Message parsing (§4.1.4). Walks the hop-by-hop option region and the
//! top-level message region independently; every byte-slice field in the
//! returned views borrows from `msg` — nothing here allocates except the
//! small `Vec`s that hold repeated fields (`org`, unknown option TLVs).

use crate::error::{CodecError, CodecResult};
use crate::tlv::{iter_tlvs, read_u32, read_u64, RawTlv};
use types::header::{FIXED_HEADER_SIZE, MessageTlvType, OptionTlvType};
use types::name::{NameSegmentRef, SegmentType};

/// A parsed hop-by-hop option region (§4.1.1, §4.1.4).
#[derive(Debug, Clone, Default)]
pub struct ParsedOptionHeader<'a> {
    pub int_life: Option<u32>,
    pub cache_time: Option<u64>,
    /// Opaque per §9(b) — TBD in the original registry.
    pub msg_hash: Option<&'a [u8]>,
    pub disc_req: Option<&'a [u8]>,
    pub disc_reports: Vec<&'a [u8]>,
    pub ping_req: Option<&'a [u8]>,
    pub org: Vec<&'a [u8]>,
    pub symbolic: Option<&'a [u8]>,
    pub transport: Option<&'a [u8]>,
    /// Opaque per §9(b).
    pub efi: Option<&'a [u8]>,
    /// Opaque per §9(b).
    pub iur: Option<&'a [u8]>,
    pub seqnum: Option<u32>,
}

/// A parsed top-level message (§4.1.4). The `expected_top_type` the caller
/// passed in is echoed back as `top_type`.
#[derive(Debug, Clone, Default)]
pub struct ParsedMessage<'a> {
    pub top_type: u16,
    pub name: Vec<NameSegmentRef<'a>>,
    pub payload: Option<&'a [u8]>,
    pub keyid_restr: Option<&'a [u8]>,
    pub objhash_restr: Option<&'a [u8]>,
    pub payload_type: Option<u8>,
    pub expiry: Option<u64>,
    pub disc_reply: Vec<&'a [u8]>,
    pub end_chunk: Option<u32>,
    pub org: Vec<&'a [u8]>,
    pub validation_alg: Option<&'a [u8]>,
    pub validation_payload: Option<&'a [u8]>,
}

fn parse_option_header<'a>(region: &'a [u8]) -> CodecResult<ParsedOptionHeader<'a>> {
    let mut header = ParsedOptionHeader::default();
    let mut seen_int_life = false;
    let mut seen_cache_time = false;
    let mut seen_seqnum = false;

    for tlv in iter_tlvs(region) {
        let RawTlv { tlv_type, value } = tlv?;
        match OptionTlvType::try_from(tlv_type) {
            Ok(OptionTlvType::IntLife) => {
                if seen_int_life {
                    return Err(CodecError::DuplicateSingleton { tlv_type });
                }
                seen_int_life = true;
                header.int_life = Some(read_u32(value)?);
            }
            Ok(OptionTlvType::CacheTime) => {
                if seen_cache_time {
                    return Err(CodecError::DuplicateSingleton { tlv_type });
                }
                seen_cache_time = true;
                header.cache_time = Some(read_u64(value)?);
            }
            Ok(OptionTlvType::MsgHash) => header.msg_hash = Some(value),
            Ok(OptionTlvType::DiscReq) => header.disc_req = Some(value),
            Ok(OptionTlvType::DiscReport) => header.disc_reports.push(value),
            Ok(OptionTlvType::PingReq) => header.ping_req = Some(value),
            Ok(OptionTlvType::Org) => header.org.push(value),
            Ok(OptionTlvType::Symbolic) => header.symbolic = Some(value),
            Ok(OptionTlvType::Transport) => header.transport = Some(value),
            Ok(OptionTlvType::Efi) => header.efi = Some(value),
            Ok(OptionTlvType::Iur) => header.iur = Some(value),
            Ok(OptionTlvType::SeqNum) => {
                if seen_seqnum {
                    return Err(CodecError::DuplicateSingleton { tlv_type });
                }
                seen_seqnum = true;
                header.seqnum = Some(read_u32(value)?);
            }
            Err(_) => {} // unknown option TLV: skip, forward-compatible (§4.1.4, §7)
        }
    }
    Ok(header)
}

fn parse_name(value: &[u8]) -> CodecResult<Vec<NameSegmentRef<'_>>> {
    let mut segments = Vec::new();
    for tlv in iter_tlvs(value) {
        let RawTlv { tlv_type, value } = tlv?;
        segments.push(NameSegmentRef {
            seg_type: SegmentType::from_wire(tlv_type),
            value,
        });
    }
    Ok(segments)
}

fn parse_message_body<'a>(top_type: u16, value: &'a [u8]) -> CodecResult<ParsedMessage<'a>> {
    let mut message = ParsedMessage {
        top_type,
        ..Default::default()
    };
    let mut seen_name = false;

    for tlv in iter_tlvs(value) {
        let RawTlv { tlv_type, value } = tlv?;
        match MessageTlvType::try_from(tlv_type) {
            Ok(MessageTlvType::Name) => {
                if seen_name {
                    return Err(CodecError::DuplicateSingleton { tlv_type });
                }
                seen_name = true;
                message.name = parse_name(value)?;
            }
            Ok(MessageTlvType::Payload) => message.payload = Some(value),
            Ok(MessageTlvType::KeyIdRestr) => message.keyid_restr = Some(value),
            Ok(MessageTlvType::ObjHashRestr) => message.objhash_restr = Some(value),
            Ok(MessageTlvType::PayloadType) => {
                message.payload_type = Some(*value.first().ok_or_else(|| {
                    CodecError::truncated(1, 0, "PAYLDTYPE TLV value")
                })?);
            }
            Ok(MessageTlvType::Expiry) => message.expiry = Some(read_u64(value)?),
            Ok(MessageTlvType::DiscReply) => message.disc_reply.push(value),
            Ok(MessageTlvType::EndChunk) => message.end_chunk = Some(read_u32(value)?),
            Ok(MessageTlvType::Org) => message.org.push(value),
            Err(_) => {} // unknown message TLV: skip (§4.1.4, §7)
        }
    }
    Ok(message)
}

/// Parses a complete packet (§4.1.4): walks the hop-by-hop region
/// `msg[8..header_len]` and the message region `msg[header_len..payload_len]`.
/// The message region's first TLV must be one of `expected_top_types`; any
/// `VALIDATION_ALG`/`VALIDATION_PAYLOAD` TLVs that follow it are folded into
/// the returned `ParsedMessage`.
pub fn parse<'a>(
    msg: &'a [u8],
    payload_len: usize,
    header_len: usize,
    expected_top_types: &[u16],
) -> CodecResult<(ParsedOptionHeader<'a>, ParsedMessage<'a>)> {
    if header_len < FIXED_HEADER_SIZE {
        return Err(CodecError::invalid_argument(format!(
            "header_len {header_len} is below the fixed header size"
        )));
    }
    if payload_len < header_len {
        return Err(CodecError::invalid_argument(format!(
            "payload_len {payload_len} is below header_len {header_len}"
        )));
    }
    if msg.len() < payload_len {
        return Err(CodecError::truncated(payload_len, msg.len(), "packet buffer"));
    }

    let option_header = parse_option_header(&msg[FIXED_HEADER_SIZE..header_len])?;

    let message_region = &msg[header_len..payload_len];
    let mut top_level = iter_tlvs(message_region);
    let first = top_level
        .next()
        .ok_or_else(|| CodecError::truncated(4, 0, "top-level message TLV"))??;
    if !expected_top_types.contains(&first.tlv_type) {
        return Err(CodecError::TopTypeMismatch {
            got: first.tlv_type,
            expected: expected_top_types.to_vec(),
        });
    }
    let mut message = parse_message_body(first.tlv_type, first.value)?;

    for tlv in top_level {
        let RawTlv { tlv_type, value } = tlv?;
        match types::header::TopLevelType::try_from(tlv_type) {
            Ok(types::header::TopLevelType::ValidationAlg) => message.validation_alg = Some(value),
            Ok(types::header::TopLevelType::ValidationPayload) => {
                message.validation_payload = Some(value)
            }
            _ => {} // trailing unknown top-level TLVs: skip (§4.1.4, §7)
        }
    }

    Ok((option_header, message))
}
