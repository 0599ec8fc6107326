//! Ccninfo-specific parsing (§4.1.6), independent of the generic
//! [`crate::parser::parse`]: it walks the `OPT_DISC_REQ`/`OPT_DISC_REPORT`
//! hop-by-hop TLVs and the message's `DISC_REPLY` sub-blocks directly,
//! since their internal layouts are private to the Ccninfo protocol rather
//! than part of the generic message-field registry.

use crate::error::{CodecError, CodecResult};
use crate::tlv::{iter_tlvs, read_u32};
use types::ccninfo::{NodeId, ReplyBlock, RequestFlags, ReportBlock};
use types::header::{DiscReplySubTlvType, MessageTlvType, OptionTlvType, FIXED_HEADER_SIZE};
use types::name::{Name, NameSegmentRef};

/// Everything `ccninfo_parse` recovers from a request or reply packet.
/// Report and reply blocks are owned (they may outlive one I/O buffer,
/// collected across multiple replies, §9) while the discovery name borrows
/// from the input buffer.
#[derive(Debug, Clone)]
pub struct ParsedCcninfo<'a> {
    pub packet_type: u8,
    pub return_code: u8,
    pub request_id: u16,
    pub skip_hop: u8,
    pub flags: RequestFlags,
    pub origin_arrival_time: u32,
    pub origin_node_id: NodeId,
    pub report_chain: Vec<ReportBlock>,
    pub discovery_name: Vec<NameSegmentRef<'a>>,
    pub reply_chain: Vec<ReplyBlock>,
}

fn parse_disc_req(value: &[u8]) -> CodecResult<(u16, u8, RequestFlags, u32, NodeId)> {
    if value.len() < 10 {
        return Err(CodecError::truncated(10, value.len(), "OPT_DISC_REQ block"));
    }
    let request_id = u16::from_be_bytes([value[0], value[1]]);
    let skip_hop = value[2];
    let flags = RequestFlags::new(value[3]);
    let arrival_time = u32::from_be_bytes([value[4], value[5], value[6], value[7]]);
    let node_id_len = u16::from_be_bytes([value[8], value[9]]) as usize;
    let node_id_bytes = value.get(10..10 + node_id_len).ok_or_else(|| {
        CodecError::truncated(10 + node_id_len, value.len(), "OPT_DISC_REQ node id")
    })?;
    Ok((
        request_id,
        skip_hop,
        flags,
        arrival_time,
        NodeId::from_bytes(node_id_bytes),
    ))
}

fn parse_disc_report(value: &[u8]) -> CodecResult<ReportBlock> {
    if value.len() < 6 {
        return Err(CodecError::truncated(6, value.len(), "OPT_DISC_REPORT block"));
    }
    let arrival_time = u32::from_be_bytes([value[0], value[1], value[2], value[3]]);
    let node_id_len = u16::from_be_bytes([value[4], value[5]]) as usize;
    let node_id_bytes = value.get(6..6 + node_id_len).ok_or_else(|| {
        CodecError::truncated(6 + node_id_len, value.len(), "OPT_DISC_REPORT node id")
    })?;
    Ok(ReportBlock {
        arrival_time,
        node_id: NodeId::from_bytes(node_id_bytes),
    })
}

/// Parses one `T_DISC_REPLY` container's value: a sub-block TLV (tagged
/// `DiscReplySubTlvType::Content`/`ContentOwner`, bare 28-byte value per
/// §6) and a sibling `Name` TLV carrying the content name (§3, §4.3.3) —
/// the mirror image of [`crate::builder::write_reply_block`].
fn parse_reply_block(value: &[u8]) -> CodecResult<ReplyBlock> {
    let mut content_type = None;
    let mut fields: Option<[u8; 28]> = None;
    let mut name_segments = Vec::new();

    for tlv in iter_tlvs(value) {
        let tlv = tlv?;
        if let Ok(sub_type) = DiscReplySubTlvType::try_from(tlv.tlv_type) {
            if tlv.value.len() != 28 {
                return Err(CodecError::truncated(28, tlv.value.len(), "DISC_REPLY sub-block"));
            }
            let mut buf = [0u8; 28];
            buf.copy_from_slice(tlv.value);
            content_type = Some(sub_type);
            fields = Some(buf);
        } else if tlv.tlv_type == MessageTlvType::Name as u16 {
            name_segments = iter_tlvs(tlv.value)
                .map(|seg| {
                    seg.map(|t| {
                        types::name::NameSegment::new(types::name::SegmentType::from_wire(t.tlv_type), t.value)
                    })
                })
                .collect::<CodecResult<Vec<_>>>()?;
        }
    }

    let content_type = content_type
        .ok_or_else(|| CodecError::truncated(28, 0, "DISC_REPLY sub-block type"))?;
    let fields = fields.expect("set alongside content_type");

    Ok(ReplyBlock {
        content_type,
        object_size: read_u32(&fields[0..4])?,
        object_count: read_u32(&fields[4..8])?,
        received_interest_count: read_u32(&fields[8..12])?,
        first_chunk_seq: read_u32(&fields[12..16])?,
        last_chunk_seq: read_u32(&fields[16..20])?,
        cache_time: read_u32(&fields[20..24])?,
        remaining_lifetime: read_u32(&fields[24..28])?,
        name: Name::from_segments(name_segments),
    })
}

/// Parses a Ccninfo request or reply packet (§4.1.6). Unlike
/// [`crate::parser::parse`], this walks the option header and message body
/// using the Ccninfo-private sub-layouts directly.
pub fn ccninfo_parse(msg: &[u8], payload_len: usize, header_len: usize) -> CodecResult<ParsedCcninfo<'_>> {
    if header_len < FIXED_HEADER_SIZE || payload_len < header_len || msg.len() < payload_len {
        return Err(CodecError::truncated(payload_len, msg.len(), "Ccninfo packet"));
    }

    let packet_type = msg[1];
    let return_code = msg[5];

    let mut request_id = 0u16;
    let mut skip_hop = 0u8;
    let mut flags = RequestFlags::default();
    let mut origin_arrival_time = 0u32;
    let mut origin_node_id = NodeId::Opaque(Vec::new());
    let mut report_chain = Vec::new();

    for tlv in iter_tlvs(&msg[FIXED_HEADER_SIZE..header_len]) {
        let tlv = tlv?;
        if tlv.tlv_type == OptionTlvType::DiscReq as u16 {
            let (id, skip, flg, arrival, node) = parse_disc_req(tlv.value)?;
            request_id = id;
            skip_hop = skip;
            flags = flg;
            origin_arrival_time = arrival;
            origin_node_id = node;
        } else if tlv.tlv_type == OptionTlvType::DiscReport as u16 {
            report_chain.push(parse_disc_report(tlv.value)?);
        }
    }

    let message_region = &msg[header_len..payload_len];
    let mut discovery_name = Vec::new();
    let mut reply_chain = Vec::new();
    if let Some(top) = iter_tlvs(message_region).next() {
        let top = top?;
        for tlv in iter_tlvs(top.value) {
            let tlv = tlv?;
            if tlv.tlv_type == types::header::MessageTlvType::Name as u16 {
                for seg in iter_tlvs(tlv.value) {
                    let seg = seg?;
                    discovery_name.push(NameSegmentRef {
                        seg_type: types::name::SegmentType::from_wire(seg.tlv_type),
                        value: seg.value,
                    });
                }
            } else if tlv.tlv_type == types::header::MessageTlvType::DiscReply as u16 {
                reply_chain.push(parse_reply_block(tlv.value)?);
            }
        }
    }

    Ok(ParsedCcninfo {
        packet_type,
        return_code,
        request_id,
        skip_hop,
        flags,
        origin_arrival_time,
        origin_node_id,
        report_chain,
        discovery_name,
        reply_chain,
    })
}

/// Releases a parsed Ccninfo chain (§4.1.6). Owned `Vec`s free themselves
/// on drop; this exists as the explicit release point the lifecycle note
/// calls for so call sites have one place to retire a parsed reply instead
/// of relying on implicit scope exit.
pub fn ccninfo_parsed_free(parsed: ParsedCcninfo<'_>) {
    drop(parsed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{build_ccninfo_request, CcninfoRequestOptions};
    use crate::edit::add_ccninfo_stamp;
    use crate::uri::uri_to_name;
    use config::ForwarderConfig;
    use std::net::Ipv4Addr;

    #[test]
    fn round_trips_request_id_and_node_id() {
        let name = uri_to_name("ccnx:/a").unwrap();
        let cfg = ForwarderConfig::default();
        let mut buf = vec![0u8; 8192];
        let node = NodeId::V4(Ipv4Addr::new(10, 0, 0, 1));
        let len = build_ccninfo_request(
            &mut buf,
            &cfg,
            &name,
            32,
            0,
            RequestFlags::new(RequestFlags::CACHE),
            0x0001,
            &node,
            &CcninfoRequestOptions::default(),
        )
        .unwrap();
        let hdr_len = buf[7] as usize;

        let parsed = ccninfo_parse(&buf, len, hdr_len).unwrap();
        assert_eq!(parsed.request_id, 0x0001 | 0x8080);
        assert_eq!(parsed.origin_node_id, node);
        assert!(parsed.flags.contains(RequestFlags::CACHE));
        assert_eq!(parsed.report_chain.len(), 0);
    }

    #[test]
    fn collects_appended_stamps_in_order() {
        let name = uri_to_name("ccnx:/a").unwrap();
        let cfg = ForwarderConfig::default();
        let mut backing = vec![0u8; 8192];
        let node = NodeId::V4(Ipv4Addr::new(10, 0, 0, 1));
        let len = build_ccninfo_request(
            &mut backing,
            &cfg,
            &name,
            32,
            0,
            RequestFlags::default(),
            1,
            &node,
            &CcninfoRequestOptions::default(),
        )
        .unwrap();
        let mut buf = backing[..len].to_vec();

        let len = add_ccninfo_stamp(&mut buf, len, 20, 8192, 0x1111_0000, &[10, 0, 0, 2]).unwrap();
        let _ = add_ccninfo_stamp(&mut buf, len, 20, 8192, 0x2222_0000, &[10, 0, 0, 3]).unwrap();
        let hdr_len = buf[7] as usize;
        let pkt_len = u16::from_be_bytes([buf[2], buf[3]]) as usize;

        let parsed = ccninfo_parse(&buf, pkt_len, hdr_len).unwrap();
        assert_eq!(parsed.report_chain.len(), 2);
        assert_eq!(parsed.report_chain[0].arrival_time, 0x1111_0000);
        assert_eq!(parsed.report_chain[1].arrival_time, 0x2222_0000);
    }

    /// Reply sub-blocks carry content type as their own TLV type
    /// (`DiscReplySubTlvType::Content`/`ContentOwner`), a bare 28-byte
    /// 7×u32 value, and a sibling `Name` TLV — not an inline content-type
    /// byte or length-prefixed name (§3, §6).
    #[test]
    fn reply_block_round_trips_content_type_and_name() {
        use crate::builder::build_ccninfo_reply;
        use types::ReturnCode;

        let name = uri_to_name("ccnx:/a").unwrap();
        let cfg = ForwarderConfig::default();
        let node = NodeId::V4(Ipv4Addr::new(10, 0, 0, 1));
        let mut buf = vec![0u8; 8192];
        let req_len = build_ccninfo_request(
            &mut buf,
            &cfg,
            &name,
            32,
            0,
            RequestFlags::default(),
            1,
            &node,
            &CcninfoRequestOptions::default(),
        )
        .unwrap();

        let blocks = vec![
            ReplyBlock {
                content_type: DiscReplySubTlvType::Content,
                object_size: 1024,
                object_count: 4,
                received_interest_count: 9,
                first_chunk_seq: 0,
                last_chunk_seq: 3,
                cache_time: 12,
                remaining_lifetime: 3_600,
                name: uri_to_name("ccnx:/a/content").unwrap(),
            },
            ReplyBlock {
                content_type: DiscReplySubTlvType::ContentOwner,
                object_size: 0,
                object_count: 0,
                received_interest_count: 0,
                first_chunk_seq: 0,
                last_chunk_seq: 0,
                cache_time: 0,
                remaining_lifetime: 0,
                name: uri_to_name("ccnx:/a/owner").unwrap(),
            },
        ];

        let reply_len =
            build_ccninfo_reply(&mut buf, req_len, &cfg, ReturnCode::NoError, &blocks, None).unwrap();
        let hdr_len = buf[7] as usize;
        let parsed = ccninfo_parse(&buf, reply_len, hdr_len).unwrap();

        assert_eq!(parsed.reply_chain.len(), 2);
        assert_eq!(parsed.reply_chain[0].content_type, DiscReplySubTlvType::Content);
        assert_eq!(parsed.reply_chain[0].object_size, 1024);
        assert_eq!(parsed.reply_chain[0].name, uri_to_name("ccnx:/a/content").unwrap());
        assert_eq!(parsed.reply_chain[1].content_type, DiscReplySubTlvType::ContentOwner);
        assert_eq!(parsed.reply_chain[1].name, uri_to_name("ccnx:/a/owner").unwrap());
    }
}
