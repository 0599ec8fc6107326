//! The five message builders (§4.1.3). Each writes a complete packet into
//! a caller-supplied buffer of at least `ForwarderConfig::max_msg_size`
//! bytes and returns the number of bytes written.

use crate::error::{CodecError, CodecResult};
use crate::message::{assemble_packet, finish_into, patch_lengths};
use crate::tlv::{write_tlv, write_u32_tlv, write_u64_tlv};
use config::ForwarderConfig;
use types::ccninfo::{NodeId, ReplyBlock, RequestFlags, ReturnCode};
use types::header::{
    MessageTlvType, OptionTlvType, PacketType, SymbolicSubTlvType, TopLevelType, ValidationAlgType,
};
use types::name::{Name, NameSegment, SegmentType};

/// Sub-TLVs fed into an `OPT_SYMBOLIC` container on a symbolic Interest.
#[derive(Debug, Clone, Default)]
pub struct SymbolicInterestOptions {
    pub piggyback: bool,
    pub requested_cobs: Option<u32>,
    pub symbolic_code: Option<[u8; 8]>,
}

fn write_symbolic_options(out: &mut Vec<u8>, opts: &SymbolicInterestOptions) {
    let mut inner = Vec::new();
    write_tlv(&mut inner, SymbolicSubTlvType::Regular as u16, &[]);
    if opts.piggyback {
        write_tlv(&mut inner, SymbolicSubTlvType::Piggyback as u16, &[]);
    }
    if let Some(n) = opts.requested_cobs {
        write_u32_tlv(&mut inner, SymbolicSubTlvType::Number as u16, n);
    }
    if let Some(code) = opts.symbolic_code {
        write_tlv(&mut inner, SymbolicSubTlvType::SCode as u16, &code);
    }
    write_tlv(out, OptionTlvType::Symbolic as u16, &inner);
}

fn name_with_trailing(name: &Name, extra: impl IntoIterator<Item = NameSegment>) -> Vec<u8> {
    let mut effective = name.clone();
    effective.segments.extend(extra);
    effective.to_wire()
}

/// Optional fields accepted by [`build_interest`].
#[derive(Debug, Clone, Default)]
pub struct InterestOptions<'a> {
    pub chunk: Option<u32>,
    pub nonce: Option<&'a [u8]>,
    pub lifetime: Option<u32>,
    pub symbolic: Option<SymbolicInterestOptions>,
    /// Piggyback payload carried on the Interest itself.
    pub payload: Option<&'a [u8]>,
    pub transport: Option<&'a [u8]>,
    pub validation_alg: Option<ValidationAlgType>,
}

pub fn build_interest(
    buf: &mut [u8],
    cfg: &ForwarderConfig,
    name: &Name,
    hop_limit: u8,
    opts: &InterestOptions<'_>,
) -> CodecResult<usize> {
    let mut options = Vec::new();
    if let Some(lifetime) = opts.lifetime {
        write_u32_tlv(&mut options, OptionTlvType::IntLife as u16, lifetime);
    }
    if let Some(sym) = &opts.symbolic {
        write_symbolic_options(&mut options, sym);
    }
    if let Some(transport) = opts.transport {
        write_tlv(&mut options, OptionTlvType::Transport as u16, transport);
    }
    // `OPT_SEQNUM` is never written here: per §4.1.5 the sequence-number
    // edit operation both inserts and updates the TLV, so callers that
    // want one call `edit::update_seqnum` on the built Interest instead of
    // the builder duplicating that insertion logic.

    let mut extras = Vec::new();
    if let Some(nonce) = opts.nonce {
        extras.push(NameSegment::new(SegmentType::Nonce, nonce.to_vec()));
    }
    if let Some(chunk) = opts.chunk {
        extras.push(NameSegment::new(SegmentType::Chunk, chunk.to_be_bytes().to_vec()));
    }
    let name_wire = name_with_trailing(name, extras);

    let mut message = Vec::new();
    write_tlv(&mut message, MessageTlvType::Name as u16, &name_wire);
    if let Some(payload) = opts.payload {
        write_tlv(&mut message, MessageTlvType::Payload as u16, payload);
    }

    assemble_packet(
        buf,
        cfg,
        PacketType::Interest,
        hop_limit,
        TopLevelType::Interest as u16,
        &options,
        &message,
        opts.validation_alg,
    )
}

/// Optional fields accepted by [`build_content_object`].
#[derive(Debug, Clone, Default)]
pub struct ContentObjectOptions<'a> {
    pub chunk: Option<u32>,
    pub end_chunk: Option<u32>,
    pub expiry: Option<u64>,
    /// Remaining Cache Time, the 8-byte `OPT_CACHETIME` value.
    pub cache_time: Option<u64>,
    pub meta: Option<&'a [u8]>,
    pub validation_alg: Option<ValidationAlgType>,
}

pub fn build_content_object(
    buf: &mut [u8],
    cfg: &ForwarderConfig,
    name: &Name,
    payload: &[u8],
    opts: &ContentObjectOptions<'_>,
) -> CodecResult<usize> {
    let mut options = Vec::new();
    if let Some(rct) = opts.cache_time {
        write_u64_tlv(&mut options, OptionTlvType::CacheTime as u16, rct);
    }

    let mut extras = Vec::new();
    if let Some(meta) = opts.meta {
        extras.push(NameSegment::new(SegmentType::Meta, meta.to_vec()));
    }
    if let Some(chunk) = opts.chunk {
        extras.push(NameSegment::new(SegmentType::Chunk, chunk.to_be_bytes().to_vec()));
    }
    let name_wire = name_with_trailing(name, extras);

    let mut message = Vec::new();
    write_tlv(&mut message, MessageTlvType::Name as u16, &name_wire);
    write_tlv(&mut message, MessageTlvType::Payload as u16, payload);
    if let Some(end_chunk) = opts.end_chunk {
        write_u32_tlv(&mut message, MessageTlvType::EndChunk as u16, end_chunk);
    }
    if let Some(expiry) = opts.expiry {
        write_u64_tlv(&mut message, MessageTlvType::Expiry as u16, expiry);
    }

    assemble_packet(
        buf,
        cfg,
        PacketType::Object,
        0,
        TopLevelType::Object as u16,
        &options,
        &message,
        opts.validation_alg,
    )
}

/// One node-identifier-terminated discovery request block
/// (`[req_id(2), skip_hop(1), flag(1), req_arrival_time(4), node_id_len(2),
/// node_id_bytes]`) — the fixed prefix is normative (§6); the trailing
/// node-id is appended the same way a stamp's node-id is (§4.1.5), since
/// `ccninfo_parse` must recover the origin node identifier (§4.1.6) and
/// the normative layout has nowhere else to carry it.
fn write_disc_req_block(
    out: &mut Vec<u8>,
    request_id: u16,
    skip_hop: u8,
    flags: RequestFlags,
    req_arrival_time: u32,
    node_id: &NodeId,
) {
    let mut value = Vec::with_capacity(8 + 2 + node_id.len());
    value.extend_from_slice(&request_id.to_be_bytes());
    value.push(skip_hop);
    value.push(flags.0);
    value.extend_from_slice(&req_arrival_time.to_be_bytes());
    let id_bytes = node_id.as_bytes();
    value.extend_from_slice(&(id_bytes.len() as u16).to_be_bytes());
    value.extend_from_slice(&id_bytes);
    write_tlv(out, OptionTlvType::DiscReq as u16, &value);
}

/// Optional fields accepted by [`build_ccninfo_request`].
#[derive(Debug, Clone, Default)]
pub struct CcninfoRequestOptions {
    pub chunk: Option<u32>,
    pub validation_alg: Option<ValidationAlgType>,
}

/// Builds a Ccninfo request (§4.3.1). `request_id` has both high bits
/// forced to `1` (`id |= 0x8080`) before it is written.
#[allow(clippy::too_many_arguments)]
pub fn build_ccninfo_request(
    buf: &mut [u8],
    cfg: &ForwarderConfig,
    name: &Name,
    hop_limit: u8,
    skip_hop: u8,
    flags: RequestFlags,
    request_id: u16,
    node_id: &NodeId,
    opts: &CcninfoRequestOptions,
) -> CodecResult<usize> {
    if skip_hop as u16 >= hop_limit as u16 {
        return Err(CodecError::invalid_argument(format!(
            "skip_hop {skip_hop} must be less than hop_limit {hop_limit}"
        )));
    }
    let request_id = request_id | 0x8080;

    let mut options = Vec::new();
    write_disc_req_block(&mut options, request_id, skip_hop, flags, 0, node_id);

    let mut extras = Vec::new();
    if let Some(chunk) = opts.chunk {
        extras.push(NameSegment::new(SegmentType::Chunk, chunk.to_be_bytes().to_vec()));
    }
    let name_wire = name_with_trailing(name, extras);

    let mut message = Vec::new();
    write_tlv(&mut message, MessageTlvType::Name as u16, &name_wire);

    assemble_packet(
        buf,
        cfg,
        PacketType::Request,
        hop_limit,
        TopLevelType::Discovery as u16,
        &options,
        &message,
        opts.validation_alg,
    )
}

/// Writes one reply sub-block per the normative 7×u32 layout (§6, bare 28
/// bytes — no inline content-type byte, no length-prefixed name), tagged
/// with its own `DiscReplySubTlvType` TLV type, alongside a sibling `Name`
/// TLV carrying the content name. Both are nested inside the enclosing
/// `T_DISC_REPLY` container TLV, matching the original's "sub-block TLVs
/// of T_DISC_REPLY" layout.
fn write_reply_block(out: &mut Vec<u8>, block: &ReplyBlock) {
    let mut fields = Vec::with_capacity(28);
    fields.extend_from_slice(&block.object_size.to_be_bytes());
    fields.extend_from_slice(&block.object_count.to_be_bytes());
    fields.extend_from_slice(&block.received_interest_count.to_be_bytes());
    fields.extend_from_slice(&block.first_chunk_seq.to_be_bytes());
    fields.extend_from_slice(&block.last_chunk_seq.to_be_bytes());
    fields.extend_from_slice(&block.cache_time.to_be_bytes());
    fields.extend_from_slice(&block.remaining_lifetime.to_be_bytes());

    let mut inner = Vec::new();
    write_tlv(&mut inner, block.content_type as u16, &fields);
    write_tlv(&mut inner, MessageTlvType::Name as u16, &block.name.to_wire());

    write_tlv(out, MessageTlvType::DiscReply as u16, &inner);
}

/// Converts a Ccninfo request buffer into a reply in place (§4.3.3): flips
/// the packet type, sets the return code, appends reply blocks inside the
/// existing `DISCOVERY` top-level container, and appends validation TLVs.
pub fn build_ccninfo_reply(
    buf: &mut [u8],
    current_len: usize,
    cfg: &ForwarderConfig,
    retcode: ReturnCode,
    reply_blocks: &[ReplyBlock],
    validation_alg: Option<ValidationAlgType>,
) -> CodecResult<usize> {
    use types::header::FIXED_HEADER_SIZE;

    if current_len < FIXED_HEADER_SIZE || buf.len() < current_len {
        return Err(CodecError::truncated(
            FIXED_HEADER_SIZE,
            current_len,
            "Ccninfo reply in-place buffer",
        ));
    }
    let mut out = buf[..current_len].to_vec();
    out[1] = PacketType::Reply as u8;
    out[5] = retcode as u8;
    let hdr_len = out[7] as usize;

    let (top_type, inner_len) = {
        let top = crate::tlv::iter_tlvs(&out[hdr_len..])
            .next()
            .ok_or_else(|| CodecError::truncated(4, 0, "Ccninfo reply top-level TLV"))??;
        (top.tlv_type, top.value.len())
    };
    if top_type != TopLevelType::Discovery as u16 {
        return Err(CodecError::TopTypeMismatch {
            got: top_type,
            expected: vec![TopLevelType::Discovery as u16],
        });
    }

    let mut appended = Vec::new();
    for block in reply_blocks {
        write_reply_block(&mut appended, block);
    }
    let value_end = hdr_len + 4 + inner_len;
    out.splice(value_end..value_end, appended.iter().copied());

    let new_inner_len = (inner_len + appended.len()) as u16;
    out[hdr_len + 2..hdr_len + 4].copy_from_slice(&new_inner_len.to_be_bytes());

    if let Some(alg) = validation_alg {
        write_tlv(&mut out, TopLevelType::ValidationAlg as u16, &(alg as u16).to_be_bytes());
        write_tlv(&mut out, TopLevelType::ValidationPayload as u16, &[]);
    }

    let pkt_len = out.len();
    patch_lengths(&mut out, hdr_len, pkt_len)?;
    finish_into(buf, &out, cfg.max_msg_size)
}

/// Builds a Cefping request (§4.1.3, `PING_REQ`).
pub fn build_cefping_request(
    buf: &mut [u8],
    cfg: &ForwarderConfig,
    name: &Name,
    hop_limit: u8,
) -> CodecResult<usize> {
    let mut message = Vec::new();
    write_tlv(&mut message, MessageTlvType::Name as u16, &name.to_wire());

    assemble_packet(
        buf,
        cfg,
        PacketType::PingReq,
        hop_limit,
        TopLevelType::Ping as u16,
        &[],
        &message,
        None,
    )
}

/// Builds a Cefping reply (§4.1.3, `PING_REP`) carrying the responder's
/// node identifier as the message payload.
pub fn build_cefping_reply(
    buf: &mut [u8],
    cfg: &ForwarderConfig,
    name: &Name,
    responder_id: &NodeId,
) -> CodecResult<usize> {
    let mut message = Vec::new();
    write_tlv(&mut message, MessageTlvType::Name as u16, &name.to_wire());
    write_tlv(&mut message, MessageTlvType::Payload as u16, &responder_id.as_bytes());

    assemble_packet(
        buf,
        cfg,
        PacketType::PingRep,
        0,
        TopLevelType::Ping as u16,
        &[],
        &message,
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uri::uri_to_name;

    #[test]
    fn interest_builder_patches_lengths() {
        let name = uri_to_name("ccnx:/a/b").unwrap();
        let mut buf = vec![0u8; 8192];
        let cfg = ForwarderConfig::default();
        let opts = InterestOptions {
            lifetime: Some(4_000),
            ..Default::default()
        };
        let len = build_interest(&mut buf, &cfg, &name, 32, &opts).unwrap();
        assert_eq!(buf[0], 1); // version
        assert_eq!(buf[1], PacketType::Interest as u8);
        let hdr_len = buf[7] as usize;
        assert!(hdr_len >= 8);
        let pkt_len = u16::from_be_bytes([buf[2], buf[3]]) as usize;
        assert_eq!(pkt_len, len);
    }

    #[test]
    fn ccninfo_request_forces_high_bits_on_id() {
        let name = uri_to_name("ccnx:/x").unwrap();
        let mut buf = vec![0u8; 8192];
        let cfg = ForwarderConfig::default();
        let node = NodeId::V4(std::net::Ipv4Addr::new(10, 0, 0, 1));
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
        assert!(len > 0);
        assert_eq!(buf[1], PacketType::Request as u8);
    }

    #[test]
    fn ccninfo_request_rejects_skip_hop_at_or_above_hop_limit() {
        let name = uri_to_name("ccnx:/x").unwrap();
        let mut buf = vec![0u8; 8192];
        let cfg = ForwarderConfig::default();
        let node = NodeId::V4(std::net::Ipv4Addr::new(10, 0, 0, 1));
        let result = build_ccninfo_request(
            &mut buf,
            &cfg,
            &name,
            4,
            4,
            RequestFlags::default(),
            1,
            &node,
            &CcninfoRequestOptions::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn ccninfo_reply_flips_type_and_appends_blocks() {
        let name = uri_to_name("ccnx:/x").unwrap();
        let mut buf = vec![0u8; 8192];
        let cfg = ForwarderConfig::default();
        let node = NodeId::V4(std::net::Ipv4Addr::new(10, 0, 0, 1));
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

        let block = ReplyBlock {
            content_type: types::header::DiscReplySubTlvType::Content,
            object_size: 10,
            object_count: 1,
            received_interest_count: 1,
            first_chunk_seq: 0,
            last_chunk_seq: 0,
            cache_time: 0,
            remaining_lifetime: 0,
            name: uri_to_name("ccnx:/x/content").unwrap(),
        };

        let reply_len =
            build_ccninfo_reply(&mut buf, req_len, &cfg, ReturnCode::NoError, &[block], None).unwrap();
        assert!(reply_len > req_len);
        assert_eq!(buf[1], PacketType::Reply as u8);
        assert_eq!(buf[5], ReturnCode::NoError as u8);
    }
}
