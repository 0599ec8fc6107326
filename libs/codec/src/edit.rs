//! In-place packet edits (§4.1.5): sequence-number stamping, cache-time
//! rewrite, symbolic-code insertion, and Ccninfo stamp append. Each edit
//! works on a `(buf, current_len)` pair and returns the packet's new
//! length, shifting trailing bytes and patching `hdr_len`/`pkt_len` as
//! needed.

use crate::error::{CodecError, CodecResult};
use crate::tlv::iter_tlvs;
use config::{ForwarderConfig, SeqNumMode};
use types::header::{OptionTlvType, FIXED_HEADER_SIZE, MAX_STAMP_NUM};
use types::name::{Name, NameSegment, SegmentType};

fn read_hdr_len(buf: &[u8]) -> usize {
    buf[7] as usize
}

fn write_lengths(buf: &mut [u8], hdr_len: usize, pkt_len: usize) -> CodecResult<()> {
    if pkt_len > u16::MAX as usize || hdr_len > u8::MAX as usize {
        return Err(CodecError::invalid_argument(
            "edited packet length exceeds wire field width",
        ));
    }
    buf[2..4].copy_from_slice(&(pkt_len as u16).to_be_bytes());
    buf[7] = hdr_len as u8;
    Ok(())
}

/// Locates an existing option TLV of `target_type` within
/// `buf[8..hdr_len]`, returning `(value_start, value_len)` relative to the
/// start of `buf`.
fn find_option(buf: &[u8], hdr_len: usize, target_type: u16) -> CodecResult<Option<(usize, usize)>> {
    let region = &buf[FIXED_HEADER_SIZE..hdr_len];
    let mut offset = FIXED_HEADER_SIZE;
    for tlv in iter_tlvs(region) {
        let tlv = tlv?;
        if tlv.tlv_type == target_type {
            let value_start = offset + 4;
            return Ok(Some((value_start, tlv.value.len())));
        }
        offset += 4 + tlv.value.len();
    }
    Ok(None)
}

/// Overwrites `OPT_SEQNUM`'s value if present, otherwise inserts a new
/// `OPT_SEQNUM` TLV at the end of the hop-by-hop region, growing the
/// packet by 8 bytes and shifting everything after it (§4.1.5, Testable
/// Property 5: a fresh insertion grows the packet by exactly 8 bytes).
pub fn update_seqnum(buf: &mut Vec<u8>, current_len: usize, seq: u32) -> CodecResult<usize> {
    let hdr_len = read_hdr_len(buf);
    if let Some((value_start, value_len)) = find_option(buf, hdr_len, OptionTlvType::SeqNum as u16)? {
        if value_len != 4 {
            return Err(CodecError::truncated(4, value_len, "OPT_SEQNUM value"));
        }
        buf[value_start..value_start + 4].copy_from_slice(&seq.to_be_bytes());
        return Ok(current_len);
    }

    let mut tlv = Vec::with_capacity(8);
    tlv.extend_from_slice(&(OptionTlvType::SeqNum as u16).to_be_bytes());
    tlv.extend_from_slice(&4u16.to_be_bytes());
    tlv.extend_from_slice(&seq.to_be_bytes());

    buf.splice(hdr_len..hdr_len, tlv.iter().copied());
    let new_hdr_len = hdr_len + tlv.len();
    let new_len = current_len + tlv.len();
    write_lengths(buf, new_hdr_len, new_len)?;
    Ok(new_len)
}

/// Applies [`update_seqnum`] only if `cfg.seqnum_mode` calls for emitting
/// `OPT_SEQNUM` at all (§5: the tri-state flag's sole wire effect). A no-op
/// returning `current_len` unchanged under [`SeqNumMode::Disabled`].
pub fn stamp_seqnum_if_enabled(
    buf: &mut Vec<u8>,
    current_len: usize,
    cfg: &ForwarderConfig,
    seq: u32,
) -> CodecResult<usize> {
    if cfg.seqnum_mode.emits_seqnum() {
        update_seqnum(buf, current_len, seq)
    } else {
        Ok(current_len)
    }
}

/// Rewrites the 8-byte value of an existing `OPT_CACHETIME` TLV; a no-op if
/// absent (§4.1.5).
pub fn update_cache_time(buf: &mut [u8], cache_time: u64) -> CodecResult<()> {
    let hdr_len = read_hdr_len(buf);
    if let Some((value_start, value_len)) = find_option(buf, hdr_len, OptionTlvType::CacheTime as u16)? {
        if value_len != 8 {
            return Err(CodecError::truncated(8, value_len, "OPT_CACHETIME value"));
        }
        buf[value_start..value_start + 8].copy_from_slice(&cache_time.to_be_bytes());
    }
    Ok(())
}

/// Appends a `SYMBOLIC_CODE` name segment before any trailing `CHUNK`
/// segment of a Content Object's name (§4.1.5). Operates on the decoded
/// `Name`; the caller re-encodes and rebuilds the packet.
pub fn add_symbolic_code(name: &Name, code: [u8; 8]) -> Name {
    let mut segments = name.segments.clone();
    let insert_at = match segments.last() {
        Some(last) if last.seg_type == SegmentType::Chunk => segments.len() - 1,
        _ => segments.len(),
    };
    segments.insert(insert_at, NameSegment::new(SegmentType::SymbolicCode, code.to_vec()));
    Name::with_scheme(segments, name.scheme)
}

/// Appends an `OPT_DISC_REPORT` TLV carrying `(NTP-32 arrival_time,
/// node_id_len, node_id_bytes)` at the tail of the hop-by-hop region
/// (§4.1.5). Fails with [`CodecError::StampOverflow`] if the stamp count
/// would exceed `max_stamp_num` or the packet would exceed `max_msg_size`.
pub fn add_ccninfo_stamp(
    buf: &mut Vec<u8>,
    current_len: usize,
    max_stamp_num: usize,
    max_msg_size: usize,
    ntp32_arrival_time: u32,
    node_id: &[u8],
) -> CodecResult<usize> {
    let hdr_len = read_hdr_len(buf);
    let existing_stamps = {
        let region = &buf[FIXED_HEADER_SIZE..hdr_len];
        iter_tlvs(region)
            .filter(|tlv| {
                tlv.as_ref()
                    .map(|t| t.tlv_type == OptionTlvType::DiscReport as u16)
                    .unwrap_or(false)
            })
            .count()
    };
    if existing_stamps >= max_stamp_num.min(MAX_STAMP_NUM) {
        return Err(CodecError::StampOverflow {
            limit: max_stamp_num.min(MAX_STAMP_NUM),
        });
    }

    let mut value = Vec::with_capacity(6 + node_id.len());
    value.extend_from_slice(&ntp32_arrival_time.to_be_bytes());
    value.extend_from_slice(&(node_id.len() as u16).to_be_bytes());
    value.extend_from_slice(node_id);

    let mut tlv = Vec::with_capacity(4 + value.len());
    tlv.extend_from_slice(&(OptionTlvType::DiscReport as u16).to_be_bytes());
    tlv.extend_from_slice(&(value.len() as u16).to_be_bytes());
    tlv.extend_from_slice(&value);

    let new_len = current_len + tlv.len();
    if new_len > max_msg_size {
        return Err(CodecError::StampOverflow {
            limit: max_stamp_num.min(MAX_STAMP_NUM),
        });
    }

    buf.splice(hdr_len..hdr_len, tlv.iter().copied());
    let new_hdr_len = hdr_len + tlv.len();
    write_lengths(buf, new_hdr_len, new_len)?;
    Ok(new_len)
}

/// Computes the NTP-32 timestamp for "now" per §4.3.2's formula.
pub fn ntp32_now(sec: u32, nsec: u32) -> u32 {
    ((sec.wrapping_add(32_384)) << 16) | (((nsec as u64) << 7) / 1_953_125) as u32
}
