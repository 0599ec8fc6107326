//! Fixed-header read/write and the shared hop-by-hop/message assembly used
//! by every builder in [`crate::builder`] (§4.1.1, §4.1.3).

use crate::error::{CodecError, CodecResult};
use crate::tlv::write_tlv;
use config::ForwarderConfig;
use types::header::{PacketType, TopLevelType, ValidationAlgType, NICT_PEN};

/// Writes the 8-byte fixed header at the front of `out`, patching `hdr_len`
/// and `pkt_len` from the lengths actually assembled.
pub fn write_fixed_header(
    out: &mut Vec<u8>,
    packet_type: u8,
    hop_limit: u8,
    ccninfo_retcode: u8,
    ping_retcode: u8,
) {
    out.push(1); // version
    out.push(packet_type);
    out.extend_from_slice(&[0, 0]); // pkt_len placeholder
    out.push(hop_limit);
    out.push(ccninfo_retcode);
    out.push(ping_retcode);
    out.push(0); // hdr_len placeholder
}

/// Patches the `pkt_len`/`hdr_len` fields of a freshly assembled packet.
pub fn patch_lengths(out: &mut [u8], hdr_len: usize, pkt_len: usize) -> CodecResult<()> {
    if pkt_len > u16::MAX as usize || hdr_len > u8::MAX as usize {
        return Err(CodecError::invalid_argument(
            "packet length exceeds wire field width",
        ));
    }
    out[2..4].copy_from_slice(&(pkt_len as u16).to_be_bytes());
    out[7] = hdr_len as u8;
    Ok(())
}

/// Copies an assembled packet into the caller's buffer, enforcing the
/// configured size ceiling (§4.1.3, `EncodeTooLarge`).
pub fn finish_into(buf: &mut [u8], assembled: &[u8], max_msg_size: usize) -> CodecResult<usize> {
    if assembled.len() > max_msg_size {
        return Err(CodecError::EncodeTooLarge {
            size: assembled.len(),
            limit: max_msg_size,
        });
    }
    if buf.len() < assembled.len() {
        return Err(CodecError::truncated(assembled.len(), buf.len(), "output buffer"));
    }
    buf[..assembled.len()].copy_from_slice(assembled);
    Ok(assembled.len())
}

/// Appends an NICT-vendor organization TLV (PEN `0x00C96C` followed by the
/// vendor payload), used by both the option-header and message-level `ORG`
/// slots (§4.1.3).
pub fn write_org_tlv(out: &mut Vec<u8>, tlv_type: u16, vendor_payload: &[u8]) {
    let mut value = Vec::with_capacity(3 + vendor_payload.len());
    value.extend_from_slice(&NICT_PEN.to_be_bytes()[1..]); // PEN is a 24-bit field
    value.extend_from_slice(vendor_payload);
    write_tlv(out, tlv_type, &value);
}

pub fn wrap_toplevel(out: &mut Vec<u8>, top_type: u16, inner: &[u8]) {
    write_tlv(out, top_type, inner);
}

/// Assembles a complete packet from its pre-built hop-by-hop option bytes
/// and message bytes, appending validation TLVs and patching the fixed
/// header, then copies the result into `buf` (§4.1.3).
#[allow(clippy::too_many_arguments)]
pub fn assemble_packet(
    buf: &mut [u8],
    cfg: &ForwarderConfig,
    packet_type: PacketType,
    hop_limit: u8,
    top_type: u16,
    options: &[u8],
    message: &[u8],
    validation_alg: Option<ValidationAlgType>,
) -> CodecResult<usize> {
    let mut out = Vec::new();
    write_fixed_header(&mut out, packet_type as u8, hop_limit, 0, 0);
    out.extend_from_slice(options);
    let hdr_len = out.len();
    wrap_toplevel(&mut out, top_type, message);
    if let Some(alg) = validation_alg {
        write_tlv(
            &mut out,
            TopLevelType::ValidationAlg as u16,
            &(alg as u16).to_be_bytes(),
        );
        write_tlv(&mut out, TopLevelType::ValidationPayload as u16, &[]);
    }
    let pkt_len = out.len();
    patch_lengths(&mut out, hdr_len, pkt_len)?;
    finish_into(buf, &out, cfg.max_msg_size)
}
