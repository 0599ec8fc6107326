//! On-path stamping (§4.3.2): a transit router appends one report block per
//! hop, or terminates the request with `NO_SPACE` once the 20-stamp ceiling
//! would be exceeded.

use crate::error::CcninfoResult;
use crate::reply::terminate_with_no_space;
use codec::{add_ccninfo_stamp, ntp32_now};
use config::ForwarderConfig;
use types::NodeId;

/// The outcome of offering a request to [`stamp_or_terminate`].
#[derive(Debug)]
pub enum StampOutcome {
    /// The stamp was appended; the packet (now `new_len` bytes) should be
    /// forwarded onward.
    Forwarded { new_len: usize },
    /// The stamp would have exceeded the ceiling; `buf[..new_len]` now
    /// holds a `NO_SPACE` reply and MUST NOT be forwarded further (§4.3.2).
    Terminated { new_len: usize },
}

/// Appends this router's report block to a transiting request, or — if
/// that would exceed `cfg.max_stamp_num` (clamped to the wire ceiling of
/// 20) or the size limit — converts the buffer in place into a `NO_SPACE`
/// reply instead (§4.3.2).
pub fn stamp_or_terminate(
    buf: &mut Vec<u8>,
    current_len: usize,
    cfg: &ForwarderConfig,
    now_sec: u32,
    now_nsec: u32,
    node_id: &NodeId,
) -> CcninfoResult<StampOutcome> {
    let arrival = ntp32_now(now_sec, now_nsec);
    match add_ccninfo_stamp(
        buf,
        current_len,
        cfg.max_stamp_num,
        cfg.max_msg_size,
        arrival,
        &node_id.as_bytes(),
    ) {
        Ok(new_len) => Ok(StampOutcome::Forwarded { new_len }),
        Err(codec::CodecError::StampOverflow { .. }) => {
            let new_len = terminate_with_no_space(buf, current_len, cfg)?;
            Ok(StampOutcome::Terminated { new_len })
        }
        Err(other) => Err(other.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{build_request, RequestSpec};
    use codec::uri_to_name;
    use std::net::Ipv4Addr;
    use types::PacketType;

    #[test]
    fn stamp_overflow_terminates_with_no_space() {
        let name = uri_to_name("ccnx:/x").unwrap();
        let cfg = ForwarderConfig::default();
        let mut backing = vec![0u8; 8192];
        let spec = RequestSpec::new(&name, 32);
        let (len, _) = build_request(&mut backing, &cfg, &spec).unwrap();
        let mut buf = backing[..len].to_vec();

        let node = NodeId::V4(Ipv4Addr::new(10, 0, 0, 1));
        let mut current_len = buf.len();
        for i in 0..20u32 {
            match stamp_or_terminate(&mut buf, current_len, &cfg, i, 0, &node).unwrap() {
                StampOutcome::Forwarded { new_len } => current_len = new_len,
                StampOutcome::Terminated { .. } => panic!("should not terminate before 20 stamps"),
            }
        }

        match stamp_or_terminate(&mut buf, current_len, &cfg, 21, 0, &node).unwrap() {
            StampOutcome::Terminated { new_len } => {
                assert_eq!(buf[1], PacketType::Reply as u8);
                assert_eq!(buf[5], types::ReturnCode::NoSpace as u8);
                assert_eq!(new_len, buf.len());
            }
            StampOutcome::Forwarded { .. } => panic!("21st stamp must be rejected"),
        }
    }
}
