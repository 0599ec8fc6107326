//! Reply generation (§4.3.3): converting a request buffer in place into a
//! reply once a router terminates it (policy, cache hit, content origin,
//! or hop-limit exhaustion).

use crate::error::CcninfoResult;
use codec::build_ccninfo_reply;
use config::ForwarderConfig;
use types::{DiscReplySubTlvType, ReplyBlock, ReturnCode};

/// Converts the request at `buf[..current_len]` into a reply carrying
/// `reply_blocks`, flipping the packet type and setting `retcode` (§4.3.3).
pub fn generate_reply(
    buf: &mut [u8],
    current_len: usize,
    cfg: &ForwarderConfig,
    retcode: ReturnCode,
    reply_blocks: &[ReplyBlock],
) -> CcninfoResult<usize> {
    Ok(build_ccninfo_reply(buf, current_len, cfg, retcode, reply_blocks, None)?)
}

/// Converts the request at `buf[..current_len]` into a bare `NO_SPACE`
/// reply with no reply blocks (§4.3.2's overflow case).
pub fn terminate_with_no_space(
    buf: &mut [u8],
    current_len: usize,
    cfg: &ForwarderConfig,
) -> CcninfoResult<usize> {
    generate_reply(buf, current_len, cfg, ReturnCode::NoSpace, &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{build_request, RequestSpec};
    use codec::uri_to_name;
    use types::PacketType;

    #[test]
    fn generate_reply_flips_type_and_sets_retcode() {
        let name = uri_to_name("ccnx:/x").unwrap();
        let cfg = ForwarderConfig::default();
        let mut backing = vec![0u8; 8192];
        let spec = RequestSpec::new(&name, 32);
        let (len, _) = build_request(&mut backing, &cfg, &spec).unwrap();

        let block = ReplyBlock {
            content_type: DiscReplySubTlvType::Content,
            object_size: 100,
            object_count: 1,
            received_interest_count: 1,
            first_chunk_seq: 0,
            last_chunk_seq: 0,
            cache_time: 10,
            remaining_lifetime: 1000,
            name: uri_to_name("ccnx:/x/content").unwrap(),
        };
        let reply_len =
            generate_reply(&mut backing, len, &cfg, ReturnCode::NoError, &[block]).unwrap();
        assert_eq!(backing[1], PacketType::Reply as u8);
        assert_eq!(backing[5], ReturnCode::NoError as u8);
        assert!(reply_len > len);
    }
}
