//! Client-side request lifecycle (§4.3.1).

use crate::error::CcninfoResult;
use crate::node_id::local_node_id;
use codec::{build_ccninfo_request, CcninfoRequestOptions};
use config::ForwarderConfig;
use rand::Rng;
use types::{Name, NodeId, RequestFlags, ValidationAlgType};

/// Fields the initiator fills before emitting a Ccninfo request. `node_id`
/// defaults to [`local_node_id`] and `request_id` to a random value if left
/// unset; both high bits are forced to `1` by the codec builder regardless
/// of what is supplied here (§4.3.1).
#[derive(Debug, Clone)]
pub struct RequestSpec<'a> {
    pub name: &'a Name,
    pub hop_limit: u8,
    pub skip_hop: u8,
    pub flags: RequestFlags,
    pub request_id: Option<u16>,
    pub node_id: Option<NodeId>,
    pub chunk: Option<u32>,
    pub validation_alg: Option<ValidationAlgType>,
}

impl<'a> RequestSpec<'a> {
    pub fn new(name: &'a Name, hop_limit: u8) -> Self {
        Self {
            name,
            hop_limit,
            skip_hop: 0,
            flags: RequestFlags::default(),
            request_id: None,
            node_id: None,
            chunk: None,
            validation_alg: None,
        }
    }
}

/// A request the initiator has just emitted, along with the bookkeeping
/// needed to correlate replies against it (§4.3.4).
#[derive(Debug, Clone)]
pub struct OutstandingRequest {
    pub request_id: u16,
    pub node_id: NodeId,
    pub hop_limit: u8,
}

/// Builds a Ccninfo request into `buf`, picking a random `request_id` and
/// this host's node identifier when the caller leaves them unset. Returns
/// the packet length and the [`OutstandingRequest`] bookkeeping record.
pub fn build_request(
    buf: &mut [u8],
    cfg: &ForwarderConfig,
    spec: &RequestSpec<'_>,
) -> CcninfoResult<(usize, OutstandingRequest)> {
    let request_id = spec.request_id.unwrap_or_else(|| rand::thread_rng().gen());
    let node_id = spec.node_id.clone().unwrap_or_else(local_node_id);

    let len = build_ccninfo_request(
        buf,
        cfg,
        spec.name,
        spec.hop_limit,
        spec.skip_hop,
        spec.flags,
        request_id,
        &node_id,
        &CcninfoRequestOptions {
            chunk: spec.chunk,
            validation_alg: spec.validation_alg,
        },
    )?;

    Ok((
        len,
        OutstandingRequest {
            request_id: request_id | 0x8080,
            node_id,
            hop_limit: spec.hop_limit,
        },
    ))
}
