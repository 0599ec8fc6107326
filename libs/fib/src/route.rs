//! The control-plane route-add/route-del binary message (§4.2.4, §6).
//!
//! Wire layout: `[op(1), protocol(1), uri_len(2), uri_bytes,
//! (host_len(1), host_bytes)*]`. `op ∈ {Add=0, Del=1}`. Every host in the
//! message is resolved to a face via the caller-supplied [`FaceResolver`]
//! and the FIB is updated accordingly; the aggregate outcome is reported
//! back as a 2-bit indicator so upstream modules (PIT cleaner, route
//! announcer) can react to entry creation/removal.

use crate::error::{FibError, FibResult};
use crate::face::{FaceResolver, RouteProtocol};
use crate::fib::Fib;
use codec::uri_to_name;
use tracing::warn;

/// The operation a route message requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOp {
    Add,
    Del,
}

impl RouteOp {
    fn from_wire(byte: u8) -> FibResult<Self> {
        match byte {
            0 => Ok(Self::Add),
            1 => Ok(Self::Del),
            other => Err(FibError::InvalidRouteMessage {
                reason: format!("unknown route op byte {other:#04x}"),
            }),
        }
    }
}

/// Bit 0x01: a new FIB entry was created. Bit 0x02: an entry became empty
/// and was freed. Both bits may be set for a message touching multiple
/// hosts (§4.2.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteOutcome(pub u8);

impl RouteOutcome {
    pub const ENTRY_CREATED: u8 = 0x01;
    pub const ENTRY_FREED: u8 = 0x02;

    pub fn entry_created(&self) -> bool {
        self.0 & Self::ENTRY_CREATED != 0
    }

    pub fn entry_freed(&self) -> bool {
        self.0 & Self::ENTRY_FREED != 0
    }
}

fn read_u16(bytes: &[u8]) -> FibResult<u16> {
    bytes
        .try_into()
        .map(u16::from_be_bytes)
        .map_err(|_| FibError::InvalidRouteMessage {
            reason: "truncated length field".to_string(),
        })
}

/// Decodes and applies one route-add/route-del control-plane message
/// against `fib`, resolving each listed host through `resolver` (§4.2.4).
/// Rejected with a [`FibError::InvalidRouteMessage`] if the message is
/// malformed or the URI fails to parse; the caller does not close the
/// connection on this error (§7). A rejection is logged here, at the
/// control-plane handler, so the connection can keep serving later
/// messages without the caller needing to log each rejection itself.
pub fn apply_route_message(
    fib: &mut Fib,
    resolver: &mut impl FaceResolver,
    msg: &[u8],
) -> FibResult<RouteOutcome> {
    match decode_and_apply(fib, resolver, msg) {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            warn!(error = %e, "rejecting malformed route control-plane message");
            Err(e)
        }
    }
}

fn decode_and_apply(
    fib: &mut Fib,
    resolver: &mut impl FaceResolver,
    msg: &[u8],
) -> FibResult<RouteOutcome> {
    if msg.len() < 4 {
        return Err(FibError::InvalidRouteMessage {
            reason: "message shorter than the fixed op/protocol/uri_len prefix".to_string(),
        });
    }
    let op = RouteOp::from_wire(msg[0])?;
    // Wire values per the original `prot_str` table (`{"invalid", "tcp",
    // "udp"}`, indexed directly by this byte): 0 is reserved for
    // "invalid", 1 is tcp, 2 is udp.
    let protocol = RouteProtocol::from_token(match msg[1] {
        1 => "tcp",
        2 => "udp",
        other => {
            return Err(FibError::InvalidRouteMessage {
                reason: format!("unknown protocol byte {other:#04x}"),
            })
        }
    })
    .expect("byte 1/2 always maps to a known protocol token");

    let uri_len = read_u16(&msg[2..4])? as usize;
    let uri_start = 4;
    let uri_end = uri_start + uri_len;
    let uri_bytes = msg.get(uri_start..uri_end).ok_or_else(|| FibError::InvalidRouteMessage {
        reason: "uri_len overruns message".to_string(),
    })?;
    let uri = std::str::from_utf8(uri_bytes).map_err(|_| FibError::InvalidRouteMessage {
        reason: "uri bytes are not valid utf-8".to_string(),
    })?;
    let name = uri_to_name(uri).map_err(|e| FibError::InvalidRouteMessage {
        reason: format!("bad route uri {uri:?}: {e}"),
    })?;

    let mut offset = uri_end;
    let mut outcome = RouteOutcome::default();
    while offset < msg.len() {
        let host_len = msg[offset] as usize;
        offset += 1;
        let host_bytes = msg.get(offset..offset + host_len).ok_or_else(|| {
            FibError::InvalidRouteMessage {
                reason: "host_len overruns message".to_string(),
            }
        })?;
        let host = std::str::from_utf8(host_bytes).map_err(|_| FibError::InvalidRouteMessage {
            reason: "host bytes are not valid utf-8".to_string(),
        })?;
        offset += host_len;

        let face_id = resolver.resolve(host, protocol);
        match op {
            RouteOp::Add => {
                if fib.add_face(&name, face_id, crate::entry::origin::DYNAMIC) {
                    outcome.0 |= RouteOutcome::ENTRY_CREATED;
                }
            }
            RouteOp::Del => {
                if let Ok(freed) = fib.remove_face(&name, face_id, crate::entry::origin::DYNAMIC) {
                    if freed {
                        outcome.0 |= RouteOutcome::ENTRY_FREED;
                    }
                }
            }
        }
    }

    Ok(outcome)
}
