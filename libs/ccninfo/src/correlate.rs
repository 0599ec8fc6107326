//! Client-side reply correlation and timing (§4.3.4).

use crate::request::OutstandingRequest;
use codec::ParsedCcninfo;
use std::time::{Duration, Instant};
use types::{PacketType, ReportBlock};

/// `true` iff `parsed` is a legitimate reply to `outstanding` (§4.3.4):
/// packet type is `REPLY`, the stamp count does not exceed the original
/// `hop_limit`, `request_id` matches, and the node identifier matches both
/// in length and bytes. Anything else is silently dropped — duplicate,
/// stale, or cross-talk from an unrelated request.
pub fn is_reply_valid(parsed: &ParsedCcninfo<'_>, outstanding: &OutstandingRequest) -> bool {
    parsed.packet_type == PacketType::Reply as u8
        && parsed.report_chain.len() <= outstanding.hop_limit as usize
        && parsed.request_id == outstanding.request_id
        && parsed.origin_node_id == outstanding.node_id
}

/// Wall-clock round-trip time from the local send timestamp to the local
/// receive timestamp (§4.3.4).
pub fn round_trip_time(sent: Instant, received: Instant) -> Duration {
    received.saturating_duration_since(sent)
}

/// Converts an NTP-32 duration (16 bits seconds, 16 bits fraction) into a
/// [`Duration`].
fn ntp32_delta_to_duration(delta: u32) -> Duration {
    let seconds = (delta >> 16) as u64;
    let frac = (delta & 0xFFFF) as u64;
    let nanos = (frac * 1_000_000_000) / 65_536;
    Duration::new(seconds, nanos as u32)
}

/// Per-hop latency computed by differencing adjacent report-block NTP-32
/// timestamps, in traversal order (§4.3.4). One shorter than the number of
/// report blocks.
pub fn per_hop_latencies(chain: &[ReportBlock]) -> Vec<Duration> {
    chain
        .windows(2)
        .map(|pair| ntp32_delta_to_duration(pair[1].arrival_time.wrapping_sub(pair[0].arrival_time)))
        .collect()
}
