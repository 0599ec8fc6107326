//! # Ccninfo Discovery Engine
//!
//! The in-band trace/report protocol (§4.3): request lifecycle, on-path
//! stamping, reply generation, and client-side correlation with
//! round-trip/per-hop timing.
//!
//! ## What This Crate Contains
//! - [`request`]: builds a request with a random or caller-chosen
//!   `request_id` and this host's node identifier.
//! - [`stamp`]: on-path report-block appending, including the
//!   `NO_SPACE`-on-overflow termination path.
//! - [`reply`]: converts a request buffer into a reply in place.
//! - [`correlate`]: the client-side acceptance filter and timing helpers.
//! - [`collector`]: accumulates accepted replies over a bounded wait,
//!   pollable by a quit flag a signal handler can set.
//! - [`node_id`]: local network-interface scan for this host's default
//!   node identifier.
//!
//! ## What This Crate Does NOT Contain
//! - The wire encode/decode itself (belongs in `codec`).
//! - Socket I/O and signal trapping (belong to the forwarder/CLI — see
//!   `tools/ccninfo-client`).

pub mod collector;
pub mod correlate;
pub mod error;
pub mod node_id;
pub mod reply;
pub mod request;
pub mod stamp;

pub use collector::{CollectedReply, ReplyCollector};
pub use correlate::{is_reply_valid, per_hop_latencies, round_trip_time};
pub use error::{CcninfoError, CcninfoResult};
pub use node_id::local_node_id;
pub use reply::{generate_reply, terminate_with_no_space};
pub use request::{build_request, OutstandingRequest, RequestSpec};
pub use stamp::{stamp_or_terminate, StampOutcome};
