//! # Cefore Forwarding Information Base
//!
//! Name-prefix → face-set routing table (§4.2): hash-keyed entry store with
//! segment-boundary longest-prefix lookup, the control-plane
//! route-add/route-del binary message, and the whitespace-tokenized route
//! configuration file.
//!
//! ## What This Crate Contains
//! - [`fib::Fib`]: the table itself, `lookup`/`lookup_or_create`,
//!   `add_face`/`remove_face`, and `cleanup_closed_faces`.
//! - [`entry`]: `FibEntry` and `FaceRecord`, plus the origin bitmask
//!   constants (`STATIC`/`DYNAMIC`/`APP`).
//! - [`route`]: the binary route-add/route-del message decode and apply.
//! - [`config_file`]: the whitespace route-config-file loader.
//! - [`face`]: the `FaceResolver` seam into the external face module.
//!
//! ## What This Crate Does NOT Contain
//! - The wire codec itself (belongs in `codec`).
//! - Any face/link implementation (out of scope, §1) — only the
//!   `FaceResolver` trait the route protocol needs.
//!
//! This type is single-writer, many-reader by contract (§5): it is plain
//! and non-concurrent, leaving synchronization (an `RwLock<Fib>`, if
//! deployed multi-threaded) to the caller.

pub mod config_file;
pub mod entry;
pub mod error;
pub mod face;
pub mod fib;
pub mod route;

pub use config_file::{load_config, MAX_HOSTS_PER_LINE};
pub use entry::{origin, FaceRecord, FibEntry};
pub use error::{FibError, FibResult};
pub use face::{FaceId, FaceResolver, RouteProtocol};
pub use fib::Fib;
pub use route::{apply_route_message, RouteOp, RouteOutcome};
