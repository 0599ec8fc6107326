//! # Ambient Forwarder Configuration
//!
//! Process-wide tunables that the codec and FIB need but that are not part
//! of the wire format itself: the `OPT_SEQNUM` emission mode and the
//! forwarder's size/timing limits.
//!
//! Per the design note in §9 of the spec, the three-state `OPT_SEQNUM` flag
//! is modeled as a small configuration object passed through construction,
//! not a process-wide singleton.

pub mod seqnum;

pub use seqnum::SeqNumMode;

/// Forwarder-wide tunables threaded explicitly into the codec and FIB
/// rather than read from statics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwarderConfig {
    /// Whether and how `OPT_SEQNUM` is stamped on outgoing Interests.
    pub seqnum_mode: SeqNumMode,
    /// Ceiling on a single built message, `CefC_Max_Msg_Size`.
    pub max_msg_size: usize,
    /// Ceiling on the number of Ccninfo report blocks a request may carry.
    pub max_stamp_num: usize,
    /// Default hop limit used when a caller does not specify one.
    pub default_hop_limit: u8,
    /// How long a Ccninfo initiator waits for replies before giving up.
    pub ccninfo_reply_wait_secs: u64,
}

impl Default for ForwarderConfig {
    fn default() -> Self {
        Self {
            seqnum_mode: SeqNumMode::Disabled,
            max_msg_size: 8192,
            max_stamp_num: 20,
            default_hop_limit: 32,
            ccninfo_reply_wait_secs: 7,
        }
    }
}
