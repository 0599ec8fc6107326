//! Client-side reply accumulation with a timeout and a pollable quit flag
//! (§5): "the Ccninfo initiator waits for up to 7 seconds (configurable)
//! for replies, accumulating every matching reply that arrives; a signal
//! handler sets a quit flag that the receive loop polls between reads."
//!
//! The actual socket read loop is a process-level concern and lives in
//! `tools/ccninfo-client`; this type only tracks the deadline, the quit
//! flag, and the accumulated, owned replies.

use crate::correlate::round_trip_time;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use types::{Name, ReplyBlock, ReportBlock};

/// One accepted reply, fully owned so it can outlive the I/O buffer it was
/// parsed from (§9: the Ccninfo parsed structure may be collected across
/// multiple replies).
#[derive(Debug, Clone)]
pub struct CollectedReply {
    pub report_chain: Vec<ReportBlock>,
    pub discovery_name: Name,
    pub reply_chain: Vec<ReplyBlock>,
    pub round_trip: Duration,
}

/// Accumulates every reply that [`correlate::is_reply_valid`] accepts
/// until the configured wait elapses or the quit flag is set.
pub struct ReplyCollector {
    sent_at: Instant,
    deadline: Instant,
    quit: Arc<AtomicBool>,
    replies: Vec<CollectedReply>,
}

impl ReplyCollector {
    /// Starts a collection window of `wait` from now.
    pub fn new(wait: Duration) -> Self {
        let sent_at = Instant::now();
        Self {
            sent_at,
            deadline: sent_at + wait,
            quit: Arc::new(AtomicBool::new(false)),
            replies: Vec::new(),
        }
    }

    /// A shareable handle a signal handler can set to stop collection
    /// early, independent of the deadline.
    pub fn quit_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.quit)
    }

    /// `true` once the deadline has passed or the quit flag has been set;
    /// the receive loop polls this between reads (§5).
    pub fn is_done(&self) -> bool {
        Instant::now() >= self.deadline || self.quit.load(Ordering::Relaxed)
    }

    /// Records one accepted reply, computing its round-trip time from the
    /// collector's start instant.
    pub fn accept(&mut self, report_chain: Vec<ReportBlock>, discovery_name: Name, reply_chain: Vec<ReplyBlock>) {
        self.replies.push(CollectedReply {
            report_chain,
            discovery_name,
            reply_chain,
            round_trip: round_trip_time(self.sent_at, Instant::now()),
        });
    }

    /// Consumes the collector, returning every reply accepted so far.
    pub fn into_replies(self) -> Vec<CollectedReply> {
        self.replies
    }

    pub fn replies(&self) -> &[CollectedReply] {
        &self.replies
    }
}
