/*!
 * Queue Statistics
 * Cheap per-instance counters and their snapshot form
 */

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters, updated with relaxed atomics on the hot paths
#[derive(Debug, Default)]
pub(crate) struct QueueCounters {
    pub enqueued: AtomicU64,
    pub dequeued: AtomicU64,
    pub dispatched: AtomicU64,
    pub freed_unrouted: AtomicU64,
    pub skipped_local: AtomicU64,
}

impl QueueCounters {
    #[inline]
    pub fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self, debug_head_offset: u32) -> QueueStats {
        QueueStats {
            enqueued: self.enqueued.load(Ordering::Relaxed),
            dequeued: self.dequeued.load(Ordering::Relaxed),
            dispatched: self.dispatched.load(Ordering::Relaxed),
            freed_unrouted: self.freed_unrouted.load(Ordering::Relaxed),
            skipped_local: self.skipped_local.load(Ordering::Relaxed),
            debug_head_offset,
        }
    }
}

/// Point-in-time queue statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct QueueStats {
    /// Chains published to the peer
    pub enqueued: u64,
    /// Items dequeued from the shared queue
    pub dequeued: u64,
    /// Items handed to a registered channel handler
    pub dispatched: u64,
    /// Items freed because no handler was registered
    pub freed_unrouted: u64,
    /// Locally-owned items the drain loop left untouched
    pub skipped_local: u64,
    /// Offset of the current head node from the IPC base (diagnostic only)
    pub debug_head_offset: u32,
}
