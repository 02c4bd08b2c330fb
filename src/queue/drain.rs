/*!
 * Queue Drain
 * Dequeue-and-dispatch loop driven by the link's receive event
 */

use super::shared::SharedQueue;
use super::stats::QueueCounters;
use crate::core::types::LOCAL_POOL_BASE;
use log::debug;

impl SharedQueue {
    /// Drain the queue, routing each received buffer to its channel.
    ///
    /// Runs under the instance lock, released around every handler
    /// invocation so arbitrary consumer code never executes with the lock
    /// held. Peer-owned buffers (pool id below [`LOCAL_POOL_BASE`]) go to
    /// the registered handler, or back to the pool when the channel has
    /// none. Locally-owned buffers are left as-is: the receive path neither
    /// dispatches nor frees them, so they are only counted (see
    /// `skipped_local` in the stats) for leak diagnosis.
    ///
    /// Returns when the queue is empty. Non-blocking throughout; any
    /// wait/retry policy belongs to the caller driving this from its
    /// interrupt or workqueue context.
    pub fn drain(&self) {
        let mut state = self.state.lock();
        while let Some(iob) = self.get_locked(&mut state) {
            let record = unsafe { iob.snapshot() };
            if record.pool_id >= LOCAL_POOL_BASE {
                debug!(
                    "drain: leaving locally-owned buffer untouched (pool {}, channel {})",
                    record.pool_id, record.chan,
                );
                QueueCounters::bump(&self.counters.skipped_local);
                continue;
            }

            let handler = self.channels().lookup(record.chan);
            drop(state);
            match handler {
                Some(handler) => {
                    QueueCounters::bump(&self.counters.dispatched);
                    handler.rx_event(record.chan, iob);
                }
                None => {
                    debug!("drain: no handler on channel {}, freeing", record.chan);
                    QueueCounters::bump(&self.counters.freed_unrouted);
                    self.pool().free_cluster(record.chan, iob);
                }
            }
            state = self.state.lock();
        }
    }
}
