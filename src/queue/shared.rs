/*!
 * Shared Queue
 * Guard-terminated singly linked descriptor queue in shared memory
 */

use super::stats::{QueueCounters, QueueStats};
use crate::buf::{BufPool, BufPtr, IoBuf};
use crate::channel::ChannelRegistry;
use crate::coherence::{bridge, CacheOps};
use crate::core::errors::LinkError;
use crate::core::types::LinkResult;
use crate::region::{AddressTranslator, PeerOff, RegionLayout};
use log::{debug, error};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;

/// State guarded by the instance lock: the local view of the guard node
pub(super) struct QueueState {
    pub(super) head: BufPtr,
}

/// One direction of the shared-memory link.
///
/// The queue lives in the shared window as a singly linked list of
/// descriptors terminated by a guard node, so it always holds at least one
/// node and `put` never special-cases an empty queue. `head` and `tail` here
/// are only the local processor's view; the list itself is the shared truth
/// and every crossing of the boundary goes through the cache discipline.
///
/// Each instance is self-contained (no process-wide state), so independent
/// links can coexist.
pub struct SharedQueue {
    layout: RegionLayout,
    translator: AddressTranslator,
    cache: Arc<dyn CacheOps>,
    pool: Arc<dyn BufPool>,
    channels: ChannelRegistry,
    pub(super) state: Mutex<QueueState>,
    /// Local address of the last published node; 0 until attached.
    /// Deliberately outside the lock: `put` is single-producer by contract
    /// and performs no internal locking.
    tail: AtomicUsize,
    /// Head offset from the IPC base, recomputed on every dequeue
    debug_head_offset: AtomicU32,
    pub(super) counters: QueueCounters,
}

impl SharedQueue {
    /// Validate the region geometry and build an unattached instance.
    ///
    /// Fails with [`LinkError::Config`] on missing base addresses or a
    /// descriptor zone that is not a whole number of records. Queue pointers
    /// are not touched here; see [`attach_guard`](Self::attach_guard).
    pub fn new(
        layout: RegionLayout,
        cache: Arc<dyn CacheOps>,
        pool: Arc<dyn BufPool>,
    ) -> LinkResult<Self> {
        layout.validate()?;
        debug!(
            "Shared queue over window {:#x}..{:#x} (peer base {:#x}, {} descriptor slots)",
            layout.ipc_base,
            layout.ipc_base + layout.size,
            layout.peer_base,
            layout.desc_size / IoBuf::SIZE,
        );
        let translator = layout.translator();
        Ok(Self {
            layout,
            translator,
            cache,
            pool,
            channels: ChannelRegistry::new(),
            state: Mutex::new(QueueState { head: BufPtr::NULL }),
            tail: AtomicUsize::new(0),
            debug_head_offset: AtomicU32::new(0),
            counters: QueueCounters::default(),
        })
    }

    /// Wire the initial guard node into both ends of the queue.
    ///
    /// Bring-up step owned by the embedder, which allocated the guard and
    /// agreed on its offset with the peer. The guard's outgoing link must be
    /// null.
    pub fn attach_guard(&self, guard: BufPtr) -> LinkResult<()> {
        if guard.is_null() {
            error!("attach_guard: null guard descriptor");
            return Err(LinkError::NullBuffer);
        }
        let mut state = self.state.lock();
        state.head = guard;
        self.tail.store(guard.addr(), Ordering::Release);
        Ok(())
    }

    /// Dequeue the next item, or `None` if the queue is empty.
    ///
    /// Also returns `None` (with an error log) when the queue was never
    /// attached, matching the wire protocol's null-both-ways contract.
    pub fn get(&self) -> Option<BufPtr> {
        let mut state = self.state.lock();
        self.get_locked(&mut state)
    }

    /// Lock-held dequeue core, shared with the drain loop.
    pub(super) fn get_locked(&self, state: &mut QueueState) -> Option<BufPtr> {
        let guard = state.head;
        if guard.is_null() {
            error!("get: queue not initialized");
            return None;
        }

        // The guard's link is what the peer publishes into; re-read it from
        // shared memory.
        self.cache.invalidate(guard.addr(), IoBuf::SIZE);
        let guard_rec = unsafe { guard.snapshot() };
        if guard_rec.next.is_null() {
            return None;
        }

        let item = self.translator.to_local(guard_rec.next);
        bridge::inv_chain(&self.translator, &*self.cache, item);

        // Detach the old guard so the pool may reuse it, then advance.
        unsafe { guard.set_next(PeerOff::NULL) };
        state.head = item;

        // Diagnostic head offset; out of range is logged, never fatal.
        let offset = item.addr().wrapping_sub(self.layout.ipc_base);
        self.debug_head_offset.store(offset as u32, Ordering::Relaxed);
        if offset > self.layout.size {
            error!(
                "get: out of bound descriptor offset {:#x} addr {:#x}/{:#x}",
                offset,
                item.addr(),
                self.translator.to_peer(item).raw(),
            );
        }

        self.pool.free_cluster(guard_rec.chan, guard);
        QueueCounters::bump(&self.counters.dequeued);
        Some(item)
    }

    /// Publish a buffer chain to the peer.
    ///
    /// No internal locking: callers must guarantee at most one concurrent
    /// producer, since interleaved calls would race on the tail. After a
    /// successful return the whole chain (every fragment and chained item)
    /// is visible to a peer that invalidates before reading.
    pub fn put(&self, iob: BufPtr) -> LinkResult<()> {
        let tail_addr = self.tail.load(Ordering::Relaxed);
        if tail_addr == 0 {
            error!("put: queue not initialized");
            return Err(LinkError::NotInitialized);
        }
        if iob.is_null() {
            error!("put: queueing null descriptor");
            return Err(LinkError::NullBuffer);
        }

        // Tail addresses come from attach_guard or a previous put.
        let tail = unsafe { BufPtr::from_addr(tail_addr) };
        let stale = unsafe { tail.next() };
        if !stale.is_null() {
            error!("put: illegal queue pointer detected ({:#x})", stale.raw());
            return Err(LinkError::BadTail {
                offset: stale.raw(),
            });
        }

        // The cluster must outlive its reachability from the shared queue.
        self.pool.ref_cluster(iob);
        bridge::flush_chain(&self.translator, &*self.cache, iob);
        self.cache.store_barrier();

        // The tail link is the actual publication event the peer polls for:
        // store it, then push the node holding it out to shared memory.
        unsafe { tail.set_next(self.translator.to_peer(iob)) };
        self.cache.flush(tail.addr(), IoBuf::SIZE);
        self.cache.store_barrier();

        self.tail.store(iob.addr(), Ordering::Release);
        QueueCounters::bump(&self.counters.enqueued);
        Ok(())
    }

    /// Channel dispatch table for this link
    pub fn channels(&self) -> &ChannelRegistry {
        &self.channels
    }

    /// Translator over this link's window
    pub fn translator(&self) -> &AddressTranslator {
        &self.translator
    }

    /// Region geometry this instance was built over
    pub fn layout(&self) -> &RegionLayout {
        &self.layout
    }

    pub(super) fn pool(&self) -> &dyn BufPool {
        &*self.pool
    }

    /// Offset of the current head node from the IPC base (diagnostic only)
    pub fn debug_head_offset(&self) -> u32 {
        self.debug_head_offset.load(Ordering::Relaxed)
    }

    /// Point-in-time statistics snapshot
    pub fn stats(&self) -> QueueStats {
        self.counters.snapshot(self.debug_head_offset())
    }
}
