/*!
 * Shared Test Fixtures
 * Host-allocated shared window, recording cache fake, counting pool fake
 */

#![allow(dead_code)]

use parking_lot::Mutex;
use shmlink::{
    BufPool, BufPtr, CacheOps, ChannelId, IoBuf, PeerOff, RegionLayout, SharedQueue,
};
use std::cell::Cell;
use std::sync::Arc;

/// Payload zone size at the start of the window, before the descriptor zone
pub const DATA_ZONE: usize = 1024;

/// Peer-space address of the window start
pub const PEER_BASE: u32 = 0x4000_0000;

/// A shared window backed by host memory, standing in for the mapped region.
///
/// Descriptors are carved from the descriptor zone in order; payload bytes
/// from the zone in front of it. The backing allocation is 8-byte aligned
/// and pinned for the fixture's lifetime.
pub struct HostRegion {
    mem: Box<[u64]>,
    layout: RegionLayout,
    next_slot: Cell<usize>,
    next_data: Cell<usize>,
}

impl HostRegion {
    pub fn new(slots: usize) -> Self {
        let desc_size = slots * IoBuf::SIZE;
        let bytes = DATA_ZONE + desc_size;
        let mem = vec![0u64; (bytes + 7) / 8].into_boxed_slice();
        let ipc_base = mem.as_ptr() as usize;
        let layout = RegionLayout {
            ipc_base,
            peer_base: PEER_BASE,
            size: mem.len() * 8,
            desc_base: ipc_base + DATA_ZONE,
            desc_size,
        };
        Self {
            mem,
            layout,
            next_slot: Cell::new(0),
            next_data: Cell::new(0),
        }
    }

    pub fn layout(&self) -> RegionLayout {
        self.layout
    }

    pub fn translator(&self) -> shmlink::AddressTranslator {
        self.layout.translator()
    }

    /// Carve the next descriptor slot and initialize it
    pub fn alloc_desc(&self, record: IoBuf) -> BufPtr {
        let slot = self.next_slot.get();
        assert!(slot * IoBuf::SIZE < self.layout.desc_size, "fixture out of slots");
        self.next_slot.set(slot + 1);
        let addr = self.layout.desc_base + slot * IoBuf::SIZE;
        let ptr = unsafe { BufPtr::from_addr(addr) };
        unsafe { ptr.write(record) };
        ptr
    }

    /// Place payload bytes in the data zone, returning their peer pointer
    pub fn alloc_data(&self, bytes: &[u8]) -> PeerOff {
        let at = self.next_data.get();
        assert!(at + bytes.len() <= DATA_ZONE, "fixture out of payload space");
        self.next_data.set(at + bytes.len());
        let addr = self.layout.ipc_base + at;
        unsafe {
            std::ptr::copy_nonoverlapping(bytes.as_ptr(), addr as *mut u8, bytes.len());
        }
        self.translator().to_peer_addr(addr)
    }
}

/// One recorded cache-maintenance call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheEvent {
    Flush { addr: usize, len: usize },
    Invalidate { addr: usize, len: usize },
    Barrier,
}

/// CacheOps fake recording every call in order
#[derive(Debug, Default)]
pub struct RecordingCache {
    events: Mutex<Vec<CacheEvent>>,
}

impl RecordingCache {
    pub fn events(&self) -> Vec<CacheEvent> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl CacheOps for RecordingCache {
    fn flush(&self, addr: usize, len: usize) {
        self.events.lock().push(CacheEvent::Flush { addr, len });
    }

    fn invalidate(&self, addr: usize, len: usize) {
        self.events.lock().push(CacheEvent::Invalidate { addr, len });
    }

    fn store_barrier(&self) {
        self.events.lock().push(CacheEvent::Barrier);
    }
}

/// BufPool fake recording cluster references and frees
#[derive(Debug, Default)]
pub struct CountingPool {
    refs: Mutex<Vec<usize>>,
    freed: Mutex<Vec<(ChannelId, usize)>>,
}

impl CountingPool {
    pub fn refs(&self) -> Vec<usize> {
        self.refs.lock().clone()
    }

    pub fn freed(&self) -> Vec<(ChannelId, usize)> {
        self.freed.lock().clone()
    }

    pub fn free_count(&self, iob: BufPtr) -> usize {
        self.freed
            .lock()
            .iter()
            .filter(|(_, addr)| *addr == iob.addr())
            .count()
    }
}

impl BufPool for CountingPool {
    fn ref_cluster(&self, iob: BufPtr) {
        self.refs.lock().push(iob.addr());
    }

    fn free_cluster(&self, chan: ChannelId, iob: BufPtr) {
        self.freed.lock().push((chan, iob.addr()));
    }
}

/// Queue over a fixture region with an attached guard node
pub fn queue_with_guard(
    region: &HostRegion,
) -> (Arc<SharedQueue>, BufPtr, Arc<CountingPool>, Arc<RecordingCache>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let cache = Arc::new(RecordingCache::default());
    let pool = Arc::new(CountingPool::default());
    let queue =
        SharedQueue::new(region.layout(), cache.clone(), pool.clone()).expect("valid layout");
    let guard = region.alloc_desc(IoBuf::default());
    queue.attach_guard(guard).expect("guard attach");
    cache.clear();
    (Arc::new(queue), guard, pool, cache)
}
