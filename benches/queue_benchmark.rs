/*!
 * Queue Benchmark
 * Put/get round-trip throughput over a host-backed window
 */

use criterion::{criterion_group, criterion_main, Criterion};
use shmlink::{BufPool, BufPtr, ChannelId, CoherentCache, IoBuf, RegionLayout, SharedQueue};
use std::sync::Arc;

const SLOTS: usize = 1024;

/// Pool stub: benchmark descriptors are owned by the harness
struct NullPool;

impl BufPool for NullPool {
    fn ref_cluster(&self, _iob: BufPtr) {}
    fn free_cluster(&self, _chan: ChannelId, _iob: BufPtr) {}
}

struct BenchRegion {
    mem: Box<[u64]>,
    layout: RegionLayout,
}

impl BenchRegion {
    fn new() -> Self {
        let desc_size = SLOTS * IoBuf::SIZE;
        let mem = vec![0u64; (desc_size + 7) / 8].into_boxed_slice();
        let ipc_base = mem.as_ptr() as usize;
        let layout = RegionLayout {
            ipc_base,
            peer_base: 0x4000_0000,
            size: mem.len() * 8,
            desc_base: ipc_base,
            desc_size,
        };
        Self { mem, layout }
    }

    fn slot(&self, index: usize) -> BufPtr {
        let addr = self.layout.desc_base + (index % SLOTS) * IoBuf::SIZE;
        unsafe { BufPtr::from_addr(addr) }
    }
}

fn bench_put_get(c: &mut Criterion) {
    let region = BenchRegion::new();
    let queue = SharedQueue::new(
        region.layout,
        Arc::new(CoherentCache),
        Arc::new(NullPool),
    )
    .expect("valid layout");

    let guard = region.slot(0);
    unsafe { guard.write(IoBuf::default()) };
    queue.attach_guard(guard).expect("guard attach");

    let mut index = 1usize;
    c.bench_function("put_get_round_trip", |b| {
        b.iter(|| {
            let item = region.slot(index);
            index += 1;
            unsafe { item.write(IoBuf::default()) };
            queue.put(item).expect("put");
            assert!(queue.get().is_some());
        })
    });
    drop(region);
}

criterion_group!(benches, bench_put_get);
criterion_main!(benches);
