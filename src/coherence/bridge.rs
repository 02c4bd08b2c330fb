/*!
 * Coherence Bridge
 * Flush / invalidate over fragmented descriptor chains
 */

use super::traits::CacheOps;
use crate::buf::{BufPtr, IoBuf};
use crate::region::AddressTranslator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Maintenance {
    Flush,
    Invalidate,
}

/// Write back every record and payload of a chain.
///
/// Must run before the chain becomes reachable by the peer: outer walk over
/// `next`-linked items, inner walk over `sg_next`-linked fragments, flushing
/// each record and, when `length > 0`, its payload region at
/// `translate(data) + data_offset`.
pub fn flush_chain(translator: &AddressTranslator, cache: &dyn CacheOps, iob: BufPtr) {
    walk_chain(translator, cache, iob, Maintenance::Flush)
}

/// Invalidate every record and payload of a chain.
///
/// Must run after the peer signals the chain ready and before any field of
/// it is trusted; identical traversal and identical byte ranges as
/// [`flush_chain`], with each record invalidated before its links are read.
pub fn inv_chain(translator: &AddressTranslator, cache: &dyn CacheOps, iob: BufPtr) {
    walk_chain(translator, cache, iob, Maintenance::Invalidate)
}

fn apply(cache: &dyn CacheOps, op: Maintenance, addr: usize, len: usize) {
    match op {
        Maintenance::Flush => cache.flush(addr, len),
        Maintenance::Invalidate => cache.invalidate(addr, len),
    }
}

fn walk_chain(translator: &AddressTranslator, cache: &dyn CacheOps, iob: BufPtr, op: Maintenance) {
    let mut item = iob;
    while !item.is_null() {
        let mut leaf = item;
        while !leaf.is_null() {
            // Record first: on the invalidate side the links must come from
            // shared memory, not from a stale line.
            apply(cache, op, leaf.addr(), IoBuf::SIZE);
            let record = unsafe { leaf.snapshot() };
            if record.length > 0 {
                apply(
                    cache,
                    op,
                    translator.to_local_addr(record.data) + record.data_offset as usize,
                    record.length as usize,
                );
            }
            leaf = translator.to_local(record.sg_next);
        }
        let record = unsafe { item.snapshot() };
        item = translator.to_local(record.next);
    }
}
