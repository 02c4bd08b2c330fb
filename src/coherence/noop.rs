/*!
 * Coherent Cache
 * No-op maintenance for targets that share a cache domain
 */

use super::traits::CacheOps;
use std::sync::atomic::{fence, Ordering};

/// Cache maintenance on a hardware-coherent target.
///
/// Flush and invalidate collapse to nothing; the store barrier remains a
/// real fence, since store ordering toward the peer is still required.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoherentCache;

impl CacheOps for CoherentCache {
    #[inline]
    fn flush(&self, _addr: usize, _len: usize) {}

    #[inline]
    fn invalidate(&self, _addr: usize, _len: usize) {}

    #[inline]
    fn store_barrier(&self) {
        fence(Ordering::SeqCst);
    }
}
