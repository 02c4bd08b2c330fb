/*!
 * Coherence Traits
 * Abstract cache-maintenance capability for the incoherent link
 */

/// Cache-maintenance operations for the shared window.
///
/// The two processors share memory but not a cache domain, so every
/// ownership hand-off is bracketed manually: flush newly written structures
/// before the link exposing them is stored, barrier, store the link and
/// flush its holder, barrier; symmetrically, invalidate before reading
/// anything the local side did not last write.
///
/// Injectable so a coherent target can plug a no-op ([`CoherentCache`]) and
/// tests can record and assert the discipline.
///
/// [`CoherentCache`]: super::noop::CoherentCache
pub trait CacheOps: Send + Sync {
    /// Write back the cache lines covering `[addr, addr + len)`
    fn flush(&self, addr: usize, len: usize);

    /// Discard (without write-back) the cache lines covering
    /// `[addr, addr + len)` so the next read hits shared memory
    fn invalidate(&self, addr: usize, len: usize);

    /// Order all prior stores before any later ones
    fn store_barrier(&self);
}
