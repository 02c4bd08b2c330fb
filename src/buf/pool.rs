/*!
 * Buffer Pool Interface
 * Cluster reference counting and free, owned by the external allocator
 */

use super::desc::BufPtr;
use crate::core::types::ChannelId;

/// Buffer pool interface
///
/// Allocation and reference-count internals live outside the transport. The
/// queue only takes a cluster-wide reference before a chain becomes visible
/// to the peer, and releases clusters it has finished with (consumed guard
/// nodes and received buffers no channel claims).
pub trait BufPool: Send + Sync {
    /// Take a reference on a whole cluster: the descriptor, every `sg_next`
    /// fragment, and every `next`-chained item. Must keep the cluster alive
    /// while it is reachable from the shared queue.
    fn ref_cluster(&self, iob: BufPtr);

    /// Release a cluster back to the pool that owns `chan`.
    fn free_cluster(&self, chan: ChannelId, iob: BufPtr);
}
