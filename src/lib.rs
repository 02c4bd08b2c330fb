/*!
 * shmlink
 * Transport core of a shared-memory link between two independently clocked,
 * cache-incoherent processors: a guard-terminated descriptor queue in the
 * shared window, manual flush/invalidate discipline over fragmented buffer
 * chains, dual address-space translation, and a drain loop feeding
 * per-channel consumers.
 */

pub mod buf;
pub mod channel;
pub mod coherence;
pub mod core;
pub mod queue;
pub mod region;

// Re-exports
pub use buf::{BufPool, BufPtr, IoBuf};
pub use channel::{ChannelRegistry, RxHandler};
pub use coherence::{flush_chain, inv_chain, CacheOps, CoherentCache};
pub use crate::core::{ChannelId, LinkError, LinkResult, PoolId, LOCAL_POOL_BASE};
pub use queue::{QueueStats, SharedQueue};
pub use region::{AddressTranslator, PeerOff, RegionLayout};
