/*!
 * Coherence Module
 * Manual cache discipline between the two processors
 */

pub mod bridge;
pub mod noop;
pub mod traits;

// Re-export for convenience
pub use bridge::{flush_chain, inv_chain};
pub use noop::CoherentCache;
pub use traits::CacheOps;
