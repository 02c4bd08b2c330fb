/*!
 * Buffer Module
 * Shared descriptor record, local handle, and the external pool seam
 */

pub mod desc;
pub mod pool;

// Re-export for convenience
pub use desc::{BufPtr, IoBuf};
pub use pool::BufPool;
