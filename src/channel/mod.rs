/*!
 * Channel Module
 * Routing of received buffers to per-channel consumers
 */

pub mod registry;
pub mod traits;

// Re-export for convenience
pub use registry::ChannelRegistry;
pub use traits::RxHandler;
