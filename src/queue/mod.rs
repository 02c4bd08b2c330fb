/*!
 * Queue Module
 * The shared queue protocol: enqueue, dequeue, and the drain loop
 */

pub mod drain;
pub mod shared;
pub mod stats;

// Re-export for convenience
pub use shared::SharedQueue;
pub use stats::QueueStats;
