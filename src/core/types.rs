/*!
 * Core Types
 * Common types used across the link transport
 */

/// Logical channel identifier used for routing received buffers
pub type ChannelId = u32;

/// Allocation pool identifier carried by every descriptor
pub type PoolId = u32;

/// First pool id owned by the local processor.
///
/// Pool ids below this value identify peer-owned allocations; the drain
/// loop only dispatches (or frees) those. Ids at or above it belong to
/// local pools and are left untouched by the receive path.
pub const LOCAL_POOL_BASE: PoolId = 128;

/// Common result type for link operations
pub type LinkResult<T> = Result<T, super::errors::LinkError>;
