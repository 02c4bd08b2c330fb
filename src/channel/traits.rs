/*!
 * Channel Traits
 * Per-channel receive callback interface
 */

use crate::buf::BufPtr;
use crate::core::types::ChannelId;

/// Per-channel receive handler.
///
/// Invoked by the drain loop with the instance lock released, so a handler
/// may call back into the queue (stats, registration) freely. A handler that
/// enqueues from inside the callback must still respect the single-producer
/// rule on `put`. Ownership of `iob` transfers to the handler, which is
/// responsible for eventually releasing the cluster.
pub trait RxHandler: Send + Sync {
    fn rx_event(&self, chan: ChannelId, iob: BufPtr);
}
