/*!
 * Channel Registry
 * Channel-id to receive-handler dispatch table
 */

use super::traits::RxHandler;
use crate::core::types::ChannelId;
use ahash::RandomState;
use dashmap::DashMap;
use log::{info, warn};
use std::sync::Arc;

/// Dispatch table mapping channel ids to their receive handlers.
///
/// The drain loop only depends on presence or absence: buffers for channels
/// with no registered handler are released back to their pool.
pub struct ChannelRegistry {
    handlers: DashMap<ChannelId, Arc<dyn RxHandler>, RandomState>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self {
            handlers: DashMap::with_hasher(RandomState::new()),
        }
    }

    /// Register a handler, replacing any previous one for the channel
    pub fn register(&self, chan: ChannelId, handler: Arc<dyn RxHandler>) {
        if self.handlers.insert(chan, handler).is_some() {
            warn!("Replaced receive handler for channel {}", chan);
        } else {
            info!("Registered receive handler for channel {}", chan);
        }
    }

    /// Remove a channel's handler; returns whether one was registered
    pub fn unregister(&self, chan: ChannelId) -> bool {
        let removed = self.handlers.remove(&chan).is_some();
        if removed {
            info!("Unregistered receive handler for channel {}", chan);
        }
        removed
    }

    /// Current handler for a channel, if any
    pub fn lookup(&self, chan: ChannelId) -> Option<Arc<dyn RxHandler>> {
        self.handlers.get(&chan).map(|h| Arc::clone(h.value()))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
