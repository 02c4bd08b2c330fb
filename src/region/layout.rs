/*!
 * Region Layout
 * Shared-region geometry and pre-flight validation
 */

use super::translate::AddressTranslator;
use crate::buf::IoBuf;
use crate::core::errors::LinkError;
use crate::core::types::LinkResult;
use log::error;
use serde::{Deserialize, Serialize};

/// Geometry of the mapped shared region.
///
/// The region is partitioned into an IPC zone and a descriptor zone. The
/// descriptor zone must hold a whole number of [`IoBuf`] records so both
/// processors index it identically.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RegionLayout {
    /// Local base address of the IPC zone (start of the mapped window)
    pub ipc_base: usize,
    /// Peer-space address of the same window start
    pub peer_base: u32,
    /// Total mapped window size in bytes
    pub size: usize,
    /// Local base address of the descriptor zone
    pub desc_base: usize,
    /// Descriptor zone size in bytes
    pub desc_size: usize,
}

impl RegionLayout {
    /// Validate geometry before the queue may be brought up.
    ///
    /// Catches configuration issues only: missing base addresses and a
    /// descriptor zone that is not an exact multiple of one descriptor
    /// record. Queue pointers themselves are established elsewhere.
    pub fn validate(&self) -> LinkResult<()> {
        if self.ipc_base == 0 || self.desc_base == 0 {
            error!("IPC or descriptor base not defined");
            return Err(LinkError::Config(
                "IPC or descriptor base address is zero".into(),
            ));
        }
        if self.peer_base == 0 {
            error!("Peer base not defined");
            return Err(LinkError::Config(
                "peer base address is zero (would alias the null link)".into(),
            ));
        }
        if self.desc_size % IoBuf::SIZE != 0 {
            error!(
                "Descriptor zone illegal size: {} not a multiple of {}",
                self.desc_size,
                IoBuf::SIZE
            );
            return Err(LinkError::Config(format!(
                "descriptor zone size {} is not a multiple of the {}-byte record",
                self.desc_size,
                IoBuf::SIZE
            )));
        }
        Ok(())
    }

    /// Translator over this region's window
    pub fn translator(&self) -> AddressTranslator {
        AddressTranslator::new(self.ipc_base, self.peer_base, self.size)
    }
}
