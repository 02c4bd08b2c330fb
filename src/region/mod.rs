/*!
 * Region Module
 * Dual address-space view of the shared window: geometry and translation
 */

pub mod layout;
pub mod translate;

// Re-export for convenience
pub use layout::RegionLayout;
pub use translate::{AddressTranslator, PeerOff};
