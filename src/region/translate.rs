/*!
 * Address Translation
 * Conversion between local pointers and peer-space offsets
 */

use crate::buf::desc::BufPtr;
use serde::{Deserialize, Serialize};

/// Peer-space offset of a descriptor or payload within the shared window.
///
/// This is the representation stored in shared structures: meaningful to the
/// other processor's view of the region, never dereferenceable locally. The
/// only conversion path to and from local pointers is [`AddressTranslator`].
/// Zero is the null sentinel (end of queue / end of sg-chain / no payload).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PeerOff(u32);

impl PeerOff {
    /// Null link
    pub const NULL: PeerOff = PeerOff(0);

    #[inline]
    pub const fn new(raw: u32) -> Self {
        PeerOff(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Translator over the mapped shared-region window.
///
/// Both directions are pure and total inside the window and invert each
/// other: `to_local(to_peer(p)) == p` for every in-window `p`. Null maps to
/// null. Behavior for addresses outside the window is undefined; callers
/// guard (see the drain path's bounds check on the head offset).
#[derive(Debug, Clone, Copy)]
pub struct AddressTranslator {
    local_base: usize,
    peer_base: u32,
    size: usize,
}

impl AddressTranslator {
    pub fn new(local_base: usize, peer_base: u32, size: usize) -> Self {
        Self {
            local_base,
            peer_base,
            size,
        }
    }

    /// Whether a local address falls inside the mapped window
    #[inline]
    pub fn contains(&self, addr: usize) -> bool {
        addr >= self.local_base && addr < self.local_base + self.size
    }

    /// Local byte address for a peer offset (0 for null)
    #[inline]
    pub fn to_local_addr(&self, off: PeerOff) -> usize {
        if off.is_null() {
            return 0;
        }
        let addr = self.local_base + (off.raw().wrapping_sub(self.peer_base)) as usize;
        debug_assert!(self.contains(addr), "peer offset {:#x} outside window", off.raw());
        addr
    }

    /// Peer offset for a local byte address (null for 0)
    #[inline]
    pub fn to_peer_addr(&self, addr: usize) -> PeerOff {
        if addr == 0 {
            return PeerOff::NULL;
        }
        debug_assert!(self.contains(addr), "local address {:#x} outside window", addr);
        PeerOff::new(self.peer_base.wrapping_add((addr - self.local_base) as u32))
    }

    /// Translate a queued descriptor link into a local handle
    #[inline]
    pub fn to_local(&self, off: PeerOff) -> BufPtr {
        // In-window by the translation invariant; the handle is only as
        // valid as the link it was read from.
        unsafe { BufPtr::from_addr(self.to_local_addr(off)) }
    }

    /// Translate a local descriptor handle into its peer-space link
    #[inline]
    pub fn to_peer(&self, iob: BufPtr) -> PeerOff {
        self.to_peer_addr(iob.addr())
    }
}
