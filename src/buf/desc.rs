/*!
 * Buffer Descriptor
 * The shared descriptor record and its local-view handle
 */

use crate::core::types::{ChannelId, PoolId};
use crate::region::translate::PeerOff;
use std::ptr;

/// Shared buffer descriptor, resident in the descriptor zone and mutated by
/// both processors.
///
/// Byte layout must match on both sides exactly: fixed-width fields only,
/// `#[repr(C)]`, links stored as peer-space offsets. Reference counting is
/// owned by the external buffer pool, not by this record.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IoBuf {
    /// Next queued item (distinct logical message); null ends the queue
    pub next: PeerOff,
    /// Next fragment of the same logical buffer; null ends the sg-chain
    pub sg_next: PeerOff,
    /// Routing channel
    pub chan: ChannelId,
    /// Allocation pool this descriptor was drawn from
    pub pool_id: PoolId,
    /// Peer-space pointer to the payload bytes
    pub data: PeerOff,
    /// Byte offset of the payload within `data`
    pub data_offset: u32,
    /// Payload length in bytes; zero means no payload cache maintenance
    pub length: u32,
}

impl IoBuf {
    /// Size of one descriptor record; the descriptor zone must be an exact
    /// multiple of this.
    pub const SIZE: usize = std::mem::size_of::<IoBuf>();
}

/// Local-view handle to a shared descriptor.
///
/// Deliberately nullable and `Copy`, mirroring the raw handle that crosses
/// the pool and bring-up boundaries. It is distinct from [`PeerOff`]: a
/// `BufPtr` is only meaningful on the local processor and is produced either
/// by translation or by the embedder that owns the region mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufPtr(usize);

impl BufPtr {
    /// Null handle
    pub const NULL: BufPtr = BufPtr(0);

    /// Wrap a local descriptor address.
    ///
    /// # Safety
    /// `addr` must be zero or the address of an [`IoBuf`] record inside the
    /// mapped shared window, valid for reads and writes for the lifetime of
    /// the link instance that will dereference it.
    #[inline]
    pub const unsafe fn from_addr(addr: usize) -> Self {
        BufPtr(addr)
    }

    /// Local address of the descriptor (0 for null)
    #[inline]
    pub const fn addr(self) -> usize {
        self.0
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Read the whole record.
    ///
    /// Volatile: the peer processor mutates these fields, so reads must not
    /// be elided or reordered against cache maintenance by the compiler.
    ///
    /// # Safety
    /// The handle must be non-null and reference a live descriptor.
    #[inline]
    pub unsafe fn snapshot(self) -> IoBuf {
        ptr::read_volatile(self.0 as *const IoBuf)
    }

    /// Read only the queue link.
    ///
    /// # Safety
    /// The handle must be non-null and reference a live descriptor.
    #[inline]
    pub unsafe fn next(self) -> PeerOff {
        ptr::read_volatile(ptr::addr_of!((*(self.0 as *const IoBuf)).next))
    }

    /// Write the queue link. This is the publication (or detach) store.
    ///
    /// # Safety
    /// The handle must be non-null and reference a live descriptor, and the
    /// caller must uphold the single-producer contract for this field.
    #[inline]
    pub unsafe fn set_next(self, link: PeerOff) {
        ptr::write_volatile(ptr::addr_of_mut!((*(self.0 as *mut IoBuf)).next), link);
    }

    /// Overwrite the whole record (bring-up and pool code only).
    ///
    /// # Safety
    /// The handle must be non-null and reference descriptor storage not
    /// currently reachable by the peer.
    #[inline]
    pub unsafe fn write(self, record: IoBuf) {
        ptr::write_volatile(self.0 as *mut IoBuf, record);
    }
}

// The handle is an address, not a reference; ownership and aliasing are
// governed by the queue protocol, so it may move across threads.
unsafe impl Send for BufPtr {}
unsafe impl Sync for BufPtr {}
