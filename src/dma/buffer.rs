//! DMA-visible buffer pool.
//!
//! All frame memory is statically sized with const generics:
//! `RX_BUFS` receive regions handed to hardware round-robin, and `TX_BUFS`
//! transmit staging regions (one per TX descriptor). Each region is aligned to
//! a cache line so cache maintenance never touches a neighbouring buffer.
//!
//! On parts with a data cache the pool must live in non-cacheable,
//! non-shareable normal memory (see [`eth_mac_static!`](crate::eth_mac_static)).

use core::cell::UnsafeCell;

use crate::internal::constants::DMA_BUFFER_ALIGN;

/// One fixed-size DMA region.
///
/// The region is shared with the DMA engine, so it is only reachable through
/// raw pointers or the `unsafe` slice accessors below. Callers must hold
/// software ownership of the region for the lifetime of the returned slice.
#[repr(C, align(32))]
pub struct DmaBuffer<const SIZE: usize> {
    data: UnsafeCell<[u8; SIZE]>,
}

// SAFETY: access is coordinated by descriptor ownership (hardware vs software)
// and, for the receive tracker, by critical sections.
unsafe impl<const SIZE: usize> Sync for DmaBuffer<SIZE> {}

impl<const SIZE: usize> DmaBuffer<SIZE> {
    /// Create a zeroed region. Const-compatible.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            data: UnsafeCell::new([0u8; SIZE]),
        }
    }

    /// Capacity of the region in bytes
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        SIZE
    }

    /// Start address of the region, as handed to the DMA engine
    #[inline(always)]
    pub const fn as_mut_ptr(&self) -> *mut u8 {
        self.data.get().cast()
    }

    /// Whether `ptr` is the start address of this region
    #[inline]
    pub fn starts_at(&self, ptr: *const u8) -> bool {
        core::ptr::eq(self.as_mut_ptr().cast_const(), ptr)
    }

    /// Shared view of the region.
    ///
    /// # Safety
    ///
    /// Software must own the region (no DMA write in flight) and no mutable
    /// view may exist for the lifetime of the returned slice.
    #[inline(always)]
    pub unsafe fn as_slice(&self) -> &[u8] {
        // SAFETY: upheld by the caller.
        unsafe { &*self.data.get() }
    }

    /// Exclusive view of the region.
    ///
    /// # Safety
    ///
    /// Software must own the region (descriptor not handed to DMA) and no
    /// other view may exist for the lifetime of the returned slice.
    #[inline(always)]
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn as_mut_slice(&self) -> &mut [u8] {
        // SAFETY: upheld by the caller.
        unsafe { &mut *self.data.get() }
    }
}

impl<const SIZE: usize> Default for DmaBuffer<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Statically allocated receive and transmit regions.
///
/// # Type Parameters
/// * `RX_BUFS` - Number of receive regions (matches RX descriptor count)
/// * `TX_BUFS` - Number of transmit staging regions (matches TX descriptor count)
/// * `BUF_SIZE` - Size of each region in bytes
pub struct BufferPool<const RX_BUFS: usize, const TX_BUFS: usize, const BUF_SIZE: usize> {
    rx: [DmaBuffer<BUF_SIZE>; RX_BUFS],
    tx: [DmaBuffer<BUF_SIZE>; TX_BUFS],
}

impl<const RX_BUFS: usize, const TX_BUFS: usize, const BUF_SIZE: usize>
    BufferPool<RX_BUFS, TX_BUFS, BUF_SIZE>
{
    /// Create a pool of zeroed regions. Const-compatible.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rx: [const { DmaBuffer::new() }; RX_BUFS],
            tx: [const { DmaBuffer::new() }; TX_BUFS],
        }
    }

    /// Total memory usage in bytes (including alignment padding).
    #[must_use]
    pub const fn memory_usage() -> usize {
        (RX_BUFS + TX_BUFS) * core::mem::size_of::<DmaBuffer<BUF_SIZE>>()
    }

    /// Receive region `index`
    #[inline]
    pub fn rx(&self, index: usize) -> Option<&DmaBuffer<BUF_SIZE>> {
        self.rx.get(index)
    }

    /// Transmit staging region `index`
    #[inline]
    pub fn tx(&self, index: usize) -> Option<&DmaBuffer<BUF_SIZE>> {
        self.tx.get(index)
    }

    /// Map a buffer address reported by hardware back to its receive region.
    ///
    /// Only region start addresses (as handed out for allocation) match.
    pub fn rx_index_of(&self, ptr: *const u8) -> Option<usize> {
        self.rx.iter().position(|buf| buf.starts_at(ptr))
    }
}

impl<const RX_BUFS: usize, const TX_BUFS: usize, const BUF_SIZE: usize> Default
    for BufferPool<RX_BUFS, TX_BUFS, BUF_SIZE>
{
    fn default() -> Self {
        Self::new()
    }
}

const _: () = assert!(core::mem::align_of::<DmaBuffer<1>>() == DMA_BUFFER_ALIGN);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_are_cache_line_aligned() {
        let pool: BufferPool<3, 2, 100> = BufferPool::new();
        for i in 0..3 {
            let addr = pool.rx(i).unwrap().as_mut_ptr() as usize;
            assert_eq!(addr % DMA_BUFFER_ALIGN, 0);
        }
        for i in 0..2 {
            let addr = pool.tx(i).unwrap().as_mut_ptr() as usize;
            assert_eq!(addr % DMA_BUFFER_ALIGN, 0);
        }
    }

    #[test]
    fn regions_are_distinct() {
        let pool: BufferPool<4, 1, 64> = BufferPool::new();
        let a = pool.rx(0).unwrap().as_mut_ptr();
        let b = pool.rx(1).unwrap().as_mut_ptr();
        let t = pool.tx(0).unwrap().as_mut_ptr();
        assert_ne!(a, b);
        assert_ne!(a, t);
    }

    #[test]
    fn out_of_range_region_is_none() {
        let pool: BufferPool<2, 1, 64> = BufferPool::new();
        assert!(pool.rx(2).is_none());
        assert!(pool.tx(1).is_none());
    }

    #[test]
    fn rx_index_of_maps_pointers() {
        let pool: BufferPool<4, 1, 64> = BufferPool::new();
        for i in 0..4 {
            let ptr = pool.rx(i).unwrap().as_mut_ptr();
            assert_eq!(pool.rx_index_of(ptr), Some(i));
            // SAFETY: offset stays inside the 64-byte region.
            let inner = unsafe { ptr.add(10) };
            assert_eq!(pool.rx_index_of(inner), None);
        }

        let tx_ptr = pool.tx(0).unwrap().as_mut_ptr();
        assert_eq!(pool.rx_index_of(tx_ptr), None);
        assert_eq!(pool.rx_index_of(core::ptr::null()), None);
    }

    #[test]
    fn memory_usage_includes_padding() {
        // 100 bytes round up to 128 with 32-byte alignment
        assert_eq!(BufferPool::<2, 1, 100>::memory_usage(), 3 * 128);
        assert_eq!(BufferPool::<4, 4, 1524>::memory_usage(), 8 * 1536);
    }

    #[test]
    fn capacity_matches_size() {
        let buf: DmaBuffer<1524> = DmaBuffer::new();
        assert_eq!(buf.capacity(), 1524);
    }
}
