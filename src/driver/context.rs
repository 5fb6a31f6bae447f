//! State shared between the client path and the hardware callbacks.
//!
//! [`MacContext`] holds the buffer pool, the receive tracker and the event
//! callback slot. Everything the interrupt-context path can touch lives here,
//! behind critical sections, so the context can be a plain `static` while the
//! driver itself ([`EthMac`](super::EthMac)) stays an ordinary owned value.

use crate::dma::{BufferPool, DmaBuffer};
use crate::hal::HardwareCallbacks;
#[cfg(feature = "async")]
use crate::sync::AtomicWaker;
use crate::sync::CriticalSectionCell;

use super::event::{EventCallback, MacEvent};

/// Most recently completed receive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RxFrame {
    /// Receive region holding the frame
    index: usize,
    /// Frame length in bytes
    len: usize,
}

/// Receive tracker
#[derive(Debug)]
struct RxTracker {
    /// Next receive region handed to hardware
    alloc_idx: usize,
    /// Single-slot tracked frame; a newer frame overwrites an undrained one
    frame: Option<RxFrame>,
}

impl RxTracker {
    const fn new() -> Self {
        Self {
            alloc_idx: 0,
            frame: None,
        }
    }
}

/// ISR-shared part of the driver.
///
/// # Type Parameters
/// * `RX_BUFS` - Number of receive regions
/// * `TX_BUFS` - Number of transmit staging regions
/// * `BUF_SIZE` - Size of each region in bytes
///
/// # Example
///
/// ```ignore
/// static CTX: MacContext<4, 4, 1524> = MacContext::new();
///
/// let mut mac = EthMac::new(&CTX, hw);
/// mac.initialize(Some(on_event))?;
/// ```
pub struct MacContext<const RX_BUFS: usize, const TX_BUFS: usize, const BUF_SIZE: usize> {
    pool: BufferPool<RX_BUFS, TX_BUFS, BUF_SIZE>,
    rx: CriticalSectionCell<RxTracker>,
    callback: CriticalSectionCell<Option<EventCallback>>,
    #[cfg(feature = "async")]
    rx_waker: AtomicWaker,
    #[cfg(feature = "async")]
    tx_waker: AtomicWaker,
}

impl<const RX_BUFS: usize, const TX_BUFS: usize, const BUF_SIZE: usize>
    MacContext<RX_BUFS, TX_BUFS, BUF_SIZE>
{
    /// Create a context (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            pool: BufferPool::new(),
            rx: CriticalSectionCell::new(RxTracker::new()),
            callback: CriticalSectionCell::new(None),
            #[cfg(feature = "async")]
            rx_waker: AtomicWaker::new(),
            #[cfg(feature = "async")]
            tx_waker: AtomicWaker::new(),
        }
    }

    /// Buffer pool backing this context
    #[inline(always)]
    pub fn pool(&self) -> &BufferPool<RX_BUFS, TX_BUFS, BUF_SIZE> {
        &self.pool
    }

    /// Length of the tracked frame, 0 if none
    pub fn pending_len(&self) -> usize {
        self.rx.with_ref(|rx| rx.frame.map_or(0, |f| f.len))
    }

    /// Clear run-time state and install `callback`
    pub(crate) fn reset(&self, callback: Option<EventCallback>) {
        self.rx.with(|rx| *rx = RxTracker::new());
        self.callback.replace(callback);
    }

    /// Drain the tracked frame into `dest`.
    ///
    /// Copies `dest.len()` bytes from the start of the tracked region and
    /// clears the slot. The slot is taken and copied inside one critical
    /// section so a link notification cannot land mid-copy. Returns 0 when
    /// nothing is tracked. `dest.len()` must not exceed `BUF_SIZE`.
    pub(crate) fn take_frame(&self, dest: &mut [u8]) -> usize {
        self.rx.with(|rx| {
            let Some(frame) = rx.frame.take() else {
                return 0;
            };
            let Some(region) = self.pool.rx(frame.index) else {
                return 0;
            };
            // SAFETY: the hardware reported this region complete and has not
            // been given it back; the critical section excludes the link path.
            let data = unsafe { region.as_slice() };
            let count = dest.len().min(data.len());
            dest[..count].copy_from_slice(&data[..count]);
            count
        })
    }

    /// Forward `event` to the registered callback
    fn dispatch(&self, event: MacEvent) {
        // Read under the lock, call without it
        if let Some(callback) = self.callback.get() {
            callback(event);
        }
    }

    #[cfg(feature = "async")]
    pub(crate) fn rx_waker(&self) -> &AtomicWaker {
        &self.rx_waker
    }

    #[cfg(feature = "async")]
    pub(crate) fn tx_waker(&self) -> &AtomicWaker {
        &self.tx_waker
    }
}

impl<const RX_BUFS: usize, const TX_BUFS: usize, const BUF_SIZE: usize> Default
    for MacContext<RX_BUFS, TX_BUFS, BUF_SIZE>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const RX_BUFS: usize, const TX_BUFS: usize, const BUF_SIZE: usize> HardwareCallbacks
    for MacContext<RX_BUFS, TX_BUFS, BUF_SIZE>
{
    fn allocate_rx_buffer(&self) -> *mut u8 {
        let index = self.rx.with(|rx| {
            let index = rx.alloc_idx;
            rx.alloc_idx = (index + 1) % RX_BUFS.max(1);
            index
        });
        self.pool
            .rx(index)
            .map_or(core::ptr::null_mut(), DmaBuffer::as_mut_ptr)
    }

    fn rx_frame_linked(&self, buffer: *const u8, length: u16) {
        let Some(index) = self.pool.rx_index_of(buffer) else {
            #[cfg(feature = "defmt")]
            defmt::warn!("rx link for unknown buffer ignored");
            return;
        };
        let len = usize::from(length).min(BUF_SIZE);

        let _previous = self.rx.with(|rx| rx.frame.replace(RxFrame { index, len }));

        #[cfg(feature = "defmt")]
        {
            if let Some(prev) = _previous {
                defmt::debug!(
                    "undrained rx frame ({} bytes, buffer {}) overwritten",
                    prev.len,
                    prev.index
                );
            }
        }
    }

    fn tx_complete(&self) {
        self.dispatch(MacEvent::TxFrame);
        #[cfg(feature = "async")]
        self.tx_waker.wake();
    }

    fn rx_complete(&self) {
        self.dispatch(MacEvent::RxFrame);
        #[cfg(feature = "async")]
        self.rx_waker.wake();
    }

    fn wakeup(&self) {
        self.dispatch(MacEvent::Wakeup);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn allocation_is_round_robin() {
        let ctx: MacContext<4, 1, 64> = MacContext::new();
        let expected: [usize; 6] = [0, 1, 2, 3, 0, 1];

        for index in expected {
            let ptr = ctx.allocate_rx_buffer();
            assert_eq!(ctx.pool().rx_index_of(ptr), Some(index));
        }
    }

    #[test]
    fn allocation_visits_every_region_before_repeating() {
        let ctx: MacContext<3, 1, 64> = MacContext::new();
        let a = ctx.allocate_rx_buffer();
        let b = ctx.allocate_rx_buffer();
        let c = ctx.allocate_rx_buffer();
        assert!(a != b && b != c && a != c);
        assert_eq!(ctx.allocate_rx_buffer(), a);
    }

    #[test]
    fn linked_frame_is_tracked_once() {
        let ctx: MacContext<2, 1, 64> = MacContext::new();
        let ptr = ctx.allocate_rx_buffer();
        // SAFETY: region is software-owned in this test.
        unsafe { ctx.pool().rx(0).unwrap().as_mut_slice()[..3].copy_from_slice(b"xyz") };

        ctx.rx_frame_linked(ptr, 3);
        assert_eq!(ctx.pending_len(), 3);

        let mut dest = [0u8; 3];
        assert_eq!(ctx.take_frame(&mut dest), 3);
        assert_eq!(&dest, b"xyz");
        assert_eq!(ctx.pending_len(), 0);
        assert_eq!(ctx.take_frame(&mut dest), 0);
    }

    #[test]
    fn newer_frame_overwrites_undrained_one() {
        let ctx: MacContext<2, 1, 64> = MacContext::new();
        let first = ctx.allocate_rx_buffer();
        let second = ctx.allocate_rx_buffer();
        // SAFETY: regions are software-owned in this test.
        unsafe {
            ctx.pool().rx(0).unwrap().as_mut_slice()[0] = 0xAA;
            ctx.pool().rx(1).unwrap().as_mut_slice()[0] = 0xBB;
        }

        ctx.rx_frame_linked(first, 10);
        ctx.rx_frame_linked(second, 20);
        assert_eq!(ctx.pending_len(), 20);

        let mut dest = [0u8; 1];
        ctx.take_frame(&mut dest);
        assert_eq!(dest[0], 0xBB);
    }

    #[test]
    fn foreign_buffer_is_ignored() {
        let ctx: MacContext<2, 1, 64> = MacContext::new();
        let outside = [0u8; 16];
        ctx.rx_frame_linked(outside.as_ptr(), 8);
        assert_eq!(ctx.pending_len(), 0);

        let tx_ptr = ctx.pool().tx(0).unwrap().as_mut_ptr();
        ctx.rx_frame_linked(tx_ptr, 8);
        assert_eq!(ctx.pending_len(), 0);
    }

    #[test]
    fn interior_pointer_is_ignored() {
        let ctx: MacContext<2, 1, 64> = MacContext::new();
        let ptr = ctx.allocate_rx_buffer();
        // SAFETY: region is software-owned and the offset stays inside it.
        let inner = unsafe {
            let inner = ptr.add(10);
            core::ptr::copy_nonoverlapping(b"WXYZ".as_ptr(), inner, 4);
            inner
        };

        ctx.rx_frame_linked(inner, 4);
        assert_eq!(ctx.pending_len(), 0);

        let mut dest = [0u8; 4];
        assert_eq!(ctx.take_frame(&mut dest), 0);
    }

    #[test]
    fn oversized_length_is_clamped() {
        let ctx: MacContext<1, 1, 64> = MacContext::new();
        let ptr = ctx.allocate_rx_buffer();
        ctx.rx_frame_linked(ptr, 9000);
        assert_eq!(ctx.pending_len(), 64);
    }

    #[test]
    fn reset_clears_tracker_and_cursor() {
        let ctx: MacContext<4, 1, 64> = MacContext::new();
        let first = ctx.allocate_rx_buffer();
        let second = ctx.allocate_rx_buffer();
        ctx.rx_frame_linked(second, 5);

        ctx.reset(None);
        assert_eq!(ctx.pending_len(), 0);
        assert_eq!(ctx.allocate_rx_buffer(), first);
    }

    #[test]
    fn events_reach_callback() {
        static RX: AtomicUsize = AtomicUsize::new(0);
        static TX: AtomicUsize = AtomicUsize::new(0);
        static WAKE: AtomicUsize = AtomicUsize::new(0);

        fn on_event(event: MacEvent) {
            let counter = match event {
                MacEvent::RxFrame => &RX,
                MacEvent::TxFrame => &TX,
                MacEvent::Wakeup => &WAKE,
            };
            counter.fetch_add(1, Ordering::SeqCst);
        }

        let ctx: MacContext<1, 1, 64> = MacContext::new();
        ctx.reset(Some(on_event));

        ctx.rx_complete();
        ctx.rx_complete();
        ctx.tx_complete();
        ctx.wakeup();

        assert_eq!(RX.load(Ordering::SeqCst), 2);
        assert_eq!(TX.load(Ordering::SeqCst), 1);
        assert_eq!(WAKE.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn events_without_callback_are_dropped() {
        let ctx: MacContext<1, 1, 64> = MacContext::new();
        ctx.tx_complete();
        ctx.rx_complete();
        ctx.wakeup();
    }
}
