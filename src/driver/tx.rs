//! Transmit assembler.
//!
//! Fragments are concatenated into the staging region paired with the TX
//! descriptor that was current when the frame started. The region is handed
//! to the hardware exactly once, on the final fragment.

use crate::dma::{BufferPool, DescriptorRing};
use crate::hal::EthHardware;

use super::error::{Error, Result};

/// Frame assembly in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct TxStaging {
    /// Staging region (= TX descriptor index) bound at frame start
    index: usize,
    /// Bytes accumulated so far; 0 means no assembly in progress
    len: usize,
}

impl TxStaging {
    pub(crate) const fn new() -> Self {
        Self { index: 0, len: 0 }
    }

    /// Bytes accumulated for the frame in progress
    #[inline(always)]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub(crate) fn reset(&mut self) {
        self.len = 0;
    }

    /// Append `data` and, if `is_final`, submit the assembled frame.
    ///
    /// A new frame is only started when the current TX descriptor is
    /// software-owned; otherwise `Busy` is returned and nothing changes.
    /// Overflowing the region abandons the partial frame.
    pub(crate) fn push<H, const RX_BUFS: usize, const TX_BUFS: usize, const BUF_SIZE: usize>(
        &mut self,
        hw: &mut H,
        pool: &BufferPool<RX_BUFS, TX_BUFS, BUF_SIZE>,
        data: &[u8],
        is_final: bool,
    ) -> Result<()>
    where
        H: EthHardware,
    {
        if self.len == 0 {
            let ring = hw.ring();
            let index = ring.current_tx_index();
            if !ring.is_tx_desc_free(index) {
                #[cfg(feature = "defmt")]
                defmt::trace!("tx descriptor {} still owned by DMA", index);
                return Err(Error::Busy);
            }
            self.index = index;
        }

        let region = pool.tx(self.index).ok_or(Error::HardwareError)?;

        let end = self.len + data.len();
        if end > BUF_SIZE {
            #[cfg(feature = "defmt")]
            defmt::warn!("tx frame exceeds {} bytes, dropped", BUF_SIZE);
            self.reset();
            return Err(Error::FrameTooLarge);
        }

        // SAFETY: the paired descriptor was software-owned when this frame
        // started and the region is only handed to DMA below, after the last
        // write.
        unsafe { region.as_mut_slice()[self.len..end].copy_from_slice(data) };
        self.len = end;

        if !is_final {
            return Ok(());
        }

        // SAFETY: as above; no mutable view is alive.
        let frame = unsafe { &region.as_slice()[..end] };
        let result = hw.submit_transmit(frame);
        self.reset();
        result.map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::test_utils::{MockHardware, MockRing};
    use std::vec;

    #[test]
    fn fragments_are_concatenated() {
        let pool: BufferPool<1, 4, 64> = BufferPool::new();
        let mut hw = MockHardware::new();
        let mut tx = TxStaging::new();

        tx.push(&mut hw, &pool, b"AB", false).unwrap();
        assert_eq!(tx.len(), 2);
        tx.push(&mut hw, &pool, b"CD", true).unwrap();

        assert_eq!(hw.submitted, vec![b"ABCD".to_vec()]);
        assert_eq!(tx.len(), 0);
    }

    #[test]
    fn many_fragments_submit_once() {
        let pool: BufferPool<1, 4, 64> = BufferPool::new();
        let mut hw = MockHardware::new();
        let mut tx = TxStaging::new();
        let parts: [&[u8]; 4] = [b"\x01", b"\x02\x03", b"\x04\x05\x06", b"\x07"];

        for (i, part) in parts.iter().enumerate() {
            tx.push(&mut hw, &pool, part, i == parts.len() - 1).unwrap();
            if i < parts.len() - 1 {
                assert!(hw.submitted.is_empty());
            }
        }

        assert_eq!(hw.submitted, vec![vec![1, 2, 3, 4, 5, 6, 7]]);
    }

    #[test]
    fn busy_descriptor_rejects_new_frame() {
        let pool: BufferPool<1, 4, 64> = BufferPool::new();
        let mut hw = MockHardware::new();
        hw.ring.set_tx_owned(0, true);
        let mut tx = TxStaging::new();

        assert_eq!(tx.push(&mut hw, &pool, b"AB", true), Err(Error::Busy));
        assert_eq!(tx.len(), 0);
        assert!(hw.submitted.is_empty());
        // SAFETY: region is software-owned in this test.
        assert!(unsafe { pool.tx(0).unwrap().as_slice() }.iter().all(|&b| b == 0));
    }

    #[test]
    fn busy_is_not_checked_mid_frame() {
        let pool: BufferPool<1, 4, 64> = BufferPool::new();
        let mut hw = MockHardware::new();
        let mut tx = TxStaging::new();

        tx.push(&mut hw, &pool, b"AB", false).unwrap();
        hw.ring.set_tx_owned(0, true);
        assert_eq!(tx.push(&mut hw, &pool, b"CD", false), Ok(()));
        assert_eq!(tx.len(), 4);
    }

    #[test]
    fn consecutive_frames_use_their_own_regions() {
        let pool: BufferPool<1, 2, 64> = BufferPool::new();
        let mut hw = MockHardware::with_ring(MockRing::new(2, 1));
        let mut tx = TxStaging::new();

        tx.push(&mut hw, &pool, b"first", true).unwrap();
        tx.push(&mut hw, &pool, b"second", true).unwrap();

        // First region still holds the in-flight frame
        // SAFETY: regions are not touched by the mock after submission.
        assert_eq!(unsafe { &pool.tx(0).unwrap().as_slice()[..5] }, b"first");
        assert_eq!(unsafe { &pool.tx(1).unwrap().as_slice()[..6] }, b"second");

        // Ring is full until a completion releases descriptor 0
        assert_eq!(tx.push(&mut hw, &pool, b"third", true), Err(Error::Busy));
        hw.ring.release_all_tx();
        tx.push(&mut hw, &pool, b"third", true).unwrap();
        assert_eq!(hw.submitted.len(), 3);
    }

    #[test]
    fn overflow_abandons_frame() {
        let pool: BufferPool<1, 1, 8> = BufferPool::new();
        let mut hw = MockHardware::with_ring(MockRing::new(1, 1));
        let mut tx = TxStaging::new();

        tx.push(&mut hw, &pool, &[0xAA; 6], false).unwrap();
        assert_eq!(
            tx.push(&mut hw, &pool, &[0xBB; 3], true),
            Err(Error::FrameTooLarge)
        );
        assert_eq!(tx.len(), 0);
        assert!(hw.submitted.is_empty());

        // Exactly the capacity is fine
        tx.push(&mut hw, &pool, &[0xCC; 8], true).unwrap();
        assert_eq!(hw.submitted, vec![vec![0xCC; 8]]);
    }

    #[test]
    fn submit_failure_resets_staging() {
        let pool: BufferPool<1, 4, 64> = BufferPool::new();
        let mut hw = MockHardware::new();
        hw.fail_submit = true;
        let mut tx = TxStaging::new();

        tx.push(&mut hw, &pool, b"AB", false).unwrap();
        assert_eq!(
            tx.push(&mut hw, &pool, b"CD", true),
            Err(Error::HardwareError)
        );
        assert_eq!(tx.len(), 0);
    }

    #[test]
    fn cursor_beyond_pool_is_hardware_error() {
        let pool: BufferPool<1, 1, 64> = BufferPool::new();
        let mut hw = MockHardware::with_ring(MockRing::new(4, 1));
        hw.ring.set_tx_cursor(2);
        let mut tx = TxStaging::new();

        assert_eq!(
            tx.push(&mut hw, &pool, b"AB", true),
            Err(Error::HardwareError)
        );
        assert_eq!(tx.len(), 0);
    }
}
