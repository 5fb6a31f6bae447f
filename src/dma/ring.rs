//! Descriptor ring adapter.
//!
//! A thin, read-mostly accessor over a descriptor ring owned by the external
//! DMA engine abstraction. The pipeline only asks two questions of it: which
//! descriptor is current, and is that descriptor still owned by hardware.
//! Advancing the cursors is done by the DMA submission path of the HAL.

use super::descriptor::{OwnedDescriptor, VolatileCell};

/// Ownership view of a TX/RX descriptor ring.
pub trait DescriptorRing {
    /// Index of the descriptor the next transmit will use
    fn current_tx_index(&self) -> usize;

    /// Whether TX descriptor `index` is software-owned
    fn is_tx_desc_free(&self, index: usize) -> bool;

    /// Index of the descriptor the next receive completes into
    fn current_rx_index(&self) -> usize;

    /// Whether RX descriptor `index` is software-owned
    fn is_rx_desc_free(&self, index: usize) -> bool;
}

/// Adapter over externally owned descriptor memory.
///
/// `tx_cursor`/`rx_cursor` point at the HAL's current-descriptor fields
/// (`TxDescList.CurTxDesc`, `RxDescList.RxDescIdx`); both are read volatile
/// because the HAL advances them from interrupt context.
///
/// # Example
///
/// ```ignore
/// let ring = ExternalRing::new(&TX_DESCS, &RX_DESCS, &tx_cur, &rx_cur);
/// if ring.is_tx_desc_free(ring.current_tx_index()) {
///     // safe to stage the next frame
/// }
/// ```
pub struct ExternalRing<'a, D: OwnedDescriptor> {
    tx: &'a [D],
    rx: &'a [D],
    tx_cursor: &'a VolatileCell<u32>,
    rx_cursor: &'a VolatileCell<u32>,
}

impl<'a, D: OwnedDescriptor> ExternalRing<'a, D> {
    /// Create an adapter over the given descriptor arrays and cursors
    pub const fn new(
        tx: &'a [D],
        rx: &'a [D],
        tx_cursor: &'a VolatileCell<u32>,
        rx_cursor: &'a VolatileCell<u32>,
    ) -> Self {
        Self {
            tx,
            rx,
            tx_cursor,
            rx_cursor,
        }
    }

    /// Number of TX descriptors
    #[inline(always)]
    pub const fn tx_len(&self) -> usize {
        self.tx.len()
    }

    /// Number of RX descriptors
    #[inline(always)]
    pub const fn rx_len(&self) -> usize {
        self.rx.len()
    }
}

impl<D: OwnedDescriptor> DescriptorRing for ExternalRing<'_, D> {
    #[inline]
    fn current_tx_index(&self) -> usize {
        self.tx_cursor.get() as usize
    }

    /// Out-of-range indices are reported as not free.
    #[inline]
    fn is_tx_desc_free(&self, index: usize) -> bool {
        self.tx.get(index).is_some_and(|d| !d.is_dma_owned())
    }

    #[inline]
    fn current_rx_index(&self) -> usize {
        self.rx_cursor.get() as usize
    }

    #[inline]
    fn is_rx_desc_free(&self, index: usize) -> bool {
        self.rx.get(index).is_some_and(|d| !d.is_dma_owned())
    }
}

// =============================================================================
// Tests
// =============================================================================
