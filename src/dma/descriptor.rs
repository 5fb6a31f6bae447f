//! DMA descriptor layouts and ownership bits.
//!
//! Descriptors are owned and advanced by the external DMA engine abstraction.
//! This crate only ever *reads* the ownership bit of a descriptor; the types
//! here exist so that [`ExternalRing`](super::ExternalRing) can overlay the
//! descriptor memory the HAL places in its descriptor sections.

use core::cell::UnsafeCell;

/// Volatile cell wrapper for descriptor fields
///
/// Ensures all accesses are volatile to prevent compiler optimization
/// from reordering or caching descriptor field accesses.
#[repr(transparent)]
pub struct VolatileCell<T: Copy> {
    value: UnsafeCell<T>,
}

// SAFETY: all access is through volatile operations on word-sized values,
// which are single-copy atomic on Cortex-M.
unsafe impl<T: Copy> Sync for VolatileCell<T> {}

impl<T: Copy> VolatileCell<T> {
    /// Create a new volatile cell with the given initial value
    #[inline(always)]
    pub const fn new(value: T) -> Self {
        Self {
            value: UnsafeCell::new(value),
        }
    }

    /// Read the value (volatile read)
    #[inline(always)]
    pub fn get(&self) -> T {
        // SAFETY: the pointer comes from our own UnsafeCell and is always valid.
        unsafe { core::ptr::read_volatile(self.value.get()) }
    }

    /// Write a value (volatile write)
    #[inline(always)]
    pub fn set(&self, value: T) {
        // SAFETY: the pointer comes from our own UnsafeCell and is always valid.
        unsafe { core::ptr::write_volatile(self.value.get(), value) }
    }
}

impl<T: Copy + Default> Default for VolatileCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

// =============================================================================
// Ownership Bits
// =============================================================================

/// OWN bit: set while the descriptor belongs to the DMA engine
pub const DESC_OWN: u32 = 1 << 31;

/// Common view over a descriptor layout: who owns it right now.
pub trait OwnedDescriptor {
    /// Whether the DMA engine currently owns this descriptor
    fn is_dma_owned(&self) -> bool;
}

// =============================================================================
// Descriptor Layouts
// =============================================================================

/// Descriptor of the "ETH_DMADescTypeDef" layout used by STM32H5/H7 parts.
///
/// Four hardware words plus two HAL backup address words. Ownership is
/// bit 31 of DESC3 in both the read and write-back formats.
#[repr(C)]
pub struct DmaDescriptor {
    desc: [VolatileCell<u32>; 4],
    backup_addr: [VolatileCell<u32>; 2],
}

impl DmaDescriptor {
    /// Size of the descriptor in bytes
    pub const SIZE: usize = 24;

    /// Create a zeroed (software-owned) descriptor
    #[must_use]
    pub const fn new() -> Self {
        Self {
            desc: [const { VolatileCell::new(0) }; 4],
            backup_addr: [const { VolatileCell::new(0) }; 2],
        }
    }

    /// Raw DESC0..DESC3 word
    #[inline(always)]
    pub fn word(&self, index: usize) -> u32 {
        self.desc[index & 3].get()
    }

    /// Overwrite a raw DESCn word
    #[inline(always)]
    pub fn set_word(&self, index: usize, value: u32) {
        self.desc[index & 3].set(value);
    }

    /// Buffer address the HAL recorded for this descriptor
    #[inline(always)]
    pub fn backup_addr(&self) -> u32 {
        self.backup_addr[0].get()
    }
}

impl Default for DmaDescriptor {
    fn default() -> Self {
        Self::new()
    }
}

impl OwnedDescriptor for DmaDescriptor {
    #[inline(always)]
    fn is_dma_owned(&self) -> bool {
        (self.desc[3].get() & DESC_OWN) != 0
    }
}

/// Enhanced descriptor layout used by STM32F4/F7 parts.
///
/// Eight hardware words plus two HAL backup address words. Ownership is
/// bit 31 of DESC0.
#[repr(C)]
pub struct LegacyDmaDescriptor {
    desc: [VolatileCell<u32>; 8],
    backup_addr: [VolatileCell<u32>; 2],
}

impl LegacyDmaDescriptor {
    /// Size of the descriptor in bytes
    pub const SIZE: usize = 40;

    /// Create a zeroed (software-owned) descriptor
    #[must_use]
    pub const fn new() -> Self {
        Self {
            desc: [const { VolatileCell::new(0) }; 8],
            backup_addr: [const { VolatileCell::new(0) }; 2],
        }
    }

    /// Raw DESC0..DESC7 word
    #[inline(always)]
    pub fn word(&self, index: usize) -> u32 {
        self.desc[index & 7].get()
    }

    /// Overwrite a raw DESCn word
    #[inline(always)]
    pub fn set_word(&self, index: usize, value: u32) {
        self.desc[index & 7].set(value);
    }

    /// Buffer address the HAL recorded for this descriptor
    #[inline(always)]
    pub fn backup_addr(&self) -> u32 {
        self.backup_addr[0].get()
    }
}

impl Default for LegacyDmaDescriptor {
    fn default() -> Self {
        Self::new()
    }
}

impl OwnedDescriptor for LegacyDmaDescriptor {
    #[inline(always)]
    fn is_dma_owned(&self) -> bool {
        (self.desc[0].get() & DESC_OWN) != 0
    }
}
