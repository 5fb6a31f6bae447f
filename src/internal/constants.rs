//! Centralized Constants
//!
//! Single source of truth for the frame sizes, pool dimensions and address
//! limits used throughout the driver.
//!
//! # Note
//!
//! Descriptor bit definitions stay in [`crate::dma::descriptor`] as they are
//! specific to the descriptor layouts.

// =============================================================================
// Frame and Buffer Sizes
// =============================================================================

/// Maximum Ethernet frame size including VLAN tag (1500 + 14 header + 4 CRC + 4 VLAN)
pub const MAX_FRAME_SIZE: usize = 1522;

/// Standard Ethernet MTU (Maximum Transmission Unit)
pub const MTU: usize = 1500;

/// Ethernet header size (dst MAC + src MAC + EtherType)
pub const ETH_HEADER_SIZE: usize = 14;

/// Default DMA buffer size (`ETH_MAX_PACKET_SIZE` of the STM32 HAL)
pub const DEFAULT_BUFFER_SIZE: usize = 1524;

/// Alignment of every DMA buffer region (Cortex-M7 data cache line)
pub const DMA_BUFFER_ALIGN: usize = 32;

// =============================================================================
// Default Pool Dimensions
// =============================================================================

/// Default number of receive descriptors/buffers (`ETH_RX_DESC_CNT`)
pub const DEFAULT_RX_BUFFERS: usize = 4;

/// Default number of transmit descriptors/buffers (`ETH_TX_DESC_CNT`)
pub const DEFAULT_TX_BUFFERS: usize = 4;

// =============================================================================
// Addressing
// =============================================================================

/// MAC address length in bytes
pub const MAC_ADDR_LEN: usize = 6;

/// Maximum valid PHY address (5-bit field)
pub const MAX_PHY_ADDR: u8 = 31;

/// Maximum valid PHY register address (5-bit field)
pub const MAX_REG_ADDR: u8 = 31;

/// Mask of the 16-bit VLAN tag carried in a VLAN filter argument
pub const VLAN_TAG_MASK: u32 = 0xFFFF;

// =============================================================================
// Versions
// =============================================================================

/// Implemented CMSIS-Driver ETH_MAC API version (major.minor, BCD-style)
pub const API_VERSION: u16 = 0x0202;

/// Driver implementation version (major.minor, BCD-style)
pub const DRIVER_VERSION: u16 = 0x0300;
