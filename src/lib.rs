//! STM32 Ethernet MAC Driver
//!
//! A `no_std`, `no_alloc` implementation of the transmit/receive frame
//! pipeline of the STM32 ETH peripheral, following the CMSIS-Driver
//! `ETH_MAC` semantics.
//!
//! The crate sits between a client (network stack) and the vendor HAL's DMA
//! engine. It stages outbound fragments into DMA-visible buffers, hands
//! complete frames to the hardware, tracks the most recently completed receive
//! and forwards hardware completions to a client callback.
//!
//! # Architecture
//!
//! 1. **Driver** ([`driver`]): [`EthMac`] (client-facing instance) and
//!    [`MacContext`] (state shared with interrupt context)
//! 2. **DMA memory** ([`dma`]): buffer pool, descriptor layouts, ring adapter
//! 3. **HAL seam** ([`hal`]): [`EthHardware`] consumed by the driver and
//!    [`HardwareCallbacks`] raised by the hardware
//!
//! The descriptor ring, clocks, pins and MAC registers belong to the vendor
//! HAL. A backend implements [`EthHardware`] on top of it and routes the HAL's
//! callbacks (`RxAllocateCallback`, `RxLinkCallback`, `TxCpltCallback`,
//! `RxCpltCallback`, `PMTCallback`) into the context.
//!
//! # Features
//!
//! - `defmt`: Enable defmt logging and formatting for public types
//! - `smoltcp`: Enable smoltcp network stack integration
//! - `async`: Enable async/await support with wakers
//!
//! # Example
//!
//! ```ignore
//! use ph_stm32_mac::{ControlCommand, EthMac, MacConfig, MacEvent, PowerState};
//!
//! ph_stm32_mac::eth_mac_static!(ETH_CTX);
//!
//! fn on_event(event: MacEvent) {
//!     // wake the network task
//! }
//!
//! let mut mac = EthMac::new(&ETH_CTX, StmEth::new(heth));
//! mac.initialize(Some(on_event))?;
//! mac.power_control(PowerState::Full)?;
//! mac.control(ControlCommand::Configure(MacConfig::new().with_broadcast(true)))?;
//! mac.control(ControlCommand::Receiver(true))?;
//!
//! // Transmit in two fragments
//! mac.submit_fragment(&header, false)?;
//! mac.submit_fragment(&payload, true)?;
//!
//! // Receive
//! let size = mac.rx_frame_size() as usize;
//! if size > 0 {
//!     let len = mac.read_frame(&mut buf[..size])?;
//! }
//! ```
//!
//! # Memory Requirements
//!
//! With the default configuration (4 RX regions, 4 TX regions, 1524 bytes
//! each, padded to 1536): 12 KB of DMA-capable SRAM. On parts with a data
//! cache that memory must be configured non-cacheable by the MPU.

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here; thresholds and config are in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements,
    clippy::let_underscore_future
)]

// =============================================================================
// Modules
// =============================================================================

pub mod dma;
pub mod driver;
pub mod hal;
pub mod sync;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(feature = "smoltcp")]
#[cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
pub mod integration;

// Test utilities (only available during testing)
#[cfg(test)]
mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use dma::{
    BufferPool, DescriptorRing, DmaBuffer, DmaDescriptor, ExternalRing, LegacyDmaDescriptor,
    OwnedDescriptor, VolatileCell,
};
pub use driver::blocking;
pub use driver::config::{
    ChecksumOffload, ControlCommand, DriverVersion, Duplex, FlushTarget, MacCapabilities,
    MacConfig, MacSettings, PhyInterface, PowerState, Speed, State, VlanComparison, VlanFilter,
};
pub use driver::context::MacContext;
pub use driver::error::{Error, HalError, HalResult, Result};
pub use driver::event::{EventCallback, MacEvent};
pub use driver::mac::{EthMac, EthMacDefault, EthMacLarge, EthMacSmall};
pub use hal::{EthHardware, HardwareCallbacks, MdioBus};

#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
pub use sync::asynch::{RxFuture, TxFuture};

/// Shared driver constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on driver types and integration points.
pub mod constants {
    pub use crate::internal::constants::{
        // Versions
        API_VERSION,
        // Buffer pool
        DEFAULT_BUFFER_SIZE,
        DEFAULT_RX_BUFFERS,
        DEFAULT_TX_BUFFERS,
        DMA_BUFFER_ALIGN,
        DRIVER_VERSION,
        // Frame sizes
        ETH_HEADER_SIZE,
        MAC_ADDR_LEN,
        MAX_FRAME_SIZE,
        // MDIO
        MAX_PHY_ADDR,
        MAX_REG_ADDR,
        MTU,
    };
}

// =============================================================================
// Macro Helpers
// =============================================================================

/// Declare a static [`MacContext`] placed in the ETH buffer section.
///
/// On bare-metal targets the context (and with it the buffer pool) lands in
/// `.driver.eth_mac0_buf`, which the linker script must map to DMA-reachable,
/// non-cacheable RAM. A custom section name can be given as the last argument.
///
/// # Examples
///
/// ```ignore
/// ph_stm32_mac::eth_mac_static!(ETH_CTX);
/// ph_stm32_mac::eth_mac_static!(ETH_CTX_BIG, 8, 8, 1524);
/// ph_stm32_mac::eth_mac_static!(ETH_CTX_D2, 4, 4, 1524, ".sram2");
/// ```
#[macro_export]
macro_rules! eth_mac_static {
    ($name:ident) => {
        $crate::eth_mac_static!(
            $name,
            $crate::constants::DEFAULT_RX_BUFFERS,
            $crate::constants::DEFAULT_TX_BUFFERS,
            $crate::constants::DEFAULT_BUFFER_SIZE
        );
    };
    ($name:ident, $rx:expr, $tx:expr, $buf:expr) => {
        $crate::eth_mac_static!($name, $rx, $tx, $buf, ".driver.eth_mac0_buf");
    };
    ($name:ident, $rx:expr, $tx:expr, $buf:expr, $section:literal) => {
        #[cfg_attr(target_os = "none", unsafe(link_section = $section))]
        static $name: $crate::MacContext<{ $rx }, { $tx }, { $buf }> = $crate::MacContext::new();
    };
}
