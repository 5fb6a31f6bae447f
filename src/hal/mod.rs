//! Hardware Abstraction Layer
//!
//! The frame pipeline never touches peripheral registers. Everything it needs
//! from the MAC peripheral goes through [`EthHardware`], and everything the
//! peripheral raises asynchronously comes back through [`HardwareCallbacks`].
//!
//! # Modules
//!
//! - [`mdio`]: MDIO bus trait for PHY register access
//!
//! # Implementing a backend
//!
//! A backend wraps the vendor HAL handle (e.g. `ETH_HandleTypeDef`) and routes
//! the HAL's weak callbacks into the [`HardwareCallbacks`] it is given:
//!
//! ```ignore
//! impl EthHardware for StmEth {
//!     type Ring = ExternalRing<'static, DmaDescriptor>;
//!
//!     fn read_available(&mut self, callbacks: &dyn HardwareCallbacks) -> HalResult<()> {
//!         // HAL_ETH_ReadData() calls RxAllocateCallback / RxLinkCallback,
//!         // forwarded here to `callbacks.allocate_rx_buffer()` and
//!         // `callbacks.rx_frame_linked()`.
//!         self.read_data(callbacks)
//!     }
//!     // ...
//! }
//! ```

pub mod mdio;

pub use mdio::MdioBus;

use crate::dma::DescriptorRing;
use crate::driver::config::{MacSettings, PhyInterface, VlanComparison};
use crate::driver::error::HalResult;
use crate::internal::constants::MAC_ADDR_LEN;

/// Hardware control surface consumed by the driver.
///
/// All calls are non-blocking from the pipeline's point of view: a transmit
/// submission returns once the frame is queued to DMA.
pub trait EthHardware {
    /// Descriptor ring view exposed by this backend
    type Ring: DescriptorRing;

    /// Descriptor ring owned by the DMA engine
    fn ring(&self) -> &Self::Ring;

    /// Bring up the peripheral (clocks, pins, DMA, MAC defaults)
    fn init(&mut self) -> HalResult<()>;

    /// Tear down the peripheral
    fn deinit(&mut self) -> HalResult<()>;

    /// Start MAC and DMA reception/transmission with interrupts
    fn start(&mut self) -> HalResult<()>;

    /// Stop MAC and DMA
    fn stop(&mut self) -> HalResult<()>;

    /// Whether the MAC is currently started
    fn is_started(&self) -> bool;

    /// Queue `frame` on the current TX descriptor and hand it to DMA.
    ///
    /// `frame` points into a DMA-visible staging region that stays untouched
    /// until the descriptor is observed free again.
    fn submit_transmit(&mut self, frame: &[u8]) -> HalResult<()>;

    /// Process pending receive completions.
    ///
    /// May synchronously call [`HardwareCallbacks::allocate_rx_buffer`] and
    /// [`HardwareCallbacks::rx_frame_linked`] before returning.
    fn read_available(&mut self, callbacks: &dyn HardwareCallbacks) -> HalResult<()>;

    /// Read the current MAC link and filter settings
    fn mac_settings(&mut self) -> HalResult<MacSettings>;

    /// Write MAC link and filter settings
    fn set_mac_settings(&mut self, settings: &MacSettings) -> HalResult<()>;

    /// Program the receive VLAN tag filter
    fn set_vlan_identifier(&mut self, comparison: VlanComparison, tag: u16) -> HalResult<()>;

    /// Read MAC address 0 from the address registers
    fn mac_address(&self) -> [u8; MAC_ADDR_LEN];

    /// Write MAC address 0 (the STM32 HAL re-initializes the peripheral)
    fn set_mac_address(&mut self, addr: &[u8; MAC_ADDR_LEN]) -> HalResult<()>;

    /// Read a PHY register over MDIO
    fn read_phy_register(&mut self, phy_addr: u8, reg_addr: u8) -> HalResult<u16>;

    /// Write a PHY register over MDIO
    fn write_phy_register(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> HalResult<()>;

    /// Media interface the MAC is wired for
    fn media_interface(&self) -> PhyInterface;
}

/// Notifications raised by the hardware layer, typically from interrupt
/// context.
///
/// Implemented by [`MacContext`](crate::MacContext). None of these report
/// errors back to the hardware layer.
pub trait HardwareCallbacks {
    /// Hand out the next receive region (round-robin over the pool)
    fn allocate_rx_buffer(&self) -> *mut u8;

    /// A completed receive landed in `buffer` with `length` bytes.
    ///
    /// `buffer` is an address previously returned by
    /// [`allocate_rx_buffer`](Self::allocate_rx_buffer); anything else is
    /// dropped.
    fn rx_frame_linked(&self, buffer: *const u8, length: u16);

    /// Transmit complete
    fn tx_complete(&self);

    /// Receive complete
    fn rx_complete(&self);

    /// Power management (magic packet / wake-up frame) event
    fn wakeup(&self);
}
