//! Ethernet MAC driver
//!
//! [`EthMac`] is the client-facing driver instance. It owns the hardware
//! backend and the transmit staging state, and borrows a [`MacContext`] that
//! is shared with the interrupt-context callbacks.

use super::config::{
    ControlCommand, DriverVersion, MacCapabilities, MacConfig, PowerState, Speed, State,
};
use super::context::MacContext;
use super::error::{Error, Result};
use super::event::EventCallback;
use super::tx::TxStaging;
use crate::dma::DescriptorRing;
use crate::hal::{EthHardware, MdioBus, mdio};
use crate::internal::constants::{
    DEFAULT_BUFFER_SIZE, DEFAULT_RX_BUFFERS, DEFAULT_TX_BUFFERS, MAC_ADDR_LEN,
};

/// Ethernet MAC driver instance
///
/// # Type Parameters
/// * `H` - Hardware backend
/// * `RX_BUFS` - Number of receive regions (typically 4)
/// * `TX_BUFS` - Number of transmit staging regions, one per TX descriptor
/// * `BUF_SIZE` - Size of each region in bytes (typically 1524)
///
/// # Example
/// ```ignore
/// static CTX: MacContext<4, 4, 1524> = MacContext::new();
///
/// let mut mac = EthMac::new(&CTX, StmEth::new(heth));
/// mac.initialize(Some(on_event))?;
/// mac.power_control(PowerState::Full)?;
/// mac.control(ControlCommand::Configure(MacConfig::new()))?;
/// mac.control(ControlCommand::Receiver(true))?;
///
/// mac.submit_fragment(&header, false)?;
/// mac.submit_fragment(&payload, true)?;
/// ```
pub struct EthMac<'a, H, const RX_BUFS: usize, const TX_BUFS: usize, const BUF_SIZE: usize>
where
    H: EthHardware,
{
    /// ISR-shared state
    ctx: &'a MacContext<RX_BUFS, TX_BUFS, BUF_SIZE>,
    /// Hardware backend
    hw: H,
    /// Current state
    state: State,
    /// Frame assembly in progress
    tx: TxStaging,
}

impl<'a, H, const RX_BUFS: usize, const TX_BUFS: usize, const BUF_SIZE: usize>
    EthMac<'a, H, RX_BUFS, TX_BUFS, BUF_SIZE>
where
    H: EthHardware,
{
    /// Create a driver in the `Uninitialized` state
    pub const fn new(ctx: &'a MacContext<RX_BUFS, TX_BUFS, BUF_SIZE>, hw: H) -> Self {
        Self {
            ctx,
            hw,
            state: State::Uninitialized,
            tx: TxStaging::new(),
        }
    }

    /// Get the current state
    #[inline(always)]
    pub fn state(&self) -> State {
        self.state
    }

    /// Shared context
    #[inline(always)]
    pub fn context(&self) -> &'a MacContext<RX_BUFS, TX_BUFS, BUF_SIZE> {
        self.ctx
    }

    /// Hardware backend
    #[inline(always)]
    pub fn hardware(&self) -> &H {
        &self.hw
    }

    /// Hardware backend, mutably
    #[inline(always)]
    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    /// Bytes staged for the frame currently being assembled
    #[inline(always)]
    pub fn tx_pending(&self) -> usize {
        self.tx.len()
    }

    /// Driver version
    pub const fn version() -> DriverVersion {
        DriverVersion::CURRENT
    }

    /// Driver capabilities
    pub fn capabilities(&self) -> MacCapabilities {
        MacCapabilities::for_interface(self.hw.media_interface())
    }

    /// Total pool memory in bytes
    pub const fn memory_usage() -> usize {
        crate::dma::BufferPool::<RX_BUFS, TX_BUFS, BUF_SIZE>::memory_usage()
    }

    #[inline]
    fn require_powered(&self) -> Result<()> {
        if self.state.is_powered() {
            Ok(())
        } else {
            Err(Error::InvalidState)
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Initialize the driver and register the event callback.
    ///
    /// Clears all run-time state. Always succeeds; the peripheral is not
    /// touched.
    pub fn initialize(&mut self, callback: Option<EventCallback>) -> Result<()> {
        self.ctx.reset(callback);
        self.tx.reset();
        self.state = State::Initialized;
        Ok(())
    }

    /// De-initialize the driver, powering it off first if needed.
    pub fn uninitialize(&mut self) -> Result<()> {
        if self.state.is_powered() {
            self.power_off();
        }
        self.ctx.reset(None);
        self.tx.reset();
        self.state = State::Uninitialized;
        Ok(())
    }

    /// Change the peripheral power state.
    ///
    /// # Errors
    /// - `InvalidState` - `Full` requested before `initialize`
    /// - `HardwareError` - peripheral bring-up failed
    /// - `Unsupported` - `Low` requested
    pub fn power_control(&mut self, state: PowerState) -> Result<()> {
        match state {
            PowerState::Full => {
                if !self.state.is_initialized() {
                    return Err(Error::InvalidState);
                }
                self.hw.init()?;
                self.tx.reset();
                self.state = State::Powered;

                #[cfg(feature = "defmt")]
                defmt::info!("ETH MAC powered");
                Ok(())
            }
            PowerState::Off => {
                self.power_off();
                Ok(())
            }
            PowerState::Low => Err(Error::Unsupported),
        }
    }

    /// Best-effort teardown
    fn power_off(&mut self) {
        if let Err(_e) = self.hw.deinit() {
            #[cfg(feature = "defmt")]
            defmt::warn!("ETH MAC deinit failed: {}", _e);
        }
        if self.state.is_powered() {
            self.state = State::Initialized;
        }
    }

    // =========================================================================
    // MAC Address
    // =========================================================================

    /// Read the station MAC address
    pub fn mac_address(&self) -> Result<[u8; MAC_ADDR_LEN]> {
        self.require_powered()?;
        Ok(self.hw.mac_address())
    }

    /// Program the station MAC address
    pub fn set_mac_address(&mut self, addr: &[u8; MAC_ADDR_LEN]) -> Result<()> {
        self.require_powered()?;
        self.hw.set_mac_address(addr).map_err(Error::from)
    }

    /// Configure the multicast address filter. Not supported by this MAC.
    pub fn set_address_filter(&mut self, _addrs: &[[u8; MAC_ADDR_LEN]]) -> Result<()> {
        Err(Error::Unsupported)
    }

    // =========================================================================
    // TX / RX Operations
    // =========================================================================

    /// Submit one fragment of an outbound frame.
    ///
    /// Fragments accumulate until `is_final` is set, at which point the
    /// complete frame is handed to DMA.
    ///
    /// # Errors
    /// - `InvalidParameter` - empty fragment
    /// - `InvalidState` - driver not powered
    /// - `Busy` - starting a new frame while the current TX descriptor is
    ///   still owned by DMA; retry the whole frame later
    /// - `FrameTooLarge` - frame would exceed `BUF_SIZE`; the partial frame
    ///   is dropped
    /// - `HardwareError` - submission failed
    pub fn submit_fragment(&mut self, data: &[u8], is_final: bool) -> Result<()> {
        if data.is_empty() {
            return Err(Error::InvalidParameter);
        }
        self.require_powered()?;
        self.tx.push(&mut self.hw, self.ctx.pool(), data, is_final)
    }

    /// Submit a complete frame in one call
    #[inline]
    pub fn send_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.submit_fragment(frame, true)
    }

    /// Whether a new frame could be started right now
    pub fn tx_ready(&self) -> bool {
        let ring = self.hw.ring();
        self.state.is_powered() && ring.is_tx_desc_free(ring.current_tx_index())
    }

    /// Size of the received frame, 0 if none.
    ///
    /// Polls the hardware first; the poll may deliver a frame to the receive
    /// tracker before this returns. A poll with nothing new to deliver still
    /// reports a frame that is already tracked.
    pub fn rx_frame_size(&mut self) -> u32 {
        if !self.state.is_powered() {
            return 0;
        }
        if let Err(_e) = self.hw.read_available(self.ctx) {
            #[cfg(feature = "defmt")]
            defmt::trace!("rx poll: {}", _e);
        }
        self.ctx.pending_len() as u32
    }

    /// Copy the received frame into `dest` and release it.
    ///
    /// Copies exactly `dest.len()` bytes and returns that count. Returns
    /// `Ok(0)` when no frame is pending. An empty `dest` discards a pending
    /// frame.
    ///
    /// # Errors
    /// - `InvalidParameter` - `dest` larger than a receive region
    /// - `InvalidState` - driver not powered
    pub fn read_frame(&mut self, dest: &mut [u8]) -> Result<usize> {
        if dest.len() > BUF_SIZE {
            return Err(Error::InvalidParameter);
        }
        self.require_powered()?;
        Ok(self.ctx.take_frame(dest))
    }

    /// Receive timestamp. No precision timer on this MAC.
    pub fn rx_frame_time(&self) -> Result<u64> {
        Err(Error::Unsupported)
    }

    /// Transmit timestamp. No precision timer on this MAC.
    pub fn tx_frame_time(&self) -> Result<u64> {
        Err(Error::Unsupported)
    }

    /// Precision timer control. No precision timer on this MAC.
    pub fn control_timer(&mut self) -> Result<()> {
        Err(Error::Unsupported)
    }

    // =========================================================================
    // Control
    // =========================================================================

    /// Apply a control command.
    pub fn control(&mut self, command: ControlCommand) -> Result<()> {
        self.require_powered()?;

        match command {
            ControlCommand::Configure(config) => self.configure(&config),
            ControlCommand::Transmitter(_) | ControlCommand::Flush(_) => Ok(()),
            ControlCommand::Receiver(true) => self.hw.start().map_err(Error::from),
            ControlCommand::Receiver(false) => self.hw.stop().map_err(Error::from),
            ControlCommand::VlanFilter(filter) => {
                // Disabling is not possible; a zero tag is accepted as a no-op
                if filter.tag != 0 {
                    self.hw.set_vlan_identifier(filter.comparison(), filter.tag)?;
                }
                Ok(())
            }
            ControlCommand::Sleep(_) => Err(Error::Unsupported),
        }
    }

    fn configure(&mut self, config: &MacConfig) -> Result<()> {
        let mut settings = self.hw.mac_settings()?;

        settings.speed = match config.speed {
            Speed::Mbps10 | Speed::Mbps100 => config.speed,
            Speed::Mbps1000 => return Err(Error::Unsupported),
        };
        settings.duplex = config.duplex;
        settings.loopback = config.loopback;
        settings.checksum_offload = config.rx_checksum_offload && config.tx_checksum_offload;
        settings.broadcast = config.broadcast;
        settings.pass_all_multicast = config.multicast;
        settings.promiscuous = config.promiscuous;

        // The MAC must be stopped while its configuration changes
        let result = if self.hw.is_started() {
            if let Err(_e) = self.hw.stop() {
                #[cfg(feature = "defmt")]
                defmt::warn!("MAC stop before reconfigure failed: {}", _e);
            }
            let result = self.hw.set_mac_settings(&settings);
            if let Err(_e) = self.hw.start() {
                #[cfg(feature = "defmt")]
                defmt::warn!("MAC restart after reconfigure failed: {}", _e);
            }
            result
        } else {
            self.hw.set_mac_settings(&settings)
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("MAC configured: {}", settings);

        result.map_err(Error::from)
    }

    // =========================================================================
    // PHY Access
    // =========================================================================

    /// Read a PHY register
    pub fn phy_read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        self.hw
            .read_phy_register(phy_addr, reg_addr)
            .map_err(Error::from)
    }

    /// Write a PHY register
    pub fn phy_write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        self.hw
            .write_phy_register(phy_addr, reg_addr, value)
            .map_err(Error::from)
    }
}

impl<H, const RX_BUFS: usize, const TX_BUFS: usize, const BUF_SIZE: usize> MdioBus
    for EthMac<'_, H, RX_BUFS, TX_BUFS, BUF_SIZE>
where
    H: EthHardware,
{
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        mdio::validate_address(phy_addr, reg_addr)?;
        self.phy_read(phy_addr, reg_addr)
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        mdio::validate_address(phy_addr, reg_addr)?;
        self.phy_write(phy_addr, reg_addr, value)
    }
}

// =============================================================================
// Type Aliases
// =============================================================================

/// Default driver: 4 RX/TX regions of 1524 bytes each
pub type EthMacDefault<'a, H> =
    EthMac<'a, H, DEFAULT_RX_BUFFERS, DEFAULT_TX_BUFFERS, DEFAULT_BUFFER_SIZE>;

/// Small driver for memory-constrained systems
pub type EthMacSmall<'a, H> = EthMac<'a, H, 2, 2, DEFAULT_BUFFER_SIZE>;

/// Large driver for high-throughput applications
pub type EthMacLarge<'a, H> = EthMac<'a, H, 8, 8, DEFAULT_BUFFER_SIZE>;

// =============================================================================
// Unit Tests
// =============================================================================
