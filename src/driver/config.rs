//! Configuration types for the Ethernet MAC driver

use crate::internal::constants::{API_VERSION, DRIVER_VERSION};

/// Ethernet link speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    /// 10 Mbps
    Mbps10,
    /// 100 Mbps
    #[default]
    Mbps100,
    /// 1 Gbps (not supported by the MAC; rejected by `Configure`)
    Mbps1000,
}

/// Ethernet duplex mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Duplex {
    /// Half duplex
    Half,
    /// Full duplex
    #[default]
    Full,
}

/// PHY interface type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhyInterface {
    /// Media Independent Interface
    Mii,
    /// Reduced Media Independent Interface
    #[default]
    Rmii,
}

/// Driver state
///
/// Replaces the packed `initialized`/`powered` status bits. `Powered` implies
/// initialized by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Not initialized
    #[default]
    Uninitialized,
    /// Initialized, peripheral not powered
    Initialized,
    /// Initialized and powered; data path operations allowed
    Powered,
}

impl State {
    /// Whether `initialize` has been called
    #[inline(always)]
    pub const fn is_initialized(self) -> bool {
        !matches!(self, State::Uninitialized)
    }

    /// Whether the peripheral is powered
    #[inline(always)]
    pub const fn is_powered(self) -> bool {
        matches!(self, State::Powered)
    }
}

/// Requested power state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Peripheral de-initialized
    Off,
    /// Low-power mode (unsupported)
    Low,
    /// Peripheral fully initialized
    Full,
}

// =============================================================================
// MAC Configuration
// =============================================================================

/// MAC configuration requested through [`ControlCommand::Configure`]
///
/// # Example
///
/// ```ignore
/// let config = MacConfig::new()
///     .with_speed(Speed::Mbps100)
///     .with_duplex(Duplex::Full)
///     .with_broadcast(true);
/// mac.control(ControlCommand::Configure(config))?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MacConfig {
    /// Link speed
    pub speed: Speed,
    /// Duplex mode
    pub duplex: Duplex,
    /// Internal loopback
    pub loopback: bool,
    /// Receive checksum offload requested
    pub rx_checksum_offload: bool,
    /// Transmit checksum offload requested
    pub tx_checksum_offload: bool,
    /// Accept broadcast frames
    pub broadcast: bool,
    /// Pass all multicast frames
    pub multicast: bool,
    /// Promiscuous mode (accept all frames)
    pub promiscuous: bool,
}

impl MacConfig {
    /// Create the default configuration: 100 Mbps full duplex, no offload,
    /// no broadcast/multicast/promiscuous.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            speed: Speed::Mbps100,
            duplex: Duplex::Full,
            loopback: false,
            rx_checksum_offload: false,
            tx_checksum_offload: false,
            broadcast: false,
            multicast: false,
            promiscuous: false,
        }
    }

    /// Set link speed
    #[must_use]
    pub const fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    /// Set duplex mode
    #[must_use]
    pub const fn with_duplex(mut self, duplex: Duplex) -> Self {
        self.duplex = duplex;
        self
    }

    /// Enable or disable internal loopback
    #[must_use]
    pub const fn with_loopback(mut self, enable: bool) -> Self {
        self.loopback = enable;
        self
    }

    /// Request receive and transmit checksum offload
    #[must_use]
    pub const fn with_checksum_offload(mut self, rx: bool, tx: bool) -> Self {
        self.rx_checksum_offload = rx;
        self.tx_checksum_offload = tx;
        self
    }

    /// Accept broadcast frames
    #[must_use]
    pub const fn with_broadcast(mut self, enable: bool) -> Self {
        self.broadcast = enable;
        self
    }

    /// Pass all multicast frames
    #[must_use]
    pub const fn with_multicast(mut self, enable: bool) -> Self {
        self.multicast = enable;
        self
    }

    /// Accept all frames
    #[must_use]
    pub const fn with_promiscuous(mut self, enable: bool) -> Self {
        self.promiscuous = enable;
        self
    }
}

impl Default for MacConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// MAC settings as held by the hardware layer
///
/// This is what [`EthHardware::mac_settings`](crate::hal::EthHardware::mac_settings)
/// reads and [`EthHardware::set_mac_settings`](crate::hal::EthHardware::set_mac_settings)
/// writes. The hardware only has a single checksum offload switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MacSettings {
    /// Link speed (10 or 100 Mbps)
    pub speed: Speed,
    /// Duplex mode
    pub duplex: Duplex,
    /// Internal loopback
    pub loopback: bool,
    /// Checksum offload (both directions)
    pub checksum_offload: bool,
    /// Accept broadcast frames
    pub broadcast: bool,
    /// Pass all multicast frames
    pub pass_all_multicast: bool,
    /// Promiscuous mode
    pub promiscuous: bool,
}

// =============================================================================
// Control Commands
// =============================================================================

/// VLAN tag comparison width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VlanComparison {
    /// Compare only the 12-bit VLAN identifier
    Bits12,
    /// Compare the complete 16-bit tag
    Bits16,
}

/// Receive VLAN filter request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VlanFilter {
    /// VLAN tag; zero requests "disable"
    pub tag: u16,
    /// Compare only the 12-bit identifier
    pub id_only: bool,
}

impl VlanFilter {
    /// Filter on the full 16-bit tag
    #[must_use]
    pub const fn tag(tag: u16) -> Self {
        Self {
            tag,
            id_only: false,
        }
    }

    /// Filter on the 12-bit VLAN identifier only
    #[must_use]
    pub const fn id_only(tag: u16) -> Self {
        Self { tag, id_only: true }
    }

    /// Disable request
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            tag: 0,
            id_only: false,
        }
    }

    /// Comparison width to program
    #[must_use]
    pub const fn comparison(&self) -> VlanComparison {
        if self.id_only {
            VlanComparison::Bits12
        } else {
            VlanComparison::Bits16
        }
    }
}

/// Buffer selection for [`ControlCommand::Flush`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlushTarget {
    /// Receive buffers
    Rx,
    /// Transmit buffers
    Tx,
}

/// Commands accepted by [`EthMac::control`](crate::EthMac::control)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlCommand {
    /// Apply link and address configuration
    Configure(MacConfig),
    /// Enable/disable the transmitter (accepted, no effect)
    Transmitter(bool),
    /// Enable/disable the receiver
    Receiver(bool),
    /// Flush a buffer (accepted, no effect)
    Flush(FlushTarget),
    /// Configure the receive VLAN filter
    VlanFilter(VlanFilter),
    /// Enter/leave sleep mode (unsupported)
    Sleep(bool),
}

// =============================================================================
// Capabilities and Version
// =============================================================================

/// Per-protocol checksum offload support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChecksumOffload {
    /// IPv4 header checksum
    pub ip4: bool,
    /// IPv6 header checksum
    pub ip6: bool,
    /// UDP checksum
    pub udp: bool,
    /// TCP checksum
    pub tcp: bool,
    /// ICMP checksum
    pub icmp: bool,
}

impl ChecksumOffload {
    /// Offload for every protocol
    pub const ALL: Self = Self {
        ip4: true,
        ip6: true,
        udp: true,
        tcp: true,
        icmp: true,
    };
}

/// Driver capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MacCapabilities {
    /// Receive checksum offload
    pub rx_checksum: ChecksumOffload,
    /// Transmit checksum offload
    pub tx_checksum: ChecksumOffload,
    /// Media interface to the PHY
    pub media_interface: PhyInterface,
    /// Driver provides an initial MAC address
    pub mac_address: bool,
    /// `RxFrame` event generated
    pub event_rx_frame: bool,
    /// `TxFrame` event generated
    pub event_tx_frame: bool,
    /// `Wakeup` event generated
    pub event_wakeup: bool,
    /// Precision timer supported
    pub precision_timer: bool,
}

impl MacCapabilities {
    /// Capabilities of this driver for the given media interface
    #[must_use]
    pub const fn for_interface(media_interface: PhyInterface) -> Self {
        Self {
            rx_checksum: ChecksumOffload::ALL,
            tx_checksum: ChecksumOffload::ALL,
            media_interface,
            mac_address: false,
            event_rx_frame: true,
            event_tx_frame: true,
            event_wakeup: true,
            precision_timer: false,
        }
    }
}

/// API and driver version, `0xMMmm` encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverVersion {
    /// Implemented ETH_MAC API version
    pub api: u16,
    /// Driver implementation version
    pub driver: u16,
}

impl DriverVersion {
    /// Version of this crate's driver
    pub const CURRENT: Self = Self {
        api: API_VERSION,
        driver: DRIVER_VERSION,
    };
}

// =============================================================================
// Unit Tests
// =============================================================================
