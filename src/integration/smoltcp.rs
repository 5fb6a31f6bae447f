//! smoltcp Network Stack Integration
#![cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
//!
//! Implements `smoltcp::phy::Device` for [`EthMac`] so the driver can back a
//! smoltcp `Interface`.
//!
//! # Example
//!
//! ```ignore
//! use smoltcp::iface::{Config, Interface, SocketSet};
//! use smoltcp::wire::{IpAddress, IpCidr};
//!
//! static CTX: MacContext<4, 4, 1524> = MacContext::new();
//!
//! let mut mac = EthMac::new(&CTX, hw);
//! mac.initialize(None)?;
//! mac.power_control(PowerState::Full)?;
//! mac.control(ControlCommand::Receiver(true))?;
//!
//! let config = Config::new(ethernet_address(&mac)?.into());
//! let mut iface = Interface::new(config, &mut mac, smoltcp::time::Instant::ZERO);
//! iface.update_ip_addrs(|addrs| {
//!     addrs.push(IpCidr::new(IpAddress::v4(192, 168, 1, 100), 24)).unwrap();
//! });
//! ```
//!
//! # Token model
//!
//! smoltcp asks for an RX and a TX token at the same time. The RX token owns
//! a copy of the received frame (it is drained from the driver inside
//! `receive()`), so only the TX token borrows the driver.

use smoltcp::phy::{Checksum, ChecksumCapabilities, Device, DeviceCapabilities, Medium};
use smoltcp::time::Instant;

use crate::driver::error::Result;
use crate::driver::mac::EthMac;
use crate::hal::EthHardware;
use crate::internal::constants::{ETH_HEADER_SIZE, MTU};

// =============================================================================
// RX Token
// =============================================================================

/// Receive token holding one drained frame
pub struct EthRxToken<const BUF: usize> {
    buffer: [u8; BUF],
    len: usize,
}

impl<const BUF: usize> smoltcp::phy::RxToken for EthRxToken<BUF> {
    fn consume<R, F>(self, f: F) -> R
    where
        F: FnOnce(&[u8]) -> R,
    {
        f(&self.buffer[..self.len])
    }
}

// =============================================================================
// TX Token
// =============================================================================

/// Transmit token borrowing the driver
pub struct EthTxToken<'m, 'a, H, const RX: usize, const TX: usize, const BUF: usize>
where
    H: EthHardware,
{
    mac: &'m mut EthMac<'a, H, RX, TX, BUF>,
}

impl<H, const RX: usize, const TX: usize, const BUF: usize> smoltcp::phy::TxToken
    for EthTxToken<'_, '_, H, RX, TX, BUF>
where
    H: EthHardware,
{
    fn consume<R, F>(self, len: usize, f: F) -> R
    where
        F: FnOnce(&mut [u8]) -> R,
    {
        let len = len.min(BUF);
        let mut buffer = [0u8; BUF];
        let result = f(&mut buffer[..len]);

        // smoltcp has no error path here; a dropped frame is retried by TCP
        if let Err(_e) = self.mac.send_frame(&buffer[..len]) {
            #[cfg(feature = "defmt")]
            defmt::warn!("smoltcp tx dropped: {}", _e);
        }

        result
    }
}

// =============================================================================
// Device Implementation
// =============================================================================

impl<'a, H, const RX: usize, const TX: usize, const BUF: usize> Device
    for EthMac<'a, H, RX, TX, BUF>
where
    H: EthHardware,
{
    type RxToken<'t>
        = EthRxToken<BUF>
    where
        Self: 't;
    type TxToken<'t>
        = EthTxToken<'t, 'a, H, RX, TX, BUF>
    where
        Self: 't;

    fn receive(&mut self, _timestamp: Instant) -> Option<(Self::RxToken<'_>, Self::TxToken<'_>)> {
        if !self.state().is_powered() {
            return None;
        }

        let size = self.rx_frame_size() as usize;
        if size == 0 {
            return None;
        }

        let mut buffer = [0u8; BUF];
        let len = size.min(BUF);
        let len = self.read_frame(&mut buffer[..len]).ok().filter(|&n| n > 0)?;

        Some((EthRxToken { buffer, len }, EthTxToken { mac: self }))
    }

    fn transmit(&mut self, _timestamp: Instant) -> Option<Self::TxToken<'_>> {
        if !self.tx_ready() {
            return None;
        }
        Some(EthTxToken { mac: self })
    }

    fn capabilities(&self) -> DeviceCapabilities {
        let mut caps = DeviceCapabilities::default();
        caps.medium = Medium::Ethernet;

        // Ethernet MTU as smoltcp counts it includes the header
        caps.max_transmission_unit = (MTU + ETH_HEADER_SIZE).min(BUF);

        // One frame per poll; the single-slot receive tracker holds no more
        caps.max_burst_size = Some(1);

        // Offload is only enabled on request through `ControlCommand::Configure`,
        // so smoltcp computes and verifies checksums itself
        let mut checksum = ChecksumCapabilities::default();
        checksum.ipv4 = Checksum::Both;
        checksum.udp = Checksum::Both;
        checksum.tcp = Checksum::Both;
        checksum.icmpv4 = Checksum::Both;
        caps.checksum = checksum;

        caps
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Station address as a smoltcp `EthernetAddress`
///
/// Requires the driver to be powered.
pub fn ethernet_address<H, const RX: usize, const TX: usize, const BUF: usize>(
    mac: &EthMac<'_, H, RX, TX, BUF>,
) -> Result<smoltcp::wire::EthernetAddress>
where
    H: EthHardware,
{
    mac.mac_address().map(smoltcp::wire::EthernetAddress)
}
