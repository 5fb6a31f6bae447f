//! MDIO (Management Data Input/Output) bus
//!
//! PHY drivers are written against [`MdioBus`] so they can run on top of the
//! MAC driver ([`EthMac`](crate::EthMac) implements it) or any other SMI
//! transport.

use crate::driver::error::{Error, Result};
use crate::internal::constants::{MAX_PHY_ADDR, MAX_REG_ADDR};

/// Trait for MDIO bus operations
pub trait MdioBus {
    /// Read a PHY register
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16>;

    /// Write a PHY register
    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()>;
}

/// Check that both addresses fit the 5-bit MDIO fields.
#[inline]
pub fn validate_address(phy_addr: u8, reg_addr: u8) -> Result<()> {
    if phy_addr > MAX_PHY_ADDR || reg_addr > MAX_REG_ADDR {
        return Err(Error::InvalidParameter);
    }
    Ok(())
}
