//! Blocking helpers built on the non-blocking driver.
//!
//! The driver itself never retries or waits. These helpers put a polling
//! loop with a timeout around it using an `embedded_hal::delay::DelayNs`
//! provider from the HAL.

use embedded_hal::delay::DelayNs;

use super::error::{Error, Result};
use super::mac::EthMac;
use crate::hal::EthHardware;

/// Poll interval used while waiting on the hardware
pub const POLL_INTERVAL_US: u32 = 10;

/// Send a complete frame, retrying while the TX descriptor is busy.
///
/// Returns `Busy` if the descriptor is still owned by DMA after
/// `timeout_us`. Any other error is returned immediately.
pub fn send_frame<H, D, const RX_BUFS: usize, const TX_BUFS: usize, const BUF_SIZE: usize>(
    mac: &mut EthMac<'_, H, RX_BUFS, TX_BUFS, BUF_SIZE>,
    frame: &[u8],
    delay: &mut D,
    timeout_us: u32,
) -> Result<()>
where
    H: EthHardware,
    D: DelayNs,
{
    let mut waited = 0u32;
    loop {
        match mac.send_frame(frame) {
            Err(Error::Busy) if waited < timeout_us => {
                delay.delay_us(POLL_INTERVAL_US);
                waited = waited.saturating_add(POLL_INTERVAL_US);
            }
            result => return result,
        }
    }
}

/// Wait for a received frame and copy it into `dest`.
///
/// Returns the number of bytes copied (at most the frame length), or `Ok(0)`
/// if nothing arrived within `timeout_us`.
pub fn receive_frame<H, D, const RX_BUFS: usize, const TX_BUFS: usize, const BUF_SIZE: usize>(
    mac: &mut EthMac<'_, H, RX_BUFS, TX_BUFS, BUF_SIZE>,
    dest: &mut [u8],
    delay: &mut D,
    timeout_us: u32,
) -> Result<usize>
where
    H: EthHardware,
    D: DelayNs,
{
    let mut waited = 0u32;
    loop {
        let size = mac.rx_frame_size() as usize;
        if size > 0 {
            let len = size.min(dest.len());
            return mac.read_frame(&mut dest[..len]);
        }
        if waited >= timeout_us {
            return Ok(0);
        }
        delay.delay_us(POLL_INTERVAL_US);
        waited = waited.saturating_add(POLL_INTERVAL_US);
    }
}
