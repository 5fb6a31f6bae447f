//! Async/await support for the frame pipeline.
//!
//! The wakers live in [`MacContext`](crate::MacContext) and are woken by the
//! `rx_complete`/`tx_complete` hardware callbacks, so no extra interrupt
//! handler is needed beyond the one that already forwards HAL callbacks.

use core::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::driver::error::{Error, Result};
use crate::driver::mac::EthMac;
use crate::hal::EthHardware;

/// Future for async receive operations.
///
/// Resolves with the number of bytes copied into the buffer (at most the
/// frame length).
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct RxFuture<'m, 'a, 'b, H, const RX: usize, const TX: usize, const BUF: usize>
where
    H: EthHardware,
{
    mac: &'m mut EthMac<'a, H, RX, TX, BUF>,
    buffer: &'b mut [u8],
}

impl<H, const RX: usize, const TX: usize, const BUF: usize> Future
    for RxFuture<'_, '_, '_, H, RX, TX, BUF>
where
    H: EthHardware,
{
    type Output = Result<usize>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if !this.mac.state().is_powered() {
            return Poll::Ready(Err(Error::InvalidState));
        }

        let mut size = this.mac.rx_frame_size();
        if size == 0 {
            this.mac.context().rx_waker().register(cx.waker());
            // Re-check after registering so a completion in between is not lost
            size = this.mac.rx_frame_size();
            if size == 0 {
                return Poll::Pending;
            }
        }

        let len = (size as usize).min(this.buffer.len());
        Poll::Ready(this.mac.read_frame(&mut this.buffer[..len]))
    }
}

/// Future for async transmit operations.
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct TxFuture<'m, 'a, 'b, H, const RX: usize, const TX: usize, const BUF: usize>
where
    H: EthHardware,
{
    mac: &'m mut EthMac<'a, H, RX, TX, BUF>,
    frame: &'b [u8],
}

impl<H, const RX: usize, const TX: usize, const BUF: usize> Future
    for TxFuture<'_, '_, '_, H, RX, TX, BUF>
where
    H: EthHardware,
{
    type Output = Result<()>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        match this.mac.send_frame(this.frame) {
            Err(Error::Busy) => {
                this.mac.context().tx_waker().register(cx.waker());
                match this.mac.send_frame(this.frame) {
                    Err(Error::Busy) => Poll::Pending,
                    result => Poll::Ready(result),
                }
            }
            result => Poll::Ready(result),
        }
    }
}

impl<'a, H, const RX: usize, const TX: usize, const BUF: usize> EthMac<'a, H, RX, TX, BUF>
where
    H: EthHardware,
{
    /// Wait for a received frame and copy it into `buffer`.
    pub fn receive_async<'m, 'b>(
        &'m mut self,
        buffer: &'b mut [u8],
    ) -> RxFuture<'m, 'a, 'b, H, RX, TX, BUF> {
        RxFuture { mac: self, buffer }
    }

    /// Send a complete frame, waiting while the TX descriptor is busy.
    pub fn send_async<'m, 'b>(
        &'m mut self,
        frame: &'b [u8],
    ) -> TxFuture<'m, 'a, 'b, H, RX, TX, BUF> {
        TxFuture { mac: self, frame }
    }
}
