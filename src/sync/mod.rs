//! Synchronization and Concurrency Support
//!
//! - **Primitives** (`primitives`): Low-level synchronization types
//!   - [`CriticalSectionCell`] - ISR-safe interior mutability
//!   - [`AtomicWaker`] - Async waker storage for interrupts
//!
//! - **Async Support** (`asynch`): Futures for frame I/O
//!   - [`RxFuture`], [`TxFuture`] - returned by `EthMac::receive_async` and
//!     `EthMac::send_async`
//!
//! # Feature Flags
//!
//! - `async`: Enables `asynch` module and [`AtomicWaker`]
//!
//! # Example
//!
//! ```ignore
//! static CTX: MacContext<4, 4, 1524> = MacContext::new();
//!
//! async fn echo(mac: &mut EthMacDefault<'static, StmEth>) -> Result<()> {
//!     let mut buf = [0u8; 1524];
//!     loop {
//!         let len = mac.receive_async(&mut buf).await?;
//!         mac.send_async(&buf[..len]).await?;
//!     }
//! }
//! ```

mod primitives;

#[cfg(feature = "async")]
pub use primitives::AtomicWaker;
pub use primitives::CriticalSectionCell;

#[cfg(feature = "async")]
pub mod asynch;

#[cfg(feature = "async")]
pub use asynch::{RxFuture, TxFuture};
