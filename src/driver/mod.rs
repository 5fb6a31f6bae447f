//! Core driver components for the STM32 ETH MAC frame pipeline.
//!
//! - [`config`] - Configuration types and builder patterns
//! - [`context`] - ISR-shared state: buffer pool, receive tracker, callback
//! - [`error`] - Error types and result aliases
//! - [`event`] - Events delivered to the client callback
//! - [`mac`] - The driver instance
//! - [`blocking`] - Polling helpers with timeouts
//!
//! # Example
//!
//! ```ignore
//! use ph_stm32_mac::driver::{ControlCommand, Duplex, MacConfig, Speed};
//!
//! let config = MacConfig::new()
//!     .with_speed(Speed::Mbps100)
//!     .with_duplex(Duplex::Full);
//! mac.control(ControlCommand::Configure(config))?;
//! ```

pub mod blocking;
pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod mac;
mod tx;

pub use config::{
    ChecksumOffload, ControlCommand, DriverVersion, Duplex, FlushTarget, MacCapabilities,
    MacConfig, MacSettings, PhyInterface, PowerState, Speed, State, VlanComparison, VlanFilter,
};
pub use context::MacContext;
pub use error::{Error, HalError, HalResult, Result};
pub use event::{EventCallback, MacEvent};
pub use mac::{EthMac, EthMacDefault, EthMacLarge, EthMacSmall};
