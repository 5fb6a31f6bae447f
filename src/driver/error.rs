//! Error types for the Ethernet MAC driver
//!
//! Two layers of errors exist:
//! - [`Error`]: returned to the client by every fallible driver operation
//! - [`HalError`]: returned by the [`EthHardware`](crate::hal::EthHardware)
//!   collaborator and folded into [`Error::HardwareError`] at the driver boundary
//!
//! Errors are always returned synchronously to the caller that triggered them.
//! Nothing is retried internally.

// =============================================================================
// Driver Errors
// =============================================================================

/// Driver error returned to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Invalid parameter (empty fragment, oversized destination, bad PHY address)
    InvalidParameter,
    /// Operation attempted before the required initialization/power state
    InvalidState,
    /// The current transmit descriptor is still owned by the DMA engine.
    ///
    /// Retry the whole frame later; no partial transmit state is retained.
    Busy,
    /// Operation not implementable on this hardware
    Unsupported,
    /// The underlying hardware call failed
    HardwareError,
    /// Fragment accumulation would exceed the staging buffer capacity
    FrameTooLarge,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Error::InvalidParameter => "invalid parameter",
            Error::InvalidState => "invalid driver state for operation",
            Error::Busy => "transmit descriptor busy",
            Error::Unsupported => "operation not supported",
            Error::HardwareError => "hardware operation failed",
            Error::FrameTooLarge => "frame too large for staging buffer",
        }
    }
}

// =============================================================================
// Hardware Collaborator Errors
// =============================================================================

/// Status reported by the hardware abstraction layer
///
/// Mirrors the non-OK HAL status codes of the vendor layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// Generic failure (also: no data available for `read_available`)
    Failed,
    /// Peripheral busy
    Busy,
    /// Operation timed out
    Timeout,
}

impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl HalError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            HalError::Failed => "HAL operation failed",
            HalError::Busy => "HAL busy",
            HalError::Timeout => "HAL timeout",
        }
    }
}

impl From<HalError> for Error {
    fn from(_: HalError) -> Self {
        Error::HardwareError
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for hardware collaborator operations
pub type HalResult<T> = core::result::Result<T, HalError>;

// =============================================================================
// Unit Tests
// =============================================================================
