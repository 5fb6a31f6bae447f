//! Driver events delivered to the registered client callback.

/// Event raised by the hardware layer and forwarded to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MacEvent {
    /// A frame has been received
    RxFrame,
    /// A frame has been transmitted
    TxFrame,
    /// Wake-up (magic packet or wake-up frame) received
    Wakeup,
}

impl MacEvent {
    /// Short name for logging
    pub const fn as_str(&self) -> &'static str {
        match self {
            MacEvent::RxFrame => "rx frame",
            MacEvent::TxFrame => "tx frame",
            MacEvent::Wakeup => "wakeup",
        }
    }
}

/// Client callback.
///
/// Invoked from interrupt context, outside any critical section held by the
/// driver. At most one callback per hardware notification; events are not
/// queued.
pub type EventCallback = fn(MacEvent);
