//! Testing utilities and mock implementations
//!
//! Software fakes for the hardware collaborator so the frame pipeline can be
//! exercised on the host.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::vec::Vec;

use crate::dma::DescriptorRing;
use crate::driver::config::{MacSettings, PhyInterface, VlanComparison};
use crate::driver::error::{HalError, HalResult};
use crate::hal::{EthHardware, HardwareCallbacks};

// =============================================================================
// Mock Descriptor Ring
// =============================================================================

/// Descriptor ring whose ownership bits are plain flags
///
/// Submitting through [`MockHardware`] marks the current TX descriptor as
/// hardware-owned and advances the cursor, like the HAL does.
#[derive(Debug)]
pub struct MockRing {
    tx_owned: RefCell<Vec<bool>>,
    tx_cursor: Cell<usize>,
    rx_owned: RefCell<Vec<bool>>,
    rx_cursor: Cell<usize>,
}

impl MockRing {
    pub fn new(tx_count: usize, rx_count: usize) -> Self {
        Self {
            tx_owned: RefCell::new(std::vec![false; tx_count]),
            tx_cursor: Cell::new(0),
            rx_owned: RefCell::new(std::vec![true; rx_count]),
            rx_cursor: Cell::new(0),
        }
    }

    /// Mark TX descriptor `index` as hardware-owned (or released)
    pub fn set_tx_owned(&self, index: usize, owned: bool) {
        self.tx_owned.borrow_mut()[index] = owned;
    }

    /// Simulate transmit completion of every descriptor
    pub fn release_all_tx(&self) {
        self.tx_owned.borrow_mut().iter_mut().for_each(|o| *o = false);
    }

    pub fn set_tx_cursor(&self, index: usize) {
        self.tx_cursor.set(index);
    }

    fn tx_len(&self) -> usize {
        self.tx_owned.borrow().len()
    }
}

impl DescriptorRing for MockRing {
    fn current_tx_index(&self) -> usize {
        self.tx_cursor.get()
    }

    fn is_tx_desc_free(&self, index: usize) -> bool {
        self.tx_owned.borrow().get(index).is_some_and(|owned| !owned)
    }

    fn current_rx_index(&self) -> usize {
        self.rx_cursor.get()
    }

    fn is_rx_desc_free(&self, index: usize) -> bool {
        self.rx_owned.borrow().get(index).is_some_and(|owned| !owned)
    }
}

// =============================================================================
// Mock Hardware
// =============================================================================

/// Fake MAC peripheral recording every interaction
#[derive(Debug)]
pub struct MockHardware {
    pub ring: MockRing,
    pub started: bool,
    pub init_calls: usize,
    pub deinit_calls: usize,
    pub fail_init: bool,
    pub fail_deinit: bool,
    pub fail_submit: bool,
    pub fail_start: bool,
    /// Frames handed to `submit_transmit`, in order
    pub submitted: Vec<Vec<u8>>,
    /// Frames delivered on the next `read_available` calls
    pub rx_queue: VecDeque<Vec<u8>>,
    pub settings: MacSettings,
    pub settings_writes: usize,
    pub vlan: Option<(VlanComparison, u16)>,
    pub mac_addr: [u8; 6],
    pub phy_regs: HashMap<(u8, u8), u16>,
    pub interface: PhyInterface,
    /// Names of the control-path calls, in order
    pub calls: Vec<&'static str>,
}

impl MockHardware {
    pub fn new() -> Self {
        Self::with_ring(MockRing::new(4, 4))
    }

    pub fn with_ring(ring: MockRing) -> Self {
        Self {
            ring,
            started: false,
            init_calls: 0,
            deinit_calls: 0,
            fail_init: false,
            fail_deinit: false,
            fail_submit: false,
            fail_start: false,
            submitted: Vec::new(),
            rx_queue: VecDeque::new(),
            settings: MacSettings::default(),
            settings_writes: 0,
            vlan: None,
            mac_addr: [0; 6],
            phy_regs: HashMap::new(),
            interface: PhyInterface::Rmii,
            calls: Vec::new(),
        }
    }

    /// Queue a frame for the next receive poll
    pub fn queue_rx(&mut self, frame: &[u8]) {
        self.rx_queue.push_back(frame.to_vec());
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl EthHardware for MockHardware {
    type Ring = MockRing;

    fn ring(&self) -> &Self::Ring {
        &self.ring
    }

    fn init(&mut self) -> HalResult<()> {
        self.calls.push("init");
        self.init_calls += 1;
        if self.fail_init {
            return Err(HalError::Failed);
        }
        Ok(())
    }

    fn deinit(&mut self) -> HalResult<()> {
        self.calls.push("deinit");
        self.deinit_calls += 1;
        self.started = false;
        if self.fail_deinit {
            return Err(HalError::Failed);
        }
        Ok(())
    }

    fn start(&mut self) -> HalResult<()> {
        self.calls.push("start");
        if self.fail_start {
            return Err(HalError::Busy);
        }
        self.started = true;
        Ok(())
    }

    fn stop(&mut self) -> HalResult<()> {
        self.calls.push("stop");
        self.started = false;
        Ok(())
    }

    fn is_started(&self) -> bool {
        self.started
    }

    fn submit_transmit(&mut self, frame: &[u8]) -> HalResult<()> {
        if self.fail_submit {
            return Err(HalError::Failed);
        }
        self.submitted.push(frame.to_vec());

        let index = self.ring.current_tx_index();
        self.ring.set_tx_owned(index, true);
        self.ring.set_tx_cursor((index + 1) % self.ring.tx_len());
        Ok(())
    }

    fn read_available(&mut self, callbacks: &dyn HardwareCallbacks) -> HalResult<()> {
        let frame = self.rx_queue.pop_front().ok_or(HalError::Failed)?;
        let buffer = callbacks.allocate_rx_buffer();
        if buffer.is_null() {
            return Err(HalError::Failed);
        }
        // SAFETY: the pool regions used in tests are larger than the queued frames.
        unsafe { core::ptr::copy_nonoverlapping(frame.as_ptr(), buffer, frame.len()) };
        callbacks.rx_frame_linked(buffer, frame.len() as u16);
        Ok(())
    }

    fn mac_settings(&mut self) -> HalResult<MacSettings> {
        self.calls.push("mac_settings");
        Ok(self.settings)
    }

    fn set_mac_settings(&mut self, settings: &MacSettings) -> HalResult<()> {
        self.calls.push("set_mac_settings");
        self.settings = *settings;
        self.settings_writes += 1;
        Ok(())
    }

    fn set_vlan_identifier(&mut self, comparison: VlanComparison, tag: u16) -> HalResult<()> {
        self.vlan = Some((comparison, tag));
        Ok(())
    }

    fn mac_address(&self) -> [u8; 6] {
        self.mac_addr
    }

    fn set_mac_address(&mut self, addr: &[u8; 6]) -> HalResult<()> {
        self.calls.push("set_mac_address");
        self.mac_addr = *addr;
        Ok(())
    }

    fn read_phy_register(&mut self, phy_addr: u8, reg_addr: u8) -> HalResult<u16> {
        self.phy_regs
            .get(&(phy_addr, reg_addr))
            .copied()
            .ok_or(HalError::Timeout)
    }

    fn write_phy_register(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> HalResult<()> {
        self.phy_regs.insert((phy_addr, reg_addr), value);
        Ok(())
    }

    fn media_interface(&self) -> PhyInterface {
        self.interface
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    total_ns: u64,
    calls: usize,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }

    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
        self.calls += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::delay::DelayNs;

    #[test]
    fn mock_submit_takes_descriptor() {
        let mut hw = MockHardware::new();
        assert!(hw.ring.is_tx_desc_free(0));

        hw.submit_transmit(b"abc").unwrap();
        assert!(!hw.ring.is_tx_desc_free(0));
        assert_eq!(hw.ring.current_tx_index(), 1);
        assert_eq!(hw.submitted.len(), 1);
    }

    #[test]
    fn mock_delay_accumulates() {
        let mut delay = MockDelay::new();
        delay.delay_us(3);
        delay.delay_ns(500);
        assert_eq!(delay.total_ns(), 3_500);
    }
}
