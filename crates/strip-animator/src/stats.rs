//! Render loop counters for external observation
//!
//! The engine updates these counters, and any other task can read them
//! without touching engine state.

use core::sync::atomic::{AtomicU8, AtomicU32, Ordering};

use crate::command::ModeId;
use crate::error::TransmitFault;

/// Lock-free engine statistics
pub struct EngineStats {
    /// Frames handed to the transmitter
    frames_submitted: AtomicU32,
    /// Transmissions that reported an error
    transmit_failures: AtomicU32,
    /// Transmissions that did not finish within the timeout
    transmit_timeouts: AtomicU32,
    /// Faults since the last clean transmission
    consecutive_faults: AtomicU32,
    /// Commands the engine has adopted
    commands_adopted: AtomicU32,
    /// Active mode id
    mode: AtomicU8,
}

impl EngineStats {
    pub const fn new() -> Self {
        Self {
            frames_submitted: AtomicU32::new(0),
            transmit_failures: AtomicU32::new(0),
            transmit_timeouts: AtomicU32::new(0),
            consecutive_faults: AtomicU32::new(0),
            commands_adopted: AtomicU32::new(0),
            mode: AtomicU8::new(ModeId::Color as u8),
        }
    }

    // === Read methods ===

    pub fn frames_submitted(&self) -> u32 {
        self.frames_submitted.load(Ordering::Relaxed)
    }

    pub fn transmit_failures(&self) -> u32 {
        self.transmit_failures.load(Ordering::Relaxed)
    }

    pub fn transmit_timeouts(&self) -> u32 {
        self.transmit_timeouts.load(Ordering::Relaxed)
    }

    pub fn consecutive_faults(&self) -> u32 {
        self.consecutive_faults.load(Ordering::Relaxed)
    }

    pub fn commands_adopted(&self) -> u32 {
        self.commands_adopted.load(Ordering::Relaxed)
    }

    pub fn mode(&self) -> ModeId {
        ModeId::from_raw(self.mode.load(Ordering::Relaxed)).unwrap_or(ModeId::Color)
    }

    // === Write methods (engine only) ===

    pub(crate) fn record_submitted(&self) {
        self.frames_submitted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_fault(&self, fault: TransmitFault, streak: u32) {
        let counter = match fault {
            TransmitFault::Failed => &self.transmit_failures,
            TransmitFault::TimedOut => &self.transmit_timeouts,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.consecutive_faults.store(streak, Ordering::Relaxed);
    }

    pub(crate) fn record_clean(&self) {
        self.consecutive_faults.store(0, Ordering::Relaxed);
    }

    pub(crate) fn record_adopted(&self, mode: ModeId) {
        self.commands_adopted.fetch_add(1, Ordering::Relaxed);
        self.record_mode(mode);
    }

    pub(crate) fn record_mode(&self, mode: ModeId) {
        self.mode.store(mode as u8, Ordering::Relaxed);
    }
}

impl Default for EngineStats {
    fn default() -> Self {
        Self::new()
    }
}
