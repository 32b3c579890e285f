//! Display bus fault tracking
//!
//! A single failed refresh is a transient fault; the next refresh repaints
//! the whole panel anyway. A run of failures means the panel is gone.

/// Consecutive failed refreshes after which the display is unusable
pub const MAX_CONSECUTIVE_BUS_FAULTS: u8 = 3;

/// Outcome of recording a refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultStatus {
    /// Keep going
    Ok,
    /// Too many consecutive failures
    Fatal,
}

/// Counts consecutive bus faults
#[derive(Debug, Clone, Default)]
pub struct BusFaultMonitor {
    consecutive: u8,
    total: u32,
}

impl BusFaultMonitor {
    pub fn new() -> Self {
        Self {
            consecutive: 0,
            total: 0,
        }
    }

    /// A refresh went through; the run of failures is over
    pub fn record_success(&mut self) {
        self.consecutive = 0;
    }

    /// A refresh failed
    pub fn record_failure(&mut self) -> FaultStatus {
        self.consecutive = self.consecutive.saturating_add(1);
        self.total = self.total.saturating_add(1);
        self.check()
    }

    /// Current status without recording anything
    pub fn check(&self) -> FaultStatus {
        if self.consecutive >= MAX_CONSECUTIVE_BUS_FAULTS {
            FaultStatus::Fatal
        } else {
            FaultStatus::Ok
        }
    }

    /// Length of the current run of failures
    pub fn consecutive_faults(&self) -> u8 {
        self.consecutive
    }

    /// Failures since startup
    pub fn total_faults(&self) -> u32 {
        self.total
    }
}
