//! Reset events raised by the host
//!
//! Each flag is edge-triggered: it is set when the reset sequence arrives
//! and cleared when the caller takes it.

/// A reset requested by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetEvent {
    /// DECSTR soft reset: auto-wrap off, carriage returned
    Soft,
    /// RIS hard reset: all modes and column tracking back to defaults
    Hard,
}

/// Pending reset flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResetFlags {
    soft: bool,
    hard: bool,
}

impl ResetFlags {
    pub fn raise(&mut self, event: ResetEvent) {
        match event {
            ResetEvent::Soft => self.soft = true,
            ResetEvent::Hard => self.hard = true,
        }
    }

    /// Check and clear the soft reset flag
    pub fn take_soft(&mut self) -> bool {
        std::mem::take(&mut self.soft)
    }

    /// Check and clear the hard reset flag
    pub fn take_hard(&mut self) -> bool {
        std::mem::take(&mut self.hard)
    }

    /// Take the next pending event, hard resets first
    pub fn take(&mut self) -> Option<ResetEvent> {
        if self.take_hard() {
            Some(ResetEvent::Hard)
        } else if self.take_soft() {
            Some(ResetEvent::Soft)
        } else {
            None
        }
    }
}
