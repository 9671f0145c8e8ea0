//! Time-driven control core.
//!
//! Two independent controllers share nothing but the clock:
//!
//! ```text
//!   moisture[1..N] ──▶ IrrigationManager ──▶ Command per channel
//!   presence ────────▶ SanitationController ──▶ Command (flush relay)
//! ```
//!
//! Both are pure with respect to their inputs: every `advance` takes the
//! current reading and an explicit `now`, and returns the command to issue
//! (if any).  Nothing here touches hardware, sleeps, or fails.

pub mod irrigation;
pub mod sanitation;

use core::fmt;

use serde::Serialize;

/// Binary actuator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    On,
    Off,
}

impl Command {
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

/// Stable 1-based irrigation channel identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ChannelId(u8);

impl ChannelId {
    /// `None` for 0; ids start at 1.
    pub const fn new(id: u8) -> Option<Self> {
        if id == 0 { None } else { Some(Self(id)) }
    }

    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index as u8 + 1)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position in channel tables.
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
