//! Sanitation (flush) state machine.
//!
//! A delayed-activation actuator: the flush must not run while someone is
//! present, only after presence has stayed absent for the debounce delay.
//!
//! ```text
//!  IDLE ──[presence]──▶ AWAITING ──[absent ≥ debounce]──▶ ACTIVE
//!   ▲                    │    ▲                             │
//!   │                    └────┘ presence: restart window    │
//!   └──────────────[debounce + run since last presence]─────┘
//! ```
//!
//! Presence while ACTIVE is ignored: a flush always runs to completion.
//! A presence sensor stuck high parks the machine in AWAITING, which is
//! the safe place to be stuck.

use log::info;
use serde::Serialize;

use super::Command;
use crate::clock::{Millis, has_elapsed};
use crate::config::SanitationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SanitationState {
    /// Nobody seen since the last cycle.
    Idle,
    /// Presence seen; waiting for it to stay absent for the debounce delay.
    Awaiting,
    /// Flush relay energised.
    Active,
}

impl SanitationState {
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Awaiting => "Awaiting",
            Self::Active => "Active",
        }
    }
}

pub struct SanitationController {
    state: SanitationState,
    /// Last tick on which presence was observed.  Only meaningful
    /// outside `Idle`.
    presence_detected_at: Millis,
    debounce_delay_ms: Millis,
    run_duration_ms: Millis,
}

impl SanitationController {
    pub fn new(config: &SanitationConfig) -> Self {
        Self {
            state: SanitationState::Idle,
            presence_detected_at: 0,
            debounce_delay_ms: config.debounce_delay_ms,
            run_duration_ms: config.run_duration_ms,
        }
    }

    /// Single transition function.  Returns the command to issue, if any.
    pub fn advance(&mut self, presence: bool, now: Millis) -> Option<Command> {
        match self.state {
            SanitationState::Idle => {
                if presence {
                    self.presence_detected_at = now;
                    self.enter(SanitationState::Awaiting);
                }
                None
            }
            SanitationState::Awaiting => {
                if presence {
                    self.presence_detected_at = now;
                    None
                } else if has_elapsed(now, self.presence_detected_at, self.debounce_delay_ms) {
                    self.enter(SanitationState::Active);
                    Some(Command::On)
                } else {
                    None
                }
            }
            SanitationState::Active => {
                if has_elapsed(now, self.presence_detected_at, self.cycle_ms()) {
                    self.enter(SanitationState::Idle);
                    Some(Command::Off)
                } else {
                    None
                }
            }
        }
    }

    pub fn state(&self) -> SanitationState {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state == SanitationState::Active
    }

    /// Last observed presence, `None` while idle.
    pub fn presence_detected_at(&self) -> Option<Millis> {
        match self.state {
            SanitationState::Idle => None,
            _ => Some(self.presence_detected_at),
        }
    }

    /// Scheduled activation instant (`presence + debounce`), `None` while idle.
    pub fn activation_at(&self) -> Option<Millis> {
        self.presence_detected_at()
            .map(|t| t.wrapping_add(self.debounce_delay_ms))
    }

    /// Debounce plus run: the full cycle measured from the last presence.
    fn cycle_ms(&self) -> Millis {
        self.debounce_delay_ms.saturating_add(self.run_duration_ms)
    }

    fn enter(&mut self, next: SanitationState) {
        info!(
            "Sanitation: {} -> {} (presence at {}ms)",
            self.state.name(),
            next.name(),
            self.presence_detected_at
        );
        self.state = next;
    }
}
