//! Mock hardware adapter for integration tests.
//!
//! Serves scripted sensor values and records every actuator call so tests
//! can assert on the full command history without touching GPIO/ADC.

use std::collections::HashMap;

use plantcare::app::events::{AppEvent, StatusSnapshot};
use plantcare::app::ports::{ActuatorId, ActuatorPort, EventSink, SensorPort, StatusReporter};
use plantcare::clock::Millis;
use plantcare::control::ChannelId;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Set { actuator: ActuatorId, on: bool },
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    /// Moisture per channel, index 0 = channel 1.  Missing entries read 100 %.
    pub moisture: Vec<u8>,
    pub presence: bool,
    pub calls: Vec<ActuatorCall>,
    pub moisture_reads: usize,
    pub presence_reads: usize,
    state: HashMap<ActuatorId, bool>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(channels: usize) -> Self {
        Self {
            moisture: vec![100; channels],
            presence: false,
            calls: Vec::new(),
            moisture_reads: 0,
            presence_reads: 0,
            state: HashMap::new(),
        }
    }

    pub fn set_moisture(&mut self, channel: u8, percent: u8) {
        self.moisture[usize::from(channel) - 1] = percent;
    }

    /// Current electrical state of an actuator (after all calls so far).
    pub fn is_on(&self, actuator: ActuatorId) -> bool {
        self.state.get(&actuator).copied().unwrap_or(false)
    }

    pub fn irrigation_on(&self, channel: u8) -> bool {
        self.is_on(ActuatorId::Irrigation(ChannelId::new(channel).unwrap()))
    }

    pub fn sanitation_on(&self) -> bool {
        self.is_on(ActuatorId::Sanitation)
    }

    /// Calls addressed to one actuator, in order.
    pub fn calls_for(&self, actuator: ActuatorId) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::Set { actuator: a, on } if *a == actuator => Some(*on),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl SensorPort for MockHardware {
    fn read_moisture(&mut self, channel: ChannelId) -> u8 {
        self.moisture_reads += 1;
        self.moisture.get(channel.index()).copied().unwrap_or(100)
    }

    fn read_presence(&mut self) -> bool {
        self.presence_reads += 1;
        self.presence
    }
}

impl ActuatorPort for MockHardware {
    fn set(&mut self, actuator: ActuatorId, on: bool) {
        self.calls.push(ActuatorCall::Set { actuator, on });
        self.state.insert(actuator, on);
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
        self.state.clear();
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<(Millis, AppEvent)>,
    now: Millis,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp subsequent events with `now`.
    pub fn at(&mut self, now: Millis) -> &mut Self {
        self.now = now;
        self
    }

    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.iter().any(|(_, e)| e == event)
    }

    /// Timestamp of the first occurrence of `event`.
    pub fn first(&self, event: &AppEvent) -> Option<Millis> {
        self.events.iter().find(|(_, e)| e == event).map(|(t, _)| *t)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push((self.now, event.clone()));
    }
}

// ── Status reporter ───────────────────────────────────────────

#[derive(Default)]
pub struct RecordingReporter {
    pub reports: Vec<StatusSnapshot>,
}

impl StatusReporter for RecordingReporter {
    fn report(&mut self, status: &StatusSnapshot) {
        self.reports.push(status.clone());
    }
}
