//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and every relay driver, exposing them through
//! [`SensorPort`] and [`ActuatorPort`].  This is the only module in the
//! system that touches actual hardware.  On non-espidf targets, the
//! underlying drivers use cfg-gated simulation stubs.

use heapless::Vec;
use log::warn;

use crate::app::ports::{ActuatorId, ActuatorPort, SensorPort};
use crate::config::MAX_CHANNELS;
use crate::control::ChannelId;
use crate::drivers::relay::RelayDriver;
use crate::pins;
use crate::sensors::SensorHub;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensor_hub: SensorHub,
    plant_relays: Vec<RelayDriver, MAX_CHANNELS>,
    sanitation_relay: RelayDriver,
}

impl HardwareAdapter {
    pub fn new(
        sensor_hub: SensorHub,
        plant_relays: Vec<RelayDriver, MAX_CHANNELS>,
        sanitation_relay: RelayDriver,
    ) -> Self {
        Self {
            sensor_hub,
            plant_relays,
            sanitation_relay,
        }
    }

    /// Adapter for the first `channels` plants of the board pin map.
    pub fn for_board(channels: usize) -> Self {
        let mut relays = Vec::new();
        for &gpio in pins::PLANT_RELAY_GPIO.iter().take(channels) {
            let _ = relays.push(RelayDriver::new(gpio, pins::RELAY_ACTIVE_LOW));
        }
        Self::new(
            SensorHub::for_board(channels),
            relays,
            RelayDriver::new(pins::SANITATION_RELAY_GPIO, pins::RELAY_ACTIVE_LOW),
        )
    }

    pub fn is_on(&self, actuator: ActuatorId) -> bool {
        match actuator {
            ActuatorId::Irrigation(ch) => self
                .plant_relays
                .get(ch.index())
                .is_some_and(RelayDriver::is_on),
            ActuatorId::Sanitation => self.sanitation_relay.is_on(),
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_moisture(&mut self, channel: ChannelId) -> u8 {
        self.sensor_hub.read_moisture(channel)
    }

    fn read_presence(&mut self) -> bool {
        self.sensor_hub.read_presence()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set(&mut self, actuator: ActuatorId, on: bool) {
        match actuator {
            ActuatorId::Irrigation(ch) => match self.plant_relays.get_mut(ch.index()) {
                Some(relay) => relay.set(on),
                None => warn!("no relay wired for {}", actuator),
            },
            ActuatorId::Sanitation => self.sanitation_relay.set(on),
        }
    }

    fn all_off(&mut self) {
        for relay in &mut self.plant_relays {
            relay.force_off();
        }
        self.sanitation_relay.force_off();
    }
}
