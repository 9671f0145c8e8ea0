//! Binary relay driver (irrigation pumps, sanitation flush).
//!
//! A dumb actuator: on or off, nothing else.  Polarity is a board
//! property, so the driver translates logical ON to the electrical level.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the GPIO via hw_init helpers.
//! On host/test: the level lands in `hw_init::sim`.

use log::trace;

use crate::drivers::hw_init;

pub struct RelayDriver {
    gpio: i32,
    active_low: bool,
    on: bool,
}

impl RelayDriver {
    /// Takes ownership of an output pin already configured (and driven
    /// OFF) by `hw_init`.
    pub fn new(gpio: i32, active_low: bool) -> Self {
        Self {
            gpio,
            active_low,
            on: false,
        }
    }

    /// Drive the relay.  Re-writing the current state is a no-op.
    pub fn set(&mut self, on: bool) {
        if on == self.on {
            return;
        }
        trace!("relay GPIO{}: {}", self.gpio, if on { "ON" } else { "OFF" });
        self.write_level(on);
        self.on = on;
    }

    /// Unconditionally drive OFF, regardless of the remembered state.
    pub fn force_off(&mut self) {
        self.write_level(false);
        self.on = false;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    fn write_level(&self, on: bool) {
        hw_init::gpio_write(self.gpio, on != self.active_low);
    }
}
