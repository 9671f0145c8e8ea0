//! PIR presence sensor (HC-SR501).
//!
//! Level-based: the module holds its output HIGH for its own retrigger
//! time while motion is seen.
//!
//! On host/test the level comes from a static `AtomicBool`.

use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

static SIM_PRESENCE: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_presence(present: bool) {
    SIM_PRESENCE.store(present, Ordering::Relaxed);
}

pub struct PresenceSensor {
    _gpio: i32,
}

impl PresenceSensor {
    pub fn new(gpio: i32) -> Self {
        Self { _gpio: gpio }
    }

    #[cfg(target_os = "espidf")]
    pub fn read(&mut self) -> bool {
        hw_init::gpio_read(self._gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read(&mut self) -> bool {
        SIM_PRESENCE.load(Ordering::Relaxed)
    }
}
