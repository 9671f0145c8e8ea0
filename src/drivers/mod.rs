//! Actuator drivers, hardware initialisation, and peripheral helpers.

pub mod hw_init;
pub mod relay;
pub mod ssd1306;
pub mod watchdog;
