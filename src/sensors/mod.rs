//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns one moisture probe per wired channel plus the PIR input.
//! Reads never fail: a bad ADC conversion reports full scale, which is
//! never below a moisture threshold.

pub mod moisture;
pub mod presence;

use heapless::Vec;
use log::trace;

use crate::config::MAX_CHANNELS;
use crate::control::ChannelId;
use crate::pins;
use moisture::MoistureSensor;
use presence::PresenceSensor;

/// Aggregates all sensor drivers.
pub struct SensorHub {
    moisture: Vec<MoistureSensor, MAX_CHANNELS>,
    presence: PresenceSensor,
}

impl SensorHub {
    pub fn new(moisture: Vec<MoistureSensor, MAX_CHANNELS>, presence: PresenceSensor) -> Self {
        Self { moisture, presence }
    }

    /// Hub for the first `channels` probes of the board pin map.
    pub fn for_board(channels: usize) -> Self {
        let mut moisture = Vec::new();
        for (idx, &pin) in pins::MOISTURE_ADC.iter().enumerate().take(channels) {
            let _ = moisture.push(MoistureSensor::new(idx, pin));
        }
        Self::new(moisture, PresenceSensor::new(pins::PIR_GPIO))
    }

    /// Percentage for `channel`; an unwired channel reads 100 %.
    pub fn read_moisture(&mut self, channel: ChannelId) -> u8 {
        let Some(probe) = self.moisture.get_mut(channel.index()) else {
            return 100;
        };
        let reading = probe.read();
        trace!("moisture {}: raw={} -> {}%", channel, reading.raw, reading.percent);
        reading.percent
    }

    pub fn read_presence(&mut self) -> bool {
        self.presence.read()
    }

    pub fn channel_count(&self) -> usize {
        self.moisture.len()
    }
}
