//! OLED status display adapter.
//!
//! [`StatusScreen`] is the text layout (pure, testable on host);
//! [`DisplayReporter`] renders it onto the SSD1306 and implements
//! [`StatusReporter`].
//!
//! The panel is 128x64 with a 5x8 font: 8 rows of 25 characters.
//!
//! ```text
//!  Plant moisture:
//!  Plant 1: 42% ON
//!  Plant 2: 77% off
//!  ...
//!  Sanitation: Awaiting
//! ```

use core::fmt::Write as _;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, Point};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::Drawable;
use embedded_hal::i2c::I2c;
use heapless::{String, Vec};
use log::{info, warn};

use crate::app::events::StatusSnapshot;
use crate::app::ports::StatusReporter;
use crate::config::MAX_CHANNELS;
use crate::drivers::ssd1306::Ssd1306;

pub const COLS: usize = 25;
pub const ROWS: usize = 8;
const ROW_HEIGHT: i32 = 8;

/// A screen's worth of text lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusScreen {
    lines: Vec<String<COLS>, ROWS>,
}

impl StatusScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Boot splash, shown once after a successful display init.
    pub fn splash() -> Self {
        let mut screen = Self::new();
        screen.push_line(format_args!("System started"));
        screen
    }

    /// One line per plant plus a sanitation line.  A heading is added
    /// when it fits; more than 7 plants fall back to two per line.
    pub fn from_snapshot(status: &StatusSnapshot) -> Self {
        let mut screen = Self::new();
        let plants = status.moisture_percent.len();

        if plants + 2 <= ROWS {
            screen.push_line(format_args!("Plant moisture:"));
        }

        if plants < ROWS {
            for (ch, moisture, on) in status.channels() {
                screen.push_line(format_args!("Plant {}: {}% {}", ch, moisture, on_off(on)));
            }
        } else {
            let all: Vec<_, MAX_CHANNELS> = status.channels().collect();
            for pair in all.chunks(2) {
                let mut line: String<COLS> = String::new();
                for (i, &(ch, moisture, on)) in pair.iter().enumerate() {
                    let sep = if i == 0 { "" } else { "  " };
                    let _ = write!(line, "{}P{}:{}% {}", sep, ch, moisture, on_off(on));
                }
                screen.push_raw(line);
            }
        }

        if status.sanitation_on {
            screen.push_line(format_args!("Sanitation: {} ON", status.sanitation.name()));
        } else {
            screen.push_line(format_args!("Sanitation: {}", status.sanitation.name()));
        }
        screen
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map_or("", String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render every line top-down onto `target`.
    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let style = MonoTextStyle::new(&FONT_5X8, BinaryColor::On);
        for (row, line) in self.lines.iter().enumerate() {
            let origin = Point::new(0, row as i32 * ROW_HEIGHT);
            Text::with_baseline(line.as_str(), origin, style, Baseline::Top).draw(target)?;
        }
        Ok(())
    }

    /// Lines past the last row are dropped, long lines are cut at [`COLS`].
    fn push_line(&mut self, args: core::fmt::Arguments<'_>) {
        let mut line: String<COLS> = String::new();
        let _ = line.write_fmt(args);
        self.push_raw(line);
    }

    fn push_raw(&mut self, line: String<COLS>) {
        let _ = self.lines.push(line);
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "off" }
}

// ───────────────────────────────────────────────────────────────
// SSD1306 reporter
// ───────────────────────────────────────────────────────────────

/// Status reporter that redraws the OLED on every report.
pub struct DisplayReporter<I2C> {
    display: Ssd1306<I2C>,
}

impl<I2C> DisplayReporter<I2C>
where
    I2C: I2c,
{
    /// Bring the panel up and show the boot splash.
    ///
    /// Failure here is fatal to the caller: a controller that cannot
    /// show its state must not run actuators.
    pub fn init(i2c: I2C, addr: u8) -> Result<Self, I2C::Error> {
        let mut display = Ssd1306::new(i2c, addr);
        display.init()?;
        let mut reporter = Self { display };
        reporter.show(&StatusScreen::splash())?;
        info!("Display: SSD1306 at 0x{:02X} ready", addr);
        Ok(reporter)
    }

    pub fn show(&mut self, screen: &StatusScreen) -> Result<(), I2C::Error> {
        self.display.clear_buffer();
        let Ok(()) = screen.draw(&mut self.display);
        self.display.flush()
    }

    pub fn display(&self) -> &Ssd1306<I2C> {
        &self.display
    }
}

impl<I2C> StatusReporter for DisplayReporter<I2C>
where
    I2C: I2c,
{
    fn report(&mut self, status: &StatusSnapshot) {
        if let Err(e) = self.show(&StatusScreen::from_snapshot(status)) {
            warn!("Display: flush failed ({:?}), keeping last frame", e);
        }
    }
}
