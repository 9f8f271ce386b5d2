//! # Textmode extension for the 7-segment modules
//!
//! Implements core::fmt::Write, so write!() puts one character on each 7-segment module, left
//! to right, skipping the other module kinds. Only characters with a glyph (digits, '-', ' ',
//! '°' and a few letters, see Glyph::from_char) can be shown.
//!
//! ```ignore
//! display.init(&[Seg, Dots, Seg, Seg])?;
//! write!(display, "{:>3}", 42)?;   // " 42"
//! display.set_cursor(0);
//! write!(display, "-5°")?;
//! ```
use core::fmt::Error as FmtError;
use core::fmt::Result as FmtResult;
use core::fmt::Write;

use hal::blocking::delay::DelayMs;
use hal::blocking::spi::Write as SpiWrite;
use hal::digital::v2::OutputPin;

use crate::{display::FlipDisc, module::ModuleKind, segments::Glyph};

impl<SPI, EN, CH, PL, DELAY> FlipDisc<SPI, EN, CH, PL, DELAY>
where
    SPI: SpiWrite<u8>,
    EN: OutputPin,
    CH: OutputPin,
    PL: OutputPin,
    DELAY: DelayMs<u16>,
{
    /// index of the 7-segment module the next character is written to
    pub fn cursor(&self) -> usize {
        self.text_cursor
    }

    /// move the text cursor, silently capped to the number of 7-segment modules
    pub fn set_cursor(&mut self, module: usize) {
        self.text_cursor = module.min(self.count(ModuleKind::Seg));
    }
}

impl<SPI, EN, CH, PL, DELAY> Write for FlipDisc<SPI, EN, CH, PL, DELAY>
where
    SPI: SpiWrite<u8>,
    EN: OutputPin,
    CH: OutputPin,
    PL: OutputPin,
    DELAY: DelayMs<u16>,
{
    fn write_str(&mut self, s: &str) -> FmtResult {
        for c in s.chars() {
            match c {
                '\r' | '\n' => self.text_cursor = 0,
                _ => {
                    let glyph = Glyph::from_char(c).ok_or(FmtError)?;
                    self.to_seg(self.text_cursor, glyph).map_err(|_| FmtError)?;
                    self.text_cursor += 1;
                }
            }
        }
        Ok(())
    }
}
