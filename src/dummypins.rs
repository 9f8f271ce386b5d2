//! # Stand-in pins for lines that are not wired
//!
//! Some setups tie the latch of the module chain to the SPI chip select, or run a bench test
//! without a power supply attached. The driver still wants an OutputPin for every control line,
//! so hand it a DummyOutputPin there.

use embedded_hal::digital::v2::OutputPin;

/// An OutputPin that accepts every level change and does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DummyOutputPin;

impl OutputPin for DummyOutputPin {
    type Error = core::convert::Infallible;
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// A delay that returns immediately, for dry runs on the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWait;

impl embedded_hal::blocking::delay::DelayMs<u16> for NoWait {
    fn delay_ms(&mut self, _ms: u16) {}
}
