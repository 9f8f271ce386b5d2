//! "Bit bang" write-only SPI for the shift register chain
//!
//! The module chain only has data and clock inputs, nothing is ever read back, so a write-only
//! implementation over two GPIO pins is all that is needed. Handy on boards where the SPI pins
//! are taken or where the flip-disc header doesn't line up with them.
//!
//! Use BitBangSpi::new() on slow boards and BitBangSpi::new_with_delay() on fast ones: the
//! 74HC595 style registers of the modules want a clock well below what a fast core toggles,
//! the more so over long ribbon cables between modules.

use core::marker::PhantomData;

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::blocking::spi::Write as SpiWrite;
use embedded_hal::digital::v2::OutputPin;

/// "Bit bang" SPI implementation, MSB first, data sampled on the rising clock edge.
pub struct BitBangSpi<ERR, CLK, DIN, DELAY> {
    clk: CLK,
    din: DIN,
    delay: DELAY,
    half_period_us: u8,
    _phantom: PhantomData<ERR>,
}

/// Used to run without delay on a slow enough clock speed
pub struct NoDelay {}

impl DelayUs<u8> for NoDelay {
    #[inline]
    fn delay_us(&mut self, _us: u8) {}
}

impl<ERR, CLK, DIN> BitBangSpi<ERR, CLK, DIN, NoDelay>
where
    CLK: OutputPin<Error = ERR>,
    DIN: OutputPin<Error = ERR>,
{
    /// Constructs a "bit bang" SPI implementation from "data in" and "clock" pins.
    pub fn new(mut clk: CLK, din: DIN) -> Result<BitBangSpi<ERR, CLK, DIN, NoDelay>, ERR> {
        clk.set_low()?;
        Ok(BitBangSpi {
            clk,
            din,
            delay: NoDelay {},
            half_period_us: 0,
            _phantom: PhantomData,
        })
    }
}

impl<ERR, CLK, DIN, DELAY> BitBangSpi<ERR, CLK, DIN, DELAY>
where
    CLK: OutputPin<Error = ERR>,
    DIN: OutputPin<Error = ERR>,
    DELAY: DelayUs<u8>,
{
    /// Constructs a "bit bang" SPI implementation with a delay of `half_period_us` after each
    /// clock edge. 1 µs gives roughly 500 kHz, plenty for a chain of 8 modules.
    pub fn new_with_delay(
        mut clk: CLK,
        din: DIN,
        delay: DELAY,
        half_period_us: u8,
    ) -> Result<BitBangSpi<ERR, CLK, DIN, DELAY>, ERR> {
        clk.set_low()?;
        Ok(BitBangSpi {
            clk,
            din,
            delay,
            half_period_us,
            _phantom: PhantomData,
        })
    }

    /// Give back clock and data pins and the delay
    pub fn free(self) -> (CLK, DIN, DELAY) {
        (self.clk, self.din, self.delay)
    }

    #[inline]
    fn write_bit(&mut self, high: bool) -> Result<(), ERR> {
        if high {
            self.din.set_high()?;
        } else {
            self.din.set_low()?;
        }
        self.clk.set_high()?;
        self.delay.delay_us(self.half_period_us);
        self.clk.set_low()?;
        self.delay.delay_us(self.half_period_us);
        Ok(())
    }
}

impl<ERR, CLK, DIN, DELAY> SpiWrite<u8> for BitBangSpi<ERR, CLK, DIN, DELAY>
where
    CLK: OutputPin<Error = ERR>,
    DIN: OutputPin<Error = ERR>,
    DELAY: DelayUs<u8>,
{
    type Error = ERR;

    #[inline]
    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        for value in words {
            let mut v = *value;
            for _ in 0..8 {
                self.write_bit((v & 0x80) == 0x80)?;
                v <<= 1;
            }
        }
        Ok(())
    }
}
