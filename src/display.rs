//! # Main driver for flip-disc module chains
//!
//! The driver owns the SPI bus feeding the shift registers, the three control lines of the
//! pulse shaper power supply and a delay provider.
//!  - EN: releases the charged capacitors through the coil selected in the shift registers
//!  - CH: charges the capacitors
//!  - PL: latches the shifted frame to the register outputs
//!
//! A disc is flipped by charging, latching a frame with exactly one control bit high,
//! releasing the pulse and latching the all-off frame again. Discs are always flipped one by
//! one, with the configurable flip delay after each of them.
//!
//! Typically you want to look into the following functions:
//!  - FlipDisc.new() to create a new driver instance, this is "Pin()" on the Arduino library
//!  - FlipDisc.init() to declare the modules of the chain
//!  - FlipDisc.set_delay() to slow down the flipping for a visible effect
//!
//! Module indices passed to to_seg(), to_dot(), disc_2x1() and friends count only the modules
//! of that kind: to_seg(1, ..) is the second 7-segment module, wherever it sits in the chain.
use hal::blocking::delay::DelayMs;
use hal::blocking::spi::Write as SpiWrite;
use hal::digital::v2::OutputPin;
use log::{debug, trace};

use crate::{
    error::FlipError,
    module::{self, ModuleKind},
    segments::Glyph,
    MAX_FRAME, MAX_MODULES,
};

/// Timing of the power supply pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTiming {
    /// how long CH is held high to charge the capacitors, in ms
    pub charge_ms: u16,
    /// how long EN is held high to release the pulse, in ms
    pub pulse_ms: u16,
}

impl PulseTiming {
    pub fn with_charge_ms(mut self, charge_ms: u16) -> Self {
        self.charge_ms = charge_ms;
        self
    }

    pub fn with_pulse_ms(mut self, pulse_ms: u16) -> Self {
        self.pulse_ms = pulse_ms;
        self
    }
}

impl Default for PulseTiming {
    fn default() -> Self {
        PulseTiming {
            charge_ms: 2,
            pulse_ms: 1,
        }
    }
}

#[derive(Debug)]
/// main struct for state keeping of the flip-disc driver
pub struct FlipDisc<SPI, EN, CH, PL, DELAY>
where
    SPI: SpiWrite<u8>,
    EN: OutputPin,
    CH: OutputPin,
    PL: OutputPin,
    DELAY: DelayMs<u16>,
{
    spi: SPI,
    en: EN,
    ch: CH,
    pl: PL,
    delay: DELAY,
    timing: PulseTiming,
    flip_delay: u8,
    chain: [ModuleKind; MAX_MODULES],
    len: usize,
    // last commanded face of every disc, bit i = disc i
    state: [u8; MAX_MODULES],
    #[cfg(feature = "textmode")]
    /// index of the 7-segment module the next character goes to
    pub(crate) text_cursor: usize,
}

impl<SPI, EN, CH, PL, DELAY> FlipDisc<SPI, EN, CH, PL, DELAY>
where
    SPI: SpiWrite<u8>,
    EN: OutputPin,
    CH: OutputPin,
    PL: OutputPin,
    DELAY: DelayMs<u16>,
{
    /// Create a new instance of the flip-disc driver
    ///
    /// Arguments:
    ///
    /// - spi: a working SPI interface implementing Write<u8> connected to the data and clock
    ///   inputs of the first module. BitBangSpi works as well
    /// - en: GPIO OutputPin connected to EN of the pulse shaper power supply
    /// - ch: GPIO OutputPin connected to CH of the pulse shaper power supply
    /// - pl: GPIO OutputPin connected to the latch (PL) of the module chain
    /// - delay: used for charge/pulse timing and the flip delay
    ///
    /// EN and CH are pulled low first. A floating EN line can release a pulse into whatever the
    /// registers happen to hold at power on.
    pub fn new(
        spi: SPI,
        mut en: EN,
        mut ch: CH,
        mut pl: PL,
        delay: DELAY,
    ) -> Result<FlipDisc<SPI, EN, CH, PL, DELAY>, FlipError> {
        FlipError::pin(en.set_low())?;
        FlipError::pin(ch.set_low())?;
        FlipError::pin(pl.set_high())?;

        Ok(FlipDisc {
            spi,
            en,
            ch,
            pl,
            delay,
            timing: PulseTiming::default(),
            flip_delay: 0,
            chain: [ModuleKind::Seg; MAX_MODULES],
            len: 0,
            state: [0; MAX_MODULES],
            #[cfg(feature = "textmode")]
            text_cursor: 0,
        })
    }

    /// Declare the modules of the chain, in the order they are wired starting at the
    /// controller. Up to 8 modules are supported.
    ///
    /// The shift registers are loaded with the all-off frame, no disc is flipped.
    pub fn init(&mut self, chain: &[ModuleKind]) -> Result<(), FlipError> {
        if chain.is_empty() {
            return Err(FlipError::ChainEmpty);
        }
        if chain.len() > MAX_MODULES {
            return Err(FlipError::ChainTooLong(chain.len()));
        }

        self.chain[..chain.len()].copy_from_slice(chain);
        self.len = chain.len();
        self.state = [0; MAX_MODULES];
        #[cfg(feature = "textmode")]
        {
            self.text_cursor = 0;
        }
        debug!("declared chain of {} modules: {:?}", self.len, chain);

        self.latch(None)
    }

    /// Give back the peripherals
    pub fn release(self) -> (SPI, EN, CH, PL, DELAY) {
        (self.spi, self.en, self.ch, self.pl, self.delay)
    }

    /// the declared chain, empty before init()
    pub fn chain(&self) -> &[ModuleKind] {
        &self.chain[..self.len]
    }

    /// Set the delay after every single flip, in ms.
    ///
    /// Zero flips as fast as the power supply allows, higher values give the "running"
    /// effect from disc to disc.
    pub fn set_delay(&mut self, ms: u8) {
        self.flip_delay = ms;
    }

    pub fn flip_delay(&self) -> u8 {
        self.flip_delay
    }

    pub fn timing(&self) -> PulseTiming {
        self.timing
    }

    /// Change charge and pulse duration, see PulseTiming.
    ///
    /// Longer pulses than the coils are rated for heat them up, stay with the defaults unless
    /// the power supply says otherwise.
    pub fn set_timing(&mut self, timing: PulseTiming) {
        self.timing = timing;
    }

    /// Returns the last commanded face of every disc of the module at chain position
    /// `index`, bit i = disc i. None if there is no such module.
    ///
    /// This is bookkeeping only, the discs can't be read back.
    pub fn module_state(&self, index: usize) -> Option<u8> {
        if index < self.len {
            Some(self.state[index])
        } else {
            None
        }
    }

    pub fn disc_state(&self, index: usize, disc: usize) -> Option<bool> {
        let kind = self.chain().get(index)?;
        if disc < kind.discs() {
            Some(self.state[index] & (1 << disc) != 0)
        } else {
            None
        }
    }

    /// Flip every disc of every module to "set", then back to "reset".
    pub fn test(&mut self) -> Result<(), FlipError> {
        self.ensure_init()?;
        debug!("test sequence over {} modules", self.len);
        for index in 0..self.len {
            self.fill_module(index, true)?;
            self.fill_module(index, false)?;
        }
        Ok(())
    }

    /// Set all discs of the chain
    pub fn all(&mut self) -> Result<(), FlipError> {
        self.fill(true)
    }

    /// Reset all discs of the chain
    pub fn clear(&mut self) -> Result<(), FlipError> {
        self.fill(false)
    }

    /// Show `glyph` on the `module`-th 7-segment module
    pub fn to_seg(&mut self, module: usize, glyph: Glyph) -> Result<(), FlipError> {
        let index = self.locate(ModuleKind::Seg, module)?;
        self.show_glyph(index, glyph)
    }

    /// Show the glyphs on the 7-segment modules, first glyph on the first 7-segment module.
    pub fn seg(&mut self, glyphs: &[Glyph]) -> Result<(), FlipError> {
        self.ensure_init()?;
        let available = self.chain().iter().filter(|k| k.is_seven_segment()).count();
        if glyphs.len() > available {
            return Err(FlipError::TooManyGlyphs {
                given: glyphs.len(),
                available,
            });
        }
        for (module, glyph) in glyphs.iter().enumerate() {
            self.to_seg(module, *glyph)?;
        }
        Ok(())
    }

    /// Flip a single dot of the `module`-th dots module
    pub fn to_dot(&mut self, module: usize, dot: usize, status: bool) -> Result<(), FlipError> {
        self.disc(ModuleKind::Dots, module, dot, status)
    }

    /// Flip the dots of the `module`-th dots module, first status for the top dot
    pub fn dot(&mut self, module: usize, statuses: &[bool]) -> Result<(), FlipError> {
        self.display(ModuleKind::Dots, module, statuses)
    }

    pub fn disc_2x1(&mut self, module: usize, disc: usize, status: bool) -> Result<(), FlipError> {
        self.disc(ModuleKind::D2x1, module, disc, status)
    }

    pub fn display_2x1(&mut self, module: usize, statuses: &[bool]) -> Result<(), FlipError> {
        self.display(ModuleKind::D2x1, module, statuses)
    }

    pub fn disc_3x1(&mut self, module: usize, disc: usize, status: bool) -> Result<(), FlipError> {
        self.disc(ModuleKind::D3x1, module, disc, status)
    }

    pub fn display_3x1(&mut self, module: usize, statuses: &[bool]) -> Result<(), FlipError> {
        self.display(ModuleKind::D3x1, module, statuses)
    }

    pub fn disc_1x3(&mut self, module: usize, disc: usize, status: bool) -> Result<(), FlipError> {
        self.disc(ModuleKind::D1x3, module, disc, status)
    }

    pub fn display_1x3(&mut self, module: usize, statuses: &[bool]) -> Result<(), FlipError> {
        self.display(ModuleKind::D1x3, module, statuses)
    }

    pub fn disc_1x7(&mut self, module: usize, disc: usize, status: bool) -> Result<(), FlipError> {
        self.disc(ModuleKind::D1x7, module, disc, status)
    }

    pub fn display_1x7(&mut self, module: usize, statuses: &[bool]) -> Result<(), FlipError> {
        self.display(ModuleKind::D1x7, module, statuses)
    }

    /// Flip a single disc of the `module`-th module of type `kind`
    pub fn disc(
        &mut self,
        kind: ModuleKind,
        module: usize,
        disc: usize,
        status: bool,
    ) -> Result<(), FlipError> {
        let index = self.locate(kind, module)?;
        if disc >= kind.discs() {
            return Err(FlipError::DiscOutOfRange {
                disc,
                discs: kind.discs(),
            });
        }
        self.flip(index, disc, status)
    }

    /// Flip the discs of the `module`-th module of type `kind`, statuses in disc order.
    ///
    /// Fewer statuses than discs leave the remaining discs alone.
    pub fn display(
        &mut self,
        kind: ModuleKind,
        module: usize,
        statuses: &[bool],
    ) -> Result<(), FlipError> {
        let index = self.locate(kind, module)?;
        if statuses.len() > kind.discs() {
            return Err(FlipError::DiscOutOfRange {
                disc: statuses.len() - 1,
                discs: kind.discs(),
            });
        }
        for (disc, status) in statuses.iter().enumerate() {
            self.flip(index, disc, *status)?;
        }
        Ok(())
    }

    /// number of modules of `kind` in the chain
    pub(crate) fn count(&self, kind: ModuleKind) -> usize {
        self.chain().iter().filter(|k| **k == kind).count()
    }

    fn ensure_init(&self) -> Result<(), FlipError> {
        if self.len == 0 {
            Err(FlipError::NotInitialized)
        } else {
            Ok(())
        }
    }

    // chain position of the `module`-th module of type `kind`
    fn locate(&self, kind: ModuleKind, module: usize) -> Result<usize, FlipError> {
        self.ensure_init()?;
        self.chain()
            .iter()
            .enumerate()
            .filter(|(_, k)| **k == kind)
            .nth(module)
            .map(|(index, _)| index)
            .ok_or(FlipError::ModuleNotFound {
                kind,
                index: module,
            })
    }

    fn fill(&mut self, status: bool) -> Result<(), FlipError> {
        self.ensure_init()?;
        debug!("flipping all discs to {}", status);
        for index in 0..self.len {
            self.fill_module(index, status)?;
        }
        Ok(())
    }

    fn fill_module(&mut self, index: usize, status: bool) -> Result<(), FlipError> {
        for disc in 0..self.chain[index].discs() {
            self.flip(index, disc, status)?;
        }
        Ok(())
    }

    fn show_glyph(&mut self, index: usize, glyph: Glyph) -> Result<(), FlipError> {
        for segment in 0..7 {
            self.flip(index, segment, glyph.segment(segment))?;
        }
        Ok(())
    }

    // One complete flip: charge, select the coil, release, deselect, wait.
    fn flip(&mut self, index: usize, disc: usize, status: bool) -> Result<(), FlipError> {
        let kind = self.chain[index];
        trace!("flip module {} ({:?}) disc {} -> {}", index, kind, disc, status);

        self.charge()?;
        let pulsed = self
            .latch(Some((index, kind.control_bits(disc, status))))
            .and_then(|_| self.release_pulse());
        // never leave a coil selected, not even after a failed pulse: the next charge would
        // otherwise end up in it
        let deselected = self.latch(None);
        pulsed.and(deselected)?;

        if self.flip_delay > 0 {
            self.delay.delay_ms(u16::from(self.flip_delay));
        }

        if status {
            self.state[index] |= 1 << disc;
        } else {
            self.state[index] &= !(1 << disc);
        }
        Ok(())
    }

    // CH is pulled low again whatever happened while charging
    fn charge(&mut self) -> Result<(), FlipError> {
        let charged = FlipError::pin(self.ch.set_high());
        if charged.is_ok() {
            self.delay.delay_ms(self.timing.charge_ms);
        }
        let stopped = FlipError::pin(self.ch.set_low());
        charged.and(stopped)
    }

    fn release_pulse(&mut self) -> Result<(), FlipError> {
        let released = FlipError::pin(self.en.set_high());
        if released.is_ok() {
            self.delay.delay_ms(self.timing.pulse_ms);
        }
        let stopped = FlipError::pin(self.en.set_low());
        released.and(stopped)
    }

    // Shift a frame into the chain and latch it to the register outputs.
    fn latch(&mut self, active: Option<(usize, u16)>) -> Result<(), FlipError> {
        let mut buf = [0u8; MAX_FRAME];
        let bytes = module::frame(&self.chain[..self.len], active, &mut buf);
        FlipError::pin(self.pl.set_low())?;
        let shifted = FlipError::spi(self.spi.write(bytes));
        let latched = FlipError::pin(self.pl.set_high());
        shifted.and(latched)
    }
}
