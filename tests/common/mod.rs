//! Recording stand-ins for the HAL, all writing to one shared event log.
#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::spi::Write as SpiWrite;
use embedded_hal::digital::v2::OutputPin;

use flipdisc::FlipDisc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    En(bool),
    Ch(bool),
    Pl(bool),
    Spi(Vec<u8>),
    Delay(u16),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub struct Pin {
    log: Log,
    make: fn(bool) -> Event,
}

impl Pin {
    pub fn new(log: &Log, make: fn(bool) -> Event) -> Self {
        Pin { log: log.clone(), make }
    }
}

impl OutputPin for Pin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Infallible> {
        self.log.borrow_mut().push((self.make)(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.log.borrow_mut().push((self.make)(true));
        Ok(())
    }
}

pub struct Spi(Log);

impl Spi {
    pub fn new(log: &Log) -> Self {
        Spi(log.clone())
    }
}

impl SpiWrite<u8> for Spi {
    type Error = Infallible;

    fn write(&mut self, words: &[u8]) -> Result<(), Infallible> {
        self.0.borrow_mut().push(Event::Spi(words.to_vec()));
        Ok(())
    }
}

pub struct Delay(Log);

impl Delay {
    pub fn new(log: &Log) -> Self {
        Delay(log.clone())
    }
}

impl DelayMs<u16> for Delay {
    fn delay_ms(&mut self, ms: u16) {
        self.0.borrow_mut().push(Event::Delay(ms));
    }
}

/// A pin that can be pulled low but fails to go high
pub struct StuckLowPin {
    log: Log,
    make: fn(bool) -> Event,
}

impl StuckLowPin {
    pub fn new(log: &Log, make: fn(bool) -> Event) -> Self {
        StuckLowPin { log: log.clone(), make }
    }
}

impl OutputPin for StuckLowPin {
    type Error = ();

    fn set_low(&mut self) -> Result<(), ()> {
        self.log.borrow_mut().push((self.make)(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), ()> {
        Err(())
    }
}

/// The last frame shifted into the chain
pub fn last_frame(events: &[Event]) -> Option<Vec<u8>> {
    events.iter().rev().find_map(|e| match e {
        Event::Spi(bytes) => Some(bytes.clone()),
        _ => None,
    })
}

/// A pin whose every operation fails
pub struct BrokenPin;

impl OutputPin for BrokenPin {
    type Error = ();

    fn set_low(&mut self) -> Result<(), ()> {
        Err(())
    }

    fn set_high(&mut self) -> Result<(), ()> {
        Err(())
    }
}

pub type Driver = FlipDisc<Spi, Pin, Pin, Pin, Delay>;

/// Builds a driver on recording peripherals, with the construction events already drained.
pub fn driver() -> (Driver, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let en = Pin::new(&log, Event::En);
    let ch = Pin::new(&log, Event::Ch);
    let pl = Pin::new(&log, Event::Pl);
    let driver = FlipDisc::new(Spi::new(&log), en, ch, pl, Delay::new(&log))
        .expect("recording pins cannot fail");
    log.borrow_mut().clear();
    (driver, log)
}

pub fn take(log: &Log) -> Vec<Event> {
    log.borrow_mut().drain(..).collect()
}

/// The frames latched while EN was pulsed, one per flip
pub fn pulsed_frames(events: &[Event]) -> Vec<Vec<u8>> {
    let mut frames = Vec::new();
    let mut last = None;
    for event in events {
        match event {
            Event::Spi(bytes) => last = Some(bytes.clone()),
            Event::En(true) => frames.push(last.clone().expect("pulse without a frame")),
            _ => {}
        }
    }
    frames
}

/// Number of pulses released
pub fn pulses(events: &[Event]) -> usize {
    events.iter().filter(|e| **e == Event::En(true)).count()
}
