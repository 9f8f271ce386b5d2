//! # Driver for daisy-chained flip-disc displays
//!
//! Flip-disc modules (7-segment digits, separator dots and small indicator columns/rows) are
//! chained through shift registers and powered by a pulse shaper power supply which first
//! charges its capacitors (CH line) and then releases one short pulse through the selected coil
//! (EN line). The shift registers are loaded over SPI and latched with the PL line.
//!
//! Typical use:
//!  - FlipDisc::new() with an SPI (or BitBangSpi), the EN, CH and PL pins and a delay
//!  - FlipDisc::init() to declare the modules of the chain, in wiring order
//!  - test(), all(), clear(), seg(), to_seg(), dot(), display_2x1() ... to flip discs
//!
//! With the "textmode" feature the driver also implements core::fmt::Write, so write!() puts
//! text on the 7-segment modules.
#![cfg_attr(not(test), no_std)]

extern crate embedded_hal as hal;

pub mod display;
pub mod dummypins;
pub mod error;
pub mod module;
pub mod segments;
pub mod spi;

#[cfg(feature = "textmode")]
pub mod textmode;

/// Maximum number of modules in one chain
pub const MAX_MODULES: usize = 8;

/// Maximum slot size of a single module in bytes
pub const MAX_SLOT: usize = 2;

/// Size of the largest possible shift frame
pub const MAX_FRAME: usize = MAX_MODULES * MAX_SLOT;

pub use crate::display::{FlipDisc, PulseTiming};
pub use crate::error::FlipError;
pub use crate::module::ModuleKind;
pub use crate::segments::Glyph;
