//! # Module types and the shift frame layout
//!
//! Every module in the chain carries one or more shift registers driving the coils of its
//! discs. A disc coil is driven in one direction to show the "set" face and in the other
//! direction to show the "reset" face, so each disc needs two control bits:
//!
//! ```text
//!   bit 2*i     -> set disc i
//!   bit 2*i + 1 -> reset disc i
//! ```
//!
//! The bits of one module form its slot, rounded up to whole bytes and shifted most significant
//! byte first. The chain is a long shift register: the first byte shifted in ends up in the
//! module furthest away from the controller, so the frame is assembled last module first.
//!
//! Only one bit of the whole frame may ever be high during a pulse. The power supply can't
//! drive more than one coil, and driving both directions of the same coil shorts the bridge.

use crate::{MAX_FRAME, MAX_SLOT};

/// Type tag of a module in the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    /// 7-segment digit, segments a..g
    Seg,

    /// two separator dots, top and bottom
    Dots,

    /// two discs in one column
    D2x1,

    /// three discs in one column
    D3x1,

    /// three discs in one row
    D1x3,

    /// seven discs in one row
    D1x7,
}

use ModuleKind::*;

impl ModuleKind {
    /// Alias kept for boards labelled "D7SEG"
    #[allow(non_upper_case_globals)]
    pub const D7Seg: ModuleKind = Seg;

    /// Number of discs on the module
    pub fn discs(self) -> usize {
        match self {
            Seg => 7,
            Dots => 2,
            D2x1 => 2,
            D3x1 => 3,
            D1x3 => 3,
            D1x7 => 7,
        }
    }

    /// Number of bytes this module occupies in the shift frame
    pub fn slot_len(self) -> usize {
        (self.discs() * 2 + 7) / 8
    }

    pub fn is_seven_segment(self) -> bool {
        self == Seg
    }

    /// Returns the slot word that drives a single disc towards `status`.
    ///
    /// The disc index has to be checked by the caller.
    pub fn control_bits(self, disc: usize, status: bool) -> u16 {
        debug_assert!(disc < self.discs());
        let bit = disc * 2 + if status { 0 } else { 1 };
        1 << bit
    }
}

/// Assembles the frame for `chain` into `buf` and returns the used part.
///
/// `active` selects the module whose slot carries `word`, all other slots stay zero. With
/// `None` the result is the all-off frame.
pub fn frame<'b>(
    chain: &[ModuleKind],
    active: Option<(usize, u16)>,
    buf: &'b mut [u8; MAX_FRAME],
) -> &'b [u8] {
    let mut len = 0;
    for (index, kind) in chain.iter().enumerate().rev() {
        let word = match active {
            Some((target, word)) if target == index => word,
            _ => 0,
        };
        let slot = kind.slot_len();
        debug_assert!(slot <= MAX_SLOT);
        for byte in (0..slot).rev() {
            buf[len] = (word >> (byte * 8)) as u8;
            len += 1;
        }
    }
    &buf[..len]
}
