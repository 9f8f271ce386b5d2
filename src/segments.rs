//! # 7-segment glyphs
//!
//! Segment naming follows the usual layout, bit 0 is segment a:
//!
//! ```text
//!    aaa
//!   f   b
//!   f   b
//!    ggg
//!   e   c
//!   e   c
//!    ddd
//! ```

/// Pattern of lit segments, bit 0 = a ... bit 6 = g
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph(u8);

const DIGITS: [u8; 10] = [
    0b011_1111, // 0
    0b000_0110, // 1
    0b101_1011, // 2
    0b100_1111, // 3
    0b110_0110, // 4
    0b110_1101, // 5
    0b111_1101, // 6
    0b000_0111, // 7
    0b111_1111, // 8
    0b110_1111, // 9
];

impl Glyph {
    /// all segments reset
    pub const BLANK: Glyph = Glyph(0);
    pub const MINUS: Glyph = Glyph(0b100_0000);
    pub const DEGREE: Glyph = Glyph(0b110_0011);

    /// Returns the glyph of a decimal digit, None for anything above 9
    pub fn digit(n: u8) -> Option<Glyph> {
        DIGITS.get(n as usize).map(|bits| Glyph(*bits))
    }

    /// Returns the glyph for a character, if the 7 segments can show it
    pub fn from_char(c: char) -> Option<Glyph> {
        let bits = match c {
            '0'..='9' => DIGITS[c as usize - '0' as usize],
            ' ' => 0x00,
            '-' => 0x40,
            '_' => 0x08,
            '°' => 0x63,
            'A' => 0x77,
            'b' => 0x7c,
            'C' => 0x39,
            'd' => 0x5e,
            'E' => 0x79,
            'F' => 0x71,
            'H' => 0x76,
            'L' => 0x38,
            'n' => 0x54,
            'o' => 0x5c,
            'P' => 0x73,
            'r' => 0x50,
            't' => 0x78,
            'U' => 0x3e,
            'u' => 0x1c,
            _ => return None,
        };
        Some(Glyph(bits))
    }

    /// true if segment `index` (0 = a .. 6 = g) is lit
    pub fn segment(self, index: usize) -> bool {
        index < 7 && self.0 & (1 << index) != 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl From<u8> for Glyph {
    fn from(bits: u8) -> Self {
        Glyph(bits & 0x7f)
    }
}
