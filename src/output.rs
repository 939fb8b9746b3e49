//! Snapshot of the HUB75 output lines.
//!
//! Every logical tick the [`crate::engine::ScanEngine`] produces one
//! [`OutputWord`]: the *logical* state of all 14 lines, where `true` means
//! asserted (colour on, blanking active, latch active, clock active). The
//! physical level of each line is only decided when the word is written out,
//! through a [`Polarity`] mask.

use bitfield::bitfield;

bitfield! {
    /// 16-bit word representing the logical state of every output line.
    ///
    /// The bit layout is as follows:
    /// - Bit 13: Shift clock
    /// - Bit 12: Latch
    /// - Bit 11: Blanking
    /// - Bits 10-6: Row address (a4..a0)
    /// - Bit 5: Blue channel for the bottom half
    /// - Bit 4: Green channel for the bottom half
    /// - Bit 3: Red channel for the bottom half
    /// - Bit 2: Blue channel for the top half
    /// - Bit 1: Green channel for the top half
    /// - Bit 0: Red channel for the top half
    #[derive(Clone, Copy, Default, PartialEq, Eq)]
    #[repr(transparent)]
    pub struct OutputWord(u16);
    impl Debug;
    /// Shift clock asserted
    pub clock, set_clock: 13;
    /// Latch asserted
    pub latch, set_latch: 12;
    /// Blanking asserted (panel dark)
    pub blank, set_blank: 11;
    /// Row-pair address driven on a0..a4
    pub u8, address, set_address: 10, 6;
    /// Bottom half blue
    pub blu1, set_blu1: 5;
    /// Bottom half green
    pub grn1, set_grn1: 4;
    /// Bottom half red
    pub red1, set_red1: 3;
    /// Top half blue
    pub blu0, set_blu0: 2;
    /// Top half green
    pub grn0, set_grn0: 1;
    /// Top half red
    pub red0, set_red0: 0;
}

impl OutputWord {
    /// All lines deasserted, address 0.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Raw logical bits.
    #[must_use]
    pub const fn bits(&self) -> u16 {
        self.0
    }

    /// Set the three top-half colour bits.
    pub fn set_color0(&mut self, r: bool, g: bool, b: bool) {
        self.set_red0(r);
        self.set_grn0(g);
        self.set_blu0(b);
    }

    /// Set the three bottom-half colour bits.
    pub fn set_color1(&mut self, r: bool, g: bool, b: bool) {
        self.set_red1(r);
        self.set_grn1(g);
        self.set_blu1(b);
    }

    /// Logical state of a single line.
    #[must_use]
    pub fn line(&self, line: Line) -> bool {
        self.0 & line.mask() != 0
    }

    /// Physical levels of all lines after applying `polarity`; `true` bits are
    /// driven high.
    #[must_use]
    pub const fn levels(&self, polarity: Polarity) -> u16 {
        (self.0 ^ polarity.0) & Line::ALL_MASK
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for OutputWord {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "OutputWord addr: {}, bl: {}, la: {}, ck: {}, rgb0: {}{}{}, rgb1: {}{}{}",
            self.address(),
            self.blank(),
            self.latch(),
            self.clock(),
            u8::from(self.red0()),
            u8::from(self.grn0()),
            u8::from(self.blu0()),
            u8::from(self.red1()),
            u8::from(self.grn1()),
            u8::from(self.blu1()),
        );
    }
}

/// One of the 14 output lines of a HUB75 connector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum Line {
    R0,
    G0,
    B0,
    R1,
    G1,
    B1,
    A0,
    A1,
    A2,
    A3,
    A4,
    Blank,
    Latch,
    Clock,
}

impl Line {
    /// Every line in bit order of [`OutputWord`].
    pub const ALL: [Line; 14] = [
        Line::R0,
        Line::G0,
        Line::B0,
        Line::R1,
        Line::G1,
        Line::B1,
        Line::A0,
        Line::A1,
        Line::A2,
        Line::A3,
        Line::A4,
        Line::Blank,
        Line::Latch,
        Line::Clock,
    ];

    /// The five address lines, a0 first.
    pub const ADDRESS: [Line; 5] = [Line::A0, Line::A1, Line::A2, Line::A3, Line::A4];

    const ALL_MASK: u16 = (1 << 14) - 1;

    /// Bit position of this line in an [`OutputWord`].
    #[must_use]
    pub const fn bit(self) -> u8 {
        self as u8
    }

    /// Single-bit mask of this line in an [`OutputWord`].
    #[must_use]
    pub const fn mask(self) -> u16 {
        1 << self.bit()
    }
}

/// Mapping from logical to physical line levels.
///
/// Each set bit inverts the line at the same position of [`OutputWord`], so
/// an asserted signal is driven low on that line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Polarity(u16);

impl Polarity {
    /// Every line active high: the standard HUB75 binding, where OE high blanks.
    pub const ACTIVE_HIGH: Polarity = Polarity(0);

    /// Every line active low.
    pub const ACTIVE_LOW: Polarity = Polarity(Line::ALL_MASK);

    /// Build a polarity from the lines that are active low.
    #[must_use]
    pub const fn active_low(lines: &[Line]) -> Self {
        let mut mask = 0;
        let mut i = 0;
        while i < lines.len() {
            mask |= lines[i].mask();
            i += 1;
        }
        Polarity(mask)
    }

    /// Whether `line` is active low.
    #[must_use]
    pub const fn is_inverted(&self, line: Line) -> bool {
        self.0 & line.mask() != 0
    }

    /// Raw inversion mask.
    #[must_use]
    pub const fn mask(&self) -> u16 {
        self.0
    }
}

impl Default for Polarity {
    fn default() -> Self {
        Self::ACTIVE_HIGH
    }
}
