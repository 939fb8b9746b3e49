//! Pixel sources feeding the scan engine.
//!
//! The engine asks a [`PixelSource`] for the colours of one column of the
//! active row pair, once per column per bit plane. The source must answer
//! with the same value every time it is asked for the same position while a
//! plane is being shifted out; it never learns which plane is active.

use embedded_graphics::pixelcolor::RgbColor;

use crate::Color;

/// Colours of the two rows lit together by one row-pair address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PixelPair {
    /// Row `address`, driven on r0/g0/b0
    pub top: Color,
    /// Row `address + 32`, driven on r1/g1/b1
    pub bottom: Color,
}

impl PixelPair {
    /// Create a pair from its top and bottom colour.
    #[must_use]
    pub const fn new(top: Color, bottom: Color) -> Self {
        Self { top, bottom }
    }
}

impl Default for PixelPair {
    fn default() -> Self {
        Self::new(Color::BLACK, Color::BLACK)
    }
}

/// Anything that can supply colours for a row pair.
pub trait PixelSource {
    /// Colours at `column` (0..63) of row pair `address` (0..31).
    fn pixel_pair(&self, address: u8, column: u8) -> PixelPair;
}

impl<S: PixelSource + ?Sized> PixelSource for &S {
    fn pixel_pair(&self, address: u8, column: u8) -> PixelPair {
        (**self).pixel_pair(address, column)
    }
}

/// Bit `plane` of an 8-bit intensity.
#[inline]
#[must_use]
pub const fn plane_bit(value: u8, plane: u8) -> bool {
    (value >> plane) & 1 != 0
}

/// The `(r, g, b)` bits `color` contributes to bit plane `plane`.
#[inline]
#[must_use]
pub fn plane_bits(color: Color, plane: u8) -> (bool, bool, bool) {
    (
        plane_bit(color.r(), plane),
        plane_bit(color.g(), plane),
        plane_bit(color.b(), plane),
    )
}

/// Fixed bring-up pattern.
///
/// Red ramps down across the columns on both halves, green and blue ramp
/// with the row-pair address in opposite directions on each half.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TestPattern;

impl PixelSource for TestPattern {
    fn pixel_pair(&self, address: u8, column: u8) -> PixelPair {
        let red = !column.wrapping_mul(4);
        let top = Color::new(red, address.wrapping_mul(4), !address.wrapping_mul(4));
        let bottom = Color::new(red, !address.wrapping_mul(8), address.wrapping_mul(8));
        PixelPair::new(top, bottom)
    }
}

/// The same colour on every pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Solid(pub Color);

impl PixelSource for Solid {
    fn pixel_pair(&self, _address: u8, _column: u8) -> PixelPair {
        PixelPair::new(self.0, self.0)
    }
}
