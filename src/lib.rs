//! Scan engine for HUB75 LED matrix displays.
//!
//! ## How HUB75 LED Displays Work
//!
//! HUB75 RGB LED matrix panels are scanned, time-multiplexed displays that behave like a long
//! daisy-chained shift register rather than a random-access framebuffer.
//!
//! ### Signal names
//! - **R0 G0 B0 / R1 G1 B1** – Serial colour data for the upper and lower halves of the active scan line
//! - **CK** – Shift-register clock; every pulse pushes the six colour bits one pixel along the chain
//! - **LA** – Latch; copies the shift-register contents to the LED drivers for the selected row pair
//! - **BL** – Blanking (the panel's OE line): LEDs are dark while blanking is asserted
//! - **A0 … A4** – Row-address select lines (choose which pair of rows is lit)
//!
//! ### Refresh sequence driven by this crate
//! The [`engine::ScanEngine`] advances once per logical tick through three stages:
//! 1. **Transmit** – blanking is asserted and the 64 columns of the current bit plane are shifted
//!    in, two ticks per column (data setup with the clock asserted, then clock release).
//! 2. **Latch** – a single tick with the latch asserted while the panel is still blanked.
//! 3. **Display** – blanking is released and the row pair stays lit for `2^plane` ticks.
//!
//! After the last of the 8 planes the row address advances; after 32 row pairs the whole
//! panel has been refreshed once and the cycle repeats.
//!
//! ### Brightness and colour depth (Binary Code Modulation)
//! - Full colour is achieved using **Binary Code Modulation (BCM)**, also known as
//!   *Bit-Angle Modulation (BAM)*. Each bit-plane is displayed for a period proportional to its
//!   binary weight (1, 2, 4, 8 …), yielding 256 intensity levels per channel with 8 planes.
//!   See [Batsocks – LED dimming using Binary Code Modulation](https://www.batsocks.co.uk/readme/art_bcm_1.htm)
//!   for a deeper explanation.
//! - Plane `k` carries bit `k` of every channel's 8-bit intensity.
//!
//! ### Timing
//! Correctness is defined tick for tick. Call [`hub75::Hub75::base_tick`] from a timer interrupt or
//! a bare-metal loop at a fixed rate; the configured divisor turns base ticks into logical ticks.
//! A general purpose OS scheduler cannot guarantee that and produces visible flicker.
//! Stopping the ticks freezes the panel in whatever stage it was in, lit or blanked.
//!
//! ## Pixel Sources
//!
//! The engine never decides what to draw. It asks a [`source::PixelSource`] for the two colours of
//! every column once per bit plane:
//!
//! 1. [`framebuffer::FrameBuffer`] – a 64 × 64 RGB888 canvas implementing
//!    `embedded-graphics` [`DrawTarget`](embedded_graphics::draw_target::DrawTarget)
//! 2. [`source::TestPattern`] – a fixed gradient pattern for bring-up
//! 3. [`source::Solid`] – one colour everywhere
//!
//! ## Available Feature Flags
//!
//! ### `defmt` Feature
//! Implements `defmt::Format` for the public types and enables `defmt` log output from the
//! line driver (configuration summary, lookup budget overruns).
#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use embedded_graphics::pixelcolor::Rgb888;

pub mod config;
pub mod divider;
pub mod engine;
pub mod framebuffer;
pub mod hub75;
pub mod output;
mod registers;
pub mod source;

/// Color type used by pixel sources
pub type Color = Rgb888;

/// Number of columns clocked into the panel per row pair
pub const COLUMNS: usize = 64;

/// Number of physical rows on the panel
pub const ROWS: usize = 64;

/// Number of row pairs scanned by the address lines
pub const ROW_PAIRS: usize = compute_rows(ROWS);

/// Number of BCM bit planes per row pair
pub const PLANES: u8 = 8;

/// Logical ticks spent shifting one bit plane into the panel
pub const TRANSMIT_TICKS: u32 = 2 * COLUMNS as u32;

/// Logical ticks spent latching one bit plane
pub const LATCH_TICKS: u32 = 1;

/// Computes the number of row pairs for a panel with `rows` physical rows
///
/// # Arguments
///
/// * `rows` - Total number of rows in the display
///
/// # Returns
///
/// Number of row pairs selected through the address lines
#[must_use]
pub const fn compute_rows(rows: usize) -> usize {
    rows / 2
}

/// Number of display ticks bit plane `plane` is lit for.
#[must_use]
pub const fn dwell_ticks(plane: u8) -> u32 {
    1 << plane
}

/// Computes the total display ticks of one BCM cycle with `bits` planes
///
/// # Returns
///
/// `2^bits - 1`, the sum of all plane weights
#[must_use]
pub const fn compute_display_ticks(bits: u8) -> u32 {
    (1u32 << bits) - 1
}

/// Logical ticks needed to show all 8 planes of one row pair.
#[must_use]
pub const fn row_pair_ticks() -> u32 {
    PLANES as u32 * (TRANSMIT_TICKS + LATCH_TICKS) + compute_display_ticks(PLANES)
}

/// Logical ticks needed to refresh every row pair once.
#[must_use]
pub const fn refresh_period_ticks() -> u32 {
    ROW_PAIRS as u32 * row_pair_ticks()
}

/// Base-clock ticks needed to refresh every row pair once at the given divisor.
#[must_use]
pub const fn refresh_period_base_ticks(divisor: u32) -> u64 {
    refresh_period_ticks() as u64 * divisor as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::RgbColor;

    #[test]
    fn test_compute_rows() {
        assert_eq!(compute_rows(64), 32);
        assert_eq!(compute_rows(32), 16);
        assert_eq!(ROW_PAIRS, 32);
    }

    #[test]
    fn test_dwell_ticks_are_binary_weighted() {
        let expected = [1, 2, 4, 8, 16, 32, 64, 128];
        for plane in 0..PLANES {
            assert_eq!(dwell_ticks(plane), expected[plane as usize]);
        }
    }

    #[test]
    fn test_compute_display_ticks() {
        assert_eq!(compute_display_ticks(1), 1);
        assert_eq!(compute_display_ticks(4), 15);
        assert_eq!(compute_display_ticks(8), 255);

        let sum: u32 = (0..PLANES).map(dwell_ticks).sum();
        assert_eq!(compute_display_ticks(PLANES), sum);
    }

    #[test]
    fn test_refresh_period() {
        assert_eq!(TRANSMIT_TICKS, 128);
        assert_eq!(row_pair_ticks(), 8 * 128 + 8 + 255);
        assert_eq!(row_pair_ticks(), 1287);
        assert_eq!(refresh_period_ticks(), 32 * 1287);
        assert_eq!(refresh_period_ticks(), 41_184);
    }

    #[test]
    fn test_refresh_period_scales_with_divisor() {
        assert_eq!(refresh_period_base_ticks(1), 41_184);
        assert_eq!(refresh_period_base_ticks(3), 3 * 41_184);
        assert_eq!(refresh_period_base_ticks(1000), 41_184_000);
    }

    #[test]
    fn test_color_type_alias() {
        let red: Color = Color::RED;
        assert_eq!(red, Rgb888::RED);
        assert_eq!((red.r(), red.g(), red.b()), (255, 0, 0));
    }
}
