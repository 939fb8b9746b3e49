//! RGB888 framebuffer for a 64 × 64 HUB75 panel.
//!
//! The buffer stores one full colour per pixel and is sliced into bit planes
//! by the scan engine while it shifts the panel, so drawing never has to know
//! about BCM. Row pair `a` maps to rows `a` (top half) and `a + 32` (bottom
//! half).
//!
//! # Example
//! ```rust
//! use embedded_graphics::pixelcolor::RgbColor;
//! use embedded_graphics::prelude::*;
//! use embedded_graphics::primitives::{Circle, PrimitiveStyle, Rectangle};
//! use hub75_scan::framebuffer::FrameBuffer;
//! use hub75_scan::Color;
//!
//! let mut framebuffer = FrameBuffer::new();
//!
//! // Draw a red rectangle
//! Rectangle::new(Point::new(10, 10), Size::new(20, 20))
//!     .into_styled(PrimitiveStyle::with_fill(Color::RED))
//!     .draw(&mut framebuffer)
//!     .unwrap();
//!
//! // Draw a blue circle
//! Circle::new(Point::new(40, 20), 10)
//!     .into_styled(PrimitiveStyle::with_fill(Color::BLUE))
//!     .draw(&mut framebuffer)
//!     .unwrap();
//! ```

use core::convert::Infallible;

use embedded_graphics::pixelcolor::RgbColor;
use embedded_graphics::prelude::{OriginDimensions, Point, Size};

use crate::source::{PixelPair, PixelSource};
use crate::{Color, COLUMNS, ROWS, ROW_PAIRS};

/// Full-colour pixel store for one panel.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [[Color; COLUMNS]; ROWS],
}

impl FrameBuffer {
    /// Create a framebuffer with every pixel black.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pixels: [[Color::BLACK; COLUMNS]; ROWS],
        }
    }

    /// Set every pixel to black.
    pub fn erase(&mut self) {
        self.fill(Color::BLACK);
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Color) {
        for row in &mut self.pixels {
            row.fill(color);
        }
    }

    /// Set a pixel in the framebuffer. Points outside the panel are ignored.
    /// # Example
    /// ```rust
    /// use embedded_graphics::prelude::*;
    /// use hub75_scan::framebuffer::FrameBuffer;
    /// use hub75_scan::Color;
    ///
    /// let mut framebuffer = FrameBuffer::new();
    /// framebuffer.set_pixel(Point::new(10, 10), Color::RED);
    /// assert_eq!(framebuffer.pixel(Point::new(10, 10)), Some(Color::RED));
    /// ```
    pub fn set_pixel(&mut self, p: Point, color: Color) {
        if p.x < 0 || p.y < 0 {
            return;
        }
        self.set_pixel_internal(p.x as usize, p.y as usize, color);
    }

    /// Colour at `p`, or `None` outside the panel.
    #[must_use]
    pub fn pixel(&self, p: Point) -> Option<Color> {
        if p.x < 0 || p.y < 0 {
            return None;
        }
        self.pixels
            .get(p.y as usize)
            .and_then(|row| row.get(p.x as usize))
            .copied()
    }

    fn set_pixel_internal(&mut self, x: usize, y: usize, color: Color) {
        if x >= COLUMNS || y >= ROWS {
            return;
        }
        self.pixels[y][x] = color;
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelSource for FrameBuffer {
    fn pixel_pair(&self, address: u8, column: u8) -> PixelPair {
        let row = usize::from(address) % ROW_PAIRS;
        let col = usize::from(column) % COLUMNS;
        PixelPair::new(self.pixels[row][col], self.pixels[row + ROW_PAIRS][col])
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(COLUMNS as u32, ROWS as u32)
    }
}

impl embedded_graphics::draw_target::DrawTarget for FrameBuffer {
    type Color = Color;

    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = embedded_graphics::Pixel<Self::Color>>,
    {
        for pixel in pixels {
            self.set_pixel(pixel.0, pixel.1);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

impl core::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("size", &core::mem::size_of_val(&self.pixels))
            .field("rows", &ROWS)
            .field("cols", &COLUMNS)
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FrameBuffer {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "FrameBuffer<{}, {}>", ROWS, COLUMNS);
        defmt::write!(f, " size: {}", core::mem::size_of_val(&self.pixels));
    }
}
