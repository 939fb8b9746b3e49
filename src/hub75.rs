//! Line driver binding the scan engine to output pins.
//!
//! [`Hub75`] combines a [`ClockDivider`], a [`ScanEngine`] and an [`Outputs`]
//! implementation. Call [`Hub75::base_tick`] once per base-clock period, from
//! a timer interrupt or a tight loop. [`Pins`] drives the 14 lines through
//! `embedded-hal` [`OutputPin`]s; implement [`Outputs`] directly to write a
//! whole GPIO port at once.
//!
//! # Example
//! ```rust,no_run
//! # use core::convert::Infallible;
//! # struct Gpio;
//! # impl embedded_hal::digital::ErrorType for Gpio { type Error = Infallible; }
//! # impl embedded_hal::digital::OutputPin for Gpio {
//! #     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # fn gpio() -> Gpio { Gpio }
//! use hub75_scan::config::ConfigBuilder;
//! use hub75_scan::framebuffer::FrameBuffer;
//! use hub75_scan::hub75::{Hub75, Pins};
//! use hub75_scan::output::Polarity;
//!
//! let pins = Pins::new(
//!     gpio(), gpio(), gpio(), gpio(), gpio(), gpio(), // r0 g0 b0 r1 g1 b1
//!     gpio(), gpio(), gpio(), gpio(), gpio(),         // a0..a4
//!     gpio(), gpio(), gpio(),                         // bl la ck
//! );
//! let config = ConfigBuilder::new()
//!     .polarity(Polarity::ACTIVE_LOW)
//!     .build()
//!     .unwrap();
//! let mut hub75 = Hub75::new(pins, FrameBuffer::new(), config);
//! loop {
//!     hub75.base_tick().unwrap();
//! }
//! ```

use embedded_hal::digital::{OutputPin, PinState};

use crate::config::{Config, ConfigBuilder, ConfigError};
use crate::divider::ClockDivider;
use crate::engine::ScanEngine;
use crate::output::Line;
use crate::source::PixelSource;

/// Error enum for the HUB75 line driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<PE> {
    /// An output pin reported an error
    Pin(PE),

    /// The configuration was rejected
    Config(ConfigError),
}

impl<PE> From<ConfigError> for Error<PE> {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

/// Sink for physical line levels.
///
/// `levels` carries one bit per [`Line`], at [`Line::bit`]; a set bit drives
/// the line high.
pub trait Outputs {
    /// Error reported by the underlying lines
    type Error;

    /// Drive all 14 lines.
    fn write(&mut self, levels: u16) -> Result<(), Self::Error>;

    /// Drive only the five address lines.
    fn write_address(&mut self, levels: u16) -> Result<(), Self::Error>;
}

/// Fourteen `embedded-hal` output pins in [`Line::ALL`] order.
pub struct Pins<P> {
    lines: [P; 14],
}

impl<P: OutputPin> Pins<P> {
    /// Bundle the pins of a HUB75 connector.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        r0: P,
        g0: P,
        b0: P,
        r1: P,
        g1: P,
        b1: P,
        a0: P,
        a1: P,
        a2: P,
        a3: P,
        a4: P,
        blank: P,
        latch: P,
        clock: P,
    ) -> Self {
        Self::from_array([
            r0, g0, b0, r1, g1, b1, a0, a1, a2, a3, a4, blank, latch, clock,
        ])
    }

    /// Pins already ordered like [`Line::ALL`].
    pub fn from_array(lines: [P; 14]) -> Self {
        Self { lines }
    }

    /// Give the pins back.
    pub fn release(self) -> [P; 14] {
        self.lines
    }

    fn drive(&mut self, line: Line, levels: u16) -> Result<(), P::Error> {
        let state = PinState::from(levels & line.mask() != 0);
        self.lines[usize::from(line.bit())].set_state(state)
    }
}

impl<P: OutputPin> Outputs for Pins<P> {
    type Error = P::Error;

    fn write(&mut self, levels: u16) -> Result<(), Self::Error> {
        for line in Line::ALL {
            self.drive(line, levels)?;
        }
        Ok(())
    }

    fn write_address(&mut self, levels: u16) -> Result<(), Self::Error> {
        for line in Line::ADDRESS {
            self.drive(line, levels)?;
        }
        Ok(())
    }
}

/// Free-running cycle counter used to time logical ticks.
pub trait CycleCounter {
    /// Current count; expected to wrap.
    fn cycles(&self) -> u32;
}

impl<F: Fn() -> u32> CycleCounter for F {
    fn cycles(&self) -> u32 {
        self()
    }
}

/// HUB75 panel driver.
pub struct Hub75<O, S> {
    outputs: O,
    engine: ScanEngine<S>,
    divider: ClockDivider,
    config: Config,
    overruns: u32,
}

impl<O: Outputs, S: PixelSource> Hub75<O, S> {
    /// Create a driver at the start of the refresh cycle.
    pub fn new(outputs: O, source: S, config: Config) -> Self {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "hub75: divisor {}, polarity {}, lookup budget {}",
            config.divisor(),
            config.polarity(),
            config.lookup_budget()
        );
        Self {
            outputs,
            engine: ScanEngine::new(source),
            divider: ClockDivider::new(config.divisor()),
            config,
            overruns: 0,
        }
    }

    /// Create a driver from an unvalidated configuration.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the builder rejects its settings.
    pub fn from_builder(
        outputs: O,
        source: S,
        builder: ConfigBuilder,
    ) -> Result<Self, Error<O::Error>> {
        let config = builder.build()?;
        Ok(Self::new(outputs, source, config))
    }

    /// Account for one base-clock tick.
    ///
    /// On a logical tick the engine advances and all lines are written;
    /// otherwise only the address lines are re-driven with the address of the
    /// last logical tick. Returns whether a logical tick happened.
    ///
    /// # Errors
    ///
    /// [`Error::Pin`] if writing a line fails.
    pub fn base_tick(&mut self) -> Result<bool, Error<O::Error>> {
        let polarity = self.config.polarity();
        if self.divider.tick() {
            let word = self.engine.tick();
            self.outputs
                .write(word.levels(polarity))
                .map_err(Error::Pin)?;
            Ok(true)
        } else {
            let word = self.engine.lines();
            self.outputs
                .write_address(word.levels(polarity))
                .map_err(Error::Pin)?;
            Ok(false)
        }
    }

    /// [`Hub75::base_tick`], checking logical ticks against the configured
    /// lookup budget.
    ///
    /// A tick over budget is a timing violation: it panics in builds with
    /// debug assertions and is counted in [`Hub75::overruns`] otherwise.
    ///
    /// # Errors
    ///
    /// [`Error::Pin`] if writing a line fails.
    pub fn base_tick_timed<C: CycleCounter>(
        &mut self,
        counter: &C,
    ) -> Result<bool, Error<O::Error>> {
        let start = counter.cycles();
        let fired = self.base_tick()?;
        if let (true, Some(budget)) = (fired, self.config.lookup_budget()) {
            let elapsed = counter.cycles().wrapping_sub(start);
            if elapsed > budget {
                self.overruns = self.overruns.saturating_add(1);
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "hub75: tick took {} cycles, budget {} ({} overruns)",
                    elapsed,
                    budget,
                    self.overruns
                );
                debug_assert!(
                    elapsed <= budget,
                    "logical tick took {} cycles, over the lookup budget of {}",
                    elapsed,
                    budget
                );
            }
        }
        Ok(fired)
    }

    /// Run `base_ticks` base-clock ticks back to back.
    ///
    /// # Errors
    ///
    /// [`Error::Pin`] on the first failed line write.
    pub fn run(&mut self, base_ticks: u32) -> Result<(), Error<O::Error>> {
        for _ in 0..base_ticks {
            self.base_tick()?;
        }
        Ok(())
    }
}

impl<O, S> Hub75<O, S> {
    /// The scan engine.
    pub fn engine(&self) -> &ScanEngine<S> {
        &self.engine
    }

    /// Mutable access to the pixel source.
    pub fn source_mut(&mut self) -> &mut S {
        self.engine.source_mut()
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Logical ticks that exceeded the lookup budget.
    pub fn overruns(&self) -> u32 {
        self.overruns
    }

    /// Give back the outputs and the pixel source.
    pub fn release(self) -> (O, S) {
        (self.outputs, self.engine.into_source())
    }
}
