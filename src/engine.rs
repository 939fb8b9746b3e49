//! The scan engine: sequencer, BCM scheduler and scan-address counter.
//!
//! [`ScanEngine::tick`] advances the refresh by exactly one logical tick and
//! returns the [`OutputWord`] to drive for that tick. One tick runs exactly one
//! [`Stage`] branch; all register updates of that branch are computed from the
//! values at the start of the tick and committed together at its end.
//!
//! # Refresh cycle
//!
//! For every row pair and every bit plane `k` (0 = least significant):
//!
//! | Stage      | Ticks  | Blanking | Latch | Shift clock              |
//! |------------|--------|----------|-------|--------------------------|
//! | `Transmit` | 128    | asserted | off   | toggles once per tick    |
//! | `Latch`    | 1      | asserted | on    | off                      |
//! | `Display`  | `2^k`  | released | off   | off                      |
//!
//! After plane 7 the row-pair address advances, so each address is held
//! across all 8 planes. A full panel refresh takes
//! [`crate::refresh_period_ticks`] logical ticks.
//!
//! # Example
//! ```rust
//! use hub75_scan::engine::{ScanEngine, Stage};
//! use hub75_scan::source::TestPattern;
//!
//! let mut engine = ScanEngine::new(TestPattern);
//!
//! // shift all 64 columns of plane 0
//! for _ in 0..hub75_scan::TRANSMIT_TICKS {
//!     let word = engine.tick();
//!     assert!(word.blank());
//! }
//! assert_eq!(engine.stage(), Stage::Latch);
//! assert!(engine.tick().latch());
//!
//! // plane 0 is lit for a single tick
//! assert!(!engine.tick().blank());
//! assert_eq!(engine.stage(), Stage::Transmit);
//! assert_eq!(engine.plane(), 1);
//! ```

use crate::output::OutputWord;
use crate::registers::Registers;
use crate::source::{plane_bits, PixelSource};
use crate::COLUMNS;

const LAST_COLUMN: u8 = (COLUMNS - 1) as u8;
const LAST_PLANE: u8 = crate::PLANES - 1;

/// Phase of the refresh cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    /// Shifting the columns of the current plane, panel blanked
    #[default]
    Transmit,
    /// Single-tick latch pulse, panel blanked
    Latch,
    /// Row pair lit for the dwell time of the current plane
    Display,
}

/// Register contents of a [`ScanEngine`] between two ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanState {
    /// Current stage
    pub stage: Stage,
    /// Column being shifted (0..63)
    pub column: u8,
    /// Active bit plane (0..7)
    pub plane: u8,
    /// Active row-pair address (0..31)
    pub address: u8,
    /// Remaining display ticks of the current plane
    pub wait: u8,
    /// `true` when the shift clock is asserted and the next transmit tick
    /// releases it
    pub clock_high: bool,
}

/// Tick-driven HUB75 refresh state machine.
///
/// The engine owns its pixel source; use [`ScanEngine::source_mut`] to update
/// the picture between ticks.
#[derive(Clone, Debug)]
pub struct ScanEngine<S> {
    stage: Stage,
    regs: Registers,
    lines: OutputWord,
    source: S,
}

impl<S: PixelSource> ScanEngine<S> {
    /// Create an engine at the start of the refresh cycle: transmitting
    /// column 0 of plane 0 for row pair 0.
    pub fn new(source: S) -> Self {
        Self::with_state(source, ScanState::default())
    }

    /// Create an engine with the given register contents.
    ///
    /// Values wider than a register keep only their low bits.
    pub fn with_state(source: S, state: ScanState) -> Self {
        let mut regs = Registers::new();
        regs.set_column(state.column);
        regs.set_plane(state.plane);
        regs.set_address(state.address);
        regs.set_wait(state.wait);
        regs.set_clock_high(state.clock_high);
        let mut lines = OutputWord::new();
        lines.set_blank(state.stage != Stage::Display);
        lines.set_clock(state.clock_high);
        Self {
            stage: state.stage,
            regs,
            lines,
            source,
        }
    }

    /// Advance one logical tick and return the lines to drive during it.
    pub fn tick(&mut self) -> OutputWord {
        let current = self.regs;
        let mut next = current;
        let mut out = self.lines;

        // address lines follow the register as it is during this tick
        out.set_address(current.address());

        let stage = match self.stage {
            Stage::Transmit => {
                out.set_blank(true);
                out.set_latch(false);
                if current.clock_high() {
                    out.set_clock(false);
                    next.set_clock_high(false);
                    next.set_column(current.column() + 1);
                    if current.column() == LAST_COLUMN {
                        next.set_wait(1 << current.plane());
                        Stage::Latch
                    } else {
                        Stage::Transmit
                    }
                } else {
                    let plane = current.plane();
                    let pair = self.source.pixel_pair(current.address(), current.column());
                    let (r, g, b) = plane_bits(pair.top, plane);
                    out.set_color0(r, g, b);
                    let (r, g, b) = plane_bits(pair.bottom, plane);
                    out.set_color1(r, g, b);
                    out.set_clock(true);
                    next.set_clock_high(true);
                    Stage::Transmit
                }
            }
            Stage::Latch => {
                out.set_blank(true);
                out.set_latch(true);
                out.set_clock(false);
                Stage::Display
            }
            Stage::Display => {
                out.set_blank(false);
                out.set_latch(false);
                out.set_clock(false);
                if current.wait() <= 1 {
                    next.set_wait(0);
                    if current.plane() == LAST_PLANE {
                        next.set_address(current.address() + 1);
                    }
                    next.set_plane(current.plane() + 1);
                    Stage::Transmit
                } else {
                    next.set_wait(current.wait() - 1);
                    Stage::Display
                }
            }
        };

        self.stage = stage;
        self.regs = next;
        self.lines = out;
        out
    }
}

impl<S> ScanEngine<S> {
    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Column being shifted.
    pub fn column(&self) -> u8 {
        self.regs.column()
    }

    /// Active bit plane.
    pub fn plane(&self) -> u8 {
        self.regs.plane()
    }

    /// Active row-pair address.
    pub fn address(&self) -> u8 {
        self.regs.address()
    }

    /// Remaining display ticks of the current plane.
    pub fn wait(&self) -> u8 {
        self.regs.wait()
    }

    /// Snapshot of all registers.
    pub fn state(&self) -> ScanState {
        ScanState {
            stage: self.stage,
            column: self.regs.column(),
            plane: self.regs.plane(),
            address: self.regs.address(),
            wait: self.regs.wait(),
            clock_high: self.regs.clock_high(),
        }
    }

    /// Lines as driven by the most recent tick.
    pub fn lines(&self) -> OutputWord {
        self.lines
    }

    /// The pixel source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the pixel source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Consume the engine and return its pixel source.
    pub fn into_source(self) -> S {
        self.source
    }
}
