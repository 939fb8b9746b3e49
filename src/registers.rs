//! Fixed-width registers of the scan engine.
//!
//! The counters live in one packed word so every field has the exact bit
//! width of the hardware register it models. Setters keep only the low bits
//! of the value written, which gives each counter its natural wraparound
//! (`63 + 1 == 0` for the column, `7 + 1 == 0` for the plane, `31 + 1 == 0`
//! for the address).

use bitfield::bitfield;

bitfield! {
    /// 32-bit word holding the scan engine counters.
    ///
    /// The bit layout is as follows:
    /// - Bit 22: Shift clock phase (set while the clock is asserted)
    /// - Bits 21-14: Wait counter
    /// - Bits 13-9: Row-pair address
    /// - Bits 8-6: Bit plane
    /// - Bits 5-0: Column counter
    #[derive(Clone, Copy, Default, PartialEq, Eq)]
    #[repr(transparent)]
    pub(crate) struct Registers(u32);
    impl Debug;
    pub clock_high, set_clock_high: 22;
    pub u8, wait, set_wait: 21, 14;
    pub u8, address, set_address: 13, 9;
    pub u8, plane, set_plane: 8, 6;
    pub u8, column, set_column: 5, 0;
}

impl Registers {
    pub const fn new() -> Self {
        Self(0)
    }
}
