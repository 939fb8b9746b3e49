//! Base-clock divider.
//!
//! The scan engine advances once per *logical* tick. A [`ClockDivider`] sits
//! between the physical driving clock and the engine and lets one logical tick
//! span several base ticks without any change to the state machine.

/// Counts base-clock ticks down to logical ticks.
///
/// With a divisor of `n` every `n`th call to [`ClockDivider::tick`] returns
/// `true`. A divisor of 1 runs the engine at the full base rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockDivider {
    timer: u32,
    divisor: u32,
}

impl ClockDivider {
    /// Create a divider firing every `divisor` base ticks.
    ///
    /// A divisor of 0 is treated as 1; [`crate::config::ConfigBuilder`]
    /// rejects it before it gets here.
    #[must_use]
    pub const fn new(divisor: u32) -> Self {
        Self {
            timer: 0,
            divisor: if divisor == 0 { 1 } else { divisor },
        }
    }

    /// The configured divisor.
    #[must_use]
    pub const fn divisor(&self) -> u32 {
        self.divisor
    }

    /// Base ticks counted since the last logical tick.
    #[must_use]
    pub const fn timer(&self) -> u32 {
        self.timer
    }

    /// Account for one base tick; returns `true` when a logical tick fires.
    #[inline]
    pub fn tick(&mut self) -> bool {
        self.timer += 1;
        if self.timer >= self.divisor {
            self.timer = 0;
            true
        } else {
            false
        }
    }
}

impl Default for ClockDivider {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec::Vec;

    use super::*;

    #[test]
    fn test_full_speed_fires_every_tick() {
        let mut divider = ClockDivider::new(1);
        for _ in 0..10 {
            assert!(divider.tick());
            assert_eq!(divider.timer(), 0);
        }
    }

    #[test]
    fn test_divisor_spacing() {
        let mut divider = ClockDivider::new(4);
        let fired: Vec<usize> = (0..12).filter(|_| divider.tick()).collect();
        assert_eq!(fired.len(), 3);

        let mut divider = ClockDivider::new(4);
        let pattern: Vec<bool> = (0..8).map(|_| divider.tick()).collect();
        assert_eq!(
            pattern,
            [false, false, false, true, false, false, false, true]
        );
    }

    #[test]
    fn test_timer_resets_on_fire() {
        let mut divider = ClockDivider::new(3);
        divider.tick();
        divider.tick();
        assert_eq!(divider.timer(), 2);
        assert!(divider.tick());
        assert_eq!(divider.timer(), 0);
    }

    #[test]
    fn test_zero_divisor_is_full_speed() {
        let mut divider = ClockDivider::new(0);
        assert_eq!(divider.divisor(), 1);
        assert!(divider.tick());
    }

    #[test]
    fn test_default() {
        assert_eq!(ClockDivider::default(), ClockDivider::new(1));
    }
}
