//! Driver configuration.
//!
//! None of these settings change the state machine; they only set the timing
//! and the physical line levels.
//!
//! ```rust
//! use hub75_scan::config::ConfigBuilder;
//! use hub75_scan::output::Polarity;
//!
//! let config = ConfigBuilder::new()
//!     .divisor(4)
//!     .polarity(Polarity::ACTIVE_LOW)
//!     .lookup_budget(200)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.refresh_period_base_ticks(), 4 * 41_184);
//! ```

use crate::output::Polarity;

/// Reasons a configuration is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The divisor must be at least 1
    ZeroDivisor,
    /// A lookup budget of 0 cycles can never be met
    ZeroBudget,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroDivisor => f.write_str("clock divisor must be at least 1"),
            ConfigError::ZeroBudget => f.write_str("lookup budget must be at least 1 cycle"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Validated driver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub(crate) divisor: u32,
    pub(crate) polarity: Polarity,
    pub(crate) lookup_budget: Option<u32>,
}

impl Config {
    /// Base ticks per logical tick.
    #[must_use]
    pub fn divisor(&self) -> u32 {
        self.divisor
    }

    /// Physical line levels.
    #[must_use]
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Maximum cycle-counter units one logical tick may take, if enforced.
    #[must_use]
    pub fn lookup_budget(&self) -> Option<u32> {
        self.lookup_budget
    }

    /// Base ticks needed to refresh the whole panel once.
    #[must_use]
    pub fn refresh_period_base_ticks(&self) -> u64 {
        crate::refresh_period_base_ticks(self.divisor)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            divisor: 1,
            polarity: Polarity::ACTIVE_HIGH,
            lookup_budget: None,
        }
    }
}

/// Builder for [`Config`].
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    configuration: Config,
}

impl ConfigBuilder {
    /// Start from the defaults: full speed, active-high lines, no budget.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Base ticks per logical tick.
    #[must_use]
    pub fn divisor(mut self, divisor: u32) -> Self {
        self.configuration.divisor = divisor;
        self
    }

    /// Physical line levels.
    #[must_use]
    pub fn polarity(mut self, polarity: Polarity) -> Self {
        self.configuration.polarity = polarity;
        self
    }

    /// Enforce a per-tick budget, in the units of the
    /// [`crate::hub75::CycleCounter`] passed to
    /// [`crate::hub75::Hub75::base_tick_timed`].
    #[must_use]
    pub fn lookup_budget(mut self, cycles: u32) -> Self {
        self.configuration.lookup_budget = Some(cycles);
        self
    }

    /// Validate and return the configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroDivisor`] for a divisor of 0,
    /// [`ConfigError::ZeroBudget`] for a lookup budget of 0.
    pub fn build(self) -> Result<Config, ConfigError> {
        if self.configuration.divisor == 0 {
            return Err(ConfigError::ZeroDivisor);
        }
        if self.configuration.lookup_budget == Some(0) {
            return Err(ConfigError::ZeroBudget);
        }
        Ok(self.configuration)
    }
}
