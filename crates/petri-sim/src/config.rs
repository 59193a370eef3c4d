//! Simulation configuration, speed presets, and validation.

use std::error::Error;
use std::fmt;
use std::time::Duration;

/// Default grid height.
pub const DEFAULT_ROWS: i32 = 25;
/// Default grid width.
pub const DEFAULT_COLS: i32 = 25;
/// Default tick interval.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(300);

// ── Speed ──────────────────────────────────────────────────────────

/// Named tick-interval presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speed {
    /// One generation per second (1000 ms).
    Slow,
    /// 400 ms per generation.
    Medium,
    /// 30 ms per generation.
    Fast,
}

impl Speed {
    /// The tick interval for this preset.
    pub fn interval(self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(1000),
            Self::Medium => Duration::from_millis(400),
            Self::Fast => Duration::from_millis(30),
        }
    }
}

impl From<Speed> for Duration {
    fn from(speed: Speed) -> Self {
        speed.interval()
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SimConfig::validate()`] or simulation
/// construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Grid rows or columns are zero or negative.
    InvalidDimension {
        /// The configured row count.
        rows: i32,
        /// The configured column count.
        cols: i32,
    },
    /// The tick interval is zero. A zero interval would turn the run loop
    /// into a busy loop with no cancellation window.
    InvalidInterval,
    /// The background tick thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of the spawn failure.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { rows, cols } => {
                write!(f, "grid dimensions must be positive, got {rows}x{cols}")
            }
            Self::InvalidInterval => write!(f, "tick interval must be positive"),
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "tick thread spawn failed: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

// ── SimConfig ──────────────────────────────────────────────────────

/// Complete configuration for constructing a simulation.
///
/// Dimensions are fixed for the lifetime of the simulation; changing them
/// requires building a new one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Grid height. Default: 25.
    pub rows: i32,
    /// Grid width. Default: 25.
    pub cols: i32,
    /// Tick interval for the run loop. Default: 300 ms.
    pub interval: Duration,
    /// RNG seed for deterministic `randomize`.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            interval: DEFAULT_INTERVAL,
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows <= 0 || self.cols <= 0 {
            return Err(ConfigError::InvalidDimension {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.interval.is_zero() {
            return Err(ConfigError::InvalidInterval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = SimConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.rows, 25);
        assert_eq!(cfg.cols, 25);
        assert_eq!(cfg.interval, Duration::from_millis(300));
    }

    #[test]
    fn validate_rejects_nonpositive_dimensions() {
        let cfg = SimConfig {
            rows: 0,
            ..SimConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidDimension { rows: 0, cols: 25 })
        );

        let cfg = SimConfig {
            cols: -4,
            ..SimConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn validate_rejects_zero_interval() {
        let cfg = SimConfig {
            interval: Duration::ZERO,
            ..SimConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidInterval));
    }

    #[test]
    fn speed_presets_match_reference_values() {
        assert_eq!(Speed::Slow.interval(), Duration::from_millis(1000));
        assert_eq!(Speed::Medium.interval(), Duration::from_millis(400));
        assert_eq!(Speed::Fast.interval(), Duration::from_millis(30));
        assert_eq!(Duration::from(Speed::Fast), Duration::from_millis(30));
    }
}
