use std::time::Duration;

use crate::config::ConfigError;

/// Cadence of the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerConfig {
    advance_interval: Duration,
    transition_duration: Duration,
}

impl TickerConfig {
    pub const DEFAULT_ADVANCE_INTERVAL: Duration = Duration::from_millis(5000);
    /// Matches the length of the slide animation.
    pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(500);

    /// Build a validated config.
    ///
    /// A zero advance interval is rejected because the engine would have to
    /// fire an unbounded number of timers for a single instant.  A zero
    /// transition duration is fine and swaps items instantly.
    pub fn new(
        advance_interval: Duration,
        transition_duration: Duration,
    ) -> Result<Self, ConfigError> {
        if advance_interval.is_zero() {
            return Err(ConfigError::ZeroAdvanceInterval);
        }
        Ok(Self {
            advance_interval,
            transition_duration,
        })
    }

    pub fn from_millis(advance_ms: u64, transition_ms: u64) -> Result<Self, ConfigError> {
        Self::new(
            Duration::from_millis(advance_ms),
            Duration::from_millis(transition_ms),
        )
    }

    pub fn advance_interval(&self) -> Duration {
        self.advance_interval
    }

    pub fn transition_duration(&self) -> Duration {
        self.transition_duration
    }
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            advance_interval: Self::DEFAULT_ADVANCE_INTERVAL,
            transition_duration: Self::DEFAULT_TRANSITION_DURATION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_five_seconds_and_half_a_second() {
        let config = TickerConfig::default();
        assert_eq!(config.advance_interval(), Duration::from_millis(5000));
        assert_eq!(config.transition_duration(), Duration::from_millis(500));
    }

    #[test]
    fn zero_advance_interval_is_rejected() {
        assert_eq!(
            TickerConfig::from_millis(0, 500),
            Err(ConfigError::ZeroAdvanceInterval)
        );
    }

    #[test]
    fn zero_transition_duration_is_allowed() {
        let config = TickerConfig::from_millis(1000, 0).unwrap();
        assert!(config.transition_duration().is_zero());
    }
}
