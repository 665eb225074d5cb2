use serde::{Deserialize, Serialize};

/// Durations and cycle policy for one engine instance.
///
/// Durations are stored in minutes; the engine itself counts in seconds.
/// Validation (rejecting zero values) happens at the configuration loader,
/// not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Work phase duration in minutes.
    pub work_min: u64,
    /// Short break duration in minutes.
    pub short_break_min: u64,
    /// Long break duration in minutes.
    pub long_break_min: u64,
    /// Completed work phases before a long break is granted.
    pub cycles_until_long_break: u32,
    /// Whether long breaks are granted at all.
    pub long_break_enabled: bool,
}

impl TimerConfig {
    /// Work duration in seconds.
    ///
    /// Uses saturating arithmetic to prevent overflow with large values.
    pub fn work_secs(&self) -> u64 {
        self.work_min.saturating_mul(60)
    }

    /// Short break duration in seconds.
    pub fn short_break_secs(&self) -> u64 {
        self.short_break_min.saturating_mul(60)
    }

    /// Long break duration in seconds.
    pub fn long_break_secs(&self) -> u64 {
        self.long_break_min.saturating_mul(60)
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_min: 25,
            short_break_min: 5,
            long_break_min: 15,
            cycles_until_long_break: 4,
            long_break_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_durations() {
        let cfg = TimerConfig::default();
        assert_eq!(cfg.work_secs(), 25 * 60);
        assert_eq!(cfg.short_break_secs(), 5 * 60);
        assert_eq!(cfg.long_break_secs(), 15 * 60);
        assert_eq!(cfg.cycles_until_long_break, 4);
        assert!(cfg.long_break_enabled);
    }

    #[test]
    fn second_conversion_saturates() {
        let cfg = TimerConfig {
            work_min: u64::MAX,
            ..TimerConfig::default()
        };
        assert_eq!(cfg.work_secs(), u64::MAX);
    }
}
