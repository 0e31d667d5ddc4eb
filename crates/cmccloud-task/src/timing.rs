//! Timing profiles for poll-to-completion runs

use crate::error::{Result, TaskError};
use std::str::FromStr;
use std::time::Duration;

/// Delay, poll interval and overall budget of one wait
///
/// The budget is measured from the start of the run, so it includes the
/// initial delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingProfile {
    /// Wait before the first refresh
    pub initial_delay: Duration,

    /// Spacing between refreshes while the task is pending
    pub poll_interval: Duration,

    /// Total budget of the run
    pub timeout: Duration,
}

impl TimingProfile {
    /// Quick metadata updates (rename, rule edits)
    pub const SHORT: TimingProfile = TimingProfile::from_secs(1, 1, 60);
    /// Network attachments, deletes of light resources
    pub const MEDIUM: TimingProfile = TimingProfile::from_secs(3, 3, 5 * 60);
    /// Server power actions, resizes, creation
    pub const LONG: TimingProfile = TimingProfile::from_secs(10, 20, 20 * 60);
    /// Snapshot restore
    pub const SUPER_LONG: TimingProfile = TimingProfile::from_secs(20, 20, 5 * 60 * 60);
    /// Snapshot creation
    pub const HALF_DAY: TimingProfile = TimingProfile::from_secs(60, 60, 12 * 60 * 60);
    pub const ONE_DAY: TimingProfile = TimingProfile::from_secs(60, 60, 24 * 60 * 60);

    /// Named presets, in increasing order of budget
    pub const PRESETS: [(&'static str, TimingProfile); 6] = [
        ("short", Self::SHORT),
        ("medium", Self::MEDIUM),
        ("long", Self::LONG),
        ("super-long", Self::SUPER_LONG),
        ("half-day", Self::HALF_DAY),
        ("one-day", Self::ONE_DAY),
    ];

    /// Build a profile, rejecting a zero budget
    pub fn new(
        initial_delay: Duration,
        poll_interval: Duration,
        timeout: Duration,
    ) -> Result<Self> {
        if timeout.is_zero() {
            return Err(TaskError::InvalidTiming(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            initial_delay,
            poll_interval,
            timeout,
        })
    }

    const fn from_secs(delay: u64, interval: u64, timeout: u64) -> Self {
        Self {
            initial_delay: Duration::from_secs(delay),
            poll_interval: Duration::from_secs(interval),
            timeout: Duration::from_secs(timeout),
        }
    }

    /// Same profile with a different budget
    pub fn with_timeout(self, timeout: Duration) -> Result<Self> {
        Self::new(self.initial_delay, self.poll_interval, timeout)
    }

    /// Preset name, if this profile is one of the presets
    pub fn preset_name(&self) -> Option<&'static str> {
        Self::PRESETS
            .iter()
            .find(|(_, p)| p == self)
            .map(|(name, _)| *name)
    }
}

impl FromStr for TimingProfile {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase().replace('_', "-");
        Self::PRESETS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, p)| *p)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::PRESETS.iter().map(|(n, _)| *n).collect();
                TaskError::InvalidTiming(format!(
                    "unknown profile '{}', expected one of: {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}
