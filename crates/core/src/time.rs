use chrono::Utc;

use crate::types::Timestamp;

/// Source of "now" for anything time-dependent.
///
/// Production code uses [`Clock::System`]; tests pin the instant with
/// [`Clock::fixed`] so progress values are deterministic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(Timestamp),
}

impl Clock {
    /// A clock frozen at `at`.
    #[must_use]
    pub fn fixed(at: Timestamp) -> Self {
        Self::Fixed(at)
    }

    /// Current instant according to this clock.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }
}
