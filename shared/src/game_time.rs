use std::{
    ops::{Add, Sub},
    time::{Duration, TryFromFloatSecsError},
};

/// A point on the simulation clock, measured from an arbitrary origin.
///
/// The host advances the clock; nothing in this crate reads the wall clock,
/// so sync gating is deterministic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameInstant {
    since_origin: Duration,
}

impl GameInstant {
    pub const ORIGIN: GameInstant = GameInstant {
        since_origin: Duration::ZERO,
    };

    pub fn from_duration(since_origin: Duration) -> Self {
        Self { since_origin }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::from_duration(Duration::from_millis(millis))
    }

    /// Panics if `secs` is negative, not finite, or overflows a `Duration`.
    /// See `try_from_secs_f32` for a non-panicking version.
    pub fn from_secs_f32(secs: f32) -> Self {
        Self::from_duration(Duration::from_secs_f32(secs))
    }

    pub fn try_from_secs_f32(secs: f32) -> Result<Self, TryFromFloatSecsError> {
        Ok(Self::from_duration(Duration::try_from_secs_f32(secs)?))
    }

    pub fn as_duration(&self) -> Duration {
        self.since_origin
    }

    /// Time elapsed from `earlier` to `self`, zero if `earlier` is later
    pub fn duration_since(&self, earlier: &GameInstant) -> Duration {
        self.since_origin.saturating_sub(earlier.since_origin)
    }
}

impl Add<Duration> for GameInstant {
    type Output = GameInstant;

    fn add(self, rhs: Duration) -> Self::Output {
        GameInstant::from_duration(self.since_origin + rhs)
    }
}

// saturates at the origin
impl Sub<Duration> for GameInstant {
    type Output = GameInstant;

    fn sub(self, rhs: Duration) -> Self::Output {
        GameInstant::from_duration(self.since_origin.saturating_sub(rhs))
    }
}
