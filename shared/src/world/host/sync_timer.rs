use std::time::Duration;

use crate::game_time::GameInstant;

/// Rate gate for delta flushes.
///
/// The gate is open once `sync_interval` has elapsed since the last flush.
/// A zero interval is always open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncTimer {
    sync_interval: Duration,
    last_sync: GameInstant,
}

impl SyncTimer {
    pub fn new(sync_interval: Duration) -> Self {
        Self {
            sync_interval,
            last_sync: GameInstant::ORIGIN,
        }
    }

    pub fn sync_interval(&self) -> Duration {
        self.sync_interval
    }

    pub fn set_sync_interval(&mut self, sync_interval: Duration) {
        self.sync_interval = sync_interval;
    }

    pub fn last_sync(&self) -> GameInstant {
        self.last_sync
    }

    pub fn set_last_sync(&mut self, last_sync: GameInstant) {
        self.last_sync = last_sync;
    }

    pub fn should_flush(&self, now: &GameInstant) -> bool {
        now.duration_since(&self.last_sync) >= self.sync_interval
    }

    pub fn on_flush(&mut self, now: &GameInstant) {
        self.last_sync = *now;
    }
}
