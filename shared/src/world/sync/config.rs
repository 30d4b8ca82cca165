//! # `SyncConfig` – replication tuning knobs
//!
//! Defaults handed to every behaviour and entity built from a `Protocol`.
//! Each behaviour copies `sync_interval` at construction and may override
//! it afterwards; changing the config does not touch live behaviours.

use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncConfig {
    /// Minimum time between two delta flushes of one behaviour. A zero
    /// interval flushes on every tick that has dirty fields.
    pub sync_interval: Duration,
    /// When true, entity-level messages prefix each component payload with
    /// its byte length, and the receiver rejects payloads that decode to a
    /// different length. Both peers must agree on this setting.
    pub verify_lengths: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            sync_interval: Duration::from_millis(100),
            verify_lengths: true,
        }
    }
}
