//! # Replication engine
//!
//! A `SyncBehaviour` wraps one component: field writes set bits in its
//! dirty mask, and its `SyncTimer` decides when those bits may be flushed.
//! A `SyncEntity` groups the behaviours of one networked entity and writes
//! them as a single message, prefixed by a mask of the behaviours it carries.
//!
//! Both peers build their behaviours from the same `Protocol`, so field
//! order and component order are agreed ahead of time and never sent.
//! Anything in a message that contradicts the receiver's layout fails the
//! whole message with a `ReplicationError`.

pub mod behaviour;
pub mod config;
pub mod error;
pub mod sync_entity;
pub mod sync_mode;
