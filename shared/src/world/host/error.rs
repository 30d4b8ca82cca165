use thiserror::Error;

/// Errors that can occur while touching a component's dirty tracker
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MutChannelError {
    /// A thread panicked while holding the mask lock
    #[error("Dirty mask lock was poisoned by a panicking writer")]
    LockPoisoned,
}
