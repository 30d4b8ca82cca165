use thiserror::Error;

/// Errors raised while decoding a byte stream
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// The reader ran out of bytes before the value was complete
    #[error("Buffer underrun: requested {requested} byte(s) at position {position}, but only {remaining} remain")]
    Underrun {
        requested: usize,
        remaining: usize,
        position: usize,
    },

    /// The bytes were present but do not form a valid value of the type
    #[error("Invalid {type_name} value: {reason}")]
    InvalidValue {
        type_name: &'static str,
        reason: String,
    },
}

impl SerdeErr {
    pub fn invalid(type_name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            type_name,
            reason: reason.into(),
        }
    }

    pub fn is_underrun(&self) -> bool {
        matches!(self, Self::Underrun { .. })
    }
}
