/// Which flavour of message a flush produces
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyncMode {
    /// Every tracked field, no dirty mask. Used for first contact.
    Full,
    /// Dirty mask followed by the dirty fields only
    Delta,
}

impl SyncMode {
    pub fn from_initial_state(initial_state: bool) -> Self {
        if initial_state {
            Self::Full
        } else {
            Self::Delta
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full)
    }
}
