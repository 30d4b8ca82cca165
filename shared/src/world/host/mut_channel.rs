use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    types::FieldIndex,
    world::component::{diff_mask::DiffMask, property_mutate::PropertyMutate},
};

use super::error::MutChannelError;

/// A component's dirty tracker, shared between the field handles that mark
/// it and the behaviour that reads and clears it.
pub struct MutChannel;

impl MutChannel {
    pub fn new_channel(field_count: u8) -> (MutSender, MutReceiver) {
        let receiver = MutReceiver::new(field_count);
        let sender = MutSender::new(&receiver);
        (sender, receiver)
    }
}

// MutReceiver
#[derive(Clone)]
pub struct MutReceiver {
    mask: Arc<RwLock<DiffMask>>,
}

impl MutReceiver {
    pub fn new(field_count: u8) -> Self {
        Self {
            mask: Arc::new(RwLock::new(DiffMask::new(field_count))),
        }
    }

    pub fn mask(&self) -> RwLockReadGuard<'_, DiffMask> {
        let Ok(mask) = self.mask.as_ref().read() else {
            panic!("Dirty mask lock poisoned");
        };

        mask
    }

    pub fn diff_mask_is_clear(&self) -> bool {
        let Ok(mask) = self.mask.as_ref().read() else {
            panic!("Dirty mask lock poisoned");
        };
        mask.is_clear()
    }

    pub fn mutate(&self, index: FieldIndex) {
        let Ok(mut mask) = self.mask.as_ref().write() else {
            panic!("Dirty mask lock poisoned");
        };
        mask.set_bit(index, true);
    }

    pub fn clear_mask(&self) {
        let Ok(mut mask) = self.mask.as_ref().write() else {
            panic!("Dirty mask lock poisoned");
        };
        mask.clear();
    }

    // Try versions that return Result instead of panicking

    pub fn try_mask(&self) -> Result<RwLockReadGuard<'_, DiffMask>, MutChannelError> {
        self.mask
            .as_ref()
            .read()
            .map_err(|_| MutChannelError::LockPoisoned)
    }

    pub fn try_mask_mut(&self) -> Result<RwLockWriteGuard<'_, DiffMask>, MutChannelError> {
        self.mask
            .as_ref()
            .write()
            .map_err(|_| MutChannelError::LockPoisoned)
    }

    pub fn try_diff_mask_is_clear(&self) -> Result<bool, MutChannelError> {
        let mask = self.try_mask()?;
        Ok(mask.is_clear())
    }

    pub fn try_mutate(&self, index: FieldIndex) -> Result<(), MutChannelError> {
        let mut mask = self.try_mask_mut()?;
        mask.set_bit(index, true);
        Ok(())
    }

    pub fn try_clear_mask(&self) -> Result<(), MutChannelError> {
        let mut mask = self.try_mask_mut()?;
        mask.clear();
        Ok(())
    }
}

// MutSender
#[derive(Clone)]
pub struct MutSender {
    mask: Arc<RwLock<DiffMask>>,
}

impl MutSender {
    pub fn new(receiver: &MutReceiver) -> Self {
        Self {
            mask: receiver.mask.clone(),
        }
    }
}

impl PropertyMutate for MutSender {
    fn mutate(&mut self, property_index: FieldIndex) -> bool {
        let Ok(mut mask) = self.mask.as_ref().write() else {
            return false;
        };
        mask.set_bit(property_index, true)
    }
}
