use std::time::Duration;

use crate::world::{
    component::{component_kinds::ComponentKinds, error::ComponentError, replicate::Replicate},
    entity::entity_id::EntityId,
    sync::{behaviour::SyncBehaviour, config::SyncConfig, sync_entity::SyncEntity},
};

pub mod error;
pub use error::ProtocolError;

// Protocol
#[derive(Default)]
pub struct Protocol {
    pub component_kinds: ComponentKinds,
    /// Defaults for every behaviour and entity built from this Protocol
    pub sync: SyncConfig,
    locked: bool,
}

impl Protocol {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn sync_interval(&mut self, duration: Duration) -> &mut Self {
        self.check_lock();
        self.sync.sync_interval = duration;
        self
    }

    pub fn verify_lengths(&mut self, verify_lengths: bool) -> &mut Self {
        self.check_lock();
        self.sync.verify_lengths = verify_lengths;
        self
    }

    pub fn add_component<C: Replicate>(&mut self) -> &mut Self {
        self.check_lock();
        if let Err(err) = self.component_kinds.add_component::<C>() {
            panic!("{}", err);
        }
        self
    }

    // Non-panicking builder methods

    pub fn try_sync_interval(&mut self, duration: Duration) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        self.sync.sync_interval = duration;
        Ok(self)
    }

    pub fn try_verify_lengths(&mut self, verify_lengths: bool) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        self.sync.verify_lengths = verify_lengths;
        Ok(self)
    }

    pub fn try_add_component<C: Replicate>(&mut self) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        self.component_kinds.add_component::<C>()?;
        Ok(self)
    }

    pub fn try_lock(&mut self) -> Result<(), ProtocolError> {
        self.try_check_lock()?;
        self.locked = true;
        Ok(())
    }

    pub fn lock(&mut self) {
        self.check_lock();
        self.locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Checks if protocol is locked without panicking
    /// Returns Err if protocol is locked
    pub fn try_check_lock(&self) -> Result<(), ProtocolError> {
        if self.locked {
            Err(ProtocolError::AlreadyLocked)
        } else {
            Ok(())
        }
    }

    /// Checks if protocol is locked, panics if it is
    pub fn check_lock(&self) {
        if self.locked {
            panic!("Protocol already locked!");
        }
    }

    pub fn build(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Wraps `component` in a behaviour using its registered schema and
    /// the default sync interval
    pub fn behaviour<R: Replicate>(&self, component: R) -> Result<SyncBehaviour<R>, ComponentError> {
        SyncBehaviour::new(self, component)
    }

    /// An empty entity using this Protocol's length verification setting
    pub fn entity(&self, entity_id: EntityId) -> SyncEntity {
        SyncEntity::new(entity_id, &self.sync)
    }
}
