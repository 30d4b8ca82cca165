use thiserror::Error;

use super::entity_id::EntityId;

/// Errors that can occur during entity registry operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EntityError {
    /// The null id cannot name a live entity
    #[error("EntityId 0 is reserved for null references and cannot be spawned")]
    NullEntityId,

    /// Entity already exists when trying to spawn
    #[error("Entity {entity_id} already spawned")]
    EntityAlreadySpawned { entity_id: EntityId },

    /// The same world entity was registered under a second id
    #[error("World entity is already registered as {entity_id}")]
    DuplicateWorldEntity { entity_id: EntityId },

    /// Entity was not found during lookup
    #[error("Entity not found: {context}")]
    EntityNotFound { context: &'static str },

    /// Entity has more behaviours than a component mask can address
    #[error("Entity {entity_id} cannot hold more than {max} components")]
    TooManyComponents { entity_id: EntityId, max: usize },
}
