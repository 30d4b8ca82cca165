use std::{collections::HashMap, hash::Hash};

use log::info;

use crate::types::ComponentIndex;

use super::{entity_id::EntityId, error::EntityError};

/// Read-only view of the live entities, used while decoding references
pub trait EntityResolver {
    fn has_entity(&self, entity_id: &EntityId) -> bool;

    /// Number of behaviours on the entity, `None` if it is not registered
    fn component_count(&self, entity_id: &EntityId) -> Option<u8>;

    fn has_component(&self, entity_id: &EntityId, index: ComponentIndex) -> bool {
        self.component_count(entity_id)
            .map(|count| index < count)
            .unwrap_or(false)
    }
}

/// Maps between network ids and the host's own entity handles
pub trait EntityLookup<E>: EntityResolver {
    fn entity(&self, entity_id: &EntityId) -> Option<&E>;

    fn entity_id(&self, entity: &E) -> Option<EntityId>;
}

/// Resolver with no entities, for components that hold no references
pub struct FakeEntityResolver;

impl EntityResolver for FakeEntityResolver {
    fn has_entity(&self, _entity_id: &EntityId) -> bool {
        false
    }

    fn component_count(&self, _entity_id: &EntityId) -> Option<u8> {
        None
    }
}

struct EntityRecord<E> {
    entity: E,
    component_count: u8,
}

/// Registry of spawned entities, keyed by `EntityId`.
///
/// Populated by the host's spawn and despawn events. Component indices are
/// fixed when an entity is spawned, so references encoded against it stay
/// valid until it is despawned.
pub struct EntityRegistry<E: Copy + Eq + Hash> {
    id_to_record: HashMap<EntityId, EntityRecord<E>>,
    entity_to_id: HashMap<E, EntityId>,
}

impl<E: Copy + Eq + Hash> Default for EntityRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Copy + Eq + Hash> EntityRegistry<E> {
    pub fn new() -> Self {
        Self {
            id_to_record: HashMap::new(),
            entity_to_id: HashMap::new(),
        }
    }

    pub fn spawn(
        &mut self,
        entity_id: EntityId,
        entity: E,
        component_count: u8,
    ) -> Result<(), EntityError> {
        if entity_id.is_null() {
            return Err(EntityError::NullEntityId);
        }
        if self.id_to_record.contains_key(&entity_id) {
            return Err(EntityError::EntityAlreadySpawned { entity_id });
        }
        if let Some(existing) = self.entity_to_id.get(&entity) {
            return Err(EntityError::DuplicateWorldEntity {
                entity_id: *existing,
            });
        }

        info!("EntityRegistry: spawned {} with {} component(s)", entity_id, component_count);
        self.id_to_record.insert(
            entity_id,
            EntityRecord {
                entity,
                component_count,
            },
        );
        self.entity_to_id.insert(entity, entity_id);
        Ok(())
    }

    pub fn despawn(&mut self, entity_id: &EntityId) -> Option<E> {
        let record = self.id_to_record.remove(entity_id)?;
        self.entity_to_id.remove(&record.entity);
        info!("EntityRegistry: despawned {}", entity_id);
        Some(record.entity)
    }

    pub fn clear(&mut self) {
        self.id_to_record.clear();
        self.entity_to_id.clear();
    }

    pub fn len(&self) -> usize {
        self.id_to_record.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_record.is_empty()
    }
}

impl<E: Copy + Eq + Hash> EntityResolver for EntityRegistry<E> {
    fn has_entity(&self, entity_id: &EntityId) -> bool {
        self.id_to_record.contains_key(entity_id)
    }

    fn component_count(&self, entity_id: &EntityId) -> Option<u8> {
        self.id_to_record
            .get(entity_id)
            .map(|record| record.component_count)
    }
}

impl<E: Copy + Eq + Hash> EntityLookup<E> for EntityRegistry<E> {
    fn entity(&self, entity_id: &EntityId) -> Option<&E> {
        self.id_to_record
            .get(entity_id)
            .map(|record| &record.entity)
    }

    fn entity_id(&self, entity: &E) -> Option<EntityId> {
        self.entity_to_id.get(entity).copied()
    }
}
