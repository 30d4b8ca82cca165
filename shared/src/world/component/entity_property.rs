use log::warn;
use std::hash::Hash;

use syncvar_serde::{ByteReader, ByteWrite, Serde, SerdeErr};

use crate::{
    types::FieldIndex,
    world::entity::{
        entity_id::EntityId,
        entity_resolver::{EntityLookup, EntityResolver},
        error::EntityError,
    },
};

use super::{
    property::PropertyError, property_mutate::PropertyMutator, replicated_field::ReplicatedField,
    schema::FieldKind,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EntityRelation {
    Null,
    Resolved(EntityId),
    // Received an id that is not registered yet. Reads as null until
    // `resolve_waiting` finds the entity, but is still sent on as received.
    Waiting(EntityId),
}

/// A tracked reference to a networked entity.
///
/// Encoded as the referent's `EntityId`, with `EntityId::NULL` for no
/// reference.
#[derive(Clone)]
pub struct EntityProperty {
    relation: EntityRelation,
    mutator: Option<PropertyMutator>,
    index: FieldIndex,
}

impl Default for EntityProperty {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityProperty {
    pub fn new() -> Self {
        Self {
            relation: EntityRelation::Null,
            mutator: None,
            index: 0,
        }
    }

    pub fn with_id(entity_id: EntityId) -> Self {
        let mut property = Self::new();
        property.relation = Self::relation_for(entity_id);
        property
    }

    fn relation_for(entity_id: EntityId) -> EntityRelation {
        if entity_id.is_null() {
            EntityRelation::Null
        } else {
            EntityRelation::Resolved(entity_id)
        }
    }

    /// The referenced id, `None` for a null or still unresolved reference
    pub fn get(&self) -> Option<EntityId> {
        match self.relation {
            EntityRelation::Resolved(entity_id) => Some(entity_id),
            EntityRelation::Null | EntityRelation::Waiting(_) => None,
        }
    }

    /// The received id that could not be resolved yet
    pub fn waiting_id(&self) -> Option<EntityId> {
        match self.relation {
            EntityRelation::Waiting(entity_id) => Some(entity_id),
            _ => None,
        }
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.relation, EntityRelation::Waiting(_))
    }

    /// Looks up the referenced entity in the host's world
    pub fn entity<E: Copy + Eq + Hash>(&self, lookup: &dyn EntityLookup<E>) -> Option<E> {
        self.get()
            .and_then(|entity_id| lookup.entity(&entity_id).copied())
    }

    /// Points the reference at `entity_id` and marks the field dirty.
    /// `EntityId::NULL` clears it.
    pub fn set(&mut self, entity_id: EntityId) {
        self.mutate();
        self.relation = Self::relation_for(entity_id);
    }

    pub fn set_to_none(&mut self) {
        self.set(EntityId::NULL);
    }

    pub fn try_set(&mut self, entity_id: EntityId) -> Result<(), PropertyError> {
        self.try_mutate()?;
        self.relation = Self::relation_for(entity_id);
        Ok(())
    }

    /// Points the reference at a host entity, which must be registered
    pub fn set_entity<E: Copy + Eq + Hash>(
        &mut self,
        lookup: &dyn EntityLookup<E>,
        entity: &E,
    ) -> Result<(), EntityError> {
        let entity_id = lookup.entity_id(entity).ok_or(EntityError::EntityNotFound {
            context: "EntityProperty::set_entity",
        })?;
        self.set(entity_id);
        Ok(())
    }

    pub fn index(&self) -> FieldIndex {
        self.index
    }

    pub fn equals(&self, other: &Self) -> bool {
        self.relation == other.relation
    }

    fn mutate(&mut self) {
        let Some(mutator) = &mut self.mutator else {
            warn!("EntityProperty should have a mutator before it is mutated. Was its component registered?");
            return;
        };
        let _success = mutator.mutate(self.index);
    }

    fn try_mutate(&mut self) -> Result<(), PropertyError> {
        let Some(mutator) = &mut self.mutator else {
            return Err(PropertyError::MutatorNotSet {
                property_type: "EntityProperty",
            });
        };
        let _success = mutator.mutate(self.index);
        Ok(())
    }
}

impl ReplicatedField for EntityProperty {
    fn kind(&self) -> FieldKind {
        FieldKind::EntityRef
    }

    fn attach(&mut self, mutator: &PropertyMutator, index: FieldIndex) {
        self.mutator = Some(mutator.clone_new());
        self.index = index;
    }

    fn write(&self, writer: &mut dyn ByteWrite) {
        match self.relation {
            EntityRelation::Null => EntityId::NULL.ser(writer),
            EntityRelation::Resolved(entity_id) | EntityRelation::Waiting(entity_id) => {
                entity_id.ser(writer)
            }
        }
    }

    fn skip(&self, reader: &mut ByteReader) -> Result<(), SerdeErr> {
        EntityId::de(reader)?;
        Ok(())
    }

    fn read(
        &mut self,
        reader: &mut ByteReader,
        resolver: &dyn EntityResolver,
    ) -> Result<(), SerdeErr> {
        let entity_id = EntityId::de(reader)?;

        self.relation = if entity_id.is_null() {
            EntityRelation::Null
        } else if resolver.has_entity(&entity_id) {
            EntityRelation::Resolved(entity_id)
        } else {
            warn!(
                "EntityProperty: {} is not registered yet, reference stays null until it is",
                entity_id
            );
            EntityRelation::Waiting(entity_id)
        };
        Ok(())
    }

    fn resolve_waiting(&mut self, resolver: &dyn EntityResolver) -> bool {
        let EntityRelation::Waiting(entity_id) = self.relation else {
            return false;
        };
        if !resolver.has_entity(&entity_id) {
            return false;
        }
        self.relation = EntityRelation::Resolved(entity_id);
        true
    }
}

impl std::fmt::Debug for EntityProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityProperty")
            .field("relation", &self.relation)
            .field("index", &self.index)
            .finish()
    }
}
