use log::warn;

use syncvar_serde::{ByteReader, ByteWrite, Serde, SerdeErr};

use crate::{
    types::{ComponentIndex, FieldIndex},
    world::entity::{entity_id::EntityId, entity_resolver::EntityResolver},
};

use super::{
    property::PropertyError, property_mutate::PropertyMutator, replicated_field::ReplicatedField,
    schema::FieldKind,
};

/// Address of one behaviour on a networked entity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ComponentRef {
    pub entity: EntityId,
    pub index: ComponentIndex,
}

impl ComponentRef {
    pub fn new(entity: EntityId, index: ComponentIndex) -> Self {
        Self { entity, index }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ComponentRelation {
    Null,
    Resolved(ComponentRef),
    Waiting(ComponentRef),
}

/// A tracked reference to a behaviour on a networked entity.
///
/// Encoded as the entity's `EntityId` followed by the behaviour's index as
/// a single byte. A null reference is only the null id.
#[derive(Clone)]
pub struct ComponentProperty {
    relation: ComponentRelation,
    mutator: Option<PropertyMutator>,
    index: FieldIndex,
}

impl Default for ComponentProperty {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentProperty {
    pub fn new() -> Self {
        Self {
            relation: ComponentRelation::Null,
            mutator: None,
            index: 0,
        }
    }

    pub fn with_ref(component_ref: Option<ComponentRef>) -> Self {
        let mut property = Self::new();
        property.relation = Self::relation_for(component_ref);
        property
    }

    fn relation_for(component_ref: Option<ComponentRef>) -> ComponentRelation {
        match component_ref {
            Some(component_ref) if !component_ref.entity.is_null() => {
                ComponentRelation::Resolved(component_ref)
            }
            _ => ComponentRelation::Null,
        }
    }

    pub fn get(&self) -> Option<ComponentRef> {
        match self.relation {
            ComponentRelation::Resolved(component_ref) => Some(component_ref),
            ComponentRelation::Null | ComponentRelation::Waiting(_) => None,
        }
    }

    pub fn waiting_ref(&self) -> Option<ComponentRef> {
        match self.relation {
            ComponentRelation::Waiting(component_ref) => Some(component_ref),
            _ => None,
        }
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.relation, ComponentRelation::Waiting(_))
    }

    pub fn set(&mut self, component_ref: Option<ComponentRef>) {
        self.mutate();
        self.relation = Self::relation_for(component_ref);
    }

    pub fn set_to_none(&mut self) {
        self.set(None);
    }

    pub fn try_set(&mut self, component_ref: Option<ComponentRef>) -> Result<(), PropertyError> {
        self.try_mutate()?;
        self.relation = Self::relation_for(component_ref);
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
            warn!("ComponentProperty should have a mutator before it is mutated. Was its component registered?");
            return;
        };
        let _success = mutator.mutate(self.index);
    }

    fn try_mutate(&mut self) -> Result<(), PropertyError> {
        let Some(mutator) = &mut self.mutator else {
            return Err(PropertyError::MutatorNotSet {
                property_type: "ComponentProperty",
            });
        };
        let _success = mutator.mutate(self.index);
        Ok(())
    }
}

impl ReplicatedField for ComponentProperty {
    fn kind(&self) -> FieldKind {
        FieldKind::ComponentRef
    }

    fn attach(&mut self, mutator: &PropertyMutator, index: FieldIndex) {
        self.mutator = Some(mutator.clone_new());
        self.index = index;
    }

    fn write(&self, writer: &mut dyn ByteWrite) {
        match self.relation {
            ComponentRelation::Resolved(component_ref)
            | ComponentRelation::Waiting(component_ref) => {
                component_ref.entity.ser(writer);
                component_ref.index.ser(writer);
            }
            ComponentRelation::Null => EntityId::NULL.ser(writer),
        }
    }

    fn skip(&self, reader: &mut ByteReader) -> Result<(), SerdeErr> {
        if !EntityId::de(reader)?.is_null() {
            ComponentIndex::de(reader)?;
        }
        Ok(())
    }

    fn read(
        &mut self,
        reader: &mut ByteReader,
        resolver: &dyn EntityResolver,
    ) -> Result<(), SerdeErr> {
        let entity = EntityId::de(reader)?;
        if entity.is_null() {
            self.relation = ComponentRelation::Null;
            return Ok(());
        }
        let component_ref = ComponentRef::new(entity, ComponentIndex::de(reader)?);

        self.relation = match resolver.component_count(&entity) {
            Some(count) if component_ref.index < count => {
                ComponentRelation::Resolved(component_ref)
            }
            Some(count) => {
                // indices are fixed at spawn, so this can never resolve
                warn!(
                    "ComponentProperty: {} has {} component(s), index {} is out of range",
                    entity, count, component_ref.index
                );
                ComponentRelation::Null
            }
            None => {
                warn!(
                    "ComponentProperty: {} is not registered yet, reference stays null until it is",
                    entity
                );
                ComponentRelation::Waiting(component_ref)
            }
        };
        Ok(())
    }

    fn resolve_waiting(&mut self, resolver: &dyn EntityResolver) -> bool {
        let ComponentRelation::Waiting(component_ref) = self.relation else {
            return false;
        };
        match resolver.component_count(&component_ref.entity) {
            None => false,
            Some(count) if component_ref.index < count => {
                self.relation = ComponentRelation::Resolved(component_ref);
                true
            }
            Some(_) => {
                warn!(
                    "ComponentProperty: {} registered without component {}",
                    component_ref.entity, component_ref.index
                );
                self.relation = ComponentRelation::Null;
                true
            }
        }
    }
}

impl std::fmt::Debug for ComponentProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentProperty")
            .field("relation", &self.relation)
            .field("index", &self.index)
            .finish()
    }
}
