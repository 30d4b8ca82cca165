use std::{any::TypeId, collections::HashMap, sync::Arc};

use log::info;

use super::{error::ComponentError, replicate::Replicate, schema::ReplicaSchema};

/// Identifies a registered component type
#[derive(Eq, Hash, Copy, Clone, PartialEq, Debug)]
pub struct ComponentKind {
    type_id: TypeId,
}

impl ComponentKind {
    pub fn of<C: Replicate>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
        }
    }
}

/// Registry of component schemas, built once per component type
#[derive(Default)]
pub struct ComponentKinds {
    kind_map: HashMap<ComponentKind, Arc<ReplicaSchema>>,
}

impl ComponentKinds {
    pub fn new() -> Self {
        Self {
            kind_map: HashMap::new(),
        }
    }

    pub fn add_component<C: Replicate>(&mut self) -> Result<ComponentKind, ComponentError> {
        let schema = C::schema();
        schema.validate()?;

        let component_kind = ComponentKind::of::<C>();
        if self.kind_map.contains_key(&component_kind) {
            return Err(ComponentError::AlreadyRegistered {
                component_name: schema.name(),
            });
        }

        info!(
            "ComponentKinds: Registering Component {} with {} tracked field(s)",
            schema.name(),
            schema.field_count()
        );
        self.kind_map.insert(component_kind, Arc::new(schema));

        Ok(component_kind)
    }

    pub fn schema<C: Replicate>(&self) -> Result<Arc<ReplicaSchema>, ComponentError> {
        self.kind_map
            .get(&ComponentKind::of::<C>())
            .cloned()
            .ok_or_else(|| ComponentError::ComponentNotRegistered {
                component_name: std::any::type_name::<C>(),
            })
    }

    pub fn kind_to_name(&self, component_kind: &ComponentKind) -> Option<&'static str> {
        self.kind_map.get(component_kind).map(|schema| schema.name())
    }

    pub fn contains(&self, component_kind: &ComponentKind) -> bool {
        self.kind_map.contains_key(component_kind)
    }

    pub fn len(&self) -> usize {
        self.kind_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kind_map.is_empty()
    }
}
