use std::collections::HashSet;

use crate::{constants::MAX_FIELDS_PER_COMPONENT, types::FieldIndex};

use super::error::ComponentError;

/// How a tracked field is put on the wire
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// A plain value, encoded through its `Serde` impl. Carries the Rust
    /// type name so mismatched declarations are caught at registration.
    Value(&'static str),
    /// Reference to a networked entity, encoded as its `EntityId`
    EntityRef,
    /// Reference to one behaviour of a networked entity, encoded as
    /// `(EntityId, ComponentIndex)`
    ComponentRef,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Ordered list of the tracked fields of one component type. Declaration
/// order is wire order and dirty-bit order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplicaSchema {
    name: &'static str,
    fields: Vec<FieldSchema>,
}

impl ReplicaSchema {
    pub fn builder(name: &'static str) -> ReplicaSchemaBuilder {
        ReplicaSchemaBuilder {
            schema: ReplicaSchema {
                name,
                fields: Vec::new(),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn field(&self, index: FieldIndex) -> Option<&FieldSchema> {
        self.fields.get(index as usize)
    }

    /// Only meaningful after `validate` has passed
    pub fn field_count(&self) -> u8 {
        self.fields.len() as u8
    }

    pub fn validate(&self) -> Result<(), ComponentError> {
        if self.fields.len() > MAX_FIELDS_PER_COMPONENT as usize {
            return Err(ComponentError::TooManyFields {
                component_name: self.name,
                field_count: self.fields.len(),
                max: MAX_FIELDS_PER_COMPONENT,
            });
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name) {
                return Err(ComponentError::DuplicateFieldName {
                    component_name: self.name,
                    field_name: field.name,
                });
            }
        }

        Ok(())
    }
}

pub struct ReplicaSchemaBuilder {
    schema: ReplicaSchema,
}

impl ReplicaSchemaBuilder {
    pub fn value<T>(mut self, name: &'static str) -> Self {
        self.schema.fields.push(FieldSchema {
            name,
            kind: FieldKind::Value(std::any::type_name::<T>()),
        });
        self
    }

    pub fn entity(mut self, name: &'static str) -> Self {
        self.schema.fields.push(FieldSchema {
            name,
            kind: FieldKind::EntityRef,
        });
        self
    }

    pub fn component(mut self, name: &'static str) -> Self {
        self.schema.fields.push(FieldSchema {
            name,
            kind: FieldKind::ComponentRef,
        });
        self
    }

    pub fn build(self) -> ReplicaSchema {
        self.schema
    }
}
