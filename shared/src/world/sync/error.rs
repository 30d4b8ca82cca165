use thiserror::Error;

use syncvar_serde::SerdeErr;

use crate::{
    types::{ComponentIndex, FieldIndex},
    world::entity::entity_id::EntityId,
};

/// Errors that abort decoding of one replication message.
///
/// Every variant other than `Serde` means the peers disagree on a schema;
/// the message must be discarded, not partially trusted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplicationError {
    /// The payload was truncated or held an invalid value
    #[error("Malformed replication message: {0}")]
    Serde(#[from] SerdeErr),

    /// A component payload did not decode to its announced length
    #[error("Component {component} announced {expected} byte(s) but its schema consumes {actual}")]
    SchemaMismatch {
        component: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A dirty mask addressed a field the receiver's schema does not have
    #[error("Component {component} dirty mask addresses field {field_index}, but it has only {field_count} field(s)")]
    UnknownField {
        component: &'static str,
        field_index: FieldIndex,
        field_count: u8,
    },

    /// An entity component mask addressed a behaviour the receiver does not have
    #[error("{entity_id} component mask addresses component {component_index}, but it has only {component_count}")]
    ComponentMismatch {
        entity_id: EntityId,
        component_index: ComponentIndex,
        component_count: usize,
    },

    /// A whole message decoded without consuming every byte
    #[error("Message is {expected} byte(s) long but decoding consumed {actual}")]
    TrailingBytes { expected: usize, actual: usize },
}

impl ReplicationError {
    pub fn is_underrun(&self) -> bool {
        matches!(self, Self::Serde(err) if err.is_underrun())
    }

    pub fn is_schema_mismatch(&self) -> bool {
        !matches!(self, Self::Serde(_))
    }
}
