use syncvar_serde::{ByteReader, ByteWrite, SerdeErr};

use crate::{types::FieldIndex, world::entity::entity_resolver::EntityResolver};

use super::{property_mutate::PropertyMutator, schema::FieldKind};

/// The field serializer: one tracked slot of a component.
pub trait ReplicatedField {
    fn kind(&self) -> FieldKind;

    /// Connects the field to its component's dirty tracker. Called once
    /// when the component is registered; `index` is the field's dirty bit.
    fn attach(&mut self, mutator: &PropertyMutator, index: FieldIndex);

    fn write(&self, writer: &mut dyn ByteWrite);

    /// Reads past one encoded value without applying it. Must consume
    /// exactly what `read` would and fail wherever `read` would.
    fn skip(&self, reader: &mut ByteReader) -> Result<(), SerdeErr>;

    /// Applies a received value. Never marks the field dirty.
    fn read(
        &mut self,
        reader: &mut ByteReader,
        resolver: &dyn EntityResolver,
    ) -> Result<(), SerdeErr>;

    /// Retries resolution of a reference that arrived before its referent
    /// was registered. Returns true if the field changed.
    fn resolve_waiting(&mut self, _resolver: &dyn EntityResolver) -> bool {
        false
    }
}
