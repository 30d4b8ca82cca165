use std::{
    any::Any,
    ops::{Deref, DerefMut},
    sync::Arc,
    time::Duration,
};

use log::{debug, warn};

use syncvar_serde::{ByteReader, ByteWrite};

use crate::{
    game_time::GameInstant,
    protocol::Protocol,
    world::{
        component::{
            diff_mask::DiffMask, error::ComponentError, property_mutate::PropertyMutator,
            replicate::Replicate, schema::ReplicaSchema,
        },
        entity::entity_resolver::EntityResolver,
        host::{
            mut_channel::{MutChannel, MutReceiver},
            sync_timer::SyncTimer,
        },
    },
};

use super::{error::ReplicationError, sync_mode::SyncMode};

/// Object-safe face of a `SyncBehaviour`, so behaviours of different
/// component types can live on one entity.
pub trait SyncComponent: Any {
    fn name(&self) -> &'static str;
    fn has_dirty_bits(&self) -> bool;
    fn is_dirty(&self, now: &GameInstant) -> bool;
    fn clear_all_dirty_bits(&mut self);
    fn clear_dirty_if_interval_elapsed(&mut self, now: &GameInstant) -> bool;
    fn serialize(&self, writer: &mut dyn ByteWrite, mode: SyncMode, now: &GameInstant) -> bool;
    fn deserialize(
        &mut self,
        reader: &mut ByteReader,
        mode: SyncMode,
        resolver: &dyn EntityResolver,
    ) -> Result<(), ReplicationError>;
    /// Reads past one message without applying it
    fn check(&self, reader: &mut ByteReader, mode: SyncMode) -> Result<(), ReplicationError>;
    /// Applies a message that `check` accepted
    fn apply(
        &mut self,
        reader: &mut ByteReader,
        mode: SyncMode,
        resolver: &dyn EntityResolver,
    ) -> Result<(), ReplicationError>;
    fn resolve_waiting(&mut self, resolver: &dyn EntityResolver) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A replicated component together with its dirty tracker and sync timer.
///
/// Field writes go through `DerefMut` to the component and mark the
/// matching dirty bit. The host decides when to flush: `serialize` only
/// reads the dirty state, `flush` also clears it.
pub struct SyncBehaviour<R: Replicate> {
    component: R,
    schema: Arc<ReplicaSchema>,
    receiver: MutReceiver,
    timer: SyncTimer,
}

impl<R: Replicate> SyncBehaviour<R> {
    /// Wraps `component` using the schema registered in `protocol`
    pub fn new(protocol: &Protocol, component: R) -> Result<Self, ComponentError> {
        let schema = protocol.component_kinds.schema::<R>()?;
        Self::with_schema(schema, component, protocol.sync.sync_interval)
    }

    /// Checks the component's fields against `schema` and attaches the
    /// dirty tracker to each of them, in declaration order
    pub fn with_schema(
        schema: Arc<ReplicaSchema>,
        mut component: R,
        sync_interval: Duration,
    ) -> Result<Self, ComponentError> {
        let fields = component.fields();
        if fields.len() != schema.fields().len() {
            return Err(ComponentError::FieldCountMismatch {
                component_name: schema.name(),
                declared: schema.fields().len(),
                actual: fields.len(),
            });
        }
        for (field, declared) in fields.iter().zip(schema.fields()) {
            let actual = field.kind();
            if actual != declared.kind {
                return Err(ComponentError::FieldKindMismatch {
                    component_name: schema.name(),
                    field_name: declared.name,
                    declared: declared.kind,
                    actual,
                });
            }
        }

        let (sender, receiver) = MutChannel::new_channel(schema.field_count());
        let mutator = PropertyMutator::new(sender);
        for (index, field) in component.fields_mut().into_iter().enumerate() {
            field.attach(&mutator, index as u8);
        }

        Ok(Self {
            component,
            schema,
            receiver,
            timer: SyncTimer::new(sync_interval),
        })
    }

    pub fn name(&self) -> &'static str {
        self.schema.name()
    }

    pub fn schema(&self) -> &ReplicaSchema {
        &self.schema
    }

    pub fn inner(&self) -> &R {
        &self.component
    }

    pub fn into_inner(self) -> R {
        self.component
    }

    pub fn sync_interval(&self) -> Duration {
        self.timer.sync_interval()
    }

    pub fn set_sync_interval(&mut self, sync_interval: Duration) {
        self.timer.set_sync_interval(sync_interval);
    }

    pub fn last_sync(&self) -> GameInstant {
        self.timer.last_sync()
    }

    pub fn set_last_sync(&mut self, last_sync: GameInstant) {
        self.timer.set_last_sync(last_sync);
    }

    /// A copy of the current dirty mask
    pub fn dirty_mask(&self) -> DiffMask {
        self.receiver.mask().clone()
    }

    /// True if any field was written since the last clear, regardless of
    /// the sync interval
    pub fn has_dirty_bits(&self) -> bool {
        !self.receiver.diff_mask_is_clear()
    }

    /// True if any field is dirty and the sync interval has elapsed
    pub fn is_dirty(&self, now: &GameInstant) -> bool {
        self.has_dirty_bits() && self.timer.should_flush(now)
    }

    /// Forgets every pending change. Leaves the sync timer alone.
    pub fn clear_all_dirty_bits(&mut self) {
        self.receiver.clear_mask();
    }

    /// Clears the dirty bits and restarts the sync interval, but only if
    /// the behaviour is dirty at `now`. Returns whether it cleared.
    pub fn clear_dirty_if_interval_elapsed(&mut self, now: &GameInstant) -> bool {
        if !self.is_dirty(now) {
            return false;
        }
        self.receiver.clear_mask();
        self.timer.on_flush(now);
        true
    }

    /// Writes the component in `mode`. Returns false, having written
    /// nothing, for a delta when the behaviour is not dirty at `now`.
    pub fn serialize(&self, writer: &mut dyn ByteWrite, mode: SyncMode, now: &GameInstant) -> bool {
        let fields = self.component.fields();
        match mode {
            SyncMode::Full => {
                for field in &fields {
                    field.write(writer);
                }
            }
            SyncMode::Delta => {
                if !self.is_dirty(now) {
                    return false;
                }
                let mask = self.receiver.mask();
                mask.write(writer);
                for index in mask.dirty_indices() {
                    fields[index as usize].write(writer);
                }
            }
        }

        debug!("SyncBehaviour: wrote {:?} of {}", mode, self.name());
        true
    }

    /// Serializes a delta and, if anything was written, clears the dirty
    /// bits and restarts the sync interval
    pub fn flush(&mut self, writer: &mut dyn ByteWrite, now: &GameInstant) -> bool {
        if !self.serialize(writer, SyncMode::Delta, now) {
            return false;
        }
        self.clear_dirty_if_interval_elapsed(now)
    }

    /// Applies a message written by `serialize` in the same mode. Applied
    /// fields are not marked dirty.
    ///
    /// The message is checked in full before any field is written, so on
    /// error the component is unchanged.
    pub fn deserialize(
        &mut self,
        reader: &mut ByteReader,
        mode: SyncMode,
        resolver: &dyn EntityResolver,
    ) -> Result<(), ReplicationError> {
        self.check(&mut reader.clone(), mode)?;
        self.apply(reader, mode, resolver)
    }

    /// Applies one complete message, which must be consumed exactly.
    /// Returns the number of bytes read.
    pub fn deserialize_message(
        &mut self,
        bytes: &[u8],
        mode: SyncMode,
        resolver: &dyn EntityResolver,
    ) -> Result<usize, ReplicationError> {
        let mut preview = ByteReader::new(bytes);
        self.check(&mut preview, mode)?;
        if !preview.is_exhausted() {
            warn!(
                "SyncBehaviour: {} left {} trailing byte(s) unread",
                self.name(),
                preview.remaining()
            );
            return Err(ReplicationError::TrailingBytes {
                expected: bytes.len(),
                actual: preview.position(),
            });
        }

        let mut reader = ByteReader::new(bytes);
        self.apply(&mut reader, mode, resolver)?;
        Ok(reader.position())
    }

    // Indices of the fields a message in `mode` carries, in order
    fn selected_fields(
        &self,
        reader: &mut ByteReader,
        mode: SyncMode,
    ) -> Result<Vec<usize>, ReplicationError> {
        let field_count = self.schema.field_count();
        if mode.is_full() {
            return Ok((0..field_count as usize).collect());
        }

        let mask = DiffMask::read(reader, field_count)?;
        if let Some(field_index) = mask.first_unknown_bit() {
            warn!(
                "SyncBehaviour: {} received a change to field {}, which it does not have",
                self.name(),
                field_index
            );
            return Err(ReplicationError::UnknownField {
                component: self.name(),
                field_index,
                field_count,
            });
        }
        Ok(mask.dirty_indices().map(usize::from).collect())
    }

    /// Reads past one message without touching the component, failing
    /// wherever applying it would fail
    fn check(&self, reader: &mut ByteReader, mode: SyncMode) -> Result<(), ReplicationError> {
        let selected = self.selected_fields(reader, mode)?;
        let fields = self.component.fields();
        for index in selected {
            fields[index].skip(reader)?;
        }
        Ok(())
    }

    fn apply(
        &mut self,
        reader: &mut ByteReader,
        mode: SyncMode,
        resolver: &dyn EntityResolver,
    ) -> Result<(), ReplicationError> {
        let selected = self.selected_fields(reader, mode)?;
        let mut fields = self.component.fields_mut();
        for index in selected {
            fields[index].read(reader, resolver)?;
        }
        Ok(())
    }

    /// Retries references that arrived before their referent was
    /// registered. Returns true if any field changed.
    pub fn resolve_waiting(&mut self, resolver: &dyn EntityResolver) -> bool {
        let mut changed = false;
        for field in self.component.fields_mut() {
            changed |= field.resolve_waiting(resolver);
        }
        changed
    }
}

impl<R: Replicate> Deref for SyncBehaviour<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.component
    }
}

impl<R: Replicate> DerefMut for SyncBehaviour<R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut self.component
    }
}

impl<R: Replicate> SyncComponent for SyncBehaviour<R> {
    fn name(&self) -> &'static str {
        SyncBehaviour::name(self)
    }

    fn has_dirty_bits(&self) -> bool {
        SyncBehaviour::has_dirty_bits(self)
    }

    fn is_dirty(&self, now: &GameInstant) -> bool {
        SyncBehaviour::is_dirty(self, now)
    }

    fn clear_all_dirty_bits(&mut self) {
        SyncBehaviour::clear_all_dirty_bits(self)
    }

    fn clear_dirty_if_interval_elapsed(&mut self, now: &GameInstant) -> bool {
        SyncBehaviour::clear_dirty_if_interval_elapsed(self, now)
    }

    fn serialize(&self, writer: &mut dyn ByteWrite, mode: SyncMode, now: &GameInstant) -> bool {
        SyncBehaviour::serialize(self, writer, mode, now)
    }

    fn deserialize(
        &mut self,
        reader: &mut ByteReader,
        mode: SyncMode,
        resolver: &dyn EntityResolver,
    ) -> Result<(), ReplicationError> {
        SyncBehaviour::deserialize(self, reader, mode, resolver)
    }

    fn check(&self, reader: &mut ByteReader, mode: SyncMode) -> Result<(), ReplicationError> {
        SyncBehaviour::check(self, reader, mode)
    }

    fn apply(
        &mut self,
        reader: &mut ByteReader,
        mode: SyncMode,
        resolver: &dyn EntityResolver,
    ) -> Result<(), ReplicationError> {
        SyncBehaviour::apply(self, reader, mode, resolver)
    }

    fn resolve_waiting(&mut self, resolver: &dyn EntityResolver) -> bool {
        SyncBehaviour::resolve_waiting(self, resolver)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
