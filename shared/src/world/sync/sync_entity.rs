use log::{debug, warn};

use syncvar_serde::{ByteReader, ByteWrite, ByteWriter, Serde, SerdeErr, UnsignedVariableInteger};

use crate::{
    constants::MAX_COMPONENTS_PER_ENTITY,
    game_time::GameInstant,
    types::ComponentIndex,
    world::{
        component::replicate::Replicate,
        entity::{entity_id::EntityId, entity_resolver::EntityResolver, error::EntityError},
    },
};

use super::{
    behaviour::{SyncBehaviour, SyncComponent},
    config::SyncConfig,
    error::ReplicationError,
    sync_mode::SyncMode,
};

/// A networked entity and its replicated behaviours.
///
/// A behaviour's component index is its position in the entity, fixed
/// when it is added. Messages from `serialize_all` start with a component
/// mask naming the behaviours they carry, so the receiver must hold the
/// same behaviours in the same order.
pub struct SyncEntity {
    entity_id: EntityId,
    components: Vec<Box<dyn SyncComponent>>,
    verify_lengths: bool,
}

impl SyncEntity {
    pub fn new(entity_id: EntityId, config: &SyncConfig) -> Self {
        Self {
            entity_id,
            components: Vec::new(),
            verify_lengths: config.verify_lengths,
        }
    }

    pub fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    pub fn component_count(&self) -> u8 {
        self.components.len() as u8
    }

    /// Appends a behaviour and returns its component index
    pub fn add_component<C: SyncComponent>(
        &mut self,
        component: C,
    ) -> Result<ComponentIndex, EntityError> {
        if self.components.len() >= MAX_COMPONENTS_PER_ENTITY {
            return Err(EntityError::TooManyComponents {
                entity_id: self.entity_id,
                max: MAX_COMPONENTS_PER_ENTITY,
            });
        }
        self.components.push(Box::new(component));
        Ok((self.components.len() - 1) as ComponentIndex)
    }

    pub fn component<R: Replicate>(&self, index: ComponentIndex) -> Option<&SyncBehaviour<R>> {
        self.components
            .get(index as usize)?
            .as_any()
            .downcast_ref::<SyncBehaviour<R>>()
    }

    pub fn component_mut<R: Replicate>(
        &mut self,
        index: ComponentIndex,
    ) -> Option<&mut SyncBehaviour<R>> {
        self.components
            .get_mut(index as usize)?
            .as_any_mut()
            .downcast_mut::<SyncBehaviour<R>>()
    }

    /// True if any behaviour is dirty at `now`
    pub fn is_dirty(&self, now: &GameInstant) -> bool {
        self.components.iter().any(|component| component.is_dirty(now))
    }

    /// Clears every behaviour whose sync interval has elapsed at `now`
    pub fn clear_dirty_components(&mut self, now: &GameInstant) {
        for component in self.components.iter_mut() {
            component.clear_dirty_if_interval_elapsed(now);
        }
    }

    /// Clears every behaviour, whatever its sync interval
    pub fn clear_all_components_dirty_bits(&mut self) {
        for component in self.components.iter_mut() {
            component.clear_all_dirty_bits();
        }
    }

    fn component_mask(&self, mode: SyncMode, now: &GameInstant) -> u64 {
        let mut mask = 0u64;
        for (index, component) in self.components.iter().enumerate() {
            if mode.is_full() || component.is_dirty(now) {
                mask |= 1 << index;
            }
        }
        mask
    }

    /// Writes the behaviours selected by `mode`: all of them for `Full`,
    /// the dirty ones for `Delta`. Returns false, having written nothing,
    /// if none were selected. Behaviours written in a delta are flushed.
    pub fn serialize_all(
        &mut self,
        writer: &mut dyn ByteWrite,
        mode: SyncMode,
        now: &GameInstant,
    ) -> bool {
        let mask = self.component_mask(mode, now);
        if mask == 0 {
            return false;
        }

        UnsignedVariableInteger::new(mask).ser(writer);
        for (index, component) in self.components.iter_mut().enumerate() {
            if mask & (1 << index) == 0 {
                continue;
            }

            if self.verify_lengths {
                let mut payload = ByteWriter::new();
                component.serialize(&mut payload, mode, now);
                UnsignedVariableInteger::new(payload.length() as u64).ser(writer);
                writer.write_bytes(payload.as_slice());
            } else {
                component.serialize(writer, mode, now);
            }

            if mode == SyncMode::Delta {
                component.clear_dirty_if_interval_elapsed(now);
            }
        }

        debug!(
            "SyncEntity: wrote {:?} of {} with component mask {:#b}",
            mode, self.entity_id, mask
        );
        true
    }

    /// Applies a message written by `serialize_all` in the same mode.
    ///
    /// Every carried payload is checked before any behaviour is written, so
    /// on error the entity is unchanged.
    pub fn deserialize_all(
        &mut self,
        reader: &mut ByteReader,
        mode: SyncMode,
        resolver: &dyn EntityResolver,
    ) -> Result<(), ReplicationError> {
        self.check_all(&mut reader.clone(), mode)?;
        self.apply_all(reader, mode, resolver)
    }

    fn read_component_mask(&self, reader: &mut ByteReader) -> Result<u64, ReplicationError> {
        let mask: u64 = UnsignedVariableInteger::de(reader)?.to();

        let component_count = self.components.len();
        if let Some(component_index) = (component_count..64).find(|bit| mask & (1 << bit) != 0) {
            warn!(
                "SyncEntity: {} received component {}, which it does not have",
                self.entity_id, component_index
            );
            return Err(ReplicationError::ComponentMismatch {
                entity_id: self.entity_id,
                component_index: component_index as ComponentIndex,
                component_count,
            });
        }
        Ok(mask)
    }

    fn read_payload<'b>(reader: &mut ByteReader<'b>) -> Result<ByteReader<'b>, SerdeErr> {
        let length = UnsignedVariableInteger::de(reader)?.get();
        let length = usize::try_from(length)
            .map_err(|_| SerdeErr::invalid("payload length", format!("{}", length)))?;
        reader.sub_reader(length)
    }

    fn check_all(&self, reader: &mut ByteReader, mode: SyncMode) -> Result<(), ReplicationError> {
        let mask = self.read_component_mask(reader)?;

        for (index, component) in self.components.iter().enumerate() {
            if mask & (1 << index) == 0 {
                continue;
            }

            if !self.verify_lengths {
                component.check(reader, mode)?;
                continue;
            }

            let mut payload = Self::read_payload(reader)?;
            let length = payload.remaining();
            let consumed = match component.check(&mut payload, mode) {
                Ok(()) => payload.position(),
                Err(ReplicationError::Serde(SerdeErr::Underrun {
                    requested,
                    position,
                    ..
                })) => position.saturating_add(requested),
                Err(err) => return Err(err),
            };
            if consumed != length {
                warn!(
                    "SyncEntity: {} payload of {} is {} byte(s), its schema reads {}",
                    self.entity_id,
                    component.name(),
                    length,
                    consumed
                );
                return Err(ReplicationError::SchemaMismatch {
                    component: component.name(),
                    expected: length,
                    actual: consumed,
                });
            }
        }

        Ok(())
    }

    fn apply_all(
        &mut self,
        reader: &mut ByteReader,
        mode: SyncMode,
        resolver: &dyn EntityResolver,
    ) -> Result<(), ReplicationError> {
        let mask = self.read_component_mask(reader)?;

        for (index, component) in self.components.iter_mut().enumerate() {
            if mask & (1 << index) == 0 {
                continue;
            }

            if self.verify_lengths {
                let mut payload = Self::read_payload(reader)?;
                component.apply(&mut payload, mode, resolver)?;
            } else {
                component.apply(reader, mode, resolver)?;
            }
        }

        Ok(())
    }

    /// Retries references that arrived before their referent was
    /// registered. Returns true if any field changed.
    pub fn resolve_waiting(&mut self, resolver: &dyn EntityResolver) -> bool {
        let mut changed = false;
        for component in self.components.iter_mut() {
            changed |= component.resolve_waiting(resolver);
        }
        changed
    }
}
