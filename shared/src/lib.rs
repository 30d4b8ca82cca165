//! # SyncVar Shared
//! Field-level state replication: dirty tracking, interval-gated flushing,
//! and full/delta serialization of replicated components and the entity
//! references they hold.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use syncvar_serde::{
    ByteCounter, ByteReader, ByteWrite, ByteWriter, ConstByteLength, Serde, SerdeErr,
    SerdeIntegerConversion, SignedVariableInteger, UnsignedVariableInteger,
};

mod constants;
mod game_time;
mod protocol;
mod types;
mod world;

pub use constants::{MAX_COMPONENTS_PER_ENTITY, MAX_FIELDS_PER_COMPONENT};
pub use game_time::GameInstant;
pub use protocol::{Protocol, ProtocolError};
pub use types::{ComponentIndex, FieldIndex};
pub use world::{
    component::{
        component_kinds::{ComponentKind, ComponentKinds},
        component_property::{ComponentProperty, ComponentRef},
        diff_mask::DiffMask,
        entity_property::EntityProperty,
        error::ComponentError,
        property::{Property, PropertyError},
        property_mutate::{PropertyMutate, PropertyMutator},
        replicate::Replicate,
        replicated_field::ReplicatedField,
        schema::{FieldKind, FieldSchema, ReplicaSchema, ReplicaSchemaBuilder},
    },
    entity::{
        entity_id::EntityId,
        entity_resolver::{EntityLookup, EntityRegistry, EntityResolver, FakeEntityResolver},
        error::EntityError,
    },
    host::{
        error::MutChannelError,
        mut_channel::{MutChannel, MutReceiver, MutSender},
        sync_timer::SyncTimer,
    },
    sync::{
        behaviour::{SyncBehaviour, SyncComponent},
        config::SyncConfig,
        error::ReplicationError,
        sync_entity::SyncEntity,
        sync_mode::SyncMode,
    },
};
