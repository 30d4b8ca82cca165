use log::warn;
use std::{
    fmt,
    ops::{Deref, DerefMut},
};
use thiserror::Error;

use syncvar_serde::{ByteReader, ByteWrite, Serde, SerdeErr};

use crate::{
    types::FieldIndex,
    world::{
        component::{property_mutate::PropertyMutator, replicated_field::ReplicatedField, schema::FieldKind},
        entity::entity_resolver::EntityResolver,
    },
};

/// Errors that can occur during Property operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The field was written before its component was registered, so there
    /// is no dirty tracker to notify
    #[error("{property_type} has no mutator. Register its component before mutating it")]
    MutatorNotSet { property_type: &'static str },
}

/// A tracked value-type field of a Component.
///
/// Every write marks the field dirty, including writes of a value equal to
/// the current one.
#[derive(Clone)]
pub struct Property<T: Serde> {
    inner: T,
    mutator: Option<PropertyMutator>,
    index: FieldIndex,
}

impl<T: Serde> Property<T> {
    /// Create a new Property. It starts tracking writes once its component
    /// is registered.
    pub fn new(value: T) -> Self {
        Self {
            inner: value,
            mutator: None,
            index: 0,
        }
    }

    /// Replaces the value and marks the field dirty
    pub fn set(&mut self, value: T) {
        self.mutate();
        self.inner = value;
    }

    /// Replaces the value and marks the field dirty
    ///
    /// Returns an error, leaving the value untouched, if the Property has no
    /// mutator yet.
    pub fn try_set(&mut self, value: T) -> Result<(), PropertyError> {
        self.try_mutate()?;
        self.inner = value;
        Ok(())
    }

    /// Try to get mutable access to the value, marking the field dirty
    pub fn try_deref_mut(&mut self) -> Result<&mut T, PropertyError> {
        self.try_mutate()?;
        Ok(&mut self.inner)
    }

    pub fn has_mutator(&self) -> bool {
        self.mutator.is_some()
    }

    pub fn index(&self) -> FieldIndex {
        self.index
    }

    /// Compare to another property
    pub fn equals(&self, other: &Self) -> bool {
        self.inner == other.inner
    }

    fn mutate(&mut self) {
        let Some(mutator) = &mut self.mutator else {
            warn!("Property should have a mutator before it is mutated. Was its component registered?");
            return;
        };
        let _success = mutator.mutate(self.index);
    }

    fn try_mutate(&mut self) -> Result<(), PropertyError> {
        let Some(mutator) = &mut self.mutator else {
            return Err(PropertyError::MutatorNotSet {
                property_type: "Property",
            });
        };
        let _success = mutator.mutate(self.index);
        Ok(())
    }
}

impl<T: Serde> ReplicatedField for Property<T> {
    fn kind(&self) -> FieldKind {
        FieldKind::Value(std::any::type_name::<T>())
    }

    fn attach(&mut self, mutator: &PropertyMutator, index: FieldIndex) {
        self.mutator = Some(mutator.clone_new());
        self.index = index;
    }

    fn write(&self, writer: &mut dyn ByteWrite) {
        self.inner.ser(writer);
    }

    fn skip(&self, reader: &mut ByteReader) -> Result<(), SerdeErr> {
        T::de(reader)?;
        Ok(())
    }

    fn read(
        &mut self,
        reader: &mut ByteReader,
        _resolver: &dyn EntityResolver,
    ) -> Result<(), SerdeErr> {
        self.inner = T::de(reader)?;
        Ok(())
    }
}

// It could be argued that Property here is a type of smart-pointer,
// but honestly this is mainly for the convenience of type coercion
impl<T: Serde> Deref for Property<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T: Serde> DerefMut for Property<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // Just assume inner value will be changed, queue for update
        self.mutate();
        &mut self.inner
    }
}

impl<T: Serde + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.inner)
            .field("index", &self.index)
            .finish()
    }
}
