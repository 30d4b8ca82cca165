use std::any::Any;

use super::{replicated_field::ReplicatedField, schema::ReplicaSchema};

/// A component whose tracked fields are replicated.
///
/// `fields` and `fields_mut` must list the same fields, in the order
/// declared by `schema`.
pub trait Replicate: Any {
    fn schema() -> ReplicaSchema
    where
        Self: Sized;

    fn fields(&self) -> Vec<&dyn ReplicatedField>;

    fn fields_mut(&mut self) -> Vec<&mut dyn ReplicatedField>;
}
