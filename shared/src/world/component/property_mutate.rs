use crate::types::FieldIndex;

/// Receives notice that the tracked field at `property_index` was written
pub trait PropertyMutate: PropertyMutateClone + Send + Sync + 'static {
    /// Returns false if the notice could not be recorded
    fn mutate(&mut self, property_index: FieldIndex) -> bool;
}

pub trait PropertyMutateClone {
    fn clone_box(&self) -> Box<dyn PropertyMutate>;
}

impl<T: 'static + Clone + PropertyMutate> PropertyMutateClone for T {
    fn clone_box(&self) -> Box<dyn PropertyMutate> {
        Box::new(self.clone())
    }
}

/// Handle shared by every tracked field of one component, pointing at that
/// component's dirty tracker
pub struct PropertyMutator {
    inner: Box<dyn PropertyMutate>,
}

impl PropertyMutator {
    pub fn new<M: PropertyMutate>(mutator: M) -> Self {
        Self {
            inner: Box::new(mutator),
        }
    }

    pub fn mutate(&mut self, property_index: FieldIndex) -> bool {
        self.inner.mutate(property_index)
    }

    pub fn clone_new(&self) -> Self {
        Self {
            inner: self.inner.clone_box(),
        }
    }
}

impl Clone for PropertyMutator {
    fn clone(&self) -> Self {
        self.clone_new()
    }
}
