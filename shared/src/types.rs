/// Position of a tracked field within its component, which is also the
/// index of its dirty bit
pub type FieldIndex = u8;
/// Position of a behaviour within its entity
pub type ComponentIndex = u8;
