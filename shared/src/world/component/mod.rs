pub mod component_kinds;
pub mod component_property;
pub mod diff_mask;
pub mod entity_property;
pub mod error;
pub mod property;
pub mod property_mutate;
pub mod replicate;
pub mod replicated_field;
pub mod schema;
