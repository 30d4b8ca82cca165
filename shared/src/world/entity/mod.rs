pub mod entity_id;
pub mod entity_resolver;
pub mod error;
