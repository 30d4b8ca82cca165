pub mod component;
pub mod entity;
pub mod host;
pub mod sync;
