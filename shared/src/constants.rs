/// Dirty masks are addressed with a single byte per field index, and the
/// entity-level component mask is a `u64`.
pub const MAX_FIELDS_PER_COMPONENT: u8 = 64;
pub const MAX_COMPONENTS_PER_ENTITY: usize = 64;
