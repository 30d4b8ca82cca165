use std::fmt;

use syncvar_serde::{ByteReader, ByteWrite, Serde, SerdeErr, UnsignedVariableInteger};

/// Network identifier of a spawned entity. Zero is the null reference.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord, Default)]
pub struct EntityId(u32);

impl EntityId {
    pub const NULL: EntityId = EntityId(0);

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for EntityId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl Serde for EntityId {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        UnsignedVariableInteger::new(self.0).ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let value = UnsignedVariableInteger::de(reader)?.get();
        let value = u32::try_from(value)
            .map_err(|_| SerdeErr::invalid("EntityId", format!("{} exceeds 32 bits", value)))?;
        Ok(Self(value))
    }

    fn byte_length(&self) -> u32 {
        UnsignedVariableInteger::new(self.0).byte_length()
    }
}
