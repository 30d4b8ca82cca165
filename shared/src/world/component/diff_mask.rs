use syncvar_serde::{ByteReader, ByteWrite, SerdeErr};

use crate::types::FieldIndex;

/// One dirty bit per tracked field, packed least-significant bit first.
///
/// The encoded width is fixed by the field count, which both peers know from
/// the component's schema, so no length prefix is written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffMask {
    mask: Vec<u8>,
    field_count: u8,
}

impl DiffMask {
    pub fn new(field_count: u8) -> Self {
        Self {
            mask: vec![0; Self::byte_count_for(field_count)],
            field_count,
        }
    }

    fn byte_count_for(field_count: u8) -> usize {
        (field_count as usize + 7) / 8
    }

    pub fn field_count(&self) -> u8 {
        self.field_count
    }

    pub fn byte_count(&self) -> usize {
        self.mask.len()
    }

    pub fn bit(&self, index: FieldIndex) -> Option<bool> {
        if index >= self.field_count {
            return None;
        }
        let byte = self.mask[(index / 8) as usize];
        Some(byte & (1 << (index % 8)) != 0)
    }

    /// Returns false when the index is outside the mask
    pub fn set_bit(&mut self, index: FieldIndex, value: bool) -> bool {
        if index >= self.field_count {
            return false;
        }
        let byte = &mut self.mask[(index / 8) as usize];
        let flag = 1 << (index % 8);
        if value {
            *byte |= flag;
        } else {
            *byte &= !flag;
        }
        true
    }

    pub fn clear(&mut self) {
        for byte in self.mask.iter_mut() {
            *byte = 0;
        }
    }

    pub fn is_clear(&self) -> bool {
        self.mask.iter().all(|byte| *byte == 0)
    }

    /// Indices of set bits, ascending
    pub fn dirty_indices(&self) -> impl Iterator<Item = FieldIndex> + '_ {
        (0..self.field_count).filter(|index| self.bit(*index) == Some(true))
    }

    pub fn write(&self, writer: &mut dyn ByteWrite) {
        writer.write_bytes(&self.mask);
    }

    /// Reads a mask sized for `field_count` fields. Padding bits above the
    /// field count are kept so the caller can detect a sender with a larger
    /// schema via `first_unknown_bit`.
    pub fn read(reader: &mut ByteReader, field_count: u8) -> Result<Self, SerdeErr> {
        let bytes = reader.read_bytes(Self::byte_count_for(field_count))?;
        Ok(Self {
            mask: bytes.to_vec(),
            field_count,
        })
    }

    /// First set bit at or above the field count, if any
    pub fn first_unknown_bit(&self) -> Option<u8> {
        let total_bits = (self.mask.len() * 8) as u16;
        (self.field_count as u16..total_bits)
            .find(|bit| self.mask[(bit / 8) as usize] & (1 << (bit % 8)) != 0)
            .map(|bit| bit as u8)
    }
}
