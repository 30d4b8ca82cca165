use crate::{
    byte_reader::ByteReader, byte_writer::ByteWrite, error::SerdeErr,
    integer::UnsignedVariableInteger, serde::Serde,
};

impl Serde for String {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        UnsignedVariableInteger::new(self.len() as u64).ser(writer);
        writer.write_bytes(self.as_bytes());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let length: usize = read_length(reader)?;
        let bytes = reader.read_bytes(length)?;
        String::from_utf8(bytes.to_vec()).map_err(|err| SerdeErr::invalid("String", err.to_string()))
    }

    fn byte_length(&self) -> u32 {
        UnsignedVariableInteger::new(self.len() as u64).byte_length() + self.len() as u32
    }
}

// Length prefixes are checked against what is actually left in the buffer
// before anything is allocated.
pub(crate) fn read_length(reader: &mut ByteReader) -> Result<usize, SerdeErr> {
    let length = UnsignedVariableInteger::de(reader)?.get();
    if length > reader.remaining() as i128 {
        return Err(SerdeErr::Underrun {
            requested: usize::try_from(length).unwrap_or(usize::MAX),
            remaining: reader.remaining(),
            position: reader.position(),
        });
    }
    Ok(length as usize)
}
