use crate::{
    byte_reader::ByteReader, byte_writer::ByteWrite, error::SerdeErr,
    integer::UnsignedVariableInteger, serde::Serde,
};

use super::string::read_length;

impl<T: Serde> Serde for Option<T> {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        match self {
            Some(value) => {
                true.ser(writer);
                value.ser(writer);
            }
            None => {
                false.ser(writer);
            }
        }
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        if bool::de(reader)? {
            Ok(Some(T::de(reader)?))
        } else {
            Ok(None)
        }
    }

    fn byte_length(&self) -> u32 {
        match self {
            Some(value) => 1 + value.byte_length(),
            None => 1,
        }
    }
}

impl<T: Serde> Serde for Vec<T> {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        UnsignedVariableInteger::new(self.len() as u64).ser(writer);
        for item in self {
            item.ser(writer);
        }
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        // bounded by the bytes left, so a forged length can't force a huge allocation
        let length = read_length(reader)?;
        let mut output = Vec::with_capacity(length);
        for _ in 0..length {
            output.push(T::de(reader)?);
        }
        Ok(output)
    }

    fn byte_length(&self) -> u32 {
        let mut output = UnsignedVariableInteger::new(self.len() as u64).byte_length();
        for item in self {
            output += item.byte_length();
        }
        output
    }
}

impl<T: Serde> Serde for Box<T> {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        self.as_ref().ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Box::new(T::de(reader)?))
    }

    fn byte_length(&self) -> u32 {
        self.as_ref().byte_length()
    }
}
