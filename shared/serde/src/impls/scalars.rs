use crate::{
    byte_reader::ByteReader, byte_writer::ByteWrite, error::SerdeErr, serde::Serde,
    ConstByteLength,
};

// Fixed-width little-endian encodings

macro_rules! impl_serde_for_number {
    ($impl_type:ty, $size:literal) => {
        impl Serde for $impl_type {
            fn ser(&self, writer: &mut dyn ByteWrite) {
                writer.write_bytes(&self.to_le_bytes());
            }

            fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
                let bytes = reader.read_array::<$size>()?;
                Ok(<$impl_type>::from_le_bytes(bytes))
            }

            fn byte_length(&self) -> u32 {
                <Self as ConstByteLength>::const_byte_length()
            }
        }

        impl ConstByteLength for $impl_type {
            fn const_byte_length() -> u32 {
                $size
            }
        }
    };
}

impl_serde_for_number!(u8, 1);
impl_serde_for_number!(u16, 2);
impl_serde_for_number!(u32, 4);
impl_serde_for_number!(u64, 8);
impl_serde_for_number!(i8, 1);
impl_serde_for_number!(i16, 2);
impl_serde_for_number!(i32, 4);
impl_serde_for_number!(i64, 8);
impl_serde_for_number!(f32, 4);
impl_serde_for_number!(f64, 8);

impl Serde for bool {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_byte(if *self { 1 } else { 0 });
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        match reader.read_byte()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(SerdeErr::invalid("bool", format!("unexpected byte {}", other))),
        }
    }

    fn byte_length(&self) -> u32 {
        1
    }
}

impl ConstByteLength for bool {
    fn const_byte_length() -> u32 {
        1
    }
}

impl Serde for () {
    fn ser(&self, _: &mut dyn ByteWrite) {}

    fn de(_: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(())
    }

    fn byte_length(&self) -> u32 {
        0
    }
}
