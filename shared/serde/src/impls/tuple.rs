use crate::{byte_reader::ByteReader, byte_writer::ByteWrite, error::SerdeErr, serde::Serde};

macro_rules! impl_serde_for_tuple {
    ($($name:ident),+) => {
        impl<$($name: Serde),+> Serde for ($($name,)+) {
            #[allow(non_snake_case)]
            fn ser(&self, writer: &mut dyn ByteWrite) {
                let ($($name,)+) = self;
                $($name.ser(writer);)+
            }

            fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
                Ok(($($name::de(reader)?,)+))
            }

            #[allow(non_snake_case)]
            fn byte_length(&self) -> u32 {
                let ($($name,)+) = self;
                0 $(+ $name.byte_length())+
            }
        }
    };
}

impl_serde_for_tuple!(A);
impl_serde_for_tuple!(A, B);
impl_serde_for_tuple!(A, B, C);
impl_serde_for_tuple!(A, B, C, D);
