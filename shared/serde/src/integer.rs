use crate::{byte_reader::ByteReader, byte_writer::ByteWrite, error::SerdeErr, serde::Serde};

pub trait SerdeIntegerConversion<const SIGNED: bool> {
    fn from(value: &SerdeVarInt<SIGNED>) -> Self;
}

pub type UnsignedVariableInteger = SerdeVarInt<false>;
pub type SignedVariableInteger = SerdeVarInt<true>;

// Seven payload bits per byte, high bit set while more bytes follow.
const PAYLOAD_BITS: u32 = 7;
const CONTINUE_FLAG: u8 = 0x80;
const PAYLOAD_MASK: u8 = 0x7F;
const MAX_ENCODED_BYTES: usize = 10;

// This outer generic type wraps an inner type that is not generic, to reduce code bloat through monomorphization.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct SerdeVarInt<const SIGNED: bool> {
    inner: SerdeVarIntInner,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
struct SerdeVarIntInner {
    inner_value: i128,
    signed: bool,
}

impl SerdeVarIntInner {
    fn try_new(signed: bool, value: i128) -> Result<Self, SerdeErr> {
        if signed {
            if value < i64::MIN as i128 || value > i64::MAX as i128 {
                return Err(SerdeErr::invalid(
                    "SignedVariableInteger",
                    format!("{} does not fit in 64 bits", value),
                ));
            }
        } else {
            if value < 0 {
                return Err(SerdeErr::invalid(
                    "UnsignedVariableInteger",
                    format!("can't encode negative number {}", value),
                ));
            }
            if value > u64::MAX as i128 {
                return Err(SerdeErr::invalid(
                    "UnsignedVariableInteger",
                    format!("{} does not fit in 64 bits", value),
                ));
            }
        }

        Ok(Self {
            inner_value: value,
            signed,
        })
    }

    fn get(&self) -> i128 {
        self.inner_value
    }

    // zig-zag keeps small negative numbers short
    fn encoded(&self) -> u64 {
        if self.signed {
            let value = self.inner_value as i64;
            ((value << 1) ^ (value >> 63)) as u64
        } else {
            self.inner_value as u64
        }
    }

    fn decoded(signed: bool, raw: u64) -> i128 {
        if signed {
            (((raw >> 1) as i64) ^ -((raw & 1) as i64)) as i128
        } else {
            raw as i128
        }
    }

    fn ser(&self, writer: &mut dyn ByteWrite) {
        let mut value = self.encoded();
        loop {
            let payload = (value as u8) & PAYLOAD_MASK;
            value >>= PAYLOAD_BITS;
            if value == 0 {
                writer.write_byte(payload);
                return;
            }
            writer.write_byte(payload | CONTINUE_FLAG);
        }
    }

    fn de(reader: &mut ByteReader, signed: bool) -> Result<Self, SerdeErr> {
        let mut output: u64 = 0;

        for index in 0..MAX_ENCODED_BYTES {
            let byte = reader.read_byte()?;
            let payload = (byte & PAYLOAD_MASK) as u64;
            let shift = index as u32 * PAYLOAD_BITS;

            // the tenth byte may only carry the single remaining bit
            if index == MAX_ENCODED_BYTES - 1 && payload > 1 {
                return Err(SerdeErr::invalid("VariableInteger", "overflows 64 bits"));
            }
            output |= payload << shift;

            if byte & CONTINUE_FLAG == 0 {
                return Ok(Self {
                    inner_value: Self::decoded(signed, output),
                    signed,
                });
            }
        }

        Err(SerdeErr::invalid(
            "VariableInteger",
            format!("longer than {} bytes", MAX_ENCODED_BYTES),
        ))
    }

    fn byte_length(&self) -> u32 {
        let mut value = self.encoded();
        let mut output: u32 = 1;
        while value >= (1 << PAYLOAD_BITS) {
            value >>= PAYLOAD_BITS;
            output += 1;
        }
        output
    }
}

impl<const SIGNED: bool> SerdeVarInt<SIGNED> {
    /// # Panics
    ///
    /// Panics if the value is out of range for this integer kind.
    /// Use `try_new` for non-panicking construction.
    pub fn new<T: Into<i128>>(value: T) -> Self {
        Self::try_new(value).expect("value out of range for variable integer")
    }

    pub fn try_new<T: Into<i128>>(value: T) -> Result<Self, SerdeErr> {
        Ok(Self {
            inner: SerdeVarIntInner::try_new(SIGNED, value.into())?,
        })
    }

    pub fn get(&self) -> i128 {
        self.inner.get()
    }

    pub fn to<T: SerdeIntegerConversion<SIGNED>>(&self) -> T {
        T::from(self)
    }
}

impl<const SIGNED: bool> Serde for SerdeVarInt<SIGNED> {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        self.inner.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let inner = SerdeVarIntInner::de(reader, SIGNED)?;
        Ok(Self { inner })
    }

    fn byte_length(&self) -> u32 {
        self.inner.byte_length()
    }
}

impl<const SIGNED: bool, T: Into<i128>> From<T> for SerdeVarInt<SIGNED> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<const SIGNED: bool, T: TryFrom<i128>> SerdeIntegerConversion<SIGNED> for T {
    fn from(value: &SerdeVarInt<SIGNED>) -> Self {
        let Ok(t_value) = T::try_from(value.inner.inner_value) else {
            panic!("SerdeVarInt's value is out of range to convert to this type.");
        };
        t_value
    }
}
