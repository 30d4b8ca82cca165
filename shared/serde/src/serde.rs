use crate::{
    byte_reader::ByteReader,
    byte_writer::{ByteCounter, ByteWrite},
    error::SerdeErr,
};

/// A type that can be written to and read from a byte stream.
///
/// Implementations must be symmetric: `de` consumes exactly the bytes `ser`
/// produced.
pub trait Serde: Sized + Clone + PartialEq {
    /// Encodes into the writer
    fn ser(&self, writer: &mut dyn ByteWrite);

    /// Decodes from the reader
    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr>;

    /// Number of bytes `ser` writes for this value
    fn byte_length(&self) -> u32 {
        let mut counter = ByteCounter::new();
        self.ser(&mut counter);
        counter.bytes_written()
    }
}

/// Implemented by types whose encoding is always the same size
pub trait ConstByteLength {
    fn const_byte_length() -> u32;
}
