use crate::error::SerdeErr;

/// Cursor over a received byte sequence
#[derive(Clone)]
pub struct ByteReader<'b> {
    buffer: &'b [u8],
    position: usize,
}

impl<'b> ByteReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Number of bytes consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_byte(&mut self) -> Result<u8, SerdeErr> {
        let Some(byte) = self.buffer.get(self.position) else {
            return Err(self.underrun(1));
        };
        self.position += 1;
        Ok(*byte)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'b [u8], SerdeErr> {
        if count > self.remaining() {
            return Err(self.underrun(count));
        }
        let start = self.position;
        self.position += count;
        Ok(&self.buffer[start..self.position])
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], SerdeErr> {
        let bytes = self.read_bytes(N)?;
        let mut output = [0u8; N];
        output.copy_from_slice(bytes);
        Ok(output)
    }

    /// Splits off the next `length` bytes into their own reader, advancing
    /// this one past them.
    pub fn sub_reader(&mut self, length: usize) -> Result<ByteReader<'b>, SerdeErr> {
        let bytes = self.read_bytes(length)?;
        Ok(ByteReader::new(bytes))
    }

    fn underrun(&self, requested: usize) -> SerdeErr {
        SerdeErr::Underrun {
            requested,
            remaining: self.remaining(),
            position: self.position,
        }
    }
}
