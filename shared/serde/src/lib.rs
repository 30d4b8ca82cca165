//! # Syncvar Serde
//! Byte-oriented writer, reader and codec trait used to encode replicated
//! field state.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod byte_reader;
mod byte_writer;
mod error;
mod impls;
mod integer;
mod serde;

pub use byte_reader::ByteReader;
pub use byte_writer::{ByteCounter, ByteWrite, ByteWriter};
pub use error::SerdeErr;
pub use integer::{
    SerdeIntegerConversion, SerdeVarInt, SignedVariableInteger, UnsignedVariableInteger,
};
pub use serde::{ConstByteLength, Serde};
