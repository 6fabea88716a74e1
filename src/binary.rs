//! Converts packable values to and from raw byte buffers.
//!
//! The wire format is the plain concatenation of every value's bytes in call
//! order. There are no headers, length prefixes or padding, so a reader must
//! know the exact type sequence and byte order that produced the buffer.
//!
//! ```rust
//! use binstream::{binary, BigEndian, LittleEndian};
//!
//! assert_eq!(binary::to_bytes::<LittleEndian, _>(&0x0123u16), [0x23, 0x01]);
//! assert_eq!(binary::to_bytes::<BigEndian, _>(&0x0123u16), [0x01, 0x23]);
//!
//! let bytes = binary::pack::<LittleEndian, _>((0x0123u16, 0x01234567u32));
//! let (a, b) = binary::unpack::<LittleEndian, (u16, u32)>(&bytes)?;
//! assert_eq!((a, b), (0x0123, 0x01234567));
//! # Ok::<(), binstream::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::traits::{Packable, Unpackable};
use byteorder::ByteOrder;

/// Total number of bytes a value of type `T` packs into.
///
/// For a tuple this is the sum over its fields, the equivalent of summing
/// the sizes of a heterogeneous list of types.
pub const fn length_of<T: Packable>() -> usize {
    T::SIZE
}

/// Serializes one value into a new buffer of exactly `T::SIZE` bytes.
pub fn to_bytes<E: ByteOrder, T: Packable>(value: &T) -> Vec<u8> {
    let mut raw = vec![0u8; T::SIZE];
    value.pack_into::<E>(&mut raw);
    raw
}

/// Serializes one value into a caller-provided buffer.
///
/// Fails with [`Error::SizeMismatch`] unless `out` is exactly `T::SIZE` bytes.
pub fn to_bytes_into<E: ByteOrder, T: Packable>(value: &T, out: &mut [u8]) -> Result<()> {
    if out.len() != T::SIZE {
        return Err(Error::size_mismatch(T::SIZE, out.len()));
    }
    value.pack_into::<E>(out);
    Ok(())
}

/// Reconstructs one value from exactly `T::SIZE` bytes.
pub fn from_bytes<E: ByteOrder, T: Unpackable>(raw: &[u8]) -> Result<T> {
    if raw.len() != T::SIZE {
        return Err(Error::size_mismatch(T::SIZE, raw.len()));
    }
    Ok(T::unpack_from::<E>(raw))
}

/// Packs a heterogeneous list of values, given as a tuple, in argument order.
///
/// `pack((a, b))` produces the same bytes as `to_bytes(&a)` followed by
/// `to_bytes(&b)`.
pub fn pack<E: ByteOrder, T: Packable>(values: T) -> Vec<u8> {
    to_bytes::<E, T>(&values)
}

/// Unpacks a heterogeneous list of values, given as a tuple type, from the
/// front of `raw`.
///
/// The buffer is split into consecutive chunks of each field's size. Bytes
/// past `T::SIZE` are ignored; a shorter buffer fails with
/// [`Error::SizeMismatch`].
pub fn unpack<E: ByteOrder, T: Unpackable>(raw: &[u8]) -> Result<T> {
    if raw.len() < T::SIZE {
        return Err(Error::size_mismatch(T::SIZE, raw.len()));
    }
    Ok(T::unpack_from::<E>(&raw[..T::SIZE]))
}
