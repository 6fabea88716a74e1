//! # binstream
//!
//! Fixed-layout binary packing with byte order control, and a cursor-aware
//! stream built on top of it.
//!
//! ## Overview
//!
//! `binstream` converts scalars, fixed-size arrays, tuples and plain structs
//! to and from raw bytes. A value always packs into the same number of bytes,
//! known at compile time, and the wire format is nothing more than the
//! concatenation of each value's bytes in order. Byte order is a type
//! parameter (`NativeEndian`, `LittleEndian` or `BigEndian`) and only affects
//! multi-byte scalars; arrays and aggregates decompose into scalars.
//!
//! ## Key Features
//!
//! * **Static Classification**: Only [`Packable`]/[`Unpackable`] types convert; anything else fails to compile
//! * **Recursive Conversion**: Arrays of arrays of structs work the same as single integers
//! * **Field Reflection**: [`binary_struct!`] and [`impl_packable!`] derive field-wise conversion
//! * **Capability-Gated Streams**: [`BinaryStream`] only offers the operations its [`Mode`] allows
//! * **Pluggable Text**: Strings go through an optional [`TextConverter`], or are copied raw
//!
//! ## Quick Start
//!
//! ```rust
//! use binstream::*;
//! use std::io::Cursor;
//!
//! binary_struct! {
//!     #[derive(Debug, Clone, Copy, PartialEq)]
//!     pub struct Point {
//!         pub x: i32,
//!         pub y: i32,
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     // One-shot conversion
//!     let bytes = binary::pack::<BigEndian, _>((0x0123u16, Point { x: 1, y: -1 }));
//!     assert_eq!(bytes.len(), 10);
//!     let (tag, point) = binary::unpack::<BigEndian, (u16, Point)>(&bytes)?;
//!     assert_eq!((tag, point), (0x0123, Point { x: 1, y: -1 }));
//!
//!     // Streaming over any seekable channel
//!     let mut stream = BinaryStream::<_, Synchronized, LittleEndian>::new(Cursor::new(Vec::new()))?;
//!     stream.write(&(7u8, [1.5f32, 2.5]))?;
//!     stream.to_begin(0)?;
//!     let (seven, floats) = stream.read::<(u8, [f32; 2])>()?;
//!     assert_eq!((seven, floats), (7, [1.5, 2.5]));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! * **[`traits`]**: `Packable`/`Unpackable` classify what can be converted
//! * **[`binary`]**: Stateless `to_bytes`/`from_bytes`/`pack`/`unpack`
//! * **[`text`]**: `TextCodec` and the `TextConverter` capability
//! * **[`stream`]**: `BinaryStream`, with read/write cursors tracked per [`mode`]
//!
//! Types that are not packable are rejected before the program runs:
//!
//! ```compile_fail
//! // `String` has no fixed size.
//! let bytes = binstream::binary::to_bytes::<binstream::LittleEndian, _>(&String::from("no"));
//! ```
//!
//! ```compile_fail
//! // A shared reference can be packed but never unpacked into.
//! let value = binstream::binary::from_bytes::<binstream::LittleEndian, &u16>(&[0, 0]);
//! ```

#[macro_use]
mod macros;

pub mod binary;
pub mod error;
pub mod mode;
pub mod stream;
pub mod text;
pub mod traits;

// Re-export the main public API for user convenience.
pub use byteorder::{BigEndian, ByteOrder, LittleEndian, NativeEndian, NetworkEndian, BE, LE};
pub use error::{Error, Result};
pub use mode::{Input, Mode, Output, Readable, Synchronized, Unified, Unsynchronized, Writable};
pub use stream::{BinaryInputStream, BinaryOutputStream, BinaryStream, DEFAULT_ENCODING};
pub use text::{CodeUnit, TextCodec, TextConverter, UnicodeConverter};
pub use traits::{Kind, Packable, Unpackable};
