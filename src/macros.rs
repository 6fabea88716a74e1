//! Field reflection for plain structs.
//!
//! Rust has no runtime field enumeration, so these macros generate the
//! [`Packable`](crate::Packable) and [`Unpackable`](crate::Unpackable) impls
//! from the field list instead. Fields are converted in declaration order,
//! each with the caller's byte order, and no padding is ever emitted. A
//! struct without one of these impls cannot be converted at all:
//!
//! ```compile_fail
//! use binstream::{binary, BigEndian};
//!
//! struct Plain {
//!     a: u8,
//!     b: u16,
//! }
//!
//! let bytes = binary::to_bytes::<BigEndian, _>(&Plain { a: 1, b: 2 });
//! ```

/// Implements [`Packable`](crate::Packable) and
/// [`Unpackable`](crate::Unpackable) for an existing struct.
///
/// List every field with its type, in declaration order.
///
/// ```rust
/// use binstream::{binary, impl_packable, BigEndian};
///
/// #[derive(Debug, PartialEq)]
/// struct Header {
///     magic: u32,
///     version: u16,
/// }
///
/// impl_packable!(Header { magic: u32, version: u16 });
///
/// let bytes = binary::to_bytes::<BigEndian, _>(&Header { magic: 0xCAFE_BABE, version: 3 });
/// assert_eq!(bytes, [0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x03]);
/// ```
#[macro_export]
macro_rules! impl_packable {
    ($ty:ty { $($field:ident : $fty:ty),+ $(,)? }) => {
        impl $crate::Packable for $ty {
            const SIZE: usize = 0 $(+ <$fty as $crate::Packable>::SIZE)+;
            const KIND: $crate::Kind = $crate::Kind::Aggregate;

            #[allow(unused_assignments)]
            fn pack_into<E: $crate::ByteOrder>(&self, out: &mut [u8]) {
                let mut offset = 0;
                $(
                    let end = offset + <$fty as $crate::Packable>::SIZE;
                    <$fty as $crate::Packable>::pack_into::<E>(&self.$field, &mut out[offset..end]);
                    offset = end;
                )+
            }
        }

        impl $crate::Unpackable for $ty {
            #[allow(unused_assignments)]
            fn unpack_from<E: $crate::ByteOrder>(raw: &[u8]) -> Self {
                let mut offset = 0;
                Self {
                    $(
                        $field: {
                            let end = offset + <$fty as $crate::Packable>::SIZE;
                            let value =
                                <$fty as $crate::Unpackable>::unpack_from::<E>(&raw[offset..end]);
                            offset = end;
                            value
                        },
                    )+
                }
            }
        }
    };
}

/// Defines one or more structs together with their packing impls.
///
/// ```rust
/// use binstream::{binary, binary_struct, LittleEndian};
///
/// binary_struct! {
///     #[derive(Debug, Clone, Copy, PartialEq)]
///     pub struct Sample {
///         pub channel: u8,
///         pub value: i16,
///     }
/// }
///
/// let sample = Sample { channel: 2, value: -2 };
/// let bytes = binary::to_bytes::<LittleEndian, _>(&sample);
/// assert_eq!(bytes, [0x02, 0xFE, 0xFF]);
/// assert_eq!(binary::from_bytes::<LittleEndian, Sample>(&bytes)?, sample);
/// # Ok::<(), binstream::Error>(())
/// ```
#[macro_export]
macro_rules! binary_struct {
    ($(
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($(#[$fmeta:meta])* $fvis:vis $field:ident : $fty:ty),+ $(,)?
        }
    )+) => {
        $(
            $(#[$meta])*
            $vis struct $name {
                $($(#[$fmeta])* $fvis $field: $fty),+
            }

            $crate::impl_packable!($name { $($field: $fty),+ });
        )+
    };
}
