//! Core traits for the binstream library.
//!
//! These traits classify which types may be converted to and from raw bytes.
//! Classification is purely static: a type that does not implement
//! [`Packable`] (or [`Unpackable`]) cannot be passed to the converter or the
//! stream API at all, so there is no runtime "wrong type" error.

use byteorder::ByteOrder;

/// The conversion path a packable type takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A single integer, float or boolean. The only kind affected by byte order directly.
    Scalar,
    /// A fixed-length array, converted element by element.
    Sequence,
    /// A tuple or struct, converted field by field in declaration order.
    Aggregate,
}

/// A trait for types that can be serialized into a fixed number of bytes.
///
/// The serialized size is known at compile time and never depends on the
/// value. Implementations write exactly [`Packable::SIZE`] bytes and apply the
/// byte order `E` to every multi-byte scalar they contain.
///
/// Structs gain this trait through [`impl_packable!`](crate::impl_packable)
/// or [`binary_struct!`](crate::binary_struct).
pub trait Packable {
    /// Number of bytes produced by [`Packable::pack_into`].
    const SIZE: usize;

    /// Which conversion path this type takes.
    const KIND: Kind;

    /// Writes the value into `out` using byte order `E`.
    ///
    /// `out` must be exactly [`Packable::SIZE`] bytes long. The converter in
    /// [`crate::binary`] guarantees this; direct callers must do the same.
    fn pack_into<E: ByteOrder>(&self, out: &mut [u8]);
}

/// A trait for types that can be reconstructed from their packed bytes.
///
/// Only owned values qualify. A borrowed `&T` is [`Packable`] but not
/// `Unpackable`, since a read-only reference cannot be a destination.
pub trait Unpackable: Packable + Sized {
    /// Reads a value from `raw` using byte order `E`.
    ///
    /// `raw` must be exactly [`Packable::SIZE`] bytes long.
    fn unpack_from<E: ByteOrder>(raw: &[u8]) -> Self;
}

impl Packable for u8 {
    const SIZE: usize = 1;
    const KIND: Kind = Kind::Scalar;

    #[inline]
    fn pack_into<E: ByteOrder>(&self, out: &mut [u8]) {
        out[0] = *self;
    }
}

impl Unpackable for u8 {
    #[inline]
    fn unpack_from<E: ByteOrder>(raw: &[u8]) -> Self {
        raw[0]
    }
}

impl Packable for i8 {
    const SIZE: usize = 1;
    const KIND: Kind = Kind::Scalar;

    #[inline]
    fn pack_into<E: ByteOrder>(&self, out: &mut [u8]) {
        out[0] = *self as u8;
    }
}

impl Unpackable for i8 {
    #[inline]
    fn unpack_from<E: ByteOrder>(raw: &[u8]) -> Self {
        raw[0] as i8
    }
}

// Any non-zero byte reads back as `true`.
impl Packable for bool {
    const SIZE: usize = 1;
    const KIND: Kind = Kind::Scalar;

    #[inline]
    fn pack_into<E: ByteOrder>(&self, out: &mut [u8]) {
        out[0] = u8::from(*self);
    }
}

impl Unpackable for bool {
    #[inline]
    fn unpack_from<E: ByteOrder>(raw: &[u8]) -> Self {
        raw[0] != 0
    }
}

macro_rules! impl_scalar {
    ($($ty:ty => $read:ident, $write:ident;)+) => {
        $(
            impl Packable for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();
                const KIND: Kind = Kind::Scalar;

                #[inline]
                fn pack_into<E: ByteOrder>(&self, out: &mut [u8]) {
                    E::$write(out, *self);
                }
            }

            impl Unpackable for $ty {
                #[inline]
                fn unpack_from<E: ByteOrder>(raw: &[u8]) -> Self {
                    E::$read(raw)
                }
            }
        )+
    };
}

impl_scalar! {
    u16 => read_u16, write_u16;
    u32 => read_u32, write_u32;
    u64 => read_u64, write_u64;
    u128 => read_u128, write_u128;
    i16 => read_i16, write_i16;
    i32 => read_i32, write_i32;
    i64 => read_i64, write_i64;
    i128 => read_i128, write_i128;
    f32 => read_f32, write_f32;
    f64 => read_f64, write_f64;
}

impl<T: Packable, const N: usize> Packable for [T; N] {
    const SIZE: usize = T::SIZE * N;
    const KIND: Kind = Kind::Sequence;

    fn pack_into<E: ByteOrder>(&self, out: &mut [u8]) {
        if T::SIZE == 0 {
            return;
        }
        for (item, chunk) in self.iter().zip(out.chunks_exact_mut(T::SIZE)) {
            item.pack_into::<E>(chunk);
        }
    }
}

impl<T: Unpackable, const N: usize> Unpackable for [T; N] {
    fn unpack_from<E: ByteOrder>(raw: &[u8]) -> Self {
        std::array::from_fn(|i| T::unpack_from::<E>(&raw[i * T::SIZE..(i + 1) * T::SIZE]))
    }
}

impl<T: Packable> Packable for &T {
    const SIZE: usize = T::SIZE;
    const KIND: Kind = T::KIND;

    #[inline]
    fn pack_into<E: ByteOrder>(&self, out: &mut [u8]) {
        (**self).pack_into::<E>(out)
    }
}

macro_rules! impl_tuple {
    ($($name:ident . $idx:tt),+) => {
        impl<$($name: Packable),+> Packable for ($($name,)+) {
            const SIZE: usize = 0 $(+ <$name as Packable>::SIZE)+;
            const KIND: Kind = Kind::Aggregate;

            #[allow(unused_assignments)]
            fn pack_into<E: ByteOrder>(&self, out: &mut [u8]) {
                let mut offset = 0;
                $(
                    let end = offset + <$name as Packable>::SIZE;
                    self.$idx.pack_into::<E>(&mut out[offset..end]);
                    offset = end;
                )+
            }
        }

        impl<$($name: Unpackable),+> Unpackable for ($($name,)+) {
            #[allow(unused_assignments)]
            fn unpack_from<E: ByteOrder>(raw: &[u8]) -> Self {
                let mut offset = 0;
                ($({
                    let end = offset + <$name as Packable>::SIZE;
                    let value = <$name as Unpackable>::unpack_from::<E>(&raw[offset..end]);
                    offset = end;
                    value
                },)+)
            }
        }
    };
}

impl_tuple!(A.0);
impl_tuple!(A.0, B.1);
impl_tuple!(A.0, B.1, C.2);
impl_tuple!(A.0, B.1, C.2, D.3);
impl_tuple!(A.0, B.1, C.2, D.3, F.4);
impl_tuple!(A.0, B.1, C.2, D.3, F.4, G.5);
impl_tuple!(A.0, B.1, C.2, D.3, F.4, G.5, H.6);
impl_tuple!(A.0, B.1, C.2, D.3, F.4, G.5, H.6, I.7);
impl_tuple!(A.0, B.1, C.2, D.3, F.4, G.5, H.6, I.7, J.8);
impl_tuple!(A.0, B.1, C.2, D.3, F.4, G.5, H.6, I.7, J.8, K.9);
impl_tuple!(A.0, B.1, C.2, D.3, F.4, G.5, H.6, I.7, J.8, K.9, L.10);
impl_tuple!(A.0, B.1, C.2, D.3, F.4, G.5, H.6, I.7, J.8, K.9, L.10, M.11);
