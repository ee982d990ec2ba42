//! Types for compile-time endianness.

use core::fmt;
use core::marker::PhantomData;

use crate::pod::Pod;

/// A trait for using an endianness specification.
///
/// Provides methods for converting from the specified endianness to the
/// native endianness of the target machine.
pub trait Endian: fmt::Debug + Default + Clone + Copy + PartialEq + Eq + 'static {
    /// Return true for big endian byte order.
    fn is_big_endian(self) -> bool;

    /// Converts an unaligned unsigned 32 bit integer to native endian.
    #[inline]
    fn read_u32_bytes(self, n: [u8; 4]) -> u32 {
        if self.is_big_endian() {
            u32::from_be_bytes(n)
        } else {
            u32::from_le_bytes(n)
        }
    }

    /// Converts an unaligned unsigned 64 bit integer to native endian.
    #[inline]
    fn read_u64_bytes(self, n: [u8; 8]) -> u64 {
        if self.is_big_endian() {
            u64::from_be_bytes(n)
        } else {
            u64::from_le_bytes(n)
        }
    }
}

/// Compile-time big endian byte order.
///
/// Fat headers are always stored in this order, whatever the architecture
/// of the slices they describe.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BigEndian;

impl Endian for BigEndian {
    #[inline]
    fn is_big_endian(self) -> bool {
        true
    }
}

/// An unaligned `u32` value with an externally specified endianness of type `E`.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct U32<E: Endian>([u8; 4], PhantomData<E>);

impl<E: Endian> U32<E> {
    /// Return the value as a native endian value.
    pub fn get(self, e: E) -> u32 {
        e.read_u32_bytes(self.0)
    }
}

/// An unaligned `u64` value with an externally specified endianness of type `E`.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct U64<E: Endian>([u8; 8], PhantomData<E>);

impl<E: Endian> U64<E> {
    /// Return the value as a native endian value.
    pub fn get(self, e: E) -> u64 {
        e.read_u64_bytes(self.0)
    }
}

impl<E: Endian> fmt::Debug for U32<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U32({:x}, {:x}, {:x}, {:x})", self.0[0], self.0[1], self.0[2], self.0[3])
    }
}

impl<E: Endian> fmt::Debug for U64<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U64({:x?})", self.0)
    }
}

unsafe impl<E: Endian> Pod for U32<E> {}
unsafe impl<E: Endian> Pod for U64<E> {}
