//! Mach-O fat (universal) file definitions.
//!
//! A fat file starts with a [`FatHeader`] followed by an array of
//! [`FatArch32`] or [`FatArch64`] entries, one for each architecture.
//! All fields are big endian.

use crate::endian::{BigEndian, U32, U64};
use crate::pod::Pod;

/// The 32-bit fat file magic.
pub const FAT_MAGIC: u32 = 0xcafe_babe;
/// The 64-bit fat file magic.
pub const FAT_MAGIC_64: u32 = 0xcafe_babf;

/// The header at the start of a fat file.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct FatHeader {
    /// `FAT_MAGIC` or `FAT_MAGIC_64`
    pub magic: U32<BigEndian>,
    /// number of structs that follow
    pub nfat_arch: U32<BigEndian>,
}

/// An entry in a 32-bit fat file.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct FatArch32 {
    /// cpu specifier (int)
    pub cputype: U32<BigEndian>,
    /// machine specifier (int)
    pub cpusubtype: U32<BigEndian>,
    /// file offset to this object file
    pub offset: U32<BigEndian>,
    /// size of this object file
    pub size: U32<BigEndian>,
    /// alignment as a power of 2
    pub align: U32<BigEndian>,
}

/// An entry in a 64-bit fat file.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct FatArch64 {
    /// cpu specifier (int)
    pub cputype: U32<BigEndian>,
    /// machine specifier (int)
    pub cpusubtype: U32<BigEndian>,
    /// file offset to this object file
    pub offset: U64<BigEndian>,
    /// size of this object file
    pub size: U64<BigEndian>,
    /// alignment as a power of 2
    pub align: U32<BigEndian>,
    /// reserved
    pub reserved: U32<BigEndian>,
}

unsafe_impl_pod!(FatHeader, FatArch32, FatArch64);

/// A trait for generic access to [`FatArch32`] and [`FatArch64`].
#[allow(missing_docs)]
pub trait FatArch: Pod + Default {
    fn cputype(&self) -> u32;
    fn cpusubtype(&self) -> u32;
    fn offset(&self) -> u64;
    fn size(&self) -> u64;
    fn align(&self) -> u32;
}

impl FatArch for FatArch32 {
    fn cputype(&self) -> u32 {
        self.cputype.get(BigEndian)
    }

    fn cpusubtype(&self) -> u32 {
        self.cpusubtype.get(BigEndian)
    }

    fn offset(&self) -> u64 {
        self.offset.get(BigEndian).into()
    }

    fn size(&self) -> u64 {
        self.size.get(BigEndian).into()
    }

    fn align(&self) -> u32 {
        self.align.get(BigEndian)
    }
}

impl FatArch for FatArch64 {
    fn cputype(&self) -> u32 {
        self.cputype.get(BigEndian)
    }

    fn cpusubtype(&self) -> u32 {
        self.cpusubtype.get(BigEndian)
    }

    fn offset(&self) -> u64 {
        self.offset.get(BigEndian)
    }

    fn size(&self) -> u64 {
        self.size.get(BigEndian)
    }

    fn align(&self) -> u32 {
        self.align.get(BigEndian)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem;

    #[test]
    fn layout() {
        assert_eq!(mem::size_of::<FatHeader>(), 8);
        assert_eq!(mem::size_of::<FatArch32>(), 20);
        assert_eq!(mem::size_of::<FatArch64>(), 32);
        assert_eq!(mem::align_of::<FatArch64>(), 1);
    }
}
