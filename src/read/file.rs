use core::cell::RefCell;
use core::mem;
use std::io::{Read, Seek, SeekFrom, Write};

#[cfg(feature = "logging")]
use log::debug;

use crate::archive;
use crate::endian::BigEndian;
use crate::error::{Error, ErrorKind, Result};
use crate::macho::{self, FatArch, FatArch32, FatArch64, FatHeader};
use crate::pod;
use crate::read::ArchiveSlice;

/// The kind of container at the start of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// A single archive that spans the whole file.
    Archive,
    /// A 32-bit fat file with the given number of architectures.
    Fat {
        /// The number of entries in the fat header.
        nfat_arch: u32,
    },
    /// A 64-bit fat file with the given number of architectures.
    Fat64 {
        /// The number of entries in the fat header.
        nfat_arch: u32,
    },
}

/// A file containing either a single archive or a fat file of archives.
///
/// This owns the file handle until [`ArchiveFile::into_inner`] is called.
/// The archives within it are accessed with [`ArchiveFile::slices`].
#[derive(Debug)]
pub struct ArchiveFile<F> {
    file: RefCell<F>,
    len: u64,
}

impl<F: Read + Write + Seek> ArchiveFile<F> {
    /// Take ownership of a file that is opened for reading and writing.
    pub fn new(mut file: F) -> Result<Self> {
        let len = file.seek(SeekFrom::End(0)).map_err(Error::io)?;
        Ok(ArchiveFile {
            file: RefCell::new(file),
            len,
        })
    }

    /// Return the file handle.
    pub fn into_inner(self) -> F {
        self.file.into_inner()
    }

    /// Return the length of the file.
    #[inline]
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Return true if the file is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn whole(&self) -> ArchiveSlice<'_, F> {
        ArchiveSlice::new(&self.file, 0, self.len)
    }

    /// Determine the kind of file from its magic.
    pub fn kind(&self) -> Result<FileKind> {
        let mut header = FatHeader::default();
        if self.whole().read(0, pod::bytes_of_mut(&mut header)).is_err() {
            return Err(Error::new(ErrorKind::NotAnArchive, "File is too short"));
        }
        if pod::bytes_of(&header) == archive::MAGIC {
            return Ok(FileKind::Archive);
        }
        let nfat_arch = header.nfat_arch.get(BigEndian);
        match header.magic.get(BigEndian) {
            macho::FAT_MAGIC => Ok(FileKind::Fat { nfat_arch }),
            macho::FAT_MAGIC_64 => Ok(FileKind::Fat64 { nfat_arch }),
            _ => Err(Error::new(
                ErrorKind::NotAnArchive,
                "Unsupported file identifier",
            )),
        }
    }

    /// Iterate over the archives in the file.
    ///
    /// For a bare archive this yields a single slice covering the whole file.
    /// For a fat file it yields one slice for each entry in the fat header.
    /// Every slice is checked for the archive magic before it is yielded.
    pub fn slices(&self) -> Result<SliceIterator<'_, F>> {
        let kind = self.kind()?;
        #[cfg(feature = "logging")]
        debug!("File kind {:?}, length {:#x}", kind, self.len);
        Ok(SliceIterator {
            file: self,
            kind,
            index: 0,
            done: false,
        })
    }

    fn fat_slice<A: FatArch>(&self, index: u32) -> Result<ArchiveSlice<'_, F>> {
        let entry_size = mem::size_of::<A>() as u64;
        let entry_offset = mem::size_of::<FatHeader>() as u64 + u64::from(index) * entry_size;
        if entry_offset + entry_size > self.len {
            return Err(Error::new(
                ErrorKind::InvalidFatTable,
                "Fat header entry is truncated",
            ));
        }
        let mut arch = A::default();
        self.whole().read(entry_offset, pod::bytes_of_mut(&mut arch))?;

        #[cfg(feature = "logging")]
        debug!(
            "Fat arch {}: cputype {:#x}, cpusubtype {:#x}, offset {:#x}, size {:#x}, align {}",
            index,
            arch.cputype(),
            arch.cpusubtype(),
            arch.offset(),
            arch.size(),
            arch.align()
        );
        match arch.offset().checked_add(arch.size()) {
            Some(end) if end <= self.len => {}
            _ => {
                return Err(Error::new(
                    ErrorKind::InvalidFatTable,
                    "Fat arch extends past the end of the file",
                ))
            }
        }
        let slice = ArchiveSlice::new(&self.file, arch.offset(), arch.size());
        if !slice.validate() {
            return Err(Error::new(
                ErrorKind::InvalidFatTable,
                "Fat arch does not contain an archive",
            ));
        }
        Ok(slice)
    }
}

/// An iterator over the archives in an [`ArchiveFile`].
///
/// An invalid entry ends the iteration after yielding its error.
#[derive(Debug)]
pub struct SliceIterator<'file, F> {
    file: &'file ArchiveFile<F>,
    kind: FileKind,
    index: u32,
    done: bool,
}

impl<'file, F> SliceIterator<'file, F> {
    /// Return the kind of file being iterated.
    #[inline]
    pub fn kind(&self) -> FileKind {
        self.kind
    }
}

impl<'file, F: Read + Write + Seek> Iterator for SliceIterator<'file, F> {
    type Item = Result<ArchiveSlice<'file, F>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let slice = match self.kind {
            FileKind::Archive => {
                self.done = true;
                let slice = self.file.whole();
                if slice.validate() {
                    Ok(slice)
                } else {
                    Err(Error::new(ErrorKind::NotAnArchive, "Invalid archive magic"))
                }
            }
            FileKind::Fat { nfat_arch } | FileKind::Fat64 { nfat_arch } => {
                if self.index >= nfat_arch {
                    self.done = true;
                    return None;
                }
                let index = self.index;
                self.index += 1;
                if let FileKind::Fat64 { .. } = self.kind {
                    self.file.fat_slice::<FatArch64>(index)
                } else {
                    self.file.fat_slice::<FatArch32>(index)
                }
            }
        };
        if slice.is_err() {
            self.done = true;
        }
        Some(slice)
    }
}
