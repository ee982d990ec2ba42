use core::cell::RefCell;
use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::archive;
use crate::error::{Error, ErrorKind, Result};

/// A bounded view of one archive within a file.
///
/// Offsets passed to the methods of this type are relative to the start of
/// the slice, and every access must lie entirely within the slice.
///
/// Each access is an absolute seek followed by a single read or write call.
/// A call that transfers fewer bytes than requested is an error and is not
/// retried.
#[derive(Debug)]
pub struct ArchiveSlice<'file, F> {
    file: &'file RefCell<F>,
    offset: u64,
    size: u64,
}

impl<'file, F: Read + Write + Seek> ArchiveSlice<'file, F> {
    pub(crate) fn new(file: &'file RefCell<F>, offset: u64, size: u64) -> Self {
        ArchiveSlice { file, offset, size }
    }

    /// Return the offset of the slice within the file.
    #[inline]
    pub fn base_offset(&self) -> u64 {
        self.offset
    }

    /// Return the size of the slice.
    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Return true if `offset` is exactly the end of the slice.
    #[inline]
    pub fn is_end(&self, offset: u64) -> bool {
        offset == self.size
    }

    /// Return true if the slice starts with the archive magic.
    pub fn validate(&self) -> bool {
        let mut magic = [0; archive::MAGIC.len()];
        self.read(0, &mut magic).is_ok() && magic == archive::MAGIC
    }

    /// Fill `buf` with the bytes at `offset`.
    pub fn read(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        let mut file = self.file.borrow_mut();
        file.seek(SeekFrom::Start(self.position(offset, buf.len())?))
            .map_err(Error::io)?;
        let count = file.read(buf).map_err(Error::io)?;
        if count != buf.len() {
            return Err(Error::short_io(
                io::ErrorKind::UnexpectedEof,
                "Short read from archive",
            ));
        }
        Ok(())
    }

    /// Replace the bytes at `offset` with `buf`.
    pub fn write(&self, offset: u64, buf: &[u8]) -> Result<()> {
        let mut file = self.file.borrow_mut();
        file.seek(SeekFrom::Start(self.position(offset, buf.len())?))
            .map_err(Error::io)?;
        let count = file.write(buf).map_err(Error::io)?;
        if count != buf.len() {
            return Err(Error::short_io(
                io::ErrorKind::WriteZero,
                "Short write to archive",
            ));
        }
        Ok(())
    }

    /// Check the bounds of an access and return its absolute file position.
    fn position(&self, offset: u64, len: usize) -> Result<u64> {
        let end = offset
            .checked_add(len as u64)
            .filter(|end| *end <= self.size);
        match end {
            Some(_) => self
                .offset
                .checked_add(offset)
                .ok_or(Error::new(ErrorKind::OutOfBounds, "Archive offset overflow")),
            None => Err(Error::new(
                ErrorKind::OutOfBounds,
                "Access past the end of the archive",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn file(data: &[u8]) -> RefCell<Cursor<Vec<u8>>> {
        RefCell::new(Cursor::new(data.to_vec()))
    }

    #[test]
    fn bounds() {
        let file = file(b"0123456789abcdef");
        let slice = ArchiveSlice::new(&file, 4, 8);
        assert_eq!(slice.base_offset(), 4);
        assert_eq!(slice.size(), 8);

        let mut buf = [0; 4];
        slice.read(0, &mut buf).unwrap();
        assert_eq!(&buf, b"4567");
        slice.read(4, &mut buf).unwrap();
        assert_eq!(&buf, b"89ab");

        let err = slice.read(5, &mut buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        let err = slice.read(u64::MAX, &mut buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        let err = slice.write(6, b"xyz").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);

        slice.read(8, &mut []).unwrap();
        slice.write(5, b"XYZ").unwrap();
        assert_eq!(file.into_inner().into_inner(), b"012345678XYZcdef");
    }

    #[test]
    fn short_read() {
        // The slice claims more bytes than the file holds.
        let file = file(b"!<arch>\n");
        let slice = ArchiveSlice::new(&file, 4, 8);
        let mut buf = [0; 8];
        let err = slice.read(0, &mut buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io(io::ErrorKind::UnexpectedEof));
        assert!(!slice.validate());
    }

    #[test]
    fn short_write() {
        // Accepts at most one byte per call.
        #[derive(Debug)]
        struct OneByte(Cursor<Vec<u8>>);

        impl Read for OneByte {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                self.0.read(buf)
            }
        }

        impl Write for OneByte {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.write(&buf[..buf.len().min(1)])
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        impl Seek for OneByte {
            fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
                self.0.seek(pos)
            }
        }

        let file = RefCell::new(OneByte(Cursor::new(b"!<arch>
".to_vec())));
        let slice = ArchiveSlice::new(&file, 0, 8);
        let err = slice.write(0, b"abcd").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io(io::ErrorKind::WriteZero));
        // One call only, so only the first byte landed.
        assert_eq!(file.into_inner().0.into_inner(), b"a<arch>\n");

        let file = RefCell::new(OneByte(Cursor::new(b"!<arch>\n".to_vec())));
        ArchiveSlice::new(&file, 0, 8).write(7, b"!").unwrap();
    }

    #[test]
    fn validate() {
        let file = file(b"junk!<arch>\n");
        assert!(!ArchiveSlice::new(&file, 0, 12).validate());
        assert!(ArchiveSlice::new(&file, 4, 8).validate());
        assert!(!ArchiveSlice::new(&file, 4, 7).validate());
    }

    #[test]
    fn is_end() {
        let file = file(b"!<arch>\n");
        let slice = ArchiveSlice::new(&file, 0, 8);
        assert!(slice.is_end(8));
        assert!(!slice.is_end(7));
        assert!(!slice.is_end(9));
    }
}
