use core::mem;
use std::io::{Read, Seek, Write};

#[cfg(feature = "logging")]
use log::debug;

use crate::archive::{self, Header};
use crate::error::{Error, ErrorKind, Result};
use crate::pod;
use crate::read::ArchiveSlice;

const HEADER_SIZE: u64 = mem::size_of::<Header>() as u64;

impl<'file, F: Read + Write + Seek> ArchiveSlice<'file, F> {
    /// Read and check the member header at `offset`.
    pub fn read_header(&self, offset: u64) -> Result<Header> {
        self.check_header_bounds(offset)?;
        let mut header = Header::default();
        self.read(offset, pod::bytes_of_mut(&mut header))?;
        if !header.is_valid() {
            return Err(Error::new(
                ErrorKind::BadTerminator,
                "Invalid archive member terminator",
            ));
        }
        Ok(header)
    }

    /// Overwrite the member header at `offset`.
    pub fn write_header(&self, offset: u64, header: &Header) -> Result<()> {
        self.check_header_bounds(offset)?;
        self.write(offset, pod::bytes_of(header))
    }

    fn check_header_bounds(&self, offset: u64) -> Result<()> {
        match self.size().checked_sub(offset) {
            Some(remaining) if remaining >= HEADER_SIZE => Ok(()),
            _ => Err(Error::new(
                ErrorKind::Truncated,
                "Archive member header is truncated",
            )),
        }
    }

    /// Iterate over the members of the archive, in file order.
    ///
    /// This does not check the archive magic; see [`ArchiveSlice::validate`].
    #[inline]
    pub fn members(&self) -> MemberIterator<'_, 'file, F> {
        MemberIterator {
            slice: self,
            offset: Some(archive::MAGIC.len() as u64),
        }
    }
}

/// An iterator over the members of an [`ArchiveSlice`].
///
/// The first malformed member ends the iteration after yielding its error.
#[derive(Debug)]
pub struct MemberIterator<'slice, 'file, F> {
    slice: &'slice ArchiveSlice<'file, F>,
    offset: Option<u64>,
}

impl<'slice, 'file, F: Read + Write + Seek> MemberIterator<'slice, 'file, F> {
    fn parse(&self, offset: u64) -> Result<(Member, u64)> {
        if offset > self.slice.size() {
            return Err(Error::new(
                ErrorKind::Truncated,
                "Archive member data is truncated",
            ));
        }
        let header = self.slice.read_header(offset)?;
        let size = header.size()?;
        let next = offset
            .checked_add(HEADER_SIZE)
            .and_then(|next| next.checked_add(size))
            .ok_or(Error::new(
                ErrorKind::Truncated,
                "Archive member size is too large",
            ))?;
        #[cfg(feature = "logging")]
        debug!(
            "Member {} at {:#x}, size {}",
            String::from_utf8_lossy(header.name()),
            offset,
            size
        );
        Ok((Member { offset, header }, next))
    }
}

impl<'slice, 'file, F: Read + Write + Seek> Iterator for MemberIterator<'slice, 'file, F> {
    type Item = Result<Member>;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.offset?;
        if self.slice.is_end(offset) {
            self.offset = None;
            return None;
        }
        match self.parse(offset) {
            Ok((member, next)) => {
                self.offset = Some(next);
                Some(Ok(member))
            }
            Err(e) => {
                self.offset = None;
                Some(Err(e))
            }
        }
    }
}

/// An archive member header and its location.
#[derive(Debug, Clone, Copy)]
pub struct Member {
    offset: u64,
    header: Header,
}

impl Member {
    /// Return the offset of the header within the slice.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Return the header as it was read.
    #[inline]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Return the offset of the member data within the slice.
    #[inline]
    pub fn data_offset(&self) -> u64 {
        self.offset + HEADER_SIZE
    }
}
