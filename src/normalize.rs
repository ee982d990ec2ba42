use std::io::{Read, Seek, Write};

#[cfg(feature = "logging")]
use log::{debug, info};

use crate::error::{Error, ErrorKind, Result};
use crate::read::{ArchiveFile, ArchiveSlice};

/// The result of normalizing one archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceReport {
    /// The offset of the archive within the file.
    pub base_offset: u64,
    /// The size of the archive.
    pub size: u64,
    /// The timestamp written to the first member.
    pub date: u64,
}

/// Set the timestamp of the first member to the latest timestamp of the
/// remaining members.
///
/// Every member header is read and checked before anything is written, and
/// only the header of the first member is ever written.
///
/// Returns the timestamp that was written. Fails with
/// [`ErrorKind::NothingToNormalize`] without writing if the archive has no
/// members other than the first, or if all of their timestamps are zero.
pub fn normalize_slice<F: Read + Write + Seek>(slice: &ArchiveSlice<'_, F>) -> Result<u64> {
    let mut latest: u64 = 0;
    for (index, member) in slice.members().enumerate() {
        let member = member?;
        if index == 0 {
            continue;
        }
        latest = latest.max(member.header().date()?);
    }
    if latest == 0 {
        return Err(Error::new(
            ErrorKind::NothingToNormalize,
            "Archive has no member timestamps to normalize",
        ));
    }

    let first = match slice.members().next() {
        Some(member) => member?,
        None => {
            return Err(Error::new(
                ErrorKind::NothingToNormalize,
                "Archive has no members",
            ))
        }
    };
    let mut header = *first.header();
    #[cfg(feature = "logging")]
    debug!(
        "Changing date of {} from {:?} to {}",
        String::from_utf8_lossy(header.name()),
        header.date().ok(),
        latest
    );
    header.set_date(latest)?;
    slice.write_header(first.offset(), &header)?;
    Ok(latest)
}

/// Normalize every archive in the file, in file order.
///
/// Stops at the first error. Archives that were already normalized keep
/// their new timestamp.
pub fn normalize_file<F: Read + Write + Seek>(file: &ArchiveFile<F>) -> Result<Vec<SliceReport>> {
    let mut reports = Vec::new();
    for slice in file.slices()? {
        let slice = slice?;
        let date = normalize_slice(&slice)?;
        #[cfg(feature = "logging")]
        info!(
            "Normalized archive at {:#x} (size {:#x}) to date {}",
            slice.base_offset(),
            slice.size(),
            date
        );
        reports.push(SliceReport {
            base_offset: slice.base_offset(),
            size: slice.size(),
            date,
        });
    }
    Ok(reports)
}
