//! # `arstamp`
//!
//! The `arstamp` crate makes Unix archives reproducible by rewriting the
//! modification timestamp of the first member of each archive to the latest
//! timestamp of the other members.
//!
//! The file may be a single archive, or a Mach-O fat file containing one
//! archive for each architecture. Headers are patched in place; the size
//! of the file and the member data never change.
//!
//! ## Example
//! ```no_run
//! use std::fs::OpenOptions;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let file = OpenOptions::new().read(true).write(true).open("libfoo.a")?;
//!     let archive = arstamp::ArchiveFile::new(file)?;
//!     for report in arstamp::normalize_file(&archive)? {
//!         println!("{:#x}: {}", report.base_offset, report.date);
//!     }
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

#[macro_use]
pub mod pod;

pub mod endian;
pub use endian::*;

pub mod archive;
pub mod macho;

mod error;
pub use error::{Error, ErrorKind, Result};

pub mod read;
pub use read::{ArchiveFile, ArchiveSlice, FileKind, Member, MemberIterator, SliceIterator};

mod normalize;
pub use normalize::{normalize_file, normalize_slice, SliceReport};
