//! Interface for reading and patching archive files in place.
//!
//! [`ArchiveFile`] takes ownership of a file handle and detects whether it
//! holds a bare archive or a fat file. Each archive is then accessed through
//! an [`ArchiveSlice`], which bounds every read and write to that archive.

mod file;
pub use file::*;

mod member;
pub use member::*;

mod slice;
pub use slice::*;
