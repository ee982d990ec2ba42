use std::{error, fmt, io};

/// An error that occurred while reading or patching an archive.
#[derive(Debug)]
pub struct Error {
    inner: ErrorInner,
}

#[derive(Debug)]
enum ErrorInner {
    Io(io::Error),
    Format(ErrorKind, &'static str),
}

/// The kind of error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A read or write was outside the bounds of an archive slice.
    OutOfBounds,
    /// A member header or its data extends past the end of the archive.
    Truncated,
    /// A member header does not end with the archive terminator.
    BadTerminator,
    /// A numeric header field is not space padded decimal.
    MalformedField,
    /// A value is too large for its numeric header field.
    FieldTooNarrow,
    /// The file is neither an archive nor a fat file.
    NotAnArchive,
    /// An entry in the fat header does not describe an archive within the file.
    InvalidFatTable,
    /// The archive has no member timestamps other than that of the first member.
    NothingToNormalize,
    /// The underlying file failed, or transferred fewer bytes than requested.
    Io(io::ErrorKind),
}

impl fmt::Display for Error {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            ErrorInner::Io(e) => fmt::Display::fmt(e, f),
            ErrorInner::Format(_, message) => f.write_str(message),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.inner {
            ErrorInner::Io(e) => Some(e),
            ErrorInner::Format(..) => None,
        }
    }
}

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> ErrorKind {
        match &self.inner {
            ErrorInner::Io(e) => ErrorKind::Io(e.kind()),
            ErrorInner::Format(kind, _) => *kind,
        }
    }

    pub(crate) fn new(kind: ErrorKind, message: &'static str) -> Self {
        Self {
            inner: ErrorInner::Format(kind, message),
        }
    }

    pub(crate) fn io(error: io::Error) -> Self {
        Self {
            inner: ErrorInner::Io(error),
        }
    }

    pub(crate) fn short_io(kind: io::ErrorKind, message: &'static str) -> Self {
        Self::io(io::Error::new(kind, message))
    }
}

/// The `Result` type for this library.
pub type Result<T> = std::result::Result<T, Error>;
