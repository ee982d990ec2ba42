//! Archive definitions.
//!
//! These definitions are independent of the file access in [`crate::read`],
//! and include the strict decimal codec used for the numeric header fields.

use crate::error::{Error, ErrorKind, Result};
use crate::pod::Pod;

/// File identification bytes stored at the beginning of the file.
pub const MAGIC: [u8; 8] = *b"!<arch>\n";

/// The terminator for each archive member header.
pub const TERMINATOR: [u8; 2] = *b"`\n";

/// The widest numeric field that [`parse_decimal`] and [`write_decimal`] accept.
///
/// This leaves room for every `u64` value in decimal.
pub const MAX_FIELD_WIDTH: usize = 20;

/// The header at the start of an archive member.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct Header {
    /// The file name.
    pub name: [u8; 16],
    /// File modification timestamp in decimal.
    pub date: [u8; 12],
    /// User ID in decimal.
    pub uid: [u8; 6],
    /// Group ID in decimal.
    pub gid: [u8; 6],
    /// File mode in octal.
    pub mode: [u8; 8],
    /// File size in decimal.
    pub size: [u8; 10],
    /// Must be equal to `TERMINATOR`.
    pub terminator: [u8; 2],
}

unsafe_impl_pod!(Header);

impl Header {
    /// Return true if the header ends with `TERMINATOR`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.terminator == TERMINATOR
    }

    /// Return the file name, without padding.
    ///
    /// Extended names are not resolved.
    pub fn name(&self) -> &[u8] {
        let name = &self.name[..];
        if name[0] == b'/' {
            let len = memchr::memchr(b' ', name).unwrap_or(name.len());
            &name[..len]
        } else {
            let len = memchr::memchr(b'/', name)
                .or_else(|| memchr::memchr(b' ', name))
                .unwrap_or(name.len());
            &name[..len]
        }
    }

    /// Parse the file modification timestamp.
    #[inline]
    pub fn date(&self) -> Result<u64> {
        parse_decimal(&self.date)
    }

    /// Replace the file modification timestamp.
    ///
    /// The header is unchanged if the timestamp does not fit.
    #[inline]
    pub fn set_date(&mut self, date: u64) -> Result<()> {
        write_decimal(&mut self.date, date)
    }

    /// Parse the size of the member data that follows the header.
    #[inline]
    pub fn size(&self) -> Result<u64> {
        parse_decimal(&self.size)
    }

    /// Parse the user ID.
    #[inline]
    pub fn uid(&self) -> Result<u64> {
        parse_decimal(&self.uid)
    }

    /// Parse the group ID.
    #[inline]
    pub fn gid(&self) -> Result<u64> {
        parse_decimal(&self.gid)
    }

    /// Parse the file mode.
    #[inline]
    pub fn mode(&self) -> Result<u64> {
        parse_digits(&self.mode, 8)
    }
}

/// Parse a space padded decimal header field.
///
/// The field must start with at least one digit, and every byte after the
/// digits must be a space. Unlike `strtoull`, leading whitespace and a sign
/// are rejected, since fields are always left aligned. A NUL byte ends the
/// field early.
/// `u64::MAX` is rejected because it is indistinguishable from an overflow.
pub fn parse_decimal(field: &[u8]) -> Result<u64> {
    parse_digits(field, 10)
}

fn parse_digits(field: &[u8], radix: u32) -> Result<u64> {
    if field.len() > MAX_FIELD_WIDTH {
        return Err(Error::new(
            ErrorKind::MalformedField,
            "Numeric header field is too wide",
        ));
    }
    let len = memchr::memchr(0, field).unwrap_or(field.len());
    let field = &field[..len];

    let mut value: u64 = 0;
    let mut digits = 0;
    for &c in field {
        let Some(x) = (c as char).to_digit(radix) else {
            break;
        };
        value = value
            .checked_mul(u64::from(radix))
            .and_then(|value| value.checked_add(u64::from(x)))
            .ok_or(Error::new(
                ErrorKind::MalformedField,
                "Numeric header field overflows",
            ))?;
        digits += 1;
    }
    if digits == 0 {
        return Err(Error::new(
            ErrorKind::MalformedField,
            "Numeric header field has no digits",
        ));
    }
    if value == u64::MAX {
        return Err(Error::new(
            ErrorKind::MalformedField,
            "Numeric header field overflows",
        ));
    }
    if field[digits..].iter().any(|&c| c != b' ') {
        return Err(Error::new(
            ErrorKind::MalformedField,
            "Invalid padding in numeric header field",
        ));
    }
    Ok(value)
}

/// Write `value` into a header field as left aligned decimal digits padded
/// with spaces.
///
/// The field is unchanged on error.
pub fn write_decimal(field: &mut [u8], value: u64) -> Result<()> {
    if field.len() > MAX_FIELD_WIDTH {
        return Err(Error::new(
            ErrorKind::MalformedField,
            "Numeric header field is too wide",
        ));
    }
    let mut buf = [0u8; MAX_FIELD_WIDTH];
    let mut start = buf.len();
    let mut rest = value;
    loop {
        start -= 1;
        buf[start] = b'0' + (rest % 10) as u8;
        rest /= 10;
        if rest == 0 {
            break;
        }
    }
    let digits = &buf[start..];
    if digits.len() > field.len() {
        return Err(Error::new(
            ErrorKind::FieldTooNarrow,
            "Value does not fit in numeric header field",
        ));
    }
    let (head, tail) = field.split_at_mut(digits.len());
    head.copy_from_slice(digits);
    tail.fill(b' ');
    Ok(())
}
