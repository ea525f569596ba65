//! Byte-slice utilities for fixed-offset header parsing.
//!
//! There are two layers:
//! - **Result layer** (`*_r`): bounds-checked slicing of the raw input into fixed-size regions,
//!   mapping a short buffer to `DeserializationError::Truncated`.
//! - **Region layer** (`*_at`): little-endian reads out of a `[u8; REGION_SIZE]` at constant
//!   offsets. A region is always `REGION_SIZE` bytes long, so these reads cannot fail for any
//!   offset the decoders use.
//!
//! Example (splitting the input, then reading fields by fixed offsets):
//!
//! ```ignore
//! use crate::utils::bytes;
//!
//! let aci = bytes::region_r(buf, 0x400, "access control info")?;
//! let core_version = bytes::u16_at(aci, 0x8);
//! ```

use byteorder::{ByteOrder, LittleEndian};

use crate::err::DeserializationError;

/// Every region of the container header is 0x200 bytes long.
pub const REGION_SIZE: usize = 0x200;

pub type Region = [u8; REGION_SIZE];

#[inline]
fn truncated(what: &'static str, offset: usize, need: usize, len: usize) -> DeserializationError {
    DeserializationError::Truncated {
        what,
        offset: offset as u64,
        need,
        have: len.saturating_sub(offset),
    }
}

pub(crate) fn slice_r<'a>(
    buf: &'a [u8],
    offset: usize,
    len: usize,
    what: &'static str,
) -> Result<&'a [u8], DeserializationError> {
    let end = offset
        .checked_add(len)
        .ok_or_else(|| truncated(what, offset, len, buf.len()))?;
    buf.get(offset..end)
        .ok_or_else(|| truncated(what, offset, len, buf.len()))
}

/// Borrow the `REGION_SIZE` bytes at `offset` as a fixed-size region.
pub(crate) fn region_r<'a>(
    buf: &'a [u8],
    offset: usize,
    what: &'static str,
) -> Result<&'a Region, DeserializationError> {
    let bytes = slice_r(buf, offset, REGION_SIZE, what)?;
    bytes
        .try_into()
        .map_err(|_| truncated(what, offset, REGION_SIZE, buf.len()))
}

#[inline]
pub(crate) fn u8_at(region: &Region, offset: usize) -> u8 {
    region[offset]
}

#[inline]
pub(crate) fn u16_at(region: &Region, offset: usize) -> u16 {
    LittleEndian::read_u16(&region[offset..offset + 2])
}

#[inline]
pub(crate) fn u32_at(region: &Region, offset: usize) -> u32 {
    LittleEndian::read_u32(&region[offset..offset + 4])
}

#[inline]
pub(crate) fn u64_at(region: &Region, offset: usize) -> u64 {
    LittleEndian::read_u64(&region[offset..offset + 8])
}

/// Decode a fixed-width text field. The first NUL ends the text; bytes after it are padding
/// and are ignored even when they are not NUL.
pub(crate) fn nul_terminated_str_at(region: &Region, offset: usize, len: usize) -> String {
    let field = &region[offset..offset + len];
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn region_with(offset: usize, bytes: &[u8]) -> Region {
        let mut region = [0_u8; REGION_SIZE];
        region[offset..offset + bytes.len()].copy_from_slice(bytes);
        region
    }

    #[test]
    fn test_region_r_rejects_short_buffer() {
        let buf = vec![0_u8; 0x3ff];
        let err = region_r(&buf, 0x200, "system control info").unwrap_err();

        match err {
            DeserializationError::Truncated {
                what,
                offset,
                need,
                have,
            } => {
                assert_eq!(what, "system control info");
                assert_eq!(offset, 0x200);
                assert_eq!(need, REGION_SIZE);
                assert_eq!(have, 0x1ff);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_region_r_borrows_exact_window() {
        let mut buf = vec![0_u8; 0x600];
        buf[0x400] = 0xAA;
        buf[0x5FF] = 0xBB;

        let region = region_r(&buf, 0x400, "access control info").unwrap();
        assert_eq!(region[0], 0xAA);
        assert_eq!(region[REGION_SIZE - 1], 0xBB);
    }

    #[test]
    fn test_little_endian_reads() {
        let region = region_with(0x10, &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]);

        assert_eq!(u8_at(&region, 0x10), 0x01);
        assert_eq!(u16_at(&region, 0x10), 0x0201);
        assert_eq!(u32_at(&region, 0x10), 0x0403_0201);
        assert_eq!(u64_at(&region, 0x10), 0x0807_0605_0403_0201);
    }

    #[test]
    fn test_text_stops_at_first_nul() {
        let region = region_with(0, b"AB\0\0CD\0\0");
        assert_eq!(nul_terminated_str_at(&region, 0, 8), "AB");
    }

    #[test]
    fn test_text_uses_whole_field_without_nul() {
        let region = region_with(0, b"CTRTITLE!");
        assert_eq!(nul_terminated_str_at(&region, 0, 8), "CTRTITLE");
    }
}
