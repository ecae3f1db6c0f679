//! Wire-level constants and helpers of the SOME/IP TLV format.
//!
//! These are the pure building blocks of the encoding: tag generation, the mapping from
//! wiretype to length field width, and length field serialization.

use crate::types::{DataId, Wiretype};
use crate::{Error, Result};

mod tests;

/// Wiretype of a complex value whose length is static on the wire.
///
/// Such a value still carries a length field, but its width cannot be derived from the
/// wiretype and must be configured explicitly.
pub const WIRETYPE_COMPLEX_STATIC_LEN: u8 = 4;

/// Generates a serialized tag from the given wiretype and data ID.
///
/// The tag is two bytes, big-endian: the wiretype in the high nibble of the first byte and
/// the 12-bit data ID in the remaining bits. A missing data ID omits the tag entirely, which
/// is used for array and struct elements that carry no individual tag.
#[must_use]
pub fn generate_tag(wiretype: Wiretype, data_id: Option<DataId>) -> Vec<u8> {
    match data_id {
        Some(id) => {
            let id = id.get();
            vec![
                ((wiretype.get() & 0x0F) << 4) | (((id & 0xF00) >> 8) as u8),
                (id & 0xFF) as u8,
            ]
        }
        None => Vec::new(),
    }
}

/// Returns the width of the length field in bytes for the given wiretype.
///
/// # Errors
///
/// Returns [`Error::AmbiguousLengthField`] for wiretype 4, whose length field width must be
/// configured explicitly, and [`Error::UnsupportedWiretype`] for wiretypes above 7.
pub fn lengthfield_width(wiretype: Wiretype) -> Result<usize> {
    match wiretype.get() {
        0..=3 => Ok(0),
        5 => Ok(1),
        6 => Ok(2),
        7 => Ok(4),
        WIRETYPE_COMPLEX_STATIC_LEN => Err(Error::AmbiguousLengthField),
        other => Err(Error::UnsupportedWiretype(other)),
    }
}

/// Checks that a length field width is one of the supported values.
///
/// # Errors
///
/// Returns [`Error::InvalidLengthFieldWidth`] for widths other than 0, 1, 2 or 4.
pub fn check_lengthfield_len(lengthfield_len: usize) -> Result<()> {
    if matches!(lengthfield_len, 0 | 1 | 2 | 4) {
        Ok(())
    } else {
        Err(Error::InvalidLengthFieldWidth(lengthfield_len))
    }
}

/// Serializes a length field with the given length value and field width.
///
/// The value is encoded big-endian at the exact field width; a width of 0 produces an empty
/// sequence.
///
/// # Errors
///
/// Returns [`Error::InvalidLengthFieldWidth`] for unsupported widths, and
/// [`Error::LengthOverflow`] if `value_length` does not fit the field.
pub fn serialize_lengthfield(value_length: usize, width: usize) -> Result<Vec<u8>> {
    let overflow = || Error::LengthOverflow {
        length: value_length,
        width,
    };
    match width {
        0 => Ok(Vec::new()),
        1 => u8::try_from(value_length)
            .map(|value| value.to_be_bytes().to_vec())
            .map_err(|_| overflow()),
        2 => u16::try_from(value_length)
            .map(|value| value.to_be_bytes().to_vec())
            .map_err(|_| overflow()),
        4 => u32::try_from(value_length)
            .map(|value| value.to_be_bytes().to_vec())
            .map_err(|_| overflow()),
        other => Err(Error::InvalidLengthFieldWidth(other)),
    }
}
