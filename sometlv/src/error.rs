//! Errors raised while building or serializing TLV node trees.

use crate::types::TlvType;

/// A specialized result type for `sometlv` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// An error raised while building or serializing a TLV node tree.
///
/// All errors are raised synchronously at the point of violation. A failed construction or
/// mutation leaves the affected node in its previous valid state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A data ID outside the 12-bit tag field.
    #[error("data ID must be in the range [0, 0xfff], got {0}")]
    InvalidDataId(i64),
    /// A wiretype outside the 4-bit tag field.
    #[error("wiretype must be in the range [0, 0xf], got {0}")]
    InvalidWiretype(i64),
    /// A wiretype with no defined length field width.
    #[error("no length field width is defined for wiretype {0}")]
    UnsupportedWiretype(u8),
    /// Wiretype 4 marks a complex value with a static on-wire length, and its length field
    /// width cannot be derived.
    #[error("wiretype 4 requires an explicit length field width")]
    AmbiguousLengthField,
    /// A length field width other than 0, 1, 2 or 4 bytes.
    #[error("a length field must be 0, 1, 2 or 4 bytes wide, got {0}")]
    InvalidLengthFieldWidth(usize),
    /// A value length that does not fit the configured length field.
    #[error("length {length} does not fit a {width}-byte length field")]
    LengthOverflow { length: usize, width: usize },
    /// A scalar value outside the exact range of its kind.
    #[error("{kind} value must be in the range [{min}, {max}], got {value}")]
    ValueOutOfRange {
        kind: TlvType,
        value: i128,
        min: i128,
        max: i128,
    },
    /// An element whose type does not match what the container expects.
    #[error("expected a value of type {expected}, got {actual}")]
    TypeMismatch { expected: TlvType, actual: TlvType },
    /// A type name that does not denote a fixed-width scalar.
    #[error("{0} is not a fixed-width scalar type")]
    NotScalar(TlvType),
    /// A composite node constructed without an explicit wiretype.
    #[error("{0} nodes require an explicit wiretype")]
    MissingWiretype(TlvType),
    /// An element category with no defined length computation rule.
    #[error("no length rule is defined for elements of type {0}")]
    UnsupportedElementType(TlvType),
    /// A pre-serialized value that is not a valid hex string.
    #[error("pre-serialized data contains invalid hex digits")]
    InvalidHexData,
    /// A type name outside the closed type registry.
    #[error("unknown type name {0:?}")]
    UnknownType(String),
    /// A description element without one of its mandatory fields.
    #[error("element {element:?} is missing the mandatory {field:?} field")]
    MissingField {
        element: String,
        field: &'static str,
    },
    /// A description that is structurally invalid.
    #[error("invalid description: {0}")]
    InvalidDescription(String),
}
