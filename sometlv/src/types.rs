//! The closed type registry of the TLV data model, and validated tag identifiers.

use crate::{Error, Result};


/// Data types supported by SOME/IP TLV payloads, extended by a `none` sentinel for empty
/// arrays and a type for pre-serialized data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TlvType {
    None,
    Boolean,
    Uint8,
    Sint8,
    Uint16,
    Sint16,
    Uint32,
    Sint32,
    Float32,
    Uint64,
    Sint64,
    Float64,
    Array,
    String,
    Struct,
    Preserialized,
}

impl TlvType {
    /// Resolves a declared type name to its registry entry.
    ///
    /// Names are matched case-sensitively against the lower-case registry; callers working
    /// with free-form input should normalize first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownType`] for names outside the registry.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "boolean" => Ok(Self::Boolean),
            "uint8" => Ok(Self::Uint8),
            "sint8" => Ok(Self::Sint8),
            "uint16" => Ok(Self::Uint16),
            "sint16" => Ok(Self::Sint16),
            "uint32" => Ok(Self::Uint32),
            "sint32" => Ok(Self::Sint32),
            "float32" => Ok(Self::Float32),
            "uint64" => Ok(Self::Uint64),
            "sint64" => Ok(Self::Sint64),
            "float64" => Ok(Self::Float64),
            "string" => Ok(Self::String),
            "array" => Ok(Self::Array),
            "struct" => Ok(Self::Struct),
            "serialized" => Ok(Self::Preserialized),
            other => Err(Error::UnknownType(other.to_owned())),
        }
    }

    /// Returns the display name of this type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Boolean => "BOOLEAN",
            Self::Uint8 => "UINT8",
            Self::Sint8 => "SINT8",
            Self::Uint16 => "UINT16",
            Self::Sint16 => "SINT16",
            Self::Uint32 => "UINT32",
            Self::Sint32 => "SINT32",
            Self::Float32 => "FLOAT32",
            Self::Uint64 => "UINT64",
            Self::Sint64 => "SINT64",
            Self::Float64 => "FLOAT64",
            Self::Array => "ARRAY",
            Self::String => "STRING",
            Self::Struct => "STRUCT",
            Self::Preserialized => "PRESERIALIZED",
        }
    }

    /// Returns `true` if this is a fixed-width scalar type.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::Boolean
                | Self::Uint8
                | Self::Sint8
                | Self::Uint16
                | Self::Sint16
                | Self::Uint32
                | Self::Sint32
                | Self::Float32
                | Self::Uint64
                | Self::Sint64
                | Self::Float64
        )
    }

    /// Returns `true` if this is a container-like type.
    #[must_use]
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::Array | Self::String | Self::Struct)
    }

    /// Returns `true` if this is the pre-serialized data type.
    #[must_use]
    pub const fn is_preserialized(self) -> bool {
        matches!(self, Self::Preserialized)
    }

    /// Returns the fixed value width in bytes for scalar types, `None` otherwise.
    #[must_use]
    pub const fn scalar_width(self) -> Option<usize> {
        match self {
            Self::Boolean | Self::Uint8 | Self::Sint8 => Some(1),
            Self::Uint16 | Self::Sint16 => Some(2),
            Self::Uint32 | Self::Sint32 | Self::Float32 => Some(4),
            Self::Uint64 | Self::Sint64 | Self::Float64 => Some(8),
            _ => None,
        }
    }
}

impl std::fmt::Display for TlvType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The 12-bit field identifier embedded in a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DataId(u16);

impl DataId {
    /// Largest valid data ID.
    pub const MAX: u16 = 0xFFF;

    /// Creates a new [`DataId`] with the given `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDataId`] if `value` exceeds [`DataId::MAX`].
    pub fn new(value: u16) -> Result<Self> {
        if value > Self::MAX {
            Err(Error::InvalidDataId(i64::from(value)))
        } else {
            Ok(Self(value))
        }
    }

    /// Returns the `u16` representation of this [`DataId`].
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

/// The 4-bit code indicating how a value is framed on the wire.
///
/// Wiretypes 0 through 3 mark fixed-width scalars of 1, 2, 4 and 8 bytes. Wiretype 4 marks a
/// complex value whose length is static on the wire, and 5 through 7 mark complex values with
/// a 1, 2 or 4 byte length field. Values 8 through 15 write the reserved bit and can only be
/// produced by an explicit override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Wiretype(u8);

impl Wiretype {
    /// Largest valid wiretype.
    pub const MAX: u8 = 0xF;

    /// Creates a new [`Wiretype`] with the given `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWiretype`] if `value` exceeds [`Wiretype::MAX`].
    pub fn new(value: u8) -> Result<Self> {
        if value > Self::MAX {
            Err(Error::InvalidWiretype(i64::from(value)))
        } else {
            Ok(Self(value))
        }
    }

    /// Creates a wiretype from a value known to be in range, masking to the low nibble.
    pub(crate) const fn from_nibble(value: u8) -> Self {
        Self(value & 0x0F)
    }

    /// Returns the `u8` representation of this [`Wiretype`].
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}
