//! Fixed-width scalar values and their leaf nodes.

use super::{tag_len, Meta, Serializable};
use crate::types::{DataId, TlvType, Wiretype};
use crate::{wire, Error, Result};

mod tests;

/// A validated fixed-width scalar value.
///
/// Each variant corresponds to one of the fixed binary widths of the wire format: 1, 2, 4 or
/// 8 bytes, packed big-endian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Boolean(bool),
    Uint8(u8),
    Sint8(i8),
    Uint16(u16),
    Sint16(i16),
    Uint32(u32),
    Sint32(i32),
    Float32(f32),
    Uint64(u64),
    Sint64(i64),
    Float64(f64),
}

impl Scalar {
    /// Returns the type of this value.
    #[must_use]
    pub const fn kind(&self) -> TlvType {
        match self {
            Self::Boolean(_) => TlvType::Boolean,
            Self::Uint8(_) => TlvType::Uint8,
            Self::Sint8(_) => TlvType::Sint8,
            Self::Uint16(_) => TlvType::Uint16,
            Self::Sint16(_) => TlvType::Sint16,
            Self::Uint32(_) => TlvType::Uint32,
            Self::Sint32(_) => TlvType::Sint32,
            Self::Float32(_) => TlvType::Float32,
            Self::Uint64(_) => TlvType::Uint64,
            Self::Sint64(_) => TlvType::Sint64,
            Self::Float64(_) => TlvType::Float64,
        }
    }

    /// Returns the fixed width in bytes of the serialized value.
    #[must_use]
    pub const fn width(&self) -> usize {
        match self {
            Self::Boolean(_) | Self::Uint8(_) | Self::Sint8(_) => 1,
            Self::Uint16(_) | Self::Sint16(_) => 2,
            Self::Uint32(_) | Self::Sint32(_) | Self::Float32(_) => 4,
            Self::Uint64(_) | Self::Sint64(_) | Self::Float64(_) => 8,
        }
    }

    /// Returns the wiretype derived from this value's width.
    #[must_use]
    pub fn wiretype(&self) -> Wiretype {
        Wiretype::from_nibble(match self.width() {
            1 => 0,
            2 => 1,
            4 => 2,
            _ => 3,
        })
    }

    /// Packs the value big-endian at its fixed width.
    #[must_use]
    pub fn to_be_bytes(&self) -> Vec<u8> {
        match self {
            Self::Boolean(value) => vec![u8::from(*value)],
            Self::Uint8(value) => value.to_be_bytes().to_vec(),
            Self::Sint8(value) => value.to_be_bytes().to_vec(),
            Self::Uint16(value) => value.to_be_bytes().to_vec(),
            Self::Sint16(value) => value.to_be_bytes().to_vec(),
            Self::Uint32(value) => value.to_be_bytes().to_vec(),
            Self::Sint32(value) => value.to_be_bytes().to_vec(),
            Self::Float32(value) => value.to_be_bytes().to_vec(),
            Self::Uint64(value) => value.to_be_bytes().to_vec(),
            Self::Sint64(value) => value.to_be_bytes().to_vec(),
            Self::Float64(value) => value.to_be_bytes().to_vec(),
        }
    }

    /// Builds a scalar of the given kind from an integer, validating the kind's exact range.
    ///
    /// Booleans accept 0 and 1. Float kinds accept any integer and approximate it to IEEE-754
    /// precision on encode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueOutOfRange`] for values outside the kind's domain, and
    /// [`Error::NotScalar`] if `kind` is not a fixed-width scalar type.
    pub fn from_integer(kind: TlvType, value: i128) -> Result<Self> {
        #![allow(clippy::cast_precision_loss)] // Floats are approximated, never rejected.
        let out_of_range = |min: i128, max: i128| Error::ValueOutOfRange {
            kind,
            value,
            min,
            max,
        };
        match kind {
            TlvType::Boolean => match value {
                0 => Ok(Self::Boolean(false)),
                1 => Ok(Self::Boolean(true)),
                _ => Err(out_of_range(0, 1)),
            },
            TlvType::Uint8 => u8::try_from(value)
                .map(Self::Uint8)
                .map_err(|_| out_of_range(0, i128::from(u8::MAX))),
            TlvType::Sint8 => i8::try_from(value)
                .map(Self::Sint8)
                .map_err(|_| out_of_range(i128::from(i8::MIN), i128::from(i8::MAX))),
            TlvType::Uint16 => u16::try_from(value)
                .map(Self::Uint16)
                .map_err(|_| out_of_range(0, i128::from(u16::MAX))),
            TlvType::Sint16 => i16::try_from(value)
                .map(Self::Sint16)
                .map_err(|_| out_of_range(i128::from(i16::MIN), i128::from(i16::MAX))),
            TlvType::Uint32 => u32::try_from(value)
                .map(Self::Uint32)
                .map_err(|_| out_of_range(0, i128::from(u32::MAX))),
            TlvType::Sint32 => i32::try_from(value)
                .map(Self::Sint32)
                .map_err(|_| out_of_range(i128::from(i32::MIN), i128::from(i32::MAX))),
            TlvType::Uint64 => u64::try_from(value)
                .map(Self::Uint64)
                .map_err(|_| out_of_range(0, i128::from(u64::MAX))),
            TlvType::Sint64 => i64::try_from(value)
                .map(Self::Sint64)
                .map_err(|_| out_of_range(i128::from(i64::MIN), i128::from(i64::MAX))),
            TlvType::Float32 => Ok(Self::Float32(value as f32)),
            TlvType::Float64 => Ok(Self::Float64(value as f64)),
            other => Err(Error::NotScalar(other)),
        }
    }

    /// Builds a scalar of the given kind from a floating-point number.
    ///
    /// Float kinds accept any finite value; values that cannot be represented exactly are
    /// approximated on encode, never rejected. Integer kinds accept whole numbers within
    /// their range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueOutOfRange`] for fractional or out-of-range values on integer
    /// kinds, and [`Error::NotScalar`] if `kind` is not a fixed-width scalar type.
    pub fn from_f64(kind: TlvType, value: f64) -> Result<Self> {
        #![allow(clippy::cast_possible_truncation)] // Approximation on encode is documented.
        match kind {
            TlvType::Float32 => Ok(Self::Float32(value as f32)),
            TlvType::Float64 => Ok(Self::Float64(value)),
            other if other.is_scalar() => {
                if value.fract() == 0.0 {
                    Self::from_integer(other, value as i128)
                } else {
                    Err(Error::TypeMismatch {
                        expected: other,
                        actual: TlvType::Float64,
                    })
                }
            }
            other => Err(Error::NotScalar(other)),
        }
    }

    /// Builds a boolean scalar.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotScalar`] if `kind` is not [`TlvType::Boolean`].
    pub fn from_bool(kind: TlvType, value: bool) -> Result<Self> {
        if kind == TlvType::Boolean {
            Ok(Self::Boolean(value))
        } else {
            Err(Error::NotScalar(kind))
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Uint8(value) => write!(f, "{value}"),
            Self::Sint8(value) => write!(f, "{value}"),
            Self::Uint16(value) => write!(f, "{value}"),
            Self::Sint16(value) => write!(f, "{value}"),
            Self::Uint32(value) => write!(f, "{value}"),
            Self::Sint32(value) => write!(f, "{value}"),
            Self::Float32(value) => write!(f, "{value}"),
            Self::Uint64(value) => write!(f, "{value}"),
            Self::Sint64(value) => write!(f, "{value}"),
            Self::Float64(value) => write!(f, "{value}"),
        }
    }
}

macro_rules! scalar_shorthand {
    ($fn_name:ident, $variant:ident, $repr:ty) => {
        #[doc = concat!("Creates a ", stringify!($fn_name), " node with the given value and optional data ID.")]
        ///
        /// # Errors
        ///
        /// Fails if `data_id` is outside `[0, 0xfff]`.
        pub fn $fn_name(value: $repr, data_id: Option<u16>) -> Result<Self> {
            Self::new(
                Scalar::$variant(value),
                Meta {
                    data_id,
                    ..Meta::default()
                },
            )
        }
    };
}

/// A leaf node holding one fixed-width scalar value.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarNode {
    name: Option<String>,
    data_id: Option<DataId>,
    wiretype: Option<Wiretype>,
    length: Option<usize>,
    value: Scalar,
}

impl ScalarNode {
    /// Creates a scalar node from a value and common attributes.
    ///
    /// The `lengthfield_len` attribute has no effect on scalar nodes, which never carry a
    /// length field.
    ///
    /// # Errors
    ///
    /// Fails if the data ID or wiretype in `meta` is out of range.
    pub fn new(value: Scalar, meta: Meta) -> Result<Self> {
        let data_id = meta.data_id.map(DataId::new).transpose()?;
        let wiretype = meta.wiretype.map(Wiretype::new).transpose()?;
        Ok(Self {
            name: meta.name,
            data_id,
            wiretype,
            length: meta.length,
            value,
        })
    }

    /// Creates an untagged scalar node with no attributes.
    pub(crate) fn untagged(value: Scalar) -> Self {
        Self {
            name: None,
            data_id: None,
            wiretype: None,
            length: None,
            value,
        }
    }

    scalar_shorthand!(boolean, Boolean, bool);
    scalar_shorthand!(uint8, Uint8, u8);
    scalar_shorthand!(sint8, Sint8, i8);
    scalar_shorthand!(uint16, Uint16, u16);
    scalar_shorthand!(sint16, Sint16, i16);
    scalar_shorthand!(uint32, Uint32, u32);
    scalar_shorthand!(sint32, Sint32, i32);
    scalar_shorthand!(float32, Float32, f32);
    scalar_shorthand!(uint64, Uint64, u64);
    scalar_shorthand!(sint64, Sint64, i64);
    scalar_shorthand!(float64, Float64, f64);

    /// Returns the value of this node.
    #[must_use]
    pub fn value(&self) -> Scalar {
        self.value
    }

    /// Replaces the value of this node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the new value is of a different kind.
    pub fn set_value(&mut self, value: Scalar) -> Result<()> {
        if value.kind() != self.value.kind() {
            return Err(Error::TypeMismatch {
                expected: self.value.kind(),
                actual: value.kind(),
            });
        }
        self.value = value;
        Ok(())
    }

    /// Returns the display name of this node, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the data ID written into the tag, if any.
    #[must_use]
    pub fn data_id(&self) -> Option<DataId> {
        self.data_id
    }

    /// Sets or clears the data ID. A `None` disables tag emission.
    ///
    /// # Errors
    ///
    /// Fails if `data_id` is outside `[0, 0xfff]`.
    pub fn set_data_id(&mut self, data_id: Option<u16>) -> Result<()> {
        self.data_id = data_id.map(DataId::new).transpose()?;
        Ok(())
    }

    /// Returns the effective wiretype: the explicit override, or the one derived from the
    /// value's width.
    #[must_use]
    pub fn wiretype(&self) -> Wiretype {
        self.wiretype.unwrap_or_else(|| self.value.wiretype())
    }

    /// Sets or clears the wiretype override.
    ///
    /// # Errors
    ///
    /// Fails if `wiretype` is outside `[0, 0xf]`.
    pub fn set_wiretype(&mut self, wiretype: Option<u8>) -> Result<()> {
        self.wiretype = wiretype.map(Wiretype::new).transpose()?;
        Ok(())
    }

    /// Sets or clears the length override.
    ///
    /// The override changes the reported [`Serializable::length`] of this node, and thereby
    /// the length accounting of containers holding it; the serialized value bytes are always
    /// the fixed width of the kind.
    pub fn set_length(&mut self, length: Option<usize>) {
        self.length = length;
    }
}

impl Serializable for ScalarNode {
    fn length(&self) -> usize {
        self.length.unwrap_or_else(|| self.value.width())
    }

    fn serialized_value(&self) -> Result<Vec<u8>> {
        Ok(self.value.to_be_bytes())
    }

    fn serialization(&self) -> Result<Vec<u8>> {
        let mut serialized = wire::generate_tag(self.wiretype(), self.data_id);
        serialized.extend_from_slice(&self.value.to_be_bytes());
        Ok(serialized)
    }

    fn serialization_length(&self) -> usize {
        tag_len(self.data_id) + self.value.width()
    }

    fn lengthfield(&self) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }
}
