//! The TLV node tree and its serialization contract.
//!
//! A payload is a tree of [`Node`] values built bottom-up: fixed-width scalars, arrays,
//! strings, structs and pre-serialized fragments. Every node satisfies the [`Serializable`]
//! contract, and the full wire encoding of a tree is produced by [`Serializable::serialization`]
//! on its root.

use crate::types::{DataId, TlvType, Wiretype};
use crate::{wire, Result};

mod array;
mod preserialized;
mod scalar;
mod string;
mod structure;

pub use array::ArrayNode;
pub use preserialized::PreserializedNode;
pub use scalar::{Scalar, ScalarNode};
pub use string::{Piece, StringFlags, StringNode};
pub use structure::StructNode;

/// Operations shared by every serializable TLV value.
///
/// For every node type, `serialization` is the concatenation of the tag (empty when the data
/// ID is absent), the length field (empty for fixed-width values) and the value bytes —
/// except pre-serialized nodes, which are spliced in without any framing.
pub trait Serializable {
    /// Length in bytes of the value part, unless overridden at construction.
    fn length(&self) -> usize;

    /// Serialization of the value only, without tag or length field.
    ///
    /// # Errors
    ///
    /// Returns an error if a nested length field cannot be serialized, or if a child has no
    /// defined serialization rule.
    fn serialized_value(&self) -> Result<Vec<u8>>;

    /// Full serialization of the value: tag, length field and value bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if a length field cannot be serialized at its configured width.
    fn serialization(&self) -> Result<Vec<u8>>;

    /// Length in bytes of the full serialization.
    fn serialization_length(&self) -> usize;

    /// Serialization of the length field; empty when the value carries none.
    ///
    /// # Errors
    ///
    /// Returns an error if the value length does not fit the configured field width.
    fn lengthfield(&self) -> Result<Vec<u8>>;
}

/// Common optional attributes accepted by every node constructor.
///
/// This mirrors the optional fields of a description element. Unset values fall back to
/// type-derived defaults during construction; invalid values fail the construction.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Meta {
    /// Field identifier written into the tag. `None` omits the tag entirely.
    pub data_id: Option<u16>,
    /// Explicit wiretype. Overrides the derived wiretype for scalars, and is mandatory for
    /// composite nodes.
    pub wiretype: Option<u8>,
    /// Display name. No wire effect.
    pub name: Option<String>,
    /// Override of the computed value length.
    pub length: Option<usize>,
    /// Explicit width of the length field in bytes (0, 1, 2 or 4).
    pub lengthfield_len: Option<usize>,
}

impl Meta {
    /// Shorthand for attributes carrying only a data ID.
    #[must_use]
    pub fn with_data_id(data_id: u16) -> Self {
        Self {
            data_id: Some(data_id),
            ..Self::default()
        }
    }

    /// Shorthand for attributes carrying a data ID and an explicit wiretype.
    #[must_use]
    pub fn tagged(data_id: u16, wiretype: u8) -> Self {
        Self {
            data_id: Some(data_id),
            wiretype: Some(wiretype),
            ..Self::default()
        }
    }
}

/// Resolves the length field width of a composite node.
///
/// An explicit width is validated against the supported set; otherwise the width is derived
/// from the wiretype, which rejects wiretype 4.
pub(crate) fn resolve_lengthfield_len(explicit: Option<usize>, wiretype: Wiretype) -> Result<usize> {
    match explicit {
        Some(len) => {
            wire::check_lengthfield_len(len)?;
            Ok(len)
        }
        None => wire::lengthfield_width(wiretype),
    }
}

/// A typed value in a TLV payload tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(ScalarNode),
    Array(ArrayNode),
    String(StringNode),
    Struct(StructNode),
    Preserialized(PreserializedNode),
}

impl Node {
    /// Returns the variant tag of this node.
    #[must_use]
    pub fn node_type(&self) -> TlvType {
        match self {
            Self::Scalar(node) => node.value().kind(),
            Self::Array(_) => TlvType::Array,
            Self::String(_) => TlvType::String,
            Self::Struct(_) => TlvType::Struct,
            Self::Preserialized(_) => TlvType::Preserialized,
        }
    }

    /// Returns the display name of this node, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Scalar(node) => node.name(),
            Self::Array(node) => node.name(),
            Self::String(node) => node.name(),
            Self::Struct(node) => node.name(),
            Self::Preserialized(node) => node.name(),
        }
    }

    /// Returns the data ID written into the tag, if any.
    #[must_use]
    pub fn data_id(&self) -> Option<DataId> {
        match self {
            Self::Scalar(node) => node.data_id(),
            Self::Array(node) => node.data_id(),
            Self::String(node) => node.data_id(),
            Self::Struct(node) => node.data_id(),
            Self::Preserialized(_) => None,
        }
    }

    /// Returns the effective wiretype of this node.
    ///
    /// Pre-serialized nodes carry no framing and have no wiretype.
    #[must_use]
    pub fn wiretype(&self) -> Option<Wiretype> {
        match self {
            Self::Scalar(node) => Some(node.wiretype()),
            Self::Array(node) => Some(node.wiretype()),
            Self::String(node) => Some(node.wiretype()),
            Self::Struct(node) => Some(node.wiretype()),
            Self::Preserialized(_) => None,
        }
    }

    /// Width in bytes of this node's length field.
    pub(crate) fn lengthfield_len(&self) -> usize {
        match self {
            Self::Scalar(_) | Self::Preserialized(_) => 0,
            Self::Array(node) => node.lengthfield_len(),
            Self::String(node) => node.lengthfield_len(),
            Self::Struct(node) => node.lengthfield_len(),
        }
    }

    /// Exact byte count of `serialized_value`, independent of any length override.
    pub(crate) fn value_size(&self) -> usize {
        match self {
            Self::Scalar(node) => node.value().width(),
            Self::Array(node) => node.value_size(),
            Self::String(node) => node.value_size(),
            Self::Struct(node) => node.value_size(),
            Self::Preserialized(node) => node.data().len(),
        }
    }
}

impl Serializable for Node {
    fn length(&self) -> usize {
        match self {
            Self::Scalar(node) => node.length(),
            Self::Array(node) => node.length(),
            Self::String(node) => node.length(),
            Self::Struct(node) => node.length(),
            Self::Preserialized(node) => node.length(),
        }
    }

    fn serialized_value(&self) -> Result<Vec<u8>> {
        match self {
            Self::Scalar(node) => node.serialized_value(),
            Self::Array(node) => node.serialized_value(),
            Self::String(node) => node.serialized_value(),
            Self::Struct(node) => node.serialized_value(),
            Self::Preserialized(node) => node.serialized_value(),
        }
    }

    fn serialization(&self) -> Result<Vec<u8>> {
        match self {
            Self::Scalar(node) => node.serialization(),
            Self::Array(node) => node.serialization(),
            Self::String(node) => node.serialization(),
            Self::Struct(node) => node.serialization(),
            Self::Preserialized(node) => node.serialization(),
        }
    }

    fn serialization_length(&self) -> usize {
        match self {
            Self::Scalar(node) => node.serialization_length(),
            Self::Array(node) => node.serialization_length(),
            Self::String(node) => node.serialization_length(),
            Self::Struct(node) => node.serialization_length(),
            Self::Preserialized(node) => node.serialization_length(),
        }
    }

    fn lengthfield(&self) -> Result<Vec<u8>> {
        match self {
            Self::Scalar(node) => node.lengthfield(),
            Self::Array(node) => node.lengthfield(),
            Self::String(node) => node.lengthfield(),
            Self::Struct(node) => node.lengthfield(),
            Self::Preserialized(node) => node.lengthfield(),
        }
    }
}

impl From<ScalarNode> for Node {
    fn from(node: ScalarNode) -> Self {
        Self::Scalar(node)
    }
}

impl From<ArrayNode> for Node {
    fn from(node: ArrayNode) -> Self {
        Self::Array(node)
    }
}

impl From<StringNode> for Node {
    fn from(node: StringNode) -> Self {
        Self::String(node)
    }
}

impl From<StructNode> for Node {
    fn from(node: StructNode) -> Self {
        Self::Struct(node)
    }
}

impl From<PreserializedNode> for Node {
    fn from(node: PreserializedNode) -> Self {
        Self::Preserialized(node)
    }
}

/// Serialized width of a tag for the given data ID: two bytes when present, none otherwise.
pub(crate) fn tag_len(data_id: Option<DataId>) -> usize {
    if data_id.is_some() {
        2
    } else {
        0
    }
}
