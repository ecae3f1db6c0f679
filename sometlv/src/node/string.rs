//! UTF-8 text values materialized as arrays of 8-bit code units.

use super::{ArrayNode, Meta, Node, Scalar, ScalarNode, Serializable};
use crate::types::{DataId, TlvType, Wiretype};
use crate::{Error, Result};


/// The 3-byte UTF-8 byte-order mark.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Flags controlling the byte-level rendition of a string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringFlags {
    /// Append a terminating NUL character to the text.
    pub terminate: bool,
    /// Prepend the UTF-8 byte-order mark.
    pub bom: bool,
    /// Zero-pad the encoded text up to an explicit length override. Padding only extends,
    /// it never truncates.
    pub padding: bool,
}

impl Default for StringFlags {
    fn default() -> Self {
        Self {
            terminate: true,
            bom: true,
            padding: false,
        }
    }
}

/// A unit of text accepted by the string mutators: raw text, a single character, or a single
/// 8-bit code unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Text(String),
    Byte(u8),
}

impl Piece {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Byte(byte) => char::from(byte).to_string(),
        }
    }
}

impl From<&str> for Piece {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Piece {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<char> for Piece {
    fn from(character: char) -> Self {
        Self::Text(character.to_string())
    }
}

impl From<u8> for Piece {
    fn from(byte: u8) -> Self {
        Self::Byte(byte)
    }
}

/// A text node, materialized as an array of unsigned 8-bit code-unit nodes.
///
/// The backing array is regenerated from scratch on every mutation of the text, of the
/// [`StringFlags`], or of the length override (padding depends on it): the text is NUL
/// terminated if requested, UTF-8 encoded, prefixed with the byte-order mark if requested,
/// and zero-padded up to an explicit larger length override if requested.
///
/// The reported length is the encoded byte count, not the perceived character count: the
/// string `"€ℕℝ∂∀"` encodes to 15 bytes, not 5.
#[derive(Debug, Clone, PartialEq)]
pub struct StringNode {
    array: ArrayNode,
    text: String,
    flags: StringFlags,
}

impl StringNode {
    /// Creates a string node.
    ///
    /// Like all composite nodes, strings require an explicit wiretype in `meta`.
    ///
    /// # Errors
    ///
    /// Fails if the wiretype is missing or out of range, if the length field width cannot be
    /// resolved, or if the data ID is out of range.
    pub fn new(text: impl Into<String>, flags: StringFlags, meta: Meta) -> Result<Self> {
        let array = ArrayNode::new(Vec::new(), Some(TlvType::Uint8), meta).map_err(|err| {
            match err {
                Error::MissingWiretype(_) => Error::MissingWiretype(TlvType::String),
                other => other,
            }
        })?;
        let mut node = Self {
            array,
            text: text.into(),
            flags,
        };
        node.rebuild();
        Ok(node)
    }

    /// Returns the text of this node.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text of this node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.rebuild();
    }

    /// Returns the byte-level rendition flags.
    #[must_use]
    pub fn flags(&self) -> StringFlags {
        self.flags
    }

    /// Enables or disables the terminating NUL character.
    pub fn set_terminate(&mut self, terminate: bool) {
        self.flags.terminate = terminate;
        self.rebuild();
    }

    /// Enables or disables the byte-order mark.
    pub fn set_bom(&mut self, bom: bool) {
        self.flags.bom = bom;
        self.rebuild();
    }

    /// Enables or disables zero-padding up to the length override.
    pub fn set_padding(&mut self, padding: bool) {
        self.flags.padding = padding;
        self.rebuild();
    }

    /// Sets or clears the length override.
    pub fn set_length(&mut self, length: Option<usize>) {
        self.array.set_length(length);
        self.rebuild();
    }

    /// Appends a piece of text or a single code unit.
    pub fn append(&mut self, piece: impl Into<Piece>) {
        self.text.push_str(&piece.into().into_text());
        self.rebuild();
    }

    /// Extends the text with the given pieces.
    pub fn extend<I>(&mut self, pieces: I)
    where
        I: IntoIterator,
        I::Item: Into<Piece>,
    {
        for piece in pieces {
            self.text.push_str(&piece.into().into_text());
        }
        self.rebuild();
    }

    /// Inserts a piece at the given character index, clamped to the end of the text.
    pub fn insert(&mut self, index: usize, piece: impl Into<Piece>) {
        let byte_index = self
            .text
            .char_indices()
            .nth(index)
            .map_or(self.text.len(), |(offset, _)| offset);
        self.text.insert_str(byte_index, &piece.into().into_text());
        self.rebuild();
    }

    /// Removes all text from this node. The flags are retained.
    pub fn clear(&mut self) {
        self.text.clear();
        self.rebuild();
    }

    /// Returns the code-unit nodes backing this string.
    #[must_use]
    pub fn items(&self) -> &[Node] {
        self.array.items()
    }

    /// Returns the display name of this node, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.array.name()
    }

    /// Returns the data ID written into the tag, if any.
    #[must_use]
    pub fn data_id(&self) -> Option<DataId> {
        self.array.data_id()
    }

    /// Returns the wiretype of this node.
    #[must_use]
    pub fn wiretype(&self) -> Wiretype {
        self.array.wiretype()
    }

    /// Returns the width in bytes of this node's length field.
    #[must_use]
    pub fn lengthfield_len(&self) -> usize {
        self.array.lengthfield_len()
    }

    pub(crate) fn value_size(&self) -> usize {
        self.array.value_size()
    }

    /// Regenerates the backing code-unit array from the text and flags.
    fn rebuild(&mut self) {
        let mut encoded = self.text.clone().into_bytes();
        if self.flags.terminate {
            encoded.push(0);
        }
        if self.flags.bom {
            let mut with_bom = UTF8_BOM.to_vec();
            with_bom.extend_from_slice(&encoded);
            encoded = with_bom;
        }
        if self.flags.padding {
            if let Some(target) = self.array.length_override() {
                while encoded.len() < target {
                    encoded.push(0);
                }
            }
        }
        let items = encoded
            .into_iter()
            .map(|byte| Node::from(ScalarNode::untagged(Scalar::Uint8(byte))))
            .collect();
        self.array.replace_items(items);
    }
}

impl Serializable for StringNode {
    fn length(&self) -> usize {
        self.array.length()
    }

    fn serialized_value(&self) -> Result<Vec<u8>> {
        self.array.serialized_value()
    }

    fn serialization(&self) -> Result<Vec<u8>> {
        self.array.serialization()
    }

    fn serialization_length(&self) -> usize {
        self.array.serialization_length()
    }

    fn lengthfield(&self) -> Result<Vec<u8>> {
        self.array.lengthfield()
    }
}
