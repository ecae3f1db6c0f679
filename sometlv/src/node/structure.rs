//! Ordered, possibly heterogeneous sequences of named children.

use super::{resolve_lengthfield_len, tag_len, Meta, Node, Serializable};
use crate::types::{DataId, TlvType, Wiretype};
use crate::{wire, Error, Result};

mod tests;

/// An ordered sequence of possibly heterogeneous children, each keeping its own framing.
///
/// Unlike array elements, struct children are serialized with their individual tag and
/// length field unconditionally, so the struct's length accounts for each child's full
/// serialized width.
#[derive(Debug, Clone, PartialEq)]
pub struct StructNode {
    name: Option<String>,
    data_id: Option<DataId>,
    wiretype: Wiretype,
    length: Option<usize>,
    lengthfield_len: usize,
    items: Vec<Node>,
}

impl StructNode {
    /// Creates a struct node.
    ///
    /// Composite nodes have no derivable wiretype, so `meta.wiretype` is mandatory. The
    /// length field width is taken from `meta.lengthfield_len` or derived from the wiretype.
    ///
    /// # Errors
    ///
    /// Fails if the wiretype is missing or out of range, if the length field width cannot be
    /// resolved, or if the data ID is out of range.
    pub fn new(items: Vec<Node>, meta: Meta) -> Result<Self> {
        let data_id = meta.data_id.map(DataId::new).transpose()?;
        let wiretype = meta
            .wiretype
            .map(Wiretype::new)
            .transpose()?
            .ok_or(Error::MissingWiretype(TlvType::Struct))?;
        let lengthfield_len = resolve_lengthfield_len(meta.lengthfield_len, wiretype)?;
        Ok(Self {
            name: meta.name,
            data_id,
            wiretype,
            length: meta.length,
            lengthfield_len,
            items,
        })
    }

    /// Returns the children of this struct.
    #[must_use]
    pub fn items(&self) -> &[Node] {
        &self.items
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

    /// Returns the wiretype of this node.
    #[must_use]
    pub fn wiretype(&self) -> Wiretype {
        self.wiretype
    }

    /// Returns the width in bytes of this node's length field.
    #[must_use]
    pub fn lengthfield_len(&self) -> usize {
        self.lengthfield_len
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

    /// Sets or clears the length override.
    pub fn set_length(&mut self, length: Option<usize>) {
        self.length = length;
    }

    /// Sets or clears the explicit length field width, re-deriving it from the wiretype when
    /// cleared.
    ///
    /// # Errors
    ///
    /// Fails if the width is unsupported, or if it cannot be derived from the wiretype.
    pub fn set_lengthfield_len(&mut self, lengthfield_len: Option<usize>) -> Result<()> {
        self.lengthfield_len = resolve_lengthfield_len(lengthfield_len, self.wiretype)?;
        Ok(())
    }

    /// Appends a child to this struct.
    pub fn append(&mut self, item: Node) {
        self.items.push(item);
    }

    /// Extends this struct with the given children.
    pub fn extend(&mut self, items: Vec<Node>) {
        self.items.extend(items);
    }

    /// Inserts a child at `index`, clamped to the end of the struct.
    pub fn insert(&mut self, index: usize, item: Node) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    /// Removes all children from this struct.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Exact byte count of `serialized_value`.
    pub(crate) fn value_size(&self) -> usize {
        self.items.iter().map(Node::serialization_length).sum()
    }
}

impl Serializable for StructNode {
    fn length(&self) -> usize {
        // Children keep their individual framing, so the full serialized width counts.
        self.length
            .unwrap_or_else(|| self.items.iter().map(Node::serialization_length).sum())
    }

    fn serialized_value(&self) -> Result<Vec<u8>> {
        let mut serialized = Vec::new();
        for item in &self.items {
            serialized.extend_from_slice(&item.serialization()?);
        }
        Ok(serialized)
    }

    fn serialization(&self) -> Result<Vec<u8>> {
        let mut serialized = wire::generate_tag(self.wiretype, self.data_id);
        serialized.extend_from_slice(&self.lengthfield()?);
        serialized.extend_from_slice(&self.serialized_value()?);
        Ok(serialized)
    }

    fn serialization_length(&self) -> usize {
        tag_len(self.data_id) + self.lengthfield_len + self.value_size()
    }

    fn lengthfield(&self) -> Result<Vec<u8>> {
        wire::serialize_lengthfield(self.length(), self.lengthfield_len)
    }
}
