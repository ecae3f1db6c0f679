//! Homogeneous sequences of child nodes.

use super::{resolve_lengthfield_len, tag_len, Meta, Node, Serializable};
use crate::types::{DataId, TlvType, Wiretype};
use crate::{wire, Error, Result};


/// A homogeneous sequence of scalar, composite or pre-serialized children.
///
/// The element type is fixed at construction: either given explicitly, or taken from the
/// first item, or the [`TlvType::None`] sentinel for an empty array, which then adopts the
/// type of the first element inserted later. All inserted items must match it.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayNode {
    name: Option<String>,
    data_id: Option<DataId>,
    wiretype: Wiretype,
    length: Option<usize>,
    lengthfield_len: usize,
    element_type: TlvType,
    items: Vec<Node>,
}

impl ArrayNode {
    /// Creates an array node.
    ///
    /// Composite nodes have no derivable wiretype, so `meta.wiretype` is mandatory. The
    /// length field width is taken from `meta.lengthfield_len` or derived from the wiretype.
    ///
    /// # Errors
    ///
    /// Fails if the wiretype is missing or out of range, if the length field width cannot be
    /// resolved, if the data ID is out of range, or if the items do not share one element
    /// type.
    pub fn new(items: Vec<Node>, element_type: Option<TlvType>, meta: Meta) -> Result<Self> {
        let data_id = meta.data_id.map(DataId::new).transpose()?;
        let wiretype = meta
            .wiretype
            .map(Wiretype::new)
            .transpose()?
            .ok_or(Error::MissingWiretype(TlvType::Array))?;
        let lengthfield_len = resolve_lengthfield_len(meta.lengthfield_len, wiretype)?;
        let element_type = element_type
            .or_else(|| items.first().map(Node::node_type))
            .unwrap_or(TlvType::None);
        check_items(&items, element_type)?;
        Ok(Self {
            name: meta.name,
            data_id,
            wiretype,
            length: meta.length,
            lengthfield_len,
            element_type,
            items,
        })
    }

    /// Returns the fixed element type of this array.
    #[must_use]
    pub fn element_type(&self) -> TlvType {
        self.element_type
    }

    /// Returns the items of this array.
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

    /// Returns the length override, if any.
    pub(crate) fn length_override(&self) -> Option<usize> {
        self.length
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

    /// Appends an element to this array.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the element does not match the array's element
    /// type; the array is left unchanged.
    pub fn append(&mut self, item: Node) -> Result<()> {
        self.check_item(&item)?;
        self.adopt_element_type(&item);
        self.items.push(item);
        Ok(())
    }

    /// Extends this array with the given elements.
    ///
    /// All elements are validated before any is inserted; a failed extend leaves the array
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if any element does not match the array's element
    /// type.
    pub fn extend(&mut self, items: Vec<Node>) -> Result<()> {
        let Some(first) = items.first() else {
            return Ok(());
        };
        let expected = self.effective_element_type(first);
        for item in &items {
            check_item_type(item, expected)?;
        }
        if self.element_type == TlvType::None && self.items.is_empty() {
            self.element_type = expected;
        }
        self.items.extend(items);
        Ok(())
    }

    /// Inserts an element at `index`, clamped to the end of the array.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the element does not match the array's element
    /// type.
    pub fn insert(&mut self, index: usize, item: Node) -> Result<()> {
        self.check_item(&item)?;
        self.adopt_element_type(&item);
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        Ok(())
    }

    /// Removes all items from this array. The element type is retained.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replaces the items wholesale. Callers guarantee homogeneity.
    pub(crate) fn replace_items(&mut self, items: Vec<Node>) {
        self.items = items;
    }

    fn check_item(&self, item: &Node) -> Result<()> {
        check_item_type(item, self.effective_element_type(item))
    }

    /// The type new items are held against: the fixed element type, or the item's own type
    /// when the array is still untyped.
    fn effective_element_type(&self, item: &Node) -> TlvType {
        if self.element_type == TlvType::None && self.items.is_empty() {
            item.node_type()
        } else {
            self.element_type
        }
    }

    fn adopt_element_type(&mut self, item: &Node) {
        if self.element_type == TlvType::None && self.items.is_empty() {
            self.element_type = item.node_type();
        }
    }

    /// Exact byte count of `serialized_value`.
    pub(crate) fn value_size(&self) -> usize {
        if self.element_type.is_scalar() {
            self.items.iter().map(Node::value_size).sum()
        } else if self.element_type.is_composite() || self.element_type.is_preserialized() {
            self.items.iter().map(Node::serialization_length).sum()
        } else {
            0
        }
    }
}

impl Serializable for ArrayNode {
    fn length(&self) -> usize {
        if let Some(length) = self.length {
            return length;
        }
        let Some(first) = self.items.first() else {
            return 0;
        };
        if self.element_type.is_scalar() {
            self.items.len() * first.length()
        } else if self.element_type.is_composite() {
            self.items
                .iter()
                .map(|item| item.lengthfield_len() + item.length())
                .sum()
        } else if self.element_type.is_preserialized() {
            self.items.iter().map(Node::length).sum()
        } else {
            0
        }
    }

    fn serialized_value(&self) -> Result<Vec<u8>> {
        let mut serialized = Vec::new();
        if self.element_type.is_scalar() {
            for item in &self.items {
                serialized.extend_from_slice(&item.serialized_value()?);
            }
        } else if self.element_type.is_composite() || self.element_type.is_preserialized() {
            // Nested framing is preserved: complex elements keep their own tag and length
            // field inside the array value.
            for item in &self.items {
                serialized.extend_from_slice(&item.serialization()?);
            }
        } else if !self.items.is_empty() {
            return Err(Error::UnsupportedElementType(self.element_type));
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

/// Checks that every item matches the expected element type.
fn check_items(items: &[Node], element_type: TlvType) -> Result<()> {
    for item in items {
        check_item_type(item, element_type)?;
    }
    Ok(())
}

fn check_item_type(item: &Node, element_type: TlvType) -> Result<()> {
    if item.node_type() == element_type {
        Ok(())
    } else {
        Err(Error::TypeMismatch {
            expected: element_type,
            actual: item.node_type(),
        })
    }
}
