//! Pre-serialized byte fragments spliced verbatim into a payload.

use super::Serializable;
use crate::{Error, Result};


/// An opaque, already-encoded fragment.
///
/// Pre-serialized data carries no tag and no length field: its full serialization is exactly
/// the wrapped bytes. It is used to splice externally encoded fragments into a parent
/// container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreserializedNode {
    name: Option<String>,
    data: Vec<u8>,
}

impl PreserializedNode {
    /// Creates a pre-serialized node from raw bytes.
    #[must_use]
    pub fn new(data: Vec<u8>, name: Option<String>) -> Self {
        Self { name, data }
    }

    /// Creates a pre-serialized node from a hex string, decoded strictly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHexData`] if the string contains non-hex digits or has an odd
    /// number of digits.
    pub fn from_hex(data: &str, name: Option<String>) -> Result<Self> {
        hex::decode(data)
            .map(|data| Self::new(data, name))
            .map_err(|_| Error::InvalidHexData)
    }

    /// Returns the wrapped bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the display name of this node, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Serializable for PreserializedNode {
    fn length(&self) -> usize {
        self.data.len()
    }

    fn serialized_value(&self) -> Result<Vec<u8>> {
        Ok(self.data.clone())
    }

    fn serialization(&self) -> Result<Vec<u8>> {
        // No tag and no length field are added.
        Ok(self.data.clone())
    }

    fn serialization_length(&self) -> usize {
        self.data.len()
    }

    fn lengthfield(&self) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }
}
