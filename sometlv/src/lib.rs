//! Serialization of SOME/IP payloads in Tag-Length-Value encoding.
//!
//! Payloads are described as trees of typed [`Node`] values, either built directly or parsed
//! from a JSON description with the [`json`] module, and serialized to their exact binary
//! wire representation with [`Serializable::serialization`].
//!
//! ```
//! use sometlv::node::{Meta, ScalarNode, StructNode};
//! use sometlv::{Node, Serializable};
//!
//! # fn main() -> sometlv::Result<()> {
//! let counter = ScalarNode::uint16(7, Some(1))?;
//! let payload = StructNode::new(vec![counter.into()], Meta::tagged(2, 5))?;
//! assert_eq!(
//!     Node::from(payload).serialization()?,
//!     [0x50, 0x02, 0x04, 0x10, 0x01, 0x00, 0x07]
//! );
//! # Ok(())
//! # }
//! ```

#![warn(
    clippy::nursery,
    clippy::pedantic,
    clippy::expect_used,
    clippy::unwrap_used
)]

pub mod fmt;
pub mod json;
pub mod node;
pub mod types;
pub mod wire;

mod error;

pub use error::{Error, Result};
pub use node::{Node, Serializable};
