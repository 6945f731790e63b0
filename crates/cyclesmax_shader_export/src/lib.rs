// SPDX-License-Identifier: MIT OR Apache-2.0
//! Serialization of host shader node graphs into the Cycles for Max
//! `.shader` token stream.
//!
//! The pipeline per graph:
//! - [`NodeKindRegistry`] classifies each host node type
//! - [`translate_node`] copies socket defaults and kind-specific settings
//!   into an [`InternalNode`], assigning image texture slots on the way
//! - [`resolve_link`] turns links between written nodes into
//!   [`Connection`]s, renaming positional sockets
//! - [`ShaderSerializer`] runs the above and emits the stream
//!
//! A pass never fails. Unknown and incompatible node types are reported in
//! the [`SerializationResult`] and left out of the stream.

pub mod attributes;
pub mod connection;
pub mod encode;
pub mod error;
pub mod kind;
pub mod serializer;
pub mod texture;
pub mod translate;

pub use attributes::{AttributeSet, AttributeValue, GridPosition, InternalNode};
pub use connection::{resolve_link, Connection};
pub use error::ExportError;
pub use kind::{NodeKind, NodeKindRegistry, IMAGE_TEXTURE_TYPE};
pub use serializer::{SerializationResult, ShaderSerializer};
pub use texture::TextureSlotTable;
pub use translate::{normalize_identifier, translate_node};
