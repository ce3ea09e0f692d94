//! Generic attributed tree shared with the markup layer.
//!
//! A document is a [`Node`]: mappings for elements, `@`-prefixed keys for attributes,
//! [`TEXT_KEY`] for text that sits next to attributes or children, arrays for repeated
//! elements, strings for leaf text and null for empty elements.

pub mod codec;
pub mod markup;

/// One node of the generic tree.
pub type Node = serde_json::Value;

/// Mapping type backing element nodes (insertion ordered).
pub type NodeMap = serde_json::Map<String, Node>;

/// Prefix that marks a mapping key as an attribute rather than a child element.
pub const ATTR_PREFIX: char = '@';

/// Key holding element text when the element also has attributes or children.
pub const TEXT_KEY: &str = "#text";
