//! Strongly-typed timeline schema over the generic tree.
//!
//! Every entity parses from a [`Node`] (fail-fast on the first missing or mis-shaped field) and
//! dumps back into a canonical node: lists for multi-occurrence fields, strings for every
//! numeric and boolean leaf, and the element order the interchange format expects.

pub mod clip;
pub mod effect;
pub mod media;
pub mod rate;
pub mod sequence;

use crate::foundation::error::JcutResult;
use crate::tree::Node;

/// A record with a parse/dump mapping to the generic tree.
pub trait Entity: Sized {
    /// Entity name used in error reports.
    const NAME: &'static str;

    /// Build the entity from its element node.
    fn parse(node: &Node) -> JcutResult<Self>;

    /// Dump the entity into its canonical element node.
    fn dump(&self) -> Node;
}
