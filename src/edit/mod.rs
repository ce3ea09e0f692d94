//! Timeline rewrites: clip pairing, the J-cut slide and the silence-cut builder.

pub mod cut;
pub mod jcut;
pub mod pairing;

#[cfg(test)]
#[path = "../../tests/unit/edit/support.rs"]
pub(crate) mod support;
