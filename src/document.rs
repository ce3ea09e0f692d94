//! Whole-document entry points: markup text in, rewritten markup text out.

use crate::edit::cut::SequenceBuilder;
use crate::edit::jcut::{JcutOptions, JcutReport, apply_jcut};
use crate::foundation::error::JcutResult;
use crate::schema::Entity;
use crate::schema::sequence::Sequence;
use crate::tree::Node;
use crate::tree::markup::{self, WriteOptions};

/// Parse a document tree into a [`Sequence`] and check its referential invariants.
pub fn parse_document(tree: &Node) -> JcutResult<Sequence> {
    let seq = Sequence::parse(tree)?;
    seq.validate()?;
    Ok(seq)
}

/// Dump a [`Sequence`] back to a document tree.
pub fn dump_document(seq: &Sequence) -> Node {
    seq.dump()
}

/// Parse xmeml markup into a validated [`Sequence`].
pub fn read_sequence(source: &str) -> JcutResult<Sequence> {
    parse_document(&markup::parse(source)?)
}

/// Render a [`Sequence`] as xmeml markup.
pub fn write_sequence(seq: &Sequence) -> JcutResult<String> {
    markup::unparse(&dump_document(seq), &WriteOptions::xmeml())
}

/// J-cut a document tree, returning the rewritten tree.
pub fn jcut_tree(tree: &Node, opts: &JcutOptions) -> JcutResult<(Node, JcutReport)> {
    let mut seq = parse_document(tree)?;
    let report = apply_jcut(&mut seq, opts)?;
    Ok((dump_document(&seq), report))
}

/// J-cut xmeml markup, returning the rewritten markup.
#[tracing::instrument(skip_all, fields(bytes = source.len()))]
pub fn jcut_markup(source: &str, opts: &JcutOptions) -> JcutResult<(String, JcutReport)> {
    let mut seq = read_sequence(source)?;
    let report = apply_jcut(&mut seq, opts)?;
    Ok((write_sequence(&seq)?, report))
}

/// Build a silence-cut sequence and render it as xmeml markup.
pub fn cut_markup(builder: SequenceBuilder) -> JcutResult<String> {
    write_sequence(&builder.build()?)
}
