//! jcutter reads and writes Final Cut Pro 7 XML (`xmeml`) timelines and rewrites them.
//!
//! # Pipeline overview
//!
//! 1. **Parse markup**: `&str -> Node` through [`tree::markup::parse`] (an `xmltodict`-style tree)
//! 2. **Decode**: `Node -> Sequence` through [`Entity::parse`], fail-fast with a field path
//! 3. **Rewrite**: [`apply_jcut`] slides paired audio ahead of its video, or
//!    [`SequenceBuilder`] lays out a fresh silence-cut sequence
//! 4. **Encode**: `Sequence -> Node -> String`, sharing each media file descriptor once
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Order-preserving**: element order survives a parse/dump round trip.
//! - **Warnings are values**: unpaired clips are reported in [`JcutReport`], never as errors.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

pub mod document;
pub mod edit;
pub mod schema;
pub mod tree;

pub use document::{
    cut_markup, dump_document, jcut_markup, jcut_tree, parse_document, read_sequence,
    write_sequence,
};
pub use edit::cut::{SequenceBuilder, SourceMedia};
pub use edit::jcut::{JcutOptions, JcutReport, apply_jcut, slide_pairs};
pub use edit::pairing::{Pairing, UnpairedClipWarning, pair_clips};
pub use foundation::error::{JcutError, JcutResult};
pub use schema::Entity;
pub use schema::clip::{Clip, Link, SourceTrack, Track};
pub use schema::effect::{Filter, FilterParameter, FilterValue};
pub use schema::media::{ClipFile, ClipFileData, VideoFormat};
pub use schema::rate::{Rate, TimeCode};
pub use schema::sequence::Sequence;
pub use tree::markup::WriteOptions;
pub use tree::{Node, NodeMap};
