//! Media descriptors and the dump-scoped file catalog.

use std::collections::{HashMap, HashSet};

use serde_json::json;

use crate::foundation::error::JcutResult;
use crate::schema::Entity;
use crate::schema::clip::Clip;
use crate::schema::rate::{Rate, TimeCode};
use crate::tree::codec;
use crate::tree::{Node, NodeMap};

/// Sequence-level video format.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct VideoFormat {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Pixel aspect ratio label, e.g. `square`.
    pub pixel_aspect_ratio: String,
    /// Sequence rate.
    pub rate: Rate,
    /// Codec name, when the document names one.
    pub codec_name: Option<String>,
}

impl Entity for VideoFormat {
    const NAME: &'static str = "VideoFormat";

    fn parse(node: &Node) -> JcutResult<Self> {
        let sc = codec::required(node, Self::NAME, "samplecharacteristics")?;
        let codec_name = match codec::optional(sc, "codec") {
            Some(c) => codec::optional_text(c, Self::NAME, "name")?.map(str::to_string),
            None => None,
        };
        Ok(Self {
            width: codec::uint(sc, Self::NAME, "width")?,
            height: codec::uint(sc, Self::NAME, "height")?,
            pixel_aspect_ratio: codec::text(sc, Self::NAME, "pixelaspectratio")?.to_string(),
            rate: Rate::parse(codec::required(sc, Self::NAME, "rate")?)?,
            codec_name,
        })
    }

    fn dump(&self) -> Node {
        let mut codec_node = NodeMap::new();
        if let Some(name) = &self.codec_name {
            codec_node.insert("name".into(), codec::string(name));
        }
        codec_node.insert(
            "appspecificdata".into(),
            json!({
                "appname": "Final Cut Pro",
                "appmanufacturer": "Apple Inc.",
                "data": {"qtcodec": null},
            }),
        );

        json!({
            "samplecharacteristics": {
                "width": self.width.to_string(),
                "height": self.height.to_string(),
                "pixelaspectratio": self.pixel_aspect_ratio,
                "rate": self.rate.dump(),
                "codec": Node::Object(codec_node),
            },
        })
    }
}

/// Full descriptor of a media file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ClipFileData {
    /// File display name.
    pub name: String,
    /// `file://` URL of the media.
    pub path_url: String,
    /// Media duration in frames.
    pub duration: i64,
    /// Media rate.
    pub rate: Rate,
    /// Source timecode.
    pub timecode: TimeCode,
    /// Video width in pixels.
    pub width: u32,
    /// Video height in pixels.
    pub height: u32,
    /// Number of audio channels.
    pub audio_channels: u32,
}

impl Entity for ClipFileData {
    const NAME: &'static str = "ClipFileData";

    fn parse(node: &Node) -> JcutResult<Self> {
        let sc = codec::required_path(node, Self::NAME, &["media", "video", "samplecharacteristics"])?;
        let audio = codec::required_path(node, Self::NAME, &["media", "audio"])?;
        Ok(Self {
            name: codec::text(node, Self::NAME, "name")?.to_string(),
            path_url: codec::text(node, Self::NAME, "pathurl")?.to_string(),
            duration: codec::int(node, Self::NAME, "duration")?,
            rate: Rate::parse(codec::required(node, Self::NAME, "rate")?)?,
            timecode: TimeCode::parse(codec::required(node, Self::NAME, "timecode")?)?,
            width: codec::uint(sc, Self::NAME, "width")?,
            height: codec::uint(sc, Self::NAME, "height")?,
            audio_channels: codec::uint(audio, Self::NAME, "channelcount")?,
        })
    }

    fn dump(&self) -> Node {
        json!({
            "duration": self.duration.to_string(),
            "rate": self.rate.dump(),
            "name": self.name,
            "pathurl": self.path_url,
            "timecode": self.timecode.dump(),
            "media": {
                "video": {
                    "duration": self.duration.to_string(),
                    "samplecharacteristics": {
                        "width": self.width.to_string(),
                        "height": self.height.to_string(),
                    },
                },
                "audio": {
                    "channelcount": self.audio_channels.to_string(),
                },
            },
        })
    }
}

/// Children whose presence marks a `<file>` element as carrying a full descriptor.
const DESCRIPTOR_KEYS: [&str; 5] = ["name", "pathurl", "duration", "rate", "media"];

/// Reference to a media file, shared by id across clips.
///
/// Only one occurrence of an id in a document carries [`ClipFileData`]; every other occurrence
/// is a bare id.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ClipFile {
    /// File id (the `id` attribute).
    pub id: String,
    /// Descriptor, present only on the occurrence that carries it.
    pub data: Option<ClipFileData>,
}

impl ClipFile {
    /// Bare reference to `id`.
    pub fn reference(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: None,
        }
    }

    /// Dump this occurrence, attaching `data` when given.
    pub fn dump_with(&self, data: Option<&ClipFileData>) -> Node {
        let mut m = NodeMap::new();
        m.insert("@id".into(), codec::string(&self.id));
        if let Some(Node::Object(fields)) = data.map(Entity::dump) {
            m.extend(fields);
        }
        Node::Object(m)
    }
}

impl Entity for ClipFile {
    const NAME: &'static str = "ClipFile";

    fn parse(node: &Node) -> JcutResult<Self> {
        let id = codec::text(node, Self::NAME, "@id")?.to_string();
        let has_data = DESCRIPTOR_KEYS
            .iter()
            .any(|k| codec::optional(node, k).is_some());
        let data = if has_data {
            Some(ClipFileData::parse(node)?)
        } else {
            None
        };
        Ok(Self { id, data })
    }

    fn dump(&self) -> Node {
        self.dump_with(self.data.as_ref())
    }
}

/// Dump-time record of which file ids already carried their descriptor.
///
/// Scoped to a single serialization pass. [`FileCatalog::collect`] also remembers every
/// descriptor in the document, so the first occurrence written carries the data even when a
/// rewrite moved the clip that originally held it further down.
#[derive(Debug, Default)]
pub struct FileCatalog<'a> {
    known: HashMap<&'a str, &'a ClipFileData>,
    emitted: HashSet<String>,
}

impl<'a> FileCatalog<'a> {
    /// Catalog seeded with the descriptors found on `clips` (first one per id wins).
    pub fn collect(clips: impl IntoIterator<Item = &'a Clip>) -> Self {
        let mut known = HashMap::new();
        for clip in clips {
            if let Some(data) = &clip.file.data {
                known.entry(clip.file.id.as_str()).or_insert(data);
            }
        }
        Self {
            known,
            emitted: HashSet::new(),
        }
    }

    /// Dump one occurrence of `file`; the first occurrence of an id with a known descriptor
    /// carries it, later ones are bare ids.
    pub fn dump_file(&mut self, file: &ClipFile) -> Node {
        if self.emitted.contains(&file.id) {
            return file.dump_with(None);
        }
        let data = file
            .data
            .as_ref()
            .or_else(|| self.known.get(file.id.as_str()).copied());
        if data.is_some() {
            self.emitted.insert(file.id.clone());
        }
        file.dump_with(data)
    }

    /// Whether `id` has already been written with its descriptor.
    pub fn has_emitted(&self, id: &str) -> bool {
        self.emitted.contains(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/media.rs"]
pub(crate) mod tests;
