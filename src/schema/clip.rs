//! Clips, their links and the tracks that hold them.

use crate::foundation::error::JcutResult;
use crate::schema::Entity;
use crate::schema::effect::Filter;
use crate::schema::media::{ClipFile, FileCatalog};
use crate::schema::rate::Rate;
use crate::tree::codec::{self, encode_bool};
use crate::tree::{Node, NodeMap};

/// Declared relationship from one clip to another (usually audio to its video).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Link {
    /// Id of the referenced clip.
    pub clip_ref: String,
    /// Media type of the referenced clip.
    pub media_type: Option<String>,
}

impl Link {
    /// Link to `clip_ref` tagged with `media_type`.
    pub fn to(clip_ref: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            clip_ref: clip_ref.into(),
            media_type: Some(media_type.into()),
        }
    }
}

impl Entity for Link {
    const NAME: &'static str = "Link";

    fn parse(node: &Node) -> JcutResult<Self> {
        Ok(Self {
            clip_ref: codec::text(node, Self::NAME, "linkclipref")?.to_string(),
            media_type: codec::optional_text(node, Self::NAME, "mediatype")?.map(str::to_string),
        })
    }

    fn dump(&self) -> Node {
        let mut m = NodeMap::new();
        m.insert("linkclipref".into(), codec::string(&self.clip_ref));
        if let Some(mt) = &self.media_type {
            m.insert("mediatype".into(), codec::string(mt));
        }
        Node::Object(m)
    }
}

/// Source track of an audio clip.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SourceTrack {
    /// Media type, normally `audio`.
    pub media_type: String,
    /// 1-based track index in the source media.
    pub track_index: u32,
}

impl Entity for SourceTrack {
    const NAME: &'static str = "SourceTrack";

    fn parse(node: &Node) -> JcutResult<Self> {
        Ok(Self {
            media_type: codec::text(node, Self::NAME, "mediatype")?.to_string(),
            track_index: codec::uint(node, Self::NAME, "trackindex")?,
        })
    }

    fn dump(&self) -> Node {
        serde_json::json!({
            "mediatype": self.media_type,
            "trackindex": self.track_index.to_string(),
        })
    }
}

/// One timeline occurrence of a media file (`<clipitem>`).
///
/// `start`/`end` place the clip on the timeline; `in_point`/`out_point` trim the source. All
/// values are frames.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Clip {
    /// Unique clip id within the document.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Source media duration in frames.
    pub duration: i64,
    /// Clip rate.
    pub rate: Rate,
    /// Timeline start frame.
    pub start: i64,
    /// Timeline end frame (exclusive).
    pub end: i64,
    /// Source in point.
    pub in_point: i64,
    /// Source out point.
    pub out_point: i64,
    /// Referenced media file.
    pub file: ClipFile,
    /// Whether the clip plays.
    pub enabled: bool,
    /// Composite mode of video clips, e.g. `normal`.
    pub composite_mode: Option<String>,
    /// Source track of audio clips.
    pub source_track: Option<SourceTrack>,
    /// Ordered effects.
    pub filters: Vec<Filter>,
    /// Ordered links to related clips.
    pub links: Vec<Link>,
    /// Free-form comment; `None` for an empty `<comments/>`.
    pub comments: Option<String>,
}

impl Clip {
    /// Timeline length (`end - start`).
    pub fn timeline_len(&self) -> i64 {
        self.end.saturating_sub(self.start)
    }

    /// Source length (`out - in`).
    pub fn source_len(&self) -> i64 {
        self.out_point.saturating_sub(self.in_point)
    }

    /// Whether any link of this clip references `id`.
    pub fn is_linked_to(&self, id: &str) -> bool {
        self.links.iter().any(|l| l.clip_ref == id)
    }

    /// Whether the half-open timeline ranges `[start, end)` of both clips intersect.
    pub fn overlaps(&self, other: &Clip) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Dump sharing file descriptors through `files`.
    pub fn dump_shared(&self, files: &mut FileCatalog<'_>) -> Node {
        let mut m = NodeMap::new();
        m.insert("@id".into(), codec::string(&self.id));
        m.insert("name".into(), codec::string(&self.name));
        m.insert("duration".into(), codec::string(self.duration));
        m.insert("rate".into(), self.rate.dump());
        m.insert("start".into(), codec::string(self.start));
        m.insert("end".into(), codec::string(self.end));
        m.insert("enabled".into(), codec::string(encode_bool(self.enabled)));
        m.insert("in".into(), codec::string(self.in_point));
        m.insert("out".into(), codec::string(self.out_point));
        m.insert("file".into(), files.dump_file(&self.file));
        if let Some(mode) = &self.composite_mode {
            m.insert("compositemode".into(), codec::string(mode));
        }
        if let Some(st) = &self.source_track {
            m.insert("sourcetrack".into(), st.dump());
        }
        m.insert(
            "filter".into(),
            codec::list(self.filters.iter().map(Entity::dump)),
        );
        m.insert("link".into(), codec::list(self.links.iter().map(Entity::dump)));
        m.insert(
            "comments".into(),
            self.comments.as_ref().map_or(Node::Null, |c| codec::string(c)),
        );
        Node::Object(m)
    }
}

impl Entity for Clip {
    const NAME: &'static str = "Clip";

    fn parse(node: &Node) -> JcutResult<Self> {
        let filters = codec::as_sequence(codec::optional(node, "filter"))
            .into_iter()
            .map(Filter::parse)
            .collect::<JcutResult<Vec<_>>>()?;
        let links = codec::as_sequence(codec::optional(node, "link"))
            .into_iter()
            .map(Link::parse)
            .collect::<JcutResult<Vec<_>>>()?;
        let source_track = codec::optional(node, "sourcetrack")
            .map(SourceTrack::parse)
            .transpose()?;

        Ok(Self {
            id: codec::text(node, Self::NAME, "@id")?.to_string(),
            name: codec::text(node, Self::NAME, "name")?.to_string(),
            duration: codec::int(node, Self::NAME, "duration")?,
            rate: Rate::parse(codec::required(node, Self::NAME, "rate")?)?,
            start: codec::int(node, Self::NAME, "start")?,
            end: codec::int(node, Self::NAME, "end")?,
            in_point: codec::int(node, Self::NAME, "in")?,
            out_point: codec::int(node, Self::NAME, "out")?,
            file: ClipFile::parse(codec::required(node, Self::NAME, "file")?)?,
            enabled: codec::flag(node, Self::NAME, "enabled")?,
            composite_mode: codec::optional_text(node, Self::NAME, "compositemode")?
                .map(str::to_string),
            source_track,
            filters,
            links,
            comments: codec::optional_text(node, Self::NAME, "comments")?.map(str::to_string),
        })
    }

    fn dump(&self) -> Node {
        self.dump_shared(&mut FileCatalog::default())
    }
}

/// Ordered clips of one video or audio track.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Track {
    /// Clips in timeline order.
    pub clips: Vec<Clip>,
    /// Whether the track plays.
    pub enabled: bool,
    /// Whether the track is locked for editing.
    pub locked: bool,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            clips: Vec::new(),
            enabled: true,
            locked: false,
        }
    }
}

impl Track {
    /// Enabled, unlocked track holding `clips`.
    pub fn with_clips(clips: Vec<Clip>) -> Self {
        Self {
            clips,
            ..Self::default()
        }
    }

    /// First pair of clips whose timeline ranges overlap, if any.
    pub fn find_overlap(&self) -> Option<(&Clip, &Clip)> {
        let mut sorted: Vec<&Clip> = self.clips.iter().collect();
        sorted.sort_by_key(|c| c.start);
        let mut reach: Option<&Clip> = None;
        for clip in sorted {
            if let Some(prev) = reach {
                if prev.end > clip.start {
                    return Some((prev, clip));
                }
                if clip.end > prev.end {
                    reach = Some(clip);
                }
            } else {
                reach = Some(clip);
            }
        }
        None
    }

    /// Dump sharing file descriptors through `files`.
    pub fn dump_shared(&self, files: &mut FileCatalog<'_>) -> Node {
        let clips: Vec<Node> = self.clips.iter().map(|c| c.dump_shared(files)).collect();
        serde_json::json!({
            "clipitem": clips,
            "enabled": encode_bool(self.enabled),
            "locked": encode_bool(self.locked),
        })
    }
}

impl Entity for Track {
    const NAME: &'static str = "Track";

    fn parse(node: &Node) -> JcutResult<Self> {
        let clips = codec::as_sequence(codec::optional(node, "clipitem"))
            .into_iter()
            .map(Clip::parse)
            .collect::<JcutResult<Vec<_>>>()?;
        Ok(Self {
            clips,
            enabled: codec::flag(node, Self::NAME, "enabled")?,
            locked: codec::flag(node, Self::NAME, "locked")?,
        })
    }

    fn dump(&self) -> Node {
        self.dump_shared(&mut FileCatalog::collect(&self.clips))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/clip.rs"]
mod tests;
