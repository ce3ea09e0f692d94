//! The sequence, root of an interchange document.

use std::collections::HashSet;

use serde_json::json;

use crate::foundation::error::{JcutError, JcutResult};
use crate::schema::Entity;
use crate::schema::clip::{Clip, Track};
use crate::schema::media::{FileCatalog, VideoFormat};
use crate::schema::rate::{Rate, TimeCode};
use crate::tree::codec;
use crate::tree::Node;

/// Version attribute written when a document does not state one.
pub const DEFAULT_VERSION: &str = "5";

/// Whole interchange document: one sequence with its video and audio tracks.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Sequence {
    /// `version` attribute of the root element.
    pub version: String,
    /// Sequence name.
    pub name: String,
    /// Sequence duration in frames.
    pub duration: i64,
    /// Sequence rate.
    pub rate: Rate,
    /// In marker (`-1` when unset).
    pub in_point: i64,
    /// Out marker (`-1` when unset).
    pub out_point: i64,
    /// Sequence start timecode.
    pub timecode: TimeCode,
    /// Video tracks, bottom to top.
    pub video_tracks: Vec<Track>,
    /// Video format of the sequence.
    pub video_format: VideoFormat,
    /// Audio tracks.
    pub audio_tracks: Vec<Track>,
}

impl Sequence {
    /// All clips in document order (video tracks first).
    pub fn clips(&self) -> impl Iterator<Item = &Clip> {
        self.video_tracks
            .iter()
            .chain(&self.audio_tracks)
            .flat_map(|t| t.clips.iter())
    }

    /// All clips in document order, mutably.
    pub fn clips_mut(&mut self) -> impl Iterator<Item = &mut Clip> {
        self.video_tracks
            .iter_mut()
            .chain(&mut self.audio_tracks)
            .flat_map(|t| t.clips.iter_mut())
    }

    /// Look up a clip by id.
    pub fn clip(&self, id: &str) -> Option<&Clip> {
        self.clips().find(|c| c.id == id)
    }

    /// Check the referential invariants: clip ids are unique and every link resolves.
    pub fn validate(&self) -> JcutResult<()> {
        let mut ids = HashSet::new();
        for clip in self.clips() {
            if !ids.insert(clip.id.as_str()) {
                return Err(JcutError::validation(format!(
                    "duplicate clip id '{}'",
                    clip.id
                )));
            }
        }
        for clip in self.clips() {
            if let Some(link) = clip.links.iter().find(|l| !ids.contains(l.clip_ref.as_str())) {
                return Err(JcutError::validation(format!(
                    "clip '{}' links to unknown clip '{}'",
                    clip.id, link.clip_ref
                )));
            }
        }
        Ok(())
    }

    /// Dump sharing file descriptors through `files`.
    pub fn dump_shared(&self, files: &mut FileCatalog<'_>) -> Node {
        let video: Vec<Node> = self
            .video_tracks
            .iter()
            .map(|t| t.dump_shared(files))
            .collect();
        let audio: Vec<Node> = self
            .audio_tracks
            .iter()
            .map(|t| t.dump_shared(files))
            .collect();

        json!({
            "xmeml": {
                "@version": self.version,
                "sequence": {
                    "name": self.name,
                    "duration": self.duration.to_string(),
                    "rate": self.rate.dump(),
                    "in": self.in_point.to_string(),
                    "out": self.out_point.to_string(),
                    "timecode": self.timecode.dump(),
                    "media": {
                        "video": {
                            "track": video,
                            "format": self.video_format.dump(),
                        },
                        "audio": {
                            "track": audio,
                        },
                    },
                },
            },
        })
    }
}

fn parse_tracks(parent: &Node) -> JcutResult<Vec<Track>> {
    codec::as_sequence(codec::optional(parent, "track"))
        .into_iter()
        .map(Track::parse)
        .collect()
}

impl Entity for Sequence {
    const NAME: &'static str = "Sequence";

    /// Parse a whole document tree (`{"xmeml": {...}}`).
    fn parse(node: &Node) -> JcutResult<Self> {
        let root = codec::required(node, Self::NAME, "xmeml")?;
        let seq = codec::required(root, Self::NAME, "sequence")?;
        let video = codec::required_path(seq, Self::NAME, &["media", "video"])?;
        let audio = codec::required_path(seq, Self::NAME, &["media", "audio"])?;

        Ok(Self {
            version: codec::optional_text(root, Self::NAME, "@version")?
                .unwrap_or(DEFAULT_VERSION)
                .to_string(),
            name: codec::text(seq, Self::NAME, "name")?.to_string(),
            duration: codec::int(seq, Self::NAME, "duration")?,
            rate: Rate::parse(codec::required(seq, Self::NAME, "rate")?)?,
            in_point: codec::int(seq, Self::NAME, "in")?,
            out_point: codec::int(seq, Self::NAME, "out")?,
            timecode: TimeCode::parse(codec::required(seq, Self::NAME, "timecode")?)?,
            video_tracks: parse_tracks(video)?,
            video_format: VideoFormat::parse(codec::required(video, Self::NAME, "format")?)?,
            audio_tracks: parse_tracks(audio)?,
        })
    }

    fn dump(&self) -> Node {
        let mut files = FileCatalog::collect(self.clips());
        self.dump_shared(&mut files)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/sequence.rs"]
mod tests;
