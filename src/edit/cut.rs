//! Silence-cut: build a fresh sequence from the loud ranges of one source file.
//!
//! Each loud `[start, end)` range of the source becomes one video clip and one linked audio
//! clip, placed back-to-back on the timeline. Deciding which ranges are loud happens upstream.

use std::path::Path;

use crate::foundation::error::{JcutError, JcutResult};
use crate::schema::clip::{Clip, Link, SourceTrack, Track};
use crate::schema::media::{ClipFile, ClipFileData, VideoFormat};
use crate::schema::rate::{Rate, TimeCode};
use crate::schema::sequence::{DEFAULT_VERSION, Sequence};

/// Description of the source media file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceMedia {
    /// Filesystem path of the media.
    pub path: String,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Media rate.
    pub rate: Rate,
    /// Media duration in frames.
    pub duration: i64,
    /// Number of audio channels.
    pub audio_channels: u32,
}

impl SourceMedia {
    /// File name component of [`SourceMedia::path`].
    pub fn file_name(&self) -> String {
        Path::new(&self.path)
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// `file://` URL with forward slashes and a leading `/`.
    pub fn path_url(&self) -> String {
        let mut p = self.path.replace('\\', "/");
        if !p.starts_with('/') {
            p.insert(0, '/');
        }
        format!("file://{p}")
    }
}

/// Builder for a silence-cut [`Sequence`].
pub struct SequenceBuilder {
    media: SourceMedia,
    ranges: Vec<(i64, i64)>,
}

impl SequenceBuilder {
    /// Start a builder for `media`.
    pub fn new(media: SourceMedia) -> Self {
        Self {
            media,
            ranges: Vec::new(),
        }
    }

    /// Append one loud range `[start, end)` in source frames.
    ///
    /// Ranges must be non-empty, ascending, non-overlapping and inside the media.
    pub fn range(mut self, start: i64, end: i64) -> JcutResult<Self> {
        if start < 0 || start >= end {
            return Err(JcutError::validation(format!(
                "range [{start}, {end}) must satisfy 0 <= start < end"
            )));
        }
        if end > self.media.duration {
            return Err(JcutError::validation(format!(
                "range [{start}, {end}) exceeds media duration {}",
                self.media.duration
            )));
        }
        if let Some(&(_, prev_end)) = self.ranges.last() {
            if start < prev_end {
                return Err(JcutError::validation(format!(
                    "range [{start}, {end}) overlaps or precedes the previous range ending at {prev_end}"
                )));
            }
        }
        self.ranges.push((start, end));
        Ok(self)
    }

    /// Append several ranges in order.
    pub fn ranges(self, ranges: impl IntoIterator<Item = (i64, i64)>) -> JcutResult<Self> {
        ranges
            .into_iter()
            .try_fold(self, |b, (start, end)| b.range(start, end))
    }

    /// Build the sequence. The video and audio clip of each range link to each other.
    pub fn build(self) -> JcutResult<Sequence> {
        if self.ranges.is_empty() {
            return Err(JcutError::validation("at least one range is required"));
        }

        let media = &self.media;
        let rate = media.rate;
        let name = media.file_name();
        let file_id = format!("{name} 0");
        let file_data = ClipFileData {
            name: name.clone(),
            path_url: media.path_url(),
            duration: media.duration,
            rate,
            timecode: TimeCode {
                timecode: "00:00:00:00".to_string(),
                frame: None,
                display_format: Some("NDF".to_string()),
                rate,
            },
            width: media.width,
            height: media.height,
            audio_channels: media.audio_channels,
        };

        let mut video = Vec::with_capacity(self.ranges.len());
        let mut audio = Vec::with_capacity(self.ranges.len());
        let mut cursor = 0i64;
        let mut index = 1usize;

        for &(start, end) in &self.ranges {
            let len = end - start;
            let video_id = format!("{name} {index}");
            let audio_id = format!("{name} {}", index + 1);
            index += 2;

            let links = vec![
                Link::to(video_id.clone(), "video"),
                Link::to(audio_id.clone(), "audio"),
            ];
            let base = Clip {
                id: video_id,
                name: name.clone(),
                duration: media.duration,
                rate,
                start: cursor,
                end: cursor + len,
                in_point: start,
                out_point: end,
                file: ClipFile::reference(file_id.clone()),
                enabled: true,
                composite_mode: Some("normal".to_string()),
                source_track: None,
                filters: Vec::new(),
                links,
                comments: None,
            };
            let audio_clip = Clip {
                id: audio_id,
                composite_mode: None,
                source_track: Some(SourceTrack {
                    media_type: "audio".to_string(),
                    track_index: 1,
                }),
                ..base.clone()
            };
            video.push(base);
            audio.push(audio_clip);
            cursor += len;
        }

        if let Some(first) = video.first_mut() {
            first.file.data = Some(file_data);
        }

        tracing::debug!(clips = video.len(), frames = cursor, "built silence-cut sequence");

        Ok(Sequence {
            version: DEFAULT_VERSION.to_string(),
            name: format!("Timeline {name}"),
            duration: cursor,
            rate,
            in_point: -1,
            out_point: -1,
            timecode: TimeCode {
                timecode: "01:00:00:00".to_string(),
                frame: Some(3600 * i64::from(rate.timebase)),
                display_format: Some("NDF".to_string()),
                rate,
            },
            video_tracks: vec![Track::with_clips(video)],
            video_format: VideoFormat {
                width: media.width,
                height: media.height,
                pixel_aspect_ratio: "square".to_string(),
                rate,
                codec_name: None,
            },
            audio_tracks: vec![Track::with_clips(audio)],
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/edit/cut.rs"]
mod tests;
