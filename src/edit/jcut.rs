//! J-cut rewrite: slide each audio clip earlier than its video and trim the video head.
//!
//! ```text
//! +-----++-------++-----+          +-----++-----++---+
//! +  V  ++   V   ++  V  +          +  V  ++  V  ++ V +
//! +-----++-------++-----+          +-----++-----++---+
//! +-----++-------++-----+          +-----+     +-----+
//! +  A  ++   A   ++  A  +    =>    +  A  +     +  A  +
//! +-----++-------++-----+          +-----+     +-----+
//!                                       +-------+
//!                                       +   A   +
//!                                       +-------+
//! ```
//!
//! The pass is single-shot: running it twice on the same document slides twice.

use std::collections::{HashMap, HashSet};

use crate::edit::pairing::{UnpairedClipWarning, pair_clips};
use crate::foundation::error::{JcutError, JcutResult};
use crate::schema::clip::{Clip, Track};
use crate::schema::sequence::Sequence;

/// Tuning for the J-cut pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct JcutOptions {
    /// Video clips shorter than this many frames are left untouched.
    pub min_frames: i64,
    /// Frames each qualifying pair adds to the running slide.
    pub cut: i64,
}

impl Default for JcutOptions {
    fn default() -> Self {
        Self {
            min_frames: 10,
            cut: 3,
        }
    }
}

impl JcutOptions {
    /// Both values must be positive.
    pub fn validate(&self) -> JcutResult<()> {
        if self.min_frames <= 0 {
            return Err(JcutError::validation("min_frames must be > 0"));
        }
        if self.cut <= 0 {
            return Err(JcutError::validation("cut must be > 0"));
        }
        Ok(())
    }
}

/// Clips produced by [`slide_pairs`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SlideOutput {
    /// Video clips in pair order.
    pub video: Vec<Clip>,
    /// Audio of odd-indexed pairs.
    pub track_a: Vec<Clip>,
    /// Audio of even-indexed pairs.
    pub track_b: Vec<Clip>,
    /// Frames each pair's audio moved earlier, in pair order.
    pub audio_shift: Vec<i64>,
    /// Number of pairs that were slid.
    pub slid: usize,
    /// Final cumulative slide in frames.
    pub slide: i64,
}

fn overflow(clip: &Clip) -> JcutError {
    JcutError::validation(format!(
        "slide overflows the frame range at clip '{}'",
        clip.id
    ))
}

/// Apply the slide accumulation to ordered `(video, audio)` pairs.
///
/// Pair 0 and pairs whose video is shorter than `min_frames` keep their timing and leave the
/// running slide unchanged. Every other pair grows the slide by `cut`; its video moves earlier
/// by the previous slide and loses `cut` frames from its head, its audio moves earlier by the
/// new slide and keeps its length.
///
/// Fails with a validation error when the slide leaves the `i64` frame range.
pub fn slide_pairs(
    pairs: impl IntoIterator<Item = (Clip, Clip)>,
    opts: &JcutOptions,
) -> JcutResult<SlideOutput> {
    let mut out = SlideOutput::default();
    let cut = opts.cut;

    for (i, (mut video, mut audio)) in pairs.into_iter().enumerate() {
        let mut shift = 0;
        if i > 0 && video.timeline_len() >= opts.min_frames {
            let prev = out.slide;
            let slide = prev.checked_add(cut).ok_or_else(|| overflow(&video))?;
            let moved = (|| {
                Some((
                    video.start.checked_sub(prev)?,
                    video.end.checked_sub(slide)?,
                    video.in_point.checked_add(cut)?,
                    audio.start.checked_sub(slide)?,
                    audio.end.checked_sub(slide)?,
                ))
            })();
            let (v_start, v_end, v_in, a_start, a_end) = moved.ok_or_else(|| overflow(&video))?;

            video.start = v_start;
            video.end = v_end;
            video.in_point = v_in;
            audio.start = a_start;
            audio.end = a_end;

            out.slide = slide;
            out.slid += 1;
            shift = slide;
            tracing::debug!(video = %video.id, audio = %audio.id, slide, "slid pair");
        }

        out.video.push(video);
        out.audio_shift.push(shift);
        if i % 2 == 1 {
            out.track_a.push(audio);
        } else {
            out.track_b.push(audio);
        }
    }

    Ok(out)
}

/// Summary of one [`apply_jcut`] pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct JcutReport {
    /// Number of video/audio pairs found.
    pub pairs: usize,
    /// Number of pairs that were slid.
    pub slid: usize,
    /// Final cumulative slide in frames.
    pub total_slide: i64,
    /// Clips dropped from the second audio track to make room for slid audio.
    pub replaced: usize,
    /// Links removed because they pointed at a dropped clip.
    pub dropped_links: usize,
    /// Audio tracks appended for unclaimed audio that fit on neither output track.
    pub extra_tracks: usize,
    /// Video clips without audio, passed through untouched.
    pub warnings: Vec<UnpairedClipWarning>,
}

/// Place `clip` on the first lane it does not overlap, opening a new lane if none fits.
fn place(lanes: &mut Vec<Vec<Clip>>, clip: Clip) {
    match lanes
        .iter_mut()
        .find(|lane| lane.iter().all(|c| !c.overlaps(&clip)))
    {
        Some(lane) => lane.push(clip),
        None => lanes.push(vec![clip]),
    }
}

/// Move an unclaimed audio clip along with the video it links to.
fn follow_linked_video(mut clip: Clip, shifts: &HashMap<String, i64>) -> Clip {
    let shift = clip
        .links
        .iter()
        .find_map(|l| shifts.get(&l.clip_ref))
        .copied()
        .unwrap_or(0);
    if shift > 0 && clip.start >= shift {
        clip.start -= shift;
        clip.end = clip.end.saturating_sub(shift);
    }
    clip
}

/// Drop links to `removed` clips and hand their file descriptors to a remaining clip.
///
/// Returns the number of links dropped.
fn release_removed(seq: &mut Sequence, removed: Vec<Clip>) -> usize {
    let gone: HashSet<String> = removed.iter().map(|c| c.id.clone()).collect();

    for clip in removed {
        let Some(data) = clip.file.data else {
            continue;
        };
        let file_id = clip.file.id;
        if seq
            .clips()
            .any(|c| c.file.id == file_id && c.file.data.is_some())
        {
            continue;
        }
        if let Some(heir) = seq.clips_mut().find(|c| c.file.id == file_id) {
            tracing::debug!(
                file = %file_id,
                clip = %heir.id,
                "file descriptor moved off a replaced clip"
            );
            heir.file.data = Some(data);
        }
    }

    let mut dropped = 0;
    for clip in seq.clips_mut() {
        let before = clip.links.len();
        clip.links.retain(|l| !gone.contains(&l.clip_ref));
        dropped += before - clip.links.len();
    }
    dropped
}

/// J-cut the first video track against the first audio track of `seq`, in place.
///
/// Paired audio is split across the first two audio tracks (odd pairs on the first, even on
/// the second, which is created if missing) so slid clips never overlap on one track.
/// Unpaired video clips keep their slot and timing. Unclaimed audio moves with the video it
/// links to and lands on the first of the two tracks it fits on; audio that fits on neither
/// goes to a new track. Clips already on the second track are replaced, their file
/// descriptors handed to a remaining clip and links to them dropped. The result is
/// re-validated.
#[tracing::instrument(skip_all, fields(min_frames = opts.min_frames, cut = opts.cut))]
pub fn apply_jcut(seq: &mut Sequence, opts: &JcutOptions) -> JcutResult<JcutReport> {
    opts.validate()?;
    if seq.video_tracks.is_empty() {
        return Err(JcutError::validation("sequence has no video track"));
    }
    if seq.audio_tracks.is_empty() {
        return Err(JcutError::validation("sequence has no audio track"));
    }

    let pairing = pair_clips(&seq.video_tracks[0], &seq.audio_tracks[0]);

    let mut video_slots: Vec<Option<Clip>> =
        seq.video_tracks[0].clips.iter().cloned().map(Some).collect();
    let mut audio_slots: Vec<Option<Clip>> =
        seq.audio_tracks[0].clips.iter().cloned().map(Some).collect();

    let pairs: Vec<(Clip, Clip)> = pairing
        .pairs
        .iter()
        .filter_map(|p| match (video_slots[p.video].take(), audio_slots[p.audio].take()) {
            (Some(v), Some(a)) => Some((v, a)),
            _ => None,
        })
        .collect();

    // Nothing in `seq` changes until the slide succeeded.
    let out = slide_pairs(pairs, opts)?;

    let shifts: HashMap<String, i64> = out
        .video
        .iter()
        .zip(&out.audio_shift)
        .map(|(v, &shift)| (v.id.clone(), shift))
        .collect();

    for (p, clip) in pairing.pairs.iter().zip(out.video) {
        video_slots[p.video] = Some(clip);
    }
    seq.video_tracks[0].clips = video_slots.into_iter().flatten().collect();

    let mut leftovers: Vec<Clip> = audio_slots
        .into_iter()
        .flatten()
        .map(|c| follow_linked_video(c, &shifts))
        .collect();
    leftovers.sort_by_key(|c| c.start);

    let mut lanes = vec![out.track_a, out.track_b];
    for clip in leftovers {
        place(&mut lanes, clip);
    }
    for lane in &mut lanes {
        lane.sort_by_key(|c| c.start);
    }
    let mut lanes = lanes.into_iter();
    seq.audio_tracks[0].clips = lanes.next().unwrap_or_default();
    let track_b = lanes.next().unwrap_or_default();
    let extra: Vec<Track> = lanes.map(Track::with_clips).collect();

    if seq.audio_tracks.len() == 1 {
        seq.audio_tracks.push(Track::default());
    }
    let removed = std::mem::replace(&mut seq.audio_tracks[1].clips, track_b);
    let replaced = removed.len();
    if replaced > 0 {
        tracing::warn!(
            replaced,
            "second audio track already had clips; replacing them with slid audio"
        );
    }
    let extra_tracks = extra.len();
    if extra_tracks > 0 {
        tracing::warn!(extra_tracks, "unclaimed audio did not fit; appended audio tracks");
    }
    seq.audio_tracks.extend(extra);

    let dropped_links = release_removed(seq, removed);
    if dropped_links > 0 {
        tracing::warn!(dropped_links, "dropped links to replaced clips");
    }
    seq.validate()?;

    let report = JcutReport {
        pairs: pairing.pairs.len(),
        slid: out.slid,
        total_slide: out.slide,
        replaced,
        dropped_links,
        extra_tracks,
        warnings: pairing.warnings,
    };
    tracing::info!(
        pairs = report.pairs,
        slid = report.slid,
        total_slide = report.total_slide,
        unpaired = report.warnings.len(),
        "j-cut applied"
    );
    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/edit/jcut.rs"]
mod tests;
