//! Video/audio clip pairing through declared links.

use std::fmt;

use crate::schema::clip::Track;

/// A video clip for which no audio clip declares a link.
///
/// Non-fatal: the clip passes through the rewrite untouched.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct UnpairedClipWarning {
    /// Id of the unpaired video clip.
    pub clip_id: String,
    /// Timeline start of the clip.
    pub start: i64,
    /// Timeline end of the clip.
    pub end: i64,
}

impl fmt::Display for UnpairedClipWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no audio clip for video clip '{}' between {} and {}",
            self.clip_id, self.start, self.end
        )
    }
}

/// Indices of a video clip and the audio clip paired with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClipPair {
    /// Index into the video track's clips.
    pub video: usize,
    /// Index into the audio track's clips.
    pub audio: usize,
}

/// Result of [`pair_clips`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pairing {
    /// Pairs in video-track order.
    pub pairs: Vec<ClipPair>,
    /// Video clip indices with no audio match, in track order.
    pub unpaired_video: Vec<usize>,
    /// Audio clip indices no video clip claimed, in track order.
    pub leftover_audio: Vec<usize>,
    /// One warning per unpaired video clip.
    pub warnings: Vec<UnpairedClipWarning>,
}

/// Pair each video clip with the first audio clip (in document order) linking to it.
///
/// An audio clip is claimed at most once; a later video clip linked only to an already-claimed
/// audio clip is reported as unpaired.
#[tracing::instrument(skip_all, fields(video = video.clips.len(), audio = audio.clips.len()))]
pub fn pair_clips(video: &Track, audio: &Track) -> Pairing {
    let mut claimed = vec![false; audio.clips.len()];
    let mut out = Pairing::default();

    for (vi, v) in video.clips.iter().enumerate() {
        let found = audio
            .clips
            .iter()
            .enumerate()
            .find(|(ai, a)| !claimed[*ai] && a.is_linked_to(&v.id))
            .map(|(ai, _)| ai);

        match found {
            Some(ai) => {
                claimed[ai] = true;
                out.pairs.push(ClipPair {
                    video: vi,
                    audio: ai,
                });
            }
            None => {
                let warning = UnpairedClipWarning {
                    clip_id: v.id.clone(),
                    start: v.start,
                    end: v.end,
                };
                tracing::warn!("{warning}");
                out.unpaired_video.push(vi);
                out.warnings.push(warning);
            }
        }
    }

    out.leftover_audio = claimed
        .iter()
        .enumerate()
        .filter(|(_, c)| !**c)
        .map(|(i, _)| i)
        .collect();
    out
}

#[cfg(test)]
#[path = "../../tests/unit/edit/pairing.rs"]
mod tests;
