//! Clip fixtures shared by the edit unit tests.

use crate::schema::clip::{Clip, Link, Track};
use crate::schema::media::ClipFile;
use crate::schema::rate::Rate;

pub(crate) fn clip(id: &str, start: i64, end: i64, links: &[&str]) -> Clip {
    Clip {
        id: id.to_string(),
        name: "interview.mov".to_string(),
        duration: 900,
        rate: Rate::new(30),
        start,
        end,
        in_point: start + 100,
        out_point: end + 100,
        file: ClipFile::reference("file-1"),
        enabled: true,
        composite_mode: None,
        source_track: None,
        filters: Vec::new(),
        links: links
            .iter()
            .map(|r| Link {
                clip_ref: r.to_string(),
                media_type: None,
            })
            .collect(),
        comments: None,
    }
}

/// Video track with clips `v{i}` at `spans`, and an audio track whose clip `a{i}` links to
/// `v{i}` with the same timing.
pub(crate) fn paired_tracks(spans: &[(i64, i64)]) -> (Track, Track) {
    let mut video = Vec::new();
    let mut audio = Vec::new();
    for (i, &(s, e)) in spans.iter().enumerate() {
        let v = format!("v{i}");
        let a = format!("a{i}");
        video.push(clip(&v, s, e, &[v.as_str(), a.as_str()]));
        audio.push(clip(&a, s, e, &[v.as_str(), a.as_str()]));
    }
    (Track::with_clips(video), Track::with_clips(audio))
}
