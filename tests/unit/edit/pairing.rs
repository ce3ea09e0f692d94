use super::*;
use crate::edit::support::{clip, paired_tracks};

#[test]
fn pairs_follow_video_order() {
    let (video, audio) = paired_tracks(&[(0, 10), (10, 40), (40, 50)]);
    let pairing = pair_clips(&video, &audio);
    assert_eq!(
        pairing.pairs,
        vec![
            ClipPair { video: 0, audio: 0 },
            ClipPair { video: 1, audio: 1 },
            ClipPair { video: 2, audio: 2 },
        ]
    );
    assert!(pairing.unpaired_video.is_empty());
    assert!(pairing.leftover_audio.is_empty());
    assert!(pairing.warnings.is_empty());
}

#[test]
fn unlinked_video_clip_yields_one_warning() {
    let (mut video, audio) = paired_tracks(&[(0, 10), (20, 30)]);
    video.clips.insert(1, clip("title", 10, 20, &[]));

    let pairing = pair_clips(&video, &audio);
    assert_eq!(pairing.pairs.len(), 2);
    assert_eq!(pairing.unpaired_video, vec![1]);
    assert_eq!(
        pairing.warnings,
        vec![UnpairedClipWarning {
            clip_id: "title".to_string(),
            start: 10,
            end: 20,
        }]
    );
    assert!(pairing.warnings[0].to_string().contains("'title'"));
}

#[test]
fn first_linked_audio_clip_wins() {
    let (video, mut audio) = paired_tracks(&[(0, 10)]);
    audio.clips.insert(0, clip("a-early", 0, 10, &["v0"]));

    let pairing = pair_clips(&video, &audio);
    assert_eq!(pairing.pairs, vec![ClipPair { video: 0, audio: 0 }]);
    assert_eq!(pairing.leftover_audio, vec![1]);
}

#[test]
fn audio_clip_is_claimed_once() {
    let video = Track::with_clips(vec![
        clip("v0", 0, 10, &[]),
        clip("v1", 10, 20, &[]),
    ]);
    let audio = Track::with_clips(vec![clip("a0", 0, 20, &["v0", "v1"])]);

    let pairing = pair_clips(&video, &audio);
    assert_eq!(pairing.pairs, vec![ClipPair { video: 0, audio: 0 }]);
    assert_eq!(pairing.unpaired_video, vec![1]);
    assert_eq!(pairing.warnings.len(), 1);
}
