use super::*;
use crate::foundation::error::JcutError;
use crate::schema::media::tests::file_data_node;
use serde_json::json;

fn video_clip_node() -> Node {
    let mut file = file_data_node();
    file.as_object_mut()
        .unwrap()
        .insert("@id".into(), json!("file-1"));
    json!({
        "@id": "v1",
        "name": "interview.mov",
        "duration": "900",
        "rate": {"timebase": "30", "ntsc": "FALSE"},
        "start": "0",
        "end": "120",
        "enabled": "TRUE",
        "in": "30",
        "out": "150",
        "file": file,
        "compositemode": "normal",
        "filter": [],
        "link": [
            {"linkclipref": "v1", "mediatype": "video"},
            {"linkclipref": "a1", "mediatype": "audio"}
        ],
        "comments": null
    })
}

fn audio_clip_node() -> Node {
    json!({
        "@id": "a1",
        "name": "interview.mov",
        "duration": "900",
        "rate": {"timebase": "30", "ntsc": "FALSE"},
        "start": "0",
        "end": "120",
        "enabled": "TRUE",
        "in": "30",
        "out": "150",
        "file": {"@id": "file-1"},
        "sourcetrack": {"mediatype": "audio", "trackindex": "1"},
        "link": {"linkclipref": "v1"},
        "comments": "take 2"
    })
}

#[test]
fn video_clip_round_trips() {
    let node = video_clip_node();
    let clip = Clip::parse(&node).unwrap();
    assert_eq!(clip.timeline_len(), clip.source_len());
    assert!(clip.file.data.is_some());
    assert_eq!(clip.composite_mode.as_deref(), Some("normal"));
    assert!(clip.is_linked_to("a1"));
    assert!(!clip.is_linked_to("a2"));

    assert_eq!(clip.dump(), node);
    assert_eq!(Clip::parse(&clip.dump()).unwrap(), clip);
}

#[test]
fn audio_clip_normalizes_singletons_and_absent_lists() {
    let clip = Clip::parse(&audio_clip_node()).unwrap();
    assert_eq!(clip.links.len(), 1);
    assert_eq!(clip.links[0].media_type, None);
    assert!(clip.filters.is_empty());
    assert_eq!(clip.source_track.as_ref().unwrap().track_index, 1);
    assert_eq!(clip.comments.as_deref(), Some("take 2"));

    let dumped = clip.dump();
    assert!(dumped["link"].is_array());
    assert_eq!(dumped["filter"], json!([]));
    assert!(dumped.get("compositemode").is_none());
    assert_eq!(Clip::parse(&dumped).unwrap(), clip);
}

#[test]
fn clip_dump_uses_canonical_key_order() {
    let clip = Clip::parse(&video_clip_node()).unwrap();
    let dumped = clip.dump();
    let keys: Vec<&str> = dumped
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        [
            "@id",
            "name",
            "duration",
            "rate",
            "start",
            "end",
            "enabled",
            "in",
            "out",
            "file",
            "compositemode",
            "filter",
            "link",
            "comments"
        ]
    );
}

#[test]
fn missing_start_is_a_schema_error() {
    let mut node = audio_clip_node();
    node.as_object_mut().unwrap().remove("start");
    match Clip::parse(&node) {
        Err(JcutError::Schema { entity, field, .. }) => {
            assert_eq!(entity, "Clip");
            assert_eq!(field, "start");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn non_numeric_frame_is_a_format_error() {
    let mut node = audio_clip_node();
    node["in"] = json!("ten");
    assert!(matches!(Clip::parse(&node), Err(JcutError::Format { .. })));
}

#[test]
fn track_dump_shares_file_descriptor() {
    let node = json!({
        "clipitem": [video_clip_node(), audio_clip_node()],
        "enabled": "TRUE",
        "locked": "FALSE"
    });
    let mut track = Track::parse(&node).unwrap();
    assert_eq!(track.clips.len(), 2);

    // Move the descriptor-carrying clip behind the bare reference.
    track.clips.reverse();
    let dumped = track.dump();
    let clips = dumped["clipitem"].as_array().unwrap();
    assert!(clips[0]["file"].get("pathurl").is_some());
    assert!(clips[1]["file"].get("pathurl").is_none());
}

#[test]
fn empty_track_parses_and_dumps_list() {
    let node = json!({"enabled": "TRUE", "locked": "TRUE"});
    let track = Track::parse(&node).unwrap();
    assert!(track.clips.is_empty());
    assert!(track.locked);
    assert_eq!(track.dump()["clipitem"], json!([]));
}

#[test]
fn overlap_detection_uses_half_open_ranges() {
    let base = Clip::parse(&audio_clip_node()).unwrap();
    let at = |id: &str, start: i64, end: i64| Clip {
        id: id.to_string(),
        start,
        end,
        ..base.clone()
    };

    let touching = Track::with_clips(vec![at("a", 0, 10), at("b", 10, 20)]);
    assert!(touching.find_overlap().is_none());

    let nested = Track::with_clips(vec![at("a", 0, 30), at("b", 5, 10), at("c", 20, 25)]);
    let (x, y) = nested.find_overlap().unwrap();
    assert_eq!((x.id.as_str(), y.id.as_str()), ("a", "b"));
    assert!(at("a", 0, 10).overlaps(&at("b", 9, 12)));
}
