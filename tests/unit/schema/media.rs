use super::*;
use crate::foundation::error::JcutError;

pub(crate) fn file_data_node() -> Node {
    json!({
        "duration": "900",
        "rate": {"timebase": "30", "ntsc": "FALSE"},
        "name": "interview.mov",
        "pathurl": "file:///media/interview.mov",
        "timecode": {
            "string": "00:00:00:00",
            "displayformat": "NDF",
            "rate": {"timebase": "30", "ntsc": "FALSE"}
        },
        "media": {
            "video": {
                "duration": "900",
                "samplecharacteristics": {"width": "1920", "height": "1080"}
            },
            "audio": {"channelcount": "2"}
        }
    })
}

#[test]
fn video_format_round_trips_with_and_without_codec_name() {
    let node = json!({
        "samplecharacteristics": {
            "width": "1280",
            "height": "720",
            "pixelaspectratio": "square",
            "rate": {"timebase": "25", "ntsc": "FALSE"},
            "codec": {
                "name": "Apple ProRes 422",
                "appspecificdata": {
                    "appname": "Final Cut Pro",
                    "appmanufacturer": "Apple Inc.",
                    "data": {"qtcodec": null}
                }
            }
        }
    });
    let fmt = VideoFormat::parse(&node).unwrap();
    assert_eq!(fmt.codec_name.as_deref(), Some("Apple ProRes 422"));
    assert_eq!(fmt.dump(), node);

    let plain = VideoFormat {
        codec_name: None,
        ..fmt
    };
    let dumped = plain.dump();
    assert!(dumped["samplecharacteristics"]["codec"].get("name").is_none());
    assert_eq!(VideoFormat::parse(&dumped).unwrap(), plain);
}

#[test]
fn file_with_descriptor_parses_data() {
    let mut node = file_data_node();
    node.as_object_mut()
        .unwrap()
        .insert("@id".into(), json!("file-1"));

    let file = ClipFile::parse(&node).unwrap();
    assert_eq!(file.id, "file-1");
    let data = file.data.as_ref().unwrap();
    assert_eq!(data.width, 1920);
    assert_eq!(data.audio_channels, 2);
    assert_eq!(ClipFile::parse(&file.dump()).unwrap(), file);
}

#[test]
fn bare_file_reference_has_no_data() {
    let file = ClipFile::parse(&json!({"@id": "file-1"})).unwrap();
    assert_eq!(file, ClipFile::reference("file-1"));
    assert_eq!(file.dump(), json!({"@id": "file-1"}));
}

#[test]
fn partial_descriptor_is_a_schema_error() {
    let node = json!({"@id": "file-1", "name": "interview.mov"});
    assert!(matches!(
        ClipFile::parse(&node),
        Err(JcutError::Schema { .. })
    ));
}

#[test]
fn missing_audio_block_names_the_path() {
    let mut node = file_data_node();
    node["media"].as_object_mut().unwrap().remove("audio");
    match ClipFileData::parse(&node) {
        Err(JcutError::Schema { field, .. }) => assert_eq!(field, "media.audio"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn catalog_emits_descriptor_once_per_id() {
    let data = ClipFileData::parse(&file_data_node()).unwrap();
    let full = ClipFile {
        id: "file-1".into(),
        data: Some(data),
    };
    let bare = ClipFile::reference("file-1");

    let mut files = FileCatalog::default();
    assert!(files.dump_file(&bare).get("name").is_none());
    assert!(!files.has_emitted("file-1"));
    assert!(files.dump_file(&full).get("name").is_some());
    assert!(files.has_emitted("file-1"));
    assert!(files.dump_file(&full).get("name").is_none());
}
