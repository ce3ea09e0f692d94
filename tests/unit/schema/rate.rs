use super::*;
use crate::foundation::error::JcutError;

#[test]
fn rate_round_trips() {
    let node = json!({"timebase": "30", "ntsc": "TRUE"});
    let rate = Rate::parse(&node).unwrap();
    assert_eq!(
        rate,
        Rate {
            timebase: 30,
            ntsc: true
        }
    );
    assert_eq!(rate.dump(), node);
    assert!((rate.fps() - 29.97).abs() < 0.001);
}

#[test]
fn frames_convert_to_seconds() {
    assert_eq!(Rate::new(25).frames_to_secs(50), 2.0);
    let ntsc = Rate {
        timebase: 30,
        ntsc: true,
    };
    assert!((ntsc.frames_to_secs(30) - 1.001).abs() < 1e-9);
    assert_eq!(Rate::new(0).frames_to_secs(10), 0.0);
}

#[test]
fn rate_rejects_lower_case_bool() {
    let node = json!({"timebase": "25", "ntsc": "false"});
    assert!(matches!(Rate::parse(&node), Err(JcutError::Format { .. })));
}

#[test]
fn timecode_keeps_optional_fields() {
    let full = json!({
        "string": "01:00:00:00",
        "frame": "108000",
        "displayformat": "NDF",
        "rate": {"timebase": "30", "ntsc": "FALSE"}
    });
    let tc = TimeCode::parse(&full).unwrap();
    assert_eq!(tc.frame, Some(108000));
    assert_eq!(tc.display_format.as_deref(), Some("NDF"));
    assert_eq!(tc.dump(), full);

    let bare = json!({
        "string": "00:00:00:00",
        "rate": {"timebase": "25", "ntsc": "FALSE"}
    });
    let tc = TimeCode::parse(&bare).unwrap();
    assert_eq!(tc.frame, None);
    assert_eq!(tc.dump(), bare);
    assert_eq!(TimeCode::parse(&tc.dump()).unwrap(), tc);
}

#[test]
fn timecode_requires_rate() {
    let node = json!({"string": "00:00:00:00"});
    match TimeCode::parse(&node) {
        Err(JcutError::Schema { entity, field, .. }) => {
            assert_eq!(entity, "TimeCode");
            assert_eq!(field, "rate");
        }
        other => panic!("unexpected {other:?}"),
    }
}
