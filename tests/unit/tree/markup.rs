use super::*;
use serde_json::json;

#[test]
fn parse_follows_xmltodict_conventions() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE xmeml>
<xmeml version="5">
  <sequence id="seq">
    <name>Demo &amp; co</name>
    <comments/>
    <track><enabled>TRUE</enabled></track>
    <track><enabled>FALSE</enabled></track>
    <label note="x">hello</label>
  </sequence>
</xmeml>"#;

    let tree = parse(xml).unwrap();
    assert_eq!(
        tree,
        json!({
            "xmeml": {
                "@version": "5",
                "sequence": {
                    "@id": "seq",
                    "name": "Demo & co",
                    "comments": null,
                    "track": [
                        {"enabled": "TRUE"},
                        {"enabled": "FALSE"}
                    ],
                    "label": {"@note": "x", "#text": "hello"}
                }
            }
        })
    );
}

#[test]
fn keys_keep_document_order() {
    let tree = parse("<a><z>1</z><b>2</b><m>3</m></a>").unwrap();
    let keys: Vec<&str> = tree["a"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, ["z", "b", "m"]);
}

#[test]
fn unparse_then_parse_is_stable() {
    let tree = json!({
        "xmeml": {
            "@version": "5",
            "sequence": {
                "name": "A <b> & \"c\"",
                "clipitem": [
                    {"@id": "c1", "start": "0"},
                    {"@id": "c2", "start": "10"}
                ],
                "link": [],
                "comments": null,
                "label": {"@note": "x", "#text": "hello"}
            }
        }
    });

    let text = unparse(&tree, &WriteOptions::xmeml()).unwrap();
    assert!(text.starts_with("<?xml"));
    assert!(text.contains("<!DOCTYPE xmeml>"));
    assert!(!text.contains("<link"));

    let back = parse(&text).unwrap();
    let mut expected = tree.clone();
    expected["xmeml"]["sequence"]
        .as_object_mut()
        .unwrap()
        .remove("link");
    assert_eq!(back, expected);
}

#[test]
fn malformed_markup_is_rejected() {
    assert!(matches!(
        parse("<a><b></a>"),
        Err(JcutError::Markup(_))
    ));
    assert!(matches!(parse("<a>"), Err(JcutError::Markup(_))));
    assert!(matches!(parse(""), Err(JcutError::Markup(_))));
}

#[test]
fn unparse_requires_single_root() {
    let two = json!({"a": "1", "b": "2"});
    assert!(unparse(&two, &WriteOptions::default()).is_err());
    assert!(unparse(&json!([1, 2]), &WriteOptions::default()).is_err());
}
