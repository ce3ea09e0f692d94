use super::*;

fn scalar_node() -> Node {
    json!({
        "name": "Scale",
        "parameterid": "scale",
        "value": "100",
        "valuemin": "0",
        "valuemax": "1000.5"
    })
}

fn point_node() -> Node {
    json!({
        "name": "Center",
        "parameterid": "center",
        "value": {"horiz": "0.25", "vert": "-0.5"}
    })
}

#[test]
fn scalar_parameter_keeps_bounds() {
    let p = FilterParameter::parse(&scalar_node()).unwrap();
    assert_eq!(
        p.value,
        FilterValue::Scalar {
            value: Number::Int(100),
            min: Number::Int(0),
            max: Number::Real(1000.5),
        }
    );
    let dumped = p.dump();
    assert_eq!(dumped, scalar_node());
    assert_eq!(FilterParameter::parse(&dumped).unwrap(), p);
}

#[test]
fn point_parameter_never_gains_bounds() {
    let p = FilterParameter::parse(&point_node()).unwrap();
    assert!(matches!(p.value, FilterValue::Point { .. }));

    let dumped = p.dump();
    assert!(dumped.get("valuemin").is_none());
    assert!(dumped.get("valuemax").is_none());
    assert_eq!(dumped, point_node());
    assert_eq!(FilterParameter::parse(&dumped).unwrap(), p);
}

#[test]
fn scalar_without_bounds_is_rejected() {
    let node = json!({"name": "Scale", "parameterid": "scale", "value": "1"});
    assert!(matches!(
        FilterParameter::parse(&node),
        Err(JcutError::Schema { .. })
    ));
}

#[test]
fn empty_value_is_a_shape_error() {
    let node = json!({"name": "Scale", "parameterid": "scale", "value": null});
    assert!(matches!(
        FilterParameter::parse(&node),
        Err(JcutError::Schema { .. })
    ));
}

#[test]
fn filter_normalizes_single_parameter_to_list() {
    let node = json!({
        "enabled": "TRUE",
        "start": "-1",
        "end": "-1",
        "effect": {
            "name": "Basic Motion",
            "effectid": "basic",
            "effecttype": "motion",
            "mediatype": "video",
            "effectcategory": "motion",
            "parameter": scalar_node()
        }
    });

    let f = Filter::parse(&node).unwrap();
    assert!(f.enabled);
    assert_eq!(f.start, -1);
    assert_eq!(f.parameters.len(), 1);

    let dumped = f.dump();
    assert!(dumped["effect"]["parameter"].is_array());
    assert_eq!(Filter::parse(&dumped).unwrap(), f);
}

#[test]
fn filter_with_mixed_parameters_round_trips() {
    let node = json!({
        "enabled": "FALSE",
        "start": "0",
        "end": "120",
        "effect": {
            "name": "Basic Motion",
            "effectid": "basic",
            "effecttype": "motion",
            "mediatype": "video",
            "effectcategory": "motion",
            "parameter": [scalar_node(), point_node()]
        }
    });
    let f = Filter::parse(&node).unwrap();
    assert_eq!(f.dump(), node);
}
