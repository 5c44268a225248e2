use super::*;

#[test]
fn neutral_values_match_css_defaults() {
    let s = VisualState::default();
    assert_eq!(s.get(Prop::Opacity), 1.0);
    assert_eq!(s.get(Prop::Scale), 1.0);
    assert_eq!(s.get(Prop::Y), 0.0);
    assert!(s.is_neutral());
}

#[test]
fn map_lerp_snaps_keys_missing_from_source() {
    let a = PropMap::from([(Prop::Opacity, 0.0)]);
    let b = PropMap::from([(Prop::Opacity, 1.0), (Prop::Y, 40.0)]);
    let mid = PropMap::lerp(&a, &b, 0.25);
    assert_eq!(mid[&Prop::Opacity], 0.25);
    assert_eq!(mid[&Prop::Y], 40.0);
}

#[test]
fn snapshot_reads_committed_or_neutral_values() {
    let mut s = VisualState::default();
    s.set(Prop::Y, 100.0);
    let snap = s.snapshot(&[Prop::Y, Prop::Opacity]);
    assert_eq!(snap[&Prop::Y], 100.0);
    assert_eq!(snap[&Prop::Opacity], 1.0);
    assert!(!s.is_neutral());
}

#[test]
fn prop_names_serialize_camel_case() {
    let json = serde_json::to_string(&PropMap::from([
        (Prop::RotationY, 35.0),
        (Prop::StrokeDashOffset, 300.0),
    ]))
    .unwrap();
    assert_eq!(json, r#"{"rotationY":35.0,"strokeDashoffset":300.0}"#);
}
