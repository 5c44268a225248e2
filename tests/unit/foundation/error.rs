use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScrollweaveError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ScrollweaveError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        ScrollweaveError::trigger("x")
            .to_string()
            .contains("trigger error:")
    );
    assert!(
        ScrollweaveError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(
        ScrollweaveError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScrollweaveError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: ScrollweaveError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, ScrollweaveError::Serde(_)));
}
