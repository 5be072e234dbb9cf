//! Preset file loading tests.

use std::io::Write;
use std::time::Duration;

use flashbar::{BarPreset, FlashbarBuilder, Gravity};
use tempfile::NamedTempFile;

#[test]
fn test_load_preset_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "title": "Deployed",
            "message": "v1.2.3 is live",
            "gravity": "bottom",
            "duration_ms": 2500,
            "background": "green",
            "swipe_to_dismiss": true
        }}"#
    )
    .unwrap();

    let preset = BarPreset::load(file.path()).unwrap();
    assert_eq!(preset.title.as_deref(), Some("Deployed"));
    assert_eq!(preset.gravity, Some(Gravity::Bottom));

    let config = preset
        .apply(FlashbarBuilder::new())
        .unwrap()
        .build_config()
        .unwrap();
    assert_eq!(config.duration, Some(Duration::from_millis(2500)));
    assert!(config.swipe_to_dismiss);
    assert_eq!(config.message.as_ref().unwrap().content, "v1.2.3 is live");
}

#[test]
fn test_load_rejects_invalid_json() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "not json at all").unwrap();

    let err = BarPreset::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("parsing preset"));
}

#[test]
fn test_load_missing_file_errors() {
    let err = BarPreset::load(std::path::Path::new("/nonexistent/preset.json")).unwrap_err();
    assert!(err.to_string().contains("reading preset"));
}
