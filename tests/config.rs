use std::fs;
use std::path::PathBuf;

use tessera::config::EngineConfig;
use tessera::ConfigError;

#[test]
fn default_is_60_ups_unbounded() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.updates_per_second, 60);
    assert_eq!(cfg.max_frames, None);
    assert!(!cfg.realtime);
    assert!(cfg.startup_scene.is_none());
    assert!(cfg.scene_list().is_empty());
}

#[test]
fn fixed_dt_30_ups() {
    let cfg = EngineConfig { updates_per_second: 30, ..EngineConfig::default() };
    let dt = cfg.fixed_dt();
    assert!((dt - 1.0 / 30.0).abs() < 1e-6, "expected 1/30, got {dt}");
}

#[test]
fn from_file_reads_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engine.json");
    fs::write(
        &path,
        r#"{ "updates_per_second": 120, "startup_scene": "data/start.json", "scenes": ["a.json"] }"#,
    )
    .unwrap();

    let cfg = EngineConfig::from_file(&path).unwrap();
    assert_eq!(cfg.updates_per_second, 120);
    assert_eq!(cfg.startup_scene, Some(PathBuf::from("data/start.json")));
    assert_eq!(cfg.scenes, vec![PathBuf::from("a.json")]);
    assert_eq!(cfg.max_frames, None);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = EngineConfig::from_file(dir.path().join("none.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engine.json");
    fs::write(&path, r#"{ "updates_per_second": "fast" }"#).unwrap();
    let err = EngineConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("engine.json"));
}

#[test]
fn scene_dir_is_scanned_recursively_and_sorted() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    for name in ["b.json", "a.json", "nested/c.json", "notes.txt"] {
        fs::write(dir.path().join(name), "{}").unwrap();
    }

    let cfg = EngineConfig {
        scenes: vec![PathBuf::from("first.json")],
        scene_dir: Some(dir.path().to_path_buf()),
        ..EngineConfig::default()
    };
    let scenes = cfg.scene_list();
    assert_eq!(
        scenes,
        vec![
            PathBuf::from("first.json"),
            dir.path().join("a.json"),
            dir.path().join("b.json"),
            dir.path().join("nested/c.json"),
        ]
    );
}
