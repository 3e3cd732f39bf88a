//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Layers: defaults → global file → explicit `--config` file → `BSTVIZ_*` env.
//!
//! Note: These tests pass the global path explicitly (temp directories only),
//! so the user's real config never leaks in.

use std::fs;
use std::time::Duration;

use tempfile::TempDir;

use bstviz::config::{expand_path, Settings};
use bstviz::util::testing;

// ============================================================
// File layers
// ============================================================

#[test]
fn given_global_config_when_loading_then_overrides_defaults() {
    testing::init_test_setup();
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("bstviz.toml");
    fs::write(&global, "[canvas]\nwidth = 1200.0\n").unwrap();

    let settings = Settings::load_from(Some(global.as_path()), None).expect("load settings");

    assert_eq!(settings.canvas.width, 1200.0);
    assert_eq!(settings.animation.search_step_ms, 500, "untouched keys keep defaults");
}

#[test]
fn given_explicit_config_when_loading_then_overrides_global() {
    testing::init_test_setup();
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("global.toml");
    let explicit = dir.path().join("explicit.toml");
    fs::write(&global, "[animation]\nspeed = 2.0\nenabled = false\n").unwrap();
    fs::write(&explicit, "[animation]\nspeed = 4.0\n").unwrap();

    let settings = Settings::load_from(Some(global.as_path()), Some(explicit.as_path()))
        .expect("load settings");

    assert_eq!(settings.animation.speed, 4.0);
    assert!(!settings.animation.enabled, "global value survives when not overridden");
    assert_eq!(settings.animation.timing().search_step, Duration::from_millis(125));
}

#[test]
fn given_missing_global_config_when_loading_then_defaults() {
    testing::init_test_setup();
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("absent.toml");

    let settings = Settings::load_from(Some(global.as_path()), None).expect("load settings");

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_missing_explicit_config_when_loading_then_error() {
    testing::init_test_setup();
    let dir = TempDir::new().unwrap();
    let explicit = dir.path().join("absent.toml");

    let err = Settings::load_from(None, Some(explicit.as_path())).unwrap_err();

    assert!(err.to_string().contains("config file not found"), "{err}");
}

// ============================================================
// Validation
// ============================================================

#[test]
fn given_negative_speed_when_loading_then_error() {
    testing::init_test_setup();
    let dir = TempDir::new().unwrap();
    let explicit = dir.path().join("bad.toml");
    fs::write(&explicit, "[animation]\nspeed = -1.0\n").unwrap();

    let err = Settings::load_from(None, Some(explicit.as_path())).unwrap_err();

    assert!(err.to_string().contains("animation.speed"), "{err}");
}

#[test]
fn given_malformed_toml_when_loading_then_error() {
    testing::init_test_setup();
    let dir = TempDir::new().unwrap();
    let explicit = dir.path().join("broken.toml");
    fs::write(&explicit, "[canvas\nwidth = ").unwrap();

    assert!(Settings::load_from(None, Some(explicit.as_path())).is_err());
}

#[test]
fn given_settings_when_round_tripping_toml_then_equal() {
    testing::init_test_setup();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dump.toml");
    let mut settings = Settings::default();
    settings.canvas.width = 640.0;
    fs::write(&path, settings.to_toml().unwrap()).unwrap();

    let loaded = Settings::load_from(None, Some(path.as_path())).expect("load dumped settings");

    assert_eq!(loaded, settings);
}

// ============================================================
// Paths
// ============================================================

#[test]
fn given_plain_path_when_expanding_then_unchanged() {
    testing::init_test_setup();
    let path = std::path::Path::new("queries/demo.pl");
    assert_eq!(expand_path(path).as_path(), path);
}
