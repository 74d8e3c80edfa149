// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use photobooth::Config;
use photobooth::config::AppTheme;
use std::time::Duration;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert!(config.mirror_preview, "Mirror preview should be enabled by default");
    assert_eq!(config.app_theme, AppTheme::System);
    assert!(config.last_camera_path.is_none());
    assert_eq!(config.capture_resolution(), (1280, 720));
    assert_eq!(config.caption_model, "gemini-2.5-flash");
    assert_eq!(config.caption_timeout(), Duration::from_secs(30));
}

#[test]
fn test_zero_resolution_falls_back() {
    let config = Config {
        preferred_width: 0,
        ..Config::default()
    };
    assert_eq!(config.capture_resolution(), (1280, 720));
}

#[test]
fn test_jpeg_quality_is_clamped() {
    let config = Config {
        jpeg_quality: 0,
        ..Config::default()
    };
    assert_eq!(config.effective_jpeg_quality(), 1);

    let config = Config {
        jpeg_quality: 250,
        ..Config::default()
    };
    assert_eq!(config.effective_jpeg_quality(), 100);
}

#[test]
fn test_caption_timeout_never_zero() {
    let config = Config {
        caption_timeout_secs: 0,
        ..Config::default()
    };
    assert_eq!(config.caption_timeout(), Duration::from_secs(1));
}
