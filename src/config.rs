// SPDX-License-Identifier: GPL-3.0-only

use crate::constants::{camera, caption, encoding};
use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use cosmic::{Theme, theme};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application theme preference
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum AppTheme {
    /// Follow system theme (dark or light based on system setting)
    #[default]
    System,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

impl AppTheme {
    /// Get the COSMIC theme for this app theme preference
    pub fn theme(&self) -> Theme {
        match self {
            Self::Dark => {
                let mut theme = theme::system_dark();
                theme.theme_type.prefer_dark(Some(true));
                theme
            }
            Self::Light => {
                let mut theme = theme::system_light();
                theme.theme_type.prefer_dark(Some(false));
                theme
            }
            Self::System => theme::system_preference(),
        }
    }
}

#[derive(Debug, Clone, CosmicConfigEntry, Eq, PartialEq, Serialize, Deserialize)]
#[version = 1]
pub struct Config {
    /// Application theme preference (System, Dark, Light)
    pub app_theme: AppTheme,
    /// Mirror camera preview horizontally (selfie mode)
    pub mirror_preview: bool,
    /// Last used camera device path
    pub last_camera_path: Option<String>,
    /// Requested capture width
    pub preferred_width: u32,
    /// Requested capture height
    pub preferred_height: u32,
    /// JPEG quality of snapshots (1-100)
    pub jpeg_quality: u8,
    /// Gemini model used for captions
    pub caption_model: String,
    /// Base URL of the Gemini REST API
    pub caption_endpoint: String,
    /// Caption request timeout in seconds
    pub caption_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_theme: AppTheme::default(),
            mirror_preview: true,
            last_camera_path: None,
            preferred_width: camera::PREFERRED_WIDTH,
            preferred_height: camera::PREFERRED_HEIGHT,
            jpeg_quality: encoding::JPEG_QUALITY,
            caption_model: caption::DEFAULT_MODEL.to_string(),
            caption_endpoint: caption::DEFAULT_ENDPOINT.to_string(),
            caption_timeout_secs: caption::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load the stored configuration for `app_id`
    ///
    /// Falls back to defaults (and no handler) when the config store is
    /// unavailable; entries that fail to parse keep their default value.
    pub fn load(app_id: &str) -> (Option<cosmic_config::Config>, Self) {
        match cosmic_config::Config::new(app_id, Self::VERSION) {
            Ok(handler) => {
                let config = match Self::get_entry(&handler) {
                    Ok(config) => config,
                    Err((errors, config)) => {
                        tracing::error!(?errors, "Errors loading config");
                        config
                    }
                };
                (Some(handler), config)
            }
            Err(err) => {
                tracing::error!(%err, "Failed to create config handler");
                (None, Self::default())
            }
        }
    }

    /// JPEG quality clamped to the range the encoder accepts
    pub fn effective_jpeg_quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100)
    }

    /// Caption request timeout, never shorter than one second
    pub fn caption_timeout(&self) -> Duration {
        Duration::from_secs(self.caption_timeout_secs.max(1))
    }

    /// Requested capture resolution, falling back to the default for zero values
    pub fn capture_resolution(&self) -> (u32, u32) {
        if self.preferred_width == 0 || self.preferred_height == 0 {
            (camera::PREFERRED_WIDTH, camera::PREFERRED_HEIGHT)
        } else {
            (self.preferred_width, self.preferred_height)
        }
    }
}
