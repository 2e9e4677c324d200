//! Player settings and preferences
//!
//! Stored inside the progress record. Every field has a serde default so older
//! saves keep loading as fields are added.

use serde::{Deserialize, Serialize};

use crate::catalog::{DEFAULT_BOAT, DEFAULT_THEME};

/// Player settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub volume: f32,
    /// Equipped boat id
    pub selected_boat: String,
    /// Equipped theme id
    pub selected_theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: 0.5,
            selected_boat: DEFAULT_BOAT.to_string(),
            selected_theme: DEFAULT_THEME.to_string(),
        }
    }
}

/// Partial settings update; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    pub volume: Option<f32>,
    pub selected_boat: Option<String>,
    pub selected_theme: Option<String>,
}

impl Settings {
    /// Set volume, clamped to 0..=1 (NaN mutes)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_clamps() {
        let mut settings = Settings::default();
        settings.set_volume(1.7);
        assert_eq!(settings.volume, 1.0);
        settings.set_volume(-0.2);
        assert_eq!(settings.volume, 0.0);
        settings.set_volume(f32::NAN);
        assert_eq!(settings.volume, 0.0);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "volume": 0.2 }"#).unwrap();
        assert_eq!(settings.volume, 0.2);
        assert_eq!(settings.selected_boat, DEFAULT_BOAT);
        assert_eq!(settings.selected_theme, DEFAULT_THEME);
    }
}
