//! Wheel configuration and app preferences
//!
//! Both travel with the persisted state; the UI edits them with partial
//! updates and hands the whole struct back.

use serde::{Deserialize, Serialize};

/// Color scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "system" | "auto" => Some(Theme::System),
            _ => None,
        }
    }
}

/// Appearance and spin behavior of one wheel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WheelConfig {
    /// Spin animation length in seconds
    #[serde(rename = "spinDuration")]
    pub spin_duration_secs: f32,
    /// Full turns before the wheel settles
    #[serde(rename = "rotations")]
    pub rotation_count: u32,
    /// Pointer position, degrees clockwise from the top
    pub pointer_angle: f32,
    pub border_width: f32,
    pub border_color: String,
    /// Label color unless a segment overrides it
    pub text_color: String,
    pub font_size: f32,
    pub show_labels: bool,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            spin_duration_secs: 3.0,
            rotation_count: 5,
            pointer_angle: 0.0,
            border_width: 2.0,
            border_color: "#1f2937".to_string(),
            text_color: "#ffffff".to_string(),
            font_size: 16.0,
            show_labels: false,
        }
    }
}

impl WheelConfig {
    /// Longest spin allowed while reduced motion is on
    pub const REDUCED_MOTION_MAX_SECS: f32 = 1.0;

    /// Spin duration after accessibility preferences
    pub fn effective_spin_duration(&self, settings: &AppSettings) -> f32 {
        if settings.reduced_motion {
            self.spin_duration_secs.min(Self::REDUCED_MOTION_MAX_SECS)
        } else {
            self.spin_duration_secs
        }
    }

    /// Full turns after accessibility preferences
    pub fn effective_rotation_count(&self, settings: &AppSettings) -> u32 {
        if settings.reduced_motion {
            self.rotation_count.min(1)
        } else {
            self.rotation_count
        }
    }
}

/// App-wide preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    // === Audio ===
    pub sound_enabled: bool,
    /// Volume (0.0 - 1.0)
    pub volume: f32,

    // === Appearance ===
    pub theme: Theme,

    // === Accessibility ===
    /// Reduced motion (short spins, no confetti)
    pub reduced_motion: bool,

    // === Spin outcome ===
    pub show_confetti: bool,
    /// Remove the winning segment once a spin settles
    pub auto_remove_winner: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            volume: 0.7,
            theme: Theme::System,
            reduced_motion: false,
            show_confetti: true,
            auto_remove_winner: false,
        }
    }
}

impl AppSettings {
    /// Confetti on a win (respects reduced_motion)
    pub fn effective_confetti(&self) -> bool {
        self.show_confetti && !self.reduced_motion
    }

    /// Effective volume (0 when sound is off)
    pub fn effective_volume(&self) -> f32 {
        if self.sound_enabled {
            self.volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_caps_spin() {
        let config = WheelConfig::default();
        let mut settings = AppSettings::default();
        assert_eq!(config.effective_spin_duration(&settings), 3.0);
        assert_eq!(config.effective_rotation_count(&settings), 5);
        assert!(settings.effective_confetti());

        settings.reduced_motion = true;
        assert_eq!(config.effective_spin_duration(&settings), 1.0);
        assert_eq!(config.effective_rotation_count(&settings), 1);
        assert!(!settings.effective_confetti());
    }

    #[test]
    fn test_effective_volume() {
        let mut settings = AppSettings::default();
        assert_eq!(settings.effective_volume(), 0.7);
        settings.sound_enabled = false;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_config_accepts_partial_json() {
        let config: WheelConfig =
            serde_json::from_str(r#"{"spinDuration": 6, "rotations": 8, "showLabels": true}"#)
                .unwrap();
        assert_eq!(config.spin_duration_secs, 6.0);
        assert_eq!(config.rotation_count, 8);
        assert!(config.show_labels);
        assert_eq!(config.border_color, "#1f2937");
    }

    #[test]
    fn test_theme_round_trip() {
        let settings: AppSettings = serde_json::from_str(r#"{"theme": "dark"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert!(settings.sound_enabled);
        assert_eq!(Theme::from_str("AUTO"), Some(Theme::System));
        assert_eq!(Theme::Light.as_str(), "light");
    }
}
