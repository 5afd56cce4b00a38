//! User-editable banner configuration.
//!
//! Stored as RON next to the logs. The defaults reproduce the original
//! banner exactly, so a missing or broken file never changes the look.

use app::LOG_MAIN;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ron parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("ron serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

/// Complete banner configuration.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerSettings {
    pub window: WindowSettings,
    pub camera: CameraSettings,
    pub lighting: LightingSettings,
    pub particles: ParticleSettings,
    pub motion: MotionTuning,
    pub icons: IconSettings,
    pub navigation: NavigationSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    /// Clear to fully transparent instead of the dark backdrop.
    pub transparent_background: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Hero Banner".into(),
            transparent_background: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub start_position: Vec3,
    /// Hand the eased camera to the orbit controller for damping and look-at.
    pub orbit_controls: bool,
    /// Fraction of the remaining distance covered per frame by the controller
    pub damping_factor: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            start_position: Vec3::new(0.0, 0.0, 5.0),
            orbit_controls: true,
            damping_factor: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingSettings {
    pub ambient_color: u32,
    pub ambient_brightness: f32,
    pub point_color: u32,
    /// Luminous power in lumens
    pub point_intensity: f32,
    pub point_range: f32,
    pub point_position: Vec3,
}

impl Default for LightingSettings {
    fn default() -> Self {
        Self {
            ambient_color: 0xffffff,
            ambient_brightness: 400.0,
            point_color: 0xff00ff,
            point_intensity: 2_000_000.0,
            point_range: 100.0,
            point_position: Vec3::new(5.0, 5.0, 5.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    pub count: usize,
    /// Origins are drawn uniformly from `[-spread, spread)` on every axis.
    pub spread: f32,
    pub radius: f32,
    pub sectors: u32,
    pub stacks: u32,
    pub color: u32,
    /// Fixed seed for reproducible layouts; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            count: 300,
            spread: 5.0,
            radius: 0.05,
            sectors: 8,
            stacks: 8,
            color: 0x00fffa,
            seed: None,
        }
    }
}

/// Every constant the frame animator uses.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionTuning {
    pub particle_amplitude: f32,
    /// Multiplier on the phase index for the z oscillation
    pub particle_z_phase: f32,
    /// Added to both spin axes of every particle, once per frame
    pub particle_spin_per_frame: f32,
    pub orbit_radius: f32,
    pub icon_spin_per_frame: f32,
    /// Pointer offset (normalized) to camera target distance
    pub parallax_gain: f32,
    /// Fraction of the remaining distance the camera covers per frame
    pub parallax_easing: f32,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            particle_amplitude: 0.5,
            particle_z_phase: 1.1,
            particle_spin_per_frame: 0.01,
            orbit_radius: 2.0,
            icon_spin_per_frame: 0.02,
            parallax_gain: 2.0,
            parallax_easing: 0.05,
        }
    }
}

/// One orbiting icon: glTF asset plus the link it opens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconEntry {
    /// Relative to the asset folder
    pub asset: String,
    pub url: String,
}

impl IconEntry {
    pub fn new(asset: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconSettings {
    pub scale: f32,
    pub entries: Vec<IconEntry>,
}

impl Default for IconSettings {
    fn default() -> Self {
        Self {
            scale: 0.3,
            entries: vec![
                IconEntry::new(
                    "models/social-icons/github.glb",
                    "https://github.com/username",
                ),
                IconEntry::new(
                    "models/social-icons/linkedin.glb",
                    "https://linkedin.com/in/username",
                ),
                IconEntry::new(
                    "models/social-icons/twitter.glb",
                    "https://twitter.com/username",
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationSettings {
    /// Open the icon's link in the system browser on click.
    pub open_links: bool,
    /// Max distance between the click ray and an icon centre
    pub pick_radius: f32,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            open_links: true,
            pick_radius: 0.4,
        }
    }
}

impl BannerSettings {
    pub fn from_ron_str(text: &str) -> Result<Self, SettingsError> {
        Ok(ron::from_str(text)?)
    }

    pub fn to_ron_string(&self) -> Result<String, SettingsError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Reads the settings file. A missing file is created from the defaults
    /// so it can be edited afterwards.
    pub fn load_or_create(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            let defaults = Self::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, defaults.to_ron_string()?)?;
            info!(target: LOG_MAIN, "Wrote default settings to {:?}", path);
            return Ok(defaults);
        }

        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    /// Like [`Self::load_or_create`], but never fails: errors are logged and
    /// the defaults are used.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_or_create(path) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(
                    target: LOG_MAIN,
                    "Could not load settings from {:?}, using defaults: {}", path, err
                );
                Self::default()
            }
        }
    }
}

/// `0xRRGGBB` to an sRGB colour.
pub fn hex_color(rgb: u32) -> Color {
    Color::srgb_u8(
        ((rgb >> 16) & 0xff) as u8,
        ((rgb >> 8) & 0xff) as u8,
        (rgb & 0xff) as u8,
    )
}
