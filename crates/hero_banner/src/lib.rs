//! Animated 3D hero banner.
//!
//! A field of oscillating particles, social icons orbiting on a ring and a
//! camera that drifts toward the pointer. Startup builds the scene once;
//! every frame the animator recomputes transforms from the current time and
//! pointer snapshot and Bevy renders the result.
//!
//! # Example
//! ```no_run
//! use bevy::prelude::*;
//! use hero_banner::{HeroBannerPlugin, settings::BannerSettings};
//!
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(HeroBannerPlugin::new(BannerSettings::default()))
//!     .run();
//! ```

pub mod animation;
pub mod components;
pub mod icons;
pub mod input;
pub mod navigation;
pub mod scene;
pub mod settings;
pub mod viewport;

use animation::FrameAnimatorPlugin;
use bevy::prelude::*;
use icons::IconRingPlugin;
use input::InputPlugin;
use navigation::NavigationPlugin;
use scene::{OrbitControllerPlugin, ScenePlugin};
use settings::BannerSettings;
use viewport::ViewportPlugin;

/// Per-frame pipeline, chained in `Update`.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum BannerSet {
    /// Pointer, viewport and asset readiness.
    Input,
    /// Particle, icon and camera formulas.
    Animate,
    /// Push results to the camera controller, react to clicks.
    Present,
}

/// Everything the banner needs on top of Bevy's `DefaultPlugins`.
pub struct HeroBannerPlugin {
    pub settings: BannerSettings,
}

impl HeroBannerPlugin {
    pub fn new(settings: BannerSettings) -> Self {
        Self { settings }
    }
}

impl Plugin for HeroBannerPlugin {
    fn build(&self, app: &mut App) {
        let settings = self.settings.clone();
        let clear_color = if settings.window.transparent_background {
            Color::NONE
        } else {
            Color::srgb(0.02, 0.02, 0.05)
        };

        app.insert_resource(ClearColor(clear_color))
            .insert_resource(settings.motion.clone())
            .insert_resource(settings.clone())
            .add_plugins((
                InputPlugin,
                ViewportPlugin,
                ScenePlugin,
                IconRingPlugin,
                FrameAnimatorPlugin,
                NavigationPlugin,
            ));

        if settings.camera.orbit_controls {
            app.add_plugins(OrbitControllerPlugin);
        }
    }
}
