//! Scene construction, run once at startup.

mod camera;
mod lighting;
mod orbit;
mod particles;

use bevy::prelude::*;

pub use camera::{BannerCameraPlugin, OrbitControllerPlugin, perspective};
pub use orbit::orbit_angles;
pub use particles::{ParticleField, ParticleRng, random_origin};

/// Camera, lights and the particle field.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ParticleRng>()
            .add_plugins(BannerCameraPlugin)
            .add_systems(
                Startup,
                (lighting::spawn_lighting, particles::spawn_particles),
            );
    }
}
