//! Headless run of the startup scene plus the frame animator, driven by a
//! synthetic clock.

use bevy::prelude::*;
use hero_banner::animation::FrameAnimatorPlugin;
use hero_banner::components::{BannerCamera, CameraRig, Particle, SocialIcon};
use hero_banner::icons::IconRing;
use hero_banner::input::FrameInput;
use hero_banner::scene::ScenePlugin;
use hero_banner::settings::BannerSettings;

fn headless_banner(settings: BannerSettings) -> App {
    let mut app = App::new();
    app.insert_resource(IconRing::from_entries(&settings.icons.entries))
        .insert_resource(settings.motion.clone())
        .insert_resource(settings)
        .init_resource::<Assets<Mesh>>()
        .init_resource::<Assets<StandardMaterial>>()
        .add_plugins((ScenePlugin, FrameAnimatorPlugin));
    app
}

fn particle_count(app: &mut App) -> usize {
    app.world_mut()
        .query::<&Particle>()
        .iter(app.world())
        .count()
}

#[test]
fn hundred_frames_without_icons() {
    let mut settings = BannerSettings::default();
    settings.particles.seed = Some(2024);
    settings.camera.orbit_controls = false;
    let mut app = headless_banner(settings);

    for t in 0..100 {
        app.world_mut().resource_mut::<FrameInput>().time_secs = t as f32;
        app.update();
    }

    assert_eq!(particle_count(&mut app), 300);
    let ring = app.world().resource::<IconRing>();
    assert_eq!(ring.capacity(), 3);
    assert_eq!(ring.loaded_count(), 0);
    let icons = app
        .world_mut()
        .query::<&SocialIcon>()
        .iter(app.world())
        .count();
    assert_eq!(icons, 0);
}

#[test]
fn particles_stay_near_their_origin() {
    let mut settings = BannerSettings::default();
    settings.particles.count = 50;
    settings.particles.seed = Some(7);
    settings.camera.orbit_controls = false;
    let mut app = headless_banner(settings);

    for t in 0..30 {
        app.world_mut().resource_mut::<FrameInput>().time_secs = t as f32 * 0.37;
        app.update();
    }

    let mut query = app.world_mut().query::<(&Particle, &Transform)>();
    for (particle, transform) in query.iter(app.world()) {
        let offset = transform.translation - particle.origin;
        // each axis moves by at most the amplitude
        assert!(offset.abs().max_element() <= 0.5 + 1e-5, "{offset:?}");
    }
}

#[test]
fn camera_drifts_toward_pointer_and_keeps_depth() {
    let mut settings = BannerSettings::default();
    settings.particles.count = 1;
    settings.camera.orbit_controls = false;
    let mut app = headless_banner(settings);
    app.update();

    app.world_mut().resource_mut::<FrameInput>().pointer = Vec2::new(0.5, 0.5);
    for _ in 0..200 {
        app.update();
    }

    let mut cameras = app
        .world_mut()
        .query_filtered::<(&CameraRig, &Transform), With<BannerCamera>>();
    let (rig, transform) = cameras.single(app.world()).unwrap();
    assert!((rig.position.x - 1.0).abs() < 1e-3);
    assert!((rig.position.y + 1.0).abs() < 1e-3);
    assert_eq!(rig.position.z, 5.0);
    assert_eq!(transform.translation, rig.position);
}
