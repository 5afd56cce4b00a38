//! Per-frame animation of particles, icon ring and camera parallax.
//!
//! The formulas are plain functions of `(state, FrameInput)`; the systems only
//! move their results into transforms.

use crate::BannerSet;
use crate::components::{CameraRig, Particle, SocialIcon, Spin};
use crate::icons::IconRing;
use crate::input::FrameInput;
use crate::settings::MotionTuning;
use bevy::prelude::*;
use std::f32::consts::TAU;

/// Runs every frame: particles, loaded icons, camera easing.
pub struct FrameAnimatorPlugin;

impl Plugin for FrameAnimatorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MotionTuning>()
            .init_resource::<FrameInput>()
            .init_resource::<IconRing>()
            .configure_sets(
                Update,
                (BannerSet::Input, BannerSet::Animate, BannerSet::Present).chain(),
            )
            .add_systems(
                Update,
                (animate_particles, animate_icons, ease_camera).in_set(BannerSet::Animate),
            );
    }
}

/// Oscillation offset of particle `phase` at time `t`.
pub fn particle_offset(phase: u32, t: f32, tuning: &MotionTuning) -> Vec3 {
    let i = phase as f32;
    Vec3::new(
        (t + i).sin(),
        (t + i).cos(),
        (t + i * tuning.particle_z_phase).sin(),
    ) * tuning.particle_amplitude
}

/// Position on the icon ring for the icon ranked `rank` among `loaded` icons.
/// Returns `None` when nothing is loaded.
pub fn orbit_position(rank: usize, loaded: usize, t: f32, tuning: &MotionTuning) -> Option<Vec3> {
    if loaded == 0 {
        return None;
    }
    let angle = rank as f32 / loaded as f32 * TAU + t;
    Some(Vec3::new(
        angle.cos() * tuning.orbit_radius,
        angle.sin() * tuning.orbit_radius,
        0.0,
    ))
}

/// One easing step toward the pointer-derived target. Z is left alone.
pub fn eased_camera_position(current: Vec3, pointer: Vec2, tuning: &MotionTuning) -> Vec3 {
    let target_x = pointer.x * tuning.parallax_gain;
    // screen y grows downwards, world y upwards
    let target_y = -pointer.y * tuning.parallax_gain;
    Vec3::new(
        current.x + (target_x - current.x) * tuning.parallax_easing,
        current.y + (target_y - current.y) * tuning.parallax_easing,
        current.z,
    )
}

fn animate_particles(
    input: Res<FrameInput>,
    tuning: Res<MotionTuning>,
    mut particles: Query<(&Particle, &mut Spin, &mut Transform)>,
) {
    let spin = tuning.particle_spin_per_frame;
    for (particle, mut particle_spin, mut transform) in &mut particles {
        transform.translation =
            particle.origin + particle_offset(particle.phase, input.time_secs, &tuning);
        particle_spin.advance(spin, spin);
        transform.rotation = particle_spin.rotation();
    }
}

fn animate_icons(
    input: Res<FrameInput>,
    tuning: Res<MotionTuning>,
    ring: Res<IconRing>,
    mut icons: Query<(&mut Transform, &mut Spin), With<SocialIcon>>,
) {
    let loaded = ring.loaded_count();
    for (rank, entity) in ring.loaded().enumerate() {
        let Some(position) = orbit_position(rank, loaded, input.time_secs, &tuning) else {
            continue;
        };
        let Ok((mut transform, mut spin)) = icons.get_mut(entity) else {
            continue;
        };
        transform.translation = position;
        spin.advance(0.0, tuning.icon_spin_per_frame);
        transform.rotation = spin.rotation();
    }
}

fn ease_camera(input: Res<FrameInput>, tuning: Res<MotionTuning>, mut rigs: Query<&mut CameraRig>) {
    for mut rig in &mut rigs {
        rig.position = eased_camera_position(rig.position, input.pointer, &tuning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::IconLoad;
    use crate::settings::IconEntry;

    const EPSILON: f32 = 1e-5;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(FrameAnimatorPlugin);
        app
    }

    fn set_time(app: &mut App, t: f32) {
        app.world_mut().resource_mut::<FrameInput>().time_secs = t;
    }

    fn ring_with(app: &mut App, slots: usize) {
        let entries: Vec<_> = (0..slots)
            .map(|i| IconEntry::new(format!("icon{i}.glb"), format!("https://example.com/{i}")))
            .collect();
        app.insert_resource(IconRing::from_entries(&entries));
    }

    fn spawn_loaded_icon(app: &mut App, slot: usize) -> Entity {
        let entity = app
            .world_mut()
            .spawn((SocialIcon { slot }, Spin::default(), Transform::default()))
            .id();
        assert!(app.world_mut().resource_mut::<IconRing>().mark_ready(slot, entity));
        entity
    }

    #[test]
    fn test_particle_position_is_origin_plus_exact_offset() {
        let mut app = test_app();
        let origin = Vec3::new(1.0, -2.0, 3.0);
        let entity = app
            .world_mut()
            .spawn((
                Particle { origin, phase: 7 },
                Spin::default(),
                Transform::from_translation(origin),
            ))
            .id();
        set_time(&mut app, 2.5);

        app.update();

        let translation = app.world().get::<Transform>(entity).unwrap().translation;
        let expected = Vec3::new(
            origin.x + (2.5f32 + 7.0).sin() * 0.5,
            origin.y + (2.5f32 + 7.0).cos() * 0.5,
            origin.z + (2.5f32 + 7.0 * 1.1).sin() * 0.5,
        );
        assert!(translation.abs_diff_eq(expected, EPSILON));
    }

    #[test]
    fn test_particle_spin_is_additive_per_frame() {
        let mut app = test_app();
        let entity = app
            .world_mut()
            .spawn((
                Particle {
                    origin: Vec3::ZERO,
                    phase: 0,
                },
                Spin::default(),
                Transform::default(),
            ))
            .id();

        for frame in 0..50 {
            // spin must not depend on elapsed time
            set_time(&mut app, frame as f32 * 3.7);
            app.update();
        }

        let spin = app.world().get::<Spin>(entity).unwrap();
        assert!((spin.x - 0.5).abs() < 1e-4);
        assert!((spin.y - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_ring_spacing_follows_loaded_count() {
        for loaded in 1..=3 {
            let mut app = test_app();
            ring_with(&mut app, 3);
            let icons: Vec<_> = (0..loaded).map(|slot| spawn_loaded_icon(&mut app, slot)).collect();
            set_time(&mut app, 0.75);

            app.update();

            let step = TAU / loaded as f32;
            for (rank, entity) in icons.iter().enumerate() {
                let translation = app.world().get::<Transform>(*entity).unwrap().translation;
                let expected_angle = rank as f32 * step + 0.75;
                let expected = Vec3::new(expected_angle.cos() * 2.0, expected_angle.sin() * 2.0, 0.0);
                assert!(
                    translation.abs_diff_eq(expected, EPSILON),
                    "rank {rank} of {loaded}: {translation:?} != {expected:?}"
                );
            }
        }
    }

    #[test]
    fn test_ring_rank_skips_unloaded_slots() {
        let mut app = test_app();
        ring_with(&mut app, 3);
        let last = spawn_loaded_icon(&mut app, 2);
        set_time(&mut app, 0.0);

        app.update();

        // the only loaded icon takes rank 0, angle t
        let translation = app.world().get::<Transform>(last).unwrap().translation;
        assert!(translation.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), EPSILON));
    }

    #[test]
    fn test_empty_ring_leaves_icons_untouched() {
        let mut app = test_app();
        ring_with(&mut app, 3);
        let stray = app
            .world_mut()
            .spawn((
                SocialIcon { slot: 0 },
                Spin::default(),
                Transform::from_xyz(9.0, 9.0, 9.0),
            ))
            .id();

        app.update();

        assert_eq!(orbit_position(0, 0, 1.0, &MotionTuning::default()), None);
        assert_eq!(
            app.world().get::<Transform>(stray).unwrap().translation,
            Vec3::splat(9.0)
        );
        assert_eq!(*app.world().get::<Spin>(stray).unwrap(), Spin::default());
        assert!(matches!(
            app.world().resource::<IconRing>().slots()[0].state,
            IconLoad::Pending
        ));
    }

    #[test]
    fn test_icon_spin_accumulates() {
        let mut app = test_app();
        ring_with(&mut app, 1);
        let icon = spawn_loaded_icon(&mut app, 0);

        for _ in 0..10 {
            app.update();
        }

        let spin = app.world().get::<Spin>(icon).unwrap();
        assert_eq!(spin.x, 0.0);
        assert!((spin.y - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_camera_first_frame_eases_toward_pointer() {
        let mut app = test_app();
        let camera = app
            .world_mut()
            .spawn(CameraRig::new(Vec3::new(0.0, 0.0, 5.0)))
            .id();
        app.world_mut().resource_mut::<FrameInput>().pointer = Vec2::new(1.0, 0.0);

        app.update();

        let rig = app.world().get::<CameraRig>(camera).unwrap();
        assert!((rig.position.x - 0.1).abs() < 1e-6);
        assert_eq!(rig.position.y, 0.0);
        assert_eq!(rig.position.z, 5.0);
    }

    #[test]
    fn test_camera_converges_without_overshoot() {
        let tuning = MotionTuning::default();
        let pointer = Vec2::new(-0.5, 0.5);
        let target = Vec2::new(-1.0, -1.0);
        let mut position = Vec3::new(0.0, 0.0, 5.0);

        for _ in 0..500 {
            let next = eased_camera_position(position, pointer, &tuning);
            // every step lands between the previous position and the target
            assert!(next.x <= position.x && next.x >= target.x);
            assert!(next.y <= position.y && next.y >= target.y);
            position = next;
        }

        assert!((position.x - target.x).abs() < 1e-3);
        assert!((position.y - target.y).abs() < 1e-3);
        assert_eq!(position.z, 5.0);
    }
}
