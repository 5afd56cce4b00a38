use super::lighting::ambient_light;
use super::orbit::{orbit_angles, smoothness_for_damping};
use crate::BannerSet;
use crate::components::{BannerCamera, CameraRig};
use crate::settings::BannerSettings;
use app::LOG_SCENE;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};

/// Frame rate the damping factor is specified against
const DAMPING_REFERENCE_HZ: f32 = 60.0;

/// Spawns the banner camera and keeps its render transform in sync with the
/// eased [`CameraRig`].
pub struct BannerCameraPlugin;

impl Plugin for BannerCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera).add_systems(
            Update,
            (
                follow_controller.in_set(BannerSet::Input),
                apply_camera_rig.in_set(BannerSet::Present),
            ),
        );
    }
}

/// Adds the orbit controller: damped drag-rotate and look-at. Pan and zoom stay off.
pub struct OrbitControllerPlugin;

impl Plugin for OrbitControllerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PanOrbitCameraPlugin);
    }
}

pub fn perspective(settings: &BannerSettings, aspect_ratio: f32) -> Projection {
    Projection::Perspective(PerspectiveProjection {
        fov: settings.camera.fov_degrees.to_radians(),
        aspect_ratio,
        near: settings.camera.near,
        far: settings.camera.far,
        ..default()
    })
}

fn spawn_camera(
    mut commands: Commands,
    settings: Res<BannerSettings>,
    window: Query<&Window, With<PrimaryWindow>>,
) {
    let aspect_ratio = window
        .single()
        .ok()
        .filter(|window| window.height() > 0.0)
        .map(|window| window.width() / window.height())
        .unwrap_or(1.0);
    let start = settings.camera.start_position;

    let mut camera = commands.spawn((
        Camera3d::default(),
        perspective(&settings, aspect_ratio),
        Transform::from_translation(start),
        ambient_light(&settings.lighting),
        CameraRig::new(start),
        BannerCamera,
        Name::new("Banner Camera"),
    ));

    if settings.camera.orbit_controls {
        let (yaw, pitch, radius) = orbit_angles(start, Vec3::ZERO);
        camera.insert(PanOrbitCamera {
            focus: Vec3::ZERO,
            yaw: Some(yaw),
            pitch: Some(pitch),
            radius: Some(radius),
            target_yaw: yaw,
            target_pitch: pitch,
            target_radius: radius,
            orbit_smoothness: smoothness_for_damping(
                settings.camera.damping_factor,
                DAMPING_REFERENCE_HZ,
            ),
            pan_sensitivity: 0.0,
            zoom_sensitivity: 0.0,
            ..default()
        });
    }

    info!(
        target: LOG_SCENE,
        "Spawned camera at {:?} (aspect {:.3}, orbit controls: {})",
        start, aspect_ratio, settings.camera.orbit_controls
    );
}

/// Picks up where the controller left the camera, so a drag carries into the
/// next easing step.
fn follow_controller(
    mut cameras: Query<(&mut CameraRig, &Transform), (With<BannerCamera>, With<PanOrbitCamera>)>,
) {
    for (mut rig, transform) in &mut cameras {
        rig.position = transform.translation;
    }
}

/// Writes the eased position into the transform. With a controller attached
/// its current orbit is moved along, and the gap to its target (an unfinished
/// drag) is shifted by the same amount so only the drag gets damped.
fn apply_camera_rig(
    mut cameras: Query<
        (&CameraRig, &mut Transform, Option<&mut PanOrbitCamera>),
        With<BannerCamera>,
    >,
) {
    for (rig, mut transform, controller) in &mut cameras {
        transform.translation = rig.position;
        let Some(mut controller) = controller else {
            continue;
        };

        let focus = controller.focus;
        let (yaw, pitch, radius) = orbit_angles(rig.position, focus);
        let (current_yaw, current_pitch, current_radius) =
            match (controller.yaw, controller.pitch, controller.radius) {
                (Some(y), Some(p), Some(r)) => (y, p, r),
                _ => (yaw, pitch, radius),
            };

        controller.target_yaw += yaw - current_yaw;
        controller.target_pitch += pitch - current_pitch;
        controller.target_radius += radius - current_radius;
        controller.yaw = Some(yaw);
        controller.pitch = Some(pitch);
        controller.radius = Some(radius);
        transform.look_at(focus, Vec3::Y);
    }
}
