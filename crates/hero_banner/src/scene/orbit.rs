use bevy::prelude::*;

const EPSILON: f32 = 0.001;

/// Yaw, pitch and radius of `translation` as seen from `focus`, in the
/// convention of the orbit controller (yaw around +Y, pitch up from the XZ plane).
pub fn orbit_angles(translation: Vec3, focus: Vec3) -> (f32, f32, f32) {
    let offset = translation - focus;
    let mut radius = offset.length();
    if radius < EPSILON {
        // zero radius breaks the controller
        radius = 0.05;
    }
    let yaw = offset.x.atan2(offset.z);
    let pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();
    (yaw, pitch, radius)
}

/// Controller smoothness that covers `damping` of the remaining distance per
/// frame at `reference_hz`. The controller lerps by `1 - smoothness^(7 * dt)`.
pub fn smoothness_for_damping(damping: f32, reference_hz: f32) -> f32 {
    let damping = damping.clamp(EPSILON, 1.0);
    (1.0 - damping).powf(reference_hz / 7.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position_is_straight_ahead() {
        let (yaw, pitch, radius) = orbit_angles(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        assert_eq!(yaw, 0.0);
        assert_eq!(pitch, 0.0);
        assert_eq!(radius, 5.0);
    }

    #[test]
    fn test_angles_of_offset_positions() {
        let (yaw, pitch, radius) = orbit_angles(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO);
        assert!((yaw - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(pitch, 0.0);
        assert_eq!(radius, 5.0);

        let (yaw, pitch, radius) = orbit_angles(Vec3::new(0.0, 3.0, 5.0), Vec3::new(0.0, -1.0, 2.0));
        assert_eq!(yaw, 0.0);
        assert!((pitch - 0.8f32.asin()).abs() < 1e-6);
        assert_eq!(radius, 5.0);
    }

    #[test]
    fn test_degenerate_radius_is_clamped() {
        let (_, _, radius) = orbit_angles(Vec3::ONE, Vec3::ONE);
        assert_eq!(radius, 0.05);
    }

    #[test]
    fn test_smoothness_reproduces_per_frame_damping() {
        let smoothness = smoothness_for_damping(0.05, 60.0);
        let dt = 1.0 / 60.0;
        let step = 1.0 - smoothness.powi(7).powf(dt);
        assert!((step - 0.05).abs() < 1e-4);
    }
}
