use crate::settings::{BannerSettings, LightingSettings, hex_color};
use bevy::prelude::*;

/// Ambient term, attached to the banner camera.
pub fn ambient_light(settings: &LightingSettings) -> AmbientLight {
    AmbientLight {
        color: hex_color(settings.ambient_color),
        brightness: settings.ambient_brightness,
        ..default()
    }
}

pub(super) fn spawn_lighting(mut commands: Commands, settings: Res<BannerSettings>) {
    let lighting = &settings.lighting;

    commands.spawn((
        PointLight {
            color: hex_color(lighting.point_color),
            intensity: lighting.point_intensity,
            range: lighting.point_range,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(lighting.point_position),
        Name::new("Accent Point Light"),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_light_uses_settings() {
        let mut app = App::new();
        app.insert_resource(BannerSettings::default())
            .add_systems(Startup, spawn_lighting);

        app.update();

        let mut lights = app.world_mut().query::<(&PointLight, &Transform)>();
        let (light, transform) = lights.single(app.world()).unwrap();
        assert_eq!(light.color, Color::srgb_u8(255, 0, 255));
        assert_eq!(light.range, 100.0);
        assert_eq!(transform.translation, Vec3::new(5.0, 5.0, 5.0));
    }
}
