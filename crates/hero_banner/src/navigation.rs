//! Click-to-open for the orbiting icons.
//!
//! A left click casts a ray through the cursor; the closest icon whose centre
//! lies within the pick radius of that ray is activated.

use crate::BannerSet;
use crate::components::{BannerCamera, NavigationTarget, SocialIcon};
use crate::icons::IconRing;
use crate::settings::BannerSettings;
use app::LOG_INPUT;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use thiserror::Error;

pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<IconActivated>().add_systems(
            Update,
            (
                pick_icon_on_click.in_set(BannerSet::Present),
                open_activated_link.after(BannerSet::Present),
            ),
        );
    }
}

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("could not open {url}: {source}")]
    Browser {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// An icon was clicked.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct IconActivated {
    pub slot: usize,
    pub url: String,
}

/// The candidate nearest along the ray whose centre lies within `radius` of
/// it. Candidates behind the ray origin are ignored.
pub fn pick_icon(
    origin: Vec3,
    direction: Vec3,
    radius: f32,
    candidates: impl IntoIterator<Item = (Entity, Vec3)>,
) -> Option<Entity> {
    let direction = direction.try_normalize()?;
    candidates
        .into_iter()
        .filter_map(|(entity, centre)| {
            let along = (centre - origin).dot(direction);
            if along < 0.0 {
                return None;
            }
            let closest = origin + direction * along;
            (closest.distance(centre) <= radius).then_some((entity, along))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, _)| entity)
}

fn pick_icon_on_click(
    buttons: Res<ButtonInput<MouseButton>>,
    settings: Res<BannerSettings>,
    ring: Res<IconRing>,
    window: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<BannerCamera>>,
    icons: Query<(&GlobalTransform, &SocialIcon, &NavigationTarget)>,
    mut activated: MessageWriter<IconActivated>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(cursor) = window.single().ok().and_then(|window| window.cursor_position()) else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor) else {
        return;
    };

    let candidates = ring.loaded().filter_map(|entity| {
        icons
            .get(entity)
            .ok()
            .map(|(transform, _, _)| (entity, transform.translation()))
    });
    let Some(hit) = pick_icon(
        ray.origin,
        *ray.direction,
        settings.navigation.pick_radius,
        candidates,
    ) else {
        return;
    };

    if let Ok((_, icon, target)) = icons.get(hit) {
        info!(target: LOG_INPUT, "Icon {} clicked -> {}", icon.slot, target.0);
        activated.write(IconActivated {
            slot: icon.slot,
            url: target.0.clone(),
        });
    }
}

pub fn open_link(url: &str) -> Result<(), NavigationError> {
    webbrowser::open(url).map_err(|source| NavigationError::Browser {
        url: url.to_string(),
        source,
    })
}

fn open_activated_link(
    mut activated: MessageReader<IconActivated>,
    settings: Res<BannerSettings>,
) {
    for event in activated.read() {
        if !settings.navigation.open_links {
            continue;
        }
        if let Err(err) = open_link(&event.url) {
            warn!(target: LOG_INPUT, "{}", err);
        }
    }
}
