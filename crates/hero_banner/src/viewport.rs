//! Keeps the camera projection in step with the window.
//!
//! Bevy resizes the swapchain on its own; this module tracks the size and
//! pixel density and updates the banner camera's aspect ratio.

use crate::BannerSet;
use crate::components::BannerCamera;
use app::LOG_SCENE;
use bevy::prelude::*;
use bevy::window::{WindowResized, WindowScaleFactorChanged};

pub struct ViewportPlugin;

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewportState>().add_systems(
            Update,
            (track_scale_factor, adapt_to_resize).in_set(BannerSet::Input),
        );
    }
}

/// Logical surface size and pixel density of the banner window
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub width: f32,
    pub height: f32,
    pub scale_factor: f32,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            scale_factor: 1.0,
        }
    }
}

impl ViewportState {
    /// Size of the surface in physical pixels
    pub fn physical_size(&self) -> UVec2 {
        (Vec2::new(self.width, self.height) * self.scale_factor)
            .round()
            .as_uvec2()
    }
}

/// `width / height`, or `None` for a collapsed window.
pub fn aspect_ratio(width: f32, height: f32) -> Option<f32> {
    (width > 0.0 && height > 0.0).then(|| width / height)
}

fn adapt_to_resize(
    mut resized: MessageReader<WindowResized>,
    windows: Query<&Window>,
    mut viewport: ResMut<ViewportState>,
    mut cameras: Query<&mut Projection, With<BannerCamera>>,
) {
    let Some(latest) = resized.read().last() else {
        return;
    };
    let Some(aspect) = aspect_ratio(latest.width, latest.height) else {
        debug!(target: LOG_SCENE, "Ignoring collapsed window size {}x{}", latest.width, latest.height);
        return;
    };

    viewport.width = latest.width;
    viewport.height = latest.height;
    if let Ok(window) = windows.get(latest.window) {
        viewport.scale_factor = window.scale_factor();
    }

    for mut projection in &mut cameras {
        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.aspect_ratio = aspect;
        }
    }

    debug!(
        target: LOG_SCENE,
        "Viewport {}x{} ({} physical), aspect {:.3}",
        latest.width, latest.height, viewport.physical_size(), aspect
    );
}

fn track_scale_factor(
    mut changed: MessageReader<WindowScaleFactorChanged>,
    mut viewport: ResMut<ViewportState>,
) {
    if let Some(latest) = changed.read().last() {
        viewport.scale_factor = latest.scale_factor as f32;
    }
}
