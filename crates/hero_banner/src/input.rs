//! Pointer tracking and the per-frame input snapshot.
//!
//! The animator never reads windows or clocks itself. Everything it needs is
//! collected here into [`FrameInput`] once per frame.

use crate::BannerSet;
use bevy::prelude::*;
use bevy::window::CursorMoved;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerState>()
            .init_resource::<FrameInput>()
            .add_systems(
                Update,
                (track_pointer, capture_frame_input)
                    .chain()
                    .in_set(BannerSet::Input),
            );
    }
}

/// Latest pointer position, normalized so the window centre is `(0, 0)` and
/// the edges are `±1`. Y grows downwards like window coordinates.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub normalized: Vec2,
}

/// Snapshot handed to the animator each frame.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Monotonic seconds since startup
    pub time_secs: f32,
    pub pointer: Vec2,
}

/// Maps a window-space cursor position to `[-1, 1]²`. Degenerate windows
/// yield `None` so the previous pointer value stays in place.
pub fn normalize_pointer(position: Vec2, width: f32, height: f32) -> Option<Vec2> {
    if width <= 0.0 || height <= 0.0 || !position.is_finite() {
        return None;
    }
    Some(Vec2::new(
        (position.x / width - 0.5) * 2.0,
        (position.y / height - 0.5) * 2.0,
    ))
}

fn track_pointer(
    mut cursor_moved: MessageReader<CursorMoved>,
    windows: Query<&Window>,
    mut pointer: ResMut<PointerState>,
) {
    // only the newest position matters
    let Some(moved) = cursor_moved.read().last() else {
        return;
    };
    let Ok(window) = windows.get(moved.window) else {
        return;
    };
    if let Some(normalized) = normalize_pointer(moved.position, window.width(), window.height()) {
        pointer.normalized = normalized;
    }
}

fn capture_frame_input(
    time: Res<Time>,
    pointer: Res<PointerState>,
    mut input: ResMut<FrameInput>,
) {
    *input = FrameInput {
        time_secs: time.elapsed_secs(),
        pointer: pointer.normalized,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pointer_maps_corners_and_centre() {
        assert_eq!(
            normalize_pointer(Vec2::new(400.0, 300.0), 800.0, 600.0),
            Some(Vec2::ZERO)
        );
        assert_eq!(
            normalize_pointer(Vec2::ZERO, 800.0, 600.0),
            Some(Vec2::new(-1.0, -1.0))
        );
        assert_eq!(
            normalize_pointer(Vec2::new(800.0, 600.0), 800.0, 600.0),
            Some(Vec2::new(1.0, 1.0))
        );
    }

    #[test]
    fn test_normalize_pointer_rejects_degenerate_window() {
        assert_eq!(normalize_pointer(Vec2::new(10.0, 10.0), 0.0, 600.0), None);
        assert_eq!(normalize_pointer(Vec2::new(f32::NAN, 1.0), 800.0, 600.0), None);
    }

    #[test]
    fn test_frame_input_reads_pointer_without_resetting_it() {
        let mut app = App::new();
        app.add_plugins(bevy::time::TimePlugin)
            .add_message::<CursorMoved>()
            .add_plugins(InputPlugin);
        app.insert_resource(PointerState {
            normalized: Vec2::new(0.5, -0.25),
        });

        app.update();
        app.update();

        let input = *app.world().resource::<FrameInput>();
        assert_eq!(input.pointer, Vec2::new(0.5, -0.25));
        assert_eq!(
            app.world().resource::<PointerState>().normalized,
            Vec2::new(0.5, -0.25)
        );
    }
}
