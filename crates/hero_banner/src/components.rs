use bevy::prelude::*;

/// One sphere of the particle field.
#[derive(Component, Debug, Clone, Copy)]
pub struct Particle {
    /// Rest position, fixed at spawn
    pub origin: Vec3,
    /// Spawn order, desynchronizes the oscillation
    pub phase: u32,
}

/// Euler spin accumulator (XYZ order), grows by a fixed step every frame.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Spin {
    pub x: f32,
    pub y: f32,
}

impl Spin {
    pub fn advance(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.x, self.y, 0.0)
    }
}

/// Root entity of a loaded social icon.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialIcon {
    pub slot: usize,
}

/// Link opened when the icon is clicked.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget(pub String);

/// Marker for the banner's render camera
#[derive(Component)]
pub struct BannerCamera;

/// Eased camera state. The render transform follows it, either directly or
/// through the orbit controller.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
}

impl CameraRig {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }
}
