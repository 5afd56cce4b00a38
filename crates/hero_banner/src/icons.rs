//! Orbiting social icons.
//!
//! Each configured icon owns a fixed slot. Its glTF scene is requested at
//! startup and the handle is polled every frame; the slot flips from
//! `Pending` to `Ready` (or `Failed`) exactly once. The ring only ever sees
//! the slots that are ready.

use crate::BannerSet;
use crate::animation::orbit_position;
use crate::components::{NavigationTarget, SocialIcon, Spin};
use crate::settings::{BannerSettings, IconEntry};
use app::LOG_ASSETS;
use bevy::asset::LoadState;
use bevy::gltf::GltfAssetLabel;
use bevy::prelude::*;

pub struct IconRingPlugin;

impl Plugin for IconRingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<IconRing>()
            .add_systems(Startup, request_icon_loads)
            .add_systems(Update, poll_icon_loads.in_set(BannerSet::Input));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconLoad {
    Pending,
    Ready(Entity),
    /// The asset failed to load; the slot stays empty for good.
    Failed,
}

/// Readiness of a requested scene, independent of the asset server types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadProbe {
    Waiting,
    Ready,
    Failed,
}

impl LoadProbe {
    pub fn from_load_state(state: Option<LoadState>) -> Self {
        match state {
            Some(LoadState::Loaded) => Self::Ready,
            Some(LoadState::Failed(_)) => Self::Failed,
            _ => Self::Waiting,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IconSlot {
    pub slot: usize,
    pub asset: String,
    pub url: String,
    pub handle: Option<Handle<Scene>>,
    pub state: IconLoad,
}

/// Fixed-size slot table, indexed by orbit slot.
#[derive(Resource, Debug, Clone, Default)]
pub struct IconRing {
    slots: Vec<IconSlot>,
}

impl IconRing {
    pub fn from_entries(entries: &[IconEntry]) -> Self {
        Self {
            slots: entries
                .iter()
                .enumerate()
                .map(|(slot, entry)| IconSlot {
                    slot,
                    asset: entry.asset.clone(),
                    url: entry.url.clone(),
                    handle: None,
                    state: IconLoad::Pending,
                })
                .collect(),
        }
    }

    pub fn slots(&self) -> &[IconSlot] {
        &self.slots
    }

    /// Number of slots requested at startup
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded().count()
    }

    /// Entities of the loaded icons, in slot order.
    pub fn loaded(&self) -> impl Iterator<Item = Entity> + '_ {
        self.slots.iter().filter_map(|slot| match slot.state {
            IconLoad::Ready(entity) => Some(entity),
            _ => None,
        })
    }

    /// Returns `false` if the slot does not exist or already left `Pending`.
    pub fn mark_ready(&mut self, slot: usize, entity: Entity) -> bool {
        self.transition(slot, IconLoad::Ready(entity))
    }

    pub fn mark_failed(&mut self, slot: usize) -> bool {
        self.transition(slot, IconLoad::Failed)
    }

    fn transition(&mut self, slot: usize, next: IconLoad) -> bool {
        match self.slots.get_mut(slot) {
            Some(entry) if entry.state == IconLoad::Pending => {
                entry.state = next;
                true
            }
            _ => false,
        }
    }
}

fn request_icon_loads(
    settings: Res<BannerSettings>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
) {
    let mut ring = IconRing::from_entries(&settings.icons.entries);
    for slot in &mut ring.slots {
        info!(target: LOG_ASSETS, "Requesting icon {} ({})", slot.asset, slot.url);
        slot.handle =
            Some(asset_server.load(GltfAssetLabel::Scene(0).from_asset(slot.asset.clone())));
    }
    commands.insert_resource(ring);
}

fn poll_icon_loads(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings: Res<BannerSettings>,
    mut ring: ResMut<IconRing>,
) {
    settle_pending_slots(&mut ring, &mut commands, &settings, |handle| {
        LoadProbe::from_load_state(asset_server.get_load_state(handle.id()))
    });
}

/// Moves every pending slot whose scene `probe` reports as finished to
/// `Ready` (spawning its icon) or `Failed`.
pub fn settle_pending_slots(
    ring: &mut IconRing,
    commands: &mut Commands,
    settings: &BannerSettings,
    mut probe: impl FnMut(&Handle<Scene>) -> LoadProbe,
) {
    let capacity = ring.capacity();

    for index in 0..capacity {
        let entry = &ring.slots[index];
        if entry.state != IconLoad::Pending {
            continue;
        }
        let Some(handle) = entry.handle.clone() else {
            continue;
        };

        match probe(&handle) {
            LoadProbe::Waiting => {}
            LoadProbe::Failed => {
                warn!(
                    target: LOG_ASSETS,
                    "Icon {} failed to load, slot {} stays empty", entry.asset, entry.slot
                );
                ring.mark_failed(index);
            }
            LoadProbe::Ready => {
                info!(target: LOG_ASSETS, "Icon {} loaded into slot {}", entry.asset, entry.slot);
                let entity = spawn_loaded_icon(commands, entry, handle, capacity, settings);
                ring.mark_ready(index, entity);
            }
        }
    }
}

/// Spawns the scene root of a loaded icon at its slot's place on the full
/// ring at t = 0. Later frames re-space it by loaded count.
pub fn spawn_loaded_icon(
    commands: &mut Commands,
    entry: &IconSlot,
    handle: Handle<Scene>,
    capacity: usize,
    settings: &BannerSettings,
) -> Entity {
    let position =
        orbit_position(entry.slot, capacity, 0.0, &settings.motion).unwrap_or_default();
    commands
        .spawn((
            SceneRoot(handle),
            Transform::from_translation(position).with_scale(Vec3::splat(settings.icons.scale)),
            SocialIcon { slot: entry.slot },
            NavigationTarget(entry.url.clone()),
            Spin::default(),
            Name::new(format!("Social Icon {}", entry.slot)),
        ))
        .id()
}
