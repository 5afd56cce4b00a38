use crate::components::{Particle, Spin};
use crate::settings::{BannerSettings, ParticleSettings, hex_color};
use app::LOG_SCENE;
use bevy::prelude::*;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random source for particle origins.
#[derive(Resource)]
pub struct ParticleRng(pub StdRng);

impl ParticleRng {
    pub fn from_settings(settings: &ParticleSettings) -> Self {
        match settings.seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

impl FromWorld for ParticleRng {
    fn from_world(world: &mut World) -> Self {
        world
            .get_resource::<BannerSettings>()
            .map(|settings| Self::from_settings(&settings.particles))
            .unwrap_or_else(|| Self(StdRng::from_entropy()))
    }
}

/// Draws one origin with every axis uniform in `[-spread, spread)`.
pub fn random_origin(rng: &mut impl Rng, spread: f32) -> Vec3 {
    let spread = spread.abs().max(f32::EPSILON);
    let axis = Uniform::new(-spread, spread);
    Vec3::new(axis.sample(rng), axis.sample(rng), axis.sample(rng))
}

/// Parent of all particles
#[derive(Component)]
pub struct ParticleField;

pub(super) fn spawn_particles(
    mut commands: Commands,
    settings: Res<BannerSettings>,
    mut rng: ResMut<ParticleRng>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let particles = &settings.particles;

    // every sphere shares one mesh and one material
    let mesh = meshes.add(
        Sphere::new(particles.radius)
            .mesh()
            .uv(particles.sectors, particles.stacks),
    );
    let color = hex_color(particles.color);
    let material = materials.add(StandardMaterial {
        base_color: color,
        emissive: color.into(),
        ..default()
    });

    commands
        .spawn((
            ParticleField,
            Transform::default(),
            Visibility::default(),
            Name::new("Particle Field"),
        ))
        .with_children(|field| {
            for phase in 0..particles.count {
                let origin = random_origin(&mut rng.0, particles.spread);
                field.spawn((
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::from_translation(origin),
                    Particle {
                        origin,
                        phase: phase as u32,
                    },
                    Spin::default(),
                ));
            }
        });

    info!(target: LOG_SCENE, "Spawned {} particles", particles.count);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_app(count: usize, seed: u64) -> App {
        let mut settings = BannerSettings::default();
        settings.particles.count = count;
        settings.particles.seed = Some(seed);

        let mut app = App::new();
        app.insert_resource(ParticleRng::from_settings(&settings.particles))
            .insert_resource(settings)
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .add_systems(Startup, spawn_particles);
        app.update();
        app
    }

    fn particles(app: &mut App) -> Vec<Particle> {
        let mut particles: Vec<Particle> = app
            .world_mut()
            .query::<&Particle>()
            .iter(app.world())
            .copied()
            .collect();
        particles.sort_by_key(|particle| particle.phase);
        particles
    }

    #[test]
    fn test_origins_stay_inside_spread() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let origin = random_origin(&mut rng, 5.0);
            assert!(origin.cmpge(Vec3::splat(-5.0)).all());
            assert!(origin.cmplt(Vec3::splat(5.0)).all());
        }
    }

    #[test]
    fn test_spawns_count_particles_with_sequential_phases() {
        let mut app = spawn_app(300, 42);
        let particles = particles(&mut app);

        assert_eq!(particles.len(), 300);
        for (index, particle) in particles.iter().enumerate() {
            assert_eq!(particle.phase, index as u32);
        }
    }

    #[test]
    fn test_spawn_starts_at_origin() {
        let mut app = spawn_app(5, 3);
        let mut query = app.world_mut().query::<(&Particle, &Transform)>();
        for (particle, transform) in query.iter(app.world()) {
            assert_eq!(transform.translation, particle.origin);
        }
    }

    #[test]
    fn test_seed_makes_layout_reproducible() {
        let first = particles(&mut spawn_app(20, 9));
        let second = particles(&mut spawn_app(20, 9));
        let other = particles(&mut spawn_app(20, 10));

        let origins = |particles: &[Particle]| particles.iter().map(|p| p.origin).collect::<Vec<_>>();
        assert_eq!(origins(&first), origins(&second));
        assert_ne!(origins(&first), origins(&other));
    }
}
