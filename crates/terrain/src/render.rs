use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use crate::mesh::{MeshBuffers, generate};
use crate::session::{GenerationSession, LatestMesh, StepOutcome};
use crate::types::{TerrainConfig, TerrainMaterial, TerrainMeshEntity, TerrainParams};

#[derive(Component)]
pub struct TerrainSurface;

#[derive(Resource, Default)]
pub struct TerrainSessionRes(pub GenerationSession);

/// Fixed delay between two incremental rows.
#[derive(Resource)]
pub struct RowTimer(pub Timer);

/// Parameters of the most recent generation request.
#[derive(Resource, Clone, Debug)]
pub struct ActiveTerrainParams(pub TerrainParams);

pub fn setup_terrain_renderer(
    mut commands: Commands,
    config: Res<TerrainConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut surface: ResMut<TerrainMeshEntity>,
    mut session: ResMut<TerrainSessionRes>,
) {
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.55, 0.25),
        perceptual_roughness: 1.0,
        ..default()
    });
    let terrain_material = TerrainMaterial { material };

    let params = config.params();
    commands.insert_resource(RowTimer(Timer::from_seconds(
        config.row_delay_secs.max(0.001),
        TimerMode::Repeating,
    )));

    if config.incremental {
        if let Err(e) = session.0.begin(&params) {
            error!("{e}");
        }
    } else {
        match generate(&params) {
            Ok(buffers) => {
                info!(
                    "terrain generated in one pass: {} vertices, {} indices",
                    buffers.vertices.len(),
                    buffers.indices.len()
                );
                replace_surface(
                    &mut commands,
                    &mut meshes,
                    &terrain_material,
                    &mut surface,
                    buffers,
                    true,
                );
            }
            Err(e) => error!("{e}"),
        }
    }

    commands.insert_resource(ActiveTerrainParams(params));
    commands.insert_resource(terrain_material);
}

/// Asks for the terrain to be regenerated from row 0.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct RebuildTerrain;

/// Restarts generation for every [`RebuildTerrain`] request. Any build in
/// flight is cancelled before new buffers are allocated.
#[allow(clippy::too_many_arguments)]
pub fn handle_rebuild_requests(
    mut requests: MessageReader<RebuildTerrain>,
    mut commands: Commands,
    config: Res<TerrainConfig>,
    mut active: ResMut<ActiveTerrainParams>,
    mut session: ResMut<TerrainSessionRes>,
    mut timer: ResMut<RowTimer>,
    mut meshes: ResMut<Assets<Mesh>>,
    material: Res<TerrainMaterial>,
    mut surface: ResMut<TerrainMeshEntity>,
) {
    // Several presses in one frame still mean a single restart.
    if requests.read().count() == 0 {
        return;
    }

    let mut params = active.0.clone();
    if config.reseed_on_rebuild {
        params.seed = rand::random();
    }

    if config.incremental {
        match session.0.begin(&params) {
            Ok(_) => timer.0.reset(),
            Err(e) => {
                error!("rebuild rejected: {e}");
                return;
            }
        }
    } else {
        match generate(&params) {
            Ok(buffers) => {
                replace_surface(&mut commands, &mut meshes, &material, &mut surface, buffers, true)
            }
            Err(e) => {
                error!("rebuild rejected: {e}");
                return;
            }
        }
    }
    active.0 = params;
}

/// Host loop for incremental builds: one row per elapsed timer period.
pub fn advance_generation(
    mut commands: Commands,
    time: Res<Time>,
    mut timer: ResMut<RowTimer>,
    mut session: ResMut<TerrainSessionRes>,
    mut meshes: ResMut<Assets<Mesh>>,
    material: Option<Res<TerrainMaterial>>,
    mut surface: ResMut<TerrainMeshEntity>,
) {
    let Some(material) = material else {
        return;
    };
    if !session.0.is_running() {
        return;
    }

    timer.0.tick(time.delta());
    if !timer.0.just_finished() {
        return;
    }

    let mut latest = LatestMesh::default();
    let outcome = session.0.step(&mut latest);
    if outcome == StepOutcome::Idle {
        return;
    }

    if let Some(buffers) = latest.buffers {
        replace_surface(
            &mut commands,
            &mut meshes,
            &material,
            &mut surface,
            buffers,
            latest.complete,
        );
    }
}

/// Swaps the displayed terrain for a new entity built from `buffers`.
///
/// Smooth normals are only computed for the completed mesh; partial meshes
/// carry flat up-facing normals.
fn replace_surface(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: &TerrainMaterial,
    surface: &mut TerrainMeshEntity,
    buffers: MeshBuffers,
    complete: bool,
) {
    // Keep the previous mesh on screen until there is a triangle to replace it with.
    if buffers.indices.is_empty() {
        return;
    }
    if let Some(entity) = surface.0.take() {
        commands.entity(entity).despawn();
    }

    let mesh = mesh_from_buffers(buffers, complete);
    let mesh_handle = meshes.add(mesh);
    let entity = commands
        .spawn((
            TerrainSurface,
            Mesh3d(mesh_handle),
            MeshMaterial3d(material.material.clone()),
            Transform::IDENTITY,
        ))
        .id();
    surface.0 = Some(entity);
}

fn mesh_from_buffers(data: MeshBuffers, complete: bool) -> Mesh {
    let vertex_count = data.vertices.len();
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, data.vertices);
    mesh.insert_indices(Indices::U32(data.indices));
    if complete {
        mesh.compute_normals();
    } else {
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, vec![[0.0f32, 1.0, 0.0]; vertex_count]);
    }
    mesh
}
