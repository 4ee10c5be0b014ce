pub mod error;
pub mod mesh;
pub mod noise;
pub mod render;
pub mod session;
pub mod types;

pub use error::TerrainError;
pub use mesh::{IncrementalMeshBuilder, MeshBuffers, MeshSnapshot, build_mesh, generate};
pub use noise::{HeightField, NoiseSource, PerlinNoise, amplitude_sum, sample_height_field};
pub use render::{RebuildTerrain, TerrainSessionRes};
pub use session::{
    GenerationHandle, GenerationSession, GenerationState, LatestMesh, MeshSink, StepOutcome,
};
pub use types::*;

use bevy::prelude::*;

pub struct TerrainPlugin {
    pub config: types::TerrainConfig,
}

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .init_resource::<types::TerrainMeshEntity>()
            .init_resource::<render::TerrainSessionRes>()
            .add_message::<render::RebuildTerrain>()
            .add_systems(Startup, render::setup_terrain_renderer)
            .add_systems(
                Update,
                (render::handle_rebuild_requests, render::advance_generation).chain(),
            );
    }
}
