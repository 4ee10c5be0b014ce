use bevy::prelude::*;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::TerrainError;

// --- Generation parameters ---

/// Everything a single generation pass needs.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainParams {
    pub width: usize,
    pub depth: usize,
    pub scale: f64,
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: f64,
    pub height_multiplier: f32,
    /// World translation of vertex (0, 0). Its XZ part also offsets noise sampling.
    pub origin: Vec3,
    pub seed: u64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            width: 50,
            depth: 50,
            scale: 5.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            height_multiplier: 5.0,
            origin: Vec3::ZERO,
            seed: 0,
        }
    }
}

impl TerrainParams {
    pub fn vertex_count(&self) -> usize {
        self.width * self.depth
    }

    pub fn index_count(&self) -> usize {
        self.width.saturating_sub(1) * self.depth.saturating_sub(1) * 6
    }

    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.width < 2 || self.depth < 2 {
            return Err(TerrainError::InvalidDimensions {
                width: self.width,
                depth: self.depth,
            });
        }
        // Also catches NaN.
        if !(self.scale > 0.0) {
            return Err(TerrainError::InvalidScale(self.scale));
        }
        if self.octaves < 1 {
            return Err(TerrainError::InvalidOctaves);
        }
        match self.width.checked_mul(self.depth) {
            Some(n) if n <= u32::MAX as usize => Ok(()),
            _ => Err(TerrainError::TooManyVertices {
                width: self.width,
                depth: self.depth,
            }),
        }
    }
}

// --- Config ---

#[derive(Resource, Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub seed: u64,
    pub width: usize,
    pub depth: usize,
    pub scale: f64,
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: f64,
    pub height_multiplier: f32,
    pub origin: (f32, f32, f32),
    /// Build the mesh one x-row at a time instead of in a single pass.
    pub incremental: bool,
    /// Fixed pause between two incremental rows.
    pub row_delay_secs: f32,
    /// Pick a fresh noise seed every time a rebuild is requested.
    pub reseed_on_rebuild: bool,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        let params = TerrainParams::default();
        Self {
            seed: params.seed,
            width: params.width,
            depth: params.depth,
            scale: params.scale,
            octaves: params.octaves,
            persistence: params.persistence,
            lacunarity: params.lacunarity,
            height_multiplier: params.height_multiplier,
            origin: (0.0, 0.0, 0.0),
            incremental: true,
            row_delay_secs: 0.01,
            reseed_on_rebuild: false,
        }
    }
}

impl TerrainConfig {
    pub fn load_from_ron_file(path: impl AsRef<Path>) -> Result<Self, TerrainError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TerrainError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&text)
    }

    pub fn from_ron_str(text: &str) -> Result<Self, TerrainError> {
        let config: TerrainConfig = ron::from_str(text)?;
        config.params().validate()?;
        Ok(config)
    }

    pub fn params(&self) -> TerrainParams {
        let (x, y, z) = self.origin;
        TerrainParams {
            width: self.width,
            depth: self.depth,
            scale: self.scale,
            octaves: self.octaves,
            persistence: self.persistence,
            lacunarity: self.lacunarity,
            height_multiplier: self.height_multiplier,
            origin: Vec3::new(x, y, z),
            seed: self.seed,
        }
    }

    /// Center of the terrain footprint on the XZ plane, at the origin height.
    pub fn center(&self) -> Vec3 {
        let (x, y, z) = self.origin;
        Vec3::new(
            x + (self.width.saturating_sub(1)) as f32 * 0.5,
            y,
            z + (self.depth.saturating_sub(1)) as f32 * 0.5,
        )
    }
}

// --- Resources ---

#[derive(Resource)]
pub struct TerrainMaterial {
    pub material: Handle<StandardMaterial>,
}

/// Entity currently displaying the latest published terrain mesh.
#[derive(Resource, Default)]
pub struct TerrainMeshEntity(pub Option<Entity>);
