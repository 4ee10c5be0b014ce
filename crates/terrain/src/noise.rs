//! Fractal (multi-octave) noise sampling into a height field.

use parrot::Perlin;

use crate::error::TerrainError;
use crate::types::TerrainParams;

/// A smooth, deterministic 2D noise function.
pub trait NoiseSource {
    fn sample(&self, x: f64, z: f64) -> f64;
}

/// Seeded Perlin noise remapped into `[0, 1]`.
pub struct PerlinNoise {
    perlin: Perlin,
}

impl PerlinNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }
}

impl NoiseSource for PerlinNoise {
    fn sample(&self, x: f64, z: f64) -> f64 {
        (self.perlin.noise2d(x, z) * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}

/// Row-major grid of raw fractal heights, indexed `x * depth + z`.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    width: usize,
    depth: usize,
    values: Vec<f32>,
}

impl HeightField {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn get(&self, x: usize, z: usize) -> f32 {
        self.values[x * self.depth + z]
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Heights of one x-row, `z` ascending.
    pub fn row(&self, x: usize) -> &[f32] {
        &self.values[x * self.depth..(x + 1) * self.depth]
    }
}

/// Largest value a single cell can reach when every octave samples 1.0.
pub fn amplitude_sum(octaves: u32, persistence: f64) -> f64 {
    (0..octaves).map(|i| persistence.powi(i as i32)).sum()
}

/// Fractal sum of `params.octaves` noise layers at grid cell `(x, z)`.
pub fn sample_height(x: usize, z: usize, params: &TerrainParams, noise: &impl NoiseSource) -> f32 {
    let base_x = (x as f64 + params.origin.x as f64) / params.scale;
    let base_z = (z as f64 + params.origin.z as f64) / params.scale;

    let mut amplitude = 1.0f64;
    let mut frequency = 1.0f64;
    let mut height = 0.0f64;

    for _ in 0..params.octaves {
        height += noise.sample(base_x * frequency, base_z * frequency) * amplitude;
        amplitude *= params.persistence;
        frequency *= params.lacunarity;
    }

    height as f32
}

pub fn sample_height_field(
    params: &TerrainParams,
    noise: &impl NoiseSource,
) -> Result<HeightField, TerrainError> {
    params.validate()?;

    let mut values = Vec::with_capacity(params.vertex_count());
    for x in 0..params.width {
        for z in 0..params.depth {
            values.push(sample_height(x, z, params, noise));
        }
    }

    Ok(HeightField {
        width: params.width,
        depth: params.depth,
        values,
    })
}
