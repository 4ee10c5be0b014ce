//! Regular grid triangulation of a height field.
//!
//! Vertices are laid out row-major by x with z as the fast axis, so vertex
//! `(x, z)` lives at `x * depth + z`. Its neighbour along x is `depth` slots
//! away and its neighbour along z is the next slot.

use glam::Vec3;

use crate::error::TerrainError;
use crate::noise::{HeightField, PerlinNoise, sample_height_field};
use crate::types::TerrainParams;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    pub vertices: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

/// Borrowed view of a build in progress (or a finished one).
#[derive(Clone, Copy, Debug)]
pub struct MeshSnapshot<'a> {
    pub vertices: &'a [[f32; 3]],
    pub indices: &'a [u32],
    pub progress: f32,
    pub complete: bool,
}

impl MeshSnapshot<'_> {
    pub fn to_buffers(&self) -> MeshBuffers {
        MeshBuffers {
            vertices: self.vertices.to_vec(),
            indices: self.indices.to_vec(),
        }
    }
}

/// One-pass generation: sample Perlin noise and triangulate it.
pub fn generate(params: &TerrainParams) -> Result<MeshBuffers, TerrainError> {
    let field = sample_height_field(params, &PerlinNoise::new(params.seed))?;
    Ok(build_mesh_owned(field, params.height_multiplier, params.origin))
}

pub fn build_mesh(field: &HeightField, height_multiplier: f32, origin: Vec3) -> MeshBuffers {
    build_mesh_owned(field.clone(), height_multiplier, origin)
}

fn build_mesh_owned(field: HeightField, height_multiplier: f32, origin: Vec3) -> MeshBuffers {
    let mut builder = IncrementalMeshBuilder::new(field, height_multiplier, origin);
    while builder.step_row() {}
    builder.into_buffers()
}

/// Appends the two triangles of the cell whose lowest corner is `vertex`.
fn push_cell(indices: &mut Vec<u32>, vertex: u32, depth: u32) {
    indices.extend_from_slice(&[
        vertex,
        vertex + depth,
        vertex + depth + 1,
        vertex,
        vertex + depth + 1,
        vertex + 1,
    ]);
}

/// Builds the mesh one x-row per call to [`IncrementalMeshBuilder::step_row`].
pub struct IncrementalMeshBuilder {
    field: HeightField,
    height_multiplier: f32,
    origin: Vec3,
    vertices: Vec<[f32; 3]>,
    indices: Vec<u32>,
    rows_done: usize,
}

impl IncrementalMeshBuilder {
    pub fn new(field: HeightField, height_multiplier: f32, origin: Vec3) -> Self {
        let width = field.width();
        let depth = field.depth();
        Self {
            vertices: Vec::with_capacity(width * depth),
            indices: Vec::with_capacity(width.saturating_sub(1) * depth.saturating_sub(1) * 6),
            field,
            height_multiplier,
            origin,
            rows_done: 0,
        }
    }

    pub fn rows_done(&self) -> usize {
        self.rows_done
    }

    pub fn is_complete(&self) -> bool {
        self.rows_done >= self.field.width()
    }

    pub fn progress(&self) -> f32 {
        if self.field.width() == 0 {
            return 1.0;
        }
        self.rows_done as f32 / self.field.width() as f32
    }

    /// Finalizes the next x-row. Returns `false` once every row is done.
    pub fn step_row(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }

        let x = self.rows_done;
        let width = self.field.width();
        let depth = self.field.depth();

        for (z, &height) in self.field.row(x).iter().enumerate() {
            let vertex = self.vertices.len();
            let position = self.origin
                + Vec3::new(
                    x as f32,
                    height * self.height_multiplier,
                    z as f32,
                );
            self.vertices.push(position.to_array());

            if x + 1 < width && z + 1 < depth {
                push_cell(&mut self.indices, vertex as u32, depth as u32);
            }
        }

        self.rows_done += 1;
        true
    }

    /// Finalized vertices plus only the triangles whose corners are all finalized.
    pub fn snapshot(&self) -> MeshSnapshot<'_> {
        let depth = self.field.depth();
        let ready_cells = self.rows_done.saturating_sub(1) * depth.saturating_sub(1);
        MeshSnapshot {
            vertices: &self.vertices,
            indices: &self.indices[..ready_cells * 6],
            progress: self.progress(),
            complete: self.is_complete(),
        }
    }

    pub fn into_buffers(self) -> MeshBuffers {
        MeshBuffers {
            vertices: self.vertices,
            indices: self.indices,
        }
    }
}
