//! Row-by-row generation driven by a host scheduler.

use bevy::log::{debug, info};

use crate::error::TerrainError;
use crate::mesh::{IncrementalMeshBuilder, MeshBuffers, MeshSnapshot};
use crate::noise::{PerlinNoise, sample_height_field};
use crate::types::TerrainParams;

/// Receives every snapshot a running generation publishes.
pub trait MeshSink {
    fn publish(&mut self, snapshot: &MeshSnapshot<'_>);
}

impl<F> MeshSink for F
where
    F: FnMut(&MeshSnapshot<'_>),
{
    fn publish(&mut self, snapshot: &MeshSnapshot<'_>) {
        self(snapshot)
    }
}

/// Keeps an owned copy of the most recent snapshot.
#[derive(Debug, Default)]
pub struct LatestMesh {
    pub buffers: Option<MeshBuffers>,
    pub progress: f32,
    pub complete: bool,
}

impl MeshSink for LatestMesh {
    fn publish(&mut self, snapshot: &MeshSnapshot<'_>) {
        self.buffers = Some(snapshot.to_buffers());
        self.progress = snapshot.progress;
        self.complete = snapshot.complete;
    }
}

/// Identifies one run started by [`GenerationSession::begin`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GenerationHandle(pub(crate) u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationState {
    Idle,
    /// `row` is the next x-row to be built.
    Running { row: usize },
    Complete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing is running.
    Idle,
    /// A row was built and more remain.
    Row { row: usize },
    /// The last row was built on this step.
    Finished,
}

pub struct GenerationSession {
    builder: Option<IncrementalMeshBuilder>,
    state: GenerationState,
    current: Option<GenerationHandle>,
    next_id: u64,
}

impl Default for GenerationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationSession {
    pub fn new() -> Self {
        Self {
            builder: None,
            state: GenerationState::Idle,
            current: None,
            next_id: 0,
        }
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, GenerationState::Running { .. })
    }

    pub fn current(&self) -> Option<GenerationHandle> {
        self.current
    }

    pub fn progress(&self) -> f32 {
        match self.state {
            GenerationState::Idle => 0.0,
            GenerationState::Complete => 1.0,
            GenerationState::Running { .. } => {
                self.builder.as_ref().map_or(0.0, |b| b.progress())
            }
        }
    }

    /// Starts a fresh run from row 0, cancelling any run in flight first.
    ///
    /// Parameters are validated before the previous run is touched, so a
    /// rejected request leaves the session unchanged.
    pub fn begin(&mut self, params: &TerrainParams) -> Result<GenerationHandle, TerrainError> {
        params.validate()?;

        if self.is_running() {
            self.cancel_current();
        }
        self.builder = None;

        let field = sample_height_field(params, &PerlinNoise::new(params.seed))?;
        self.builder = Some(IncrementalMeshBuilder::new(
            field,
            params.height_multiplier,
            params.origin,
        ));

        let handle = GenerationHandle(self.next_id);
        self.next_id += 1;
        self.current = Some(handle);
        self.state = GenerationState::Running { row: 0 };

        info!(
            "terrain generation {:?} started: {}x{} vertices, {} octaves, seed {}",
            handle, params.width, params.depth, params.octaves, params.seed
        );
        Ok(handle)
    }

    /// Cancels `handle` if it is the run in flight. Stale handles are ignored.
    pub fn cancel(&mut self, handle: GenerationHandle) -> bool {
        if self.current != Some(handle) || !self.is_running() {
            return false;
        }
        self.cancel_current()
    }

    pub fn cancel_current(&mut self) -> bool {
        let GenerationState::Running { row } = self.state else {
            return false;
        };
        info!("terrain generation {:?} cancelled at row {}", self.current, row);
        self.builder = None;
        self.current = None;
        self.state = GenerationState::Idle;
        true
    }

    /// Builds one row and publishes the resulting snapshot to `sink`.
    pub fn step(&mut self, sink: &mut impl MeshSink) -> StepOutcome {
        let GenerationState::Running { row } = self.state else {
            return StepOutcome::Idle;
        };
        let Some(builder) = self.builder.as_mut() else {
            self.state = GenerationState::Idle;
            return StepOutcome::Idle;
        };

        builder.step_row();
        let complete = builder.is_complete();
        sink.publish(&builder.snapshot());

        if complete {
            info!("terrain generation {:?} complete", self.current);
            self.state = GenerationState::Complete;
            StepOutcome::Finished
        } else {
            debug!("terrain row {} built ({:.0}%)", row, builder.progress() * 100.0);
            self.state = GenerationState::Running { row: row + 1 };
            StepOutcome::Row { row }
        }
    }

    /// Runs every remaining row, publishing after each one.
    pub fn finish(&mut self, sink: &mut impl MeshSink) {
        while let StepOutcome::Row { .. } = self.step(&mut *sink) {}
    }

    /// Latest state of the current (or last completed) build.
    pub fn latest(&self) -> Option<MeshSnapshot<'_>> {
        self.builder.as_ref().map(|b| b.snapshot())
    }
}
