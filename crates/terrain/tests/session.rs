use glam::Vec3;
use terrain::{
    GenerationSession, GenerationState, LatestMesh, MeshSnapshot, StepOutcome, TerrainParams,
    generate,
};

/// Pins a closure to the higher-ranked signature sinks expect.
fn sink<F: FnMut(&MeshSnapshot<'_>)>(f: F) -> F {
    f
}

fn params(origin: Vec3) -> TerrainParams {
    TerrainParams {
        width: 12,
        depth: 9,
        origin,
        seed: 5,
        ..Default::default()
    }
}

#[test]
fn incremental_result_matches_one_pass() {
    let p = params(Vec3::new(4.0, 0.0, -3.0));
    let mut session = GenerationSession::new();
    session.begin(&p).unwrap();

    let mut latest = LatestMesh::default();
    session.finish(&mut latest);

    assert!(latest.complete);
    assert_eq!(latest.buffers.unwrap(), generate(&p).unwrap());
}

#[test]
fn every_partial_snapshot_is_well_formed() {
    let p = params(Vec3::ZERO);
    let mut session = GenerationSession::new();
    session.begin(&p).unwrap();

    let mut rows = 0;
    let mut on_row = sink(|snap: &MeshSnapshot<'_>| {
        rows += 1;
        assert_eq!(snap.vertices.len(), rows * p.depth);
        assert_eq!(snap.indices.len() % 3, 0);
        assert!(
            snap.indices
                .iter()
                .all(|&i| (i as usize) < snap.vertices.len())
        );
    });
    session.finish(&mut on_row);
    assert_eq!(rows, p.width);
}

#[test]
fn progress_rises_monotonically_to_one() {
    let mut session = GenerationSession::new();
    session.begin(&params(Vec3::ZERO)).unwrap();
    assert_eq!(session.progress(), 0.0);

    let mut seen = vec![session.progress()];
    let mut latest = LatestMesh::default();
    while session.step(&mut latest) != StepOutcome::Idle {
        seen.push(session.progress());
    }

    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(seen.last().copied(), Some(1.0));
}

#[test]
fn restart_discards_cancelled_run() {
    let first = params(Vec3::new(100.0, 0.0, 100.0));
    let second = params(Vec3::new(-20.0, 1.0, 3.0));

    let mut session = GenerationSession::new();
    let old = session.begin(&first).unwrap();
    let mut latest = LatestMesh::default();
    for _ in 0..5 {
        session.step(&mut latest);
    }
    assert!(session.progress() > 0.0);

    let new = session.begin(&second).unwrap();
    assert_ne!(old, new);
    assert_eq!(session.state(), GenerationState::Running { row: 0 });
    assert_eq!(session.progress(), 0.0);
    assert!(!session.cancel(old));

    let mut restarted = LatestMesh::default();
    let mut progress = Vec::new();
    let mut record = sink(|snap: &MeshSnapshot<'_>| {
        progress.push(snap.progress);
        restarted.buffers = Some(snap.to_buffers());
    });
    session.finish(&mut record);

    assert!(progress.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(progress.last().copied(), Some(1.0));
    assert_eq!(restarted.buffers.unwrap(), generate(&second).unwrap());
}

#[test]
fn cancel_returns_to_idle() {
    let mut session = GenerationSession::new();
    let handle = session.begin(&params(Vec3::ZERO)).unwrap();
    session.step(&mut LatestMesh::default());

    assert!(session.cancel(handle));
    assert_eq!(session.state(), GenerationState::Idle);
    assert_eq!(session.progress(), 0.0);
    assert_eq!(session.step(&mut LatestMesh::default()), StepOutcome::Idle);
    assert!(!session.cancel_current());
}
