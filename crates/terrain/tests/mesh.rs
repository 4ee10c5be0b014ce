use glam::Vec3;
use terrain::{
    PerlinNoise, TerrainError, TerrainParams, build_mesh, generate, sample_height_field,
};

fn params(width: usize, depth: usize) -> TerrainParams {
    TerrainParams {
        width,
        depth,
        seed: 42,
        ..Default::default()
    }
}

#[test]
fn buffer_lengths_follow_grid_size() {
    for (width, depth) in [(2, 2), (3, 3), (2, 9), (9, 2), (16, 5), (50, 50)] {
        let p = params(width, depth);
        let mesh = generate(&p).unwrap();
        assert_eq!(mesh.vertices.len(), width * depth);
        assert_eq!(mesh.indices.len(), (width - 1) * (depth - 1) * 6);
        assert_eq!(mesh.vertices.len(), p.vertex_count());
        assert_eq!(mesh.indices.len(), p.index_count());
    }
}

#[test]
fn indices_reference_existing_vertices() {
    for (width, depth) in [(2, 2), (7, 3), (3, 7), (12, 12)] {
        let mesh = generate(&params(width, depth)).unwrap();
        let count = (width * depth) as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
    }
}

#[test]
fn vertices_follow_x_major_layout() {
    let p = TerrainParams {
        origin: Vec3::new(100.0, -2.0, 50.0),
        height_multiplier: 3.0,
        ..params(3, 4)
    };
    let field = sample_height_field(&p, &PerlinNoise::new(p.seed)).unwrap();
    let mesh = generate(&p).unwrap();

    for x in 0..p.width {
        for z in 0..p.depth {
            let [vx, vy, vz] = mesh.vertices[x * p.depth + z];
            assert_eq!(vx, 100.0 + x as f32);
            assert_eq!(vz, 50.0 + z as f32);
            assert_eq!(vy, -2.0 + field.get(x, z) * 3.0);
        }
    }
}

#[test]
fn triangles_wind_consistently() {
    let p = params(4, 5);
    let mesh = generate(&p).unwrap();
    let depth = p.depth as u32;

    let mut cell = 0;
    for x in 0..(p.width as u32 - 1) {
        for z in 0..(depth - 1) {
            let i = x * depth + z;
            let tris = &mesh.indices[cell * 6..cell * 6 + 6];
            assert_eq!(tris, &[i, i + depth, i + depth + 1, i, i + depth + 1, i + 1]);
            cell += 1;
        }
    }
}

#[test]
fn one_pass_matches_explicit_pipeline() {
    let p = params(10, 6);
    let field = sample_height_field(&p, &PerlinNoise::new(p.seed)).unwrap();
    assert_eq!(
        generate(&p).unwrap(),
        build_mesh(&field, p.height_multiplier, p.origin)
    );
}

#[test]
fn degenerate_requests_are_rejected() {
    assert!(matches!(
        generate(&params(1, 5)),
        Err(TerrainError::InvalidDimensions { .. })
    ));
    assert!(matches!(
        generate(&TerrainParams {
            scale: -2.0,
            ..params(4, 4)
        }),
        Err(TerrainError::InvalidScale(_))
    ));
    assert!(matches!(
        generate(&TerrainParams {
            octaves: 0,
            ..params(4, 4)
        }),
        Err(TerrainError::InvalidOctaves)
    ));
}
