//! Export generated designs and read the files back.

use engine_core::seeded_rng;
use mesh::{export_stl, read_stl, TriangleMesh};
use procgen::{build_grid, design, ellipsoid, DesignRequest, ModelConfig, ModelKind, ParameterValue};

#[test]
fn sphere_round_trips_through_stl() {
    let grid = build_grid(None, None, 10).unwrap();
    let points = ellipsoid(&grid.a, &grid.b);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sphere.stl");
    export_stl(&path, &points, &grid.triangulation).unwrap();

    let facets = read_stl(&path).unwrap();
    assert_eq!(facets.len(), grid.triangulation.len());
    for (facet, triangle) in facets.iter().zip(&grid.triangulation.triangles) {
        for (vertex, &index) in facet.vertices.iter().zip(triangle) {
            let source = points.point(index as usize);
            assert!(
                (vertex.as_dvec3() - source).length() < 1e-6,
                "facet vertex {:?} differs from point {:?}",
                vertex,
                source
            );
        }
    }
}

#[test]
fn generated_designs_export_every_facet() {
    let mut config = ModelConfig::default();
    for spec in config.models.values_mut() {
        spec.parameters.insert("num_points".into(), ParameterValue::Fixed(16.0));
    }
    let dir = tempfile::tempdir().unwrap();

    for (seed, model) in [(10u64, ModelKind::RotationallySymmetric), (11, ModelKind::CylindricallySymmetric)] {
        let request = DesignRequest {
            model: Some(model),
            surface: None,
        };
        let d = design(&config, request, &mut seeded_rng(seed)).unwrap();
        let path = dir.path().join(format!("design_{}.stl", seed));
        export_stl(&path, &d.points, &d.grid.triangulation).unwrap();

        let bytes = std::fs::metadata(&path).unwrap().len();
        assert_eq!(bytes, 84 + 50 * d.triangle_count() as u64);

        let facets = read_stl(&path).unwrap();
        let mesh = TriangleMesh::new(&d.points, &d.grid.triangulation);
        assert_eq!(facets, mesh.facets().collect::<Vec<_>>());
    }
}
