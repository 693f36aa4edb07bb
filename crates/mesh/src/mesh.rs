//! Indexed triangle mesh assembled from a design's point cloud.

use engine_core::{PointCloud, Triangulation};
use glam::Vec3;

use crate::facet::Facet;

/// Point positions plus the index triples that join them into facets.
///
/// Positions are stored in single precision, the resolution of STL files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Create a mesh from an aligned point cloud and its triangulation.
    pub fn new(points: &PointCloud, triangulation: &Triangulation) -> Self {
        debug_assert!(triangulation
            .max_index()
            .map_or(true, |max| (max as usize) < points.len()));

        let vertices = points.points().map(|p| p.as_vec3()).collect();
        Self {
            vertices,
            triangles: triangulation.triangles.clone(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.triangles.len()
    }

    /// Face soup: each facet carries its own copy of its three vertices.
    pub fn facets(&self) -> impl ExactSizeIterator<Item = Facet> + '_ {
        self.triangles
            .iter()
            .map(|&[i, j, k]| Facet::new([self.vertices[i as usize], self.vertices[j as usize], self.vertices[k as usize]]))
    }

    /// Axis-aligned bounding box, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(min, max), &v| (min.min(v), max.max(v))),
        )
    }

    /// Number of facets with zero area (collapsed seams, poles).
    pub fn degenerate_count(&self) -> usize {
        self.facets().filter(|f| f.doubled_area() == 0.0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> TriangleMesh {
        let points = PointCloud::new(vec![0.0, 1.0, 0.0, 1.0], vec![0.0, 0.0, 1.0, 1.0], vec![0.0; 4]);
        let triangulation = Triangulation::new(vec![[0, 1, 2], [1, 3, 2]]);
        TriangleMesh::new(&points, &triangulation)
    }

    #[test]
    fn facets_copy_indexed_vertices() {
        let mesh = quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        let facets: Vec<Facet> = mesh.facets().collect();
        assert_eq!(facets[1].vertices, [Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y]);
        assert!(facets.iter().all(|f| f.normal == Vec3::Z));
    }

    #[test]
    fn bounds_span_vertices() {
        let (min, max) = quad().bounds().unwrap();
        assert_eq!(min, Vec3::ZERO);
        assert_eq!(max, Vec3::new(1.0, 1.0, 0.0));
        assert!(TriangleMesh::default().bounds().is_none());
    }

    #[test]
    fn counts_degenerate_facets() {
        let points = PointCloud::new(vec![0.0, 0.0, 1.0], vec![0.0, 0.0, 0.0], vec![0.0, 0.0, 0.0]);
        let mesh = TriangleMesh::new(&points, &Triangulation::new(vec![[0, 1, 2]]));
        assert_eq!(mesh.degenerate_count(), 1);
    }
}
