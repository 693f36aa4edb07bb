//! Face-soup facets as stored in STL files.

use glam::Vec3;

/// One triangle with its own copy of the three vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facet {
    pub normal: Vec3,
    pub vertices: [Vec3; 3],
}

impl Facet {
    /// Facet with the normal computed from the winding order.
    pub fn new(vertices: [Vec3; 3]) -> Self {
        Self {
            normal: face_normal(vertices),
            vertices,
        }
    }

    /// Twice the facet area.
    pub fn doubled_area(&self) -> f32 {
        let [v0, v1, v2] = self.vertices;
        (v1 - v0).cross(v2 - v0).length()
    }
}

/// Unit normal of a counter-clockwise triangle; zero when degenerate.
pub fn face_normal([v0, v1, v2]: [Vec3; 3]) -> Vec3 {
    (v1 - v0).cross(v2 - v0).normalize_or_zero()
}

impl From<&Facet> for stl_io::Triangle {
    fn from(facet: &Facet) -> Self {
        stl_io::Triangle {
            normal: stl_io::Normal::new(facet.normal.to_array()),
            vertices: facet.vertices.map(|v| stl_io::Vertex::new(v.to_array())),
        }
    }
}

impl From<&stl_io::Triangle> for Facet {
    fn from(triangle: &stl_io::Triangle) -> Self {
        // stl_io::Vector keeps its components in `.0`
        let [v0, v1, v2] = &triangle.vertices;
        Self {
            normal: Vec3::from_array(triangle.normal.0),
            vertices: [v0, v1, v2].map(|v| Vec3::from_array(v.0)),
        }
    }
}
