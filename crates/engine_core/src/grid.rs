//! Parameter-space sampling lattice and its triangulation.

/// Triangles over a flattened point set, as index triples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Triangulation {
    pub triangles: Vec<[u32; 3]>,
}

impl Triangulation {
    pub fn new(triangles: Vec<[u32; 3]>) -> Self {
        Self { triangles }
    }

    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Largest point index referenced by any triangle.
    pub fn max_index(&self) -> Option<u32> {
        self.triangles.iter().flatten().copied().max()
    }
}

/// A flattened `num_points x num_points` meshgrid of two axes `a` and `b`.
///
/// Point `i` sits at `(a[i], b[i])`; `a` varies fastest, so
/// `a[i] == a_axis[i % n]` and `b[i] == b_axis[i / n]`.
#[derive(Debug, Clone)]
pub struct Grid {
    pub a: Vec<f64>,
    pub b: Vec<f64>,
    pub num_points: usize,
    pub triangulation: Triangulation,
}

impl Grid {
    /// Total number of lattice points (`num_points²`).
    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }
}
