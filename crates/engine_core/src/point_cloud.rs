//! Point cloud aligned 1:1 with a grid.

use glam::DVec3;

/// Coordinates of every grid point after shape mapping and transforms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl PointCloud {
    /// Build from three coordinate arrays. They must have equal length.
    pub fn new(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Self {
        debug_assert!(x.len() == y.len() && y.len() == z.len());
        Self { x, y, z }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Position of point `i`.
    pub fn point(&self, i: usize) -> DVec3 {
        DVec3::new(self.x[i], self.y[i], self.z[i])
    }

    /// Iterate over all positions.
    pub fn points(&self) -> impl Iterator<Item = DVec3> + '_ {
        (0..self.len()).map(|i| self.point(i))
    }

    /// Axis-aligned bounding box, or `None` when empty.
    pub fn bounds(&self) -> Option<(DVec3, DVec3)> {
        let mut points = self.points();
        let first = points.next()?;
        Some(points.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_all_points() {
        let cloud = PointCloud::new(vec![-1.0, 2.0], vec![0.5, -3.0], vec![4.0, 1.0]);
        let (min, max) = cloud.bounds().unwrap();
        assert_eq!(min, DVec3::new(-1.0, -3.0, 1.0));
        assert_eq!(max, DVec3::new(2.0, 0.5, 4.0));
    }

    #[test]
    fn empty_cloud_has_no_bounds() {
        assert!(PointCloud::default().bounds().is_none());
    }
}
