//! Undistorted base surfaces in polar-angle parametrisation.

use engine_core::PointCloud;
use rand::Rng;

/// Base surface for the rotationally symmetric model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseSurface {
    Ellipsoid,
    Torus,
}

impl BaseSurface {
    /// Uniform binary draw.
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.gen_range(0..2) == 0 {
            BaseSurface::Ellipsoid
        } else {
            BaseSurface::Torus
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BaseSurface::Ellipsoid => "ellipsoid",
            BaseSurface::Torus => "torus",
        }
    }
}

impl std::str::FromStr for BaseSurface {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ellipsoid" => Ok(BaseSurface::Ellipsoid),
            "torus" => Ok(BaseSurface::Torus),
            other => Err(format!("unknown surface '{}' (expected 'ellipsoid' or 'torus')", other)),
        }
    }
}

/// Unit ellipsoid: `x = cos φ sin θ, y = sin φ sin θ, z = cos θ`.
pub fn ellipsoid(theta: &[f64], phi: &[f64]) -> PointCloud {
    let (mut x, mut y, mut z) = with_capacity3(theta.len());
    for (&t, &p) in theta.iter().zip(phi) {
        x.push(p.cos() * t.sin());
        y.push(p.sin() * t.sin());
        z.push(t.cos());
    }
    PointCloud::new(x, y, z)
}

/// Torus with tube-to-ring ratio `r_ratio`.
pub fn torus(theta: &[f64], phi: &[f64], r_ratio: f64) -> PointCloud {
    let (mut x, mut y, mut z) = with_capacity3(theta.len());
    for (&t, &p) in theta.iter().zip(phi) {
        let ring = 1.0 + r_ratio * t.cos();
        x.push(ring * p.cos());
        y.push(ring * p.sin());
        z.push(t.sin());
    }
    PointCloud::new(x, y, z)
}

fn with_capacity3(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    (Vec::with_capacity(n), Vec::with_capacity(n), Vec::with_capacity(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::build_grid;

    #[test]
    fn ellipsoid_points_lie_on_unit_sphere() {
        let grid = build_grid(None, None, 12).unwrap();
        let cloud = ellipsoid(&grid.a, &grid.b);
        assert_eq!(cloud.len(), grid.len());
        for p in cloud.points() {
            assert!((p.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn torus_points_lie_on_tube() {
        let grid = build_grid(None, None, 12).unwrap();
        let r = 0.4;
        let cloud = torus(&grid.a, &grid.b, r);
        for p in cloud.points() {
            // Distance from the unit ring in the xy plane.
            let ring = (p.x * p.x + p.y * p.y).sqrt() - 1.0;
            // z = sin θ while the ring offset is r cos θ, so the tube is elliptic.
            let residual = (ring / r).powi(2) + p.z.powi(2) - 1.0;
            assert!(residual.abs() < 1e-9, "residual {}", residual);
        }
    }

    #[test]
    fn surface_names_parse() {
        assert_eq!("Torus".parse::<BaseSurface>().unwrap(), BaseSurface::Torus);
        assert_eq!(
            BaseSurface::Ellipsoid.name().parse::<BaseSurface>().unwrap(),
            BaseSurface::Ellipsoid
        );
        assert!("cube".parse::<BaseSurface>().is_err());
    }
}
