//! Parameter-space grid construction shared by every base shape.

use std::f64::consts::PI;

use engine_core::{DesignError, DesignResult, Grid, Triangulation};

/// Largest grid resolution whose `n * n` vertex indices still fit in `u32`.
pub const MAX_GRID_POINTS: usize = 1 << 16;

/// `num` evenly spaced samples from `start` to `stop`, both inclusive.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num)
                .map(|i| if i == num - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Build the flattened `num_points x num_points` grid and its triangulation.
///
/// Axis `a` spans `[0, 2π]` (or `[0, a_max]`), axis `b` spans `[-π, π]`
/// (or `[0, b_max]`). Both upper limits are stretched by `1 + 1/N` so the
/// periodic seam overlaps slightly instead of leaving a crack.
pub fn build_grid(a_max: Option<f64>, b_max: Option<f64>, num_points: usize) -> DesignResult<Grid> {
    if num_points < 3 {
        return Err(DesignError::DegenerateGrid { num_points });
    }
    if num_points > MAX_GRID_POINTS {
        return Err(DesignError::InvalidConfig(format!(
            "num_points must be at most {}, got {}",
            MAX_GRID_POINTS, num_points
        )));
    }

    let n = num_points;
    let stretch = 1.0 + 1.0 / n as f64;

    let a_axis = match a_max {
        None => linspace(0.0, 2.0 * PI * stretch, n),
        Some(max) => linspace(0.0, max * stretch, n),
    };
    let b_axis = match b_max {
        None => linspace(-PI, PI * stretch, n),
        Some(max) => linspace(0.0, max * stretch, n),
    };

    // Meshgrid, flattened row by row (a varies fastest)
    let mut a = Vec::with_capacity(n * n);
    let mut b = Vec::with_capacity(n * n);
    for &bv in &b_axis {
        for &av in &a_axis {
            a.push(av);
            b.push(bv);
        }
    }

    Ok(Grid {
        a,
        b,
        num_points: n,
        triangulation: lattice_triangulation(n),
    })
}

/// Delaunay triangulation of a regular `n x n` lattice.
///
/// Every lattice cell is cocircular, so splitting each cell along one
/// diagonal satisfies the empty-circumcircle condition. Triangles are
/// counter-clockwise in the (a, b) plane.
fn lattice_triangulation(n: usize) -> Triangulation {
    let mut triangles = Vec::with_capacity((n - 1) * (n - 1) * 2);
    for row in 0..(n - 1) {
        for col in 0..(n - 1) {
            let top_left = (row * n + col) as u32;
            let top_right = top_left + 1;
            let bottom_left = ((row + 1) * n + col) as u32;
            let bottom_right = bottom_left + 1;

            triangles.push([top_left, top_right, bottom_left]);
            triangles.push([top_right, bottom_right, bottom_left]);
        }
    }
    Triangulation::new(triangles)
}
