//! Geometric distortions applied on top of the textured base shape.
//!
//! Every transform is a pure function from coordinate arrays to new
//! coordinate arrays of the same length.

use std::f64::consts::TAU;

use glam::{DMat2, DVec2};
use rand::Rng;

use crate::grid::linspace;
use crate::spline::{spline_modulate, SplineOptions};

/// Lamé-curve reshaping of a polar profile.
///
/// `edginess == 0` is a plain circle; larger values push the outline towards
/// a square. Requires `edginess > -1`.
pub fn edginess(radius: &[f64], angle: &[f64], edginess: f64) -> (Vec<f64>, Vec<f64>) {
    let exponent = 1.0 / (1.0 + edginess);
    radius
        .iter()
        .zip(angle)
        .map(|(&r, &a)| {
            let (s, c) = a.sin_cos();
            (
                r * c.signum() * c.abs().powf(exponent),
                r * s.signum() * s.abs().powf(exponent),
            )
        })
        .unzip()
}

/// Angle profile of a twist: a ramp from 0 to `2π·frequency` over one grid
/// row, tiled across every row so it matches the flattened point count.
pub fn twist_profile(frequency: f64, num_points: usize, len: usize, sign: f64) -> Vec<f64> {
    let ramp = linspace(0.0, TAU * frequency, num_points);
    (0..len).map(|i| sign * ramp[i % num_points]).collect()
}

/// Rotate each `(p[i], q[i])` pair by `alpha[i]`.
pub fn rotate_pairs(p: &[f64], q: &[f64], alpha: &[f64]) -> (Vec<f64>, Vec<f64>) {
    p.iter()
        .zip(q)
        .zip(alpha)
        .map(|((&p, &q), &a)| {
            let v = DMat2::from_angle(a) * DVec2::new(p, q);
            (v.x, v.y)
        })
        .unzip()
}

/// Random twist of a coordinate pair.
///
/// Two coin flips decide whether the pair is twisted at all and whether the
/// angle profile is replaced by its spline modulation. Both flips are always
/// drawn; a zero frequency leaves the pair unchanged.
pub fn twist(
    p: &[f64],
    q: &[f64],
    frequency: f64,
    num_points: usize,
    rng: &mut impl Rng,
) -> (Vec<f64>, Vec<f64>) {
    let rotate = rng.gen_bool(0.5);
    let fuzzy = rng.gen_bool(0.5);

    if !rotate || frequency == 0.0 || num_points == 0 {
        return (p.to_vec(), q.to_vec());
    }

    let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    let mut alpha = twist_profile(frequency, num_points, p.len(), sign);
    if fuzzy {
        alpha = spline_modulate(&alpha, SplineOptions::default(), rng);
    }
    log::debug!(
        "twist: frequency {:.3}, sign {}, fuzzy {}",
        frequency,
        sign,
        fuzzy
    );

    rotate_pairs(p, q, &alpha)
}

/// Spline-driven shift of `x` and `y` along `z`.
pub fn tilt(
    x: &[f64],
    y: &[f64],
    z: &[f64],
    tilt_x: f64,
    tilt_y: f64,
    rng: &mut impl Rng,
) -> (Vec<f64>, Vec<f64>) {
    let shift_x = spline_modulate(z, SplineOptions::default(), rng);
    let shift_y = spline_modulate(z, SplineOptions::default(), rng);

    let x = x.iter().zip(&shift_x).map(|(v, s)| v + tilt_x * s).collect();
    let y = y.iter().zip(&shift_y).map(|(v, s)| v + tilt_y * s).collect();
    (x, y)
}

/// Scale `x` and `y` independently so that `max|x| == max|y| == scaler`.
/// An axis that is identically zero is left as is.
pub fn rescale_xy(x: &[f64], y: &[f64], scaler: f64) -> (Vec<f64>, Vec<f64>) {
    (rescale(x, scaler), rescale(y, scaler))
}

fn rescale(values: &[f64], scaler: f64) -> Vec<f64> {
    let peak = values.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    if peak == 0.0 {
        return values.to_vec();
    }
    let factor = scaler / peak;
    values.iter().map(|v| v * factor).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::seeded_rng;
    use std::f64::consts::PI;

    fn peak(values: &[f64]) -> f64 {
        values.iter().fold(0.0f64, |m, v| m.max(v.abs()))
    }

    #[test]
    fn zero_edginess_is_a_circle() {
        let angle = linspace(-PI, PI, 73);
        let radius: Vec<f64> = (0..angle.len()).map(|i| 0.5 + i as f64 * 0.1).collect();
        let (x, y) = edginess(&radius, &angle, 0.0);
        for i in 0..angle.len() {
            assert!((x[i] - radius[i] * angle[i].cos()).abs() < 1e-12);
            assert!((y[i] - radius[i] * angle[i].sin()).abs() < 1e-12);
        }
    }

    #[test]
    fn edginess_pushes_diagonals_outward() {
        let angle = [PI / 4.0];
        let (round, _) = edginess(&[1.0], &angle, 0.0);
        let (sharp, _) = edginess(&[1.0], &angle, 3.0);
        assert!(sharp[0] > round[0]);
        assert!(sharp[0] < 1.0);
    }

    #[test]
    fn rescale_hits_target_peak() {
        let x = vec![0.1, -2.5, 1.0];
        let y = vec![3.0, 0.2, -0.7];
        let (x, y) = rescale_xy(&x, &y, 1.75);
        assert!((peak(&x) - 1.75).abs() < 1e-12);
        assert!((peak(&y) - 1.75).abs() < 1e-12);
    }

    #[test]
    fn rescale_leaves_zero_axis_alone() {
        let (x, y) = rescale_xy(&[0.0, 0.0], &[1.0, -2.0], 4.0);
        assert_eq!(x, vec![0.0, 0.0]);
        assert_eq!(y, vec![2.0, -4.0]);
    }

    #[test]
    fn twist_profile_is_tiled_per_row() {
        let n = 5;
        let alpha = twist_profile(1.0, n, n * n, -1.0);
        assert_eq!(alpha.len(), n * n);
        for i in 0..n * n {
            assert_eq!(alpha[i], alpha[i % n]);
        }
        assert!((alpha[n - 1] + TAU).abs() < 1e-12);
    }

    #[test]
    fn rotation_preserves_length() {
        let p = vec![1.0, 0.0, 3.0];
        let q = vec![0.0, 2.0, -4.0];
        let (rp, rq) = rotate_pairs(&p, &q, &[0.3, 1.2, -2.0]);
        for i in 0..3 {
            let before = p[i].hypot(q[i]);
            let after = rp[i].hypot(rq[i]);
            assert!((before - after).abs() < 1e-12);
        }
        let (rp, rq) = rotate_pairs(&[1.0], &[0.0], &[PI / 2.0]);
        assert!(rp[0].abs() < 1e-12 && (rq[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_frequency_twist_is_identity() {
        let mut rng = seeded_rng(4);
        let p = linspace(-1.0, 1.0, 16);
        let q = linspace(2.0, 3.0, 16);
        for _ in 0..8 {
            let (tp, tq) = twist(&p, &q, 0.0, 4, &mut rng);
            assert_eq!(tp, p);
            assert_eq!(tq, q);
        }
    }

    #[test]
    fn twist_preserves_radius_in_plane() {
        let mut rng = seeded_rng(21);
        let n = 6;
        let p: Vec<f64> = (0..n * n).map(|i| (i as f64 * 0.37).cos()).collect();
        let q: Vec<f64> = (0..n * n).map(|i| (i as f64 * 0.37).sin() * 2.0).collect();
        for _ in 0..8 {
            let (tp, tq) = twist(&p, &q, 1.5, n, &mut rng);
            assert_eq!(tp.len(), p.len());
            for i in 0..p.len() {
                assert!((p[i].hypot(q[i]) - tp[i].hypot(tq[i])).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn zero_tilt_keeps_coordinates() {
        let mut rng = seeded_rng(8);
        let x = vec![1.0, 2.0, 3.0];
        let y = vec![-1.0, -2.0, -3.0];
        let z = vec![0.0, 0.5, 1.0];
        let (tx, ty) = tilt(&x, &y, &z, 0.0, 0.0, &mut rng);
        assert_eq!(tx, x);
        assert_eq!(ty, y);
    }

    #[test]
    fn tilt_shift_depends_only_on_height() {
        let x = vec![1.0, -4.0, 0.5, 2.0, -1.5, 3.0];
        let y = vec![0.0, 2.5, -3.0, 1.0, 4.0, -0.5];
        let z = vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0];
        let (tx, ty) = tilt(&x, &y, &z, 0.5, -0.25, &mut seeded_rng(21));

        let mut replay = seeded_rng(21);
        let shift_x = spline_modulate(&z, SplineOptions::default(), &mut replay);
        let shift_y = spline_modulate(&z, SplineOptions::default(), &mut replay);
        for i in 0..x.len() {
            assert!((tx[i] - (x[i] + 0.5 * shift_x[i])).abs() < 1e-12);
            assert!((ty[i] - (y[i] - 0.25 * shift_y[i])).abs() < 1e-12);
        }

        for (i, j) in [(0, 1), (2, 3), (4, 5)] {
            assert!(((tx[i] - x[i]) - (tx[j] - x[j])).abs() < 1e-12, "x shift differs at z={}", z[i]);
            assert!(((ty[i] - y[i]) - (ty[j] - y[j])).abs() < 1e-12, "y shift differs at z={}", z[i]);
        }
    }
}
