//! Random B-spline modulation.
//!
//! A spline basis with a random degree and knot count is fitted over the
//! range of the input values; each basis function gets a random weight in
//! `[-1, 1]`. The weighted sum is a smooth but unpredictable curve over the
//! input, which every distortion stage uses as its source of "organic"
//! variation.

use rand::Rng;

/// Upper bounds for the random spline draws.
///
/// Keep `order_max` below ~50 and `knots_max` below ~10: the number of basis
/// functions grows with both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineOptions {
    /// Degree is drawn from `0..order_max`.
    pub order_max: usize,
    /// Knot count is drawn from `2..knots_max`.
    pub knots_max: usize,
    /// Constant added to the modulation.
    pub offset: f64,
}

impl Default for SplineOptions {
    fn default() -> Self {
        Self {
            order_max: 30,
            knots_max: 7,
            offset: 0.0,
        }
    }
}

impl SplineOptions {
    pub fn with_offset(offset: f64) -> Self {
        Self {
            offset,
            ..Default::default()
        }
    }
}

/// Uniform B-spline basis over `[min, max]`.
///
/// `knots` interior knots are spread evenly over the range and `degree`
/// extra knots are added past each end with the same spacing, giving
/// `knots + degree - 1` basis functions. Inputs outside the range are
/// clamped, which holds the basis constant there.
#[derive(Debug, Clone)]
pub struct SplineBasis {
    degree: usize,
    knots: usize,
    min: f64,
    max: f64,
    spacing: f64,
    knot_vector: Vec<f64>,
}

impl SplineBasis {
    pub fn new(min: f64, max: f64, knots: usize, degree: usize) -> Self {
        let knots = knots.max(2);
        // A flat input still needs a usable interval.
        let max = if max > min { max } else { min + 1.0 };
        let spacing = (max - min) / (knots - 1) as f64;
        let first = min - degree as f64 * spacing;
        let knot_vector = (0..knots + 2 * degree)
            .map(|i| first + i as f64 * spacing)
            .collect();

        Self {
            degree,
            knots,
            min,
            max,
            spacing,
            knot_vector,
        }
    }

    /// Fit the basis to the range of `values`.
    pub fn fit(values: &[f64], knots: usize, degree: usize) -> Self {
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if values.is_empty() {
            return Self::new(0.0, 1.0, knots, degree);
        }
        Self::new(min, max, knots, degree)
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of basis functions.
    pub fn len(&self) -> usize {
        self.knots + self.degree - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evaluate the `degree + 1` non-zero basis functions at `x`.
    ///
    /// Returns the index of the first non-zero function and their values.
    pub fn evaluate(&self, x: f64) -> (usize, Vec<f64>) {
        let p = self.degree;
        let x = x.clamp(self.min, self.max);

        // Knot span containing x; the right end belongs to the last span.
        let interval = ((x - self.min) / self.spacing).floor() as usize;
        let span = p + interval.min(self.knots - 2);

        let t = &self.knot_vector;
        let mut n = vec![0.0; p + 1];
        let mut left = vec![0.0; p + 1];
        let mut right = vec![0.0; p + 1];
        n[0] = 1.0;

        for j in 1..=p {
            left[j] = x - t[span + 1 - j];
            right[j] = t[span + j] - x;
            let mut saved = 0.0;
            for r in 0..j {
                let temp = n[r] / (right[r + 1] + left[j - r]);
                n[r] = saved + right[r + 1] * temp;
                saved = left[j - r] * temp;
            }
            n[j] = saved;
        }

        (span - p, n)
    }

    /// Weighted sum of the basis at `x`.
    pub fn combine(&self, x: f64, coefficients: &[f64]) -> f64 {
        let (first, values) = self.evaluate(x);
        values
            .iter()
            .zip(&coefficients[first..])
            .map(|(b, c)| b * c)
            .sum()
    }
}

/// Random smooth modulation aligned 1:1 with `values`.
pub fn spline_modulate(values: &[f64], options: SplineOptions, rng: &mut impl Rng) -> Vec<f64> {
    debug_assert!(options.order_max >= 1 && options.knots_max >= 3);
    let degree = rng.gen_range(0..options.order_max.max(1));
    let knots = rng.gen_range(2..options.knots_max.max(3));

    let basis = SplineBasis::fit(values, knots, degree);
    let coefficients: Vec<f64> = (0..basis.len()).map(|_| rng.gen_range(-1.0..=1.0)).collect();

    log::trace!(
        "spline modulation: degree {}, {} knots, {} basis functions",
        degree,
        knots,
        basis.len()
    );

    values
        .iter()
        .map(|&v| basis.combine(v, &coefficients) + options.offset)
        .collect()
}

/// Spline modulation normalised so its maximum equals `scaler`.
///
/// A modulation whose maximum is zero cannot be normalised; it becomes the
/// constant `scaler`.
pub fn modulator(values: &[f64], scaler: f64, offset: f64, rng: &mut impl Rng) -> Vec<f64> {
    let mut m = spline_modulate(values, SplineOptions::with_offset(offset), rng);
    let max = m.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max.abs() <= f64::EPSILON {
        log::warn!("spline modulator peaked at zero, using a constant profile");
        m.iter_mut().for_each(|v| *v = scaler);
    } else {
        m.iter_mut().for_each(|v| *v = *v / max * scaler);
    }
    m
}
