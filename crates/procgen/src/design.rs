//! Design generation pipeline.
//!
//! **Seed-based replayability:** every random draw goes through the `rng`
//! handed to [`design`], so the same seed and configuration always produce
//! the same design.

use std::f64::consts::PI;

use engine_core::{DesignError, DesignResult, Grid, PointCloud};
use rand::Rng;

use crate::grid::build_grid;
use crate::params::{sample_parameters, ModelConfig, ModelKind, ParameterSet, TextureAxis};
use crate::shapes::{ellipsoid, torus, BaseSurface};
use crate::spline::modulator;
use crate::texture::Wave;
use crate::transform::{edginess, rescale_xy, tilt, twist};

/// What the caller wants pinned down; anything left `None` is drawn at random.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DesignRequest {
    pub model: Option<ModelKind>,
    /// Only used by the rotationally symmetric model.
    pub surface: Option<BaseSurface>,
}

/// One generated design: point cloud plus the grid it was mapped from.
#[derive(Debug, Clone)]
pub struct Design {
    pub model: ModelKind,
    /// Base surface of a rotationally symmetric design.
    pub surface: Option<BaseSurface>,
    pub parameters: ParameterSet,
    pub grid: Grid,
    pub points: PointCloud,
}

impl Design {
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.grid.triangulation.len()
    }
}

/// Sample a parameter set and generate a design from it.
pub fn design(config: &ModelConfig, request: DesignRequest, rng: &mut impl Rng) -> DesignResult<Design> {
    let model = match request.model {
        Some(model) => model,
        None => ModelKind::random(rng),
    };
    let parameters = sample_parameters(config, model, rng)?;
    generate(parameters, request.surface, rng)
}

/// Generate a design from an already resolved parameter set.
pub fn generate(parameters: ParameterSet, surface: Option<BaseSurface>, rng: &mut impl Rng) -> DesignResult<Design> {
    log::info!("Design type: {}", parameters.model.name().to_uppercase());
    match parameters.model {
        ModelKind::RotationallySymmetric => {
            let p = RotationalParams::resolve(&parameters)?;
            let (grid, points, surface) = design_rotational(&p, surface, rng)?;
            Ok(Design {
                model: parameters.model,
                surface: Some(surface),
                parameters,
                grid,
                points,
            })
        }
        ModelKind::CylindricallySymmetric => {
            let p = CylindricalParams::resolve(&parameters)?;
            let (grid, points) = design_cylindrical(&p, rng)?;
            Ok(Design {
                model: parameters.model,
                surface: None,
                parameters,
                grid,
                points,
            })
        }
    }
}

fn wave(parameters: &ParameterSet, axis: TextureAxis) -> DesignResult<Wave> {
    let prefix = axis.prefix();
    Ok(Wave {
        kind: parameters.texture_type(axis)?,
        amplitude: parameters.get(&format!("{}_amplitude", prefix))?,
        frequency: parameters.get(&format!("{}_frequency", prefix))?,
        duty_cycle: parameters.get(&format!("{}_duty_cycle", prefix))?,
    })
}

/// Parameters of the rotationally symmetric model.
#[derive(Debug, Clone)]
struct RotationalParams {
    num_points: usize,
    r_ratio: f64,
    theta: Wave,
    phi: Wave,
    scalers: [f64; 3],
    twists: [f64; 3],
}

impl RotationalParams {
    fn resolve(p: &ParameterSet) -> DesignResult<Self> {
        Ok(Self {
            num_points: p.num_points()?,
            r_ratio: p.get("r_ratio")?,
            theta: wave(p, TextureAxis::Theta)?,
            phi: wave(p, TextureAxis::Phi)?,
            scalers: [p.get("x_scaler")?, p.get("y_scaler")?, p.get("z_scaler")?],
            twists: [p.get("e1_twist")?, p.get("e2_twist")?, p.get("e3_twist")?],
        })
    }
}

/// Parameters of the cylindrically symmetric model.
#[derive(Debug, Clone)]
struct CylindricalParams {
    num_points: usize,
    height: f64,
    radius: f64,
    radius_offset: f64,
    radius_variation: f64,
    phi: Wave,
    z: Wave,
    edginess: f64,
    twist: f64,
    tilt: [f64; 2],
}

impl CylindricalParams {
    fn resolve(p: &ParameterSet) -> DesignResult<Self> {
        // The edginess exponent is 1 / (1 + e); it must stay positive.
        let edginess = p.get("edginess")?;
        if edginess <= -1.0 || !edginess.is_finite() {
            return Err(DesignError::InvalidConfig(format!("edginess must be greater than -1, got {}", edginess)));
        }
        Ok(Self {
            num_points: p.num_points()?,
            height: p.get("height")?,
            radius: p.get("radius")?,
            radius_offset: p.get("radius_offset")?,
            radius_variation: p.get_or("radius_variation", 1.0),
            phi: wave(p, TextureAxis::Phi)?,
            z: wave(p, TextureAxis::Z)?,
            edginess,
            twist: p.get("twist")?,
            tilt: [p.get("tilt_x")?, p.get("tilt_y")?],
        })
    }
}

/// Textured, twisted ellipsoid or torus.
fn design_rotational(
    p: &RotationalParams,
    surface: Option<BaseSurface>,
    rng: &mut impl Rng,
) -> DesignResult<(Grid, PointCloud, BaseSurface)> {
    let grid = build_grid(None, None, p.num_points)?;
    let (theta, phi) = (&grid.a, &grid.b);

    let surface = match surface {
        Some(surface) => surface,
        None => BaseSurface::random(rng),
    };
    log::debug!("base surface: {}", surface.name());

    let base = match surface {
        BaseSurface::Ellipsoid => ellipsoid(theta, phi),
        BaseSurface::Torus => torus(theta, phi, p.r_ratio),
    };

    // Each coordinate is textured along a randomly chosen angle.
    let mut coords = [base.x, base.y, base.z];
    for (coord, scaler) in coords.iter_mut().zip(p.scalers) {
        let (angle, wave) = if rng.gen_range(0..2) == 0 {
            (theta, &p.theta)
        } else {
            (phi, &p.phi)
        };
        let texture = wave.apply(angle, rng);
        coord
            .iter_mut()
            .zip(&texture)
            .for_each(|(c, t)| *c *= t * scaler);
    }
    let [x, y, z] = coords;

    // Rotations about e1, e2, e3.
    let n = p.num_points;
    let (x, y) = twist(&x, &y, p.twists[0], n, rng);
    let (x, z) = twist(&x, &z, p.twists[1], n, rng);
    let (y, z) = twist(&y, &z, p.twists[2], n, rng);

    Ok((grid, PointCloud::new(x, y, z), surface))
}

/// Radius profile over height, textured, reshaped and tilted.
fn design_cylindrical(p: &CylindricalParams, rng: &mut impl Rng) -> DesignResult<(Grid, PointCloud)> {
    let grid = build_grid(Some(p.height), None, p.num_points)?;
    let (z, phi) = (&grid.a, &grid.b);

    let mut profile = modulator(z, p.radius, p.radius_offset, rng);
    if p.radius_variation != 1.0 {
        let v = p.radius_variation;
        profile.iter_mut().for_each(|r| *r = p.radius + v * (*r - p.radius));
    }

    let phi_texture = p.phi.apply(phi, rng);
    let z_scale = p.height / (2.0 * p.radius * PI);
    let z_scaled: Vec<f64> = z.iter().map(|v| z_scale * v).collect();
    let z_texture = p.z.apply(&z_scaled, rng);
    for ((r, tp), tz) in profile.iter_mut().zip(&phi_texture).zip(&z_texture) {
        *r *= tp * tz;
    }

    let (x, y) = edginess(&profile, phi, p.edginess);
    let (x, y) = twist(&x, &y, p.twist, p.num_points, rng);
    let (x, y) = tilt(&x, &y, z, p.tilt[0], p.tilt[1], rng);
    let (x, y) = rescale_xy(&x, &y, p.radius);

    let points = PointCloud::new(x, y, grid.a.clone());
    Ok((grid, points))
}
