//! Model configuration and per-design parameter sampling.
//!
//! A [`ModelConfig`] describes, per model, which parameters exist and the
//! range each one may take. [`sample_parameters`] resolves it into one
//! concrete [`ParameterSet`] per design.

use std::collections::BTreeMap;
use std::fmt;

use engine_core::{DesignError, DesignResult};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::MAX_GRID_POINTS;
use crate::texture::TextureKind;

/// The generator families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelKind {
    /// Ellipsoid or torus parametrised by two polar angles.
    RotationallySymmetric,
    /// Radius profile over height and azimuth.
    CylindricallySymmetric,
}

impl ModelKind {
    pub const ALL: [ModelKind; 2] = [ModelKind::RotationallySymmetric, ModelKind::CylindricallySymmetric];

    /// Name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            ModelKind::RotationallySymmetric => "rsym",
            ModelKind::CylindricallySymmetric => "csym",
        }
    }

    /// Uniform binary draw.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Parameters a model cannot be generated without.
    pub fn required_parameters(self) -> &'static [&'static str] {
        match self {
            ModelKind::RotationallySymmetric => &[
                "num_points",
                "r_ratio",
                "theta_amplitude",
                "theta_frequency",
                "theta_duty_cycle",
                "phi_amplitude",
                "phi_frequency",
                "phi_duty_cycle",
                "x_scaler",
                "y_scaler",
                "z_scaler",
                "e1_twist",
                "e2_twist",
                "e3_twist",
            ],
            ModelKind::CylindricallySymmetric => &[
                "num_points",
                "height",
                "radius",
                "radius_offset",
                "phi_amplitude",
                "phi_frequency",
                "phi_duty_cycle",
                "z_amplitude",
                "z_frequency",
                "z_duty_cycle",
                "edginess",
                "twist",
                "tilt_x",
                "tilt_y",
            ],
        }
    }

    /// Axes that get their own texture type.
    pub fn texture_axes(self) -> &'static [TextureAxis] {
        match self {
            ModelKind::RotationallySymmetric => &[TextureAxis::Phi, TextureAxis::Theta],
            ModelKind::CylindricallySymmetric => &[TextureAxis::Phi, TextureAxis::Z],
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ModelKind {
    type Err = DesignError;

    fn from_str(s: &str) -> DesignResult<Self> {
        match s {
            "rsym" => Ok(ModelKind::RotationallySymmetric),
            "csym" => Ok(ModelKind::CylindricallySymmetric),
            other => Err(DesignError::UnknownModel(other.to_string())),
        }
    }
}

/// Coordinate along which a texture propagates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextureAxis {
    Theta,
    Phi,
    Z,
}

impl TextureAxis {
    /// Prefix of the axis's parameters (`<prefix>_amplitude`, ...).
    pub fn prefix(self) -> &'static str {
        match self {
            TextureAxis::Theta => "theta",
            TextureAxis::Phi => "phi",
            TextureAxis::Z => "z",
        }
    }
}

/// A configured parameter: a fixed value or a range to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParameterValue", into = "RawParameterValue")]
pub enum ParameterValue {
    Fixed(f64),
    Range(f64, f64),
}

/// On-disk shape of a parameter: a number or a `[low, high]` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawParameterValue {
    Scalar(f64),
    List(Vec<f64>),
}

impl TryFrom<RawParameterValue> for ParameterValue {
    type Error = String;

    fn try_from(raw: RawParameterValue) -> Result<Self, Self::Error> {
        match raw {
            RawParameterValue::Scalar(v) => Ok(ParameterValue::Fixed(v)),
            RawParameterValue::List(list) => match list.as_slice() {
                [low, high] => Ok(ParameterValue::Range(*low, *high)),
                other => Err(format!(
                    "a parameter range needs exactly two values, got {}",
                    other.len()
                )),
            },
        }
    }
}

impl From<ParameterValue> for RawParameterValue {
    fn from(value: ParameterValue) -> Self {
        match value {
            ParameterValue::Fixed(v) => RawParameterValue::Scalar(v),
            ParameterValue::Range(low, high) => RawParameterValue::List(vec![low, high]),
        }
    }
}

impl ParameterValue {
    fn validate(&self, name: &str) -> DesignResult<()> {
        match *self {
            ParameterValue::Fixed(v) if !v.is_finite() => Err(DesignError::InvalidConfig(format!(
                "parameter '{}' is not finite",
                name
            ))),
            ParameterValue::Range(low, high) if !low.is_finite() || !high.is_finite() => Err(
                DesignError::InvalidConfig(format!("parameter '{}' has a non-finite range", name)),
            ),
            ParameterValue::Range(low, high) if low > high => Err(DesignError::InvalidConfig(format!(
                "parameter '{}' has an inverted range [{}, {}]",
                name, low, high
            ))),
            _ => Ok(()),
        }
    }

    /// Resolve to a concrete value.
    pub fn sample(&self, rng: &mut impl Rng) -> f64 {
        match *self {
            ParameterValue::Fixed(v) => v,
            ParameterValue::Range(low, high) if low < high => rng.gen_range(low..high),
            ParameterValue::Range(low, _) => low,
        }
    }
}

/// Parameter ranges and texture count for one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub parameters: BTreeMap<String, ParameterValue>,
    pub num_texture_types: u32,
}

/// Parameter space of every model, keyed by model name (`rsym`, `csym`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub models: BTreeMap<String, ModelSpec>,
}

impl ModelConfig {
    /// Check every model entry; fails on the first problem found.
    pub fn validate(&self) -> DesignResult<()> {
        for (name, spec) in &self.models {
            let model: ModelKind = name.parse()?;
            spec.validate(model)?;
        }
        Ok(())
    }

    /// Spec for one model.
    pub fn model(&self, model: ModelKind) -> DesignResult<&ModelSpec> {
        self.models.get(model.name()).ok_or_else(|| {
            DesignError::InvalidConfig(format!("no parameter space configured for model '{}'", model))
        })
    }

    /// Models with a configured parameter space.
    pub fn available_models(&self) -> Vec<ModelKind> {
        ModelKind::ALL
            .into_iter()
            .filter(|m| self.models.contains_key(m.name()))
            .collect()
    }
}

impl ModelSpec {
    fn validate(&self, model: ModelKind) -> DesignResult<()> {
        if self.num_texture_types == 0 || self.num_texture_types > TextureKind::COUNT {
            return Err(DesignError::InvalidConfig(format!(
                "model '{}': num_texture_types must be in 1..={}, got {}",
                model,
                TextureKind::COUNT,
                self.num_texture_types
            )));
        }
        for name in model.required_parameters() {
            if !self.parameters.contains_key(*name) {
                return Err(DesignError::MissingParameter {
                    model: model.name().to_string(),
                    name: name.to_string(),
                });
            }
        }
        for (name, value) in &self.parameters {
            value.validate(name)?;
        }
        Ok(())
    }
}

/// One concrete draw from a model's parameter space.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    pub model: ModelKind,
    values: BTreeMap<String, f64>,
    texture_types: BTreeMap<TextureAxis, TextureKind>,
}

impl ParameterSet {
    /// An empty set, filled with [`ParameterSet::with`].
    pub fn new(model: ModelKind) -> Self {
        Self {
            model,
            values: BTreeMap::new(),
            texture_types: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.values.insert(name.to_string(), value);
        self
    }

    pub fn with_texture(mut self, axis: TextureAxis, kind: TextureKind) -> Self {
        self.texture_types.insert(axis, kind);
        self
    }

    /// Value of a parameter.
    pub fn get(&self, name: &str) -> DesignResult<f64> {
        self.values.get(name).copied().ok_or_else(|| DesignError::MissingParameter {
            model: self.model.name().to_string(),
            name: name.to_string(),
        })
    }

    /// Value of an optional parameter.
    pub fn get_or(&self, name: &str, default: f64) -> f64 {
        self.values.get(name).copied().unwrap_or(default)
    }

    /// Grid resolution, rounded to the nearest whole number.
    pub fn num_points(&self) -> DesignResult<usize> {
        let n = self.get("num_points")?;
        if !n.is_finite() || n < 0.0 {
            return Err(DesignError::InvalidConfig(format!("num_points must be positive, got {}", n)));
        }
        if n.round() > MAX_GRID_POINTS as f64 {
            return Err(DesignError::InvalidConfig(format!(
                "num_points must be at most {}, got {}",
                MAX_GRID_POINTS, n
            )));
        }
        Ok(n.round() as usize)
    }

    /// Waveform chosen for `axis`.
    pub fn texture_type(&self, axis: TextureAxis) -> DesignResult<TextureKind> {
        self.texture_types.get(&axis).copied().ok_or_else(|| DesignError::MissingParameter {
            model: self.model.name().to_string(),
            name: format!("{}_texture_type", axis.prefix()),
        })
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Draw one parameter set for `model` from `config`.
///
/// Ranges are drawn uniformly, fixed values are copied, then one texture
/// type is drawn per textured axis of the model. The whole config is
/// validated first, so an unknown model name fails even when another model
/// is requested.
pub fn sample_parameters(config: &ModelConfig, model: ModelKind, rng: &mut impl Rng) -> DesignResult<ParameterSet> {
    config.validate()?;
    let spec = config.model(model)?;

    let mut set = ParameterSet::new(model);
    for (name, value) in &spec.parameters {
        set.values.insert(name.clone(), value.sample(rng));
    }

    for &axis in model.texture_axes() {
        let index = rng.gen_range(0..spec.num_texture_types);
        set.texture_types.insert(axis, TextureKind::try_from(index)?);
    }

    log::debug!("sampled {} parameters for model {}", set.values.len(), model);
    for (name, value) in set.values() {
        log::trace!("  {} = {:.4}", name, value);
    }

    Ok(set)
}

fn range(low: f64, high: f64) -> ParameterValue {
    ParameterValue::Range(low, high)
}

fn fixed(value: f64) -> ParameterValue {
    ParameterValue::Fixed(value)
}

impl Default for ModelConfig {
    /// Parameter space used when no configuration file is supplied.
    fn default() -> Self {
        let rsym: BTreeMap<String, ParameterValue> = [
            ("num_points", fixed(128.0)),
            ("r_ratio", range(0.2, 0.6)),
            ("theta_amplitude", range(0.0, 0.15)),
            ("theta_frequency", range(1.0, 12.0)),
            ("theta_duty_cycle", range(0.2, 0.8)),
            ("phi_amplitude", range(0.0, 0.15)),
            ("phi_frequency", range(1.0, 12.0)),
            ("phi_duty_cycle", range(0.2, 0.8)),
            ("x_scaler", range(0.6, 1.2)),
            ("y_scaler", range(0.6, 1.2)),
            ("z_scaler", range(0.6, 1.2)),
            ("e1_twist", range(0.0, 0.5)),
            ("e2_twist", range(0.0, 0.1)),
            ("e3_twist", range(0.0, 0.1)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let csym: BTreeMap<String, ParameterValue> = [
            ("num_points", fixed(128.0)),
            ("height", range(1.0, 3.0)),
            ("radius", range(0.5, 1.0)),
            ("radius_offset", range(1.0, 3.0)),
            ("radius_variation", fixed(1.0)),
            ("phi_amplitude", range(0.0, 0.1)),
            ("phi_frequency", range(2.0, 16.0)),
            ("phi_duty_cycle", range(0.2, 0.8)),
            ("z_amplitude", range(0.0, 0.1)),
            ("z_frequency", range(2.0, 16.0)),
            ("z_duty_cycle", range(0.2, 0.8)),
            ("edginess", range(0.0, 4.0)),
            ("twist", range(0.0, 0.5)),
            ("tilt_x", range(0.0, 0.3)),
            ("tilt_y", range(0.0, 0.3)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let mut models = BTreeMap::new();
        models.insert(
            ModelKind::RotationallySymmetric.name().to_string(),
            ModelSpec {
                parameters: rsym,
                num_texture_types: TextureKind::COUNT,
            },
        );
        models.insert(
            ModelKind::CylindricallySymmetric.name().to_string(),
            ModelSpec {
                parameters: csym,
                num_texture_types: TextureKind::COUNT,
            },
        );
        Self { models }
    }
}
