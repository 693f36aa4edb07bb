//! Periodic surface textures.
//!
//! A texture is `1 + amplitude * waveform(frequency * t)`, applied
//! multiplicatively to a base radius or coordinate.

use std::f64::consts::{PI, TAU};

use engine_core::{DesignError, DesignResult};
use rand::Rng;

/// Available waveforms, indexed 0..=3 in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Sine,
    Sawtooth,
    Square,
    GaussPulse,
}

impl TextureKind {
    pub const COUNT: u32 = 4;

    pub fn index(self) -> u32 {
        match self {
            TextureKind::Sine => 0,
            TextureKind::Sawtooth => 1,
            TextureKind::Square => 2,
            TextureKind::GaussPulse => 3,
        }
    }
}

impl TryFrom<u32> for TextureKind {
    type Error = DesignError;

    fn try_from(index: u32) -> DesignResult<Self> {
        match index {
            0 => Ok(TextureKind::Sine),
            1 => Ok(TextureKind::Sawtooth),
            2 => Ok(TextureKind::Square),
            3 => Ok(TextureKind::GaussPulse),
            other => Err(DesignError::UnknownTextureType(other)),
        }
    }
}

/// Position within the 2π period, in `[0, 2π)`.
fn phase(t: f64) -> f64 {
    // rem_euclid rounds to exactly 2π for tiny negative t
    let phase = t.rem_euclid(TAU);
    if phase >= TAU {
        0.0
    } else {
        phase
    }
}

/// Sawtooth with period 2π rising from -1 to 1 over the first `width` of
/// the period and falling back over the rest.
pub fn sawtooth(t: f64, width: f64) -> f64 {
    let phase = phase(t);
    if phase < width * TAU {
        phase / (PI * width) - 1.0
    } else {
        (PI * (width + 1.0) - phase) / (PI * (1.0 - width))
    }
}

/// Square wave with period 2π: +1 for the first `duty` of the period, else -1.
pub fn square(t: f64, duty: f64) -> f64 {
    if phase(t) < duty * TAU {
        1.0
    } else {
        -1.0
    }
}

/// In-phase Gaussian-modulated sinusoid with centre frequency `fc`,
/// fractional bandwidth 0.5 measured at -6 dB.
pub fn gauss_pulse(t: f64, fc: f64) -> f64 {
    const BANDWIDTH: f64 = 0.5;
    const REFERENCE_DB: f64 = -6.0;

    let reference = 10f64.powf(REFERENCE_DB / 20.0);
    let a = -(PI * fc * BANDWIDTH).powi(2) / (4.0 * reference.ln());
    (-a * t * t).exp() * (TAU * fc * t).cos()
}

/// Texture parameters for one driving axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub kind: TextureKind,
    pub amplitude: f64,
    pub frequency: f64,
    pub duty_cycle: f64,
}

impl Wave {
    /// Texture values for every sample in `array`.
    pub fn apply(&self, array: &[f64], rng: &mut impl Rng) -> Vec<f64> {
        texture(
            array,
            self.kind,
            self.amplitude,
            self.frequency,
            self.duty_cycle,
            rng,
        )
    }
}

/// Periodic texture aligned 1:1 with `array`.
///
/// The gaussian pulse draws its centre frequency from `2..20` on every call,
/// independently of `frequency`. Duty cycles outside `[0, 1]` are clamped.
pub fn texture(
    array: &[f64],
    kind: TextureKind,
    amplitude: f64,
    frequency: f64,
    duty_cycle: f64,
    rng: &mut impl Rng,
) -> Vec<f64> {
    let duty = duty_cycle.clamp(0.0, 1.0);
    if duty != duty_cycle {
        log::warn!("duty cycle {} clamped to {}", duty_cycle, duty);
    }

    let waveform: Box<dyn Fn(f64) -> f64> = match kind {
        TextureKind::Sine => Box::new(f64::sin),
        TextureKind::Sawtooth => Box::new(move |t| sawtooth(t, duty)),
        TextureKind::Square => Box::new(move |t| square(t, duty)),
        TextureKind::GaussPulse => {
            let fc = rng.gen_range(2..20) as f64;
            Box::new(move |t| gauss_pulse(t, fc))
        }
    };

    array
        .iter()
        .map(|&t| 1.0 + amplitude * waveform(frequency * t))
        .collect()
}
