//! MPM93 model evaluation.
//!
//! The spectroscopic work happens in the [`oxygen`] and [`water_vapor`]
//! submodules; this module holds the conversions around them: ambient state
//! to the physical intermediate quantities the line sums need, and summed
//! complex refractivity to the caller's requested output.

pub(crate) mod lines;
mod oxygen;
mod water_vapor;

#[cfg(test)]
mod tests;

use std::f64::consts::PI;
use std::str::FromStr;

use log::debug;
use num_complex::Complex64;

use self::lines::{OxygenLine, WaterLine};
use crate::error::MpmError;

/// Speed of light in m/s.
const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Specific gas constant for water vapor in J/(kg·K).
const R_VAPOR: f64 = 461.25;

/// Ambient atmospheric state for a model evaluation.
///
/// The model is meaningful only on its physical domain: `pressure` above the
/// water vapor partial pressure and `relative_humidity` within `0..=100`.
/// Out-of-range values are not rejected; they propagate into numerically
/// degenerate results, as in the published model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    /// Air pressure in mbar.
    pub pressure: f64,
    /// Air temperature in °C.
    pub temperature: f64,
    /// Relative humidity in %.
    pub relative_humidity: f64,
    /// Suspended liquid water content. Reserved for a future liquid-water
    /// term; accepted and ignored.
    pub cloud_water: f64,
    /// Liquid water extent. Reserved; accepted and ignored.
    pub cloud_water_extent: f64,
    /// Rain rate. Reserved for a future rain term; accepted and ignored.
    pub rain_rate: f64,
}

/// Physical intermediate quantities derived from an [`Atmosphere`].
///
/// These are what the line summations actually consume. Both modules share
/// one set of values per evaluation; there is no other coupling between
/// them.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AirParams {
    /// Partial pressure of water vapor in mbar.
    pub e: f64,
    /// Partial pressure of dry air in mbar.
    pub pd: f64,
    /// Reciprocal temperature, 300 / T(K).
    pub th: f64,
    /// Water vapor density in g/m³.
    pub rho_v: f64,
}

impl AirParams {
    pub fn new(atm: &Atmosphere) -> Self {
        let tk = atm.temperature + 273.15;
        let th = 300.0 / tk;
        // Water vapor saturation pressure
        let es = 2.408e11 * th.powi(5) * f64::exp(-22.644 * th);
        let e = es * atm.relative_humidity / 100.0;
        let pd = atm.pressure - e;
        let rho_v = 1e5 * e / (R_VAPOR * tk);
        Self { e, pd, th, rho_v }
    }
}

impl Atmosphere {
    /// State from pressure (mbar), temperature (°C) and relative humidity
    /// (%), with the reserved extension fields zeroed.
    pub fn new(pressure: f64, temperature: f64, relative_humidity: f64) -> Self {
        Self {
            pressure,
            temperature,
            relative_humidity,
            cloud_water: 0.0,
            cloud_water_extent: 0.0,
            rain_rate: 0.0,
        }
    }

    /// Water vapor density in g/m³ for this state.
    pub fn vapor_density(&self) -> f64 {
        AirParams::new(self).rho_v
    }

    /// Complex refractivity per frequency (GHz), using the built-in MPM93
    /// line catalogs.
    ///
    /// The dry-air and water-vapor contributions are computed independently
    /// and summed. Output order follows input order.
    pub fn refractivity(&self, frequency: &[f64]) -> Vec<Complex64> {
        self.refractivity_with(frequency, lines::oxygen_lines(), lines::water_lines())
    }

    /// Complex refractivity per frequency over substituted line catalogs.
    pub fn refractivity_with(
        &self,
        frequency: &[f64],
        oxygen: &[OxygenLine],
        water: &[WaterLine],
    ) -> Vec<Complex64> {
        let air = AirParams::new(self);
        debug!("evaluating refractivity at {} frequencies", frequency.len());
        frequency
            .iter()
            .map(|&f| {
                oxygen::refractivity(f, &air, oxygen) + water_vapor::refractivity(f, &air, water)
            })
            .collect()
    }

    /// Evaluate the model and convert to the requested output kind.
    ///
    /// An empty `frequency` slice short-circuits to [`ModelOutput::Scalar`]
    /// zero whatever the kind.
    pub fn evaluate(&self, frequency: &[f64], output: OutputKind) -> ModelOutput {
        if frequency.is_empty() {
            return ModelOutput::Scalar(0.0);
        }
        convert(frequency, self.refractivity(frequency), output)
    }

    /// Evaluate at a single frequency, as a one-element sequence.
    pub fn evaluate_scalar(&self, frequency: f64, output: OutputKind) -> ModelOutput {
        self.evaluate(&[frequency], output)
    }
}

/// The conversions the model can apply to the summed refractivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Raw complex refractivity (tag `ref`).
    Refractivity,
    /// Attenuation in dB/km (tag `att`).
    Attenuation,
    /// Phase dispersion in deg/km (tag `dis`).
    Dispersion,
    /// Group delay in ps/km (tag `del`).
    GroupDelay,
    /// Absorption coefficient in 1/m (tag `abs`).
    Absorption,
}

impl OutputKind {
    /// The wire tag for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            OutputKind::Refractivity => "ref",
            OutputKind::Attenuation => "att",
            OutputKind::Dispersion => "dis",
            OutputKind::GroupDelay => "del",
            OutputKind::Absorption => "abs",
        }
    }
}

impl FromStr for OutputKind {
    type Err = MpmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ref" => Ok(OutputKind::Refractivity),
            "att" => Ok(OutputKind::Attenuation),
            "dis" => Ok(OutputKind::Dispersion),
            "del" => Ok(OutputKind::GroupDelay),
            "abs" => Ok(OutputKind::Absorption),
            other => Err(MpmError::UnsupportedOutput(other.to_string())),
        }
    }
}

/// Result of a model evaluation.
///
/// The shape depends on the requested [`OutputKind`] and on the input: an
/// empty frequency sequence collapses to [`ModelOutput::Scalar`] zero
/// regardless of the kind, so callers wanting a uniform shape should avoid
/// empty inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    /// Fixed scalar produced by an empty frequency input.
    Scalar(f64),
    /// Complex refractivity per frequency ([`OutputKind::Refractivity`]).
    Refractivity(Vec<Complex64>),
    /// Converted real quantity per frequency (all other kinds).
    Values(Vec<f64>),
}

impl ModelOutput {
    /// The real-valued sequence, if this output holds one.
    pub fn values(&self) -> Option<&[f64]> {
        match self {
            ModelOutput::Values(v) => Some(v),
            _ => None,
        }
    }

    /// The complex refractivity sequence, if this output holds one.
    pub fn refractivity(&self) -> Option<&[Complex64]> {
        match self {
            ModelOutput::Refractivity(n) => Some(n),
            _ => None,
        }
    }
}

/// Map the summed refractivity to the requested physical quantity.
fn convert(frequency: &[f64], n: Vec<Complex64>, output: OutputKind) -> ModelOutput {
    let transform: fn(f64, Complex64) -> f64 = match output {
        OutputKind::Refractivity => return ModelOutput::Refractivity(n),
        OutputKind::Attenuation => |f, n| 0.1820 * f * n.im,
        OutputKind::Dispersion => |f, n| 1.2008 * f * n.re,
        OutputKind::GroupDelay => |_, n| 3.3356 * n.re,
        OutputKind::Absorption => |f, n| 4.0 * PI * 1000.0 / SPEED_OF_LIGHT * f * n.im,
    };
    ModelOutput::Values(
        frequency
            .iter()
            .zip(&n)
            .map(|(&f, &n)| transform(f, n))
            .collect(),
    )
}
