//! Complex atmospheric refractivity of moist air at microwave and
//! millimeter-wave frequencies.
//!
//! This crate implements the MPM93 line-by-line propagation model (Liebe,
//! Hufford and Cotton, 1993). For a given ambient pressure, temperature and
//! relative humidity it sums the contributions of 44 oxygen and 35 water
//! vapor spectral lines into a complex refractivity per frequency, then
//! converts that refractivity into attenuation, phase dispersion, group
//! delay or an absorption coefficient.
//!
//! The real work happens in the model module; this file only holds the
//! public entry points.
//!
//! # Example
//!
//! ```
//! use mpm93::{mpm93, ModelOutput};
//!
//! let freqs: Vec<f64> = (20..=40).map(f64::from).collect();
//! let out = mpm93(&freqs, 1013.0, 15.0, 50.0, 0.0, 0.0, 0.0, "att").unwrap();
//! let ModelOutput::Values(att) = out else { unreachable!() };
//! assert_eq!(att.len(), freqs.len());
//! assert!(att.iter().all(|a| *a > 0.0));
//! ```
//!
//! The typed interface avoids the string tags and the vestigial arguments:
//!
//! ```
//! use mpm93::{Atmosphere, OutputKind};
//!
//! let atm = Atmosphere::new(1013.0, 15.0, 50.0);
//! let n = atm.refractivity(&[22.235]);
//! assert!(n[0].im > 0.0);
//! ```

mod error;
mod mpm;

pub use error::MpmError;
pub use mpm::lines::{
    load_oxygen_table, load_water_table, oxygen_lines, parse_oxygen_table, parse_water_table,
    water_lines, OxygenLine, WaterLine,
};
pub use mpm::{Atmosphere, ModelOutput, OutputKind};

use std::str::FromStr;

/// Evaluate the MPM93 model with the historical call signature.
///
/// `frequency` is in GHz, `pressure` in mbar, `temperature` in °C and
/// `relative_humidity` in %. `output_type` is one of the tags `ref`, `att`,
/// `dis`, `del` or `abs`; anything else fails with
/// [`MpmError::UnsupportedOutput`].
///
/// `cloud_water`, `cloud_water_extent` and `rain_rate` are accepted for
/// signature compatibility but ignored; they are reserved for future
/// liquid-water and rain terms.
///
/// An empty `frequency` slice returns [`ModelOutput::Scalar`] zero whatever
/// the output type.
#[allow(clippy::too_many_arguments)]
pub fn mpm93(
    frequency: &[f64],
    pressure: f64,
    temperature: f64,
    relative_humidity: f64,
    cloud_water: f64,
    cloud_water_extent: f64,
    rain_rate: f64,
    output_type: &str,
) -> Result<ModelOutput, MpmError> {
    let output = OutputKind::from_str(output_type)?;
    let atm = Atmosphere {
        pressure,
        temperature,
        relative_humidity,
        cloud_water,
        cloud_water_extent,
        rain_rate,
    };
    Ok(atm.evaluate(frequency, output))
}
