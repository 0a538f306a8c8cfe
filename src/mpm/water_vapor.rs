//! Water vapor refractivity.
//!
//! Sums the MPM93 water vapor absorption lines into a complex refractivity
//! per frequency. Unlike the dry-air module there is no separate continuum
//! term; the far-wing continuum rides on the 1780 GHz pseudo-line of the
//! catalog.

use num_complex::Complex64;
use smallvec::SmallVec;

use super::lines::WaterLine;
use super::AirParams;

/// Water-vapor-driven component of the complex refractivity at `freq` GHz.
pub(crate) fn refractivity(freq: f64, air: &AirParams, catalog: &[WaterLine]) -> Complex64 {
    let &AirParams { e, pd, th, .. } = air;

    // Non-dispersive baseline
    let nv0 = (4.163 * th + 0.239) * e * th;

    let terms: SmallVec<[Complex64; 64]> = catalog
        .iter()
        .map(|line| {
            let s = line.b1 / line.f0 * e * th.powf(3.5) * f64::exp(line.b2 * (1.0 - th));
            let mut gamma =
                line.b3 / 1000.0 * (line.b4 * e * th.powf(line.b6) + pd * th.powf(line.b5));
            // Doppler broadening takes over below 0.7 mbar total pressure
            if pd + e < 0.7 {
                gamma = 0.535 * gamma
                    + f64::sqrt(0.217 * gamma.powi(2) + (1.46e-6 * gamma * th.sqrt()).powi(2));
            }

            let shape = 1.0 / Complex64::new(line.f0 - freq, -gamma)
                - 1.0 / Complex64::new(line.f0 + freq, gamma);
            s * (freq * shape)
        })
        .collect();

    nv0 + terms.iter().sum::<Complex64>()
}
