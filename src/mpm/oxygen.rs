//! Dry-air (oxygen) refractivity.
//!
//! Sums the MPM93 oxygen absorption lines plus the non-resonant dry-air
//! terms into a complex refractivity per frequency.

use num_complex::Complex64;
use smallvec::SmallVec;

use super::lines::OxygenLine;
use super::AirParams;

/// Oxygen-driven component of the complex refractivity at `freq` GHz.
///
/// Every line in `catalog` contributes; there is no pruning by distance
/// from the line center.
pub(crate) fn refractivity(freq: f64, air: &AirParams, catalog: &[OxygenLine]) -> Complex64 {
    let &AirParams { e, pd, th, .. } = air;

    // Non-dispersive baseline
    let nd0 = 0.2588 * pd * th;

    let terms: SmallVec<[Complex64; 64]> = catalog
        .iter()
        .map(|line| {
            // Line strength, with the 1e-6 correction factor
            let s = 1e-6 * line.a1 / line.f0 * pd * th.powi(3) * f64::exp(line.a2 * (1.0 - th));
            // Pressure-broadened width, held above the Zeeman splitting
            let gamma = line.a3 / 1000.0 * (pd * th.powf(line.a4) + 1.1 * e * th);
            let gamma = f64::sqrt(gamma.powi(2) + 2.25e-6);
            // Overlap parameter, with the 1e-3 correction factor
            let delta = 1e-3 * (line.a5 + line.a6 * th) * (pd + e) * th.powf(0.8);

            let shape = Complex64::new(1.0, -delta) / Complex64::new(line.f0 - freq, -gamma)
                - Complex64::new(1.0, delta) / Complex64::new(line.f0 + freq, gamma);
            s * (freq * shape)
        })
        .collect();
    let resonant: Complex64 = terms.iter().sum();

    // Non-resonant dry-air continuum
    let so = 6.14e-5 * pd * th.powi(2);
    let fo = -freq / Complex64::new(freq, 0.56e-3 * (pd + e) * th.powf(0.8));
    let sn = 1.4e-12 * pd.powi(2) * th.powf(3.5);
    let fn_ = freq / (1.0 + 1.93e-5 * freq.powf(1.5));

    nd0 + resonant + so * fo + Complex64::new(0.0, sn * fn_)
}
