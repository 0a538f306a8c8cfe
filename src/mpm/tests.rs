use std::path::Path;
use std::str::FromStr;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use num_complex::Complex64;

use super::{lines, water_vapor, AirParams, Atmosphere, ModelOutput, OutputKind};
use crate::error::MpmError;
use crate::mpm93;

const KINDS: [OutputKind; 5] = [
    OutputKind::Refractivity,
    OutputKind::Attenuation,
    OutputKind::Dispersion,
    OutputKind::GroupDelay,
    OutputKind::Absorption,
];

/// Standard sea-level state used by most of the checks below.
fn sea_level(relative_humidity: f64) -> Atmosphere {
    Atmosphere::new(1013.0, 15.0, relative_humidity)
}

fn attenuation(atm: &Atmosphere, frequency: &[f64]) -> Vec<f64> {
    atm.evaluate(frequency, OutputKind::Attenuation)
        .values()
        .expect("attenuation is a real-valued output")
        .to_vec()
}

#[test]
fn derived_parameters_reference_values() {
    let air = AirParams::new(&sea_level(100.0));
    assert_relative_eq!(air.th, 1.041124414367517, max_relative = 1e-12);
    assert_relative_eq!(air.e, 17.005176459275205, max_relative = 1e-12);
    assert_relative_eq!(air.pd, 995.9948235407248, max_relative = 1e-12);
    assert_relative_eq!(air.rho_v, 12.794583112830484, max_relative = 1e-12);
}

#[test]
fn vapor_density_tracks_humidity() {
    assert_eq!(sea_level(0.0).vapor_density(), 0.0);
    assert_relative_eq!(
        sea_level(100.0).vapor_density(),
        12.794583112830484,
        max_relative = 1e-12
    );
}

#[test]
fn refractivity_reference_value() {
    let n = sea_level(100.0).refractivity(&[31.0]);
    assert_relative_eq!(n[0].re, 349.306552549169, max_relative = 1e-9);
    assert_relative_eq!(n[0].im, 0.030302881834889876, max_relative = 1e-9);
}

#[test]
fn attenuation_reference_values() {
    let dry = attenuation(&sea_level(0.0), &[60.0]);
    assert_relative_eq!(dry[0], 14.98003844323361, max_relative = 1e-9);

    let saturated = attenuation(&sea_level(100.0), &[22.0]);
    assert_relative_eq!(saturated[0], 0.3150624647179925, max_relative = 1e-9);
}

#[test]
fn output_kinds_are_linear_in_refractivity() {
    let atm = sea_level(40.0);
    let freqs = [22.0, 60.0, 119.0, 183.0];
    let n = match atm.evaluate(&freqs, OutputKind::Refractivity) {
        ModelOutput::Refractivity(n) => n,
        other => panic!("expected refractivity, got {other:?}"),
    };

    let transforms: [(OutputKind, fn(f64, Complex64) -> f64); 4] = [
        (OutputKind::Attenuation, |f, n| 0.1820 * f * n.im),
        (OutputKind::Dispersion, |f, n| 1.2008 * f * n.re),
        (OutputKind::GroupDelay, |_, n| 3.3356 * n.re),
        (OutputKind::Absorption, |f, n| {
            4.0 * std::f64::consts::PI * 1000.0 / 299_792_458.0 * f * n.im
        }),
    ];
    for (kind, expect) in transforms {
        let values = match atm.evaluate(&freqs, kind) {
            ModelOutput::Values(values) => values,
            other => panic!("expected real values, got {other:?}"),
        };
        for ((&f, &n), &value) in freqs.iter().zip(&n).zip(&values) {
            assert_relative_eq!(value, expect(f, n), max_relative = 1e-12);
        }
    }
}

#[test]
fn evaluation_is_idempotent() {
    let atm = sea_level(73.0);
    let freqs = [10.0, 57.5, 122.25];
    for kind in KINDS {
        assert_eq!(atm.evaluate(&freqs, kind), atm.evaluate(&freqs, kind));
    }
}

#[test]
fn empty_input_short_circuits_to_scalar_zero() {
    let atm = sea_level(50.0);
    for kind in KINDS {
        assert_eq!(atm.evaluate(&[], kind), ModelOutput::Scalar(0.0));
    }
}

#[test]
fn scalar_wrapper_matches_one_element_sequence() {
    let atm = sea_level(50.0);
    assert_eq!(
        atm.evaluate_scalar(22.0, OutputKind::Attenuation),
        atm.evaluate(&[22.0], OutputKind::Attenuation)
    );
}

#[test]
fn unsupported_output_tag_is_rejected() {
    let err = mpm93(&[22.0], 1013.0, 15.0, 30.0, 0.0, 0.0, 0.0, "xyz").unwrap_err();
    assert!(matches!(err, MpmError::UnsupportedOutput(tag) if tag == "xyz"));

    // no tag silently maps to anything else
    for kind in KINDS {
        assert_eq!(OutputKind::from_str(kind.tag()).unwrap(), kind);
    }
    assert!(OutputKind::from_str("").is_err());
}

#[test]
fn vestigial_parameters_are_ignored() {
    let plain = mpm93(&[31.0], 1013.0, 15.0, 50.0, 0.0, 0.0, 0.0, "att").unwrap();
    let rainy = mpm93(&[31.0], 1013.0, 15.0, 50.0, 0.3, 1.2, 25.0, "att").unwrap();
    assert_eq!(plain, rainy);
}

#[test]
fn attenuation_grows_with_humidity() {
    let mut previous = -1.0;
    for u in (0..=100).step_by(10) {
        let att = attenuation(&sea_level(f64::from(u)), &[22.0])[0];
        assert!(att > previous, "attenuation fell from {previous} to {att} at {u}%");
        previous = att;
    }
}

#[test]
fn dry_attenuation_peaks_at_119_ghz() {
    let freqs: Vec<f64> = (100..=150).map(f64::from).collect();
    let att = attenuation(&sea_level(0.0), &freqs);
    let (index, &peak) = att
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .unwrap();
    assert_eq!(freqs[index], 119.0);
    assert_abs_diff_eq!(peak, 1.3475992, epsilon = 2e-3);
}

#[test]
fn saturated_attenuation_bottoms_out_at_31_ghz() {
    let freqs: Vec<f64> = (20..=100).map(f64::from).collect();
    let att = attenuation(&sea_level(100.0), &freqs);
    let (index, &low) = att
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))
        .unwrap();
    assert_eq!(freqs[index], 31.0);
    assert_abs_diff_eq!(low, 0.1711905, epsilon = 2e-3);
}

#[test]
fn water_line_resonates_at_22_ghz() {
    let air = AirParams::new(&sea_level(100.0));
    let catalog = lines::water_lines();
    let at = |f: f64| water_vapor::refractivity(f, &air, catalog).im;
    let center = at(22.235080);
    assert!(center > at(21.235080));
    assert!(center > at(23.235080));
}

#[test]
fn water_vapor_vanishes_in_dry_air() {
    let air = AirParams::new(&sea_level(0.0));
    for f in [1.0, 22.235080, 183.0, 500.0] {
        let n = water_vapor::refractivity(f, &air, lines::water_lines());
        assert_eq!(n, Complex64::new(0.0, 0.0));
    }
}

#[test]
fn doppler_branch_stays_finite_at_low_pressure() {
    let thin = Atmosphere::new(0.5, 15.0, 0.1);
    let air = AirParams::new(&thin);
    assert!(air.pd + air.e < 0.7);

    let att = attenuation(&thin, &[60.0])[0];
    assert!(att.is_finite());
    assert!(att > 0.0);
}

#[test]
fn builtin_catalogs_parse() {
    let oxygen = lines::oxygen_lines();
    let water = lines::water_lines();
    assert_eq!(oxygen.len(), 44);
    assert_eq!(water.len(), 35);
    assert_relative_eq!(oxygen[0].f0, 50.474238);
    assert_relative_eq!(water[0].f0, 22.235080);
    // the far-wing continuum pseudo-line is present
    assert_relative_eq!(water[34].f0, 1780.0);
}

#[test]
fn tables_load_from_disk() {
    let base = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let oxygen = lines::load_oxygen_table(&base.join("oxygen93.txt")).unwrap();
    let water = lines::load_water_table(&base.join("water93.txt")).unwrap();
    assert_eq!(oxygen, lines::oxygen_lines());
    assert_eq!(water, lines::water_lines());

    let missing = lines::load_water_table(&base.join("nonexistent.txt")).unwrap_err();
    assert!(matches!(missing, MpmError::TableRead { .. }));
}

#[test]
fn malformed_tables_are_rejected_with_line_numbers() {
    let err = lines::parse_oxygen_table("50.0 1.0\n").unwrap_err();
    assert!(matches!(err, MpmError::TableParse { line: 1 }));

    // comments and blank lines do not shift the reported line number
    let text = "# header\n\n1 2 3 4 5 6 oops\n";
    let err = lines::parse_water_table(text).unwrap_err();
    assert!(matches!(err, MpmError::TableParse { line: 3 }));

    // too many columns is as malformed as too few
    let err = lines::parse_water_table("1 2 3 4 5 6 7 8\n").unwrap_err();
    assert!(matches!(err, MpmError::TableParse { line: 1 }));

    let ok = lines::parse_oxygen_table("# only comments\n\n").unwrap();
    assert!(ok.is_empty());
}

#[test]
fn substituted_catalog_is_honored() {
    // a single artificial line turns the dry module into the whole model
    let oxygen = lines::parse_oxygen_table("60.0 100.0 1.0 1.0 0.8 0.0 0.0").unwrap();
    let water = lines::parse_water_table("").unwrap();

    let atm = sea_level(0.0);
    let n = atm.refractivity_with(&[60.0], &oxygen, &water);
    let full = atm.refractivity(&[60.0]);
    assert_ne!(n, full);
    assert!(n[0].im > 0.0);
}
