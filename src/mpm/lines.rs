//! Spectral line catalogs.
//!
//! The oxygen and water vapor line parameters ship as fixed-format text
//! tables under `data/` and are parsed once into process-wide read-only
//! catalogs. Tables with the same format can also be loaded from disk, for
//! substitution or testing.

use std::path::Path;
use std::sync::OnceLock;

use log::info;

use crate::error::MpmError;

/// Columns per table row: line center frequency plus six coefficients.
const COLUMNS: usize = 7;

/// One oxygen absorption line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OxygenLine {
    /// Line center frequency in GHz.
    pub f0: f64,
    /// Strength coefficient.
    pub a1: f64,
    /// Strength temperature exponent.
    pub a2: f64,
    /// Width coefficient.
    pub a3: f64,
    /// Width temperature exponent.
    pub a4: f64,
    /// Overlap coefficient.
    pub a5: f64,
    /// Overlap temperature coefficient.
    pub a6: f64,
}

/// One water vapor absorption line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterLine {
    /// Line center frequency in GHz.
    pub f0: f64,
    /// Strength coefficient.
    pub b1: f64,
    /// Strength temperature exponent.
    pub b2: f64,
    /// Width coefficient.
    pub b3: f64,
    /// Self-broadening factor.
    pub b4: f64,
    /// Air-broadening temperature exponent.
    pub b5: f64,
    /// Self-broadening temperature exponent.
    pub b6: f64,
}

impl From<[f64; COLUMNS]> for OxygenLine {
    fn from(c: [f64; COLUMNS]) -> Self {
        Self {
            f0: c[0],
            a1: c[1],
            a2: c[2],
            a3: c[3],
            a4: c[4],
            a5: c[5],
            a6: c[6],
        }
    }
}

impl From<[f64; COLUMNS]> for WaterLine {
    fn from(c: [f64; COLUMNS]) -> Self {
        Self {
            f0: c[0],
            b1: c[1],
            b2: c[2],
            b3: c[3],
            b4: c[4],
            b5: c[5],
            b6: c[6],
        }
    }
}

/// Parse a whitespace-separated numeric table.
///
/// Blank lines and `#` comments are skipped; every remaining line must hold
/// exactly [`COLUMNS`] numeric fields.
fn parse_rows(text: &str) -> Result<Vec<[f64; COLUMNS]>, MpmError> {
    let mut rows = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let row = raw.trim();
        if row.is_empty() || row.starts_with('#') {
            continue;
        }
        let mut fields = row.split_whitespace();
        let mut cols = [0.0; COLUMNS];
        for col in &mut cols {
            *col = fields
                .next()
                .and_then(|field| field.parse().ok())
                .ok_or(MpmError::TableParse { line: index + 1 })?;
        }
        if fields.next().is_some() {
            return Err(MpmError::TableParse { line: index + 1 });
        }
        rows.push(cols);
    }
    Ok(rows)
}

/// Parse an oxygen line table from text.
pub fn parse_oxygen_table(text: &str) -> Result<Vec<OxygenLine>, MpmError> {
    Ok(parse_rows(text)?.into_iter().map(OxygenLine::from).collect())
}

/// Parse a water vapor line table from text.
pub fn parse_water_table(text: &str) -> Result<Vec<WaterLine>, MpmError> {
    Ok(parse_rows(text)?.into_iter().map(WaterLine::from).collect())
}

/// Load an oxygen line table from a file.
pub fn load_oxygen_table(path: &Path) -> Result<Vec<OxygenLine>, MpmError> {
    parse_oxygen_table(&read_table(path)?)
}

/// Load a water vapor line table from a file.
pub fn load_water_table(path: &Path) -> Result<Vec<WaterLine>, MpmError> {
    parse_water_table(&read_table(path)?)
}

fn read_table(path: &Path) -> Result<String, MpmError> {
    std::fs::read_to_string(path).map_err(|source| MpmError::TableRead {
        path: path.to_path_buf(),
        source,
    })
}

/// The built-in MPM93 oxygen catalog, parsed once.
///
/// The embedded table is part of the crate; if it fails to parse the process
/// cannot produce any model output, so this fails fast.
pub fn oxygen_lines() -> &'static [OxygenLine] {
    static LINES: OnceLock<Vec<OxygenLine>> = OnceLock::new();
    LINES.get_or_init(|| {
        let lines = parse_oxygen_table(include_str!("../../data/oxygen93.txt"))
            .expect("embedded oxygen line table is malformed");
        info!("loaded {} oxygen lines", lines.len());
        lines
    })
}

/// The built-in MPM93 water vapor catalog, parsed once.
///
/// Fails fast on a malformed embedded table, like [`oxygen_lines`].
pub fn water_lines() -> &'static [WaterLine] {
    static LINES: OnceLock<Vec<WaterLine>> = OnceLock::new();
    LINES.get_or_init(|| {
        let lines = parse_water_table(include_str!("../../data/water93.txt"))
            .expect("embedded water vapor line table is malformed");
        info!("loaded {} water vapor lines", lines.len());
        lines
    })
}
