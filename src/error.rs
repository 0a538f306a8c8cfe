use std::io;
use std::path::PathBuf;

/// Possible model errors.
#[derive(Debug)]
pub enum MpmError {
    /// The requested output tag is not one of `ref`, `att`, `dis`, `del`, `abs`
    UnsupportedOutput(String),
    /// A spectral line table could not be read
    TableRead {
        /// Path of the table file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A spectral line table row is malformed
    TableParse {
        /// 1-based line number of the offending row.
        line: usize,
    },
}

impl std::fmt::Display for MpmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MpmError::UnsupportedOutput(tag) => {
                write!(f, "output type {tag:?} not supported")
            }
            MpmError::TableRead { path, source } => {
                write!(f, "can't read line table {}: {source}", path.display())
            }
            MpmError::TableParse { line } => {
                write!(f, "malformed line table row at line {line}")
            }
        }
    }
}

impl std::error::Error for MpmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MpmError::TableRead { source, .. } => Some(source),
            _ => None,
        }
    }
}
