use std::{io, path::PathBuf};
use thiserror::Error;

/// Everything that can go wrong loading measurement data.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("File '{}' not found", .0.display())]
    MissingFile(PathBuf),

    #[error("Error reading CSV file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {row}, column '{column}': '{value}' is not a number")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("CSV contains no data rows")]
    EmptyTable,

    #[error("CSV must contain column(s) {missing:?}\nFound columns: {found:?}")]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },

    #[error("No measurement columns found in CSV (column names must contain one of {keywords:?})")]
    NoMeasurementColumns { keywords: Vec<String> },

    #[error("'{}' holds {len} bytes which is not a whole number of 32-bit samples", path.display())]
    PartialSample { path: PathBuf, len: usize },

    #[error("No data read from '{}'", .0.display())]
    EmptyBuffer(PathBuf),

    #[error("No '{0}' entry in calibration parameters")]
    MissingCalibrationKey(&'static str),

    #[error("Calibration entry '{key}' has unparseable value '{value}'")]
    InvalidCalibrationValue { key: &'static str, value: String },

    #[error("Calibration bounds {lower} Hz to {upper} Hz are not increasing")]
    InvalidFrequencyBounds { lower: f64, upper: f64 },

    #[error("Fade end {end} is past the window length {nfft}")]
    WindowTooShort { end: usize, nfft: usize },

    #[error("Flat length {ir_len} plus fade length {fade_len} overflows")]
    WindowShapeOverflow { ir_len: usize, fade_len: usize },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Wav(#[from] hound::Error),
}
