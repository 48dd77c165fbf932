//! Chirp parameters saved by the measurement program alongside its results.
//!
//! The file holds one `Key: value unit` entry per line, e.g.
//! ```text
//! Chirp Duration: 5.00 seconds
//! Chirp Start Frequency: 100.00 Hz
//! Chirp End Frequency: 2000.00 Hz
//! Chirp Type: Exponential
//! Chirp Amplitude: 0.50
//! ```

use crate::{error::PlotError, file_io::ensure_exists};
use log::debug;
use std::{fs, ops::Range, path::Path, str::FromStr};

const START_FREQUENCY_KEY: &str = "Chirp Start Frequency";
const END_FREQUENCY_KEY: &str = "Chirp End Frequency";
const DURATION_KEY: &str = "Chirp Duration";
const TYPE_KEY: &str = "Chirp Type";
const AMPLITUDE_KEY: &str = "Chirp Amplitude";

/// Every entry the measurement program writes. Entries absent from the file are `None`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CalibrationParams {
    pub start_frequency: Option<f64>,
    pub end_frequency: Option<f64>,
    pub duration: Option<f64>,
    pub chirp_type: Option<String>,
    pub amplitude: Option<f64>,
}

/// Inclusive frequency interval in hertz used for the x axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrequencyBounds {
    pub lower: f64,
    pub upper: f64,
}

impl FrequencyBounds {
    pub fn new(lower: f64, upper: f64) -> Result<Self, PlotError> {
        // Written this way so NaN is rejected too.
        if lower < upper {
            Ok(FrequencyBounds { lower, upper })
        } else {
            Err(PlotError::InvalidFrequencyBounds { lower, upper })
        }
    }

    #[must_use]
    pub fn range(&self) -> Range<f64> {
        self.lower..self.upper
    }
}

/// Text after the first `:` of `line`, trimmed.
fn entry_value(line: &str) -> &str {
    line.split_once(':').map_or("", |(_, value)| value.trim())
}

/// First whitespace separated token of the entry, parsed as a number.
fn numeric_entry(key: &'static str, line: &str) -> Result<f64, PlotError> {
    let value = entry_value(line);
    value
        .split_whitespace()
        .next()
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| PlotError::InvalidCalibrationValue {
            key,
            value: value.to_owned(),
        })
}

/// Entries that don't bound the axis. An unparseable value is dropped instead of failing the file.
fn informational_entry(key: &'static str, line: &str) -> Option<f64> {
    numeric_entry(key, line)
        .map_err(|e| debug!("Ignoring calibration entry: {e}"))
        .ok()
}

impl FromStr for CalibrationParams {
    type Err = PlotError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut params = CalibrationParams::default();
        for line in text.lines() {
            if line.contains(START_FREQUENCY_KEY) {
                params.start_frequency = Some(numeric_entry(START_FREQUENCY_KEY, line)?);
            } else if line.contains(END_FREQUENCY_KEY) {
                params.end_frequency = Some(numeric_entry(END_FREQUENCY_KEY, line)?);
            } else if line.contains(DURATION_KEY) {
                params.duration = informational_entry(DURATION_KEY, line);
            } else if line.contains(AMPLITUDE_KEY) {
                params.amplitude = informational_entry(AMPLITUDE_KEY, line);
            } else if line.contains(TYPE_KEY) {
                params.chirp_type = Some(entry_value(line).to_owned());
            }
        }
        Ok(params)
    }
}

impl CalibrationParams {
    /// Read and parse a calibration parameters file.
    pub fn from_path(file: &Path) -> Result<Self, PlotError> {
        ensure_exists(file)?;
        let params = fs::read_to_string(file)?.parse::<CalibrationParams>()?;
        debug!("Calibration parameters from '{}': {params:?}", file.display());
        Ok(params)
    }

    /// The chirp's sweep as axis bounds. Both ends must be present and increasing.
    pub fn frequency_bounds(&self) -> Result<FrequencyBounds, PlotError> {
        let lower = self
            .start_frequency
            .ok_or(PlotError::MissingCalibrationKey(START_FREQUENCY_KEY))?;
        let upper = self
            .end_frequency
            .ok_or(PlotError::MissingCalibrationKey(END_FREQUENCY_KEY))?;
        FrequencyBounds::new(lower, upper)
    }
}

/// Frequency bounds from a calibration file. Errors are for the caller to downgrade to a warning.
pub fn read_frequency_bounds(file: &Path) -> Result<FrequencyBounds, PlotError> {
    CalibrationParams::from_path(file)?.frequency_bounds()
}
