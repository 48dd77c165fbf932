//! Raw recordings left in the output directory by a calibration and measurement run.

use crate::{
    error::PlotError,
    file_io::{read_raw_f32, write_wav},
};
use log::info;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use stft::WindowLength;

/// A named raw buffer and where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Recording {
    pub name: &'static str,
    pub path: PathBuf,
    pub samples: Vec<f32>,
}

impl Recording {
    /// Read `<dir>/<name>.raw`.
    pub fn load(dir: &Path, name: &'static str) -> Result<Self, PlotError> {
        let path = dir.join(format!("{name}.raw"));
        let samples = read_raw_f32(&path)?;
        Ok(Recording {
            name,
            path,
            samples,
        })
    }

    /// Re-encode as `<name>.wav` beside the raw file. Returns the written path.
    pub fn export_wav(&self, sample_rate: u32) -> Result<PathBuf, PlotError> {
        let wav_path = self.path.with_extension("wav");
        write_wav(&wav_path, self.samples.iter().copied(), sample_rate)?;
        info!(
            "Wrote {} samples of '{}' to '{}'",
            self.samples.len(),
            self.name,
            wav_path.display()
        );
        Ok(wav_path)
    }

    /// Keep at most `duration` of samples.
    pub fn truncate(&mut self, duration: Duration, sample_rate: u32) {
        let keep = WindowLength::from_duration(duration, sample_rate as f32).samples();
        self.samples.truncate(keep);
    }

    /// Samples widened for analysis.
    #[must_use]
    pub fn to_f64(&self) -> Vec<f64> {
        self.samples.iter().copied().map(f64::from).collect()
    }
}

/// Every buffer plotted by `plot_results`.
#[derive(Clone, Debug)]
pub struct MeasurementSet {
    pub chirp: Recording,
    pub measured: Recording,
    pub calibration: Recording,
    pub deconvolved_measurement: Recording,
    pub time_domain_calibration: Recording,
    pub windowed_calibration: Recording,
}

impl MeasurementSet {
    /// Load every buffer from `dir`. Any missing or malformed file is an error.
    pub fn load(dir: &Path) -> Result<Self, PlotError> {
        Ok(MeasurementSet {
            chirp: Recording::load(dir, "measurement_chirp")?,
            measured: Recording::load(dir, "measurement_response")?,
            calibration: Recording::load(dir, "calibration_response")?,
            deconvolved_measurement: Recording::load(dir, "deconvolved_measurement_response")?,
            time_domain_calibration: Recording::load(dir, "time_domain_calibration_response")?,
            windowed_calibration: Recording::load(dir, "windowed_calibration_response")?,
        })
    }

    /// The recordings worth listening to.
    #[must_use]
    pub fn audible(&self) -> [&Recording; 3] {
        [&self.measured, &self.calibration, &self.chirp]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_io::{read_wav, write_raw_f32};
    use std::fs;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "measurement_plots_measurement_{}_{name}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn truncate_to_duration() {
        let mut recording = Recording {
            name: "deconvolved_measurement_response",
            path: PathBuf::from("x.raw"),
            samples: vec![0.0; 44_100],
        };
        recording.truncate(Duration::from_millis(200), 44_100);
        assert_eq!(recording.samples.len(), 8820);
        // Never grows.
        recording.truncate(Duration::from_secs(10), 44_100);
        assert_eq!(recording.samples.len(), 8820);
    }

    #[test]
    fn load_and_export() {
        let dir = temp_dir("load_and_export");
        let names = [
            "measurement_chirp",
            "measurement_response",
            "calibration_response",
            "deconvolved_measurement_response",
            "time_domain_calibration_response",
            "windowed_calibration_response",
        ];
        for (i, name) in names.iter().enumerate() {
            let samples = (0..100 + i).map(|n| n as f32 / 100.0).collect::<Vec<_>>();
            write_raw_f32(&dir.join(format!("{name}.raw")), &samples).unwrap();
        }

        let set = MeasurementSet::load(&dir).unwrap();
        assert_eq!(set.chirp.samples.len(), 100);
        assert_eq!(set.windowed_calibration.samples.len(), 105);

        let wav = set.measured.export_wav(44_100).unwrap();
        let (spec, samples) = read_wav(&wav).unwrap();
        fs::remove_dir_all(&dir).unwrap();
        assert_eq!(wav.file_name().unwrap(), "measurement_response.wav");
        assert_eq!(spec.sample_rate, 44_100);
        assert_eq!(samples, set.measured.samples);
    }

    #[test]
    fn missing_buffer_is_an_error() {
        let dir = temp_dir("missing_buffer");
        write_raw_f32(&dir.join("measurement_chirp.raw"), &[0.0]).unwrap();
        let result = MeasurementSet::load(&dir);
        fs::remove_dir_all(&dir).unwrap();
        assert!(matches!(
            result,
            Err(PlotError::MissingFile(path)) if path.ends_with("measurement_response.raw")
        ));
    }
}
