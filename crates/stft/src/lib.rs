//! Crate for finding the Short Time Fourier Transform and power spectral density spectrogram of a real signal.

use derive_more::{Add, Div, Mul, Sub};
use fft::{window_fn::WindowFn, RealFft};
use std::time::Duration;

/// Relating to frequency analysis ex. dtft and fft.
pub mod fft;

/// A window length. Wraps the number of samples with methods for converting to/from time.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, PartialOrd, Ord, Add, Div, Mul, Sub)]
pub struct WindowLength {
    sample_num: usize,
}

impl WindowLength {
    /// [`WindowLength`] constructor.
    #[must_use]
    pub fn from_samples(sample_num: usize) -> Self {
        WindowLength { sample_num }
    }

    /// [`WindowLength`] constructor.
    /// # Arguments
    /// - `duration`: Length of the window in time.
    /// - `sample_rate`: Samples per second.
    #[must_use]
    pub fn from_duration(duration: Duration, sample_rate: f32) -> Self {
        // secs * samples/sec = samples
        WindowLength {
            sample_num: (duration.as_secs_f64() * f64::from(sample_rate)).round() as usize,
        }
    }

    /// Getter for samples
    #[must_use]
    pub fn samples(&self) -> usize {
        self.sample_num
    }
}

/// How each bin of a segment's spectrum is scaled.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Scaling {
    /// `|X|/sqrt(N)`.
    Magnitude,
    /// One-sided power spectral density `|X|^2 / (fs * sum(w^2))` in units²/Hz.
    Density { sample_rate: f32 },
}

/// The information required to calculate a spectrograph.
#[derive(Debug)]
pub struct SpecCompute {
    data: Vec<f64>,            // Time domain data.
    window_len: WindowLength,  // The length of a window.
    window_step: WindowLength, // The step between successive windows. At most the window length.
    window_fn: WindowFn,       // The window function to use.
    scaling: Scaling,
    detrend: bool, // Remove each segment's mean before windowing.
}

/// The calculated spectrograph.
#[derive(Debug)]
pub struct Stft {
    data: Vec<Vec<f64>>, // Vector of each frequency's individual time varying amplitude.
    window_len: WindowLength,
    window_step: WindowLength,
}

impl Stft {
    /// Number of frequency bins.
    #[must_use]
    pub fn bin_cnt(&self) -> usize {
        self.data.len()
    }

    /// Number of windows of time.
    #[must_use]
    pub fn window_cnt(&self) -> usize {
        self.data.first().map_or(0, Vec::len)
    }

    /// `true` if the signal was shorter than a single window.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.window_cnt() == 0
    }

    /// Center frequency of each bin in hertz from 0 hz to the Nyquist frequency.
    #[must_use]
    pub fn frequencies(&self, sample_rate: f32) -> Vec<f64> {
        let bin_width = f64::from(bin_width_from_time(sample_rate, self.window_len.samples()));
        (0..self.bin_cnt()).map(|k| k as f64 * bin_width).collect()
    }

    /// Time of each window's center in seconds.
    #[must_use]
    pub fn times(&self, sample_rate: f32) -> Vec<f64> {
        let half_window = self.window_len.samples() as f64 / 2.0;
        (0..self.window_cnt())
            .map(|i| {
                (half_window + (i * self.window_step.samples()) as f64) / f64::from(sample_rate)
            })
            .collect()
    }

    /// Samples in each window.
    #[must_use]
    pub fn window_len(&self) -> WindowLength {
        self.window_len
    }

    /// The step between successive windows.
    #[must_use]
    pub fn window_step(&self) -> WindowLength {
        self.window_step
    }

    /// Each bin's transient value iterating from 0 hz to Nyquist frequency.
    pub fn bins(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.iter().map(Vec::as_slice)
    }

    /// Getter for frequency analysis data. Outer vec is each frequency. Inner vec is each window.
    #[must_use]
    pub fn data(&self) -> &Vec<Vec<f64>> {
        &self.data
    }
}

/// Calculates bin width of a dtft from the number of time samples.
/// Bin width is `Fs/N` where `Fs` is sampling frequency and `N` is samples.
#[must_use]
pub fn bin_width_from_time(sample_rate: f32, sample_cnt: usize) -> f32 {
    sample_rate / sample_cnt as f32
}

impl SpecCompute {
    /// Basic constructor. Defaults to [`Scaling::Magnitude`] without detrending.
    /// # Panics
    /// - If the window is empty, the step is zero, or the step is longer than the window.
    pub fn new(
        data: Vec<f64>,
        window_len: WindowLength,
        window_step: WindowLength,
        window_fn: WindowFn,
    ) -> Self {
        assert!(window_len.samples() > 0, "Window must hold at least one sample.");
        assert!(window_step.samples() > 0, "Step length must be nonzero.");
        assert!(
            window_step <= window_len,
            "Step length should not be larger than the window itself."
        );
        SpecCompute {
            data,
            window_len,
            window_step,
            window_fn,
            scaling: Scaling::Magnitude,
            detrend: false,
        }
    }

    /// Power spectral density spectrogram with the conventional defaults:
    /// a periodic Tukey window, `segment_len / 8` overlap, mean removal and density scaling.
    pub fn psd(data: Vec<f64>, segment_len: usize, sample_rate: f32) -> Self {
        let window_len = WindowLength::from_samples(segment_len);
        let overlap = WindowLength::from_samples(segment_len / 8);
        SpecCompute::new(data, window_len, window_len - overlap, fft::window_fn::tukey)
            .with_scaling(Scaling::Density { sample_rate })
            .with_detrend(true)
    }

    #[must_use]
    pub fn with_scaling(mut self, scaling: Scaling) -> Self {
        self.scaling = scaling;
        self
    }

    #[must_use]
    pub fn with_detrend(mut self, detrend: bool) -> Self {
        self.detrend = detrend;
        self
    }

    /// Returns the time varying frequency analysis of frequencies.
    /// Outer vec is each frequency. Inner vec is each value per window step.
    #[must_use]
    pub fn stft(&self) -> Stft {
        let window_samples = self.window_len.samples();
        let mut transform = RealFft::new(window_samples);
        // Given 2n time samples get n+1 frequency samples.
        let mut result = vec![vec![]; transform.bin_cnt()];
        let nyquist_bin = (window_samples % 2 == 0).then_some(window_samples / 2);

        let bin_scale = match self.scaling {
            Scaling::Magnitude => 1.0 / (window_samples as f64).sqrt(),
            Scaling::Density { sample_rate } => {
                1.0 / (f64::from(sample_rate)
                    * fft::window_fn::power_sum(self.window_fn, window_samples))
            }
        };

        // For the shifting window.
        for window_of_data in self
            .data
            // Take a window of samples at a time.
            .windows(window_samples)
            // Step by the window step.
            .step_by(self.window_step.samples())
        {
            let mut window_of_data = window_of_data.to_owned();
            if self.detrend {
                let mean = window_of_data.iter().sum::<f64>() / window_samples as f64;
                window_of_data.iter_mut().for_each(|x| *x -= mean);
            }
            // Apply windowing function.
            fft::window_fn::apply_window(&mut window_of_data, self.window_fn);

            // Take the fourier transform of the window.
            let freq_data = transform.process(&mut window_of_data);

            // Add the analysis to the results.
            for (bin_idx, bin_value) in freq_data.iter().enumerate() {
                let value = match self.scaling {
                    Scaling::Magnitude => bin_value.norm() * bin_scale,
                    Scaling::Density { .. } => {
                        // Negative frequencies fold onto the positive ones except for DC and Nyquist.
                        let fold = if bin_idx == 0 || Some(bin_idx) == nyquist_bin {
                            1.0
                        } else {
                            2.0
                        };
                        bin_value.norm_sqr() * bin_scale * fold
                    }
                };
                result[bin_idx].push(value);
            }
        }
        log::trace!(
            "Computed {} windows of {window_samples} samples",
            result[0].len()
        );

        Stft {
            data: result,
            window_len: self.window_len,
            window_step: self.window_step,
        }
    }
}
