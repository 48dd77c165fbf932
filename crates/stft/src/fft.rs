use realfft::{num_complex::Complex, RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// A forward real fft planned once for a fixed input length.
/// Reusing the plan and its buffers avoids replanning for every segment of a spectrogram.
pub struct RealFft {
    plan: Arc<dyn RealToComplex<f64>>,
    scratch: Vec<Complex<f64>>,
    spectrum: Vec<Complex<f64>>, // `spectrum.len() == len / 2 + 1`
}

impl RealFft {
    /// Plan a transform of `len` time samples.
    #[must_use]
    pub fn new(len: usize) -> Self {
        let mut real_planner = RealFftPlanner::<f64>::new();
        let plan = real_planner.plan_fft_forward(len);
        let scratch = plan.make_scratch_vec();
        let spectrum = plan.make_output_vec();
        RealFft {
            plan,
            scratch,
            spectrum,
        }
    }

    /// Number of time samples the transform consumes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plan.len()
    }

    /// Number of frequency bins the transform produces.
    #[must_use]
    pub fn bin_cnt(&self) -> usize {
        self.spectrum.len()
    }

    /// Forward transform `data` in place and return the unnormalized one-sided spectrum.
    /// `data` is used as scratch space and its contents are unspecified afterwards.
    /// # Panics
    /// - If `data.len()` is not the planned length.
    pub fn process(&mut self, data: &mut [f64]) -> &[Complex<f64>] {
        assert_eq!(
            data.len(),
            self.len(),
            "input length must match the planned fft length"
        );
        self.plan
            .process_with_scratch(data, &mut self.spectrum, &mut self.scratch)
            .expect("buffers were sized by the plan");
        &self.spectrum
    }
}

impl core::fmt::Debug for RealFft {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RealFft").field("len", &self.len()).finish()
    }
}

/// Windowing functions useful for dtft analysis. See <https://en.wikipedia.org/wiki/Window_function> for details.
pub mod window_fn {
    pub type WindowFloat = f64;
    pub type WindowFn = fn(usize, usize) -> WindowFloat;
    use std::f64::consts::PI;

    /// Fraction of a [`tukey`] window spent tapering.
    pub const TUKEY_ALPHA: WindowFloat = 0.25;

    /// Applies the given window function to the input data.
    pub fn apply_window(data: &mut [WindowFloat], window: WindowFn) {
        let data_len = data.len();
        for (i, elem) in data.iter_mut().enumerate() {
            *elem *= window(i, data_len);
        }
    }

    /// Sum of the squared window coefficients. Used to normalize power spectral density.
    #[must_use]
    pub fn power_sum(window: WindowFn, samples: usize) -> WindowFloat {
        (0..samples).map(|n| window(n, samples).powi(2)).sum()
    }

    pub const fn rectangular(_n: usize, _samples: usize) -> WindowFloat {
        1.0
    }

    pub fn hann(n: usize, samples: usize) -> WindowFloat {
        const A0: WindowFloat = 0.5;
        A0 * (1.0
            - WindowFloat::cos((2.0 * PI * n as WindowFloat) / (samples as WindowFloat - 1.0)))
    }

    /// Symmetric tapered cosine window of `samples` points with taper fraction `alpha`.
    #[must_use]
    pub fn symmetric_tukey(n: usize, samples: usize, alpha: WindowFloat) -> WindowFloat {
        if samples <= 1 || alpha <= 0.0 {
            return 1.0;
        }
        let alpha = alpha.min(1.0);
        let x = n as WindowFloat / (samples - 1) as WindowFloat;
        if x < alpha / 2.0 {
            0.5 * (1.0 + WindowFloat::cos(PI * (2.0 * x / alpha - 1.0)))
        } else if x <= 1.0 - alpha / 2.0 {
            1.0
        } else {
            0.5 * (1.0 + WindowFloat::cos(PI * (2.0 * x / alpha - 2.0 / alpha + 1.0)))
        }
    }

    /// Periodic Tukey window with [`TUKEY_ALPHA`] taper, the default for spectral analysis.
    /// Periodic means the symmetric window of `samples + 1` points with the last point dropped.
    pub fn tukey(n: usize, samples: usize) -> WindowFloat {
        symmetric_tukey(n, samples + 1, TUKEY_ALPHA)
    }
}
