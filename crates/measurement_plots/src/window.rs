//! One-sided Tukey windows applied to deconvolved impulse responses.

use crate::{args::WindowShapeOpt, constants::WINDOW_ZOOM_MARGIN, error::PlotError};
use iterator_adapters::IteratorAdapter;
use std::{f64::consts::PI, fmt, ops::Range};

/// Flat at 1 up to `ir_len`, a raised cosine fade to 0 over `fade_len`, then 0 up to `nfft`.
pub fn one_sided_tukey(nfft: usize, shape: WindowShapeOpt) -> Result<Vec<f32>, PlotError> {
    let fade_end = shape.checked_fade_end()?;
    if fade_end > nfft {
        return Err(PlotError::WindowTooShort { end: fade_end, nfft });
    }
    Ok((0..nfft)
        .map(|k| {
            if k < shape.ir_len {
                1.0
            } else if k < fade_end {
                let n = (k - shape.ir_len) as f64;
                (0.5 * (1.0 + (PI * n / shape.fade_len as f64).cos())) as f32
            } else {
                0.0
            }
        })
        .collect())
}

/// Sample range shown on the zoomed plot: the fade with a margin either side, clipped to the buffer.
#[must_use]
pub fn zoom_range(shape: WindowShapeOpt, len: usize) -> Range<usize> {
    let start = shape.ir_len.saturating_sub(WINDOW_ZOOM_MARGIN);
    let end = shape
        .fade_end()
        .map_or(len, |end| end.saturating_add(WINDOW_ZOOM_MARGIN).min(len));
    start.min(end)..end
}

/// A labelled sample of the window. `value` is `None` past the end of the buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyPoint {
    pub index: usize,
    pub value: Option<f32>,
    pub label: &'static str,
}

/// Statistics and key points printed for a window buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowReport {
    pub total_samples: usize,
    pub shape: WindowShapeOpt,
    pub min: f32,
    pub max: f32,
    pub key_points: Vec<KeyPoint>,
}

impl WindowReport {
    /// `None` for an empty buffer. Key points whose index overflows a `usize` are left out.
    #[must_use]
    pub fn new(values: &[f32], shape: WindowShapeOpt) -> Option<Self> {
        let (min, max) = values.iter().copied().extrema()?;
        let point = |index: Option<usize>, label| {
            index.map(|index| KeyPoint {
                index,
                value: values.get(index).copied(),
                label,
            })
        };
        let mut key_points = [
            point(Some(0), "start"),
            point(shape.ir_len.checked_sub(1), "end of flat region"),
            point(Some(shape.ir_len), "start of fade"),
            point(shape.ir_len.checked_add(shape.fade_len / 2), "middle of fade"),
            point(shape.fade_end().and_then(|end| end.checked_sub(1)), "end of fade"),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
        // Only reported when the buffer extends past the fade.
        if let Some(end) = shape.fade_end().filter(|&end| end < values.len()) {
            key_points.extend(point(Some(end), "after fade"));
        }
        Some(WindowReport {
            total_samples: values.len(),
            shape,
            min,
            max,
            key_points,
        })
    }
}

impl fmt::Display for WindowReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Window Statistics:")?;
        writeln!(f, "  Total samples: {}", self.total_samples)?;
        writeln!(f, "  IR length (flat region): {}", self.shape.ir_len)?;
        writeln!(f, "  Fade length: {}", self.shape.fade_len)?;
        writeln!(f, "  Min value: {:.6}", self.min)?;
        writeln!(f, "  Max value: {:.6}", self.max)?;
        write!(f, "\nKey points:")?;
        for point in &self.key_points {
            match point.value {
                Some(value) => write!(
                    f,
                    "\n  window[{}] = {value:.6} ({})",
                    point.index, point.label
                )?,
                None => write!(
                    f,
                    "\n  window[{}] unavailable, buffer too short ({})",
                    point.index, point.label
                )?,
            }
        }
        Ok(())
    }
}
