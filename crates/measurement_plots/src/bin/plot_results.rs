//! Plots the raw buffers of a measurement run: time signals, deconvolved responses and spectrograms.
//! The audible recordings are also re-encoded to wav for listening.

use anyhow::Context as _;
use clap::{Parser, ValueHint};
use log::warn;
use measurement_plots::{
    args::LoggingOpt,
    constants::{DECONVOLVED_SEGMENT_LEN, DEFAULT_OUTPUT_DIR, RESPONSE_SEGMENT_LEN, SAMPLE_RATE},
    measurement::{MeasurementSet, Recording},
    plotting::{palette_color, plot_spectrograms, plot_waveforms, SpectrogramPanel, Trace, WaveformPanel},
};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use stft::SpecCompute;

/// Plot the raw recordings of a measurement run.
#[derive(Parser)]
#[command(version)]
struct Opt {
    #[command(flatten)]
    log_opt: LoggingOpt,

    /// Directory the measurement program wrote its `.raw` files to.
    #[arg(default_value = DEFAULT_OUTPUT_DIR, value_hint = ValueHint::DirPath)]
    dir: PathBuf,

    /// Keep only this many milliseconds of the deconvolved measurement response.
    #[arg(short, long)]
    truncate_ms: Option<u64>,

    /// Don't write wav copies of the recordings.
    #[arg(long)]
    no_wav: bool,
}

/// Failing to save an image is reported but doesn't stop the remaining plots.
fn warn_on_failure(result: anyhow::Result<()>, file_out: &Path) {
    if let Err(err) = result {
        warn!("Error saving plot to '{}': {err:#}", file_out.display());
    }
}

fn trace<'a>(label: &'a str, recording: &'a Recording, color_idx: usize) -> Trace<'a> {
    Trace {
        label,
        samples: &recording.samples,
        color: palette_color(color_idx),
    }
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::parse();
    opt.log_opt.init()?;

    let mut set = MeasurementSet::load(&opt.dir)
        .with_context(|| format!("loading recordings from '{}'", opt.dir.display()))?;

    if !opt.no_wav {
        for recording in set.audible() {
            recording
                .export_wav(SAMPLE_RATE)
                .with_context(|| format!("writing wav of '{}'", recording.name))?;
        }
    }

    if let Some(ms) = opt.truncate_ms {
        set.deconvolved_measurement
            .truncate(Duration::from_millis(ms), SAMPLE_RATE);
    }

    let file_out = opt.dir.join("measurement_overlay.png");
    warn_on_failure(
        plot_waveforms(
            &[WaveformPanel {
                title: "Measurement Response",
                traces: vec![
                    trace("Recorded Response", &set.measured, 0),
                    trace("Sent Chirp", &set.chirp, 3),
                ],
            }],
            &file_out,
        ),
        &file_out,
    );

    let file_out = opt.dir.join("time_signals.png");
    warn_on_failure(
        plot_waveforms(
            &[
                WaveformPanel {
                    title: "Reference Chirp",
                    traces: vec![trace("Reference Chirp", &set.chirp, 0)],
                },
                WaveformPanel {
                    title: "Measured Response",
                    traces: vec![trace("Measured Response", &set.measured, 0)],
                },
                WaveformPanel {
                    title: "Calibration Response",
                    traces: vec![trace("Calibration Response", &set.calibration, 0)],
                },
            ],
            &file_out,
        ),
        &file_out,
    );

    let file_out = opt.dir.join("deconvolved_signals.png");
    warn_on_failure(
        plot_waveforms(
            &[
                WaveformPanel {
                    title: "Deconvolved Calibration Response (Time Domain)",
                    traces: vec![trace(
                        "Deconvolved Calibration Response (Time Domain)",
                        &set.time_domain_calibration,
                        0,
                    )],
                },
                WaveformPanel {
                    title: "Deconvolved Calibration Response (Windowed)",
                    traces: vec![trace(
                        "Deconvolved Calibration Response (Windowed)",
                        &set.windowed_calibration,
                        0,
                    )],
                },
            ],
            &file_out,
        ),
        &file_out,
    );

    // The deconvolved response is short so it gets shorter segments.
    let sample_rate = SAMPLE_RATE as f32;
    let measured = SpecCompute::psd(set.measured.to_f64(), RESPONSE_SEGMENT_LEN, sample_rate).stft();
    let deconvolved = SpecCompute::psd(
        set.deconvolved_measurement.to_f64(),
        DECONVOLVED_SEGMENT_LEN,
        sample_rate,
    )
    .stft();
    let file_out = opt.dir.join("spectrograms.png");
    warn_on_failure(
        plot_spectrograms(
            &[
                SpectrogramPanel {
                    title: "Spectrogram of Measured Response",
                    stft: &measured,
                    sample_rate,
                },
                SpectrogramPanel {
                    title: "Spectrogram of Deconvolved Response",
                    stft: &deconvolved,
                    sample_rate,
                },
            ],
            &file_out,
        ),
        &file_out,
    );

    Ok(())
}
