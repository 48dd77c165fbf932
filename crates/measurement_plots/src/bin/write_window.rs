//! Writes the one-sided Tukey window used to isolate deconvolved impulse responses as raw float32.

use anyhow::Context as _;
use clap::{Parser, ValueHint};
use log::info;
use measurement_plots::{
    args::{LoggingOpt, WindowShapeOpt},
    constants::{DEFAULT_WINDOW_RAW, WINDOW_NFFT},
    file_io::write_raw_f32,
    window::one_sided_tukey,
};
use std::path::PathBuf;

/// Generate a one-sided Tukey window.
#[derive(Parser)]
#[command(version)]
struct Opt {
    #[command(flatten)]
    log_opt: LoggingOpt,

    /// Where to write the raw little-endian float32 values.
    #[arg(default_value = DEFAULT_WINDOW_RAW, value_hint = ValueHint::FilePath)]
    out_file: PathBuf,

    /// Total window length in samples.
    #[arg(long, default_value_t = WINDOW_NFFT)]
    nfft: usize,

    #[command(flatten)]
    shape: WindowShapeOpt,
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::parse();
    opt.log_opt.init()?;

    let window = one_sided_tukey(opt.nfft, opt.shape)?;
    write_raw_f32(&opt.out_file, &window)
        .with_context(|| format!("writing window to '{}'", opt.out_file.display()))?;
    info!(
        "Wrote {} window samples (flat {}, fade {}) to '{}'",
        window.len(),
        opt.shape.ir_len,
        opt.shape.fade_len,
        opt.out_file.display()
    );
    Ok(())
}
