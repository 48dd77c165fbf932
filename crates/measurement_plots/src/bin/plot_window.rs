//! Plots a window function buffer with its flat and fade regions marked.

use clap::{Parser, ValueHint};
use log::error;
use measurement_plots::{
    args::{LoggingOpt, WindowShapeOpt},
    constants::{DEFAULT_WINDOW_PLOT, DEFAULT_WINDOW_RAW},
    file_io::read_raw_f32,
    plotting,
    window::WindowReport,
};
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

/// Plot the values of a one-sided Tukey window saved as raw float32.
#[derive(Parser)]
#[command(version)]
struct Opt {
    #[command(flatten)]
    log_opt: LoggingOpt,

    /// Raw little-endian float32 window values.
    #[arg(default_value = DEFAULT_WINDOW_RAW, value_hint = ValueHint::FilePath)]
    in_file: PathBuf,

    /// Where to save the plot.
    #[arg(default_value = DEFAULT_WINDOW_PLOT, value_hint = ValueHint::FilePath)]
    out_file: PathBuf,

    #[command(flatten)]
    shape: WindowShapeOpt,
}

/// Returns whether the window was read and the plot saved.
fn plot_window(in_file: &Path, out_file: &Path, shape: WindowShapeOpt) -> bool {
    let values = match read_raw_f32(in_file) {
        Ok(values) => values,
        Err(err) => {
            error!("Error reading file {}: {err}", in_file.display());
            return false;
        }
    };
    let Some(report) = WindowReport::new(&values, shape) else {
        error!("No data read from {}", in_file.display());
        return false;
    };

    if let Err(err) = plotting::plot_window(&values, shape, out_file) {
        error!("Error saving plot to {}: {err:#}", out_file.display());
        return false;
    }

    println!("\n{report}");
    true
}

fn main() -> ExitCode {
    let opt = Opt::parse();
    if let Err(err) = opt.log_opt.init() {
        eprintln!("Error initializing logging: {err}");
        return ExitCode::FAILURE;
    }

    if plot_window(&opt.in_file, &opt.out_file, opt.shape) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
