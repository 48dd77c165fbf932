//! Plots every magnitude, reactance and phase column of a frequency response table against frequency.
//! The image is saved beside the table with a `.png` extension.

use anyhow::Context as _;
use clap::{Parser, ValueHint};
use log::warn;
use measurement_plots::{
    args::{CalibrationOpt, LoggingOpt},
    constants::DEFAULT_FRF_CSV,
    frf::{x_bounds, FrfFigure, FrfSummary, FrfTable},
    plotting::plot_frf,
};
use std::path::PathBuf;

/// Plot the measurement columns of a frequency response CSV.
#[derive(Parser)]
#[command(version)]
struct Opt {
    #[command(flatten)]
    log_opt: LoggingOpt,

    /// CSV with a `Frequency_Hz` column and one or more measurement columns.
    #[arg(default_value = DEFAULT_FRF_CSV, value_hint = ValueHint::FilePath)]
    in_file: PathBuf,

    #[command(flatten)]
    calibration: CalibrationOpt,
}

fn main() -> anyhow::Result<()> {
    // Handle commandline arguments.
    let opt = Opt::parse();
    opt.log_opt.init()?;

    let table = FrfTable::from_path(&opt.in_file)
        .with_context(|| format!("loading '{}'", opt.in_file.display()))?;
    let columns = table.measurement_columns()?;

    // Chirp sweep bounds the x axis when known.
    let bounds = x_bounds(&opt.calibration.resolve(&opt.in_file));
    let figure = FrfFigure::new(&table, &columns, bounds);
    let file_out = opt.in_file.with_extension("png");
    if let Err(err) = plot_frf(&figure, &file_out) {
        warn!("Error saving plot to '{}': {err:#}", file_out.display());
    }

    println!("\n{}", FrfSummary::new(&table, &columns));
    Ok(())
}
