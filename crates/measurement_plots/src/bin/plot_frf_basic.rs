//! Plots the magnitude and phase of a frequency response table.

use anyhow::Context as _;
use clap::{Parser, ValueHint};
use log::warn;
use measurement_plots::{
    args::LoggingOpt,
    constants::{DEFAULT_BASIC_FRF_CSV, MAGNITUDE_COLUMN, PHASE_COLUMN},
    frf::{FrfFigure, FrfSummary, FrfTable, StatsFormat},
    plotting::plot_frf,
};
use std::path::PathBuf;

/// Plot `Magnitude_dB` and `Phase_Rad` of a frequency response CSV.
#[derive(Parser)]
#[command(version)]
struct Opt {
    #[command(flatten)]
    log_opt: LoggingOpt,

    /// CSV with `Frequency_Hz`, `Magnitude_dB` and `Phase_Rad` columns.
    #[arg(default_value = DEFAULT_BASIC_FRF_CSV, value_hint = ValueHint::FilePath)]
    in_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::parse();
    opt.log_opt.init()?;

    let table = FrfTable::from_path(&opt.in_file)
        .with_context(|| format!("loading '{}'", opt.in_file.display()))?;
    let columns = table.require_columns(&[MAGNITUDE_COLUMN, PHASE_COLUMN])?;

    let mut figure = FrfFigure::new(&table, &columns, None);
    let labels = [
        ("Magnitude Response", "Magnitude", "Magnitude (dB)"),
        ("Phase Response", "Phase", "Phase (Radians)"),
    ];
    for (subplot, (title, label, y_desc)) in figure.subplots.iter_mut().zip(labels) {
        subplot.title = format!("Vocal Tract FRF - {title}");
        subplot.label = label.to_owned();
        subplot.y_desc = y_desc.to_owned();
    }

    let file_out = opt.in_file.with_extension("png");
    if let Err(err) = plot_frf(&figure, &file_out) {
        warn!("Error saving plot to '{}': {err:#}", file_out.display());
    }

    let summary = FrfSummary::with_formats(
        &table,
        [
            (
                "Magnitude".to_owned(),
                &columns[0],
                StatsFormat {
                    precision: 2,
                    unit: Some("dB"),
                },
            ),
            (
                "Phase".to_owned(),
                &columns[1],
                StatsFormat {
                    precision: 4,
                    unit: Some("rad"),
                },
            ),
        ],
    );
    println!("\n{summary}");
    Ok(())
}
