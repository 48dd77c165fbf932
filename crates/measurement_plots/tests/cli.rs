#![cfg(feature = "plot")]
//! Command line behavior that fails or finishes before anything is rendered.

use measurement_plots::file_io::{read_raw_f32, write_raw_f32};
use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "measurement_plots_cli_{}_{name}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn run(bin: &str, args: &[&Path]) -> Output {
    Command::new(bin)
        .args(["--log-level", "error"])
        .args(args)
        .output()
        .unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn frf_without_frequency_column() {
    let dir = temp_dir("no_frequency");
    let csv = dir.join("frf.csv");
    fs::write(&csv, "Magnitude_dB,Phase_Rad\n1.0,0.5\n").unwrap();

    let output = run(env!("CARGO_BIN_EXE_plot_frf"), &[&csv]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Frequency_Hz"));
    assert!(!csv.with_extension("png").exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn frf_without_measurement_columns() {
    let dir = temp_dir("no_measurements");
    let csv = dir.join("frf.csv");
    fs::write(&csv, "Frequency_Hz,Coherence\n100,0.9\n200,0.8\n").unwrap();

    let output = run(env!("CARGO_BIN_EXE_plot_frf"), &[&csv]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("No measurement columns"));
    assert!(!csv.with_extension("png").exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn frf_missing_file() {
    let dir = temp_dir("frf_missing");
    let csv = dir.join("absent.csv");

    let output = run(env!("CARGO_BIN_EXE_plot_frf"), &[&csv]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("not found"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn frf_non_numeric_cell() {
    let dir = temp_dir("non_numeric");
    let csv = dir.join("frf.csv");
    fs::write(&csv, "Frequency_Hz,Magnitude_dB\n100,1.0\n200,loud\n").unwrap();

    let output = run(env!("CARGO_BIN_EXE_plot_frf"), &[&csv]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("'loud' is not a number"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn basic_frf_requires_phase() {
    let dir = temp_dir("basic_no_phase");
    let csv = dir.join("frf.csv");
    fs::write(&csv, "Frequency_Hz,Magnitude_dB\n100,1.0\n").unwrap();

    let output = run(env!("CARGO_BIN_EXE_plot_frf_basic"), &[&csv]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Phase_Rad"));
    assert!(!csv.with_extension("png").exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn results_with_missing_recording() {
    let dir = temp_dir("results_missing");
    // Every buffer but the windowed calibration response.
    for name in [
        "measurement_chirp",
        "measurement_response",
        "calibration_response",
        "deconvolved_measurement_response",
        "time_domain_calibration_response",
    ] {
        write_raw_f32(&dir.join(format!("{name}.raw")), &[0.0, 0.5, -0.5]).unwrap();
    }

    let output = run(env!("CARGO_BIN_EXE_plot_results"), &[&dir]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("windowed_calibration_response.raw"));
    assert!(!dir.join("measurement_response.wav").exists());
    assert!(!dir.join("spectrograms.png").exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn window_round_trip_through_file() {
    let dir = temp_dir("write_window");
    let raw = dir.join("window.raw");

    let output = run(env!("CARGO_BIN_EXE_write_window"), &[&raw]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(fs::metadata(&raw).unwrap().len(), 16384 * 4);

    let window = read_raw_f32(&raw).unwrap();
    assert_eq!(window[0], 1.0);
    assert_eq!(window[8191], 1.0);
    assert!((window[8200] - 0.5).abs() < 1e-6);
    assert_eq!(window[8208], 0.0);
    assert_eq!(window[16383], 0.0);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn window_longer_than_buffer() {
    let dir = temp_dir("window_too_long");
    let raw = dir.join("window.raw");

    let output = Command::new(env!("CARGO_BIN_EXE_write_window"))
        .args(["--log-level", "error", "--nfft", "100"])
        .arg(&raw)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(!raw.exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn plot_window_without_data() {
    let dir = temp_dir("plot_window");
    let empty = dir.join("empty.raw");
    fs::write(&empty, b"").unwrap();
    let png = dir.join("window.png");

    let output = run(env!("CARGO_BIN_EXE_plot_window"), &[&empty, &png]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!png.exists());

    let output = run(
        env!("CARGO_BIN_EXE_plot_window"),
        &[&dir.join("absent.raw"), &png],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(!png.exists());

    fs::remove_dir_all(&dir).unwrap();
}
