/// Command line fragments shared by the binaries.
pub mod args;

/// Chirp parameters saved by the measurement program.
pub mod calibration;

pub mod constants;

/// The error type for loading measurement data.
pub mod error;

/// Simple helper functions for reading and writing files.
pub mod file_io;

/// Frequency response tables, their statistics, and the figure built from them.
pub mod frf;

/// Raw recordings of a measurement run.
pub mod measurement;

/// Plotting functionality.
#[cfg(feature = "plot")]
pub mod plotting;

/// Window function buffers.
pub mod window;
