use crate::{
    constants::{FADE_LEN, IR_LEN},
    error::PlotError,
};
use clap::{
    builder::{PossibleValuesParser, RangedU64ValueParser, TypedValueParser as _},
    Args,
};
use log::Level;
use std::path::{Path, PathBuf};

/// Logging options.
#[derive(Args, Clone, Debug)]
pub struct LoggingOpt {
    /// The logging level to use.
    #[arg(
        short, long, default_value_t = Level::Info,
        // Needed because enum is foreign so can't use ValueEnum derive.
        value_parser = PossibleValuesParser::new(["trace", "debug", "info", "warn", "error"]).map(|s| s.parse::<Level>().unwrap()),
        ignore_case = true
    )]
    pub log_level: Level,
}

impl LoggingOpt {
    /// Install the global logger at the chosen level.
    pub fn init(&self) -> Result<(), log::SetLoggerError> {
        simple_logger::init_with_level(self.log_level)
    }
}

/// Where to find the chirp parameters that bound the frequency axis.
#[derive(Args, Clone, Debug, Default)]
pub struct CalibrationOpt {
    /// Calibration parameters file. Defaults to `calibration_parameters.txt` beside the input.
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub calibration: Option<PathBuf>,
}

impl CalibrationOpt {
    /// The explicit path if one was given, otherwise the file next to `in_file`.
    #[must_use]
    pub fn resolve(&self, in_file: &Path) -> PathBuf {
        self.calibration.clone().unwrap_or_else(|| {
            in_file
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(crate::constants::CALIBRATION_FILE_NAME)
        })
    }
}

/// Largest length accepted on the command line so `ir_len + fade_len` always fits a `usize`.
const MAX_BREAKPOINT: u64 = (usize::MAX / 2) as u64;

/// Structural breakpoints of a one-sided Tukey window.
#[derive(Args, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowShapeOpt {
    /// Length of the flat region in samples.
    #[arg(
        long, default_value_t = IR_LEN,
        value_parser = RangedU64ValueParser::<usize>::new().range(..=MAX_BREAKPOINT)
    )]
    pub ir_len: usize,

    /// Length of the cosine fade in samples.
    #[arg(
        long, default_value_t = FADE_LEN,
        value_parser = RangedU64ValueParser::<usize>::new().range(..=MAX_BREAKPOINT)
    )]
    pub fade_len: usize,
}

impl Default for WindowShapeOpt {
    fn default() -> Self {
        WindowShapeOpt {
            ir_len: IR_LEN,
            fade_len: FADE_LEN,
        }
    }
}

impl WindowShapeOpt {
    /// First sample after the fade. `None` if it overflows.
    #[must_use]
    pub fn fade_end(&self) -> Option<usize> {
        self.ir_len.checked_add(self.fade_len)
    }

    /// [`Self::fade_end`], failing when it overflows.
    pub fn checked_fade_end(&self) -> Result<usize, PlotError> {
        self.fade_end().ok_or(PlotError::WindowShapeOverflow {
            ir_len: self.ir_len,
            fade_len: self.fade_len,
        })
    }
}
