// Properties of the files written by the measurement program.
pub const SAMPLE_RATE: u32 = 44_100;
pub const FREQUENCY_COLUMN: &str = "Frequency_Hz";
/// Columns containing any of these are plotted by `plot_frf`.
pub const MEASUREMENT_KEYWORDS: [&str; 3] = ["Magnitude", "Reactance", "Phase"];
pub const MAGNITUDE_COLUMN: &str = "Magnitude_dB";
pub const PHASE_COLUMN: &str = "Phase_Rad";
pub const CALIBRATION_FILE_NAME: &str = "calibration_parameters.txt";

// Default locations when no path is given on the command line.
pub const DEFAULT_FRF_CSV: &str = "../output/real_tract_frf.csv";
pub const DEFAULT_BASIC_FRF_CSV: &str = "output/real_tract_frf.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "../output";
pub const DEFAULT_WINDOW_RAW: &str = "output/tukey_window_values.raw";
pub const DEFAULT_WINDOW_PLOT: &str = "output/tukey_window_plot.png";

// Window breakpoints used when deconvolving.
pub const IR_LEN: usize = 8192;
pub const FADE_LEN: usize = 16;
pub const WINDOW_NFFT: usize = 16384;
/// Samples shown either side of the fade on the zoomed window plot.
pub const WINDOW_ZOOM_MARGIN: usize = 100;

// Spectrogram segment lengths.
pub const RESPONSE_SEGMENT_LEN: usize = 1024;
pub const DECONVOLVED_SEGMENT_LEN: usize = 256;

/// Line colors cycled by subplot index: blue, red, green, orange, purple, brown, pink, gray.
pub const PALETTE: [(u8, u8, u8); 8] = [
    (0, 0, 255),
    (255, 0, 0),
    (0, 128, 0),
    (255, 165, 0),
    (128, 0, 128),
    (165, 42, 42),
    (255, 192, 203),
    (128, 128, 128),
];

// Figure geometry in pixels.
pub const FIGURE_WIDTH: u32 = 1200;
pub const SUBPLOT_HEIGHT: u32 = 400;
