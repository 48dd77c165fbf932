//! Frequency response tables written by the measurement program.

use crate::{
    calibration::{read_frequency_bounds, FrequencyBounds},
    constants::{FREQUENCY_COLUMN, MEASUREMENT_KEYWORDS, PALETTE},
    error::PlotError,
    file_io::ensure_exists,
};
use csv::{ReaderBuilder, StringRecord, Trim};
use iterator_adapters::IteratorAdapter;
use log::{debug, info, warn};
use std::{fmt, fs::File, io::Read, ops::Range, path::Path};

/// A named column of values parsed from the table.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

/// A frequency response table. Always has a [`FREQUENCY_COLUMN`] and at least one row.
/// Other columns are kept as text until requested so unrelated non-numeric columns don't fail the load.
#[derive(Clone, Debug)]
pub struct FrfTable {
    headers: Vec<String>,
    records: Vec<StringRecord>,
    frequency: Vec<f64>,
}

impl FrfTable {
    /// Load a table from a CSV file.
    pub fn from_path(file: &Path) -> Result<Self, PlotError> {
        ensure_exists(file)?;
        let table = Self::from_reader(File::open(file)?)?;
        info!(
            "Loaded {} rows with columns {:?} from '{}'",
            table.len(),
            table.headers,
            file.display()
        );
        Ok(table)
    }

    /// Load a table from CSV text with a header row.
    pub fn from_reader(reader: impl Read) -> Result<Self, PlotError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);
        let headers = reader
            .headers()?
            .iter()
            .map(ToOwned::to_owned)
            .collect::<Vec<_>>();
        let records = reader.records().collect::<Result<Vec<_>, _>>()?;

        let mut table = FrfTable {
            headers,
            records,
            frequency: Vec::new(),
        };
        table.frequency = table.require_columns(&[FREQUENCY_COLUMN])?.remove(0).values;
        if table.records.is_empty() {
            return Err(PlotError::EmptyTable);
        }
        Ok(table)
    }

    /// Header names in file order.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The frequency of each row in hertz.
    #[must_use]
    pub fn frequency(&self) -> &[f64] {
        &self.frequency
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn parse_column(&self, index: usize) -> Result<Column, PlotError> {
        let name = &self.headers[index];
        let values = self
            .records
            .iter()
            .enumerate()
            .map(|(row, record)| {
                let cell = record.get(index).unwrap_or_default();
                cell.parse::<f64>().map_err(|_| PlotError::InvalidValue {
                    // Header is line 1.
                    row: row + 2,
                    column: name.clone(),
                    value: cell.to_owned(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Column {
            name: name.clone(),
            values,
        })
    }

    /// Parse exactly the named columns, failing with every missing name at once.
    pub fn require_columns(&self, names: &[&str]) -> Result<Vec<Column>, PlotError> {
        let indices = names
            .iter()
            .map(|name| self.headers.iter().position(|h| h == name))
            .collect::<Vec<_>>();
        if indices.iter().any(Option::is_none) {
            return Err(PlotError::MissingColumns {
                missing: names
                    .iter()
                    .zip(&indices)
                    .filter(|(_, index)| index.is_none())
                    .map(|(name, _)| (*name).to_owned())
                    .collect(),
                found: self.headers.clone(),
            });
        }
        indices
            .into_iter()
            .flatten()
            .map(|index| self.parse_column(index))
            .collect()
    }

    /// Every non-frequency column whose name contains one of [`MEASUREMENT_KEYWORDS`], in file order.
    pub fn measurement_columns(&self) -> Result<Vec<Column>, PlotError> {
        let columns = self
            .headers
            .iter()
            .enumerate()
            .filter(|(_, name)| name.as_str() != FREQUENCY_COLUMN)
            .filter(|(_, name)| MEASUREMENT_KEYWORDS.iter().any(|k| name.contains(k)))
            .map(|(index, _)| self.parse_column(index))
            .collect::<Result<Vec<_>, _>>()?;
        if columns.is_empty() {
            return Err(PlotError::NoMeasurementColumns {
                keywords: MEASUREMENT_KEYWORDS.map(str::to_owned).to_vec(),
            });
        }
        debug!(
            "Measurement columns: {:?}",
            columns.iter().map(|c| &c.name).collect::<Vec<_>>()
        );
        Ok(columns)
    }
}

/// Descriptive statistics of a column.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ColumnStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl ColumnStats {
    /// `None` for an empty column.
    #[must_use]
    pub fn of(values: &[f64]) -> Option<Self> {
        let (min, max) = values.iter().copied().extrema()?;
        Some(ColumnStats {
            min,
            max,
            mean: values.iter().copied().mean(),
        })
    }
}

/// How a column's statistics are printed.
#[derive(Clone, Debug)]
pub struct StatsFormat {
    pub precision: usize,
    pub unit: Option<&'static str>,
}

impl Default for StatsFormat {
    fn default() -> Self {
        StatsFormat {
            precision: 4,
            unit: None,
        }
    }
}

/// Console summary printed after plotting.
#[derive(Clone, Debug)]
pub struct FrfSummary {
    pub frequency: ColumnStats,
    pub points: usize,
    pub columns: Vec<(String, ColumnStats, StatsFormat)>,
}

impl FrfSummary {
    /// Summarize `columns` with the default format.
    #[must_use]
    pub fn new(table: &FrfTable, columns: &[Column]) -> Self {
        Self::with_formats(
            table,
            columns
                .iter()
                .map(|c| (c.name.clone(), c, StatsFormat::default())),
        )
    }

    /// Summarize columns each with its own heading and format.
    pub fn with_formats<'a>(
        table: &FrfTable,
        columns: impl IntoIterator<Item = (String, &'a Column, StatsFormat)>,
    ) -> Self {
        FrfSummary {
            frequency: ColumnStats::of(table.frequency()).expect("table has at least one row"),
            points: table.len(),
            columns: columns
                .into_iter()
                .filter_map(|(heading, column, format)| {
                    ColumnStats::of(&column.values).map(|stats| (heading, stats, format))
                })
                .collect(),
        }
    }
}

impl fmt::Display for FrfSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== FRF Data Statistics ===")?;
        writeln!(
            f,
            "Frequency range: {:.2} - {:.2} Hz",
            self.frequency.min, self.frequency.max
        )?;
        write!(f, "Number of points: {}", self.points)?;
        for (heading, stats, format) in &self.columns {
            let unit = format.unit.map(|u| format!(" {u}")).unwrap_or_default();
            let p = format.precision;
            write!(f, "\n\n{heading}:")?;
            write!(f, "\n  Min: {:.p$}{unit}", stats.min)?;
            write!(f, "\n  Max: {:.p$}{unit}", stats.max)?;
            write!(f, "\n  Mean: {:.p$}{unit}", stats.mean)?;
        }
        Ok(())
    }
}

/// One panel of a figure: a single curve with its labels.
#[derive(Clone, Debug, PartialEq)]
pub struct Subplot {
    pub title: String,
    pub label: String,
    pub y_desc: String,
    pub color: (u8, u8, u8),
    pub points: Vec<(f64, f64)>,
    pub y_range: Range<f64>,
}

/// Stacked subplots sharing a frequency axis.
#[derive(Clone, Debug, PartialEq)]
pub struct FrfFigure {
    pub x_range: Range<f64>,
    pub x_desc: String,
    pub subplots: Vec<Subplot>,
}

/// X axis shown when no calibration bounds are known: the full data range.
#[must_use]
pub fn default_x_range(frequency: &[f64]) -> Range<f64> {
    match frequency.iter().copied().extrema() {
        Some((min, max)) if min < max => min..max,
        Some((value, _)) if value.is_finite() => (value - 0.5)..(value + 0.5),
        _ => 0.0..1.0,
    }
}

/// Y axis for `values` with 5% headroom either side.
#[must_use]
pub fn padded_range(values: &[f64]) -> Range<f64> {
    match values.iter().copied().filter(|x| x.is_finite()).extrema() {
        Some((min, max)) if min < max => {
            let padding = (max - min) * 0.05;
            (min - padding)..(max + padding)
        }
        Some((value, _)) => (value - 0.5)..(value + 0.5),
        None => 0.0..1.0,
    }
}

/// Chirp sweep from the calibration file for the x axis.
/// Any failure is logged and gives `None` so the axis falls back to the data range.
#[must_use]
pub fn x_bounds(calibration_file: &Path) -> Option<FrequencyBounds> {
    match read_frequency_bounds(calibration_file) {
        Ok(bounds) => {
            info!(
                "Using frequency bounds from calibration parameters: {} Hz to {} Hz",
                bounds.lower, bounds.upper
            );
            Some(bounds)
        }
        Err(err) => {
            warn!(
                "Could not read frequency bounds from '{}': {err}. Using default x-axis limits.",
                calibration_file.display()
            );
            None
        }
    }
}

impl FrfFigure {
    /// One subplot per column, colors cycling through [`PALETTE`].
    /// `bounds` replace the default x axis of the full frequency range.
    #[must_use]
    pub fn new(table: &FrfTable, columns: &[Column], bounds: Option<FrequencyBounds>) -> Self {
        let x_range = bounds.map_or_else(|| default_x_range(table.frequency()), |b| b.range());
        let subplots = columns
            .iter()
            .enumerate()
            .map(|(idx, column)| Subplot {
                title: format!("Vocal Tract FRF - {}", column.name),
                label: column.name.clone(),
                y_desc: column.name.clone(),
                color: PALETTE[idx % PALETTE.len()],
                points: table
                    .frequency()
                    .iter()
                    .copied()
                    .zip(column.values.iter().copied())
                    .collect(),
                y_range: padded_range(&column.values),
            })
            .collect();
        FrfFigure {
            x_range,
            x_desc: "Frequency (Hz)".to_owned(),
            subplots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRF_CSV: &str = "Frequency_Hz,Magnitude_dB,Resistance_dB,Reactance_dB,Phase_Rad
100.00,-3.0000,1.0000,0.5000,0.1000
200.00,-1.0000,2.0000,-0.5000,0.2000
300.00,2.0000,3.0000,1.5000,-0.3000
400.00,6.0000,4.0000,2.5000,0.4000
";

    fn table(csv: &str) -> Result<FrfTable, PlotError> {
        FrfTable::from_reader(csv.as_bytes())
    }

    #[test]
    fn loads_measurement_program_output() {
        let table = table(FRF_CSV).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.frequency(), [100.0, 200.0, 300.0, 400.0]);
        assert_eq!(table.headers()[0], FREQUENCY_COLUMN);
    }

    #[test]
    fn selects_keyword_columns_in_order() {
        let table = table(FRF_CSV).unwrap();
        let names = table
            .measurement_columns()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect::<Vec<_>>();
        // Resistance_dB matches no keyword.
        assert_eq!(names, ["Magnitude_dB", "Reactance_dB", "Phase_Rad"]);
    }

    #[test]
    fn keyword_match_is_case_sensitive() {
        let table = table("Frequency_Hz,magnitude,PHASE\n1,2,3\n").unwrap();
        assert!(matches!(
            table.measurement_columns(),
            Err(PlotError::NoMeasurementColumns { .. })
        ));
    }

    #[test]
    fn missing_frequency_lists_found_columns() {
        match table("Freq,Magnitude_dB\n1,2\n") {
            Err(PlotError::MissingColumns { missing, found }) => {
                assert_eq!(missing, [FREQUENCY_COLUMN]);
                assert_eq!(found, ["Freq", "Magnitude_dB"]);
            }
            other => panic!("expected missing column error, got {other:?}"),
        }
    }

    #[test]
    fn header_cells_are_trimmed() {
        let table = table(" Frequency_Hz , Phase_Rad \n 10 , 0.5 \n").unwrap();
        assert_eq!(table.measurement_columns().unwrap()[0].values, [0.5]);
    }

    #[test]
    fn malformed_rows() {
        assert!(matches!(
            table("Frequency_Hz,Magnitude_dB\n1,2\n3\n"),
            Err(PlotError::Csv(_))
        ));
        assert!(matches!(
            table("Frequency_Hz,Magnitude_dB\n1,2\nabc,4\n"),
            Err(PlotError::InvalidValue { row: 3, .. })
        ));
        assert!(matches!(
            table("Frequency_Hz,Magnitude_dB\n"),
            Err(PlotError::EmptyTable)
        ));
        // Non-numeric columns only fail when they are plotted.
        let table = table("Frequency_Hz,Note,Phase_Rad\n1,open,2\n").unwrap();
        assert!(table.measurement_columns().is_ok());
        assert!(matches!(
            table.require_columns(&["Note"]),
            Err(PlotError::InvalidValue { column, .. }) if column == "Note"
        ));
    }

    #[test]
    fn require_columns_reports_all_missing() {
        let table = table("Frequency_Hz,Reactance_dB\n1,2\n").unwrap();
        match table.require_columns(&["Magnitude_dB", "Phase_Rad"]) {
            Err(PlotError::MissingColumns { missing, found }) => {
                assert_eq!(missing, ["Magnitude_dB", "Phase_Rad"]);
                assert_eq!(found, ["Frequency_Hz", "Reactance_dB"]);
            }
            other => panic!("expected missing column error, got {other:?}"),
        }
    }

    #[test]
    fn single_column_figure_and_stats() {
        let table = table("Frequency_Hz,Magnitude_dB\n50,-4.5\n150,3.25\n250,0.5\n350,10\n").unwrap();
        let columns = table.measurement_columns().unwrap();
        let figure = FrfFigure::new(&table, &columns, None);
        assert_eq!(figure.subplots.len(), 1);
        assert_eq!(figure.subplots[0].color, PALETTE[0]);
        assert_eq!(figure.subplots[0].points.len(), 4);
        assert_eq!(figure.x_range, 50.0..350.0);

        let stats = ColumnStats::of(&columns[0].values).unwrap();
        assert_eq!(stats.min, -4.5);
        assert_eq!(stats.max, 10.0);
        assert!((stats.mean - 2.3125).abs() < 1e-12);
    }

    #[test]
    fn calibration_bounds_set_x_range() {
        let table = table(FRF_CSV).unwrap();
        let columns = table.measurement_columns().unwrap();
        let bounds = FrequencyBounds::new(100.0, 2000.0).unwrap();
        let figure = FrfFigure::new(&table, &columns, Some(bounds));
        assert_eq!(figure.x_range, 100.0..2000.0);
        assert_eq!(figure.subplots.len(), 3);
        assert_eq!(figure.subplots[2].title, "Vocal Tract FRF - Phase_Rad");
    }

    #[test]
    fn palette_cycles() {
        let header = (0..10)
            .map(|i| format!("Phase_{i}"))
            .collect::<Vec<_>>()
            .join(",");
        let row = vec!["0"; 10].join(",");
        let csv = format!("Frequency_Hz,{header}\n1,{row}\n2,{row}\n");
        let table = table(&csv).unwrap();
        let figure = FrfFigure::new(&table, &table.measurement_columns().unwrap(), None);
        assert_eq!(figure.subplots[8].color, PALETTE[0]);
        assert_eq!(figure.subplots[9].color, PALETTE[1]);
        // Constant columns still get a drawable range.
        assert_eq!(figure.subplots[0].y_range, -0.5..0.5);
    }

    #[test]
    fn summary_text() {
        let table = table(FRF_CSV).unwrap();
        let columns = table.require_columns(&["Magnitude_dB"]).unwrap();
        let summary = FrfSummary::new(&table, &columns).to_string();
        assert_eq!(
            summary,
            "=== FRF Data Statistics ===
Frequency range: 100.00 - 400.00 Hz
Number of points: 4

Magnitude_dB:
  Min: -3.0000
  Max: 6.0000
  Mean: 1.0000"
        );
    }

    #[test]
    fn summary_with_units() {
        let table = table(FRF_CSV).unwrap();
        let columns = table.require_columns(&["Magnitude_dB"]).unwrap();
        let summary = FrfSummary::with_formats(
            &table,
            [(
                "Magnitude".to_owned(),
                &columns[0],
                StatsFormat {
                    precision: 2,
                    unit: Some("dB"),
                },
            )],
        )
        .to_string();
        assert!(summary.ends_with("Magnitude:\n  Min: -3.00 dB\n  Max: 6.00 dB\n  Mean: 1.00 dB"));
    }

    #[test]
    fn x_axis_from_calibration_file() {
        let table = table(FRF_CSV).unwrap();
        let columns = table.measurement_columns().unwrap();
        let dir = std::env::temp_dir().join(format!(
            "measurement_plots_x_bounds_{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let calibration_file = dir.join("calibration_parameters.txt");
        std::fs::write(
            &calibration_file,
            "Chirp Duration: 5.00 seconds\nChirp Start Frequency: 100.00 Hz\nChirp End Frequency: 2000.00 Hz\n",
        )
        .unwrap();

        let bounded = FrfFigure::new(&table, &columns, x_bounds(&calibration_file));
        assert_eq!(bounded.x_range, 100.0..2000.0);

        std::fs::remove_dir_all(&dir).unwrap();
        assert_eq!(x_bounds(&calibration_file), None);
        let unbounded = FrfFigure::new(&table, &columns, x_bounds(&calibration_file));
        assert_eq!(unbounded.x_range, 100.0..400.0);
    }
}
