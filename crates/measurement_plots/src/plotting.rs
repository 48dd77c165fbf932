use crate::{
    args::WindowShapeOpt,
    constants::{FIGURE_WIDTH, PALETTE, SUBPLOT_HEIGHT},
    frf::{padded_range, FrfFigure},
    window::zoom_range,
};
use log::{info, warn};
use plotters::{
    coord::{cartesian::Cartesian2d, types::RangedCoordf64, Shift},
    prelude::*,
};
use std::{ops::Range, path::Path};
use stft::Stft;

/// Intensities more than this far below a spectrogram's peak share the lowest color.
const SPECTROGRAM_DYNAMIC_RANGE_DB: f64 = 100.0;
/// Width of a spectrogram's color bar including its labels.
const COLOR_BAR_WIDTH: i32 = 110;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;
type Chart<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Palette entry as a plotters color.
#[must_use]
pub fn palette_color(idx: usize) -> RGBColor {
    let (r, g, b) = PALETTE[idx % PALETTE.len()];
    RGBColor(r, g, b)
}

fn rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

/// Draw the legend box in the corner matplotlib would pick most often.
fn draw_legend<'a, 'b: 'a>(chart: &mut Chart<'a, 'b>) -> anyhow::Result<()> {
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", 15))
        .draw()?;
    Ok(())
}

/// Plot each subplot of a frequency response figure stacked vertically.
pub fn plot_frf(figure: &FrfFigure, file_out: &Path) -> anyhow::Result<()> {
    let height = SUBPLOT_HEIGHT * figure.subplots.len().max(1) as u32;
    let root = BitMapBackend::new(file_out, (FIGURE_WIDTH, height)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((figure.subplots.len().max(1), 1));

    for (subplot, area) in figure.subplots.iter().zip(areas.iter()) {
        let color = rgb(subplot.color);
        let mut chart = ChartBuilder::on(area)
            .caption(&subplot.title, ("sans-serif", 24).into_font().style(FontStyle::Bold))
            .margin(10)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(figure.x_range.clone(), subplot.y_range.clone())?;

        chart
            .configure_mesh()
            .bold_line_style(BLACK.mix(0.3))
            .light_line_style(BLACK.mix(0.1))
            .x_desc(&figure.x_desc)
            .y_desc(&subplot.y_desc)
            .draw()?;

        // Points outside the calibration bounds are not drawn.
        let x_range = &figure.x_range;
        chart
            .draw_series(LineSeries::new(
                subplot
                    .points
                    .iter()
                    .copied()
                    .filter(|(x, _)| x_range.start <= *x && *x <= x_range.end),
                color.stroke_width(2),
            ))?
            .label(&subplot.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        draw_legend(&mut chart)?;
    }

    root.present()?;
    info!("Plot saved to: {}", file_out.display());
    Ok(())
}

/// One curve of a waveform panel.
#[derive(Clone, Copy, Debug)]
pub struct Trace<'a> {
    pub label: &'a str,
    pub samples: &'a [f32],
    pub color: RGBColor,
}

/// A panel of sample-index vs amplitude curves.
#[derive(Clone, Debug)]
pub struct WaveformPanel<'a> {
    pub title: &'a str,
    pub traces: Vec<Trace<'a>>,
}

/// Plot panels of time domain signals stacked vertically. Curves within a panel are overlaid.
pub fn plot_waveforms(panels: &[WaveformPanel<'_>], file_out: &Path) -> anyhow::Result<()> {
    let rows = panels.len().max(1);
    let root = BitMapBackend::new(file_out, (FIGURE_WIDTH, SUBPLOT_HEIGHT * rows as u32))
        .into_drawing_area();
    root.fill(&WHITE)?;

    for (panel, area) in panels.iter().zip(root.split_evenly((rows, 1)).iter()) {
        let len = panel
            .traces
            .iter()
            .map(|t| t.samples.len())
            .max()
            .unwrap_or(0)
            .max(1);
        let all_values = panel
            .traces
            .iter()
            .flat_map(|t| t.samples.iter().copied().map(f64::from))
            .collect::<Vec<_>>();
        let mut chart = ChartBuilder::on(area)
            .caption(panel.title, ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(0f64..len as f64, padded_range(&all_values))?;

        chart
            .configure_mesh()
            .bold_line_style(BLACK.mix(0.3))
            .light_line_style(BLACK.mix(0.1))
            .x_desc("Sample Index")
            .y_desc("Amplitude")
            .draw()?;

        for trace in &panel.traces {
            let color = trace.color;
            chart
                .draw_series(LineSeries::new(
                    trace
                        .samples
                        .iter()
                        .enumerate()
                        .map(|(i, &x)| (i as f64, f64::from(x))),
                    color.stroke_width(1),
                ))?
                .label(trace.label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }
        draw_legend(&mut chart)?;
    }

    root.present()?;
    info!("Successfully saved waveform plot to {}", file_out.display());
    Ok(())
}

/// A spectrogram to draw and how to label it.
#[derive(Debug)]
pub struct SpectrogramPanel<'a> {
    pub title: &'a str,
    pub stft: &'a Stft,
    pub sample_rate: f32,
}

/// Map `t` in `0..=1` from blue (low) to red (high).
fn intensity_color(t: f64) -> HSLColor {
    HSLColor((1.0 - t.clamp(0.0, 1.0)) * 0.7, 1.0, 0.5)
}

/// Lowest and highest finite intensity to color, limited to [`SPECTROGRAM_DYNAMIC_RANGE_DB`].
fn db_range(db: &[Vec<f64>]) -> Range<f64> {
    let finite = db.iter().flatten().copied().filter(|x| x.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), x| {
        (min.min(x), max.max(x))
    });
    if min > max {
        return -1.0..0.0;
    }
    let min = min.max(max - SPECTROGRAM_DYNAMIC_RANGE_DB);
    if min < max {
        min..max
    } else {
        (max - 1.0)..max
    }
}

fn draw_spectrogram(area: &Area<'_>, panel: &SpectrogramPanel<'_>) -> anyhow::Result<()> {
    let SpectrogramPanel {
        title,
        stft,
        sample_rate,
    } = *panel;
    let times = stft.times(sample_rate);
    let frequencies = stft.frequencies(sample_rate);
    let dt = stft.window_step().samples() as f64 / f64::from(sample_rate);
    let df = frequencies.get(1).copied().unwrap_or(f64::from(sample_rate) / 2.0);

    // Power spectral density to decibels.
    let db = stft
        .bins()
        .map(|bin| bin.iter().map(|x| 10.0 * x.log10()).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    let intensity = db_range(&db);
    info!(
        "{title}: {} windows, intensity {:.1} dB to {:.1} dB",
        times.len(),
        intensity.start,
        intensity.end
    );

    let (width, _) = area.dim_in_pixel();
    let (main, bar) = area.split_horizontally(width as i32 - COLOR_BAR_WIDTH);

    let x_range = (times[0] - dt / 2.0)..(times[times.len() - 1] + dt / 2.0);
    let y_range = 0f64..f64::from(sample_rate) / 2.0;
    let mut chart = ChartBuilder::on(&main)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range.clone(), y_range.clone())?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Time [sec]")
        .y_desc("Frequency [Hz]")
        .draw()?;

    let (low_db, span) = (intensity.start, intensity.end - intensity.start);
    let cells = db.iter().enumerate().flat_map(|(k, bin)| {
        let f = frequencies[k];
        let (f0, f1) = ((f - df / 2.0).max(y_range.start), (f + df / 2.0).min(y_range.end));
        let (times, x_range) = (&times, &x_range);
        bin.iter().enumerate().map(move |(i, &value)| {
            let t = times[i];
            let (t0, t1) = ((t - dt / 2.0).max(x_range.start), (t + dt / 2.0).min(x_range.end));
            let level = if value.is_finite() {
                (value - low_db) / span
            } else {
                0.0
            };
            Rectangle::new([(t0, f0), (t1, f1)], intensity_color(level).filled())
        })
    });
    chart.draw_series(cells)?;

    // Color bar.
    let mut bar_chart = ChartBuilder::on(&bar)
        .margin_top(45)
        .margin_bottom(55)
        .margin_right(10)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..1f64, intensity.clone())?;
    bar_chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc("Intensity [dB]")
        .draw()?;
    const BAR_STEPS: usize = 100;
    bar_chart.draw_series((0..BAR_STEPS).map(|step| {
        let lower = intensity.start + span * step as f64 / BAR_STEPS as f64;
        let upper = intensity.start + span * (step + 1) as f64 / BAR_STEPS as f64;
        Rectangle::new(
            [(0.0, lower), (1.0, upper)],
            intensity_color(step as f64 / (BAR_STEPS - 1) as f64).filled(),
        )
    }))?;
    Ok(())
}

/// Plot power spectral density spectrograms stacked vertically in decibels.
/// Panels without a single full window are left blank with a warning.
pub fn plot_spectrograms(panels: &[SpectrogramPanel<'_>], file_out: &Path) -> anyhow::Result<()> {
    let rows = panels.len().max(1);
    let root = BitMapBackend::new(file_out, (FIGURE_WIDTH, SUBPLOT_HEIGHT * rows as u32))
        .into_drawing_area();
    root.fill(&WHITE)?;

    for (panel, area) in panels.iter().zip(root.split_evenly((rows, 1)).iter()) {
        if panel.stft.is_empty() {
            warn!(
                "{}: signal is shorter than one {} sample segment, nothing to draw",
                panel.title,
                panel.stft.window_len().samples()
            );
            continue;
        }
        draw_spectrogram(area, panel)?;
    }

    root.present()?;
    info!("Successfully saved spectrogram to {}", file_out.display());
    Ok(())
}

/// Plot a window buffer with its flat and fade regions marked, in full and zoomed on the fade.
pub fn plot_window(values: &[f32], shape: WindowShapeOpt, file_out: &Path) -> anyhow::Result<()> {
    let fade_end = shape.checked_fade_end()?;
    let breakpoints = (shape.ir_len, fade_end);
    let root = BitMapBackend::new(file_out, (1400, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((2, 1));
    let (blue, orange) = (palette_color(0), palette_color(3));

    // Full window.
    let len = values.len().max(1) as f64;
    let mut chart = ChartBuilder::on(&areas[0])
        .caption("Tukey Window (Full)", ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..len, 0f64..1.2)?;
    chart
        .configure_mesh()
        .bold_line_style(BLACK.mix(0.3))
        .light_line_style(BLACK.mix(0.1))
        .x_desc("Sample Index")
        .y_desc("Window Value")
        .draw()?;

    let regions = [
        (0.0, shape.ir_len as f64, blue, "Flat region".to_owned()),
        (shape.ir_len as f64, fade_end as f64, orange, "Fade region".to_owned()),
    ];
    for (start, end, color, label) in regions {
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(start.min(len), 0.0), (end.min(len), 1.2)],
                color.mix(0.1).filled(),
            )))?
            .label(label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.mix(0.3).filled()));
    }
    chart
        .draw_series(LineSeries::new(
            values.iter().enumerate().map(|(i, &x)| (i as f64, f64::from(x))),
            blue.stroke_width(1),
        ))?
        .label("Window")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], blue.stroke_width(2)));
    draw_breakpoints(&mut chart, breakpoints, 1.2, (
        format!("IR end (n={})", shape.ir_len),
        format!("Fade end (n={fade_end})"),
    ))?;
    draw_legend(&mut chart)?;

    // Zoomed on the fade.
    let zoom = zoom_range(shape, values.len());
    let x_range = zoom.start as f64..(zoom.end.max(zoom.start + 1)) as f64;
    let mut chart = ChartBuilder::on(&areas[1])
        .caption("Tukey Window (Zoomed on Fade Region)", ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, 0f64..1.1)?;
    chart
        .configure_mesh()
        .bold_line_style(BLACK.mix(0.3))
        .light_line_style(BLACK.mix(0.1))
        .x_desc("Sample Index")
        .y_desc("Window Value")
        .draw()?;
    let zoomed = values[zoom.clone()]
        .iter()
        .enumerate()
        .map(|(i, &x)| ((zoom.start + i) as f64, f64::from(x)))
        .collect::<Vec<_>>();
    chart
        .draw_series(LineSeries::new(zoomed.iter().copied(), orange.stroke_width(2)))?
        .label("Window (zoomed)")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], orange.stroke_width(2)));
    chart.draw_series(zoomed.iter().map(|&point| Circle::new(point, 3, orange.filled())))?;
    draw_breakpoints(&mut chart, breakpoints, 1.1, (
        "Flat end / Fade start".to_owned(),
        "Fade end".to_owned(),
    ))?;
    draw_legend(&mut chart)?;

    root.present()?;
    info!("Plot saved to {}", file_out.display());
    Ok(())
}

/// Vertical lines at the end of the flat region (red) and the end of the fade (green).
fn draw_breakpoints<'a, 'b: 'a>(
    chart: &mut Chart<'a, 'b>,
    (ir_len, fade_end): (usize, usize),
    top: f64,
    (ir_label, fade_label): (String, String),
) -> anyhow::Result<()> {
    let lines = [
        (ir_len as f64, palette_color(1), ir_label),
        (fade_end as f64, palette_color(2), fade_label),
    ];
    for (x, color, label) in lines {
        chart
            .draw_series(LineSeries::new([(x, 0.0), (x, top)], color.stroke_width(2)))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }
    Ok(())
}
