//! Time-series figure construction on top of plotters.

use std::ops::Range;
use std::path::Path;

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use plotters::chart::{ChartBuilder, ChartContext};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::{RangedCoordf64, RangedDateTime};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontTransform};

use crate::axis::{self, AxisFormat};
use crate::colormap;
use crate::config::{FigureConfig, FontConfig, StyleConfig};
use crate::error::{Result, TsPlotError};
use crate::frequency::{infer_frequency, Frequency};
use crate::range::date_range;

/// A styled chart context for one subplot of a [`TimeSeriesFigure`].
pub type TimeChart<'c, 'b> = ChartContext<
    'c,
    BitMapBackend<'b>,
    Cartesian2d<RangedDateTime<DateTime<Utc>>, RangedCoordf64>,
>;

/// A styled figure with one drawing area per subplot cell.
///
/// The figure owns the plotters drawing areas; [`TimeSeriesFigure::chart`]
/// lends a chart context with the temporal axis formatting already applied,
/// ready for `draw_series` calls.
pub struct TimeSeriesFigure<'a> {
    root: DrawingArea<BitMapBackend<'a>, Shift>,
    axes: Vec<DrawingArea<BitMapBackend<'a>, Shift>>,
    x_range: Range<DateTime<Utc>>,
    y_range: Range<f64>,
    format: AxisFormat,
    palette: Vec<RGBColor>,
    style: StyleConfig,
    x_desc: Option<String>,
    y_desc: Option<String>,
}

/// Builds a styled time-series figure and the derived x-axis range.
///
/// At least one of `x_sample` and `y_sample` must be non-empty; an empty
/// slice is treated the same as an absent one. The derived range has one
/// point per sample entry, starting at the configured start time (falling
/// back to the first x value, then to January 1 of the current year) and
/// stepping by the configured frequency (falling back to the step inferred
/// from the x-sample, then to one day).
///
/// Returns the figure and the newly generated x-axis values. The figure is
/// written to `path` once [`TimeSeriesFigure::present`] is called.
pub fn time_series<'a, P: AsRef<Path> + ?Sized>(
    path: &'a P,
    x_sample: Option<&[DateTime<Utc>]>,
    y_sample: Option<&[f64]>,
    config: &FigureConfig,
) -> Result<(TimeSeriesFigure<'a>, Vec<DateTime<Utc>>)> {
    config.validate()?;

    let x_sample = x_sample.filter(|sample| !sample.is_empty());
    let y_sample = y_sample.filter(|sample| !sample.is_empty());

    let periods = match (x_sample, y_sample) {
        (Some(x), _) => x.len(),
        (None, Some(y)) => y.len(),
        (None, None) => {
            return Err(TsPlotError::input(
                "must provide at least one of x or y values",
            ))
        }
    };

    // User-provided takes priority, then inferred, then default.
    let frequency = config
        .frequency
        .or_else(|| x_sample.and_then(infer_frequency))
        .unwrap_or_else(Frequency::daily);

    let start_time = config
        .start_time
        .or_else(|| x_sample.map(|sample| sample[0]))
        .unwrap_or_else(default_start_time);

    let derived = date_range(start_time, periods, &frequency)?;
    tracing::debug!(
        periods,
        frequency = %frequency,
        start = %start_time,
        "derived x-axis range"
    );

    let figure = TimeSeriesFigure::new(path, config, &derived, &frequency, y_sample)?;
    Ok((figure, derived))
}

impl std::fmt::Debug for TimeSeriesFigure<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeSeriesFigure")
            .field("x_range", &self.x_range)
            .field("y_range", &self.y_range)
            .field("format", &self.format)
            .field("palette", &self.palette)
            .field("style", &self.style)
            .field("x_desc", &self.x_desc)
            .field("y_desc", &self.y_desc)
            .field("subplots", &self.axes.len())
            .finish()
    }
}

impl<'a> TimeSeriesFigure<'a> {
    fn new<P: AsRef<Path> + ?Sized>(
        path: &'a P,
        config: &FigureConfig,
        derived: &[DateTime<Utc>],
        frequency: &Frequency,
        y_sample: Option<&[f64]>,
    ) -> Result<Self> {
        let (width, height) = config.dimensions();
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();

        let background =
            colormap::parse_color(config.style.background_color.as_deref().unwrap_or("#ffffff"));
        root.fill(&background)?;

        let root = match &config.title {
            Some(title) => root.titled(
                title,
                font_of(&config.style.title_font),
            )?,
            None => root,
        };

        let axes = if config.rows * config.cols == 1 {
            vec![root.clone()]
        } else {
            root.split_evenly((config.rows, config.cols))
        };

        Ok(Self {
            root,
            axes,
            x_range: x_axis_range(derived, frequency),
            y_range: y_axis_range(y_sample),
            format: AxisFormat::for_range(derived, config.x_label_format.as_deref()),
            palette: config.style.colors.resolve()?,
            style: config.style.clone(),
            x_desc: config.x_label.clone(),
            y_desc: config.y_label.clone(),
        })
    }

    /// The root drawing area spanning the whole figure.
    pub fn root(&self) -> &DrawingArea<BitMapBackend<'a>, Shift> {
        &self.root
    }

    /// The subplot drawing areas, in row-major order.
    pub fn axes(&self) -> &[DrawingArea<BitMapBackend<'a>, Shift>] {
        &self.axes
    }

    /// The color palette resolved for this figure.
    pub fn palette(&self) -> &[RGBColor] {
        &self.palette
    }

    /// Color for the given series index, cycling past the palette end.
    pub fn series_color(&self, index: usize) -> RGBColor {
        self.palette[index % self.palette.len()]
    }

    /// Builds a styled chart context on the given subplot.
    ///
    /// Tick formats, label counts, grid lines and fonts follow the figure
    /// configuration; the coordinate ranges cover the derived x range and
    /// the padded y-sample range.
    pub fn chart(&self, index: usize) -> Result<TimeChart<'_, 'a>> {
        let area = self.axes.get(index).ok_or_else(|| {
            TsPlotError::input(format!("subplot index {index} out of range"))
        })?;

        let margins = &self.style.margins;
        let mut chart = ChartBuilder::on(area)
            .margin_top(margins.top)
            .margin_right(margins.right)
            .x_label_area_size(margins.bottom)
            .y_label_area_size(margins.left)
            .build_cartesian_2d(self.x_range.clone(), self.y_range.clone())?;

        let grid_color =
            colormap::parse_color(self.style.grid.color.as_deref().unwrap_or(axis::GRID_COLOR));
        let label_font = font_of(&self.style.label_font);
        let x_label_font = if self.style.rotate_x_labels {
            label_font.clone().transform(FontTransform::Rotate90)
        } else {
            label_font.clone()
        };

        let x_formatter =
            |timestamp: &DateTime<Utc>| timestamp.format(&self.format.x_format).to_string();
        let y_formatter = |value: &f64| axis::format_y_label(*value);

        let mut mesh = chart.configure_mesh();
        if !self.style.grid.show_x {
            mesh.disable_x_mesh();
        }
        if !self.style.grid.show_y {
            mesh.disable_y_mesh();
        }
        mesh.x_labels(self.format.x_labels)
            .y_labels(self.format.y_labels)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .light_line_style(&grid_color.mix(0.4))
            .bold_line_style(&grid_color)
            .label_style(label_font)
            .x_label_style(x_label_font)
            .axis_desc_style(font_of(&self.style.axis_font));
        if let Some(desc) = &self.x_desc {
            mesh.x_desc(desc);
        }
        if let Some(desc) = &self.y_desc {
            mesh.y_desc(desc);
        }
        mesh.draw()?;

        Ok(chart)
    }

    /// Draws a line series on a chart, cycling the figure palette.
    ///
    /// When `label` is given the series is registered for the legend drawn
    /// by [`TimeSeriesFigure::draw_legend`].
    pub fn draw_line(
        &self,
        chart: &mut TimeChart<'_, 'a>,
        x_values: &[DateTime<Utc>],
        y_values: &[f64],
        series_index: usize,
        label: Option<&str>,
    ) -> Result<()> {
        if x_values.len() != y_values.len() {
            return Err(TsPlotError::input(format!(
                "series length mismatch: {} x values against {} y values",
                x_values.len(),
                y_values.len()
            )));
        }

        let color = self.series_color(series_index);
        let points: Vec<(DateTime<Utc>, f64)> = x_values
            .iter()
            .copied()
            .zip(y_values.iter().copied())
            .collect();

        let series = chart.draw_series(LineSeries::new(points, &color))?;
        if let Some(label) = label {
            series
                .label(label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], &color));
        }
        Ok(())
    }

    /// Draws the legend for all labeled series on a chart.
    pub fn draw_legend<'c>(&self, chart: &mut TimeChart<'c, 'a>) -> Result<()>
    where
        'a: 'c,
    {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
        Ok(())
    }

    /// Finalizes the figure, writing the bitmap to its path.
    pub fn present(&self) -> Result<()> {
        self.root.present()?;
        tracing::info!("time-series figure written");
        Ok(())
    }
}

fn font_of(config: &FontConfig) -> FontDesc<'_> {
    (config.family.as_str(), config.size).into()
}

fn default_start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(Utc::now().year(), 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn x_axis_range(derived: &[DateTime<Utc>], frequency: &Frequency) -> Range<DateTime<Utc>> {
    let start = derived[0];
    let end = derived[derived.len() - 1];
    if start == end {
        // A single point needs a non-degenerate coordinate span.
        let extended = frequency.advance(end).unwrap_or(end + Duration::days(1));
        start..extended
    } else {
        start..end
    }
}

fn y_axis_range(sample: Option<&[f64]>) -> Range<f64> {
    let Some(sample) = sample else {
        return 0.0..1.0;
    };

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in sample {
        min = min.min(*value);
        max = max.max(*value);
    }
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }

    // 5% padding on both sides so extreme points stay off the frame.
    let span = max - min;
    let padding = if span > 0.0 { span * 0.05 } else { 1.0 };
    (min - padding)..(max + padding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_y_axis_range_padding() {
        let range = y_axis_range(Some(&[0.0, 10.0]));
        assert!((range.start + 0.5).abs() < 1e-9);
        assert!((range.end - 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_y_axis_range_defaults() {
        assert_eq!(y_axis_range(None), 0.0..1.0);

        // Constant samples still get a usable span
        let range = y_axis_range(Some(&[3.0, 3.0, 3.0]));
        assert_eq!(range, 2.0..4.0);
    }

    #[test]
    fn test_x_axis_range_extends_single_point() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let range = x_axis_range(&[start], &Frequency::daily());
        assert_eq!(range.end - range.start, Duration::days(1));

        let two = [start, start + Duration::hours(1)];
        let range = x_axis_range(&two, &Frequency::daily());
        assert_eq!(range.start, start);
        assert_eq!(range.end, two[1]);
    }

    #[test]
    fn test_default_start_time_is_january_first() {
        let start = default_start_time();
        assert_eq!(start.month(), 1);
        assert_eq!(start.day(), 1);
        assert_eq!(start.year(), Utc::now().year());
    }
}
