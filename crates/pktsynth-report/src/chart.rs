//! SVG comparison charts.
//!
//! Both charts are two side-by-side panels (real on the left, synthetic on
//! the right) sharing axis ranges so the panels can be compared by eye.

use std::error::Error;
use std::path::Path;

use pktsynth_model::Record;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::comparison::ComparisonSummary;
use crate::density::{Histogram, gaussian_kde, linspace};
use crate::error::{ReportError, Result};

pub const CHART_SIZE: (u32, u32) = (1400, 600);
pub const HISTOGRAM_BINS: usize = 50;
const KDE_POINTS: usize = 200;

const REAL_COLOR: RGBColor = RGBColor(31, 119, 180);
const SYNTHETIC_COLOR: RGBColor = RGBColor(255, 127, 14);

type DrawResult = std::result::Result<(), Box<dyn Error>>;

/// Protocol probability bar charts, protocols in the summary's ranked order.
pub fn render_protocol_comparison(path: &Path, summary: &ComparisonSummary) -> Result<()> {
    draw_protocol_comparison(path, summary).map_err(|err| chart_error(path, &*err))?;
    tracing::debug!(path = %path.display(), protocols = summary.protocols.len(), "rendered protocol chart");
    Ok(())
}

/// Length histograms (density units) with a KDE overlay.
pub fn render_length_comparison(path: &Path, real: &[Record], synthetic: &[Record]) -> Result<()> {
    draw_length_comparison(path, real, synthetic).map_err(|err| chart_error(path, &*err))?;
    tracing::debug!(path = %path.display(), "rendered length chart");
    Ok(())
}

fn chart_error(path: &Path, err: &dyn Error) -> ReportError {
    ReportError::Chart {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn draw_protocol_comparison(path: &Path, summary: &ComparisonSummary) -> DrawResult {
    let labels: Vec<&str> = summary.labels().collect();
    let real: Vec<f64> = summary.protocols.iter().map(|row| row.real.frequency).collect();
    let synthetic: Vec<f64> = summary
        .protocols
        .iter()
        .map(|row| row.synthetic.frequency)
        .collect();
    let y_max = real
        .iter()
        .chain(synthetic.iter())
        .copied()
        .fold(0.0, f64::max)
        .max(1e-3)
        * 1.1;

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, 2));
    draw_bar_panel(&panels[0], "Real protocol distribution", &labels, &real, y_max, REAL_COLOR)?;
    draw_bar_panel(
        &panels[1],
        "Synthetic protocol distribution",
        &labels,
        &synthetic,
        y_max,
        SYNTHETIC_COLOR,
    )?;
    root.present()?;
    Ok(())
}

fn draw_bar_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    caption: &str,
    labels: &[&str],
    values: &[f64],
    y_max: f64,
    color: RGBColor,
) -> DrawResult {
    let n = labels.len().max(1) as u32;
    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..n).into_segmented(), 0.0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Protocol")
        .y_desc("Probability")
        .x_labels(labels.len().max(1))
        .x_label_formatter(&|value| match value {
            SegmentValue::CenterOf(index) => labels
                .get(*index as usize)
                .map(|label| (*label).to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(values.iter().enumerate().map(|(index, &value)| {
        let index = index as u32;
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(index), 0.0),
                (SegmentValue::Exact(index + 1), value),
            ],
            color.filled(),
        );
        bar.set_margin(0, 0, 6, 6);
        bar
    }))?;
    Ok(())
}

fn draw_length_comparison(path: &Path, real: &[Record], synthetic: &[Record]) -> DrawResult {
    let real: Vec<f64> = real.iter().map(|r| r.length as f64).collect();
    let synthetic: Vec<f64> = synthetic.iter().map(|r| r.length as f64).collect();

    let x_min = 0.0;
    let x_max = real
        .iter()
        .chain(synthetic.iter())
        .copied()
        .fold(0.0, f64::max);
    let real_hist = Histogram::with_range(&real, x_min, x_max, HISTOGRAM_BINS);
    let synthetic_hist = Histogram::with_range(&synthetic, x_min, x_max, HISTOGRAM_BINS);
    let x_range = real_hist.start..real_hist.end();

    let grid = linspace(x_range.start, x_range.end, KDE_POINTS);
    let real_kde = gaussian_kde(&real, &grid);
    let synthetic_kde = gaussian_kde(&synthetic, &grid);

    let y_max = real_hist
        .densities()
        .into_iter()
        .chain(synthetic_hist.densities())
        .chain(real_kde.iter().flatten().copied())
        .chain(synthetic_kde.iter().flatten().copied())
        .fold(0.0, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, 2));
    let real_panel = DensityPanel {
        caption: "Real length distribution",
        histogram: &real_hist,
        kde: real_kde.as_deref(),
        grid: &grid,
        color: REAL_COLOR,
    };
    let synthetic_panel = DensityPanel {
        caption: "Synthetic length distribution",
        histogram: &synthetic_hist,
        kde: synthetic_kde.as_deref(),
        grid: &grid,
        color: SYNTHETIC_COLOR,
    };
    real_panel.draw(&panels[0], x_range.clone(), y_max)?;
    synthetic_panel.draw(&panels[1], x_range, y_max)?;
    root.present()?;
    Ok(())
}

struct DensityPanel<'a> {
    caption: &'a str,
    histogram: &'a Histogram,
    kde: Option<&'a [f64]>,
    grid: &'a [f64],
    color: RGBColor,
}

impl DensityPanel<'_> {
    fn draw(
        &self,
        area: &DrawingArea<SVGBackend<'_>, Shift>,
        x_range: std::ops::Range<f64>,
        y_max: f64,
    ) -> DrawResult {
        let mut chart = ChartBuilder::on(area)
            .caption(self.caption, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, 0.0f64..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Length")
            .y_desc("Density")
            .x_labels(10)
            .y_label_formatter(&|y| format!("{y:.1e}"))
            .draw()?;

        let densities = self.histogram.densities();
        chart.draw_series(densities.iter().enumerate().map(|(index, &density)| {
            let (left, right) = self.histogram.bin_edges(index);
            Rectangle::new([(left, 0.0), (right, density)], self.color.mix(0.6).filled())
        }))?;

        if let Some(kde) = self.kde {
            chart.draw_series(LineSeries::new(
                self.grid.iter().copied().zip(kde.iter().copied()),
                BLACK.stroke_width(2),
            ))?;
        }
        Ok(())
    }
}
