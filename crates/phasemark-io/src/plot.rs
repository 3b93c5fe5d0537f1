//! Summary plot rendering.
//!
//! Draws fingerprint summaries the way the measurement campaigns are
//! inspected: per-subcarrier mean as a marked line, with the batch
//! standard deviation as vertical error bars. Purely a visualization
//! sink; nothing is read back.

use std::path::Path;

use plotters::prelude::*;

use phasemark_core::{Error, Result};
use phasemark_fingerprint::SummaryResult;

/// Colors assigned to series when the caller does not pick one
pub const DEFAULT_COLORS: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

/// One labeled summary to render
pub struct SummarySeries<'a> {
    pub label: &'a str,
    pub summary: &'a SummaryResult,
    pub color: RGBColor,
}

/// Render a single summary as an error-bar + line chart
pub fn plot_summary<P: AsRef<Path>>(
    path: P,
    summary: &SummaryResult,
    label: &str,
    color: Option<RGBColor>,
) -> Result<()> {
    let series = SummarySeries {
        label,
        summary,
        color: color.unwrap_or(DEFAULT_COLORS[0]),
    };
    plot_summaries(path, &[series])
}

/// Render one or more labeled summaries on a shared chart.
///
/// Empty summaries are tolerated: the chart is still produced, just
/// without marks for the empty series.
pub fn plot_summaries<P: AsRef<Path>>(path: P, series: &[SummarySeries<'_>]) -> Result<()> {
    let path = path.as_ref();
    let root = BitMapBackend::new(path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let max_len = series
        .iter()
        .map(|s| s.summary.subcarrier_count())
        .max()
        .unwrap_or(0);

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for s in series {
        for (&m, &sd) in s.summary.mean.iter().zip(s.summary.std.iter()) {
            y_min = y_min.min(m - sd);
            y_max = y_max.max(m + sd);
        }
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        y_min = -1.0;
        y_max = 1.0;
    }
    if (y_max - y_min) < f64::EPSILON {
        y_min -= 0.5;
        y_max += 0.5;
    }
    let pad = 0.05 * (y_max - y_min);

    let x_max = max_len.max(1) as f64;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..(x_max - 0.5), (y_min - pad)..(y_max + pad))
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Subcarrier index")
        .y_desc("Phase error (rad)")
        .draw()
        .map_err(plot_err)?;

    for s in series {
        let color = s.color;

        chart
            .draw_series(
                s.summary
                    .mean
                    .iter()
                    .zip(s.summary.std.iter())
                    .enumerate()
                    .map(|(i, (&m, &sd))| {
                        ErrorBar::new_vertical(i as f64, m - sd, m, m + sd, color.stroke_width(1), 6)
                    }),
            )
            .map_err(plot_err)?;

        chart
            .draw_series(LineSeries::new(
                s.summary.mean.iter().enumerate().map(|(i, &m)| (i as f64, m)),
                color.stroke_width(2),
            ))
            .map_err(plot_err)?
            .label(s.label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
            });

        chart
            .draw_series(
                s.summary
                    .mean
                    .iter()
                    .enumerate()
                    .map(|(i, &m)| Circle::new((i as f64, m), 3, color.filled())),
            )
            .map_err(plot_err)?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    tracing::debug!(path = %path.display(), series = series.len(), "rendered summary plot");
    Ok(())
}

fn plot_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Plot(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    fn summary(n: usize) -> SummaryResult {
        SummaryResult {
            mean: Array1::from_shape_fn(n, |i| (i as f64 * 0.3).sin() * 0.1),
            std: Array1::from_elem(n, 0.02),
        }
    }

    #[test]
    fn test_plot_single_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.png");
        plot_summary(&path, &summary(52), "device A", None).unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_plot_two_series() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pair.png");
        let s1 = summary(52);
        let s2 = summary(52);
        let series = [
            SummarySeries {
                label: "group 1",
                summary: &s1,
                color: DEFAULT_COLORS[0],
            },
            SummarySeries {
                label: "group 2",
                summary: &s2,
                color: DEFAULT_COLORS[1],
            },
        ];
        plot_summaries(&path, &series).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_empty_summary_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        let s = SummaryResult {
            mean: Array1::zeros(0),
            std: Array1::zeros(0),
        };
        plot_summary(&path, &s, "empty", None).unwrap();
        assert!(path.exists());
    }
}
