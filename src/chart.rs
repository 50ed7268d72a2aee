//! SVG performance chart.
//!
//! Plots average time against input size for each algorithm, plus dashed
//! O(n), O(n log n) and O(n²) reference curves. All three references share
//! one scale factor, chosen so the O(n log n) curve passes through the
//! fastest algorithm's time at the largest size.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use crate::algorithms::Algorithm;
use crate::benchmark::{BenchmarkReport, BenchmarkSummary};
use crate::error::{OutputError, SortLabResult};
use crate::generator::Distribution;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 170.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;

const SERIES_COLORS: [&str; 5] = ["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd"];
const REFERENCE_STYLES: [(&str, &str); 3] = [("O(n)", "gray"), ("O(n log n)", "black"), ("O(n²)", "lightgray")];

/// One plotted line.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend text.
    pub label: String,
    /// `(n, seconds)` pairs in ascending n.
    pub points: Vec<(f64, f64)>,
}

/// The distribution plotted for `report`: the first configured one.
#[must_use]
pub fn plotted_distribution(report: &BenchmarkReport) -> Distribution {
    report
        .config
        .distributions
        .first()
        .copied()
        .unwrap_or_default()
}

/// Average-time series per algorithm for one distribution, sorted by n.
///
/// Groups whose every trial failed are left out of their series.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn time_series(summary: &[BenchmarkSummary], distribution: Distribution) -> Vec<Series> {
    let mut by_algorithm: BTreeMap<Algorithm, Vec<(f64, f64)>> = BTreeMap::new();
    for row in summary.iter().filter(|r| r.distribution == distribution) {
        if let Some(t) = row.time_seconds {
            by_algorithm
                .entry(row.algorithm)
                .or_default()
                .push((row.input_size as f64, t));
        }
    }
    by_algorithm
        .into_iter()
        .map(|(algorithm, mut points)| {
            points.sort_by(|a, b| a.0.total_cmp(&b.0));
            Series {
                label: algorithm.title().to_string(),
                points,
            }
        })
        .collect()
}

/// Reference curves evaluated at `sizes`.
///
/// `reference_time` is the time the O(n log n) curve must reach at the
/// largest size. Non-positive references fall back to 1.0.
#[must_use]
pub fn reference_curves(sizes: &[f64], reference_time: f64) -> Vec<Series> {
    let n_max = sizes.iter().copied().fold(0.0_f64, f64::max);
    let nlogn = |n: f64| if n > 0.0 { n * n.log2() } else { 0.0 };
    let reference_time = if reference_time > 0.0 { reference_time } else { 1.0 };
    let scale = if nlogn(n_max) > 0.0 {
        reference_time / nlogn(n_max)
    } else {
        1.0
    };

    let shapes: [fn(f64) -> f64; 3] = [|n| n, |n| if n > 0.0 { n * n.log2() } else { 0.0 }, |n| n * n];
    REFERENCE_STYLES
        .iter()
        .zip(shapes)
        .map(|(&(label, _), shape)| Series {
            label: label.to_string(),
            points: sizes.iter().map(|&n| (n, scale * shape(n))).collect(),
        })
        .collect()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn polyline(points: &[(f64, f64)], to_px: impl Fn((f64, f64)) -> (f64, f64)) -> String {
    points
        .iter()
        .map(|&p| {
            let (x, y) = to_px(p);
            format!("{x:.2},{y:.2}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders the performance chart for `report` as an SVG document.
#[must_use]
pub fn render_performance_svg(report: &BenchmarkReport) -> String {
    let distribution = plotted_distribution(report);
    let series = time_series(&report.summary, distribution);

    let mut sizes: Vec<f64> = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.0))
        .collect();
    sizes.sort_by(f64::total_cmp);
    sizes.dedup();

    let n_max = sizes.last().copied().unwrap_or(1.0);
    let fastest_at_max = series
        .iter()
        .filter_map(|s| s.points.iter().find(|p| p.0 == n_max).map(|p| p.1))
        .fold(f64::INFINITY, f64::min);
    let references = reference_curves(&sizes, if fastest_at_max.is_finite() { fastest_at_max } else { 1.0 });

    let measured_max = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.1))
        .fold(0.0_f64, f64::max);
    let y_max = if measured_max > 0.0 { measured_max * 1.1 } else { 1.0 };
    let x_min = sizes.first().copied().unwrap_or(0.0).min(0.0);
    let x_span = (n_max - x_min).max(1.0);

    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let to_px = |(n, t): (f64, f64)| {
        (
            MARGIN_LEFT + (n - x_min) / x_span * plot_w,
            MARGIN_TOP + plot_h - (t / y_max) * plot_h,
        )
    };

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"<defs><clipPath id="plot"><rect x="{MARGIN_LEFT}" y="{MARGIN_TOP}" width="{plot_w}" height="{plot_h}"/></clipPath></defs>"#
    );
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="30" text-anchor="middle" font-family="sans-serif" font-size="16">Sorting algorithms: time vs input size ({})</text>"#,
        MARGIN_LEFT + plot_w / 2.0,
        distribution
    );

    // Axes.
    let (x0, y0) = (MARGIN_LEFT, MARGIN_TOP + plot_h);
    let _ = writeln!(
        svg,
        r#"<line x1="{x0}" y1="{y0}" x2="{}" y2="{y0}" stroke="black"/>"#,
        x0 + plot_w
    );
    let _ = writeln!(
        svg,
        r#"<line x1="{x0}" y1="{MARGIN_TOP}" x2="{x0}" y2="{y0}" stroke="black"/>"#
    );
    for &n in &sizes {
        let (x, _) = to_px((n, 0.0));
        let _ = writeln!(
            svg,
            r#"<text x="{x:.2}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="11">{n}</text>"#,
            y0 + 18.0
        );
    }
    for tick in 0..=4 {
        let t = y_max * f64::from(tick) / 4.0;
        let (_, y) = to_px((x_min, t));
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{y:.2}" text-anchor="end" font-family="sans-serif" font-size="11">{t:.2e}</text>"#,
            x0 - 6.0
        );
    }
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="13">Input size (n)</text>"#,
        MARGIN_LEFT + plot_w / 2.0,
        HEIGHT - 15.0
    );
    let _ = writeln!(
        svg,
        r#"<text x="20" y="{}" text-anchor="middle" font-family="sans-serif" font-size="13" transform="rotate(-90 20 {})">Average time (seconds)</text>"#,
        MARGIN_TOP + plot_h / 2.0,
        MARGIN_TOP + plot_h / 2.0
    );

    let mut legend: Vec<(String, &str, bool)> = Vec::new();
    let _ = writeln!(svg, r#"<g clip-path="url(#plot)">"#);
    for (curve, &(_, color)) in references.iter().zip(REFERENCE_STYLES.iter()) {
        if curve.points.len() > 1 {
            let _ = writeln!(
                svg,
                r#"<polyline fill="none" stroke="{color}" stroke-width="1.2" stroke-dasharray="6,4" points="{}"/>"#,
                polyline(&curve.points, to_px)
            );
        }
        legend.push((curve.label.clone(), color, true));
    }
    for (idx, s) in series.iter().enumerate() {
        let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
        let _ = writeln!(
            svg,
            r#"<polyline fill="none" stroke="{color}" stroke-width="1.5" points="{}"/>"#,
            polyline(&s.points, to_px)
        );
        for &p in &s.points {
            let (x, y) = to_px(p);
            let _ = writeln!(svg, r#"<circle cx="{x:.2}" cy="{y:.2}" r="3" fill="{color}"/>"#);
        }
        legend.push((s.label.clone(), color, false));
    }
    let _ = writeln!(svg, "</g>");

    let legend_x = MARGIN_LEFT + plot_w + 15.0;
    for (idx, (label, color, dashed)) in legend.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let y = MARGIN_TOP + 10.0 + idx as f64 * 20.0;
        let dash = if *dashed { r#" stroke-dasharray="6,4""# } else { "" };
        let _ = writeln!(
            svg,
            r#"<line x1="{legend_x}" y1="{y}" x2="{}" y2="{y}" stroke="{color}" stroke-width="2"{dash}/>"#,
            legend_x + 25.0
        );
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}" font-family="sans-serif" font-size="12">{}</text>"#,
            legend_x + 32.0,
            y + 4.0,
            escape(label)
        );
    }
    svg.push_str("</svg>\n");
    svg
}

/// Renders and writes the chart to `path`.
pub fn write_performance_svg(report: &BenchmarkReport, path: impl AsRef<Path>) -> SortLabResult<()> {
    let path = path.as_ref();
    std::fs::write(path, render_performance_svg(report)).map_err(|e| OutputError::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::run_benchmarks;
    use crate::config::BenchmarkConfig;

    #[test]
    fn test_reference_curves_meet_at_largest_n() {
        let curves = reference_curves(&[10.0, 100.0, 1000.0], 0.5);
        assert_eq!(curves.len(), 3);
        let nlogn = &curves[1];
        assert_eq!(nlogn.label, "O(n log n)");
        let (_, at_max) = nlogn.points[2];
        assert!((at_max - 0.5).abs() < 1e-12);
        // O(n²) dominates O(n) at the largest size.
        assert!(curves[2].points[2].1 > curves[0].points[2].1);
    }

    #[test]
    fn test_reference_curves_fallback_scale() {
        let curves = reference_curves(&[1.0], 0.0);
        // log2(1) = 0 so the scale falls back to 1.
        assert_eq!(curves[0].points, vec![(1.0, 1.0)]);
    }

    #[test]
    fn test_time_series_skips_failed_groups() {
        let summary = vec![
            BenchmarkSummary {
                algorithm: Algorithm::Bubble,
                distribution: Distribution::Random,
                input_size: 20,
                completed_trials: 1,
                failed_trials: 0,
                time_seconds: Some(0.2),
                comparisons: Some(1.0),
                swaps: Some(1.0),
            },
            BenchmarkSummary {
                algorithm: Algorithm::Bubble,
                distribution: Distribution::Random,
                input_size: 10,
                completed_trials: 0,
                failed_trials: 1,
                time_seconds: None,
                comparisons: None,
                swaps: None,
            },
        ];
        let series = time_series(&summary, Distribution::Random);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label, "Bubble Sort");
        assert_eq!(series[0].points, vec![(20.0, 0.2)]);
        assert!(time_series(&summary, Distribution::Sorted).is_empty());
    }

    #[test]
    fn test_svg_lists_every_algorithm() {
        let report = run_benchmarks(&BenchmarkConfig {
            sizes: vec![8, 16],
            trials: 1,
            ..BenchmarkConfig::default()
        })
        .unwrap();
        let svg = render_performance_svg(&report);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        for alg in Algorithm::ALL {
            assert!(svg.contains(alg.title()), "missing {alg}");
        }
        assert!(svg.contains("O(n log n)"));
        assert_eq!(svg.matches("stroke-dasharray").count(), 6);
    }
}
