use crate::core::analysis::convergence::ConvergenceAnalysis;
use crate::core::analysis::series::ScoreSeries;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_SCORE_LABEL: &str = "MOLPDF score (a.u.)";
/// 6 x 10 inches at 100 dpi.
pub const DEFAULT_FIGURE_SIZE: (u32, u32) = (600, 1000);

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to draw figure: {0}")]
    Drawing(String),
    #[error("Unsupported figure format for '{path}'; expected a .svg file", path = path.display())]
    UnsupportedFormat { path: PathBuf },
}

/// Encoding of the convergence figure, picked from the output extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureFormat {
    Svg,
}

impl FigureFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("svg") {
            Some(FigureFormat::Svg)
        } else {
            None
        }
    }
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ReportError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        ReportError::Drawing(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportStyle {
    pub score_label: String,
    pub size: (u32, u32),
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            score_label: DEFAULT_SCORE_LABEL.to_string(),
            size: DEFAULT_FIGURE_SIZE,
        }
    }
}

struct Panel<'a> {
    series: &'a ScoreSeries,
    x_desc: String,
    y_desc: String,
    color: RGBColor,
}

/// Writes the three-panel convergence figure (raw, sorted, windowed RMS)
/// to `path` in the format its extension names.
pub fn render_report(
    analysis: &ConvergenceAnalysis,
    style: &ReportStyle,
    path: &Path,
) -> Result<(), ReportError> {
    let format = FigureFormat::from_path(path).ok_or_else(|| ReportError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    match format {
        FigureFormat::Svg => {
            let root = SVGBackend::new(path, style.size).into_drawing_area();
            draw(&root, analysis, style)
        }
    }
}

#[cfg(test)]
fn render_report_to_string(
    analysis: &ConvergenceAnalysis,
    style: &ReportStyle,
) -> Result<String, ReportError> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, style.size).into_drawing_area();
        draw(&root, analysis, style)?;
    }
    Ok(buffer)
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    analysis: &ConvergenceAnalysis,
    style: &ReportStyle,
) -> Result<(), ReportError> {
    root.fill(&WHITE)?;
    let areas = root.split_evenly((3, 1));

    let panels = [
        Panel {
            series: &analysis.raw,
            x_desc: "# of models".to_string(),
            y_desc: style.score_label.clone(),
            color: BLUE,
        },
        Panel {
            series: &analysis.sorted,
            x_desc: "# of models".to_string(),
            y_desc: style.score_label.clone(),
            color: BLUE,
        },
        Panel {
            series: &analysis.rms,
            x_desc: format!("# of windows ({} models/window)", analysis.window_size),
            y_desc: format!("RMSD of {}", style.score_label),
            color: RED,
        },
    ];

    for (area, panel) in areas.iter().zip(panels.iter()) {
        draw_panel(area, panel)?;
    }

    root.present()?;
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel<'_>,
) -> Result<(), ReportError> {
    let (y_min, y_max) = padded_range(panel.series);
    let x_max = panel.series.len().saturating_sub(1).max(1) as f64;

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(panel.x_desc.as_str())
        .y_desc(panel.y_desc.as_str())
        .draw()?;

    chart.draw_series(LineSeries::new(
        panel
            .series
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v)),
        &panel.color,
    ))?;

    Ok(())
}

fn padded_range(series: &ScoreSeries) -> (f64, f64) {
    match series.bounds() {
        None => (0.0, 1.0),
        Some((lo, hi)) if hi > lo => {
            let pad = (hi - lo) * 0.05;
            (lo - pad, hi + pad)
        }
        Some((v, _)) => {
            let pad = (v.abs() * 0.05).max(1.0);
            (v - pad, v + pad)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis() -> ConvergenceAnalysis {
        let raw: ScoreSeries = (0..20).map(|i| 2000.0 + ((i * 37) % 11) as f64).collect();
        ConvergenceAnalysis::compute(raw, 4).unwrap()
    }

    #[test]
    fn padded_range_handles_flat_and_empty_series() {
        assert_eq!(padded_range(&ScoreSeries::default()), (0.0, 1.0));
        assert_eq!(padded_range(&ScoreSeries::from(vec![3.0, 3.0])), (2.0, 4.0));
        let (lo, hi) = padded_range(&ScoreSeries::from(vec![0.0, 10.0]));
        assert!((lo + 0.5).abs() < 1e-12 && (hi - 10.5).abs() < 1e-12);
    }

    #[test]
    fn svg_contains_all_three_panels() {
        let svg = render_report_to_string(&analysis(), &ReportStyle::default()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.matches("<polyline").count() >= 3);
        assert!(svg.contains("# of windows (4 models/window)"));
        assert!(svg.contains("RMSD of MOLPDF score (a.u.)"));
    }

    #[test]
    fn render_report_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conv.svg");
        render_report(&analysis(), &ReportStyle::default(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("</svg>"));
    }

    #[test]
    fn figure_format_follows_extension() {
        assert_eq!(
            FigureFormat::from_path(Path::new("analysis/score-conv.svg")),
            Some(FigureFormat::Svg)
        );
        assert_eq!(
            FigureFormat::from_path(Path::new("score-conv.SVG")),
            Some(FigureFormat::Svg)
        );
        assert_eq!(FigureFormat::from_path(Path::new("score-conv.pdf")), None);
        assert_eq!(FigureFormat::from_path(Path::new("score-conv")), None);
    }

    #[test]
    fn render_report_refuses_other_formats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("score-conv.pdf");
        let result = render_report(&analysis(), &ReportStyle::default(), &path);
        assert!(matches!(result, Err(ReportError::UnsupportedFormat { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn render_report_fails_for_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("conv.svg");
        let result = render_report(&analysis(), &ReportStyle::default(), &path);
        assert!(matches!(result, Err(ReportError::Drawing(_))));
    }
}
