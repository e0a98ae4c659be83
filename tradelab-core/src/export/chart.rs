//! Chart export — the three-chart figure rendered to PNG or PDF.
//!
//! Layout mirrors the on-screen analysis: profit-by-category bars with
//! the two threshold reference lines, a profit-vs-duration scatter with a
//! zero line, and a profit-by-hour strip shaded by intensity. PNG renders
//! straight to the file; PDF renders to an RGB buffer first and embeds it
//! in a single page sized to the figure.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use printpdf::{ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfDocument, Px};

use crate::analysis::{AnalysisConfig, Summary};
use crate::domain::{Dataset, TradeCategory};
use crate::export::ExportError;

const FIGURE_WIDTH: u32 = 1500;
const FIGURE_HEIGHT: u32 = 400;
const PDF_DPI: f32 = 150.0;

/// Rendering colors for the exported figure. Mirrors the TUI themes;
/// purely visual, never part of the computation contract.
#[derive(Debug, Clone, Copy)]
pub struct ChartPalette {
    pub name: &'static str,
    pub background: RGBColor,
    pub axes: RGBColor,
    pub text: RGBColor,
    pub bar: RGBColor,
    pub scatter: RGBColor,
    pub line_current: RGBColor,
    pub line_target: RGBColor,
}

impl ChartPalette {
    pub fn nordic() -> Self {
        Self {
            name: "Nordic",
            background: RGBColor(0x2E, 0x34, 0x40),
            axes: RGBColor(0x3B, 0x42, 0x52),
            text: RGBColor(0xD8, 0xDE, 0xE9),
            bar: RGBColor(0xA3, 0xBE, 0x8C),
            scatter: RGBColor(0xA3, 0xBE, 0x8C),
            line_current: RGBColor(0xEB, 0xCB, 0x8B),
            line_target: RGBColor(0xB4, 0x8E, 0xAD),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light",
            background: RGBColor(0xFF, 0xFF, 0xFF),
            axes: RGBColor(0xF0, 0xF0, 0xF0),
            text: RGBColor(0x00, 0x00, 0x00),
            bar: RGBColor(0x76, 0xC8, 0x93),
            scatter: RGBColor(0x76, 0xC8, 0x93),
            line_current: RGBColor(0xF9, 0xC7, 0x4F),
            line_target: RGBColor(0xF9, 0x84, 0x4A),
        }
    }
}

/// Write the figure to `path`. `.pdf` selects the PDF page, anything
/// else gets a PNG raster.
pub fn export_chart(
    path: impl AsRef<Path>,
    dataset: &Dataset,
    summary: &Summary,
    config: &AnalysisConfig,
    palette: &ChartPalette,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        export_pdf(path, dataset, summary, config, palette)
    } else {
        export_png(path, dataset, summary, config, palette)
    }
}

fn export_png(
    path: &Path,
    dataset: &Dataset,
    summary: &Summary,
    config: &AnalysisConfig,
    palette: &ChartPalette,
) -> Result<(), ExportError> {
    let root = BitMapBackend::new(path, (FIGURE_WIDTH, FIGURE_HEIGHT)).into_drawing_area();
    draw_figure(&root, dataset, summary, config, palette)?;
    root.present().map_err(draw_err)
}

fn export_pdf(
    path: &Path,
    dataset: &Dataset,
    summary: &Summary,
    config: &AnalysisConfig,
    palette: &ChartPalette,
) -> Result<(), ExportError> {
    let mut buffer = vec![0u8; (FIGURE_WIDTH * FIGURE_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (FIGURE_WIDTH, FIGURE_HEIGHT))
            .into_drawing_area();
        draw_figure(&root, dataset, summary, config, palette)?;
        root.present().map_err(draw_err)?;
    }

    let page_width = Mm(FIGURE_WIDTH as f32 * 25.4 / PDF_DPI);
    let page_height = Mm(FIGURE_HEIGHT as f32 * 25.4 / PDF_DPI);
    let (doc, page, layer) = PdfDocument::new("Trade duration analysis", page_width, page_height, "chart");

    let image = Image::from(ImageXObject {
        width: Px(FIGURE_WIDTH as usize),
        height: Px(FIGURE_HEIGHT as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: false,
        image_data: buffer,
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    });
    let transform = ImageTransform {
        dpi: Some(PDF_DPI),
        ..ImageTransform::default()
    };
    image.add_to_layer(doc.get_page(page).get_layer(layer), transform);

    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| ExportError::Pdf(e.to_string()))
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    dataset: &Dataset,
    summary: &Summary,
    config: &AnalysisConfig,
    palette: &ChartPalette,
) -> Result<(), ExportError> {
    root.fill(&palette.background).map_err(draw_err)?;
    let areas = root.split_evenly((1, 3));
    draw_category_bars(&areas[0], summary, config, palette)?;
    draw_duration_scatter(&areas[1], dataset, palette)?;
    draw_hour_strip(&areas[2], summary, palette)?;
    Ok(())
}

fn draw_category_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    summary: &Summary,
    config: &AnalysisConfig,
    palette: &ChartPalette,
) -> Result<(), ExportError> {
    let categories: Vec<TradeCategory> = summary.profit_by_category.keys().copied().collect();
    if categories.is_empty() {
        return Ok(());
    }
    let values: Vec<f64> = summary.profit_by_category.values().copied().collect();

    let current_line = summary.total_profit * config.threshold;
    let target_line = config.profit_target * config.threshold;
    let (y_min, y_max) = padded_range(
        values
            .iter()
            .copied()
            .chain([current_line, target_line, 0.0]),
    );

    let mut chart = ChartBuilder::on(area)
        .caption("Profit by Duration", title_style(palette))
        .margin(10)
        .x_label_area_size(28)
        .y_label_area_size(52)
        .build_cartesian_2d((0..categories.len()).into_segmented(), y_min..y_max)
        .map_err(draw_err)?;

    chart.plotting_area().fill(&palette.axes).map_err(draw_err)?;
    let labels: Vec<String> = categories.iter().map(|c| c.label().to_string()).collect();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) if *i < labels.len() => labels[*i].clone(),
            _ => String::new(),
        })
        .label_style(label_style(palette))
        .axis_style(&palette.text)
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(values.iter().enumerate().map(|(i, &v)| {
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), v),
                ],
                palette.bar.filled(),
            );
            bar.set_margin(0, 0, 20, 20);
            bar
        }))
        .map_err(draw_err)?;

    let pct = config.threshold * 100.0;
    chart
        .draw_series(LineSeries::new(
            [
                (SegmentValue::Exact(0), current_line),
                (SegmentValue::Exact(categories.len()), current_line),
            ],
            palette.line_current.stroke_width(2),
        ))
        .map_err(draw_err)?
        .label(format!("{pct:.0}% of current"))
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 16, y)], palette.line_current.stroke_width(2))
        });
    chart
        .draw_series(LineSeries::new(
            [
                (SegmentValue::Exact(0), target_line),
                (SegmentValue::Exact(categories.len()), target_line),
            ],
            palette.line_target.stroke_width(2),
        ))
        .map_err(draw_err)?
        .label(format!("{pct:.0}% of target"))
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 16, y)], palette.line_target.stroke_width(2))
        });

    chart
        .configure_series_labels()
        .background_style(palette.axes.filled())
        .border_style(&palette.text)
        .label_font(label_style(palette))
        .position(SeriesLabelPosition::UpperRight)
        .draw()
        .map_err(draw_err)
}

fn draw_duration_scatter<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    dataset: &Dataset,
    palette: &ChartPalette,
) -> Result<(), ExportError> {
    if dataset.is_empty() {
        return Ok(());
    }

    let points: Vec<(f64, f64)> = dataset
        .trades
        .iter()
        .map(|t| (t.duration_minutes(), t.profit))
        .collect();
    let (x_min, x_max) = padded_range(points.iter().map(|p| p.0));
    let (y_min, y_max) = padded_range(points.iter().map(|p| p.1).chain([0.0]));

    let mut chart = ChartBuilder::on(area)
        .caption("Profit vs Duration", title_style(palette))
        .margin(10)
        .x_label_area_size(28)
        .y_label_area_size(52)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(draw_err)?;

    chart.plotting_area().fill(&palette.axes).map_err(draw_err)?;
    chart
        .configure_mesh()
        .x_desc("Duration (min)")
        .label_style(label_style(palette))
        .axis_style(&palette.text)
        .draw()
        .map_err(draw_err)?;

    // Zero line, then the points on top of it.
    chart
        .draw_series(LineSeries::new(
            [(x_min, 0.0), (x_max, 0.0)],
            palette.text.stroke_width(1),
        ))
        .map_err(draw_err)?;
    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, palette.scatter.filled())),
        )
        .map_err(draw_err)?;
    Ok(())
}

fn draw_hour_strip<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    summary: &Summary,
    palette: &ChartPalette,
) -> Result<(), ExportError> {
    let values = &summary.profit_by_hour;
    let low = values.iter().copied().fold(f64::INFINITY, f64::min);
    let high = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (y_min, y_max) = padded_range(values.iter().copied().chain([0.0]));

    let mut chart = ChartBuilder::on(area)
        .caption("Profit by Hour of Day", title_style(palette))
        .margin(10)
        .x_label_area_size(28)
        .y_label_area_size(52)
        .build_cartesian_2d((0..24usize).into_segmented(), y_min..y_max)
        .map_err(draw_err)?;

    chart.plotting_area().fill(&palette.axes).map_err(draw_err)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(h) => h.to_string(),
            _ => String::new(),
        })
        .label_style(label_style(palette))
        .axis_style(&palette.text)
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(values.iter().enumerate().map(|(hour, &v)| {
            let t = if high > low { (v - low) / (high - low) } else { 0.5 };
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(hour), 0.0),
                    (SegmentValue::Exact(hour + 1), v),
                ],
                heat_color(t).filled(),
            );
            bar.set_margin(0, 0, 1, 1);
            bar
        }))
        .map_err(draw_err)?;
    Ok(())
}

/// Yellow-green-blue ramp for the hour strip, `t` in [0, 1].
fn heat_color(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8, f: f64| (a as f64 + (b as f64 - a as f64) * f).round() as u8;
    if t < 0.5 {
        let f = t * 2.0;
        RGBColor(
            lerp(0xFF, 0x41, f),
            lerp(0xFF, 0xB6, f),
            lerp(0xD9, 0xC4, f),
        )
    } else {
        let f = (t - 0.5) * 2.0;
        RGBColor(
            lerp(0x41, 0x22, f),
            lerp(0xB6, 0x5E, f),
            lerp(0xC4, 0xA8, f),
        )
    }
}

fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return (-1.0, 1.0);
    }
    let pad = ((max - min).abs() * 0.08).max(1.0);
    (min - pad, max + pad)
}

fn title_style(palette: &ChartPalette) -> TextStyle<'_> {
    ("sans-serif", 20).into_font().color(&palette.text)
}

fn label_style(palette: &ChartPalette) -> TextStyle<'_> {
    ("sans-serif", 14).into_font().color(&palette.text)
}

fn draw_err<E: std::fmt::Display>(e: E) -> ExportError {
    ExportError::Render(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Trade;
    use chrono::NaiveDate;

    fn sample() -> (Dataset, Summary, AnalysisConfig) {
        let open = NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let dataset = Dataset::new(vec![
            Trade::new(open, open + chrono::Duration::seconds(60), "EURUSD", "Buy", 10.0),
            Trade::new(open, open + chrono::Duration::seconds(600), "GBPUSD", "Sell", -4.0),
        ]);
        let config = AnalysisConfig::default();
        let summary = Summary::compute(&dataset, &config);
        (dataset, summary, config)
    }

    #[test]
    fn png_export_writes_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        let (dataset, summary, config) = sample();
        export_chart(&path, &dataset, &summary, &config, &ChartPalette::nordic()).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn pdf_export_writes_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.pdf");
        let (dataset, summary, config) = sample();
        export_chart(&path, &dataset, &summary, &config, &ChartPalette::light()).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn empty_dataset_still_renders_a_figure() {
        // The TUI blocks export before any load; a filtered-to-empty
        // dataset is still a valid figure (background plus empty panels).
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        let dataset = Dataset::default();
        let config = AnalysisConfig::default();
        let summary = Summary::compute(&dataset, &config);
        export_chart(&path, &dataset, &summary, &config, &ChartPalette::nordic()).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn heat_color_endpoints() {
        assert_eq!(heat_color(0.0), RGBColor(0xFF, 0xFF, 0xD9));
        assert_eq!(heat_color(1.0), RGBColor(0x22, 0x5E, 0xA8));
    }
}
