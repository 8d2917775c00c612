use crate::render::{OutputFormat, rgb, value_range};
use crate::style::ChartStyle;
use anyhow::bail;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// One labelled line. `name` is used when the style has no label for it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

/// Draw every series as a line with hollow markers and write the chart to `path`.
pub fn render_line_chart(
    path: &Path,
    series: &[PlotSeries],
    style: &ChartStyle,
) -> crate::Result<()> {
    if series.is_empty() {
        bail!("no series to plot");
    }
    if let Some(s) = series.iter().find(|s| s.points.is_empty()) {
        bail!("series {:?} has no points", s.name);
    }

    match OutputFormat::from_path(path)? {
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, style.size).into_drawing_area();
            draw_lines(root, series, style)
        }
        OutputFormat::Bitmap => {
            let root = BitMapBackend::new(path, style.size).into_drawing_area();
            draw_lines(root, series, style)
        }
    }
}

fn draw_lines<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    series: &[PlotSeries],
    style: &ChartStyle,
) -> crate::Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let xs = || series.iter().flat_map(|s| s.points.iter().map(|p| p.0));
    let x_min = xs().fold(0.0f64, f64::min);
    let x_max = xs().fold(f64::MIN, f64::max);
    let x_max = if x_max > x_min { x_max } else { x_min + 1.0 };
    let ys = series.iter().flat_map(|s| s.points.iter().map(|p| p.1));
    let (y_min, y_max) = value_range(ys, 1.1);

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20).x_label_area_size(50).y_label_area_size(70);
    if let Some(title) = &style.title {
        builder.caption(title, ("sans-serif", 22).into_font());
    }
    let mut chart = builder.build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc(style.x_desc.as_str())
        .y_desc(style.y_desc.as_str())
        .axis_desc_style(("sans-serif", 20))
        .label_style(("sans-serif", 16))
        .bold_line_style(BLACK.mix(0.15))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    for (i, s) in series.iter().enumerate() {
        let color = rgb(style.color(i));
        let line_style = color.mix(0.8).stroke_width(2);
        chart
            .draw_series(LineSeries::new(s.points.iter().copied(), line_style))?
            .label(style.label(i, &s.name))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
        chart.draw_series(
            s.points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 5, color.mix(0.8).stroke_width(1))),
        )?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperMiddle)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.3))
        .label_font(("sans-serif", 14))
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_series() -> Vec<PlotSeries> {
        vec![
            PlotSeries {
                name: "read".into(),
                points: vec![(1.0, 2.5), (2.0, 3.0), (3.0, 2.75)],
            },
            PlotSeries {
                name: "readseg".into(),
                points: vec![(1.0, 1.0), (2.0, 4.0)],
            },
        ]
    }

    #[test]
    fn writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("cmp.svg");
        let style = ChartStyle::throughput().with_labels(&["ORG".to_string()]);
        render_line_chart(&out, &two_series(), &style).unwrap();

        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("ORG"));
        assert!(svg.contains("readseg"));
        assert!(svg.contains("Throughput (Mops/s)"));
    }

    #[test]
    fn rejects_empty_input() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("empty.svg");
        assert!(render_line_chart(&out, &[], &ChartStyle::throughput()).is_err());

        let hollow = vec![PlotSeries {
            name: "none".into(),
            points: vec![],
        }];
        assert!(render_line_chart(&out, &hollow, &ChartStyle::throughput()).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn unwritable_destination_fails() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("missing-dir").join("cmp.svg");
        assert!(render_line_chart(&out, &two_series(), &ChartStyle::throughput()).is_err());
    }
}
