use crate::render::{OutputFormat, rgb, value_range};
use crate::style::ChartStyle;
use anyhow::bail;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

/// One bar per category, in input order. Negative values hang below zero.
pub fn render_bar_chart(path: &Path, bars: &[Bar], style: &ChartStyle) -> crate::Result<()> {
    if bars.is_empty() {
        bail!("no bars to plot");
    }

    match OutputFormat::from_path(path)? {
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, style.size).into_drawing_area();
            draw_bars(root, bars, style)
        }
        OutputFormat::Bitmap => {
            let root = BitMapBackend::new(path, style.size).into_drawing_area();
            draw_bars(root, bars, style)
        }
    }
}

fn draw_bars<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    bars: &[Bar],
    style: &ChartStyle,
) -> crate::Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let n = bars.len() as u32;
    let (y_min, y_max) = value_range(bars.iter().map(|b| b.value), 1.1);
    let labels: Vec<&str> = bars.iter().map(|b| b.label.as_str()).collect();

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20).x_label_area_size(50).y_label_area_size(70);
    if let Some(title) = &style.title {
        builder.caption(title, ("sans-serif", 22).into_font());
    }
    let mut chart = builder.build_cartesian_2d((0u32..n).into_segmented(), y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len())
        .x_label_formatter(&|x| match x {
            SegmentValue::CenterOf(i) => labels
                .get(*i as usize)
                .map(|l| l.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc(style.x_desc.as_str())
        .y_desc(style.y_desc.as_str())
        .axis_desc_style(("sans-serif", 20))
        .label_style(("sans-serif", 16))
        .bold_line_style(BLACK.mix(0.15))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    let color = rgb(style.color(0));
    chart.draw_series(
        Histogram::vertical(&chart)
            .style(color.mix(0.85).filled())
            .margin(12)
            .data(bars.iter().enumerate().map(|(i, b)| (i as u32, b.value))),
    )?;

    root.present()?;
    Ok(())
}
