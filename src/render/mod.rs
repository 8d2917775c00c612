//! Chart rendering with plotters. PNG (bitmap) or SVG, chosen by extension.

pub mod bar;
pub mod line;

pub use bar::{Bar, render_bar_chart};
pub use line::{PlotSeries, render_line_chart};

use crate::style::Rgb;
use anyhow::bail;
use plotters::style::RGBColor;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Bitmap,
    Svg,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> crate::Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "svg" => Ok(Self::Svg),
            "png" | "jpg" | "jpeg" | "bmp" => Ok(Self::Bitmap),
            "" => bail!("output path {} has no extension", path.display()),
            other => bail!(
                "unsupported output format {:?} for {} (use .png or .svg)",
                other,
                path.display()
            ),
        }
    }
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

/// Axis range covering `values` and zero, with headroom above the maximum.
fn value_range(values: impl Iterator<Item = f64>, headroom: f64) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let (lo, hi) = (lo * headroom, hi * headroom);
    if hi <= lo { (lo, lo + 1.0) } else { (lo, hi) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out/chart.SVG")).unwrap(),
            OutputFormat::Svg
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("chart.png")).unwrap(),
            OutputFormat::Bitmap
        );
        assert!(OutputFormat::from_path(Path::new("chart.pdf")).is_err());
        assert!(OutputFormat::from_path(Path::new("chart")).is_err());
    }

    #[test]
    fn value_range_includes_zero() {
        assert_eq!(value_range([2.0, 4.0].into_iter(), 1.0), (0.0, 4.0));
        assert_eq!(value_range([-2.0, 1.0].into_iter(), 1.0), (-2.0, 1.0));
        assert_eq!(value_range([0.0].into_iter(), 1.1), (0.0, 1.0));
        assert_eq!(value_range([f64::NAN, 3.0].into_iter(), 1.0), (0.0, 3.0));
    }
}
