//! Chart style: JSON shape + validated in-memory structure.
//!
//! JSON shape (all fields optional):
//! {
//!   "title": "leanstore original vs with seg",
//!   "width": 960,
//!   "height": 640,
//!   "x_desc": "Time (secs)",
//!   "y_desc": "Throughput (Mops/s)",
//!   "series": [
//!     { "label": "Leanstore_4th_YCSB_ORG", "color": "#D62728" },
//!     { "label": "Using_Segment", "color": "#0A640C" }
//!   ]
//! }
//!
//! Missing series entries fall back to the palette and a generated label.

pub mod color;

pub use color::{Rgb, palette_color};

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StyleError {
    #[error("cannot read style file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid style JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unrecognised colour {0:?} (expected #RRGGBB or a palette name)")]
    BadColor(String),
    #[error("chart size must be non-zero, got {0}x{1}")]
    BadSize(u32, u32),
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

/// Raw style shape as it appears in the JSON file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleFile {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub x_desc: Option<String>,
    #[serde(default)]
    pub y_desc: Option<String>,
    #[serde(default)]
    pub series: Vec<RawSeriesStyle>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSeriesStyle {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStyle {
    pub label: Option<String>,
    pub color: Option<Rgb>,
}

/// Validated chart style.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub title: Option<String>,
    pub size: (u32, u32),
    pub x_desc: String,
    pub y_desc: String,
    pub series: Vec<SeriesStyle>,
}

impl ChartStyle {
    pub const DEFAULT_SIZE: (u32, u32) = (960, 640);

    pub fn new(x_desc: &str, y_desc: &str) -> Self {
        Self {
            title: None,
            size: Self::DEFAULT_SIZE,
            x_desc: x_desc.to_string(),
            y_desc: y_desc.to_string(),
            series: Vec::new(),
        }
    }

    /// Throughput-over-time chart defaults.
    pub fn throughput() -> Self {
        Self::new("Time (secs)", "Throughput (Mops/s)")
    }

    /// Apply a style file on top of these defaults.
    pub fn merge_file(mut self, file: StyleFile) -> Result<Self, StyleError> {
        let (width, height) = (
            file.width.unwrap_or(self.size.0),
            file.height.unwrap_or(self.size.1),
        );
        if width == 0 || height == 0 {
            return Err(StyleError::BadSize(width, height));
        }
        self.size = (width, height);

        if file.title.is_some() {
            self.title = file.title;
        }
        if let Some(x) = file.x_desc {
            self.x_desc = x;
        }
        if let Some(y) = file.y_desc {
            self.y_desc = y;
        }

        let mut series = Vec::with_capacity(file.series.len());
        for raw in file.series {
            let color = raw.color.as_deref().map(Rgb::parse).transpose()?;
            series.push(SeriesStyle {
                label: raw.label,
                color,
            });
        }
        self.series = series;
        Ok(self)
    }

    /// Load and merge a style file from disk.
    pub fn load(self, path: &Path) -> Result<Self, StyleError> {
        let text = std::fs::read_to_string(path).map_err(|source| StyleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: StyleFile = serde_json::from_str(&text)?;
        self.merge_file(file)
    }

    /// Command-line labels replace the labels of the first `labels.len()` series.
    pub fn with_labels(mut self, labels: &[String]) -> Self {
        for (i, label) in labels.iter().enumerate() {
            match self.series.get_mut(i) {
                Some(s) => s.label = Some(label.clone()),
                None => self.series.push(SeriesStyle {
                    label: Some(label.clone()),
                    color: None,
                }),
            }
        }
        self
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        if title.is_some() {
            self.title = title;
        }
        self
    }

    /// Label for series `index`, falling back to `fallback`.
    pub fn label(&self, index: usize, fallback: &str) -> String {
        self.series
            .get(index)
            .and_then(|s| s.label.clone())
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn color(&self, index: usize) -> Rgb {
        self.series
            .get(index)
            .and_then(|s| s.color)
            .unwrap_or_else(|| palette_color(index))
    }
}
