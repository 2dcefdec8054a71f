// File: crates/grapher-core/src/series.rs
// Summary: Series model for line, bar, and scatter data plus per-series styling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use skia_safe as skia;

use crate::error::GrapherError;
use crate::style::{LineStyle, Marker};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SeriesType {
    #[default]
    Line,
    Bar,
    Scatter,
}

impl SeriesType {
    pub const ALL: [SeriesType; 3] = [SeriesType::Line, SeriesType::Bar, SeriesType::Scatter];

    pub fn name(self) -> &'static str {
        match self {
            SeriesType::Line => "line",
            SeriesType::Bar => "bar",
            SeriesType::Scatter => "scatter",
        }
    }
}

impl FromStr for SeriesType {
    type Err = GrapherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SeriesType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GrapherError::UnsupportedGraphType(s.to_string()))
    }
}

impl TryFrom<String> for SeriesType {
    type Error = GrapherError;
    fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl From<SeriesType> for String {
    fn from(t: SeriesType) -> Self { t.name().to_string() }
}

impl fmt::Display for SeriesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesStyle {
    pub color: skia::Color,
    pub line_style: Option<LineStyle>,
    pub marker: Option<Marker>,
    pub line_width: f32,
    pub marker_size: f32,
    /// 0.0..=1.0, multiplied into the color alpha.
    pub alpha: f32,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            color: skia::Color::from_argb(255, 0x1f, 0x77, 0xb4),
            line_style: Some(LineStyle::Solid),
            marker: None,
            line_width: 2.0,
            marker_size: 6.0,
            alpha: 1.0,
        }
    }
}

impl SeriesStyle {
    pub fn paint_color(&self) -> skia::Color {
        let a = (self.color.a() as f32 * self.alpha.clamp(0.0, 1.0)).round() as u8;
        self.color.with_a(a)
    }
}

#[derive(Clone, Debug)]
pub struct Series {
    pub series_type: SeriesType,
    pub label: String,
    pub data_xy: Vec<(f64, f64)>,
    pub style: SeriesStyle,
    /// Bar width in x data units; only read for bars.
    pub bar_width: f64,
}

impl Series {
    pub fn with_data(series_type: SeriesType, data: Vec<(f64, f64)>) -> Self {
        Self {
            series_type,
            label: String::new(),
            data_xy: data,
            style: SeriesStyle::default(),
            bar_width: 0.8,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_style(mut self, style: SeriesStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_bar_width(mut self, width: f64) -> Self {
        self.bar_width = width;
        self
    }

    pub fn is_empty(&self) -> bool { self.data_xy.is_empty() }

    /// Finite-point extents as `(x_min, x_max, y_min, y_max)`.
    pub fn extents(&self) -> Option<(f64, f64, f64, f64)> {
        let mut it = self.data_xy.iter().filter(|(x, y)| x.is_finite() && y.is_finite());
        let &(x0, y0) = it.next()?;
        Some(it.fold((x0, x0, y0, y0), |(xl, xh, yl, yh), &(x, y)| {
            (xl.min(x), xh.max(x), yl.min(y), yh.max(y))
        }))
    }
}
