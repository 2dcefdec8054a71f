// File: crates/grapher-core/src/config.rs
// Summary: Typed configuration mirroring the YAML layout (graph / data / output), with defaults and validation.
// Notes:
// - Every section is `#[serde(default)]`, so a sparse YAML file is valid.
// - Values that can be rejected in isolation (markers, line styles, formats,
//   graph type, empty source file) fail at parse time; checks that need the
//   whole config or the filesystem live in `Config::validate`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::chart::{Fonts, ImageFormat, RenderOptions};
use crate::error::{GrapherError, Result};
use crate::series::SeriesType;
use crate::style::{LineStyle, Marker};
use crate::theme;
use crate::types::{pixel_size, MAX_PIXELS_PER_SIDE};
use crate::view::Limits;
use crate::yaml::YamlDocument;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontsConfig {
    pub title_size: f32,
    pub label_size: f32,
    pub legend_size: f32,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self { title_size: 16.0, label_size: 12.0, legend_size: 10.0 }
    }
}

impl From<&FontsConfig> for Fonts {
    fn from(f: &FontsConfig) -> Self {
        Fonts { title_size: f.title_size, label_size: f.label_size, legend_size: f.legend_size }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub show: bool,
}

impl Default for GridConfig {
    fn default() -> Self { Self { show: true } }
}

/// Marker and dash cycling for series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLineStyleConfig")]
pub struct LineStyleConfig {
    /// Empty means no markers.
    pub markers: Vec<Marker>,
    pub line_styles: Vec<LineStyle>,
    /// Cycle through every marker x line style combination.
    pub auto_cycle: bool,
    pub line_width: f32,
    pub marker_size: f32,
}

#[derive(Deserialize)]
#[serde(default)]
struct RawLineStyleConfig {
    markers: Vec<Marker>,
    line_styles: Vec<LineStyle>,
    auto_cycle: bool,
    line_width: f32,
    marker_size: f32,
}

impl Default for RawLineStyleConfig {
    fn default() -> Self {
        let d = LineStyleConfig::default();
        Self {
            markers: d.markers,
            line_styles: d.line_styles,
            auto_cycle: d.auto_cycle,
            line_width: d.line_width,
            marker_size: d.marker_size,
        }
    }
}

impl TryFrom<RawLineStyleConfig> for LineStyleConfig {
    type Error = String;
    fn try_from(r: RawLineStyleConfig) -> std::result::Result<Self, Self::Error> {
        LineStyleConfig::new(r.markers, r.line_styles, r.auto_cycle, r.line_width, r.marker_size)
    }
}

impl Default for LineStyleConfig {
    fn default() -> Self {
        Self {
            markers: Vec::new(),
            line_styles: vec![LineStyle::Solid],
            auto_cycle: true,
            line_width: 2.0,
            marker_size: 6.0,
        }
    }
}

impl LineStyleConfig {
    pub fn new(
        markers: Vec<Marker>,
        line_styles: Vec<LineStyle>,
        auto_cycle: bool,
        line_width: f32,
        marker_size: f32,
    ) -> std::result::Result<Self, String> {
        if !positive_finite(line_width) {
            return Err(format!("Line width must be a positive number, got {line_width}"));
        }
        if !positive_finite(marker_size) {
            return Err(format!("Marker size must be a positive number, got {marker_size}"));
        }
        Ok(Self { markers, line_styles, auto_cycle, line_width, marker_size })
    }

    /// Marker and line style for the series at `index` on a line chart.
    pub fn line_cycle(&self, index: usize) -> (Option<Marker>, Option<LineStyle>) {
        if self.auto_cycle {
            if self.markers.is_empty() {
                let style = cycle(&self.line_styles, index).unwrap_or(LineStyle::Solid);
                return (None, Some(style));
            }
            let styles: &[LineStyle] = if self.line_styles.is_empty() { &[LineStyle::Solid] } else { &self.line_styles };
            // marker-major product: (m0, s0), (m0, s1), ..., (m1, s0), ...
            let k = index % (self.markers.len() * styles.len());
            return (Some(self.markers[k / styles.len()]), Some(styles[k % styles.len()]));
        }
        let marker = cycle(&self.markers, index);
        let style = cycle(&self.line_styles, index).unwrap_or(LineStyle::Solid);
        (marker, Some(style))
    }

    /// Marker for the series at `index` on a scatter chart; circles by default.
    pub fn scatter_marker(&self, index: usize) -> Marker {
        cycle(&self.markers, index).unwrap_or(Marker::Circle)
    }
}

fn positive_finite(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

fn cycle<T: Copy>(items: &[T], index: usize) -> Option<T> {
    if items.is_empty() { None } else { Some(items[index % items.len()]) }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Figure width in inches.
    pub width: f32,
    /// Figure height in inches.
    pub height: f32,
    /// Color scheme name, see [`theme::names`].
    pub theme: String,
    pub fonts: FontsConfig,
    pub grid: GridConfig,
    pub line_style: LineStyleConfig,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 10.0,
            theme: "light".to_string(),
            fonts: FontsConfig::default(),
            grid: GridConfig::default(),
            line_style: LineStyleConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    pub label: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub title: String,
    #[serde(rename = "type")]
    pub chart_type: SeriesType,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    pub style: StyleConfig,
}

/// One CSV file to plot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataSource")]
pub struct DataSource {
    pub file: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Deserialize)]
struct RawDataSource {
    #[serde(default)]
    file: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    color: Option<String>,
}

impl TryFrom<RawDataSource> for DataSource {
    type Error = String;
    fn try_from(r: RawDataSource) -> std::result::Result<Self, Self::Error> {
        let mut source = DataSource::new(r.file, r.label)?;
        source.color = r.color;
        Ok(source)
    }
}

impl DataSource {
    /// `label` falls back to the file stem when missing or empty.
    pub fn new(file: impl Into<String>, label: Option<String>) -> std::result::Result<Self, String> {
        let file = file.into();
        if file.trim().is_empty() {
            return Err("Data source 'file' is required".to_string());
        }
        let label = label
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| file_stem(&file));
        Ok(Self { file, label, color: None })
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn path(&self) -> &Path {
        Path::new(&self.file)
    }
}

fn file_stem(file: &str) -> String {
    Path::new(file)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string())
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub sources: Vec<DataSource>,
}

impl DataConfig {
    pub fn add_source(&mut self, file: impl Into<String>, label: Option<String>) -> Result<()> {
        let source = DataSource::new(file, label).map_err(|e| GrapherError::InvalidConfig(vec![e]))?;
        self.sources.push(source);
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: ImageFormat,
    pub dpi: u32,
    pub save_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ImageFormat::Png,
            dpi: 300,
            save_path: "./output/graph.png".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn path(&self) -> PathBuf {
        PathBuf::from(&self.save_path)
    }

    /// A recognised `save_path` extension decides the encoding; otherwise `format` does.
    pub fn resolved_format(&self) -> ImageFormat {
        self.path()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ImageFormat::from_extension)
            .unwrap_or(self.format)
    }
}

/// Top-level configuration, one per invocation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub graph: GraphConfig,
    pub data: DataConfig,
    pub output: OutputConfig,
}

impl Config {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let doc = YamlDocument::load_file(path)?;
        Self::from_value_with_origin(doc.into_value(), &format!("file {}", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let doc = YamlDocument::load_str(text)?;
        Self::from_value_with_origin(doc.into_value(), "string")
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Self::from_value_with_origin(value, "value")
    }

    fn from_value_with_origin(value: Value, origin: &str) -> Result<Self> {
        serde_yaml::from_value(value).map_err(|source| GrapherError::Yaml { origin: origin.to_string(), source })
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_yaml::to_value(self).map_err(|source| GrapherError::Yaml { origin: "config".to_string(), source })
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|source| GrapherError::Yaml { origin: "config".to_string(), source })
    }

    /// All problems found, in a stable order; empty when the config is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let graph = &self.graph;
        let style = &graph.style;

        if graph.title.is_empty() {
            errors.push("Graph title is required".to_string());
        }

        for (name, axis) in [("x_axis", &graph.x_axis), ("y_axis", &graph.y_axis)] {
            for (end, value) in [("min", axis.min), ("max", axis.max)] {
                if value.is_some_and(|v| !v.is_finite()) {
                    errors.push(format!("{name}: {end} must be a finite number"));
                }
            }
            if let (Some(lo), Some(hi)) = (axis.min.filter(|v| v.is_finite()), axis.max.filter(|v| v.is_finite())) {
                if lo >= hi {
                    errors.push(format!("{name}: min ({lo}) must be less than max ({hi})"));
                }
            }
        }

        if !positive_finite(style.width) {
            errors.push("Figure width must be positive".to_string());
        }
        if !positive_finite(style.height) {
            errors.push("Figure height must be positive".to_string());
        }
        if self.output.dpi == 0 {
            errors.push("DPI must be positive".to_string());
        }
        if positive_finite(style.width) && positive_finite(style.height) && self.output.dpi > 0 && self.output.resolved_format().is_raster() {
            let (w, h) = pixel_size(style.width, style.height, self.output.dpi);
            if w > MAX_PIXELS_PER_SIDE || h > MAX_PIXELS_PER_SIDE {
                errors.push(format!(
                    "Output of {w}x{h} px exceeds the {MAX_PIXELS_PER_SIDE} px limit; lower dpi or figure size"
                ));
            }
        }

        let fonts = &style.fonts;
        for (name, size) in [
            ("title_size", fonts.title_size),
            ("label_size", fonts.label_size),
            ("legend_size", fonts.legend_size),
        ] {
            if !positive_finite(size) {
                errors.push(format!("Font {name} must be positive"));
            }
        }

        if theme::find(&style.theme).is_none() {
            errors.push(format!("Unknown theme '{}'. Available themes: {:?}", style.theme, theme::names()));
        }

        if self.data.sources.is_empty() {
            errors.push("At least one data source is required".to_string());
        }
        for (i, source) in self.data.sources.iter().enumerate() {
            if !source.path().exists() {
                errors.push(format!("Data source {i}: File '{}' does not exist", source.file));
            }
            if let Some(color) = &source.color {
                if let Err(e) = theme::parse_color(color) {
                    errors.push(format!("Data source {i}: {e}"));
                }
            }
        }

        let out = self.output.path();
        if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
            if parent.exists() && !parent.is_dir() {
                errors.push(format!("Cannot create output directory: '{}' is not a directory", parent.display()));
            }
        }
        if out.is_dir() {
            errors.push(format!("Output path '{}' is a directory", out.display()));
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// `validate` as a `Result`, for callers that stop on the first bad config.
    pub fn ensure_valid(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() { Ok(()) } else { Err(GrapherError::InvalidConfig(errors)) }
    }

    pub fn limits(&self) -> Limits {
        Limits {
            x_min: self.graph.x_axis.min,
            x_max: self.graph.x_axis.max,
            y_min: self.graph.y_axis.min,
            y_max: self.graph.y_axis.max,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            width_in: self.graph.style.width,
            height_in: self.graph.style.height,
            dpi: self.output.dpi,
            draw_labels: true,
        }
    }
}
