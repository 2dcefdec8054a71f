// File: crates/grapher-core/src/builder.rs
// Summary: Turns a Config plus loaded datasets into a styled Chart, and writes it out.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::chart::{Chart, Fonts};
use crate::config::{Config, LineStyleConfig, OutputConfig};
use crate::data::{DataProcessor, Dataset, XValues};
use crate::error::{GrapherError, Result};
use crate::series::{Series, SeriesStyle, SeriesType};
use crate::theme::{self, Theme};
use crate::Axis;

/// Alpha for bar and scatter fills, so overlapping series stay readable.
const FILL_ALPHA: f32 = 0.7;
/// Bar width as a fraction of the smallest x step.
const BAR_FRACTION: f64 = 0.8;

#[derive(Clone, Copy, Debug, Default)]
pub struct GraphBuilder {
    processor: DataProcessor,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self { processor: DataProcessor::new() }
    }

    pub fn supported_types() -> Vec<&'static str> {
        SeriesType::ALL.iter().map(|t| t.name()).collect()
    }

    /// Exact, lower-case match against [`GraphBuilder::supported_types`].
    pub fn validate_graph_type(name: &str) -> bool {
        Self::supported_types().contains(&name)
    }

    /// Load every configured source, then [`GraphBuilder::build`].
    pub fn build_from_config(&self, config: &Config) -> Result<Chart> {
        if config.data.sources.is_empty() {
            return Err(GrapherError::NoData);
        }
        let datasets = self.processor.load_sources(&config.data.sources)?;
        self.build(config, &datasets)
    }

    pub fn build(&self, config: &Config, datasets: &[Dataset]) -> Result<Chart> {
        let graph = &config.graph;
        let style = &graph.style;
        let chart_type = graph.chart_type;

        let theme = theme::find(&style.theme).ok_or_else(|| {
            GrapherError::InvalidConfig(vec![format!(
                "Unknown theme '{}'. Available themes: {:?}",
                style.theme,
                theme::names()
            )])
        })?;

        let datasets: Vec<&Dataset> = datasets
            .iter()
            .filter(|d| {
                if d.is_empty() {
                    warn!(label = %d.label, "skipping empty dataset");
                }
                !d.is_empty()
            })
            .collect();
        if datasets.is_empty() {
            return Err(GrapherError::NoData);
        }

        let categories = Categories::collect(&datasets);

        let mut chart = Chart::new();
        chart.title = if graph.title.is_empty() { "Graph".to_string() } else { graph.title.clone() };
        chart.fonts = Fonts::from(&style.fonts);
        chart.show_grid = style.grid.show;
        chart.x_axis = Axis::new(label_or(&graph.x_axis.label, "X"), 0.0, 1.0);
        chart.y_axis = Axis::new(label_or(&graph.y_axis.label, "Y"), 0.0, 1.0);
        if let Some(c) = &categories {
            chart.x_axis = chart.x_axis.with_categories(c.names.clone());
        }

        for (i, dataset) in datasets.iter().enumerate() {
            let data_xy = points(dataset, categories.as_ref());
            let series_style = series_style(chart_type, &style.line_style, &theme, dataset, i)?;
            let mut series = Series::with_data(chart_type, data_xy)
                .with_label(dataset.label.clone())
                .with_style(series_style);
            if chart_type == SeriesType::Bar {
                // one slot per category, even where a series skips some
                let width = if categories.is_some() { BAR_FRACTION } else { bar_width(&series.data_xy) };
                series = series.with_bar_width(width);
            }
            debug!(label = %series.label, points = series.data_xy.len(), kind = %chart_type, "added series");
            chart.add_series(series);
        }

        chart.theme = theme;
        chart.autoscale_axes(&config.limits());
        Ok(chart)
    }

    /// Render at the configured dpi and write to `output.save_path`.
    pub fn save(&self, chart: &Chart, config: &Config) -> Result<PathBuf> {
        let output: &OutputConfig = &config.output;
        let path = output.path();
        let format = output.resolved_format();
        chart.render_to_file(&config.render_options(), format, &path)?;
        info!(path = %path.display(), %format, dpi = output.dpi, "graph saved");
        Ok(path)
    }
}

fn label_or(label: &str, fallback: &str) -> String {
    if label.is_empty() { fallback.to_string() } else { label.to_string() }
}

/// Category names in order of first appearance across all datasets, with their positions.
struct Categories {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Categories {
    /// `None` when every x is numeric.
    fn collect(datasets: &[&Dataset]) -> Option<Self> {
        if !datasets.iter().any(|d| d.is_categorical()) {
            return None;
        }
        let mut names: Vec<String> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for d in datasets {
            for name in x_labels(&d.x) {
                if !positions.contains_key(&name) {
                    positions.insert(name.clone(), names.len());
                    names.push(name);
                }
            }
        }
        Some(Self { names, positions })
    }

    fn position(&self, label: &str) -> f64 {
        self.positions.get(label).map_or(f64::NAN, |&p| p as f64)
    }
}

fn x_labels(x: &XValues) -> Vec<String> {
    match x {
        XValues::Numeric(v) => v.iter().map(|n| n.to_string()).collect(),
        XValues::Categorical(v) => v.clone(),
    }
}

fn points(dataset: &Dataset, categories: Option<&Categories>) -> Vec<(f64, f64)> {
    let xs: Vec<f64> = match (categories, &dataset.x) {
        (None, XValues::Numeric(v)) => v.clone(),
        (Some(c), x) => x_labels(x).iter().map(|label| c.position(label)).collect(),
        // categories are always collected when any dataset is categorical
        (None, XValues::Categorical(v)) => (0..v.len()).map(|i| i as f64).collect(),
    };
    xs.into_iter().zip(dataset.y.iter().copied()).collect()
}

/// `BAR_FRACTION` of the smallest gap between distinct x values.
fn bar_width(data: &[(f64, f64)]) -> f64 {
    let mut xs: Vec<f64> = data.iter().map(|p| p.0).filter(|x| x.is_finite()).collect();
    xs.sort_by(f64::total_cmp);
    xs.dedup();
    let gap = xs
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold(f64::INFINITY, f64::min);
    if gap.is_finite() { gap * BAR_FRACTION } else { BAR_FRACTION }
}

fn series_style(
    chart_type: SeriesType,
    cycle: &LineStyleConfig,
    theme: &Theme,
    dataset: &Dataset,
    index: usize,
) -> Result<SeriesStyle> {
    let color = match &dataset.color {
        Some(c) => theme::parse_color(c)
            .map_err(|e| GrapherError::InvalidConfig(vec![format!("Series '{}': {e}", dataset.label)]))?,
        None => theme.series_color(index),
    };
    let mut style = SeriesStyle {
        color,
        line_width: cycle.line_width,
        marker_size: cycle.marker_size,
        ..SeriesStyle::default()
    };
    match chart_type {
        SeriesType::Line => {
            let (marker, line_style) = cycle.line_cycle(index);
            style.marker = marker;
            style.line_style = line_style;
        }
        SeriesType::Scatter => {
            style.marker = Some(cycle.scatter_marker(index));
            style.line_style = None;
            style.alpha = FILL_ALPHA;
        }
        SeriesType::Bar => {
            style.line_style = None;
            style.alpha = FILL_ALPHA;
        }
    }
    Ok(style)
}
