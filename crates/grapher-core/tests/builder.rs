// File: crates/grapher-core/tests/builder.rs
// Purpose: GraphBuilder styling, categorical x, limits and writing the output file.

use std::path::Path;

use grapher_core::{
    Config, DataProcessor, Dataset, GrapherError, GraphBuilder, ImageFormat, LineStyle, Marker, SeriesType, Theme,
    XValues,
};

fn dataset(label: &str, x: XValues, y: Vec<f64>) -> Dataset {
    Dataset { label: label.to_string(), x_name: "x".into(), y_name: "y".into(), x, y, color: None }
}

fn numeric(label: &str, n: usize) -> Dataset {
    let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let y = x.iter().map(|v| v * 2.0).collect();
    dataset(label, XValues::Numeric(x), y)
}

fn titled(chart_type: SeriesType) -> Config {
    let mut config = Config::default();
    config.graph.title = "T".to_string();
    config.graph.chart_type = chart_type;
    config
}

#[test]
fn supported_types_are_listed() {
    assert_eq!(GraphBuilder::supported_types(), vec!["line", "bar", "scatter"]);
    assert!(GraphBuilder::validate_graph_type("scatter"));
    assert!(!GraphBuilder::validate_graph_type("pie"));
}

#[test]
fn line_series_cycle_markers_and_styles() {
    let mut config = titled(SeriesType::Line);
    let ls = &mut config.graph.style.line_style;
    ls.markers = vec![Marker::Circle, Marker::Square];
    ls.line_styles = vec![LineStyle::Solid, LineStyle::Dashed];
    let data: Vec<_> = (0..3).map(|i| numeric(&format!("s{i}"), 4)).collect();

    let chart = GraphBuilder::new().build(&config, &data).expect("build");
    assert_eq!(chart.series.len(), 3);
    let styles: Vec<_> = chart.series.iter().map(|s| (s.style.marker, s.style.line_style)).collect();
    assert_eq!(styles[0], (Some(Marker::Circle), Some(LineStyle::Solid)));
    assert_eq!(styles[1], (Some(Marker::Circle), Some(LineStyle::Dashed)));
    assert_eq!(styles[2], (Some(Marker::Square), Some(LineStyle::Solid)));

    let light = Theme::light();
    assert_eq!(chart.series[1].style.color, light.series_color(1));
    assert_eq!(chart.title, "T");
    assert_eq!(chart.x_axis.label, "X");
}

#[test]
fn explicit_color_and_theme_apply() {
    let mut config = titled(SeriesType::Scatter);
    config.graph.style.theme = "dark".to_string();
    let mut d = numeric("a", 3);
    d.color = Some("#00ff00".to_string());

    let chart = GraphBuilder::new().build(&config, &[d]).expect("build");
    let s = &chart.series[0];
    assert_eq!(chart.theme.name, "dark");
    assert_eq!(s.style.color, skia_safe::Color::from_rgb(0, 255, 0));
    assert_eq!(s.style.marker, Some(Marker::Circle));
    assert!((s.style.alpha - 0.7).abs() < 1e-6);
}

#[test]
fn bar_width_follows_smallest_gap() {
    let config = titled(SeriesType::Bar);
    let d = dataset("b", XValues::Numeric(vec![0.0, 2.0, 3.0, 7.0]), vec![1.0, 2.0, 3.0, 4.0]);
    let chart = GraphBuilder::new().build(&config, &[d]).expect("build");
    assert!((chart.series[0].bar_width - 0.8).abs() < 1e-9);
    assert_eq!(chart.y_axis.min, 0.0);

    let spread = dataset("w", XValues::Numeric(vec![0.0, 10.0, 20.0]), vec![1.0, 2.0, 3.0]);
    let chart = GraphBuilder::new().build(&config, &[spread]).expect("build");
    assert!((chart.series[0].bar_width - 8.0).abs() < 1e-9);
}

#[test]
fn categories_merge_in_first_seen_order() {
    let config = titled(SeriesType::Bar);
    let a = dataset("a", XValues::Categorical(vec!["jan".into(), "feb".into()]), vec![1.0, 2.0]);
    let b = dataset("b", XValues::Categorical(vec!["feb".into(), "mar".into()]), vec![3.0, 4.0]);

    let chart = GraphBuilder::new().build(&config, &[a, b]).expect("build");
    assert_eq!(chart.x_axis.categories.as_deref(), Some(&["jan".to_string(), "feb".into(), "mar".into()][..]));
    assert_eq!(chart.series[1].data_xy, vec![(1.0, 3.0), (2.0, 4.0)]);
}

#[test]
fn categorical_bars_keep_a_fixed_slot_width() {
    let config = titled(SeriesType::Bar);
    let a = dataset("a", XValues::Categorical(vec!["jan".into(), "feb".into(), "mar".into()]), vec![1.0, 2.0, 3.0]);
    // b skips feb, so its own positions are two apart
    let b = dataset("b", XValues::Categorical(vec!["jan".into(), "mar".into()]), vec![4.0, 5.0]);

    let chart = GraphBuilder::new().build(&config, &[a, b]).expect("build");
    assert_eq!(chart.series[1].data_xy, vec![(0.0, 4.0), (2.0, 5.0)]);
    for series in &chart.series {
        assert!((series.bar_width - 0.8).abs() < 1e-12, "{}: {}", series.label, series.bar_width);
    }
}

#[test]
fn scatter_series_cycle_markers_without_lines() {
    let mut config = titled(SeriesType::Scatter);
    config.graph.style.line_style.markers = vec![Marker::Circle, Marker::TriangleUp, Marker::Diamond];
    let data: Vec<_> = (0..4).map(|i| numeric(&format!("s{i}"), 3)).collect();

    let chart = GraphBuilder::new().build(&config, &data).expect("build");
    let markers: Vec<_> = chart.series.iter().map(|s| s.style.marker).collect();
    assert_eq!(
        markers,
        vec![Some(Marker::Circle), Some(Marker::TriangleUp), Some(Marker::Diamond), Some(Marker::Circle)]
    );
    assert!(chart.series.iter().all(|s| s.style.line_style.is_none()));
}

#[test]
fn configured_limits_win() {
    let mut config = titled(SeriesType::Line);
    config.graph.y_axis.min = Some(-5.0);
    config.graph.y_axis.max = Some(50.0);
    let chart = GraphBuilder::new().build(&config, &[numeric("a", 5)]).expect("build");
    assert_eq!((chart.y_axis.min, chart.y_axis.max), (-5.0, 50.0));
}

#[test]
fn empty_input_is_an_error() {
    let config = titled(SeriesType::Line);
    assert!(matches!(GraphBuilder::new().build(&config, &[]).unwrap_err(), GrapherError::NoData));
    let empty = dataset("e", XValues::Numeric(vec![]), vec![]);
    assert!(matches!(GraphBuilder::new().build(&config, &[empty]).unwrap_err(), GrapherError::NoData));
}

#[test]
fn build_from_config_and_save_writes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("series.csv");
    std::fs::write(&csv, "x,y\n0,1\n1,3\n2,2\n3,5\n").unwrap();

    let mut config = titled(SeriesType::Line);
    config.graph.style.width = 3.0;
    config.graph.style.height = 2.0;
    config.output.dpi = 60;
    config.output.save_path = dir.path().join("out/graph.png").to_string_lossy().into_owned();
    config.data.add_source(csv.to_string_lossy(), None).unwrap();
    assert!(config.is_valid(), "{:?}", config.validate());

    let builder = GraphBuilder::new();
    let chart = builder.build_from_config(&config).expect("build");
    assert_eq!(chart.series[0].label, "series");
    let written = builder.save(&chart, &config).expect("save");
    assert_eq!(written, Path::new(&config.output.save_path));

    let img = image::open(&written).expect("decode");
    assert_eq!((img.width(), img.height()), (180, 120));
}

#[test]
fn save_uses_the_extension_format() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = titled(SeriesType::Scatter);
    config.graph.style.width = 3.0;
    config.graph.style.height = 2.0;
    config.output.format = ImageFormat::Png;
    config.output.save_path = dir.path().join("graph.pdf").to_string_lossy().into_owned();

    let builder = GraphBuilder::new();
    let chart = builder.build(&config, &[numeric("a", 3)]).expect("build");
    let written = builder.save(&chart, &config).expect("save");
    assert!(std::fs::read(written).unwrap().starts_with(b"%PDF"));
}

#[test]
fn processor_and_builder_share_sources() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("cats.csv");
    std::fs::write(&csv, "kind,n\ncat,2\ndog,3\n").unwrap();
    let datasets = DataProcessor::new().process(csv.as_path()).unwrap();
    let chart = GraphBuilder::new().build(&titled(SeriesType::Bar), &datasets).unwrap();
    assert_eq!(chart.x_axis.categories.as_ref().map(Vec::len), Some(2));
}
