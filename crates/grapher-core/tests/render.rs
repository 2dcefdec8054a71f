// File: crates/grapher-core/tests/render.rs
// Purpose: End-to-end rendering into every output format, plus size and failure checks.

use grapher_core::{Axis, Chart, GrapherError, ImageFormat, RenderOptions, Series, SeriesType};

fn small_chart() -> Chart {
    let mut chart = Chart::new();
    chart.title = "Smoke".to_string();
    chart.x_axis = Axis::new("X", 0.0, 4.0);
    chart.y_axis = Axis::new("Y", 0.0, 4.0);
    chart.add_series(
        Series::with_data(
            SeriesType::Line,
            vec![(0.0, 0.0), (1.0, 2.0), (2.0, 1.0), (3.0, 3.5), (4.0, 2.5)],
        )
        .with_label("line"),
    );
    chart
}

fn small_opts() -> RenderOptions {
    RenderOptions { width_in: 4.0, height_in: 3.0, dpi: 50, draw_labels: true }
}

#[test]
fn png_has_magic_and_requested_size() {
    let bytes = small_chart().render_to_png_bytes(&small_opts()).expect("render png");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    let img = image::load_from_memory(&bytes).expect("decode png");
    assert_eq!((img.width(), img.height()), (200, 150));
}

#[test]
fn jpeg_svg_pdf_carry_their_signatures() {
    let chart = small_chart();
    let opts = small_opts();

    let jpeg = chart.render_to_bytes(&opts, ImageFormat::Jpeg).expect("render jpeg");
    assert!(jpeg.starts_with(&[0xFF, 0xD8]));

    let svg = chart.render_to_bytes(&opts, ImageFormat::Svg).expect("render svg");
    let text = String::from_utf8_lossy(&svg);
    assert!(text.contains("<svg"), "svg output: {}", text.chars().take(200).collect::<String>());

    let pdf = chart.render_to_bytes(&opts, ImageFormat::Pdf).expect("render pdf");
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn render_to_file_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested/deeper/graph.png");
    small_chart().render_to_png(&small_opts(), &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");
}

#[test]
fn oversized_raster_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("huge.png");
    let opts = RenderOptions { width_in: 100.0, height_in: 100.0, dpi: 600, draw_labels: false };
    let err = small_chart().render_to_png(&opts, &out).unwrap_err();
    assert!(matches!(err, GrapherError::Render(_)), "{err}");
    assert!(!out.exists());
}

#[test]
fn non_positive_size_is_rejected() {
    let opts = RenderOptions { width_in: 0.0, height_in: 3.0, dpi: 100, draw_labels: false };
    assert!(small_chart().render_to_png_bytes(&opts).is_err());
}

#[test]
fn every_series_type_renders() {
    for kind in SeriesType::ALL {
        let mut chart = Chart::new();
        chart.add_series(Series::with_data(kind, vec![(0.0, 1.0), (1.0, 3.0), (2.0, 2.0)]).with_label(kind.name()));
        chart.autoscale_axes(&Default::default());
        let bytes = chart.render_to_png_bytes(&small_opts()).expect("render");
        assert!(bytes.starts_with(&[137, 80, 78, 71]), "{kind}");
    }
}

#[test]
fn non_finite_figure_size_is_rejected_for_every_format() {
    let chart = small_chart();
    let opts = RenderOptions { width_in: f32::INFINITY, height_in: 3.0, dpi: 50, draw_labels: true };
    for format in [ImageFormat::Png, ImageFormat::Svg, ImageFormat::Pdf] {
        let err = chart.render_to_bytes(&opts, format).unwrap_err();
        assert!(matches!(err, GrapherError::Render(_)), "{format}: {err}");
    }
    let nan = RenderOptions { height_in: f32::NAN, ..small_opts() };
    assert!(chart.render_to_bytes(&nan, ImageFormat::Svg).is_err());
}
