// File: crates/grapher-core/tests/rgba.rs
// Purpose: Validate RGBA rendering buffer shape and a few pixels.

use grapher_core::{Axis, Chart, RenderOptions, Series, SeriesStyle, SeriesType, Theme};

fn opts() -> RenderOptions {
    RenderOptions { width_in: 2.0, height_in: 2.0, dpi: 72, draw_labels: false }
}

#[test]
fn render_rgba8_buffer() {
    let mut chart = Chart::new();
    chart.x_axis = Axis::new("X", 0.0, 4.0);
    chart.y_axis = Axis::new("Y", 0.0, 4.0);
    chart.add_series(Series::with_data(SeriesType::Line, vec![(0.0, 0.0), (4.0, 4.0)]));

    let (px, w, h, stride) = chart.render_to_rgba8(&opts()).expect("rgba render");
    assert_eq!((w, h), (144, 144));
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, (w as usize) * 4);

    // Background is opaque white in the light theme
    assert_eq!(&px[0..4], &[255, 255, 255, 255]);
}

#[test]
fn dark_theme_paints_dark_background() {
    let mut chart = Chart::new();
    chart.theme = Theme::dark();
    let (px, ..) = chart.render_to_rgba8(&opts()).expect("rgba render");
    let bg = Theme::dark().background;
    assert_eq!(&px[0..3], &[bg.r(), bg.g(), bg.b()]);
}

#[test]
fn bar_fills_from_zero_in_series_color() {
    let mut chart = Chart::new();
    chart.show_grid = false;
    chart.x_axis = Axis::new("X", -1.0, 1.0);
    chart.y_axis = Axis::new("Y", 0.0, 1.0);
    let style = SeriesStyle { color: skia_red(), ..SeriesStyle::default() };
    chart.add_series(Series::with_data(SeriesType::Bar, vec![(0.0, 1.0)]).with_style(style).with_bar_width(1.0));

    let (px, w, h, stride) = chart.render_to_rgba8(&opts()).expect("rgba render");
    // sample slightly above the bottom of the canvas centre column, inside the plot and the bar
    let (mut found, cx) = (false, w as usize / 2);
    for y in (0..h as usize).rev() {
        let i = y * stride + cx * 4;
        if px[i] == 255 && px[i + 1] == 0 && px[i + 2] == 0 {
            found = true;
            break;
        }
    }
    assert!(found, "expected red bar pixels in the centre column");
}

fn skia_red() -> skia_safe::Color {
    skia_safe::Color::from_rgb(255, 0, 0)
}
