// File: crates/grapher-core/src/chart.rs
// Summary: Chart struct and headless rendering pipeline (Skia raster for PNG/JPEG, SVG and PDF canvases).

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use skia_safe as skia;

use crate::error::{GrapherError, Result};
use crate::geometry::RectF;
use crate::grid::{format_tick, nice_step, nice_ticks};
use crate::series::{Series, SeriesStyle, SeriesType};
use crate::text::TextShaper;
use crate::theme::Theme;
use crate::types::{pixel_size, Insets, DPI, FIGURE_MARGIN, HEIGHT_IN, MAX_PIXELS_PER_SIDE, POINTS_PER_INCH, WIDTH_IN};
use crate::view::{Limits, ViewState};
use crate::Axis;

const TICK_LEN: f32 = 3.5;
const SPINE_WIDTH: f32 = 0.8;
const JPEG_QUALITY: u32 = 95;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Svg,
    Pdf,
}

impl ImageFormat {
    pub fn name(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Svg => "svg",
            ImageFormat::Pdf => "pdf",
        }
    }

    /// Match a file extension (without the dot), case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "svg" => Some(ImageFormat::Svg),
            "pdf" => Some(ImageFormat::Pdf),
            _ => None,
        }
    }

    pub fn is_raster(self) -> bool {
        matches!(self, ImageFormat::Png | ImageFormat::Jpeg)
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ImageFormat::from_extension(s.trim()).ok_or_else(|| {
            format!("Invalid format '{s}'. Must be one of: [\"png\", \"jpg\", \"jpeg\", \"svg\", \"pdf\"]")
        })
    }
}

impl TryFrom<String> for ImageFormat {
    type Error = String;
    fn try_from(s: String) -> std::result::Result<Self, Self::Error> { s.parse() }
}

impl From<ImageFormat> for String {
    fn from(f: ImageFormat) -> Self { f.name().to_string() }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// Font sizes in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fonts {
    pub title_size: f32,
    pub label_size: f32,
    pub legend_size: f32,
}

impl Default for Fonts {
    fn default() -> Self {
        Self { title_size: 16.0, label_size: 12.0, legend_size: 10.0 }
    }
}

impl Fonts {
    pub fn tick_size(&self) -> f32 { self.label_size * 0.85 }
}

#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub width_in: f32,
    pub height_in: f32,
    pub dpi: u32,
    /// Text (title, labels, ticks, legend) is skipped when false; keeps pixel output font-independent.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { width_in: WIDTH_IN, height_in: HEIGHT_IN, dpi: DPI, draw_labels: true }
    }
}

impl RenderOptions {
    pub fn pixel_size(&self) -> (u32, u32) {
        pixel_size(self.width_in, self.height_in, self.dpi)
    }

    fn size_pt(&self) -> (f32, f32) {
        (self.width_in * POINTS_PER_INCH, self.height_in * POINTS_PER_INCH)
    }

    fn scale(&self) -> f32 {
        self.dpi as f32 / POINTS_PER_INCH
    }

    /// Figure size in points, rejecting empty or non-finite figures.
    fn checked_size_pt(&self) -> Result<(f32, f32)> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if !(ok(self.width_in) && ok(self.height_in)) || self.dpi == 0 {
            return Err(GrapherError::render(format!(
                "figure size must be positive, got {}x{} in at {} dpi",
                self.width_in, self.height_in, self.dpi
            )));
        }
        Ok(self.size_pt())
    }

    fn checked_pixel_size(&self) -> Result<(i32, i32)> {
        self.checked_size_pt()?;
        let (w, h) = self.pixel_size();
        if w > MAX_PIXELS_PER_SIDE || h > MAX_PIXELS_PER_SIDE {
            return Err(GrapherError::render(format!(
                "image of {w}x{h} px exceeds the {MAX_PIXELS_PER_SIDE} px limit; lower dpi or size"
            )));
        }
        Ok((w as i32, h as i32))
    }
}

pub struct Chart {
    pub title: String,
    pub series: Vec<Series>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub theme: Theme,
    pub fonts: Fonts,
    pub show_grid: bool,
    pub show_legend: bool,
}

impl Default for Chart {
    fn default() -> Self { Self::new() }
}

impl Chart {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            series: Vec::new(),
            x_axis: Axis::default_x(),
            y_axis: Axis::default_y(),
            theme: Theme::light(),
            fonts: Fonts::default(),
            show_grid: true,
            show_legend: true,
        }
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Fit both axes to the data, then pin any end fixed in `limits`.
    pub fn autoscale_axes(&mut self, limits: &Limits) {
        ViewState::from_chart(self).with_limits(limits).apply_to_chart(self);
    }

    /// Render the chart to a PNG at `output_png_path` using a CPU raster surface.
    pub fn render_to_png(&self, opts: &RenderOptions, output_png_path: impl AsRef<Path>) -> Result<()> {
        self.render_to_file(opts, ImageFormat::Png, output_png_path)
    }

    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        self.render_to_bytes(opts, ImageFormat::Png)
    }

    /// Encode the chart in `format`; the whole image is produced in memory.
    pub fn render_to_bytes(&self, opts: &RenderOptions, format: ImageFormat) -> Result<Vec<u8>> {
        match format {
            ImageFormat::Png | ImageFormat::Jpeg => self.render_raster(opts, format),
            ImageFormat::Svg => self.render_svg(opts),
            ImageFormat::Pdf => self.render_pdf(opts),
        }
    }

    /// Render then write; the file is only created once encoding succeeded.
    pub fn render_to_file(&self, opts: &RenderOptions, format: ImageFormat, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.render_to_bytes(opts, format)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| GrapherError::io(parent, e))?;
        }
        std::fs::write(path, &bytes).map_err(|e| GrapherError::io(path, e))?;
        Ok(())
    }

    /// Render into a tightly packed RGBA8 buffer: `(pixels, width, height, row_stride)`.
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
        let (w, h) = opts.checked_pixel_size()?;
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| GrapherError::render("failed to create raster surface"))?;
        self.paint_scaled(surface.canvas(), opts);

        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut pixels = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            return Err(GrapherError::render("reading back pixels failed"));
        }
        Ok((pixels, w as u32, h as u32, stride))
    }

    fn render_raster(&self, opts: &RenderOptions, format: ImageFormat) -> Result<Vec<u8>> {
        let (w, h) = opts.checked_pixel_size()?;
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| GrapherError::render("failed to create raster surface"))?;
        self.paint_scaled(surface.canvas(), opts);

        // Snapshot and encode
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = match format {
            ImageFormat::Jpeg => image.encode_to_data_with_quality(skia::EncodedImageFormat::JPEG, JPEG_QUALITY),
            _ => image.encode_to_data(skia::EncodedImageFormat::PNG),
        }
        .ok_or_else(|| GrapherError::render(format!("encode {format} failed")))?;
        Ok(data.as_bytes().to_vec())
    }

    fn render_svg(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let (w, h) = opts.checked_size_pt()?;
        let canvas = skia::svg::Canvas::new(skia::Rect::from_wh(w, h), None);
        self.paint(&canvas, w, h, opts.draw_labels);
        let data = canvas.end();
        Ok(data.as_bytes().to_vec())
    }

    fn render_pdf(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let (w, h) = opts.checked_size_pt()?;
        let mut bytes: Vec<u8> = Vec::new();
        {
            let document = skia::pdf::new_document(&mut bytes, None);
            let mut page = document.begin_page((w, h), None);
            self.paint(page.canvas(), w, h, opts.draw_labels);
            page.end_page().close();
        }
        if bytes.is_empty() {
            return Err(GrapherError::render("PDF document is empty"));
        }
        Ok(bytes)
    }

    fn paint_scaled(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let (w, h) = opts.size_pt();
        let s = opts.scale();
        canvas.save();
        canvas.scale((s, s));
        self.paint(canvas, w, h, opts.draw_labels);
        canvas.restore();
    }

    /// Draw the whole figure in point space onto `canvas`.
    fn paint(&self, canvas: &skia::Canvas, width: f32, height: f32, draw_labels: bool) {
        let shaper = TextShaper::new();
        let layout = self.layout(&shaper, width, height, draw_labels);
        let frame = Frame { plot: layout.plot, x: &self.x_axis, y: &self.y_axis };

        // Background
        let mut bg = skia::Paint::default();
        bg.set_color(self.theme.background);
        canvas.draw_rect(skia::Rect::from_wh(width, height), &bg);
        bg.set_color(self.theme.plot_background);
        canvas.draw_rect(frame.plot.to_skia(), &bg);

        if self.show_grid {
            draw_grid(canvas, &frame, &layout, &self.theme);
        }

        // Series, clipped to the plot area
        canvas.save();
        canvas.clip_rect(frame.plot.to_skia(), None, Some(true));
        for s in &self.series {
            match s.series_type {
                SeriesType::Line => draw_line_series(canvas, &frame, s),
                SeriesType::Bar => draw_bar_series(canvas, &frame, s),
                SeriesType::Scatter => draw_scatter_series(canvas, &frame, s),
            }
        }
        canvas.restore();

        draw_axes(canvas, &frame, &layout, &self.theme);

        if draw_labels {
            self.draw_text(canvas, &shaper, &frame, &layout);
            if self.show_legend {
                draw_legend(canvas, &shaper, &frame, &self.series, &self.fonts, &self.theme);
            }
        }
    }

    fn layout(&self, shaper: &TextShaper, width: f32, height: f32, draw_labels: bool) -> Layout {
        let tick_size = self.fonts.tick_size();
        let x_target = ((width / 90.0) as usize).clamp(3, 10);
        let y_target = ((height / 60.0) as usize).clamp(3, 10);
        let x_ticks = ticks_for(&self.x_axis, x_target);
        let y_ticks = ticks_for(&self.y_axis, y_target);

        let widest_y_tick = y_ticks
            .iter()
            .map(|(_, label)| {
                if draw_labels {
                    shaper.measure_width(label, tick_size)
                } else {
                    label.chars().count() as f32 * tick_size * 0.6
                }
            })
            .fold(0.0f32, f32::max);

        let title_h = if self.title.is_empty() { 0.0 } else { self.fonts.title_size * 1.8 };
        let x_label_h = if self.x_axis.label.is_empty() { 0.0 } else { self.fonts.label_size * 1.6 };
        let y_label_w = if self.y_axis.label.is_empty() { 0.0 } else { self.fonts.label_size * 1.6 };

        let insets = Insets::new(
            FIGURE_MARGIN + y_label_w + widest_y_tick + TICK_LEN + 4.0,
            FIGURE_MARGIN + tick_size,
            FIGURE_MARGIN + title_h.max(tick_size * 0.5),
            FIGURE_MARGIN + TICK_LEN + tick_size * 1.6 + x_label_h,
        );
        Layout {
            plot: RectF::from_size_inset(width, height, &insets),
            x_ticks,
            y_ticks,
            tick_size,
        }
    }

    fn draw_text(&self, canvas: &skia::Canvas, shaper: &TextShaper, frame: &Frame, layout: &Layout) {
        let plot = frame.plot;
        let tick = self.theme.tick;

        for (v, label) in &layout.x_ticks {
            let x = frame.sx(*v);
            shaper.draw_centered(canvas, label, x, plot.bottom + TICK_LEN + 2.0, layout.tick_size, tick, false);
        }
        for (v, label) in &layout.y_ticks {
            let y = frame.sy(*v);
            shaper.draw_right(canvas, label, plot.left - TICK_LEN - 3.0, y, layout.tick_size, tick);
        }

        if !self.x_axis.label.is_empty() {
            let y = plot.bottom + TICK_LEN + layout.tick_size * 1.6;
            let cx = (plot.left + plot.right) * 0.5;
            shaper.draw_centered(canvas, &self.x_axis.label, cx, y, self.fonts.label_size, self.theme.axis_label, false);
        }
        if !self.y_axis.label.is_empty() {
            let cx = FIGURE_MARGIN + self.fonts.label_size * 0.6;
            let cy = (plot.top + plot.bottom) * 0.5;
            shaper.draw_vertical(canvas, &self.y_axis.label, cx, cy, self.fonts.label_size, self.theme.axis_label);
        }
        if !self.title.is_empty() {
            let cx = (plot.left + plot.right) * 0.5;
            let y = FIGURE_MARGIN + self.fonts.title_size * 0.2;
            shaper.draw_centered(canvas, &self.title, cx, y, self.fonts.title_size, self.theme.title, true);
        }
    }
}

struct Layout {
    plot: RectF,
    x_ticks: Vec<(f64, String)>,
    y_ticks: Vec<(f64, String)>,
    tick_size: f32,
}

/// Plot rectangle plus the axes that map data into it.
struct Frame<'a> {
    plot: RectF,
    x: &'a Axis,
    y: &'a Axis,
}

impl Frame<'_> {
    fn sx(&self, x: f64) -> f32 { self.x.to_px(x, self.plot.left, self.plot.right) }
    fn sy(&self, y: f64) -> f32 { self.y.to_px(y, self.plot.bottom, self.plot.top) }
}

fn ticks_for(axis: &Axis, target: usize) -> Vec<(f64, String)> {
    if let Some(categories) = &axis.categories {
        return categories
            .iter()
            .enumerate()
            .map(|(i, name)| (i as f64, name.clone()))
            .filter(|(v, _)| *v >= axis.min && *v <= axis.max)
            .collect();
    }
    let step = nice_step(axis.min, axis.max, target);
    nice_ticks(axis.min, axis.max, target)
        .into_iter()
        .map(|v| (v, format_tick(v, step)))
        .collect()
}

// ---- helpers ----------------------------------------------------------------

fn stroke_paint(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_color(color);
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint
}

fn fill_paint(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_color(color);
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint
}

fn draw_grid(canvas: &skia::Canvas, frame: &Frame, layout: &Layout, theme: &Theme) {
    let paint = stroke_paint(theme.grid, 0.8);
    let p = frame.plot;

    // verticals
    for (v, _) in &layout.x_ticks {
        let x = frame.sx(*v);
        canvas.draw_line((x, p.top), (x, p.bottom), &paint);
    }
    // horizontals
    for (v, _) in &layout.y_ticks {
        let y = frame.sy(*v);
        canvas.draw_line((p.left, y), (p.right, y), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, frame: &Frame, layout: &Layout, theme: &Theme) {
    let p = frame.plot;
    let axis_paint = stroke_paint(theme.axis_line, SPINE_WIDTH);
    canvas.draw_rect(p.to_skia(), &axis_paint);

    let tick_paint = stroke_paint(theme.axis_line, SPINE_WIDTH);
    for (v, _) in &layout.x_ticks {
        let x = frame.sx(*v);
        canvas.draw_line((x, p.bottom), (x, p.bottom + TICK_LEN), &tick_paint);
    }
    for (v, _) in &layout.y_ticks {
        let y = frame.sy(*v);
        canvas.draw_line((p.left - TICK_LEN, y), (p.left, y), &tick_paint);
    }
}

fn draw_marker(canvas: &skia::Canvas, style: &SeriesStyle, marker: crate::Marker, x: f32, y: f32) {
    let path = marker.path(x, y, style.marker_size);
    let color = style.paint_color();
    if marker.is_filled() {
        canvas.draw_path(&path, &fill_paint(color));
        canvas.draw_path(&path, &stroke_paint(color, 1.0));
    } else {
        canvas.draw_path(&path, &stroke_paint(color, (style.marker_size / 6.0).max(1.0)));
    }
}

fn draw_line_series(canvas: &skia::Canvas, frame: &Frame, series: &Series) {
    let style = &series.style;

    if let Some(line_style) = style.line_style {
        let mut path = skia::Path::new();
        let mut pen_down = false;
        let mut segments = 0usize;
        for &(x, y) in &series.data_xy {
            if !(x.is_finite() && y.is_finite()) {
                // gap in the data breaks the line
                pen_down = false;
                continue;
            }
            let pt = (frame.sx(x), frame.sy(y));
            if pen_down {
                path.line_to(pt);
                segments += 1;
            } else {
                path.move_to(pt);
                pen_down = true;
            }
        }

        if segments > 0 {
            let mut stroke = stroke_paint(style.paint_color(), style.line_width);
            stroke.set_stroke_join(skia::paint::Join::Round);
            if let Some(effect) = line_style.path_effect(style.line_width) {
                stroke.set_path_effect(effect);
            }
            canvas.draw_path(&path, &stroke);
        }
    }

    if let Some(marker) = style.marker {
        for &(x, y) in series.data_xy.iter().filter(|(x, y)| x.is_finite() && y.is_finite()) {
            draw_marker(canvas, style, marker, frame.sx(x), frame.sy(y));
        }
    }
}

fn draw_scatter_series(canvas: &skia::Canvas, frame: &Frame, series: &Series) {
    let marker = series.style.marker.unwrap_or(crate::Marker::Circle);
    for &(x, y) in series.data_xy.iter().filter(|(x, y)| x.is_finite() && y.is_finite()) {
        draw_marker(canvas, &series.style, marker, frame.sx(x), frame.sy(y));
    }
}

fn draw_bar_series(canvas: &skia::Canvas, frame: &Frame, series: &Series) {
    let paint = fill_paint(series.style.paint_color());
    let half = series.bar_width * 0.5;
    let y0 = frame.sy(0.0);
    for &(x, y) in series.data_xy.iter().filter(|(x, y)| x.is_finite() && y.is_finite()) {
        let left = frame.sx(x - half);
        let right = frame.sx(x + half);
        let top = frame.sy(y);
        let rect = skia::Rect::from_ltrb(left.min(right), top.min(y0), left.max(right), top.max(y0));
        canvas.draw_rect(rect, &paint);
    }
}

fn draw_legend(
    canvas: &skia::Canvas,
    shaper: &TextShaper,
    frame: &Frame,
    series: &[Series],
    fonts: &Fonts,
    theme: &Theme,
) {
    let entries = series.iter().filter(|s| !s.label.is_empty()).collect::<Vec<_>>();
    if entries.is_empty() {
        return;
    }

    let size = fonts.legend_size;
    let pad = size * 0.5;
    let handle_len = size * 2.0;
    let row_h = size * 1.5;
    let text_w = entries.iter().map(|s| shaper.measure_width(&s.label, size)).fold(0.0f32, f32::max);
    let box_w = pad + handle_len + pad + text_w + pad;
    let box_h = pad + row_h * entries.len() as f32 + pad * 0.5;

    let right = frame.plot.right - pad;
    let top = frame.plot.top + pad;
    let rect = skia::Rect::from_ltrb(right - box_w, top, right, top + box_h);
    let rrect = skia::RRect::new_rect_xy(rect, 3.0, 3.0);
    canvas.draw_rrect(rrect, &fill_paint(theme.legend_background));
    canvas.draw_rrect(rrect, &stroke_paint(theme.legend_border, 0.8));

    for (i, s) in entries.iter().enumerate() {
        let cy = top + pad + row_h * (i as f32 + 0.5);
        let hx0 = rect.left + pad;
        let hx1 = hx0 + handle_len;
        let style = &s.style;
        match s.series_type {
            SeriesType::Line => {
                if let Some(line_style) = style.line_style {
                    let mut stroke = stroke_paint(style.paint_color(), style.line_width);
                    if let Some(effect) = line_style.path_effect(style.line_width) {
                        stroke.set_path_effect(effect);
                    }
                    canvas.draw_line((hx0, cy), (hx1, cy), &stroke);
                }
                if let Some(marker) = style.marker {
                    draw_marker(canvas, style, marker, (hx0 + hx1) * 0.5, cy);
                }
            }
            SeriesType::Scatter => {
                let marker = style.marker.unwrap_or(crate::Marker::Circle);
                draw_marker(canvas, style, marker, (hx0 + hx1) * 0.5, cy);
            }
            SeriesType::Bar => {
                let h = size * 0.7;
                let swatch = skia::Rect::from_ltrb(hx0, cy - h * 0.5, hx1, cy + h * 0.5);
                canvas.draw_rect(swatch, &fill_paint(style.paint_color()));
            }
        }
        shaper.draw_left(canvas, &s.label, hx1 + pad, cy, size, theme.axis_label);
    }
}
