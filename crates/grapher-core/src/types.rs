// File: crates/grapher-core/src/types.rs
// Summary: Shared types and constants (figure sizes, units, paddings).

/// Points per inch; layout is done in points and scaled by `dpi / POINTS_PER_INCH`.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Default figure width in inches.
pub const WIDTH_IN: f32 = 10.0;
/// Default figure height in inches.
pub const HEIGHT_IN: f32 = 10.0;
/// Default output resolution.
pub const DPI: u32 = 300;

/// Largest raster edge the renderer will allocate, in pixels.
pub const MAX_PIXELS_PER_SIDE: u32 = 16_384;

/// Outer figure margin, in points.
pub const FIGURE_MARGIN: f32 = 12.0;

/// Screen margins, in points.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Insets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Insets {
    /// Create new insets; negative inputs clamp to zero.
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left: left.max(0.0),
            right: right.max(0.0),
            top: top.max(0.0),
            bottom: bottom.max(0.0),
        }
    }
}

/// Pixel dimensions for a figure of `width_in` x `height_in` inches at `dpi`.
pub fn pixel_size(width_in: f32, height_in: f32, dpi: u32) -> (u32, u32) {
    let w = (width_in * dpi as f32).round().max(1.0) as u32;
    let h = (height_in * dpi as f32).round().max(1.0) as u32;
    (w, h)
}
