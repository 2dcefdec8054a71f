// File: crates/grapher-core/src/axis.rs
// Summary: Axis model with labels, ranges, and optional category tick names.

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
    /// When set, ticks sit at integer positions `0..categories.len()` with these names.
    pub categories: Option<Vec<String>>,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max, categories: None }
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = Some(categories);
        self
    }

    pub fn default_x() -> Self {
        Self::new("X", 0.0, 1.0)
    }

    pub fn default_y() -> Self {
        Self::new("Y", 0.0, 1.0)
    }

    pub fn span(&self) -> f64 {
        (self.max - self.min).max(1e-12)
    }

    /// Map `v` onto `[lo_px, hi_px]`; `lo_px` corresponds to `min`.
    #[inline]
    pub fn to_px(&self, v: f64, lo_px: f32, hi_px: f32) -> f32 {
        lo_px + ((v - self.min) / self.span()) as f32 * (hi_px - lo_px)
    }
}
