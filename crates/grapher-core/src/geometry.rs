// File: crates/grapher-core/src/geometry.rs
// Summary: Lightweight geometry helpers for point-space math.

use crate::types::Insets;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub fn from_size_inset(width: f32, height: f32, insets: &Insets) -> Self {
        let left = insets.left.min(width);
        let top = insets.top.min(height);
        Self {
            left,
            top,
            right: (width - insets.right).max(left + 1.0),
            bottom: (height - insets.bottom).max(top + 1.0),
        }
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }

    pub fn to_skia(&self) -> skia_safe::Rect {
        skia_safe::Rect::from_ltrb(self.left, self.top, self.right, self.bottom)
    }
}
