// File: crates/grapher-core/src/view.rs
// Visible ranges: autoscale over the chart's series, with optional fixed limits.

use crate::series::SeriesType;
use crate::Chart;

/// Fraction of the data span added on each side when autoscaling.
pub const MARGIN: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Fixed axis limits; `None` means autoscale that end.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Limits {
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
}

impl ViewState {
    pub fn from_chart(chart: &Chart) -> Self {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        let mut has_bars = false;
        for s in &chart.series {
            let Some((xl, xh, yl, yh)) = s.extents() else { continue };
            let pad = if s.series_type == SeriesType::Bar {
                has_bars = true;
                s.bar_width * 0.5
            } else {
                0.0
            };
            x_min = x_min.min(xl - pad);
            x_max = x_max.max(xh + pad);
            y_min = y_min.min(yl);
            y_max = y_max.max(yh);
        }
        if !x_min.is_finite() || !x_max.is_finite() || !y_min.is_finite() || !y_max.is_finite() {
            return Self { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 };
        }
        if has_bars {
            y_min = y_min.min(0.0);
            y_max = y_max.max(0.0);
        }
        let (x_min, x_max) = widen(x_min, x_max);
        let (y_min, y_max) = widen(y_min, y_max);
        let xm = (x_max - x_min) * MARGIN;
        let ym = (y_max - y_min) * MARGIN;
        // bars sit on the zero line, so no margin below/above it
        let y_lo = if has_bars && y_min == 0.0 { 0.0 } else { y_min - ym };
        let y_hi = if has_bars && y_max == 0.0 { 0.0 } else { y_max + ym };
        Self { x_min: x_min - xm, x_max: x_max + xm, y_min: y_lo, y_max: y_hi }
    }

    /// Replace autoscaled ends with fixed limits; non-finite limits are ignored and a resulting empty range widens.
    pub fn with_limits(mut self, limits: &Limits) -> Self {
        let finite = |v: Option<f64>| v.filter(|v| v.is_finite());
        if let Some(v) = finite(limits.x_min) { self.x_min = v; }
        if let Some(v) = finite(limits.x_max) { self.x_max = v; }
        if let Some(v) = finite(limits.y_min) { self.y_min = v; }
        if let Some(v) = finite(limits.y_max) { self.y_max = v; }
        if self.x_max <= self.x_min {
            (self.x_min, self.x_max) = widen(self.x_min, self.x_min);
        }
        if self.y_max <= self.y_min {
            (self.y_min, self.y_max) = widen(self.y_min, self.y_min);
        }
        self
    }

    pub fn apply_to_chart(&self, chart: &mut Chart) {
        chart.x_axis.min = self.x_min;
        chart.x_axis.max = self.x_max;
        chart.y_axis.min = self.y_min;
        chart.y_axis.max = self.y_max;
    }
}

fn widen(lo: f64, hi: f64) -> (f64, f64) {
    if (hi - lo).abs() < 1e-9 { (lo - 0.5, hi + 0.5) } else { (lo, hi) }
}
