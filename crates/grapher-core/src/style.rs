// File: crates/grapher-core/src/style.rs
// Summary: Marker shapes and line dash styles, parsed from their short codes ("o", "--", ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use skia_safe as skia;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Marker {
    Circle,
    Square,
    TriangleUp,
    TriangleDown,
    TriangleLeft,
    TriangleRight,
    Pentagon,
    Star,
    Plus,
    Cross,
    Diamond,
    Hexagon1,
    Hexagon2,
    TriDown,
    TriUp,
    TriLeft,
    TriRight,
    VLine,
    HLine,
    Point,
    Pixel,
}

impl Marker {
    pub const ALL: [Marker; 21] = [
        Marker::Circle,
        Marker::Square,
        Marker::TriangleUp,
        Marker::TriangleDown,
        Marker::TriangleLeft,
        Marker::TriangleRight,
        Marker::Pentagon,
        Marker::Star,
        Marker::Plus,
        Marker::Cross,
        Marker::Diamond,
        Marker::Hexagon1,
        Marker::Hexagon2,
        Marker::TriDown,
        Marker::TriUp,
        Marker::TriLeft,
        Marker::TriRight,
        Marker::VLine,
        Marker::HLine,
        Marker::Point,
        Marker::Pixel,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Marker::Circle => "o",
            Marker::Square => "s",
            Marker::TriangleUp => "^",
            Marker::TriangleDown => "v",
            Marker::TriangleLeft => "<",
            Marker::TriangleRight => ">",
            Marker::Pentagon => "p",
            Marker::Star => "*",
            Marker::Plus => "+",
            Marker::Cross => "x",
            Marker::Diamond => "D",
            Marker::Hexagon1 => "h",
            Marker::Hexagon2 => "H",
            Marker::TriDown => "1",
            Marker::TriUp => "2",
            Marker::TriLeft => "3",
            Marker::TriRight => "4",
            Marker::VLine => "|",
            Marker::HLine => "_",
            Marker::Point => ".",
            Marker::Pixel => ",",
        }
    }

    /// Filled markers get a fill; the rest are stroked outlines.
    pub fn is_filled(self) -> bool {
        !matches!(
            self,
            Marker::Plus
                | Marker::Cross
                | Marker::TriDown
                | Marker::TriUp
                | Marker::TriLeft
                | Marker::TriRight
                | Marker::VLine
                | Marker::HLine
        )
    }

    /// Outline of the marker centred on `(cx, cy)` with nominal diameter `size`.
    pub fn path(self, cx: f32, cy: f32, size: f32) -> skia::Path {
        let r = size * 0.5;
        let mut p = skia::Path::new();
        match self {
            Marker::Circle => {
                p.add_circle((cx, cy), r, None);
            }
            Marker::Point => {
                p.add_circle((cx, cy), r * 0.5, None);
            }
            Marker::Pixel => {
                p.add_rect(skia::Rect::from_xywh(cx - 0.5, cy - 0.5, 1.0, 1.0), None);
            }
            Marker::Square => {
                let h = r * 0.85;
                p.add_rect(skia::Rect::from_ltrb(cx - h, cy - h, cx + h, cy + h), None);
            }
            Marker::Diamond => polygon(&mut p, cx, cy, r, 4, 90.0),
            Marker::TriangleUp => polygon(&mut p, cx, cy, r, 3, 90.0),
            Marker::TriangleDown => polygon(&mut p, cx, cy, r, 3, -90.0),
            Marker::TriangleLeft => polygon(&mut p, cx, cy, r, 3, 180.0),
            Marker::TriangleRight => polygon(&mut p, cx, cy, r, 3, 0.0),
            Marker::Pentagon => polygon(&mut p, cx, cy, r, 5, 90.0),
            Marker::Hexagon1 => polygon(&mut p, cx, cy, r, 6, 90.0),
            Marker::Hexagon2 => polygon(&mut p, cx, cy, r, 6, 0.0),
            Marker::Star => star(&mut p, cx, cy, r),
            Marker::Plus => {
                p.move_to((cx - r, cy));
                p.line_to((cx + r, cy));
                p.move_to((cx, cy - r));
                p.line_to((cx, cy + r));
            }
            Marker::Cross => {
                let d = r * std::f32::consts::FRAC_1_SQRT_2;
                p.move_to((cx - d, cy - d));
                p.line_to((cx + d, cy + d));
                p.move_to((cx - d, cy + d));
                p.line_to((cx + d, cy - d));
            }
            Marker::TriDown => spokes(&mut p, cx, cy, r, -90.0),
            Marker::TriUp => spokes(&mut p, cx, cy, r, 90.0),
            Marker::TriLeft => spokes(&mut p, cx, cy, r, 180.0),
            Marker::TriRight => spokes(&mut p, cx, cy, r, 0.0),
            Marker::VLine => {
                p.move_to((cx, cy - r));
                p.line_to((cx, cy + r));
            }
            Marker::HLine => {
                p.move_to((cx - r, cy));
                p.line_to((cx + r, cy));
            }
        }
        p
    }
}

// Angles are in degrees, counter-clockwise from +x with y pointing up on screen.
fn vertex(cx: f32, cy: f32, r: f32, deg: f32) -> (f32, f32) {
    let a = deg.to_radians();
    (cx + r * a.cos(), cy - r * a.sin())
}

fn polygon(p: &mut skia::Path, cx: f32, cy: f32, r: f32, sides: usize, start_deg: f32) {
    let step = 360.0 / sides as f32;
    p.move_to(vertex(cx, cy, r, start_deg));
    for i in 1..sides {
        p.line_to(vertex(cx, cy, r, start_deg + step * i as f32));
    }
    p.close();
}

fn star(p: &mut skia::Path, cx: f32, cy: f32, r: f32) {
    let inner = r * 0.4;
    p.move_to(vertex(cx, cy, r, 90.0));
    for i in 1..10 {
        let radius = if i % 2 == 0 { r } else { inner };
        p.line_to(vertex(cx, cy, radius, 90.0 + 36.0 * i as f32));
    }
    p.close();
}

fn spokes(p: &mut skia::Path, cx: f32, cy: f32, r: f32, start_deg: f32) {
    for i in 0..3 {
        p.move_to((cx, cy));
        p.line_to(vertex(cx, cy, r, start_deg + 120.0 * i as f32));
    }
}

impl FromStr for Marker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Marker::ALL.into_iter().find(|m| m.code() == s).ok_or_else(|| {
            let valid = Marker::ALL.iter().map(|m| m.code()).collect::<Vec<_>>();
            format!("Invalid marker '{s}'. Valid markers: {valid:?}")
        })
    }
}

impl TryFrom<String> for Marker {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl From<Marker> for String {
    fn from(m: Marker) -> Self { m.code().to_string() }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.code()) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LineStyle {
    Solid,
    Dashed,
    DashDot,
    Dotted,
}

impl LineStyle {
    pub const ALL: [LineStyle; 4] = [LineStyle::Solid, LineStyle::Dashed, LineStyle::DashDot, LineStyle::Dotted];

    pub fn code(self) -> &'static str {
        match self {
            LineStyle::Solid => "-",
            LineStyle::Dashed => "--",
            LineStyle::DashDot => "-.",
            LineStyle::Dotted => ":",
        }
    }

    /// On/off dash intervals in units of line width; empty for solid.
    pub fn intervals(self) -> &'static [f32] {
        match self {
            LineStyle::Solid => &[],
            LineStyle::Dashed => &[3.7, 1.6],
            LineStyle::DashDot => &[6.4, 1.6, 1.0, 1.6],
            LineStyle::Dotted => &[1.0, 1.65],
        }
    }

    pub fn path_effect(self, line_width: f32) -> Option<skia::PathEffect> {
        let intervals = self.intervals();
        if intervals.is_empty() {
            return None;
        }
        let scaled = intervals.iter().map(|v| v * line_width.max(0.5)).collect::<Vec<_>>();
        skia::PathEffect::dash(&scaled, 0.0)
    }
}

impl FromStr for LineStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LineStyle::ALL.into_iter().find(|l| l.code() == s).ok_or_else(|| {
            let valid = LineStyle::ALL.iter().map(|l| l.code()).collect::<Vec<_>>();
            format!("Invalid line style '{s}'. Valid line styles: {valid:?}")
        })
    }
}

impl TryFrom<String> for LineStyle {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl From<LineStyle> for String {
    fn from(l: LineStyle) -> Self { l.code().to_string() }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.code()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_codes_round_trip() {
        for m in Marker::ALL {
            assert_eq!(m.code().parse::<Marker>(), Ok(m));
        }
        let err = "invalid_marker".parse::<Marker>().unwrap_err();
        assert!(err.starts_with("Invalid marker"));
    }

    #[test]
    fn solid_has_no_dash() {
        assert!(LineStyle::Solid.path_effect(2.0).is_none());
        assert!(LineStyle::Dashed.path_effect(2.0).is_some());
        assert!("~".parse::<LineStyle>().unwrap_err().starts_with("Invalid line style"));
    }
}
