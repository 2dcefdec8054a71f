// File: crates/grapher-core/src/theme.rs
// Summary: Color schemes for chart rendering and series color parsing.

use skia_safe as skia;

/// Matplotlib's "tab10" cycle; the light theme uses it as-is.
const TAB10: [skia::Color; 10] = [
    skia::Color::new(0xff1f77b4),
    skia::Color::new(0xffff7f0e),
    skia::Color::new(0xff2ca02c),
    skia::Color::new(0xffd62728),
    skia::Color::new(0xff9467bd),
    skia::Color::new(0xff8c564b),
    skia::Color::new(0xffe377c2),
    skia::Color::new(0xff7f7f7f),
    skia::Color::new(0xffbcbd22),
    skia::Color::new(0xff17becf),
];

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub plot_background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub title: skia::Color,
    pub legend_background: skia::Color,
    pub legend_border: skia::Color,
    pub palette: [skia::Color; 10],
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::WHITE,
            plot_background: skia::Color::WHITE,
            grid: skia::Color::from_argb(77, 176, 176, 176),
            axis_line: skia::Color::from_argb(255, 0, 0, 0),
            axis_label: skia::Color::from_argb(255, 0, 0, 0),
            tick: skia::Color::from_argb(255, 0, 0, 0),
            title: skia::Color::from_argb(255, 0, 0, 0),
            legend_background: skia::Color::from_argb(204, 255, 255, 255),
            legend_border: skia::Color::from_argb(255, 204, 204, 204),
            palette: TAB10,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            plot_background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            title: skia::Color::from_argb(255, 235, 235, 245),
            legend_background: skia::Color::from_argb(220, 28, 28, 32),
            legend_border: skia::Color::from_argb(255, 70, 70, 80),
            palette: [
                skia::Color::from_argb(255, 64, 160, 255),
                skia::Color::from_argb(255, 255, 159, 64),
                skia::Color::from_argb(255, 40, 200, 120),
                skia::Color::from_argb(255, 220, 80, 80),
                skia::Color::from_argb(255, 180, 130, 255),
                skia::Color::from_argb(255, 200, 150, 110),
                skia::Color::from_argb(255, 255, 130, 210),
                skia::Color::from_argb(255, 170, 170, 170),
                skia::Color::from_argb(255, 220, 220, 70),
                skia::Color::from_argb(255, 70, 220, 230),
            ],
        }
    }

    pub fn solarized_dark() -> Self {
        // Base colors from Solarized dark palette
        Self {
            name: "solarized-dark",
            background: skia::Color::from_argb(255, 0x00, 0x2b, 0x36), // base03
            plot_background: skia::Color::from_argb(255, 0x00, 0x2b, 0x36),
            grid: skia::Color::from_argb(255, 0x07, 0x36, 0x42),       // base02
            axis_line: skia::Color::from_argb(255, 0x93, 0xa1, 0xa1),  // base1
            axis_label: skia::Color::from_argb(255, 0xee, 0xe8, 0xd5), // base2
            tick: skia::Color::from_argb(255, 0x83, 0x94, 0x96),       // base0
            title: skia::Color::from_argb(255, 0xee, 0xe8, 0xd5),
            legend_background: skia::Color::from_argb(230, 0x07, 0x36, 0x42),
            legend_border: skia::Color::from_argb(255, 0x58, 0x6e, 0x75),
            palette: solarized_accents(),
        }
    }

    pub fn solarized_light() -> Self {
        Self {
            name: "solarized-light",
            background: skia::Color::from_argb(255, 0xfd, 0xf6, 0xe3), // base3
            plot_background: skia::Color::from_argb(255, 0xfd, 0xf6, 0xe3),
            grid: skia::Color::from_argb(255, 0xee, 0xe8, 0xd5),       // base2
            axis_line: skia::Color::from_argb(255, 0x65, 0x7b, 0x83),  // base00
            axis_label: skia::Color::from_argb(255, 0x00, 0x2b, 0x36), // base03
            tick: skia::Color::from_argb(255, 0x58, 0x6e, 0x75),       // base01
            title: skia::Color::from_argb(255, 0x00, 0x2b, 0x36),
            legend_background: skia::Color::from_argb(230, 0xee, 0xe8, 0xd5),
            legend_border: skia::Color::from_argb(255, 0x93, 0xa1, 0xa1),
            palette: solarized_accents(),
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: skia::Color::from_argb(255, 0x00, 0x00, 0x00),
            plot_background: skia::Color::from_argb(255, 0x00, 0x00, 0x00),
            grid: skia::Color::from_argb(255, 0x22, 0x22, 0x22),
            axis_line: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            axis_label: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            tick: skia::Color::from_argb(255, 0xcc, 0xcc, 0xcc),
            title: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            legend_background: skia::Color::from_argb(255, 0x00, 0x00, 0x00),
            legend_border: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            palette: [
                skia::Color::from_argb(255, 0x00, 0xff, 0xff),
                skia::Color::from_argb(255, 0xff, 0xff, 0x00),
                skia::Color::from_argb(255, 0x00, 0xff, 0x00),
                skia::Color::from_argb(255, 0xff, 0x00, 0xff),
                skia::Color::from_argb(255, 0xff, 0x80, 0x00),
                skia::Color::from_argb(255, 0xff, 0x00, 0x00),
                skia::Color::from_argb(255, 0x00, 0xaa, 0xff),
                skia::Color::from_argb(255, 0xff, 0xff, 0xff),
                skia::Color::from_argb(255, 0x80, 0xff, 0x80),
                skia::Color::from_argb(255, 0xff, 0x80, 0xc0),
            ],
        }
    }

    /// Series color for position `index`, wrapping around the palette.
    pub fn series_color(&self, index: usize) -> skia::Color {
        self.palette[index % self.palette.len()]
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

fn solarized_accents() -> [skia::Color; 10] {
    [
        skia::Color::from_argb(255, 0x26, 0x8b, 0xd2), // blue
        skia::Color::from_argb(255, 0xcb, 0x4b, 0x16), // orange
        skia::Color::from_argb(255, 0x85, 0x99, 0x00), // green
        skia::Color::from_argb(255, 0xdc, 0x32, 0x2f), // red
        skia::Color::from_argb(255, 0x6c, 0x71, 0xc4), // violet
        skia::Color::from_argb(255, 0xb5, 0x89, 0x00), // yellow
        skia::Color::from_argb(255, 0xd3, 0x36, 0x82), // magenta
        skia::Color::from_argb(255, 0x2a, 0xa1, 0x98), // cyan
        skia::Color::from_argb(255, 0x93, 0xa1, 0xa1), // base1
        skia::Color::from_argb(255, 0x58, 0x6e, 0x75), // base01
    ]
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![
        Theme::light(),
        Theme::dark(),
        Theme::solarized_dark(),
        Theme::solarized_light(),
        Theme::high_contrast_dark(),
    ]
}

/// Find a theme by its `name` (case-insensitive).
pub fn find(name: &str) -> Option<Theme> {
    presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name.trim()))
}

/// Names accepted by [`find`].
pub fn names() -> Vec<&'static str> {
    presets().iter().map(|t| t.name).collect()
}

/// Parse a color name (the tab10 names plus black/white) or `#RRGGBB`.
pub fn parse_color(s: &str) -> Result<skia::Color, String> {
    let named = match s.trim().to_ascii_lowercase().as_str() {
        "blue" | "tab:blue" => Some(TAB10[0]),
        "orange" | "tab:orange" => Some(TAB10[1]),
        "green" | "tab:green" => Some(TAB10[2]),
        "red" | "tab:red" => Some(TAB10[3]),
        "purple" | "tab:purple" => Some(TAB10[4]),
        "brown" | "tab:brown" => Some(TAB10[5]),
        "pink" | "tab:pink" => Some(TAB10[6]),
        "gray" | "grey" | "tab:gray" => Some(TAB10[7]),
        "olive" | "tab:olive" => Some(TAB10[8]),
        "cyan" | "tab:cyan" => Some(TAB10[9]),
        "black" => Some(skia::Color::BLACK),
        "white" => Some(skia::Color::WHITE),
        _ => None,
    };
    if let Some(c) = named {
        return Ok(c);
    }

    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(format!("invalid color '{s}': expected a color name or #RRGGBB"));
    }
    let byte = |h: &str| {
        u8::from_str_radix(h, 16).map_err(|_| format!("invalid color '{s}': bad hex digit"))
    };
    Ok(skia::Color::from_rgb(byte(&hex[..2])?, byte(&hex[2..4])?, byte(&hex[4..])?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_lookup_ignores_case() {
        assert_eq!(find("Solarized-Dark").map(|t| t.name), Some("solarized-dark"));
        assert!(find("neon").is_none());
    }

    #[test]
    fn colors_parse_by_name_and_hex() {
        assert_eq!(parse_color("red").unwrap(), TAB10[3]);
        assert_eq!(parse_color("#102030").unwrap(), skia::Color::from_rgb(0x10, 0x20, 0x30));
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#gg0000").is_err());
    }
}
