use ratatui::style::{Color, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    Truecolor,
    X256,
    X16,
}

/// Detect terminal color depth from environment.
/// Priority: DRIVEFRAME_COLOR override -> COLORTERM truecolor/24bit ->
/// TERM *256color -> fallback 16.
pub fn detect_color_depth() -> ColorDepth {
    color_depth_from(
        std::env::var("DRIVEFRAME_COLOR").ok().as_deref(),
        std::env::var("COLORTERM").ok().as_deref(),
        std::env::var("TERM").ok().as_deref(),
    )
}

fn color_depth_from(force: Option<&str>, colorterm: Option<&str>, term: Option<&str>) -> ColorDepth {
    if let Some(force) = force {
        match force.trim().to_ascii_lowercase().as_str() {
            "truecolor" | "24bit" | "24-bit" => return ColorDepth::Truecolor,
            "256" | "x256" | "256color" => return ColorDepth::X256,
            "16" | "ansi" | "x16" => return ColorDepth::X16,
            _ => {}
        }
    }
    if let Some(colorterm) = colorterm {
        let s = colorterm.to_ascii_lowercase();
        if s.contains("truecolor") || s.contains("24bit") {
            return ColorDepth::Truecolor;
        }
    }
    if term.is_some_and(|t| t.to_ascii_lowercase().contains("256color")) {
        return ColorDepth::X256;
    }
    ColorDepth::X16
}

/// Map a Color to the nearest representable color in the chosen depth.
/// Only RGB colours are touched; named and indexed colours pass through.
pub fn quantize_color(color: Color, depth: ColorDepth) -> Color {
    match (color, depth) {
        (_, ColorDepth::Truecolor) => color,
        (Color::Rgb(r, g, b), ColorDepth::X256) => Color::Indexed(rgb_to_xterm256(r, g, b)),
        (Color::Rgb(r, g, b), ColorDepth::X16) => nearest_ansi16(r, g, b),
        _ => color,
    }
}

pub fn quantize_style(mut style: Style, depth: ColorDepth) -> Style {
    style.fg = style.fg.map(|c| quantize_color(c, depth));
    style.bg = style.bg.map(|c| quantize_color(c, depth));
    style
}

const ANSI16: [(Color, (u8, u8, u8)); 16] = [
    (Color::Black, (0, 0, 0)),
    (Color::Red, (205, 0, 0)),
    (Color::Green, (0, 205, 0)),
    (Color::Yellow, (205, 205, 0)),
    (Color::Blue, (0, 0, 238)),
    (Color::Magenta, (205, 0, 205)),
    (Color::Cyan, (0, 205, 205)),
    (Color::Gray, (229, 229, 229)),
    (Color::DarkGray, (127, 127, 127)),
    (Color::LightRed, (255, 0, 0)),
    (Color::LightGreen, (0, 255, 0)),
    (Color::LightYellow, (255, 255, 0)),
    (Color::LightBlue, (92, 92, 255)),
    (Color::LightMagenta, (255, 0, 255)),
    (Color::LightCyan, (0, 255, 255)),
    (Color::White, (255, 255, 255)),
];

fn nearest_ansi16(r: u8, g: u8, b: u8) -> Color {
    ANSI16
        .iter()
        .min_by_key(|(_, rgb)| dist_sq((r, g, b), *rgb))
        .map(|(color, _)| *color)
        .unwrap_or(Color::Reset)
}

/// Closest xterm-256 index, choosing between the 6x6x6 cube and the
/// grayscale ramp.
fn rgb_to_xterm256(r: u8, g: u8, b: u8) -> u8 {
    let level = |c: u8| -> u8 {
        if c < 48 {
            0
        } else if c < 115 {
            1
        } else {
            (c - 35) / 40
        }
    };
    let (cr, cg, cb) = (level(r), level(g), level(b));
    let cube_index = 16 + 36 * cr + 6 * cg + cb;
    let cube_rgb = (cube_value(cr), cube_value(cg), cube_value(cb));

    let avg = ((r as u16 + g as u16 + b as u16) / 3) as u8;
    let gray_step = if avg < 8 { 0 } else { ((avg - 8) / 10).min(23) };
    let gray_value = 8 + 10 * gray_step;
    let gray_index = 232 + gray_step;

    if dist_sq((r, g, b), (gray_value, gray_value, gray_value)) < dist_sq((r, g, b), cube_rgb) {
        gray_index
    } else {
        cube_index
    }
}

fn cube_value(level: u8) -> u8 {
    if level == 0 {
        0
    } else {
        55 + 40 * level
    }
}

fn dist_sq(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
    let d = |x: u8, y: u8| (x as i32 - y as i32).pow(2) as u32;
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}
