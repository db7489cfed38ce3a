//! HSV colours and the widget colour theme.

use sdl2::pixels::Color;

/// A colour in hue (0..360), saturation (0..=100), value (0..=100) form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    pub h: u16,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub const fn new(h: u16, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }

    pub fn to_rgb(self) -> Color {
        hsv_to_rgb(self.h, self.s, self.v)
    }
}

/// Converts HSV to RGB, truncating each channel so 50% grey is 127 rather than 128.
pub fn hsv_to_rgb(h: u16, s: u8, v: u8) -> Color {
    let h = (h % 360) as f32 / 60.0;
    let s = s.min(100) as f32 / 100.0;
    let v = v.min(100) as f32 / 100.0;

    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Color::RGB((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

/// Scales each channel down by `divisor`; used for dead creatures.
pub fn darken(color: Color, divisor: u8) -> Color {
    Color::RGB(color.r / divisor, color.g / divisor, color.b / divisor)
}

/// Which part of a widget a theme colour is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Background,
    Foreground,
    Highlight,
    Lowlight,
    SelectedBackground,
    SelectedForeground,
}

/// A set of brightness values sharing one hue and saturation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTheme {
    hue: u16,
    saturation: u8,
    background: u8,
    foreground: u8,
    highlight: u8,
    lowlight: u8,
    selected_background: u8,
    selected_foreground: u8,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            hue: 0,
            saturation: 0,
            background: 75,
            foreground: 0,
            highlight: 100,
            lowlight: 0,
            selected_background: 88,
            selected_foreground: 0,
        }
    }
}

impl ColorTheme {
    pub fn get(&self, role: Role) -> Color {
        let value = match role {
            Role::Background => self.background,
            Role::Foreground => self.foreground,
            Role::Highlight => self.highlight,
            Role::Lowlight => self.lowlight,
            Role::SelectedBackground => self.selected_background,
            Role::SelectedForeground => self.selected_foreground,
        };
        hsv_to_rgb(self.hue, self.saturation, value)
    }

    /// The same brightness values, tinted.
    pub fn colored(self, hue: u16, saturation: u8) -> Self {
        Self { hue, saturation, ..self }
    }

    /// Light-on-dark version of this theme.
    pub fn inverted(self) -> Self {
        Self {
            background: 100 - self.background,
            foreground: 100 - self.foreground,
            highlight: 100 - self.highlight,
            lowlight: 100 - self.lowlight,
            selected_background: 100 - self.selected_background,
            selected_foreground: 100 - self.selected_foreground,
            ..self
        }
    }
}
