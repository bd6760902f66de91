//! Hex colour helpers for ring shading
//!
//! Categories and exemplars reuse their stage colour, lightened toward white
//! so the rings read as nested bands of the same hue.

/// Parsed `#rrggbb` colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#rrggbb` or `rrggbb`; `#rgb` shorthand is expanded.
    pub fn parse_hex(value: &str) -> Option<Self> {
        let hex = value.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();

        match hex.len() {
            6 => Some(Self {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Some(Self {
                    r: expand(0)?,
                    g: expand(1)?,
                    b: expand(2)?,
                })
            }
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Move each channel `factor` of the way toward white
    pub fn lighten(&self, factor: f64) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let up = |c: u8| (c as f64 + (255.0 - c as f64) * factor).min(255.0) as u8;
        Self {
            r: up(self.r),
            g: up(self.g),
            b: up(self.b),
        }
    }
}

/// Lighten a hex colour; unparseable input is returned unchanged.
pub fn lighten_hex(color: &str, factor: f64) -> String {
    match Rgb::parse_hex(color) {
        Some(rgb) => rgb.lighten(factor).to_hex(),
        None => color.to_string(),
    }
}
