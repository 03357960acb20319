use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Lighten, Srgb};

// ---------------------------------------------------------------------------
// Dashboard theme
// ---------------------------------------------------------------------------

/// Heading and chart accent.
pub const ACCENT_HEX: &str = "#4CAF50";
/// Background of the upload drop zone.
pub const DROP_ZONE_HEX: &str = "#f0f8ff";

/// Parse a `#rrggbb` string into an egui colour.
pub fn parse_hex(hex: &str) -> Option<Color32> {
    let rgb: Srgb<u8> = hex.parse().ok()?;
    Some(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

pub fn accent() -> Color32 {
    parse_hex(ACCENT_HEX).unwrap_or(Color32::DARK_GREEN)
}

pub fn drop_zone() -> Color32 {
    parse_hex(DROP_ZONE_HEX).unwrap_or(Color32::from_gray(240))
}

/// Colour for fallback and error messages.
pub fn warning() -> Color32 {
    Color32::RED
}

/// A lighter shade of `color` for filled chart marks.
pub fn lighten(color: Color32, amount: f32) -> Color32 {
    let rgb = Srgb::new(color.r(), color.g(), color.b()).into_format::<f32>();
    let hsl: Hsl = rgb.into_color();
    let rgb: Srgb = hsl.lighten(amount).into_color();
    let rgb = rgb.into_format::<u8>();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}
