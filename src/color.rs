use eframe::egui::Color32;
use palette::{named, Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Fixed gauge palette
// ---------------------------------------------------------------------------

/// Ring colours of the wash-frequency gauge, outermost segment ('8-9') first.
/// The last entry colours the hidden filler half of the ring.
pub const GAUGE_PALETTE: [Srgb<u8>; 10] = [
    named::BLACK,
    named::GREY,
    named::PURPLE,
    named::GREEN,
    named::BLUE,
    named::YELLOW,
    named::GOLD,
    named::ORANGE,
    named::RED,
    named::WHITE,
];

/// Needle and centre marker colour (`#2F6497`).
pub const NEEDLE_COLOR: Srgb<u8> = Srgb::new(0x2F, 0x64, 0x97);

pub fn to_color32(c: Srgb<u8>) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

/// `#rrggbb` form used in exported chart specs.
pub fn to_hex(c: Srgb<u8>) -> String {
    format!("#{:02X}{:02X}{:02X}", c.red, c.green, c.blue)
}

// ---------------------------------------------------------------------------
// Continuous colour scale: numeric value → Color32
// ---------------------------------------------------------------------------

/// Maps a numeric range onto hues from blue (low) to red (high).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    min: f64,
    max: f64,
}

impl ColorScale {
    /// Build a scale spanning the given values. Empty input yields a
    /// degenerate scale that maps everything to the low end.
    pub fn spanning(values: impl IntoIterator<Item = f64>) -> Self {
        let (min, max) = values
            .into_iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if min > max {
            ColorScale { min: 0.0, max: 0.0 }
        } else {
            ColorScale { min, max }
        }
    }

    /// Position of `value` within the scale, clamped to `[0, 1]`.
    pub fn position(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        if range.abs() < f64::EPSILON {
            0.0
        } else {
            ((value - self.min) / range).clamp(0.0, 1.0)
        }
    }

    pub fn color_for(&self, value: f64) -> Color32 {
        let hue = 240.0 - self.position(value) as f32 * 240.0;
        let hsl = Hsl::new(hue, 0.75, 0.55);
        let rgb: Srgb = hsl.into_color();
        to_color32(rgb.into_format::<u8>())
    }
}
