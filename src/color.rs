//! Ball and effect colors.

use serde::{Deserialize, Serialize};

/// An sRGB color triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Blend toward white by `t` (0 = unchanged, 1 = white)
    pub fn lighten(self, t: f32) -> Self {
        let lift = |c: u8| (c as f32 + (255.0 - c as f32) * t).min(255.0) as u8;
        Self::new(lift(self.r), lift(self.g), lift(self.b))
    }

    /// Scale toward black by `t` (0 = unchanged, 1 = black)
    pub fn darken(self, t: f32) -> Self {
        let drop = |c: u8| (c as f32 * (1.0 - t)).max(0.0) as u8;
        Self::new(drop(self.r), drop(self.g), drop(self.b))
    }

    /// Linear blend from `self` to `other`
    pub fn blend(self, other: Rgb, t: f32) -> Self {
        let mix = |a: u8, b: u8| (a as f32 * (1.0 - t) + b as f32 * t) as u8;
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

/// The six ball colors, paired with display names for the standings table
pub const BALL_PALETTE: [(Rgb, &str); 6] = [
    (Rgb::new(255, 0, 0), "Red"),
    (Rgb::new(0, 255, 0), "Green"),
    (Rgb::new(0, 0, 255), "Blue"),
    (Rgb::new(255, 255, 0), "Yellow"),
    (Rgb::new(255, 0, 255), "Magenta"),
    (Rgb::new(0, 255, 255), "Cyan"),
];

/// Rainbow cycle used by explosion debris
pub const RAINBOW: [Rgb; 6] = [
    Rgb::new(255, 0, 0),
    Rgb::new(255, 127, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(255, 0, 255),
];

/// Display name for a palette color
pub fn color_name(color: Rgb) -> &'static str {
    BALL_PALETTE
        .iter()
        .find(|(c, _)| *c == color)
        .map(|(_, name)| *name)
        .unwrap_or("Unknown")
}
